use std::fmt;
use xcore_domain::command::CommandKey;

/// One line of a help listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub command: CommandKey,
    /// Canonical aliases from the top-level command down.
    pub path: Vec<String>,
    /// `"/<alias path> - <description>"`
    pub line: String,
}

/// Help content for one module. Pagination and styling are left to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpListing {
    title: String,
    padding: String,
    entries: Vec<HelpEntry>,
}

impl HelpListing {
    #[must_use]
    pub const fn new(title: String, padding: String, entries: Vec<HelpEntry>) -> Self {
        Self { title, padding, entries }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn padding(&self) -> &str {
        &self.padding
    }

    #[must_use]
    pub fn entries(&self) -> &[HelpEntry] {
        &self.entries
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.line.as_str())
    }
}

impl fmt::Display for HelpListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} {}", self.padding, self.title, self.padding)?;
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

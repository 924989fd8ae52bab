use std::fmt;
use std::str::FromStr;
use toml_edit::{DocumentMut, Item, Table, TomlError, Value};

/// In-memory root of a configuration document.
///
/// Hierarchical key/value tree with comments. Keys are addressed by dotted paths
/// (`"help.title"`); every segment but the last names a table. Parsing and rendering
/// keep the original formatting, so an untouched document renders back byte-for-byte.
#[derive(Debug, Clone, Default)]
pub struct ConfigDocument {
    doc: DocumentMut,
}

impl ConfigDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses TOML text.
    ///
    /// # Errors
    /// Returns the parser error for malformed text.
    pub fn parse(text: &str) -> Result<Self, TomlError> {
        text.parse()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doc.as_table().is_empty()
    }

    #[must_use]
    pub const fn as_document(&self) -> &DocumentMut {
        &self.doc
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Item> {
        let (parents, leaf) = split(path)?;
        let mut table = self.doc.as_table();
        for segment in parents {
            table = table.get(segment)?.as_table()?;
        }
        table.get(leaf).filter(|item| !item.is_none())
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    #[must_use]
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path)?.as_str()
    }

    #[must_use]
    pub fn get_integer(&self, path: &str) -> Option<i64> {
        self.get(path)?.as_integer()
    }

    #[must_use]
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path)?.as_bool()
    }

    #[must_use]
    pub fn get_float(&self, path: &str) -> Option<f64> {
        self.get(path)?.as_float()
    }

    /// Sets a value, creating intermediate tables. A non-table segment on the way is
    /// replaced by a table.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let Some((parents, leaf)) = split(path) else {
            return;
        };
        let table = table_for(self.doc.as_table_mut(), &parents);
        table.insert(leaf, Item::Value(value.into()));
    }

    /// Sets a value only when the path is absent. Returns whether it was written.
    pub fn set_default(&mut self, path: &str, value: impl Into<Value>) -> bool {
        if self.contains(path) {
            return false;
        }
        self.set(path, value);
        true
    }

    /// Attaches a comment line above an existing key. Multi-line comments are split
    /// into one `#` line each. Returns `false` when the key does not exist.
    pub fn comment(&mut self, path: &str, comment: &str) -> bool {
        let Some((parents, leaf)) = split(path) else {
            return false;
        };
        let mut table = self.doc.as_table_mut();
        for segment in parents {
            match table.get_mut(segment).and_then(Item::as_table_mut) {
                Some(next) => table = next,
                None => return false,
            }
        }

        let prefix: String = comment.lines().map(|line| format!("# {line}\n")).collect();
        if let Some(Item::Table(sub)) = table.get_mut(leaf) {
            sub.decor_mut().set_prefix(prefix);
            return true;
        }
        match table.key_mut(leaf) {
            Some(mut key) => {
                key.leaf_decor_mut().set_prefix(prefix);
                true
            },
            None => false,
        }
    }

    pub fn remove(&mut self, path: &str) -> Option<Item> {
        let (parents, leaf) = split(path)?;
        let mut table = self.doc.as_table_mut();
        for segment in parents {
            table = table.get_mut(segment)?.as_table_mut()?;
        }
        table.remove(leaf)
    }
}

fn split(path: &str) -> Option<(Vec<&str>, &str)> {
    let mut segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    let leaf = segments.pop()?;
    Some((segments, leaf))
}

fn table_for<'a>(mut table: &'a mut Table, parents: &[&str]) -> &'a mut Table {
    for segment in parents {
        let entry = table.entry(segment).or_insert_with(|| Item::Table(Table::new()));
        if !entry.is_table() {
            *entry = Item::Table(Table::new());
        }
        table = match entry {
            Item::Table(next) => next,
            _ => unreachable!("entry was just replaced with a table"),
        };
    }
    table
}

impl FromStr for ConfigDocument {
    type Err = TomlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self { doc: s.parse()? })
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.doc, f)
    }
}

/// Documents compare by their rendered text.
impl PartialEq for ConfigDocument {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for ConfigDocument {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_set_creates_tables() {
        let mut doc = ConfigDocument::new();
        doc.set("help.title", "Command List");
        doc.set("help.padding", "-=");
        doc.set("enabled", true);

        assert_eq!(doc.get_str("help.title"), Some("Command List"));
        assert_eq!(doc.get_bool("enabled"), Some(true));
        assert!(doc.to_string().contains("[help]"));
    }

    #[test]
    fn set_default_keeps_existing_values() {
        let mut doc = ConfigDocument::parse("limit = 3\n").unwrap();
        assert!(!doc.set_default("limit", 10_i64));
        assert!(doc.set_default("other", 10_i64));
        assert_eq!(doc.get_integer("limit"), Some(3));
        assert_eq!(doc.get_integer("other"), Some(10));
    }

    #[test]
    fn invalid_paths_are_ignored() {
        let mut doc = ConfigDocument::new();
        doc.set("a..b", 1_i64);
        assert!(doc.is_empty());
        assert!(doc.get("").is_none());
    }
}

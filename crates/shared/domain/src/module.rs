use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;

/// Validated identity of a registered module.
///
/// The id doubles as the name of the module's configuration subdirectory, so it is
/// restricted to lowercase ASCII alphanumerics, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(String);

impl ModuleId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rejected module identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidModuleId {
    pub value: String,
    pub reason: &'static str,
}

impl fmt::Display for InvalidModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid module id '{}': {}", self.value, self.reason)
    }
}

impl Error for InvalidModuleId {}

impl TryFrom<&str> for ModuleId {
    type Error = InvalidModuleId;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let id = value.trim().to_lowercase();

        if id.is_empty() {
            return Err(InvalidModuleId { value: value.to_owned(), reason: "id cannot be empty" });
        }

        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(InvalidModuleId {
                value: value.to_owned(),
                reason: "id contains illegal characters",
            });
        }

        Ok(Self(id))
    }
}

impl TryFrom<String> for ModuleId {
    type Error = InvalidModuleId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ModuleId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ModuleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

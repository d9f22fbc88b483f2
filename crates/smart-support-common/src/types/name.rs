use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, de::Error};
use smol_str::SmolStr;

use super::field::FieldError;

/// Minimum name length, in characters
pub const NAME_MIN_LEN: usize = 2;
/// Maximum name length, in characters
pub const NAME_MAX_LEN: usize = 60;

/// Letters and whitespace only
pub static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").unwrap());

/// A person's name: letters and whitespace, 2 to 60 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Hash)]
#[serde(transparent)]
pub struct Name(SmolStr);

impl Name {
    /// Fallible constructor, trims and validates.
    ///
    /// Rules are checked in order (min length, max length, characters) and the
    /// first violation wins.
    pub fn new(name: &str) -> Result<Self, FieldError> {
        let name = name.trim();
        let len = name.chars().count();
        if len < NAME_MIN_LEN {
            Err(FieldError::NameTooShort { min: NAME_MIN_LEN })
        } else if len > NAME_MAX_LEN {
            Err(FieldError::NameTooLong { max: NAME_MAX_LEN })
        } else if !NAME_REGEX.is_match(name) {
            Err(FieldError::NameCharacters)
        } else {
            Ok(Self(SmolStr::new(name)))
        }
    }

    /// The trimmed name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Name {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: String = Deserialize::deserialize(deserializer)?;
        Self::new(&value).map_err(D::Error::custom)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Name> for String {
    fn from(value: Name) -> Self {
        value.0.to_string()
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

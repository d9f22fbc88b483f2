use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, de::Error};
use smol_str::SmolStr;

use super::field::FieldError;

/// Indian mobile number, optionally `+91` prefixed. ASCII digits only.
pub static CONTACT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+91)?[6-9][0-9]{9}$").unwrap());

/// A mobile contact number as typed by the user (trimmed, prefix preserved).
///
/// The backend receives exactly what the user entered, so `+919876543210` and
/// `9876543210` are kept distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Hash)]
#[serde(transparent)]
pub struct Contact(SmolStr);

impl Contact {
    /// Fallible constructor, trims and validates
    pub fn new(contact: &str) -> Result<Self, FieldError> {
        let contact = contact.trim();
        if !CONTACT_REGEX.is_match(contact) {
            Err(FieldError::MobileNumber)
        } else {
            Ok(Self(SmolStr::new(contact)))
        }
    }

    /// The number as entered
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The ten subscriber digits, without any country prefix
    pub fn national_number(&self) -> &str {
        self.0.strip_prefix("+91").unwrap_or(self.0.as_str())
    }

    /// Whether the `+91` country prefix was supplied
    pub fn has_country_code(&self) -> bool {
        self.0.starts_with("+91")
    }
}

impl FromStr for Contact {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Contact {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: String = Deserialize::deserialize(deserializer)?;
        Self::new(&value).map_err(D::Error::custom)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Contact> for String {
    fn from(value: Contact) -> Self {
        value.0.to_string()
    }
}

impl AsRef<str> for Contact {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for Contact {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

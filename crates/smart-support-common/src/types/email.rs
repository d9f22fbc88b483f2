use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, de::Error};
use smol_str::SmolStr;

use super::field::FieldError;

/// Email address shape accepted by the form.
///
/// Leading dots and doubled dots are rejected separately in [`Email::new`], the
/// regex engine has no lookaround.
pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .unwrap()
});

/// A syntactically valid email address (trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Hash)]
#[serde(transparent)]
pub struct Email(SmolStr);

impl Email {
    /// Fallible constructor, trims and validates
    pub fn new(email: &str) -> Result<Self, FieldError> {
        let email = email.trim();
        if email.starts_with('.') || email.contains("..") || !EMAIL_REGEX.is_match(email) {
            Err(FieldError::Email)
        } else {
            Ok(Self(SmolStr::new(email)))
        }
    }

    /// The trimmed address
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything after the `@`
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map(|(_, d)| d).unwrap_or_default()
    }
}

impl FromStr for Email {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Email {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: String = Deserialize::deserialize(deserializer)?;
        Self::new(&value).map_err(D::Error::custom)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0.to_string()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for Email {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for good in [
            "user@example.com",
            "jane@example.com",
            "first.last@sub.example.co.in",
            "a+tag@example.org",
            "o'brien@example.ie",
            "UPPER@EXAMPLE.COM",
            "x_y-z@my-domain.io",
        ] {
            assert!(Email::new(good).is_ok(), "{good}");
        }
        assert_eq!(Email::new("  user@example.com ").unwrap().as_str(), "user@example.com");
        assert_eq!(Email::new("user@example.com").unwrap().domain(), "example.com");
    }

    #[test]
    fn rejects_bad_syntax() {
        for bad in [
            "",
            "userexample.com",
            "user@",
            "@example.com",
            "user@example",
            "user@example.c",
            "user@.example.com",
            "user@-example.com",
            ".user@example.com",
            "user.@example.com",
            "us..er@example.com",
            "user@example..com",
            "user name@example.com",
            "user@exa mple.com",
            "user@@example.com",
            "user@example.com.",
            "user@example.123",
        ] {
            let err = Email::new(bad).unwrap_err();
            assert_eq!(err, FieldError::Email, "{bad}");
            assert_eq!(err.to_string(), "Please enter a valid email address");
        }
    }
}

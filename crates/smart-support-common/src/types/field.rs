use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three inputs on the verification form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Full name
    Name,
    /// Mobile number
    Contact,
    /// Email address
    Email,
}

impl Field {
    /// All fields, in display order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Contact, Field::Email];

    /// Form control id, also used as the key in error maps.
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Contact => "contact",
            Self::Email => "email",
        }
    }

    /// Human-facing label shown next to the input.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Contact => "Contact No.",
            Self::Email => "Email Id",
        }
    }

    /// Placeholder text for the empty input.
    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "Enter your full name",
            Self::Contact => "10-digit mobile or +91 format",
            Self::Email => "Enter your email address",
        }
    }

    /// HTML-style input type hint.
    pub const fn input_type(&self) -> &'static str {
        match self {
            Self::Name => "text",
            Self::Contact => "tel",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A single violated field rule.
///
/// Each variant maps to exactly one user-facing message; the wording is part of
/// the form's contract and is asserted on verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error, miette::Diagnostic)]
pub enum FieldError {
    /// Name shorter than the minimum length
    #[error("Name must be at least {min} characters")]
    #[diagnostic(code(smart_support::field::name_too_short))]
    NameTooShort {
        /// Minimum accepted length
        min: usize,
    },

    /// Name longer than the maximum length
    #[error("Name must be at most {max} characters")]
    #[diagnostic(code(smart_support::field::name_too_long))]
    NameTooLong {
        /// Maximum accepted length
        max: usize,
    },

    /// Name contains something other than letters and whitespace
    #[error("Name can only contain letters and spaces")]
    #[diagnostic(code(smart_support::field::name_characters))]
    NameCharacters,

    /// Contact is not a recognised mobile number
    #[error("Please enter a valid Indian mobile number (10 digits or +91 prefixed)")]
    #[diagnostic(
        code(smart_support::field::mobile_number),
        help("use 10 digits starting with 6-9, optionally prefixed with +91")
    )]
    MobileNumber,

    /// Email does not have valid address syntax
    #[error("Please enter a valid email address")]
    #[diagnostic(code(smart_support::field::email))]
    Email,
}

impl FieldError {
    /// The field this rule belongs to.
    pub const fn field(&self) -> Field {
        match self {
            Self::NameTooShort { .. } | Self::NameTooLong { .. } | Self::NameCharacters => {
                Field::Name
            }
            Self::MobileNumber => Field::Contact,
            Self::Email => Field::Email,
        }
    }
}

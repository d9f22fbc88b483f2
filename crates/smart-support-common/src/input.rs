//! The validated form payload and the backend wire format built from it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Contact, Email, Field, FieldError, Name};

/// Separator used when the backend reports a list of problems
pub const DETAIL_SEPARATOR: &str = ", ";

/// Three fields that have all passed validation.
///
/// Exists only for the duration of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationInput {
    /// Full name
    pub name: Name,
    /// Mobile number
    pub contact: Contact,
    /// Email address
    pub email: Email,
}

impl VerificationInput {
    /// Validate all three raw values at once, collecting every field failure.
    pub fn new(name: &str, contact: &str, email: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = Name::new(name).map_err(|e| errors.insert(e)).ok();
        let contact = Contact::new(contact).map_err(|e| errors.insert(e)).ok();
        let email = Email::new(email).map_err(|e| errors.insert(e)).ok();

        match (name, contact, email) {
            (Some(name), Some(contact), Some(email)) => Ok(Self {
                name,
                contact,
                email,
            }),
            _ => Err(errors),
        }
    }

    /// Borrow this input as the backend request body
    pub fn to_request(&self) -> VerifyRequest<'_> {
        VerifyRequest {
            name: self.name.as_str(),
            email: self.email.as_str(),
            phone_number: self.contact.as_str(),
        }
    }
}

/// At most one failure per field, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    /// Record a failure, replacing any earlier one for the same field
    pub fn insert(&mut self, error: FieldError) {
        self.0.insert(error.field(), error);
    }

    /// Drop the failure for a field
    pub fn clear(&mut self, field: Field) -> Option<FieldError> {
        self.0.remove(&field)
    }

    /// Drop every failure
    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    /// The failure recorded for a field, if any
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// No field failed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failures in field display order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(f, e)| (*f, e))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, err)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// `POST /validate-users` request body.
///
/// Field order matches what the backend documents: name, email, phone_number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerifyRequest<'a> {
    /// Full name
    pub name: &'a str,
    /// Email address
    pub email: &'a str,
    /// Mobile number, renamed to the backend's convention
    pub phone_number: &'a str,
}

/// Success body. Every field is optional and unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOutput {
    /// Optional welcome text to show the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Failure body, `{ "detail": string | [..] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// What went wrong, as the backend phrased it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Detail>,
}

impl ErrorBody {
    /// Flatten the detail into a single displayable line.
    ///
    /// Returns `None` when there is nothing usable to show.
    pub fn message(&self) -> Option<String> {
        self.detail.as_ref().and_then(Detail::message)
    }
}

/// The `detail` member of an error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Detail {
    /// A single message
    Message(String),
    /// Several messages, joined with [`DETAIL_SEPARATOR`] for display
    List(Vec<DetailEntry>),
    /// Anything else the backend decided to send
    Other(Value),
}

impl Detail {
    /// Flatten into one line, `None` if empty or unusable
    pub fn message(&self) -> Option<String> {
        let msg = match self {
            Detail::Message(msg) => msg.clone(),
            Detail::List(entries) => entries
                .iter()
                .map(DetailEntry::text)
                .collect::<Vec<_>>()
                .join(DETAIL_SEPARATOR),
            Detail::Other(_) => return None,
        };
        if msg.trim().is_empty() { None } else { Some(msg) }
    }
}

/// One entry of a `detail` list.
///
/// Plain strings are the documented shape. Structured entries (`{"msg": ..}`,
/// as emitted by common Python validation layers) are reduced to their message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailEntry {
    /// Plain text entry
    Text(String),
    /// Structured entry carrying a `msg`
    Structured {
        /// The human-readable part
        msg: String,
    },
    /// Anything else, rendered as JSON
    Other(Value),
}

impl DetailEntry {
    /// Display text for this entry
    pub fn text(&self) -> String {
        match self {
            DetailEntry::Text(s) => s.clone(),
            DetailEntry::Structured { msg } => msg.clone(),
            DetailEntry::Other(v) => v.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_field_failure() {
        let errors = VerificationInput::new("J", "12345", "nope").unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::Name), Some(&FieldError::NameTooShort { min: 2 }));
        assert_eq!(errors.get(Field::Contact), Some(&FieldError::MobileNumber));
        assert_eq!(errors.get(Field::Email), Some(&FieldError::Email));
        let order: Vec<_> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(order, Field::ALL);
    }

    #[test]
    fn partial_failure_reports_only_bad_fields() {
        let errors =
            VerificationInput::new("Jane Doe", "5876543210", "jane@example.com").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.to_string(),
            "contact: Please enter a valid Indian mobile number (10 digits or +91 prefixed)"
        );
    }

    #[test]
    fn request_body_renames_contact() {
        let input =
            VerificationInput::new("Jane Doe", "9876543210", "jane@example.com").unwrap();
        let body = serde_json::to_string(&input.to_request()).unwrap();
        assert_eq!(
            body,
            r#"{"name":"Jane Doe","email":"jane@example.com","phone_number":"9876543210"}"#
        );
    }

    #[test]
    fn request_body_uses_trimmed_values() {
        let input =
            VerificationInput::new("  Jane Doe ", " +919876543210", "jane@example.com  ").unwrap();
        let req = input.to_request();
        assert_eq!(req.name, "Jane Doe");
        assert_eq!(req.phone_number, "+919876543210");
        assert_eq!(req.email, "jane@example.com");
    }

    #[test]
    fn detail_list_is_joined() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": ["name too short", "bad email"]}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("name too short, bad email"));
    }

    #[test]
    fn detail_string_is_used_directly() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "User not found"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("User not found"));
    }

    #[test]
    fn structured_detail_entries_use_msg() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail": [{"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"}, "and another"]}"#,
        )
        .unwrap();
        assert_eq!(
            body.message().as_deref(),
            Some("value is not a valid email address, and another")
        );
    }

    #[test]
    fn unusable_detail_yields_none() {
        for raw in [r#"{}"#, r#"{"detail": null}"#, r#"{"detail": 42}"#, r#"{"detail": ""}"#, r#"{"detail": []}"#] {
            let body: ErrorBody = serde_json::from_str(raw).unwrap();
            assert_eq!(body.message(), None, "{raw}");
        }
    }

    #[test]
    fn success_message_is_optional() {
        let out: VerifyOutput = serde_json::from_str("{}").unwrap();
        assert_eq!(out.message, None);
        let out: VerifyOutput =
            serde_json::from_str(r#"{"message": "Welcome back, Jane", "user_id": 7}"#).unwrap();
        assert_eq!(out.message.as_deref(), Some("Welcome back, Jane"));
    }
}

//! Headless model of the three-field verification form.
//!
//! The form owns raw field text, per-field errors, the submission banner and
//! the in-flight flag. Rendering is left to [`crate::layout`]; everything here
//! is plain state plus the submit handshake.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use smart_support_common::{Field, FieldError, FieldErrors, VerificationInput};
use smart_support_common::{Contact, Email, Name};
use tokio::sync::RwLock;

use crate::client::FALLBACK_ERROR_MESSAGE;

/// Submit button label while idle
pub const SUBMIT_LABEL: &str = "Verify";
/// Submit button label while a submission is outstanding
pub const SUBMIT_LABEL_BUSY: &str = "Verifying...";

/// Shared boolean "something is loading" flag.
///
/// The page hands one of these to every form it renders so a round trip
/// started from one form disables all of them.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    /// Current value
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Overwrite the value
    pub fn set(&self, loading: bool) {
        self.0.store(loading, Ordering::Release);
    }

    /// Set the flag until the returned guard is dropped
    pub fn hold(&self) -> LoadingGuard {
        self.set(true);
        LoadingGuard(self.clone())
    }

    /// Set the flag only if it was clear. `None` means someone else holds it.
    pub fn try_hold(&self) -> Option<LoadingGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard(self.clone()))
    }
}

/// Clears its [`LoadingFlag`] on drop, whatever way the holder exits.
#[derive(Debug)]
pub struct LoadingGuard(LoadingFlag);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Something on the form that can be disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// One of the text inputs
    Input(Field),
    /// The submit button
    Submit,
}

/// Outcome of a call to [`VerificationForm::submit`] that did not fail in the callback.
#[derive(Debug)]
pub enum Submission<T> {
    /// Callback succeeded; the form has been reset
    Accepted(T),
    /// At least one field failed validation; nothing was sent
    Invalid(FieldErrors),
    /// A submission was already outstanding; nothing happened
    Ignored,
}

impl<T> Submission<T> {
    /// Whether the callback ran and succeeded
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted(_))
    }
}

#[derive(Debug, Default)]
struct FormState {
    name: String,
    contact: String,
    email: String,
    errors: FieldErrors,
    submit_error: Option<String>,
}

impl FormState {
    fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Contact => &self.contact,
            Field::Email => &self.email,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Contact => &mut self.contact,
            Field::Email => &mut self.email,
        }
    }

    fn validate(&self) -> Result<VerificationInput, FieldErrors> {
        VerificationInput::new(&self.name, &self.contact, &self.email)
    }

    fn reset(&mut self) {
        *self = FormState::default();
    }
}

/// Check one field on its own, without touching any form state.
pub fn validate_field(field: Field, value: &str) -> Result<(), FieldError> {
    match field {
        Field::Name => Name::new(value).map(drop),
        Field::Contact => Contact::new(value).map(drop),
        Field::Email => Email::new(value).map(drop),
    }
}

/// Point-in-time copy of everything needed to draw the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    /// Raw text per field, in display order
    pub values: [(Field, String); 3],
    /// Field errors currently shown
    pub errors: FieldErrors,
    /// Submission banner text
    pub submit_error: Option<String>,
    /// Whether inputs and the submit button are disabled
    pub processing: bool,
}

impl FormSnapshot {
    /// Raw text of a field
    pub fn value(&self, field: Field) -> &str {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    }

    /// Label for the submit button
    pub fn submit_label(&self) -> &'static str {
        if self.processing {
            SUBMIT_LABEL_BUSY
        } else {
            SUBMIT_LABEL
        }
    }
}

/// The verification form.
///
/// Cheap to clone; clones share state, so a second concurrent
/// [`submit`](Self::submit) observes the first one's in-flight flag and is
/// ignored, the same way a disabled button would ignore a click.
#[derive(Debug, Clone, Default)]
pub struct VerificationForm {
    state: Arc<RwLock<FormState>>,
    submitting: LoadingFlag,
    external_loading: LoadingFlag,
}

impl VerificationForm {
    /// A standalone form with its own external loading flag
    pub fn new() -> Self {
        Self::default()
    }

    /// A form whose external loading state is driven by `loading`
    pub fn with_loading(loading: LoadingFlag) -> Self {
        Self {
            external_loading: loading,
            ..Self::default()
        }
    }

    /// Report caller-side loading, which disables the form like its own submission does
    pub fn set_external_loading(&self, loading: bool) {
        self.external_loading.set(loading);
    }

    /// True while the form's own submit is running or the caller reports loading
    pub fn is_processing(&self) -> bool {
        self.submitting.get() || self.external_loading.get()
    }

    /// Inputs and the submit button are all disabled while processing
    pub fn is_disabled(&self, _control: Control) -> bool {
        self.is_processing()
    }

    /// Current submit button label
    pub fn submit_label(&self) -> &'static str {
        if self.is_processing() {
            SUBMIT_LABEL_BUSY
        } else {
            SUBMIT_LABEL
        }
    }

    /// Replace a field's text. Ignored (returns `false`) while the input is disabled.
    pub async fn set_value(&self, field: Field, value: impl Into<String>) -> bool {
        if self.is_disabled(Control::Input(field)) {
            return false;
        }
        *self.state.write().await.value_mut(field) = value.into();
        true
    }

    /// Raw text of a field
    pub async fn value(&self, field: Field) -> String {
        self.state.read().await.value(field).to_owned()
    }

    /// The field lost focus: validate it alone and update its error.
    pub async fn blur(&self, field: Field) -> Result<(), FieldError> {
        let mut state = self.state.write().await;
        let result = validate_field(field, state.value(field));
        match result {
            Ok(()) => {
                state.errors.clear(field);
            }
            Err(e) => state.errors.insert(e),
        }
        result
    }

    /// Validate every field without changing what is displayed
    pub async fn validate(&self) -> Result<VerificationInput, FieldErrors> {
        self.state.read().await.validate()
    }

    /// Message shown next to a field, if any
    pub async fn field_error(&self, field: Field) -> Option<String> {
        self.state
            .read()
            .await
            .errors
            .get(field)
            .map(ToString::to_string)
    }

    /// Submission banner text, if any
    pub async fn submit_error(&self) -> Option<String> {
        self.state.read().await.submit_error.clone()
    }

    /// Copy out the current display state
    pub async fn snapshot(&self) -> FormSnapshot {
        let state = self.state.read().await;
        FormSnapshot {
            values: Field::ALL.map(|f| (f, state.value(f).to_owned())),
            errors: state.errors.clone(),
            submit_error: state.submit_error.clone(),
            processing: self.is_processing(),
        }
    }

    /// Submit the form.
    ///
    /// Validates everything, then hands the validated input to `on_submit` and
    /// awaits it. On success the form is cleared; on failure the error text goes
    /// into the banner, field values are kept, and the error is returned so the
    /// caller sees it too. Validation failures stay inside the form and come back
    /// as [`Submission::Invalid`].
    pub async fn submit<F, Fut, T, E>(&self, on_submit: F) -> Result<Submission<T>, E>
    where
        F: FnOnce(VerificationInput) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        if self.external_loading.get() {
            return Ok(Submission::Ignored);
        }
        let Some(_in_flight) = self.submitting.try_hold() else {
            return Ok(Submission::Ignored);
        };

        let input = {
            let mut state = self.state.write().await;
            state.submit_error = None;
            match state.validate() {
                Ok(input) => {
                    state.errors.clear_all();
                    input
                }
                Err(errors) => {
                    state.errors = errors.clone();
                    return Ok(Submission::Invalid(errors));
                }
            }
        };

        // lock released: the callback may read the form
        let result = on_submit(input).await;

        let mut state = self.state.write().await;
        match result {
            Ok(value) => {
                state.reset();
                Ok(Submission::Accepted(value))
            }
            Err(e) => {
                let message = e.to_string();
                state.submit_error = Some(if message.trim().is_empty() {
                    FALLBACK_ERROR_MESSAGE.to_owned()
                } else {
                    message
                });
                Err(e)
            }
        }
    }
}

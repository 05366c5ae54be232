//! Contact form state machine
//!
//! `Idle → (invalid) → Idle with errors`
//! `Idle → (valid) → Pending → Succeeded | Failed`
//! `Succeeded → (dismiss) → Idle`, `Failed → (retry) → Pending`

use super::validate::{validate_contact, Field, FieldErrors};
use crate::relay::{SubmissionPayload, SubmissionRelay};
use crate::Result;

/// Where the form is in its submit lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; no network call was made
    Invalid,
    /// A submission is already outstanding
    Busy,
    Sent,
    /// The relay rejected or could not be reached; carries the alert text
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ContactFields {
    name: String,
    email: String,
    message: String,
}

impl ContactFields {
    fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }
}

/// Contact form owned by one page instance
#[derive(Debug, Clone)]
pub struct ContactForm {
    fields: ContactFields,
    errors: FieldErrors,
    status: SubmissionStatus,
    /// Fixed site identifier sent with every submission
    access_key: String,
    /// Blocking alert waiting to be shown
    alert: Option<String>,
}

impl ContactForm {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            fields: ContactFields::default(),
            errors: FieldErrors::new(),
            status: SubmissionStatus::Idle,
            access_key: access_key.into(),
            alert: None,
        }
    }

    pub fn field(&self, field: Field) -> &str {
        self.fields.get(field)
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Inputs are disabled while a submission is outstanding
    pub fn is_pending(&self) -> bool {
        self.status == SubmissionStatus::Pending
    }

    /// Replace a field value
    ///
    /// Clears that field's error only, and returns a finished form to Idle.
    /// Ignored while pending; returns whether the edit was applied.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.is_pending() {
            return false;
        }
        *self.fields.get_mut(field) = value.into();
        self.touch(field);
        true
    }

    /// Append one character (terminal input)
    pub fn push_char(&mut self, field: Field, c: char) -> bool {
        if self.is_pending() {
            return false;
        }
        self.fields.get_mut(field).push(c);
        self.touch(field);
        true
    }

    /// Remove the last character (terminal input)
    pub fn pop_char(&mut self, field: Field) -> bool {
        if self.is_pending() {
            return false;
        }
        self.fields.get_mut(field).pop();
        self.touch(field);
        true
    }

    fn touch(&mut self, field: Field) {
        self.errors.remove(&field);
        if matches!(self.status, SubmissionStatus::Succeeded | SubmissionStatus::Failed) {
            self.status = SubmissionStatus::Idle;
        }
    }

    /// Run validation without changing state
    pub fn validate(&self) -> FieldErrors {
        validate_contact(&self.fields.name, &self.fields.email, &self.fields.message)
    }

    /// Validate and, if clean, move to Pending and hand out the payload
    ///
    /// The error map is replaced wholesale. Returns `None` when validation
    /// fails or a submission is already outstanding.
    pub fn begin_submit(&mut self) -> Option<SubmissionPayload> {
        if self.is_pending() {
            return None;
        }

        self.errors = self.validate();
        if !self.errors.is_empty() {
            tracing::debug!(count = self.errors.len(), "Contact form failed validation");
            self.status = SubmissionStatus::Idle;
            return None;
        }

        self.status = SubmissionStatus::Pending;
        self.alert = None;
        Some(SubmissionPayload {
            access_key: self.access_key.clone(),
            name: self.fields.name.clone(),
            email: self.fields.email.clone(),
            message: self.fields.message.clone(),
        })
    }

    /// Apply the relay's answer to an outstanding submission
    pub fn complete(&mut self, result: Result<()>) -> SubmitOutcome {
        if !self.is_pending() {
            tracing::warn!("Submission result arrived with no submission outstanding");
            return SubmitOutcome::Busy;
        }

        match result {
            Ok(()) => {
                self.status = SubmissionStatus::Succeeded;
                self.fields = ContactFields::default();
                tracing::info!("Contact message sent");
                SubmitOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(error = %e, "Contact message failed");
                let alert = format!("Failed to send message. Please try again later. ({})", e);
                self.status = SubmissionStatus::Failed;
                self.alert = Some(alert.clone());
                SubmitOutcome::Failed(alert)
            }
        }
    }

    /// Full round-trip through a relay
    pub async fn submit(&mut self, relay: &dyn SubmissionRelay) -> SubmitOutcome {
        if self.is_pending() {
            return SubmitOutcome::Busy;
        }
        let Some(payload) = self.begin_submit() else {
            return SubmitOutcome::Invalid;
        };
        let result = relay.submit(&payload).await;
        self.complete(result)
    }

    /// Close the confirmation after a successful send
    pub fn dismiss(&mut self) {
        if self.status == SubmissionStatus::Succeeded {
            self.status = SubmissionStatus::Idle;
            self.errors.clear();
        }
    }

    /// Take the pending alert, if any; each alert is handed out once
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::form::validate::{EMAIL_INVALID, EMAIL_REQUIRED, MESSAGE_REQUIRED, NAME_REQUIRED};
    use crate::Error;

    /// Relay that records calls and answers with a fixed result
    struct FakeRelay {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeRelay {
        fn ok() -> Self {
            Self { calls: AtomicUsize::new(0), fail: false }
        }

        fn failing() -> Self {
            Self { calls: AtomicUsize::new(0), fail: true }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl SubmissionRelay for FakeRelay {
        async fn submit(&self, payload: &SubmissionPayload) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(payload.access_key, "site-key");
            if self.fail {
                Err(Error::Relay("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn filled() -> ContactForm {
        let mut form = ContactForm::new("site-key");
        form.set_field(Field::Name, "Ada");
        form.set_field(Field::Email, "ada@example.com");
        form.set_field(Field::Message, "Hello there");
        form
    }

    #[tokio::test]
    async fn test_blank_submit_reports_three_errors_without_network() {
        let relay = FakeRelay::ok();
        let mut form = ContactForm::new("site-key");

        assert_eq!(form.submit(&relay).await, SubmitOutcome::Invalid);
        assert_eq!(relay.calls(), 0);
        assert_eq!(form.errors().len(), 3);
        assert_eq!(form.error(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(form.error(Field::Email), Some(EMAIL_REQUIRED));
        assert_eq!(form.error(Field::Message), Some(MESSAGE_REQUIRED));
        assert_eq!(form.status(), SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn test_invalid_email_is_the_only_error() {
        let relay = FakeRelay::ok();
        let mut form = filled();
        form.set_field(Field::Email, "not-an-email");

        assert_eq!(form.submit(&relay).await, SubmitOutcome::Invalid);
        assert_eq!(relay.calls(), 0);
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.error(Field::Email), Some(EMAIL_INVALID));
    }

    #[test]
    fn test_editing_clears_only_that_error() {
        let mut form = ContactForm::new("site-key");
        assert!(form.begin_submit().is_none());
        assert_eq!(form.errors().len(), 3);

        form.push_char(Field::Email, 'a');
        assert_eq!(form.error(Field::Email), None);
        assert_eq!(form.error(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(form.error(Field::Message), Some(MESSAGE_REQUIRED));
    }

    #[tokio::test]
    async fn test_success_clears_fields_once() {
        let relay = FakeRelay::ok();
        let mut form = filled();

        assert_eq!(form.submit(&relay).await, SubmitOutcome::Sent);
        assert_eq!(relay.calls(), 1);
        assert_eq!(form.status(), SubmissionStatus::Succeeded);
        for field in Field::ALL {
            assert_eq!(form.field(field), "");
        }
        assert!(form.take_alert().is_none());

        // A late duplicate answer does not transition again
        assert_eq!(form.complete(Ok(())), SubmitOutcome::Busy);
        assert_eq!(form.status(), SubmissionStatus::Succeeded);

        form.dismiss();
        assert_eq!(form.status(), SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn test_failure_keeps_fields_and_alerts_once() {
        let relay = FakeRelay::failing();
        let mut form = filled();

        let outcome = form.submit(&relay).await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(form.status(), SubmissionStatus::Failed);
        assert_eq!(form.field(Field::Name), "Ada");
        assert_eq!(form.field(Field::Email), "ada@example.com");
        assert_eq!(form.field(Field::Message), "Hello there");

        assert!(form.take_alert().is_some());
        assert!(form.take_alert().is_none());
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let mut form = filled();
        form.submit(&FakeRelay::failing()).await;

        // Failed → Pending directly on retry
        assert!(form.begin_submit().is_some());
        assert_eq!(form.status(), SubmissionStatus::Pending);
        assert_eq!(form.complete(Ok(())), SubmitOutcome::Sent);
    }

    #[test]
    fn test_pending_rejects_edits_and_resubmits() {
        let mut form = filled();
        let payload = form.begin_submit().unwrap();
        assert_eq!(payload.name, "Ada");
        assert!(form.is_pending());

        assert!(!form.set_field(Field::Name, "Bob"));
        assert_eq!(form.field(Field::Name), "Ada");
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_edit_after_failure_returns_to_idle() {
        let mut form = filled();
        form.begin_submit();
        form.complete(Err(Error::Relay("500".to_string())));
        form.pop_char(Field::Message);
        assert_eq!(form.status(), SubmissionStatus::Idle);
        assert_eq!(form.field(Field::Message), "Hello ther");
    }
}

//! Product waitlist form
//!
//! The mailing-list provider receives a native form post; the only job here
//! is checking the email shape first and keeping the anti-bot field empty.

use super::validate::is_waitlist_email;
use crate::config::WaitlistConfig;

pub const WAITLIST_EMAIL_REQUIRED: &str = "Email is required.";
pub const WAITLIST_EMAIL_INVALID: &str = "Please enter a valid email address.";

/// A validated form post ready for the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistSubmission {
    pub action_url: String,
    /// Form fields in posting order
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct WaitlistForm {
    email: String,
    /// Hidden input; humans never fill it
    honeypot: String,
    /// Additional provider fields, posted after the email
    extra: Vec<(String, String)>,
    error: Option<String>,
}

impl WaitlistForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.email.push(c);
    }

    pub fn pop_char(&mut self) {
        self.email.pop();
    }

    pub fn set_honeypot(&mut self, value: impl Into<String>) {
        self.honeypot = value.into();
    }

    /// Set a provider field by its form name
    ///
    /// The configured email and honeypot names route to those inputs; any
    /// other name is posted as an extra field.
    pub fn set_field(&mut self, config: &WaitlistConfig, name: &str, value: impl Into<String>) {
        if name == config.email_field {
            self.set_email(value);
        } else if name == config.honeypot_field {
            self.set_honeypot(value);
        } else {
            self.extra.retain(|(n, _)| n != name);
            self.extra.push((name.to_string(), value.into()));
        }
    }

    /// Check the email and build the provider post
    ///
    /// On a shape error the message is kept for display and `None` is
    /// returned. A filled honeypot blocks the post without a message.
    pub fn prepare(&mut self, config: &WaitlistConfig) -> Option<WaitlistSubmission> {
        if self.email.trim().is_empty() {
            self.error = Some(WAITLIST_EMAIL_REQUIRED.to_string());
            return None;
        }
        if !is_waitlist_email(&self.email) {
            self.error = Some(WAITLIST_EMAIL_INVALID.to_string());
            return None;
        }
        self.error = None;

        if !self.honeypot.is_empty() {
            tracing::warn!("Waitlist honeypot filled, dropping submission");
            return None;
        }

        let mut fields = vec![(config.email_field.clone(), self.email.clone())];
        fields.extend(self.extra.iter().cloned());
        fields.push((config.honeypot_field.clone(), String::new()));

        Some(WaitlistSubmission {
            action_url: config.action_url.clone(),
            fields,
        })
    }

    /// Reset after the provider accepted the post
    pub fn clear(&mut self) {
        self.email.clear();
        self.extra.clear();
        self.error = None;
    }
}

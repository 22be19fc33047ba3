//! Contact form submission
//!
//! The page's form collects a name, an e-mail address, and a message.
//! Delivery goes through a [`ContactSink`]; [`DiscardSink`] accepts and
//! drops messages, which is what the page does today. Hosts that want
//! real delivery provide their own sink.

use serde::{Deserialize, Serialize};

use crate::error::ContactError;

/// A message entered in the contact form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Check required fields and e-mail shape
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ContactError::MissingField("email"));
        }
        if self.message.trim().is_empty() {
            return Err(ContactError::MissingField("message"));
        }
        if !is_plausible_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

/// `local@domain.tld` with no whitespace
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// What happened to an accepted message
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted and dropped
    Discarded,
    /// Stored for later delivery under the given reference
    Queued { reference: String },
}

/// Destination for validated contact messages
pub trait ContactSink {
    fn submit(&self, message: &ContactMessage) -> Result<Delivery, ContactError>;
}

/// Accepts every valid message and drops it
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardSink;

impl ContactSink for DiscardSink {
    fn submit(&self, message: &ContactMessage) -> Result<Delivery, ContactError> {
        tracing::debug!(from = %message.email, "contact message discarded");
        Ok(Delivery::Discarded)
    }
}

/// Submission status shown next to the form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Sent(Delivery),
    Rejected(String),
}

/// Contact form state
#[derive(Clone, Debug, Default)]
pub struct ContactForm {
    status: FormStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Validate and hand the message to `sink`, recording the outcome
    pub fn submit<S: ContactSink + ?Sized>(
        &mut self,
        message: &ContactMessage,
        sink: &S,
    ) -> Result<Delivery, ContactError> {
        let result = message.validate().and_then(|_| sink.submit(message));
        self.status = match &result {
            Ok(delivery) => FormStatus::Sent(delivery.clone()),
            Err(err) => {
                tracing::warn!(error = %err, "contact submission rejected");
                FormStatus::Rejected(err.to_string())
            }
        };
        result
    }

    /// Back to idle after the user edits the form
    pub fn reset(&mut self) {
        self.status = FormStatus::Idle;
    }
}

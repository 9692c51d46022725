use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// `local@domain.tld` shape, intentionally looser than RFC 5322.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Raw contact form body. Every field is optional so that absent fields
/// are reported by validation rather than by the JSON decoder.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    /// Hidden from humans in the form; bots tend to fill it in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honeypot: Option<String>,
}

/// A submission that passed validation, with surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(name: &str, email: &str, subject: &str, message: &str) -> Self {
        ContactSubmission {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            subject: Some(subject.to_string()),
            message: Some(message.to_string()),
            honeypot: None,
        }
    }

    /// True when the honeypot field carries anything but whitespace.
    pub fn is_spam(&self) -> bool {
        self.honeypot
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty())
    }

    /// Applies the form rules in order; the first one that fails is reported.
    pub fn validate(&self) -> Result<ValidSubmission, ValidationError> {
        let fields = [&self.name, &self.email, &self.subject, &self.message];

        // An empty string counts as missing, same as an absent or null field
        if fields.iter().any(|f| f.as_deref().is_none_or(str::is_empty)) {
            return Err(ValidationError::MissingFields);
        }

        let [name, email, subject, message] =
            fields.map(|f| f.as_deref().unwrap_or_default());

        if [name, email, subject, message].iter().any(|f| f.trim().is_empty()) {
            return Err(ValidationError::EmptyFields);
        }

        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(ValidSubmission {
            name: name.trim().to_string(),
            email: email.to_string(),
            subject: subject.trim().to_string(),
            message: message.trim().to_string(),
        })
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Body of a 200 response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SubmissionReceipt {
    pub success: bool,
    pub message: String,
    pub remaining: u32,
}

impl SubmissionReceipt {
    pub fn sent(remaining: u32) -> Self {
        SubmissionReceipt {
            success: true,
            message: "Message sent successfully!".to_string(),
            remaining,
        }
    }
}

use serde::{Deserialize, Serialize};

/// A single message handed to the email provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

impl OutgoingEmail {
    pub fn new(from: &str, to: &str, subject: impl Into<String>, html: String) -> Self {
        OutgoingEmail {
            from: from.to_string(),
            to: vec![to.to_string()],
            subject: subject.into(),
            html,
            reply_to: None,
        }
    }

    pub fn reply_to(mut self, address: &str) -> Self {
        self.reply_to = Some(address.to_string());
        self
    }
}

/// What the provider hands back for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeliveryReceipt {
    pub id: String,
}

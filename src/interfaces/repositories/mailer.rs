use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::email::{DeliveryReceipt, OutgoingEmail},
    errors::MailError,
};

/// Anything able to hand a single email to a transactional provider.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, api_key: &str, email: &OutgoingEmail) -> Result<DeliveryReceipt, MailError>;
}

#[async_trait]
impl<T> EmailSender for Arc<T>
where
    T: EmailSender + ?Sized,
{
    async fn send(&self, api_key: &str, email: &OutgoingEmail) -> Result<DeliveryReceipt, MailError> {
        (**self).send(api_key, email).await
    }
}

pub type SharedMailer = Arc<dyn EmailSender>;

use async_trait::async_trait;

use crate::domain::{DomainError, Message};

/// Sends an ordered list of role-tagged messages to a hosted model and returns
/// the generated reply.
///
/// Unlike [`super::SearchGateway`], failures are propagated to the caller.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<String, DomainError>;

    fn model_name(&self) -> &str;
}

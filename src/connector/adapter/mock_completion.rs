use async_trait::async_trait;

use crate::application::CompletionGateway;
use crate::domain::{last_user_content, DomainError, Message};

/// Offline [`CompletionGateway`] that echoes the last user message.
///
/// Used by `--mock` so the shells can be exercised without provider keys.
/// The reply notes how many system messages were received, which makes search
/// augmentation visible.
pub struct MockCompletion;

impl MockCompletion {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionGateway for MockCompletion {
    async fn complete(&self, messages: &[Message]) -> Result<String, DomainError> {
        let question = last_user_content(messages)
            .ok_or_else(|| DomainError::invalid_input("no user message to answer"))?;
        let system_count = messages.iter().filter(|m| m.is_system()).count();

        Ok(format!("[mock reply, {system_count} system message(s)] {question}"))
    }

    fn model_name(&self) -> &str {
        "mock-completion"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_last_user_message() {
        let reply = MockCompletion::new()
            .complete(&[Message::system("s"), Message::user("你好")])
            .await
            .unwrap();
        assert_eq!(reply, "[mock reply, 1 system message(s)] 你好");
    }

    #[tokio::test]
    async fn fails_without_user_message() {
        let err = MockCompletion::new()
            .complete(&[Message::system("s")])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}

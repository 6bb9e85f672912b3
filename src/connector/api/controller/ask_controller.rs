use anyhow::Result;

use crate::domain::{Message, Role};

use super::super::Container;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(
        &self,
        message: String,
        system: Option<String>,
        no_search: bool,
    ) -> Result<String> {
        let system_prompt = system.as_deref().unwrap_or(self.container.system_prompt());
        let use_case = self.container.respond_use_case();
        let history = use_case
            .execute(&message, vec![], system_prompt, !no_search)
            .await;

        Ok(Self::format_reply(&history))
    }

    fn format_reply(history: &[Message]) -> String {
        history
            .iter()
            .rev()
            .find(|m| m.role() == Role::Assistant)
            .map(|m| m.content().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_is_last_assistant_turn() {
        let history = vec![Message::user("q"), Message::assistant("a")];
        assert_eq!(AskController::format_reply(&history), "a");
    }
}

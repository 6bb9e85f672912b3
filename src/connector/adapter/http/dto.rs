use serde::{Deserialize, Serialize};

use crate::domain::Message;

fn default_use_search() -> bool {
    true
}

/// Body of `POST /api/chat`.
#[derive(Debug, Deserialize, Serialize)]
pub struct ChatRequest {
    /// The new user utterance
    pub message: String,

    /// Turns so far, as previously returned by the server
    #[serde(default)]
    pub history: Vec<Message>,

    /// Overrides the server's default system prompt when present
    pub system_prompt: Option<String>,

    /// Allow web search for this turn (default: true)
    #[serde(default = "default_use_search")]
    pub use_search: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatResponse {
    pub history: Vec<Message>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_apply() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "你好"}"#).unwrap();
        assert!(req.history.is_empty());
        assert!(req.system_prompt.is_none());
        assert!(req.use_search);
    }

    #[test]
    fn request_accepts_history() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"message": "b", "history": [{"role": "user", "content": "a"},
                {"role": "assistant", "content": "ok"}], "use_search": false}"#,
        )
        .unwrap();
        assert_eq!(req.history.len(), 2);
        assert!(!req.use_search);
    }
}

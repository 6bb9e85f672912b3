use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::application::{CompletionGateway, IntentClassifier, SearchGateway};
use crate::domain::{last_user_content, DomainError, Message};

/// Prefix of the synthetic assistant turn recorded when a turn fails.
pub const ERROR_LABEL: &str = "发生错误: ";

/// Default system prompt offered by the shells.
pub const DEFAULT_SYSTEM_PROMPT: &str = "你是一个有帮助的助手，可以回答用户的问题。";

fn search_context(block: &str) -> String {
    format!("以下是相关的搜索信息：\n{block}\n请基于这些信息回答用户的问题。")
}

/// One conversational turn: optionally augments the prompt with web-search
/// results, asks the completion provider for a reply and extends the history.
///
/// `execute` never fails. A provider error becomes an assistant turn starting
/// with [`ERROR_LABEL`], so the returned history is always `prior + 2` long.
pub struct RespondUseCase {
    completion: Arc<dyn CompletionGateway>,
    classifier: Arc<dyn IntentClassifier>,
    search: Option<Arc<dyn SearchGateway>>,
}

impl RespondUseCase {
    pub fn new(
        completion: Arc<dyn CompletionGateway>,
        classifier: Arc<dyn IntentClassifier>,
    ) -> Self {
        Self {
            completion,
            classifier,
            search: None,
        }
    }

    pub fn with_search(mut self, gateway: Arc<dyn SearchGateway>) -> Self {
        self.search = Some(gateway);
        self
    }

    pub fn has_search(&self) -> bool {
        self.search.is_some()
    }

    pub async fn execute(
        &self,
        utterance: &str,
        mut history: Vec<Message>,
        system_prompt: &str,
        search_enabled: bool,
    ) -> Vec<Message> {
        let turn_id = Uuid::new_v4();
        let span = info_span!("turn", %turn_id);

        async move {
            let user_message = Message::user(utterance);
            let messages = Self::assemble(system_prompt, &history, user_message.clone());

            let start = Instant::now();
            let reply = match self.reply(&messages, search_enabled).await {
                Ok(content) => {
                    info!(
                        "Reply from {} in {:.2}s ({} chars)",
                        self.completion.model_name(),
                        start.elapsed().as_secs_f64(),
                        content.chars().count()
                    );
                    Message::assistant(content)
                }
                Err(e) => {
                    warn!("Turn failed: {e}");
                    Message::assistant(format!("{ERROR_LABEL}{e}"))
                }
            };

            history.push(user_message);
            history.push(reply);
            history
        }
        .instrument(span)
        .await
    }

    /// System prompt, then prior turns, then the new user message.
    ///
    /// System entries carried in the history are left out so the model input
    /// opens with exactly one system message.
    fn assemble(system_prompt: &str, history: &[Message], user_message: Message) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 2);

        if !system_prompt.trim().is_empty() {
            messages.push(Message::system(system_prompt));
        }

        let skipped = history.iter().filter(|m| m.is_system()).count();
        if skipped > 0 {
            debug!("Dropping {skipped} system message(s) carried in history");
        }
        messages.extend(history.iter().filter(|m| !m.is_system()).cloned());

        messages.push(user_message);
        messages
    }

    async fn reply(&self, messages: &[Message], search_enabled: bool) -> Result<String, DomainError> {
        let query = last_user_content(messages).unwrap_or_default();

        let gateway = match &self.search {
            Some(gateway) if search_enabled => gateway,
            Some(_) => return self.completion.complete(messages).await,
            None => {
                if search_enabled {
                    debug!("No search provider configured, answering without search");
                }
                return self.completion.complete(messages).await;
            }
        };

        if !self.classifier.needs_search(query) {
            debug!("{}: no search needed", self.classifier.name());
            return self.completion.complete(messages).await;
        }

        info!("Searching {} for: {}", gateway.provider_name(), query);
        let outcome = gateway.search(query).await;
        if outcome.is_error() {
            warn!("Search degraded: {}", outcome.render());
        } else {
            debug!("Search returned {} result(s)", outcome.result_count());
        }

        let mut augmented = messages.to_vec();
        augmented.push(Message::system(search_context(&outcome.render())));
        self.completion.complete(&augmented).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::{Role, SearchOutcome, SearchResult};

    struct AlwaysSearch;

    impl IntentClassifier for AlwaysSearch {
        fn needs_search(&self, _utterance: &str) -> bool {
            true
        }

        fn name(&self) -> &str {
            "always"
        }
    }

    #[derive(Default)]
    struct RecordingCompletion {
        calls: Mutex<Vec<Vec<Message>>>,
        fail: bool,
    }

    #[async_trait]
    impl CompletionGateway for RecordingCompletion {
        async fn complete(&self, messages: &[Message]) -> Result<String, DomainError> {
            self.calls.lock().unwrap().push(messages.to_vec());
            if self.fail {
                Err(DomainError::completion("HTTP 500"))
            } else {
                Ok("好的".to_string())
            }
        }

        fn model_name(&self) -> &str {
            "recording"
        }
    }

    #[derive(Default)]
    struct CountingSearch {
        calls: AtomicUsize,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchGateway for CountingSearch {
        async fn search(&self, query: &str) -> SearchOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.to_string());
            SearchOutcome::from_results(vec![SearchResult::new(
                Some("天气".to_string()),
                None,
                None,
            )])
        }

        fn provider_name(&self) -> &str {
            "counting"
        }
    }

    #[tokio::test]
    async fn search_context_is_appended_as_trailing_system_message() {
        let completion = Arc::new(RecordingCompletion::default());
        let search = Arc::new(CountingSearch::default());
        let use_case = RespondUseCase::new(completion.clone(), Arc::new(AlwaysSearch))
            .with_search(search.clone());

        let history = use_case.execute("问题", vec![], "sys", true).await;

        assert_eq!(history.len(), 2);
        let calls = completion.calls.lock().unwrap();
        let sent = &calls[0];
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0], Message::system("sys"));
        assert_eq!(sent[1], Message::user("问题"));
        assert_eq!(sent[2].role(), Role::System);
        assert!(sent[2].content().starts_with("以下是相关的搜索信息：\n### 搜索结果 ###"));
        assert!(sent[2].content().ends_with("\n请基于这些信息回答用户的问题。"));
    }

    #[tokio::test]
    async fn search_query_is_the_last_user_message() {
        let completion = Arc::new(RecordingCompletion::default());
        let search = Arc::new(CountingSearch::default());
        let use_case = RespondUseCase::new(completion, Arc::new(AlwaysSearch))
            .with_search(search.clone());

        let prior = vec![Message::user("旧问题"), Message::assistant("旧回答")];
        use_case.execute("新问题", prior, "sys", true).await;

        assert_eq!(*search.queries.lock().unwrap(), vec!["新问题".to_string()]);
    }

    #[tokio::test]
    async fn completion_failure_becomes_error_turn() {
        let completion = Arc::new(RecordingCompletion {
            fail: true,
            ..Default::default()
        });
        let use_case = RespondUseCase::new(completion, Arc::new(AlwaysSearch));

        let history = use_case.execute("hi", vec![], "sys", false).await;

        assert_eq!(history.len(), 2);
        assert_eq!(history[0], Message::user("hi"));
        assert_eq!(history[1].role(), Role::Assistant);
        assert_eq!(history[1].content(), "发生错误: Completion error: HTTP 500");
    }

    #[tokio::test]
    async fn history_system_entries_are_not_sent_twice() {
        let completion = Arc::new(RecordingCompletion::default());
        let use_case = RespondUseCase::new(completion.clone(), Arc::new(AlwaysSearch));

        let prior = vec![Message::system("stale"), Message::user("a"), Message::assistant("b")];
        let history = use_case.execute("c", prior, "fresh", false).await;

        assert_eq!(history.len(), 5);
        assert_eq!(history[0], Message::system("stale"));

        let calls = completion.calls.lock().unwrap();
        let sent = &calls[0];
        assert_eq!(sent.iter().filter(|m| m.is_system()).count(), 1);
        assert_eq!(sent[0], Message::system("fresh"));
        assert_eq!(sent.len(), 4);
    }

    #[tokio::test]
    async fn blank_system_prompt_is_omitted() {
        let completion = Arc::new(RecordingCompletion::default());
        let use_case = RespondUseCase::new(completion.clone(), Arc::new(AlwaysSearch));

        use_case.execute("c", vec![], "   ", false).await;

        let calls = completion.calls.lock().unwrap();
        assert_eq!(calls[0], vec![Message::user("c")]);
    }

    #[tokio::test]
    async fn missing_search_gateway_falls_back_to_plain_completion() {
        let completion = Arc::new(RecordingCompletion::default());
        let use_case = RespondUseCase::new(completion.clone(), Arc::new(AlwaysSearch));
        assert!(!use_case.has_search());

        use_case.execute("最新消息", vec![], "sys", true).await;

        let calls = completion.calls.lock().unwrap();
        assert_eq!(calls[0].len(), 2);
    }
}

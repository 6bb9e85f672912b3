use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, warn};

use crate::application::{CompletionGateway, IntentClassifier, RespondUseCase, SearchGateway};
use crate::{
    KeywordIntentClassifier, MockCompletion, MockSearch, OpenAiCompatibleClient,
    SerpApiSearchGateway,
};

pub struct ContainerConfig {
    /// Use offline gateways instead of the hosted providers.
    pub mock: bool,
    /// Per-request timeout for provider calls; `None` keeps the client default.
    pub timeout: Option<Duration>,
    /// Extra trigger keywords added to the built-in set.
    pub extra_triggers: Vec<String>,
    pub system_prompt: String,
}

/// What the container resolved at startup, for `doctor` and logging.
#[derive(Debug, Clone)]
pub struct ProviderStatus {
    pub model: String,
    pub completion_key_present: bool,
    pub completion_url: Option<String>,
    pub search_provider: Option<String>,
    pub search_url: Option<String>,
}

pub struct Container {
    completion: Arc<dyn CompletionGateway>,
    search: Option<Arc<dyn SearchGateway>>,
    classifier: Arc<dyn IntentClassifier>,
    status: ProviderStatus,
    config: ContainerConfig,
}

impl Container {
    /// Wire the gateways from the environment.
    ///
    /// Missing keys are reported as warnings only: without `SERP_API_KEY`
    /// turns run without search, without `DASHSCOPE_API_KEY` every turn
    /// fails at call time.
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let classifier: Arc<dyn IntentClassifier> = Arc::new(
            KeywordIntentClassifier::new().with_keywords(config.extra_triggers.iter().cloned()),
        );

        let (completion, search, status): (
            Arc<dyn CompletionGateway>,
            Option<Arc<dyn SearchGateway>>,
            ProviderStatus,
        ) = if config.mock {
            debug!("Using mock completion and search gateways");
            let completion: Arc<dyn CompletionGateway> = Arc::new(MockCompletion::new());
            let search: Arc<dyn SearchGateway> = Arc::new(MockSearch::new());
            let status = ProviderStatus {
                model: completion.model_name().to_string(),
                completion_key_present: true,
                completion_url: None,
                search_provider: Some(search.provider_name().to_string()),
                search_url: None,
            };
            (completion, Some(search), status)
        } else {
            let mut client = OpenAiCompatibleClient::from_env();
            if let Some(timeout) = config.timeout {
                client = client.with_timeout(timeout);
            }
            if !client.has_api_key() {
                warn!("DASHSCOPE_API_KEY is not set; completion requests will fail");
            }

            let search = SerpApiSearchGateway::from_env().map(|gateway| match config.timeout {
                Some(timeout) => gateway.with_timeout(timeout),
                None => gateway,
            });
            if search.is_none() {
                warn!("SERP_API_KEY is not set; web search is disabled");
            }

            let status = ProviderStatus {
                model: client.model_name().to_string(),
                completion_key_present: client.has_api_key(),
                completion_url: Some(client.url().to_string()),
                search_provider: search.as_ref().map(|s| s.provider_name().to_string()),
                search_url: search.as_ref().map(|s| s.url().to_string()),
            };

            let completion: Arc<dyn CompletionGateway> = Arc::new(client);
            let search = search.map(|s| Arc::new(s) as Arc<dyn SearchGateway>);
            (completion, search, status)
        };

        Ok(Self {
            completion,
            search,
            classifier,
            status,
            config,
        })
    }

    pub fn respond_use_case(&self) -> RespondUseCase {
        let use_case = RespondUseCase::new(self.completion.clone(), self.classifier.clone());
        match self.search.clone() {
            Some(search) => use_case.with_search(search),
            None => use_case,
        }
    }

    pub fn status(&self) -> &ProviderStatus {
        &self.status
    }

    pub fn system_prompt(&self) -> &str {
        &self.config.system_prompt
    }

    pub fn is_mock(&self) -> bool {
        self.config.mock
    }
}

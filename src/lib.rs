pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    CompletionGateway, IntentClassifier, RespondUseCase, SearchGateway, DEFAULT_SYSTEM_PROMPT,
    ERROR_LABEL,
};

pub use cli::Commands;

pub use connector::{
    ChatHttpServer, Container, ContainerConfig, KeywordIntentClassifier, MockCompletion,
    MockSearch, OpenAiCompatibleClient, Router, SerpApiResponse, SerpApiSearchGateway,
};

pub use domain::{
    last_user_content, DomainError, Message, Role, SearchOutcome, SearchResult, MAX_SEARCH_RESULTS,
};

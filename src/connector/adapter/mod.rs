pub mod http;
mod keyword_intent_classifier;
mod mock_completion;
mod mock_search;
mod openai_completion_gateway;
mod serpapi_search_gateway;

pub use http::ChatHttpServer;
pub use keyword_intent_classifier::*;
pub use mock_completion::*;
pub use mock_search::*;
pub use openai_completion_gateway::OpenAiCompatibleClient;
pub use serpapi_search_gateway::{SerpApiResponse, SerpApiSearchGateway};

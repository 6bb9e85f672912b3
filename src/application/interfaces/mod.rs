mod completion_gateway;
mod intent_classifier;
mod search_gateway;

pub use completion_gateway::*;
pub use intent_classifier::*;
pub use search_gateway::*;

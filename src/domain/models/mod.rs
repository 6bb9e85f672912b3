mod message;
mod search_result;

pub use message::*;
pub use search_result::*;

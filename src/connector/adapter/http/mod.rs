mod dto;
mod server;

pub use dto::*;
pub use server::*;

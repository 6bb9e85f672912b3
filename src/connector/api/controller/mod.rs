pub mod ask_controller;
pub mod chat_controller;
pub mod doctor_controller;
pub mod serve_controller;

pub use ask_controller::AskController;
pub use chat_controller::{ChatController, ChatSession, ReplCommand};
pub use doctor_controller::DoctorController;
pub use serve_controller::ServeController;

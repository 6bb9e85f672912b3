use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{AskController, ChatController, DoctorController, ServeController};

pub struct Router<'a> {
    ask_controller: AskController<'a>,
    chat_controller: ChatController<'a>,
    serve_controller: ServeController<'a>,
    doctor_controller: DoctorController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            ask_controller: AskController::new(container),
            chat_controller: ChatController::new(container),
            serve_controller: ServeController::new(container),
            doctor_controller: DoctorController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask {
                message,
                system,
                no_search,
            } => self.ask_controller.ask(message, system, no_search).await,
            Commands::Chat { system, no_search } => {
                self.chat_controller.chat(system, no_search).await
            }
            Commands::Serve { host, port, system } => {
                self.serve_controller.serve(host, port, system).await
            }
            Commands::Doctor => Ok(self.doctor_controller.doctor()),
        }
    }
}

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::domain::Message;

use super::super::Container;

const HELP: &str = "\
Commands:
  /clear            forget the conversation
  /system <text>    replace the system prompt
  /system           show the system prompt
  /search on|off    enable or disable web search (no argument toggles)
  /history          print the conversation so far
  /help             show this help
  /quit             leave the chat";

/// A line typed at the chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Say(String),
    Clear,
    ShowSystem,
    SetSystem(String),
    Search(Option<bool>),
    History,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Self::Say(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match (name, arg) {
            ("clear", _) => Self::Clear,
            ("system", "") => Self::ShowSystem,
            ("system", text) => Self::SetSystem(text.to_string()),
            ("search", "") => Self::Search(None),
            ("search", "on") => Self::Search(Some(true)),
            ("search", "off") => Self::Search(Some(false)),
            ("history", _) => Self::History,
            ("help", _) => Self::Help,
            ("quit", _) | ("exit", _) => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Conversation state held for the lifetime of one interactive session.
#[derive(Debug, Clone)]
pub struct ChatSession {
    history: Vec<Message>,
    system_prompt: String,
    search_enabled: bool,
}

impl ChatSession {
    pub fn new(system_prompt: impl Into<String>, search_enabled: bool) -> Self {
        Self {
            history: Vec::new(),
            system_prompt: system_prompt.into(),
            search_enabled,
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn search_enabled(&self) -> bool {
        self.search_enabled
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.system_prompt = prompt.into();
    }

    pub fn set_search(&mut self, enabled: Option<bool>) -> bool {
        self.search_enabled = enabled.unwrap_or(!self.search_enabled);
        self.search_enabled
    }

    pub fn take_history(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.history)
    }

    pub fn replace_history(&mut self, history: Vec<Message>) {
        self.history = history;
    }

    pub fn transcript(&self) -> String {
        if self.history.is_empty() {
            return "(empty conversation)".to_string();
        }
        self.history
            .iter()
            .map(|m| format!("{}> {}", m.role(), m.content()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn chat(&self, system: Option<String>, no_search: bool) -> Result<String> {
        let system_prompt = system.unwrap_or_else(|| self.container.system_prompt().to_string());
        let mut session = ChatSession::new(system_prompt, !no_search);
        let use_case = self.container.respond_use_case();

        println!(
            "Chatting with {} (search {}). Type /help for commands.",
            self.container.status().model,
            if session.search_enabled() { "on" } else { "off" }
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("you> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match ReplCommand::parse(&line) {
                ReplCommand::Empty => {}
                ReplCommand::Quit => break,
                ReplCommand::Help => println!("{HELP}"),
                ReplCommand::Clear => {
                    session.clear();
                    println!("Conversation cleared.");
                }
                ReplCommand::ShowSystem => println!("System prompt: {}", session.system_prompt()),
                ReplCommand::SetSystem(prompt) => {
                    session.set_system_prompt(prompt);
                    println!("System prompt updated.");
                }
                ReplCommand::Search(enabled) => {
                    let on = session.set_search(enabled);
                    println!("Web search {}.", if on { "enabled" } else { "disabled" });
                }
                ReplCommand::History => println!("{}", session.transcript()),
                ReplCommand::Unknown(cmd) => println!("Unknown command: {cmd} (try /help)"),
                ReplCommand::Say(text) => {
                    let spinner = Self::create_spinner()?;
                    let history = use_case
                        .execute(
                            &text,
                            session.take_history(),
                            session.system_prompt(),
                            session.search_enabled(),
                        )
                        .await;
                    spinner.finish_and_clear();

                    if let Some(reply) = history.last() {
                        println!("{}> {}", reply.role(), reply.content());
                    }
                    debug!("History now holds {} message(s)", history.len());
                    session.replace_history(history);
                }
            }
        }

        Ok(format!(
            "Goodbye ({} message(s) exchanged).",
            session.history().len()
        ))
    }

    fn create_spinner() -> Result<ProgressBar> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        spinner.set_message("thinking...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        Ok(spinner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_turn() {
        assert_eq!(
            ReplCommand::parse("  北京今天天气怎么样？ "),
            ReplCommand::Say("北京今天天气怎么样？".to_string())
        );
    }

    #[test]
    fn slash_commands_parse() {
        assert_eq!(ReplCommand::parse("/clear"), ReplCommand::Clear);
        assert_eq!(ReplCommand::parse("/system"), ReplCommand::ShowSystem);
        assert_eq!(
            ReplCommand::parse("/system 你是诗人"),
            ReplCommand::SetSystem("你是诗人".to_string())
        );
        assert_eq!(ReplCommand::parse("/search"), ReplCommand::Search(None));
        assert_eq!(ReplCommand::parse("/search off"), ReplCommand::Search(Some(false)));
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse(""), ReplCommand::Empty);
        assert_eq!(
            ReplCommand::parse("/search maybe"),
            ReplCommand::Unknown("/search maybe".to_string())
        );
    }

    #[test]
    fn session_toggles_and_clears() {
        let mut session = ChatSession::new("sys", true);
        assert!(!session.set_search(None));
        assert!(session.set_search(Some(true)));

        session.replace_history(vec![Message::user("a"), Message::assistant("b")]);
        assert_eq!(session.transcript(), "user> a\nassistant> b");

        session.clear();
        assert!(session.history().is_empty());
        assert_eq!(session.transcript(), "(empty conversation)");
    }
}

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a single question and print the reply
    Ask {
        message: String,

        /// System prompt for this turn
        #[arg(short, long)]
        system: Option<String>,

        /// Never run a web search
        #[arg(long)]
        no_search: bool,
    },

    /// Start an interactive chat session
    Chat {
        /// Initial system prompt (change it later with /system)
        #[arg(short, long)]
        system: Option<String>,

        /// Start with web search disabled (toggle later with /search)
        #[arg(long)]
        no_search: bool,
    },

    /// Serve the chat over HTTP (POST /api/chat)
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(short, long, default_value = "7861")]
        port: u16,

        /// Default system prompt for requests that do not send one
        #[arg(short, long)]
        system: Option<String>,
    },

    /// Show which providers and keys are configured
    Doctor,
}

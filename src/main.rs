use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use searchchat::{Commands, Container, ContainerConfig, Router, DEFAULT_SYSTEM_PROMPT};

#[derive(Parser)]
#[command(name = "searchchat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use offline completion and search gateways (no API keys needed)
    #[arg(long, global = true)]
    mock: bool,

    /// Timeout in seconds for each provider request
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Extra keyword that makes a message trigger a web search (repeatable)
    #[arg(long = "trigger", global = true)]
    triggers: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let container = Container::new(ContainerConfig {
        mock: cli.mock,
        timeout: cli.timeout_secs.map(Duration::from_secs),
        extra_triggers: cli.triggers,
        system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
    })?;
    debug!("Resolved providers: {:?}", container.status());

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{output}");

    Ok(())
}

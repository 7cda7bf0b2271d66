//! OpenAlex MCP Server - Entry Point

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use openalex_mcp::{OpenAlexClient, config::Config, server::McpServer};

#[derive(Parser, Debug)]
#[command(name = "openalex-mcp")]
#[command(about = "MCP server for the OpenAlex API")]
#[command(version)]
struct Cli {
    /// Contact email for the OpenAlex polite pool (better rate limits)
    #[arg(long, env = "OPENALEX_MAILTO")]
    mailto: Option<String>,

    /// Premium API key (optional, takes precedence over mailto)
    #[arg(long, env = "OPENALEX_API_KEY")]
    api_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // Logs go to stderr; stdout carries the JSON-RPC stream.
    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        polite_pool = cli.mailto.is_some(),
        premium = cli.api_key.is_some(),
        "Starting OpenAlex MCP server"
    );

    let config = Config::new(cli.mailto, cli.api_key);
    let client = OpenAlexClient::new(config)?;
    let server = McpServer::new(client);

    server.run_stdio().await?;

    Ok(())
}

//! Legifrance MCP server entry point.
//!
//! Runs the server over stdio:
//! ```bash
//! LEGIFRANCE_CLIENT_ID=... LEGIFRANCE_CLIENT_SECRET=... \
//! LEGIFRANCE_API_KEY=... LEGIFRANCE_OAUTH_SECRET=... \
//! OAUTH_TOKEN_URL=... LEGIFRANCE_API_URL=... legifrance-mcp
//! ```

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "legifrance-mcp")]
#[command(about = "MCP server for searching the Legifrance French legal database")]
struct Cli {
    /// Logging verbosity for stderr. Accepts a level (error, warn, info,
    /// debug, trace) or a RUST_LOG-style filter string.
    #[arg(long)]
    log: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the MCP transport, so all logging goes to stderr.
    let filter = match &cli.log {
        Some(filter) => tracing_subscriber::EnvFilter::new(filter),
        None => tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::INFO.into()),
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    legifrance_mcp::run().await
}

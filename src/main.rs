//! miro-mcp: MCP server bridging AI assistants to Miro whiteboards
//!
//! Resolves the access token at startup (the sole fatal failure mode), then
//! runs the stdio request/response loop until EOF or a signal.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use miro_mcp::client::MiroClient;
use miro_mcp::config::{Config, DEFAULT_BASE_URL};
use miro_mcp::mcp::server::McpServer;

/// MCP server bridging AI assistants to Miro whiteboards.
///
/// Exposes boards and items of the Miro REST API as MCP tools and resources.
#[derive(Parser, Debug)]
#[command(name = "miro-mcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Miro access token (falls back to the MIRO_ACCESS_TOKEN environment variable)
    #[arg(long, env = "MIRO_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Base URL of the Miro REST API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Path to the static prompt body served via prompts/get
    #[arg(long, value_name = "FILE")]
    prompt_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
fn get_log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
///
/// Logs go to stderr; stdout carries MCP messages exclusively.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the miro-mcp server.
fn main() -> ExitCode {
    let args = Args::parse();

    init_tracing(get_log_level(args.verbose, args.quiet));

    // Resolve configuration; a missing credential is the only fatal condition.
    let config = match Config::resolve(args.token, args.base_url, args.prompt_file) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match MiroClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.base_url,
        "Starting miro-mcp server"
    );

    let mut server = McpServer::new(config, Box::new(client));

    info!("MCP server ready, waiting for client connection...");

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(server.run());

    match result {
        Ok(()) => {
            info!("Server shut down gracefully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}

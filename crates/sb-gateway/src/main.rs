//! scriptbot: scripted WhatsApp-style reply service
//!
//! Main entry point for the scriptbot server.
//!
//! Usage:
//!   scriptbot            - Start the HTTP reply server
//!   scriptbot --help     - Show help
//!   scriptbot --version  - Show version

use std::sync::Arc;

use sb_contacts::GoogleContactsClient;
use sb_core::{
    Config, ContactSync, ContactsConfig, ConversationHandler, DisabledContactSync,
    InMemoryStateStore,
};
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// HTTP reply server
    Server,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match parse_args(std::env::args().skip(1)) {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("scriptbot {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Server => {}
    }

    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting scriptbot...");
    tracing::info!(
        "Inactivity window: {} minutes",
        config.conversation.inactivity_minutes
    );

    run_server(config).await
}

/// Parse command line arguments
fn parse_args<I: IntoIterator<Item = String>>(args: I) -> RunMode {
    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Server
}

/// Print help message
fn print_help() {
    println!("scriptbot - scripted WhatsApp-style reply service");
    println!();
    println!("Usage:");
    println!("  scriptbot            Start the HTTP reply server");
    println!("  scriptbot --help     Show this help message");
    println!("  scriptbot --version  Show version");
    println!();
    println!("Configuration is read from ./scriptbot.toml when present.");
    println!();
    println!("Environment Variables:");
    println!("  API_HOST             Bind address (default: 0.0.0.0)");
    println!("  API_PORT             HTTP port (default: 8000)");
    println!("  INACTIVITY_MINUTES   Conversation reset window (default: 1440)");
    println!("  SYNC_TIMEOUT_SECS    Contact sync time limit per reply (default: 10)");
    println!("  CONTACTS_ENABLED     Push contacts to Google Contacts (default: true)");
    println!("  GOOGLE_ACCESS_TOKEN  People API access token");
    println!("  GOOGLE_TOKEN_PATH    Token file used when no token is set (default: token.json)");
    println!("  PEOPLE_API_BASE_URL  People API endpoint");
}

/// Build the address-book sync client
fn contact_sync(config: &ContactsConfig) -> anyhow::Result<Arc<dyn ContactSync>> {
    if !config.enabled {
        tracing::info!("Contact sync is disabled");
        return Ok(Arc::new(DisabledContactSync));
    }

    let client = GoogleContactsClient::new(config)
        .map_err(|e| anyhow::anyhow!("Failed to create contacts client: {}", e))?;
    if config.access_token.is_none() {
        tracing::info!("Contact sync reads credentials from {}", config.token_path);
    }
    Ok(Arc::new(client))
}

/// Run the HTTP reply server until Ctrl+C
async fn run_server(config: Config) -> anyhow::Result<()> {
    let sync = contact_sync(&config.contacts)?;

    let handler = Arc::new(ConversationHandler::new(
        Arc::new(InMemoryStateStore::new()),
        sync,
        &config.conversation,
    ));

    tracing::info!("scriptbot initialized successfully");
    tracing::info!("Press Ctrl+C to exit");

    sb_api::start_server(&config.api, handler, shutdown_signal()).await?;

    tracing::info!("Shutting down...");
    Ok(())
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

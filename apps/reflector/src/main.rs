mod config;
mod errors;
mod llm_client;
mod notion;
mod reflection;
mod routes;
mod state;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::notion::NotionClient;
use crate::reflection::prompts::compose_prompt;
use crate::reflection::runner::{fetch_latest_entry, run_reflection};
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "reflector", version, about = "Writes an AI reflection onto the latest journal entry")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Default)]
enum Command {
    /// Run a reflection on every inbound HTTP request (default)
    #[default]
    Serve,
    /// Run a single reflection and exit, for cron-style schedulers
    Once,
    /// Fetch the latest entry and print its prompt without calling the model or writing
    Preview,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting reflector v{}", env!("CARGO_PKG_VERSION"));

    let store = NotionClient::new(
        config.notion_api_key.clone(),
        config.notion_database_id.clone(),
    );
    info!("Notion client initialized (template: {:?})", config.template);

    match args.command.unwrap_or_default() {
        Command::Serve => {
            let generator = build_generator(&config)?;
            serve(config, store, generator).await
        }
        Command::Once => {
            let generator = build_generator(&config)?;
            let report = run_reflection(&store, &generator, config.template).await?;
            info!(run_id = %report.run_id, page_id = %report.page_id, "Reflection complete");
            Ok(())
        }
        Command::Preview => {
            let entry = fetch_latest_entry(&store, config.template).await?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
            println!();
            println!("{}", compose_prompt(&entry));
            Ok(())
        }
    }
}

fn build_generator(config: &Config) -> Result<LlmClient> {
    let generator = LlmClient::new(config.require_openai_api_key()?.to_string());
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    Ok(generator)
}

async fn serve(config: Config, store: NotionClient, generator: LlmClient) -> Result<()> {
    let port = config.port;
    let state = AppState {
        config,
        store: Arc::new(store),
        generator: Arc::new(generator),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

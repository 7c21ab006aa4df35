use anyhow::{Context, Result};

use crate::reflection::prompts::PromptTemplate;

/// Application configuration loaded from environment variables.
/// Built once in `main` and handed to the clients; nothing below `main` reads the env.
#[derive(Debug, Clone)]
pub struct Config {
    pub notion_api_key: String,
    pub notion_database_id: String,
    /// Only `serve` and `once` call the model; `preview` runs without it.
    pub openai_api_key: Option<String>,
    pub template: PromptTemplate,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            notion_api_key: require_env("NOTION_API_KEY")?,
            notion_database_id: require_env("NOTION_DB_ID")?,
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            template: std::env::var("REFLECTION_TEMPLATE")
                .unwrap_or_else(|_| "echo".to_string())
                .parse::<PromptTemplate>()
                .context("REFLECTION_TEMPLATE must be 'echo' or 'notes'")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// The completion-service key, for commands that generate reflections.
    pub fn require_openai_api_key(&self) -> Result<&str> {
        self.openai_api_key
            .as_deref()
            .context("Required environment variable 'OPENAI_API_KEY' is not set")
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

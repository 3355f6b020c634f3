use anyhow::{Context, Result};

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_RECOMMENDER_URL: &str = "http://localhost:5000";
const DEFAULT_SESSION_FILE: &str = ".skillmatch/session.json";

/// Application configuration loaded from environment variables.
/// Every variable has a compiled-in default.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub recommender_url: String,
    pub session_file: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: env_or("SKILLMATCH_API_URL", DEFAULT_API_URL),
            recommender_url: env_or("SKILLMATCH_RECOMMENDER_URL", DEFAULT_RECOMMENDER_URL),
            session_file: env_or("SKILLMATCH_SESSION_FILE", DEFAULT_SESSION_FILE),
            port: env_or("PORT", "3000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8000";
const DEFAULT_STORAGE_DIR: &str = "/tmp/resumes";

/// Application configuration loaded from environment variables.
/// Every variable is optional; the defaults reproduce the fixed deployment
/// (`0.0.0.0:8000`, files under `/tmp/resumes`).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub storage_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            host: env_or("HOST", DEFAULT_HOST)
                .parse::<IpAddr>()
                .context("HOST must be a valid IP address")?,
            port: env_or("PORT", DEFAULT_PORT)
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            storage_dir: PathBuf::from(env_or("RESUME_STORAGE_DIR", DEFAULT_STORAGE_DIR)),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

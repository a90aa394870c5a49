// src/config.rs

use std::env;
use dotenvy::dotenv;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,

    /// Base URL the feedback links and QR codes point at. This is the
    /// address respondents reach the service on, not the bind address.
    pub public_base_url: Url,

    pub listen_addr: String,

    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://mindscreen.db?mode=rwc".to_string());

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
        let public_base_url = Url::parse(&public_base_url)
            .expect("PUBLIC_BASE_URL must be a valid URL");

        let listen_addr = env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            public_base_url,
            listen_addr,
            rust_log,
        }
    }
}

use std::{net::SocketAddr, time::Duration};

pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";

pub struct Config {
    pub listen_addr: SocketAddr,
    /// `None` runs without the durable store (cache-only mode).
    pub db_path: Option<String>,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub coingecko_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("SATVIEW_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid SATVIEW_LISTEN_ADDR");
        let db_path = match std::env::var("SATVIEW_DB_PATH") {
            Ok(value) if value == "disabled" => None,
            Ok(value) => Some(value),
            Err(_) => Some("./db/app.db".to_string()),
        };
        let cors_allow = std::env::var("SATVIEW_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("SATVIEW_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let coingecko_base_url = std::env::var("SATVIEW_COINGECKO_URL")
            .unwrap_or_else(|_| DEFAULT_COINGECKO_URL.to_string());
        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            coingecko_base_url,
        }
    }
}

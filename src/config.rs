use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::net::IpAddr;

#[derive(Debug)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub request_timeout_secs: u64,
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            host: env::var("HOST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(IpAddr::from([127, 0, 0, 1])),
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(3000),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(30),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

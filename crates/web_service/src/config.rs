//! Server configuration
//!
//! Environment variables:
//! - `APP_HOST`: bind address (default: 127.0.0.1)
//! - `APP_PORT`: listen port (default: 8080)
//! - `APP_WORKERS`: actix worker count (default: 4)

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("APP_HOST")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.host),
            port: lookup("APP_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            workers: lookup("APP_WORKERS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.workers),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

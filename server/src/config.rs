//! Environment-driven configuration with usable defaults.

use std::env;
use std::time::Duration;

use tracing::warn;

const DEFAULT_PORT: &str = "3000";
const DEFAULT_DB_PATH: &str = "posts.db";
const DEFAULT_SOURCE_URL: &str = "https://jsonplaceholder.typicode.com";
pub(crate) const DEFAULT_SYNC_INTERVAL_SECS: u64 = 600;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: String,
    pub db_path: String,
    pub source_url: String,
    pub sync_interval: Duration,
}

impl Config {
    /// Reads `PORT`, `DB_PATH`, `SOURCE_URL` and `SYNC_INTERVAL_SECS`,
    /// falling back to defaults for anything unset. A malformed or zero
    /// interval is logged and replaced by the default rather than refusing
    /// to start; a zero period would panic the timer task.
    pub fn from_env() -> Self {
        let port = env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
        let db_path = env::var("DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        let source_url = env::var("SOURCE_URL").unwrap_or_else(|_| DEFAULT_SOURCE_URL.to_string());
        let sync_interval_secs = match env::var("SYNC_INTERVAL_SECS") {
            Ok(raw) => match raw.parse() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(value = %raw, "SYNC_INTERVAL_SECS is not a positive number, using default");
                    DEFAULT_SYNC_INTERVAL_SECS
                }
            },
            Err(_) => DEFAULT_SYNC_INTERVAL_SECS,
        };
        Config {
            port,
            db_path,
            source_url,
            sync_interval: Duration::from_secs(sync_interval_secs),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }
}

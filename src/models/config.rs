//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_settle_delay_ms() -> u64 {
    300
}

fn default_busy_timeout_ms() -> u64 {
    30_000
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the binary and the board engine.
pub struct AppConfig {
    pub database_url: String,
    /// How long an optimistic board move stays visible after the drop.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

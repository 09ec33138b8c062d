use envconfig::Envconfig;
use serde::{Deserialize, Serialize};

#[derive(Envconfig, Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[envconfig(from = "DATABASE_URL", default = "postgresql://localhost/feed")]
    pub database_url: String,

    #[envconfig(from = "FEED_DB_MAX_CONNECTIONS", default = "5")]
    pub db_max_connections: u32,

    #[envconfig(from = "FEED_LEADERBOARD_SIZE", default = "5")]
    pub leaderboard_size: usize,

    #[envconfig(from = "RUST_LOG", default = "info")]
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, envconfig::Error> {
        Self::init_from_env()
    }
}

//! Runtime configuration, read from the environment (and a `.env` file if present).

use thiserror::Error;

pub const DEFAULT_SHOP_NAME: &str = "Brew POS";
pub const DEFAULT_STORE_BUFFER: usize = 32;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosConfig {
    /// Shop display name (env: POS_SHOP_NAME)
    pub shop_name: String,
    /// Request channel capacity of each store actor (env: POS_STORE_BUFFER)
    pub store_buffer: usize,
    /// Fallback log filter when RUST_LOG is unset (env: POS_LOG_FILTER)
    pub log_filter: String,
    /// Seed the starter menu into an empty catalog (env: POS_SEED_MENU)
    pub seed_menu: bool,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            shop_name: DEFAULT_SHOP_NAME.to_string(),
            store_buffer: DEFAULT_STORE_BUFFER,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            seed_menu: true,
        }
    }
}

impl PosConfig {
    /// Load configuration from environment variables, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`; unset or empty keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let store_buffer = match get("POS_STORE_BUFFER") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "POS_STORE_BUFFER",
                        value: raw,
                    })
                }
            },
            None => defaults.store_buffer,
        };

        let seed_menu = match get("POS_SEED_MENU") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                key: "POS_SEED_MENU",
                value: raw,
            })?,
            None => defaults.seed_menu,
        };

        Ok(Self {
            shop_name: get("POS_SHOP_NAME").unwrap_or(defaults.shop_name),
            store_buffer,
            log_filter: get("POS_LOG_FILTER").unwrap_or(defaults.log_filter),
            seed_menu,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

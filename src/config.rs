use leptos::logging::{log, warn};
use std::env;

pub const DEFAULT_DB_PATH: &str = "spotstay.db";

/// Application settings read from `SPOTSTAY_*` environment variables.
/// Listen address and site root stay with the Leptos configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: String,
    pub seed_demo: bool,
    pub secure_cookies: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            seed_demo: true,
            secure_cookies: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let config = Self {
            db_path: lookup("SPOTSTAY_DB_PATH")
                .filter(|path| !path.trim().is_empty())
                .unwrap_or(defaults.db_path),
            seed_demo: parse_flag("SPOTSTAY_SEED_DEMO", lookup("SPOTSTAY_SEED_DEMO"), defaults.seed_demo),
            secure_cookies: parse_flag(
                "SPOTSTAY_SECURE_COOKIES",
                lookup("SPOTSTAY_SECURE_COOKIES"),
                defaults.secure_cookies,
            ),
        };
        log!("[CONFIG] {:?}", config);
        config
    }
}

fn parse_flag(key: &str, raw: Option<String>, default: bool) -> bool {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        other => {
            warn!("[CONFIG] Invalid {key} value '{other}', using default: {default}");
            default
        }
    }
}

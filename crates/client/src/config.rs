//! Client configuration from the environment

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:44335";
pub const DEFAULT_DATA_DIR: &str = ".vivopass";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin, without trailing slash
    pub api_url: String,
    /// Directory holding `session.json`
    pub data_dir: PathBuf,
    pub timeout: Duration,
    /// Look up role display names after loading the profile
    pub resolve_role_names: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            resolve_role_names: true,
        }
    }
}

impl ClientConfig {
    /// Read `VIVOPASS_*` variables, keeping defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: lookup("VIVOPASS_API_URL")
                .map(|raw| raw.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_url),
            data_dir: lookup("VIVOPASS_DATA_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            timeout: lookup("VIVOPASS_TIMEOUT_SECS")
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            resolve_role_names: parse_flag(
                lookup("VIVOPASS_RESOLVE_ROLE_NAMES").as_deref(),
                defaults.resolve_role_names,
            ),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Path of the persisted session file
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }
}

fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match raw.map(|r| r.trim().to_ascii_lowercase()) {
        Some(value) => match value.as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}

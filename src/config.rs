//! Process configuration, read once at startup.

use std::fmt;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Upstream credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Configuration for the relay server.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address to bind the HTTP listener.
    pub bind_addr: String,
    /// Gemini credential. `None` disables the chat route.
    pub api_key: Option<ApiKey>,
    /// Model used for every generation call.
    pub model: String,
    /// Scheme and host of the Gemini REST API.
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Config {
    /// Reads configuration from environment variables.
    ///
    /// | Variable          | Default                                     |
    /// |-------------------|---------------------------------------------|
    /// | `BIND_ADDR`       | `0.0.0.0:3000`                              |
    /// | `GEMINI_API_KEY`  | unset (chat route answers 500)              |
    /// | `GEMINI_MODEL`    | `gemini-pro`                                |
    /// | `GEMINI_API_BASE` | `https://generativelanguage.googleapis.com` |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            api_key: get("GEMINI_API_KEY").map(ApiKey::new),
            model: get("GEMINI_MODEL").unwrap_or(defaults.model),
            api_base: get("GEMINI_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
        }
    }
}

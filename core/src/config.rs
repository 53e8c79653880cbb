use std::env;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be true/false/1/0, got {value:?}")]
    InvalidFlag { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the todo/user service.
    pub api_url: String,
    /// Restore a checkbox to its stored state when the remote update fails.
    pub revert_on_failure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            revert_on_failure: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("TODO_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let revert_on_failure = match lookup("TODO_REVERT_ON_FAILURE") {
            Some(value) => parse_flag("TODO_REVERT_ON_FAILURE", value)?,
            None => false,
        };
        Ok(Config {
            api_url,
            revert_on_failure,
        })
    }
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { name, value }),
    }
}

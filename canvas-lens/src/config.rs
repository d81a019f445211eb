//! Configuration for the Canvas API client
//!
//! The library only needs a base URL and an API token before first use;
//! an optional default student id saves observer accounts from passing
//! `--student` on every call. Loading mechanics (`.env` files) live in
//! the CLI crate.

use crate::error::{Error, Result};

/// Environment variable holding the Canvas instance base URL,
/// e.g. `https://school.instructure.com`.
pub const ENV_BASE_URL: &str = "CANVAS_BASE_URL";
/// Environment variable holding the Canvas API bearer token.
pub const ENV_API_TOKEN: &str = "CANVAS_API_TOKEN";
/// Environment variable holding the default student id for observer
/// accounts (numeric, or `self`).
pub const ENV_STUDENT_ID: &str = "CANVAS_STUDENT_ID";

/// Connection settings for a Canvas instance
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Canvas instance, without the `/api/v1` suffix
    pub base_url: String,
    /// Bearer token used on every request
    pub api_token: String,
    /// Default student id (`self` or numeric) used when a caller does not
    /// pass one explicitly
    pub default_student_id: Option<String>,
}

impl Config {
    /// Build a config from explicit values.
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
            default_student_id: None,
        }
    }

    /// Set the default student id used when callers omit one.
    pub fn with_default_student(mut self, student_id: impl Into<String>) -> Self {
        self.default_student_id = Some(student_id.into());
        self
    }

    /// Load configuration from the process environment.
    ///
    /// Requires `CANVAS_BASE_URL` and `CANVAS_API_TOKEN`;
    /// `CANVAS_STUDENT_ID` is optional.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(ENV_BASE_URL)
            .map_err(|_| Error::Config(format!("{ENV_BASE_URL} is not set")))?;
        let api_token = std::env::var(ENV_API_TOKEN)
            .map_err(|_| Error::Config(format!("{ENV_API_TOKEN} is not set")))?;
        let default_student_id = std::env::var(ENV_STUDENT_ID).ok().filter(|s| !s.is_empty());

        if base_url.trim().is_empty() {
            return Err(Error::Config(format!("{ENV_BASE_URL} is empty")));
        }
        if api_token.trim().is_empty() {
            return Err(Error::Config(format!("{ENV_API_TOKEN} is empty")));
        }

        Ok(Self {
            base_url,
            api_token,
            default_student_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_default_student() {
        let config = Config::new("https://school.instructure.com", "token")
            .with_default_student("12345");
        assert_eq!(config.default_student_id.as_deref(), Some("12345"));
    }
}

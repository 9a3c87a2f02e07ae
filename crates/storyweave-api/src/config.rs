//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use storyweave_generation_client::HttpStoryGenerator;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind (`HOST`).
    pub host: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Base URL of the story generation backend (`STORY_BACKEND_URL`).
    pub backend_url: String,
    /// Connect timeout for backend calls (`STORY_BACKEND_CONNECT_TIMEOUT_SECS`).
    pub backend_connect_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let backend_url = lookup("STORY_BACKEND_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_owned());
        let backend_connect_timeout = lookup("STORY_BACKEND_CONNECT_TIMEOUT_SECS")
            .map(|raw| parse_timeout_secs(&raw))
            .transpose()?;

        Ok(Self {
            host,
            port,
            backend_url,
            backend_connect_timeout,
        })
    }

    /// The address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }

    /// Builds the HTTP client for the configured generation backend.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Client` if the HTTP client cannot be constructed.
    pub fn story_generator(&self) -> Result<HttpStoryGenerator, AppError> {
        Ok(HttpStoryGenerator::new(
            self.backend_url.clone(),
            self.backend_connect_timeout,
        )?)
    }
}

fn parse_timeout_secs(raw: &str) -> Result<Duration, AppError> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AppError::Config(format!(
            "STORY_BACKEND_CONNECT_TIMEOUT_SECS must be a positive integer, got {raw:?}"
        ))),
    }
}

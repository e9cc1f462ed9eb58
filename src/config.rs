// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Connection configuration loaded from environment variables.
//!
//! The crate is a library, so loading from the environment is optional:
//! host processes may build a [`Config`] themselves and pass it to
//! [`MongoDb::connect`](crate::db::MongoDb::connect).

use std::env;
use std::time::Duration;

const DEFAULT_DATABASE: &str = "users_db";
const DEFAULT_SERVER_SELECTION_TIMEOUT_MS: u64 = 10_000;

/// MongoDB connection settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection string, e.g. `mongodb://localhost:27017`
    pub mongodb_uri: String,
    /// Database holding the user and access token collections
    pub database: String,
    /// How long the driver waits for a suitable server
    pub server_selection_timeout: Duration,
    /// Application name reported to the server
    pub app_name: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            database: DEFAULT_DATABASE.to_string(),
            server_selection_timeout: Duration::from_millis(DEFAULT_SERVER_SELECTION_TIMEOUT_MS),
            app_name: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let server_selection_timeout = match env::var("MONGODB_SERVER_SELECTION_TIMEOUT_MS") {
            Ok(value) => {
                let millis = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::Invalid {
                        var: "MONGODB_SERVER_SELECTION_TIMEOUT_MS",
                        value,
                    })?;
                Duration::from_millis(millis)
            }
            Err(_) => Duration::from_millis(DEFAULT_SERVER_SELECTION_TIMEOUT_MS),
        };

        Ok(Self {
            mongodb_uri: env::var("MONGODB_URI")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("MONGODB_URI"))?,
            database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| DEFAULT_DATABASE.to_string()),
            server_selection_timeout,
            app_name: env::var("MONGODB_APP_NAME").ok(),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

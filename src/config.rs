//! Configuration for the demo binary
//!
//! The library itself takes every input as a parameter; only the binary
//! reads configuration, from `client.toml` with environment overrides.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::client::Credentials;

/// Connection settings for the demo binary.
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Server to connect to.
    pub host: String,

    /// Control port. Defaults to the standard FTP port.
    #[serde(default = "default_port")]
    pub port: u16,

    pub username: String,
    pub password: Option<String>,
    pub account: Option<String>,

    /// Directory to list after logging in, if any.
    pub list_dir: Option<String>,
}

fn default_port() -> u16 {
    21
}

impl ClientConfig {
    /// Load configuration from `client.toml` with `FTP_CLIENT_*`
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("client").required(false))
            .add_source(Environment::with_prefix("FTP_CLIENT"))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Message("host cannot be empty".into()));
        }

        if self.username.is_empty() {
            return Err(ConfigError::Message("username cannot be empty".into()));
        }

        if self.account.is_some() && self.password.is_none() {
            return Err(ConfigError::Message(
                "account requires a password".into(),
            ));
        }

        Ok(())
    }

    /// Credentials built from the configured username/password/account.
    pub fn credentials(&self) -> Credentials {
        // validate() already rejected the account-without-password shape.
        Credentials::from_parts(
            &self.username,
            self.password.as_deref(),
            self.account.as_deref(),
        )
        .unwrap_or_else(|| Credentials::UserOnly(self.username.clone()))
    }
}

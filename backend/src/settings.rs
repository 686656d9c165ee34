//! Process configuration loaded via OrthoConfig.
//!
//! Every value can come from the command line, a config file or a
//! `CAREERLOG_*` environment variable. Session cookie settings are read
//! separately by [`crate::inbound::http::session_config`].

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::completion::CompletionSettings;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Failure to turn raw settings into adapter configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
    #[error("invalid completion base URL {value:?}: {source}")]
    CompletionUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Server, database and completion settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CAREERLOG")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    #[ortho_config(default = 10)]
    pub db_pool_size: u32,
    /// OpenAI-compatible base URL, e.g. `https://api.openai.com/v1`.
    pub completion_base_url: Option<String>,
    /// Bearer key; completion is disabled when absent.
    pub completion_api_key: Option<String>,
    pub completion_model: Option<String>,
    /// Request timeout in seconds.
    pub completion_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// The listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Pool settings when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_ref().map(|url| {
            PoolConfig::new(url.clone())
                .with_max_size(self.db_pool_size)
        })
    }

    /// Completion settings when an API key is configured.
    pub fn completion_settings(&self) -> Result<Option<CompletionSettings>, SettingsError> {
        let Some(key) = self.completion_api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return Ok(None);
        };
        let mut settings = CompletionSettings::openai(key).map_err(|source| {
            SettingsError::CompletionUrl {
                value: "default".to_owned(),
                source,
            }
        })?;
        if let Some(raw) = &self.completion_base_url {
            let url = Url::parse(raw).map_err(|source| SettingsError::CompletionUrl {
                value: raw.clone(),
                source,
            })?;
            settings = settings.with_base_url(url);
        }
        if let Some(model) = &self.completion_model {
            settings = settings.with_model(model.clone());
        }
        if let Some(secs) = self.completion_timeout_secs {
            settings = settings.with_timeout(Duration::from_secs(secs));
        }
        Ok(Some(settings))
    }
}

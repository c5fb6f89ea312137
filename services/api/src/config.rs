//! Service configuration
//!
//! Settings come from built-in defaults overridden by `BURREN_*` environment
//! variables, e.g. `BURREN_PORT=8080`.

use anyhow::Result;
use serde::Deserialize;

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// `tracing` filter directive, e.g. `info` or `burren_api=debug`
    pub log_filter: String,
}

impl ServerConfig {
    /// Create a new ServerConfig from defaults and environment variables
    ///
    /// # Environment Variables
    /// - `BURREN_HOST`: Bind address (default: "0.0.0.0")
    /// - `BURREN_PORT`: Listen port (default: 3001)
    /// - `BURREN_LOG_FILTER`: Log filter (default: "info")
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3001)?
            .set_default("log_filter", "info")?
            .add_source(config::Environment::with_prefix("BURREN").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Socket address to bind, as `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

//! Server, pool and password settings loaded via OrthoConfig from `JOKES_*`
//! variables and CLI flags. Session secrets are read separately by
//! [`crate::inbound::http::session_config`].

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::PasswordCost;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Listener, storage and password-hashing settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOKES")]
pub struct AppSettings {
    /// Interface to bind; defaults to `0.0.0.0`.
    pub host: Option<String>,
    /// Port to bind; defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without one, jokes live in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub db_max_connections: Option<u32>,
    /// Connections the pool keeps open while idle.
    pub db_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connect_timeout_secs: Option<u64>,
    /// Argon2 memory cost in KiB.
    pub password_memory_kib: Option<u32>,
    /// Argon2 pass count.
    pub password_iterations: Option<u32>,
}

impl AppSettings {
    /// Host and port for `HttpServer::bind`.
    pub fn bind_addr(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool settings for the configured database; `None` means the in-memory
    /// store. Unset fields keep the [`PoolConfig`] defaults.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let mut config = PoolConfig::new(self.database_url()?);
        if let Some(max_size) = self.db_max_connections {
            config = config.with_max_size(max_size);
        }
        if let Some(min_idle) = self.db_min_idle {
            config = config.with_min_idle(Some(min_idle));
        }
        if let Some(secs) = self.db_connect_timeout_secs {
            config = config.with_connection_timeout(Duration::from_secs(secs));
        }
        Some(config)
    }

    /// Argon2 cost with unset fields left at the library defaults.
    pub fn password_cost(&self) -> PasswordCost {
        let defaults = PasswordCost::default();
        PasswordCost {
            memory_kib: self.password_memory_kib.unwrap_or(defaults.memory_kib),
            iterations: self.password_iterations.unwrap_or(defaults.iterations),
            parallelism: defaults.parallelism,
        }
    }
}

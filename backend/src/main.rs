//! Backend entry-point: loads settings, prepares storage and serves the jokes
//! routes.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use jokes::domain::PasswordVerifier;
use jokes::inbound::http::health::HealthState;
use jokes::inbound::http::session_codec::SessionCodec;
use jokes::inbound::http::session_config::fingerprint::key_fingerprint;
use jokes::inbound::http::session_config::{BuildMode, session_settings_from_env};
use jokes::outbound::persistence::{DbPool, run_pending_migrations};
use jokes::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let previous: Vec<String> = session.previous.iter().map(key_fingerprint).collect();
    info!(
        current = %key_fingerprint(&session.current),
        previous = ?previous,
        cookie_secure = session.cookie_secure,
        "session keys loaded"
    );

    let passwords = PasswordVerifier::new(settings.password_cost()).map_err(std::io::Error::other)?;
    let codec = SessionCodec::from_settings(session, Arc::new(DefaultClock));
    let mut config = ServerConfig::new(codec, settings.bind_addr());

    if let Some(pool_config) = settings.pool_config() {
        run_pending_migrations(pool_config.database_url())
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let (host, port) = settings.bind_addr();
    info!(%host, port, "starting jokes server");
    create_server(health_state, config, passwords)?.await
}

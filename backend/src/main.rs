//! Backend entry-point: loads settings, selects the user store, and serves
//! the signup API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use signup_backend::domain::CredentialStore;
use signup_backend::domain::ports::UserStore;
use signup_backend::inbound::http::health::HealthState;
use signup_backend::outbound::memory::InMemoryUserStore;
use signup_backend::outbound::persistence::{
    DbPool, DieselUserStore, PoolConfig, run_pending_migrations,
};
use signup_backend::settings::ServerSettings;

use server::{ServerConfig, create_server};

async fn build_user_store(settings: &ServerSettings) -> color_eyre::Result<Arc<dyn UserStore>> {
    let Some(database_url) = settings.database_url() else {
        warn!("no database URL configured; accounts are kept in memory");
        return Ok(Arc::new(InMemoryUserStore::new()));
    };

    if settings.run_migrations() {
        run_pending_migrations(&database_url)
            .await
            .wrap_err("apply database migrations")?;
    }
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .wrap_err("connect to database")?;
    Ok(Arc::new(DieselUserStore::new(pool)))
}

fn build_credentials(settings: &ServerSettings) -> CredentialStore {
    match settings.secret_key() {
        Some(secret) => CredentialStore::new().with_secret(secret.as_bytes()),
        None => CredentialStore::new(),
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;

    let users = build_user_store(&settings).await?;
    let config = ServerConfig::new(bind_addr, users).with_credentials(build_credentials(&settings));
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::default_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "signup backend listening");
    server.await?;
    Ok(())
}

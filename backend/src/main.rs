//! Backend entry-point: reads configuration, seeds demo data and serves HTTP.

mod server;

use std::sync::Arc;

use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ortho_config::OrthoConfig;
use tinylink::config::AppSettings;
use tinylink::domain::{Store, seed_example_data};
use tinylink::inbound::http::session_config::{BuildMode, session_settings_from_env};
use tinylink::inbound::http::state::HttpState;
use tinylink::outbound::{Argon2Hasher, RandomAliasKeys};

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

    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let settings = AppSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;

    let cost = settings.hash_cost();
    let hasher = Arc::new(
        Argon2Hasher::with_cost(cost.memory_kib, cost.iterations, cost.lanes)
            .map_err(std::io::Error::other)?,
    );
    let store = Arc::new(Store::new());

    if settings.seed_demo {
        let outcome = seed_example_data(&store, hasher.as_ref()).map_err(std::io::Error::other)?;
        info!(
            users_added = outcome.users_added,
            aliases_added = outcome.aliases_added,
            "example data seeded"
        );
    }

    let state = HttpState::from_store(store, hasher, Arc::new(RandomAliasKeys));
    create_server(state, ServerConfig::new(session, settings.bind_addr()))?.await
}

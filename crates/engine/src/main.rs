//! NFTDB Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nftdb_engine::api;
use nftdb_engine::infrastructure::{
    config::{EngineConfig, StoreKind},
    persistence::{InMemoryNftRepo, SqliteNftRepo},
    ports::NftRepo,
    random::SystemRandom,
};
use nftdb_engine::use_cases::nfts::SeedOutcome;
use nftdb_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine is often run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nftdb_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting NFTDB Engine");

    let config = EngineConfig::from_env();

    let nft_repo: Arc<dyn NftRepo> = match &config.store {
        StoreKind::Sqlite { db_path } => {
            tracing::info!(path = %db_path, "Opening SQLite record store");
            Arc::new(SqliteNftRepo::new(db_path).await?)
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory record store, records are lost on shutdown");
            Arc::new(InMemoryNftRepo::new())
        }
    };

    let app = Arc::new(App::new(
        nft_repo,
        Arc::new(SystemRandom::new()),
        config.seed.clone(),
    ));

    // Bootstrap an empty store before accepting requests
    match app.use_cases.nfts.seed.execute().await? {
        SeedOutcome::Seeded(count) => tracing::info!(count, "Generated initial NFT records"),
        SeedOutcome::AlreadyPopulated => tracing::info!("NFT store already populated"),
    }

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = config.cors_layer() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

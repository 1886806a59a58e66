//! Engine configuration loaded from the environment.

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Default bind host.
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default SQLite database file.
pub const DEFAULT_DB_PATH: &str = "nfts.db";

/// Number of records generated when the store starts empty.
pub const DEFAULT_SEED_COUNT: u32 = 100;

/// Base of the placeholder sprite link of generated records.
pub const DEFAULT_SPRITE_BASE_URL: &str = "https://www.google.com/";

/// Which record store backs the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite { db_path: String },
    Memory,
}

/// Bootstrap parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    pub count: u32,
    pub sprite_base_url: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_SEED_COUNT,
            sprite_base_url: DEFAULT_SPRITE_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub store: StoreKind,
    pub seed: SeedConfig,
    /// `*` or a comma-separated origin list; `None` disables CORS.
    pub cors_allowed_origins: Option<String>,
}

impl EngineConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// missing or unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_host = non_empty("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.into());
        let server_port = non_empty("SERVER_PORT")
            .or_else(|| non_empty("PORT"))
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SERVER_PORT);

        let store = match non_empty("NFT_STORE").map(|v| v.to_ascii_lowercase()) {
            Some(kind) if kind == "memory" => StoreKind::Memory,
            Some(kind) if kind != "sqlite" => {
                tracing::warn!(store = %kind, "Unknown NFT_STORE, falling back to sqlite");
                StoreKind::Sqlite {
                    db_path: non_empty("NFT_DB").unwrap_or_else(|| DEFAULT_DB_PATH.into()),
                }
            }
            _ => StoreKind::Sqlite {
                db_path: non_empty("NFT_DB").unwrap_or_else(|| DEFAULT_DB_PATH.into()),
            },
        };

        let seed = SeedConfig {
            count: non_empty("NFT_SEED_COUNT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SEED_COUNT),
            sprite_base_url: non_empty("NFT_SPRITE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SPRITE_BASE_URL.into()),
        };

        Self {
            server_host,
            server_port,
            store,
            seed,
            cors_allowed_origins: non_empty("CORS_ALLOWED_ORIGINS"),
        }
    }

    /// CORS layer for the configured origins, or `None` when CORS is off or
    /// no listed origin is a valid header value.
    pub fn cors_layer(&self) -> Option<CorsLayer> {
        let allowed_origins = self.cors_allowed_origins.as_deref()?;

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
            // The game client posts JSON bodies, which triggers CORS preflights.
            .allow_headers([header::CONTENT_TYPE]);

        if allowed_origins == "*" {
            return Some(cors.allow_origin(Any));
        }

        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            tracing::warn!(origins = %allowed_origins, "No valid CORS origin, CORS disabled");
            return None;
        }

        Some(cors.allow_origin(origins))
    }
}

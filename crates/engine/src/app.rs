//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    config::SeedConfig,
    ports::{NftRepo, RandomPort},
};
use crate::use_cases;

/// Main application state.
///
/// Holds the use cases built on the record store.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub nfts: use_cases::NftUseCases,
}

impl App {
    /// Create a new App with all dependencies wired.
    pub fn new(nft_repo: Arc<dyn NftRepo>, random: Arc<dyn RandomPort>, seed: SeedConfig) -> Self {
        let use_cases = UseCases {
            nfts: use_cases::NftUseCases::new(nft_repo, random, seed),
        };

        Self { use_cases }
    }
}

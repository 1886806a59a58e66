//! NFT use cases: queries, batch synchronization and bootstrap seeding.
//!
//! Every mutating call stages its writes in one `NftBatch` and commits it
//! once, so a call either persists completely or not at all.

use std::sync::Arc;

use nftdb_domain::NftId;

use crate::infrastructure::config::SeedConfig;
use crate::infrastructure::ports::{NftRepo, RandomPort, RepoError};

mod query;
mod seed;
mod sync;

pub use query::NftQuery;
pub use seed::{SeedNfts, SeedOutcome};
pub use sync::{SyncNfts, SyncSummary};

/// Shared error type for NFT use cases.
#[derive(Debug, thiserror::Error)]
pub enum NftError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No NFT found for ids: {}", format_ids(.missing))]
    NotFound { missing: Vec<NftId> },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

fn format_ids(ids: &[NftId]) -> String {
    ids.iter()
        .map(NftId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Container for NFT use cases.
pub struct NftUseCases {
    pub query: Arc<NftQuery>,
    pub sync: Arc<SyncNfts>,
    pub seed: Arc<SeedNfts>,
}

impl NftUseCases {
    pub fn new(repo: Arc<dyn NftRepo>, random: Arc<dyn RandomPort>, seed: SeedConfig) -> Self {
        Self {
            query: Arc::new(NftQuery::new(repo.clone())),
            sync: Arc::new(SyncNfts::new(repo.clone())),
            seed: Arc::new(SeedNfts::new(repo, random, seed)),
        }
    }
}

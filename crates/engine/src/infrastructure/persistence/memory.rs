//! In-memory record store for development and testing
//!
//! Records live in a `BTreeMap` behind a single `RwLock`. A batch is applied
//! to a copy of the map while the write lock is held and swapped in only when
//! every op succeeded, so a failing batch leaves no trace.

use std::collections::BTreeMap;

use async_trait::async_trait;
use nftdb_domain::{Nft, NftId};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{BatchOp, NftBatch, NftRepo, RepoError};

/// In-memory record store.
#[derive(Default)]
pub struct InMemoryNftRepo {
    records: RwLock<BTreeMap<NftId, Nft>>,
}

impl InMemoryNftRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store that already holds `records` (later duplicates win).
    pub fn with_records(records: impl IntoIterator<Item = Nft>) -> Self {
        let map = records.into_iter().map(|nft| (nft.id, nft)).collect();
        Self {
            records: RwLock::new(map),
        }
    }
}

#[async_trait]
impl NftRepo for InMemoryNftRepo {
    async fn list_all(&self) -> Result<Vec<Nft>, RepoError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn get(&self, id: NftId) -> Result<Option<Nft>, RepoError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn get_many(&self, ids: &[NftId]) -> Result<Vec<Nft>, RepoError> {
        let guard = self.records.read().await;
        Ok(guard
            .values()
            .filter(|nft| ids.contains(&nft.id))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn commit(&self, batch: NftBatch) -> Result<(), RepoError> {
        let mut guard = self.records.write().await;

        if batch.requires_empty_store() && !guard.is_empty() {
            return Err(RepoError::constraint(format!(
                "NFT store already holds {} records",
                guard.len()
            )));
        }

        let mut staged = guard.clone();
        for op in batch.into_ops() {
            match op {
                BatchOp::Insert(nft) => {
                    if staged.contains_key(&nft.id) {
                        return Err(RepoError::conflict("Nft", nft.id));
                    }
                    staged.insert(nft.id, nft);
                }
                BatchOp::Upsert(nft) => {
                    staged.insert(nft.id, nft);
                }
            }
        }

        *guard = staged;
        Ok(())
    }
}

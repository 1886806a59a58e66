//! Batch synchronization: create, update-or-insert and reset.

use std::collections::HashMap;
use std::sync::Arc;

use nftdb_domain::{Nft, NftId};

use super::NftError;
use crate::infrastructure::ports::{NftBatch, NftRepo};

/// What a committed sync call wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub inserted: usize,
    pub updated: usize,
    /// Ids that had no stored record and were left alone (reset only).
    pub skipped: usize,
}

/// Applies caller-supplied record batches to the store.
pub struct SyncNfts {
    repo: Arc<dyn NftRepo>,
}

impl SyncNfts {
    pub fn new(repo: Arc<dyn NftRepo>) -> Self {
        Self { repo }
    }

    /// Insert every record. An id that already exists fails the whole call.
    pub async fn create(&self, nfts: Vec<Nft>) -> Result<SyncSummary, NftError> {
        let mut batch = NftBatch::new();
        for nft in nfts {
            batch.insert(nft);
        }

        let summary = SyncSummary {
            inserted: batch.len(),
            ..SyncSummary::default()
        };
        self.commit("create", batch).await?;
        Ok(summary)
    }

    /// Copy the stats of each record onto its stored counterpart, inserting
    /// the record when no counterpart exists.
    pub async fn update_or_insert(&self, nfts: Vec<Nft>) -> Result<SyncSummary, NftError> {
        let ids: Vec<NftId> = nfts.iter().map(|nft| nft.id).collect();
        let stored = self.load(&ids).await?;

        let mut batch = NftBatch::new();
        let mut summary = SyncSummary::default();
        for nft in nfts {
            match stored.get(&nft.id) {
                Some(existing) => {
                    let mut merged = existing.clone();
                    merged.copy_stats_from(&nft);
                    batch.upsert(merged);
                    summary.updated += 1;
                }
                None => {
                    batch.insert(nft);
                    summary.inserted += 1;
                }
            }
        }

        self.commit("update_or_insert", batch).await?;
        Ok(summary)
    }

    /// Reset the stats of every stored record among `ids`; unknown ids are skipped.
    pub async fn reset(&self, ids: &[NftId]) -> Result<SyncSummary, NftError> {
        let stored = self.load(ids).await?;

        let mut batch = NftBatch::new();
        let mut summary = SyncSummary::default();
        for id in ids {
            match stored.get(id) {
                Some(existing) => {
                    let mut cleared = existing.clone();
                    cleared.reset();
                    batch.upsert(cleared);
                    summary.updated += 1;
                }
                None => summary.skipped += 1,
            }
        }

        self.commit("reset", batch).await?;
        Ok(summary)
    }

    async fn load(&self, ids: &[NftId]) -> Result<HashMap<NftId, Nft>, NftError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(self
            .repo
            .get_many(ids)
            .await?
            .into_iter()
            .map(|nft| (nft.id, nft))
            .collect())
    }

    async fn commit(&self, operation: &'static str, batch: NftBatch) -> Result<(), NftError> {
        if batch.is_empty() {
            return Ok(());
        }

        let size = batch.len();
        match self.repo.commit(batch).await {
            Ok(()) => {
                tracing::info!(operation, records = size, "NFT batch committed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(operation, records = size, error = %e, "NFT batch rejected");
                Err(e.into())
            }
        }
    }
}

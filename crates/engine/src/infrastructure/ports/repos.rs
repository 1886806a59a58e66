//! Record store port and its unit of work.

use async_trait::async_trait;
use nftdb_domain::{Nft, NftId};

use super::RepoError;

// =============================================================================
// Unit of Work
// =============================================================================

/// A single staged write.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOp {
    /// Add a new record. Fails the batch if the id already exists.
    Insert(Nft),
    /// Add the record, or replace every non-identifier field of the stored one.
    Upsert(Nft),
}

impl BatchOp {
    pub fn nft(&self) -> &Nft {
        match self {
            Self::Insert(nft) | Self::Upsert(nft) => nft,
        }
    }
}

/// Writes staged by one use-case call and committed together.
///
/// A store applies the ops in order inside one atomic section. If any op
/// fails, or the empty-store guard does not hold, nothing is written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NftBatch {
    ops: Vec<BatchOp>,
    require_empty_store: bool,
}

impl NftBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, nft: Nft) {
        self.ops.push(BatchOp::Insert(nft));
    }

    pub fn upsert(&mut self, nft: Nft) {
        self.ops.push(BatchOp::Upsert(nft));
    }

    /// Only commit if the store holds no records when the batch is applied.
    pub fn only_if_empty(mut self) -> Self {
        self.require_empty_store = true;
        self
    }

    pub fn requires_empty_store(&self) -> bool {
        self.require_empty_store
    }

    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<BatchOp> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

// =============================================================================
// Database Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NftRepo: Send + Sync {
    /// Every stored record, ascending by id.
    async fn list_all(&self) -> Result<Vec<Nft>, RepoError>;
    async fn get(&self, id: NftId) -> Result<Option<Nft>, RepoError>;
    /// Records whose id is in `ids`; unmatched ids are omitted.
    async fn get_many(&self, ids: &[NftId]) -> Result<Vec<Nft>, RepoError>;
    async fn count(&self) -> Result<u64, RepoError>;
    /// Apply a unit of work atomically.
    async fn commit(&self, batch: NftBatch) -> Result<(), RepoError>;

    /// Insert-or-replace every record in one batch.
    async fn upsert_all(&self, nfts: &[Nft]) -> Result<(), RepoError> {
        let mut batch = NftBatch::new();
        for nft in nfts {
            batch.upsert(nft.clone());
        }
        self.commit(batch).await
    }
}

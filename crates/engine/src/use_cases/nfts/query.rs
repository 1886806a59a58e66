//! Read-side NFT operations.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use nftdb_domain::{Nft, NftId};

use super::NftError;
use crate::infrastructure::ports::NftRepo;

/// Lists records and resolves single or batched id lookups.
pub struct NftQuery {
    repo: Arc<dyn NftRepo>,
}

impl NftQuery {
    pub fn new(repo: Arc<dyn NftRepo>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Nft>, NftError> {
        Ok(self.repo.list_all().await?)
    }

    pub async fn get(&self, id: NftId) -> Result<Option<Nft>, NftError> {
        Ok(self.repo.get(id).await?)
    }

    /// Resolve every id or fail.
    ///
    /// Duplicate ids collapse to one record, returned in first-appearance
    /// order. If any id has no stored record the whole lookup fails with
    /// `NotFound` naming the missing ids.
    pub async fn get_batch(&self, ids: &[NftId]) -> Result<Vec<Nft>, NftError> {
        if ids.is_empty() {
            return Err(NftError::InvalidInput("ids are required".to_string()));
        }

        let mut seen = HashSet::new();
        let distinct: Vec<NftId> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        let mut found: HashMap<NftId, Nft> = self
            .repo
            .get_many(&distinct)
            .await?
            .into_iter()
            .map(|nft| (nft.id, nft))
            .collect();

        let missing: Vec<NftId> = distinct
            .iter()
            .copied()
            .filter(|id| !found.contains_key(id))
            .collect();
        if !missing.is_empty() {
            tracing::debug!(
                requested = distinct.len(),
                missing = missing.len(),
                "Batch lookup incomplete"
            );
            return Err(NftError::NotFound { missing });
        }

        Ok(distinct
            .iter()
            .filter_map(|id| found.remove(id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockNftRepo, RepoError};

    fn nft(id: i32) -> Nft {
        Nft::new(NftId::new(id))
    }

    fn ids(values: &[i32]) -> Vec<NftId> {
        values.iter().copied().map(NftId::new).collect()
    }

    #[tokio::test]
    async fn batch_returns_every_requested_record() {
        let mut repo = MockNftRepo::new();
        repo.expect_get_many()
            .withf(|ids| ids.to_vec() == vec![NftId::new(2), NftId::new(6), NftId::new(9)])
            .returning(|_| Ok(vec![nft(2), nft(6), nft(9)]));

        let query = NftQuery::new(Arc::new(repo));
        let result = query.get_batch(&ids(&[2, 6, 9])).await.expect("batch");

        assert_eq!(result, vec![nft(2), nft(6), nft(9)]);
    }

    #[tokio::test]
    async fn batch_fails_whole_request_when_any_id_is_missing() {
        let mut repo = MockNftRepo::new();
        repo.expect_get_many()
            .returning(|_| Ok(vec![nft(2), nft(9)]));

        let query = NftQuery::new(Arc::new(repo));
        let err = query.get_batch(&ids(&[2, 6, 9])).await.unwrap_err();

        match err {
            NftError::NotFound { missing } => assert_eq!(missing, ids(&[6])),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn batch_collapses_duplicates_in_request_order() {
        let mut repo = MockNftRepo::new();
        repo.expect_get_many()
            .withf(|ids| ids.to_vec() == vec![NftId::new(9), NftId::new(2)])
            .times(1)
            .returning(|_| Ok(vec![nft(2), nft(9)]));

        let query = NftQuery::new(Arc::new(repo));
        let result = query.get_batch(&ids(&[9, 2, 9])).await.expect("batch");

        assert_eq!(result, vec![nft(9), nft(2)]);
    }

    #[tokio::test]
    async fn empty_batch_is_rejected_before_the_store() {
        let repo = MockNftRepo::new();

        let query = NftQuery::new(Arc::new(repo));
        let err = query.get_batch(&[]).await.unwrap_err();

        assert!(matches!(err, NftError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let mut repo = MockNftRepo::new();
        repo.expect_list_all()
            .returning(|| Err(RepoError::database("list_all", "disk I/O error")));

        let query = NftQuery::new(Arc::new(repo));
        let err = query.list().await.unwrap_err();

        assert!(matches!(err, NftError::Repo(RepoError::Database { .. })));
    }
}

//! Startup bootstrap of an empty record store.

use std::sync::Arc;

use nftdb_domain::{
    sprite_sheet_placeholder, Nft, NftId, NFT_TYPE_LABELS, SKILL_CODE_COUNT, STAT_RANGE_MAX,
};

use super::NftError;
use crate::infrastructure::config::SeedConfig;
use crate::infrastructure::ports::{NftBatch, NftRepo, RandomPort};

/// Result of a bootstrap attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and now holds this many generated records.
    Seeded(usize),
    /// The store already held records; nothing was written.
    AlreadyPopulated,
}

/// Fills an empty store with randomly generated records.
///
/// The emptiness check is repeated inside the commit through the batch's
/// empty-store guard, so two processes bootstrapping the same database
/// cannot both seed it.
pub struct SeedNfts {
    repo: Arc<dyn NftRepo>,
    random: Arc<dyn RandomPort>,
    config: SeedConfig,
}

impl SeedNfts {
    pub fn new(repo: Arc<dyn NftRepo>, random: Arc<dyn RandomPort>, config: SeedConfig) -> Self {
        Self {
            repo,
            random,
            config,
        }
    }

    pub async fn execute(&self) -> Result<SeedOutcome, NftError> {
        let existing = self.repo.count().await?;
        if existing > 0 {
            tracing::debug!(existing, "NFT store already populated, skipping seed");
            return Ok(SeedOutcome::AlreadyPopulated);
        }

        let mut batch = NftBatch::new().only_if_empty();
        for nft in self.generate() {
            batch.insert(nft);
        }
        let count = batch.len();

        match self.repo.commit(batch).await {
            Ok(()) => {
                tracing::info!(count, "Seeded NFT store");
                Ok(SeedOutcome::Seeded(count))
            }
            Err(e) if e.is_rejection() => {
                tracing::info!(error = %e, "NFT store was seeded concurrently");
                Ok(SeedOutcome::AlreadyPopulated)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Generate the bootstrap records, with sequential ids starting at 0.
    pub fn generate(&self) -> Vec<Nft> {
        let count = i32::try_from(self.config.count).unwrap_or(i32::MAX);
        (0..count).map(|id| self.random_nft(NftId::new(id))).collect()
    }

    fn random_nft(&self, id: NftId) -> Nft {
        let stat = || self.random.gen_range(0, STAT_RANGE_MAX);
        let xp = || self.random.gen_unit();
        let label_index = self.random.gen_range(0, NFT_TYPE_LABELS.len() as i32);
        let nft_type = usize::try_from(label_index)
            .ok()
            .and_then(|i| NFT_TYPE_LABELS.get(i))
            .copied()
            .unwrap_or(NFT_TYPE_LABELS[0]);

        Nft {
            id,
            chp: stat(),
            atk: stat(),
            atk_xp: xp(),
            def: stat(),
            def_xp: xp(),
            spd: stat(),
            spd_xp: xp(),
            atk_spd: stat(),
            atk_spd_xp: xp(),
            atk_spd_c: stat(),
            atk_spd_c_xp: xp(),
            def_spd_d: stat(),
            def_spd_d_xp: xp(),
            atk_spd_s: stat(),
            atk_spd_s_xp: xp(),
            nft_type: nft_type.to_string(),
            skill: self.random.gen_range(0, SKILL_CODE_COUNT),
            sprite_sheet_link: sprite_sheet_placeholder(&self.config.sprite_base_url, id),
        }
    }
}

//! Demo driver exercising every record API operation.

use rand::Rng;

use nftdb_domain::{sprite_sheet_placeholder, NftId, NFT_TYPE_LABELS, SKILL_CODE_COUNT, STAT_RANGE_MAX};
use nftdb_shared::NftData;

use crate::client::{ClientError, NftClient};
use crate::holder::NftSlots;

pub const DEFAULT_FETCH_ID: i32 = 5;
pub const DEFAULT_BATCH_IDS: [i32; 3] = [2, 6, 9];
pub const DEFAULT_RESET_IDS: [i32; 3] = [3, 5, 7];
pub const DEFAULT_CREATE_COUNT: usize = 5;
/// Ids the update demo rewrites.
pub const UPDATE_IDS: [i32; 2] = [3, 8];
pub const DUMMY_CHP: i32 = 1000;
pub const DUMMY_SPRITE_BASE_URL: &str = "https://www.google.com/";

/// Dummy records with ids `0..count`, full health and random stats.
pub fn generate_dummy_nfts(count: usize, rng: &mut impl Rng) -> Vec<NftData> {
    (0..count)
        .map(|i| {
            let id = NftId::new(i32::try_from(i).unwrap_or(i32::MAX));
            NftData {
                id: id.get(),
                chp: DUMMY_CHP,
                atk: rng.gen_range(0..STAT_RANGE_MAX),
                atk_xp: rng.gen(),
                def: rng.gen_range(0..STAT_RANGE_MAX),
                def_xp: rng.gen(),
                spd: rng.gen_range(0..STAT_RANGE_MAX),
                spd_xp: rng.gen(),
                atk_spd: rng.gen_range(0..STAT_RANGE_MAX),
                atk_spd_xp: rng.gen(),
                atk_spd_c: rng.gen_range(0..STAT_RANGE_MAX),
                atk_spd_c_xp: rng.gen(),
                def_spd_d: rng.gen_range(0..STAT_RANGE_MAX),
                def_spd_d_xp: rng.gen(),
                atk_spd_s: rng.gen_range(0..STAT_RANGE_MAX),
                atk_spd_s_xp: rng.gen(),
                nft_type: NFT_TYPE_LABELS[rng.gen_range(0..NFT_TYPE_LABELS.len())].to_string(),
                skill: rng.gen_range(0..SKILL_CODE_COUNT),
                sprite_sheet_link: sprite_sheet_placeholder(DUMMY_SPRITE_BASE_URL, id),
            }
        })
        .collect()
}

/// Runs the demo operations against a record API, saving fetched records
/// into the local slots.
pub struct Demo {
    client: NftClient,
    slots: NftSlots,
}

impl Demo {
    pub fn new(client: NftClient, slots: NftSlots) -> Self {
        Self { client, slots }
    }

    pub fn slots(&self) -> &NftSlots {
        &self.slots
    }

    /// Fetch one record into its slot. Returns whether the record was found.
    pub async fn get_single(&mut self, id: i32) -> Result<bool, ClientError> {
        match self.client.get(id).await? {
            Some(nft) => {
                let saved = self.slots.save(nft);
                tracing::info!(id, saved, "NFT data fetched successfully");
                Ok(true)
            }
            None => {
                tracing::info!(id, "NFT could not be retrieved from the database");
                Ok(false)
            }
        }
    }

    /// Fetch several records in one request. Returns how many were saved.
    pub async fn get_multiple(&mut self, ids: &[i32]) -> Result<usize, ClientError> {
        let nfts = self.client.get_many(Some(ids)).await.inspect_err(|e| {
            tracing::warn!(error = %e, "NFTs could not be retrieved from the database");
        })?;
        let saved = self.slots.save_all(nfts);
        tracing::info!(requested = ids.len(), saved, "NFT data fetched successfully");
        Ok(saved)
    }

    /// Fetch every record. Returns how many were saved.
    pub async fn get_all(&mut self) -> Result<usize, ClientError> {
        let nfts = self.client.get_many(None).await?;
        let fetched = nfts.len();
        let saved = self.slots.save_all(nfts);
        tracing::info!(fetched, saved, "NFT data fetched successfully");
        Ok(saved)
    }

    pub async fn create(&self, count: usize) -> Result<(), ClientError> {
        let nfts = generate_dummy_nfts(count, &mut rand::thread_rng());
        let message = self.client.create(&nfts).await.inspect_err(|e| {
            tracing::warn!(error = %e, "NFTs could not be created");
        })?;
        tracing::info!(count, response = %message, "NFTs created successfully");
        Ok(())
    }

    pub async fn update(&self) -> Result<(), ClientError> {
        let mut nfts = generate_dummy_nfts(UPDATE_IDS.len(), &mut rand::thread_rng());
        for (nft, id) in nfts.iter_mut().zip(UPDATE_IDS) {
            nft.id = id;
            nft.sprite_sheet_link = sprite_sheet_placeholder(DUMMY_SPRITE_BASE_URL, NftId::new(id));
        }

        let message = self.client.update(&nfts).await.inspect_err(|e| {
            tracing::warn!(error = %e, "NFTs could not be updated");
        })?;
        tracing::info!(response = %message, "NFTs updated successfully");
        Ok(())
    }

    pub async fn reset(&self, ids: &[i32]) -> Result<(), ClientError> {
        let message = self.client.reset(ids).await.inspect_err(|e| {
            tracing::warn!(error = %e, "NFTs could not be reset");
        })?;
        tracing::info!(response = %message, "NFTs reset successfully");
        Ok(())
    }
}

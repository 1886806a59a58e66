//! NFTDB Domain - core types shared by the engine and the player.
//!
//! The domain owns the single `Nft` record, its identifier, and the two
//! field policies every write path relies on: field-by-field copy and reset
//! to defaults.

pub mod entities;
pub mod error;
pub mod ids;

pub use entities::{sprite_sheet_placeholder, Nft, NFT_TYPE_LABELS, SKILL_CODE_COUNT, STAT_RANGE_MAX};
pub use error::DomainError;
pub use ids::NftId;

//! Domain entities - Core business objects with identity

mod nft;

pub use nft::{sprite_sheet_placeholder, Nft, NFT_TYPE_LABELS, SKILL_CODE_COUNT, STAT_RANGE_MAX};

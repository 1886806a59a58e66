//! Data Transfer Objects (DTOs)
//!
//! Wire-format record exchanged between engine and player. The JSON keys are
//! the same names the engine uses for its storage columns.

use serde::{Deserialize, Serialize};

use nftdb_domain::{Nft, NftId};

/// Wire-format NFT record.
///
/// Only `Id` is required when deserializing; every other field falls back to
/// its zero/empty default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftData {
    #[serde(rename = "Id")]
    pub id: i32,
    #[serde(default, rename = "CHP")]
    pub chp: i32,
    #[serde(default, rename = "ATK")]
    pub atk: i32,
    #[serde(default, rename = "ATK_XP")]
    pub atk_xp: f32,
    #[serde(default, rename = "DEF")]
    pub def: i32,
    #[serde(default, rename = "DEF_XP")]
    pub def_xp: f32,
    #[serde(default, rename = "SPD")]
    pub spd: i32,
    #[serde(default, rename = "SPD_XP")]
    pub spd_xp: f32,
    #[serde(default, rename = "ATK_SPD")]
    pub atk_spd: i32,
    #[serde(default, rename = "ATK_SPD_XP")]
    pub atk_spd_xp: f32,
    #[serde(default, rename = "ATK_SPD_C")]
    pub atk_spd_c: i32,
    #[serde(default, rename = "ATK_SPD_C_XP")]
    pub atk_spd_c_xp: f32,
    #[serde(default, rename = "DEF_SPD_D")]
    pub def_spd_d: i32,
    #[serde(default, rename = "DEF_SPD_D_XP")]
    pub def_spd_d_xp: f32,
    #[serde(default, rename = "ATK_SPD_S")]
    pub atk_spd_s: i32,
    #[serde(default, rename = "ATK_SPD_S_XP")]
    pub atk_spd_s_xp: f32,
    #[serde(default, rename = "Type")]
    pub nft_type: String,
    #[serde(default, rename = "Skill")]
    pub skill: i32,
    #[serde(default, rename = "SpriteSheetLink")]
    pub sprite_sheet_link: String,
}

impl From<&Nft> for NftData {
    fn from(nft: &Nft) -> Self {
        Self {
            id: nft.id.get(),
            chp: nft.chp,
            atk: nft.atk,
            atk_xp: nft.atk_xp,
            def: nft.def,
            def_xp: nft.def_xp,
            spd: nft.spd,
            spd_xp: nft.spd_xp,
            atk_spd: nft.atk_spd,
            atk_spd_xp: nft.atk_spd_xp,
            atk_spd_c: nft.atk_spd_c,
            atk_spd_c_xp: nft.atk_spd_c_xp,
            def_spd_d: nft.def_spd_d,
            def_spd_d_xp: nft.def_spd_d_xp,
            atk_spd_s: nft.atk_spd_s,
            atk_spd_s_xp: nft.atk_spd_s_xp,
            nft_type: nft.nft_type.clone(),
            skill: nft.skill,
            sprite_sheet_link: nft.sprite_sheet_link.clone(),
        }
    }
}

impl From<Nft> for NftData {
    fn from(nft: Nft) -> Self {
        Self::from(&nft)
    }
}

impl NftData {
    /// Convert back to domain type
    pub fn to_domain(&self) -> Nft {
        Nft {
            id: NftId::new(self.id),
            chp: self.chp,
            atk: self.atk,
            atk_xp: self.atk_xp,
            def: self.def,
            def_xp: self.def_xp,
            spd: self.spd,
            spd_xp: self.spd_xp,
            atk_spd: self.atk_spd,
            atk_spd_xp: self.atk_spd_xp,
            atk_spd_c: self.atk_spd_c,
            atk_spd_c_xp: self.atk_spd_c_xp,
            def_spd_d: self.def_spd_d,
            def_spd_d_xp: self.def_spd_d_xp,
            atk_spd_s: self.atk_spd_s,
            atk_spd_s_xp: self.atk_spd_s_xp,
            nft_type: self.nft_type.clone(),
            skill: self.skill,
            sprite_sheet_link: self.sprite_sheet_link.clone(),
        }
    }
}

//! NFT entity - A flat record of game-character statistics
//!
//! Every stat comes in a pair: an integer level and a floating-point
//! "experience" progress value that conceptually lives in [0, 1). Nothing
//! validates that range; the store keeps whatever the caller sends.

use crate::NftId;

/// Labels used for the categorical `nft_type` field when records are generated.
pub const NFT_TYPE_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Exclusive upper bound for generated stat levels.
pub const STAT_RANGE_MAX: i32 = 100;

/// Number of distinct skill codes; generated skills fall in `0..SKILL_CODE_COUNT`.
pub const SKILL_CODE_COUNT: i32 = 10;

/// A single NFT record.
#[derive(Debug, Clone, PartialEq)]
pub struct Nft {
    /// Immutable once created.
    pub id: NftId,
    pub chp: i32,
    pub atk: i32,
    pub atk_xp: f32,
    pub def: i32,
    pub def_xp: f32,
    pub spd: i32,
    pub spd_xp: f32,
    pub atk_spd: i32,
    pub atk_spd_xp: f32,
    pub atk_spd_c: i32,
    pub atk_spd_c_xp: f32,
    pub def_spd_d: i32,
    pub def_spd_d_xp: f32,
    pub atk_spd_s: i32,
    pub atk_spd_s_xp: f32,
    pub nft_type: String,
    pub skill: i32,
    pub sprite_sheet_link: String,
}

impl Nft {
    /// A record with every non-identifier field at its default
    /// (zero for numbers, empty for text).
    pub fn new(id: NftId) -> Self {
        Self {
            id,
            chp: 0,
            atk: 0,
            atk_xp: 0.0,
            def: 0,
            def_xp: 0.0,
            spd: 0,
            spd_xp: 0.0,
            atk_spd: 0,
            atk_spd_xp: 0.0,
            atk_spd_c: 0,
            atk_spd_c_xp: 0.0,
            def_spd_d: 0,
            def_spd_d_xp: 0.0,
            atk_spd_s: 0,
            atk_spd_s_xp: 0.0,
            nft_type: String::new(),
            skill: 0,
            sprite_sheet_link: String::new(),
        }
    }

    /// Copies every field except the identifier from `source`.
    ///
    /// This is a field-by-field copy onto the stored record, not a
    /// replacement of the record itself.
    pub fn copy_stats_from(&mut self, source: &Nft) {
        self.chp = source.chp;
        self.atk = source.atk;
        self.atk_xp = source.atk_xp;
        self.def = source.def;
        self.def_xp = source.def_xp;
        self.spd = source.spd;
        self.spd_xp = source.spd_xp;
        self.atk_spd = source.atk_spd;
        self.atk_spd_xp = source.atk_spd_xp;
        self.atk_spd_c = source.atk_spd_c;
        self.atk_spd_c_xp = source.atk_spd_c_xp;
        self.def_spd_d = source.def_spd_d;
        self.def_spd_d_xp = source.def_spd_d_xp;
        self.atk_spd_s = source.atk_spd_s;
        self.atk_spd_s_xp = source.atk_spd_s_xp;
        self.nft_type.clone_from(&source.nft_type);
        self.skill = source.skill;
        self.sprite_sheet_link.clone_from(&source.sprite_sheet_link);
    }

    /// Resets every non-identifier field to its default, keeping the id.
    pub fn reset(&mut self) {
        let defaults = Self::new(self.id);
        self.copy_stats_from(&defaults);
    }

    /// Whether every non-identifier field holds its default value.
    pub fn is_reset(&self) -> bool {
        *self == Self::new(self.id)
    }
}

/// Deterministic placeholder sprite reference for a generated record.
pub fn sprite_sheet_placeholder(base_url: &str, id: NftId) -> String {
    format!("{}{}", base_url, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: i32) -> Nft {
        Nft {
            chp: 1000,
            atk: 12,
            atk_xp: 0.25,
            def: 34,
            def_xp: 0.5,
            spd: 56,
            spd_xp: 0.75,
            atk_spd: 7,
            atk_spd_xp: 0.1,
            atk_spd_c: 8,
            atk_spd_c_xp: 0.2,
            def_spd_d: 9,
            def_spd_d_xp: 0.3,
            atk_spd_s: 10,
            atk_spd_s_xp: 0.4,
            nft_type: "3".to_string(),
            skill: 4,
            sprite_sheet_link: "https://sprites.test/3".to_string(),
            ..Nft::new(NftId::new(id))
        }
    }

    #[test]
    fn new_record_is_reset() {
        let nft = Nft::new(NftId::new(5));
        assert!(nft.is_reset());
        assert_eq!(nft.id, NftId::new(5));
    }

    #[test]
    fn copy_stats_keeps_target_identifier() {
        let mut stored = Nft::new(NftId::new(3));
        let incoming = sample(99);

        stored.copy_stats_from(&incoming);

        assert_eq!(stored.id, NftId::new(3));
        assert_eq!(stored, Nft { id: NftId::new(3), ..incoming });
    }

    #[test]
    fn reset_zeroes_everything_but_identifier() {
        let mut nft = sample(7);
        assert!(!nft.is_reset());

        nft.reset();

        assert!(nft.is_reset());
        assert_eq!(nft.id, NftId::new(7));
        assert_eq!(nft.nft_type, "");
        assert_eq!(nft.sprite_sheet_link, "");
        assert_eq!(nft.atk_spd_s_xp, 0.0);
    }

    #[test]
    fn placeholder_appends_identifier() {
        assert_eq!(
            sprite_sheet_placeholder("https://www.google.com/", NftId::new(12)),
            "https://www.google.com/12"
        );
    }

    #[test]
    fn type_labels_cover_ten_categories() {
        assert_eq!(NFT_TYPE_LABELS.len(), 10);
        let mut labels = NFT_TYPE_LABELS.to_vec();
        labels.dedup();
        assert_eq!(labels.len(), 10);
    }
}

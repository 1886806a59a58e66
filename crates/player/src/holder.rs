//! Game-side registry of known record slots.

use nftdb_shared::NftData;

/// The records the game knows about, one slot per id.
///
/// Fetched records are saved into the slot with the matching id. Records
/// without a slot are ignored; the holder never grows.
#[derive(Debug, Clone, Default)]
pub struct NftSlots {
    slots: Vec<NftData>,
}

impl NftSlots {
    pub fn new(slots: Vec<NftData>) -> Self {
        Self { slots }
    }

    /// One empty slot per id.
    pub fn with_ids(ids: impl IntoIterator<Item = i32>) -> Self {
        Self::new(ids.into_iter().map(empty_record).collect())
    }

    /// Overwrite the slot whose id matches `record`. Returns whether a slot matched.
    pub fn save(&mut self, record: NftData) -> bool {
        match self.slots.iter_mut().find(|slot| slot.id == record.id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => {
                tracing::debug!(id = record.id, "No slot for NFT, ignoring");
                false
            }
        }
    }

    /// Save every record, returning how many landed in a slot.
    pub fn save_all(&mut self, records: impl IntoIterator<Item = NftData>) -> usize {
        records
            .into_iter()
            .map(|record| self.save(record))
            .filter(|saved| *saved)
            .count()
    }

    pub fn get(&self, id: i32) -> Option<&NftData> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NftData> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn empty_record(id: i32) -> NftData {
    NftData::from(nftdb_domain::Nft::new(nftdb_domain::NftId::new(id)))
}

//! NFTDB Player - game-side access to the record API.
//!
//! - `client` - reqwest client for the six record operations
//! - `holder` - local slots that fetched records are saved into
//! - `demo` - the demo driver behind the `nftdb-player` binary

pub mod client;
pub mod demo;
pub mod holder;

pub use client::{ClientError, NftClient, DEFAULT_BASE_URL};
pub use demo::Demo;
pub use holder::NftSlots;

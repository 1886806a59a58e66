//! NFTDB Shared - Types shared by the Engine (server) and Player (client)
//!
//! - Wire-format DTO for the NFT record
//! - Batch id-list query parsing and formatting
//! - Route paths and status messages of the record API
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and thiserror
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Stable field names** - Wire keys match the storage column names

pub mod dto;
pub mod requests;
pub mod responses;

pub use dto::NftData;
pub use requests::{format_id_list, parse_id_list, BatchQuery, IdListError};
pub use responses::{messages, routes};

//! Record store adapters
//!
//! Two implementations of the `NftRepo` port:
//! - `SqliteNftRepo`: durable storage in a single SQLite table
//! - `InMemoryNftRepo`: process-local map for tests and scratch runs

mod memory;
mod sqlite;

pub use memory::InMemoryNftRepo;
pub use sqlite::SqliteNftRepo;

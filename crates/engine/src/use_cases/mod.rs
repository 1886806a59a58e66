//! Use cases - User story orchestration.
//!
//! Use cases sit between the HTTP handlers and the record store port. They
//! own the batch contract: every mutating call builds one unit of work and
//! commits it once.

pub mod nfts;

pub use nfts::NftUseCases;

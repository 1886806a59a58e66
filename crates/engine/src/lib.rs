//! NFTDB Engine library.
//!
//! This crate contains all server-side code for the NFT record service.
//!
//! ## Structure
//!
//! - `use_cases/` - Queries, batch sync and bootstrap seeding
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;

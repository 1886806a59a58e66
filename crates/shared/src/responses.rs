//! Route paths and status messages of the record API.

/// Paths served by the engine and called by the player.
pub mod routes {
    /// Canonical mount point of the record routes.
    pub const RECORDS: &str = "/records";
    /// Mount point used by older game clients.
    pub const LEGACY_RECORDS: &str = "/api/nfts";
    pub const BATCH: &str = "/batch";
    pub const RESET: &str = "/reset";
    pub const HEALTH: &str = "/api/health";
}

/// Plain-text bodies returned by the mutating endpoints.
pub mod messages {
    pub const CREATED: &str = "Success: NFTs Created Successfully";
    pub const CREATE_FAILED: &str = "Error: NFTs Creation Failed: Invalid NFT data";
    pub const UPDATED: &str = "Success: NFTs Updated Successfully";
    pub const UPDATE_FAILED: &str = "Error: NFTs Update Failed: Invalid NFTs Data";
    pub const RESET: &str = "Success: NFTs Reset Successfully";
    pub const RESET_FAILED: &str = "Error: NFTs Reset Operation Failed";
    pub const BATCH_NOT_FOUND: &str = "Error: No NFT found in the database for one or more IDs";
}

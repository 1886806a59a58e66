//! Testability port for injecting randomness.

// =============================================================================
// Testability Ports
// =============================================================================

pub trait RandomPort: Send + Sync {
    /// Uniform integer in `min..max` (upper bound exclusive).
    fn gen_range(&self, min: i32, max: i32) -> i32;
    /// Uniform float in `[0, 1)`.
    fn gen_unit(&self) -> f32;
}

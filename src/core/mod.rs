//! In-memory contact store and the duplicate merge algorithm.

/// Reverse-scan duplicate merge and the resolver seam.
pub mod merge;
/// Ordered contact store with dirty tracking.
pub mod store;

//! Shared primitive positions and merge choices.

/// 1-based record position as shown to and selected by the user.
pub type Position = usize;

/// Outcome of resolving a duplicate pair during a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeChoice {
    /// Keep the earlier record, drop the later one.
    KeepFirst,
    /// Overwrite the earlier record with the later one, then drop the later one.
    KeepSecond,
}

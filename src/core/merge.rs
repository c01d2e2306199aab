//! Duplicate merging by reverse scan.

use crate::{contact::Contact, types::MergeChoice};

/// Decides which record of a duplicate pair survives a merge.
pub trait DuplicateResolver {
    /// `first` sits at the earlier position, `second` at the later one.
    ///
    /// `None` stops the merge, leaving this pair and every later one untouched.
    fn resolve(&mut self, first: &Contact, second: &Contact) -> Option<MergeChoice>;
}

impl<F> DuplicateResolver for F
where
    F: FnMut(&Contact, &Contact) -> MergeChoice,
{
    fn resolve(&mut self, first: &Contact, second: &Contact) -> Option<MergeChoice> {
        Some(self(first, second))
    }
}

/// Collapses duplicate pairs in place and returns how many were merged.
///
/// For each `i` ascending, `j` runs from the last index down to `i + 1`. A
/// [`MergeChoice::KeepSecond`] overwrites `contacts[i]` with `contacts[j]`, so
/// the remaining comparisons for that `i` see the replaced record. `contacts[j]`
/// is removed either way. Merges made before a resolver returns `None` stay
/// applied.
pub fn merge_duplicates<R>(contacts: &mut Vec<Contact>, resolver: &mut R) -> usize
where
    R: DuplicateResolver + ?Sized,
{
    let mut merged = 0;
    let mut i = 0;
    'scan: while i < contacts.len() {
        let mut j = contacts.len();
        while j > i + 1 {
            j -= 1;
            if !contacts[i].is_duplicate_of(&contacts[j]) {
                continue;
            }
            let Some(choice) = resolver.resolve(&contacts[i], &contacts[j]) else {
                tracing::debug!(first = i + 1, second = j + 1, "merge stopped by resolver");
                break 'scan;
            };
            tracing::debug!(first = i + 1, second = j + 1, ?choice, "merging duplicate pair");
            let second = contacts.remove(j);
            if choice == MergeChoice::KeepSecond {
                contacts[i] = second;
            }
            merged += 1;
        }
        i += 1;
    }
    merged
}

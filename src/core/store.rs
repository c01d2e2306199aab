//! Ordered contact store with dirty tracking.

use thiserror::Error;

use crate::{
    contact::{Contact, ContactPatch},
    core::merge::{self, DuplicateResolver},
    persist::{self, LineSink, LineSource, PersistError},
    types::Position,
};

/// Errors returned by [`ContactStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A 1-based position outside `1..=len`.
    #[error("position {position} is out of range 1..={len}")]
    OutOfRange {
        /// Requested position.
        position: Position,
        /// Store length at the time of the call.
        len: usize,
    },
    /// The source or sink failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Ordered contact list plus an unsaved-changes flag.
#[derive(Debug, Default)]
pub struct ContactStore {
    contacts: Vec<Contact>,
    dirty: bool,
}

impl ContactStore {
    /// Creates an empty, clean store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps existing contacts in a clean store.
    pub fn from_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            dirty: false,
        }
    }

    /// Replaces the contents with every well-formed line of `source`.
    ///
    /// Malformed lines are dropped without error. If reading fails, contents
    /// and the dirty flag are left as they were.
    pub fn load<S>(&mut self, source: &mut S) -> Result<usize, StoreError>
    where
        S: LineSource + ?Sized,
    {
        let lines = source.read_lines()?;
        let contacts: Vec<Contact> = lines
            .iter()
            .filter_map(|line| {
                let parsed = persist::parse_line(line);
                if parsed.is_none() {
                    tracing::trace!("Skipping malformed line {:?}", line);
                }
                parsed
            })
            .collect();

        tracing::debug!("Loaded {} contacts from {} lines", contacts.len(), lines.len());
        self.contacts = contacts;
        self.dirty = false;
        Ok(self.contacts.len())
    }

    /// Writes every contact to `sink` in store order.
    pub fn save<S>(&mut self, sink: &mut S) -> Result<usize, StoreError>
    where
        S: LineSink + ?Sized,
    {
        let lines: Vec<String> = self.contacts.iter().map(persist::format_line).collect();
        sink.write_lines(&lines)?;

        tracing::debug!("Saved {} contacts", lines.len());
        self.dirty = false;
        Ok(lines.len())
    }

    /// Iterates `(position, contact)` pairs in store order, positions from 1.
    pub fn list(&self) -> impl Iterator<Item = (Position, &Contact)> + '_ {
        self.contacts.iter().enumerate().map(|(idx, c)| (idx + 1, c))
    }

    /// Appends `contact` at the end.
    pub fn add(&mut self, contact: Contact) {
        self.contacts.push(contact);
        self.dirty = true;
    }

    /// Applies `patch` to the contact at `position`.
    pub fn update_at(&mut self, position: Position, patch: &ContactPatch) -> Result<(), StoreError> {
        let idx = self.index_of(position)?;
        patch.apply_to(&mut self.contacts[idx]);
        self.dirty = true;
        Ok(())
    }

    /// Removes and returns the contact at `position`; later contacts shift down.
    pub fn remove_at(&mut self, position: Position) -> Result<Contact, StoreError> {
        let idx = self.index_of(position)?;
        let removed = self.contacts.remove(idx);
        self.dirty = true;
        Ok(removed)
    }

    /// Merges duplicate pairs, asking `resolver` which record of each to keep.
    ///
    /// See [`merge::merge_duplicates`] for the scan order.
    pub fn merge_duplicates<R>(&mut self, resolver: &mut R) -> usize
    where
        R: DuplicateResolver + ?Sized,
    {
        let merged = merge::merge_duplicates(&mut self.contacts, resolver);
        if merged > 0 {
            self.dirty = true;
        }
        merged
    }

    /// True when contents differ from the last successful load or save.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Contact at a 1-based position.
    pub fn get(&self, position: Position) -> Option<&Contact> {
        position.checked_sub(1).and_then(|idx| self.contacts.get(idx))
    }

    /// All contacts in store order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Number of contacts.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// True when the store holds no contacts.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    fn index_of(&self, position: Position) -> Result<usize, StoreError> {
        if position == 0 || position > self.contacts.len() {
            return Err(StoreError::OutOfRange {
                position,
                len: self.contacts.len(),
            });
        }
        Ok(position - 1)
    }
}

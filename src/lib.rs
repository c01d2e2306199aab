//! Single-user address book: an ordered in-memory contact store with
//! comma-delimited file persistence and an interactive menu shell.
//!
//! # Examples
//!
//! In-memory usage with [`core::store::ContactStore`]:
//! ```
//! use contactbook::{
//!     contact::{Contact, ContactPatch},
//!     core::store::ContactStore,
//!     types::MergeChoice,
//! };
//!
//! let mut store = ContactStore::new();
//! store.add(Contact::new("Jo", "Doe", "1", "a@x"));
//! store.add(Contact::new("JO", "DOE", "2", "b@x"));
//! store
//!     .update_at(1, &ContactPatch { phone: Some("999".to_string()), ..ContactPatch::default() })
//!     .expect("update");
//!
//! let merged = store.merge_duplicates(&mut |_: &Contact, _: &Contact| MergeChoice::KeepSecond);
//! assert_eq!(merged, 1);
//! assert_eq!(store.contacts(), &[Contact::new("JO", "DOE", "2", "b@x")]);
//! assert!(store.has_unsaved_changes());
//! ```
//!
//! File round-trip with [`persist::file`]:
//! ```no_run
//! use contactbook::{
//!     core::store::ContactStore,
//!     persist::file::{FileSink, FileSource},
//! };
//!
//! let mut store = ContactStore::new();
//! store.load(&mut FileSource::open("contacts.txt")).expect("load");
//! store.save(&mut FileSink::create("contacts.txt")).expect("save");
//! assert!(!store.has_unsaved_changes());
//! ```
#![deny(missing_docs)]

/// Contact record and sparse patch.
pub mod contact;
/// Contact store and duplicate merging.
pub mod core;
/// Line codec, source/sink traits and file implementations.
pub mod persist;
/// Interactive menu shell.
pub mod shell;
/// Shared primitive types and enums.
pub mod types;

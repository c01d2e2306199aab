//! Interactive menu shell driving a [`crate::core::store::ContactStore`].

/// Menu options and menu text.
pub mod menu;
/// Shell loop, prompts and configuration.
pub mod session;

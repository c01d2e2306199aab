//! Contact record and sparse contact patch.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single address-book entry. No field is validated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contact {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Phone number, free text.
    pub phone: String,
    /// Email address, free text.
    pub email: String,
}

impl Contact {
    /// Builds a contact from its four fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// Returns true when first and last names match case-insensitively.
    ///
    /// Phone and email are ignored.
    pub fn is_duplicate_of(&self, other: &Contact) -> bool {
        self.first_name.to_lowercase() == other.first_name.to_lowercase()
            && self.last_name.to_lowercase() == other.last_name.to_lowercase()
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {} {}, Phone: {}, Email: {}",
            self.first_name, self.last_name, self.phone, self.email
        )
    }
}

/// Sparse patch where each non-blank `Some` field overwrites the record value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactPatch {
    /// Optional replacement for the first name.
    pub first_name: Option<String>,
    /// Optional replacement for the last name.
    pub last_name: Option<String>,
    /// Optional replacement for the phone.
    pub phone: Option<String>,
    /// Optional replacement for the email.
    pub email: Option<String>,
}

impl ContactPatch {
    /// Applies this patch in place to `contact`.
    pub fn apply_to(&self, contact: &mut Contact) {
        if let Some(v) = replacement(&self.first_name) {
            contact.first_name = v.to_string();
        }
        if let Some(v) = replacement(&self.last_name) {
            contact.last_name = v.to_string();
        }
        if let Some(v) = replacement(&self.phone) {
            contact.phone = v.to_string();
        }
        if let Some(v) = replacement(&self.email) {
            contact.email = v.to_string();
        }
    }
}

// Blank values mean "keep existing".
fn replacement(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

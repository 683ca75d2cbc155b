//! Completeness categories and the fixed filter policy.
//!
//! After the merge passes, every contact lands in exactly one category
//! based on which of {phone, email, name} it carries. A name only counts
//! when both `FN` and `N` are present.
//!
//! The `Empty` variant covers the record with none of the three fields;
//! its policy is to discard (and log), since such a record carries nothing
//! an operator could recognize it by.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::contact::Contact;

/// Completeness class of a merged contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Name fields only.
    OnlyName,
    /// Email values only.
    OnlyEmail,
    /// Telephone values only.
    OnlyTele,
    /// Telephone and name.
    TeleAndName,
    /// Telephone and email.
    TeleAndEmail,
    /// Email and name.
    EmailAndName,
    /// All three field groups.
    NameEmailAndTele,
    /// None of the three field groups.
    Empty,
}

/// What the filter does with a whole category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Drop every record, silently.
    Discard,
    /// Keep every record, no prompt.
    Keep,
    /// Ask the operator per record.
    Ask,
}

impl Category {
    /// Every category, in filter iteration order.
    pub const ALL: [Self; 8] = [
        Self::OnlyName,
        Self::OnlyEmail,
        Self::OnlyTele,
        Self::TeleAndName,
        Self::TeleAndEmail,
        Self::EmailAndName,
        Self::NameEmailAndTele,
        Self::Empty,
    ];

    /// Classifies a contact by its presence vector.
    #[must_use]
    pub fn of(contact: &Contact) -> Self {
        match (contact.has_phone(), contact.has_email(), contact.has_name()) {
            (false, false, true) => Self::OnlyName,
            (false, true, false) => Self::OnlyEmail,
            (true, false, false) => Self::OnlyTele,
            (true, false, true) => Self::TeleAndName,
            (true, true, false) => Self::TeleAndEmail,
            (false, true, true) => Self::EmailAndName,
            (true, true, true) => Self::NameEmailAndTele,
            (false, false, false) => Self::Empty,
        }
    }

    /// The fixed per-category filter policy.
    #[must_use]
    pub const fn policy(self) -> Policy {
        match self {
            Self::OnlyName | Self::OnlyEmail | Self::EmailAndName | Self::Empty => Policy::Discard,
            Self::OnlyTele | Self::TeleAndEmail => Policy::Ask,
            Self::TeleAndName | Self::NameEmailAndTele => Policy::Keep,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::OnlyName => "only_name",
            Self::OnlyEmail => "only_email",
            Self::OnlyTele => "only_tele",
            Self::TeleAndName => "tele_and_name",
            Self::TeleAndEmail => "tele_and_email",
            Self::EmailAndName => "email_and_name",
            Self::NameEmailAndTele => "name_email_and_tele",
            Self::Empty => "empty",
        };
        write!(f, "{label}")
    }
}

/// Buckets contacts by category.
///
/// Iterating the returned map visits categories in declaration order;
/// within a bucket, contacts keep their arrival order.
#[must_use]
pub fn bucket(contacts: Vec<Contact>) -> BTreeMap<Category, Vec<Contact>> {
    let mut buckets: BTreeMap<Category, Vec<Contact>> = BTreeMap::new();
    for contact in contacts {
        buckets.entry(Category::of(&contact)).or_default().push(contact);
    }
    buckets
}

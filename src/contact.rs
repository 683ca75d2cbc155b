//! Contact types—the record unit of a deduplication run.
//!
//! A Contact is one parsed vCard: the four fields the pipeline examines
//! (FN, N, TEL, EMAIL) plus every other property carried through
//! unexamined and unmodified.

use std::fmt;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// A vCard property the pipeline does not interpret.
///
/// Passthrough properties keep their parameter text verbatim so that
/// serialization reproduces the original line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property name, uppercased (vCard names are case-insensitive).
    pub name: String,

    /// Raw parameter text between the name and the value separator,
    /// without the leading semicolon. None when the line had no parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,

    /// Property value, verbatim.
    pub value: String,
}

impl Property {
    /// Creates a parameter-less property.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: None,
            value: value.into(),
        }
    }

    /// Creates a property with raw parameter text.
    pub fn with_params(
        name: impl Into<String>,
        params: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            params: Some(params.into()),
            value: value.into(),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.params {
            Some(params) => write!(f, "{};{}:{}", self.name, params, self.value),
            None => write!(f, "{}:{}", self.name, self.value),
        }
    }
}

/// One contact record.
///
/// Every field is optional; completeness is classified after merging, not
/// enforced at construction. Phone and email values keep their insertion
/// order, and duplicates within one record are tolerated (the merge engine
/// only deduplicates across records).
///
/// # Examples
///
/// ```
/// use vcard_cruncher::Contact;
///
/// let contact = Contact::builder()
///     .full_name("Alice Example")
///     .structured_name("Example;Alice;;;")
///     .phone("555-1111")
///     .email("alice@example.com")
///     .build();
///
/// assert_eq!(contact.phones, vec!["555-1111"]);
/// assert!(contact.has_name());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Formatted name (vCard `FN`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Structured name (vCard `N`). Required alongside `FN` for a contact
    /// to count as named.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_name: Option<String>,

    /// Telephone values (vCard `TEL`), in insertion order.
    #[serde(default)]
    pub phones: Vec<String>,

    /// Email values (vCard `EMAIL`), in insertion order.
    #[serde(default)]
    pub emails: Vec<String>,

    /// All other properties, carried through untouched.
    #[serde(default)]
    pub extras: Vec<Property>,
}

impl Contact {
    /// Starts building a contact.
    pub fn builder() -> ContactBuilder {
        ContactBuilder::default()
    }

    /// First telephone value, if any.
    #[must_use]
    pub fn first_phone(&self) -> Option<&str> {
        self.phones.first().map(String::as_str)
    }

    /// First email value, if any.
    #[must_use]
    pub fn first_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }

    /// Returns true if both name fields are present.
    #[must_use]
    pub fn has_name(&self) -> bool {
        self.full_name.is_some() && self.structured_name.is_some()
    }

    /// Returns true if at least one telephone value is present.
    #[must_use]
    pub fn has_phone(&self) -> bool {
        !self.phones.is_empty()
    }

    /// Returns true if at least one email value is present.
    #[must_use]
    pub fn has_email(&self) -> bool {
        !self.emails.is_empty()
    }

    /// Appends a phone value unless an equal value is already present.
    pub fn add_phone_unique(&mut self, value: &str) {
        if !self.phones.iter().any(|p| p == value) {
            self.phones.push(value.to_string());
        }
    }

    /// Appends an email value unless an equal value is already present.
    pub fn add_email_unique(&mut self, value: &str) {
        if !self.emails.iter().any(|e| e == value) {
            self.emails.push(value.to_string());
        }
    }

    /// Unions another contact's phone and email values into this one.
    ///
    /// Values already present (by exact string equality) are not
    /// duplicated; nothing is ever removed. Name fields and passthrough
    /// properties of `other` are dropped with it.
    pub fn absorb(&mut self, other: &Contact) {
        for phone in &other.phones {
            self.add_phone_unique(phone);
        }
        for email in &other.emails {
            self.add_email_unique(email);
        }
    }

    /// Full field dump shown to the operator before a keep/discard
    /// decision.
    #[must_use]
    pub fn field_dump(&self) -> String {
        let mut out = String::new();
        out.push_str("---------------------------\n");
        if let Some(name) = &self.full_name {
            let _ = writeln!(out, "FN\n\tValue - {name}");
        }
        if let Some(name) = &self.structured_name {
            let _ = writeln!(out, "N\n\tValue - {name}");
        }
        for phone in &self.phones {
            let _ = writeln!(out, "TEL\n\tValue - {phone}");
        }
        for email in &self.emails {
            let _ = writeln!(out, "EMAIL\n\tValue - {email}");
        }
        for extra in &self.extras {
            let _ = writeln!(out, "{}\n\tValue - {}", extra.name, extra.value);
        }
        out.push_str("---------------------------");
        out
    }
}

/// Builder for [`Contact`].
#[derive(Debug, Clone, Default)]
pub struct ContactBuilder {
    contact: Contact,
}

impl ContactBuilder {
    /// Sets the formatted name.
    #[must_use]
    pub fn full_name(mut self, name: impl Into<String>) -> Self {
        self.contact.full_name = Some(name.into());
        self
    }

    /// Sets the structured name.
    #[must_use]
    pub fn structured_name(mut self, name: impl Into<String>) -> Self {
        self.contact.structured_name = Some(name.into());
        self
    }

    /// Appends a telephone value.
    #[must_use]
    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.contact.phones.push(value.into());
        self
    }

    /// Appends an email value.
    #[must_use]
    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.contact.emails.push(value.into());
        self
    }

    /// Appends a passthrough property.
    #[must_use]
    pub fn extra(mut self, property: Property) -> Self {
        self.contact.extras.push(property);
        self
    }

    /// Finishes the contact.
    #[must_use]
    pub fn build(self) -> Contact {
        self.contact
    }
}

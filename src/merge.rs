//! Exact-key merge engine—the core of the deduplication pipeline.
//!
//! A merge pass collapses records sharing one key field, unioning their
//! phone and email values onto the first record seen with that key. Three
//! passes run in a fixed order (phone, full name, email), each consuming
//! the previous pass's output, so a later pass only ever sees records the
//! earlier passes already collapsed.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::contact::Contact;

/// The field a merge pass keys on.
///
/// A record's identity under a key is the *first* value of the keyed
/// field; further values on the same record never participate in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeKey {
    /// First `TEL` value.
    Phone,
    /// The `FN` value.
    FullName,
    /// First `EMAIL` value.
    Email,
}

impl MergeKey {
    /// The fixed pass order of a full run.
    pub const PASS_ORDER: [Self; 3] = [Self::Phone, Self::FullName, Self::Email];

    /// The merge identity of `contact` under this key.
    ///
    /// Absent and empty-string values both disqualify the record from
    /// merging; such records pass through a merge pass untouched.
    #[must_use]
    pub fn of(self, contact: &Contact) -> Option<&str> {
        let value = match self {
            Self::Phone => contact.first_phone(),
            Self::FullName => contact.full_name.as_deref(),
            Self::Email => contact.first_email(),
        };
        value.filter(|v| !v.is_empty())
    }
}

impl fmt::Display for MergeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phone => write!(f, "telephone number"),
            Self::FullName => write!(f, "name"),
            Self::Email => write!(f, "email"),
        }
    }
}

/// Counters for one merge pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// The key the pass ran on.
    pub key: MergeKey,
    /// Records fed into the pass.
    pub input: usize,
    /// Records absorbed into a survivor (and dropped).
    pub absorbed: usize,
    /// Records in the pass output.
    pub output: usize,
}

/// Runs one merge pass over `contacts`.
///
/// Records whose key is absent pass through in position. The first record
/// seen with a key becomes the survivor for that key; every later record
/// with the same key is absorbed into it (phones and emails unioned by
/// exact string equality) and discarded. Survivors and pass-throughs keep
/// their first-seen order.
#[must_use]
pub fn merge_by(contacts: Vec<Contact>, key: MergeKey) -> (Vec<Contact>, MergeStats) {
    let input = contacts.len();
    // Key value -> survivor position in the output list.
    let mut survivors: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<Contact> = Vec::with_capacity(input);
    let mut absorbed = 0usize;

    for contact in contacts {
        match key.of(&contact).map(str::to_string) {
            None => merged.push(contact),
            Some(value) => {
                if let Some(&index) = survivors.get(&value) {
                    absorbed += 1;
                    merged[index].absorb(&contact);
                } else {
                    merged.push(contact);
                    survivors.insert(value, merged.len() - 1);
                }
            }
        }
    }

    let stats = MergeStats {
        key,
        input,
        absorbed,
        output: merged.len(),
    };
    (merged, stats)
}

/// Runs the three merge passes in their fixed order.
pub fn merge_all(contacts: Vec<Contact>) -> (Vec<Contact>, Vec<MergeStats>) {
    let mut current = contacts;
    let mut stats = Vec::with_capacity(MergeKey::PASS_ORDER.len());

    for key in MergeKey::PASS_ORDER {
        log::info!("merging contacts with same {key}");
        let (next, pass) = merge_by(current, key);
        log::info!(
            "{} contacts before, {} absorbed, {} after",
            pass.input,
            pass.absorbed,
            pass.output
        );
        current = next;
        stats.push(pass);
    }

    (current, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Contact {
        Contact::builder()
            .full_name(name)
            .structured_name(format!("{name};;;;"))
            .build()
    }

    #[test]
    fn test_merge_by_phone_unions_values() {
        let a = Contact::builder().full_name("Alice").phone("555-1111").build();
        let b = Contact::builder()
            .full_name("Alice B.")
            .phone("555-1111")
            .email("a@x.com")
            .build();

        let (merged, stats) = merge_by(vec![a, b], MergeKey::Phone);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].full_name.as_deref(), Some("Alice"));
        assert_eq!(merged[0].phones, vec!["555-1111"]);
        assert_eq!(merged[0].emails, vec!["a@x.com"]);
        assert_eq!(stats.input, 2);
        assert_eq!(stats.absorbed, 1);
        assert_eq!(stats.output, 1);
    }

    #[test]
    fn test_keyless_records_pass_through_in_position() {
        let keyless = named("No Phone");
        let keyed = Contact::builder().phone("555-1111").build();
        let dup = Contact::builder().phone("555-1111").phone("555-9999").build();

        let (merged, stats) = merge_by(
            vec![keyed.clone(), keyless.clone(), dup],
            MergeKey::Phone,
        );

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].phones, vec!["555-1111", "555-9999"]);
        assert_eq!(merged[1], keyless);
        assert_eq!(stats.absorbed, 1);
    }

    #[test]
    fn test_empty_string_key_is_a_pass_through() {
        let a = Contact::builder().full_name("").phone("1").build();
        let b = Contact::builder().full_name("").phone("2").build();

        let (merged, stats) = merge_by(vec![a, b], MergeKey::FullName);

        assert_eq!(merged.len(), 2);
        assert_eq!(stats.absorbed, 0);
    }

    #[test]
    fn test_only_first_value_identifies_a_record() {
        // The second record's first phone is B; it must not be absorbed
        // into the first record just because B appears later in its list.
        let a = Contact::builder().phone("A").phone("B").build();
        let b = Contact::builder().phone("B").build();

        let (merged, _) = merge_by(vec![a, b], MergeKey::Phone);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].phones, vec!["A", "B"]);
        assert_eq!(merged[1].phones, vec!["B"]);
    }

    #[test]
    fn test_survivors_keep_first_seen_order() {
        let contacts = vec![
            Contact::builder().phone("3").build(),
            Contact::builder().phone("1").build(),
            Contact::builder().phone("2").build(),
            Contact::builder().phone("1").email("late@x.com").build(),
        ];

        let (merged, _) = merge_by(contacts, MergeKey::Phone);

        let order: Vec<&str> = merged.iter().map(|c| c.first_phone().unwrap()).collect();
        assert_eq!(order, vec!["3", "1", "2"]);
        assert_eq!(merged[1].emails, vec!["late@x.com"]);
    }

    #[test]
    fn test_merge_pass_is_idempotent() {
        let contacts = vec![
            Contact::builder().phone("1").email("a@x.com").build(),
            Contact::builder().phone("1").email("b@x.com").build(),
            named("No Phone"),
            Contact::builder().phone("2").build(),
        ];

        let (once, _) = merge_by(contacts, MergeKey::Phone);
        let (twice, stats) = merge_by(once.clone(), MergeKey::Phone);

        assert_eq!(once, twice);
        assert_eq!(stats.absorbed, 0);
    }

    #[test]
    fn test_value_conservation_across_absorption() {
        let contacts = vec![
            Contact::builder().phone("1").build(),
            Contact::builder().phone("1").phone("2").email("a@x.com").build(),
            Contact::builder().phone("1").phone("3").email("b@x.com").build(),
        ];

        let (merged, _) = merge_by(contacts, MergeKey::Phone);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].phones, vec!["1", "2", "3"]);
        assert_eq!(merged[0].emails, vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_pass_order_affects_grouping() {
        // Two records share a phone but not a name; a third shares a name
        // with the second. The phone pass collapses the first two, so the
        // name pass sees only the survivor and collapses it with the third.
        let a = Contact::builder()
            .full_name("Alice")
            .structured_name("Alice;;;;")
            .phone("555-1111")
            .build();
        let b = Contact::builder()
            .full_name("Bob")
            .structured_name("Bob;;;;")
            .phone("555-1111")
            .email("bob@x.com")
            .build();
        let c = Contact::builder()
            .full_name("Alice")
            .structured_name("Alice;;;;")
            .email("alice@x.com")
            .build();

        let (merged, stats) = merge_all(vec![a, b, c]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].full_name.as_deref(), Some("Alice"));
        assert_eq!(merged[0].phones, vec!["555-1111"]);
        assert_eq!(merged[0].emails, vec!["bob@x.com", "alice@x.com"]);
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].key, MergeKey::Phone);
        assert_eq!(stats[0].absorbed, 1);
        assert_eq!(stats[1].key, MergeKey::FullName);
        assert_eq!(stats[1].absorbed, 1);
        assert_eq!(stats[2].key, MergeKey::Email);
        assert_eq!(stats[2].absorbed, 0);
    }

    #[test]
    fn test_merge_all_on_empty_input() {
        let (merged, stats) = merge_all(Vec::new());
        assert!(merged.is_empty());
        assert_eq!(stats.len(), 3);
        assert!(stats.iter().all(|s| s.input == 0 && s.output == 0));
    }
}

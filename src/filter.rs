//! Final record selection.
//!
//! Applies the per-category policy: discard-all categories vanish
//! silently, keep-all categories flow straight to the output, and the ask
//! categories go through an injected operator port one record at a time.
//! Production wires the port to the terminal; tests inject a scripted
//! responder.

use std::collections::{BTreeMap, VecDeque};
use std::io::{self, BufRead, Write};

use crate::category::{Category, Policy};
use crate::contact::Contact;
use crate::error::{CruncherError, CruncherResult};

/// Operator decision port for the ask categories.
pub trait DiscardPrompt {
    /// Presents `contact` and decides whether to discard it.
    ///
    /// # Errors
    ///
    /// Fails if the decision cannot be obtained (e.g. the terminal went
    /// away); the run aborts.
    fn should_discard(&mut self, contact: &Contact) -> CruncherResult<bool>;
}

/// Interactive prompt on stdin/stdout.
///
/// Prints the contact's full field dump and reads one line. Only an exact
/// case-insensitive `n` keeps the record; every other answer discards it,
/// silently. There is no timeout; the process waits for the operator.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl DiscardPrompt for TerminalPrompt {
    fn should_discard(&mut self, contact: &Contact) -> CruncherResult<bool> {
        println!("\n{}", contact.field_dump());
        print!("\nDo you want to get rid of this contact ? (Y/N): ");
        io::stdout().flush().map_err(CruncherError::Prompt)?;

        let mut answer = String::new();
        let bytes = io::stdin()
            .lock()
            .read_line(&mut answer)
            .map_err(CruncherError::Prompt)?;
        if bytes == 0 {
            return Err(CruncherError::Prompt(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed while a decision was pending",
            )));
        }

        Ok(!answer.trim().eq_ignore_ascii_case("n"))
    }
}

/// Deterministic prompt that answers from a fixed script, in order.
///
/// Intended for tests and non-interactive runs. Consulting it past the
/// end of its script is an internal error, so a test scripted with no
/// answers doubles as an assertion that no prompt was shown.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
}

impl ScriptedPrompt {
    /// A prompt answering `true` (discard) or `false` (keep) per entry.
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
        }
    }

    /// A prompt that must never be consulted.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Count of unconsumed answers.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl DiscardPrompt for ScriptedPrompt {
    fn should_discard(&mut self, _contact: &Contact) -> CruncherResult<bool> {
        self.answers
            .pop_front()
            .ok_or_else(|| CruncherError::internal("scripted prompt exhausted"))
    }
}

/// Applies the fixed policy table to the categorized contacts.
///
/// Kept records come back in category-then-original order (categories in
/// declaration order, arrival order within each).
pub fn filter(
    buckets: BTreeMap<Category, Vec<Contact>>,
    prompt: &mut dyn DiscardPrompt,
) -> CruncherResult<Vec<Contact>> {
    let mut kept = Vec::new();

    for (category, contacts) in buckets {
        match category.policy() {
            Policy::Discard => {
                if category == Category::Empty {
                    log::warn!(
                        "discarding {} contacts with no name, phone, or email",
                        contacts.len()
                    );
                } else {
                    log::info!("discarding all {} {category} contacts", contacts.len());
                }
            }
            Policy::Keep => kept.extend(contacts),
            Policy::Ask => {
                for contact in contacts {
                    if prompt.should_discard(&contact)? {
                        log::info!("operator discarded a {category} contact");
                    } else {
                        kept.push(contact);
                    }
                }
            }
        }
    }

    Ok(kept)
}

//! # vcard-cruncher - Contact deduplication for vCard files
//!
//! vcard-cruncher collapses duplicate contacts in a vCard 3.0 file by
//! exact phone, name, and email keys, then lets an operator decide which
//! ambiguous records survive before the cleaned file is written.
//!
//! ## Core Concepts
//!
//! - **Contact**: one parsed record—names, phones, emails, and every other
//!   property carried through untouched
//! - **Merge pass**: collapses records sharing one key field, unioning
//!   their phone/email values onto the first record seen
//! - **Category**: completeness class from the presence of {phone, email,
//!   name}, driving a fixed discard/keep/ask policy
//! - **DiscardPrompt**: the injected operator port the ask categories go
//!   through
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! use vcard_cruncher::{pipeline, TerminalPrompt};
//!
//! let summary = pipeline::run(Path::new("contacts.vcf"), &mut TerminalPrompt)?;
//! println!("{} contacts written to {}", summary.kept, summary.output_path.display());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod category;
pub mod codec;
pub mod contact;
pub mod error;
pub mod filter;
pub mod merge;
pub mod pipeline;
pub mod vcf;

// Re-export primary types at crate root for convenience
pub use category::{bucket, Category, Policy};
pub use contact::{Contact, ContactBuilder, Property};
pub use error::{CodecError, CruncherError, CruncherResult};
pub use filter::{filter, DiscardPrompt, ScriptedPrompt, TerminalPrompt};
pub use merge::{merge_all, merge_by, MergeKey, MergeStats};
pub use pipeline::{run, RunSummary};

//! Whole-file load and save of vCard collections.
//!
//! The loader splits the source file into record blocks on the
//! case-sensitive `BEGIN:VCARD` / `END:VCARD` delimiter lines, discarding
//! anything outside a complete pair, and parses each block through the
//! codec. One bad block fails the whole load. The writer overwrites the
//! output file unconditionally, concatenating serialized records with no
//! extra separators.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::codec::{self, BEGIN_MARKER, END_MARKER};
use crate::contact::Contact;
use crate::error::{CruncherError, CruncherResult};

/// Prefix attached to the input file name to form the output file name.
pub const OUTPUT_PREFIX: &str = "processed_";

/// Reads every record block from `path` and parses each into a
/// [`Contact`], in file order.
///
/// # Errors
///
/// Fails on an unreadable file or on the first block the codec rejects
/// (no partial result).
pub fn load(path: &Path) -> CruncherResult<Vec<Contact>> {
    let read_err = |source| CruncherError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    let reader = BufReader::new(file);

    let mut blocks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_block = false;

    for line in reader.lines() {
        let line = line.map_err(read_err)?;
        if line.starts_with(BEGIN_MARKER) {
            in_block = true;
            current.clear();
        }
        if in_block {
            current.push_str(&line);
            current.push_str("\r\n");
        }
        if in_block && line.starts_with(END_MARKER) {
            in_block = false;
            blocks.push(std::mem::take(&mut current));
        }
    }

    let mut contacts = Vec::with_capacity(blocks.len());
    for (index, block) in blocks.iter().enumerate() {
        let contact =
            codec::parse(block).map_err(|source| CruncherError::InvalidBlock { index, source })?;
        contacts.push(contact);
    }

    log::info!("loaded {} contacts from {}", contacts.len(), path.display());
    Ok(contacts)
}

/// Derives the output path: same directory as `input`, file name prefixed
/// with [`OUTPUT_PREFIX`].
#[must_use]
pub fn output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{OUTPUT_PREFIX}{name}"))
}

/// Serializes `contacts` into `path`, overwriting any existing file.
///
/// # Errors
///
/// Fails if the file cannot be created or written; a partially written
/// file may be left behind (no temp-file-then-rename safety).
pub fn write(path: &Path, contacts: &[Contact]) -> CruncherResult<()> {
    let write_err = |source| CruncherError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(write_err)?;
    for contact in contacts {
        file.write_all(codec::serialize(contact).as_bytes())
            .map_err(write_err)?;
    }
    file.flush().map_err(write_err)?;

    log::info!("wrote {} contacts to {}", contacts.len(), path.display());
    Ok(())
}

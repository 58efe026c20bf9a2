//! File operations for the note store
//!
//! Thin async wrappers over `tokio::fs` plus note-name validation.
//! Notes live as regular files directly inside the store directory,
//! so every helper here works on a single flat level.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Check that a note name maps to exactly one entry directly inside the
/// store directory. Rejects empty names, path separators, `.`/`..`, and
/// leading dots (dotfiles are skipped by `list_files`, so a dotted note
/// would be written but never listed).
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && name != "."
        && name != ".."
        && !name.starts_with('.')
}

/// Resolve a note name to its file path inside the store.
pub fn note_path(store_root: &Path, name: &str) -> PathBuf {
    store_root.join(name)
}

/// Write a brand-new note file. Fails with `ErrorKind::AlreadyExists`
/// if the file is already there — the open itself is the existence
/// check, so no other writer can slip in between.
pub async fn write_new(path: &Path, text: &str) -> io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(text.as_bytes()).await?;
    Ok(())
}

/// Overwrite a note file with the given text, creating it if absent.
pub async fn write_full(path: &Path, text: &str) -> io::Result<()> {
    fs::write(path, text).await
}

/// Read a whole note file as UTF-8.
pub async fn read_full(path: &Path) -> io::Result<String> {
    fs::read_to_string(path).await
}

/// List the names of all regular files directly inside the store.
/// Dotfiles and directories are skipped. Order is whatever the
/// directory enumeration yields — callers must not rely on it.
pub async fn list_files(store_root: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();

    let mut read_dir = fs::read_dir(store_root).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let name = match entry.file_name().to_str() {
            Some(n) => n.to_string(),
            None => continue,
        };
        if name.starts_with('.') {
            continue;
        }
        if !entry.file_type().await?.is_file() {
            continue;
        }
        names.push(name);
    }

    Ok(names)
}

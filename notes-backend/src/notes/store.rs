//! NoteStore — flat-directory note persistence
//!
//! One regular file per note: filename is the note name, file content
//! is the note text, nothing else. No metadata, no index, no locking.
//! Each operation is a single filesystem call attempted once; callers
//! translate the error taxonomy into HTTP responses.

use super::file_ops;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A stored note, as returned by [`NoteStore::list`].
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// Read or delete target is absent or unreadable. The cause is
    /// deliberately not distinguished.
    #[error("note not found")]
    NotFound,
    /// Create target already holds a note.
    #[error("note already exists")]
    AlreadyExists,
    /// Name is empty, contains path separators, or is a dotted name.
    #[error("invalid note name")]
    InvalidName,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// File-backed note store rooted at a single flat directory.
#[derive(Clone, Debug)]
pub struct NoteStore {
    store_root: PathBuf,
}

impl NoteStore {
    /// Open a store rooted at `store_root`, creating the directory
    /// (recursively) if it does not exist yet.
    pub fn open(store_root: PathBuf) -> io::Result<Self> {
        std::fs::create_dir_all(&store_root)?;
        Ok(Self { store_root })
    }

    pub fn store_root(&self) -> &Path {
        &self.store_root
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        if !file_ops::is_valid_name(name) {
            return Err(StoreError::InvalidName);
        }
        Ok(file_ops::note_path(&self.store_root, name))
    }

    /// Read a note's full text. Every failure collapses to `NotFound`.
    pub async fn get(&self, name: &str) -> Result<String, StoreError> {
        let path = self.path_for(name).map_err(|_| StoreError::NotFound)?;
        file_ops::read_full(&path)
            .await
            .map_err(|_| StoreError::NotFound)
    }

    /// Create a note, failing if one with the same name already exists.
    /// The create-exclusive open is atomic: two concurrent creates for
    /// the same name can never both succeed, and an existing note is
    /// never overwritten.
    pub async fn create(&self, name: &str, text: &str) -> Result<(), StoreError> {
        let path = self.path_for(name)?;
        file_ops::write_new(&path, text).await.map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                StoreError::AlreadyExists
            } else {
                StoreError::Io(e)
            }
        })
    }

    /// Overwrite a note's text unconditionally, creating the file if it
    /// does not exist yet.
    pub async fn replace(&self, name: &str, text: &str) -> Result<(), StoreError> {
        let path = self.path_for(name)?;
        file_ops::write_full(&path, text).await?;
        Ok(())
    }

    /// Delete a note. Every failure collapses to `NotFound`.
    pub async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.path_for(name).map_err(|_| StoreError::NotFound)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|_| StoreError::NotFound)
    }

    /// List every note in the store, in directory enumeration order.
    /// If any single file cannot be read the whole listing fails — no
    /// partial results.
    pub async fn list(&self) -> Result<Vec<Note>, StoreError> {
        let names = file_ops::list_files(&self.store_root).await?;

        let mut notes = Vec::with_capacity(names.len());
        for name in names {
            let path = file_ops::note_path(&self.store_root, &name);
            let text = file_ops::read_full(&path).await?;
            notes.push(Note { name, text });
        }

        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_store(dir: &tempfile::TempDir) -> NoteStore {
        NoteStore::open(dir.path().join("store")).expect("Failed to open store")
    }

    #[tokio::test]
    async fn test_open_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("a").join("b");

        let store = NoteStore::open(root.clone()).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.store_root(), root);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store.create("a.txt", "hello").await.unwrap();
        assert_eq!(store.get("a.txt").await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_create_existing_leaves_content_unchanged() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store.create("a.txt", "original").await.unwrap();
        let err = store.create("a.txt", "intruder").await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists));
        assert_eq!(store.get("a.txt").await.unwrap(), "original");
    }

    #[tokio::test]
    async fn test_replace_creates_missing_note() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store.replace("fresh.txt", "world").await.unwrap();
        assert_eq!(store.get("fresh.txt").await.unwrap(), "world");

        store.replace("fresh.txt", "again").await.unwrap();
        assert_eq!(store.get("fresh.txt").await.unwrap(), "again");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        let err = store.delete("ghost.txt").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_removes_note() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store.create("a.txt", "hello").await.unwrap();
        store.delete("a.txt").await.unwrap();
        assert!(matches!(
            store.get("a.txt").await.unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_returns_every_note() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store.create("one.txt", "1").await.unwrap();
        store.create("two.txt", "2").await.unwrap();

        let mut notes = store.list().await.unwrap();
        notes.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].name, "one.txt");
        assert_eq!(notes[0].text, "1");
        assert_eq!(notes[1].name, "two.txt");
        assert_eq!(notes[1].text, "2");
    }

    #[tokio::test]
    async fn test_list_fails_wholesale_on_unreadable_file() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store.create("good.txt", "fine").await.unwrap();
        // Not valid UTF-8, so the read of this entry fails
        std::fs::write(store.store_root().join("bad.txt"), [0xff, 0xfe, 0x80]).unwrap();

        assert!(store.list().await.is_err());
    }

    #[tokio::test]
    async fn test_get_non_utf8_is_not_found() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        std::fs::write(store.store_root().join("bad.txt"), [0xff, 0xfe, 0x80]).unwrap();
        assert!(matches!(
            store.get("bad.txt").await.unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_traversal_names_rejected() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        let err = store.create("../escape", "gotcha").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidName));
        assert!(!dir.path().join("escape").exists());

        assert!(matches!(
            store.replace("sub/note", "x").await.unwrap_err(),
            StoreError::InvalidName
        ));
        // Reads and deletes of impossible names just report NotFound
        assert!(matches!(
            store.get("../escape").await.unwrap_err(),
            StoreError::NotFound
        ));
        assert!(matches!(
            store.delete("../escape").await.unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_concurrent_creates_have_one_winner() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        let (a, b) = tokio::join!(
            store.create("race.txt", "first"),
            store.create("race.txt", "second"),
        );

        // Exactly one create wins; the loser sees AlreadyExists and the
        // file holds the winner's text untouched.
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let text = store.get("race.txt").await.unwrap();
        if a.is_ok() {
            assert_eq!(text, "first");
            assert!(matches!(b.unwrap_err(), StoreError::AlreadyExists));
        } else {
            assert_eq!(text, "second");
            assert!(matches!(a.unwrap_err(), StoreError::AlreadyExists));
        }
    }
}

//! File system based deck repository
//!
//! All decks live in a single JSON array. A missing file is an empty store.
//! Queries also read an unreadable or malformed file as empty and log it;
//! mutations refuse to overwrite a file they could not read.

use async_trait::async_trait;
use flashgen_core::Deck;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::traits::{upsert, DeckRepository};
use crate::RepositoryResult;

/// Deck repository backed by one JSON file
pub struct FileSystemDeckRepository {
    /// Location of the JSON array
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileSystemDeckRepository {
    /// Create a repository stored at `path`.
    ///
    /// The file and its parent directories are created on first write.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lenient read for queries: any failure is an empty store
    async fn read_decks(&self) -> Vec<Deck> {
        match self.read_decks_for_update().await {
            Ok(decks) => decks,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read decks");
                Vec::new()
            }
        }
    }

    /// Read before a rewrite.
    ///
    /// I/O failures other than a missing file propagate so that a rewrite
    /// never replaces decks it could not read. Malformed JSON is still
    /// treated as empty and gets replaced.
    async fn read_decks_for_update(&self) -> RepositoryResult<Vec<Deck>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Vec<Deck>>(&content) {
            Ok(decks) => Ok(decks),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ignoring malformed deck store"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn write_decks(&self, decks: &[Deck]) -> RepositoryResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Write then rename so readers never observe a half-written file
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_vec(decks)?).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl DeckRepository for FileSystemDeckRepository {
    async fn load_all(&self) -> RepositoryResult<Vec<Deck>> {
        Ok(self.read_decks().await)
    }

    async fn save(&self, deck: Deck) -> RepositoryResult<Vec<Deck>> {
        let _guard = self.write_lock.lock().await;
        let mut decks = self.read_decks_for_update().await?;
        upsert(&mut decks, deck);
        self.write_decks(&decks).await?;
        Ok(decks)
    }

    async fn delete(&self, id: &str) -> RepositoryResult<Vec<Deck>> {
        let _guard = self.write_lock.lock().await;
        let mut decks = self.read_decks_for_update().await?;
        decks.retain(|deck| deck.id != id);
        self.write_decks(&decks).await?;
        Ok(decks)
    }

    async fn replace_all(&self, decks: Vec<Deck>) -> RepositoryResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write_decks(&decks).await
    }
}

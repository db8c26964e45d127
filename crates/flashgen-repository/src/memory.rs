//! In-memory deck repository

use async_trait::async_trait;
use flashgen_core::Deck;
use tokio::sync::RwLock;

use crate::traits::{upsert, DeckRepository};
use crate::RepositoryResult;

/// Deck store that lives for the lifetime of the process
#[derive(Default)]
pub struct InMemoryDeckRepository {
    decks: RwLock<Vec<Deck>>,
}

impl InMemoryDeckRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `decks`
    pub fn with_decks(decks: Vec<Deck>) -> Self {
        Self {
            decks: RwLock::new(decks),
        }
    }
}

#[async_trait]
impl DeckRepository for InMemoryDeckRepository {
    async fn load_all(&self) -> RepositoryResult<Vec<Deck>> {
        Ok(self.decks.read().await.clone())
    }

    async fn save(&self, deck: Deck) -> RepositoryResult<Vec<Deck>> {
        let mut decks = self.decks.write().await;
        upsert(&mut decks, deck);
        Ok(decks.clone())
    }

    async fn delete(&self, id: &str) -> RepositoryResult<Vec<Deck>> {
        let mut decks = self.decks.write().await;
        decks.retain(|deck| deck.id != id);
        Ok(decks.clone())
    }

    async fn replace_all(&self, decks: Vec<Deck>) -> RepositoryResult<()> {
        *self.decks.write().await = decks;
        Ok(())
    }
}

//! Core trait definition for deck storage

use async_trait::async_trait;
use flashgen_core::Deck;

use crate::RepositoryResult;

/// Ordered key-value store of decks keyed by deck id
#[async_trait]
pub trait DeckRepository: Send + Sync {
    /// Load every deck in stored order
    async fn load_all(&self) -> RepositoryResult<Vec<Deck>>;

    /// Insert or replace a deck by id and return the full list.
    ///
    /// A replaced deck keeps its position; a new deck is appended.
    async fn save(&self, deck: Deck) -> RepositoryResult<Vec<Deck>>;

    /// Remove a deck by id and return the remaining decks.
    ///
    /// Removing an unknown id is not an error.
    async fn delete(&self, id: &str) -> RepositoryResult<Vec<Deck>>;

    /// Replace the whole store
    async fn replace_all(&self, decks: Vec<Deck>) -> RepositoryResult<()>;

    /// Remove all decks
    async fn reset(&self) -> RepositoryResult<()> {
        self.replace_all(Vec::new()).await
    }
}

/// Upsert preserving position, shared by the backends
pub(crate) fn upsert(decks: &mut Vec<Deck>, deck: Deck) {
    match decks.iter().position(|existing| existing.id == deck.id) {
        Some(index) => decks[index] = deck,
        None => decks.push(deck),
    }
}

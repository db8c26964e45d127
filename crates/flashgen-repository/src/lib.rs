//! Deck persistence for Flashgen
//!
//! Decks are stored as one ordered list keyed by deck id. Two backends are
//! provided behind the [`DeckRepository`] trait:
//!
//! - **In-memory**: process lifetime only, used by default and in tests
//! - **File system**: a single JSON array on disk
//!
//! # Quick Start
//!
//! ```no_run
//! use flashgen_core::{Card, Deck};
//! use flashgen_repository::{DeckRepository, FileSystemDeckRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = FileSystemDeckRepository::new("data/decks.json");
//!
//!     let deck = Deck::new("Biology", vec![Card::new("What do chloroplasts do?", "Photosynthesis.")]);
//!     let decks = repo.save(deck).await?;
//!     println!("{} decks stored", decks.len());
//!
//!     Ok(())
//! }
//! ```

pub mod backup;
pub mod error;
pub mod file_system;
pub mod memory;
pub mod traits;

// Re-exports
pub use backup::{export_decks, import_decks};
pub use error::{RepositoryError, RepositoryResult};
pub use file_system::FileSystemDeckRepository;
pub use memory::InMemoryDeckRepository;
pub use traits::DeckRepository;

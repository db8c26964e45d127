//! Tests for FileSystemDeckRepository

use flashgen_core::{Card, Deck};
use flashgen_repository::{DeckRepository, FileSystemDeckRepository, RepositoryError};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

fn sample_deck(name: &str) -> Deck {
    Deck::new(
        name,
        vec![
            Card::new("What is the main purpose of photosynthesis?", "Making sugar from light."),
            Card::new("Which organelles carry it out?", "Chloroplasts."),
        ],
    )
}

#[tokio::test]
async fn test_missing_file_is_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let repo = FileSystemDeckRepository::new(temp_dir.path().join("decks.json"));

    assert!(repo.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_persists_across_instances() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested/dir/decks.json");

    let deck = sample_deck("Biology");
    {
        let repo = FileSystemDeckRepository::new(&path);
        let decks = repo.save(deck.clone()).await.unwrap();
        assert_eq!(decks.len(), 1);
    }

    let reopened = FileSystemDeckRepository::new(&path);
    let decks = reopened.load_all().await.unwrap();
    assert_eq!(decks, vec![deck]);
    assert!(!path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn test_upsert_keeps_order() {
    let temp_dir = TempDir::new().unwrap();
    let repo = FileSystemDeckRepository::new(temp_dir.path().join("decks.json"));

    let first = sample_deck("First");
    let second = sample_deck("Second");
    repo.save(first.clone()).await.unwrap();
    repo.save(second.clone()).await.unwrap();

    let mut renamed = first.clone();
    renamed.name = "First (edited)".to_string();
    let decks = repo.save(renamed).await.unwrap();

    assert_eq!(decks.len(), 2);
    assert_eq!(decks[0].name, "First (edited)");
    assert_eq!(decks[1].id, second.id);
}

#[tokio::test]
async fn test_delete_and_reset() {
    let temp_dir = TempDir::new().unwrap();
    let repo = FileSystemDeckRepository::new(temp_dir.path().join("decks.json"));

    let keep = sample_deck("Keep");
    let drop = sample_deck("Drop");
    repo.save(keep.clone()).await.unwrap();
    repo.save(drop.clone()).await.unwrap();

    let remaining = repo.delete(&drop.id).await.unwrap();
    assert_eq!(remaining, vec![keep]);

    repo.reset().await.unwrap();
    assert!(repo.load_all().await.unwrap().is_empty());
    let raw = fs::read_to_string(repo.path()).await.unwrap();
    assert_eq!(raw, "[]");
}

#[tokio::test]
async fn test_malformed_file_falls_back_to_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("decks.json");
    fs::write(&path, "{ definitely not decks").await.unwrap();

    let repo = FileSystemDeckRepository::new(&path);
    assert!(repo.load_all().await.unwrap().is_empty());

    // The next write replaces the damaged content
    repo.save(sample_deck("Fresh")).await.unwrap();
    assert_eq!(repo.load_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_non_array_file_falls_back_to_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("decks.json");
    fs::write(&path, r#"{"id": "x"}"#).await.unwrap();

    let repo = FileSystemDeckRepository::new(&path);
    assert!(repo.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_saves_are_not_lost() {
    let temp_dir = TempDir::new().unwrap();
    let repo = Arc::new(FileSystemDeckRepository::new(temp_dir.path().join("decks.json")));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.save(sample_deck(&format!("Deck {}", i))).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(repo.load_all().await.unwrap().len(), 8);
}

#[tokio::test]
async fn test_unreadable_file_is_not_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("decks.json");
    let original = vec![0xff, 0xfe, 0x00, 0x9f];
    fs::write(&path, &original).await.unwrap();

    let repo = FileSystemDeckRepository::new(&path);
    assert!(repo.load_all().await.unwrap().is_empty());

    let err = repo.save(sample_deck("Fresh")).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Io(_)));
    let err = repo.delete("anything").await.unwrap_err();
    assert!(matches!(err, RepositoryError::Io(_)));

    assert_eq!(fs::read(&path).await.unwrap(), original);
}

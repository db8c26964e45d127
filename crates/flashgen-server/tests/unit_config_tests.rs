//! Configuration loading tests

use flashgen_server::config::{DeckStoreType, ServerConfig};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_load_from_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("server.toml");
    std::fs::write(
        &path,
        r#"
host = "0.0.0.0"
port = 9090

[llm]
model = "gpt-4o"
timeout_secs = 15

[rate_limit]
daily_limit = 10

[deck_store]
type = "file"
path = "/var/lib/flashgen/decks.json"
"#,
    )
    .unwrap();

    let name = path.with_extension("");
    let config = ServerConfig::load_from(name.to_str().unwrap()).unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 9090);
    assert_eq!(config.llm.model, "gpt-4o");
    assert_eq!(config.llm.timeout_secs, 15);
    assert_eq!(config.rate_limit.daily_limit, 10);
    assert_eq!(config.rate_limit.window_secs, 86_400);
    assert_eq!(
        config.deck_store,
        DeckStoreType::File {
            path: PathBuf::from("/var/lib/flashgen/decks.json")
        }
    );
}

#[test]
fn test_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let name = temp_dir.path().join("does-not-exist");

    let config = ServerConfig::load_from(name.to_str().unwrap()).unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.rate_limit.daily_limit, 3);
    assert_eq!(config.deck_store, DeckStoreType::Memory);
}

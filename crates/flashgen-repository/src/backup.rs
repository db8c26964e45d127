//! JSON backup export and import

use flashgen_core::Deck;
use serde_json::Value;

use crate::{RepositoryError, RepositoryResult};

/// Serialize decks as a pretty-printed JSON array
pub fn export_decks(decks: &[Deck]) -> RepositoryResult<String> {
    Ok(serde_json::to_string_pretty(decks)?)
}

/// Parse a backup produced by [`export_decks`].
///
/// Anything other than a JSON array is rejected with
/// [`RepositoryError::NotADeckBackup`]; an array whose entries are not decks
/// fails with a serialization error.
pub fn import_decks(content: &str) -> RepositoryResult<Vec<Deck>> {
    let value: Value = serde_json::from_str(content)?;
    if !value.is_array() {
        return Err(RepositoryError::NotADeckBackup);
    }
    Ok(serde_json::from_value(value)?)
}

//! Seed importer: read the JLPT word lists, merge them, and replace the collection.
//!
//! The replacement is two separate store calls (delete all, then insert all). A
//! failure between them leaves the collection empty; rerun the importer to recover.

use std::collections::HashSet;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::domain::Word;
use crate::error::{SeedError, StoreError};
use crate::store::WordStore;

/// Read one word-list file: a flat JSON array of word records.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_word_list(path: &Path) -> Result<Vec<Word>, SeedError> {
  let path_str = path.display().to_string();
  let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Read { path: path_str.clone(), source })?;
  let words: Vec<Word> = serde_json::from_str(&raw).map_err(|source| SeedError::Parse { path: path_str.clone(), source })?;
  info!(target: "seed", path = %path_str, words = words.len(), "Word list loaded");
  Ok(words)
}

/// Concatenate lists in order and keep the first record seen for each `word`.
pub fn merge_unique(lists: impl IntoIterator<Item = Vec<Word>>) -> Vec<Word> {
  let mut seen = HashSet::new();
  let mut out = Vec::new();
  let mut dropped = 0usize;
  for w in lists.into_iter().flatten().map(Word::normalize) {
    if seen.insert(w.word.clone()) {
      out.push(w);
    } else {
      dropped += 1;
    }
  }
  if dropped > 0 {
    info!(target: "seed", dropped, kept = out.len(), "Duplicate words skipped");
  }
  out
}

/// Validate every record, wipe the store, and bulk-insert. Returns the inserted count.
#[instrument(level = "info", skip_all, fields(words = words.len()))]
pub async fn import_words(store: &dyn WordStore, words: Vec<Word>) -> Result<usize, SeedError> {
  for w in &words {
    w.validate().map_err(StoreError::InvalidRecord)?;
  }

  let deleted = store.delete_all().await?;
  info!(target: "seed", deleted, "Previous data destroyed");

  if words.is_empty() {
    warn!(target: "seed", "No words to insert; collection left empty");
    return Ok(0);
  }
  let inserted = store.insert_many(words).await?;
  Ok(inserted)
}

/// Full run: load every file in order, merge, import.
pub async fn run_seed<P: AsRef<Path>>(store: &dyn WordStore, files: &[P]) -> Result<usize, SeedError> {
  let lists = files
    .iter()
    .map(|p| load_word_list(p.as_ref()))
    .collect::<Result<Vec<_>, _>>()?;
  let unique = merge_unique(lists);
  let inserted = import_words(store, unique).await?;
  info!(target: "seed", files = files.len(), inserted, "Seed import complete");
  Ok(inserted)
}

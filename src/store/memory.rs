//! In-process word store with the same contract as the MongoDB adapter.
//! Sampling is uniform without replacement (`SliceRandom::choose_multiple`).

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};
use rand::seq::SliceRandom;
use tokio::sync::RwLock;

use crate::domain::{JlptLevel, Word};
use crate::error::StoreError;
use crate::store::WordStore;

#[derive(Default)]
pub struct MemoryWordStore {
  words: RwLock<Vec<Word>>,
}

impl MemoryWordStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl WordStore for MemoryWordStore {
  async fn sample_by_level(&self, level: JlptLevel, size: usize) -> Result<Vec<Word>, StoreError> {
    let words = self.words.read().await;
    let matching: Vec<&Word> = words.iter().filter(|w| w.level == level).collect();
    let mut rng = rand::thread_rng();
    Ok(matching.choose_multiple(&mut rng, size).map(|w| (*w).clone()).collect())
  }

  async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Word>, StoreError> {
    let words = self.words.read().await;
    Ok(
      words
        .iter()
        .filter(|w| w.id.map_or(false, |id| ids.contains(&id)))
        .cloned()
        .collect(),
    )
  }

  async fn delete_all(&self) -> Result<u64, StoreError> {
    let mut words = self.words.write().await;
    let n = words.len() as u64;
    words.clear();
    Ok(n)
  }

  async fn insert_many(&self, new_words: Vec<Word>) -> Result<usize, StoreError> {
    let mut words = self.words.write().await;
    // All-or-nothing: check every word before touching the collection.
    for (i, w) in new_words.iter().enumerate() {
      let clash = words.iter().any(|e| e.word == w.word) || new_words[..i].iter().any(|p| p.word == w.word);
      if clash {
        return Err(StoreError::DuplicateWord(w.word.clone()));
      }
    }
    let now = DateTime::now();
    let n = new_words.len();
    words.extend(new_words.into_iter().map(|mut w| {
      w.id = Some(ObjectId::new());
      w.created_at = Some(now);
      w.updated_at = Some(now);
      w
    }));
    Ok(n)
  }

  async fn count(&self) -> Result<u64, StoreError> {
    Ok(self.words.read().await.len() as u64)
  }
}

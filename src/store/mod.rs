//! Word Store access.
//!
//! The quiz handlers and the seed importer only talk to `dyn WordStore`; the
//! concrete store is opened once at startup and injected through `AppState`.
//!   - `MongoWordStore` : the production adapter (MongoDB)
//!   - `MemoryWordStore`: in-process store with the same semantics, used by tests

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::{JlptLevel, Word};
use crate::error::StoreError;

pub mod memory;
pub mod mongo;

pub use memory::MemoryWordStore;
pub use mongo::MongoWordStore;

#[async_trait]
pub trait WordStore: Send + Sync {
  /// Up to `size` distinct words at `level`, picked uniformly at random.
  async fn sample_by_level(&self, level: JlptLevel, size: usize) -> Result<Vec<Word>, StoreError>;

  /// All words whose id is in `ids`, in no particular order. One round trip.
  async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Word>, StoreError>;

  /// Remove every word. Returns the number removed.
  async fn delete_all(&self) -> Result<u64, StoreError>;

  /// Insert new words (ids are assigned by the store). Returns the number inserted.
  async fn insert_many(&self, words: Vec<Word>) -> Result<usize, StoreError>;

  async fn count(&self) -> Result<u64, StoreError>;
}

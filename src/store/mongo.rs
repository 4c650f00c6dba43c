//! MongoDB-backed word store.
//!
//! Random selection uses the server's `$sample` stage after a `$match` on level,
//! which is uniform and without replacement within a single call.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
  bson::{self, doc, oid::ObjectId, DateTime, Document},
  options::IndexOptions,
  Client, Collection, IndexModel,
};
use tracing::{debug, info, instrument};

use crate::config::Settings;
use crate::domain::{JlptLevel, Word};
use crate::error::StoreError;
use crate::store::WordStore;

#[derive(Clone)]
pub struct MongoWordStore {
  words: Collection<Word>,
}

impl MongoWordStore {
  /// Connect, ping, and make sure the unique index on `word` exists.
  #[instrument(level = "info", skip_all, fields(db = %settings.db_name, collection = %settings.collection))]
  pub async fn connect(settings: &Settings) -> Result<Self, StoreError> {
    let client = Client::with_uri_str(&settings.mongo_uri).await?;
    let db = client.database(&settings.db_name);
    db.run_command(doc! { "ping": 1 }, None).await?;
    info!(target: "yasui_practice", db = %settings.db_name, "MongoDB connected");

    let store = Self { words: db.collection::<Word>(&settings.collection) };
    store.ensure_indexes().await?;
    Ok(store)
  }

  async fn ensure_indexes(&self) -> Result<(), StoreError> {
    let index = IndexModel::builder()
      .keys(doc! { "word": 1 })
      .options(IndexOptions::builder().unique(true).build())
      .build();
    self.words.create_index(index, None).await?;
    debug!(target: "yasui_practice", "Unique index on `word` ensured");
    Ok(())
  }
}

#[async_trait]
impl WordStore for MongoWordStore {
  #[instrument(level = "debug", skip(self), fields(%level, size))]
  async fn sample_by_level(&self, level: JlptLevel, size: usize) -> Result<Vec<Word>, StoreError> {
    let pipeline = vec![
      doc! { "$match": { "level": level.as_str() } },
      doc! { "$sample": { "size": size as i64 } },
    ];
    let docs: Vec<Document> = self.words.aggregate(pipeline, None).await?.try_collect().await?;
    docs
      .into_iter()
      .map(|d| bson::from_document::<Word>(d).map_err(StoreError::from))
      .collect()
  }

  #[instrument(level = "debug", skip(self, ids), fields(ids = ids.len()))]
  async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Word>, StoreError> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let cursor = self.words.find(doc! { "_id": { "$in": ids.to_vec() } }, None).await?;
    Ok(cursor.try_collect().await?)
  }

  #[instrument(level = "info", skip(self))]
  async fn delete_all(&self) -> Result<u64, StoreError> {
    let res = self.words.delete_many(doc! {}, None).await?;
    Ok(res.deleted_count)
  }

  #[instrument(level = "info", skip(self, words), fields(words = words.len()))]
  async fn insert_many(&self, words: Vec<Word>) -> Result<usize, StoreError> {
    if words.is_empty() {
      return Ok(0);
    }
    let now = DateTime::now();
    let stamped: Vec<Word> = words
      .into_iter()
      .map(|mut w| {
        w.id = None;
        w.created_at = Some(now);
        w.updated_at = Some(now);
        w
      })
      .collect();
    let res = self.words.insert_many(stamped, None).await?;
    Ok(res.inserted_ids.len())
  }

  async fn count(&self) -> Result<u64, StoreError> {
    Ok(self.words.count_documents(None, None).await?)
  }
}

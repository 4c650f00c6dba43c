//! Seed importer: replaces the word collection with the merged JLPT word lists.
//!
//! Uses the same env/TOML settings as the server (MONGO_URI required). Any
//! read, parse, delete or insert failure aborts with a non-zero exit status.

use tracing::{error, info};

use yasui_practice::config::Settings;
use yasui_practice::seed::run_seed;
use yasui_practice::store::{MongoWordStore, WordStore};
use yasui_practice::telemetry;

#[tokio::main]
async fn main() {
  let _ = dotenvy::dotenv();
  telemetry::init_tracing();

  if let Err(e) = run().await {
    error!(target: "seed", error = %e, "Error during data import");
    std::process::exit(1);
  }
}

async fn run() -> anyhow::Result<()> {
  let settings = Settings::from_env()?;
  let store = MongoWordStore::connect(&settings).await?;
  info!(target: "seed", "MongoDB connected for seeding");

  let inserted = run_seed(&store, settings.seed_files.as_slice()).await?;
  info!(target: "seed", inserted, "Word lists merged; {} words saved to the database", inserted);

  let stored = store.count().await?;
  if stored != inserted as u64 {
    anyhow::bail!("collection holds {stored} words after inserting {inserted}");
  }
  Ok(())
}

//! Runtime settings: environment variables plus an optional TOML file.
//!
//! Env variables:
//!   MONGO_URI         : required connection string
//!   MONGO_DB          : database name (default "yasui_practice")
//!   PORT              : u16 listen port (default 5000)
//!   QUIZ_CONFIG_PATH  : optional TOML file, see `QuizConfig`
//!
//! Env values win over the TOML file. A `.env` file is honoured by the binaries via dotenvy.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DB_NAME: &str = "yasui_practice";
pub const DEFAULT_COLLECTION: &str = "words";

/// Optional TOML overrides.
///
/// ```toml
/// [database]
/// name = "yasui_practice"
/// collection = "words"
///
/// [seed]
/// files = ["data/words_n3.json", "data/words_n2.json", "data/words_n1.json"]
/// ```
#[derive(Clone, Debug, Deserialize, Default)]
pub struct QuizConfig {
  #[serde(default)]
  pub database: DatabaseCfg,
  #[serde(default)]
  pub seed: SeedCfg,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct DatabaseCfg {
  #[serde(default)] pub name: Option<String>,
  #[serde(default)] pub collection: Option<String>,
}

/// Word-list files, in merge order. Earlier files win on duplicate words.
#[derive(Clone, Debug, Deserialize)]
pub struct SeedCfg {
  #[serde(default = "default_seed_files")]
  pub files: Vec<PathBuf>,
}

impl Default for SeedCfg {
  fn default() -> Self {
    Self { files: default_seed_files() }
  }
}

fn default_seed_files() -> Vec<PathBuf> {
  ["data/words_n3.json", "data/words_n2.json", "data/words_n1.json"]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

#[derive(Clone, Debug)]
pub struct Settings {
  pub mongo_uri: String,
  pub db_name: String,
  pub collection: String,
  pub port: u16,
  pub seed_files: Vec<PathBuf>,
}

impl Settings {
  /// Build settings from the process environment. Missing MONGO_URI is fatal.
  pub fn from_env() -> Result<Self, ConfigError> {
    let cfg = load_quiz_config_from_env().unwrap_or_default();
    Self::resolve(|k| std::env::var(k).ok(), cfg)
  }

  fn resolve(env: impl Fn(&str) -> Option<String>, cfg: QuizConfig) -> Result<Self, ConfigError> {
    let mongo_uri = env("MONGO_URI")
      .filter(|s| !s.trim().is_empty())
      .ok_or(ConfigError::MissingMongoUri)?;

    let port = env("PORT")
      .and_then(|p| p.parse::<u16>().ok())
      .unwrap_or(DEFAULT_PORT);

    let db_name = env("MONGO_DB")
      .or(cfg.database.name)
      .unwrap_or_else(|| DEFAULT_DB_NAME.into());
    let collection = cfg.database.collection.unwrap_or_else(|| DEFAULT_COLLECTION.into());

    Ok(Self { mongo_uri, db_name, collection, port, seed_files: cfg.seed.files })
  }
}

/// Attempt to load `QuizConfig` from QUIZ_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_quiz_config_from_env() -> Option<QuizConfig> {
  let path = std::env::var("QUIZ_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<QuizConfig>(&s) {
      Ok(cfg) => {
        info!(target: "yasui_practice", %path, "Loaded quiz config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "yasui_practice", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "yasui_practice", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |k: &str| map.get(k).cloned()
  }

  #[test]
  fn missing_uri_is_an_error() {
    let err = Settings::resolve(env_of(&[("PORT", "8080")]), QuizConfig::default()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingMongoUri));
  }

  #[test]
  fn defaults_apply_when_optional_values_absent() {
    let s = Settings::resolve(env_of(&[("MONGO_URI", "mongodb://localhost")]), QuizConfig::default()).unwrap();
    assert_eq!(s.port, DEFAULT_PORT);
    assert_eq!(s.db_name, DEFAULT_DB_NAME);
    assert_eq!(s.collection, DEFAULT_COLLECTION);
    assert_eq!(s.seed_files.len(), 3);
    assert_eq!(s.seed_files[0], PathBuf::from("data/words_n3.json"));
  }

  #[test]
  fn bad_port_falls_back_and_env_beats_toml() {
    let cfg: QuizConfig = toml::from_str(
      "[database]\nname = \"from_toml\"\ncollection = \"vocab\"\n[seed]\nfiles = [\"a.json\"]\n",
    )
    .unwrap();
    let s = Settings::resolve(
      env_of(&[("MONGO_URI", "mongodb://db"), ("PORT", "not-a-port"), ("MONGO_DB", "from_env")]),
      cfg,
    )
    .unwrap();
    assert_eq!(s.port, DEFAULT_PORT);
    assert_eq!(s.db_name, "from_env");
    assert_eq!(s.collection, "vocab");
    assert_eq!(s.seed_files, vec![PathBuf::from("a.json")]);
  }
}

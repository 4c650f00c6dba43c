//! YasuiPractice · JLPT vocabulary quiz backend
//!
//! Library half shared by the HTTP server (`src/main.rs`) and the seed importer
//! (`src/bin/seed.rs`).

pub mod config;
pub mod domain;
pub mod error;
pub mod protocol;
pub mod quiz;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod util;

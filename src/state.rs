//! Application state shared by all handlers.
//!
//! Holds the word store behind `Arc<dyn WordStore>`: opened once at startup,
//! dropped when the server shuts down. Handlers never reach a global client.

use std::sync::Arc;

use crate::store::WordStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn WordStore>) -> Self {
        Self { store }
    }
}

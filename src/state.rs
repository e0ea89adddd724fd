// src/state.rs
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::error::Result;
use crate::form::FormStore;
use crate::poll::PollStore;
use crate::seed;

/// Shared server state. Each store has its own lock, so poll and form
/// traffic never wait on each other.
pub struct AppState {
    pub polls: Mutex<PollStore>,
    pub forms: Mutex<FormStore>,
}

impl AppState {
    pub fn new(polls: PollStore, forms: FormStore) -> Arc<Self> {
        Arc::new(Self {
            polls: Mutex::new(polls),
            forms: Mutex::new(forms),
        })
    }

    pub fn from_config(config: &Config) -> Result<Arc<Self>> {
        let mut polls = PollStore::new();
        let mut forms = FormStore::new();
        if config.seed_examples {
            seed::seed_polls(&mut polls)?;
            seed::seed_forms(&mut forms)?;
        }
        Ok(Self::new(polls, forms))
    }
}

// src/poll.rs
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::ids::{IdGenerator, UuidIds};
use crate::models::{Poll, PollOption, PollResults};

const MIN_OPTIONS: usize = 2;

/// In-memory collection of polls and their vote counters.
pub struct PollStore {
    polls: Vec<Poll>,
    ids: Arc<dyn IdGenerator>,
}

impl Default for PollStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PollStore {
    pub fn new() -> Self {
        Self::with_ids(Arc::new(UuidIds))
    }

    pub fn with_ids(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            polls: Vec::new(),
            ids,
        }
    }

    /// Creates a poll and returns its id.
    ///
    /// Options are trimmed and blank entries dropped before the two-option
    /// minimum is checked.
    pub fn create<I, S>(&mut self, question: &str, option_texts: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let question = question.trim();
        if question.is_empty() {
            return Err(StoreError::EmptyPollQuestion);
        }

        let texts: Vec<String> = option_texts
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if texts.len() < MIN_OPTIONS {
            return Err(StoreError::NotEnoughOptions { found: texts.len() });
        }

        let options: Vec<PollOption> = texts
            .into_iter()
            .map(|text| PollOption {
                id: self.ids.next_id("opt"),
                text,
            })
            .collect();
        let responses: HashMap<String, u64> =
            options.iter().map(|o| (o.id.clone(), 0)).collect();

        let poll = Poll {
            id: self.ids.next_id("poll"),
            question: question.to_string(),
            options,
            responses,
        };
        let id = poll.id.clone();

        info!(poll_id = %id, options = poll.options.len(), "Poll added");
        self.polls.push(poll);
        Ok(id)
    }

    /// Records one vote and returns the option's new count.
    pub fn record_response(&mut self, poll_id: &str, option_id: &str) -> Result<u64> {
        let poll = self
            .polls
            .iter_mut()
            .find(|p| p.id == poll_id)
            .ok_or_else(|| StoreError::PollNotFound(poll_id.to_string()))?;

        if !poll.has_option(option_id) {
            return Err(StoreError::InvalidOption {
                poll_id: poll_id.to_string(),
                option_id: option_id.to_string(),
            });
        }

        let counter = poll.responses.entry(option_id.to_string()).or_insert_with(|| {
            warn!(%poll_id, %option_id, "Counter was missing, starting from 0");
            0
        });
        *counter += 1;
        let votes = *counter;

        debug!(%poll_id, %option_id, votes, "Poll response added");
        Ok(votes)
    }

    pub fn get(&self, poll_id: &str) -> Option<&Poll> {
        self.polls.iter().find(|p| p.id == poll_id)
    }

    pub fn polls(&self) -> &[Poll] {
        &self.polls
    }

    pub fn results(&self, poll_id: &str) -> Option<PollResults> {
        self.get(poll_id).map(PollResults::from_poll)
    }

    pub fn is_empty(&self) -> bool {
        self.polls.is_empty()
    }

    #[cfg(test)]
    fn poll_mut(&mut self, poll_id: &str) -> Option<&mut Poll> {
        self.polls.iter_mut().find(|p| p.id == poll_id)
    }
}

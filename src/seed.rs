// src/seed.rs
//! Example polls and forms loaded at startup for demos.

use tracing::info;

use crate::error::Result;
use crate::form::FormStore;
use crate::models::{NewQuestion, QuestionType};
use crate::poll::PollStore;

/// Adds the example polls if the store is empty.
pub fn seed_polls(polls: &mut PollStore) -> Result<()> {
    if !polls.is_empty() {
        return Ok(());
    }

    info!("Initializing example polls...");
    polls.create(
        "What's your favorite Vue 3 feature?",
        ["Composition API", "Teleport", "<script setup>", "Suspense"],
    )?;
    polls.create(
        "Preferred state management for Vue?",
        ["Pinia", "Vuex 4", "Jotai/Zustand-like", "None"],
    )?;
    Ok(())
}

/// Adds the example feedback survey if the store is empty.
pub fn seed_forms(forms: &mut FormStore) -> Result<()> {
    if !forms.is_empty() {
        return Ok(());
    }

    info!("Initializing example forms...");
    forms.create(
        "User Feedback Survey",
        vec![
            NewQuestion::new(QuestionType::ShortAnswer, "What is your name?")
                .required()
                .with_placeholder("John Doe"),
            NewQuestion::new(
                QuestionType::LongAnswer,
                "Share your feedback about our service:",
            )
            .required(),
            NewQuestion::new(QuestionType::Number, "Rate our service (1-5)")
                .with_placeholder("3"),
            NewQuestion::new(QuestionType::SingleChoice, "Would you recommend us?")
                .with_options(["Yes", "No", "Maybe"])
                .required(),
        ],
    )?;
    Ok(())
}

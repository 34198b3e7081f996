// ABOUTME: Recipe generation orchestrator tying preferences, prompt and completion together
// ABOUTME: Loads stored preferences, builds the prompt, calls the LLM and records history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! # Recipe Generation
//!
//! One generation runs these steps in order, each awaited before the next:
//!
//! 1. load the caller's stored preferences (absence is fine)
//! 2. resolve them against the request overrides
//! 3. build the prompt
//! 4. send it as the only user message to the completion service
//! 5. append the result to the caller's history
//!
//! Any failure aborts the sequence. There is no retry.

use std::fmt;
use std::sync::Arc;

use dapur_core::{build_prompt, resolve, MergePolicy, PreferenceSet};
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::database::{DatabaseError, HistoryRepository, PreferenceRepository};
use crate::errors::AppError;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::logging::AppLogger;
use crate::models::NewHistoryEntry;

/// Ingredients as sent by clients: a single value or a list
///
/// Form bodies repeat the key for lists and send a bare value for a single
/// ingredient, JSON bodies may use either a string or an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Ingredients {
    /// One ingredient
    One(String),
    /// Several ingredients, in request order
    Many(Vec<String>),
}

impl Default for Ingredients {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl Ingredients {
    /// Normalize to a list: a scalar becomes a one-element list
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

impl From<Vec<String>> for Ingredients {
    fn from(items: Vec<String>) -> Self {
        Self::Many(items)
    }
}

impl From<&str> for Ingredients {
    fn from(item: &str) -> Self {
        Self::One(item.to_owned())
    }
}

impl<'de> Deserialize<'de> for Ingredients {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IngredientsVisitor;

        impl<'de> Visitor<'de> for IngredientsVisitor {
            type Value = Ingredients;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an ingredient string or a list of ingredient strings")
            }

            fn visit_str<E>(self, value: &str) -> Result<Ingredients, E>
            where
                E: de::Error,
            {
                Ok(Ingredients::One(value.to_owned()))
            }

            fn visit_string<E>(self, value: String) -> Result<Ingredients, E>
            where
                E: de::Error,
            {
                Ok(Ingredients::One(value))
            }

            fn visit_unit<E>(self) -> Result<Ingredients, E>
            where
                E: de::Error,
            {
                Ok(Ingredients::default())
            }

            fn visit_none<E>(self) -> Result<Ingredients, E>
            where
                E: de::Error,
            {
                Ok(Ingredients::default())
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Ingredients, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element::<String>()? {
                    items.push(item);
                }
                Ok(Ingredients::Many(items))
            }
        }

        deserializer.deserialize_any(IngredientsVisitor)
    }
}

/// Input of one generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Authenticated caller
    pub user_id: i64,
    /// Category label exactly as sent; unknown labels get the heavy-meal rules
    pub category: String,
    /// Requested ingredients, `None` when the field was absent
    pub ingredients: Option<Ingredients>,
    /// Free-text adjustment
    pub adjustment: Option<String>,
    /// Preference overrides for this call only
    pub preferences: PreferenceSet,
}

/// Result of a successful generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedRecipe {
    /// Completion text, empty when the service returned no choices
    pub text: String,
    /// Id of the recorded history entry
    pub history_id: i64,
}

/// Why a generation failed
///
/// Callers see one uniform error; the variants keep partial failures apart
/// for logging and tests.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Stored preferences could not be read
    #[error("failed to load stored preferences: {0}")]
    PreferenceLookup(#[source] DatabaseError),

    /// The completion service failed
    #[error("completion failed: {0}")]
    Completion(#[source] AppError),

    /// A recipe was generated but could not be recorded in history
    #[error("recipe generated but not recorded in history: {source}")]
    HistoryNotRecorded {
        /// Text that was generated and then discarded
        generated: String,
        /// Underlying write failure
        #[source]
        source: DatabaseError,
    },
}

impl From<GenerationError> for AppError {
    fn from(error: GenerationError) -> Self {
        Self::generation_failed(error.to_string()).with_source(error)
    }
}

/// Orchestrates recipe generation over injected collaborators
pub struct RecipeGenerator {
    preferences: Arc<dyn PreferenceRepository>,
    history: Arc<dyn HistoryRepository>,
    llm: Arc<dyn LlmProvider>,
    merge_policy: MergePolicy,
}

impl RecipeGenerator {
    /// Create a generator
    #[must_use]
    pub fn new(
        preferences: Arc<dyn PreferenceRepository>,
        history: Arc<dyn HistoryRepository>,
        llm: Arc<dyn LlmProvider>,
        merge_policy: MergePolicy,
    ) -> Self {
        Self {
            preferences,
            history,
            llm,
            merge_policy,
        }
    }

    /// Generate a recipe and record it in the caller's history
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] naming the step that failed
    #[instrument(
        skip(self, request),
        fields(user_id = request.user_id, category = %request.category)
    )]
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedRecipe, GenerationError> {
        let GenerationRequest {
            user_id,
            category,
            ingredients,
            adjustment,
            preferences: overrides,
        } = request;
        let ingredients = ingredients.unwrap_or_default().into_vec();

        let stored = self
            .preferences
            .find_preferences(user_id)
            .await
            .map_err(GenerationError::PreferenceLookup)?
            .map(|record| record.preference_set());

        let effective = resolve(&overrides, stored.as_ref(), self.merge_policy);
        let prompt = build_prompt(&category, &ingredients, adjustment.as_deref(), &effective);
        debug!(prompt_chars = prompt.len(), "Prompt built");

        let chat = ChatRequest::new(vec![ChatMessage::user(prompt)])
            .with_model(self.llm.default_model());
        let text = self
            .llm
            .complete(&chat)
            .await
            .map_err(GenerationError::Completion)?
            .into_first_text();

        let entry = NewHistoryEntry {
            user_id,
            ingredients: ingredients.join(", "),
            category: category.clone(),
            adjustment: adjustment.unwrap_or_default(),
            result: text,
        };

        let recorded = match self.history.append_history(&entry).await {
            Ok(recorded) => recorded,
            Err(source) => {
                warn!(error = %source, "Generated recipe could not be recorded");
                return Err(GenerationError::HistoryNotRecorded {
                    generated: entry.result,
                    source,
                });
            }
        };

        AppLogger::log_recipe_generated(
            user_id,
            &category,
            ingredients.len(),
            recorded.result.chars().count(),
        );

        Ok(GeneratedRecipe {
            text: recorded.result,
            history_id: recorded.id,
        })
    }
}

// ABOUTME: In-memory fakes for the repository and completion service traits
// ABOUTME: Record calls so tests can assert on the exact prompt and history entry

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use dapur_server::database::{DatabaseError, HistoryRepository, PreferenceRepository};
use dapur_server::errors::AppError;
use dapur_server::llm::{ChatChoice, ChatRequest, ChatResponse, LlmProvider};
use dapur_server::models::{NewHistoryEntry, RecipeHistoryEntry, StoredPreferences};
use dapur_server::PreferenceSet;

/// Preference store backed by a map
#[derive(Default)]
pub struct InMemoryPreferences {
    records: Mutex<HashMap<i64, StoredPreferences>>,
    fail: bool,
}

impl InMemoryPreferences {
    /// Store that already holds one record
    pub fn with_record(user_id: i64, preferences: PreferenceSet) -> Self {
        let store = Self::default();
        store.records.lock().unwrap().insert(
            user_id,
            StoredPreferences {
                id: 1,
                user_id,
                calorie_limit: preferences.calorie_limit,
                spicy_level: preferences.spicy_level,
                avoid_foods: preferences.avoid_foods,
                updated_at: Utc::now(),
            },
        );
        store
    }

    /// Store whose every call fails
    pub fn failing() -> Self {
        Self {
            records: Mutex::default(),
            fail: true,
        }
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryPreferences {
    async fn find_preferences(
        &self,
        user_id: i64,
    ) -> Result<Option<StoredPreferences>, DatabaseError> {
        if self.fail {
            return Err(DatabaseError::ConnectionError {
                context: "preference store offline".to_owned(),
            });
        }
        Ok(self.records.lock().unwrap().get(&user_id).cloned())
    }

    async fn upsert_preferences(
        &self,
        user_id: i64,
        preferences: &PreferenceSet,
    ) -> Result<StoredPreferences, DatabaseError> {
        let mut records = self.records.lock().unwrap();
        let id = records.get(&user_id).map_or(records.len() as i64 + 1, |r| r.id);
        let record = StoredPreferences {
            id,
            user_id,
            calorie_limit: preferences.calorie_limit,
            spicy_level: preferences.spicy_level,
            avoid_foods: preferences.avoid_foods.clone(),
            updated_at: Utc::now(),
        };
        records.insert(user_id, record.clone());
        Ok(record)
    }
}

/// Append-only history kept in a vector
#[derive(Default)]
pub struct InMemoryHistory {
    entries: Mutex<Vec<RecipeHistoryEntry>>,
    fail: bool,
}

impl InMemoryHistory {
    /// History whose writes fail
    pub fn failing() -> Self {
        Self {
            entries: Mutex::default(),
            fail: true,
        }
    }

    /// Everything appended so far
    pub fn entries(&self) -> Vec<RecipeHistoryEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistory {
    async fn append_history(
        &self,
        entry: &NewHistoryEntry,
    ) -> Result<RecipeHistoryEntry, DatabaseError> {
        if self.fail {
            return Err(DatabaseError::QueryError {
                context: "disk full".to_owned(),
            });
        }
        let mut entries = self.entries.lock().unwrap();
        let recorded = RecipeHistoryEntry {
            id: entries.len() as i64 + 1,
            user_id: entry.user_id,
            ingredients: entry.ingredients.clone(),
            category: entry.category.clone(),
            adjustment: entry.adjustment.clone(),
            result: entry.result.clone(),
            created_at: Utc::now(),
        };
        entries.push(recorded.clone());
        Ok(recorded)
    }

    async fn list_history(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<RecipeHistoryEntry>, DatabaseError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|entry| entry.user_id == user_id)
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }
}

/// Completion service that returns scripted choices and records requests
pub struct ScriptedLlm {
    choices: Vec<String>,
    error: Option<String>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedLlm {
    /// Reply with a single choice
    pub fn replying(text: &str) -> Self {
        Self::with_choices(vec![text.to_owned()])
    }

    /// Reply with the given choices, possibly none
    pub fn with_choices(choices: Vec<String>) -> Self {
        Self {
            choices,
            error: None,
            requests: Mutex::default(),
        }
    }

    /// Fail every completion
    pub fn failing(message: &str) -> Self {
        Self {
            choices: Vec::new(),
            error: Some(message.to_owned()),
            requests: Mutex::default(),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Content of the only message of the only request
    pub fn single_prompt(&self) -> String {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one completion call");
        assert_eq!(requests[0].messages.len(), 1, "expected one message");
        requests[0].messages[0].content.clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted (test)"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(message) = &self.error {
            return Err(AppError::external_service("scripted", message.clone()));
        }
        Ok(ChatResponse {
            choices: self
                .choices
                .iter()
                .map(|text| ChatChoice::text(text.as_str()))
                .collect(),
            model: "scripted-model".to_owned(),
            usage: None,
        })
    }
}

// ABOUTME: Integration tests for the recipe generation orchestrator
// ABOUTME: Runs the full sequence against in-memory repositories and a scripted LLM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;

use dapur_server::errors::{AppError, ErrorCode};
use dapur_server::llm::MessageRole;
use dapur_server::services::{GenerationError, GenerationRequest, Ingredients, RecipeGenerator};
use dapur_server::{MergePolicy, PreferenceSet};
use helpers::fakes::{InMemoryHistory, InMemoryPreferences, ScriptedLlm};

struct Harness {
    history: Arc<InMemoryHistory>,
    llm: Arc<ScriptedLlm>,
    generator: RecipeGenerator,
}

fn harness(
    preferences: InMemoryPreferences,
    history: InMemoryHistory,
    llm: ScriptedLlm,
    policy: MergePolicy,
) -> Harness {
    let preferences = Arc::new(preferences);
    let history = Arc::new(history);
    let llm = Arc::new(llm);
    let generator = RecipeGenerator::new(
        preferences,
        history.clone(),
        llm.clone(),
        policy,
    );
    Harness {
        history,
        llm,
        generator,
    }
}

fn request(user_id: i64, ingredients: Ingredients) -> GenerationRequest {
    GenerationRequest {
        user_id,
        category: "Makanan Berat".to_owned(),
        ingredients: Some(ingredients),
        adjustment: None,
        preferences: PreferenceSet::default(),
    }
}

#[tokio::test]
async fn test_stored_and_request_preferences_are_merged() {
    let stored = PreferenceSet {
        calorie_limit: Some(400),
        ..PreferenceSet::default()
    };
    let h = harness(
        InMemoryPreferences::with_record(7, stored),
        InMemoryHistory::default(),
        ScriptedLlm::replying("Nasi Goreng Spesial"),
        MergePolicy::Truthy,
    );

    let mut req = request(7, vec!["nasi".to_owned(), "telur".to_owned()].into());
    req.preferences.spicy_level = Some(3);

    let generated = h.generator.generate(req).await.unwrap();
    assert_eq!(generated.text, "Nasi Goreng Spesial");

    let prompt = h.llm.single_prompt();
    assert!(prompt.contains("- Batas Kalori: < 400 kkal\n"));
    assert!(prompt.contains("- Tingkat Pedas: 3/10\n"));
    assert!(!prompt.contains("Hindari Bahan"));

    let entries = h.history.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].user_id, 7);
    assert_eq!(entries[0].ingredients, "nasi, telur");
    assert_eq!(entries[0].category, "Makanan Berat");
    assert_eq!(entries[0].adjustment, "");
    assert_eq!(entries[0].result, "Nasi Goreng Spesial");
    assert_eq!(generated.history_id, entries[0].id);
}

#[tokio::test]
async fn test_prompt_sent_as_single_user_message() {
    let h = harness(
        InMemoryPreferences::default(),
        InMemoryHistory::default(),
        ScriptedLlm::replying("Sup"),
        MergePolicy::Truthy,
    );

    h.generator
        .generate(request(1, "wortel".into()))
        .await
        .unwrap();

    let requests = h.llm.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].messages.len(), 1);
    assert_eq!(requests[0].messages[0].role, MessageRole::User);
    assert_eq!(requests[0].model.as_deref(), Some("scripted-model"));
    assert!(requests[0].messages[0].content.contains("\nwortel\n"));
}

#[tokio::test]
async fn test_scalar_and_absent_ingredients_are_normalized() {
    let h = harness(
        InMemoryPreferences::default(),
        InMemoryHistory::default(),
        ScriptedLlm::replying("Bubur"),
        MergePolicy::Truthy,
    );

    h.generator
        .generate(request(2, Ingredients::One("beras".to_owned())))
        .await
        .unwrap();

    let mut absent = request(2, Ingredients::default());
    absent.ingredients = None;
    absent.adjustment = Some("lebih encer".to_owned());
    h.generator.generate(absent).await.unwrap();

    let entries = h.history.entries();
    assert_eq!(entries[0].ingredients, "beras");
    assert_eq!(entries[1].ingredients, "");
    assert_eq!(entries[1].adjustment, "lebih encer");
}

#[tokio::test]
async fn test_zero_choices_yield_empty_text_and_history_entry() {
    let h = harness(
        InMemoryPreferences::default(),
        InMemoryHistory::default(),
        ScriptedLlm::with_choices(Vec::new()),
        MergePolicy::Truthy,
    );

    let generated = h
        .generator
        .generate(request(3, "tahu".into()))
        .await
        .unwrap();

    assert_eq!(generated.text, "");
    let entries = h.history.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].result, "");
}

#[tokio::test]
async fn test_presence_policy_sends_zero_spice_through() {
    let stored = PreferenceSet {
        spicy_level: Some(8),
        ..PreferenceSet::default()
    };
    let h = harness(
        InMemoryPreferences::with_record(4, stored),
        InMemoryHistory::default(),
        ScriptedLlm::replying("Sayur Bening"),
        MergePolicy::Presence,
    );

    let mut req = request(4, "bayam".into());
    req.preferences.spicy_level = Some(0);
    h.generator.generate(req).await.unwrap();

    let prompt = h.llm.single_prompt();
    assert!(!prompt.contains("Tingkat Pedas"));
    assert!(prompt.contains("- Tanpa preferensi diet khusus"));
}

#[tokio::test]
async fn test_preference_lookup_failure_aborts_before_completion() {
    let h = harness(
        InMemoryPreferences::failing(),
        InMemoryHistory::default(),
        ScriptedLlm::replying("never"),
        MergePolicy::Truthy,
    );

    let error = h
        .generator
        .generate(request(5, "ikan".into()))
        .await
        .unwrap_err();

    assert!(matches!(error, GenerationError::PreferenceLookup(_)));
    assert!(h.llm.requests().is_empty());
    assert!(h.history.entries().is_empty());
}

#[tokio::test]
async fn test_completion_failure_records_nothing() {
    let h = harness(
        InMemoryPreferences::default(),
        InMemoryHistory::default(),
        ScriptedLlm::failing("connection refused"),
        MergePolicy::Truthy,
    );

    let error = h
        .generator
        .generate(request(6, "ayam".into()))
        .await
        .unwrap_err();

    assert!(matches!(error, GenerationError::Completion(_)));
    assert!(h.history.entries().is_empty());

    let app_error = AppError::from(error);
    assert_eq!(app_error.code, ErrorCode::GenerationFailed);
    assert_eq!(app_error.message, "Failed to generate recipe");
    assert!(app_error.error.unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_history_failure_keeps_generated_text() {
    let h = harness(
        InMemoryPreferences::default(),
        InMemoryHistory::failing(),
        ScriptedLlm::replying("Rendang"),
        MergePolicy::Truthy,
    );

    let error = h
        .generator
        .generate(request(8, "daging".into()))
        .await
        .unwrap_err();

    match &error {
        GenerationError::HistoryNotRecorded { generated, .. } => assert_eq!(generated, "Rendang"),
        other => panic!("unexpected error: {other:?}"),
    }

    let app_error = AppError::from(error);
    assert_eq!(app_error.code, ErrorCode::GenerationFailed);
    assert_eq!(app_error.http_status(), 500);
}

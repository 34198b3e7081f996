// ABOUTME: HTTP tests for the profile and dietary preference routes
// ABOUTME: Covers bearer authentication, preference round trips and range validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use axum::Router;
use dapur_server::resources::ServerResources;
use dapur_server::server::build_router;
use helpers::axum_test::AxumTestRequest;
use helpers::fakes::ScriptedLlm;
use serde_json::{json, Value};

async fn app() -> (Router, Arc<ServerResources>) {
    let resources = common::create_test_resources(Arc::new(ScriptedLlm::replying("unused"))).await;
    (build_router(Arc::clone(&resources)), resources)
}

#[tokio::test]
async fn test_profile_requires_authorization_header() {
    let (app, _) = app().await;

    let response = AxumTestRequest::get("/profile").send(app).await;

    assert_eq!(response.status(), 401);
    let body: Value = response.json();
    assert_eq!(body["message"], "Authorization header is missing!");
}

#[tokio::test]
async fn test_profile_rejects_non_bearer_scheme() {
    let (app, _) = app().await;

    let response = AxumTestRequest::get("/profile")
        .header("authorization", "Basic c2l0aTpyYWhhc2lh")
        .send(app)
        .await;

    assert_eq!(response.status(), 401);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid authorization format");
}

#[tokio::test]
async fn test_profile_rejects_bad_token() {
    let (app, _) = app().await;

    let response = AxumTestRequest::get("/profile")
        .bearer("not.a.jwt")
        .send(app)
        .await;

    assert_eq!(response.status(), 401);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_profile_returns_caller() {
    let (app, resources) = app().await;
    let (user, token) = common::create_authenticated_user(&resources, "siti@dapur.id").await;

    let response = AxumTestRequest::get("/profile").bearer(&token).send(app).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], format!("Get profile id: {} successfully", user.id));
    assert_eq!(body["data"]["email"], "siti@dapur.id");
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_preferences_absent_until_saved() {
    let (app, resources) = app().await;
    let (_, token) = common::create_authenticated_user(&resources, "siti@dapur.id").await;

    let response = AxumTestRequest::get("/profile/preferences")
        .bearer(&token)
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_save_then_read_preferences() {
    let (app, resources) = app().await;
    let (user, token) = common::create_authenticated_user(&resources, "siti@dapur.id").await;

    let saved = AxumTestRequest::post("/profile/preferences")
        .bearer(&token)
        .json(&json!({"calorieLimit": 450, "spicyLevel": 0, "avoidFoods": "udang, kacang"}))
        .send(app.clone())
        .await;
    assert_eq!(saved.status(), 200);
    let saved: Value = saved.json();
    assert_eq!(saved["message"], "Preferences updated successfully");
    assert_eq!(saved["data"]["userId"], user.id);
    assert_eq!(saved["data"]["spicyLevel"], 0);

    let fetched: Value = AxumTestRequest::get("/profile/preferences")
        .bearer(&token)
        .send(app)
        .await
        .json();
    assert_eq!(fetched["data"]["calorieLimit"], 450);
    assert_eq!(fetched["data"]["avoidFoods"], "udang, kacang");
}

#[tokio::test]
async fn test_save_overwrites_whole_record() {
    let (app, resources) = app().await;
    let (user, token) = common::create_authenticated_user(&resources, "siti@dapur.id").await;

    AxumTestRequest::post("/profile/preferences")
        .bearer(&token)
        .json(&json!({"calorieLimit": 450, "spicyLevel": 3, "avoidFoods": "udang"}))
        .send(app.clone())
        .await;
    let response = AxumTestRequest::post("/profile/preferences")
        .bearer(&token)
        .form(&[("spicyLevel", "7")])
        .send(app)
        .await;
    assert_eq!(response.status(), 200);

    let stored = resources
        .database
        .get_preferences(user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.spicy_level, Some(7));
    assert_eq!(stored.calorie_limit, None);
    assert_eq!(stored.avoid_foods, None);
}

#[tokio::test]
async fn test_out_of_range_preferences_rejected() {
    let (app, resources) = app().await;
    let (user, token) = common::create_authenticated_user(&resources, "siti@dapur.id").await;

    let response = AxumTestRequest::post("/profile/preferences")
        .bearer(&token)
        .json(&json!({"calorieLimit": -5, "spicyLevel": 11}))
        .send(app)
        .await;

    assert_eq!(response.status(), 422);
    let body: Value = response.json();
    let detail = body["error"].as_str().unwrap();
    assert!(detail.contains("calorieLimit"));
    assert!(detail.contains("spicyLevel"));
    assert!(resources
        .database
        .get_preferences(user.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_non_numeric_preference_is_bad_request() {
    let (app, resources) = app().await;
    let (_, token) = common::create_authenticated_user(&resources, "siti@dapur.id").await;

    let response = AxumTestRequest::post("/profile/preferences")
        .bearer(&token)
        .json(&json!({"calorieLimit": "banyak"}))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
}

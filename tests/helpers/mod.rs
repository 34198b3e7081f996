// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports the axum request driver and in-memory collaborator fakes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod axum_test;
pub mod fakes;

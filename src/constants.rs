// ABOUTME: System-wide constants for the Dapur server
// ABOUTME: Re-exports defaults, limits and user-facing messages from dapur-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! # Constants Module
//!
//! Constants live in `dapur-core` so that the pure recipe logic and the
//! server agree on them.

pub use dapur_core::constants::{defaults, limits, messages, service_names};

// ABOUTME: Error handling surface of the server crate
// ABOUTME: Re-exports the unified error types defined in dapur-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! # Unified Error Handling System
//!
//! Every handler returns [`AppResult`]; [`AppError`] renders itself as the
//! `{ success: false, code, message, error? }` envelope with the status
//! given by its [`ErrorCode`].

pub use dapur_core::errors::{AppError, AppResult, DatabaseError, ErrorCode, ErrorResponse};

// ABOUTME: Request body extractors shared by the route handlers
// ABOUTME: Accepts JSON or urlencoded form bodies and lenient numeric fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

use std::fmt;

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use axum_extra::extract::Form;
use http::header::CONTENT_TYPE;
use serde::de::{self, DeserializeOwned, Visitor};
use serde::Deserializer;

use crate::errors::AppError;

/// Body extractor accepting `application/json` or
/// `application/x-www-form-urlencoded`
///
/// Form bodies keep repeated keys, so `ingredients=a&ingredients=b` becomes a
/// list. Anything that is not a form is parsed as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::invalid_format("Invalid form body").with_error(e.to_string()))?;
            return Ok(Self(value));
        }

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid_format("Invalid JSON body").with_error(e.body_text()))?;
        Ok(Self(value))
    }
}

/// Deserialize an optional integer from a number or a numeric string
///
/// `null`, `""` and whitespace-only strings mean absent. Use with
/// `#[serde(default, deserialize_with = "lenient_i64")]`.
///
/// # Errors
///
/// Fails on non-numeric strings, fractional numbers and other types
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientI64Visitor;

    impl Visitor<'_> for LenientI64Visitor {
        type Value = Option<i64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer, a numeric string, or null")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Option<i64>, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Option<i64>, E>
        where
            E: de::Error,
        {
            i64::try_from(value)
                .map(Some)
                .map_err(|_| E::custom(format!("integer {value} is too large")))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Option<i64>, E>
        where
            E: de::Error,
        {
            if value.fract().abs() < f64::EPSILON && value.abs() < 9.0e15 {
                Ok(Some(value as i64))
            } else {
                Err(E::custom(format!("expected a whole number, got {value}")))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Option<i64>, E>
        where
            E: de::Error,
        {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("'{trimmed}' is not a whole number")))
        }

        fn visit_unit<E>(self) -> Result<Option<i64>, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Option<i64>, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(LenientI64Visitor)
}

/// Deserialize an optional string, mapping `""` to absent
///
/// # Errors
///
/// Fails when the value is neither a string nor null
pub fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

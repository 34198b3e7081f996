// ABOUTME: Dietary preference sets and the merge between request values and stored values
// ABOUTME: Pure resolution used before building a recipe prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! # Preference Resolution
//!
//! A generation request may carry its own calorie limit, spice level and
//! foods to avoid. Each field is resolved independently: the request value
//! wins when it counts as provided, otherwise the user's stored value is
//! used, otherwise the field stays absent.
//!
//! What "provided" means is controlled by [`MergePolicy`]. The default,
//! [`MergePolicy::Truthy`], treats `0` and `""` as not provided, so a request
//! asking for spice level `0` keeps the stored level. Deployments that want
//! an explicit `0` to win switch to [`MergePolicy::Presence`].

use serde::{Deserialize, Serialize};

/// Calorie limit, spice level and foods to avoid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceSet {
    /// Upper bound in kcal for the whole recipe
    pub calorie_limit: Option<i64>,
    /// Spice level on a 0-10 scale
    pub spicy_level: Option<i64>,
    /// Comma-separated foods the recipe must not use
    pub avoid_foods: Option<String>,
}

impl PreferenceSet {
    /// True when none of the three fields is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.calorie_limit.is_none() && self.spicy_level.is_none() && self.avoid_foods.is_none()
    }
}

/// Rule deciding whether a request value overrides the stored one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// Only non-zero numbers and non-empty strings override storage
    #[default]
    Truthy,
    /// Any value present in the request overrides storage, including `0`
    Presence,
}

impl MergePolicy {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "presence" | "explicit" => Self::Presence,
            _ => Self::Truthy,
        }
    }

    /// Canonical name used in configuration
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Truthy => "truthy",
            Self::Presence => "presence",
        }
    }

    fn accepts<T: Truthy + ?Sized>(self, value: &T) -> bool {
        match self {
            Self::Truthy => value.is_truthy(),
            Self::Presence => true,
        }
    }
}

/// Values with a notion of "empty" that the truthy merge skips
pub(crate) trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for i64 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

fn pick<T: Truthy + Clone>(
    requested: Option<&T>,
    stored: Option<&T>,
    policy: MergePolicy,
) -> Option<T> {
    requested
        .filter(|value| policy.accepts(*value))
        .or(stored)
        .cloned()
}

/// Merge request preferences over stored preferences
///
/// `stored` is `None` when the user never saved preferences, which behaves
/// exactly like a stored record with every field absent.
#[must_use]
pub fn resolve(
    request: &PreferenceSet,
    stored: Option<&PreferenceSet>,
    policy: MergePolicy,
) -> PreferenceSet {
    PreferenceSet {
        calorie_limit: pick(
            request.calorie_limit.as_ref(),
            stored.and_then(|s| s.calorie_limit.as_ref()),
            policy,
        ),
        spicy_level: pick(
            request.spicy_level.as_ref(),
            stored.and_then(|s| s.spicy_level.as_ref()),
            policy,
        ),
        avoid_foods: pick(
            request.avoid_foods.as_ref(),
            stored.and_then(|s| s.avoid_foods.as_ref()),
            policy,
        ),
    }
}

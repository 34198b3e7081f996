// ABOUTME: Recipe category enumeration and label parsing
// ABOUTME: Unknown labels resolve to the heavy-meal default instead of failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of dish the caller asks for
///
/// The deployed API contract uses the Indonesian labels returned by
/// [`RecipeCategory::label`]. The English identifiers are accepted as
/// aliases on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RecipeCategory {
    /// Rich, filling main course ("Makanan Berat")
    #[default]
    #[serde(rename = "Makanan Berat", alias = "HeavyMeal")]
    HeavyMeal,
    /// Health-oriented dish ("Makanan Sehat")
    #[serde(rename = "Makanan Sehat", alias = "HealthyMeal")]
    HealthyMeal,
    /// Food for babies and toddlers ("Makanan Bayi")
    #[serde(rename = "Makanan Bayi", alias = "BabyFood")]
    BabyFood,
}

impl RecipeCategory {
    /// All categories, in the order the API documents them
    pub const ALL: [Self; 3] = [Self::HeavyMeal, Self::HealthyMeal, Self::BabyFood];

    /// Label used by the deployed API contract
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HeavyMeal => "Makanan Berat",
            Self::HealthyMeal => "Makanan Sehat",
            Self::BabyFood => "Makanan Bayi",
        }
    }

    /// Parse a category label, accepting both the API label and the identifier
    ///
    /// Matching is exact, so padded or differently cased labels are unknown.
    /// Returns `None` for anything else; callers that want the tolerant
    /// behaviour use [`RecipeCategory::from_label_or_default`].
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Makanan Berat" | "HeavyMeal" => Some(Self::HeavyMeal),
            "Makanan Sehat" | "HealthyMeal" => Some(Self::HealthyMeal),
            "Makanan Bayi" | "BabyFood" => Some(Self::BabyFood),
            _ => None,
        }
    }

    /// Parse a category label, falling back to [`RecipeCategory::HeavyMeal`]
    #[must_use]
    pub fn from_label_or_default(label: &str) -> Self {
        Self::from_label(label).unwrap_or_default()
    }
}

impl fmt::Display for RecipeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

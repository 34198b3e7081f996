// ABOUTME: Builds the natural-language recipe instruction sent to the completion service
// ABOUTME: Deterministic text assembly from category, ingredients, adjustment and preferences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

//! # Prompt Builder
//!
//! The prompt text is part of the deployed contract with the model and is
//! kept in Indonesian. Sections always appear in this order: header with
//! ingredients, general rules, category rules, user adjustment, dietary
//! preferences, expected output format.

use crate::category::RecipeCategory;
use crate::preferences::{PreferenceSet, Truthy};

const NO_PREFERENCE_LINE: &str = "- Tanpa preferensi diet khusus";

const BABY_FOOD_RULES: &str = "
- Tekstur harus disesuaikan untuk bayi (lunak/bubur/finger food sesuai usia umum)
- HINDARI gula dan garam berlebih (atau tiadakan)
- Fokus pada nutrisi untuk pertumbuhan";

const HEALTHY_MEAL_RULES: &str = "
- Gunakan metode masak yang sehat (kukus, rebus, panggang)
- Minimalkan minyak dan lemak jenuh
- Fokus pada keseimbangan gizi (protein, serat, karbo)";

const HEAVY_MEAL_RULES: &str = "- Fokus pada rasa yang kaya dan mengenyangkan";

/// Cooking rules appended for a category
#[must_use]
pub const fn category_rules(category: RecipeCategory) -> &'static str {
    match category {
        RecipeCategory::BabyFood => BABY_FOOD_RULES,
        RecipeCategory::HealthyMeal => HEALTHY_MEAL_RULES,
        RecipeCategory::HeavyMeal => HEAVY_MEAL_RULES,
    }
}

/// One line per truthy preference, each terminated by a newline
///
/// Returns an empty string when nothing applies.
#[must_use]
pub fn preference_lines(preferences: &PreferenceSet) -> String {
    let mut text = String::new();
    if let Some(limit) = preferences.calorie_limit.filter(Truthy::is_truthy) {
        text.push_str(&format!("- Batas Kalori: < {limit} kkal\n"));
    }
    if let Some(level) = preferences.spicy_level.filter(Truthy::is_truthy) {
        text.push_str(&format!("- Tingkat Pedas: {level}/10\n"));
    }
    if let Some(avoid) = preferences.avoid_foods.as_deref().filter(|s| s.is_truthy()) {
        text.push_str(&format!("- Hindari Bahan: {avoid}\n"));
    }
    text
}

/// Assemble the full recipe prompt
///
/// `category` is echoed verbatim in the header; rules are chosen from the
/// parsed [`RecipeCategory`], with unrecognised labels getting the
/// heavy-meal rules. Never fails: an empty ingredient list renders an empty
/// ingredient line.
#[must_use]
pub fn build_prompt(
    category: &str,
    ingredients: &[String],
    adjustment: Option<&str>,
    preferences: &PreferenceSet,
) -> String {
    let rules = category_rules(RecipeCategory::from_label(category).unwrap_or_default());

    let adjustment_line = adjustment
        .filter(|text| !text.is_empty())
        .map(|text| format!("- Tambahan User: {text}"))
        .unwrap_or_default();

    let preference_text = preference_lines(preferences);
    let preference_block = if preference_text.is_empty() {
        NO_PREFERENCE_LINE
    } else {
        preference_text.as_str()
    };

    let ingredient_line = ingredients.join(", ");

    format!(
        "
Buatkan resep **{category}** berdasarkan bahan:

{ingredient_line}

Aturan Umum:
- Mudah dibuat (simple)
- Waktu < 60 menit
{rules}
{adjustment_line}
{preference_block}

Format Output:
- Nama Resep
- Bahan
- Langkah - langkah pembuatannya
- Estimasi Kalori
- Estimasi Waktu pembuatan
"
    )
}

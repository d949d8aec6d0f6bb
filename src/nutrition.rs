//! # Nutrition Aggregation
//!
//! Sums per-ingredient nutrition estimates into per-recipe and per-day
//! totals, and applies the user's diet and sex calorie adjustments.
//!
//! Aggregation is best-effort throughout: an ingredient the lookup does not
//! know contributes zero, and a meal plan whose recipe was deleted is
//! skipped silently. Summation is commutative, so totals do not depend on
//! ingredient or plan order.
//!
//! ## Usage
//!
//! ```rust
//! use mealplanner::nutrition::{adjust, within_limit};
//! use mealplanner::recipe_model::NutritionalInfo;
//!
//! let total = NutritionalInfo::new(1000.0, 40.0, 120.0, 30.0, 12.0);
//! let adjusted = adjust(&total, "vegan", "female");
//! assert_eq!(adjusted.calories, 1000.0 * 0.95 * 0.9);
//! assert!(within_limit(adjusted.calories, 2000.0));
//! ```

use crate::meal_plan::MealPlan;
use crate::recipe_model::{Ingredient, NutritionalInfo};
use crate::sources::{NutritionLookup, RecipeSource};
use crate::user_profile::UserProfile;
use log::{debug, trace};

/// Sum nutrition estimates for a recipe's ingredient list.
///
/// Each ingredient's estimate comes from the supplied lookup; missing data
/// contributes zero rather than failing the aggregation.
pub fn aggregate_recipe(
    ingredients: &[Ingredient],
    lookup: &impl NutritionLookup,
) -> NutritionalInfo {
    let total = ingredients
        .iter()
        .map(|ingredient| match lookup.nutrition_for(&ingredient.name) {
            Some(info) => info,
            None => {
                trace!("no nutrition data for '{}', counting zero", ingredient.name);
                NutritionalInfo::zero()
            }
        })
        .sum();

    debug!("aggregated {} ingredients: {}", ingredients.len(), total);
    total
}

/// Apply the diet and sex calorie adjustments to a nutrition total.
///
/// Only calories are adjusted. The diet multiplier is applied first, then
/// the sex multiplier; the order is part of the contract. Comparisons are
/// case-insensitive; unrecognized values leave calories unchanged.
pub fn adjust(total: &NutritionalInfo, diet_preference: &str, sex: &str) -> NutritionalInfo {
    let mut calories = total.calories;

    match diet_preference.to_lowercase().as_str() {
        "vegan" => calories *= 0.95,
        "keto" => calories *= 1.05,
        _ => {}
    }

    if sex.to_lowercase() == "female" {
        calories *= 0.9;
    }

    NutritionalInfo {
        calories,
        ..*total
    }
}

/// Inclusive daily-limit check
pub fn within_limit(consumed: f64, limit: f64) -> bool {
    consumed <= limit
}

/// Sum the adjusted calories consumed across a set of meal plans.
///
/// Each plan's recipe is resolved through the supplied source; plans whose
/// recipe no longer exists are skipped silently, and recipes without a
/// nutrition summary contribute zero.
pub fn consumed_calories(
    plans: &[MealPlan],
    recipes: &impl RecipeSource,
    profile: &UserProfile,
) -> f64 {
    plans
        .iter()
        .filter_map(|plan| recipes.recipe_by_id(plan.recipe_id))
        .map(|recipe| {
            let base = recipe.nutrition.unwrap_or_default();
            adjust(&base, profile.diet_preference(), profile.sex()).calories
        })
        .sum()
}

/// Per-day nutrition totals across a set of meal plans, unadjusted.
///
/// Same resolution policy as [`consumed_calories`]: deleted recipes are
/// skipped, missing summaries count zero.
pub fn daily_totals(plans: &[MealPlan], recipes: &impl RecipeSource) -> NutritionalInfo {
    plans
        .iter()
        .filter_map(|plan| recipes.recipe_by_id(plan.recipe_id))
        .map(|recipe| recipe.nutrition.unwrap_or_default())
        .sum()
}

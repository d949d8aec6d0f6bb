//! # Meal Planning
//!
//! Meal-plan entries pair a recipe reference with a calendar day and a meal
//! type. This module provides grouping by day and the stable meal-type
//! ordering (breakfast, then lunch, then dinner, then snack) used to lay
//! out a day's plan.
//!
//! A plan keeps the recipe's name denormalized so it stays displayable even
//! after the referenced recipe is deleted.

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// The four meal slots of a day, in display and sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// All meal types in sort order
    pub const ALL: &'static [MealType] = &[
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    /// Parse a meal-type string, case-insensitively.
    ///
    /// An unrecognized string falls back to `Breakfast` with a warning.
    /// The fallback keeps degraded persisted data displayable instead of
    /// failing the whole read; it sorts such plans first.
    pub fn parse(s: &str) -> MealType {
        match s.to_lowercase().as_str() {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" => MealType::Dinner,
            "snack" => MealType::Snack,
            other => {
                warn!("unrecognized meal type '{}', treating as breakfast", other);
                MealType::Breakfast
            }
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recipe scheduled on a calendar day for a particular meal slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: Uuid,

    /// Reference to the planned recipe; the recipe may have been deleted
    pub recipe_id: Uuid,

    /// Denormalized recipe name, kept displayable after recipe deletion
    pub recipe_name: String,

    /// Day granularity by construction
    pub date: NaiveDate,

    pub meal_type: MealType,

    pub notes: Option<String>,
}

impl MealPlan {
    pub fn new(recipe_id: Uuid, recipe_name: &str, date: NaiveDate, meal_type: MealType) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipe_id,
            recipe_name: recipe_name.to_string(),
            date,
            meal_type,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

/// Group meal plans by calendar day.
///
/// Within each day, plans keep their input order. The mapping iterates in
/// date order.
pub fn group_by_day(plans: &[MealPlan]) -> BTreeMap<NaiveDate, Vec<MealPlan>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<MealPlan>> = BTreeMap::new();
    for plan in plans {
        grouped.entry(plan.date).or_default().push(plan.clone());
    }
    grouped
}

/// Sort plans by meal type: breakfast, lunch, dinner, snack.
///
/// The sort is stable, so plans sharing a meal type keep their relative
/// order.
pub fn sort_by_meal_type(plans: &mut [MealPlan]) {
    plans.sort_by_key(|plan| plan.meal_type);
}

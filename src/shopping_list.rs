//! # Shopping List Builder
//!
//! Turns a set of selected dates into a shopping list: resolve each date's
//! meal plans, resolve each plan's recipe, flatten the ingredient lists,
//! classify every item into a department, and group for display.
//!
//! Duplicate ingredient names across recipes are NOT merged by default:
//! deciding that "2 cups flour" and "500g flour" are the same purchase is
//! unreliable across units, so the safe default is a longer list. An
//! opt-in merge mode combines only same-name items whose quantities
//! standardize to the same base unit.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use mealplanner::meal_plan::{MealPlan, MealType};
//! use mealplanner::recipe_model::{Ingredient, Recipe};
//! use mealplanner::shopping_list::ShoppingListBuilder;
//! use mealplanner::sources::InMemorySource;
//!
//! let mut source = InMemorySource::new();
//! let recipe = Recipe::new("Toast", "Breakfast")
//!     .with_ingredient(Ingredient::new("bread", "2 slices"));
//! let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
//! source.add_meal_plan(MealPlan::new(recipe.id, "Toast", date, MealType::Breakfast));
//! source.add_recipe(recipe);
//!
//! let items = ShoppingListBuilder::new().build(&[date], &source, &source);
//! assert_eq!(items.len(), 1);
//! assert_eq!(items[0].department.as_deref(), Some("Bakery"));
//! ```

use crate::classifier::{classify, OTHER_DEPARTMENT};
use crate::quantity;
use crate::sources::{MealPlanSource, RecipeSource};
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A single line on the shopping list.
///
/// Items are copies of recipe ingredients, not references: regenerating a
/// list recomputes items from scratch, and checking or removing an item
/// never touches the recipe it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: Uuid,
    pub name: String,

    /// Free-text quantity carried over from the source ingredient
    pub quantity: String,

    pub checked: bool,

    pub department: Option<String>,
}

impl ShoppingItem {
    pub fn new(name: &str, quantity: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            quantity: quantity.to_string(),
            checked: false,
            department: None,
        }
    }

    pub fn with_department(mut self, department: &str) -> Self {
        self.department = Some(department.to_string());
        self
    }
}

/// Builds shopping lists from selected dates and the plan/recipe sources
#[derive(Debug, Clone, Default)]
pub struct ShoppingListBuilder {
    merge_duplicates: bool,
}

impl ShoppingListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opt in to merging duplicate items.
    ///
    /// Merging combines items with the same case-insensitive name whose
    /// quantities standardize to the same base unit, summing the amounts.
    /// Items that differ in unit after standardization stay separate.
    pub fn merge_duplicates(mut self, merge: bool) -> Self {
        self.merge_duplicates = merge;
        self
    }

    /// Build a shopping list for the selected dates.
    ///
    /// For each date the meal plans are resolved, then each plan's recipe;
    /// plans referencing a deleted recipe are skipped silently. The
    /// resolved recipes' ingredients are flattened in recipe-then-ingredient
    /// order, each becoming one classified item. No side effects; the
    /// caller decides whether to persist the result.
    pub fn build(
        &self,
        dates: &[NaiveDate],
        plans: &impl MealPlanSource,
        recipes: &impl RecipeSource,
    ) -> Vec<ShoppingItem> {
        let mut items = Vec::new();
        let mut skipped = 0usize;

        for date in dates {
            for plan in plans.meal_plans_on(*date) {
                let Some(recipe) = recipes.recipe_by_id(plan.recipe_id) else {
                    debug!(
                        "skipping plan '{}' on {}: recipe no longer exists",
                        plan.recipe_name, date
                    );
                    skipped += 1;
                    continue;
                };

                for ingredient in &recipe.ingredients {
                    let item = ShoppingItem::new(&ingredient.name, &ingredient.quantity)
                        .with_department(classify(&ingredient.name));
                    items.push(item);
                }
            }
        }

        if skipped > 0 {
            info!("shopping list built with {} unresolvable plans skipped", skipped);
        }

        if self.merge_duplicates {
            items = merge_items(items);
        }

        info!("built shopping list with {} items", items.len());
        items
    }
}

/// Merge same-name items whose quantities standardize to the same unit.
///
/// Items keep first-occurrence order. A group merges only when every
/// member shares the standardized unit; mixed-unit groups are left intact.
fn merge_items(items: Vec<ShoppingItem>) -> Vec<ShoppingItem> {
    // Group by lowercased name, preserving first-seen order
    let mut order: Vec<String> = Vec::new();
    let mut groups: BTreeMap<String, Vec<ShoppingItem>> = BTreeMap::new();
    for item in items {
        let key = item.name.to_lowercase();
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(item);
    }

    let mut merged = Vec::new();
    for key in order {
        let group = groups.remove(&key).unwrap_or_default();
        if group.len() == 1 {
            merged.extend(group);
            continue;
        }

        let normalized: Vec<quantity::ParsedQuantity> = group
            .iter()
            .map(|item| quantity::normalize(&item.quantity))
            .collect();
        let unit = normalized[0].unit.clone();
        let uniform = normalized.iter().all(|q| q.unit == unit);

        if uniform {
            let total: f64 = normalized.iter().map(|q| q.amount).sum();
            debug!("merged {} '{}' entries into {} {}", group.len(), key, total, unit);
            let first = &group[0];
            merged.push(ShoppingItem {
                id: Uuid::new_v4(),
                name: first.name.clone(),
                quantity: format_quantity(total, &unit),
                checked: false,
                department: first.department.clone(),
            });
        } else {
            merged.extend(group);
        }
    }

    merged
}

fn format_quantity(amount: f64, unit: &str) -> String {
    let amount_text = if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{}", amount)
    };
    if unit.is_empty() {
        amount_text
    } else {
        format!("{} {}", amount_text, unit)
    }
}

/// Group items by department for display, department names ascending.
///
/// Every input item appears in exactly one group; items without a
/// department land under "Other". Item order within a department follows
/// the input order.
pub fn group_by_department(items: &[ShoppingItem]) -> BTreeMap<String, Vec<ShoppingItem>> {
    let mut grouped: BTreeMap<String, Vec<ShoppingItem>> = BTreeMap::new();
    for item in items {
        let department = item
            .department
            .clone()
            .unwrap_or_else(|| OTHER_DEPARTMENT.to_string());
        grouped.entry(department).or_default().push(item.clone());
    }
    grouped
}

//! # State Containers
//!
//! Explicit state containers updated through message dispatch. The pure
//! transformation functions stay in their own modules; these containers
//! call them and hold the results, so no UI-facing state is ever mutated
//! from inside the core.

use crate::meal_plan::MealPlan;
use crate::nutrition;
use crate::shopping_list::{group_by_department, ShoppingItem};
use crate::sources::RecipeSource;
use crate::user_profile::UserProfile;
use log::debug;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Messages that mutate a [`ShoppingListState`]
#[derive(Debug, Clone)]
pub enum ShoppingListAction {
    Add(ShoppingItem),
    /// Toggle the checked flag; reversible
    Toggle(Uuid),
    Remove(Uuid),
    /// Remove every checked item
    ClearChecked,
    /// Replace the whole list, e.g. after regenerating from new dates
    Regenerate(Vec<ShoppingItem>),
}

/// The current shopping list, mutated only through [`ShoppingListAction`]s
#[derive(Debug, Default)]
pub struct ShoppingListState {
    items: Vec<ShoppingItem>,
}

impl ShoppingListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn apply(&mut self, action: ShoppingListAction) {
        match action {
            ShoppingListAction::Add(item) => {
                debug!("adding item '{}'", item.name);
                self.items.push(item);
            }
            ShoppingListAction::Toggle(id) => {
                if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
                    item.checked = !item.checked;
                    debug!("toggled '{}' to checked={}", item.name, item.checked);
                }
            }
            ShoppingListAction::Remove(id) => {
                self.items.retain(|i| i.id != id);
            }
            ShoppingListAction::ClearChecked => {
                let before = self.items.len();
                self.items.retain(|i| !i.checked);
                debug!("cleared {} checked items", before - self.items.len());
            }
            ShoppingListAction::Regenerate(items) => {
                debug!("regenerating list with {} items", items.len());
                self.items = items;
            }
        }
    }

    /// Department-grouped view of the current items
    pub fn grouped(&self) -> BTreeMap<String, Vec<ShoppingItem>> {
        group_by_department(&self.items)
    }
}

/// Daily nutrition tracking against the user's calorie limit
#[derive(Debug)]
pub struct NutritionTracker {
    profile: UserProfile,
    consumed_calories: f64,
}

impl NutritionTracker {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            consumed_calories: 0.0,
        }
    }

    pub fn consumed_calories(&self) -> f64 {
        self.consumed_calories
    }

    /// Recompute consumed calories from the day's meal plans
    pub fn update_consumed(&mut self, plans: &[MealPlan], recipes: &impl RecipeSource) {
        self.consumed_calories = nutrition::consumed_calories(plans, recipes, &self.profile);
        debug!("consumed calories now {:.1}", self.consumed_calories);
    }

    pub fn is_within_limit(&self) -> bool {
        nutrition::within_limit(self.consumed_calories, self.profile.daily_calorie_limit)
    }
}

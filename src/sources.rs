//! # Collaborator Interfaces
//!
//! The aggregation core never talks to a backend directly. It consumes
//! three narrow, constructor-injected interfaces: meal plans for a date,
//! recipe resolution by id, and nutrition lookup by ingredient name. The
//! embedded store implements all three; [`InMemorySource`] is a fixture
//! implementation for tests and demos.
//!
//! Not-found is expressed in the return types (`Option`, empty `Vec`)
//! rather than errors; callers apply the silent-skip policy.

use crate::meal_plan::MealPlan;
use crate::recipe_model::{NutritionalInfo, Recipe};
use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

/// Supplies the meal plans scheduled on a given day
pub trait MealPlanSource {
    fn meal_plans_on(&self, date: NaiveDate) -> Vec<MealPlan>;
}

/// Resolves a recipe by id; `None` means the recipe no longer exists
pub trait RecipeSource {
    fn recipe_by_id(&self, id: Uuid) -> Option<Recipe>;
}

/// Looks up a nutrition estimate for an ingredient name
pub trait NutritionLookup {
    fn nutrition_for(&self, ingredient_name: &str) -> Option<NutritionalInfo>;
}

/// In-memory implementation of all three collaborator interfaces.
///
/// Nutrition lookups are keyed by lowercased ingredient name.
#[derive(Debug, Default)]
pub struct InMemorySource {
    recipes: HashMap<Uuid, Recipe>,
    plans: HashMap<NaiveDate, Vec<MealPlan>>,
    nutrition: HashMap<String, NutritionalInfo>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_recipe(&mut self, recipe: Recipe) {
        self.recipes.insert(recipe.id, recipe);
    }

    pub fn remove_recipe(&mut self, id: Uuid) -> Option<Recipe> {
        self.recipes.remove(&id)
    }

    pub fn add_meal_plan(&mut self, plan: MealPlan) {
        self.plans.entry(plan.date).or_default().push(plan);
    }

    pub fn set_nutrition(&mut self, ingredient_name: &str, nutrition: NutritionalInfo) {
        self.nutrition
            .insert(ingredient_name.to_lowercase(), nutrition);
    }
}

impl MealPlanSource for InMemorySource {
    fn meal_plans_on(&self, date: NaiveDate) -> Vec<MealPlan> {
        self.plans.get(&date).cloned().unwrap_or_default()
    }
}

impl RecipeSource for InMemorySource {
    fn recipe_by_id(&self, id: Uuid) -> Option<Recipe> {
        self.recipes.get(&id).cloned()
    }
}

impl NutritionLookup for InMemorySource {
    fn nutrition_for(&self, ingredient_name: &str) -> Option<NutritionalInfo> {
        self.nutrition.get(&ingredient_name.to_lowercase()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meal_plan::MealType;

    #[test]
    fn test_in_memory_round_trip() {
        let mut source = InMemorySource::new();

        let recipe = Recipe::new("Chili", "Dinner");
        let recipe_id = recipe.id;
        source.add_recipe(recipe);

        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        source.add_meal_plan(MealPlan::new(recipe_id, "Chili", date, MealType::Dinner));
        source.set_nutrition("Beans", NutritionalInfo::new(100.0, 6.0, 18.0, 0.5, 7.0));

        assert!(source.recipe_by_id(recipe_id).is_some());
        assert_eq!(source.meal_plans_on(date).len(), 1);
        assert!(source.nutrition_for("beans").is_some());
        assert!(source.nutrition_for("BEANS").is_some());
    }

    #[test]
    fn test_not_found_is_empty_not_error() {
        let source = InMemorySource::new();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        assert!(source.recipe_by_id(Uuid::new_v4()).is_none());
        assert!(source.meal_plans_on(date).is_empty());
        assert!(source.nutrition_for("nothing").is_none());
    }

    #[test]
    fn test_remove_recipe() {
        let mut source = InMemorySource::new();
        let recipe = Recipe::new("Stew", "Dinner");
        let id = recipe.id;
        source.add_recipe(recipe);

        assert!(source.remove_recipe(id).is_some());
        assert!(source.recipe_by_id(id).is_none());
    }
}

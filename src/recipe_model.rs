//! # Recipe and Ingredient Data Model
//!
//! This module defines the data structures for recipes, their ingredients,
//! and nutrition estimates. Recipes own their ingredient lists; ingredients
//! are created as part of recipe authoring and die with the recipe.
//!
//! ## Core Concepts
//!
//! - **Ingredient**: a named item with a free-text quantity ("2 cups") and
//!   an optional nutrition estimate
//! - **Recipe**: a named, categorized collection of ingredients and
//!   instruction steps, with favorite flag and timestamps
//! - **NutritionalInfo**: five non-negative fields accumulated only by
//!   addition
//!
//! ## Usage
//!
//! ```rust
//! use mealplanner::recipe_model::{Ingredient, Recipe};
//!
//! let recipe = Recipe::new("Pancakes", "Breakfast")
//!     .with_ingredient(Ingredient::new("flour", "2 cups"))
//!     .with_ingredient(Ingredient::new("milk", "250 ml"))
//!     .with_instruction("Whisk and fry.");
//!
//! assert_eq!(recipe.ingredients.len(), 2);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use uuid::Uuid;

/// A single ingredient belonging to a recipe.
///
/// The quantity is kept as free text ("2 cups", "1 pinch"); parsing and
/// standardization live in the `quantity` module and are applied on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Stable identity of this ingredient within its recipe
    pub id: Uuid,

    /// The name of the ingredient (e.g., "flour", "olive oil")
    pub name: String,

    /// Free-text amount and unit (e.g., "2 cups", "500g")
    pub quantity: String,

    /// Optional per-ingredient nutrition estimate
    pub nutrition: Option<NutritionalInfo>,
}

impl Ingredient {
    /// Create a new ingredient with a name and a free-text quantity
    pub fn new(name: &str, quantity: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            quantity: quantity.to_string(),
            nutrition: None,
        }
    }

    /// Attach a nutrition estimate to this ingredient
    pub fn with_nutrition(mut self, nutrition: NutritionalInfo) -> Self {
        self.nutrition = Some(nutrition);
        self
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quantity.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.quantity, self.name)
        }
    }
}

/// Per-recipe or per-day nutrition totals.
///
/// All fields are non-negative; aggregation only ever adds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionalInfo {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

impl NutritionalInfo {
    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64, fiber: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
            fiber,
        }
    }

    /// The additive identity, used as the starting point for aggregation
    pub fn zero() -> Self {
        Self::default()
    }
}

impl Add for NutritionalInfo {
    type Output = NutritionalInfo;

    fn add(self, other: NutritionalInfo) -> NutritionalInfo {
        NutritionalInfo {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
            fiber: self.fiber + other.fiber,
        }
    }
}

impl Sum for NutritionalInfo {
    fn sum<I: Iterator<Item = NutritionalInfo>>(iter: I) -> Self {
        iter.fold(NutritionalInfo::zero(), |acc, n| acc + n)
    }
}

impl fmt::Display for NutritionalInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} kcal ({:.1}g protein, {:.1}g carbs, {:.1}g fat, {:.1}g fiber)",
            self.calories, self.protein, self.carbs, self.fat, self.fiber
        )
    }
}

/// A recipe with its owned ingredient list and instruction steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,

    /// Display category (e.g., "Breakfast", "Dessert")
    pub category: String,

    pub description: String,

    /// Ordered ingredient list, owned by this recipe
    pub ingredients: Vec<Ingredient>,

    /// Ordered instruction steps
    pub instructions: Vec<String>,

    /// Reference to an externally stored photo, if any
    pub photo_url: Option<String>,

    pub favorite: bool,

    /// Precomputed nutrition summary, if one has been aggregated
    pub nutrition: Option<NutritionalInfo>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(name: &str, category: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: category.to_string(),
            description: String::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            photo_url: None,
            favorite: false,
            nutrition: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    pub fn with_instruction(mut self, step: &str) -> Self {
        self.instructions.push(step.to_string());
        self
    }

    pub fn with_photo_url(mut self, url: &str) -> Self {
        self.photo_url = Some(url.to_string());
        self
    }

    pub fn with_nutrition(mut self, nutrition: NutritionalInfo) -> Self {
        self.nutrition = Some(nutrition);
        self
    }

    /// Record a mutation by bumping the updated timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Filter recipes down to those cookable from the given pantry contents.
///
/// A recipe qualifies when every one of its ingredient names matches a
/// pantry entry case-insensitively. An optional category filter restricts
/// the result further (also case-insensitive).
pub fn recipes_cookable_from<'a>(
    recipes: &'a [Recipe],
    pantry: &[String],
    category: Option<&str>,
) -> Vec<&'a Recipe> {
    let pantry_lower: Vec<String> = pantry.iter().map(|p| p.to_lowercase()).collect();

    recipes
        .iter()
        .filter(|recipe| {
            let has_all = recipe
                .ingredients
                .iter()
                .all(|i| pantry_lower.contains(&i.name.to_lowercase()));
            match category {
                Some(c) if !c.is_empty() => {
                    has_all && recipe.category.to_lowercase() == c.to_lowercase()
                }
                _ => has_all,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_creation() {
        let ingredient = Ingredient::new("flour", "2 cups")
            .with_nutrition(NutritionalInfo::new(455.0, 13.0, 95.0, 1.2, 3.4));

        assert_eq!(ingredient.name, "flour");
        assert_eq!(ingredient.quantity, "2 cups");
        assert!(ingredient.nutrition.is_some());
    }

    #[test]
    fn test_ingredient_display() {
        let ingredient = Ingredient::new("butter", "500g");
        assert_eq!(format!("{}", ingredient), "500g butter");

        let bare = Ingredient::new("salt", "");
        assert_eq!(format!("{}", bare), "salt");
    }

    #[test]
    fn test_nutrition_addition() {
        let a = NutritionalInfo::new(100.0, 10.0, 20.0, 5.0, 2.0);
        let b = NutritionalInfo::new(50.0, 5.0, 10.0, 2.5, 1.0);

        let total = a + b;
        assert_eq!(total.calories, 150.0);
        assert_eq!(total.protein, 15.0);
        assert_eq!(total.carbs, 30.0);
        assert_eq!(total.fat, 7.5);
        assert_eq!(total.fiber, 3.0);
    }

    #[test]
    fn test_nutrition_sum() {
        let parts = vec![
            NutritionalInfo::new(100.0, 1.0, 1.0, 1.0, 1.0),
            NutritionalInfo::new(200.0, 2.0, 2.0, 2.0, 2.0),
            NutritionalInfo::new(300.0, 3.0, 3.0, 3.0, 3.0),
        ];

        let total: NutritionalInfo = parts.into_iter().sum();
        assert_eq!(total.calories, 600.0);
        assert_eq!(total.fiber, 6.0);
    }

    #[test]
    fn test_recipe_builder() {
        let recipe = Recipe::new("Omelette", "Breakfast")
            .with_description("Three-egg omelette")
            .with_ingredient(Ingredient::new("eggs", "3"))
            .with_ingredient(Ingredient::new("butter", "1 tbsp"))
            .with_instruction("Beat the eggs.")
            .with_instruction("Cook in butter.");

        assert_eq!(recipe.name, "Omelette");
        assert_eq!(recipe.category, "Breakfast");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.instructions.len(), 2);
        assert!(!recipe.favorite);
        assert!(recipe.nutrition.is_none());
    }

    #[test]
    fn test_recipe_touch_updates_timestamp() {
        let mut recipe = Recipe::new("Toast", "Breakfast");
        let created = recipe.updated_at;
        recipe.touch();
        assert!(recipe.updated_at >= created);
    }

    #[test]
    fn test_recipe_serde_round_trip() {
        let recipe = Recipe::new("Soup", "Dinner")
            .with_ingredient(Ingredient::new("carrots", "3"))
            .with_nutrition(NutritionalInfo::new(120.0, 2.0, 25.0, 0.5, 6.0));

        let json = serde_json::to_string(&recipe).unwrap();
        let back: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(back, recipe);
    }

    #[test]
    fn test_cookable_from_pantry() {
        let recipes = vec![
            Recipe::new("Scrambled Eggs", "Breakfast")
                .with_ingredient(Ingredient::new("Eggs", "3"))
                .with_ingredient(Ingredient::new("Butter", "1 tbsp")),
            Recipe::new("Pasta", "Dinner")
                .with_ingredient(Ingredient::new("spaghetti", "200g"))
                .with_ingredient(Ingredient::new("tomato sauce", "1 cup")),
        ];
        let pantry = vec!["eggs".to_string(), "butter".to_string()];

        let cookable = recipes_cookable_from(&recipes, &pantry, None);
        assert_eq!(cookable.len(), 1);
        assert_eq!(cookable[0].name, "Scrambled Eggs");
    }

    #[test]
    fn test_cookable_with_category_filter() {
        let recipes = vec![
            Recipe::new("Scrambled Eggs", "Breakfast").with_ingredient(Ingredient::new("eggs", "3")),
            Recipe::new("Egg Salad", "Lunch").with_ingredient(Ingredient::new("eggs", "4")),
        ];
        let pantry = vec!["eggs".to_string()];

        let breakfast = recipes_cookable_from(&recipes, &pantry, Some("breakfast"));
        assert_eq!(breakfast.len(), 1);
        assert_eq!(breakfast[0].name, "Scrambled Eggs");

        let all = recipes_cookable_from(&recipes, &pantry, Some(""));
        assert_eq!(all.len(), 2);
    }
}

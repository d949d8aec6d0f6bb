//! Walkthrough of the planning flow: seed a few recipes and meal plans,
//! group the plans by day, build the week's shopping list, and report the
//! day's nutrition against the user's calorie limit.
//!
//! Run with `cargo run --example weekly_shopping` (set `RUST_LOG=debug` for
//! the internals).

use chrono::NaiveDate;
use mealplanner::meal_plan::{self, MealPlan, MealType};
use mealplanner::nutrition;
use mealplanner::recipe_model::{Ingredient, NutritionalInfo, Recipe};
use mealplanner::shopping_list::{group_by_department, ShoppingListBuilder};
use mealplanner::sources::{InMemorySource, MealPlanSource};
use mealplanner::user_profile::UserProfile;

fn main() {
    env_logger::init();

    let mut source = InMemorySource::new();

    let pancakes = Recipe::new("Pancakes", "Breakfast")
        .with_ingredient(Ingredient::new("flour", "2 cups"))
        .with_ingredient(Ingredient::new("milk", "250 ml"))
        .with_ingredient(Ingredient::new("eggs", "2"))
        .with_nutrition(NutritionalInfo::new(520.0, 14.0, 90.0, 10.0, 3.0));

    let stir_fry = Recipe::new("Chicken Stir Fry", "Dinner")
        .with_ingredient(Ingredient::new("chicken breast", "500g"))
        .with_ingredient(Ingredient::new("broccoli", "1 head"))
        .with_ingredient(Ingredient::new("soy sauce", "3 tbsp"))
        .with_nutrition(NutritionalInfo::new(680.0, 55.0, 30.0, 22.0, 6.0));

    let monday = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    let tuesday = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();

    let mut plans = vec![
        MealPlan::new(stir_fry.id, &stir_fry.name, monday, MealType::Dinner),
        MealPlan::new(pancakes.id, &pancakes.name, monday, MealType::Breakfast),
        MealPlan::new(pancakes.id, &pancakes.name, tuesday, MealType::Breakfast),
    ];

    for plan in &plans {
        source.add_meal_plan(plan.clone());
    }
    source.add_recipe(pancakes);
    source.add_recipe(stir_fry);

    println!("== Week plan ==");
    meal_plan::sort_by_meal_type(&mut plans);
    for (day, day_plans) in meal_plan::group_by_day(&plans) {
        println!("{}:", day);
        for plan in day_plans {
            println!("  {} - {}", plan.meal_type, plan.recipe_name);
        }
    }

    println!("\n== Shopping list ==");
    let items = ShoppingListBuilder::new().build(&[monday, tuesday], &source, &source);
    for (department, department_items) in group_by_department(&items) {
        println!("{}:", department);
        for item in department_items {
            println!("  [{}] {} {}", if item.checked { "x" } else { " " }, item.quantity, item.name);
        }
    }

    println!("\n== Monday nutrition ==");
    let profile = UserProfile::new("demo", "demo@example.com").with_sex("female");
    let monday_plans = source.meal_plans_on(monday);
    let consumed = nutrition::consumed_calories(&monday_plans, &source, &profile);
    println!(
        "{:.0} kcal consumed, limit {:.0}, within limit: {}",
        consumed,
        profile.daily_calorie_limit,
        nutrition::within_limit(consumed, profile.daily_calorie_limit)
    );
}

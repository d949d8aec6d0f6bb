//! User-level settings that parameterize nutrition aggregation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's profile and dietary preferences.
///
/// The defaults mirror the application's fallbacks: no diet preference,
/// male, metric, 2000 kcal daily limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,

    /// Diet preference (e.g., "vegan", "keto"); adjusts calorie totals
    pub diet_preference: Option<String>,

    /// Sex (e.g., "male", "female"); adjusts calorie totals
    pub sex: Option<String>,

    /// Measurement system preference ("metric" or "imperial")
    pub measurement_system: Option<String>,

    pub daily_calorie_limit: f64,

    pub favorite_recipe_ids: Vec<Uuid>,
}

impl UserProfile {
    pub fn new(id: &str, email: &str) -> Self {
        Self {
            id: id.to_string(),
            email: email.to_string(),
            display_name: None,
            diet_preference: None,
            sex: None,
            measurement_system: None,
            daily_calorie_limit: 2000.0,
            favorite_recipe_ids: Vec::new(),
        }
    }

    pub fn with_diet_preference(mut self, diet: &str) -> Self {
        self.diet_preference = Some(diet.to_string());
        self
    }

    pub fn with_sex(mut self, sex: &str) -> Self {
        self.sex = Some(sex.to_string());
        self
    }

    pub fn with_daily_calorie_limit(mut self, limit: f64) -> Self {
        self.daily_calorie_limit = limit;
        self
    }

    /// Diet preference with the application default applied
    pub fn diet_preference(&self) -> &str {
        self.diet_preference.as_deref().unwrap_or("none")
    }

    /// Sex with the application default applied
    pub fn sex(&self) -> &str {
        self.sex.as_deref().unwrap_or("male")
    }

    pub fn is_favorite(&self, recipe_id: Uuid) -> bool {
        self.favorite_recipe_ids.contains(&recipe_id)
    }
}

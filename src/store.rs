//! # Embedded Recipe Store
//!
//! SQLite persistence for recipes, meal plans, and shopping items, with a
//! full-text index over recipe names and descriptions.
//!
//! Ingredient and instruction lists are embedded in their recipe row as
//! JSON columns; recipes own their ingredients, so nothing is gained by
//! normalizing them out. The [`Store`] wrapper implements the collaborator
//! traits consumed by the aggregation core.

use crate::meal_plan::{MealPlan, MealType};
use crate::recipe_model::{NutritionalInfo, Recipe};
use crate::shopping_list::ShoppingItem;
use crate::sources::{MealPlanSource, RecipeSource};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use log::{error, info};
use rusqlite::{params, Connection};
use std::path::Path;
use uuid::Uuid;

/// Initialize the database schema
pub fn init_database_schema(conn: &Connection) -> Result<()> {
    info!("Initializing database schema...");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS recipes (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            description TEXT NOT NULL,
            ingredients TEXT NOT NULL,
            instructions TEXT NOT NULL,
            photo_url TEXT,
            favorite INTEGER NOT NULL DEFAULT 0,
            nutrition TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )
    .context("Failed to create recipes table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS meal_plans (
            id TEXT PRIMARY KEY,
            recipe_id TEXT NOT NULL,
            recipe_name TEXT NOT NULL,
            date TEXT NOT NULL,
            meal_type TEXT NOT NULL,
            notes TEXT
        )",
        [],
    )
    .context("Failed to create meal_plans table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS shopping_items (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            quantity TEXT NOT NULL,
            checked INTEGER NOT NULL DEFAULT 0,
            department TEXT
        )",
        [],
    )
    .context("Failed to create shopping_items table")?;

    // FTS virtual table for recipe search
    conn.execute(
        "CREATE VIRTUAL TABLE IF NOT EXISTS recipes_fts USING fts5(
            name,
            description,
            content='recipes'
        )",
        [],
    )
    .context("Failed to create FTS table")?;

    // Triggers to keep the FTS table in sync
    conn.execute(
        "CREATE TRIGGER IF NOT EXISTS recipes_insert AFTER INSERT ON recipes
         BEGIN
             INSERT INTO recipes_fts(rowid, name, description)
             VALUES (new.rowid, new.name, new.description);
         END",
        [],
    )
    .context("Failed to create insert trigger")?;

    conn.execute(
        "CREATE TRIGGER IF NOT EXISTS recipes_delete AFTER DELETE ON recipes
         BEGIN
             INSERT INTO recipes_fts(recipes_fts, rowid, name, description)
             VALUES ('delete', old.rowid, old.name, old.description);
         END",
        [],
    )
    .context("Failed to create delete trigger")?;

    conn.execute(
        "CREATE TRIGGER IF NOT EXISTS recipes_update AFTER UPDATE ON recipes
         BEGIN
             INSERT INTO recipes_fts(recipes_fts, rowid, name, description)
             VALUES ('delete', old.rowid, old.name, old.description);
             INSERT INTO recipes_fts(rowid, name, description)
             VALUES (new.rowid, new.name, new.description);
         END",
        [],
    )
    .context("Failed to create update trigger")?;

    info!("Database schema initialized");
    Ok(())
}

/// Insert a recipe into the store
pub fn create_recipe(conn: &Connection, recipe: &Recipe) -> Result<()> {
    info!("Creating recipe '{}' ({})", recipe.name, recipe.id);

    conn.execute(
        "INSERT INTO recipes (id, name, category, description, ingredients, instructions,
                              photo_url, favorite, nutrition, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            recipe.id.to_string(),
            recipe.name,
            recipe.category,
            recipe.description,
            serde_json::to_string(&recipe.ingredients)
                .context("Failed to serialize ingredients")?,
            serde_json::to_string(&recipe.instructions)
                .context("Failed to serialize instructions")?,
            recipe.photo_url,
            recipe.favorite,
            match &recipe.nutrition {
                Some(n) => Some(
                    serde_json::to_string(n).context("Failed to serialize nutrition")?
                ),
                None => None,
            },
            recipe.created_at.to_rfc3339(),
            recipe.updated_at.to_rfc3339(),
        ],
    )
    .context("Failed to insert recipe")?;

    Ok(())
}

/// Raw recipe columns as read from a row, converted after the query
struct RecipeRow {
    id: String,
    name: String,
    category: String,
    description: String,
    ingredients: String,
    instructions: String,
    photo_url: Option<String>,
    favorite: bool,
    nutrition: Option<String>,
    created_at: String,
    updated_at: String,
}

const RECIPE_COLUMNS: &str = "id, name, category, description, ingredients, instructions, \
                              photo_url, favorite, nutrition, created_at, updated_at";

fn read_recipe_row(row: &rusqlite::Row) -> rusqlite::Result<RecipeRow> {
    Ok(RecipeRow {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        description: row.get(3)?,
        ingredients: row.get(4)?,
        instructions: row.get(5)?,
        photo_url: row.get(6)?,
        favorite: row.get(7)?,
        nutrition: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(text)
        .with_context(|| format!("Invalid timestamp: {}", text))?;
    Ok(parsed.with_timezone(&Utc))
}

fn recipe_from_row(row: RecipeRow) -> Result<Recipe> {
    let nutrition: Option<NutritionalInfo> = match row.nutrition {
        Some(text) => Some(serde_json::from_str(&text).context("Invalid nutrition JSON")?),
        None => None,
    };

    Ok(Recipe {
        id: Uuid::parse_str(&row.id).context("Invalid recipe id")?,
        name: row.name,
        category: row.category,
        description: row.description,
        ingredients: serde_json::from_str(&row.ingredients).context("Invalid ingredients JSON")?,
        instructions: serde_json::from_str(&row.instructions)
            .context("Invalid instructions JSON")?,
        photo_url: row.photo_url,
        favorite: row.favorite,
        nutrition,
        created_at: parse_timestamp(&row.created_at)?,
        updated_at: parse_timestamp(&row.updated_at)?,
    })
}

/// Read a recipe by id
pub fn get_recipe(conn: &Connection, id: Uuid) -> Result<Option<Recipe>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {} FROM recipes WHERE id = ?1", RECIPE_COLUMNS))
        .context("Failed to prepare recipe read statement")?;

    let row = stmt.query_row(params![id.to_string()], read_recipe_row);

    match row {
        Ok(row) => Ok(Some(recipe_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e).context("Failed to read recipe"),
    }
}

/// List all recipes, name ascending
pub fn list_recipes(conn: &Connection) -> Result<Vec<Recipe>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM recipes ORDER BY name COLLATE NOCASE",
            RECIPE_COLUMNS
        ))
        .context("Failed to prepare recipe list statement")?;

    let rows = stmt
        .query_map([], read_recipe_row)
        .context("Failed to query recipes")?;

    let mut recipes = Vec::new();
    for row in rows {
        recipes.push(recipe_from_row(row.context("Failed to read recipe row")?)?);
    }
    Ok(recipes)
}

/// Update an existing recipe. Returns false when the id is unknown.
pub fn update_recipe(conn: &Connection, recipe: &Recipe) -> Result<bool> {
    info!("Updating recipe '{}' ({})", recipe.name, recipe.id);

    let rows_affected = conn
        .execute(
            "UPDATE recipes
             SET name = ?2, category = ?3, description = ?4, ingredients = ?5,
                 instructions = ?6, photo_url = ?7, favorite = ?8, nutrition = ?9,
                 updated_at = ?10
             WHERE id = ?1",
            params![
                recipe.id.to_string(),
                recipe.name,
                recipe.category,
                recipe.description,
                serde_json::to_string(&recipe.ingredients)
                    .context("Failed to serialize ingredients")?,
                serde_json::to_string(&recipe.instructions)
                    .context("Failed to serialize instructions")?,
                recipe.photo_url,
                recipe.favorite,
                match &recipe.nutrition {
                    Some(n) => Some(
                        serde_json::to_string(n).context("Failed to serialize nutrition")?
                    ),
                    None => None,
                },
                recipe.updated_at.to_rfc3339(),
            ],
        )
        .context("Failed to update recipe")?;

    Ok(rows_affected > 0)
}

/// Delete a recipe. Returns false when the id is unknown.
pub fn delete_recipe(conn: &Connection, id: Uuid) -> Result<bool> {
    info!("Deleting recipe {}", id);

    let rows_affected = conn
        .execute("DELETE FROM recipes WHERE id = ?1", params![id.to_string()])
        .context("Failed to delete recipe")?;

    Ok(rows_affected > 0)
}

/// Set or clear the favorite flag. Returns false when the id is unknown.
pub fn set_recipe_favorite(conn: &Connection, id: Uuid, favorite: bool) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "UPDATE recipes SET favorite = ?2 WHERE id = ?1",
            params![id.to_string(), favorite],
        )
        .context("Failed to set favorite flag")?;

    Ok(rows_affected > 0)
}

/// Full-text search over recipe names and descriptions
pub fn search_recipes(conn: &Connection, query: &str) -> Result<Vec<Recipe>> {
    info!("Searching recipes for '{}'", query);

    // Qualify the column list with the `recipes.` table prefix: `recipes_fts`
    // also exposes `name` and `description`, so an unqualified SELECT over the
    // join is ambiguous. Column selection and order are unchanged.
    let qualified_columns = RECIPE_COLUMNS
        .split(',')
        .map(|c| format!("recipes.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ");
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM recipes
             JOIN recipes_fts ON recipes_fts.rowid = recipes.rowid
             WHERE recipes_fts MATCH ?1
             ORDER BY rank",
            qualified_columns
        ))
        .context("Failed to prepare search statement")?;

    let rows = stmt
        .query_map(params![query], read_recipe_row)
        .context("Failed to run recipe search")?;

    let mut recipes = Vec::new();
    for row in rows {
        recipes.push(recipe_from_row(row.context("Failed to read search row")?)?);
    }

    info!("Search for '{}' returned {} recipes", query, recipes.len());
    Ok(recipes)
}

/// Insert a meal plan
pub fn create_meal_plan(conn: &Connection, plan: &MealPlan) -> Result<()> {
    info!(
        "Creating meal plan '{}' on {} ({})",
        plan.recipe_name, plan.date, plan.meal_type
    );

    conn.execute(
        "INSERT INTO meal_plans (id, recipe_id, recipe_name, date, meal_type, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            plan.id.to_string(),
            plan.recipe_id.to_string(),
            plan.recipe_name,
            plan.date.to_string(),
            plan.meal_type.as_str(),
            plan.notes,
        ],
    )
    .context("Failed to insert meal plan")?;

    Ok(())
}

/// All meal plans on a given day, in insertion order
pub fn meal_plans_on_date(conn: &Connection, date: NaiveDate) -> Result<Vec<MealPlan>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, recipe_id, recipe_name, date, meal_type, notes
             FROM meal_plans WHERE date = ?1 ORDER BY rowid",
        )
        .context("Failed to prepare meal plan statement")?;

    let rows = stmt
        .query_map(params![date.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, Option<String>>(5)?,
            ))
        })
        .context("Failed to query meal plans")?;

    let mut plans = Vec::new();
    for row in rows {
        let (id, recipe_id, recipe_name, date_text, meal_type, notes) =
            row.context("Failed to read meal plan row")?;
        plans.push(MealPlan {
            id: Uuid::parse_str(&id).context("Invalid meal plan id")?,
            recipe_id: Uuid::parse_str(&recipe_id).context("Invalid recipe id")?,
            recipe_name,
            date: NaiveDate::parse_from_str(&date_text, "%Y-%m-%d")
                .with_context(|| format!("Invalid meal plan date: {}", date_text))?,
            meal_type: MealType::parse(&meal_type),
            notes,
        });
    }
    Ok(plans)
}

/// Delete a meal plan. Returns false when the id is unknown.
pub fn delete_meal_plan(conn: &Connection, id: Uuid) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "DELETE FROM meal_plans WHERE id = ?1",
            params![id.to_string()],
        )
        .context("Failed to delete meal plan")?;

    Ok(rows_affected > 0)
}

/// Replace the persisted shopping list wholesale.
///
/// Regeneration recomputes items from scratch, so the previous list is
/// dropped rather than patched.
pub fn replace_shopping_items(conn: &mut Connection, items: &[ShoppingItem]) -> Result<()> {
    info!("Replacing shopping list with {} items", items.len());

    let tx = conn
        .transaction()
        .context("Failed to start shopping list transaction")?;

    tx.execute("DELETE FROM shopping_items", [])
        .context("Failed to clear shopping items")?;

    for item in items {
        tx.execute(
            "INSERT INTO shopping_items (id, name, quantity, checked, department)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                item.id.to_string(),
                item.name,
                item.quantity,
                item.checked,
                item.department,
            ],
        )
        .context("Failed to insert shopping item")?;
    }

    tx.commit().context("Failed to commit shopping list")?;
    Ok(())
}

/// All persisted shopping items, in insertion order
pub fn list_shopping_items(conn: &Connection) -> Result<Vec<ShoppingItem>> {
    let mut stmt = conn
        .prepare("SELECT id, name, quantity, checked, department FROM shopping_items ORDER BY rowid")
        .context("Failed to prepare shopping item statement")?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, bool>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })
        .context("Failed to query shopping items")?;

    let mut items = Vec::new();
    for row in rows {
        let (id, name, quantity, checked, department) =
            row.context("Failed to read shopping item row")?;
        items.push(ShoppingItem {
            id: Uuid::parse_str(&id).context("Invalid shopping item id")?,
            name,
            quantity,
            checked,
            department,
        });
    }
    Ok(items)
}

/// Set an item's checked flag. Returns false when the id is unknown.
pub fn set_item_checked(conn: &Connection, id: Uuid, checked: bool) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "UPDATE shopping_items SET checked = ?2 WHERE id = ?1",
            params![id.to_string(), checked],
        )
        .context("Failed to set checked flag")?;

    Ok(rows_affected > 0)
}

/// Delete every checked item, returning how many were removed
pub fn clear_checked_items(conn: &Connection) -> Result<usize> {
    let removed = conn
        .execute("DELETE FROM shopping_items WHERE checked = 1", [])
        .context("Failed to clear checked items")?;

    info!("Cleared {} checked items", removed);
    Ok(removed)
}

/// Connection wrapper implementing the collaborator interfaces.
///
/// The trait methods are infallible by contract, so storage failures are
/// logged and surface as empty results; the fallible API is the
/// free-function CRUD layer.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path).context("Failed to open database")?;
        init_database_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        init_database_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

impl MealPlanSource for Store {
    fn meal_plans_on(&self, date: NaiveDate) -> Vec<MealPlan> {
        match meal_plans_on_date(&self.conn, date) {
            Ok(plans) => plans,
            Err(e) => {
                error!("failed to load meal plans for {}: {:#}", date, e);
                Vec::new()
            }
        }
    }
}

impl RecipeSource for Store {
    fn recipe_by_id(&self, id: Uuid) -> Option<Recipe> {
        match get_recipe(&self.conn, id) {
            Ok(recipe) => recipe,
            Err(e) => {
                error!("failed to load recipe {}: {:#}", id, e);
                None
            }
        }
    }
}

//! Template phases: ordered groupings of template tasks within a recipe.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecipePhase {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    /// Unique within the owning recipe.
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New RecipePhase for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipePhase {
    pub recipe_id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub sort_order: i32,
}

impl RecipePhase {
    pub async fn create(pool: &PgPool, new_phase: NewRecipePhase) -> Result<RecipePhase, sqlx::Error> {
        sqlx::query_as::<_, RecipePhase>(
            r#"
            INSERT INTO recipe_phases (id, recipe_id, name, icon, sort_order, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING id, recipe_id, name, icon, sort_order, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_phase.recipe_id)
        .bind(new_phase.name)
        .bind(new_phase.icon)
        .bind(new_phase.sort_order)
        .fetch_one(pool)
        .await
    }

    /// List a recipe's phases in presentation/generation order.
    pub async fn list_for_recipe(pool: &PgPool, recipe_id: Uuid) -> Result<Vec<RecipePhase>, sqlx::Error> {
        sqlx::query_as::<_, RecipePhase>(
            r#"
            SELECT id, recipe_id, name, icon, sort_order, created_at, updated_at
            FROM recipe_phases
            WHERE recipe_id = $1
            ORDER BY sort_order
            "#,
        )
        .bind(recipe_id)
        .fetch_all(pool)
        .await
    }
}

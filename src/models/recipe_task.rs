//! # Recipe Task
//!
//! Template task definitions inside a recipe phase. Each template task points
//! at an SOP for its default attributes and may carry:
//!
//! - a nullable title override, possibly containing a `{page}` placeholder
//! - an `is_variable` flag: variable tasks are expanded once per selected
//!   site page at generation time instead of created once (the flag only
//!   takes effect together with a `variable_source`)
//! - `depends_on_ids`: ids of other template tasks in the same recipe that
//!   must complete first (cross-phase references allowed)
//!
//! The directed graph formed by `depends_on_ids` over a recipe's template
//! tasks must stay acyclic; [`crate::graph::would_create_cycle`] is the sole
//! enforcement point and must be consulted before every edge addition.
//! `set_depends_on` persists whatever it is given; callers own the guard.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::constants::VariableSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecipeTask {
    pub id: Uuid,
    pub recipe_phase_id: Uuid,
    pub sop_id: Uuid,
    /// Title override; `None` falls back to the SOP title at generation time.
    pub title: Option<String>,
    pub is_variable: bool,
    pub variable_source: Option<VariableSource>,
    pub depends_on_ids: Vec<Uuid>,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New RecipeTask for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipeTask {
    pub recipe_phase_id: Uuid,
    pub sop_id: Uuid,
    pub title: Option<String>,
    pub is_variable: bool,
    pub variable_source: Option<VariableSource>,
    pub depends_on_ids: Vec<Uuid>,
    pub sort_order: i32,
}

impl RecipeTask {
    pub async fn create(pool: &PgPool, new_task: NewRecipeTask) -> Result<RecipeTask, sqlx::Error> {
        sqlx::query_as::<_, RecipeTask>(
            r#"
            INSERT INTO recipe_tasks (id, recipe_phase_id, sop_id, title, is_variable,
                                      variable_source, depends_on_ids, sort_order, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            RETURNING id, recipe_phase_id, sop_id, title, is_variable,
                      variable_source, depends_on_ids, sort_order, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_task.recipe_phase_id)
        .bind(new_task.sop_id)
        .bind(new_task.title)
        .bind(new_task.is_variable)
        .bind(new_task.variable_source)
        .bind(new_task.depends_on_ids)
        .bind(new_task.sort_order)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<RecipeTask>, sqlx::Error> {
        sqlx::query_as::<_, RecipeTask>(
            r#"
            SELECT id, recipe_phase_id, sop_id, title, is_variable,
                   variable_source, depends_on_ids, sort_order, created_at, updated_at
            FROM recipe_tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List a phase's template tasks in generation order.
    pub async fn list_for_phase(
        pool: &PgPool,
        recipe_phase_id: Uuid,
    ) -> Result<Vec<RecipeTask>, sqlx::Error> {
        sqlx::query_as::<_, RecipeTask>(
            r#"
            SELECT id, recipe_phase_id, sop_id, title, is_variable,
                   variable_source, depends_on_ids, sort_order, created_at, updated_at
            FROM recipe_tasks
            WHERE recipe_phase_id = $1
            ORDER BY sort_order
            "#,
        )
        .bind(recipe_phase_id)
        .fetch_all(pool)
        .await
    }

    /// Persist an edited dependency list for this template task.
    ///
    /// Callers must have validated the edit with the cycle guard; this method
    /// writes whatever it is given.
    pub async fn set_depends_on(
        pool: &PgPool,
        id: Uuid,
        depends_on_ids: &[Uuid],
    ) -> Result<RecipeTask, sqlx::Error> {
        sqlx::query_as::<_, RecipeTask>(
            r#"
            UPDATE recipe_tasks
            SET depends_on_ids = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, recipe_phase_id, sop_id, title, is_variable,
                      variable_source, depends_on_ids, sort_order, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(depends_on_ids)
        .fetch_one(pool)
        .await
    }
}

//! # Recipe
//!
//! Recipes are reusable project templates: ordered phases of template tasks,
//! each backed by an SOP. The generation engine never reads recipe rows
//! piecemeal; it consumes a [`RecipeSnapshot`], a read-only load of the full
//! template graph in a stable order:
//!
//! - phases ordered by `sort_order`
//! - template tasks ordered by `sort_order` within their phase
//! - each task paired with its resolved SOP (`Option`; a missing SOP is a
//!   fatal configuration error surfaced during planning, not here)
//!
//! Snapshots have no further link to the live rows; recipe edits after a
//! snapshot is taken never affect a generation run already using it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::constants::ProjectType;

use super::recipe_phase::RecipePhase;
use super::recipe_task::RecipeTask;
use super::sop::Sop;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Copied onto generated projects as their type.
    pub default_type: ProjectType,
    /// Inactive recipes are rejected by the generation engine.
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New Recipe for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub description: Option<String>,
    pub default_type: ProjectType,
}

/// A template task paired with its resolved SOP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateTask {
    pub task: RecipeTask,
    pub sop: Option<Sop>,
}

/// A template phase with its tasks in generation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseSnapshot {
    pub phase: RecipePhase,
    pub tasks: Vec<TemplateTask>,
}

/// Read-only view of a full recipe template graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSnapshot {
    pub recipe: Recipe,
    pub phases: Vec<PhaseSnapshot>,
}

impl Recipe {
    pub async fn create(pool: &PgPool, new_recipe: NewRecipe) -> Result<Recipe, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (id, name, description, default_type, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, TRUE, NOW(), NOW())
            RETURNING id, name, description, default_type, is_active, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_recipe.name)
        .bind(new_recipe.description)
        .bind(new_recipe.default_type)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Recipe>, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, name, description, default_type, is_active, created_at, updated_at
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn list_active(pool: &PgPool) -> Result<Vec<Recipe>, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, name, description, default_type, is_active, created_at, updated_at
            FROM recipes
            WHERE is_active
            ORDER BY name
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Archive or reactivate a recipe. Archived recipes stay readable but are
    /// rejected by the generation engine.
    pub async fn set_active(pool: &PgPool, id: Uuid, is_active: bool) -> Result<Recipe, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(
            r#"
            UPDATE recipes
            SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, default_type, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(is_active)
        .fetch_one(pool)
        .await
    }
}

impl RecipeSnapshot {
    /// Load the full template graph for a recipe, or `None` if the recipe
    /// does not exist. Active/inactive is the caller's concern; the snapshot
    /// carries `recipe.is_active` for it.
    pub async fn load(pool: &PgPool, recipe_id: Uuid) -> Result<Option<RecipeSnapshot>, sqlx::Error> {
        let Some(recipe) = Recipe::find_by_id(pool, recipe_id).await? else {
            return Ok(None);
        };

        let phases = RecipePhase::list_for_recipe(pool, recipe_id).await?;

        let phase_ids: Vec<Uuid> = phases.iter().map(|p| p.id).collect();
        let tasks = sqlx::query_as::<_, RecipeTask>(
            r#"
            SELECT id, recipe_phase_id, sop_id, title, is_variable,
                   variable_source, depends_on_ids, sort_order, created_at, updated_at
            FROM recipe_tasks
            WHERE recipe_phase_id = ANY($1)
            ORDER BY sort_order
            "#,
        )
        .bind(&phase_ids)
        .fetch_all(pool)
        .await?;

        let sop_ids: Vec<Uuid> = tasks.iter().map(|t| t.sop_id).collect();
        let sops: HashMap<Uuid, Sop> = Sop::find_by_ids(pool, &sop_ids)
            .await?
            .into_iter()
            .map(|sop| (sop.id, sop))
            .collect();

        let mut by_phase: HashMap<Uuid, Vec<TemplateTask>> = HashMap::new();
        for task in tasks {
            let sop = sops.get(&task.sop_id).cloned();
            by_phase
                .entry(task.recipe_phase_id)
                .or_default()
                .push(TemplateTask { task, sop });
        }

        let phases = phases
            .into_iter()
            .map(|phase| {
                let tasks = by_phase.remove(&phase.id).unwrap_or_default();
                PhaseSnapshot { phase, tasks }
            })
            .collect();

        Ok(Some(RecipeSnapshot { recipe, phases }))
    }
}

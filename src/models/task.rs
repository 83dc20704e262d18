//! # Task
//!
//! Concrete, materialized task instances. Every SOP-derived attribute
//! (priority, estimates, function, requirements) is copied verbatim at
//! generation time; `sop_id` records provenance, not a live reference, so
//! later SOP edits do not retroactively change already-generated tasks.
//!
//! `sort_order` is a strictly increasing global index assigned during
//! generation, reflecting phase order, template-task order within phase, and
//! page order for variable expansions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::constants::{BatteryImpact, MysteryFactor, TaskStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub phase_id: Option<Uuid>,
    pub title: String,
    pub status: TaskStatus,
    pub priority: i32,
    pub function_id: Option<Uuid>,
    pub energy_estimate: Option<i32>,
    pub mystery_factor: MysteryFactor,
    pub battery_impact: BatteryImpact,
    pub requirements: Option<serde_json::Value>,
    pub sop_id: Option<Uuid>,
    pub assignee_id: Option<Uuid>,
    pub sort_order: i32,
    pub created_by_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New Task for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub project_id: Uuid,
    pub phase_id: Option<Uuid>,
    pub title: String,
    pub status: TaskStatus,
    pub priority: i32,
    pub function_id: Option<Uuid>,
    pub energy_estimate: Option<i32>,
    pub mystery_factor: MysteryFactor,
    pub battery_impact: BatteryImpact,
    pub requirements: Option<serde_json::Value>,
    pub sop_id: Option<Uuid>,
    pub assignee_id: Option<Uuid>,
    pub sort_order: i32,
    pub created_by_id: Option<Uuid>,
}

impl Task {
    /// Create a concrete task within a generation transaction.
    pub async fn create_with_transaction(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        new_task: NewTask,
    ) -> Result<Task, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (id, project_id, phase_id, title, status, priority, function_id,
                               energy_estimate, mystery_factor, battery_impact, requirements,
                               sop_id, assignee_id, sort_order, created_by_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, NOW(), NOW())
            RETURNING id, project_id, phase_id, title, status, priority, function_id,
                      energy_estimate, mystery_factor, battery_impact, requirements,
                      sop_id, assignee_id, sort_order, created_by_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_task.project_id)
        .bind(new_task.phase_id)
        .bind(new_task.title)
        .bind(new_task.status)
        .bind(new_task.priority)
        .bind(new_task.function_id)
        .bind(new_task.energy_estimate)
        .bind(new_task.mystery_factor)
        .bind(new_task.battery_impact)
        .bind(new_task.requirements)
        .bind(new_task.sop_id)
        .bind(new_task.assignee_id)
        .bind(new_task.sort_order)
        .bind(new_task.created_by_id)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project_id, phase_id, title, status, priority, function_id,
                   energy_estimate, mystery_factor, battery_impact, requirements,
                   sop_id, assignee_id, sort_order, created_by_id, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List a project's tasks in generation order.
    pub async fn list_for_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project_id, phase_id, title, status, priority, function_id,
                   energy_estimate, mystery_factor, battery_impact, requirements,
                   sop_id, assignee_id, sort_order, created_by_id, created_at, updated_at
            FROM tasks
            WHERE project_id = $1
            ORDER BY sort_order
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}

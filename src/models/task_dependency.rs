//! # Task Dependency
//!
//! Blocked-by edges between concrete tasks. An edge records that
//! `blocked_task_id` cannot start until `blocking_task_id` is done.
//!
//! Unlike the template graph, the instance graph carries no acyclicity
//! responsibility of its own: edges are derived during generation from a
//! template graph that the cycle guard already validated, and the expansion
//! mapping cannot introduce new cycles.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TaskDependency {
    pub id: Uuid,
    pub blocked_task_id: Uuid,
    pub blocking_task_id: Uuid,
    pub created_at: NaiveDateTime,
}

/// New TaskDependency for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaskDependency {
    pub blocked_task_id: Uuid,
    pub blocking_task_id: Uuid,
}

impl TaskDependency {
    /// Create a blocked-by edge within a generation transaction.
    pub async fn create_with_transaction(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        new_edge: NewTaskDependency,
    ) -> Result<TaskDependency, sqlx::Error> {
        sqlx::query_as::<_, TaskDependency>(
            r#"
            INSERT INTO task_dependencies (id, blocked_task_id, blocking_task_id, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, blocked_task_id, blocking_task_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_edge.blocked_task_id)
        .bind(new_edge.blocking_task_id)
        .fetch_one(&mut **tx)
        .await
    }

    /// Tasks that must complete before the given task.
    pub async fn find_blockers(pool: &PgPool, task_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT blocking_task_id
            FROM task_dependencies
            WHERE blocked_task_id = $1
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Tasks waiting on the given task.
    pub async fn find_dependents(pool: &PgPool, task_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT blocked_task_id
            FROM task_dependencies
            WHERE blocking_task_id = $1
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// All edges between a project's tasks, for graph display.
    pub async fn find_by_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<TaskDependency>, sqlx::Error> {
        sqlx::query_as::<_, TaskDependency>(
            r#"
            SELECT td.id, td.blocked_task_id, td.blocking_task_id, td.created_at
            FROM task_dependencies td
            INNER JOIN tasks blocked ON td.blocked_task_id = blocked.id
            WHERE blocked.project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}

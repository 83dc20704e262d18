//! Concrete project phases, created 1:1 from recipe phases at generation time.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProjectPhase {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New ProjectPhase for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProjectPhase {
    pub project_id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub sort_order: i32,
}

impl ProjectPhase {
    pub async fn create_with_transaction(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        new_phase: NewProjectPhase,
    ) -> Result<ProjectPhase, sqlx::Error> {
        sqlx::query_as::<_, ProjectPhase>(
            r#"
            INSERT INTO project_phases (id, project_id, name, icon, sort_order, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING id, project_id, name, icon, sort_order, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_phase.project_id)
        .bind(new_phase.name)
        .bind(new_phase.icon)
        .bind(new_phase.sort_order)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn list_for_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<ProjectPhase>, sqlx::Error> {
        sqlx::query_as::<_, ProjectPhase>(
            r#"
            SELECT id, project_id, name, icon, sort_order, created_at, updated_at
            FROM project_phases
            WHERE project_id = $1
            ORDER BY sort_order
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}

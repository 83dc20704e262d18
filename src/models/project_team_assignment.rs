//! Function-to-user roster records for a project.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProjectTeamAssignment {
    pub id: Uuid,
    pub project_id: Uuid,
    pub function_id: Uuid,
    pub user_id: Uuid,
    pub is_lead: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New ProjectTeamAssignment for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProjectTeamAssignment {
    pub project_id: Uuid,
    pub function_id: Uuid,
    pub user_id: Uuid,
    pub is_lead: bool,
}

impl ProjectTeamAssignment {
    pub async fn create_with_transaction(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        new_assignment: NewProjectTeamAssignment,
    ) -> Result<ProjectTeamAssignment, sqlx::Error> {
        sqlx::query_as::<_, ProjectTeamAssignment>(
            r#"
            INSERT INTO project_team_assignments (id, project_id, function_id, user_id, is_lead, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING id, project_id, function_id, user_id, is_lead, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_assignment.project_id)
        .bind(new_assignment.function_id)
        .bind(new_assignment.user_id)
        .bind(new_assignment.is_lead)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn list_for_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<ProjectTeamAssignment>, sqlx::Error> {
        sqlx::query_as::<_, ProjectTeamAssignment>(
            r#"
            SELECT id, project_id, function_id, user_id, is_lead, created_at, updated_at
            FROM project_team_assignments
            WHERE project_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}

//! Concrete projects produced by the generation engine (or created by hand).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::constants::{ProjectStatus, ProjectType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub client_id: Uuid,
    pub site_id: Option<Uuid>,
    /// Provenance only; the project has no live structural link back to the
    /// recipe, and recipe edits never mutate generated projects.
    pub recipe_id: Option<Uuid>,
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_by_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New Project for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub client_id: Uuid,
    pub site_id: Option<Uuid>,
    pub recipe_id: Option<Uuid>,
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_by_id: Option<Uuid>,
}

impl Project {
    /// Create a project within a generation transaction.
    pub async fn create_with_transaction(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        new_project: NewProject,
    ) -> Result<Project, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (id, name, client_id, site_id, recipe_id, project_type, status,
                                  start_date, target_date, notes, created_by_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW(), NOW())
            RETURNING id, name, client_id, site_id, recipe_id, project_type, status,
                      start_date, target_date, notes, created_by_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_project.name)
        .bind(new_project.client_id)
        .bind(new_project.site_id)
        .bind(new_project.recipe_id)
        .bind(new_project.project_type)
        .bind(new_project.status)
        .bind(new_project.start_date)
        .bind(new_project.target_date)
        .bind(new_project.notes)
        .bind(new_project.created_by_id)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, client_id, site_id, recipe_id, project_type, status,
                   start_date, target_date, notes, created_by_id, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

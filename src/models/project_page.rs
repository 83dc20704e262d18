//! Wizard-entered site pages, persisted as project metadata.
//!
//! Pages drive variable-task expansion during generation but have no
//! structural effect afterwards; they are kept for reporting only.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProjectPage {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub page_type: Option<String>,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New ProjectPage for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProjectPage {
    pub project_id: Uuid,
    pub name: String,
    pub page_type: Option<String>,
    pub sort_order: i32,
}

impl ProjectPage {
    pub async fn create_with_transaction(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        new_page: NewProjectPage,
    ) -> Result<ProjectPage, sqlx::Error> {
        sqlx::query_as::<_, ProjectPage>(
            r#"
            INSERT INTO project_pages (id, project_id, name, page_type, sort_order, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING id, project_id, name, page_type, sort_order, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_page.project_id)
        .bind(new_page.name)
        .bind(new_page.page_type)
        .bind(new_page.sort_order)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn list_for_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<ProjectPage>, sqlx::Error> {
        sqlx::query_as::<_, ProjectPage>(
            r#"
            SELECT id, project_id, name, page_type, sort_order, created_at, updated_at
            FROM project_pages
            WHERE project_id = $1
            ORDER BY sort_order
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}

//! Standard Operating Procedure records.
//!
//! An SOP is the source of truth for the attributes of every task generated
//! from a template task that references it: title, function (role), priority,
//! effort estimates, and the requirements checklist. Generated tasks copy
//! these values at generation time; later SOP edits never mutate them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::constants::{BatteryImpact, MysteryFactor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Sop {
    pub id: Uuid,
    pub title: String,
    pub function_id: Option<Uuid>,
    pub default_priority: i32,
    pub energy_estimate: Option<i32>,
    pub mystery_factor: MysteryFactor,
    pub battery_impact: BatteryImpact,
    /// Checklist template copied onto generated tasks, stored as JSON.
    pub template_requirements: Option<serde_json::Value>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New SOP for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSop {
    pub title: String,
    pub function_id: Option<Uuid>,
    pub default_priority: i32,
    pub energy_estimate: Option<i32>,
    pub mystery_factor: MysteryFactor,
    pub battery_impact: BatteryImpact,
    pub template_requirements: Option<serde_json::Value>,
}

impl Sop {
    pub async fn create(pool: &PgPool, new_sop: NewSop) -> Result<Sop, sqlx::Error> {
        sqlx::query_as::<_, Sop>(
            r#"
            INSERT INTO sops (id, title, function_id, default_priority, energy_estimate,
                              mystery_factor, battery_impact, template_requirements, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            RETURNING id, title, function_id, default_priority, energy_estimate,
                      mystery_factor, battery_impact, template_requirements, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_sop.title)
        .bind(new_sop.function_id)
        .bind(new_sop.default_priority)
        .bind(new_sop.energy_estimate)
        .bind(new_sop.mystery_factor)
        .bind(new_sop.battery_impact)
        .bind(new_sop.template_requirements)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Sop>, sqlx::Error> {
        sqlx::query_as::<_, Sop>(
            r#"
            SELECT id, title, function_id, default_priority, energy_estimate,
                   mystery_factor, battery_impact, template_requirements, created_at, updated_at
            FROM sops
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Fetch a batch of SOPs by id, for snapshot assembly.
    pub async fn find_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Sop>, sqlx::Error> {
        sqlx::query_as::<_, Sop>(
            r#"
            SELECT id, title, function_id, default_priority, energy_estimate,
                   mystery_factor, battery_impact, template_requirements, created_at, updated_at
            FROM sops
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }
}

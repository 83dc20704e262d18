//! # Domain Constants
//!
//! Typed enums shared by the template and instance sides of the data model.
//! All variants serialize as snake_case strings, matching both the JSON API
//! surface and the Postgres enum types of the same names.

use serde::{Deserialize, Serialize};

/// Priority range for SOPs and concrete tasks (inclusive).
pub const MIN_PRIORITY: i32 = 1;
pub const MAX_PRIORITY: i32 = 5;
pub const DEFAULT_PRIORITY: i32 = 3;

/// Project lifecycle status. New projects produced by the generation engine
/// always start in `Queue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
pub enum ProjectStatus {
    Quote,
    Queue,
    Ready,
    InProgress,
    Review,
    Done,
    Suspended,
    Cancelled,
}

/// Project type, copied from the recipe's default type at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "project_type", rename_all = "snake_case")]
pub enum ProjectType {
    Project,
    Retainer,
    Internal,
}

/// Concrete task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Review,
    Done,
    Blocked,
    Abandoned,
}

/// How much unknown is baked into an SOP's estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "mystery_factor", rename_all = "snake_case")]
pub enum MysteryFactor {
    None,
    Average,
    Significant,
    NoIdea,
}

/// Subjective energy cost of performing an SOP's work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "battery_impact", rename_all = "snake_case")]
pub enum BatteryImpact {
    AverageDrain,
    HighDrain,
    Energizing,
}

/// Expansion axis for variable template tasks. Site pages are the only axis
/// today; the enum leaves room for future sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "variable_source", rename_all = "snake_case")]
pub enum VariableSource {
    SitemapPage,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Quote => "quote",
            ProjectStatus::Queue => "queue",
            ProjectStatus::Ready => "ready",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Review => "review",
            ProjectStatus::Done => "done",
            ProjectStatus::Suspended => "suspended",
            ProjectStatus::Cancelled => "cancelled",
        }
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not_started",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Abandoned => "abandoned",
        }
    }
}

impl VariableSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableSource::SitemapPage => "sitemap_page",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_serialization() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&BatteryImpact::AverageDrain).unwrap(),
            "\"average_drain\""
        );
        assert_eq!(
            serde_json::to_string(&VariableSource::SitemapPage).unwrap(),
            "\"sitemap_page\""
        );
    }

    #[test]
    fn test_as_str_matches_serde() {
        assert_eq!(ProjectStatus::Queue.as_str(), "queue");
        assert_eq!(TaskStatus::NotStarted.as_str(), "not_started");
        assert_eq!(VariableSource::SitemapPage.as_str(), "sitemap_page");
    }
}

#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # RecipeGen Core
//!
//! Rust core for recipe-driven project generation: template dependency
//! graphs, interactive cycle guarding, and transactional project
//! materialization over PostgreSQL.
//!
//! ## Overview
//!
//! A **recipe** is a reusable project template: ordered phases of template
//! tasks, each backed by a Standard Operating Procedure (SOP) record and
//! optionally depending on other template tasks. The **generation engine**
//! expands a recipe against a wizard-collected site map and team roster into
//! a concrete project: variable template tasks become one task per selected
//! page (with `{page}` substituted into titles), dependency edges are
//! remapped through the expansion, and everything is created in one
//! transaction.
//!
//! ## Module Organization
//!
//! - [`models`] - Template-side and instance-side data layer (SQLx/Postgres)
//! - [`graph`] - Flattened template view and the cycle guard
//! - [`generation`] - Page selection, materialization planning, and the
//!   transactional generation engine
//! - [`constants`] - Domain enums shared across the data model
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Crate-level error handling
//! - [`logging`] - Structured tracing initialization
//!
//! ## Invariants
//!
//! The template dependency graph must stay acyclic. The cycle guard
//! ([`graph::would_create_cycle`]) is consulted interactively before every
//! edge addition during recipe editing; generation trusts the invariant and
//! does not re-verify it.

pub mod config;
pub mod constants;
pub mod error;
pub mod generation;
pub mod graph;
pub mod logging;
pub mod models;

pub use config::RecipeGenConfig;
pub use constants::{
    BatteryImpact, MysteryFactor, ProjectStatus, ProjectType, TaskStatus, VariableSource,
};
pub use error::{RecipeGenError, Result};
pub use generation::{
    GenerationConfig, GenerationError, GenerationRequest, GenerationResult, MaterializationPlan,
    PageSelection, ProjectGenerator, TeamAssignment,
};
pub use graph::{all_template_tasks, would_create_cycle, TemplateTaskView};

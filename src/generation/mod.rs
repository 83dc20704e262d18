//! # Generation Engine
//!
//! Converts a recipe template plus a wizard-collected site map and team
//! roster into a fully materialized project.
//!
//! ## Components
//!
//! - [`request`]: the wizard payload (pages with per-page variable-task
//!   selections, roster, project metadata) and its validation
//! - [`plan`]: the pure materialization planner: variable-task expansion,
//!   title substitution, sort indexing, and dependency-edge resolution
//! - [`generator`]: the transactional engine that persists a plan atomically
//!
//! Planning is separated from persistence so the expansion and wiring rules
//! are testable without a database, and so every fatal condition is detected
//! before the transaction opens where possible.

pub mod generator;
pub mod plan;
pub mod request;

pub use generator::{GenerationConfig, GenerationError, GenerationResult, ProjectGenerator};
pub use plan::{MaterializationPlan, PlannedDependency, PlannedTask};
pub use request::{GenerationRequest, PageSelection, TeamAssignment};

//! # Project Generator
//!
//! Atomic materialization of a recipe into a concrete project.
//!
//! ## Overview
//!
//! `ProjectGenerator` consumes a frozen recipe snapshot, the wizard's page
//! selections, and the team roster, and creates the project shell, concrete
//! phases, page metadata, roster records, tasks, and dependency edges as one
//! SQLx transaction. Either every record exists afterwards or none do;
//! partial projects are never observable.
//!
//! The engine trusts the recipe's dependency graph: acyclicity is enforced
//! interactively by [`crate::graph::would_create_cycle`] during recipe
//! editing and is not re-verified here.
//!
//! Generation is deliberately not idempotent; invoking it twice with
//! identical inputs produces two independent projects.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use recipegen_core::generation::{GenerationRequest, ProjectGenerator};
//! use uuid::Uuid;
//!
//! # async fn example(pool: sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//! let generator = ProjectGenerator::new(pool);
//! let request = GenerationRequest::new(Uuid::new_v4(), Uuid::new_v4(), "Acme relaunch");
//! let result = generator.generate(request).await?;
//! println!("Created project {} with {} tasks", result.project_id, result.task_count);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::constants::{ProjectStatus, TaskStatus};
use crate::graph::all_template_tasks;
use crate::models::project::{NewProject, Project};
use crate::models::project_page::{NewProjectPage, ProjectPage};
use crate::models::project_phase::{NewProjectPhase, ProjectPhase};
use crate::models::project_team_assignment::{NewProjectTeamAssignment, ProjectTeamAssignment};
use crate::models::recipe::RecipeSnapshot;
use crate::models::task::{NewTask, Task};
use crate::models::task_dependency::{NewTaskDependency, TaskDependency};

use super::plan::MaterializationPlan;
use super::request::GenerationRequest;

/// Result of a generation run, with summary counts for the caller. Silent
/// drops (unselected variable tasks, unresolvable edges, unrostered functions)
/// are visible only as differences in these counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub project_id: Uuid,
    pub task_count: usize,
    pub page_count: usize,
    pub team_assignment_count: usize,
    pub dependency_count: usize,
    /// Template task id -> concrete task ids, in page order for variable
    /// expansions.
    pub task_mapping: HashMap<Uuid, Vec<Uuid>>,
}

/// Configuration for project generation
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Status for newly generated projects.
    pub initial_status: ProjectStatus,
    /// Status for newly generated tasks.
    pub initial_task_status: TaskStatus,
    /// Recorded as creator on the project and its tasks, when known.
    pub created_by: Option<Uuid>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            initial_status: ProjectStatus::Queue,
            initial_task_status: TaskStatus::NotStarted,
            created_by: None,
        }
    }
}

/// Atomic recipe-to-project materialization over a Postgres pool.
pub struct ProjectGenerator {
    pool: PgPool,
    config: GenerationConfig,
}

impl ProjectGenerator {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            config: GenerationConfig::default(),
        }
    }

    pub fn with_config(pool: PgPool, config: GenerationConfig) -> Self {
        Self { pool, config }
    }

    /// Materialize a project from a recipe, atomically.
    #[instrument(skip(self, request), fields(recipe_id = %request.recipe_id, project_name = %request.name))]
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        info!(recipe_id = %request.recipe_id, "Starting project generation");

        request.validate()?;

        let snapshot = RecipeSnapshot::load(&self.pool, request.recipe_id)
            .await
            .map_err(|e| GenerationError::Database(format!("Failed to load recipe: {e}")))?
            .ok_or(GenerationError::RecipeNotFound(request.recipe_id))?;

        if !snapshot.recipe.is_active {
            return Err(GenerationError::RecipeInactive(request.recipe_id));
        }

        // Pure planning happens before the transaction opens: a plan failure
        // leaves no trace in the database.
        let view = all_template_tasks(&snapshot);
        let plan = MaterializationPlan::build(&view, &request.pages, &request.team_assignments)?;

        debug!(
            template_task_count = view.len(),
            planned_task_count = plan.tasks.len(),
            planned_edge_count = plan.edges.len(),
            "Built materialization plan"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| GenerationError::Database(format!("Failed to begin transaction: {e}")))?;

        let project = self.create_project(&mut tx, &snapshot, &request).await?;
        let phase_mapping = self.create_phases(&mut tx, &snapshot, project.id).await?;
        let page_count = self.create_pages(&mut tx, &request, project.id).await?;
        let team_assignment_count = self.create_team(&mut tx, &request, project.id).await?;
        let task_ids = self
            .create_tasks(&mut tx, &plan, &phase_mapping, project.id)
            .await?;
        let dependency_count = self.create_dependencies(&mut tx, &plan, &task_ids).await?;

        tx.commit()
            .await
            .map_err(|e| GenerationError::Database(format!("Failed to commit transaction: {e}")))?;

        let mut task_mapping: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for (planned, task_id) in plan.tasks.iter().zip(&task_ids) {
            task_mapping
                .entry(planned.template_task_id)
                .or_default()
                .push(*task_id);
        }

        info!(
            project_id = %project.id,
            task_count = task_ids.len(),
            page_count = page_count,
            dependency_count = dependency_count,
            "Project generation completed"
        );

        Ok(GenerationResult {
            project_id: project.id,
            task_count: task_ids.len(),
            page_count,
            team_assignment_count,
            dependency_count,
            task_mapping,
        })
    }

    async fn create_project(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        snapshot: &RecipeSnapshot,
        request: &GenerationRequest,
    ) -> Result<Project, GenerationError> {
        let project = Project::create_with_transaction(
            tx,
            NewProject {
                name: request.name.clone(),
                client_id: request.client_id,
                site_id: request.site_id,
                recipe_id: Some(snapshot.recipe.id),
                project_type: snapshot.recipe.default_type,
                status: self.config.initial_status,
                start_date: request.start_date,
                target_date: request.target_date,
                notes: request.notes.clone(),
                created_by_id: self.config.created_by,
            },
        )
        .await
        .map_err(|e| GenerationError::Database(format!("Failed to create project: {e}")))?;

        debug!(project_id = %project.id, "Created project shell");
        Ok(project)
    }

    /// Create one concrete phase per template phase, returning the
    /// template-phase to concrete-phase id mapping.
    async fn create_phases(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        snapshot: &RecipeSnapshot,
        project_id: Uuid,
    ) -> Result<HashMap<Uuid, Uuid>, GenerationError> {
        let mut phase_mapping = HashMap::with_capacity(snapshot.phases.len());
        for phase_snapshot in &snapshot.phases {
            let template_phase = &phase_snapshot.phase;
            let phase = ProjectPhase::create_with_transaction(
                tx,
                NewProjectPhase {
                    project_id,
                    name: template_phase.name.clone(),
                    icon: template_phase.icon.clone(),
                    sort_order: template_phase.sort_order,
                },
            )
            .await
            .map_err(|e| {
                GenerationError::Database(format!(
                    "Failed to create phase '{}': {e}",
                    template_phase.name
                ))
            })?;
            phase_mapping.insert(template_phase.id, phase.id);
        }
        Ok(phase_mapping)
    }

    async fn create_pages(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        request: &GenerationRequest,
        project_id: Uuid,
    ) -> Result<usize, GenerationError> {
        for (index, page) in request.pages.iter().enumerate() {
            ProjectPage::create_with_transaction(
                tx,
                NewProjectPage {
                    project_id,
                    name: page.name.clone(),
                    page_type: page.page_type.clone(),
                    sort_order: index as i32,
                },
            )
            .await
            .map_err(|e| {
                GenerationError::Database(format!("Failed to create page '{}': {e}", page.name))
            })?;
        }
        Ok(request.pages.len())
    }

    async fn create_team(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        request: &GenerationRequest,
        project_id: Uuid,
    ) -> Result<usize, GenerationError> {
        for assignment in &request.team_assignments {
            ProjectTeamAssignment::create_with_transaction(
                tx,
                NewProjectTeamAssignment {
                    project_id,
                    function_id: assignment.function_id,
                    user_id: assignment.user_id,
                    is_lead: false,
                },
            )
            .await
            .map_err(|e| {
                GenerationError::Database(format!("Failed to create team assignment: {e}"))
            })?;
        }
        Ok(request.team_assignments.len())
    }

    /// Persist planned tasks in plan order, returning concrete ids by plan
    /// index.
    async fn create_tasks(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        plan: &MaterializationPlan,
        phase_mapping: &HashMap<Uuid, Uuid>,
        project_id: Uuid,
    ) -> Result<Vec<Uuid>, GenerationError> {
        let mut task_ids = Vec::with_capacity(plan.tasks.len());
        for planned in &plan.tasks {
            let task = Task::create_with_transaction(
                tx,
                NewTask {
                    project_id,
                    phase_id: phase_mapping.get(&planned.template_phase_id).copied(),
                    title: planned.title.clone(),
                    status: self.config.initial_task_status,
                    priority: planned.priority,
                    function_id: planned.function_id,
                    energy_estimate: planned.energy_estimate,
                    mystery_factor: planned.mystery_factor,
                    battery_impact: planned.battery_impact,
                    requirements: planned.requirements.clone(),
                    sop_id: Some(planned.sop_id),
                    assignee_id: planned.assignee_id,
                    sort_order: planned.sort_order,
                    created_by_id: self.config.created_by,
                },
            )
            .await
            .map_err(|e| {
                GenerationError::Database(format!(
                    "Failed to create task '{}': {e}",
                    planned.title
                ))
            })?;
            task_ids.push(task.id);
        }
        Ok(task_ids)
    }

    async fn create_dependencies(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        plan: &MaterializationPlan,
        task_ids: &[Uuid],
    ) -> Result<usize, GenerationError> {
        for edge in &plan.edges {
            TaskDependency::create_with_transaction(
                tx,
                NewTaskDependency {
                    blocked_task_id: task_ids[edge.blocked],
                    blocking_task_id: task_ids[edge.blocking],
                },
            )
            .await
            .map_err(|e| {
                GenerationError::Database(format!("Failed to create task dependency: {e}"))
            })?;
        }
        Ok(plan.edges.len())
    }
}

/// Errors that can occur during project generation
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(Uuid),

    #[error("Recipe is inactive: {0}")]
    RecipeInactive(Uuid),

    #[error("SOP not found for template task {0}")]
    MissingSop(Uuid),

    #[error("Invalid generation request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    Database(String),
}

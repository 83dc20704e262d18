pub mod project;
pub mod project_page;
pub mod project_phase;
pub mod project_team_assignment;
pub mod recipe;
pub mod recipe_phase;
pub mod recipe_task;
pub mod sop;
pub mod task;
pub mod task_dependency;

// Re-export models for easy access
pub use project::Project;
pub use project_page::ProjectPage;
pub use project_phase::ProjectPhase;
pub use project_team_assignment::ProjectTeamAssignment;
pub use recipe::{PhaseSnapshot, Recipe, RecipeSnapshot, TemplateTask};
pub use recipe_phase::RecipePhase;
pub use recipe_task::RecipeTask;
pub use sop::Sop;
pub use task::Task;
pub use task_dependency::TaskDependency;

//! Shared fixtures for building in-memory recipe snapshots.

#![allow(dead_code)]

use chrono::NaiveDateTime;
use uuid::Uuid;

use recipegen_core::constants::{BatteryImpact, MysteryFactor, ProjectType, VariableSource};
use recipegen_core::generation::PageSelection;
use recipegen_core::models::recipe::{PhaseSnapshot, Recipe, RecipeSnapshot, TemplateTask};
use recipegen_core::models::recipe_phase::RecipePhase;
use recipegen_core::models::recipe_task::RecipeTask;
use recipegen_core::models::sop::Sop;

pub fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

pub fn make_recipe(name: &str) -> Recipe {
    Recipe {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        default_type: ProjectType::Project,
        is_active: true,
        created_at: now(),
        updated_at: now(),
    }
}

pub fn make_phase(recipe_id: Uuid, name: &str, sort_order: i32) -> RecipePhase {
    RecipePhase {
        id: Uuid::new_v4(),
        recipe_id,
        name: name.to_string(),
        icon: None,
        sort_order,
        created_at: now(),
        updated_at: now(),
    }
}

pub fn make_sop(title: &str) -> Sop {
    Sop {
        id: Uuid::new_v4(),
        title: title.to_string(),
        function_id: None,
        default_priority: 3,
        energy_estimate: Some(4),
        mystery_factor: MysteryFactor::None,
        battery_impact: BatteryImpact::AverageDrain,
        template_requirements: None,
        created_at: now(),
        updated_at: now(),
    }
}

pub fn make_sop_for_function(title: &str, function_id: Uuid) -> Sop {
    Sop {
        function_id: Some(function_id),
        ..make_sop(title)
    }
}

/// A fixed (non-variable) template task backed by the given SOP.
pub fn fixed_task(phase_id: Uuid, sop: &Sop, sort_order: i32, depends_on: Vec<Uuid>) -> TemplateTask {
    TemplateTask {
        task: RecipeTask {
            id: Uuid::new_v4(),
            recipe_phase_id: phase_id,
            sop_id: sop.id,
            title: None,
            is_variable: false,
            variable_source: None,
            depends_on_ids: depends_on,
            sort_order,
            created_at: now(),
            updated_at: now(),
        },
        sop: Some(sop.clone()),
    }
}

/// A variable (per-page) template task backed by the given SOP.
pub fn variable_task(
    phase_id: Uuid,
    sop: &Sop,
    sort_order: i32,
    depends_on: Vec<Uuid>,
) -> TemplateTask {
    let mut template = fixed_task(phase_id, sop, sort_order, depends_on);
    template.task.is_variable = true;
    template.task.variable_source = Some(VariableSource::SitemapPage);
    template
}

pub fn with_title_override(mut template: TemplateTask, title: &str) -> TemplateTask {
    template.task.title = Some(title.to_string());
    template
}

pub fn snapshot(recipe: Recipe, phases: Vec<(RecipePhase, Vec<TemplateTask>)>) -> RecipeSnapshot {
    RecipeSnapshot {
        recipe,
        phases: phases
            .into_iter()
            .map(|(phase, tasks)| PhaseSnapshot { phase, tasks })
            .collect(),
    }
}

pub fn page(name: &str, selected: Vec<Uuid>) -> PageSelection {
    PageSelection {
        name: name.to_string(),
        page_type: None,
        selected_variable_tasks: selected,
    }
}

//! # Materialization Plan
//!
//! The pure core of the generation engine: expands a flattened template view
//! against the wizard's page selections and roster into concrete task
//! instances and dependency edges, without touching the database. The
//! [`ProjectGenerator`](super::generator::ProjectGenerator) then persists a
//! plan verbatim inside one transaction.
//!
//! ## Expansion
//!
//! Template tasks are visited in flattened order (phase order, then in-phase
//! sort order). A non-variable task yields exactly one instance regardless of
//! page count. A variable task (the `is_variable` flag plus the
//! `sitemap_page` source; the flag alone does not expand) yields one instance
//! per page whose selection includes it, in page order; zero selections yield
//! zero instances, which is not an error. Every instance receives a strictly increasing global sort
//! index in this visitation order.
//!
//! ## Dependency resolution
//!
//! A second pass resolves each template `depends_on` entry through the
//! template-id → instances map:
//!
//! - fixed blocker: every dependent instance is blocked by its single instance
//! - variable blocker, fixed dependent: only the FIRST page-order instance is
//!   linked; no page correspondence exists when one side is not expanded
//!   (TODO: confirm with stakeholders whether this should instead gate on all
//!   instances, then revisit together with the wizard review step)
//! - variable blocker, variable dependent: per-page matching; each dependent
//!   instance links to the blocker instance for the same page, if one exists
//! - blocker with zero instances: the edge is silently dropped

use std::collections::HashMap;
use uuid::Uuid;

use crate::constants::{BatteryImpact, MysteryFactor};
use crate::graph::TemplateTaskView;

use super::generator::GenerationError;
use super::request::{PageSelection, TeamAssignment};

/// One concrete task to be created, with all SOP attributes copied.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedTask {
    pub template_task_id: Uuid,
    pub template_phase_id: Uuid,
    pub title: String,
    /// Set for variable expansions: the page this instance was created for.
    pub page_name: Option<String>,
    pub sort_order: i32,
    pub priority: i32,
    pub function_id: Option<Uuid>,
    pub energy_estimate: Option<i32>,
    pub mystery_factor: MysteryFactor,
    pub battery_impact: BatteryImpact,
    pub requirements: Option<serde_json::Value>,
    pub sop_id: Uuid,
    pub assignee_id: Option<Uuid>,
}

/// A blocked-by edge between two planned tasks, by index into the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedDependency {
    pub blocked: usize,
    pub blocking: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterializationPlan {
    pub tasks: Vec<PlannedTask>,
    pub edges: Vec<PlannedDependency>,
}

impl MaterializationPlan {
    /// Build a plan from a flattened template view.
    ///
    /// `view` must come from [`crate::graph::all_template_tasks`] so the sort
    /// indices reconstruct the template ordering. Fails fast on the first
    /// template task without a resolved SOP; never partially plans.
    pub fn build(
        view: &[TemplateTaskView<'_>],
        pages: &[PageSelection],
        roster: &[TeamAssignment],
    ) -> Result<MaterializationPlan, GenerationError> {
        let roster_map: HashMap<Uuid, Uuid> = roster
            .iter()
            .map(|assignment| (assignment.function_id, assignment.user_id))
            .collect();

        let mut tasks: Vec<PlannedTask> = Vec::new();
        // Template task id -> plan indices of its instances, in page order.
        let mut instances: HashMap<Uuid, Vec<usize>> = HashMap::new();
        let mut sort_order = 0i32;

        for template in view {
            let sop = template
                .sop
                .ok_or(GenerationError::MissingSop(template.id()))?;
            let base_title = template
                .base_title()
                .ok_or(GenerationError::MissingSop(template.id()))?;
            let assignee_id = sop
                .function_id
                .and_then(|function_id| roster_map.get(&function_id).copied());

            let make_task = |title: String, page_name: Option<String>, sort_order: i32| PlannedTask {
                template_task_id: template.id(),
                template_phase_id: template.phase.id,
                title,
                page_name,
                sort_order,
                priority: sop.default_priority,
                function_id: sop.function_id,
                energy_estimate: sop.energy_estimate,
                mystery_factor: sop.mystery_factor,
                battery_impact: sop.battery_impact,
                requirements: sop.template_requirements.clone(),
                sop_id: sop.id,
                assignee_id,
            };

            let mut created: Vec<usize> = Vec::new();
            if template.expands_per_page() {
                for page in pages {
                    if !page.selected_variable_tasks.contains(&template.id()) {
                        continue;
                    }
                    let title = substitute_page(base_title, &page.name);
                    tasks.push(make_task(title, Some(page.name.clone()), sort_order));
                    sort_order += 1;
                    created.push(tasks.len() - 1);
                }
            } else {
                tasks.push(make_task(base_title.to_string(), None, sort_order));
                sort_order += 1;
                created.push(tasks.len() - 1);
            }
            instances.insert(template.id(), created);
        }

        let by_id: HashMap<Uuid, &TemplateTaskView<'_>> =
            view.iter().map(|template| (template.id(), template)).collect();

        let mut edges: Vec<PlannedDependency> = Vec::new();
        for template in view {
            if template.depends_on().is_empty() {
                continue;
            }
            let Some(dependent_instances) = instances.get(&template.id()) else {
                continue;
            };

            for blocker_template_id in template.depends_on() {
                let Some(blocker_instances) = instances.get(blocker_template_id) else {
                    // Dangling reference; nothing to wire.
                    continue;
                };
                if blocker_instances.is_empty() {
                    // Blocker expanded to zero instances: dropped, by design.
                    continue;
                }
                let blocker_expands = by_id
                    .get(blocker_template_id)
                    .is_some_and(|blocker| blocker.expands_per_page());

                for &blocked in dependent_instances {
                    let blocking = match (&tasks[blocked].page_name, blocker_expands) {
                        // Per-page match between two expanded tasks.
                        (Some(page_name), true) => blocker_instances
                            .iter()
                            .copied()
                            .find(|&idx| tasks[idx].page_name.as_deref() == Some(page_name)),
                        // First page-order instance stands in for the whole
                        // expansion when the dependent is not expanded.
                        (None, true) => Some(blocker_instances[0]),
                        // Fixed blocker: exactly one instance.
                        (_, false) => Some(blocker_instances[0]),
                    };
                    if let Some(blocking) = blocking {
                        edges.push(PlannedDependency { blocked, blocking });
                    }
                }
            }
        }

        Ok(MaterializationPlan { tasks, edges })
    }
}

/// Replace every `{page}` placeholder, matched case-insensitively, with the
/// page name.
pub fn substitute_page(title: &str, page_name: &str) -> String {
    const PLACEHOLDER_LEN: usize = "{page}".len();

    let mut out = String::with_capacity(title.len() + page_name.len());
    let mut rest = title;
    while let Some(pos) = find_placeholder(rest) {
        out.push_str(&rest[..pos]);
        out.push_str(page_name);
        rest = &rest[pos + PLACEHOLDER_LEN..];
    }
    out.push_str(rest);
    out
}

fn find_placeholder(haystack: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    // The placeholder is pure ASCII, so any byte-wise case-insensitive match
    // starts on a char boundary.
    (0..bytes.len().saturating_sub(5)).find(|&i| bytes[i..i + 6].eq_ignore_ascii_case(b"{page}"))
}

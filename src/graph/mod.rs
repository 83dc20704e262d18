//! # Template Dependency Graph
//!
//! In-memory view of a recipe's template graph and the cycle guard that keeps
//! it a DAG.
//!
//! ## Representation
//!
//! Template tasks reference each other by id (`depends_on_ids`), never by
//! pointer, so the graph is an adjacency-list-over-ids with an explicit
//! visited set; no ownership cycles to manage. [`all_template_tasks`]
//! flattens a [`RecipeSnapshot`] into phase order then in-phase sort order;
//! the generation engine reuses exactly this ordering to derive task sort
//! indices, so editor and generator always agree on task order.
//!
//! ## Cycle Guard
//!
//! [`would_create_cycle`] answers, for a candidate edge `task -> blocker`,
//! whether adding it (together with any pending, unsaved edges for the task
//! being edited) would close a cycle. It is invoked interactively before
//! every edge addition and is the sole enforcement of the acyclicity
//! invariant: the generation engine trusts the recipe graph and does not
//! re-verify, so construction paths that bypass the guard (bulk imports,
//! manual writes) are a correctness risk.

use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::constants::VariableSource;
use crate::models::recipe::RecipeSnapshot;
use crate::models::recipe_phase::RecipePhase;
use crate::models::recipe_task::RecipeTask;
use crate::models::sop::Sop;

/// A template task annotated with its owning phase and resolved SOP.
#[derive(Debug, Clone, Copy)]
pub struct TemplateTaskView<'a> {
    pub phase: &'a RecipePhase,
    pub task: &'a RecipeTask,
    pub sop: Option<&'a Sop>,
}

impl TemplateTaskView<'_> {
    pub fn id(&self) -> Uuid {
        self.task.id
    }

    /// Whether this task expands once per selected site page. Requires both
    /// the `is_variable` flag and the `sitemap_page` source; a flagged row
    /// without a source is treated as fixed and created once.
    pub fn expands_per_page(&self) -> bool {
        self.task.is_variable && self.task.variable_source == Some(VariableSource::SitemapPage)
    }

    pub fn depends_on(&self) -> &[Uuid] {
        &self.task.depends_on_ids
    }

    /// Unsubstituted title: the override when non-empty, else the SOP title.
    pub fn base_title(&self) -> Option<&str> {
        match self.task.title.as_deref() {
            Some(title) if !title.is_empty() => Some(title),
            _ => self.sop.map(|sop| sop.title.as_str()),
        }
    }
}

/// Flatten a recipe snapshot into every template task across every phase,
/// phase order then in-phase sort order. Pure projection, no side effects.
pub fn all_template_tasks(snapshot: &RecipeSnapshot) -> Vec<TemplateTaskView<'_>> {
    snapshot
        .phases
        .iter()
        .flat_map(|phase_snapshot| {
            phase_snapshot.tasks.iter().map(|template| TemplateTaskView {
                phase: &phase_snapshot.phase,
                task: &template.task,
                sop: template.sop.as_ref(),
            })
        })
        .collect()
}

/// Would adding the edge `task_id -> candidate_blocker_id` create a cycle?
///
/// The edited task's out-edges are taken to be
/// `pending_depends_on ∪ {candidate_blocker_id}` (the in-progress edit, not
/// the saved state), while every other task contributes its persisted
/// `depends_on_ids`. The candidate is rejected (returns `true`) iff any of
/// those out-edges leads back to `task_id`, including the trivial
/// self-dependency case.
///
/// Iterative depth-first search with a visited set: each node is expanded at
/// most once, linear in edges per check, and deep graphs cannot overflow the
/// call stack.
pub fn would_create_cycle(
    task_id: Uuid,
    candidate_blocker_id: Uuid,
    all_tasks: &[TemplateTaskView<'_>],
    pending_depends_on: &[Uuid],
) -> bool {
    let mut graph: HashMap<Uuid, &[Uuid]> = HashMap::with_capacity(all_tasks.len());
    for view in all_tasks {
        if view.id() != task_id {
            graph.insert(view.id(), view.depends_on());
        }
    }

    let mut visited: HashSet<Uuid> = HashSet::new();
    let mut stack = pending_depends_on.to_vec();
    stack.push(candidate_blocker_id);
    while let Some(node) = stack.pop() {
        if node == task_id {
            return true;
        }
        if !visited.insert(node) {
            continue;
        }
        if let Some(edges) = graph.get(&node) {
            stack.extend(edges.iter().copied());
        }
    }

    false
}

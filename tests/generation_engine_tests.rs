//! End-to-end materialization scenarios over the pure planner.
//!
//! These exercise the observable contract of generation (expansion counts,
//! title substitution, sort indexing, assignee resolution, and dependency
//! wiring) without a database; persistence replays a plan verbatim.

mod common;

use common::*;
use uuid::Uuid;

use recipegen_core::generation::{GenerationError, MaterializationPlan, TeamAssignment};
use recipegen_core::graph::all_template_tasks;

#[test]
fn fixed_task_yields_one_instance_regardless_of_page_count() {
    let recipe = make_recipe("Launch");
    let phase = make_phase(recipe.id, "Build", 0);
    let sop = make_sop("Set up hosting");
    let snap = snapshot(recipe, vec![(phase.clone(), vec![fixed_task(phase.id, &sop, 0, vec![])])]);
    let view = all_template_tasks(&snap);

    let no_pages = MaterializationPlan::build(&view, &[], &[]).unwrap();
    assert_eq!(no_pages.tasks.len(), 1);

    let pages = vec![page("Home", vec![]), page("About", vec![]), page("Contact", vec![])];
    let many_pages = MaterializationPlan::build(&view, &pages, &[]).unwrap();
    assert_eq!(many_pages.tasks.len(), 1);
    assert_eq!(many_pages.tasks[0].title, "Set up hosting");
    assert_eq!(many_pages.tasks[0].page_name, None);
}

#[test]
fn variable_task_expands_only_for_selecting_pages() {
    let recipe = make_recipe("Launch");
    let phase = make_phase(recipe.id, "Design", 0);
    let sop = make_sop("Design {page}");
    let template = variable_task(phase.id, &sop, 0, vec![]);
    let template_id = template.task.id;
    let snap = snapshot(recipe, vec![(phase, vec![template])]);
    let view = all_template_tasks(&snap);

    let pages = vec![
        page("P1", vec![]),
        page("P2", vec![template_id]),
        page("P3", vec![template_id]),
    ];
    let plan = MaterializationPlan::build(&view, &pages, &[]).unwrap();

    assert_eq!(plan.tasks.len(), 2);
    assert_eq!(plan.tasks[0].title, "Design P2");
    assert_eq!(plan.tasks[1].title, "Design P3");
    assert_eq!(plan.tasks[0].page_name.as_deref(), Some("P2"));
    assert_eq!(plan.tasks[1].page_name.as_deref(), Some("P3"));
}

#[test]
fn variable_task_selected_by_no_page_is_not_an_error() {
    let recipe = make_recipe("Launch");
    let phase = make_phase(recipe.id, "Design", 0);
    let sop = make_sop("Design {page}");
    let template = variable_task(phase.id, &sop, 0, vec![]);
    let snap = snapshot(recipe, vec![(phase, vec![template])]);
    let view = all_template_tasks(&snap);

    let plan = MaterializationPlan::build(&view, &[page("Home", vec![])], &[]).unwrap();
    assert!(plan.tasks.is_empty());
    assert!(plan.edges.is_empty());
}

#[test]
fn variable_flag_without_source_is_planned_once() {
    let recipe = make_recipe("Launch");
    let phase = make_phase(recipe.id, "Design", 0);
    let sop = make_sop("Design pass");
    let mut template = variable_task(phase.id, &sop, 0, vec![]);
    template.task.variable_source = None;
    let template_id = template.task.id;
    let snap = snapshot(recipe, vec![(phase, vec![template])]);
    let view = all_template_tasks(&snap);

    // Pages select it, but without an expansion source the flag is inert.
    let pages = vec![page("Home", vec![template_id]), page("About", vec![template_id])];
    let plan = MaterializationPlan::build(&view, &pages, &[]).unwrap();

    assert_eq!(plan.tasks.len(), 1);
    assert_eq!(plan.tasks[0].title, "Design pass");
    assert_eq!(plan.tasks[0].page_name, None);
}

#[test]
fn title_override_substitution_is_case_insensitive() {
    let recipe = make_recipe("Launch");
    let phase = make_phase(recipe.id, "Design", 0);
    let sop = make_sop("SOP title");
    let template = with_title_override(variable_task(phase.id, &sop, 0, vec![]), "Design {Page}");
    let template_id = template.task.id;
    let snap = snapshot(recipe, vec![(phase, vec![template])]);
    let view = all_template_tasks(&snap);

    let plan = MaterializationPlan::build(&view, &[page("Home", vec![template_id])], &[]).unwrap();
    assert_eq!(plan.tasks[0].title, "Design Home");
}

#[test]
fn mixed_recipe_produces_expected_task_count_and_ordering() {
    // P1: [variable, fixed], P2: [fixed]; 3 pages, variable selected by 2.
    let recipe = make_recipe("Launch");
    let p1 = make_phase(recipe.id, "Design", 0);
    let p2 = make_phase(recipe.id, "Launch", 1);
    let var_sop = make_sop("Design {page}");
    let fixed_sop = make_sop("Style guide");
    let launch_sop = make_sop("Go live");

    let var = variable_task(p1.id, &var_sop, 0, vec![]);
    let var_id = var.task.id;
    let fixed = fixed_task(p1.id, &fixed_sop, 1, vec![]);
    let launch = fixed_task(p2.id, &launch_sop, 0, vec![]);

    let snap = snapshot(recipe, vec![(p1, vec![var, fixed]), (p2, vec![launch])]);
    let view = all_template_tasks(&snap);

    let pages = vec![
        page("Home", vec![var_id]),
        page("About", vec![var_id]),
        page("Contact", vec![]),
    ];
    let plan = MaterializationPlan::build(&view, &pages, &[]).unwrap();

    assert_eq!(plan.tasks.len(), 4);
    let titles: Vec<&str> = plan.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Design Home", "Design About", "Style guide", "Go live"]);

    // Global sort index is strictly increasing in plan order.
    let orders: Vec<i32> = plan.tasks.iter().map(|t| t.sort_order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);
}

#[test]
fn sop_attributes_are_copied_onto_planned_tasks() {
    let recipe = make_recipe("Launch");
    let phase = make_phase(recipe.id, "Build", 0);
    let mut sop = make_sop("Build forms");
    sop.default_priority = 2;
    sop.energy_estimate = Some(6);
    sop.template_requirements = Some(serde_json::json!([{"text": "Spam protection"}]));
    let snap = snapshot(recipe, vec![(phase.clone(), vec![fixed_task(phase.id, &sop, 0, vec![])])]);
    let view = all_template_tasks(&snap);

    let plan = MaterializationPlan::build(&view, &[], &[]).unwrap();
    let task = &plan.tasks[0];
    assert_eq!(task.priority, 2);
    assert_eq!(task.energy_estimate, Some(6));
    assert_eq!(task.sop_id, sop.id);
    assert_eq!(
        task.requirements,
        Some(serde_json::json!([{"text": "Spam protection"}]))
    );
}

#[test]
fn assignee_resolves_through_roster_or_stays_unassigned() {
    let recipe = make_recipe("Launch");
    let phase = make_phase(recipe.id, "Build", 0);
    let design_fn = Uuid::new_v4();
    let dev_fn = Uuid::new_v4();
    let designer = Uuid::new_v4();

    let design_sop = make_sop_for_function("Design it", design_fn);
    let dev_sop = make_sop_for_function("Build it", dev_fn);
    let snap = snapshot(
        recipe,
        vec![(
            phase.clone(),
            vec![
                fixed_task(phase.id, &design_sop, 0, vec![]),
                fixed_task(phase.id, &dev_sop, 1, vec![]),
            ],
        )],
    );
    let view = all_template_tasks(&snap);

    // Roster covers design only; dev task is created unassigned, silently.
    let roster = vec![TeamAssignment { function_id: design_fn, user_id: designer }];
    let plan = MaterializationPlan::build(&view, &[], &roster).unwrap();

    assert_eq!(plan.tasks[0].assignee_id, Some(designer));
    assert_eq!(plan.tasks[1].assignee_id, None);
}

#[test]
fn missing_sop_aborts_planning_entirely() {
    let recipe = make_recipe("Launch");
    let phase = make_phase(recipe.id, "Build", 0);
    let sop = make_sop("Fine task");
    let mut broken = fixed_task(phase.id, &sop, 1, vec![]);
    broken.sop = None;
    let broken_id = broken.task.id;

    let snap = snapshot(
        recipe,
        vec![(phase.clone(), vec![fixed_task(phase.id, &sop, 0, vec![]), broken])],
    );
    let view = all_template_tasks(&snap);

    match MaterializationPlan::build(&view, &[], &[]) {
        Err(GenerationError::MissingSop(id)) => assert_eq!(id, broken_id),
        other => panic!("expected MissingSop, got {other:?}"),
    }
}

#[test]
fn fixed_on_fixed_dependency_produces_single_edge() {
    let recipe = make_recipe("Launch");
    let phase = make_phase(recipe.id, "Build", 0);
    let sop_a = make_sop("A");
    let sop_b = make_sop("B");
    let a = fixed_task(phase.id, &sop_a, 0, vec![]);
    let b = fixed_task(phase.id, &sop_b, 1, vec![a.task.id]);
    let snap = snapshot(recipe, vec![(phase, vec![a, b])]);
    let view = all_template_tasks(&snap);

    let plan = MaterializationPlan::build(&view, &[], &[]).unwrap();
    assert_eq!(plan.edges.len(), 1);
    assert_eq!(plan.edges[0].blocked, 1);
    assert_eq!(plan.edges[0].blocking, 0);
}

#[test]
fn fixed_dependent_links_only_first_expansion_of_variable_blocker() {
    let recipe = make_recipe("Launch");
    let phase = make_phase(recipe.id, "Build", 0);
    let var_sop = make_sop("Design {page}");
    let fixed_sop = make_sop("QA pass");

    let var = variable_task(phase.id, &var_sop, 0, vec![]);
    let var_id = var.task.id;
    let qa = fixed_task(phase.id, &fixed_sop, 1, vec![var_id]);
    let snap = snapshot(recipe, vec![(phase, vec![var, qa])]);
    let view = all_template_tasks(&snap);

    let pages = vec![
        page("Home", vec![var_id]),
        page("About", vec![var_id]),
        page("Contact", vec![var_id]),
    ];
    let plan = MaterializationPlan::build(&view, &pages, &[]).unwrap();

    // Expansions occupy indices 0..3 in page order; QA is index 3.
    assert_eq!(plan.tasks.len(), 4);
    assert_eq!(plan.edges.len(), 1);
    assert_eq!(plan.edges[0].blocked, 3);
    assert_eq!(plan.edges[0].blocking, 0);
    assert_eq!(plan.tasks[0].page_name.as_deref(), Some("Home"));
}

#[test]
fn variable_dependent_on_fixed_blocker_links_every_instance() {
    let recipe = make_recipe("Launch");
    let phase = make_phase(recipe.id, "Build", 0);
    let fixed_sop = make_sop("Style guide");
    let var_sop = make_sop("Apply styles to {page}");

    let style = fixed_task(phase.id, &fixed_sop, 0, vec![]);
    let apply = variable_task(phase.id, &var_sop, 1, vec![style.task.id]);
    let apply_id = apply.task.id;
    let snap = snapshot(recipe, vec![(phase, vec![style, apply])]);
    let view = all_template_tasks(&snap);

    let pages = vec![page("Home", vec![apply_id]), page("About", vec![apply_id])];
    let plan = MaterializationPlan::build(&view, &pages, &[]).unwrap();

    assert_eq!(plan.tasks.len(), 3);
    let mut edges = plan.edges.clone();
    edges.sort_by_key(|e| e.blocked);
    assert_eq!(edges.len(), 2);
    assert!(edges.iter().all(|e| e.blocking == 0));
    assert_eq!(edges[0].blocked, 1);
    assert_eq!(edges[1].blocked, 2);
}

#[test]
fn variable_on_variable_dependency_matches_per_page() {
    let recipe = make_recipe("Launch");
    let phase = make_phase(recipe.id, "Build", 0);
    let design_sop = make_sop("Design {page}");
    let build_sop = make_sop("Build {page}");

    let design = variable_task(phase.id, &design_sop, 0, vec![]);
    let design_id = design.task.id;
    let build = variable_task(phase.id, &build_sop, 1, vec![design_id]);
    let build_id = build.task.id;
    let snap = snapshot(recipe, vec![(phase, vec![design, build])]);
    let view = all_template_tasks(&snap);

    // Home has both; About builds a page that was never designed.
    let pages = vec![
        page("Home", vec![design_id, build_id]),
        page("About", vec![build_id]),
    ];
    let plan = MaterializationPlan::build(&view, &pages, &[]).unwrap();

    // Tasks: Design Home (0), Build Home (1), Build About (2).
    assert_eq!(plan.tasks.len(), 3);
    assert_eq!(plan.edges.len(), 1);
    assert_eq!(plan.edges[0].blocked, 1);
    assert_eq!(plan.edges[0].blocking, 0);
}

#[test]
fn edge_to_blocker_with_zero_instances_is_dropped_silently() {
    let recipe = make_recipe("Launch");
    let phase = make_phase(recipe.id, "Build", 0);
    let var_sop = make_sop("Design {page}");
    let fixed_sop = make_sop("QA pass");

    let var = variable_task(phase.id, &var_sop, 0, vec![]);
    let qa = fixed_task(phase.id, &fixed_sop, 1, vec![var.task.id]);
    let snap = snapshot(recipe, vec![(phase, vec![var, qa])]);
    let view = all_template_tasks(&snap);

    // No page selected the variable blocker.
    let plan = MaterializationPlan::build(&view, &[page("Home", vec![])], &[]).unwrap();
    assert_eq!(plan.tasks.len(), 1);
    assert!(plan.edges.is_empty());
}

#[test]
fn cross_phase_dependencies_survive_expansion() {
    let recipe = make_recipe("Launch");
    let design_phase = make_phase(recipe.id, "Design", 0);
    let build_phase = make_phase(recipe.id, "Build", 1);
    let design_sop = make_sop("Design {page}");
    let build_sop = make_sop("Build {page}");

    let design = variable_task(design_phase.id, &design_sop, 0, vec![]);
    let design_id = design.task.id;
    let build = variable_task(build_phase.id, &build_sop, 0, vec![design_id]);
    let build_id = build.task.id;
    let snap = snapshot(
        recipe,
        vec![(design_phase, vec![design]), (build_phase, vec![build])],
    );
    let view = all_template_tasks(&snap);

    let pages = vec![
        page("Home", vec![design_id, build_id]),
        page("About", vec![design_id, build_id]),
    ];
    let plan = MaterializationPlan::build(&view, &pages, &[]).unwrap();

    // Design Home, Design About, Build Home, Build About.
    assert_eq!(plan.tasks.len(), 4);
    let mut edges = plan.edges.clone();
    edges.sort_by_key(|e| e.blocked);
    assert_eq!(edges.len(), 2);
    assert_eq!((edges[0].blocked, edges[0].blocking), (2, 0));
    assert_eq!((edges[1].blocked, edges[1].blocking), (3, 1));
}

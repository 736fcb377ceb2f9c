use super::*;
use loadforge_core::{Order, OrderCatalog};
use loadforge_model::{inject_warm_start, AssignmentModel, AssignmentModelBuilder, Comparison};
use loadforge_test::{ffd_trap, random_catalog, scenario_a, small_limits};

use crate::greedy::GreedyPacker;

fn assignment_model(catalog: &OrderCatalog) -> AssignmentModel {
    AssignmentModelBuilder::new(catalog).build().unwrap()
}

fn warm_started(catalog: &OrderCatalog) -> AssignmentModel {
    let mut model = assignment_model(catalog);
    let greedy = GreedyPacker::new(*catalog.limits())
        .pack_catalog(catalog)
        .unwrap();
    inject_warm_start(&mut model, greedy.assignment()).unwrap();
    model
}

#[test]
fn test_empty_model_is_optimal() {
    let solution = BranchAndBound::new()
        .solve(&Model::new("empty"), &SolveLimits::new())
        .unwrap();

    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert_eq!(solution.objective(), Some(0.0));
    assert!(solution.values().is_empty());
}

#[test]
fn test_negative_costs_are_taken() {
    let mut model = Model::new("budget");
    let a = model.add_binary("a");
    let b = model.add_binary("b");
    let c = model.add_binary("c");
    model.add_constraint(
        "budget",
        vec![(a, 2.0), (b, 2.0), (c, 3.0)],
        Comparison::LessOrEqual,
        4.0,
    );
    model.set_objective(vec![(a, -2.0), (b, -2.0), (c, -3.5)]);

    let solution = BranchAndBound::new()
        .solve(&model, &SolveLimits::new())
        .unwrap();
    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert_eq!(solution.objective(), Some(-4.0));
    assert!(solution.is_set(a) && solution.is_set(b) && !solution.is_set(c));
}

#[test]
fn test_unsatisfiable_row_is_infeasible() {
    let mut model = Model::new("too_much");
    let a = model.add_binary("a");
    let b = model.add_binary("b");
    model.add_constraint("at_least_three", vec![(a, 1.0), (b, 1.0)], Comparison::GreaterOrEqual, 3.0);

    let solution = BranchAndBound::new()
        .solve(&model, &SolveLimits::new())
        .unwrap();
    assert_eq!(solution.status(), SolveStatus::Infeasible);
    assert!(!solution.has_values());
}

#[test]
fn test_oversized_order_model_is_infeasible() {
    let orders = vec![Order::new(1, 200.0, 10.0, 1.0), Order::new(2, 10.0, 10.0, 1.0)];
    let model = AssignmentModelBuilder::from_orders(&orders, small_limits())
        .build()
        .unwrap();

    let solution = BranchAndBound::new()
        .solve(model.model(), &SolveLimits::new())
        .unwrap();
    assert_eq!(solution.status(), SolveStatus::Infeasible);
}

#[test]
fn test_scenario_a_optimum_is_two() {
    let catalog = scenario_a();
    let model = assignment_model(&catalog);

    let solution = BranchAndBound::new()
        .solve(model.model(), &SolveLimits::new())
        .unwrap();
    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert_eq!(solution.objective(), Some(2.0));

    let assignment = model.decode(&solution).unwrap();
    assert_eq!(assignment.container_count(), 2);
    assignment.verify(&catalog).unwrap();
}

#[test]
fn test_ffd_trap_optimum_beats_greedy() {
    let catalog = ffd_trap();
    let model = assignment_model(&catalog);

    let solution = BranchAndBound::new()
        .solve(model.model(), &SolveLimits::new())
        .unwrap();
    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert_eq!(solution.objective(), Some(2.0));
    assert!(model.model().is_feasible(solution.values()));

    let assignment = model.decode(&solution).unwrap();
    assert_eq!(assignment.container_count(), 2);
    assignment.verify(&catalog).unwrap();
}

#[test]
fn test_warm_start_keeps_optimum() {
    let catalog = ffd_trap();
    let model = warm_started(&catalog);

    let solution = BranchAndBound::new()
        .solve(model.model(), &SolveLimits::new())
        .unwrap();
    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert_eq!(solution.objective(), Some(2.0));
    // The greedy plan and the improvement over it.
    assert_eq!(solution.stats().incumbents, 2);
}

#[test]
fn test_greedy_warm_start_respects_container_numbering() {
    for seed in 0..8 {
        let catalog = random_catalog(seed, 12, small_limits(), 0.6);
        let model = warm_started(&catalog);
        let inner = model.model();

        let mut values = vec![0.0; inner.num_variables()];
        for (var, value) in inner.initial_values() {
            values[var.index()] = value;
        }
        assert!(inner.is_feasible(&values), "seed {seed}");
    }
}

#[test]
fn test_node_limit_without_incumbent_is_not_solved() {
    let catalog = ffd_trap();
    let model = assignment_model(&catalog);

    let solution = BranchAndBound::new()
        .solve(model.model(), &SolveLimits::new().with_node_limit(1))
        .unwrap();
    assert_eq!(solution.status(), SolveStatus::NotSolved);
    assert!(!solution.has_values());
    assert_eq!(solution.stats().nodes, 2);
}

#[test]
fn test_node_limit_with_warm_start_is_feasible() {
    let catalog = ffd_trap();
    let model = warm_started(&catalog);

    let solution = BranchAndBound::new()
        .solve(model.model(), &SolveLimits::new().with_node_limit(1))
        .unwrap();
    assert_eq!(solution.status(), SolveStatus::Feasible);
    assert_eq!(solution.objective(), Some(3.0));
}

#[test]
fn test_known_lower_bound_proves_warm_start() {
    let catalog = ffd_trap();
    let model = warm_started(&catalog);

    let limits = SolveLimits::new().with_objective_lower_bound(3.0);
    let solution = BranchAndBound::new().solve(model.model(), &limits).unwrap();
    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert_eq!(solution.objective(), Some(3.0));
    assert_eq!(solution.stats().nodes, 0);
}

#[test]
fn test_relative_gap_accepts_close_incumbent() {
    let catalog = ffd_trap();
    let model = warm_started(&catalog);

    let limits = SolveLimits::new()
        .with_objective_lower_bound(2.0)
        .with_relative_gap(0.5);
    let solution = BranchAndBound::new().solve(model.model(), &limits).unwrap();
    assert_eq!(solution.status(), SolveStatus::Feasible);
    assert_eq!(solution.objective(), Some(3.0));
}

#[test]
fn test_infeasible_hints_are_ignored() {
    let catalog = scenario_a();
    let mut model = assignment_model(&catalog);
    // Orders 1 and 2 together exceed the weight limit.
    let (x0, x1, y0) = (model.x(0, 0), model.x(1, 0), model.y(0));
    let hinted = model.model_mut();
    hinted.set_initial_value(x0, 1.0);
    hinted.set_initial_value(x1, 1.0);
    hinted.set_initial_value(y0, 1.0);

    let solution = BranchAndBound::new()
        .solve(model.model(), &SolveLimits::new())
        .unwrap();
    assert_eq!(solution.status(), SolveStatus::Optimal);
    assert_eq!(solution.objective(), Some(2.0));
}

#[test]
fn test_incumbents_are_streamed() {
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let catalog = ffd_trap();
    let model = warm_started(&catalog);

    let solution = BranchAndBound::new()
        .with_incumbent_sender(sender)
        .solve(model.model(), &SolveLimits::new())
        .unwrap();

    let mut streamed = Vec::new();
    while let Ok(incumbent) = receiver.try_recv() {
        streamed.push(incumbent);
    }
    let objectives: Vec<f64> = streamed.iter().map(|i| i.objective).collect();
    assert_eq!(objectives, vec![3.0, 2.0]);
    assert_eq!(streamed[1].values, solution.values());
}

//! End-to-end tests driving the full search-evaluate-analyze pipeline.

use gridsweep::prelude::*;

// =============================================================================
// Test: full run over a product study finds the single Pareto-optimal corner
// =============================================================================

#[test]
fn test_run_maximizes_product_of_two_ranges() {
    // Maximize r = a * b over a ∈ [1, 5], b ∈ [1, 4].
    // Optimal: a = 5, b = 4, r = 20, and no other combination ties it.
    let study = Study::single_objective(
        vec![
            Parameter::from_range("a", 1..=5).unwrap(),
            Parameter::from_range("b", 1..=4).unwrap(),
        ],
        Objective::maximize("r"),
    )
    .unwrap();

    let mut search = GridSearch::new(study).expect("grid over 20 combinations");
    assert_eq!(search.size(), 20);

    let front = search
        .run(|trial| {
            let a = trial.get("a").and_then(ParamValue::as_int).unwrap();
            let b = trial.get("b").and_then(ParamValue::as_int).unwrap();
            Ok(trial.evaluation([("r", (a * b) as f64)]))
        })
        .expect("search should run to exhaustion");

    assert_eq!(front.len(), 1);
    let (trial, evaluation) = &front[0];
    assert_eq!(trial.get("a").and_then(ParamValue::as_int), Some(5));
    assert_eq!(trial.get("b").and_then(ParamValue::as_int), Some(4));
    assert_eq!(evaluation.metric("r"), Some(20.0));
}

#[test]
fn test_run_minimization_finds_opposite_corner() {
    let study = Study::single_objective(
        vec![
            Parameter::from_range("a", 1..=5).unwrap(),
            Parameter::from_range("b", 1..=4).unwrap(),
        ],
        Objective::minimize("r"),
    )
    .unwrap();

    let front = GridSearch::new(study)
        .unwrap()
        .run(|trial| {
            let a = trial.get("a").and_then(ParamValue::as_int).unwrap();
            let b = trial.get("b").and_then(ParamValue::as_int).unwrap();
            Ok(trial.evaluation([("r", (a * b) as f64)]))
        })
        .unwrap();

    assert_eq!(front.len(), 1);
    assert_eq!(front[0].1.metric("r"), Some(1.0));
}

// =============================================================================
// Test: multi-objective runs
// =============================================================================

#[test]
fn test_aligned_objectives_share_a_winner() {
    // Both objectives improve with n, so n = 4 wins on both at once.
    let study = Study::new(
        vec![Parameter::from_range("n", 1..=4).unwrap()],
        vec![Objective::maximize("score"), Objective::minimize("loss")],
    )
    .unwrap();

    let front = GridSearch::new(study)
        .unwrap()
        .run(|trial| {
            let n = trial.get("n").and_then(ParamValue::as_int).unwrap() as f64;
            Ok(trial.evaluation([("score", n), ("loss", 1.0 / n)]))
        })
        .unwrap();

    assert_eq!(front.len(), 1);
    assert_eq!(front[0].1.metric("score"), Some(4.0));
}

#[test]
fn test_conflicting_objectives_leave_no_simultaneous_winner() {
    // score and cost both grow with n, so no candidate is at least as good
    // as every other on both objectives at once and the front is empty.
    let study = Study::new(
        vec![Parameter::from_range("n", 1..=3).unwrap()],
        vec![Objective::maximize("score"), Objective::minimize("cost")],
    )
    .unwrap();

    let front = GridSearch::new(study)
        .unwrap()
        .run(|trial| {
            let n = trial.get("n").and_then(ParamValue::as_int).unwrap() as f64;
            Ok(trial.evaluation([("score", n), ("cost", n)]))
        })
        .unwrap();

    assert!(front.is_empty());
}

// =============================================================================
// Test: driving the pull-based loop manually
// =============================================================================

#[test]
fn test_manual_loop_matches_run_driver() {
    let make_study = || {
        Study::single_objective(
            vec![
                Parameter::from_range("a", 1..=5).unwrap(),
                Parameter::from_range("b", 1..=4).unwrap(),
            ],
            Objective::maximize("r"),
        )
        .unwrap()
    };
    let evaluate = |trial: &Trial| {
        let a = trial.get("a").and_then(ParamValue::as_int).unwrap();
        let b = trial.get("b").and_then(ParamValue::as_int).unwrap();
        trial.evaluation([("r", (a * b) as f64)])
    };

    let mut search = GridSearch::new(make_study()).unwrap();
    while search.has_next() {
        let trial = search.next().unwrap();
        search.submit(evaluate(&trial));
    }
    let results = search.results();
    assert_eq!(results.len(), 20);
    let manual = pareto_pairs(&results, search.study().objectives()).unwrap();
    search.close();

    let driven = GridSearch::new(make_study())
        .unwrap()
        .run(|trial| Ok(evaluate(trial)))
        .unwrap();

    assert_eq!(manual.len(), driven.len());
    assert_eq!(
        manual[0].0.values(),
        driven[0].0.values(),
        "both drivers should surface the same front member"
    );
}

// =============================================================================
// Test: evaluator failures propagate out of the driver
// =============================================================================

#[test]
fn test_run_propagates_evaluator_failure() {
    let study = Study::single_objective(
        vec![Parameter::from_range("a", 1..=5).unwrap()],
        Objective::maximize("r"),
    )
    .unwrap();

    let err = GridSearch::new(study)
        .unwrap()
        .run(|trial| {
            if trial.get("a").and_then(ParamValue::as_int) == Some(3) {
                Err(Error::InvalidConfiguration {
                    reason: "evaluator gave up".to_string(),
                })
            } else {
                Ok(trial.evaluation([("r", 0.0)]))
            }
        })
        .unwrap_err();

    assert!(matches!(err, Error::InvalidConfiguration { .. }));
}

// =============================================================================
// Test: options are carried without changing grid behavior
// =============================================================================

#[test]
fn test_options_do_not_affect_enumeration() {
    let make_study = || {
        Study::single_objective(
            vec![Parameter::from_values("opt", ["sgd", "adam"]).unwrap()],
            Objective::minimize("loss"),
        )
        .unwrap()
    };

    let options = Options::new().with("budget", 100).with_empty("dry-run");
    let mut with_options = GridSearch::with_options(make_study(), options).unwrap();
    let mut without = GridSearch::new(make_study()).unwrap();

    while with_options.has_next() {
        assert_eq!(
            with_options.next().unwrap().values(),
            without.next().unwrap().values()
        );
    }
    assert!(!without.has_next());
}

//! Pareto front extraction for multi-objective results.
//!
//! With more than one objective there is generally no single best trial;
//! the goal is the **Pareto front** — the evaluations not dominated by any
//! other across all objectives simultaneously.
//!
//! The dominance test here is deliberately *weak*: a candidate survives only
//! if, for every objective, it is at least as good (`>=` when maximizing,
//! `<=` when minimizing) as **every** other candidate. Evaluations with
//! identical metric vectors therefore all remain in the front together.
//! This differs from the strict-dominance filter common in evolutionary
//! algorithms, which would retain a different set of ties.
//!
//! # Example
//!
//! ```
//! use gridsweep::pareto::pareto_front;
//! use gridsweep::{Objective, TrialManager};
//!
//! let manager = TrialManager::new(["x".to_string(), "y".to_string()].into()).unwrap();
//! let a = manager.create(Default::default()).evaluation([("x", 0.0), ("y", 2.0)]);
//! let b = manager.create(Default::default()).evaluation([("x", 2.0), ("y", 2.0)]);
//!
//! let objectives = [Objective::maximize("x"), Objective::maximize("y")];
//! let front = pareto_front(&[a, b.clone()], &objectives).unwrap();
//! assert_eq!(front.len(), 1);
//! assert_eq!(front[0].trial_id(), b.trial_id());
//! ```

use crate::error::{Error, Result};
use crate::objective::Objective;
use crate::trial::{Evaluation, Trial};
use crate::types::Direction;

/// Returns the Pareto-efficient subset of `evaluations`.
///
/// All evaluations are assumed to report the same metric set, covering at
/// least every objective name. Complexity is O(n²) in the number of
/// evaluations and linear in the number of objectives per pair.
///
/// # Errors
///
/// Returns [`Error::MissingMetric`] if any evaluation lacks a metric named
/// by an objective. This is a caller contract violation (mismatched metric
/// sets), not a runtime anomaly, so it fails hard instead of defaulting.
pub fn pareto_front(
    evaluations: &[Evaluation],
    objectives: &[Objective],
) -> Result<Vec<Evaluation>> {
    let mut front = Vec::new();
    for (i, candidate) in evaluations.iter().enumerate() {
        let mut winner = true;
        'contenders: for (j, contender) in evaluations.iter().enumerate() {
            if i == j {
                continue;
            }
            for objective in objectives {
                let ours = metric(candidate, objective.name())?;
                let theirs = metric(contender, objective.name())?;
                let holds = match objective.direction() {
                    Direction::Maximize => ours >= theirs,
                    Direction::Minimize => ours <= theirs,
                };
                if !holds {
                    winner = false;
                    break 'contenders;
                }
            }
        }
        if winner {
            front.push(candidate.clone());
        }
    }
    Ok(front)
}

/// Returns the Pareto-efficient subset of `(Trial, Evaluation)` result
/// pairs, as produced by [`Search::results`](crate::Search::results).
///
/// # Errors
///
/// Returns [`Error::MissingMetric`] under the same conditions as
/// [`pareto_front`].
pub fn pareto_pairs(
    results: &[(Trial, Evaluation)],
    objectives: &[Objective],
) -> Result<Vec<(Trial, Evaluation)>> {
    let evaluations: Vec<Evaluation> = results.iter().map(|(_, e)| e.clone()).collect();
    let front = pareto_front(&evaluations, objectives)?;
    // One accepted evaluation per trial, so trial ids identify front members.
    Ok(results
        .iter()
        .filter(|(trial, _)| front.iter().any(|e| e.trial_id() == trial.id()))
        .cloned()
        .collect())
}

fn metric(evaluation: &Evaluation, name: &str) -> Result<f64> {
    evaluation.metric(name).ok_or_else(|| Error::MissingMetric {
        trial_id: evaluation.trial_id(),
        metric: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::TrialManager;
    use crate::trial::TrialId;
    use std::collections::{HashMap, HashSet};

    //   A(0,2) ----- B(2,2)
    //   |            |
    //   |    C(1,1)  |
    //   |            |
    //   D(0,0) ----- E(2,0)
    fn corners() -> (Vec<Evaluation>, HashMap<&'static str, TrialId>) {
        let manager = TrialManager::new(HashSet::new()).unwrap();
        let mut ids = HashMap::new();
        let mut evaluations = Vec::new();
        for (name, x, y) in [
            ("A", 0.0, 2.0),
            ("B", 2.0, 2.0),
            ("C", 1.0, 1.0),
            ("D", 0.0, 0.0),
            ("E", 2.0, 0.0),
        ] {
            let trial = manager.create(HashMap::new());
            ids.insert(name, trial.id());
            evaluations.push(trial.evaluation([("x", x), ("y", y)]));
        }
        (evaluations, ids)
    }

    fn front_ids(objectives: &[Objective]) -> (Vec<TrialId>, HashMap<&'static str, TrialId>) {
        let (evaluations, ids) = corners();
        let front = pareto_front(&evaluations, objectives).unwrap();
        (front.iter().map(Evaluation::trial_id).collect(), ids)
    }

    #[test]
    fn test_maximize_both_keeps_top_right() {
        let (front, ids) = front_ids(&[Objective::maximize("x"), Objective::maximize("y")]);
        assert_eq!(front, vec![ids["B"]]);
    }

    #[test]
    fn test_minimize_both_keeps_bottom_left() {
        let (front, ids) = front_ids(&[Objective::minimize("x"), Objective::minimize("y")]);
        assert_eq!(front, vec![ids["D"]]);
    }

    #[test]
    fn test_maximize_x_minimize_y_keeps_bottom_right() {
        let (front, ids) = front_ids(&[Objective::maximize("x"), Objective::minimize("y")]);
        assert_eq!(front, vec![ids["E"]]);
    }

    #[test]
    fn test_minimize_x_maximize_y_keeps_top_left() {
        let (front, ids) = front_ids(&[Objective::minimize("x"), Objective::maximize("y")]);
        assert_eq!(front, vec![ids["A"]]);
    }

    #[test]
    fn test_identical_metric_vectors_co_survive() {
        let manager = TrialManager::new(HashSet::new()).unwrap();
        let twin_a = manager.create(HashMap::new()).evaluation([("x", 5.0)]);
        let twin_b = manager.create(HashMap::new()).evaluation([("x", 5.0)]);
        let loser = manager.create(HashMap::new()).evaluation([("x", 1.0)]);

        let front = pareto_front(
            &[twin_a.clone(), twin_b.clone(), loser],
            &[Objective::maximize("x")],
        )
        .unwrap();
        let ids: Vec<_> = front.iter().map(Evaluation::trial_id).collect();
        assert_eq!(ids, vec![twin_a.trial_id(), twin_b.trial_id()]);
    }

    #[test]
    fn test_empty_input_yields_empty_front() {
        let front = pareto_front(&[], &[Objective::maximize("x")]).unwrap();
        assert!(front.is_empty());
    }

    #[test]
    fn test_single_candidate_survives() {
        let manager = TrialManager::new(HashSet::new()).unwrap();
        let only = manager.create(HashMap::new()).evaluation([("x", 0.0)]);
        let front = pareto_front(&[only.clone()], &[Objective::minimize("x")]).unwrap();
        assert_eq!(front.len(), 1);
        assert_eq!(front[0].trial_id(), only.trial_id());
    }

    #[test]
    fn test_missing_metric_is_a_hard_error() {
        let manager = TrialManager::new(HashSet::new()).unwrap();
        let good = manager.create(HashMap::new()).evaluation([("x", 1.0)]);
        let bad = manager.create(HashMap::new()).evaluation([("y", 1.0)]);

        let err = pareto_front(&[good, bad.clone()], &[Objective::maximize("x")]).unwrap_err();
        match err {
            Error::MissingMetric { trial_id, metric } => {
                assert_eq!(trial_id, bad.trial_id());
                assert_eq!(metric, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

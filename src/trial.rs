//! Trials and evaluations: the two halves of one experiment.
//!
//! A [`Trial`] is a concrete assignment of a value to every parameter,
//! waiting to be evaluated by the caller. An [`Evaluation`] carries the
//! metric scores produced for a trial, referencing it by [`TrialId`] rather
//! than owning it. Both are immutable value objects owned by the
//! [`TrialManager`](crate::TrialManager) once registered.

use std::collections::HashMap;
use std::time::SystemTime;

use crate::value::ParamValue;

/// A unique identifier for a trial.
///
/// Generated randomly at trial creation; the
/// [`TrialManager`](crate::TrialManager) retries generation until the id is
/// unused among currently tracked trials, so ids are unique within a search
/// session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialId(u128);

impl TrialId {
    /// Draws a fresh random id from `rng`.
    pub(crate) fn random(rng: &mut fastrand::Rng) -> Self {
        Self(rng.u128(..))
    }
}

impl core::fmt::Display for TrialId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// One concrete set of parameter values to be evaluated.
///
/// Immutable once created. The caller evaluates the trial externally and
/// reports the outcome as an [`Evaluation`] referencing the trial's id.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trial {
    id: TrialId,
    created: SystemTime,
    values: HashMap<String, ParamValue>,
}

impl Trial {
    pub(crate) fn new(id: TrialId, values: HashMap<String, ParamValue>) -> Self {
        Self {
            id,
            created: SystemTime::now(),
            values,
        }
    }

    /// Returns this trial's unique identifier.
    #[must_use]
    pub fn id(&self) -> TrialId {
        self.id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created(&self) -> SystemTime {
        self.created
    }

    /// Returns the full parameter-name to value assignment.
    #[must_use]
    pub fn values(&self) -> &HashMap<String, ParamValue> {
        &self.values
    }

    /// Looks up the assigned value for one parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Builds an [`Evaluation`] for this trial from metric scores.
    ///
    /// ```
    /// # use gridsweep::{Objective, Parameter, Search, Study, GridSearch};
    /// # let study = Study::single_objective(
    /// #     vec![Parameter::from_range("a", 1..=2).unwrap()],
    /// #     Objective::maximize("r"),
    /// # ).unwrap();
    /// # let mut search = GridSearch::new(study).unwrap();
    /// let trial = search.next().unwrap();
    /// let a = trial.get("a").and_then(|v| v.as_int()).unwrap();
    /// let evaluation = trial.evaluation([("r", a as f64)]);
    /// search.submit(evaluation);
    /// ```
    #[must_use]
    pub fn evaluation<I, K>(&self, metrics: I) -> Evaluation
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Evaluation::new(self.id, metrics)
    }
}

impl core::fmt::Display for Trial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "trial {} {{", self.id)?;
        let mut names: Vec<&String> = self.values.keys().collect();
        names.sort();
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {name}={}", self.values[*name])?;
        }
        write!(f, " }}")
    }
}

/// The metric scores produced by evaluating a [`Trial`].
///
/// References its trial by id only; the trial itself stays owned by the
/// [`TrialManager`](crate::TrialManager). The completion timestamp is set to
/// the acceptance time when the manager stores the evaluation.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    trial_id: TrialId,
    completed: SystemTime,
    metrics: HashMap<String, f64>,
}

impl Evaluation {
    /// Creates an evaluation for the given trial id.
    #[must_use]
    pub fn new<I, K>(trial_id: TrialId, metrics: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            trial_id,
            completed: SystemTime::now(),
            metrics: metrics.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Creates an evaluation for the given trial.
    #[must_use]
    pub fn of<I, K>(trial: &Trial, metrics: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self::new(trial.id(), metrics)
    }

    /// Returns the id of the trial this evaluation belongs to.
    #[must_use]
    pub fn trial_id(&self) -> TrialId {
        self.trial_id
    }

    /// Returns the completion timestamp.
    #[must_use]
    pub fn completed(&self) -> SystemTime {
        self.completed
    }

    /// Returns all reported metrics.
    #[must_use]
    pub fn metrics(&self) -> &HashMap<String, f64> {
        &self.metrics
    }

    /// Looks up one metric score.
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    /// Stamps the completion time, called when the manager accepts the
    /// evaluation.
    pub(crate) fn mark_completed(&mut self) {
        self.completed = SystemTime::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(bits: u128) -> TrialId {
        TrialId(bits)
    }

    #[test]
    fn test_trial_value_lookup() {
        let values: HashMap<String, ParamValue> =
            [("a".to_string(), ParamValue::Int(3))].into_iter().collect();
        let trial = Trial::new(id(1), values);
        assert_eq!(trial.get("a"), Some(&ParamValue::Int(3)));
        assert!(trial.get("b").is_none());
    }

    #[test]
    fn test_evaluation_references_trial_by_id() {
        let trial = Trial::new(id(7), HashMap::new());
        let evaluation = trial.evaluation([("r", 1.5)]);
        assert_eq!(evaluation.trial_id(), trial.id());
        assert_eq!(evaluation.metric("r"), Some(1.5));
        assert!(evaluation.metric("missing").is_none());
    }

    #[test]
    fn test_trial_id_display_is_stable_hex() {
        assert_eq!(id(0xabc).to_string(), format!("{:032x}", 0xabc_u128));
    }
}

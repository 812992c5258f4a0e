//! The search session abstraction and its exhaustive grid implementation.
//!
//! A [`Search`] drives one enumerate-evaluate-submit session over a
//! [`Study`]. The only strategy shipped today is [`GridSearch`], which walks
//! the full Cartesian product of all parameter domains; the trait seam
//! exists so callers can program against the session surface rather than a
//! concrete strategy.

mod grid;

use std::collections::HashMap;

pub use grid::GridSearch;

use crate::error::Result;
use crate::pareto;
use crate::study::Study;
use crate::trial::{Evaluation, Trial};
use crate::value::ParamValue;

/// An unstructured configuration bag accepted by search sessions.
///
/// Names map to optional values, for forward extensibility. The grid
/// strategy accepts options but does not consume any today.
#[derive(Clone, Debug, Default)]
pub struct Options {
    values: HashMap<String, Option<ParamValue>>,
}

impl Options {
    /// Creates an empty option bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a named option, replacing any previous value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.values.insert(name.into(), Some(value.into()));
        self
    }

    /// Sets a named option with no value.
    #[must_use]
    pub fn with_empty(mut self, name: impl Into<String>) -> Self {
        self.values.insert(name.into(), None);
        self
    }

    /// Looks up a named option. Returns `None` for unset names and
    /// `Some(None)` for names set without a value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Option<&ParamValue>> {
        self.values.get(name).map(Option::as_ref)
    }

    /// Returns `true` if no options are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A parameter search session: a pull-based trial producer plus the
/// submission and results surface around it.
///
/// Sessions are single-producer: `next` mutates sequencing state in place,
/// so one thread drives the iteration. Submission is routed to a
/// concurrency-safe tracker, so evaluations may be produced and submitted
/// from worker threads via the session's owner.
pub trait Search {
    /// Returns the study this session searches.
    fn study(&self) -> &Study;

    /// Returns `true` while untried combinations remain.
    fn has_next(&self) -> bool;

    /// Produces the next [`Trial`] in the session's deterministic order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Exhausted`](crate::Error::Exhausted) when the space
    /// is used up.
    fn next(&mut self) -> Result<Trial>;

    /// Submits the evaluation of a previously produced trial.
    ///
    /// Anomalous submissions (unknown id, duplicate, missing metrics) are
    /// absorbed, never raised.
    fn submit(&mut self, evaluation: Evaluation);

    /// Returns every accepted evaluation with its originating trial.
    fn results(&self) -> Vec<(Trial, Evaluation)>;

    /// Terminates the session. Idempotent; releases no resources today.
    fn close(&mut self) {}

    /// Runs the full iterate-evaluate-submit loop to exhaustion and returns
    /// the Pareto front of the results as `(Trial, Evaluation)` pairs.
    ///
    /// `evaluate` is the caller's opaque evaluation function. Its failures
    /// propagate immediately and uncaught — no retry, no skipping.
    ///
    /// # Errors
    ///
    /// Propagates evaluation failures, enumeration invariant violations,
    /// and [`Error::MissingMetric`](crate::Error::MissingMetric) from the
    /// final Pareto computation.
    fn run<F>(&mut self, mut evaluate: F) -> Result<Vec<(Trial, Evaluation)>>
    where
        Self: Sized,
        F: FnMut(&Trial) -> Result<Evaluation>,
    {
        while self.has_next() {
            let trial = self.next()?;
            let evaluation = evaluate(&trial)?;
            self.submit(evaluation);
        }
        let results = self.results();
        let front = pareto::pareto_pairs(&results, self.study().objectives())?;
        self.close();
        Ok(front)
    }
}

//! Concurrency-safe trial and evaluation lifecycle tracking.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::trial::{Evaluation, Trial, TrialId};
use crate::types::TrialStatus;
use crate::value::ParamValue;

/// Metric names starting with this character are reserved for internal use
/// and rejected at tracker construction.
pub const RESERVED_METRIC_PREFIX: char = '@';

/// Matches submitted [`Evaluation`]s to previously created [`Trial`]s.
///
/// The tracker is explicitly designed for concurrent access: a search engine
/// may mint trials on one thread while evaluation workers submit results on
/// others. All three public operations — [`create`](Self::create),
/// [`complete`](Self::complete), and [`results`](Self::results) — run under
/// one coarse mutex spanning the entire internal state (status table, trial
/// store, evaluation list), so every composite check-then-act is atomic and
/// `results()` always observes a consistent snapshot. The coarse lock is a
/// deliberate simplicity/contention trade-off and can be revisited if
/// profiling ever shows contention.
///
/// Submission anomalies never abort the caller: an unknown trial id or a
/// duplicate completion is ignored, and an evaluation missing expected
/// metrics marks the trial [`Rejected`](TrialStatus::Rejected). All three
/// cases are reported as warn-level diagnostics.
#[derive(Debug)]
pub struct TrialManager {
    expected_metrics: HashSet<String>,
    // Accepted for forward compatibility; no abandonment sweep runs today,
    // so this value is inert and TrialStatus::Abandoned stays unreachable.
    #[allow(dead_code)]
    timeout: Duration,
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    rng: fastrand::Rng,
    status: HashMap<TrialId, TrialStatus>,
    trials: HashMap<TrialId, Trial>,
    evaluations: Vec<Evaluation>,
}

impl TrialManager {
    /// Default trial timeout, currently inert.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

    /// Creates a tracker expecting the given metric names on every
    /// submitted evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if any expected metric name
    /// starts with the reserved [`RESERVED_METRIC_PREFIX`].
    pub fn new(expected_metrics: HashSet<String>) -> Result<Self> {
        Self::with_timeout(expected_metrics, Self::DEFAULT_TIMEOUT)
    }

    /// Creates a tracker with an explicit trial timeout.
    ///
    /// The timeout is stored but not yet enforced; no trial is ever moved to
    /// [`TrialStatus::Abandoned`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if any expected metric name
    /// starts with the reserved [`RESERVED_METRIC_PREFIX`].
    pub fn with_timeout(expected_metrics: HashSet<String>, timeout: Duration) -> Result<Self> {
        let mut reserved: Vec<&str> = expected_metrics
            .iter()
            .filter(|name| name.starts_with(RESERVED_METRIC_PREFIX))
            .map(String::as_str)
            .collect();
        if !reserved.is_empty() {
            reserved.sort_unstable();
            return Err(Error::InvalidConfiguration {
                reason: format!("invalid metrics: {}", reserved.join(", ")),
            });
        }
        Ok(Self {
            expected_metrics,
            timeout,
            inner: Mutex::new(Inner {
                rng: fastrand::Rng::new(),
                status: HashMap::new(),
                trials: HashMap::new(),
                evaluations: Vec::new(),
            }),
        })
    }

    /// Mints and registers a fresh [`Trial`] for the given value assignment.
    ///
    /// The generated id is guaranteed unused among currently tracked ids;
    /// generation retries until a free id is found. The new trial starts
    /// [`Pending`](TrialStatus::Pending).
    pub fn create(&self, values: HashMap<String, ParamValue>) -> Trial {
        let mut inner = self.inner.lock();
        let id = loop {
            let candidate = TrialId::random(&mut inner.rng);
            if !inner.status.contains_key(&candidate) {
                break candidate;
            }
        };
        let trial = Trial::new(id, values);
        inner.status.insert(id, TrialStatus::Pending);
        inner.trials.insert(id, trial.clone());
        trial
    }

    /// Accepts or discards a submitted evaluation.
    ///
    /// - Unknown trial id: ignored, status unchanged.
    /// - Trial already [`Completed`](TrialStatus::Completed): ignored.
    /// - Missing any expected metric: the trial becomes
    ///   [`Rejected`](TrialStatus::Rejected) and the evaluation is discarded.
    /// - Otherwise: the evaluation is stored with its completion time set to
    ///   the acceptance time and the trial becomes `Completed`.
    ///
    /// None of these outcomes is an error; external evaluators are treated
    /// as unreliable and their anomalies must not abort the search loop.
    pub fn complete(&self, mut evaluation: Evaluation) {
        let mut inner = self.inner.lock();
        let trial_id = evaluation.trial_id();

        let Some(&current) = inner.status.get(&trial_id) else {
            trace_warn!("ignoring result for trial {trial_id} (unknown identifier)");
            return;
        };
        if current == TrialStatus::Completed {
            trace_warn!("ignoring result for trial {trial_id} (already completed)");
            return;
        }

        let mut missing: Vec<&str> = self
            .expected_metrics
            .iter()
            .filter(|name| !evaluation.metrics().contains_key(*name))
            .map(String::as_str)
            .collect();
        if missing.is_empty() {
            trace_info!("received result for trial {trial_id}");
            evaluation.mark_completed();
            inner.evaluations.push(evaluation);
            inner.status.insert(trial_id, TrialStatus::Completed);
        } else {
            missing.sort_unstable();
            trace_warn!(
                "ignoring result for trial {trial_id} (missing metrics: {})",
                missing.join(", ")
            );
            inner.status.insert(trial_id, TrialStatus::Rejected);
        }
    }

    /// Returns every accepted evaluation paired with its originating trial.
    ///
    /// Taken under the same lock as `create`/`complete`, so the snapshot is
    /// always internally consistent.
    #[must_use]
    pub fn results(&self) -> Vec<(Trial, Evaluation)> {
        let inner = self.inner.lock();
        inner
            .evaluations
            .iter()
            .map(|evaluation| {
                let trial = inner.trials[&evaluation.trial_id()].clone();
                (trial, evaluation.clone())
            })
            .collect()
    }

    /// Returns the current status of a tracked trial, or `None` for an
    /// unknown id.
    #[must_use]
    pub fn status(&self, id: TrialId) -> Option<TrialStatus> {
        self.inner.lock().status.get(&id).copied()
    }

    /// Returns the number of trials created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().trials.len()
    }

    /// Returns `true` if no trials have been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Core types shared across the crate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The direction of optimization for one objective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Higher metric values are better.
    Maximize,
    /// Lower metric values are better.
    Minimize,
}

/// The lifecycle state of a trial inside the [`TrialManager`](crate::TrialManager).
///
/// Transitions happen only through `create` (-> `Pending`) and `complete`
/// (-> `Completed` or `Rejected`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrialStatus {
    /// Created, waiting for an evaluation.
    Pending,
    /// An evaluation carrying all expected metrics was accepted.
    Completed,
    /// Reserved for timeout-based cleanup. No code path reaches this state
    /// today; the tracker accepts a timeout but runs no abandonment sweep.
    Abandoned,
    /// An evaluation arrived but was missing expected metrics.
    Rejected,
}

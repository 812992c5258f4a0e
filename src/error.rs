//! Error types for study construction, search sessions, and analysis.

use crate::trial::TrialId;
use crate::value::ParamValue;

/// Every failure this crate can report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a domain is constructed with impossible contents,
    /// e.g. a numerical range with `min > max` or an empty categorical set.
    #[error("invalid domain: {reason}")]
    InvalidDomain {
        /// Why the domain was rejected.
        reason: String,
    },

    /// Returned when a parameter's current value is not a member of its domain.
    #[error("parameter '{name}': value {value} is out of bounds")]
    OutOfBounds {
        /// The name of the offending parameter.
        name: String,
        /// The rejected value.
        value: ParamValue,
    },

    /// Returned when a study is constructed without parameters or objectives,
    /// or with duplicate names in either set.
    #[error("invalid study: {reason}")]
    InvalidStudy {
        /// Why the study was rejected.
        reason: String,
    },

    /// Returned when a trial tracker is configured with reserved metric names.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// Returned when `next()` is called on a search whose space is used up.
    #[error("search space exhausted")]
    Exhausted,

    /// Returned when the total search-space size does not fit in 64 bits.
    #[error("search space size overflows u64")]
    Overflow,

    /// Returned during Pareto computation when an evaluation is missing a
    /// metric required by an objective. This is a caller contract violation:
    /// all evaluations handed to the calculator must report the same metrics.
    #[error("evaluation for trial {trial_id} is missing metric '{metric}'")]
    MissingMetric {
        /// The trial whose evaluation lacks the metric.
        trial_id: TrialId,
        /// The metric name that could not be found.
        metric: String,
    },

    /// Returned when an internal invariant is violated.
    #[error("internal error: {0}")]
    Internal(&'static str),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, Error>;

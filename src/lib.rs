#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]

//! Exhaustive grid search over mixed parameter spaces with multi-objective
//! Pareto analysis. Declare a [`Study`] (parameters plus objectives), pull
//! [`Trial`]s from a [`GridSearch`] session one combination at a time,
//! evaluate them with your own code, submit the resulting [`Evaluation`]s,
//! and extract the Pareto-efficient frontier at the end. Evaluation itself
//! is never performed by this crate — it is an opaque function you supply.
//!
//! # Getting started
//!
//! Sweep two integer parameters and maximize their product:
//!
//! ```
//! use gridsweep::prelude::*;
//!
//! let study = Study::single_objective(
//!     vec![
//!         Parameter::from_range("a", 1..=5)?,
//!         Parameter::from_range("b", 1..=4)?,
//!     ],
//!     Objective::maximize("r"),
//! )?;
//!
//! let front = GridSearch::new(study)?.run(|trial| {
//!     let a = trial.get("a").and_then(|v| v.as_int()).unwrap();
//!     let b = trial.get("b").and_then(|v| v.as_int()).unwrap();
//!     Ok(trial.evaluation([("r", (a * b) as f64)]))
//! })?;
//!
//! let (best_trial, best) = &front[0];
//! assert_eq!(best_trial.get("a").and_then(|v| v.as_int()), Some(5));
//! assert_eq!(best.metric("r"), Some(20.0));
//! # Ok::<(), gridsweep::Error>(())
//! ```
//!
//! # Core concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Domain`] | The finite set of legal values for one parameter — an integer range or a categorical set. |
//! | [`Parameter`] | A named value bound to a domain. |
//! | [`Objective`] | A named metric plus a [`Direction`] (maximize or minimize). |
//! | [`Study`] | One optimization problem: validated parameters and objectives. |
//! | [`GridSearch`] | Pull-based enumerator walking the full Cartesian product in a fixed order. |
//! | [`TrialManager`] | Concurrency-safe tracker matching submitted evaluations to trials. |
//! | [`pareto`] | Weak-dominance Pareto front extraction over completed evaluations. |
//!
//! # Driving the loop yourself
//!
//! [`Search::run`] is a convenience; the underlying session surface is
//! pull-based, so the caller may interleave its own work:
//!
//! ```
//! use gridsweep::prelude::*;
//!
//! let study = Study::single_objective(
//!     vec![Parameter::from_values("opt", ["sgd", "adam"])?],
//!     Objective::minimize("loss"),
//! )?;
//! let mut search = GridSearch::new(study)?;
//!
//! while search.has_next() {
//!     let trial = search.next()?;
//!     let loss = if trial.get("opt").unwrap().as_str() == Some("adam") { 0.1 } else { 0.3 };
//!     search.submit(trial.evaluation([("loss", loss)]));
//! }
//! assert_eq!(search.results().len(), 2);
//! # Ok::<(), gridsweep::Error>(())
//! ```
//!
//! # Feature flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on the public value types | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at key search points | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::warn!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_warn {
    ($($arg:tt)*) => {};
}

mod domain;
mod error;
mod manager;
mod objective;
mod parameter;
pub mod pareto;
mod search;
mod study;
mod trial;
mod types;
mod value;

pub use domain::{Domain, DomainIter};
pub use error::{Error, Result};
pub use manager::{TrialManager, RESERVED_METRIC_PREFIX};
pub use objective::Objective;
pub use parameter::Parameter;
pub use search::{GridSearch, Options, Search};
pub use study::Study;
pub use trial::{Evaluation, Trial, TrialId};
pub use types::{Direction, TrialStatus};
pub use value::ParamValue;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use gridsweep::prelude::*;
/// ```
pub mod prelude {
    pub use crate::domain::Domain;
    pub use crate::error::{Error, Result};
    pub use crate::manager::TrialManager;
    pub use crate::objective::Objective;
    pub use crate::pareto::{pareto_front, pareto_pairs};
    pub use crate::search::{GridSearch, Options, Search};
    pub use crate::study::Study;
    pub use crate::trial::{Evaluation, Trial, TrialId};
    pub use crate::types::{Direction, TrialStatus};
    pub use crate::value::ParamValue;
    pub use crate::Parameter;
}

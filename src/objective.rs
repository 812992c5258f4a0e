//! Objectives: named metrics with an optimization direction.

use crate::types::Direction;

/// A named metric to optimize, together with its [`Direction`].
///
/// Objective names double as the metric keys an
/// [`Evaluation`](crate::Evaluation) must report.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objective {
    name: String,
    direction: Direction,
}

impl Objective {
    /// Creates an objective for the given metric name and direction.
    #[must_use]
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }

    /// Shorthand for an objective that maximizes `name`.
    #[must_use]
    pub fn maximize(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Maximize)
    }

    /// Shorthand for an objective that minimizes `name`.
    #[must_use]
    pub fn minimize(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Minimize)
    }

    /// Returns the metric name this objective tracks.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the optimization direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

//! Domains: the sets of legal values parameters draw from.
//!
//! A [`Domain`] is a closed two-variant union: a [`Numerical`](Domain::Numerical)
//! integer range or a [`Categorical`](Domain::Categorical) set of literals.
//! Every domain is finite, immutable after construction, and iterable in a
//! fixed order, which is what makes exhaustive grid enumeration well defined.
//!
//! # Examples
//!
//! ```
//! use gridsweep::{Domain, ParamValue};
//!
//! let hidden = Domain::numerical(32, 256).unwrap();
//! assert_eq!(hidden.size(), 225);
//! assert!(hidden.contains(&ParamValue::Int(128)));
//!
//! let act = Domain::categorical(["relu", "tanh", "gelu"]).unwrap();
//! assert_eq!(act.size(), 3);
//! let all: Vec<_> = act.iter().collect();
//! assert_eq!(all[0], ParamValue::Str("relu".to_string()));
//! ```

use core::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::value::ParamValue;

/// A finite set of discrete values, either an integer range or a set of
/// unique literals.
///
/// Invariants, established at construction and never violated afterwards:
///
/// - `size() >= 1` — both variants reject emptiness.
/// - A `Numerical` domain has `min <= max` and size `max - min + 1`.
/// - A `Categorical` domain holds unique values in a fixed order.
///
/// Iteration order is deterministic: ascending for `Numerical`, stored order
/// for `Categorical`. A fresh [`iter()`](Self::iter) always replays the full
/// sequence from the start.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Domain {
    /// An inclusive integer range `[min, max]`.
    Numerical {
        /// Lower bound, inclusive.
        min: i64,
        /// Upper bound, inclusive.
        max: i64,
    },
    /// A non-empty set of unique values, iterated in insertion order.
    Categorical(Vec<ParamValue>),
}

impl Domain {
    /// Creates a numerical domain over the inclusive range `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] if `min > max`.
    pub fn numerical(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidDomain {
                reason: format!("invalid bounds ({min} is greater than {max})"),
            });
        }
        Ok(Self::Numerical { min, max })
    }

    /// Creates a categorical domain from the given values.
    ///
    /// Duplicates are collapsed, keeping the first occurrence of each value,
    /// so the stored order is the order of first appearance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] if no values are supplied.
    pub fn categorical<I, V>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        let mut unique: Vec<ParamValue> = Vec::new();
        for value in values {
            let value = value.into();
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        if unique.is_empty() {
            return Err(Error::InvalidDomain {
                reason: "invalid value set (must not be empty)".to_string(),
            });
        }
        Ok(Self::Categorical(unique))
    }

    /// Creates a single-value domain.
    #[must_use]
    pub fn singleton(value: impl Into<ParamValue>) -> Self {
        match value.into() {
            ParamValue::Int(v) => Self::Numerical { min: v, max: v },
            other => Self::Categorical(vec![other]),
        }
    }

    /// Creates a numerical domain from an inclusive range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] if the range is empty.
    pub fn from_range(range: RangeInclusive<i64>) -> Result<Self> {
        Self::numerical(*range.start(), *range.end())
    }

    /// Returns the exact number of values in this domain.
    ///
    /// Computed in 64-bit arithmetic. The one unrepresentable case is a
    /// numerical domain spanning the entire `i64` range, whose size would be
    /// `u64::MAX + 1`; that degenerate span is a documented limitation and
    /// reported as `u64::MAX`.
    #[must_use]
    pub fn size(&self) -> u64 {
        match self {
            Self::Numerical { min, max } => max.abs_diff(*min).saturating_add(1),
            Self::Categorical(values) => values.len() as u64,
        }
    }

    /// Returns `true` if `value` is a member of this domain.
    #[must_use]
    pub fn contains(&self, value: &ParamValue) -> bool {
        match self {
            Self::Numerical { min, max } => {
                matches!(value, ParamValue::Int(v) if v >= min && v <= max)
            }
            Self::Categorical(values) => values.contains(value),
        }
    }

    /// Draws a uniform sample (with replacement) from this domain.
    ///
    /// The random source is an explicit dependency so callers and tests can
    /// control determinism; see [`sample`](Self::sample) for the seeded or
    /// process-default convenience form.
    #[must_use]
    pub fn random(&self, rng: &mut fastrand::Rng) -> ParamValue {
        match self {
            Self::Numerical { min, max } => ParamValue::Int(rng.i64(*min..=*max)),
            Self::Categorical(values) => values[rng.usize(..values.len())].clone(),
        }
    }

    /// Draws a uniform sample using a seeded generator, or a fresh
    /// process-default generator when `seed` is `None`.
    ///
    /// For a given seed the result is fully deterministic.
    #[must_use]
    pub fn sample(&self, seed: Option<u64>) -> ParamValue {
        let mut rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        self.random(&mut rng)
    }

    /// Returns a lazy iterator over every value in this domain, exactly once.
    ///
    /// The iterator is finite and the sequence is restartable: calling
    /// `iter()` again replays the full sequence from the beginning.
    #[must_use]
    pub fn iter(&self) -> DomainIter {
        match self {
            Self::Numerical { min, max } => DomainIter(IterInner::Numerical {
                next: *min,
                max: *max,
                exhausted: false,
            }),
            Self::Categorical(values) => DomainIter(IterInner::Categorical {
                values: values.clone(),
                pos: 0,
            }),
        }
    }
}

impl core::fmt::Display for Domain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Numerical { min, max } => write!(f, "[{min}, {max}]"),
            Self::Categorical(values) => {
                write!(f, "{{")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// An owning iterator over the values of a [`Domain`].
///
/// Produced by [`Domain::iter`]. Yields every domain value exactly once in
/// the domain's canonical order.
#[derive(Clone, Debug)]
pub struct DomainIter(IterInner);

#[derive(Clone, Debug)]
enum IterInner {
    Numerical {
        next: i64,
        max: i64,
        // Tracked separately so a domain ending at i64::MAX terminates.
        exhausted: bool,
    },
    Categorical {
        values: Vec<ParamValue>,
        pos: usize,
    },
}

impl Iterator for DomainIter {
    type Item = ParamValue;

    fn next(&mut self) -> Option<ParamValue> {
        match &mut self.0 {
            IterInner::Numerical {
                next,
                max,
                exhausted,
            } => {
                if *exhausted {
                    return None;
                }
                let value = *next;
                if value == *max {
                    *exhausted = true;
                } else {
                    *next += 1;
                }
                Some(ParamValue::Int(value))
            }
            IterInner::Categorical { values, pos } => {
                let value = values.get(*pos).cloned()?;
                *pos += 1;
                Some(value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numerical_size_and_membership() {
        let domain = Domain::numerical(1, 5).unwrap();
        assert_eq!(domain.size(), 5);
        assert!(domain.contains(&ParamValue::Int(1)));
        assert!(domain.contains(&ParamValue::Int(5)));
        assert!(!domain.contains(&ParamValue::Int(6)));
        assert!(!domain.contains(&ParamValue::Str("1".to_string())));
    }

    #[test]
    fn test_numerical_rejects_inverted_bounds() {
        assert!(matches!(
            Domain::numerical(5, 1),
            Err(Error::InvalidDomain { .. })
        ));
    }

    #[test]
    fn test_categorical_size_and_membership() {
        let domain = Domain::categorical(["A", "B", "C"]).unwrap();
        assert_eq!(domain.size(), 3);
        assert!(domain.contains(&ParamValue::Str("A".to_string())));
        assert!(!domain.contains(&ParamValue::Str("D".to_string())));
    }

    #[test]
    fn test_categorical_rejects_empty() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            Domain::categorical(empty),
            Err(Error::InvalidDomain { .. })
        ));
    }

    #[test]
    fn test_categorical_collapses_duplicates() {
        let domain = Domain::categorical(["x", "y", "x"]).unwrap();
        assert_eq!(domain.size(), 2);
        let values: Vec<_> = domain.iter().collect();
        assert_eq!(values, vec!["x".into(), "y".into()]);
    }

    #[test]
    fn test_singleton() {
        let domain = Domain::singleton(123);
        assert_eq!(domain.size(), 1);
        assert_eq!(domain.sample(None), ParamValue::Int(123));
    }

    #[test]
    fn test_size_matches_iteration_count() {
        for domain in [
            Domain::numerical(-3, 7).unwrap(),
            Domain::categorical([true, false]).unwrap(),
            Domain::singleton("only"),
        ] {
            assert_eq!(domain.size(), domain.iter().count() as u64);
        }
    }

    #[test]
    fn test_every_iterated_value_is_a_member() {
        let domain = Domain::numerical(-2, 2).unwrap();
        for value in domain.iter() {
            assert!(domain.contains(&value));
        }
    }

    #[test]
    fn test_iteration_is_restartable() {
        let domain = Domain::categorical(["a", "b", "c"]).unwrap();
        let first: Vec<_> = domain.iter().collect();
        let second: Vec<_> = domain.iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_numerical_iteration_is_ascending() {
        let domain = Domain::numerical(1, 4).unwrap();
        let values: Vec<_> = domain.iter().collect();
        assert_eq!(
            values,
            vec![
                ParamValue::Int(1),
                ParamValue::Int(2),
                ParamValue::Int(3),
                ParamValue::Int(4)
            ]
        );
    }

    #[test]
    fn test_iterator_at_i64_max_terminates() {
        let domain = Domain::numerical(i64::MAX - 1, i64::MAX).unwrap();
        let values: Vec<_> = domain.iter().collect();
        assert_eq!(
            values,
            vec![ParamValue::Int(i64::MAX - 1), ParamValue::Int(i64::MAX)]
        );
    }

    #[test]
    fn test_seeded_sampling_is_deterministic() {
        let domain = Domain::numerical(0, 1_000_000).unwrap();
        let a = domain.sample(Some(42));
        let b = domain.sample(Some(42));
        assert_eq!(a, b);
        assert!(domain.contains(&a));
    }

    #[test]
    fn test_random_always_yields_members() {
        let numerical = Domain::numerical(10, 20).unwrap();
        let categorical = Domain::categorical(["x", "y", "z"]).unwrap();
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..100 {
            assert!(numerical.contains(&numerical.random(&mut rng)));
            assert!(categorical.contains(&categorical.random(&mut rng)));
        }
    }

    #[test]
    fn test_injected_rng_controls_sampling() {
        let domain = Domain::numerical(0, 1_000_000).unwrap();
        let mut rng_a = fastrand::Rng::with_seed(99);
        let mut rng_b = fastrand::Rng::with_seed(99);
        for _ in 0..10 {
            assert_eq!(domain.random(&mut rng_a), domain.random(&mut rng_b));
        }
    }
}

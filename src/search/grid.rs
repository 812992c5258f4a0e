//! Exhaustive grid search: every combination of parameter values, once.

use std::collections::HashMap;

use crate::domain::DomainIter;
use crate::error::{Error, Result};
use crate::manager::TrialManager;
use crate::search::{Options, Search};
use crate::study::Study;
use crate::trial::{Evaluation, Trial};
use crate::value::ParamValue;

/// Enumerates the full Cartesian product of a study's parameter domains,
/// producing one [`Trial`] per [`next()`](Search::next) call without ever
/// materializing the product.
///
/// # Enumeration order
///
/// The step counter is decoded as a mixed-radix number whose digit bases are
/// the domain sizes, in parameter declaration order: the first-declared
/// parameter is the least significant digit and cycles every step, each
/// later parameter advances only when all faster ones complete a full cycle
/// — the odometer pattern, equivalent to nested loops with the first
/// parameter innermost. The n-th call to `next()` therefore yields the same
/// value combination on every run of an unchanged [`Study`].
///
/// Between steps only the digits that changed touch their domain iterators:
/// an unchanged digit reuses the previous value, an incremented digit
/// advances its iterator once, and a wrapped (carried) digit gets a fresh
/// iterator advanced to the domain's first value.
///
/// # Concurrency
///
/// The enumerator itself is single-producer: `next()` mutates cursor state
/// in place. The trial tracker behind [`submit`](Search::submit) and
/// [`results`](Search::results) is fully synchronized, so evaluations may
/// be produced on worker threads and handed back through the owner.
///
/// # Examples
///
/// ```
/// use gridsweep::prelude::*;
///
/// let study = Study::single_objective(
///     vec![
///         Parameter::from_range("a", 1..=5).unwrap(),
///         Parameter::from_range("b", 1..=4).unwrap(),
///     ],
///     Objective::maximize("r"),
/// )
/// .unwrap();
///
/// let front = GridSearch::new(study)
///     .unwrap()
///     .run(|trial| {
///         let a = trial.get("a").and_then(|v| v.as_int()).unwrap();
///         let b = trial.get("b").and_then(|v| v.as_int()).unwrap();
///         Ok(trial.evaluation([("r", (a * b) as f64)]))
///     })
///     .unwrap();
///
/// assert_eq!(front.len(), 1);
/// assert_eq!(front[0].1.metric("r"), Some(20.0));
/// ```
pub struct GridSearch {
    study: Study,
    // Accepted for forward compatibility; the grid strategy reads none.
    #[allow(dead_code)]
    options: Options,
    trials: TrialManager,
    /// Domain size per parameter, in declaration order.
    sizes: Vec<u64>,
    /// Total number of combinations, the product of `sizes`.
    size: u64,
    /// Steps taken so far; also the next combination to decode.
    index: u64,
    /// Previous step's mixed-radix digit vector (one trailing quotient slot).
    cursors: Vec<u64>,
    /// Previous step's produced values, in declaration order.
    values: Vec<ParamValue>,
    /// One resettable iterator per parameter.
    iterators: Vec<DomainIter>,
}

impl GridSearch {
    /// Creates a grid search session over `study`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if the product of all domain sizes does
    /// not fit in 64 bits, or [`Error::InvalidConfiguration`] if an
    /// objective name uses the reserved metric prefix.
    pub fn new(study: Study) -> Result<Self> {
        Self::with_options(study, Options::new())
    }

    /// Creates a grid search session with explicit [`Options`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`GridSearch::new`].
    pub fn with_options(study: Study, options: Options) -> Result<Self> {
        let sizes: Vec<u64> = study
            .parameters()
            .iter()
            .map(|p| p.domain().size())
            .collect();
        let size = sizes
            .iter()
            .try_fold(1_u64, |acc, &n| acc.checked_mul(n))
            .ok_or(Error::Overflow)?;
        let expected_metrics = study.objective_names().map(str::to_string).collect();
        let trials = TrialManager::new(expected_metrics)?;
        let iterators = study.parameters().iter().map(|p| p.domain().iter()).collect();

        trace_info!(
            "starting grid search across {} parameter(s), {size} combination(s)",
            study.parameters().len()
        );

        Ok(Self {
            study,
            options,
            trials,
            sizes,
            size,
            index: 0,
            cursors: Vec::new(),
            values: Vec::new(),
            iterators,
        })
    }

    /// Returns the total number of combinations this session enumerates.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the number of trials produced so far.
    #[must_use]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Advances one parameter's iterator, failing loudly if the domain lied
    /// about its size.
    fn advance(iterator: &mut DomainIter) -> Result<ParamValue> {
        iterator
            .next()
            .ok_or(Error::Internal("domain iterator exhausted before its declared size"))
    }
}

impl Search for GridSearch {
    fn study(&self) -> &Study {
        &self.study
    }

    fn has_next(&self) -> bool {
        self.index < self.size
    }

    fn next(&mut self) -> Result<Trial> {
        if !self.has_next() {
            trace_warn!("no more trials available");
            return Err(Error::Exhausted);
        }

        let parameters = self.study.parameters();
        let next_cursors = if self.index == 0 {
            // First step: all digits are zero and every iterator is fresh;
            // advance each once to obtain the initial values.
            self.iterators = parameters.iter().map(|p| p.domain().iter()).collect();
            self.values = self
                .iterators
                .iter_mut()
                .map(Self::advance)
                .collect::<Result<_>>()?;
            self.cursors = vec![0; parameters.len() + 1];
            self.cursors.clone()
        } else {
            let decoded = divmod(self.index, &self.sizes);
            // The final leftover quotient must be zero for any index < size.
            if decoded[parameters.len()] != 0 {
                return Err(Error::Internal("mixed-radix decode exceeded the search space"));
            }
            decoded
        };

        // Move only the digits that changed since the previous step.
        for (i, parameter) in parameters.iter().enumerate() {
            match next_cursors[i].cmp(&self.cursors[i]) {
                core::cmp::Ordering::Equal => {}
                core::cmp::Ordering::Greater => {
                    self.values[i] = Self::advance(&mut self.iterators[i])?;
                }
                core::cmp::Ordering::Less => {
                    // The digit wrapped around: restart this domain's cycle.
                    self.iterators[i] = parameter.domain().iter();
                    self.values[i] = Self::advance(&mut self.iterators[i])?;
                }
            }
        }

        self.index += 1;
        self.cursors = next_cursors;

        let assignment: HashMap<String, ParamValue> = self
            .study
            .parameter_names()
            .map(str::to_string)
            .zip(self.values.iter().cloned())
            .collect();
        let trial = self.trials.create(assignment);
        trace_info!("created trial {} ({}/{})", trial.id(), self.index, self.size);
        Ok(trial)
    }

    fn submit(&mut self, evaluation: Evaluation) {
        self.trials.complete(evaluation);
    }

    fn results(&self) -> Vec<(Trial, Evaluation)> {
        self.trials.results()
    }

    fn close(&mut self) {
        trace_info!("stopping grid search");
    }
}

/// Decomposes `dividend` against successive `divisors`, returning one
/// remainder per divisor followed by the final quotient.
///
/// This is the mixed-radix digit decode: with divisors equal to the domain
/// sizes in declaration order, digit `i` is the cursor position of parameter
/// `i`, and the trailing quotient is zero for any in-range step index.
pub(crate) fn divmod(dividend: u64, divisors: &[u64]) -> Vec<u64> {
    let mut digits = Vec::with_capacity(divisors.len() + 1);
    let mut quotient = dividend;
    for &divisor in divisors {
        digits.push(quotient % divisor);
        quotient /= divisor;
    }
    digits.push(quotient);
    digits
}

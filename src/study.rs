//! Studies: one optimization problem instance.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::objective::Objective;
use crate::parameter::Parameter;

/// A validated collection of [`Parameter`]s and [`Objective`]s defining one
/// search problem.
///
/// Parameter declaration order is significant: the grid search enumerates
/// the Cartesian product with the first-declared parameter cycling fastest.
///
/// Name lookup maps are computed eagerly at construction, so a `Study` is
/// fully immutable afterwards and safe to share across threads.
///
/// # Examples
///
/// ```
/// use gridsweep::{Objective, Parameter, Study};
///
/// let study = Study::new(
///     vec![
///         Parameter::from_range("a", 1..=5).unwrap(),
///         Parameter::from_range("b", 1..=4).unwrap(),
///     ],
///     vec![Objective::maximize("r")],
/// )
/// .unwrap();
///
/// assert_eq!(study.parameters().len(), 2);
/// assert!(study.parameter("a").is_some());
/// assert!(study.objective("r").is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Study {
    parameters: Vec<Parameter>,
    objectives: Vec<Objective>,
    parameter_index: HashMap<String, usize>,
    objective_index: HashMap<String, usize>,
}

impl Study {
    /// Creates a study from parameters and objectives.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStudy`] if either collection is empty or
    /// contains duplicate names.
    pub fn new(parameters: Vec<Parameter>, objectives: Vec<Objective>) -> Result<Self> {
        if parameters.is_empty() {
            return Err(Error::InvalidStudy {
                reason: "at least one parameter is required".to_string(),
            });
        }
        if objectives.is_empty() {
            return Err(Error::InvalidStudy {
                reason: "at least one objective is required".to_string(),
            });
        }

        let parameter_index = index_by_name(
            parameters.iter().map(Parameter::name),
            "duplicate parameters",
        )?;
        let objective_index =
            index_by_name(objectives.iter().map(Objective::name), "duplicate objectives")?;

        Ok(Self {
            parameters,
            objectives,
            parameter_index,
            objective_index,
        })
    }

    /// Convenience constructor for the common single-objective case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStudy`] under the same conditions as
    /// [`Study::new`].
    pub fn single_objective(parameters: Vec<Parameter>, objective: Objective) -> Result<Self> {
        Self::new(parameters, vec![objective])
    }

    /// Returns the parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Returns the objectives in declaration order.
    #[must_use]
    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameter_index
            .get(name)
            .map(|&i| &self.parameters[i])
    }

    /// Looks up an objective by name.
    #[must_use]
    pub fn objective(&self, name: &str) -> Option<&Objective> {
        self.objective_index
            .get(name)
            .map(|&i| &self.objectives[i])
    }

    /// Returns the parameter names in declaration order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(Parameter::name)
    }

    /// Returns the objective names in declaration order.
    pub fn objective_names(&self) -> impl Iterator<Item = &str> {
        self.objectives.iter().map(Objective::name)
    }
}

/// Builds a name -> position map, rejecting duplicates with a message that
/// lists every offending name.
fn index_by_name<'a>(
    names: impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::new();
    let mut duplicates: Vec<&str> = Vec::new();
    for (i, name) in names.enumerate() {
        if index.insert(name.to_string(), i).is_some() && !duplicates.contains(&name) {
            duplicates.push(name);
        }
    }
    if duplicates.is_empty() {
        Ok(index)
    } else {
        Err(Error::InvalidStudy {
            reason: format!("{what}: {}", duplicates.join(", ")),
        })
    }
}

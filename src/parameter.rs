//! Parameters: named values bound to domains.

use core::ops::RangeInclusive;

use crate::domain::Domain;
use crate::error::{Error, Result};
use crate::value::ParamValue;

/// A named value drawn from a [`Domain`].
///
/// A parameter always carries a current value, which must be a member of its
/// domain; construction fails otherwise. Parameters are immutable — the grid
/// search never rebinds them, it produces fresh value assignments in
/// [`Trial`](crate::Trial)s instead.
///
/// # Examples
///
/// ```
/// use gridsweep::{Domain, Parameter};
///
/// let lr = Parameter::from_range("layers", 1..=8).unwrap();
/// assert_eq!(lr.value().as_int(), Some(1));
///
/// let act = Parameter::new(
///     "activation",
///     Domain::categorical(["relu", "tanh"]).unwrap(),
///     "tanh",
/// )
/// .unwrap();
/// assert_eq!(act.value().as_str(), Some("tanh"));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    name: String,
    domain: Domain,
    value: ParamValue,
}

impl Parameter {
    /// Creates a parameter with an explicit current value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `value` is not a member of `domain`.
    pub fn new(
        name: impl Into<String>,
        domain: Domain,
        value: impl Into<ParamValue>,
    ) -> Result<Self> {
        let name = name.into();
        let value = value.into();
        if !domain.contains(&value) {
            return Err(Error::OutOfBounds { name, value });
        }
        Ok(Self {
            name,
            domain,
            value,
        })
    }

    /// Creates a parameter whose current value is the first value of its
    /// domain's iteration order.
    #[must_use]
    pub fn first(name: impl Into<String>, domain: Domain) -> Self {
        // Domains are non-empty by construction, so the first value exists.
        let value = match &domain {
            Domain::Numerical { min, .. } => ParamValue::Int(*min),
            Domain::Categorical(values) => values[0].clone(),
        };
        Self {
            name: name.into(),
            domain,
            value,
        }
    }

    /// Creates a numerical parameter over an inclusive range, defaulting the
    /// current value to the range start.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] if the range is empty.
    pub fn from_range(name: impl Into<String>, range: RangeInclusive<i64>) -> Result<Self> {
        Ok(Self::first(name, Domain::from_range(range)?))
    }

    /// Creates a categorical parameter, defaulting the current value to the
    /// first supplied choice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] if no values are supplied.
    pub fn from_values<I, V>(name: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        Ok(Self::first(name, Domain::categorical(values)?))
    }

    /// Creates a single-value parameter pinned to `value`.
    #[must_use]
    pub fn fixed(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let value = value.into();
        Self {
            name: name.into(),
            domain: Domain::singleton(value.clone()),
            value,
        }
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameter's domain.
    #[must_use]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Returns the parameter's current value.
    #[must_use]
    pub fn value(&self) -> &ParamValue {
        &self.value
    }
}

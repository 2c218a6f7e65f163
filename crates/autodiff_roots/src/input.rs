//! Start values and intervals.
//!
//! A guess is either a starting point (Newton-Raphson) or an interval
//! (bisection and Newton-Fourier). Both accept positional values or a
//! name→value mapping that is matched against the function's [`Signature`].

use std::collections::BTreeMap;

use autodiff_core::differentiate::Signature;

use crate::error::SolverError;

/// Starting point for Newton-Raphson.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use autodiff_core::differentiate::Signature;
/// use autodiff_roots::StartValues;
///
/// let sig = Signature::new(["x", "y"]).unwrap();
/// let named = StartValues::Named(BTreeMap::from([
///     ("y".to_string(), 2.0),
///     ("x".to_string(), 1.0),
/// ]));
/// assert_eq!(named.resolve(&sig).unwrap(), vec![1.0, 2.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartValues {
    /// Single value for a one-parameter function.
    Scalar(f64),
    /// One value per parameter, in signature order.
    List(Vec<f64>),
    /// Values keyed by parameter name.
    Named(BTreeMap<String, f64>),
}

impl StartValues {
    /// Values in signature order.
    ///
    /// # Errors
    /// * `SolverError::MissingStartValues` - empty list or mapping
    /// * `SolverError::MissingKey` - a parameter absent from the mapping
    /// * `SolverError::TooManyKeys` - the mapping has extra keys
    /// * `SolverError::VariableCount` - wrong number of values
    pub fn resolve(&self, signature: &Signature) -> Result<Vec<f64>, SolverError> {
        let values = match self {
            StartValues::Scalar(v) => vec![*v],
            StartValues::List(values) if values.is_empty() => {
                return Err(SolverError::MissingStartValues)
            }
            StartValues::List(values) => values.clone(),
            StartValues::Named(map) if map.is_empty() => {
                return Err(SolverError::MissingStartValues)
            }
            StartValues::Named(map) => resolve_named(map, signature)?,
        };
        check_count(values.len(), signature)?;
        Ok(values)
    }
}

impl From<f64> for StartValues {
    fn from(value: f64) -> Self {
        StartValues::Scalar(value)
    }
}

impl From<Vec<f64>> for StartValues {
    fn from(values: Vec<f64>) -> Self {
        StartValues::List(values)
    }
}

impl From<&[f64]> for StartValues {
    fn from(values: &[f64]) -> Self {
        StartValues::List(values.to_vec())
    }
}

impl From<BTreeMap<String, f64>> for StartValues {
    fn from(values: BTreeMap<String, f64>) -> Self {
        StartValues::Named(values)
    }
}

/// Search interval for the bracketing methods.
///
/// # Examples
/// ```
/// use autodiff_core::differentiate::Signature;
/// use autodiff_roots::Interval;
///
/// let sig = Signature::new(["x", "y"]).unwrap();
/// let interval = Interval::from_endpoints(vec![1.0, 2.0], vec![3.0, 4.0]).unwrap();
/// let (start, end) = interval.resolve(&sig).unwrap();
/// assert_eq!(start, vec![1.0, 2.0]);
/// assert_eq!(end, vec![3.0, 4.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interval {
    /// `(start, end)` per parameter, in signature order.
    Bounds(Vec<(f64, f64)>),
    /// Start and end points keyed by parameter name.
    Named {
        /// Start point
        start: BTreeMap<String, f64>,
        /// End point
        end: BTreeMap<String, f64>,
    },
}

impl Interval {
    /// Build from separate start and end points.
    ///
    /// # Errors
    /// `SolverError::IntervalEndpointLength` if the points differ in length.
    pub fn from_endpoints(start: Vec<f64>, end: Vec<f64>) -> Result<Self, SolverError> {
        if start.len() != end.len() {
            return Err(SolverError::IntervalEndpointLength {
                start: start.len(),
                end: end.len(),
            });
        }
        Ok(Interval::Bounds(start.into_iter().zip(end).collect()))
    }

    /// Start and end points in signature order.
    ///
    /// # Errors
    /// * `SolverError::MissingInterval` - no bounds given
    /// * `SolverError::IntervalKeyMismatch` - named endpoints differ in key count
    /// * `SolverError::MissingKey` - a parameter absent from either mapping
    /// * `SolverError::TooManyKeys` - the mappings have extra keys
    /// * `SolverError::VariableCount` - wrong number of bounds
    pub fn resolve(&self, signature: &Signature) -> Result<(Vec<f64>, Vec<f64>), SolverError> {
        let (start, end): (Vec<f64>, Vec<f64>) = match self {
            Interval::Bounds(bounds) if bounds.is_empty() => {
                return Err(SolverError::MissingInterval)
            }
            Interval::Bounds(bounds) => bounds.iter().copied().unzip(),
            Interval::Named { start, end } => {
                if start.is_empty() && end.is_empty() {
                    return Err(SolverError::MissingInterval);
                }
                if start.len() != end.len() {
                    return Err(SolverError::IntervalKeyMismatch {
                        start: start.len(),
                        end: end.len(),
                    });
                }
                (
                    resolve_named(start, signature)?,
                    resolve_named(end, signature)?,
                )
            }
        };
        check_count(start.len(), signature)?;
        Ok((start, end))
    }
}

/// Initial guess handed to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Guess {
    /// Starting point.
    Start(StartValues),
    /// Search interval.
    Interval(Interval),
}

impl From<StartValues> for Guess {
    fn from(values: StartValues) -> Self {
        Guess::Start(values)
    }
}

impl From<Interval> for Guess {
    fn from(interval: Interval) -> Self {
        Guess::Interval(interval)
    }
}

impl From<f64> for Guess {
    fn from(value: f64) -> Self {
        Guess::Start(StartValues::Scalar(value))
    }
}

impl From<Vec<f64>> for Guess {
    fn from(values: Vec<f64>) -> Self {
        Guess::Start(StartValues::List(values))
    }
}

fn resolve_named(
    map: &BTreeMap<String, f64>,
    signature: &Signature,
) -> Result<Vec<f64>, SolverError> {
    let values = signature
        .names()
        .iter()
        .map(|name| {
            map.get(name)
                .copied()
                .ok_or_else(|| SolverError::MissingKey(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if map.len() != signature.len() {
        return Err(SolverError::TooManyKeys {
            expected: signature.len(),
            got: map.len(),
        });
    }
    Ok(values)
}

fn check_count(got: usize, signature: &Signature) -> Result<(), SolverError> {
    if got == signature.len() {
        Ok(())
    } else {
        Err(SolverError::VariableCount {
            expected: signature.len(),
            got,
        })
    }
}

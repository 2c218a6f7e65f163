//! Call arguments for differentiated functions.
//!
//! Arguments are either all positional or all named. Resolution against a
//! [`Signature`] returns the values in parameter order, or a distinct error
//! for each way the call can be malformed.

use crate::types::{AdError, IntoTensor, Tensor};

use super::signature::Signature;

/// Builder for the arguments of one call.
///
/// # Examples
/// ```
/// use autodiff_core::differentiate::Arguments;
///
/// let positional = Arguments::new().arg(1.0).arg(vec![2.0, 3.0]);
/// assert_eq!(positional.len(), 2);
///
/// let named = Arguments::new().named("y", 2.0).named("x", 1.0);
/// assert_eq!(named.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    positional: Vec<Tensor>,
    named: Vec<(String, Tensor)>,
}

impl Arguments {
    /// Empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl IntoTensor) -> Self {
        self.positional.push(value.into_tensor());
        self
    }

    /// Add a named argument.
    pub fn named(mut self, name: impl Into<String>, value: impl IntoTensor) -> Self {
        self.named.push((name.into(), value.into_tensor()));
        self
    }

    /// Total number of supplied arguments.
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// True if no argument was supplied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values in signature order.
    ///
    /// # Errors
    /// * `AdError::MixedArguments` - positional and named forms both used
    /// * `AdError::ArgumentCount` - positional count differs from the signature
    /// * `AdError::DuplicateArgument` - a name supplied twice
    /// * `AdError::UnknownArgument` - a name not in the signature
    /// * `AdError::MissingArgument` - a parameter without a named value
    pub fn resolve(self, signature: &Signature) -> Result<Vec<Tensor>, AdError> {
        if !self.positional.is_empty() && !self.named.is_empty() {
            return Err(AdError::MixedArguments);
        }
        if self.named.is_empty() {
            if self.positional.len() != signature.len() {
                return Err(AdError::ArgumentCount {
                    expected: signature.len(),
                    got: self.positional.len(),
                });
            }
            return Ok(self.positional);
        }

        let mut slots: Vec<Option<Tensor>> = vec![None; signature.len()];
        for (name, value) in self.named {
            let index = signature
                .position(&name)
                .ok_or_else(|| AdError::UnknownArgument(name.clone()))?;
            if slots[index].is_some() {
                return Err(AdError::DuplicateArgument(name));
            }
            slots[index] = Some(value);
        }

        slots
            .into_iter()
            .zip(signature.names())
            .map(|(slot, name)| slot.ok_or_else(|| AdError::MissingArgument(name.clone())))
            .collect()
    }
}

impl From<&[f64]> for Arguments {
    fn from(values: &[f64]) -> Self {
        values
            .iter()
            .fold(Arguments::new(), |args, &value| args.arg(value))
    }
}

impl From<Vec<f64>> for Arguments {
    fn from(values: Vec<f64>) -> Self {
        Arguments::from(values.as_slice())
    }
}

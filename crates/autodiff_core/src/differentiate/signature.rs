//! Explicit parameter lists for differentiated functions.

use crate::types::AdError;

/// Ordered, duplicate-free parameter names of a function.
///
/// The position of a name is the index of the independent variable it is
/// seeded as, so keyword arguments are reordered to match.
///
/// # Examples
/// ```
/// use autodiff_core::differentiate::Signature;
///
/// let sig = Signature::new(["x", "y"]).unwrap();
/// assert_eq!(sig.len(), 2);
/// assert_eq!(sig.position("y"), Some(1));
/// assert!(Signature::new(["x", "x"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    names: Vec<String>,
}

impl Signature {
    /// Build a signature from parameter names in declaration order.
    ///
    /// # Errors
    /// `AdError::DuplicateParameter` if a name appears twice.
    pub fn new<I, S>(names: I) -> Result<Self, AdError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collected: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if collected.contains(&name) {
                return Err(AdError::DuplicateParameter(name));
            }
            collected.push(name);
        }
        Ok(Self { names: collected })
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True for a function without parameters.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Parameter names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Index of `name`, if it is a parameter.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

//! Error types for structured error handling.
//!
//! This module provides [`AdError`], the single error type of the core layer.
//! Its variants fall into three families:
//! - Shape/construction errors raised when building a [`Dual`](crate::types::Dual)
//! - Domain errors raised by the elementary functions
//! - Argument-shape errors raised when resolving arguments against a signature

use thiserror::Error;

/// Errors raised by dual-number construction, elementary functions and
/// derivative extraction.
///
/// Every variant is distinct so callers can match on the cause instead of
/// inspecting messages.
///
/// # Variants
/// - `RankTooHigh`: value of rank > 1 or derivative of rank > 2
/// - `ShapeMismatch`: value and derivative shapes cannot be paired
/// - `NoVariables` / `SeedIndexOutOfRange`: invalid one-hot seeding request
/// - `Domain` / `InvalidLogBase`: elementary function evaluated outside its domain
/// - `MixedArguments`, `ArgumentCount`, `MissingArgument`, `UnknownArgument`,
///   `DuplicateArgument`, `DuplicateParameter`: argument resolution failures
/// - `RaggedJacobian`: output components with incompatible derivative widths
///
/// # Examples
/// ```
/// use autodiff_core::types::AdError;
///
/// let err = AdError::Domain { function: "sqrt", value: -1.0 };
/// assert_eq!(format!("{}", err), "Domain error in sqrt: -1 is outside the domain");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdError {
    /// Tensor rank exceeds what the slot allows.
    #[error("{what} must have rank at most {max}, got rank {rank}")]
    RankTooHigh {
        /// Which slot was rejected ("value" or "derivative")
        what: &'static str,
        /// Rank that was supplied
        rank: usize,
        /// Highest rank accepted for the slot
        max: usize,
    },

    /// Value and derivative shapes cannot be paired.
    #[error("Derivative shape {derivative:?} does not match value shape {value:?}")]
    ShapeMismatch {
        /// Shape of the value
        value: Vec<usize>,
        /// Shape of the derivative
        derivative: Vec<usize>,
    },

    /// Seeding requested with zero independent variables.
    #[error("Seeding requires at least one variable")]
    NoVariables,

    /// Seed index does not address one of the independent variables.
    #[error("Seed index {index} out of range for {n_vars} variables")]
    SeedIndexOutOfRange {
        /// Requested seed index
        index: usize,
        /// Number of independent variables
        n_vars: usize,
    },

    /// Elementary function evaluated outside its domain.
    #[error("Domain error in {function}: {value} is outside the domain")]
    Domain {
        /// Name of the elementary function
        function: &'static str,
        /// First offending element
        value: f64,
    },

    /// Logarithm base is not positive or equals one.
    #[error("Invalid logarithm base {base}: must be positive and different from 1")]
    InvalidLogBase {
        /// The rejected base
        base: f64,
    },

    /// Positional and named arguments supplied in the same call.
    #[error("Cannot mix positional and named arguments")]
    MixedArguments,

    /// Wrong number of arguments for the signature.
    #[error("Incorrect number of arguments: expected {expected}, got {got}")]
    ArgumentCount {
        /// Number of parameters in the signature
        expected: usize,
        /// Number of arguments supplied
        got: usize,
    },

    /// A signature parameter has no named argument.
    #[error("Parameter '{0}' missing from named arguments")]
    MissingArgument(String),

    /// A named argument does not match any signature parameter.
    #[error("Named argument '{0}' is not a parameter of the function")]
    UnknownArgument(String),

    /// The same named argument was supplied twice.
    #[error("Named argument '{0}' supplied more than once")]
    DuplicateArgument(String),

    /// The same parameter name appears twice in a signature.
    #[error("Parameter '{0}' declared more than once in signature")]
    DuplicateParameter(String),

    /// Output components have derivative rows of different widths.
    #[error("Jacobian row {row} has width {got}, expected {expected}")]
    RaggedJacobian {
        /// Index of the offending output component
        row: usize,
        /// Width of the first dual row
        expected: usize,
        /// Width of the offending row
        got: usize,
    },
}

impl AdError {
    /// Check if the error is an elementary-function domain violation.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, AdError::Domain { .. } | AdError::InvalidLogBase { .. })
    }

    /// Check if the error comes from resolving call arguments.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            AdError::MixedArguments
                | AdError::ArgumentCount { .. }
                | AdError::MissingArgument(_)
                | AdError::UnknownArgument(_)
                | AdError::DuplicateArgument(_)
        )
    }

    /// Check if the error is a shape or construction failure.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            AdError::RankTooHigh { .. }
                | AdError::ShapeMismatch { .. }
                | AdError::NoVariables
                | AdError::SeedIndexOutOfRange { .. }
                | AdError::RaggedJacobian { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_too_high_display() {
        let err = AdError::RankTooHigh {
            what: "value",
            rank: 2,
            max: 1,
        };
        assert_eq!(
            format!("{}", err),
            "value must have rank at most 1, got rank 2"
        );
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = AdError::ShapeMismatch {
            value: vec![3],
            derivative: vec![2, 2],
        };
        assert!(format!("{}", err).contains("[2, 2]"));
    }

    #[test]
    fn test_argument_count_display() {
        let err = AdError::ArgumentCount {
            expected: 2,
            got: 3,
        };
        assert_eq!(
            format!("{}", err),
            "Incorrect number of arguments: expected 2, got 3"
        );
    }

    #[test]
    fn test_missing_argument_display() {
        let err = AdError::MissingArgument("y".to_string());
        assert!(format!("{}", err).contains("'y'"));
    }

    #[test]
    fn test_classification() {
        assert!(AdError::Domain {
            function: "ln",
            value: 0.0
        }
        .is_domain_error());
        assert!(AdError::InvalidLogBase { base: 1.0 }.is_domain_error());
        assert!(AdError::MixedArguments.is_argument_error());
        assert!(AdError::UnknownArgument("z".into()).is_argument_error());
        assert!(AdError::NoVariables.is_shape_error());
        assert!(!AdError::MixedArguments.is_shape_error());
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<AdError>();
    }
}

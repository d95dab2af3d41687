//! Error types for wirebind.
//!
//! Two disjoint classes live here:
//! - configuration errors, returned while operators and descriptors are
//!   being built and registered, and fatal for setup;
//! - the invocation errors the crate raises itself
//!   ([`DefinitionError::InputMismatch`], [`DefinitionError::OutputMismatch`]).
//!
//! Errors produced by user operator functions never pass through this enum;
//! they travel as [`BoxError`] exactly as the function returned them.

use thiserror::Error;

/// Boxed error returned by operator invocations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for definition building and operator wiring.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// Operator function does not take exactly three parameters.
    #[error("operator `{kind}`: function must have 3 parameters, but got: {got}")]
    Arity {
        /// Operator kind tag.
        kind: String,
        /// Actual parameter count.
        got: usize,
    },

    /// First parameter is not a [`Context`](crate::Context).
    #[error("operator `{kind}`: the first parameter must be Context, but got: {got}")]
    ContextParameter {
        /// Operator kind tag.
        kind: String,
        /// Actual type name.
        got: &'static str,
    },

    /// Second parameter is not string-shaped.
    #[error("operator `{kind}`: the second parameter must be a string, but got: {got}")]
    FieldParameter {
        /// Operator kind tag.
        kind: String,
        /// Actual type name.
        got: &'static str,
    },

    /// Operator function does not return exactly two results.
    #[error("operator `{kind}`: function must have 2 results, but got: {got}")]
    ResultCount {
        /// Operator kind tag.
        kind: String,
        /// Actual result count.
        got: usize,
    },

    /// Last result is not error-shaped.
    #[error("operator `{kind}`: the last result must be an error, but got: {got}")]
    ErrorResult {
        /// Operator kind tag.
        kind: String,
        /// Actual type name.
        got: &'static str,
    },

    /// The input type has no zero value to substitute for an absent input.
    #[error("operator `{kind}`: input type {ty} has no zero value")]
    NoZeroValue {
        /// Operator kind tag.
        kind: String,
        /// Input type name.
        ty: &'static str,
    },

    /// Two adjacent operators in a chain disagree on the value type.
    #[error(
        "operator chain for `{field}`: stage {index} (`{kind}`) expects {expected}, \
         but the previous stage produces {actual}"
    )]
    ChainMismatch {
        /// Field the chain is bound to.
        field: String,
        /// Index of the offending stage.
        index: usize,
        /// Kind tag of the offending stage.
        kind: String,
        /// Input type of the offending stage.
        expected: &'static str,
        /// Output type of the previous stage.
        actual: &'static str,
    },

    /// A value handed to an operator is not of its declared input type.
    #[error("operator `{kind}` on field `{field}`: expected input {expected}, but got {actual}")]
    InputMismatch {
        /// Operator kind tag.
        kind: String,
        /// Field being operated on.
        field: String,
        /// Declared input type name.
        expected: &'static str,
        /// Best-known name of the received value's type.
        actual: &'static str,
    },

    /// An operator produced a value that is not of its declared output type.
    #[error(
        "operator `{kind}` on field `{field}`: declared output {expected}, \
         but produced {actual}"
    )]
    OutputMismatch {
        /// Operator kind tag.
        kind: String,
        /// Field being operated on.
        field: String,
        /// Declared output type name.
        expected: &'static str,
        /// Name of the produced value's type.
        actual: &'static str,
    },
}

impl DefinitionError {
    /// Whether this error belongs to the configuration class.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            DefinitionError::InputMismatch { .. } | DefinitionError::OutputMismatch { .. }
        )
    }
}

/// Result type alias using DefinitionError.
pub type Result<T> = std::result::Result<T, DefinitionError>;

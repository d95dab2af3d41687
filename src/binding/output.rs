//! Handler outputs.

use serde::Serialize;

use crate::context::Context;
use crate::error::{BoxError, Result};
use crate::operator::{run_chain, validate_chain, SharedOperator, Value};

/// Wire location a handler result is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    /// Out-of-band metadata (headers, status).
    Meta,
    /// Primary payload.
    Data,
    /// Error channel.
    Error,
}

impl Destination {
    /// Lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Destination::Meta => "meta",
            Destination::Data => "data",
            Destination::Error => "error",
        }
    }
}

/// One handler result: where it goes and how it becomes a wire value.
#[derive(Debug, Clone)]
pub struct Output {
    /// Wire location.
    pub destination: Destination,
    /// Human-readable description.
    pub description: String,
    /// Transform chain.
    pub operators: Vec<SharedOperator>,
}

impl Output {
    /// Create an output.
    pub fn new(
        destination: Destination,
        description: impl Into<String>,
        operators: Vec<SharedOperator>,
    ) -> Self {
        Self {
            destination,
            description: description.into(),
            operators,
        }
    }

    /// Meta output.
    pub fn meta(description: impl Into<String>, operators: Vec<SharedOperator>) -> Self {
        Self::new(Destination::Meta, description, operators)
    }

    /// Data output.
    pub fn data(description: impl Into<String>, operators: Vec<SharedOperator>) -> Self {
        Self::new(Destination::Data, description, operators)
    }

    /// Error output with no description and no operators.
    pub fn error() -> Self {
        Self::new(Destination::Error, "", Vec::new())
    }

    /// Check the operator chain's type continuity.
    pub fn validate(&self) -> Result<()> {
        validate_chain(self.destination.as_str(), &self.operators)
    }

    /// Run the operator chain over a handler return value.
    pub fn operate(
        &self,
        ctx: &Context,
        value: Option<Value>,
    ) -> std::result::Result<Option<Value>, BoxError> {
        run_chain(&self.operators, ctx, self.destination.as_str(), value)
    }
}

/// The usual results of a handler returning a value and an error:
/// a data output described by `description`, then an error output.
pub fn data_error_results(description: impl Into<String>) -> Vec<Output> {
    vec![Output::data(description, Vec::new()), Output::error()]
}

//! Operator chains - ordered operator sequences bound to one field.
//!
//! Each stage consumes the previous stage's output; the first stage
//! consumes the raw wire value. An empty chain passes the value through.

use super::{SharedOperator, Value};
use crate::context::Context;
use crate::error::{BoxError, DefinitionError, Result};

/// Check that adjacent stages agree on the value type.
///
/// # Errors
///
/// Returns [`DefinitionError::ChainMismatch`] for the first stage whose
/// input type differs from the previous stage's output type.
pub fn validate_chain(field: &str, operators: &[SharedOperator]) -> Result<()> {
    for (index, pair) in operators.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.output() != next.input() {
            return Err(DefinitionError::ChainMismatch {
                field: field.to_string(),
                index: index + 1,
                kind: next.kind().to_string(),
                expected: next.input().name(),
                actual: prev.output().name(),
            });
        }
    }
    Ok(())
}

/// Drive `value` through `operators` in order.
///
/// Stops at the first failing stage and returns its error untouched.
pub fn run_chain(
    operators: &[SharedOperator],
    ctx: &Context,
    field: &str,
    value: Option<Value>,
) -> std::result::Result<Option<Value>, BoxError> {
    let mut current = value;
    for (stage, op) in operators.iter().enumerate() {
        tracing::trace!(field, stage, kind = op.kind(), "operator stage");
        current = Some(op.operate(ctx, field, current)?);
    }
    Ok(current)
}

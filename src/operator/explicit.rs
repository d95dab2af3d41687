//! Trusted operator construction.

use std::sync::Arc;

use super::{OperateResult, Operator, TypeInfo, Value};
use crate::context::Context;

/// Operator built from caller-declared types and an already erased function.
///
/// No validation is performed: the function is responsible for accepting
/// `input` values (and absent ones) and producing `output` values.
pub struct ExplicitOperator<F> {
    kind: String,
    input: TypeInfo,
    output: TypeInfo,
    f: F,
}

impl<F> ExplicitOperator<F>
where
    F: Fn(&Context, &str, Option<Value>) -> OperateResult + Send + Sync + 'static,
{
    /// Create a new explicit operator.
    pub fn new(kind: impl Into<String>, input: TypeInfo, output: TypeInfo, f: F) -> Self {
        Self {
            kind: kind.into(),
            input,
            output,
            f,
        }
    }

    /// Create a new explicit operator behind an `Arc`.
    pub fn shared(kind: impl Into<String>, input: TypeInfo, output: TypeInfo, f: F) -> Arc<Self> {
        Arc::new(Self::new(kind, input, output, f))
    }
}

impl<F> Operator for ExplicitOperator<F>
where
    F: Fn(&Context, &str, Option<Value>) -> OperateResult + Send + Sync + 'static,
{
    fn kind(&self) -> &str {
        &self.kind
    }

    fn input(&self) -> TypeInfo {
        self.input
    }

    fn output(&self) -> TypeInfo {
        self.output
    }

    fn operate(&self, ctx: &Context, field: &str, value: Option<Value>) -> OperateResult {
        (self.f)(ctx, field, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_declared_types() {
        // Declared types are trusted even when the function disagrees.
        let op = ExplicitOperator::new(
            "echo",
            TypeInfo::of::<String>(),
            TypeInfo::of::<u8>(),
            |_ctx: &Context, _field: &str, v: Option<Value>| {
                Ok(v.unwrap_or_else(|| Value::new(())))
            },
        );
        assert_eq!(op.kind(), "echo");
        assert!(op.input().is::<String>());
        assert!(op.output().is::<u8>());
    }

    #[test]
    fn test_passes_absent_value_through() {
        let op = ExplicitOperator::new(
            "presence",
            TypeInfo::of::<String>(),
            TypeInfo::of::<bool>(),
            |_ctx: &Context, _field: &str, v: Option<Value>| Ok(Value::new(v.is_some())),
        );
        let ctx = Context::new();
        let out = op.operate(&ctx, "q", None).unwrap();
        assert!(!out.downcast::<bool>().unwrap());
    }

    #[test]
    fn test_field_reaches_function() {
        let op = ExplicitOperator::new(
            "required",
            TypeInfo::of::<String>(),
            TypeInfo::of::<String>(),
            |_ctx: &Context, field: &str, v: Option<Value>| {
                v.ok_or_else(|| format!("{field} is required").into())
            },
        );
        let err = op.operate(&Context::new(), "name", None).unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }
}

//! Compiler-checked operator construction.

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{OperateResult, Operator, TypeInfo, Value};
use crate::context::Context;
use crate::error::{BoxError, DefinitionError};

/// Wrapper that erases a typed function into an [`Operator`].
///
/// The function shape `Fn(&Context, &str, T) -> Result<U, E>` is what the
/// compiler checks: a function with another arity, a non-context first
/// parameter, a non-string second parameter, or a non-`Result` return does
/// not satisfy the bounds and cannot be wrapped.
pub struct TypedOperator<F, T, U, E>
where
    F: Fn(&Context, &str, T) -> Result<U, E> + Send + Sync + 'static,
    T: Any + Send + Default,
    U: Any + Send,
    E: Into<BoxError> + 'static,
{
    kind: String,
    f: F,
    _phantom: PhantomData<fn(T) -> Result<U, E>>,
}

impl<F, T, U, E> TypedOperator<F, T, U, E>
where
    F: Fn(&Context, &str, T) -> Result<U, E> + Send + Sync + 'static,
    T: Any + Send + Default,
    U: Any + Send,
    E: Into<BoxError> + 'static,
{
    /// Create a new typed operator.
    pub fn new(kind: impl Into<String>, f: F) -> Self {
        Self {
            kind: kind.into(),
            f,
            _phantom: PhantomData,
        }
    }
}

impl<F, T, U, E> Operator for TypedOperator<F, T, U, E>
where
    F: Fn(&Context, &str, T) -> Result<U, E> + Send + Sync + 'static,
    T: Any + Send + Default,
    U: Any + Send,
    E: Into<BoxError> + 'static,
{
    fn kind(&self) -> &str {
        &self.kind
    }

    fn input(&self) -> TypeInfo {
        TypeInfo::with_zero::<T>()
    }

    fn output(&self) -> TypeInfo {
        TypeInfo::of::<U>()
    }

    fn operate(&self, ctx: &Context, field: &str, value: Option<Value>) -> OperateResult {
        // An absent input becomes T's zero value
        let input = match value {
            None => T::default(),
            Some(v) => v.downcast::<T>().map_err(|v| DefinitionError::InputMismatch {
                kind: self.kind.clone(),
                field: field.to_string(),
                expected: std::any::type_name::<T>(),
                actual: v.type_name(),
            })?,
        };

        (self.f)(ctx, field, input).map(Value::new).map_err(Into::into)
    }
}

/// Create a shared operator from a typed function.
///
/// `input()` reports `T` and `output()` reports `U`.
pub fn operator_fn<F, T, U, E>(kind: impl Into<String>, f: F) -> Arc<TypedOperator<F, T, U, E>>
where
    F: Fn(&Context, &str, T) -> Result<U, E> + Send + Sync + 'static,
    T: Any + Send + Default,
    U: Any + Send,
    E: Into<BoxError> + 'static,
{
    Arc::new(TypedOperator::new(kind, f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::ParseIntError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn to_int() -> Arc<impl Operator> {
        operator_fn("toInt", |_ctx: &Context, _field: &str, s: String| {
            s.parse::<i64>()
        })
    }

    #[test]
    fn test_reports_kind_and_types() {
        let op = to_int();
        assert_eq!(op.kind(), "toInt");
        assert!(op.input().is::<String>());
        assert!(op.output().is::<i64>());
    }

    #[test]
    fn test_parses_value() {
        let out = to_int()
            .operate(&Context::new(), "age", Some(Value::new("42".to_string())))
            .unwrap();
        assert_eq!(out.downcast::<i64>().unwrap(), 42);
    }

    #[test]
    fn test_returns_function_error_untouched() {
        let err = to_int()
            .operate(&Context::new(), "age", Some(Value::new("abc".to_string())))
            .unwrap_err();
        assert!(err.downcast_ref::<ParseIntError>().is_some());
    }

    #[test]
    fn test_absent_input_becomes_zero_value() {
        let seen = Arc::new(AtomicUsize::new(usize::MAX));
        let recorder = seen.clone();
        let op = operator_fn("len", move |_ctx: &Context, _field: &str, v: Vec<u8>| {
            recorder.store(v.len(), Ordering::SeqCst);
            Ok::<_, BoxError>(v.len())
        });

        let out = op.operate(&Context::new(), "body", None).unwrap();
        assert_eq!(out.downcast::<usize>().unwrap(), 0);
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_absent_input_parse_error() {
        // The zero value of String is "", which does not parse.
        let err = to_int().operate(&Context::new(), "age", None).unwrap_err();
        assert!(err.downcast_ref::<ParseIntError>().is_some());
    }

    #[test]
    fn test_wrong_input_type_is_reported() {
        let err = to_int()
            .operate(&Context::new(), "age", Some(Value::new(42u8)))
            .unwrap_err();
        let err = err.downcast::<DefinitionError>().unwrap();
        match *err {
            DefinitionError::InputMismatch {
                ref kind,
                ref field,
                actual,
                ..
            } => {
                assert_eq!(kind, "toInt");
                assert_eq!(field, "age");
                assert_eq!(actual, "u8");
            }
            ref other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_field_is_passed_for_attribution() {
        let op = operator_fn("positive", |_ctx: &Context, field: &str, n: i64| {
            if n > 0 {
                Ok(n)
            } else {
                Err(format!("{field} must be positive"))
            }
        });
        let err = op
            .operate(&Context::new(), "count", Some(Value::new(-1i64)))
            .unwrap_err();
        assert_eq!(err.to_string(), "count must be positive");
    }

    #[test]
    fn test_operator_sees_context() {
        let op = operator_fn("guard", |ctx: &Context, _field: &str, n: i32| {
            if ctx.is_cancelled() {
                Err("cancelled")
            } else {
                Ok(n)
            }
        });
        let ctx = Context::new();
        assert!(op.operate(&ctx, "n", Some(Value::new(1i32))).is_ok());
        ctx.cancel();
        assert!(op.operate(&ctx, "n", Some(Value::new(1i32))).is_err());
    }

    #[test]
    fn test_shared_across_threads() {
        let op: Arc<dyn Operator> = to_int();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let op = op.clone();
                std::thread::spawn(move || {
                    let out = op
                        .operate(&Context::new(), "n", Some(Value::new(i.to_string())))
                        .unwrap();
                    out.downcast::<i64>().unwrap()
                })
            })
            .collect();
        let mut results: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        results.sort();
        assert_eq!(results, vec![0, 1, 2, 3]);
    }
}

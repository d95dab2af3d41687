//! Operators - typed, kind-tagged transform stages with a uniform call shape.
//!
//! Every operator is invoked as `(context, field, value) -> Result<value, error>`.
//! The `field` identifies the bound parameter or result and is only used
//! for error attribution.
//!
//! Three constructions share the [`Operator`] trait:
//! - [`ExplicitOperator`] - trusted: the caller states the input/output
//!   types and supplies an already type-erased function. Nothing is checked.
//! - [`TypedOperator`] / [`operator_fn`] - validated by the compiler: the
//!   function must be shaped `Fn(&Context, &str, T) -> Result<U, E>`.
//! - [`IntrospectedOperator`] - validated at construction from a runtime
//!   [`Signature`], for functions whose shape is only known at runtime.
//!
//! # Example
//!
//! ```
//! use wirebind::operator::{operator_fn, Operator, Value};
//! use wirebind::Context;
//!
//! let to_int = operator_fn("toInt", |_ctx: &Context, _field: &str, s: String| {
//!     s.parse::<i64>()
//! });
//! assert_eq!(to_int.kind(), "toInt");
//!
//! let ctx = Context::new();
//! let out = to_int.operate(&ctx, "age", Some(Value::new("42".to_string()))).unwrap();
//! assert_eq!(out.downcast::<i64>().unwrap(), 42);
//! assert!(to_int.operate(&ctx, "age", Some(Value::new("abc".to_string()))).is_err());
//! ```

mod chain;
mod explicit;
mod introspect;
mod typed;
mod value;

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::error::BoxError;

pub use chain::{run_chain, validate_chain};
pub use explicit::ExplicitOperator;
pub use introspect::{DynamicCall, DynamicFunction, IntrospectedOperator, Signature};
pub use typed::{operator_fn, TypedOperator};
pub use value::{TypeInfo, Value};

/// Result type for operator invocations.
pub type OperateResult = std::result::Result<Value, BoxError>;

/// A transform stage bound to a parameter or result.
///
/// Implementations are shared across concurrent requests and must be
/// reentrant.
pub trait Operator: Send + Sync + 'static {
    /// Tag identifying the transform category.
    fn kind(&self) -> &str;

    /// Type of the value the operator accepts.
    fn input(&self) -> TypeInfo;

    /// Type of the value the operator produces.
    fn output(&self) -> TypeInfo;

    /// Transform `value`.
    ///
    /// `None` marks an absent input. On success the output is returned;
    /// on failure the function's error is returned untouched.
    fn operate(&self, ctx: &Context, field: &str, value: Option<Value>) -> OperateResult;
}

/// Operator handle stored in parameters and results.
pub type SharedOperator = Arc<dyn Operator>;

impl fmt::Debug for dyn Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("kind", &self.kind())
            .field("in", &self.input())
            .field("out", &self.output())
            .finish()
    }
}

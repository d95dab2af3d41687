//! Operators built from functions whose shape is only known at runtime.
//!
//! A [`DynamicFunction`] pairs a declared [`Signature`] with a call closure
//! that takes its arguments as a vector of [`Value`]s and returns its
//! results the same way (`None` standing for a nil result). Script and
//! plugin bindings produce functions of this kind.
//!
//! [`IntrospectedOperator::new`] checks the signature once, at
//! construction, and refuses anything that is not shaped
//! `(Context, String, T) -> (U, BoxError)`.

use std::fmt;
use std::sync::Arc;

use super::{OperateResult, Operator, TypeInfo, Value};
use crate::context::Context;
use crate::error::{BoxError, DefinitionError, Result};

/// Declared parameter and result types of a dynamic function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// Parameter types, in order.
    pub params: Vec<TypeInfo>,
    /// Result types, in order.
    pub results: Vec<TypeInfo>,
}

impl Signature {
    /// Create a signature.
    pub fn new(params: Vec<TypeInfo>, results: Vec<TypeInfo>) -> Self {
        Self { params, results }
    }

    /// The operator-shaped signature `(Context, String, T) -> (U, BoxError)`.
    ///
    /// `T` gets a zero value so absent inputs can be substituted.
    pub fn operator<T, U>() -> Self
    where
        T: std::any::Any + Send + Default,
        U: std::any::Any,
    {
        Self::new(
            vec![
                TypeInfo::of::<Context>(),
                TypeInfo::of::<String>(),
                TypeInfo::with_zero::<T>(),
            ],
            vec![TypeInfo::of::<U>(), TypeInfo::of::<BoxError>()],
        )
    }
}

/// Call closure of a dynamic function.
pub type DynamicCall = dyn Fn(Vec<Value>) -> Vec<Option<Value>> + Send + Sync;

/// A function value described at runtime.
#[derive(Clone)]
pub struct DynamicFunction {
    signature: Signature,
    call: Arc<DynamicCall>,
}

impl DynamicFunction {
    /// Create a dynamic function from its signature and call closure.
    pub fn new<F>(signature: Signature, call: F) -> Self
    where
        F: Fn(Vec<Value>) -> Vec<Option<Value>> + Send + Sync + 'static,
    {
        Self {
            signature,
            call: Arc::new(call),
        }
    }

    /// Declared signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invoke with raw arguments.
    pub fn call(&self, args: Vec<Value>) -> Vec<Option<Value>> {
        (self.call)(args)
    }
}

impl fmt::Debug for DynamicFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicFunction")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Operator over a signature-checked [`DynamicFunction`].
#[derive(Debug)]
pub struct IntrospectedOperator {
    kind: String,
    input: TypeInfo,
    output: TypeInfo,
    func: DynamicFunction,
}

impl IntrospectedOperator {
    /// Validate `func` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the function does not have
    /// exactly 3 parameters, its first parameter is not [`Context`], its
    /// second is not a `String`, it does not have exactly 2 results, its last
    /// result is not [`BoxError`], or its input type has no zero value.
    pub fn new(kind: impl Into<String>, func: DynamicFunction) -> Result<Self> {
        let kind = kind.into();
        let sig = func.signature();

        if sig.params.len() != 3 {
            return Err(DefinitionError::Arity {
                kind,
                got: sig.params.len(),
            });
        }
        if !sig.params[0].is::<Context>() {
            return Err(DefinitionError::ContextParameter {
                kind,
                got: sig.params[0].name(),
            });
        }
        if !sig.params[1].is::<String>() {
            return Err(DefinitionError::FieldParameter {
                kind,
                got: sig.params[1].name(),
            });
        }
        if sig.results.len() != 2 {
            return Err(DefinitionError::ResultCount {
                kind,
                got: sig.results.len(),
            });
        }
        if !sig.results[1].is::<BoxError>() {
            return Err(DefinitionError::ErrorResult {
                kind,
                got: sig.results[1].name(),
            });
        }
        if !sig.params[2].has_zero() {
            return Err(DefinitionError::NoZeroValue {
                kind,
                ty: sig.params[2].name(),
            });
        }

        let input = sig.params[2];
        let output = sig.results[0];
        tracing::debug!(kind = %kind, input = %input, output = %output, "introspected operator");

        Ok(Self {
            kind,
            input,
            output,
            func,
        })
    }

    /// Validate `func` and wrap it behind an `Arc`.
    pub fn shared(kind: impl Into<String>, func: DynamicFunction) -> Result<Arc<Self>> {
        Self::new(kind, func).map(Arc::new)
    }
}

impl Operator for IntrospectedOperator {
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
        let input = match value {
            Some(v) if v.type_id() == self.input.id() => v,
            Some(v) => {
                return Err(DefinitionError::InputMismatch {
                    kind: self.kind.clone(),
                    field: field.to_string(),
                    expected: self.input.name(),
                    actual: v.type_name(),
                }
                .into())
            }
            // Validated at construction
            None => self.input.zero().ok_or_else(|| DefinitionError::NoZeroValue {
                kind: self.kind.clone(),
                ty: self.input.name(),
            })?,
        };

        let args = vec![Value::new(ctx.clone()), Value::new(field.to_string()), input];
        let mut results = self.func.call(args).into_iter();
        let output = results.next().flatten();
        let error = results.next().flatten();

        match (output, error) {
            (_, Some(err)) => Err(err
                .downcast::<BoxError>()
                .unwrap_or_else(|v| malformed(&self.kind, field, v.type_name()))),
            (Some(out), None) if out.type_id() == self.output.id() => Ok(out),
            (Some(out), None) => Err(DefinitionError::OutputMismatch {
                kind: self.kind.clone(),
                field: field.to_string(),
                expected: self.output.name(),
                actual: out.type_name(),
            }
            .into()),
            (None, None) => Err(malformed(&self.kind, field, "nil output")),
        }
    }
}

fn malformed(kind: &str, field: &str, detail: &str) -> BoxError {
    format!("operator `{kind}` on field `{field}`: malformed result ({detail})").into()
}

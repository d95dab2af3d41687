//! Type descriptors and the type-erased value that flows through operators.

use std::any::{Any, TypeId};
use std::fmt;

/// Describes the type an operator accepts or produces.
///
/// Two descriptors are equal when they describe the same Rust type; the
/// name and zero-value constructor are carried along for diagnostics and
/// for absent-input substitution.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
    zero: Option<fn() -> Value>,
}

fn zero_of<T: Any + Send + Default>() -> Value {
    Value::new(T::default())
}

impl TypeInfo {
    /// Descriptor for `T` without a zero value.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            zero: None,
        }
    }

    /// Descriptor for `T` whose zero value is `T::default()`.
    pub fn with_zero<T: Any + Send + Default>() -> Self {
        Self {
            zero: Some(zero_of::<T>),
            ..Self::of::<T>()
        }
    }

    /// The described type's [`TypeId`].
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Human-readable type name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this describes `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Whether a zero value can be produced.
    #[inline]
    pub fn has_zero(&self) -> bool {
        self.zero.is_some()
    }

    /// Produce the zero value, if the type has one.
    pub fn zero(&self) -> Option<Value> {
        self.zero.map(|f| f())
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A type-erased value handed between operators.
pub struct Value {
    inner: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Value {
    /// Erase `value`.
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Name of the erased type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// [`TypeId`] of the erased type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        (*self.inner).type_id()
    }

    /// Whether the erased type is `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Borrow the value as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Take the value as `T`, or give it back unchanged.
    pub fn downcast<T: Any>(self) -> std::result::Result<T, Value> {
        let type_name = self.type_name;
        self.inner
            .downcast::<T>()
            .map(|b| *b)
            .map_err(|inner| Value { inner, type_name })
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}

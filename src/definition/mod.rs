//! Definition module - verbs, handlers, and the descriptor tree.
//!
//! A [`Descriptor`] groups [`Definition`]s (one per verb) under a path and
//! nests child descriptors. [`RpcDescriptor`] / [`RpcAction`] are the same
//! shapes without verbs, for point-to-point invocation.
//!
//! The tree is pure metadata. [`Descriptor::routes`] and
//! [`RpcDescriptor::actions`] flatten it using the resolution policy in
//! [`join_path`]: child paths are appended to their parent's path, and the
//! nearest non-empty `consumes`/`produces` list wins (definition first,
//! then the closest enclosing descriptor, finally `*/*`).
//!
//! # Example
//!
//! ```
//! use wirebind::definition::{simple_descriptor, Descriptor, Method};
//! use wirebind::mime;
//!
//! fn list_users() -> Vec<String> {
//!     Vec::new()
//! }
//!
//! let api = Descriptor::new("/api/v1")
//!     .with_produces(vec![mime::JSON.to_string()])
//!     .with_child(simple_descriptor(Method::Get, "/users", list_users as fn() -> Vec<String>));
//!
//! let routes = api.routes();
//! assert_eq!(routes.len(), 1);
//! assert_eq!(routes[0].path, "/api/v1/users");
//! // The definition's own `*/*` is nearer than the parent's JSON.
//! assert_eq!(routes[0].produces, vec!["*/*".to_string()]);
//! ```

mod resolve;
mod rest;
mod rpc;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

pub(crate) use resolve::inherit;
pub use resolve::{join_path, Route, RpcRoute};
pub use rest::{simple_descriptor, Definition, Descriptor};
pub use rpc::{simple_rpc_descriptor, RpcAction, RpcDescriptor};

/// Request verb a definition answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
}

impl Method {
    /// Uppercase verb.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque reference to a handler.
///
/// The binding layer never calls the handler; the route compiler recovers
/// the concrete type with [`Function::downcast_ref`].
#[derive(Clone)]
pub struct Function {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Function {
    /// Wrap a handler.
    pub fn new<F: Any + Send + Sync>(handler: F) -> Self {
        Self {
            inner: Arc::new(handler),
            type_name: std::any::type_name::<F>(),
        }
    }

    /// Name of the wrapped handler's type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the handler as `F`.
    pub fn downcast_ref<F: Any>(&self) -> Option<&F> {
        self.inner.downcast_ref::<F>()
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Function").field(&self.type_name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello() -> &'static str {
        "hello"
    }

    #[test]
    fn test_function_roundtrips_handler() {
        let f = Function::new(hello as fn() -> &'static str);
        let handler = f.downcast_ref::<fn() -> &'static str>().unwrap();
        assert_eq!(handler(), "hello");
        assert!(f.downcast_ref::<u8>().is_none());
        assert!(f.type_name().contains("fn()"));
    }

    #[test]
    fn test_method_labels() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(serde_json::to_value(Method::Delete).unwrap(), "DELETE");
    }
}

//! # wirebind
//!
//! Declarative bindings for API handlers.
//!
//! Instead of imperative request-handling code, a handler is described as
//! metadata: where each input comes from on the wire and how it becomes a
//! typed value, where each output goes and how it becomes a wire value.
//! Whatever serves requests (an HTTP router, an RPC dispatcher) walks the
//! resulting tree; this crate performs no routing, serialization of bodies,
//! or network I/O.
//!
//! ## Layers
//!
//! - **Operators** ([`operator`]): typed, kind-tagged transform stages
//!   invoked uniformly as `(context, field, value) -> Result<value, error>`
//! - **Bindings** ([`binding`]): [`Parameter`]s and [`Output`]s, each a wire
//!   location plus an operator chain
//! - **Descriptors** ([`definition`]): verbs bound to handlers, grouped into
//!   a path tree; RPC siblings without verbs
//! - **Registry** ([`registry`]): the explicit value descriptors are
//!   registered into at startup
//!
//! ## Example
//!
//! ```
//! use wirebind::binding::{data_error_results, Parameter};
//! use wirebind::definition::{Definition, Descriptor, Method};
//! use wirebind::operator::{operator_fn, SharedOperator, Value};
//! use wirebind::{Context, Registry};
//!
//! fn get_user(id: i64) -> Result<String, std::io::Error> {
//!     Ok(format!("user {id}"))
//! }
//!
//! let to_int: SharedOperator = operator_fn("toInt", |_ctx: &Context, _field: &str, s: String| {
//!     s.parse::<i64>()
//! });
//!
//! let mut registry = Registry::builder().root_path("/api/v1").build();
//! registry
//!     .register(
//!         Descriptor::new("/users/{id}").with_definition(
//!             Definition::new(Method::Get, get_user as fn(i64) -> Result<String, std::io::Error>)
//!                 .with_parameters(vec![Parameter::path("id", "user id", vec![to_int])])
//!                 .with_results(data_error_results("the user")),
//!         ),
//!     )
//!     .unwrap();
//!
//! let routes = registry.routes();
//! let id = &routes[0].definition.parameters[0];
//! let value = id
//!     .operate(&Context::new(), Some(Value::new("42".to_string())))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(value.downcast::<i64>().unwrap(), 42);
//! ```

pub mod binding;
pub mod context;
pub mod definition;
pub mod error;
pub mod mime;
pub mod operator;
pub mod registry;
pub mod schema;

pub use binding::{data_error_results, Destination, Output, Parameter, Source};
pub use context::Context;
pub use definition::{
    simple_descriptor, simple_rpc_descriptor, Definition, Descriptor, Function, Method, RpcAction,
    RpcDescriptor,
};
pub use error::{BoxError, DefinitionError};
pub use operator::{operator_fn, Operator, SharedOperator, TypeInfo, Value};
pub use registry::{Registry, RegistryBuilder, RegistryConfig};

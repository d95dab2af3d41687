//! JSON description of a registry's routes and bindings.
//!
//! Tooling (documentation generators, clients, the parent process of a
//! worker) reads this instead of walking the tree itself.
//!
//! # Example
//!
//! ```
//! use wirebind::definition::{simple_descriptor, Method};
//! use wirebind::schema::build_schema;
//! use wirebind::Registry;
//!
//! fn ping() {}
//!
//! let mut registry = Registry::new();
//! registry.register(simple_descriptor(Method::Get, "/ping", ping as fn())).unwrap();
//!
//! let schema = build_schema(&registry);
//! assert_eq!(schema["routes"][0]["path"], "/ping");
//! assert_eq!(schema["routes"][0]["method"], "GET");
//! ```

use serde_json::{json, Value};

use crate::binding::{Output, Parameter};
use crate::operator::SharedOperator;
use crate::registry::Registry;

/// Schema format version.
pub const SCHEMA_VERSION: &str = "1.0.0";

fn operators_json(operators: &[SharedOperator]) -> Value {
    operators
        .iter()
        .map(|op| {
            json!({
                "kind": op.kind(),
                "in": op.input().name(),
                "out": op.output().name(),
            })
        })
        .collect()
}

fn parameters_json(parameters: &[Parameter]) -> Value {
    parameters
        .iter()
        .map(|p| {
            json!({
                "source": p.source,
                "name": p.name,
                "description": p.description,
                "operators": operators_json(&p.operators),
            })
        })
        .collect()
}

fn results_json(results: &[Output]) -> Value {
    results
        .iter()
        .map(|r| {
            json!({
                "destination": r.destination,
                "description": r.description,
                "operators": operators_json(&r.operators),
            })
        })
        .collect()
}

/// Build the schema document.
pub fn build_schema(registry: &Registry) -> Value {
    let config = registry.config();

    let routes: Vec<Value> = registry
        .routes()
        .into_iter()
        .map(|route| {
            json!({
                "path": route.path,
                "method": route.method,
                "handler": route.definition.function.type_name(),
                "consumes": route.consumes,
                "produces": route.produces,
                "parameters": parameters_json(&route.definition.parameters),
                "results": results_json(&route.definition.results),
            })
        })
        .collect();

    let rpc: Vec<Value> = registry
        .rpc_routes()
        .into_iter()
        .map(|route| {
            json!({
                "path": route.path,
                "handler": route.action.function.type_name(),
                "consumes": route.consumes,
                "produces": route.produces,
                "parameters": parameters_json(&route.action.parameters),
                "results": results_json(&route.action.results),
            })
        })
        .collect();

    json!({
        "version": SCHEMA_VERSION,
        "root": config.root_path,
        "description": config.description,
        "routes": routes,
        "rpc": rpc,
    })
}

/// Build the schema document as a single-line JSON string.
pub fn schema_string(registry: &Registry) -> String {
    build_schema(registry).to_string()
}

//! Verb-less actions for point-to-point invocation.

use std::any::Any;

use super::resolve::{inherit, join_path, RpcRoute};
use super::Function;
use crate::binding::{Output, Parameter};
use crate::error::Result;
use crate::mime;

/// A handler with its bindings and content types, without a verb.
#[derive(Debug, Clone)]
pub struct RpcAction {
    /// Handler reference.
    pub function: Function,
    /// Handler inputs, in argument order.
    pub parameters: Vec<Parameter>,
    /// Handler outputs, in return order.
    pub results: Vec<Output>,
    /// Accepted request content types.
    pub consumes: Vec<String>,
    /// Response content types.
    pub produces: Vec<String>,
}

impl RpcAction {
    /// Create an action with no bindings and no content types.
    pub fn new<F: Any + Send + Sync>(handler: F) -> Self {
        Self {
            function: Function::new(handler),
            parameters: Vec::new(),
            results: Vec::new(),
            consumes: Vec::new(),
            produces: Vec::new(),
        }
    }

    /// Set the parameters.
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set the results.
    pub fn with_results(mut self, results: Vec<Output>) -> Self {
        self.results = results;
        self
    }

    /// Set the accepted content types.
    pub fn with_consumes(mut self, consumes: Vec<String>) -> Self {
        self.consumes = consumes;
        self
    }

    /// Set the response content types.
    pub fn with_produces(mut self, produces: Vec<String>) -> Self {
        self.produces = produces;
        self
    }

    /// Check every parameter and result chain.
    pub fn validate(&self) -> Result<()> {
        self.parameters.iter().try_for_each(Parameter::validate)?;
        self.results.iter().try_for_each(Output::validate)
    }
}

/// A node of the RPC tree.
#[derive(Debug, Clone, Default)]
pub struct RpcDescriptor {
    /// Path relative to the parent descriptor.
    pub path: String,
    /// Human-readable description.
    pub description: String,
    /// Default accepted content types for descendants.
    pub consumes: Vec<String>,
    /// Default response content types for descendants.
    pub produces: Vec<String>,
    /// Actions served at this path.
    pub actions: Vec<RpcAction>,
    /// Nested descriptors.
    pub children: Vec<RpcDescriptor>,
}

impl RpcDescriptor {
    /// Create an empty descriptor at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the default accepted content types.
    pub fn with_consumes(mut self, consumes: Vec<String>) -> Self {
        self.consumes = consumes;
        self
    }

    /// Set the default response content types.
    pub fn with_produces(mut self, produces: Vec<String>) -> Self {
        self.produces = produces;
        self
    }

    /// Append an action.
    pub fn with_action(mut self, action: RpcAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Append a child descriptor.
    pub fn with_child(mut self, child: RpcDescriptor) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child descriptors.
    pub fn with_children(mut self, children: impl IntoIterator<Item = RpcDescriptor>) -> Self {
        self.children.extend(children);
        self
    }

    /// Check every action in this subtree.
    pub fn validate(&self) -> Result<()> {
        self.actions.iter().try_for_each(RpcAction::validate)?;
        self.children.iter().try_for_each(RpcDescriptor::validate)
    }

    /// Flatten the subtree into resolved actions, depth first.
    pub fn actions(&self) -> Vec<RpcRoute<'_>> {
        let any = mime::any();
        let mut routes = Vec::new();
        self.collect("", &any, &any, &mut routes);
        routes
    }

    pub(crate) fn collect<'a>(
        &'a self,
        parent: &str,
        consumes: &[String],
        produces: &[String],
        routes: &mut Vec<RpcRoute<'a>>,
    ) {
        let path = join_path(parent, &self.path);
        let consumes = inherit(&self.consumes, consumes);
        let produces = inherit(&self.produces, produces);

        for action in &self.actions {
            routes.push(RpcRoute {
                path: path.clone(),
                consumes: inherit(&action.consumes, consumes).to_vec(),
                produces: inherit(&action.produces, produces).to_vec(),
                action,
            });
        }
        for child in &self.children {
            child.collect(&path, consumes, produces, routes);
        }
    }
}

/// RPC descriptor with one action that accepts and produces anything.
pub fn simple_rpc_descriptor<F: Any + Send + Sync>(
    path: impl Into<String>,
    handler: F,
) -> RpcDescriptor {
    RpcDescriptor::new(path).with_action(
        RpcAction::new(handler)
            .with_consumes(mime::any())
            .with_produces(mime::any()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(a: i64, b: i64) -> i64 {
        a + b
    }

    #[test]
    fn test_simple_rpc_descriptor() {
        let d = simple_rpc_descriptor("/math.sum", sum as fn(i64, i64) -> i64);
        assert_eq!(d.path, "/math.sum");
        assert_eq!(d.actions.len(), 1);

        let action = &d.actions[0];
        assert_eq!(action.consumes, vec!["*/*".to_string()]);
        assert_eq!(action.produces, vec!["*/*".to_string()]);
        let f = action.function.downcast_ref::<fn(i64, i64) -> i64>().unwrap();
        assert_eq!(f(2, 3), 5);
    }

    #[test]
    fn test_actions_resolve_paths_and_types() {
        let tree = RpcDescriptor::new("/rpc")
            .with_produces(vec![mime::JSON.to_string()])
            .with_child(
                RpcDescriptor::new("math").with_action(RpcAction::new(sum as fn(i64, i64) -> i64)),
            )
            .with_child(simple_rpc_descriptor("echo", sum as fn(i64, i64) -> i64));

        let actions = tree.actions();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].path, "/rpc/math");
        assert_eq!(actions[0].consumes, mime::any());
        assert_eq!(actions[0].produces, vec![mime::JSON.to_string()]);
        assert_eq!(actions[1].path, "/rpc/echo");
        assert_eq!(actions[1].produces, mime::any());
        assert!(tree.validate().is_ok());
    }
}

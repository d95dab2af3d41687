//! Verb-bound definitions and the descriptor tree.

use std::any::Any;

use super::resolve::{inherit, join_path, Route};
use super::{Function, Method};
use crate::binding::{Output, Parameter};
use crate::error::Result;
use crate::mime;

/// One verb bound to a handler, its bindings, and its content types.
#[derive(Debug, Clone)]
pub struct Definition {
    /// Verb.
    pub method: Method,
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

impl Definition {
    /// Create a definition with no bindings and no content types.
    pub fn new<F: Any + Send + Sync>(method: Method, handler: F) -> Self {
        Self {
            method,
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
        for parameter in &self.parameters {
            parameter.validate()?;
        }
        for result in &self.results {
            result.validate()?;
        }
        Ok(())
    }
}

/// A node of the route tree.
#[derive(Debug, Clone, Default)]
pub struct Descriptor {
    /// Path relative to the parent descriptor.
    pub path: String,
    /// Human-readable description.
    pub description: String,
    /// Default accepted content types for descendants.
    pub consumes: Vec<String>,
    /// Default response content types for descendants.
    pub produces: Vec<String>,
    /// Definitions served at this path.
    pub definitions: Vec<Definition>,
    /// Nested descriptors.
    pub children: Vec<Descriptor>,
}

impl Descriptor {
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

    /// Append a definition.
    pub fn with_definition(mut self, definition: Definition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Append a child descriptor.
    pub fn with_child(mut self, child: Descriptor) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child descriptors.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Descriptor>) -> Self {
        self.children.extend(children);
        self
    }

    /// Check every definition in this subtree.
    pub fn validate(&self) -> Result<()> {
        for definition in &self.definitions {
            definition.validate()?;
        }
        for child in &self.children {
            child.validate()?;
        }
        Ok(())
    }

    /// Number of definitions in this subtree.
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
            + self
                .children
                .iter()
                .map(Descriptor::definition_count)
                .sum::<usize>()
    }

    /// Flatten the subtree into routes, depth first in declaration order.
    pub fn routes(&self) -> Vec<Route<'_>> {
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
        routes: &mut Vec<Route<'a>>,
    ) {
        let path = join_path(parent, &self.path);
        let consumes = inherit(&self.consumes, consumes);
        let produces = inherit(&self.produces, produces);

        for definition in &self.definitions {
            routes.push(Route {
                path: path.clone(),
                method: definition.method,
                consumes: inherit(&definition.consumes, consumes).to_vec(),
                produces: inherit(&definition.produces, produces).to_vec(),
                definition,
            });
        }
        for child in &self.children {
            child.collect(&path, consumes, produces, routes);
        }
    }
}

/// Descriptor with one definition that accepts and produces anything.
pub fn simple_descriptor<F: Any + Send + Sync>(
    method: Method,
    path: impl Into<String>,
    handler: F,
) -> Descriptor {
    Descriptor::new(path).with_definition(
        Definition::new(method, handler)
            .with_consumes(mime::any())
            .with_produces(mime::any()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{data_error_results, Parameter};
    use crate::context::Context;
    use crate::error::{BoxError, DefinitionError};
    use crate::operator::{operator_fn, SharedOperator};

    fn handler() {}

    #[test]
    fn test_simple_descriptor() {
        let d = simple_descriptor(Method::Get, "/ping", handler as fn());
        assert_eq!(d.path, "/ping");
        assert_eq!(d.definitions.len(), 1);
        assert!(d.children.is_empty());

        let def = &d.definitions[0];
        assert_eq!(def.method, Method::Get);
        assert_eq!(def.consumes, vec!["*/*".to_string()]);
        assert_eq!(def.produces, vec!["*/*".to_string()]);
        assert!(def.function.downcast_ref::<fn()>().is_some());
    }

    #[test]
    fn test_routes_join_paths_depth_first() {
        let tree = Descriptor::new("/api")
            .with_definition(Definition::new(Method::Get, handler as fn()))
            .with_child(
                Descriptor::new("users")
                    .with_definition(Definition::new(Method::Get, handler as fn()))
                    .with_definition(Definition::new(Method::Post, handler as fn()))
                    .with_child(
                        Descriptor::new("/{id}/")
                            .with_definition(Definition::new(Method::Delete, handler as fn())),
                    ),
            )
            .with_child(
                Descriptor::new("/health")
                    .with_definition(Definition::new(Method::Head, handler as fn())),
            );

        let got: Vec<(String, Method)> = tree
            .routes()
            .into_iter()
            .map(|r| (r.path, r.method))
            .collect();
        assert_eq!(
            got,
            vec![
                ("/api".to_string(), Method::Get),
                ("/api/users".to_string(), Method::Get),
                ("/api/users".to_string(), Method::Post),
                ("/api/users/{id}/".to_string(), Method::Delete),
                ("/api/health".to_string(), Method::Head),
            ]
        );
        assert_eq!(tree.definition_count(), 5);
    }

    #[test]
    fn test_nearest_content_types_win() {
        let json = vec![mime::JSON.to_string()];
        let xml = vec![mime::XML.to_string()];
        let text = vec![mime::TEXT.to_string()];

        let tree = Descriptor::new("/")
            .with_consumes(json.clone())
            .with_produces(json.clone())
            .with_child(
                Descriptor::new("a")
                    .with_produces(xml.clone())
                    .with_definition(Definition::new(Method::Get, handler as fn()))
                    .with_definition(
                        Definition::new(Method::Put, handler as fn()).with_consumes(text.clone()),
                    ),
            );

        let routes = tree.routes();
        assert_eq!(routes[0].consumes, json);
        assert_eq!(routes[0].produces, xml);
        assert_eq!(routes[1].consumes, text);
        assert_eq!(routes[1].produces, xml);
    }

    #[test]
    fn test_empty_child_path_keeps_parent_slash() {
        let get = || Definition::new(Method::Get, handler as fn());
        let tree = Descriptor::new("/files/")
            .with_child(Descriptor::new("").with_definition(get()))
            .with_child(Descriptor::new("raw").with_definition(get()));

        let paths: Vec<String> = tree.routes().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/files/".to_string(), "/files/raw".to_string()]);
    }

    #[test]
    fn test_missing_content_types_default_to_any() {
        let tree =
            Descriptor::new("/x").with_definition(Definition::new(Method::Get, handler as fn()));
        let routes = tree.routes();
        assert_eq!(routes[0].consumes, mime::any());
        assert_eq!(routes[0].produces, mime::any());
    }

    #[test]
    fn test_validate_reports_broken_chain() {
        let to_int: SharedOperator = operator_fn("toInt", |_c: &Context, _f: &str, s: String| {
            s.parse::<i64>()
        });
        let upper: SharedOperator = operator_fn("upper", |_c: &Context, _f: &str, s: String| {
            Ok::<_, BoxError>(s.to_uppercase())
        });

        let good = Definition::new(Method::Get, handler as fn())
            .with_parameters(vec![Parameter::query("n", "", vec![to_int.clone()])])
            .with_results(data_error_results("n"));
        assert!(good.validate().is_ok());

        let bad = Definition::new(Method::Get, handler as fn())
            .with_parameters(vec![Parameter::query("n", "", vec![to_int, upper])]);
        let tree = Descriptor::new("/").with_child(Descriptor::new("n").with_definition(bad));
        assert!(matches!(
            tree.validate(),
            Err(DefinitionError::ChainMismatch { index: 1, .. })
        ));
    }
}

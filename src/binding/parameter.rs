//! Handler inputs.

use serde::Serialize;

use crate::context::Context;
use crate::error::{BoxError, Result};
use crate::operator::{run_chain, validate_chain, SharedOperator, Value};

/// Wire location a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Path segment.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// URL-encoded or multipart form field.
    Form,
    /// Multipart file.
    File,
    /// Request body (singular, unnamed).
    Body,
    /// Value from a shared provider rather than request data.
    Prefab,
    /// Value derived from framework context (implicit, unnamed).
    Auto,
}

impl Source {
    /// Whether parameters from this source are addressed by name.
    #[inline]
    pub fn is_named(self) -> bool {
        !matches!(self, Source::Body | Source::Auto)
    }

    /// Lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Path => "path",
            Source::Query => "query",
            Source::Header => "header",
            Source::Form => "form",
            Source::File => "file",
            Source::Body => "body",
            Source::Prefab => "prefab",
            Source::Auto => "auto",
        }
    }
}

/// One handler input: where it comes from and how it becomes a typed value.
///
/// The operators run in declared order; an empty list passes the wire
/// value through.
#[derive(Debug, Clone)]
pub struct Parameter {
    /// Wire location.
    pub source: Source,
    /// Field name; always empty for [`Source::Body`] and [`Source::Auto`].
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Transform chain.
    pub operators: Vec<SharedOperator>,
}

impl Parameter {
    /// Create a parameter.
    ///
    /// An empty `name` is accepted for every source. The name is dropped
    /// for body and auto parameters, whose location is implicit.
    pub fn new(
        source: Source,
        name: impl Into<String>,
        description: impl Into<String>,
        operators: Vec<SharedOperator>,
    ) -> Self {
        let name = if source.is_named() {
            name.into()
        } else {
            String::new()
        };
        Self {
            source,
            name,
            description: description.into(),
            operators,
        }
    }

    /// Path parameter.
    pub fn path(
        name: impl Into<String>,
        description: impl Into<String>,
        operators: Vec<SharedOperator>,
    ) -> Self {
        Self::new(Source::Path, name, description, operators)
    }

    /// Query parameter.
    pub fn query(
        name: impl Into<String>,
        description: impl Into<String>,
        operators: Vec<SharedOperator>,
    ) -> Self {
        Self::new(Source::Query, name, description, operators)
    }

    /// Header parameter.
    pub fn header(
        name: impl Into<String>,
        description: impl Into<String>,
        operators: Vec<SharedOperator>,
    ) -> Self {
        Self::new(Source::Header, name, description, operators)
    }

    /// Form parameter.
    pub fn form(
        name: impl Into<String>,
        description: impl Into<String>,
        operators: Vec<SharedOperator>,
    ) -> Self {
        Self::new(Source::Form, name, description, operators)
    }

    /// File parameter.
    pub fn file(
        name: impl Into<String>,
        description: impl Into<String>,
        operators: Vec<SharedOperator>,
    ) -> Self {
        Self::new(Source::File, name, description, operators)
    }

    /// Body parameter.
    pub fn body(description: impl Into<String>, operators: Vec<SharedOperator>) -> Self {
        Self::new(Source::Body, "", description, operators)
    }

    /// Prefab parameter.
    pub fn prefab(
        name: impl Into<String>,
        description: impl Into<String>,
        operators: Vec<SharedOperator>,
    ) -> Self {
        Self::new(Source::Prefab, name, description, operators)
    }

    /// Auto parameter.
    pub fn auto(description: impl Into<String>, operators: Vec<SharedOperator>) -> Self {
        Self::new(Source::Auto, "", description, operators)
    }

    /// Identifier used for error attribution: the name, or the source label
    /// for unnamed parameters.
    pub fn field(&self) -> &str {
        if self.name.is_empty() {
            self.source.as_str()
        } else {
            &self.name
        }
    }

    /// Check the operator chain's type continuity.
    pub fn validate(&self) -> Result<()> {
        validate_chain(self.field(), &self.operators)
    }

    /// Run the operator chain over a raw wire value.
    pub fn operate(
        &self,
        ctx: &Context,
        value: Option<Value>,
    ) -> std::result::Result<Option<Value>, BoxError> {
        run_chain(&self.operators, ctx, self.field(), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::operator_fn;

    #[test]
    fn test_named_sources_keep_name() {
        let p = Parameter::path("id", "resource id", vec![]);
        assert_eq!(p.source, Source::Path);
        assert_eq!(p.name, "id");
        assert_eq!(p.description, "resource id");
        assert!(p.operators.is_empty());

        assert_eq!(Parameter::query("q", "", vec![]).source, Source::Query);
        assert_eq!(Parameter::header("X-Id", "", vec![]).source, Source::Header);
        assert_eq!(Parameter::form("f", "", vec![]).source, Source::Form);
        assert_eq!(Parameter::file("upload", "", vec![]).source, Source::File);
        assert_eq!(Parameter::prefab("db", "", vec![]).name, "db");
    }

    #[test]
    fn test_empty_name_is_structurally_legal() {
        for source in [
            Source::Path,
            Source::Query,
            Source::Header,
            Source::Form,
            Source::File,
        ] {
            let p = Parameter::new(source, "", "no name", vec![]);
            assert_eq!(p.name, "");
            assert_eq!(p.source, source);
        }
    }

    #[test]
    fn test_body_and_auto_ignore_name() {
        let body = Parameter::new(Source::Body, "ignored", "payload", vec![]);
        assert_eq!(body.name, "");
        assert_eq!(body.field(), "body");

        let auto = Parameter::new(Source::Auto, "ignored", "env", vec![]);
        assert_eq!(auto.name, "");
        assert_eq!(Parameter::auto("env", vec![]).source, Source::Auto);
        assert_eq!(Parameter::body("payload", vec![]).source, Source::Body);
    }

    #[test]
    fn test_operate_uses_name_as_field() {
        let op: SharedOperator = operator_fn("nonEmpty", |_ctx: &Context, field: &str, s: String| {
            if s.is_empty() {
                Err(format!("{field} is empty"))
            } else {
                Ok(s)
            }
        });
        let p = Parameter::query("q", "search", vec![op.clone()]);
        let err = p.operate(&Context::new(), None).unwrap_err();
        assert_eq!(err.to_string(), "q is empty");

        let body = Parameter::body("payload", vec![op]);
        let err = body.operate(&Context::new(), None).unwrap_err();
        assert_eq!(err.to_string(), "body is empty");
    }

    #[test]
    fn test_source_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Source::Prefab).unwrap(), "prefab");
        assert_eq!(Source::Header.as_str(), "header");
        assert!(Source::Header.is_named());
        assert!(!Source::Auto.is_named());
    }
}

//! Descriptor registry for assembling the route tree.
//!
//! The registry is an explicit value owned by the composition root: API
//! modules hand their descriptors to it, and whatever compiles the final
//! route table reads them back through [`Registry::root`] or
//! [`Registry::routes`].
//!
//! # Example
//!
//! ```
//! use wirebind::definition::{simple_descriptor, Method};
//! use wirebind::{mime, Registry};
//!
//! fn version() -> &'static str {
//!     "v1"
//! }
//!
//! let mut registry = Registry::builder()
//!     .root_path("/api/v1")
//!     .description("all v1 APIs")
//!     .produces(vec![mime::JSON.to_string()])
//!     .build();
//!
//! registry
//!     .register(simple_descriptor(Method::Get, "/version", version as fn() -> &'static str))
//!     .unwrap();
//!
//! let root = registry.root();
//! assert_eq!(root.path, "/api/v1");
//! assert_eq!(registry.routes()[0].path, "/api/v1/version");
//! ```

use std::collections::HashSet;

use crate::definition::{inherit, join_path, Descriptor, Method, Route, RpcDescriptor, RpcRoute};
use crate::error::Result;
use crate::mime;

/// Registry configuration.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Path of the root descriptor.
    pub root_path: String,
    /// Description of the root descriptor.
    pub description: String,
    /// Root-level accepted content types.
    pub consumes: Vec<String>,
    /// Root-level response content types.
    pub produces: Vec<String>,
    /// Reject descriptors whose operator chains do not line up.
    pub validate_chains: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            root_path: "/".to_string(),
            description: String::new(),
            consumes: mime::any(),
            produces: mime::any(),
            validate_chains: true,
        }
    }
}

/// Builder for configuring and creating a [`Registry`].
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    config: RegistryConfig,
}

impl RegistryBuilder {
    /// Create a new registry builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root path.
    ///
    /// Default: `/`
    pub fn root_path(mut self, path: impl Into<String>) -> Self {
        self.config.root_path = path.into();
        self
    }

    /// Set the root description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.config.description = description.into();
        self
    }

    /// Set the root-level accepted content types.
    ///
    /// Default: `*/*`
    pub fn consumes(mut self, consumes: Vec<String>) -> Self {
        self.config.consumes = consumes;
        self
    }

    /// Set the root-level response content types.
    ///
    /// Default: `*/*`
    pub fn produces(mut self, produces: Vec<String>) -> Self {
        self.config.produces = produces;
        self
    }

    /// Enable or disable operator chain validation on registration.
    ///
    /// Default: enabled
    pub fn validate_chains(mut self, enabled: bool) -> Self {
        self.config.validate_chains = enabled;
        self
    }

    /// Build the registry.
    pub fn build(self) -> Registry {
        Registry::with_config(self.config)
    }
}

/// Registry of route and RPC descriptors.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Configuration.
    config: RegistryConfig,
    /// Route descriptors, in registration order.
    descriptors: Vec<Descriptor>,
    /// RPC descriptors, in registration order.
    rpc_descriptors: Vec<RpcDescriptor>,
}

impl Registry {
    /// Create a registry with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Create a registry with the given configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            descriptors: Vec::new(),
            rpc_descriptors: Vec::new(),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register a route descriptor.
    ///
    /// Routes resolving to an already registered (path, method) are kept and
    /// logged as duplicates.
    ///
    /// # Errors
    ///
    /// With chain validation enabled, returns the first chain mismatch found
    /// in the descriptor's subtree. Nothing is registered on error.
    pub fn register(&mut self, descriptor: Descriptor) -> Result<()> {
        if self.config.validate_chains {
            if let Err(e) = descriptor.validate() {
                tracing::warn!(path = %descriptor.path, "rejected descriptor: {}", e);
                return Err(e);
            }
        }

        for (path, method) in self.duplicate_routes(&descriptor) {
            tracing::warn!(path = %path, method = %method, "duplicate route");
        }
        tracing::debug!(
            path = %descriptor.path,
            definitions = descriptor.definition_count(),
            "registered descriptor"
        );
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Register several route descriptors, stopping at the first error.
    pub fn register_all(
        &mut self,
        descriptors: impl IntoIterator<Item = Descriptor>,
    ) -> Result<()> {
        descriptors.into_iter().try_for_each(|d| self.register(d))
    }

    /// Register an RPC descriptor.
    ///
    /// Actions resolving to an already registered path are kept and logged
    /// as duplicates.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::register`].
    pub fn register_rpc(&mut self, descriptor: RpcDescriptor) -> Result<()> {
        if self.config.validate_chains {
            if let Err(e) = descriptor.validate() {
                tracing::warn!(path = %descriptor.path, "rejected rpc descriptor: {}", e);
                return Err(e);
            }
        }

        for path in self.duplicate_rpc_paths(&descriptor) {
            tracing::warn!(path = %path, "duplicate rpc action");
        }
        tracing::debug!(path = %descriptor.path, "registered rpc descriptor");
        self.rpc_descriptors.push(descriptor);
        Ok(())
    }

    /// Registered route descriptors.
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// Registered RPC descriptors.
    pub fn rpc_descriptors(&self) -> &[RpcDescriptor] {
        &self.rpc_descriptors
    }

    /// Check if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty() && self.rpc_descriptors.is_empty()
    }

    /// Assemble the root route descriptor.
    pub fn root(&self) -> Descriptor {
        Descriptor::new(self.config.root_path.clone())
            .with_description(self.config.description.clone())
            .with_consumes(self.config.consumes.clone())
            .with_produces(self.config.produces.clone())
            .with_children(self.descriptors.iter().cloned())
    }

    /// Assemble the root RPC descriptor.
    pub fn rpc_root(&self) -> RpcDescriptor {
        RpcDescriptor::new(self.config.root_path.clone())
            .with_description(self.config.description.clone())
            .with_consumes(self.config.consumes.clone())
            .with_produces(self.config.produces.clone())
            .with_children(self.rpc_descriptors.iter().cloned())
    }

    /// Every registered definition, resolved under the root.
    pub fn routes(&self) -> Vec<Route<'_>> {
        let (root, consumes, produces) = self.root_scope();
        let mut routes = Vec::new();
        for descriptor in &self.descriptors {
            descriptor.collect(&root, &consumes, &produces, &mut routes);
        }
        routes
    }

    /// Every registered RPC action, resolved under the root.
    pub fn rpc_routes(&self) -> Vec<RpcRoute<'_>> {
        let (root, consumes, produces) = self.root_scope();
        let mut routes = Vec::new();
        for descriptor in &self.rpc_descriptors {
            descriptor.collect(&root, &consumes, &produces, &mut routes);
        }
        routes
    }

    /// Root path and root-level content types every walk starts from.
    fn root_scope(&self) -> (String, Vec<String>, Vec<String>) {
        let any = mime::any();
        (
            join_path("", &self.config.root_path),
            inherit(&self.config.consumes, &any).to_vec(),
            inherit(&self.config.produces, &any).to_vec(),
        )
    }

    /// Routes of `descriptor` whose (path, method) is already registered.
    fn duplicate_routes(&self, descriptor: &Descriptor) -> Vec<(String, Method)> {
        let existing: HashSet<(String, Method)> = self
            .routes()
            .into_iter()
            .map(|r| (r.path, r.method))
            .collect();

        let (root, consumes, produces) = self.root_scope();
        let mut incoming = Vec::new();
        descriptor.collect(&root, &consumes, &produces, &mut incoming);
        incoming
            .into_iter()
            .map(|r| (r.path, r.method))
            .filter(|key| existing.contains(key))
            .collect()
    }

    /// Action paths of `descriptor` that are already registered.
    fn duplicate_rpc_paths(&self, descriptor: &RpcDescriptor) -> Vec<String> {
        let existing: HashSet<String> = self.rpc_routes().into_iter().map(|r| r.path).collect();

        let (root, consumes, produces) = self.root_scope();
        let mut incoming = Vec::new();
        descriptor.collect(&root, &consumes, &produces, &mut incoming);
        incoming
            .into_iter()
            .map(|r| r.path)
            .filter(|path| existing.contains(path))
            .collect()
    }
}

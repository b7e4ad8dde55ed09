//! Dependency-injection boundary used to materialize a route's `resolve` map.

use crate::boundary::BoundaryError;
use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// A single resolved dependency value. Consumers downcast to the concrete
/// type they agreed on with whoever registered the route.
pub type LocalValue = Arc<dyn Any + Send + Sync>;

/// The bag handed to the view layer once a transition succeeds.
pub type Locals = HashMap<String, LocalValue>;

/// Reserved `Locals` key holding the route's template content as a `String`.
pub const TEMPLATE_KEY: &str = "$template";

/// A caller-supplied factory for one resolve-map entry. Invoked through
/// [`DependencyResolver::invoke`] so the host controls how factories run.
#[async_trait]
pub trait ResolveFactory: Send + Sync {
    async fn resolve(&self) -> Result<LocalValue, BoundaryError>;
}

/// Service-lookup and factory-invocation boundary.
#[async_trait]
pub trait DependencyResolver: Send + Sync {
    /// Looks up a named service.
    async fn get(&self, name: &str) -> Result<LocalValue, BoundaryError>;

    /// Invokes a resolve factory, awaiting its result.
    async fn invoke(&self, factory: Arc<dyn ResolveFactory>) -> Result<LocalValue, BoundaryError>;
}

//! Location-source boundary: the host's view of the navigable location.

use crate::boundary::BoundaryError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Read and replace-navigate the effective location.
///
/// The host observes its own location changes and triggers the router via
/// [`Router::handle_location_change`](crate::Router::handle_location_change);
/// this trait only covers the snapshot reads and the programmatic
/// replace-navigations the router issues for redirects. Replace-navigations
/// must not push new history.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Current path component, always starting with `/`.
    async fn path(&self) -> String;

    /// Current query parameters.
    async fn search(&self) -> HashMap<String, String>;

    /// Replaces path and query in one navigation.
    async fn replace_with(
        &self,
        path: &str,
        search: &HashMap<String, String>,
    ) -> Result<(), BoundaryError>;

    /// Replaces the whole url (path plus query) in one navigation.
    async fn replace_url(&self, url: &str) -> Result<(), BoundaryError>;
}

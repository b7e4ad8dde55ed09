//! Route-table data model: ordered compiled entries plus one fallback,
//! scoped to an owner, with the committed-route cell.

use crate::definition::{RedirectTarget, RouteDefinition};
use crate::events::OwnerId;
use crate::observability::{events, fields};
use crate::routing::pattern::{compile, MatchOptions, PathPattern, PathSpec, PatternError};
use crate::routing::route_match::RouteMatch;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

const COMPONENT: &str = "route_table";

/// One registered route: a compiled pattern plus the caller's definition.
/// The pattern is absent only on the fallback entry.
pub struct RouteEntry {
    pattern: Option<PathPattern>,
    definition: RouteDefinition,
}

impl RouteEntry {
    pub(crate) fn new(pattern: Option<PathPattern>, definition: RouteDefinition) -> Arc<Self> {
        Arc::new(Self {
            pattern,
            definition,
        })
    }

    pub fn pattern(&self) -> Option<&PathPattern> {
        self.pattern.as_ref()
    }

    pub fn definition(&self) -> &RouteDefinition {
        &self.definition
    }
}

/// An owner's ordered set of routes. Entries are appended during
/// configuration and matched first-structural-match-wins; `current` is the
/// single mutable cell every asynchronous continuation re-reads to detect
/// staleness.
pub struct RouteTable {
    owner: Option<OwnerId>,
    entries: Mutex<Vec<Arc<RouteEntry>>>,
    fallback: Mutex<Option<Arc<RouteEntry>>>,
    current: Mutex<Option<Arc<RouteMatch>>>,
}

impl RouteTable {
    pub(crate) fn new(owner: Option<OwnerId>) -> Arc<Self> {
        Arc::new(Self {
            owner,
            entries: Mutex::new(Vec::new()),
            fallback: Mutex::new(None),
            current: Mutex::new(None),
        })
    }

    /// Owner this table broadcasts from; `None` is the root table created
    /// outside any owner.
    pub(crate) fn owner(&self) -> Option<OwnerId> {
        self.owner
    }

    /// Compiles and appends a route. A relative path is made absolute with
    /// `base` first. Unless the path already ends in a wildcard or ellipsis
    /// marker, a redirect alias for the slash-toggled form is appended right
    /// after the primary entry and participates in ordering normally.
    pub(crate) async fn add_route(
        &self,
        spec: PathSpec,
        definition: RouteDefinition,
        options: &MatchOptions,
        base: Option<&str>,
    ) -> Result<(), PatternError> {
        let spec = match (&spec, base) {
            (PathSpec::Path(path), Some(base)) if !path.starts_with('/') => {
                PathSpec::Path(format!("{base}{path}"))
            }
            _ => spec,
        };

        let pattern = compile(&spec, options)?;
        debug!(
            event = events::ROUTE_ADD,
            component = COMPONENT,
            owner = %fields::format_owner(self.owner),
            route = %pattern.source(),
            "route registered"
        );

        let mut entries = self.entries.lock().await;
        entries.push(RouteEntry::new(Some(pattern), definition));

        if let Some(path) = spec.as_path() {
            if !path.ends_with('*') && !path.ends_with("...") {
                let toggled = match path.strip_suffix('/') {
                    Some(stripped) => stripped.to_string(),
                    None => format!("{path}/"),
                };
                let alias_pattern = compile(&PathSpec::Path(toggled), options)?;
                let alias_definition = RouteDefinition::new()
                    .redirect_to(RedirectTarget::Path(path.to_string()));
                debug!(
                    event = events::ROUTE_ADD_REDIRECT_ALIAS,
                    component = COMPONENT,
                    owner = %fields::format_owner(self.owner),
                    route = %alias_pattern.source(),
                    "trailing-slash redirect alias registered"
                );
                entries.push(RouteEntry::new(Some(alias_pattern), alias_definition));
            }
        }

        Ok(())
    }

    /// Sets or replaces the pattern-less fallback entry.
    pub(crate) async fn set_fallback(&self, definition: RouteDefinition) {
        debug!(
            event = events::FALLBACK_SET,
            component = COMPONENT,
            owner = %fields::format_owner(self.owner),
            "fallback route set"
        );
        let mut fallback = self.fallback.lock().await;
        *fallback = Some(RouteEntry::new(None, definition));
    }

    pub(crate) async fn entries_snapshot(&self) -> Vec<Arc<RouteEntry>> {
        self.entries.lock().await.clone()
    }

    pub(crate) async fn fallback(&self) -> Option<Arc<RouteEntry>> {
        self.fallback.lock().await.clone()
    }

    pub(crate) async fn route_count(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub(crate) async fn current(&self) -> Option<Arc<RouteMatch>> {
        self.current.lock().await.clone()
    }

    pub(crate) async fn set_current(&self, next: Option<Arc<RouteMatch>>) {
        let mut current = self.current.lock().await;
        *current = next;
    }

    /// Identity comparison against the committed cell; two absent routes
    /// compare equal.
    pub(crate) async fn current_is(&self, candidate: Option<&Arc<RouteMatch>>) -> bool {
        let current = self.current.lock().await;
        match (current.as_ref(), candidate) {
            (None, None) => true,
            (Some(current), Some(candidate)) => Arc::ptr_eq(current, candidate),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RouteTable;
    use crate::definition::{RedirectTarget, RouteDefinition};
    use crate::routing::pattern::{MatchOptions, PathSpec};
    use regex::Regex;

    #[tokio::test]
    async fn add_route_appends_trailing_slash_redirect_alias() {
        let table = RouteTable::new(None);
        table
            .add_route(
                PathSpec::from("/books/:bookId"),
                RouteDefinition::new(),
                &MatchOptions::default(),
                None,
            )
            .await
            .unwrap();

        let entries = table.entries_snapshot().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[1].pattern().unwrap().source(),
            "/books/:bookId/"
        );
        match entries[1].definition().redirect_to.as_ref().unwrap() {
            RedirectTarget::Path(path) => assert_eq!(path, "/books/:bookId"),
            RedirectTarget::Compute(_) => panic!("alias should redirect to the literal path"),
        }
    }

    #[tokio::test]
    async fn trailing_slash_path_aliases_to_the_stripped_form() {
        let table = RouteTable::new(None);
        table
            .add_route(
                PathSpec::from("/books/"),
                RouteDefinition::new(),
                &MatchOptions::default(),
                None,
            )
            .await
            .unwrap();

        let entries = table.entries_snapshot().await;
        assert_eq!(entries[1].pattern().unwrap().source(), "/books");
    }

    #[tokio::test]
    async fn wildcard_and_ellipsis_paths_get_no_alias() {
        let table = RouteTable::new(None);
        table
            .add_route(
                PathSpec::from("/bar/*"),
                RouteDefinition::new(),
                &MatchOptions::default(),
                None,
            )
            .await
            .unwrap();
        table
            .add_route(
                PathSpec::from("/bar/..."),
                RouteDefinition::new(),
                &MatchOptions::default(),
                None,
            )
            .await
            .unwrap();

        assert_eq!(table.route_count().await, 2);
    }

    #[tokio::test]
    async fn native_regex_routes_get_no_alias() {
        let table = RouteTable::new(None);
        table
            .add_route(
                PathSpec::from(Regex::new(r"/(\d+)").unwrap()),
                RouteDefinition::new(),
                &MatchOptions::default(),
                None,
            )
            .await
            .unwrap();

        assert_eq!(table.route_count().await, 1);
    }

    #[tokio::test]
    async fn relative_path_is_prefixed_with_base() {
        let table = RouteTable::new(Some(3));
        table
            .add_route(
                PathSpec::from("ch/:chapterId"),
                RouteDefinition::new(),
                &MatchOptions::default(),
                Some("/Book/Moby/"),
            )
            .await
            .unwrap();

        let entries = table.entries_snapshot().await;
        assert_eq!(
            entries[0].pattern().unwrap().source(),
            "/Book/Moby/ch/:chapterId"
        );
    }

    #[tokio::test]
    async fn absolute_path_ignores_base() {
        let table = RouteTable::new(Some(3));
        table
            .add_route(
                PathSpec::from("/elsewhere"),
                RouteDefinition::new(),
                &MatchOptions::default(),
                Some("/Book/Moby/"),
            )
            .await
            .unwrap();

        let entries = table.entries_snapshot().await;
        assert_eq!(entries[0].pattern().unwrap().source(), "/elsewhere");
    }
}

//! Resolved-route snapshot created per navigation attempt.

use crate::boundary::Locals;
use crate::control_plane::route_table::RouteEntry;
use crate::definition::RouteDefinition;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Route parameter map. Unnamed captures are keyed by their decimal index
/// (`"0"`, `"1"`, …), independent of named parameters.
pub type RouteParams = HashMap<String, String>;

/// The outcome of matching a location against a table.
///
/// Snapshots are superseded, never replaced in place; only `params` and
/// `locals` mutate after creation (params refresh on reuse, locals attach on
/// resolution success). Snapshot identity (`Arc` pointer) is what the
/// staleness guard compares; entry identity is what the reuse check compares.
pub struct RouteMatch {
    entry: Arc<RouteEntry>,
    path_params: RouteParams,
    base: Option<String>,
    params: RwLock<RouteParams>,
    locals: RwLock<Option<Locals>>,
}

impl RouteMatch {
    pub(crate) fn new(
        entry: Arc<RouteEntry>,
        path_params: RouteParams,
        params: RouteParams,
        base: Option<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            entry,
            path_params,
            base,
            params: RwLock::new(params),
            locals: RwLock::new(None),
        })
    }

    pub fn definition(&self) -> &RouteDefinition {
        self.entry.definition()
    }

    /// Parameters extracted from the path alone.
    pub fn path_params(&self) -> &RouteParams {
        &self.path_params
    }

    /// Union of path and query parameters; path parameters win on collision.
    pub fn params(&self) -> RouteParams {
        self.params
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Matched-prefix string, set only when the pattern has an ellipsis.
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Resolved dependency bag; populated only after a successful transition.
    pub fn locals(&self) -> Option<Locals> {
        self.locals
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set_params(&self, params: RouteParams) {
        *self.params.write().unwrap_or_else(PoisonError::into_inner) = params;
    }

    pub(crate) fn set_locals(&self, locals: Locals) {
        *self.locals.write().unwrap_or_else(PoisonError::into_inner) = Some(locals);
    }

    /// True when both snapshots were resolved from the same registered entry.
    pub(crate) fn same_entry(&self, other: &RouteMatch) -> bool {
        Arc::ptr_eq(&self.entry, &other.entry)
    }
}

//! Lifecycle events announced on the owner tree.

use crate::observability::events;
use crate::resolution::ResolutionError;
use crate::routing::route_match::RouteMatch;
use std::sync::Arc;

/// A route lifecycle notification. `next`/`last` may each be absent: the
/// very first navigation has no `last`, and a navigation that stops matching
/// anything has no `next`.
#[derive(Clone)]
pub enum RouteEvent {
    /// A full transition was decided; async resolution is starting.
    ChangeStart {
        next: Option<Arc<RouteMatch>>,
        last: Option<Arc<RouteMatch>>,
    },
    /// Resolution settled successfully and `next` is committed with locals.
    ChangeSuccess {
        next: Option<Arc<RouteMatch>>,
        last: Option<Arc<RouteMatch>>,
    },
    /// Resolution failed; `next` stays committed but its locals are not
    /// trustworthy for rendering.
    ChangeError {
        next: Option<Arc<RouteMatch>>,
        last: Option<Arc<RouteMatch>>,
        error: Arc<ResolutionError>,
    },
    /// Same route reused; only its params were refreshed.
    Update { current: Arc<RouteMatch> },
}

impl RouteEvent {
    /// Canonical event name, shared with the structured-logging constants.
    pub fn name(&self) -> &'static str {
        match self {
            RouteEvent::ChangeStart { .. } => events::ROUTE_CHANGE_START,
            RouteEvent::ChangeSuccess { .. } => events::ROUTE_CHANGE_SUCCESS,
            RouteEvent::ChangeError { .. } => events::ROUTE_CHANGE_ERROR,
            RouteEvent::Update { .. } => events::ROUTE_UPDATE,
        }
    }
}

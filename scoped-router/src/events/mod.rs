//! Owner hierarchy and lifecycle-event layer.
//!
//! Broadcast is tree-scoped publish/subscribe: events originate at a target
//! owner and descend to its subtree, with a propagation-control token that
//! lets a listener stop descent below itself. Nested scoped routers rely on
//! that token to isolate their subtrees from ancestor route changes.

mod owner_tree;
mod route_event;

pub use owner_tree::{DestroyHook, EventControl, OwnerId, OwnerTree, OwnerTreeError, RouteListener};
pub use route_event::RouteEvent;

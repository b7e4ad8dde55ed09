//! Canonical structured event names used across `scoped-router`.

// Route lifecycle events broadcast on the owner tree.
pub const ROUTE_CHANGE_START: &str = "route_change_start";
pub const ROUTE_CHANGE_SUCCESS: &str = "route_change_success";
pub const ROUTE_CHANGE_ERROR: &str = "route_change_error";
pub const ROUTE_UPDATE: &str = "route_update";

// Registration and table lifecycle events.
pub const TABLE_REGISTER: &str = "table_register";
pub const TABLE_UNREGISTER: &str = "table_unregister";
pub const ROUTE_ADD: &str = "route_add";
pub const ROUTE_ADD_REDIRECT_ALIAS: &str = "route_add_redirect_alias";
pub const FALLBACK_SET: &str = "fallback_set";

// Transition and resolution events.
pub const REUSE_PARAMS_REFRESH: &str = "reuse_params_refresh";
pub const REDIRECT_ISSUED: &str = "redirect_issued";
pub const RESOLVE_START: &str = "resolve_start";
pub const RESOLVE_OK: &str = "resolve_ok";
pub const RESOLVE_FAILED: &str = "resolve_failed";
pub const RESOLVE_STALE_DROPPED: &str = "resolve_stale_dropped";
pub const RELOAD_REQUESTED: &str = "reload_requested";

// Scoped-router attach/teardown events.
pub const SCOPED_ROUTER_ATTACH: &str = "scoped_router_attach";
pub const SCOPED_ROUTER_TEARDOWN: &str = "scoped_router_teardown";

//! Matching-policy layer.
//!
//! Pure path-pattern compilation, first-match-wins dispatch against a route
//! table, and redirect-template interpolation. Nothing here touches the
//! collaborator boundaries or broadcasts events.

pub(crate) mod matcher;
pub mod pattern;
pub(crate) mod redirect;
pub mod route_match;

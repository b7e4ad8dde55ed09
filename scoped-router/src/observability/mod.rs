//! Observability layer.
//!
//! Canonical `tracing` event names and field keys. The library emits
//! events/spans and never installs a global subscriber; binaries and tests
//! own one-time `tracing_subscriber` initialization.

pub mod events;
pub mod fields;

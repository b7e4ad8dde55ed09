//! Asynchronous route resolution: dependency fan-out and the per-navigation
//! transition state machine.

pub(crate) mod locals;
pub(crate) mod transition;

pub use locals::ResolutionError;

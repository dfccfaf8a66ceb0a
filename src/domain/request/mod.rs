//! Request aggregate - domain model and state transitions.
//!
//! This module contains the core domain logic for requests:
//! - Request record and lifecycle states
//! - State transition table and guarded mutators

pub mod state;
pub mod transitions;

// Re-export commonly used types
pub use state::*;
pub use transitions::can_transition;

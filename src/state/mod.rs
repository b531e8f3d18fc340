//! Shared state values.
//!
//! This module provides the value type every reducer consumes and produces:
//! - `State`: an immutable, cheaply clonable state handle
//! - `Envelope`: a value paired with its dependency snapshot
//! - `envelope`: wrapping and unwrapping helpers

pub mod envelope;
mod state;

pub use state::{Envelope, Slices, State, StateNode};

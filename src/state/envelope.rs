//! Wrapping user values together with their dependency snapshot.
//!
//! A reducer that declares dependencies stores its own value next to the
//! states its dependencies had after the same action. The envelope is a
//! distinct [`StateNode`] variant, so a user value can never be mistaken for
//! one.

use super::state::{Envelope, Slices, State, StateNode};
use crate::error::{Error, Result};
use crate::reducer::map_values;

/// Pair `value` with the combined `dependencies` state.
///
/// Fails with [`Error::AlreadyWrapped`] if `value` is itself an envelope.
pub fn wrap(value: State, dependencies: State) -> Result<State> {
    if value.is_wrapped() {
        return Err(Error::AlreadyWrapped);
    }
    Ok(State::from_node(StateNode::Wrapped(Envelope {
        value,
        dependencies,
    })))
}

/// The inner value of an envelope, or `state` itself when it is not wrapped.
pub fn unwrap(state: &State) -> &State {
    match state.node() {
        StateNode::Wrapped(envelope) => envelope.value(),
        _ => state,
    }
}

/// Unwrap every slice of a dependency snapshot.
pub fn unwrap_slices(slices: &Slices) -> Slices {
    map_values(slices, |state, _| unwrap(state).clone())
}

use super::combine::{collect_named, combine};
use crate::error::{Error, Result};
use crate::memo::{ByValue, MemoSlot, Pairwise, StateEquality};
use crate::state::{envelope, Slices, State, StateNode};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Marker for types that can be dispatched to reducers.
///
/// Reducers keep a copy of the last action they saw and compare actions by
/// value, so any `Clone + PartialEq` type qualifies.
pub trait Action: Clone + PartialEq + Send + Sync + 'static {}

impl<T: Clone + PartialEq + Send + Sync + 'static> Action for T {}

type ReduceFn<A> = dyn Fn(Option<&State>, &A) -> Result<State> + Send + Sync;

/// A reducer: a pure function from `(state, action)` to the next state.
///
/// `None` stands for "no state yet". Cloning a reducer shares it, including
/// its memoization slot, so the same reducer bound under several names only
/// computes once per distinct input.
pub struct Reducer<A> {
    name: Arc<str>,
    reduce: Arc<ReduceFn<A>>,
}

impl<A: Action> Reducer<A> {
    pub(crate) fn from_fn<F>(name: impl Into<Arc<str>>, reduce: F) -> Self
    where
        F: Fn(Option<&State>, &A) -> Result<State> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            reduce: Arc::new(reduce),
        }
    }

    /// Wrap this reducer in a single-slot cache keyed on `(state, action)`.
    pub(crate) fn memoized(self, state_equality: StateEquality) -> Self {
        let slot: MemoSlot<(Option<State>, A), State, _> =
            MemoSlot::new(Pairwise(state_equality, ByValue));
        let name = Arc::clone(&self.name);
        Self::from_fn(name, move |state, action| {
            slot.get_or_try_compute((state.cloned(), action.clone()), |(state, action)| {
                self.reduce(state.as_ref(), action)
            })
        })
    }

    /// Compute the next state.
    pub fn reduce(&self, state: Option<&State>, action: &A) -> Result<State> {
        (self.reduce)(state, action)
    }
}

impl<A> Reducer<A> {
    /// The name used in logs and errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if both handles are the same reducer.
    pub fn ptr_eq(a: &Reducer<A>, b: &Reducer<A>) -> bool {
        Arc::ptr_eq(&a.reduce, &b.reduce)
    }
}

impl<A> Clone for Reducer<A> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            reduce: Arc::clone(&self.reduce),
        }
    }
}

impl<A> fmt::Debug for Reducer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer").field("name", &self.name).finish()
    }
}

/// Builder for reducers that need a name or a non-default memoization policy.
///
/// # Examples
///
/// ```
/// use redep::{ReducerBuilder, State, StateEquality};
///
/// #[derive(Clone, PartialEq)]
/// enum Action { Touch }
///
/// let touched = ReducerBuilder::new()
///     .name("touched")
///     .state_equality(StateEquality::Structural)
///     .build(|state: Option<&State>, _action: &Action| {
///         Ok(state.cloned().unwrap_or_else(|| State::from(false)))
///     });
///
/// assert_eq!(touched.name(), "touched");
/// ```
#[derive(Debug, Clone)]
pub struct ReducerBuilder {
    name: Option<String>,
    state_equality: StateEquality,
}

impl ReducerBuilder {
    pub fn new() -> Self {
        Self {
            name: None,
            state_equality: StateEquality::default(),
        }
    }

    /// Name the reducer for logs and error messages.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// How the incoming state is compared with the previous one.
    pub fn state_equality(mut self, state_equality: StateEquality) -> Self {
        self.state_equality = state_equality;
        self
    }

    fn reducer_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| "anonymous".to_string())
    }

    /// Build a memoized reducer with no dependencies.
    ///
    /// The state it stores is exactly what `reducer` returns.
    pub fn build<A, F>(self, reducer: F) -> Reducer<A>
    where
        A: Action,
        F: Fn(Option<&State>, &A) -> Result<State> + Send + Sync + 'static,
    {
        let name = self.reducer_name();
        debug!(reducer = %name, "created reducer");
        Reducer::from_fn(name, reducer).memoized(self.state_equality)
    }

    /// Build a memoized reducer that reads the states of `dependencies`.
    ///
    /// On every call the dependencies are first brought up to date with the
    /// same action, then `reducer` receives their unwrapped states by name.
    /// The stored state is an envelope holding the result together with the
    /// dependency snapshot it was computed from.
    pub fn build_with<A, I, K, F>(self, dependencies: I, reducer: F) -> Result<Reducer<A>>
    where
        A: Action,
        I: IntoIterator<Item = (K, Reducer<A>)>,
        K: Into<String>,
        F: Fn(Option<&State>, &A, &Slices) -> Result<State> + Send + Sync + 'static,
    {
        let name = self.reducer_name();
        let dependencies = collect_named(dependencies)?;
        let names: Vec<&String> = dependencies.keys().collect();
        debug!(reducer = %name, dependencies = ?names, "created reducer with dependencies");

        let resolver =
            combine(dependencies, format!("{name}/dependencies")).memoized(self.state_equality);
        let reducer_name: Arc<str> = name.into();
        let error_name = Arc::clone(&reducer_name);

        let lifted = Reducer::from_fn(reducer_name, move |state, action| {
            let (value, snapshot) = match state.map(State::node) {
                Some(StateNode::Wrapped(wrapped)) => {
                    (Some(wrapped.value()), Some(wrapped.dependencies()))
                }
                _ => (state, None),
            };

            let next = resolver.reduce(snapshot, action)?;
            let resolved = next.slices().map(envelope::unwrap_slices).unwrap_or_default();
            trace!(reducer = %error_name, dependencies = resolved.len(), "resolved dependencies");

            let output = reducer(value, action, &resolved)?;
            if output.is_wrapped() {
                return Err(Error::WrappedOutput {
                    reducer: error_name.to_string(),
                });
            }
            envelope::wrap(output, next)
        });

        Ok(lifted.memoized(self.state_equality))
    }
}

impl Default for ReducerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a memoized reducer with no dependencies.
///
/// # Example
///
/// ```
/// use redep::{create_reducer, State};
///
/// #[derive(Clone, PartialEq)]
/// enum Action { Increment }
///
/// let counter = create_reducer(|state: Option<&State>, action: &Action| {
///     let count = state.and_then(State::as_i64).unwrap_or(0);
///     match action {
///         Action::Increment => Ok(State::from(count + 1)),
///     }
/// });
///
/// let state = counter.reduce(None, &Action::Increment).unwrap();
/// assert_eq!(state.as_i64(), Some(1));
/// ```
pub fn create_reducer<A, F>(reducer: F) -> Reducer<A>
where
    A: Action,
    F: Fn(Option<&State>, &A) -> Result<State> + Send + Sync + 'static,
{
    ReducerBuilder::new().build(reducer)
}

/// Create a memoized reducer that observes the updated states of `dependencies`.
///
/// Fails with [`Error::DuplicateName`] if two dependencies share a name.
///
/// # Example
///
/// ```
/// use redep::{create_reducer, create_reducer_with, State};
///
/// #[derive(Clone, PartialEq)]
/// enum Action { Increment }
///
/// let count = create_reducer(|state: Option<&State>, _: &Action| {
///     Ok(State::from(state.and_then(State::as_i64).unwrap_or(0) + 1))
/// });
/// let doubled = create_reducer_with([("count", count)], |_state, _action: &Action, deps| {
///     Ok(State::from(deps["count"].as_i64().unwrap_or(0) * 2))
/// })
/// .unwrap();
///
/// let state = doubled.reduce(None, &Action::Increment).unwrap();
/// assert_eq!(state.unwrapped().as_i64(), Some(2));
/// ```
pub fn create_reducer_with<A, I, K, F>(dependencies: I, reducer: F) -> Result<Reducer<A>>
where
    A: Action,
    I: IntoIterator<Item = (K, Reducer<A>)>,
    K: Into<String>,
    F: Fn(Option<&State>, &A, &Slices) -> Result<State> + Send + Sync + 'static,
{
    ReducerBuilder::new().build_with(dependencies, reducer)
}

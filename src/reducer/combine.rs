use super::map::try_map_values;
use super::reducer::{Action, Reducer};
use crate::error::{Error, Result};
use crate::state::State;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

pub(crate) type ReducerMap<A> = BTreeMap<String, Reducer<A>>;

/// Collect named reducers, rejecting repeated names.
pub(crate) fn collect_named<A, I, K>(reducers: I) -> Result<ReducerMap<A>>
where
    I: IntoIterator<Item = (K, Reducer<A>)>,
    K: Into<String>,
{
    let mut named = ReducerMap::new();
    for (name, reducer) in reducers {
        let name = name.into();
        if named.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }
        named.insert(name, reducer);
    }
    Ok(named)
}

pub(crate) fn combine<A: Action>(reducers: ReducerMap<A>, name: impl Into<Arc<str>>) -> Reducer<A> {
    Reducer::from_fn(name, move |state, action| {
        let slices = try_map_values(&reducers, |reducer, key| {
            reducer.reduce(state.and_then(|state| state.get(key)), action)
        })?;
        Ok(State::combined(slices))
    })
}

/// Combine named reducers into one reducer over a combined state.
///
/// Each reducer manages the slice stored under its name. Every call returns
/// a fresh combined state; sharing happens inside the slices, whose reducers
/// are memoized. A missing root state behaves like an empty one.
///
/// # Example
///
/// ```
/// use redep::{combine_reducers, create_reducer, State};
///
/// #[derive(Clone, PartialEq)]
/// enum Action { Init }
///
/// let zero = create_reducer(|state: Option<&State>, _: &Action| {
///     Ok(state.cloned().unwrap_or_else(|| State::from(0)))
/// });
/// let root = combine_reducers([("left", zero.clone()), ("right", zero)]).unwrap();
///
/// let state = root.reduce(None, &Action::Init).unwrap();
/// assert_eq!(state.get("left").and_then(State::as_i64), Some(0));
/// assert_eq!(state.get("right").and_then(State::as_i64), Some(0));
/// ```
pub fn combine_reducers<A, I, K>(reducers: I) -> Result<Reducer<A>>
where
    A: Action,
    I: IntoIterator<Item = (K, Reducer<A>)>,
    K: Into<String>,
{
    let reducers = collect_named(reducers)?;
    let names: Vec<&String> = reducers.keys().collect();
    debug!(slices = ?names, "combined reducers");
    Ok(combine(reducers, "combined"))
}

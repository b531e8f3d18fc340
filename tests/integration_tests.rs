//! Integration tests for Redep

use redep::{combine_reducers, create_reducer, create_reducer_with, Reducer, Slices, State};
use serde_json::json;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

#[derive(Clone, Debug, PartialEq)]
enum Action {
    Init,
    Increment,
    Decrement,
}

fn counter(initial: i64, step: i64) -> Reducer<Action> {
    create_reducer(move |state: Option<&State>, action: &Action| {
        let count = state.and_then(State::as_i64).unwrap_or(initial);
        Ok(match action {
            Action::Increment => State::from(count + step),
            Action::Decrement => State::from(count - step),
            Action::Init => match state {
                Some(state) => state.clone(),
                None => State::from(count),
            },
        })
    })
}

fn plain(state: &State, key: &str) -> Option<i64> {
    state.get(key).and_then(State::as_i64)
}

fn inner(state: &State, key: &str) -> Option<i64> {
    state.get(key).map(State::unwrapped).and_then(State::as_i64)
}

#[test]
fn reducers_can_depend_on_each_other() {
    let a = counter(0, 1);
    let b = counter(5, 10);
    let c = create_reducer_with(
        [("a", a.clone()), ("b", b.clone())],
        |state: Option<&State>, _: &Action, deps: &Slices| {
            let total = state.and_then(State::as_i64).unwrap_or(0);
            let sum = deps["a"].as_i64().unwrap_or(0) + deps["b"].as_i64().unwrap_or(0);
            Ok(State::from(total + sum))
        },
    )
    .unwrap();
    let d = create_reducer_with([("c", c.clone())], |_, _: &Action, deps: &Slices| {
        Ok(State::from(deps["c"].as_i64().unwrap_or(0) + 1))
    })
    .unwrap();

    let counters = combine_reducers([("a", a), ("b", b), ("c", c), ("d", d)]).unwrap();

    let expected = [
        (Action::Init, (0, 5, 5, 6)),
        (Action::Increment, (1, 15, 21, 22)),
        (Action::Increment, (2, 25, 48, 49)),
        (Action::Decrement, (1, 15, 64, 65)),
        (Action::Decrement, (0, 5, 69, 70)),
    ];

    let mut state: Option<State> = None;
    for (action, (a, b, c, d)) in expected {
        let next = counters.reduce(state.as_ref(), &action).unwrap();
        assert_eq!(plain(&next, "a"), Some(a), "a after {action:?}");
        assert_eq!(plain(&next, "b"), Some(b), "b after {action:?}");
        assert_eq!(inner(&next, "c"), Some(c), "c after {action:?}");
        assert_eq!(inner(&next, "d"), Some(d), "d after {action:?}");
        state = Some(next);
    }
}

#[test]
fn reducers_can_be_time_travelled() {
    let first = counter(0, 1);
    let second = create_reducer_with([("first", first.clone())], |_, _: &Action, deps: &Slices| {
        Ok(State::from(deps["first"].as_i64().unwrap_or(0) + 1))
    })
    .unwrap();
    let root = combine_reducers([("first", first), ("second", second)]).unwrap();

    let initialized = root.reduce(None, &Action::Init).unwrap();
    let incremented = root.reduce(Some(&initialized), &Action::Increment).unwrap();
    let decremented = root.reduce(Some(&initialized), &Action::Decrement).unwrap();
    let incremented_twice = root.reduce(Some(&incremented), &Action::Increment).unwrap();
    let decremented_twice = root.reduce(Some(&decremented), &Action::Decrement).unwrap();

    assert_eq!(plain(&initialized, "first"), Some(0));
    assert_eq!(inner(&initialized, "second"), Some(1));

    assert_eq!(plain(&incremented, "first"), Some(1));
    assert_eq!(inner(&incremented, "second"), Some(2));

    assert_eq!(plain(&decremented, "first"), Some(-1));
    assert_eq!(inner(&decremented, "second"), Some(0));

    assert_eq!(plain(&incremented_twice, "first"), Some(2));
    assert_eq!(inner(&incremented_twice, "second"), Some(3));

    assert_eq!(plain(&decremented_twice, "first"), Some(-2));
    assert_eq!(inner(&decremented_twice, "second"), Some(-1));
}

#[test]
fn reducers_are_aggressively_memoized() {
    let first_calls = Arc::new(AtomicUsize::new(0));
    let second_calls = Arc::new(AtomicUsize::new(0));
    let third_calls = Arc::new(AtomicUsize::new(0));

    let first = {
        let calls = Arc::clone(&first_calls);
        create_reducer(move |state: Option<&State>, action: &Action| {
            calls.fetch_add(1, Ordering::SeqCst);
            let counter = state
                .and_then(|state| state.pointer("/counter"))
                .and_then(|counter| counter.as_i64())
                .unwrap_or(0);
            Ok(match (action, state) {
                (Action::Increment, _) => State::from(json!({ "counter": counter + 1 })),
                (Action::Decrement, _) => State::from(json!({ "counter": counter - 1 })),
                (Action::Init, Some(state)) => state.clone(),
                (Action::Init, None) => State::from(json!({ "counter": 0 })),
            })
        })
    };

    let second = {
        let calls = Arc::clone(&second_calls);
        create_reducer_with([("first", first.clone())], move |_, _: &Action, deps: &Slices| {
            calls.fetch_add(1, Ordering::SeqCst);
            let counter = deps["first"].pointer("/counter").and_then(|c| c.as_i64());
            Ok(State::from(counter.unwrap_or(0) + 1))
        })
        .unwrap()
    };

    let third = {
        let calls = Arc::clone(&third_calls);
        create_reducer_with(
            [("first", first.clone()), ("second", second.clone())],
            move |_, _: &Action, deps: &Slices| {
                calls.fetch_add(1, Ordering::SeqCst);
                let counter = deps["first"].pointer("/counter").and_then(|c| c.as_i64());
                let second = deps["second"].as_i64();
                Ok(State::from(json!({
                    "thirdResult": counter.unwrap_or(0) + second.unwrap_or(0)
                })))
            },
        )
        .unwrap()
    };

    let root = combine_reducers([
        ("firstReducerState1", first.clone()),
        ("firstReducerState2", first.clone()),
        ("firstReducerState3", first),
        ("secondReducerState1", second.clone()),
        ("secondReducerState2", second.clone()),
        ("secondReducerState3", second),
        ("thirdReducerState1", third.clone()),
        ("thirdReducerState2", third.clone()),
        ("thirdReducerState3", third),
    ])
    .unwrap();

    let mut state = None;
    for action in [Action::Init, Action::Increment, Action::Increment] {
        state = Some(root.reduce(state.as_ref(), &action).unwrap());
    }
    let state = state.unwrap();

    // Each user reducer ran once per distinct action.
    assert_eq!(first_calls.load(Ordering::SeqCst), 3);
    assert_eq!(second_calls.load(Ordering::SeqCst), 3);
    assert_eq!(third_calls.load(Ordering::SeqCst), 3);

    // Sibling bindings share one result.
    for prefix in ["firstReducerState", "secondReducerState", "thirdReducerState"] {
        let one = state.get(&format!("{prefix}1")).unwrap();
        let two = state.get(&format!("{prefix}2")).unwrap();
        let three = state.get(&format!("{prefix}3")).unwrap();
        assert!(State::ptr_eq(one, two), "{prefix} 1 and 2 differ");
        assert!(State::ptr_eq(one, three), "{prefix} 1 and 3 differ");
    }

    let first = state.get("firstReducerState1").unwrap();
    assert_eq!(first.pointer("/counter"), Some(&json!(2)));
    assert_eq!(inner(&state, "secondReducerState1"), Some(3));
    let third = state.get("thirdReducerState1").unwrap().unwrapped();
    assert_eq!(third.pointer("/thirdResult"), Some(&json!(5)));
}

#[test]
fn reducers_support_null_values() {
    let reducer = create_reducer(|state: Option<&State>, _: &Action| {
        Ok(state.cloned().unwrap_or_else(State::null))
    });
    let dependent = create_reducer_with([("dep", reducer)], |_, _: &Action, deps: &Slices| {
        Ok(deps["dep"].clone())
    })
    .unwrap();

    let state = dependent.reduce(None, &Action::Init).unwrap();
    assert!(state.is_wrapped());
    assert!(state.unwrapped().is_null());
    assert_eq!(state.to_json(), json!({ "value": null, "dependencies": { "dep": null } }));
}

#[test]
fn unchanged_leaves_keep_their_identity() {
    let leaves = [counter(1, 1), counter(2, 1), counter(3, 1)];
    let root = combine_reducers([
        ("one", leaves[0].clone()),
        ("two", leaves[1].clone()),
        ("three", leaves[2].clone()),
    ])
    .unwrap();

    let initial = root.reduce(None, &Action::Init).unwrap();
    let mut previous = initial.clone();
    for _ in 0..3 {
        let next = root.reduce(Some(&previous), &Action::Init).unwrap();
        for key in ["one", "two", "three"] {
            assert!(State::ptr_eq(
                next.get(key).unwrap(),
                initial.get(key).unwrap()
            ));
        }
        previous = next;
    }
}

#[test]
fn dependency_chain_sees_same_action_updates() {
    let base = counter(0, 1);
    let doubled = create_reducer_with([("base", base.clone())], |_, _: &Action, deps: &Slices| {
        Ok(State::from(deps["base"].as_i64().unwrap_or(0) * 2))
    })
    .unwrap();
    let quadrupled =
        create_reducer_with([("doubled", doubled.clone())], |_, _: &Action, deps: &Slices| {
            Ok(State::from(deps["doubled"].as_i64().unwrap_or(0) * 2))
        })
        .unwrap();

    let root = combine_reducers([("quadrupled", quadrupled)]).unwrap();

    let state = root.reduce(None, &Action::Init).unwrap();
    assert_eq!(inner(&state, "quadrupled"), Some(0));

    let state = root.reduce(Some(&state), &Action::Increment).unwrap();
    assert_eq!(inner(&state, "quadrupled"), Some(4));

    let state = root.reduce(Some(&state), &Action::Increment).unwrap();
    assert_eq!(inner(&state, "quadrupled"), Some(8));
}

#[test]
fn reducers_are_shareable_across_threads() {
    let counter = counter(0, 1);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let counter = counter.clone();
            std::thread::spawn(move || {
                let state = counter.reduce(None, &Action::Increment).unwrap();
                state.as_i64()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(1));
    }
}

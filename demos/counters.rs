//! Demonstration of reducers that depend on each other
//!
//! Run with `RUST_LOG=redep=trace` to watch cache hits and misses.

use redep::{combine_reducers, create_reducer, create_reducer_with, Reducer, Slices, State};
use tracing_subscriber::EnvFilter;

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
            Action::Init => state.cloned().unwrap_or_else(|| State::from(count)),
        })
    })
}

fn main() -> redep::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Counters Example ===\n");

    println!("1. Building reducers");
    let a = counter(0, 1);
    let b = counter(5, 10);
    println!("   a: starts at 0, steps by 1");
    println!("   b: starts at 5, steps by 10");

    let running_total = create_reducer_with(
        [("a", a.clone()), ("b", b.clone())],
        |state: Option<&State>, _: &Action, deps: &Slices| {
            let total = state.and_then(State::as_i64).unwrap_or(0);
            let sum = deps["a"].as_i64().unwrap_or(0) + deps["b"].as_i64().unwrap_or(0);
            Ok(State::from(total + sum))
        },
    )?;
    println!("   c: adds a + b (after the action) to its own total");

    let next = create_reducer_with([("c", running_total.clone())], |_, _: &Action, deps: &Slices| {
        Ok(State::from(deps["c"].as_i64().unwrap_or(0) + 1))
    })?;
    println!("   d: c + 1");

    let root = combine_reducers([("a", a), ("b", b), ("c", running_total), ("d", next)])?;

    println!("\n2. Dispatching actions");
    let mut state = None;
    for action in [
        Action::Init,
        Action::Increment,
        Action::Increment,
        Action::Decrement,
        Action::Decrement,
    ] {
        let next = root.reduce(state.as_ref(), &action)?;
        println!(
            "   {:<10} a={:?} b={:?} c={:?} d={:?}",
            format!("{action:?}"),
            next.get("a").and_then(State::as_i64),
            next.get("b").and_then(State::as_i64),
            next.get("c").map(State::unwrapped).and_then(State::as_i64),
            next.get("d").map(State::unwrapped).and_then(State::as_i64),
        );
        state = Some(next);
    }

    if let Some(state) = state {
        println!("\n3. Final state tree:");
        println!("{}", serde_json::to_string_pretty(&state)?);
    }

    println!("\n✓ Example complete!");
    Ok(())
}

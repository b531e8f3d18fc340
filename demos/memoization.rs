//! Demonstration of reducer memoization

use redep::{combine_reducers, create_reducer, memoize, State};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, PartialEq)]
enum Action {
    Touch,
    Rename(String),
}

fn main() -> redep::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Memoization Example ===\n");

    // Plain functions can be memoized too
    println!("1. Memoizing a plain function");
    let length = memoize(|(name,): &(State,)| {
        println!("   [Computing] length of {:?}", name.as_str());
        name.as_str().map(str::len).unwrap_or(0)
    });
    let name = State::from("quarterly");
    println!("   Length: {}", length.call((name.clone(),)));
    println!("   Length: {} (cached)", length.call((name.clone(),)));

    println!("\n2. One reducer bound under three names");
    let compute_counter = Arc::new(AtomicUsize::new(0));
    let title = create_reducer({
        let counter = Arc::clone(&compute_counter);
        move |state: Option<&State>, action: &Action| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(match action {
                Action::Rename(title) => State::from(title.as_str()),
                Action::Touch => state.cloned().unwrap_or_else(|| State::from("untitled")),
            })
        }
    });

    let root = combine_reducers([
        ("header", title.clone()),
        ("tab", title.clone()),
        ("window", title),
    ])?;

    let mut state = root.reduce(None, &Action::Touch)?;
    println!(
        "   After Touch: {} computation(s)",
        compute_counter.load(Ordering::SeqCst)
    );

    state = root.reduce(Some(&state), &Action::Rename("Report".to_string()))?;
    println!(
        "   After Rename: {} computation(s)",
        compute_counter.load(Ordering::SeqCst)
    );

    println!("\n3. Shared results");
    let header = state.get("header");
    let window = state.get("window");
    let shared = matches!((header, window), (Some(h), Some(w)) if State::ptr_eq(h, w));
    println!("   header and window share one state: {shared}");
    println!("   header: {:?}", header.and_then(State::as_str));

    println!("\n4. Replaying the same action on the same state");
    let replay = root.reduce(Some(&state), &Action::Touch)?;
    let again = root.reduce(Some(&state), &Action::Touch)?;
    println!(
        "   Slices identical: {}",
        State::ptr_eq(
            replay.get("tab").unwrap_or(&replay),
            again.get("tab").unwrap_or(&again)
        )
    );
    println!(
        "   Total computations: {}",
        compute_counter.load(Ordering::SeqCst)
    );

    println!("\n✓ Example complete!");
    Ok(())
}

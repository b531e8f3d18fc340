use super::equality::{Equality, Identity};
use std::sync::{Mutex, PoisonError};
use tracing::trace;

/// A single-slot cache holding the last arguments and the result computed from them.
///
/// The slot is overwritten on every miss. The comparison and the write each
/// take the lock, but the computation itself runs without it, so two threads
/// racing on the same slot may both compute and the last writer wins.
pub struct MemoSlot<Args, R, E = Identity> {
    equals: E,
    last: Mutex<Option<(Args, R)>>,
}

impl<Args, R: Clone, E: Equality<Args>> MemoSlot<Args, R, E> {
    /// Create an empty slot comparing arguments with `equals`.
    pub fn new(equals: E) -> Self {
        Self {
            equals,
            last: Mutex::new(None),
        }
    }

    /// Return the cached result if `args` match the last recorded arguments.
    pub fn lookup(&self, args: &Args) -> Option<R> {
        let last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        match last.as_ref() {
            Some((previous, result)) if self.equals.equals(args, previous) => Some(result.clone()),
            _ => None,
        }
    }

    fn store(&self, args: Args, result: R) {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some((args, result));
    }

    /// Return the cached result, or compute and record a new one.
    pub fn get_or_compute(&self, args: Args, compute: impl FnOnce(&Args) -> R) -> R {
        if let Some(hit) = self.lookup(&args) {
            trace!("memo hit");
            return hit;
        }
        trace!("memo miss");
        let result = compute(&args);
        self.store(args, result.clone());
        result
    }

    /// Like [`get_or_compute`](Self::get_or_compute), for fallible computations.
    ///
    /// An `Err` is returned to the caller and leaves the slot untouched.
    pub fn get_or_try_compute<Err>(
        &self,
        args: Args,
        compute: impl FnOnce(&Args) -> Result<R, Err>,
    ) -> Result<R, Err> {
        if let Some(hit) = self.lookup(&args) {
            trace!("memo hit");
            return Ok(hit);
        }
        trace!("memo miss");
        let result = compute(&args)?;
        self.store(args, result.clone());
        Ok(result)
    }

    /// Forget the cached entry.
    pub fn clear(&self) {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_empty(&self) -> bool {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl<Args, R: Clone, E: Equality<Args> + Default> Default for MemoSlot<Args, R, E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}

/// A function wrapped with a [`MemoSlot`].
///
/// Repeating a call with arguments equal to the previous call's returns the
/// previous result without invoking the function.
///
/// # Examples
///
/// ```
/// use redep::{memoize_with, ByValue};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let calls = AtomicUsize::new(0);
/// let add = memoize_with(
///     |(a, b): &(i32, i32)| {
///         calls.fetch_add(1, Ordering::SeqCst);
///         a + b
///     },
///     ByValue,
/// );
///
/// assert_eq!(add.call((1, 2)), 3);
/// assert_eq!(add.call((1, 2)), 3);
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
pub struct Memoized<F, Args, R, E = Identity> {
    func: F,
    slot: MemoSlot<Args, R, E>,
}

impl<F, Args, R, E> Memoized<F, Args, R, E>
where
    F: Fn(&Args) -> R,
    R: Clone,
    E: Equality<Args>,
{
    /// Call the function, or return the cached result for repeated arguments.
    pub fn call(&self, args: Args) -> R {
        self.slot.get_or_compute(args, &self.func)
    }

    /// Forget the cached call.
    pub fn clear(&self) {
        self.slot.clear();
    }
}

/// Memoize `func`, comparing each argument by identity.
pub fn memoize<F, Args, R>(func: F) -> Memoized<F, Args, R>
where
    F: Fn(&Args) -> R,
    R: Clone,
    Identity: Equality<Args>,
{
    memoize_with(func, Identity)
}

/// Memoize `func` with a custom equality predicate.
pub fn memoize_with<F, Args, R, E>(func: F, equals: E) -> Memoized<F, Args, R, E>
where
    F: Fn(&Args) -> R,
    R: Clone,
    E: Equality<Args>,
{
    Memoized {
        func,
        slot: MemoSlot::new(equals),
    }
}

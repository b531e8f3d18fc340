use crate::state::State;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Equality predicate used to decide whether memoized arguments changed.
pub trait Equality<T: ?Sized> {
    fn equals(&self, a: &T, b: &T) -> bool;
}

/// Pointer identity, compared position by position for tuples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

/// Value equality through `PartialEq`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByValue;

/// Separate predicates for the two positions of a pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pairwise<L, R>(pub L, pub R);

/// How a reducer compares the state it receives against the previous one.
///
/// # Examples
///
/// ```
/// use redep::StateEquality;
///
/// let policy: StateEquality = serde_json::from_str("\"structural\"").unwrap();
/// assert_eq!(policy, StateEquality::Structural);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateEquality {
    /// Same handle (`State::ptr_eq`).
    #[default]
    Identity,
    /// Same contents, compared deeply.
    Structural,
}

impl<T: PartialEq + ?Sized> Equality<T> for ByValue {
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

impl Equality<State> for Identity {
    fn equals(&self, a: &State, b: &State) -> bool {
        State::ptr_eq(a, b)
    }
}

impl<T: ?Sized> Equality<Arc<T>> for Identity {
    fn equals(&self, a: &Arc<T>, b: &Arc<T>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

impl<T> Equality<Option<T>> for Identity
where
    Identity: Equality<T>,
{
    fn equals(&self, a: &Option<T>, b: &Option<T>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => self.equals(a, b),
            _ => false,
        }
    }
}

macro_rules! identity_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name),+> Equality<($($name,)+)> for Identity
        where
            $(Identity: Equality<$name>),+
        {
            fn equals(&self, a: &($($name,)+), b: &($($name,)+)) -> bool {
                $(self.equals(&a.$idx, &b.$idx))&&+
            }
        }
    };
}

identity_tuple!(A.0);
identity_tuple!(A.0, B.1);
identity_tuple!(A.0, B.1, C.2);
identity_tuple!(A.0, B.1, C.2, D.3);

impl<A, B, L, R> Equality<(A, B)> for Pairwise<L, R>
where
    L: Equality<A>,
    R: Equality<B>,
{
    fn equals(&self, a: &(A, B), b: &(A, B)) -> bool {
        self.0.equals(&a.0, &b.0) && self.1.equals(&a.1, &b.1)
    }
}

impl<T: ?Sized, F> Equality<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

impl Equality<Option<State>> for StateEquality {
    fn equals(&self, a: &Option<State>, b: &Option<State>) -> bool {
        match self {
            StateEquality::Identity => Identity.equals(a, b),
            StateEquality::Structural => a == b,
        }
    }
}

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Named sub-states, as produced by a combined reducer.
pub type Slices = BTreeMap<String, State>;

/// An immutable, shared state value.
///
/// Cloning a `State` is cheap and keeps identity: two clones are
/// [`State::ptr_eq`]. Reducers return the same `State` they were given to
/// signal "nothing changed", and memoization relies on that identity.
///
/// # Examples
///
/// ```
/// use redep::State;
///
/// let count = State::from(5);
/// let same = count.clone();
///
/// assert!(State::ptr_eq(&count, &same));
/// assert_eq!(count.as_i64(), Some(5));
/// ```
#[derive(Clone)]
pub struct State(Arc<StateNode>);

/// The shape of a [`State`].
#[derive(Debug, PartialEq)]
pub enum StateNode {
    /// A plain application value.
    Value(Value),
    /// A value paired with the snapshot of its dependencies' states.
    Wrapped(Envelope),
    /// Named slices managed by separate reducers.
    Combined(Slices),
}

/// A user value stored together with the dependency snapshot it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub(crate) value: State,
    pub(crate) dependencies: State,
}

impl Envelope {
    /// The value returned by the user reducer.
    pub fn value(&self) -> &State {
        &self.value
    }

    /// The combined states of the declared dependencies.
    pub fn dependencies(&self) -> &State {
        &self.dependencies
    }
}

impl State {
    /// Create a state holding a plain value.
    pub fn new(value: impl Into<Value>) -> Self {
        Self::from_node(StateNode::Value(value.into()))
    }

    /// The `null` state.
    pub fn null() -> Self {
        Self::new(Value::Null)
    }

    /// Create a combined state from named slices.
    pub fn combined(slices: Slices) -> Self {
        Self::from_node(StateNode::Combined(slices))
    }

    /// Serialize a typed value into a plain state.
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::new(serde_json::to_value(value)?))
    }

    pub(crate) fn from_node(node: StateNode) -> Self {
        State(Arc::new(node))
    }

    /// Returns `true` if both handles point at the same state.
    pub fn ptr_eq(a: &State, b: &State) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    pub fn node(&self) -> &StateNode {
        &self.0
    }

    /// The plain value, if this is not a wrapped or combined state.
    pub fn as_value(&self) -> Option<&Value> {
        match self.node() {
            StateNode::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_value().and_then(Value::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_value().and_then(Value::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_value().and_then(Value::as_bool)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.as_value(), Some(Value::Null))
    }

    /// Look up a nested member of a plain value by JSON pointer (`"/counter"`).
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.as_value().and_then(|value| value.pointer(pointer))
    }

    /// Get a named slice of a combined state.
    pub fn get(&self, key: &str) -> Option<&State> {
        self.slices().and_then(|slices| slices.get(key))
    }

    pub fn slices(&self) -> Option<&Slices> {
        match self.node() {
            StateNode::Combined(slices) => Some(slices),
            _ => None,
        }
    }

    pub fn envelope(&self) -> Option<&Envelope> {
        match self.node() {
            StateNode::Wrapped(envelope) => Some(envelope),
            _ => None,
        }
    }

    pub fn is_wrapped(&self) -> bool {
        self.envelope().is_some()
    }

    /// The user-visible value: the inner value of an envelope, or this state.
    pub fn unwrapped(&self) -> &State {
        super::envelope::unwrap(self)
    }

    /// Deserialize the user-visible value into a typed value.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.unwrapped().to_json())?)
    }

    /// Render the whole state tree as JSON.
    ///
    /// Envelopes become `{"value": .., "dependencies": ..}` objects.
    pub fn to_json(&self) -> Value {
        match self.node() {
            StateNode::Value(value) => value.clone(),
            StateNode::Wrapped(envelope) => {
                let mut object = serde_json::Map::new();
                object.insert("value".to_string(), envelope.value.to_json());
                object.insert("dependencies".to_string(), envelope.dependencies.to_json());
                Value::Object(object)
            }
            StateNode::Combined(slices) => Value::Object(
                slices
                    .iter()
                    .map(|(key, slice)| (key.clone(), slice.to_json()))
                    .collect(),
            ),
        }
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        State::ptr_eq(self, other) || self.0 == other.0
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.node(), f)
    }
}

impl Serialize for State {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.node() {
            StateNode::Value(value) => value.serialize(serializer),
            StateNode::Wrapped(envelope) => {
                let mut s = serializer.serialize_struct("Envelope", 2)?;
                s.serialize_field("value", &envelope.value)?;
                s.serialize_field("dependencies", &envelope.dependencies)?;
                s.end()
            }
            StateNode::Combined(slices) => {
                let mut map = serializer.serialize_map(Some(slices.len()))?;
                for (key, slice) in slices {
                    map.serialize_entry(key, slice)?;
                }
                map.end()
            }
        }
    }
}

macro_rules! state_from {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for State {
                fn from(value: $ty) -> Self {
                    State::new(value)
                }
            }
        )+
    };
}

state_from!(Value, bool, i32, i64, u32, u64, f64, String, &str);

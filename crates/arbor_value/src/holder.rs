//! Shared handle to a whole value.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::{Heap, Value};

/// Reference-counted, copy-on-write handle to a [`Value`].
///
/// Cloning a holder shares the value. Writes go through
/// [`ValueHolder::make_mut`] or [`ValueHolder::replace`], and neither is
/// visible through other holders: `make_mut` clones an aliased value first,
/// `replace` swaps this holder's pointer only.
///
/// The holder does not know its type. Checked assignment is `Type::assign`
/// in `arbor_types`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueHolder(Heap<Value>);

impl ValueHolder {
    pub fn new(value: Value) -> Self {
        ValueHolder(Heap::new(value))
    }

    pub fn get(&self) -> &Value {
        &self.0
    }

    /// Mutable access; clones the value first if another holder shares it.
    pub fn make_mut(&mut self) -> &mut Value {
        Heap::make_mut(&mut self.0)
    }

    /// Point this holder at a new value, returning the old one.
    pub fn replace(&mut self, value: Value) -> Value {
        let old = std::mem::replace(&mut self.0, Heap::new(value));
        Heap::unwrap_or_clone(old)
    }

    pub fn into_value(self) -> Value {
        Heap::unwrap_or_clone(self.0)
    }

    /// Whether both holders point at the same value instance.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Heap::ptr_eq(&a.0, &b.0)
    }

    pub fn ref_count(&self) -> usize {
        Heap::ref_count(&self.0)
    }

    pub fn is_unique(&self) -> bool {
        self.ref_count() == 1
    }
}

impl Deref for ValueHolder {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for ValueHolder {
    fn from(value: Value) -> Self {
        ValueHolder::new(value)
    }
}

impl fmt::Debug for ValueHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueHolder({:?})", self.get())
    }
}

impl fmt::Display for ValueHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

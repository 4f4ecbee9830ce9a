//! The value tree.
//!
//! Compound payloads are only reachable through [`Heap`], whose constructor
//! is private to this crate: build them with the factory methods on
//! [`Value`] and mutate them through the `*_mut` accessors, which clone an
//! aliased payload before handing out a mutable reference.

mod composite;
mod map;

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Heap, Rational, ShortId, TypeRef};

pub use composite::{GenericValue, RecordValue, SumValue, VariantValue};
pub use map::{Fallback, MapEntry, MapError, MapSource, MapTarget, MapValue};

/// An immutable, self-describing unit of data.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    // Scalars (inline)
    /// Blank / absent marker.
    Void,
    Bool(bool),
    Int(i64),
    Rational(Rational),
    /// Identifier literal: enumeration member, field or tag name.
    Ident(ShortId),

    // Heap payloads
    Text(Heap<String>),
    Array(Heap<Vec<Value>>),
    Tuple(Heap<Vec<Value>>),
    Record(Heap<RecordValue>),
    Variant(Heap<VariantValue>),
    Sum(Heap<SumValue>),
    Generic(Heap<GenericValue>),
    Map(Heap<MapValue>),
}

// Factory methods (the only way to build heap payloads)

impl Value {
    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(Heap::new(s.into()))
    }

    #[inline]
    pub fn ident(text: &str) -> Self {
        Value::Ident(ShortId::new(text))
    }

    /// Build an exact rational, `None` on a zero denominator or overflow.
    pub fn rational(num: i64, den: i64) -> Option<Self> {
        Rational::new(num, den).ok().map(Value::Rational)
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(items))
    }

    #[inline]
    pub fn record(record: RecordValue) -> Self {
        Value::Record(Heap::new(record))
    }

    #[inline]
    pub fn variant(variant: VariantValue) -> Self {
        Value::Variant(Heap::new(variant))
    }

    #[inline]
    pub fn sum(index: u32, value: Value) -> Self {
        Value::Sum(Heap::new(SumValue { index, value }))
    }

    #[inline]
    pub fn generic(bindings: Vec<TypeRef>, inner: Value) -> Self {
        Value::Generic(Heap::new(GenericValue { bindings, inner }))
    }

    #[inline]
    pub fn map(map: MapValue) -> Self {
        Value::Map(Heap::new(map))
    }
}

// Accessors

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_rational(&self) -> Option<Rational> {
        match self {
            Value::Rational(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_ident(&self) -> Option<ShortId> {
        match self {
            Value::Ident(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_variant(&self) -> Option<&VariantValue> {
        match self {
            Value::Variant(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_sum(&self) -> Option<&SumValue> {
        match self {
            Value::Sum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_generic(&self) -> Option<&GenericValue> {
        match self {
            Value::Generic(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Numeric view used by range checks: integers widen to rationals.
    pub fn as_number(&self) -> Option<Rational> {
        match self {
            Value::Int(n) => Some(Rational::from_int(*n)),
            Value::Rational(r) => Some(*r),
            _ => None,
        }
    }

    /// Compare two numeric values, `None` if either is not a number.
    pub fn numeric_cmp(&self, other: &Value) -> Option<Ordering> {
        Some(self.as_number()?.cmp(&other.as_number()?))
    }

    /// Whether this is the blank marker.
    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }
}

// Copy-on-write accessors

impl Value {
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(Heap::make_mut(items)),
            _ => None,
        }
    }

    pub fn as_tuple_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Tuple(items) => Some(Heap::make_mut(items)),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut RecordValue> {
        match self {
            Value::Record(r) => Some(Heap::make_mut(r)),
            _ => None,
        }
    }

    pub fn as_variant_mut(&mut self) -> Option<&mut VariantValue> {
        match self {
            Value::Variant(v) => Some(Heap::make_mut(v)),
            _ => None,
        }
    }

    pub fn as_sum_mut(&mut self) -> Option<&mut SumValue> {
        match self {
            Value::Sum(s) => Some(Heap::make_mut(s)),
            _ => None,
        }
    }

    pub fn as_generic_mut(&mut self) -> Option<&mut GenericValue> {
        match self {
            Value::Generic(g) => Some(Heap::make_mut(g)),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut MapValue> {
        match self {
            Value::Map(m) => Some(Heap::make_mut(m)),
            _ => None,
        }
    }
}

impl Value {
    /// Kind name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Void => "void",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Rational(_) => "rational",
            Value::Ident(_) => "ident",
            Value::Text(_) => "text",
            Value::Array(_) => "array",
            Value::Tuple(_) => "tuple",
            Value::Record(_) => "record",
            Value::Variant(_) => "variant",
            Value::Sum(_) => "sum",
            Value::Generic(_) => "generic",
            Value::Map(_) => "map",
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => f.write_str("<blank>"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Rational(r) => write!(f, "{r}"),
            Value::Ident(id) => write!(f, "{id}"),
            Value::Text(s) => write!(f, "{:?}", s.as_str()),
            Value::Array(items) => {
                f.write_str("[")?;
                write_list(f, items)?;
                f.write_str("]")
            }
            Value::Tuple(items) => {
                f.write_str("(")?;
                write_list(f, items)?;
                f.write_str(")")
            }
            Value::Record(r) => write!(f, "{r}"),
            Value::Variant(v) => write!(f, "{v}"),
            Value::Sum(s) => write!(f, "#{}({})", s.index, s.value),
            Value::Generic(g) => write!(f, "{g}"),
            Value::Map(m) => write!(f, "{m}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<Rational> for Value {
    fn from(r: Rational) -> Self {
        Value::Rational(r)
    }
}

impl From<ShortId> for Value {
    fn from(id: ShortId) -> Self {
        Value::Ident(id)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

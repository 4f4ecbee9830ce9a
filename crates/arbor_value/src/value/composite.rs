//! Payloads of record, variant, sum and generic values.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Value;
use crate::{ShortId, TypeRef};

/// Field slots of a record, in declaration order.
///
/// An optional field that is switched off holds `None`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct RecordValue {
    slots: Vec<(ShortId, Option<Value>)>,
}

impl RecordValue {
    pub fn new(slots: Vec<(ShortId, Option<Value>)>) -> Self {
        RecordValue { slots }
    }

    /// Record with every field active.
    pub fn from_fields(fields: impl IntoIterator<Item = (ShortId, Value)>) -> Self {
        RecordValue {
            slots: fields.into_iter().map(|(id, v)| (id, Some(v))).collect(),
        }
    }

    pub fn slots(&self) -> &[(ShortId, Option<Value>)] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut Vec<(ShortId, Option<Value>)> {
        &mut self.slots
    }

    /// Position of a field among all slots.
    pub fn position(&self, field: ShortId) -> Option<usize> {
        self.slots.iter().position(|(id, _)| *id == field)
    }

    /// Value of an active field.
    pub fn get(&self, field: ShortId) -> Option<&Value> {
        self.slots
            .iter()
            .find(|(id, _)| *id == field)
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn is_active(&self, field: ShortId) -> bool {
        self.get(field).is_some()
    }

    /// Active fields in declaration order.
    pub fn active(&self) -> impl Iterator<Item = (ShortId, &Value)> + '_ {
        self.slots
            .iter()
            .filter_map(|(id, v)| v.as_ref().map(|v| (*id, v)))
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (id, value)) in self.active().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}: {value}")?;
        }
        f.write_str("}")
    }
}

/// The selected tag of a variant record and the fields it activates.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct VariantValue {
    pub tag: ShortId,
    pub fields: Vec<(ShortId, Value)>,
}

impl VariantValue {
    pub fn new(tag: ShortId, fields: Vec<(ShortId, Value)>) -> Self {
        VariantValue { tag, fields }
    }

    pub fn get(&self, field: ShortId) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(id, _)| *id == field)
            .map(|(_, v)| v)
    }
}

impl fmt::Display for VariantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.tag)?;
        for (i, (id, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}: {value}")?;
        }
        f.write_str("}")
    }
}

/// Active summand of a sum value.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct SumValue {
    pub index: u32,
    pub value: Value,
}

/// A generic value: the types its variables are bound to, and the value of
/// the instantiated inner type.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct GenericValue {
    pub bindings: Vec<TypeRef>,
    pub inner: Value,
}

impl fmt::Display for GenericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<")?;
        for (i, binding) in self.bindings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{binding}")?;
        }
        write!(f, ">({})", self.inner)
    }
}

//! Tuples: fixed-length, heterogeneous, positional.

use arbor_value::{PathStep, Value};

use crate::ty::Child;
use crate::{SharedType, SubtypeOrder, TypeError, TypeSystem};

#[derive(Clone, Debug)]
pub struct TupleType {
    slots: Vec<SharedType>,
}

impl TupleType {
    pub fn new(slots: Vec<SharedType>) -> Self {
        TupleType { slots }
    }

    pub fn slots(&self) -> &[SharedType] {
        &self.slots
    }

    pub(crate) fn create_value(&self, ts: &TypeSystem) -> Result<Value, TypeError> {
        let items = self
            .slots
            .iter()
            .map(|ty| ty.create_value(ts))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::tuple(items))
    }

    pub(crate) fn validate(&self, ts: &TypeSystem, name: &str, value: &Value) -> Result<(), TypeError> {
        let Some(items) = value.as_tuple() else {
            return Err(TypeError::invalid(
                name,
                format!("expected a tuple, found {}", value.type_name()),
            ));
        };
        if items.len() != self.slots.len() {
            return Err(TypeError::invalid(
                name,
                format!("expected {} slots, found {}", self.slots.len(), items.len()),
            ));
        }
        self.slots
            .iter()
            .zip(items)
            .try_for_each(|(ty, item)| ty.validate(ts, item))
    }

    pub(crate) fn child(&self, value: &Value, index: usize) -> Option<Child> {
        let item = value.as_tuple()?.get(index)?;
        Some(Child {
            value: item.clone(),
            step: PathStep::Index(u32::try_from(index).ok()?),
            type_ref: self.slots.get(index)?.type_ref().clone(),
        })
    }

    pub(crate) fn format_value(&self, ts: &TypeSystem, value: &Value) -> Option<String> {
        let items = value.as_tuple()?;
        let parts: Vec<String> = self
            .slots
            .iter()
            .zip(items)
            .map(|(ty, item)| ty.format_value(ts, item))
            .collect();
        Some(format!("({})", parts.join(", ")))
    }

    pub fn compare(&self, ts: &TypeSystem, other: &TupleType) -> SubtypeOrder {
        if self.slots.len() != other.slots.len() {
            return SubtypeOrder::IsUnrelated;
        }
        self.slots
            .iter()
            .zip(&other.slots)
            .fold(SubtypeOrder::IsEquivalent, |acc, (a, b)| {
                acc.meet(ts.compare_types(a, b))
            })
    }
}

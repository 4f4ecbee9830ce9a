//! Sum types: one active summand at a time.

use arbor_value::{PathStep, SumValue, Value};

use crate::ty::Child;
use crate::{SharedType, SubtypeOrder, TypeError, TypeSystem};

#[derive(Clone, Debug)]
pub struct SumType {
    summands: Vec<SharedType>,
    default_index: u32,
}

impl SumType {
    /// Requires a non-empty summand list and an in-range default.
    pub fn new(summands: Vec<SharedType>, default_index: u32) -> Option<Self> {
        ((default_index as usize) < summands.len()).then_some(SumType {
            summands,
            default_index,
        })
    }

    pub fn summands(&self) -> &[SharedType] {
        &self.summands
    }

    pub fn default_index(&self) -> u32 {
        self.default_index
    }

    fn summand(&self, index: u32) -> Option<&SharedType> {
        self.summands.get(index as usize)
    }

    pub(crate) fn create_value(&self, ts: &TypeSystem) -> Result<Value, TypeError> {
        let ty = &self.summands[self.default_index as usize];
        Ok(Value::sum(self.default_index, ty.create_value(ts)?))
    }

    pub(crate) fn validate(&self, ts: &TypeSystem, name: &str, value: &Value) -> Result<(), TypeError> {
        let Some(SumValue { index, value }) = value.as_sum() else {
            return Err(TypeError::invalid(
                name,
                format!("expected a sum, found {}", value.type_name()),
            ));
        };
        match self.summand(*index) {
            Some(ty) => ty.validate(ts, value),
            None => Err(TypeError::invalid(name, format!("no summand {index}"))),
        }
    }

    pub(crate) fn child(&self, value: &Value, index: usize) -> Option<Child> {
        if index != 0 {
            return None;
        }
        let sum = value.as_sum()?;
        Some(Child {
            value: sum.value.clone(),
            step: PathStep::Index(sum.index),
            type_ref: self.summand(sum.index)?.type_ref().clone(),
        })
    }

    pub(crate) fn child_index(&self, value: &Value, step: PathStep) -> Option<usize> {
        (step.as_index()? == value.as_sum()?.index).then_some(0)
    }

    /// Switch to summand `index`, discarding the old summand's value.
    /// Reselecting the active summand keeps its value.
    pub fn select_summand(
        &self,
        ts: &TypeSystem,
        name: &str,
        value: &Value,
        index: u32,
    ) -> Result<Value, TypeError> {
        let Some(ty) = self.summand(index) else {
            return Err(TypeError::invalid(
                name,
                format!("no summand {index} (have {})", self.summands.len()),
            ));
        };
        let Some(current) = value.as_sum() else {
            return Err(TypeError::invalid(name, "expected a sum"));
        };
        if current.index == index {
            return Ok(value.clone());
        }
        Ok(Value::sum(index, ty.create_value(ts)?))
    }

    pub(crate) fn format_value(&self, ts: &TypeSystem, value: &Value) -> Option<String> {
        let sum = value.as_sum()?;
        let ty = self.summand(sum.index)?;
        Some(format!("{}: {}", ty.name(), ty.format_value(ts, &sum.value)))
    }

    /// Every summand of `self` has an equal-or-supertype summand in `other`.
    fn covered_by(&self, ts: &TypeSystem, other: &SumType) -> bool {
        self.summands.iter().all(|mine| {
            other
                .summands
                .iter()
                .any(|theirs| ts.compare_types(mine, theirs).is_subtype())
        })
    }

    pub fn compare(&self, ts: &TypeSystem, other: &SumType) -> SubtypeOrder {
        SubtypeOrder::from_inclusion(self.covered_by(ts, other), other.covered_by(ts, self))
    }
}

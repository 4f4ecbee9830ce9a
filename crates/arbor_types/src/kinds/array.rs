//! Homogeneous arrays with an inclusive size bound.
//!
//! The size bound is a validity constraint on values, not part of the
//! type's identity for subtyping: arrays compare by element type only.

use std::fmt::Write as _;

use arbor_value::{PathStep, Value};

use crate::ty::Child;
use crate::{SharedType, SubtypeOrder, TypeError, TypeSystem};

#[derive(Clone, Debug)]
pub struct ArrayType {
    element: SharedType,
    min: u32,
    max: u32,
    default_size: u32,
}

impl ArrayType {
    /// Largest default size the `core.array` constructor accepts. Every
    /// default value materializes this many elements.
    pub const MAX_DEFAULT_SIZE: u32 = 1 << 16;

    /// Requires `min <= default_size <= max`.
    pub fn new(element: SharedType, min: u32, max: u32, default_size: u32) -> Option<Self> {
        (min <= default_size && default_size <= max).then_some(ArrayType {
            element,
            min,
            max,
            default_size,
        })
    }

    pub fn element(&self) -> &SharedType {
        &self.element
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.min, self.max)
    }

    pub fn default_size(&self) -> u32 {
        self.default_size
    }

    fn check_size(&self, requested: u32) -> Result<(), TypeError> {
        if self.min <= requested && requested <= self.max {
            Ok(())
        } else {
            Err(TypeError::SizeOutOfRange {
                requested,
                min: self.min,
                max: self.max,
            })
        }
    }

    pub(crate) fn create_value(&self, ts: &TypeSystem) -> Result<Value, TypeError> {
        let item = self.element.create_value(ts)?;
        Ok(Value::array(vec![item; self.default_size as usize]))
    }

    pub(crate) fn validate(&self, ts: &TypeSystem, name: &str, value: &Value) -> Result<(), TypeError> {
        let Some(items) = value.as_array() else {
            return Err(TypeError::invalid(
                name,
                format!("expected an array, found {}", value.type_name()),
            ));
        };
        let len = u32::try_from(items.len()).unwrap_or(u32::MAX);
        if self.check_size(len).is_err() {
            return Err(TypeError::invalid(
                name,
                format!("length {len} outside [{}, {}]", self.min, self.max),
            ));
        }
        items.iter().try_for_each(|item| self.element.validate(ts, item))
    }

    pub(crate) fn child(&self, value: &Value, index: usize) -> Option<Child> {
        let item = value.as_array()?.get(index)?;
        Some(Child {
            value: item.clone(),
            step: PathStep::Index(u32::try_from(index).ok()?),
            type_ref: self.element.type_ref().clone(),
        })
    }

    /// Resize to `size`: growth appends defaults, shrinking truncates the
    /// tail. Out-of-bound sizes fail and leave `value` as it was.
    pub fn set_size(
        &self,
        ts: &TypeSystem,
        name: &str,
        value: &Value,
        size: u32,
    ) -> Result<Value, TypeError> {
        self.check_size(size)?;
        let Some(items) = value.as_array() else {
            return Err(TypeError::invalid(name, "expected an array"));
        };
        let size = size as usize;
        if items.len() == size {
            return Ok(value.clone());
        }
        let mut out = value.clone();
        let Some(items) = out.as_array_mut() else {
            return Err(TypeError::invalid(name, "expected an array"));
        };
        if size < items.len() {
            items.truncate(size);
        } else {
            let item = self.element.create_value(ts)?;
            items.resize(size, item);
        }
        Ok(out)
    }

    /// Insert a default element at `at`, shifting later elements.
    pub fn insert_default(
        &self,
        ts: &TypeSystem,
        name: &str,
        value: &Value,
        at: usize,
    ) -> Result<Value, TypeError> {
        let len = value
            .as_array()
            .ok_or_else(|| TypeError::invalid(name, "expected an array"))?
            .len();
        if at > len {
            return Err(TypeError::invalid(name, format!("insert position {at} past the end ({len})")));
        }
        self.check_size(u32::try_from(len + 1).unwrap_or(u32::MAX))?;
        let item = self.element.create_value(ts)?;
        let mut out = value.clone();
        if let Some(items) = out.as_array_mut() {
            items.insert(at, item);
        }
        Ok(out)
    }

    /// Remove the element at `at`, shifting later elements.
    pub fn remove_at(&self, name: &str, value: &Value, at: usize) -> Result<Value, TypeError> {
        let len = value
            .as_array()
            .ok_or_else(|| TypeError::invalid(name, "expected an array"))?
            .len();
        if at >= len {
            return Err(TypeError::invalid(name, format!("no element at {at} (length {len})")));
        }
        self.check_size(u32::try_from(len - 1).unwrap_or(u32::MAX))?;
        let mut out = value.clone();
        if let Some(items) = out.as_array_mut() {
            items.remove(at);
        }
        Ok(out)
    }

    pub(crate) fn format_value(&self, ts: &TypeSystem, value: &Value) -> Option<String> {
        let items = value.as_array()?;
        let mut out = String::from("[");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}", self.element.format_value(ts, item));
        }
        out.push(']');
        Some(out)
    }

    pub fn compare(&self, ts: &TypeSystem, other: &ArrayType) -> SubtypeOrder {
        ts.compare_types(&self.element, &other.element)
    }
}

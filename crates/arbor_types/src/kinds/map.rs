//! Map types: ordered rules from source values to target values, closed by
//! a fallback entry.
//!
//! In a value tree the children of a map are the entries whose target is a
//! concrete value (the fallback included when it is fixed), each addressed
//! by its entry position.

use arbor_value::{Fallback, MapEntry, MapSource, MapTarget, PathStep, Value};

use crate::ty::Child;
use crate::{SharedType, SubtypeOrder, TypeError, TypeSystem};

#[derive(Clone, Debug)]
pub struct MapType {
    source: SharedType,
    target: SharedType,
}

impl MapType {
    pub fn new(source: SharedType, target: SharedType) -> Self {
        MapType { source, target }
    }

    pub fn source(&self) -> &SharedType {
        &self.source
    }

    pub fn target(&self) -> &SharedType {
        &self.target
    }

    /// Identity targets are allowed only when every source value is also a
    /// target value.
    pub fn allows_identity(&self, ts: &TypeSystem) -> bool {
        ts.compare_types(&self.source, &self.target).is_subtype()
    }

    pub(crate) fn create_value(&self, ts: &TypeSystem) -> Result<Value, TypeError> {
        let fallback = if self.allows_identity(ts) {
            Fallback::Identity
        } else {
            Fallback::Fixed(self.target.create_value(ts)?)
        };
        Ok(Value::map(arbor_value::MapValue::new(fallback)))
    }

    fn validate_entry(
        &self,
        ts: &TypeSystem,
        name: &str,
        pos: usize,
        entry: &MapEntry,
    ) -> Result<(), TypeError> {
        match &entry.source {
            MapSource::Exact(v) => self.source.validate(ts, v)?,
            MapSource::Range { min, max } => {
                self.source.validate(ts, min)?;
                self.source.validate(ts, max)?;
                match min.numeric_cmp(max) {
                    Some(std::cmp::Ordering::Greater) => {
                        return Err(TypeError::invalid(
                            name,
                            format!("entry {pos}: range {min}..{max} is empty"),
                        ))
                    }
                    Some(_) => {}
                    None => {
                        return Err(TypeError::invalid(
                            name,
                            format!("entry {pos}: range bounds must be numbers"),
                        ))
                    }
                }
            }
            MapSource::Otherwise => {}
        }
        match &entry.target {
            MapTarget::Value(v) => self.target.validate(ts, v),
            MapTarget::Identity if self.allows_identity(ts) => Ok(()),
            MapTarget::Identity => Err(TypeError::invalid(
                name,
                format!(
                    "entry {pos}: identity target needs `{}` to be a subtype of `{}`",
                    self.source.name(),
                    self.target.name()
                ),
            )),
        }
    }

    pub(crate) fn validate(&self, ts: &TypeSystem, name: &str, value: &Value) -> Result<(), TypeError> {
        let Some(map) = value.as_map() else {
            return Err(TypeError::invalid(
                name,
                format!("expected a map, found {}", value.type_name()),
            ));
        };
        if !map.is_well_formed() {
            return Err(TypeError::invalid(name, "the fallback must be the only final entry"));
        }
        map.entries()
            .iter()
            .enumerate()
            .try_for_each(|(pos, entry)| self.validate_entry(ts, name, pos, entry))
    }

    /// Entry positions whose targets are values, in order.
    fn value_positions(value: &Value) -> Vec<usize> {
        value.as_map().map_or_else(Vec::new, |map| {
            map.entries()
                .iter()
                .enumerate()
                .filter(|(_, e)| matches!(e.target, MapTarget::Value(_)))
                .map(|(pos, _)| pos)
                .collect()
        })
    }

    pub(crate) fn num_children(&self, value: &Value) -> usize {
        Self::value_positions(value).len()
    }

    pub(crate) fn child(&self, value: &Value, index: usize) -> Option<Child> {
        let pos = *Self::value_positions(value).get(index)?;
        let MapTarget::Value(target) = &value.as_map()?.entries().get(pos)?.target else {
            return None;
        };
        Some(Child {
            value: target.clone(),
            step: PathStep::Index(u32::try_from(pos).ok()?),
            type_ref: self.target.type_ref().clone(),
        })
    }

    pub(crate) fn child_index(&self, value: &Value, step: PathStep) -> Option<usize> {
        let pos = usize::try_from(step.as_index()?).ok()?;
        Self::value_positions(value).iter().position(|&p| p == pos)
    }

    pub(crate) fn with_child(
        &self,
        name: &str,
        value: &Value,
        index: usize,
        child: Value,
    ) -> Result<Value, TypeError> {
        let Some(&pos) = Self::value_positions(value).get(index) else {
            return Err(TypeError::invalid(name, format!("no child at index {index}")));
        };
        let mut out = value.clone();
        let Some(map) = out.as_map_mut() else {
            return Err(TypeError::invalid(name, "expected a map"));
        };
        let entry = &map.entries()[pos];
        if entry.is_fallback() {
            map.set_fallback(Fallback::Fixed(child));
        } else {
            let replacement = MapEntry {
                source: entry.source.clone(),
                target: MapTarget::Value(child),
            };
            map.replace(pos, replacement)?;
        }
        Ok(out)
    }

    /// Insert a rule before position `pos` and validate the result.
    pub fn insert_entry(
        &self,
        ts: &TypeSystem,
        name: &str,
        value: &Value,
        pos: usize,
        entry: MapEntry,
    ) -> Result<Value, TypeError> {
        self.validate_entry(ts, name, pos, &entry)?;
        let mut out = value.clone();
        let Some(map) = out.as_map_mut() else {
            return Err(TypeError::invalid(name, "expected a map"));
        };
        map.insert(pos, entry)?;
        Ok(out)
    }

    pub fn remove_entry(&self, name: &str, value: &Value, pos: usize) -> Result<Value, TypeError> {
        let mut out = value.clone();
        let Some(map) = out.as_map_mut() else {
            return Err(TypeError::invalid(name, "expected a map"));
        };
        map.remove(pos)?;
        Ok(out)
    }

    pub fn set_fallback(
        &self,
        ts: &TypeSystem,
        name: &str,
        value: &Value,
        policy: Fallback,
    ) -> Result<Value, TypeError> {
        let pos = value.as_map().map_or(0, |m| m.len() - 1);
        self.validate_entry(ts, name, pos, &MapEntry::fallback(policy.clone()))?;
        let mut out = value.clone();
        let Some(map) = out.as_map_mut() else {
            return Err(TypeError::invalid(name, "expected a map"));
        };
        map.set_fallback(policy);
        Ok(out)
    }

    /// Sources only need to be related: unmatched inputs always reach the
    /// fallback. Targets compare covariantly.
    pub fn compare(&self, ts: &TypeSystem, other: &MapType) -> SubtypeOrder {
        if !ts.compare_types(&self.source, &other.source).is_related() {
            return SubtypeOrder::IsUnrelated;
        }
        ts.compare_types(&self.target, &other.target)
    }
}

//! Records: fixed, ordered, named fields.
//!
//! Values hold one slot per declared field, in declaration order. Optional
//! fields may be inactive (`None`); deactivating discards the field's value
//! and reactivating starts again from the field type's default. Children in
//! a value tree are the active fields only, indexed densely.

use std::fmt::Write as _;

use arbor_ir::ShortId;
use arbor_value::{PathStep, RecordValue, Value};

use crate::ty::Child;
use crate::{SharedType, SubtypeOrder, TypeError, TypeSystem};

#[derive(Clone, Debug)]
pub struct FieldDecl {
    pub id: ShortId,
    pub ty: SharedType,
    pub optional: bool,
}

#[derive(Clone, Debug)]
pub struct RecordType {
    fields: Vec<FieldDecl>,
}

impl RecordType {
    /// Fails on a repeated field id.
    pub fn new(fields: Vec<FieldDecl>) -> Result<Self, ShortId> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.id == field.id) {
                return Err(field.id);
            }
        }
        Ok(RecordType { fields })
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn field(&self, id: ShortId) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub(crate) fn create_value(&self, ts: &TypeSystem) -> Result<Value, TypeError> {
        let slots = self
            .fields
            .iter()
            .map(|field| {
                let value = if field.optional {
                    None
                } else {
                    Some(field.ty.create_value(ts)?)
                };
                Ok((field.id, value))
            })
            .collect::<Result<Vec<_>, TypeError>>()?;
        Ok(Value::record(RecordValue::new(slots)))
    }

    pub(crate) fn validate(&self, ts: &TypeSystem, name: &str, value: &Value) -> Result<(), TypeError> {
        let Some(record) = value.as_record() else {
            return Err(TypeError::invalid(
                name,
                format!("expected a record, found {}", value.type_name()),
            ));
        };
        if record.slots().len() != self.fields.len() {
            return Err(TypeError::invalid(
                name,
                format!(
                    "expected {} field slots, found {}",
                    self.fields.len(),
                    record.slots().len()
                ),
            ));
        }
        for (field, (id, slot)) in self.fields.iter().zip(record.slots()) {
            if field.id != *id {
                return Err(TypeError::invalid(
                    name,
                    format!("expected field `{}`, found `{id}`", field.id),
                ));
            }
            match slot {
                Some(v) => field.ty.validate(ts, v)?,
                None if field.optional => {}
                None => {
                    return Err(TypeError::invalid(
                        name,
                        format!("required field `{id}` is inactive"),
                    ))
                }
            }
        }
        Ok(())
    }

    pub(crate) fn num_children(&self, value: &Value) -> usize {
        value.as_record().map_or(0, |r| r.active().count())
    }

    pub(crate) fn child(&self, value: &Value, index: usize) -> Option<Child> {
        let (id, child) = value.as_record()?.active().nth(index)?;
        let field = self.field(id)?;
        Some(Child {
            value: child.clone(),
            step: PathStep::Field(id),
            type_ref: field.ty.type_ref().clone(),
        })
    }

    pub(crate) fn child_index(&self, value: &Value, step: PathStep) -> Option<usize> {
        let wanted = step.as_field()?;
        value.as_record()?.active().position(|(id, _)| id == wanted)
    }

    /// Switch an optional field on or off. Switching to the current state
    /// returns the value unchanged.
    pub fn set_field_active(
        &self,
        ts: &TypeSystem,
        name: &str,
        value: &Value,
        field: ShortId,
        active: bool,
    ) -> Result<Value, TypeError> {
        let Some(decl) = self.field(field) else {
            return Err(TypeError::invalid(name, format!("no field `{field}`")));
        };
        if !decl.optional && !active {
            return Err(TypeError::invalid(
                name,
                format!("field `{field}` is required and cannot be deactivated"),
            ));
        }
        let Some(record) = value.as_record() else {
            return Err(TypeError::invalid(name, "expected a record"));
        };
        if record.is_active(field) == active {
            return Ok(value.clone());
        }
        let replacement = if active {
            Some(decl.ty.create_value(ts)?)
        } else {
            None
        };
        let mut out = value.clone();
        if let Some(slot) = out
            .as_record_mut()
            .and_then(|r| r.slots_mut().iter_mut().find(|(id, _)| *id == field))
        {
            slot.1 = replacement;
        }
        Ok(out)
    }

    pub(crate) fn format_value(&self, ts: &TypeSystem, value: &Value) -> Option<String> {
        let record = value.as_record()?;
        let mut out = String::from("{");
        for (i, (id, v)) in record.active().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let text = match self.field(id) {
                Some(field) => field.ty.format_value(ts, v),
                None => v.to_string(),
            };
            let _ = write!(out, "{id}: {text}");
        }
        out.push('}');
        Some(out)
    }

    /// Whether every value of `self` is usable where `other` is expected.
    fn fits(&self, ts: &TypeSystem, other: &RecordType) -> bool {
        other.fields.iter().all(|want| match self.field(want.id) {
            Some(have) => {
                (want.optional || !have.optional)
                    && ts.compare_types(&have.ty, &want.ty).is_subtype()
            }
            None => want.optional,
        })
    }

    pub fn compare(&self, ts: &TypeSystem, other: &RecordType) -> SubtypeOrder {
        SubtypeOrder::from_inclusion(self.fits(ts, other), other.fits(ts, self))
    }
}

#[cfg(test)]
mod tests;

//! Records with variants: exactly one tag selected, each tag activating a
//! subset of the declared fields.
//!
//! Fields are declared once and referenced by tags, so a field listed under
//! two tags keeps its value across a switch between them. Fields exclusive
//! to the previous tag are discarded.

use std::fmt::Write as _;

use arbor_ir::ShortId;
use arbor_value::{PathStep, Value, VariantValue};

use crate::ty::Child;
use crate::{SharedType, SubtypeOrder, TypeError, TypeSystem};

#[derive(Clone, Debug)]
pub struct VariantField {
    pub id: ShortId,
    pub ty: SharedType,
}

/// A tag and the positions (into the declared fields) it activates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagDecl {
    pub id: ShortId,
    pub fields: Vec<usize>,
}

#[derive(Clone, Debug)]
pub struct VariantType {
    fields: Vec<VariantField>,
    tags: Vec<TagDecl>,
    default_tag: usize,
}

impl VariantType {
    pub fn new(
        fields: Vec<VariantField>,
        tags: Vec<TagDecl>,
        default_tag: usize,
    ) -> Result<Self, String> {
        if tags.is_empty() {
            return Err("a variant record needs at least one tag".to_owned());
        }
        if default_tag >= tags.len() {
            return Err(format!("default tag {default_tag} out of range"));
        }
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.id == field.id) {
                return Err(format!("duplicate field `{}`", field.id));
            }
        }
        for (i, tag) in tags.iter().enumerate() {
            if tags[..i].iter().any(|t| t.id == tag.id) {
                return Err(format!("duplicate tag `{}`", tag.id));
            }
            for (k, &fi) in tag.fields.iter().enumerate() {
                if fi >= fields.len() {
                    return Err(format!("tag `{}` references missing field {fi}", tag.id));
                }
                if tag.fields[..k].contains(&fi) {
                    return Err(format!("tag `{}` lists field {fi} twice", tag.id));
                }
            }
        }
        Ok(VariantType {
            fields,
            tags,
            default_tag,
        })
    }

    pub fn fields(&self) -> &[VariantField] {
        &self.fields
    }

    pub fn tags(&self) -> &[TagDecl] {
        &self.tags
    }

    pub fn default_tag(&self) -> &TagDecl {
        &self.tags[self.default_tag]
    }

    pub fn tag(&self, id: ShortId) -> Option<&TagDecl> {
        self.tags.iter().find(|t| t.id == id)
    }

    fn field(&self, id: ShortId) -> Option<&VariantField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Value for `tag`, reusing fields of `previous` that `tag` shares.
    fn fill(
        &self,
        ts: &TypeSystem,
        tag: &TagDecl,
        previous: Option<&VariantValue>,
    ) -> Result<VariantValue, TypeError> {
        let fields = tag
            .fields
            .iter()
            .map(|&fi| {
                let field = &self.fields[fi];
                let value = match previous.and_then(|p| p.get(field.id)) {
                    Some(kept) => kept.clone(),
                    None => field.ty.create_value(ts)?,
                };
                Ok((field.id, value))
            })
            .collect::<Result<Vec<_>, TypeError>>()?;
        Ok(VariantValue::new(tag.id, fields))
    }

    pub(crate) fn create_value(&self, ts: &TypeSystem) -> Result<Value, TypeError> {
        Ok(Value::variant(self.fill(ts, self.default_tag(), None)?))
    }

    pub(crate) fn validate(&self, ts: &TypeSystem, name: &str, value: &Value) -> Result<(), TypeError> {
        let Some(variant) = value.as_variant() else {
            return Err(TypeError::invalid(
                name,
                format!("expected a variant record, found {}", value.type_name()),
            ));
        };
        let Some(tag) = self.tag(variant.tag) else {
            return Err(TypeError::invalid(name, format!("unknown tag `{}`", variant.tag)));
        };
        if variant.fields.len() != tag.fields.len() {
            return Err(TypeError::invalid(
                name,
                format!(
                    "tag `{}` has {} fields, found {}",
                    tag.id,
                    tag.fields.len(),
                    variant.fields.len()
                ),
            ));
        }
        for (&fi, (id, v)) in tag.fields.iter().zip(&variant.fields) {
            let field = &self.fields[fi];
            if field.id != *id {
                return Err(TypeError::invalid(
                    name,
                    format!("expected field `{}`, found `{id}`", field.id),
                ));
            }
            field.ty.validate(ts, v)?;
        }
        Ok(())
    }

    pub(crate) fn child(&self, value: &Value, index: usize) -> Option<Child> {
        let (id, child) = value.as_variant()?.fields.get(index)?;
        Some(Child {
            value: child.clone(),
            step: PathStep::Field(*id),
            type_ref: self.field(*id)?.ty.type_ref().clone(),
        })
    }

    pub(crate) fn child_index(&self, value: &Value, step: PathStep) -> Option<usize> {
        let wanted = step.as_field()?;
        value.as_variant()?.fields.iter().position(|(id, _)| *id == wanted)
    }

    /// Switch to `tag`. Shared fields keep their values; newly active
    /// fields start from their defaults.
    pub fn select_tag(
        &self,
        ts: &TypeSystem,
        name: &str,
        value: &Value,
        tag: ShortId,
    ) -> Result<Value, TypeError> {
        let Some(decl) = self.tag(tag) else {
            return Err(TypeError::invalid(name, format!("unknown tag `{tag}`")));
        };
        let Some(current) = value.as_variant() else {
            return Err(TypeError::invalid(name, "expected a variant record"));
        };
        if current.tag == tag {
            return Ok(value.clone());
        }
        Ok(Value::variant(self.fill(ts, decl, Some(current))?))
    }

    pub(crate) fn format_value(&self, ts: &TypeSystem, value: &Value) -> Option<String> {
        let variant = value.as_variant()?;
        let mut out = format!("{}", variant.tag);
        if variant.fields.is_empty() {
            return Some(out);
        }
        out.push('{');
        for (i, (id, v)) in variant.fields.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let text = match self.field(*id) {
                Some(field) => field.ty.format_value(ts, v),
                None => v.to_string(),
            };
            let _ = write!(out, "{id}: {text}");
        }
        out.push('}');
        Some(out)
    }

    /// Whether values of `tag` fit `want` (same tag in `other`).
    fn tag_fits(&self, ts: &TypeSystem, tag: &TagDecl, other: &VariantType, want: &TagDecl) -> bool {
        want.fields.iter().all(|&wi| {
            let wanted = &other.fields[wi];
            tag.fields
                .iter()
                .map(|&fi| &self.fields[fi])
                .find(|have| have.id == wanted.id)
                .is_some_and(|have| ts.compare_types(&have.ty, &wanted.ty).is_subtype())
        })
    }

    pub fn compare(&self, ts: &TypeSystem, other: &VariantType) -> SubtypeOrder {
        let same_tags = self.tags.len() == other.tags.len()
            && self.tags.iter().all(|t| other.tag(t.id).is_some());
        if !same_tags {
            return SubtypeOrder::IsUnrelated;
        }
        let mut down = true;
        let mut up = true;
        for tag in &self.tags {
            let Some(theirs) = other.tag(tag.id) else {
                return SubtypeOrder::IsUnrelated;
            };
            down &= self.tag_fits(ts, tag, other, theirs);
            up &= other.tag_fits(ts, theirs, self, tag);
        }
        SubtypeOrder::from_inclusion(down, up)
    }
}

#[cfg(test)]
mod tests;

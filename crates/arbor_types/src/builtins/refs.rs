//! Type reference builders for the builtin constructors.
//!
//! These only assemble `TypeRef`s; nothing is checked until the reference
//! is resolved against a type system.

use arbor_ir::ShortId;
use arbor_value::{Rational, TypeRef, Value};

use super::core_ids;

fn count(n: u32) -> Value {
    Value::Int(i64::from(n))
}

fn idents(ids: impl IntoIterator<Item = ShortId>) -> Value {
    Value::array(ids.into_iter().map(Value::Ident).collect())
}

pub fn boolean() -> TypeRef {
    TypeRef::primitive(core_ids().bool)
}

pub fn int() -> TypeRef {
    TypeRef::primitive(core_ids().int)
}

pub fn rational() -> TypeRef {
    TypeRef::primitive(core_ids().rational)
}

pub fn text() -> TypeRef {
    TypeRef::primitive(core_ids().text)
}

pub fn int_range(min: i64, max: i64) -> TypeRef {
    TypeRef::constructed(
        core_ids().int_range,
        Vec::new(),
        vec![Value::Int(min), Value::Int(max)],
    )
}

pub fn rational_range(min: Rational, max: Rational) -> TypeRef {
    TypeRef::constructed(
        core_ids().rational_range,
        Vec::new(),
        vec![Value::Rational(min), Value::Rational(max)],
    )
}

pub fn enumeration(members: &[&str], has_blank: bool) -> TypeRef {
    TypeRef::constructed(
        core_ids().enumeration,
        Vec::new(),
        vec![
            idents(members.iter().map(|m| ShortId::new(m))),
            Value::Bool(has_blank),
        ],
    )
}

/// A record field declaration for [`record`].
#[derive(Clone, Debug)]
pub struct Field {
    pub id: ShortId,
    pub ty: TypeRef,
    pub optional: bool,
}

impl Field {
    pub fn required(id: &str, ty: TypeRef) -> Self {
        Field {
            id: ShortId::new(id),
            ty,
            optional: false,
        }
    }

    pub fn optional(id: &str, ty: TypeRef) -> Self {
        Field {
            id: ShortId::new(id),
            ty,
            optional: true,
        }
    }
}

pub fn record(fields: impl IntoIterator<Item = Field>) -> TypeRef {
    let fields: Vec<Field> = fields.into_iter().collect();
    let ids = idents(fields.iter().map(|f| f.id));
    let optional = Value::array(fields.iter().map(|f| Value::Bool(f.optional)).collect());
    let types = fields.into_iter().map(|f| f.ty).collect();
    TypeRef::constructed(core_ids().record, types, vec![ids, optional])
}

/// Builds a variant record reference tag by tag.
///
/// A field named under several tags is declared once and shared; the type
/// given at its first mention wins.
#[derive(Clone, Debug, Default)]
pub struct VariantBuilder {
    fields: Vec<(ShortId, TypeRef)>,
    tags: Vec<(ShortId, Vec<usize>)>,
    default_tag: usize,
}

impl VariantBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tag<'a>(mut self, id: &str, fields: impl IntoIterator<Item = (&'a str, TypeRef)>) -> Self {
        let mut positions = Vec::new();
        for (name, ty) in fields {
            let field = ShortId::new(name);
            let pos = match self.fields.iter().position(|(id, _)| *id == field) {
                Some(pos) => pos,
                None => {
                    self.fields.push((field, ty));
                    self.fields.len() - 1
                }
            };
            positions.push(pos);
        }
        self.tags.push((ShortId::new(id), positions));
        self
    }

    /// Select the default tag by name; unknown names leave the first tag.
    #[must_use]
    pub fn default_tag(mut self, id: &str) -> Self {
        let wanted = ShortId::new(id);
        if let Some(pos) = self.tags.iter().position(|(t, _)| *t == wanted) {
            self.default_tag = pos;
        }
        self
    }

    pub fn build(self) -> TypeRef {
        let ids = idents(self.fields.iter().map(|(id, _)| *id));
        let tags = idents(self.tags.iter().map(|(id, _)| *id));
        let lists = Value::array(
            self.tags
                .iter()
                .map(|(_, positions)| {
                    Value::array(
                        positions
                            .iter()
                            .map(|&p| Value::Int(i64::try_from(p).unwrap_or(i64::MAX)))
                            .collect(),
                    )
                })
                .collect(),
        );
        let default_tag = Value::Int(i64::try_from(self.default_tag).unwrap_or(0));
        let types = self.fields.into_iter().map(|(_, ty)| ty).collect();
        TypeRef::constructed(core_ids().variant, types, vec![ids, tags, lists, default_tag])
    }
}

pub fn array(element: TypeRef, min: u32, max: u32, default_size: u32) -> TypeRef {
    TypeRef::constructed(
        core_ids().array,
        vec![element],
        vec![count(min), count(max), count(default_size)],
    )
}

/// Unbounded array starting empty.
pub fn list(element: TypeRef) -> TypeRef {
    array(element, 0, u32::MAX, 0)
}

pub fn sum(summands: Vec<TypeRef>, default_index: u32) -> TypeRef {
    TypeRef::constructed(core_ids().sum, summands, vec![count(default_index)])
}

pub fn tuple(slots: Vec<TypeRef>) -> TypeRef {
    TypeRef::constructed(core_ids().tuple, slots, Vec::new())
}

/// Unbound generic over `var_count` variables.
pub fn generic(inner: TypeRef, var_count: u32) -> TypeRef {
    TypeRef::constructed(core_ids().generic, vec![inner], vec![count(var_count)])
}

/// Generic with every variable bound.
pub fn generic_bound(inner: TypeRef, var_count: u32, bindings: Vec<TypeRef>) -> TypeRef {
    let mut args = Vec::with_capacity(bindings.len() + 1);
    args.push(inner);
    args.extend(bindings);
    TypeRef::constructed(core_ids().generic, args, vec![count(var_count)])
}

/// Variable `index` of the generic `depth` levels out.
pub fn var(index: u32, depth: u32) -> TypeRef {
    TypeRef::constructed(core_ids().var, Vec::new(), vec![count(index), count(depth)])
}

pub fn map(source: TypeRef, target: TypeRef) -> TypeRef {
    TypeRef::constructed(core_ids().map, vec![source, target], Vec::new())
}

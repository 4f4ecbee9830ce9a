//! Builtin primitives and constructors of the `core` namespace.
//!
//! Primitives are declared in [`BUILTIN_PRIMITIVES`], a constant table of
//! (id, display name, UUID, version) rows consumed by
//! `TypeSystem::with_builtins`. Constructors are declared the same way in
//! `BUILTIN_CONSTRUCTORS`, each row pairing an id and arity with a name
//! template and a pure build function.

mod refs;

use std::fmt::Write as _;
use std::sync::OnceLock;

use arbor_ir::{LongId, MediumId, ShortId};

use crate::constructor::{Arity, ConstructorArgs, NameTemplate, TypeConstructor};
use crate::kinds::{
    ArrayType, EnumType, FieldDecl, GenericType, IntRange, MapType, RationalRange, RecordType,
    SumType, TagDecl, TupleType, TypeVar, VariantField, VariantType,
};
use crate::{TypeError, TypeKind};

pub use refs::{
    array, boolean, enumeration, generic, generic_bound, int, int_range, list, map, rational,
    rational_range, record, sum, text, tuple, var, Field, VariantBuilder,
};

pub const CORE_NAMESPACE: &str = "core";

/// `core.<local>`.
pub fn core_id(local: &str) -> LongId {
    LongId::new(MediumId::new(CORE_NAMESPACE), ShortId::new(local))
}

/// Interned ids of every builtin.
#[derive(Debug)]
pub struct CoreIds {
    pub bool: LongId,
    pub int: LongId,
    pub rational: LongId,
    pub text: LongId,
    pub int_range: LongId,
    pub rational_range: LongId,
    pub enumeration: LongId,
    pub record: LongId,
    pub variant: LongId,
    pub array: LongId,
    pub sum: LongId,
    pub tuple: LongId,
    pub generic: LongId,
    pub var: LongId,
    pub map: LongId,
}

pub fn core_ids() -> &'static CoreIds {
    static IDS: OnceLock<CoreIds> = OnceLock::new();
    IDS.get_or_init(|| CoreIds {
        bool: core_id("bool"),
        int: core_id("int"),
        rational: core_id("rational"),
        text: core_id("text"),
        int_range: core_id("int_range"),
        rational_range: core_id("rational_range"),
        enumeration: core_id("enum"),
        record: core_id("record"),
        variant: core_id("variant_record"),
        array: core_id("array"),
        sum: core_id("sum"),
        tuple: core_id("tuple"),
        generic: core_id("generic"),
        var: core_id("var"),
        map: core_id("map"),
    })
}

// Primitives

/// A registered primitive type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimitiveInfo {
    pub id: LongId,
    pub display_name: String,
    pub uuid: u128,
    pub version: u32,
}

/// One row of a declarative primitive table.
#[derive(Clone, Copy)]
pub struct PrimitiveDecl {
    pub namespace: &'static str,
    pub local: &'static str,
    pub display_name: &'static str,
    pub uuid: u128,
    pub version: u32,
    pub kind: fn() -> TypeKind,
}

impl PrimitiveDecl {
    pub fn info(&self) -> PrimitiveInfo {
        PrimitiveInfo {
            id: LongId::new(MediumId::new(self.namespace), ShortId::new(self.local)),
            display_name: self.display_name.to_owned(),
            uuid: self.uuid,
            version: self.version,
        }
    }
}

pub const BUILTIN_PRIMITIVES: [PrimitiveDecl; 4] = [
    PrimitiveDecl {
        namespace: CORE_NAMESPACE,
        local: "bool",
        display_name: "Bool",
        uuid: 0x6f1c_52a0_0e4b_4d3a_9a57_1b1f_0c1e_0001,
        version: 1,
        kind: bool_kind,
    },
    PrimitiveDecl {
        namespace: CORE_NAMESPACE,
        local: "int",
        display_name: "Int",
        uuid: 0x6f1c_52a0_0e4b_4d3a_9a57_1b1f_0c1e_0002,
        version: 1,
        kind: int_kind,
    },
    PrimitiveDecl {
        namespace: CORE_NAMESPACE,
        local: "rational",
        display_name: "Rational",
        uuid: 0x6f1c_52a0_0e4b_4d3a_9a57_1b1f_0c1e_0003,
        version: 1,
        kind: rational_kind,
    },
    PrimitiveDecl {
        namespace: CORE_NAMESPACE,
        local: "text",
        display_name: "Text",
        uuid: 0x6f1c_52a0_0e4b_4d3a_9a57_1b1f_0c1e_0004,
        version: 1,
        kind: text_kind,
    },
];

fn bool_kind() -> TypeKind {
    TypeKind::Bool
}

fn int_kind() -> TypeKind {
    TypeKind::Int(IntRange::FULL)
}

fn rational_kind() -> TypeKind {
    TypeKind::Rational(RationalRange::FULL)
}

fn text_kind() -> TypeKind {
    TypeKind::Text
}

// Constructors

type BuildFn = fn(&ConstructorArgs<'_>) -> Result<TypeKind, TypeError>;
type NameFn = fn(&ConstructorArgs<'_>) -> Option<String>;

struct BuiltinDecl {
    local: &'static str,
    arity: Arity,
    template: &'static str,
    build: BuildFn,
    /// Overrides the template when it returns `Some`.
    name: Option<NameFn>,
}

static BUILTIN_CONSTRUCTORS: [BuiltinDecl; 11] = [
    BuiltinDecl {
        local: "int_range",
        arity: Arity::Exact(0),
        template: "Int[{v0}..{v1}]",
        build: build_int_range,
        name: None,
    },
    BuiltinDecl {
        local: "rational_range",
        arity: Arity::Exact(0),
        template: "Rational[{v0}..{v1}]",
        build: build_rational_range,
        name: None,
    },
    BuiltinDecl {
        local: "enum",
        arity: Arity::Exact(0),
        template: "Enum{{{v0*:|}}}",
        build: build_enum,
        name: None,
    },
    BuiltinDecl {
        local: "record",
        arity: Arity::AtLeast(0),
        template: "Record{{{v0~t:, }}}",
        build: build_record,
        name: None,
    },
    BuiltinDecl {
        local: "variant_record",
        arity: Arity::AtLeast(0),
        template: "Variant{{{v1*:|}}}",
        build: build_variant,
        name: None,
    },
    BuiltinDecl {
        local: "array",
        arity: Arity::Exact(1),
        template: "Array<{t0}>[{v0}..{v1}]",
        build: build_array,
        name: None,
    },
    BuiltinDecl {
        local: "sum",
        arity: Arity::AtLeast(1),
        template: "{t*: | }",
        build: build_sum,
        name: None,
    },
    BuiltinDecl {
        local: "tuple",
        arity: Arity::AtLeast(0),
        template: "({t*:, })",
        build: build_tuple,
        name: None,
    },
    BuiltinDecl {
        local: "generic",
        arity: Arity::AtLeast(1),
        template: "Generic<{t0}>",
        build: build_generic,
        name: Some(generic_name),
    },
    BuiltinDecl {
        local: "var",
        arity: Arity::Exact(0),
        template: "Var({v0}, {v1})",
        build: build_var,
        name: Some(var_name),
    },
    BuiltinDecl {
        local: "map",
        arity: Arity::Exact(2),
        template: "Map<{t0} -> {t1}>",
        build: build_map,
        name: None,
    },
];

struct Builtin {
    id: LongId,
    decl: &'static BuiltinDecl,
    template: NameTemplate,
}

impl TypeConstructor for Builtin {
    fn id(&self) -> LongId {
        self.id
    }

    fn arity(&self) -> Arity {
        self.decl.arity
    }

    fn name_template(&self) -> &NameTemplate {
        &self.template
    }

    fn construct(&self, args: &ConstructorArgs<'_>) -> Result<TypeKind, TypeError> {
        (self.decl.build)(args)
    }

    fn display_name(&self, args: &ConstructorArgs<'_>) -> String {
        self.decl
            .name
            .and_then(|name| name(args))
            .unwrap_or_else(|| self.template.render(args))
    }
}

/// Fresh instances of every builtin constructor.
pub fn builtin_constructors() -> Vec<Box<dyn TypeConstructor>> {
    BUILTIN_CONSTRUCTORS
        .iter()
        .map(|decl| {
            Box::new(Builtin {
                id: core_id(decl.local),
                decl,
                template: NameTemplate::new(decl.template),
            }) as Box<dyn TypeConstructor>
        })
        .collect()
}

fn build_int_range(args: &ConstructorArgs<'_>) -> Result<TypeKind, TypeError> {
    args.expect_values(2)?;
    let (min, max) = (args.int(0)?, args.int(1)?);
    IntRange::new(min, max)
        .map(TypeKind::Int)
        .ok_or_else(|| TypeError::value_args(args.constructor, format!("empty range {min}..{max}")))
}

fn build_rational_range(args: &ConstructorArgs<'_>) -> Result<TypeKind, TypeError> {
    args.expect_values(2)?;
    let (min, max) = (args.number(0)?, args.number(1)?);
    RationalRange::new(min, max)
        .map(TypeKind::Rational)
        .ok_or_else(|| TypeError::value_args(args.constructor, format!("empty range {min}..{max}")))
}

fn build_enum(args: &ConstructorArgs<'_>) -> Result<TypeKind, TypeError> {
    args.expect_values(2)?;
    let members = args.idents(0)?;
    let has_blank = args.boolean(1)?;
    if members.is_empty() && !has_blank {
        return Err(TypeError::value_args(args.constructor, "enumeration has no values"));
    }
    Ok(TypeKind::Enumeration(EnumType::new(members, has_blank)))
}

fn build_record(args: &ConstructorArgs<'_>) -> Result<TypeKind, TypeError> {
    args.expect_values(2)?;
    let ids = args.idents(0)?;
    let optional = args.booleans(1)?;
    if ids.len() != args.types.len() || optional.len() != args.types.len() {
        return Err(TypeError::value_args(
            args.constructor,
            format!(
                "{} field types, {} field ids, {} optional flags",
                args.types.len(),
                ids.len(),
                optional.len()
            ),
        ));
    }
    let fields = ids
        .into_iter()
        .zip(args.types)
        .zip(optional)
        .map(|((id, ty), optional)| FieldDecl {
            id,
            ty: ty.clone(),
            optional,
        })
        .collect();
    RecordType::new(fields)
        .map(TypeKind::Record)
        .map_err(|id| TypeError::value_args(args.constructor, format!("duplicate field `{id}`")))
}

fn build_variant(args: &ConstructorArgs<'_>) -> Result<TypeKind, TypeError> {
    args.expect_values(4)?;
    let ids = args.idents(0)?;
    let tags = args.idents(1)?;
    let lists = args.index_lists(2)?;
    let default_tag = args.count(3)? as usize;
    if ids.len() != args.types.len() || lists.len() != tags.len() {
        return Err(TypeError::value_args(
            args.constructor,
            format!(
                "{} field types for {} field ids, {} field lists for {} tags",
                args.types.len(),
                ids.len(),
                lists.len(),
                tags.len()
            ),
        ));
    }
    let fields = ids
        .into_iter()
        .zip(args.types)
        .map(|(id, ty)| VariantField { id, ty: ty.clone() })
        .collect();
    let tags = tags
        .into_iter()
        .zip(lists)
        .map(|(id, fields)| TagDecl { id, fields })
        .collect();
    VariantType::new(fields, tags, default_tag)
        .map(TypeKind::Variant)
        .map_err(|message| TypeError::value_args(args.constructor, message))
}

fn build_array(args: &ConstructorArgs<'_>) -> Result<TypeKind, TypeError> {
    args.expect_values(3)?;
    let (min, max, default_size) = (args.count(0)?, args.count(1)?, args.count(2)?);
    if default_size > ArrayType::MAX_DEFAULT_SIZE {
        return Err(TypeError::value_args(
            args.constructor,
            format!(
                "default size {default_size} exceeds the limit of {}",
                ArrayType::MAX_DEFAULT_SIZE
            ),
        ));
    }
    ArrayType::new(args.types[0].clone(), min, max, default_size)
        .map(TypeKind::Array)
        .ok_or_else(|| {
            TypeError::value_args(
                args.constructor,
                format!("need min <= default <= max, got {min}, {default_size}, {max}"),
            )
        })
}

fn build_sum(args: &ConstructorArgs<'_>) -> Result<TypeKind, TypeError> {
    args.expect_values(1)?;
    let default_index = args.count(0)?;
    SumType::new(args.types.to_vec(), default_index)
        .map(TypeKind::Sum)
        .ok_or_else(|| {
            TypeError::value_args(
                args.constructor,
                format!("default summand {default_index} out of range"),
            )
        })
}

fn build_tuple(args: &ConstructorArgs<'_>) -> Result<TypeKind, TypeError> {
    args.expect_values(0)?;
    Ok(TypeKind::Tuple(TupleType::new(args.types.to_vec())))
}

fn build_generic(args: &ConstructorArgs<'_>) -> Result<TypeKind, TypeError> {
    args.expect_values(1)?;
    let var_count = args.count(0)?;
    if var_count > GenericType::MAX_VARS {
        return Err(TypeError::value_args(
            args.constructor,
            format!("{var_count} variables exceed the limit of {}", GenericType::MAX_VARS),
        ));
    }
    let bindings: Vec<_> = args.type_refs[1..]
        .iter()
        .cloned()
        .zip(args.types[1..].iter().cloned())
        .collect();
    GenericType::new(args.type_refs[0].clone(), args.types[0].clone(), var_count, bindings)
        .map(TypeKind::Generic)
        .ok_or_else(|| {
            TypeError::value_args(
                args.constructor,
                format!(
                    "{var_count} variable(s) but {} binding(s)",
                    args.types.len() - 1
                ),
            )
        })
}

fn build_var(args: &ConstructorArgs<'_>) -> Result<TypeKind, TypeError> {
    args.expect_values(2)?;
    Ok(TypeKind::Var(TypeVar {
        index: args.count(0)?,
        depth: args.count(1)?,
    }))
}

fn build_map(args: &ConstructorArgs<'_>) -> Result<TypeKind, TypeError> {
    args.expect_values(0)?;
    Ok(TypeKind::Map(MapType::new(
        args.types[0].clone(),
        args.types[1].clone(),
    )))
}

fn var_name(args: &ConstructorArgs<'_>) -> Option<String> {
    Some(
        TypeVar {
            index: args.count(0).ok()?,
            depth: args.count(1).ok()?,
        }
        .symbol(),
    )
}

/// `∀A, B. inner` when unbound, `inner[A := T, B := U]` when bound.
fn generic_name(args: &ConstructorArgs<'_>) -> Option<String> {
    let var_count = args.count(0).ok()?;
    let inner = args.types.first()?.name();
    let bindings = args.types.get(1..).unwrap_or_default();
    let symbols = (0..var_count).map(|index| TypeVar { index, depth: 0 }.symbol());

    let mut out = String::new();
    if bindings.is_empty() {
        out.push('∀');
        for (i, symbol) in symbols.enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&symbol);
        }
        let _ = write!(out, ". {inner}");
    } else {
        out.push_str(inner);
        out.push('[');
        for (i, (symbol, ty)) in symbols.zip(bindings).enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{symbol} := {}", ty.name());
        }
        out.push(']');
    }
    Some(out)
}

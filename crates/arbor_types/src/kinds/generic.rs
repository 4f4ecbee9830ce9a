//! Generic types and type variables.
//!
//! A generic wraps an inner type reference mentioning variables
//! `core.var<; index, depth>`. Depth counts enclosing generics between the
//! variable and the generic that binds it, de Bruijn style: depth 0 is bound
//! by the innermost enclosing generic, depth 1 by the one around it.
//!
//! Instantiation substitutes the variables bound by one generic everywhere
//! in its scope. Variables bound further out lose one level of depth as the
//! generic disappears; variables bound by nested generics are untouched.
//!
//! A generic is *bound* when its type reference carries a binding for every
//! variable. Values exist only for bound generics: a `GenericValue` records
//! the bindings it was built with and the value of the instantiated type.

use arbor_value::{ConstructedRef, PathStep, TypeRef, Value};

use crate::builtins::{self, core_ids};
use crate::ty::Child;
use crate::{SharedType, SubtypeOrder, TypeError, TypeKind, TypeSystem};

/// An unbound type variable placeholder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeVar {
    pub index: u32,
    pub depth: u32,
}

const SUPERSCRIPTS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

impl TypeVar {
    /// Abstract symbol: `A`, `B`, ..., `Z`, `A1`, ..., with the depth as a
    /// superscript when non-zero (`B¹`, `A²`).
    pub fn symbol(self) -> String {
        let letter = char::from(b'A' + (self.index % 26) as u8);
        let mut out = String::from(letter);
        if self.index >= 26 {
            out.push_str(&(self.index / 26).to_string());
        }
        if self.depth > 0 {
            out.extend(
                self.depth
                    .to_string()
                    .bytes()
                    .map(|b| SUPERSCRIPTS[usize::from(b - b'0')]),
            );
        }
        out
    }

    pub(crate) fn unresolved(self) -> TypeError {
        TypeError::UnresolvedGenericVariable {
            index: self.index,
            depth: self.depth,
        }
    }
}

/// `(index, depth)` of a variable reference.
fn var_parts(c: &ConstructedRef) -> Option<(u32, u32)> {
    if c.constructor != core_ids().var || c.value_args.len() != 2 {
        return None;
    }
    let index = u32::try_from(c.value_args[0].as_int()?).ok()?;
    let depth = u32::try_from(c.value_args[1].as_int()?).ok()?;
    Some((index, depth))
}

/// Add `by` to the depth of every variable free at `cutoff` or beyond.
fn shift(tr: &TypeRef, by: u32, cutoff: u32) -> TypeRef {
    if by == 0 {
        return tr.clone();
    }
    let TypeRef::Constructed(c) = tr else {
        return tr.clone();
    };
    if let Some((index, depth)) = var_parts(c) {
        return if depth >= cutoff {
            builtins::var(index, depth + by)
        } else {
            tr.clone()
        };
    }
    let is_generic = c.constructor == core_ids().generic;
    let args = c
        .type_args
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            let inner = is_generic && i == 0;
            shift(arg, by, if inner { cutoff + 1 } else { cutoff })
        })
        .collect();
    tr.with_type_args(args)
}

fn substitute(tr: &TypeRef, level: u32, bindings: &[TypeRef]) -> Result<TypeRef, TypeError> {
    let TypeRef::Constructed(c) = tr else {
        return Ok(tr.clone());
    };
    if let Some((index, depth)) = var_parts(c) {
        return match depth.cmp(&level) {
            std::cmp::Ordering::Equal => bindings
                .get(index as usize)
                .map(|b| shift(b, level, 0))
                .ok_or(TypeError::UnresolvedGenericVariable { index, depth }),
            std::cmp::Ordering::Greater => Ok(builtins::var(index, depth - 1)),
            std::cmp::Ordering::Less => Ok(tr.clone()),
        };
    }
    let is_generic = c.constructor == core_ids().generic;
    let args = c
        .type_args
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            let inner = is_generic && i == 0;
            substitute(arg, if inner { level + 1 } else { level }, bindings)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tr.with_type_args(args))
}

/// Substitute the variables bound by the generic around `inner`.
///
/// Fails with `UnresolvedGenericVariable` if `inner` mentions a variable
/// with no binding.
pub fn instantiate(inner: &TypeRef, bindings: &[TypeRef]) -> Result<TypeRef, TypeError> {
    substitute(inner, 0, bindings)
}

#[derive(Clone, Debug)]
pub struct GenericType {
    inner_ref: TypeRef,
    inner: SharedType,
    var_count: u32,
    bindings: Vec<(TypeRef, SharedType)>,
}

impl GenericType {
    /// Most variables one generic may bind.
    pub const MAX_VARS: u32 = 256;

    /// `bindings` is empty for an unbound generic, else one per variable.
    pub fn new(
        inner_ref: TypeRef,
        inner: SharedType,
        var_count: u32,
        bindings: Vec<(TypeRef, SharedType)>,
    ) -> Option<Self> {
        (bindings.is_empty() || bindings.len() == var_count as usize).then_some(GenericType {
            inner_ref,
            inner,
            var_count,
            bindings,
        })
    }

    pub fn inner_ref(&self) -> &TypeRef {
        &self.inner_ref
    }

    /// The inner type with its variables still abstract.
    pub fn inner_type(&self) -> &SharedType {
        &self.inner
    }

    pub fn var_count(&self) -> u32 {
        self.var_count
    }

    pub fn is_bound(&self) -> bool {
        self.var_count == 0 || !self.bindings.is_empty()
    }

    /// Bindings carried by the type reference, empty when unbound.
    pub fn default_bindings(&self) -> &[(TypeRef, SharedType)] {
        &self.bindings
    }

    fn binding_refs(&self) -> Vec<TypeRef> {
        self.bindings.iter().map(|(r, _)| r.clone()).collect()
    }

    /// The inner type reference with `bindings` substituted.
    pub fn instantiate(&self, bindings: &[TypeRef]) -> Result<TypeRef, TypeError> {
        if bindings.len() < self.var_count as usize {
            return Err(TypeError::UnresolvedGenericVariable {
                index: u32::try_from(bindings.len()).unwrap_or(u32::MAX),
                depth: 0,
            });
        }
        instantiate(&self.inner_ref, bindings)
    }

    /// Type reference of this generic with every variable bound.
    pub fn bound_ref(&self, bindings: Vec<TypeRef>) -> TypeRef {
        builtins::generic_bound(self.inner_ref.clone(), self.var_count, bindings)
    }

    /// Resolve a binding; it must be a closed type.
    fn check_binding(ts: &TypeSystem, binding: &TypeRef) -> Result<SharedType, TypeError> {
        let ty = ts.resolve_strict(binding)?;
        if let Some(depth) = ty.free_depth() {
            return Err(TypeError::UnresolvedGenericVariable { index: 0, depth });
        }
        Ok(ty)
    }

    fn instance(&self, ts: &TypeSystem, bindings: &[TypeRef]) -> Result<SharedType, TypeError> {
        ts.resolve_strict(&self.instantiate(bindings)?)
    }

    /// Value for explicit bindings: default of the instantiated type.
    pub fn value_for(&self, ts: &TypeSystem, bindings: Vec<TypeRef>) -> Result<Value, TypeError> {
        for binding in &bindings {
            Self::check_binding(ts, binding)?;
        }
        let inner = self.instance(ts, &bindings)?.create_value(ts)?;
        Ok(Value::generic(bindings, inner))
    }

    pub(crate) fn create_value(&self, ts: &TypeSystem) -> Result<Value, TypeError> {
        if !self.is_bound() {
            return Err(TypeError::UnresolvedGenericVariable { index: 0, depth: 0 });
        }
        self.value_for(ts, self.binding_refs())
    }

    pub(crate) fn validate(&self, ts: &TypeSystem, name: &str, value: &Value) -> Result<(), TypeError> {
        let Some(generic) = value.as_generic() else {
            return Err(TypeError::invalid(
                name,
                format!("expected a generic value, found {}", value.type_name()),
            ));
        };
        if generic.bindings.len() != self.var_count as usize {
            return Err(TypeError::invalid(
                name,
                format!(
                    "expected {} bindings, found {}",
                    self.var_count,
                    generic.bindings.len()
                ),
            ));
        }
        for binding in &generic.bindings {
            Self::check_binding(ts, binding)?;
        }
        self.instance(ts, &generic.bindings)?
            .validate(ts, &generic.inner)
    }

    pub(crate) fn child(&self, value: &Value, index: usize) -> Option<Child> {
        if index != 0 {
            return None;
        }
        let generic = value.as_generic()?;
        Some(Child {
            value: generic.inner.clone(),
            step: PathStep::Index(0),
            type_ref: self.instantiate(&generic.bindings).ok()?,
        })
    }

    /// Rebind variable `index`. The inner value survives when it is still
    /// valid for the new instantiation; otherwise it is default-constructed.
    pub fn bind_variable(
        &self,
        ts: &TypeSystem,
        name: &str,
        value: &Value,
        index: u32,
        binding: TypeRef,
    ) -> Result<Value, TypeError> {
        if index >= self.var_count {
            return Err(TypeError::invalid(
                name,
                format!("no type variable {index} (have {})", self.var_count),
            ));
        }
        let Some(current) = value.as_generic() else {
            return Err(TypeError::invalid(name, "expected a generic value"));
        };
        Self::check_binding(ts, &binding)?;
        let mut bindings = current.bindings.clone();
        if let Some(slot) = bindings.get_mut(index as usize) {
            *slot = binding;
        }
        let instance = self.instance(ts, &bindings)?;
        let inner = if instance.is_valid_value(ts, &current.inner) {
            current.inner.clone()
        } else {
            instance.create_value(ts)?
        };
        Ok(Value::generic(bindings, inner))
    }

    pub(crate) fn format_value(&self, ts: &TypeSystem, value: &Value) -> Option<String> {
        let generic = value.as_generic()?;
        let instance = self.instance(ts, &generic.bindings).ok()?;
        Some(instance.format_value(ts, &generic.inner))
    }

    /// `me` is the shared handle of the type owning `self`.
    pub(crate) fn compare(&self, ts: &TypeSystem, me: &SharedType, other: &SharedType) -> SubtypeOrder {
        if self.is_bound() {
            return match self.instance(ts, &self.binding_refs()) {
                Ok(instance) => ts.compare_types(&instance, other),
                Err(_) => SubtypeOrder::IsUnrelated,
            };
        }
        let TypeKind::Generic(theirs) = other.kind() else {
            return SubtypeOrder::IsUnrelated;
        };
        if theirs.is_bound() {
            return match theirs.instance(ts, &theirs.binding_refs()) {
                Ok(instance) => ts.compare_types(me, &instance),
                Err(_) => SubtypeOrder::IsUnrelated,
            };
        }
        if self.var_count != theirs.var_count {
            return SubtypeOrder::IsUnrelated;
        }
        ts.compare_types(&self.inner, &theirs.inner)
    }
}

#[cfg(test)]
mod tests;

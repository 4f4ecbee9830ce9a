//! The type system: registry of primitives and constructors, resolution
//! of type references, and the subtype relation.
//!
//! Registration takes `&mut self` and happens at setup. Everything else
//! takes `&self` and is safe to call from many threads: the only shared
//! mutable state is the constructor cache and the subtype memo, both behind
//! `parking_lot` locks.

#![expect(
    clippy::disallowed_types,
    reason = "Arc is the implementation of SharedTypeSystem"
)]

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use arbor_ir::LongId;
use arbor_value::{ConstructedRef, TypeRef, Value};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::builtins::{self, PrimitiveDecl, PrimitiveInfo, BUILTIN_PRIMITIVES};
use crate::cache::{CacheEntry, ConstructorCache};
use crate::constructor::{ConstructorArgs, TypeConstructor};
use crate::kinds::FailureType;
use crate::subtype::compare_helper;
use crate::{FailurePolicy, SharedType, SubtypeOrder, Type, TypeError, TypeKind, TypeSystemConfig};

pub struct TypeSystem {
    config: TypeSystemConfig,
    primitives: FxHashMap<LongId, (PrimitiveInfo, SharedType)>,
    constructors: FxHashMap<LongId, Box<dyn TypeConstructor>>,
    cache: ConstructorCache,
    /// Subtype judgments keyed by type identity. Only types this system
    /// canonicalized are recorded; the cache keeps them alive as long as
    /// `self`, so their addresses are never reused.
    subtype_memo: RwLock<FxHashMap<(usize, usize), SubtypeOrder>>,
}

impl TypeSystem {
    /// An empty type system.
    pub fn new(config: TypeSystemConfig) -> Self {
        TypeSystem {
            config,
            primitives: FxHashMap::default(),
            constructors: FxHashMap::default(),
            cache: ConstructorCache::new(),
            subtype_memo: RwLock::new(FxHashMap::default()),
        }
    }

    /// The `core` primitives and constructors, default configuration.
    pub fn with_builtins() -> Self {
        Self::with_builtins_config(TypeSystemConfig::default())
    }

    pub fn with_builtins_config(config: TypeSystemConfig) -> Self {
        let mut ts = TypeSystem::new(config);
        for decl in &BUILTIN_PRIMITIVES {
            ts.define_primitive(decl.info(), (decl.kind)());
        }
        for ctor in builtins::builtin_constructors() {
            ts.constructors.insert(ctor.id(), ctor);
        }
        ts
    }

    pub fn config(&self) -> TypeSystemConfig {
        self.config
    }

    // Registration

    fn is_registered(&self, id: LongId) -> bool {
        self.primitives.contains_key(&id) || self.constructors.contains_key(&id)
    }

    fn define_primitive(&mut self, info: PrimitiveInfo, kind: TypeKind) {
        let ty = SharedType::new(Type::new(
            TypeRef::primitive(info.id),
            info.display_name.clone(),
            kind,
        ));
        self.primitives.insert(info.id, (info, ty));
    }

    /// Register a primitive type. Ids share one namespace with
    /// constructors.
    pub fn register_primitive(&mut self, info: PrimitiveInfo, kind: TypeKind) -> Result<(), TypeError> {
        if self.is_registered(info.id) {
            return Err(TypeError::DuplicateRegistration { id: info.id });
        }
        tracing::debug!(id = %info.id, version = info.version, "registered primitive");
        self.define_primitive(info, kind);
        self.cache.clear_failures();
        Ok(())
    }

    /// Register one row of a declarative primitive table.
    pub fn register_primitive_decl(&mut self, decl: &PrimitiveDecl) -> Result<(), TypeError> {
        self.register_primitive(decl.info(), (decl.kind)())
    }

    pub fn register_constructor(&mut self, ctor: Box<dyn TypeConstructor>) -> Result<(), TypeError> {
        let id = ctor.id();
        if self.is_registered(id) {
            return Err(TypeError::DuplicateRegistration { id });
        }
        tracing::debug!(%id, arity = %ctor.arity(), "registered type constructor");
        self.constructors.insert(id, ctor);
        self.cache.clear_failures();
        Ok(())
    }

    pub fn primitive_info(&self, id: LongId) -> Option<&PrimitiveInfo> {
        self.primitives.get(&id).map(|(info, _)| info)
    }

    pub fn constructor(&self, id: LongId) -> Option<&dyn TypeConstructor> {
        self.constructors.get(&id).map(AsRef::as_ref)
    }

    /// Every successfully constructed type currently cached.
    pub fn cached_types(&self) -> Vec<SharedType> {
        self.cache.built_types()
    }

    /// Number of cache entries, failure markers included.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    // Resolution

    /// Resolve a type reference, applying the configured failure policy.
    #[tracing::instrument(level = "trace", skip_all, fields(type_ref = %type_ref))]
    pub fn resolve(&self, type_ref: &TypeRef) -> Result<SharedType, TypeError> {
        match self.lookup(type_ref) {
            CacheEntry::Built(ty) => Ok(ty),
            CacheEntry::Failed { error, stand_in } => match self.config.failure_policy {
                FailurePolicy::Strict => Err(error),
                FailurePolicy::Substitute => {
                    tracing::warn!(type_ref = %type_ref, %error, "substituting failure type");
                    Ok(stand_in)
                }
            },
        }
    }

    /// Resolve a type reference, surfacing failures whatever the policy.
    pub fn resolve_strict(&self, type_ref: &TypeRef) -> Result<SharedType, TypeError> {
        match self.lookup(type_ref) {
            CacheEntry::Built(ty) => Ok(ty),
            CacheEntry::Failed { error, .. } => Err(error),
        }
    }

    /// Resolve `constructor<type_args; value_args>`.
    pub fn get_or_construct(
        &self,
        constructor: LongId,
        type_args: Vec<TypeRef>,
        value_args: Vec<Value>,
    ) -> Result<SharedType, TypeError> {
        self.resolve(&TypeRef::constructed(constructor, type_args, value_args))
    }

    /// Name of the resolved type, or a reconstruction from the reference
    /// itself when it does not resolve.
    pub fn display_name(&self, type_ref: &TypeRef) -> String {
        match self.resolve_strict(type_ref) {
            Ok(ty) => ty.name().to_owned(),
            Err(_) => type_ref.fallback_name(),
        }
    }

    /// Default value of the referenced type.
    pub fn create_value(&self, type_ref: &TypeRef) -> Result<Value, TypeError> {
        self.resolve_strict(type_ref)?.create_value(self)
    }

    fn lookup(&self, type_ref: &TypeRef) -> CacheEntry {
        match type_ref {
            TypeRef::Primitive(id) => match self.primitives.get(id) {
                Some((_, ty)) => CacheEntry::Built(ty.clone()),
                None => failed(
                    type_ref,
                    TypeError::UnresolvedType {
                        type_ref: type_ref.fallback_name(),
                        reason: "no such primitive".to_owned(),
                    },
                ),
            },
            TypeRef::Constructed(c) => self.construct_entry(type_ref, c),
        }
    }

    fn construct_entry(&self, type_ref: &TypeRef, c: &ConstructedRef) -> CacheEntry {
        if let Some(entry) = self.cache.get(type_ref) {
            return entry;
        }

        let Some(ctor) = self.constructors.get(&c.constructor) else {
            return self.cache.get_or_insert_with(type_ref, || {
                failed(
                    type_ref,
                    TypeError::UnresolvedType {
                        type_ref: type_ref.fallback_name(),
                        reason: format!("no such type constructor `{}`", c.constructor),
                    },
                )
            });
        };

        // Arguments resolve outside the lock; they may construct in turn.
        let mut types = Vec::with_capacity(c.type_args.len());
        let mut arg_error = None;
        for arg in &c.type_args {
            match self.resolve_strict(arg) {
                Ok(ty) => types.push(ty),
                Err(error) => {
                    arg_error = Some(TypeError::UnresolvedType {
                        type_ref: type_ref.fallback_name(),
                        reason: format!("argument `{arg}` failed: {error}"),
                    });
                    break;
                }
            }
        }

        self.cache.get_or_insert_with(type_ref, || {
            if let Some(error) = arg_error {
                return failed(type_ref, error);
            }
            match build(ctor.as_ref(), type_ref, c, &types) {
                Ok(ty) => CacheEntry::Built(ty),
                Err(error) => failed(type_ref, error),
            }
        })
    }

    // Subtyping

    /// Relation between two type references. Under the strict policy an
    /// unresolved reference is an error; under `Substitute` it compares
    /// as disjoint.
    pub fn compare_subtype(&self, a: &TypeRef, b: &TypeRef) -> Result<SubtypeOrder, TypeError> {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        Ok(self.compare_types(&a, &b))
    }

    /// `a` is a subtype of or equivalent to `b`.
    pub fn is_subtype(&self, a: &TypeRef, b: &TypeRef) -> Result<bool, TypeError> {
        Ok(self.compare_subtype(a, b)?.is_subtype())
    }

    pub fn is_supertype(&self, a: &TypeRef, b: &TypeRef) -> Result<bool, TypeError> {
        Ok(self.compare_subtype(a, b)?.is_supertype())
    }

    pub fn is_related_type(&self, a: &TypeRef, b: &TypeRef) -> Result<bool, TypeError> {
        Ok(self.compare_subtype(a, b)?.is_related())
    }

    /// Whether `ty` is the canonical instance this system hands out for its
    /// reference.
    fn owns(&self, ty: &SharedType) -> bool {
        let canonical = match ty.type_ref() {
            TypeRef::Primitive(id) => self.primitives.get(id).map(|(_, own)| own.clone()),
            TypeRef::Constructed(_) => match self.cache.get(ty.type_ref()) {
                Some(CacheEntry::Built(own)) => Some(own),
                _ => None,
            },
        };
        canonical.is_some_and(|own| SharedType::ptr_eq(&own, ty))
    }

    /// Number of memoized subtype judgments.
    pub fn memoized_judgments(&self) -> usize {
        self.subtype_memo.read().len()
    }

    /// Relation between two resolved types. Types may come from any type
    /// system; only this system's own types are memoized.
    pub fn compare_types(&self, a: &SharedType, b: &SharedType) -> SubtypeOrder {
        if a.is_failure() || b.is_failure() {
            return SubtypeOrder::IsDisjoint;
        }
        if SharedType::ptr_eq(a, b) {
            return SubtypeOrder::IsEquivalent;
        }
        let key = (a.addr(), b.addr());
        let memoize = self.config.memoize_subtyping && self.owns(a) && self.owns(b);
        if memoize {
            if let Some(&order) = self.subtype_memo.read().get(&key) {
                return order;
            }
        }

        let order = compare_helper(self, a, b)
            .or_else(|| compare_helper(self, b, a).map(SubtypeOrder::reverse))
            .unwrap_or(SubtypeOrder::IsUnrelated);
        tracing::trace!(a = a.name(), b = b.name(), %order, "compared types");

        if memoize {
            self.subtype_memo.write().insert(key, order);
        }
        order
    }
}

fn failed(type_ref: &TypeRef, error: TypeError) -> CacheEntry {
    let stand_in = SharedType::new(Type::new(
        type_ref.clone(),
        format!("<unresolved {}>", type_ref.fallback_name()),
        TypeKind::Failure(FailureType::new(error.clone())),
    ));
    CacheEntry::Failed { error, stand_in }
}

/// Run a constructor over resolved arguments.
fn build(
    ctor: &dyn TypeConstructor,
    type_ref: &TypeRef,
    c: &ConstructedRef,
    types: &[SharedType],
) -> Result<SharedType, TypeError> {
    let arity = ctor.arity();
    if !arity.accepts(types.len()) {
        return Err(TypeError::Arity {
            constructor: c.constructor,
            expected: arity,
            found: types.len(),
        });
    }
    let args = ConstructorArgs {
        constructor: c.constructor,
        type_refs: &c.type_args,
        types,
        values: &c.value_args,
    };
    ctor.check_args(&args)?;
    let kind = ctor.construct(&args)?;
    let name = ctor.display_name(&args);
    Ok(SharedType::new(Type::new(type_ref.clone(), name, kind)))
}

impl fmt::Debug for TypeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSystem")
            .field("config", &self.config)
            .field("primitives", &self.primitives.len())
            .field("constructors", &self.constructors.len())
            .field("cached", &self.cache.len())
            .finish()
    }
}

/// Thread-safe shared handle to a [`TypeSystem`].
///
/// Build and register first, then wrap: the handle only gives `&TypeSystem`.
#[derive(Clone, Debug)]
pub struct SharedTypeSystem(Arc<TypeSystem>);

impl SharedTypeSystem {
    pub fn new(ts: TypeSystem) -> Self {
        SharedTypeSystem(Arc::new(ts))
    }
}

impl Deref for SharedTypeSystem {
    type Target = TypeSystem;

    fn deref(&self) -> &TypeSystem {
        &self.0
    }
}

impl From<TypeSystem> for SharedTypeSystem {
    fn from(ts: TypeSystem) -> Self {
        SharedTypeSystem::new(ts)
    }
}

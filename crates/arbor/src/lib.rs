//! arbor: a structural type system over immutable, typed value trees.
//!
//! This crate gathers the public surface of the workspace:
//!
//! - [`arbor_ir`]: interned identifiers ([`ShortId`], [`MediumId`], [`LongId`]).
//! - [`arbor_value`]: [`Value`], [`ValueHolder`], [`TypeRef`] and [`Path`].
//! - [`arbor_types`]: [`TypeSystem`] resolution, constructors and subtyping.
//! - [`arbor_tree`]: [`ValueTree`], path navigation and copy-on-write edits.
//!
//! ```text
//! let ts = arbor::type_system_from_env()?;
//! let ty = ts.resolve(&refs::array(refs::int(), 0, 8, 2))?;
//! let mut tree = ValueTree::with_default(&ts, ty)?;
//! tree.set_value(&"[1]".parse()?, Value::Int(42))?;
//! ```

use std::sync::Once;

pub use arbor_ir::{IdError, LongId, MediumId, Name, ShortId};
pub use arbor_tree::{NodeView, TreeError, ValueTree, Walk};
pub use arbor_types::{
    core_id, core_ids, refs, Arity, Child, ConfigError, ConstructorArgs, FailurePolicy,
    NameTemplate, PrimitiveDecl, PrimitiveInfo, SharedType, SharedTypeSystem, SubtypeOrder, Type,
    TypeConstructor, TypeError, TypeFlags, TypeKind, TypeSystem, TypeSystemConfig,
    FAILURE_POLICY_ENV,
};
pub use arbor_value::{
    ConstructedRef, Fallback, MapEntry, MapError, MapSource, MapTarget, Path, PathParseError,
    PathStep, Rational, TypeRef, Value, ValueHolder,
};

/// A shareable type system with the builtin primitives and constructors,
/// configured from the environment (see [`FAILURE_POLICY_ENV`]).
pub fn type_system_from_env() -> Result<SharedTypeSystem, ConfigError> {
    let config = TypeSystemConfig::from_env()?;
    Ok(SharedTypeSystem::new(TypeSystem::with_builtins_config(config)))
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

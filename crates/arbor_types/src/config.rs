//! Type system configuration.

use std::str::FromStr;

/// Environment variable read by [`TypeSystemConfig::from_env`].
pub const FAILURE_POLICY_ENV: &str = "ARBOR_FAILURE_POLICY";

/// What `TypeSystem::resolve` returns for a type that cannot be built.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FailurePolicy {
    /// Surface the resolution error.
    #[default]
    Strict,
    /// Return an inert Failure type carrying the diagnostic, so documents
    /// with partially broken type references stay inspectable.
    Substitute,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown failure policy `{0}` (expected `strict` or `substitute`)")]
    UnknownFailurePolicy(String),
}

impl FromStr for FailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(FailurePolicy::Strict),
            "substitute" => Ok(FailurePolicy::Substitute),
            _ => Err(ConfigError::UnknownFailurePolicy(s.to_owned())),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TypeSystemConfig {
    pub failure_policy: FailurePolicy,
    /// Cache subtype judgments by type identity pair.
    pub memoize_subtyping: bool,
}

impl Default for TypeSystemConfig {
    fn default() -> Self {
        TypeSystemConfig {
            failure_policy: FailurePolicy::Strict,
            memoize_subtyping: true,
        }
    }
}

impl TypeSystemConfig {
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    #[must_use]
    pub fn with_subtype_memo(mut self, enabled: bool) -> Self {
        self.memoize_subtyping = enabled;
        self
    }

    /// Defaults, with the failure policy overridden by
    /// `ARBOR_FAILURE_POLICY` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = TypeSystemConfig::default();
        if let Some(raw) = lookup(FAILURE_POLICY_ENV) {
            config.failure_policy = raw.parse()?;
        }
        Ok(config)
    }
}

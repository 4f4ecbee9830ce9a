//! Scoped identifiers.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{registry, Name};

/// Identifier text rejected by a checked constructor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("identifier must not be empty")]
    Empty,
    #[error("identifier `{text}` contains reserved character `{found}`")]
    Reserved { text: String, found: char },
    #[error("long identifier `{0}` must have the form `namespace.name`")]
    MissingNamespace(String),
}

/// Characters with a meaning in textual paths and long identifiers.
const RESERVED: [char; 3] = ['.', '[', ']'];

fn check_text(text: &str) -> Result<(), IdError> {
    if text.is_empty() {
        return Err(IdError::Empty);
    }
    match text.chars().find(|c| RESERVED.contains(c)) {
        Some(found) => Err(IdError::Reserved {
            text: text.to_owned(),
            found,
        }),
        None => Ok(()),
    }
}

macro_rules! scoped_id {
    ($(#[$meta:meta])* $ty:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $ty(Name);

        impl $ty {
            /// Intern `text` without validating it.
            ///
            /// Use [`Self::try_new`] for text that did not come from code.
            pub fn new(text: &str) -> Self {
                $ty(registry().intern(text))
            }

            /// Intern `text`, rejecting empty text and reserved characters.
            pub fn try_new(text: &str) -> Result<Self, IdError> {
                check_text(text)?;
                Ok(Self::new(text))
            }

            /// The registered text.
            pub fn as_str(self) -> &'static str {
                registry().lookup(self.0)
            }

            /// The underlying interned handle.
            pub const fn name(self) -> Name {
                self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($ty), self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                Self::try_new(&text).map_err(de::Error::custom)
            }
        }
    };
}

scoped_id!(
    /// Local identifier: a record field, enumeration member or variant tag.
    ShortId
);

scoped_id!(
    /// Namespace identifier: the module or plugin that contributes types.
    MediumId
);

/// Globally unique identifier of a primitive type or type constructor.
///
/// Rendered and serialized as `namespace.local`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LongId {
    namespace: MediumId,
    local: ShortId,
}

impl LongId {
    pub fn new(namespace: MediumId, local: ShortId) -> Self {
        LongId { namespace, local }
    }

    /// Parse `namespace.local`, splitting at the first `.`.
    pub fn parse(text: &str) -> Result<Self, IdError> {
        let (namespace, local) = text
            .split_once('.')
            .ok_or_else(|| IdError::MissingNamespace(text.to_owned()))?;
        Ok(LongId {
            namespace: MediumId::try_new(namespace)?,
            local: ShortId::try_new(local)?,
        })
    }

    pub fn namespace(self) -> MediumId {
        self.namespace
    }

    pub fn local(self) -> ShortId {
        self.local
    }
}

impl fmt::Display for LongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.local)
    }
}

impl fmt::Debug for LongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LongId({self})")
    }
}

impl Serialize for LongId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LongId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        LongId::parse(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests;

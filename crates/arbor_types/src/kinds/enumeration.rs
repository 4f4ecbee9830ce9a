//! Enumerations over identifier literals.

use arbor_ir::ShortId;
use arbor_value::Value;

use crate::{SubtypeOrder, TypeError};

/// A finite set of identifiers, optionally with the blank marker.
///
/// The blank marker (`Value::Void`) always sorts after every member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumType {
    members: Vec<ShortId>,
    has_blank: bool,
}

impl EnumType {
    /// Duplicate members are dropped, keeping first occurrences.
    pub fn new(members: impl IntoIterator<Item = ShortId>, has_blank: bool) -> Self {
        let mut unique: Vec<ShortId> = Vec::new();
        for member in members {
            if !unique.contains(&member) {
                unique.push(member);
            }
        }
        EnumType {
            members: unique,
            has_blank,
        }
    }

    pub fn members(&self) -> &[ShortId] {
        &self.members
    }

    pub fn has_blank(&self) -> bool {
        self.has_blank
    }

    /// Every value in declaration order, blank last.
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.members
            .iter()
            .map(|m| Value::Ident(*m))
            .chain(self.has_blank.then_some(Value::Void))
    }

    pub fn contains(&self, value: &Value) -> bool {
        match value {
            Value::Ident(id) => self.members.contains(id),
            Value::Void => self.has_blank,
            _ => false,
        }
    }

    /// First member, or blank for a member-less enumeration.
    pub fn default_value(&self) -> Value {
        self.members.first().map_or(Value::Void, |m| Value::Ident(*m))
    }

    pub(crate) fn validate(&self, type_name: &str, value: &Value) -> Result<(), TypeError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(TypeError::invalid(type_name, format!("`{value}` is not a member")))
        }
    }

    fn includes(&self, other: &EnumType) -> bool {
        (!other.has_blank || self.has_blank)
            && other.members.iter().all(|m| self.members.contains(m))
    }

    pub fn compare(&self, other: &EnumType) -> SubtypeOrder {
        SubtypeOrder::from_inclusion(other.includes(self), self.includes(other))
    }
}

//! Map values: ordered rules closed by exactly one fallback.
//!
//! Invariant: the last entry is the fallback and no other entry is. Every
//! constructor and edit below keeps it, and deserialization re-checks it.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Value;

/// What an entry matches.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapSource {
    /// Exactly this value.
    Exact(Value),
    /// Any number in the closed interval.
    Range { min: Value, max: Value },
    /// Everything not matched earlier. Only the fallback uses it.
    Otherwise,
}

/// What a matching input maps to.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapTarget {
    Value(Value),
    /// The input itself.
    Identity,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct MapEntry {
    pub source: MapSource,
    pub target: MapTarget,
}

/// Fallback policy for unmatched inputs.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Fallback {
    /// Map everything else to one fixed value.
    Fixed(Value),
    /// Map everything else to itself.
    Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("only the final entry of a map may be a fallback")]
    FallbackMisplaced,
    #[error("map must end with exactly one fallback entry")]
    MissingFallback,
    #[error("the fallback entry cannot be removed")]
    CannotRemoveFallback,
    #[error("map entry position {pos} out of range (0..={max})")]
    PositionOutOfRange { pos: usize, max: usize },
}

impl MapEntry {
    pub fn exact(source: Value, target: Value) -> Self {
        MapEntry {
            source: MapSource::Exact(source),
            target: MapTarget::Value(target),
        }
    }

    pub fn range(min: Value, max: Value, target: MapTarget) -> Self {
        MapEntry {
            source: MapSource::Range { min, max },
            target,
        }
    }

    pub fn fallback(policy: Fallback) -> Self {
        MapEntry {
            source: MapSource::Otherwise,
            target: match policy {
                Fallback::Fixed(value) => MapTarget::Value(value),
                Fallback::Identity => MapTarget::Identity,
            },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, MapSource::Otherwise)
    }

    /// Whether this entry's source accepts `input`.
    pub fn matches(&self, input: &Value) -> bool {
        match &self.source {
            MapSource::Exact(v) => v == input,
            MapSource::Range { min, max } => {
                matches!(
                    min.numeric_cmp(input),
                    Some(Ordering::Less | Ordering::Equal)
                ) && matches!(
                    input.numeric_cmp(max),
                    Some(Ordering::Less | Ordering::Equal)
                )
            }
            MapSource::Otherwise => true,
        }
    }

    fn produce(&self, input: &Value) -> Value {
        match &self.target {
            MapTarget::Value(v) => v.clone(),
            MapTarget::Identity => input.clone(),
        }
    }
}

/// Ordered map rules terminated by a fallback.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<MapEntry>", into = "Vec<MapEntry>")]
pub struct MapValue {
    entries: Vec<MapEntry>,
}

impl MapValue {
    /// A map holding only the fallback.
    pub fn new(fallback: Fallback) -> Self {
        MapValue {
            entries: vec![MapEntry::fallback(fallback)],
        }
    }

    pub fn from_entries(entries: Vec<MapEntry>) -> Result<Self, MapError> {
        check_entries(&entries)?;
        Ok(MapValue { entries })
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    /// Entries before the fallback.
    pub fn rules(&self) -> &[MapEntry] {
        &self.entries[..self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: a map always holds its fallback.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fallback_entry(&self) -> &MapEntry {
        &self.entries[self.entries.len() - 1]
    }

    pub fn fallback(&self) -> Fallback {
        match &self.fallback_entry().target {
            MapTarget::Value(v) => Fallback::Fixed(v.clone()),
            MapTarget::Identity => Fallback::Identity,
        }
    }

    /// Insert a rule at `pos`; the fallback position is the last legal slot.
    pub fn insert(&mut self, pos: usize, entry: MapEntry) -> Result<(), MapError> {
        if entry.is_fallback() {
            return Err(MapError::FallbackMisplaced);
        }
        let max = self.entries.len() - 1;
        if pos > max {
            return Err(MapError::PositionOutOfRange { pos, max });
        }
        self.entries.insert(pos, entry);
        Ok(())
    }

    /// Remove the rule at `pos`.
    pub fn remove(&mut self, pos: usize) -> Result<MapEntry, MapError> {
        let last = self.entries.len() - 1;
        if pos == last {
            return Err(MapError::CannotRemoveFallback);
        }
        if pos > last {
            return Err(MapError::PositionOutOfRange { pos, max: last });
        }
        Ok(self.entries.remove(pos))
    }

    /// Replace the rule at `pos` with another rule.
    pub fn replace(&mut self, pos: usize, entry: MapEntry) -> Result<MapEntry, MapError> {
        if entry.is_fallback() {
            return Err(MapError::FallbackMisplaced);
        }
        let last = self.entries.len() - 1;
        if pos >= last {
            return Err(MapError::PositionOutOfRange {
                pos,
                max: last.saturating_sub(1),
            });
        }
        Ok(std::mem::replace(&mut self.entries[pos], entry))
    }

    pub fn set_fallback(&mut self, policy: Fallback) {
        let last = self.entries.len() - 1;
        self.entries[last] = MapEntry::fallback(policy);
    }

    /// Map `input` through the first matching entry.
    pub fn apply(&self, input: &Value) -> Value {
        self.entries
            .iter()
            .find(|entry| entry.matches(input))
            .unwrap_or_else(|| self.fallback_entry())
            .produce(input)
    }

    pub fn is_well_formed(&self) -> bool {
        check_entries(&self.entries).is_ok()
    }
}

fn check_entries(entries: &[MapEntry]) -> Result<(), MapError> {
    let Some((last, rules)) = entries.split_last() else {
        return Err(MapError::MissingFallback);
    };
    if rules.iter().any(MapEntry::is_fallback) {
        return Err(MapError::FallbackMisplaced);
    }
    if !last.is_fallback() {
        return Err(MapError::MissingFallback);
    }
    Ok(())
}

impl TryFrom<Vec<MapEntry>> for MapValue {
    type Error = MapError;

    fn try_from(entries: Vec<MapEntry>) -> Result<Self, Self::Error> {
        MapValue::from_entries(entries)
    }
}

impl From<MapValue> for Vec<MapEntry> {
    fn from(map: MapValue) -> Self {
        map.entries
    }
}

impl fmt::Display for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match &entry.source {
                MapSource::Exact(v) => write!(f, "{v}")?,
                MapSource::Range { min, max } => write!(f, "{min}..={max}")?,
                MapSource::Otherwise => f.write_str("_")?,
            }
            f.write_str(" -> ")?;
            match &entry.target {
                MapTarget::Value(v) => write!(f, "{v}")?,
                MapTarget::Identity => f.write_str("itself")?,
            }
        }
        f.write_str("}")
    }
}

//! Symbolic addresses into a value tree.
//!
//! A [`Path`] holds no pointer into the tree it addresses; it is resolved
//! step by step against whichever root it is used with.

use std::fmt;
use std::str::FromStr;

use arbor_ir::IdError;
use serde::{Deserialize, Serialize};

use crate::ShortId;

/// One step of a path.
///
/// Serialized untagged: a field as its identifier text, an index as a
/// decimal integer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathStep {
    Field(ShortId),
    Index(u32),
}

impl PathStep {
    pub fn field(text: &str) -> Self {
        PathStep::Field(ShortId::new(text))
    }

    pub fn as_field(self) -> Option<ShortId> {
        match self {
            PathStep::Field(id) => Some(id),
            PathStep::Index(_) => None,
        }
    }

    pub fn as_index(self) -> Option<u32> {
        match self {
            PathStep::Index(i) => Some(i),
            PathStep::Field(_) => None,
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Field(id) => write!(f, "{id}"),
            PathStep::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Ordered sequence of steps from a root.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<PathStep>);

impl Path {
    /// The empty path, addressing the root itself.
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn new(steps: Vec<PathStep>) -> Self {
        Path(steps)
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, step: PathStep) {
        self.0.push(step);
    }

    pub fn pop(&mut self) -> Option<PathStep> {
        self.0.pop()
    }

    /// This path extended by one step.
    #[must_use]
    pub fn child(&self, step: PathStep) -> Path {
        let mut steps = Vec::with_capacity(self.0.len() + 1);
        steps.extend_from_slice(&self.0);
        steps.push(step);
        Path(steps)
    }

    /// This path extended by another.
    #[must_use]
    pub fn join(&self, rest: &Path) -> Path {
        let mut steps = self.0.clone();
        steps.extend_from_slice(&rest.0);
        Path(steps)
    }

    pub fn parent(&self) -> Option<Path> {
        self.0
            .split_last()
            .map(|(_, init)| Path(init.to_vec()))
    }

    pub fn last(&self) -> Option<PathStep> {
        self.0.last().copied()
    }

    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathStep> {
        self.0.iter()
    }
}

impl From<Vec<PathStep>> for Path {
    fn from(steps: Vec<PathStep>) -> Self {
        Path(steps)
    }
}

impl FromIterator<PathStep> for Path {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathStep;
    type IntoIter = std::slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// `a.b[3].c`; the root renders as the empty string.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 && matches!(step, PathStep::Field(_)) {
                f.write_str(".")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// Malformed textual path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathParseError {
    #[error("unexpected `{found}` at byte {pos}")]
    Unexpected { pos: usize, found: char },
    #[error("unterminated index starting at byte {pos}")]
    UnterminatedIndex { pos: usize },
    #[error("invalid index `{text}`")]
    BadIndex { text: String },
    #[error("empty field name at byte {pos}")]
    EmptyField { pos: usize },
    #[error(transparent)]
    Ident(#[from] IdError),
}

impl FromStr for Path {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut steps = Vec::new();
        let mut pos = 0;
        // A field may start here without a leading dot.
        let mut field_allowed = true;

        while pos < s.len() {
            let rest = &s[pos..];
            if let Some(inner) = rest.strip_prefix('[') {
                let end = inner
                    .find(']')
                    .ok_or(PathParseError::UnterminatedIndex { pos })?;
                let digits = &inner[..end];
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(PathParseError::BadIndex {
                        text: digits.to_owned(),
                    });
                }
                let index = digits.parse::<u32>().map_err(|_| PathParseError::BadIndex {
                    text: digits.to_owned(),
                })?;
                steps.push(PathStep::Index(index));
                pos += end + 2;
                field_allowed = false;
                continue;
            }

            let start = if rest.starts_with('.') {
                if steps.is_empty() {
                    return Err(PathParseError::Unexpected { pos, found: '.' });
                }
                pos + 1
            } else if field_allowed {
                pos
            } else {
                let found = rest.chars().next().unwrap_or(' ');
                return Err(PathParseError::Unexpected { pos, found });
            };

            let tail = &s[start..];
            let len = tail.find(['.', '[', ']']).unwrap_or(tail.len());
            if len == 0 {
                return Err(PathParseError::EmptyField { pos: start });
            }
            steps.push(PathStep::Field(ShortId::try_new(&tail[..len])?));
            pos = start + len;
            field_allowed = false;
        }

        Ok(Path(steps))
    }
}

#[cfg(test)]
mod tests;

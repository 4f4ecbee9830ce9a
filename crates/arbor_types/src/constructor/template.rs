//! Name templates for constructed types.
//!
//! Placeholders:
//! - `{t0}`: name of the N-th type argument
//! - `{v0}`: text of the N-th value argument
//! - `{t*:SEP}` / `{v*:SEP}`: every type / value argument joined by `SEP`
//! - `{v0*:SEP}`: the items of array value argument N joined by `SEP`
//! - `{v0~t:SEP}`: items of array value argument N zipped with the type
//!   arguments as `item: Type`, joined by `SEP`
//! - `{{` and `}}`: literal braces
//!
//! An unrecognized placeholder renders literally, and a missing argument
//! renders as `?`, so a bad template degrades the name instead of failing.

use std::fmt::Write as _;

use super::ConstructorArgs;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Piece {
    Text(String),
    Type(usize),
    Value(usize),
    AllTypes(String),
    AllValues(String),
    Items(usize, String),
    Zip(usize, String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameTemplate {
    source: String,
    pieces: Vec<Piece>,
}

impl NameTemplate {
    pub fn new(source: &str) -> Self {
        NameTemplate {
            source: source.to_owned(),
            pieces: parse(source),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn render(&self, args: &ConstructorArgs<'_>) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Type(i) => match args.types.get(*i) {
                    Some(ty) => out.push_str(ty.name()),
                    None => out.push('?'),
                },
                Piece::Value(i) => match args.values.get(*i) {
                    Some(v) => {
                        let _ = write!(out, "{v}");
                    }
                    None => out.push('?'),
                },
                Piece::AllTypes(sep) => {
                    join(&mut out, sep, args.types.iter().map(|t| t.name().to_owned()));
                }
                Piece::AllValues(sep) => {
                    join(&mut out, sep, args.values.iter().map(ToString::to_string));
                }
                Piece::Items(i, sep) => match args.values.get(*i).and_then(|v| v.as_array()) {
                    Some(items) => join(&mut out, sep, items.iter().map(ToString::to_string)),
                    None => out.push('?'),
                },
                Piece::Zip(i, sep) => match args.values.get(*i).and_then(|v| v.as_array()) {
                    Some(items) => join(
                        &mut out,
                        sep,
                        items.iter().enumerate().map(|(k, item)| {
                            let ty = args.types.get(k).map_or("?", |t| t.name());
                            format!("{item}: {ty}")
                        }),
                    ),
                    None => out.push('?'),
                },
            }
        }
        out
    }
}

fn join(out: &mut String, sep: &str, items: impl Iterator<Item = String>) {
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(&item);
    }
}

fn parse(source: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut rest = source;

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("{{") {
            text.push('{');
            rest = after;
        } else if let Some(after) = rest.strip_prefix("}}") {
            text.push('}');
            rest = after;
        } else if c == '{' {
            let Some(end) = rest.find('}') else {
                text.push_str(rest);
                break;
            };
            let body = &rest[1..end];
            match placeholder(body) {
                Some(piece) => {
                    if !text.is_empty() {
                        pieces.push(Piece::Text(std::mem::take(&mut text)));
                    }
                    pieces.push(piece);
                }
                None => text.push_str(&rest[..=end]),
            }
            rest = &rest[end + 1..];
        } else {
            text.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    if !text.is_empty() {
        pieces.push(Piece::Text(text));
    }
    pieces
}

fn placeholder(body: &str) -> Option<Piece> {
    if let Some(sep) = body.strip_prefix("t*:") {
        return Some(Piece::AllTypes(sep.to_owned()));
    }
    if let Some(sep) = body.strip_prefix("v*:") {
        return Some(Piece::AllValues(sep.to_owned()));
    }
    if let Some(index) = body.strip_prefix('t') {
        return index.parse().ok().map(Piece::Type);
    }
    let rest = body.strip_prefix('v')?;
    let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let index: usize = rest[..digits].parse().ok()?;
    let tail = &rest[digits..];
    if tail.is_empty() {
        Some(Piece::Value(index))
    } else if let Some(sep) = tail.strip_prefix("*:") {
        Some(Piece::Items(index, sep.to_owned()))
    } else {
        tail.strip_prefix("~t:")
            .map(|sep| Piece::Zip(index, sep.to_owned()))
    }
}

#[cfg(test)]
mod tests;

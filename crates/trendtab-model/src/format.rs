//! Cell format strings.
//!
//! Formats use brace placeholders with an optional spec, e.g. `{:.4f}`,
//! `{:.2e}`, `{:d}`, `{:.1%}` or a bare `{}`. Literal braces are written as
//! `{{` and `}}`. A composite cell such as mean and standard deviation is
//! written with one placeholder per component: `{:.2f}±{:.3f}`.
//!
//! A column key may carry its format as a suffix after `___`, for example
//! `loss___{:.2f}`; [`split_column_key`] separates the two.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ModelError, Result};

/// Separator between a column name and its format suffix.
pub const FORMAT_SUFFIX_SEPARATOR: &str = "___";

/// Format used when a column has no explicit format.
pub const DEFAULT_FORMAT: &str = "{:.4f}";

/// How one placeholder renders a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spec {
    /// `{}`: shortest round-trip form.
    Plain,
    /// `{:.Nf}`
    Fixed(usize),
    /// `{:.Ne}`
    Exponent(usize),
    /// `{:.N%}`: value times 100 with a percent sign.
    Percent(usize),
    /// `{:d}`: rounded to an integer.
    Integer,
}

impl Spec {
    fn render(self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        match self {
            Spec::Plain => value.to_string(),
            Spec::Fixed(precision) => format!("{value:.precision$}"),
            Spec::Exponent(precision) => format!("{value:.precision$e}"),
            Spec::Percent(precision) => format!("{:.precision$}%", value * 100.0),
            Spec::Integer => format!("{}", value.round() as i64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Slot(Spec),
}

/// A parsed cell format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFormat {
    source: String,
    pieces: Vec<Piece>,
}

impl CellFormat {
    /// Parses a format string.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidFormat`] for unbalanced braces, unknown
    /// specs, or a format without any placeholder.
    pub fn parse(source: &str) -> Result<Self> {
        let invalid = |reason: &str| ModelError::InvalidFormat {
            format: source.to_string(),
            reason: reason.to_string(),
        };
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut body = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        body.push(inner);
                    }
                    if !closed {
                        return Err(invalid("unclosed '{'"));
                    }
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(Piece::Slot(parse_spec(&body).map_err(|reason| invalid(&reason))?));
                }
                '}' => return Err(invalid("unmatched '}'")),
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }
        if !pieces.iter().any(|piece| matches!(piece, Piece::Slot(_))) {
            return Err(invalid("no placeholder"));
        }
        Ok(Self {
            source: source.to_string(),
            pieces,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True for the built-in default format.
    pub fn is_default(&self) -> bool {
        self.source == DEFAULT_FORMAT
    }

    /// Number of placeholders.
    pub fn arity(&self) -> usize {
        self.slots().count()
    }

    fn slots(&self) -> impl Iterator<Item = Spec> + '_ {
        self.pieces.iter().filter_map(|piece| match piece {
            Piece::Slot(spec) => Some(*spec),
            Piece::Literal(_) => None,
        })
    }

    /// Renders numeric components through the format.
    ///
    /// When the number of components differs from the number of
    /// placeholders, every component is rendered with the first
    /// placeholder's spec and the parts are joined with `±`.
    pub fn render(&self, values: &[f64]) -> String {
        if values.len() == self.arity() {
            let mut out = String::new();
            let mut components = values.iter();
            for piece in &self.pieces {
                match piece {
                    Piece::Literal(text) => out.push_str(text),
                    Piece::Slot(spec) => {
                        if let Some(value) = components.next() {
                            out.push_str(&spec.render(*value));
                        }
                    }
                }
            }
            return out;
        }
        let spec = self.slots().next().unwrap_or(Spec::Plain);
        values
            .iter()
            .map(|value| spec.render(*value))
            .collect::<Vec<_>>()
            .join("±")
    }
}

impl Default for CellFormat {
    fn default() -> Self {
        Self {
            source: DEFAULT_FORMAT.to_string(),
            pieces: vec![Piece::Slot(Spec::Fixed(4))],
        }
    }
}

impl fmt::Display for CellFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for CellFormat {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for CellFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for CellFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::parse(&source).map_err(serde::de::Error::custom)
    }
}

fn parse_spec(body: &str) -> std::result::Result<Spec, String> {
    let spec = match body.strip_prefix(':') {
        Some(spec) => spec,
        None if body.is_empty() => return Ok(Spec::Plain),
        None => return Err(format!("positional or named placeholder '{{{body}}}'")),
    };
    if spec.is_empty() {
        return Ok(Spec::Plain);
    }
    if spec == "d" {
        return Ok(Spec::Integer);
    }
    let Some(rest) = spec.strip_prefix('.') else {
        return Err(format!("unsupported spec ':{spec}'"));
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(format!("missing precision in ':{spec}'"));
    }
    let precision: usize = digits
        .parse()
        .map_err(|_| format!("precision out of range in ':{spec}'"))?;
    match &rest[digits.len()..] {
        "" | "f" => Ok(Spec::Fixed(precision)),
        "e" => Ok(Spec::Exponent(precision)),
        "%" => Ok(Spec::Percent(precision)),
        other => Err(format!("unsupported type '{other}'")),
    }
}

/// Splits a column key into the column name and its optional format suffix.
///
/// # Errors
///
/// Fails when the separator appears more than once, when the name part is
/// empty, or when the suffix is not a valid format.
pub fn split_column_key(key: &str) -> Result<(&str, Option<CellFormat>)> {
    let mut parts = key.split(FORMAT_SUFFIX_SEPARATOR);
    let name = parts.next().unwrap_or_default();
    let suffix = parts.next();
    if parts.next().is_some() {
        return Err(ModelError::DuplicateFormatSuffix {
            key: key.to_string(),
        });
    }
    if name.is_empty() {
        return Err(ModelError::EmptyColumnName {
            key: key.to_string(),
        });
    }
    let format = suffix.map(CellFormat::parse).transpose()?;
    Ok((name, format))
}

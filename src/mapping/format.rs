//! Map format parsing.
//!
//! A map format such as `/srv/%0/public/htdocs` is decoded once, at
//! configuration load, into a sequence of literal and directive segments.
//! Requests only ever walk the decoded segments.

use std::fmt;
use thiserror::Error;

/// Errors raised while decoding a map format string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The format does not start with `/`.
    #[error("format string must be an absolute path, or 'none'")]
    NotAbsolute,

    /// A `%` is followed by something other than a recognised specifier.
    #[error("syntax error in format string at byte {offset}")]
    Syntax { offset: usize },
}

/// A label selector of the form `%-N+.-M+`.
///
/// Indices are 1-based. `n == 0` selects the whole hostname and `m == 0`
/// means no character sub-range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelRange {
    pub n: u8,
    pub n_is_suffix_count: bool,
    pub n_open_ended: bool,
    pub m: Option<u8>,
    pub m_is_suffix_count: bool,
    pub m_open_ended: bool,
}

impl LabelRange {
    /// Select label `n` counting from the left.
    pub fn label(n: u8) -> Self {
        Self {
            n,
            ..Self::default()
        }
    }

    /// Character index inside the selected label, `0` when absent.
    pub fn m_index(&self) -> u8 {
        self.m.unwrap_or(0)
    }
}

/// A decoded format directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `%%`
    PercentLiteral,
    /// `%p`
    Port,
    /// `%N.M` and friends.
    LabelRange(LabelRange),
}

/// One piece of a decoded map format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(Vec<u8>),
    Directive(Directive),
}

/// An immutable, pre-parsed map format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapFormat {
    source: String,
    segments: Vec<Segment>,
}

impl MapFormat {
    /// Decode a format string.
    pub fn parse(source: &str) -> Result<Self, FormatError> {
        if !source.starts_with('/') {
            return Err(FormatError::NotAbsolute);
        }

        let bytes = source.as_bytes();
        let mut segments = Vec::new();
        let mut literal = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            if bytes[pos] != b'%' {
                literal.push(bytes[pos]);
                pos += 1;
                continue;
            }

            let (directive, next) = parse_directive(bytes, pos + 1)?;
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Directive(directive));
            pos = next;
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The format as it was written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for MapFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Decode one directive starting just after its `%`.
/// Returns the directive and the offset of the first byte after it.
fn parse_directive(bytes: &[u8], mut pos: usize) -> Result<(Directive, usize), FormatError> {
    match bytes.get(pos) {
        Some(b'%') => return Ok((Directive::PercentLiteral, pos + 1)),
        Some(b'p') => return Ok((Directive::Port, pos + 1)),
        _ => {}
    }

    let mut range = LabelRange::default();

    let (n, suffix, open, next) = parse_index(bytes, pos)?;
    range.n = n;
    range.n_is_suffix_count = suffix;
    range.n_open_ended = open;
    pos = next;

    if bytes.get(pos) == Some(&b'.') {
        let (m, suffix, open, next) = parse_index(bytes, pos + 1)?;
        range.m = Some(m);
        range.m_is_suffix_count = suffix;
        range.m_open_ended = open;
        pos = next;
    }

    Ok((Directive::LabelRange(range), pos))
}

/// Decode `-? DIGIT +?`.
fn parse_index(bytes: &[u8], mut pos: usize) -> Result<(u8, bool, bool, usize), FormatError> {
    let suffix = bytes.get(pos) == Some(&b'-');
    if suffix {
        pos += 1;
    }

    let digit = match bytes.get(pos) {
        Some(b) if b.is_ascii_digit() => b - b'0',
        _ => return Err(FormatError::Syntax { offset: pos }),
    };
    pos += 1;

    let open = bytes.get(pos) == Some(&b'+');
    if open {
        pos += 1;
    }

    Ok((digit, suffix, open, pos))
}

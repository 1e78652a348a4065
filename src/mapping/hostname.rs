//! Hostname label indexing.
//!
//! # Responsibilities
//! - Split a hostname into `.`-delimited labels
//! - Resolve a `LabelRange` into a byte span of the hostname
//! - Emit a span lower-cased without touching the hostname
//!
//! # Design Decisions
//! - Indices are 1-based, counted from the left or (with `-`) from the right
//! - An index past the available labels or characters yields `_`, so a bad
//!   request maps to a stable, non-existent directory instead of failing
//! - Only the first `MAX_LABELS` labels are split; further dots stay inside
//!   the last label

use crate::mapping::format::LabelRange;

/// Maximum number of labels tracked per hostname.
pub const MAX_LABELS: usize = 19;

/// Emitted when a directive points past the end of the hostname.
pub const PLACEHOLDER: &[u8] = b"_";

/// A resolved slice of the hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// Byte range `[start, end)` of the hostname.
    Range { start: usize, end: usize },
    /// No such label or character.
    Placeholder,
}

/// Label boundaries of a single hostname.
#[derive(Debug, Clone)]
pub struct HostnameIndex<'a> {
    host: &'a [u8],
    /// `bounds[k]` is the offset of the first byte of label `k + 1`,
    /// plus a trailing entry one past the end of the hostname.
    bounds: Vec<usize>,
}

impl<'a> HostnameIndex<'a> {
    pub fn new(host: &'a str) -> Self {
        let host = host.as_bytes();
        let mut bounds = Vec::with_capacity(MAX_LABELS + 1);
        bounds.push(0);
        for (i, b) in host.iter().enumerate() {
            if *b == b'.' && bounds.len() < MAX_LABELS {
                bounds.push(i + 1);
            }
        }
        bounds.push(host.len() + 1);
        Self { host, bounds }
    }

    /// Number of labels.
    pub fn label_count(&self) -> usize {
        self.bounds.len() - 1
    }

    fn label_start(&self, label: usize) -> usize {
        self.bounds[label - 1]
    }

    fn label_end(&self, label: usize) -> usize {
        self.bounds[label] - 1
    }

    /// Resolve a directive into a span of the hostname.
    pub fn span(&self, range: &LabelRange) -> Span {
        let ndots = self.label_count();
        let n = range.n as usize;

        let (start, end) = if n == 0 {
            (0, self.host.len())
        } else if n > ndots {
            return Span::Placeholder;
        } else {
            let label = if range.n_is_suffix_count {
                ndots - n + 1
            } else {
                n
            };
            let start = self.label_start(label);
            let end = if range.n_open_ended {
                self.host.len()
            } else {
                self.label_end(label)
            };
            (start, end)
        };

        let m = range.m_index() as usize;
        if m == 0 {
            return Span::Range { start, end };
        }
        if m > end - start {
            return Span::Placeholder;
        }

        let first = if range.m_is_suffix_count {
            end - m
        } else {
            start + m - 1
        };
        let last = if range.m_open_ended { end } else { first + 1 };
        Span::Range {
            start: first,
            end: last,
        }
    }

    /// The raw bytes a span covers.
    pub fn bytes(&self, span: Span) -> &[u8] {
        match span {
            Span::Range { start, end } => &self.host[start..end],
            Span::Placeholder => PLACEHOLDER,
        }
    }
}

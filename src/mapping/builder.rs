//! Bounded-window path accumulation.

/// Default working window, matching Apache's `HUGE_STRING_LEN`.
pub const DEFAULT_WINDOW_CAPACITY: usize = 8192;

/// Append-only byte accumulator with a fixed working window.
///
/// Spans are appended to the window; when a span would not fit, the window
/// is committed to the output and cleared first. A span is never split
/// across a commit, so the result is identical to writing into a single
/// unbounded buffer.
#[derive(Debug)]
pub struct PathBuilder {
    window: Vec<u8>,
    capacity: usize,
    output: Vec<u8>,
    flushes: usize,
}

impl PathBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: Vec::with_capacity(capacity),
            capacity,
            output: Vec::new(),
            flushes: 0,
        }
    }

    /// Append a span verbatim.
    pub fn append(&mut self, span: &[u8]) {
        self.reserve(span.len());
        if span.len() > self.capacity {
            // Larger than the whole window: commit it directly.
            self.output.extend_from_slice(span);
        } else {
            self.window.extend_from_slice(span);
        }
    }

    /// Append a span with ASCII letters lower-cased.
    pub fn append_lowercase(&mut self, span: &[u8]) {
        self.reserve(span.len());
        let target = if span.len() > self.capacity {
            &mut self.output
        } else {
            &mut self.window
        };
        target.extend(span.iter().map(u8::to_ascii_lowercase));
    }

    /// Make room for `len` bytes, committing the window if needed.
    fn reserve(&mut self, len: usize) {
        if self.window.len() + len > self.capacity {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if self.window.is_empty() {
            return;
        }
        self.output.extend_from_slice(&self.window);
        self.window.clear();
        self.flushes += 1;
    }

    /// The most recently written byte.
    pub fn last_byte(&self) -> Option<u8> {
        self.window
            .last()
            .or_else(|| self.output.last())
            .copied()
    }

    /// Number of window commits so far.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty() && self.output.is_empty()
    }

    /// Commit the window and return everything written.
    pub fn finish(mut self) -> Vec<u8> {
        self.output.extend_from_slice(&self.window);
        self.output
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_WINDOW_CAPACITY)
    }
}

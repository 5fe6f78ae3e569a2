//! Rebuilds MediaWiki list and quote prefixes from whitespace indentation.
//!
//! # The High-Level Concept
//!
//! Wikitex nests content by indenting it, MediaWiki nests it by prefixing each
//! line with one marker per level: `*` for a list level, `:` for an indented
//! (quote) level. The engine keeps an [`IndentStack`] holding the markers it
//! believes are open and, for every plain-text line, works out the prefix that
//! reproduces the line's depth.
//!
//! The stack is never recomputed from scratch. Each line adjusts it a little:
//!
//! ```text
//! source              depth  prefix   stack after
//! line                0               ""
//! * item              0               "*"
//!     more            1      *:       "*"
//!     * sub item      1      *        "**"
//!             deep    3      **::     "**:"
//! ```
//!
//! # The Algorithm
//!
//! 1. **Blank lines** emit a single newline and request a fresh line.
//! 2. **Headings** (`=` in the first column) close every level.
//! 3. **Depth:** a tab counts one level, every full group of spaces one level.
//!    A line with no leading whitespace always starts a fresh output line.
//! 4. **Reconciliation** against the stack:
//!    - deeper than the stack: pad with `:` levels
//!    - depth 0: no prefix
//!    - otherwise: keep the first `depth` markers
//! 5. **List markers:** a line starting with `*` or `#` pushes a `*` level
//!    and turns on enumeration. Other lines adopt the reconciled prefix; while
//!    enumerating, they get an extra `:` so they continue the current item
//!    instead of opening a quote.
//!
//! Whether a prefix is actually written depends on the pending-newline flag,
//! which the driver owns and flushes.

use std::fmt;
use tracing::trace;

/// A single nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `*` list level
    Item,
    /// `:` indented level
    Quote,
}

impl Marker {
    pub fn as_char(self) -> char {
        match self {
            Marker::Item => '*',
            Marker::Quote => ':',
        }
    }
}

/// The open nesting levels, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndentStack {
    markers: String,
}

impl IndentStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        // markers are ASCII
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.markers
    }

    pub fn push(&mut self, marker: Marker) {
        self.markers.push(marker.as_char());
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    /// The first `depth` markers.
    fn truncated(&self, depth: usize) -> String {
        self.markers[..depth.min(self.len())].to_string()
    }

    /// The whole stack followed by `:` levels up to `depth`.
    fn padded(&self, depth: usize) -> String {
        let mut prefix = self.markers.clone();
        let missing = depth.saturating_sub(self.len());
        prefix.extend(std::iter::repeat(Marker::Quote.as_char()).take(missing));
        prefix
    }

    fn replace(&mut self, markers: String) {
        self.markers = markers;
    }
}

impl fmt::Display for IndentStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markers)
    }
}

/// What the driver should do with a plain-text line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout<'a> {
    /// Emit a single newline; nothing else happens for this line.
    Blank,
    /// Emit the heading line verbatim followed by a newline.
    Heading(&'a str),
    /// Emit `prefix` (if a fresh line is pending), then the transformed `body`.
    Content { prefix: String, body: &'a str },
}

/// List and quote nesting state carried from line to line.
#[derive(Debug, Clone, Default)]
pub struct Indentation {
    stack: IndentStack,
    enumerating: bool,
}

impl Indentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stack(&self) -> &IndentStack {
        &self.stack
    }

    /// Whether the current paragraph sits inside a list item.
    pub fn enumerating(&self) -> bool {
        self.enumerating
    }

    /// Resolve the structure of a plain-text line.
    ///
    /// `line` must already have its trailing whitespace removed. Sets
    /// `pending_newline` whenever the line has to start a fresh output line.
    pub fn layout<'a>(
        &mut self,
        line: &'a str,
        pending_newline: &mut bool,
        spaces_per_indent: usize,
    ) -> Layout<'a> {
        if line.is_empty() {
            *pending_newline = true;
            return Layout::Blank;
        }

        if line.starts_with('=') {
            self.stack.clear();
            self.enumerating = false;
            *pending_newline = true;
            return Layout::Heading(line);
        }

        let indent = leading_indent(line);
        let depth = if indent.is_empty() {
            // every unindented line opens a fresh output line
            *pending_newline = true;
            0
        } else {
            measure_depth(indent, spaces_per_indent)
        };
        let body = line.trim_start_matches(|c: char| c.is_ascii_whitespace());
        trace!(depth, stack = %self.stack, "measured indentation");

        let mut prefix = if depth > self.stack.len() {
            *pending_newline = true;
            self.stack.padded(depth)
        } else if depth == 0 {
            String::new()
        } else {
            // The reconciled prefix is never compared equal to the previous
            // depth, so a line inside the stack always starts a fresh line.
            *pending_newline = true;
            self.stack.truncated(depth)
        };

        if body.starts_with(|c: char| c == '*' || c == '#') {
            self.stack.push(Marker::Item);
            self.enumerating = true;
            *pending_newline = true;
        } else {
            self.stack.replace(prefix.clone());
            if prefix.is_empty() {
                self.enumerating = false;
            } else if self.enumerating {
                prefix.push(Marker::Quote.as_char());
            }
        }

        Layout::Content { prefix, body }
    }
}

/// The run of spaces and tabs that starts `line`.
fn leading_indent(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// Nesting depth of an indent run: one per tab, one per full group of spaces.
///
/// Mixed runs are counted independently, so `"\t  \t  "` is two tabs plus four
/// spaces.
pub fn measure_depth(indent: &str, spaces_per_indent: usize) -> usize {
    let tabs = indent.chars().filter(|&c| c == '\t').count();
    let spaces = indent.chars().filter(|&c| c == ' ').count();
    tabs + spaces.checked_div(spaces_per_indent).unwrap_or(0)
}

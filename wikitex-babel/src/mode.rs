//! Mode state machine
//!
//! Rewrites the math spans of a line. The active [`ConversionMode`] survives
//! line boundaries: a span that is not closed on the line it was opened on
//! keeps consuming the following lines until its closer shows up.
//!
//! A line is processed as a loop over its remaining slice. In each state the
//! slice is scanned for the one delimiter that state cares about; the text
//! before it is emitted, the matching tag is written, the mode flips and the
//! loop continues on whatever follows the delimiter.
//!
//!     state     looks for   on match
//!     normal    `$`         `[$$` opens a boxed span, `$$` an aligned one, `$` an inline one
//!     math      `$`         `</math>`, back to normal
//!     mathbox   `$$]`       `}</math>`, back to normal
//!     mulmath   `$$`        `\end{align}</math>` + line break, back to normal

use crate::options::{
    ConvertOptions, ALIGN_CLOSE, ALIGN_OPEN, BOX_CLOSE_TAG, MATH_CLOSE, MATH_OPEN,
};
use crate::scan::{self, BOX_CLOSE, DOLLAR, DOUBLE_DOLLAR};
use serde::Serialize;
use std::fmt;
use tracing::trace;

/// The syntactic context a line is read in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionMode {
    /// Plain outline text
    #[default]
    Normal,
    /// Inside a `$...$` span
    Math,
    /// Inside a `[$$...$$]` boxed span
    MathBox,
    /// Inside a `$$...$$` aligned span
    MulMath,
}

impl ConversionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionMode::Normal => "normal",
            ConversionMode::Math => "math",
            ConversionMode::MathBox => "mathbox",
            ConversionMode::MulMath => "mulmath",
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, ConversionMode::Normal)
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running a line through the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// The rewritten text
    pub text: String,
    /// Set when an aligned span was entered or continued; the next content
    /// must start on a fresh output line.
    pub force_newline: bool,
}

/// Rewrite the math spans of `line`, starting in (and updating) `mode`.
///
/// Never fails: a span left open at the end of the line stays open in `mode`.
pub fn transform(line: &str, mode: &mut ConversionMode, options: &ConvertOptions) -> Transformed {
    let mut text = String::with_capacity(line.len() + MATH_OPEN.len());
    let mut force_newline = false;
    let mut rest = line;

    loop {
        match *mode {
            ConversionMode::Normal => {
                let Some(index) = scan::find(rest, DOLLAR) else {
                    text.push_str(rest);
                    break;
                };
                if index > 0 && rest.as_bytes()[index - 1] == b'[' {
                    // `[$$`: the second `$` belongs to the opener
                    text.push_str(&rest[..index - 1]);
                    text.push_str(&options.box_open_tag());
                    rest = scan::skip_chars(&rest[index..], 2);
                    *mode = ConversionMode::MathBox;
                } else {
                    text.push_str(&rest[..index]);
                    text.push_str(MATH_OPEN);
                    rest = &rest[index + 1..];
                    if let Some(aligned) = rest.strip_prefix('$') {
                        text.push_str(ALIGN_OPEN);
                        rest = aligned;
                        *mode = ConversionMode::MulMath;
                    } else {
                        *mode = ConversionMode::Math;
                    }
                }
                trace!(mode = %mode, "opened span");
            }
            ConversionMode::Math => {
                if !close_span(&mut text, &mut rest, mode, DOLLAR, MATH_CLOSE) {
                    break;
                }
            }
            ConversionMode::MathBox => {
                if !close_span(&mut text, &mut rest, mode, BOX_CLOSE, BOX_CLOSE_TAG) {
                    break;
                }
            }
            ConversionMode::MulMath => {
                force_newline = true;
                if !close_span(&mut text, &mut rest, mode, DOUBLE_DOLLAR, ALIGN_CLOSE) {
                    break;
                }
            }
        }
    }

    Transformed {
        text,
        force_newline,
    }
}

/// Emit up to `closer` and return to normal mode, or emit the whole slice
/// and return `false` when the span runs past the end of the line.
fn close_span(
    text: &mut String,
    rest: &mut &str,
    mode: &mut ConversionMode,
    closer: &str,
    tag: &str,
) -> bool {
    let current = *rest;
    match scan::find(current, closer) {
        Some(index) => {
            text.push_str(&current[..index]);
            text.push_str(tag);
            *rest = &current[index + closer.len()..];
            trace!(mode = %mode, "closed span");
            *mode = ConversionMode::Normal;
            true
        }
        None => {
            text.push_str(current);
            *rest = "";
            false
        }
    }
}

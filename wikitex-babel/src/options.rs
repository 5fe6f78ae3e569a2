//! Conversion options and the emitted markup vocabulary
//!
//! The tags below are what MediaWiki's math extension understands. They are
//! reproduced byte for byte; only the box color and the indent width are
//! tunable, and both default to the values the wikitex dialect has always
//! used.

/// Opens any math span.
pub const MATH_OPEN: &str = "<math>";
/// Closes an inline span.
pub const MATH_CLOSE: &str = "</math>";
/// Closes a boxed span (the color group, then the math tag).
pub const BOX_CLOSE_TAG: &str = "}</math>";
/// Opens the alignment environment of a multi-line span.
pub const ALIGN_OPEN: &str = "\\begin{align}";
/// Closes a multi-line span. The trailing line break is part of the tag.
pub const ALIGN_CLOSE: &str = "\\end{align}</math>\n";
/// Explicit line break appended for a trailing `\\` outside of lists.
pub const LINE_BREAK: &str = "\n";

/// Knobs for a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Number of spaces that make up one nesting level. Tabs always count as one.
    pub spaces_per_indent: usize,
    /// Color used for boxed spans.
    pub box_color: String,
}

impl ConvertOptions {
    /// The tag opening a boxed span, e.g. `<math>{\color{BrickRed}`.
    pub fn box_open_tag(&self) -> String {
        format!("{MATH_OPEN}{{\\color{{{}}}", self.box_color)
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            spaces_per_indent: 4,
            box_color: "BrickRed".to_string(),
        }
    }
}

//! Delimiter scanning primitives
//!
//! Every mode transition in the converter is driven by locating the next
//! delimiter in the remaining slice of a line. The delimiters are pure ASCII,
//! so the byte offsets returned here are always valid char boundaries.

/// Opens an inline span; also closes one.
pub const DOLLAR: &str = "$";
/// Closes an aligned (multi-line) span.
pub const DOUBLE_DOLLAR: &str = "$$";
/// Closes a boxed span.
pub const BOX_CLOSE: &str = "$$]";

/// Returns the byte offset of the first occurrence of `delimiter` in `text`.
pub fn find(text: &str, delimiter: &str) -> Option<usize> {
    text.find(delimiter)
}

/// Returns `text` without its first `count` characters.
///
/// Clamps to the empty slice when the text is shorter than `count`.
pub fn skip_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((offset, _)) => &text[offset..],
        None => "",
    }
}

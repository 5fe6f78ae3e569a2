//! Line-by-line driver
//!
//! [`Converter`] owns all cross-line state (mode, nesting, the pending
//! newline and the line counter) and feeds every raw line first through the
//! indentation engine, when in normal mode, and then through the mode state
//! machine.

use crate::error::ConvertError;
use crate::indent::{IndentStack, Indentation, Layout};
use crate::mode::{self, ConversionMode};
use crate::options::{ConvertOptions, LINE_BREAK};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Trailing escape forcing a line break inside a paragraph.
const BREAK_ESCAPE: &str = "\\\\";

/// Outcome of a streamed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Number of source lines consumed
    pub lines: usize,
    /// The span left open at end of input, if any
    pub unterminated: Option<ConversionMode>,
}

/// Stateful wikitex to MediaWiki converter.
#[derive(Debug, Clone)]
pub struct Converter {
    options: ConvertOptions,
    mode: ConversionMode,
    indentation: Indentation,
    pending_newline: bool,
    line_number: usize,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Converter {
            options,
            mode: ConversionMode::Normal,
            indentation: Indentation::new(),
            pending_newline: true,
            line_number: 1,
        }
    }

    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    pub fn indent_stack(&self) -> &IndentStack {
        self.indentation.stack()
    }

    pub fn enumerating(&self) -> bool {
        self.indentation.enumerating()
    }

    pub fn pending_newline(&self) -> bool {
        self.pending_newline
    }

    /// Number of the next line to be converted (1-based).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Convert one source line and return the text to emit for it.
    ///
    /// The line terminator and any trailing ASCII whitespace or NUL are ignored.
    pub fn convert_line(&mut self, raw: &str) -> String {
        let line = raw.trim_end_matches(|c: char| c.is_ascii_whitespace() || c == '\0');
        debug!(
            line = self.line_number,
            mode = %self.mode,
            stack = %self.indentation.stack(),
            "{line}"
        );
        self.line_number += 1;

        let mut out = String::new();
        let body = if self.mode.is_normal() {
            let layout = self.indentation.layout(
                line,
                &mut self.pending_newline,
                self.options.spaces_per_indent,
            );
            match layout {
                Layout::Blank => return LINE_BREAK.to_string(),
                Layout::Heading(heading) => return format!("{heading}{LINE_BREAK}"),
                Layout::Content { prefix, body } => {
                    if self.pending_newline {
                        out.push_str(LINE_BREAK);
                        out.push_str(&prefix);
                        self.pending_newline = false;
                    }
                    body
                }
            }
        } else {
            line
        };

        let transformed = mode::transform(body, &mut self.mode, &self.options);
        if transformed.force_newline {
            self.pending_newline = true;
        }

        let mut text = transformed.text;
        if self.mode.is_normal() {
            if text.ends_with(BREAK_ESCAPE) {
                text.truncate(text.len() - BREAK_ESCAPE.len());
                self.pending_newline = true;
                if !self.indentation.enumerating() {
                    text.push_str(LINE_BREAK);
                }
            }
        }
        out.push_str(&text);
        out
    }

    /// Finish the run, reporting a span left open by the input.
    pub fn finish(self) -> ConvertSummary {
        let unterminated = (!self.mode.is_normal()).then_some(self.mode);
        if let Some(mode) = unterminated {
            warn!(%mode, "input ended inside an unterminated span");
        }
        ConvertSummary {
            lines: self.line_number - 1,
            unterminated,
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

/// Convert a whole document held in memory.
pub fn convert_str(source: &str, options: &ConvertOptions) -> String {
    let mut converter = Converter::new(options.clone());
    let mut output = String::with_capacity(source.len() + source.len() / 4);
    for line in source.lines() {
        output.push_str(&converter.convert_line(line));
    }
    converter.finish();
    output
}

/// Convert `reader` into `writer` one line at a time.
///
/// Only I/O failures are reported; the markup itself never fails to convert.
pub fn convert_stream<R, W>(
    reader: R,
    mut writer: W,
    options: &ConvertOptions,
) -> Result<ConvertSummary, ConvertError>
where
    R: BufRead,
    W: Write,
{
    let mut converter = Converter::new(options.clone());
    for line in reader.lines() {
        let number = converter.line_number();
        let line = line.map_err(|source| ConvertError::Read {
            line: number,
            source,
        })?;
        let fragment = converter.convert_line(&line);
        writer
            .write_all(fragment.as_bytes())
            .map_err(|source| ConvertError::Write {
                line: number,
                source,
            })?;
    }
    let summary = converter.finish();
    writer.flush().map_err(|source| ConvertError::Write {
        line: summary.lines,
        source,
    })?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(source: &str) -> String {
        convert_str(source, &ConvertOptions::default())
    }

    #[test]
    fn first_line_starts_on_fresh_line() {
        assert_eq!(convert("hello"), "\nhello");
    }

    #[test]
    fn inline_math_line() {
        assert_eq!(convert("$x$"), "\n<math>x</math>");
    }

    #[test]
    fn inline_math_across_lines() {
        assert_eq!(convert("$x\ny$"), "\n<math>xy</math>");
    }

    #[test]
    fn continuation_lines_keep_their_indentation() {
        // no indentation handling while inside a span
        assert_eq!(convert("$a\n    b$"), "\n<math>a    b</math>");
    }

    #[test]
    fn blank_line_emits_single_newline() {
        let mut converter = Converter::default();
        converter.convert_line("text");
        assert_eq!(converter.convert_line("   "), "\n");
        assert!(converter.pending_newline());
        assert_eq!(converter.convert_line("more"), "\nmore");
    }

    #[test]
    fn blank_line_inside_span_is_math_content() {
        let mut converter = Converter::default();
        converter.convert_line("$a");
        assert_eq!(converter.convert_line(""), "");
        assert_eq!(converter.mode(), ConversionMode::Math);
    }

    #[test]
    fn heading_is_emitted_verbatim() {
        assert_eq!(
            convert("== Intro ==\nbody"),
            "== Intro ==\n\nbody"
        );
    }

    #[test]
    fn aligned_span_forces_fresh_line_after_it() {
        assert_eq!(
            convert("$$a=b$$\nnext"),
            "\n<math>\\begin{align}a=b\\end{align}</math>\n\nnext"
        );
    }

    #[test]
    fn multi_line_aligned_span() {
        let source = "Then\n$$\na &= b \\\\\nc &= d\n$$\nso";
        let expected = "\nThen\n<math>\\begin{align}a &= b \\\\c &= d\\end{align}</math>\n\nso";
        assert_eq!(convert(source), expected);
    }

    #[test]
    fn consecutive_top_level_lines_stay_separate() {
        assert_eq!(convert("a\nb"), "\na\nb");
        assert_eq!(
            convert("first paragraph line\nsecond paragraph line"),
            "\nfirst paragraph line\nsecond paragraph line"
        );
    }

    #[test]
    fn over_indented_continuation_of_list_item() {
        assert_eq!(convert("* a\n        deep"), "\n* a\n*::deep");
    }

    #[test]
    fn only_ascii_whitespace_is_trimmed_from_line_end() {
        assert_eq!(convert("a\u{a0}\t \0"), "\na\u{a0}");
        let mut converter = Converter::default();
        converter.convert_line("text");
        assert_eq!(converter.convert_line("\u{a0}"), "\n\u{a0}");
    }

    #[test]
    fn trailing_escape_breaks_paragraph() {
        assert_eq!(convert("one\\\\\ntwo"), "\none\n\ntwo");
    }

    #[test]
    fn trailing_escape_inside_list_item_has_no_explicit_break() {
        let mut converter = Converter::default();
        assert_eq!(converter.convert_line("* one\\\\"), "\n* one");
        assert!(converter.pending_newline());
    }

    #[test]
    fn list_with_continuation() {
        assert_eq!(convert("* item\n    nested"), "\n* item\n*:nested");
    }

    #[test]
    fn line_counter_advances_for_every_line() {
        let mut converter = Converter::default();
        converter.convert_line("a");
        converter.convert_line("");
        converter.convert_line("= h =");
        assert_eq!(converter.line_number(), 4);
        assert_eq!(converter.finish().lines, 3);
    }

    #[test]
    fn finish_reports_unterminated_span() {
        let mut converter = Converter::default();
        converter.convert_line("[$$ open");
        let summary = converter.finish();
        assert_eq!(summary.unterminated, Some(ConversionMode::MathBox));
    }

    #[test]
    fn stream_matches_in_memory_conversion() {
        let source = "= Title =\n* a $x$\n    b\n\nc\\\\\n";
        let mut written = Vec::new();
        let summary =
            convert_stream(source.as_bytes(), &mut written, &ConvertOptions::default()).unwrap();
        assert_eq!(String::from_utf8(written).unwrap(), convert(source));
        assert_eq!(summary.lines, 5);
        assert_eq!(summary.unterminated, None);
    }

    #[test]
    fn conversion_is_deterministic() {
        let source = "* $a$\n\t[$$b$$]\n$$c\n$$\n";
        assert_eq!(convert(source), convert(source));
    }
}

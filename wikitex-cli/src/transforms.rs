//! Inspection transforms
//!
//! These show how the converter walks a document instead of the converted
//! document itself. Every row of a trace is one source line: the mode it was
//! read in, the mode it left behind, the nesting stack after it and the text
//! it emitted.
//!
//! - `trace-simple`: aligned plain-text table (default)
//! - `trace-json`: the same rows as JSON
//!
//! ## Extra Parameters
//!
//! - `show-linum`: "true"/"false" - prefix rows with the source line number
//!
//! Example: `towiki inspect notes.wikitex trace-json`

use serde::Serialize;
use std::collections::HashMap;
use wikitex_babel::{ConversionMode, ConvertOptions, Converter};

/// All available inspect transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["trace-simple", "trace-json"];

/// Transform used when none is named
pub const DEFAULT_TRANSFORM: &str = "trace-simple";

/// One converted source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceRow {
    pub line: usize,
    pub mode_before: ConversionMode,
    pub mode_after: ConversionMode,
    pub indent_stack: String,
    pub enumerating: bool,
    pub output: String,
}

/// Run the converter over `source`, recording a row per line.
pub fn trace(source: &str, options: &ConvertOptions) -> Vec<TraceRow> {
    let mut converter = Converter::new(options.clone());
    source
        .lines()
        .map(|line| {
            let number = converter.line_number();
            let mode_before = converter.mode();
            let output = converter.convert_line(line);
            TraceRow {
                line: number,
                mode_before,
                mode_after: converter.mode(),
                indent_stack: converter.indent_stack().to_string(),
                enumerating: converter.enumerating(),
                output,
            }
        })
        .collect()
}

/// Execute a named transform on a source file with optional extra parameters
///
/// # Returns
///
/// The transformed output as a string, or an error message
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    options: &ConvertOptions,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let show_linum = extra_params
        .get("show-linum")
        .map(|value| value != "false")
        .unwrap_or(true);

    let rows = trace(source, options);
    match transform_name {
        "trace-simple" => Ok(rows_to_simple(&rows, show_linum)),
        "trace-json" => serde_json::to_string_pretty(&rows)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        other => Err(format!("Unknown transform '{other}'")),
    }
}

fn rows_to_simple(rows: &[TraceRow], show_linum: bool) -> String {
    let mut out = String::new();
    for row in rows {
        if show_linum {
            out.push_str(&format!("{:3}: ", row.line));
        }
        let stack = if row.indent_stack.is_empty() {
            "-"
        } else {
            row.indent_stack.as_str()
        };
        out.push_str(&format!(
            "{:<7} -> {:<7} {:<6} {:?}\n",
            row.mode_before.as_str(),
            row.mode_after.as_str(),
            stack,
            row.output
        ));
    }
    out
}

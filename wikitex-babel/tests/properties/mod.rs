//! Property tests over generated input

use crate::common::convert;
use proptest::prelude::*;
use wikitex_babel::{ConversionMode, Converter};

proptest! {
    #[test]
    fn plain_lines_pass_through(line in "[A-Za-z0-9][A-Za-z0-9 .,;()]{0,40}") {
        let mut converter = Converter::default();
        let output = converter.convert_line(&line);
        prop_assert_eq!(output, format!("\n{}", line.trim_end()));
        prop_assert_eq!(converter.mode(), ConversionMode::Normal);
    }

    #[test]
    fn closed_inline_span_returns_to_normal(
        before in "[a-z ]{0,10}",
        body in "[a-z0-9+^_{}]{1,20}",
        after in "[a-z ]{0,10}",
    ) {
        let mut converter = Converter::default();
        let output = converter.convert_line(&format!("x{before}${body}${after}"));
        let expected_span = format!("<math>{}</math>", body);
        prop_assert!(output.contains(&expected_span));
        prop_assert_eq!(converter.mode(), ConversionMode::Normal);
    }

    #[test]
    fn conversion_is_deterministic(source in r"[ \t$\[\]*#=\\a-z\n]{0,200}") {
        prop_assert_eq!(convert(&source), convert(&source));
    }
}

//! Whole-document conversions checked against expected MediaWiki output

use crate::common::{convert, fixture_path, load_fixture};
use insta::assert_debug_snapshot;
use std::fs::File;
use std::io::BufReader;
use wikitex_babel::{convert_stream, ConversionMode, ConvertOptions, Converter};

fn assert_fixture(stem: &str) {
    let source = load_fixture(&format!("{stem}.wikitex"));
    let expected = load_fixture(&format!("{stem}.wiki"));
    assert_eq!(convert(&source), expected, "fixture {stem}");
}

#[test]
fn test_outline_document() {
    assert_fixture("outline");
}

#[test]
fn test_quote_levels_from_tabs_and_spaces() {
    assert_fixture("quotes");
}

#[test]
fn test_streamed_fixture_matches_expected_output() {
    let file = File::open(fixture_path("outline.wikitex")).unwrap();
    let mut written = Vec::new();
    let summary =
        convert_stream(BufReader::new(file), &mut written, &ConvertOptions::default()).unwrap();

    assert_eq!(String::from_utf8(written).unwrap(), load_fixture("outline.wiki"));
    assert_eq!(summary.lines, 13);
    assert_eq!(summary.unterminated, None);
}

#[test]
fn test_aligned_span_snapshot() {
    assert_debug_snapshot!(convert("$$a=b$$"), @r#""\n<math>\\begin{align}a=b\\end{align}</math>\n""#);
}

#[test]
fn test_boxed_span_snapshot() {
    assert_debug_snapshot!(convert("[$$boxed$$]"), @r#""\n<math>{\\color{BrickRed}boxed}</math>""#);
}

#[test]
fn test_custom_box_color_and_indent_width() {
    let options = ConvertOptions {
        spaces_per_indent: 2,
        box_color: "Blue".to_string(),
    };
    let output = wikitex_babel::convert_str("* a\n  [$$x$$]", &options);
    assert_eq!(output, "\n* a\n*:<math>{\\color{Blue}x}</math>");
}

#[test]
fn test_unterminated_span_swallows_rest_of_document() {
    let source = "before $x\n\n= Not a heading =\n* not an item";
    assert_eq!(
        convert(source),
        "\nbefore <math>x= Not a heading =* not an item"
    );

    let mut converter = Converter::default();
    for line in source.lines() {
        converter.convert_line(line);
    }
    assert_eq!(converter.finish().unterminated, Some(ConversionMode::Math));
}

#[test]
fn test_crlf_line_endings_are_stripped() {
    assert_eq!(convert("a $x$\r\n* b\r\n"), convert("a $x$\n* b\n"));
}

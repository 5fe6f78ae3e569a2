//! Conversion of wikitex documents into MediaWiki markup
//!
//!     Wikitex is a lightweight outline dialect: paragraphs and lists are nested by indentation,
//!     and mathematics is written inline with `$...$`, boxed with `[$$...$$]` or as aligned
//!     equations with `$$...$$`. This crate turns it into markup a MediaWiki renderer with the
//!     math extension understands.
//!
//!     This is a pure lib, that is, it powers the towiki cli but is shell agnostic: no code
//!     here prints, reads env vars or opens files. Callers hand in lines (or any `BufRead`) and
//!     get text back.
//!
//! Architecture
//!
//!     The conversion is a single pass over the source lines. Two small engines cooperate on
//!     every line, and the driver owns the state that crosses line boundaries:
//!
//!     .
//!     ├── error.rs        # ConvertError (I/O only, markup never fails)
//!     ├── options.rs      # ConvertOptions and the emitted tag vocabulary
//!     ├── scan.rs         # Delimiter scanning
//!     ├── mode.rs         # Mode state machine: math span rewriting
//!     ├── indent.rs       # Indentation engine: list/quote prefixes
//!     └── convert.rs      # Converter: per-line driver, in-memory and streamed entry points
//!
//!     For a line read in normal mode, the indentation engine runs first. It decides whether the
//!     line is blank, a heading, or content, and which `*`/`:` prefix opens it. The remaining
//!     text then goes through the mode state machine, which rewrites math spans and may leave a
//!     span open for the following lines. While a span is open, lines skip the indentation engine
//!     entirely and are read as math.
//!
//! Limitations
//!
//!     This is not a parser. There is no tree, no validation, and no nesting of math inside
//!     math. An unterminated span consumes the rest of the document as math; the driver only
//!     reports it (see [`ConvertSummary::unterminated`]).
//!
//!     The conversion is one way: converting the output again does not give back the input.

pub mod convert;
pub mod error;
pub mod indent;
pub mod mode;
pub mod options;
pub mod scan;

pub use convert::{convert_str, convert_stream, ConvertSummary, Converter};
pub use error::ConvertError;
pub use indent::{IndentStack, Indentation, Layout, Marker};
pub use mode::{transform, ConversionMode, Transformed};
pub use options::ConvertOptions;

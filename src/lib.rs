//! OpenDDL parser and exporter.
//!
//! This crate parses the OpenDDL (Open Data Description Language) textual
//! interchange format into an in-memory tree of typed, named, hierarchically
//! nested structures, and serializes such a tree back to OpenDDL text.
//!
//! # Example
//! ```
//! use oddl::parser::Parser;
//! use oddl::export::Exporter;
//!
//! let mut parser = Parser::with_buffer(
//!     br#"Metric (key = "distance") { float { 1.0 } }"#.to_vec(),
//!     true,
//! );
//! assert!(parser.parse());
//! let text = Exporter::new().export(parser.tree());
//! assert!(text.starts_with("Metric"));
//! ```

/// Buffer normalization: blanking comments and whitespace before parsing.
pub mod buffer;
/// The exporter: walks a [`model::Tree`] back out to OpenDDL text.
pub mod export;
/// Diagnostic severities and the pluggable log sink.
pub mod log;
/// The OpenDDL data model: primitives, names, references, properties, tree.
pub mod model;
/// The lexer and grammar-driving parser core.
pub mod parser;

pub use export::Exporter;
pub use log::Severity;
pub use parser::{ErrorKind, Parser, ParserConfig, ParsingError};

//! The OpenDDL parser: cursor, lexical primitives, error types, and the
//! grammar-driving core.

pub mod core;
pub mod cursor;
pub mod error;
pub mod lexer;

pub use core::{Parser, ParserConfig};
pub use error::{ErrorKind, ParsingError};

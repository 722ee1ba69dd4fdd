//! Structural analyzer: sanitized LaTeX to a [`StructuralNode`] tree.
//!
//! Uses a hybrid approach like most of our parsers: a nom tokenizer followed
//! by a depth-bounded recursive descent.
//!
//! [`StructuralNode`]: mspeak_ast::StructuralNode

pub mod commands;
pub mod error;
pub mod parser;
pub mod token;

pub use commands::{is_text_command, shape, CommandShape};
pub use error::ParseError;
pub use parser::{parse, ParseOptions, ParsedExpression};
pub use token::{tokenize, Token};

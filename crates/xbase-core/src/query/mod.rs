//! Query engine module
//!
//! LIST option parsing, filter expressions and LIST execution.

/// Abstract Syntax Tree types
#[allow(missing_docs)]
pub mod ast;
/// LIST executor
#[allow(missing_docs)]
pub mod engine;
/// Filter evaluation
#[allow(missing_docs)]
pub mod filter;
/// Filter lexer
#[allow(missing_docs)]
pub mod lexer;
/// LIST options
pub mod options;
/// Filter parser
#[allow(missing_docs)]
pub mod parser;

// Re-export main types
pub use ast::*;
pub use engine::{Column, ListOutput, ListedRow, Listing, Structure};
pub use filter::{evaluate, Bindings, EvalError, Filter, RecordBindings, Value};
pub use lexer::{Lexer, LexerError, Token};
pub use options::ListOptions;
pub use parser::{ParseError, Parser};

//! Sandboxed placeholder expressions
//!
//! Expressions are tiny: parameter references, numeric and string literals,
//! parentheses and the four arithmetic operators. Every operator is numeric,
//! so string operands must coerce to numbers or evaluation fails.

mod eval;
mod lexer;
mod parser;

use thiserror::Error;

pub use eval::evaluate;
pub use lexer::{is_identifier, Lexer, Spanned, Token};
pub use parser::{BinaryOp, Expr, Parser, MAX_DEPTH};

/// Expression parsing and evaluation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("Malformed expression at position {position}: {message}")]
    Malformed { position: usize, message: String },

    #[error("Undefined parameter: {}", .0.join(", "))]
    UnresolvedReference(Vec<String>),

    #[error("Operator '{operator}' cannot be applied to {value:?}")]
    TypeMismatch { operator: char, value: String },

    #[error("Arithmetic error: {0}")]
    Arithmetic(String),
}

// arith: integer arithmetic expression evaluator
//
// Lexer -> recursive-descent parser -> tree-walking evaluator, plus an AST
// printer for diagnostics. The REPL and CLI in this crate only drive these
// stages with input strings.

// Public modules
pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod repl;
pub mod runner;
pub mod value;

// Re-export commonly used items
pub use ast::{BinaryOp, Expr};
pub use error::{CalcError, ErrorKind, Span};
pub use evaluator::Evaluator;
pub use lexer::{Lexer, Token, TokenType};
pub use parser::Parser;
pub use printer::print_ast;
pub use value::Value;

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{evaluate, run};

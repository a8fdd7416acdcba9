use crate::ast::Expr;
use crate::error::CalcError;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::printer::print_ast;
use crate::value::Value;

/// Expressions evaluated by `--samples` and the REPL `test` command.
pub const SAMPLES: &[&str] = &[
    "2 + 3",
    "5 - 1",
    "4 * 3",
    "10 / 2",
    "2 + 3 * 4",
    "(2 + 3) * 4",
    "2 * (3 + 4)",
    "10 - 2 * 3",
    "(10 - 2) * 3",
    "14 / 2 + 3",
    "14 / (2 + 3)",
    "1 + 2 * 3 - 4 / 2",
];

/// Lexes, parses and evaluates `source` with a fresh pipeline.
pub fn evaluate(source: &str) -> Result<Value, CalcError> {
    let lexer = Lexer::new(source.to_string());
    let parser = Parser::new(lexer)?;
    Evaluator::new(parser).interpret()
}

/// Parses `source` into a tree without evaluating it.
pub fn parse(source: &str) -> Result<Expr, CalcError> {
    let lexer = Lexer::new(source.to_string());
    Parser::new(lexer)?.parse()
}

/// Evaluates `source` and prints the value, or reports the error.
/// Returns whether evaluation succeeded.
pub fn run(source: &str, filename: Option<&str>) -> bool {
    match evaluate(source) {
        Ok(value) => {
            println!("{}", value);
            true
        }
        Err(error) => {
            error.report(source, filename);
            false
        }
    }
}

pub fn show_ast(source: &str, filename: Option<&str>) -> bool {
    match parse(source) {
        Ok(tree) => {
            print!("{}", print_ast(&tree));
            true
        }
        Err(error) => {
            error.report(source, filename);
            false
        }
    }
}

pub fn show_tokens(source: &str, filename: Option<&str>) -> bool {
    for token in Lexer::new(source.to_string()) {
        match token {
            Ok(token) => println!("{}", token),
            Err(error) => {
                error.report(source, filename);
                return false;
            }
        }
    }
    true
}

/// Evaluates every sample, one `<expr> = <result>` line each.
pub fn run_samples() {
    println!("{}", "=".repeat(50));
    println!("Sample expressions");
    println!("{}", "=".repeat(50));

    for expression in SAMPLES {
        println!("{}", sample_line(expression));
    }
}

pub fn sample_line(expression: &str) -> String {
    match evaluate(expression) {
        Ok(value) => format!("{:20} = {}", expression, value),
        Err(error) => format!("{:20} = error: {}", expression, error),
    }
}

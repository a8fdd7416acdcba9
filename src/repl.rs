use crate::runner;
use std::io::{self, Write};

/// Interactive loop. Every line gets its own lexer, parser and evaluator,
/// so an error never leaks state into the next command.

pub fn start() {
    println!("arith {}", env!("CARGO_PKG_VERSION"));
    println!("Supports +, -, *, / and parentheses");
    println!("Type 'exit' to quit, 'test' for sample expressions, 'ast <expr>' to show a tree");
    println!();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF reached (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
                    println!("Goodbye!");
                    break;
                }

                run_repl_command(line);
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }
}

fn run_repl_command(line: &str) {
    if line.eq_ignore_ascii_case("test") {
        runner::run_samples();
        return;
    }

    if let Some(source) = ast_command(line) {
        runner::show_ast(source, None);
        return;
    }

    runner::run(line, None);
}

/// `ast <expr>` → `Some("<expr>")`.
fn ast_command(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("ast")?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

use arith::{repl, runner};
use clap::{Arg, ArgAction, Command};
use std::process;

fn main() {
    let matches = Command::new("arith")
        .about("Evaluates integer arithmetic expressions with + - * / and parentheses")
        .arg(
            Arg::new("expression")
                .help("The expression to evaluate, e.g. \"(2 + 3) * 4\"")
                .value_name("EXPR")
                .index(1),
        )
        .arg(
            Arg::new("ast")
                .long("ast")
                .help("Print the syntax tree instead of evaluating")
                .requires("expression")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Print the token stream instead of evaluating")
                .requires("expression")
                .conflicts_with("ast")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("samples")
                .long("samples")
                .help("Evaluate the built-in sample expressions")
                .conflicts_with("expression")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("samples") {
        runner::run_samples();
        return;
    }

    let source = match matches.get_one::<String>("expression") {
        Some(source) if !matches.get_flag("interactive") => source,
        _ => {
            repl::start();
            return;
        }
    };

    let ok = if matches.get_flag("ast") {
        runner::show_ast(source, Some("<expr>"))
    } else if matches.get_flag("tokens") {
        runner::show_tokens(source, Some("<expr>"))
    } else {
        runner::run(source, Some("<expr>"))
    };

    if !ok {
        process::exit(1);
    }
}

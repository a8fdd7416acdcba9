use crate::ast::Expr;
use std::fmt;

const INDENT: &str = "  ";

/// Renders `expr` as indented diagnostic text, one line per entry.
pub fn print_ast(expr: &Expr) -> String {
    AstDisplay(expr).to_string()
}

/// `Display` adapter over a borrowed tree; spans are not rendered.
pub struct AstDisplay<'a>(pub &'a Expr);

impl fmt::Display for AstDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_node(f, self.0, 0)
    }
}

fn write_node(f: &mut fmt::Formatter, expr: &Expr, level: usize) -> fmt::Result {
    let indent = INDENT.repeat(level);
    match expr {
        Expr::Number { value, .. } => writeln!(f, "{}Num({})", indent, value),
        Expr::Binary {
            left,
            operator,
            right,
            ..
        } => {
            writeln!(f, "{}BinOp:", indent)?;
            writeln!(f, "{}{}left:", indent, INDENT)?;
            write_node(f, left, level + 2)?;
            writeln!(f, "{}{}op: {}", indent, INDENT, operator)?;
            writeln!(f, "{}{}right:", indent, INDENT)?;
            write_node(f, right, level + 2)
        }
    }
}

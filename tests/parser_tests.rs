use arith::parser::MAX_DEPTH;
use arith::{print_ast, BinaryOp, ErrorKind, Expr, Lexer, Parser, TokenType};

fn parse(src: &str) -> Expr {
    Parser::new(Lexer::new(src.to_string()))
        .unwrap()
        .parse()
        .unwrap()
}

/// Shape of a tree with spans erased, e.g. `((1 - 2) - 3)`.
fn shape(expr: &Expr) -> String {
    match expr {
        Expr::Number { value, .. } => value.to_string(),
        Expr::Binary {
            left,
            operator,
            right,
            ..
        } => format!("({} {} {})", shape(left), operator.symbol(), shape(right)),
    }
}

#[test]
fn single_number() {
    assert_eq!(shape(&parse("42")), "42");
}

#[test]
fn multiplication_binds_tighter() {
    assert_eq!(shape(&parse("1 + 2 * 3")), "(1 + (2 * 3))");
    assert_eq!(shape(&parse("1 * 2 + 3")), "((1 * 2) + 3)");
    assert_eq!(shape(&parse("1 - 4 / 2")), "(1 - (4 / 2))");
}

#[test]
fn same_precedence_folds_left() {
    assert_eq!(shape(&parse("1 - 2 - 3")), "((1 - 2) - 3)");
    assert_eq!(shape(&parse("8 / 4 / 2")), "((8 / 4) / 2)");
    assert_eq!(shape(&parse("1 + 2 - 3 + 4")), "(((1 + 2) - 3) + 4)");
}

#[test]
fn parentheses_override_precedence() {
    assert_eq!(shape(&parse("(1 + 2) * 3")), "((1 + 2) * 3)");
    assert_eq!(shape(&parse("1 - (2 - 3)")), "(1 - (2 - 3))");
    assert_eq!(shape(&parse("((7))")), "7");
}

#[test]
fn operator_tags() {
    match parse("6 / 3") {
        Expr::Binary { operator, .. } => assert_eq!(operator, BinaryOp::Divide),
        other => panic!("expected binary node, got {:?}", other),
    }
}

#[test]
fn group_span_covers_parens() {
    let tree = parse("(2 + 3) * 4");
    match tree {
        Expr::Binary { left, span, .. } => {
            assert_eq!((left.span().start, left.span().end), (0, 7));
            assert_eq!((span.start, span.end), (0, 11));
        }
        other => panic!("expected binary node, got {:?}", other),
    }
}

#[test]
fn lenient_expression_leaves_trailing_tokens() {
    let mut parser = Parser::new(Lexer::new("2 + 3)".to_string())).unwrap();
    let tree = parser.expression().unwrap();
    assert_eq!(shape(&tree), "(2 + 3)");
}

#[test]
fn strict_parse_rejects_trailing_tokens() {
    let mut parser = Parser::new(Lexer::new("2 + 3)".to_string())).unwrap();
    let err = parser.parse().unwrap_err();
    assert_eq!(err.kind, ErrorKind::ParseError);
    assert_eq!(err.message, "Unexpected ')' after expression");
    assert!(err.help.is_some());
}

#[test]
fn constructor_reports_first_token_errors() {
    let err = Parser::new(Lexer::new("?".to_string())).err().unwrap();
    assert_eq!(err.kind, ErrorKind::LexError);
}

#[test]
fn parse_error_messages() {
    let cases = [
        ("", "Unexpected end of input"),
        ("1 +", "Expected expression after '+'"),
        ("(1", "Expected ')' after expression"),
        ("()", "Empty parentheses are not allowed"),
        ("* 2", "Expected expression, found '*'"),
        ("4 / )", "Expected expression after '/'"),
    ];

    for (src, expected) in cases {
        let err = Parser::new(Lexer::new(src.to_string()))
            .unwrap()
            .parse()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ParseError, "input {:?}", src);
        assert_eq!(err.message, expected, "input {:?}", src);
    }
}

#[test]
fn print_leaf() {
    assert_eq!(print_ast(&parse("7")), "Num(7)\n");
}

#[test]
fn print_nested_tree() {
    let expected = "\
BinOp:
  left:
    BinOp:
      left:
        Num(2)
      op: Add
      right:
        Num(3)
  op: Mul
  right:
    Num(4)
";
    assert_eq!(print_ast(&parse("(2 + 3) * 4")), expected);
}

#[test]
fn printing_depends_only_on_shape() {
    let a = parse("1-2/3");
    let b = parse("  1 - ( 2 / 3 )  ");
    assert_ne!(a, b, "spans differ");
    assert_eq!(print_ast(&a), print_ast(&b));
    // Repeatable on the same tree
    assert_eq!(print_ast(&a), print_ast(&a));
}

#[test]
fn token_type_names() {
    assert_eq!(TokenType::LeftParen.to_string(), "LPAREN");
    assert_eq!(TokenType::Star.to_string(), "MUL");
}

fn parse_err_message(src: &str) -> String {
    Parser::new(Lexer::new(src.to_string()))
        .unwrap()
        .parse()
        .unwrap_err()
        .message
}

#[test]
fn depth_limit_on_left_chains() {
    // n operators in a left fold make a tree n + 1 levels tall
    let at_limit = format!("{}1", "1-".repeat(MAX_DEPTH - 1));
    assert!(Parser::new(Lexer::new(at_limit)).unwrap().parse().is_ok());

    let over_limit = format!("{}1", "1*".repeat(MAX_DEPTH));
    assert_eq!(parse_err_message(&over_limit), "Expression nested too deeply");
}

#[test]
fn depth_limit_on_parens() {
    let at_limit = "(".repeat(MAX_DEPTH) + "1" + &")".repeat(MAX_DEPTH);
    assert_eq!(shape(&parse(&at_limit)), "1");

    let over_limit = "(".repeat(MAX_DEPTH + 1) + "1" + &")".repeat(MAX_DEPTH + 1);
    assert_eq!(parse_err_message(&over_limit), "Expression nested too deeply");
}

#[test]
fn depth_counts_nested_right_operands() {
    // Each level nests the next chain on the right: 1 + (1 + (1 + ...))
    let nested = "1 + (".repeat(MAX_DEPTH) + "1" + &")".repeat(MAX_DEPTH);
    assert_eq!(parse_err_message(&nested), "Expression nested too deeply");

    // 199 additions over groups three levels tall stay under the limit
    let wide = vec!["(1 * 2 + 3 * 4)"; 200].join(" + ");
    assert!(Parser::new(Lexer::new(wide)).unwrap().parse().is_ok());
}

//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Variable declarations and assignments
//! - Function declarations
//! - Expressions and operator precedence
//! - Control flow statements
//! - Syntax errors

use std::rc::Rc;

use crate::{
    cst::cst::{Node, Rule},
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Node, Error> {
    let tokens = tokenize(source.to_string(), Some("test.con".to_string()))?;
    parse(tokens, Rc::new(source.to_string()), Rc::new("test.con".to_string()))
}

fn first_stmt(source: &str) -> Node {
    let program = parse_source(source).unwrap();
    assert_eq!(program.rule, Rule::Program);
    program.children[0].clone()
}

fn rules(node: &Node) -> Vec<Rule> {
    node.children.iter().map(|child| child.rule).collect()
}

const SYNTAX_CHECKS: &[&str] = &[
    "print(\"Hello\");",
    "int x := 1; x = 2;",
    "int x := 1; x += 1; x -= 1; x *= 2; x /= 2;",
    "while (true) { break; }",
    "int x := 1; if (x == 1) { print(\"1\"); } else if (x == 2) { print(\"2\"); } else { print(\"?\"); }",
    "for (int i := 0; i < 10; i++;) {print((string) i);}",
    "for (int i := 0; i < 10; i++;) {print((string) i); if (i == 5) {break;}}",
    "int[] testArray := int[5](); for(int i in testArray) {print((string) i);}",
    "int x := 1; for (int i := 0; i < 10; i++;) {++x;}",
    "int f(int x, int y) {return x + 1;} f(1, 2);",
    "int[] testArrayGiver() { int[] x := int[5](); x[0] = 1; x[1] = 2; return x; } int[] testArray := testArrayGiver() + testArrayGiver();",
    "int x := 1 + 1; x = 1 - 1; x = 1 * 1; x = 1 / 1; x = 1 % 1; x = 1 ** 1; x = -x; x = (x); int getX() {return 1;} x = getX();",
    "bool z:= (bool) (true); z = false; bool getX() {return true;} z = (getX());",
    "void doNothing(int a, string b) {return;} int main() { print ((string) doNothing(5, \"Hello\")); return 0;}",
    "float f := 1.5f; double d := 2.25; string s := \"a\\\"b\";",
    "int[][] grid := int[][3]();",
    "int[] testArray := (int[5]());",
];

#[test]
fn test_syntax_checks_parse() {
    for source in SYNTAX_CHECKS {
        assert!(parse_source(source).is_ok(), "failed to parse `{}`", source);
    }
}

#[test]
fn test_parse_variable_declaration() {
    let stmt = first_stmt("int x := 42;");

    assert_eq!(stmt.rule, Rule::VarDecl);
    assert_eq!(rules(&stmt), vec![Rule::Type, Rule::Identifier, Rule::IntLiteral]);
    assert_eq!(stmt.child(1).text, "x");
    assert_eq!(stmt.text, "int x := 42;");
}

#[test]
fn test_parse_array_declaration() {
    let stmt = first_stmt("int[] x := int[5]();");

    assert_eq!(stmt.rule, Rule::VarDecl);
    assert_eq!(stmt.child(0).rule, Rule::ArrayType);
    assert_eq!(stmt.child(2).rule, Rule::ArrayLiteral);
    assert_eq!(stmt.child(2).child(1).text, "5");
}

#[test]
fn test_parse_array_literal_statement() {
    let stmt = first_stmt("int[5]();");

    assert_eq!(stmt.rule, Rule::ExpressionStmt);
    assert_eq!(stmt.child(0).rule, Rule::ArrayLiteral);
}

#[test]
fn test_parse_function_declaration() {
    let stmt = first_stmt("int add(int a, int b) { return a + b; }");

    assert_eq!(stmt.rule, Rule::FunctionDecl);
    assert_eq!(rules(&stmt), vec![Rule::Type, Rule::Identifier, Rule::Params, Rule::Block]);
    assert_eq!(stmt.child(2).children.len(), 2);
    assert_eq!(stmt.child(2).child(1).child(1).text, "b");
    assert_eq!(stmt.child(3).child(0).rule, Rule::Return);
}

#[test]
fn test_parse_function_without_params() {
    let stmt = first_stmt("void f() { return; }");

    assert!(stmt.child(2).is_leaf());
    assert_eq!(stmt.child(3).child(0).rule, Rule::ShortReturn);
}

#[test]
fn test_parse_assignments() {
    let program = parse_source("x = 1; x += 2; a[0] = 3; x++;").unwrap();

    assert_eq!(
        rules(&program),
        vec![Rule::Assign, Rule::CompoundAssign, Rule::ArrayElementAssign, Rule::ExpressionStmt]
    );
    assert_eq!(program.child(1).child(1).text, "+=");
    assert_eq!(program.child(2).child(0).rule, Rule::Index);
    assert_eq!(program.child(3).child(0).rule, Rule::PostIncrement);
}

#[test]
fn test_parse_if_else_chain() {
    let stmt = first_stmt("if (a) { } else if (b) { } else if (c) { } else { }");

    assert_eq!(stmt.rule, Rule::If);
    assert_eq!(
        rules(&stmt),
        vec![Rule::Identifier, Rule::Block, Rule::ElseIf, Rule::ElseIf, Rule::Else]
    );
    assert_eq!(stmt.children_of(Rule::ElseIf).count(), 2);
}

#[test]
fn test_parse_for_loop() {
    let stmt = first_stmt("for (int i := 0; i < 10; i++;) { }");

    assert_eq!(stmt.rule, Rule::For);
    assert_eq!(rules(&stmt), vec![Rule::VarDecl, Rule::Binary, Rule::ExpressionStmt, Rule::Block]);
}

#[test]
fn test_parse_for_each_loop() {
    let stmt = first_stmt("for (int x in xs) { }");

    assert_eq!(stmt.rule, Rule::ForEach);
    assert_eq!(rules(&stmt), vec![Rule::Type, Rule::Identifier, Rule::Identifier, Rule::Block]);
}

#[test]
fn test_parse_precedence() {
    // 1 + (2 * 3)
    let stmt = first_stmt("1 + 2 * 3;");
    let expr = stmt.child(0);

    assert_eq!(expr.rule, Rule::Binary);
    assert_eq!(expr.child(1).text, "+");
    assert_eq!(expr.child(2).rule, Rule::Binary);
    assert_eq!(expr.child(2).child(1).text, "*");
}

#[test]
fn test_parse_logical_precedence() {
    // (a < b) || (c && d)
    let expr = first_stmt("a < b || c && d;").child(0).clone();

    assert_eq!(expr.child(1).text, "||");
    assert_eq!(expr.child(0).child(1).text, "<");
    assert_eq!(expr.child(2).child(1).text, "&&");
}

#[test]
fn test_parse_power_is_right_associative() {
    let expr = first_stmt("2 ** 3 ** 2;").child(0).clone();

    assert_eq!(expr.child(0).text, "2");
    assert_eq!(expr.child(2).rule, Rule::Binary);
    assert_eq!(expr.child(2).text, "3 ** 2");
}

#[test]
fn test_parse_subtraction_is_left_associative() {
    let expr = first_stmt("5 - 3 - 1;").child(0).clone();

    assert_eq!(expr.child(0).text, "5 - 3");
    assert_eq!(expr.child(2).text, "1");
}

#[test]
fn test_parse_typecast_binds_tighter_than_binary() {
    let expr = first_stmt("(string) x + \"!\";").child(0).clone();

    assert_eq!(expr.rule, Rule::Binary);
    assert_eq!(expr.child(0).rule, Rule::Typecast);
    assert_eq!(expr.child(0).child(0).text, "string");
}

#[test]
fn test_parse_typecast_of_call() {
    let expr = first_stmt("(string) f(1);").child(0).clone();

    assert_eq!(expr.rule, Rule::Typecast);
    assert_eq!(expr.child(1).rule, Rule::Call);
    assert_eq!(expr.child(1).child(1).children.len(), 1);
}

#[test]
fn test_parse_grouped_array_literal() {
    let stmt = first_stmt("int[] testArray := (int[5]());");
    assert_eq!(stmt.child(2).rule, Rule::ArrayLiteral);
    assert_eq!(stmt.child(2).child(1).text, "5");

    let nested = first_stmt("(int[][2]());").child(0).clone();
    assert_eq!(nested.rule, Rule::ArrayLiteral);
    assert_eq!(nested.child(0).rule, Rule::ArrayType);

    // An immediately closed `[]` is still part of a cast target
    let cast = first_stmt("(int[]) x;").child(0).clone();
    assert_eq!(cast.rule, Rule::Typecast);
    assert_eq!(cast.child(0).rule, Rule::ArrayType);
}

#[test]
fn test_parse_unary() {
    let expr = first_stmt("!-x;").child(0).clone();

    assert_eq!(expr.rule, Rule::Unary);
    assert_eq!(expr.child(0).text, "!");
    assert_eq!(expr.child(1).rule, Rule::Unary);
    assert_eq!(expr.child(1).child(0).text, "-");
}

#[test]
fn test_parse_increments() {
    let program = parse_source("++x; x--;").unwrap();

    assert_eq!(program.child(0).child(0).rule, Rule::PreIncrement);
    assert_eq!(program.child(0).child(0).child(1).text, "x");
    assert_eq!(program.child(1).child(0).rule, Rule::PostIncrement);
    assert_eq!(program.child(1).child(0).child(1).text, "--");
}

#[test]
fn test_parse_node_spans_cover_source() {
    let source = "int x := 1 + 2;";
    let stmt = first_stmt(source);

    assert_eq!(stmt.span.start.0, 0);
    assert_eq!(stmt.span.end.0 as usize, source.len());
    assert_eq!(stmt.child(2).text, "1 + 2");
}

#[test]
fn test_parse_empty_program() {
    let program = parse_source("").unwrap();

    assert_eq!(program.rule, Rule::Program);
    assert!(program.is_leaf());
}

#[test]
fn test_syntax_errors() {
    let sources = [
        "for (ints i := 0; i < 10; i++;) {print((string) i);}",
        "int x = 1;",
        "int x := 1",
        "print(1;",
        "while true { }",
        "if (x) { ",
        "1 = 2;",
        "f() += 1;",
        "5++;",
        "++5;",
        "int f(int) { }",
        "x := 3;",
    ];

    for source in sources {
        let result = parse_source(source);
        assert!(result.is_err(), "expected `{}` to fail", source);
        assert!(result.unwrap_err().is_syntax_error());
    }
}

#[test]
fn test_syntax_error_position() {
    let error = parse_source("int x := 1\nint y := 2;").unwrap_err();

    assert!(matches!(error.get_kind(), ErrorImpl::UnexpectedToken { token } if token == "int"));
    assert_eq!(error.get_position().0, 11);
}

#[test]
fn test_outline() {
    let program = parse_source("print(\"hi\");").unwrap();

    assert_eq!(program.outline(), "Program\n  Print\n    StringLiteral `\"hi\"`\n");
}

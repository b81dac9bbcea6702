use std::rc::Rc;

use proptest::prelude::*;

use crate::{
    analyzer::analyzer::analyze,
    ir::ir::{CmpOp, Expr, ExprKind, LogicOp, Number, NumericOp, Program, Stmt, UnaryOp},
    lexer::lexer::tokenize,
    parser::parser::parse,
    types::{entities::EntityId, types::Type},
};

use super::optimizer::{fold_numeric, optimize, optimize_expr, optimize_stmt};

fn analyze_source(source: &str) -> Program {
    let tokens = tokenize(source.to_string(), Some("test.con".to_string())).unwrap();
    let tree = parse(tokens, Rc::new(source.to_string()), Rc::new("test.con".to_string())).unwrap();
    analyze(&tree).unwrap()
}

fn first_value(program: &Program) -> &Expr {
    match &program.statements[0] {
        Stmt::VarDecl { value, .. } | Stmt::Print(value) | Stmt::Expression(value) => value,
        other => panic!("unexpected statement {:?}", other),
    }
}

fn numeric(left: Expr, op: NumericOp, right: Expr) -> Expr {
    Expr::new(
        left.ty.clone(),
        ExprKind::Numeric {
            left: Box::new(left),
            op,
            right: Box::new(right),
        },
    )
}

fn double(value: f64) -> Expr {
    Expr::new(Type::Double, ExprKind::NumericLiteral(Number::Float(value)))
}

#[test]
fn test_fold_int_arithmetic() {
    assert_eq!(optimize_expr(numeric(Expr::int(3), NumericOp::Add, Expr::int(4))), Expr::int(7));
    assert_eq!(optimize_expr(numeric(Expr::int(7), NumericOp::Div, Expr::int(2))), Expr::int(3));
    assert_eq!(optimize_expr(numeric(Expr::int(-7), NumericOp::Div, Expr::int(2))), Expr::int(-3));
    assert_eq!(optimize_expr(numeric(Expr::int(-7), NumericOp::Rem, Expr::int(3))), Expr::int(-1));
    assert_eq!(optimize_expr(numeric(Expr::int(2), NumericOp::Pow, Expr::int(10))), Expr::int(1024));
}

#[test]
fn test_fold_nested_arithmetic() {
    // (1 + 2) * (10 - 4)
    let expr = numeric(
        numeric(Expr::int(1), NumericOp::Add, Expr::int(2)),
        NumericOp::Mul,
        numeric(Expr::int(10), NumericOp::Sub, Expr::int(4)),
    );

    assert_eq!(optimize_expr(expr), Expr::int(18));
}

#[test]
fn test_fold_double_arithmetic() {
    assert_eq!(optimize_expr(numeric(double(1.5), NumericOp::Mul, double(2.0))), double(3.0));
    assert_eq!(optimize_expr(numeric(double(1.0), NumericOp::Div, double(4.0))), double(0.25));
}

#[test]
fn test_no_fold_division_by_zero() {
    let int_division = numeric(Expr::int(1), NumericOp::Div, Expr::int(0));
    assert_eq!(optimize_expr(int_division.clone()), int_division);

    let int_remainder = numeric(Expr::int(1), NumericOp::Rem, Expr::int(0));
    assert_eq!(optimize_expr(int_remainder.clone()), int_remainder);

    let double_division = numeric(double(1.0), NumericOp::Div, double(0.0));
    assert_eq!(optimize_expr(double_division.clone()), double_division);
}

#[test]
fn test_no_fold_overflow() {
    let overflow = numeric(Expr::int(i64::MAX), NumericOp::Add, Expr::int(1));
    assert_eq!(optimize_expr(overflow.clone()), overflow);

    let negative_power = numeric(Expr::int(2), NumericOp::Pow, Expr::int(-1));
    assert_eq!(optimize_expr(negative_power.clone()), negative_power);

    assert_eq!(fold_numeric(Number::Int(i64::MIN), NumericOp::Div, Number::Int(-1)), None);
    assert_eq!(fold_numeric(Number::Float(1e308), NumericOp::Mul, Number::Float(10.0)), None);
}

#[test]
fn test_no_fold_inexact_integers() {
    let inexact = numeric(Expr::int(9007199254740993), NumericOp::Sub, Expr::int(9007199254740992));
    assert_eq!(optimize_expr(inexact.clone()), inexact);

    assert_eq!(fold_numeric(Number::Int(1 << 53), NumericOp::Add, Number::Int(1)), None);
    assert_eq!(fold_numeric(Number::Int(1 << 52), NumericOp::Mul, Number::Int(4)), None);
    assert_eq!(
        fold_numeric(Number::Int(1 << 52), NumericOp::Add, Number::Int(1)),
        Some(Number::Int((1 << 52) + 1))
    );

    let comparison = Expr::new(
        Type::Bool,
        ExprKind::Comparison {
            left: Box::new(Expr::int(9007199254740993)),
            op: CmpOp::Equals,
            right: Box::new(Expr::int(9007199254740992)),
        },
    );
    assert_eq!(optimize_expr(comparison.clone()), comparison);
}

#[test]
fn test_fold_strings() {
    let program = optimize(analyze_source("print(\"a\" + \"b\" + \"c\");"));
    assert_eq!(first_value(&program), &Expr::string("abc"));
}

#[test]
fn test_fold_comparisons() {
    let program = optimize(analyze_source("bool b := 1 < 2;"));
    assert_eq!(first_value(&program), &Expr::boolean(true));

    let program = optimize(analyze_source("bool b := \"b\" <= \"a\";"));
    assert_eq!(first_value(&program), &Expr::boolean(false));

    let program = optimize(analyze_source("bool b := true != false;"));
    assert_eq!(first_value(&program), &Expr::boolean(true));

    let program = optimize(analyze_source("bool b := 2.0 == 2.0;"));
    assert_eq!(first_value(&program), &Expr::boolean(true));
}

#[test]
fn test_fold_string_comparison_by_code_unit() {
    let compare = |left: &str, right: &str| {
        Expr::new(
            Type::Bool,
            ExprKind::Comparison {
                left: Box::new(Expr::string(left)),
                op: CmpOp::Less,
                right: Box::new(Expr::string(right)),
            },
        )
    };

    // U+FF61 is a single code unit above the surrogate pair of U+1F600
    assert_eq!(optimize_expr(compare("\u{ff61}", "\u{1f600}")), Expr::boolean(false));
    assert_eq!(optimize_expr(compare("\u{1f600}", "\u{ff61}")), Expr::boolean(true));
    assert_eq!(optimize_expr(compare("a", "\u{e9}")), Expr::boolean(true));
}

#[test]
fn test_fold_logic_and_unary() {
    let program = optimize(analyze_source("bool b := !(true && false) || false;"));
    assert_eq!(first_value(&program), &Expr::boolean(true));

    let program = optimize(analyze_source("int x := -(2 + 3);"));
    assert_eq!(first_value(&program), &Expr::int(-5));
}

#[test]
fn test_partial_folding() {
    let program = optimize(analyze_source("int x := 1; int y := x + (2 * 3);"));

    let Stmt::VarDecl { value, .. } = &program.statements[1] else { unreachable!() };
    let ExprKind::Numeric { left, op, right } = &value.kind else {
        panic!("expected an addition, got {:?}", value.kind);
    };

    assert!(matches!(left.kind, ExprKind::Identifier { .. }));
    assert_eq!(*op, NumericOp::Add);
    assert_eq!(**right, Expr::int(6));
}

#[test]
fn test_no_fold_with_variable_divisor() {
    let program = optimize(analyze_source("int x := 0; int y := 4 / x;"));

    let Stmt::VarDecl { value, .. } = &program.statements[1] else { unreachable!() };
    assert!(matches!(value.kind, ExprKind::Numeric { op: NumericOp::Div, .. }));
}

#[test]
fn test_remove_self_assignment() {
    let program = optimize(analyze_source("int x := 1; x = x; x = 2;"));

    assert_eq!(program.statements.len(), 2);
    assert!(matches!(program.statements[1], Stmt::Assign { .. }));

    let target = EntityId(7);
    let stmt = Stmt::Assign {
        target,
        value: Expr::identifier(target, Type::Int),
    };
    assert!(optimize_stmt(stmt).is_empty());
}

#[test]
fn test_remove_nested_self_assignment() {
    let program = optimize(analyze_source("int x := 1; while (x < 3) { x = x; x++; }"));

    let Stmt::While { body, .. } = &program.statements[1] else { unreachable!() };
    assert_eq!(body.len(), 1);
    assert!(matches!(body[0], Stmt::Expression(_)));
}

#[test]
fn test_self_assignment_step_is_dropped() {
    let program = optimize(analyze_source("for (int i := 0; i < 3; i = i;) { break; }"));

    let Stmt::For { step, .. } = &program.statements[0] else { unreachable!() };
    assert!(step.is_none());
}

#[test]
fn test_folds_inside_statements() {
    let program = optimize(analyze_source(
        "int[] a := int[2 + 3](); a[1 - 1] = 4 * 2; if (1 > 2) { print(\"no\"); } else if (3 > 2) { print((string) (1 + 1)); }",
    ));

    let Stmt::VarDecl { value, .. } = &program.statements[0] else { unreachable!() };
    assert_eq!(value.kind, ExprKind::ArrayLiteral { size: Box::new(Expr::int(5)) });

    let Stmt::ArrayElementAssign { index, value, .. } = &program.statements[1] else { unreachable!() };
    assert_eq!(index, &Expr::int(0));
    assert_eq!(value, &Expr::int(8));

    let Stmt::If { condition, else_ifs, .. } = &program.statements[2] else { unreachable!() };
    assert_eq!(condition, &Expr::boolean(false));
    assert_eq!(else_ifs[0].condition, Expr::boolean(true));
}

#[test]
fn test_optimize_program_is_idempotent() {
    let source = "int f(int n) { if (n <= 1) { return 1; } return n * f(n - 1); } \
                  int x := 2 ** 3 + f(4); x = x; string s := \"a\" + (string) x; \
                  for (int i := 0; i < 10 / 0; i += 1;) { x++; }";

    let once = optimize(analyze_source(source));
    let twice = optimize(once.clone());

    assert_eq!(once, twice);
}

fn int_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (-20i64..20).prop_map(Expr::int),
        Just(Expr::identifier(EntityId(0), Type::Int)),
    ];

    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop_oneof![
                    Just(NumericOp::Add),
                    Just(NumericOp::Sub),
                    Just(NumericOp::Mul),
                    Just(NumericOp::Div),
                    Just(NumericOp::Rem),
                    Just(NumericOp::Pow),
                ],
                inner.clone(),
            )
                .prop_map(|(left, op, right)| numeric(left, op, right)),
            inner.prop_map(|operand| Expr::new(
                Type::Int,
                ExprKind::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(operand),
                },
            )),
        ]
    })
}

fn bool_expr() -> impl Strategy<Value = Expr> {
    (int_expr(), int_expr(), any::<bool>()).prop_map(|(left, right, and)| {
        let comparison = Expr::new(
            Type::Bool,
            ExprKind::Comparison {
                left: Box::new(left),
                op: CmpOp::Less,
                right: Box::new(right),
            },
        );

        Expr::new(
            Type::Bool,
            ExprKind::Boolean {
                left: Box::new(comparison),
                op: if and { LogicOp::And } else { LogicOp::Or },
                right: Box::new(Expr::boolean(and)),
            },
        )
    })
}

proptest! {
    #[test]
    fn prop_optimize_expr_is_idempotent(expr in int_expr()) {
        let once = optimize_expr(expr);
        let twice = optimize_expr(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_optimize_expr_preserves_type(expr in int_expr()) {
        prop_assert_eq!(optimize_expr(expr).ty, Type::Int);
    }

    #[test]
    fn prop_optimize_bool_expr(expr in bool_expr()) {
        let once = optimize_expr(expr);
        prop_assert_eq!(&once.ty, &Type::Bool);
        prop_assert_eq!(optimize_expr(once.clone()), once);
    }
}

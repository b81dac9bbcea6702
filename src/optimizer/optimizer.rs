use tracing::trace;

use crate::ir::ir::{
    CmpOp, ElseIf, Expr, ExprKind, LogicOp, Number, NumericOp, Program, Stmt, UnaryOp,
};

pub fn optimize(program: Program) -> Program {
    let Program {
        statements,
        entities,
    } = program;

    Program {
        statements: optimize_block(statements),
        entities,
    }
}

pub fn optimize_block(statements: Vec<Stmt>) -> Vec<Stmt> {
    statements.into_iter().flat_map(optimize_stmt).collect()
}

/// Optimizes one statement. Returns no statements when it can be removed.
pub fn optimize_stmt(stmt: Stmt) -> Vec<Stmt> {
    rewrite_stmt(stmt).into_iter().collect()
}

fn rewrite_stmt(stmt: Stmt) -> Option<Stmt> {
    let stmt = match stmt {
        Stmt::VarDecl { entity, value } => Stmt::VarDecl {
            entity,
            value: optimize_expr(value),
        },
        Stmt::Assign { target, value } => {
            let value = optimize_expr(value);
            if value.kind == (ExprKind::Identifier { entity: target }) {
                trace!("removing self-assignment of {:?}", target);
                return None;
            }
            Stmt::Assign { target, value }
        }
        Stmt::CompoundAssign { target, op, value } => Stmt::CompoundAssign {
            target,
            op,
            value: optimize_expr(value),
        },
        Stmt::ArrayElementAssign {
            array,
            index,
            value,
        } => Stmt::ArrayElementAssign {
            array: optimize_expr(array),
            index: optimize_expr(index),
            value: optimize_expr(value),
        },
        Stmt::Expression(expr) => Stmt::Expression(optimize_expr(expr)),
        Stmt::Print(expr) => Stmt::Print(optimize_expr(expr)),
        Stmt::While { condition, body } => Stmt::While {
            condition: optimize_expr(condition),
            body: optimize_block(body),
        },
        Stmt::If {
            condition,
            body,
            else_ifs,
            else_body,
        } => Stmt::If {
            condition: optimize_expr(condition),
            body: optimize_block(body),
            else_ifs: else_ifs
                .into_iter()
                .map(|ElseIf { condition, body }| ElseIf {
                    condition: optimize_expr(condition),
                    body: optimize_block(body),
                })
                .collect(),
            else_body: else_body.map(optimize_block),
        },
        Stmt::For {
            init,
            condition,
            step,
            body,
        } => {
            let Some(init) = rewrite_stmt(*init) else {
                unreachable!("for loop initializer is a declaration");
            };

            Stmt::For {
                init: Box::new(init),
                condition: optimize_expr(condition),
                step: step.and_then(|step| rewrite_stmt(*step)).map(Box::new),
                body: optimize_block(body),
            }
        }
        Stmt::ForEach {
            element,
            collection,
            body,
        } => Stmt::ForEach {
            element,
            collection: optimize_expr(collection),
            body: optimize_block(body),
        },
        Stmt::FunctionDecl { function, body } => Stmt::FunctionDecl {
            function,
            body: optimize_block(body),
        },
        Stmt::Return(value) => Stmt::Return(optimize_expr(value)),
        Stmt::ReturnVoid => Stmt::ReturnVoid,
        Stmt::Break => Stmt::Break,
    };

    Some(stmt)
}

/// Folds constant subexpressions bottom-up. The result has the same type.
pub fn optimize_expr(expr: Expr) -> Expr {
    let Expr { ty, kind } = expr;

    let kind = match kind {
        ExprKind::Numeric { left, op, right } => {
            let (left, right) = (optimize_expr(*left), optimize_expr(*right));

            if let (ExprKind::NumericLiteral(a), ExprKind::NumericLiteral(b)) = (&left.kind, &right.kind) {
                if let Some(value) = fold_numeric(*a, op, *b) {
                    return Expr::new(ty, ExprKind::NumericLiteral(value));
                }
            }

            ExprKind::Numeric {
                left: Box::new(left),
                op,
                right: Box::new(right),
            }
        }
        ExprKind::Str { left, right } => {
            let (left, right) = (optimize_expr(*left), optimize_expr(*right));

            if let (ExprKind::StringLiteral(a), ExprKind::StringLiteral(b)) = (&left.kind, &right.kind) {
                return Expr::new(ty, ExprKind::StringLiteral(format!("{}{}", a, b)));
            }

            ExprKind::Str {
                left: Box::new(left),
                right: Box::new(right),
            }
        }
        ExprKind::Boolean { left, op, right } => {
            let (left, right) = (optimize_expr(*left), optimize_expr(*right));

            if let (ExprKind::BooleanLiteral(a), ExprKind::BooleanLiteral(b)) = (&left.kind, &right.kind) {
                let value = match op {
                    LogicOp::And => *a && *b,
                    LogicOp::Or => *a || *b,
                };
                return Expr::new(ty, ExprKind::BooleanLiteral(value));
            }

            ExprKind::Boolean {
                left: Box::new(left),
                op,
                right: Box::new(right),
            }
        }
        ExprKind::Comparison { left, op, right } => {
            let (left, right) = (optimize_expr(*left), optimize_expr(*right));

            if let Some(value) = fold_comparison(&left.kind, op, &right.kind) {
                return Expr::new(ty, ExprKind::BooleanLiteral(value));
            }

            ExprKind::Comparison {
                left: Box::new(left),
                op,
                right: Box::new(right),
            }
        }
        ExprKind::Unary { op, operand } => {
            let operand = optimize_expr(*operand);

            let folded = match (op, &operand.kind) {
                (UnaryOp::Neg, ExprKind::NumericLiteral(Number::Int(value))) => {
                    value.checked_neg().map(|value| ExprKind::NumericLiteral(Number::Int(value)))
                }
                (UnaryOp::Neg, ExprKind::NumericLiteral(Number::Float(value))) => {
                    Some(ExprKind::NumericLiteral(Number::Float(-value)))
                }
                (UnaryOp::Not, ExprKind::BooleanLiteral(value)) => Some(ExprKind::BooleanLiteral(!value)),
                _ => None,
            };

            match folded {
                Some(kind) => return Expr::new(ty, kind),
                None => ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
            }
        }
        ExprKind::ArrayLiteral { size } => ExprKind::ArrayLiteral {
            size: Box::new(optimize_expr(*size)),
        },
        ExprKind::ArrayConcat { left, right } => ExprKind::ArrayConcat {
            left: Box::new(optimize_expr(*left)),
            right: Box::new(optimize_expr(*right)),
        },
        ExprKind::Index { array, index } => ExprKind::Index {
            array: Box::new(optimize_expr(*array)),
            index: Box::new(optimize_expr(*index)),
        },
        ExprKind::Call { callee, args } => ExprKind::Call {
            callee,
            args: args.into_iter().map(optimize_expr).collect(),
        },
        ExprKind::Typecast { operand } => ExprKind::Typecast {
            operand: Box::new(optimize_expr(*operand)),
        },
        kind @ (ExprKind::NumericLiteral(_)
        | ExprKind::StringLiteral(_)
        | ExprKind::BooleanLiteral(_)
        | ExprKind::Identifier { .. }
        | ExprKind::Increment { .. }) => kind,
    };

    Expr::new(ty, kind)
}

/// Largest integer magnitude the target's numbers represent exactly.
const EXACT_INTEGER_LIMIT: u64 = 1 << 53;

fn is_exact(value: i64) -> bool {
    value.unsigned_abs() <= EXACT_INTEGER_LIMIT
}

/// Evaluates `a op b`, or `None` when the result must be left to runtime.
///
/// Integer arithmetic truncates like the generated `Math.trunc` division.
/// Division or remainder by zero, overflow and non-finite results are not folded.
/// Neither are integers beyond 2^53, which the target rounds.
pub fn fold_numeric(a: Number, op: NumericOp, b: Number) -> Option<Number> {
    match (a, b) {
        (Number::Int(a), Number::Int(b)) => {
            if !is_exact(a) || !is_exact(b) {
                return None;
            }

            let value = match op {
                NumericOp::Add => a.checked_add(b),
                NumericOp::Sub => a.checked_sub(b),
                NumericOp::Mul => a.checked_mul(b),
                NumericOp::Div => a.checked_div(b),
                NumericOp::Rem => a.checked_rem(b),
                NumericOp::Pow => u32::try_from(b).ok().and_then(|exponent| a.checked_pow(exponent)),
            };
            value.filter(|value| is_exact(*value)).map(Number::Int)
        }
        (Number::Float(a), Number::Float(b)) => {
            if matches!(op, NumericOp::Div | NumericOp::Rem) && b == 0.0 {
                return None;
            }

            let value = match op {
                NumericOp::Add => a + b,
                NumericOp::Sub => a - b,
                NumericOp::Mul => a * b,
                NumericOp::Div => a / b,
                NumericOp::Rem => a % b,
                NumericOp::Pow => a.powf(b),
            };
            value.is_finite().then_some(Number::Float(value))
        }
        _ => None,
    }
}

fn fold_comparison(left: &ExprKind, op: CmpOp, right: &ExprKind) -> Option<bool> {
    let ordering = match (left, right) {
        (ExprKind::NumericLiteral(Number::Int(a)), ExprKind::NumericLiteral(Number::Int(b))) => {
            if !is_exact(*a) || !is_exact(*b) {
                return None;
            }
            a.partial_cmp(b)
        }
        (ExprKind::NumericLiteral(Number::Float(a)), ExprKind::NumericLiteral(Number::Float(b))) => {
            a.partial_cmp(b)
        }
        // Strings order by UTF-16 code unit at runtime
        (ExprKind::StringLiteral(a), ExprKind::StringLiteral(b)) => Some(a.encode_utf16().cmp(b.encode_utf16())),
        (ExprKind::BooleanLiteral(a), ExprKind::BooleanLiteral(b)) => {
            return match op {
                CmpOp::Equals => Some(a == b),
                CmpOp::NotEquals => Some(a != b),
                _ => None,
            };
        }
        _ => return None,
    }?;

    Some(match op {
        CmpOp::Less => ordering.is_lt(),
        CmpOp::LessEquals => ordering.is_le(),
        CmpOp::Greater => ordering.is_gt(),
        CmpOp::GreaterEquals => ordering.is_ge(),
        CmpOp::Equals => ordering.is_eq(),
        CmpOp::NotEquals => ordering.is_ne(),
    })
}

use crate::{
    ir::ir::{CmpOp, Expr, ExprKind, IncrementOp, LogicOp, Number, NumericOp, UnaryOp},
    types::types::Type,
};

use super::generator::Generator;

/// JavaScript operator precedence, loosest first.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
pub enum Precedence {
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Power,
    Unary,
    Postfix,
    Primary,
}

impl Precedence {
    /// Precedence of the JavaScript expression `expr` lowers to.
    pub fn of(expr: &Expr) -> Self {
        match &expr.kind {
            ExprKind::Boolean { op: LogicOp::Or, .. } => Precedence::LogicalOr,
            ExprKind::Boolean { op: LogicOp::And, .. } => Precedence::LogicalAnd,
            ExprKind::Comparison {
                op: CmpOp::Equals | CmpOp::NotEquals,
                ..
            } => Precedence::Equality,
            ExprKind::Comparison { .. } => Precedence::Relational,
            ExprKind::Numeric { op, .. } => match op {
                NumericOp::Add | NumericOp::Sub => Precedence::Additive,
                NumericOp::Div if expr.ty == Type::Int => Precedence::Primary,
                NumericOp::Mul | NumericOp::Div | NumericOp::Rem => Precedence::Multiplicative,
                NumericOp::Pow => Precedence::Power,
            },
            ExprKind::Str { .. } => Precedence::Additive,
            ExprKind::Unary { .. } => Precedence::Unary,
            ExprKind::NumericLiteral(Number::Int(value)) if *value < 0 => Precedence::Unary,
            ExprKind::NumericLiteral(Number::Float(value)) if value.is_sign_negative() => Precedence::Unary,
            ExprKind::Increment { prefix: true, .. } => Precedence::Unary,
            ExprKind::Increment { prefix: false, .. } => Precedence::Postfix,
            ExprKind::Typecast { operand } if conversion(&expr.ty, &operand.ty).is_none() => {
                Precedence::of(operand)
            }
            _ => Precedence::Primary,
        }
    }
}

/// The conversion function for a cast, or `None` when the operand is emitted as is.
fn conversion(target: &Type, source: &Type) -> Option<&'static str> {
    if target == source {
        return None;
    }

    match target {
        Type::Int => Some("parseInt"),
        Type::Float => Some("parseFloat"),
        Type::Double => Some("Number"),
        Type::Bool => Some("Boolean"),
        Type::String => Some("String"),
        _ => None,
    }
}

/// Fill value of a fresh array with elements of type `element`.
fn default_value(element: &Type) -> &'static str {
    match element {
        Type::Int | Type::Float | Type::Double => "0",
        Type::String => "\"\"",
        Type::Bool => "false",
        _ => "null",
    }
}

/// Renders `value` as a double-quoted JavaScript string literal.
pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');

    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\0' => escaped.push_str("\\0"),
            ch if ch.is_control() && (ch as u32) < 0x100 => escaped.push_str(&format!("\\x{:02x}", ch as u32)),
            ch => escaped.push(ch),
        }
    }

    escaped.push('"');
    escaped
}

impl Generator<'_> {
    pub fn expr(&mut self, expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Numeric { left, op, right } => {
                if *op == NumericOp::Div && expr.ty == Type::Int {
                    let left = self.operand(left, Precedence::Multiplicative, false);
                    let right = self.operand(right, Precedence::Multiplicative, true);
                    return format!("Math.trunc({} / {})", left, right);
                }

                let precedence = Precedence::of(expr);
                if *op == NumericOp::Pow {
                    // `**` is right associative and rejects a unary left operand
                    let left = self.operand(left, Precedence::Postfix, false);
                    let right = self.operand(right, precedence, false);
                    return format!("{} ** {}", left, right);
                }

                self.binary(left, &op.to_string(), right, precedence)
            }
            ExprKind::NumericLiteral(Number::Int(value)) => value.to_string(),
            ExprKind::NumericLiteral(Number::Float(value)) => format!("{:?}", value),
            ExprKind::Str { left, right } => self.binary(left, "+", right, Precedence::Additive),
            ExprKind::StringLiteral(value) => escape_string(value),
            ExprKind::Boolean { left, op, right } => self.binary(left, &op.to_string(), right, Precedence::of(expr)),
            ExprKind::BooleanLiteral(value) => value.to_string(),
            ExprKind::Comparison { left, op, right } => {
                let symbol = match op {
                    CmpOp::Less => "<",
                    CmpOp::LessEquals => "<=",
                    CmpOp::Greater => ">",
                    CmpOp::GreaterEquals => ">=",
                    CmpOp::Equals => "===",
                    CmpOp::NotEquals => "!==",
                };
                self.binary(left, symbol, right, Precedence::of(expr))
            }
            ExprKind::Unary { op, operand } => {
                let symbol = match op {
                    UnaryOp::Neg => "-",
                    UnaryOp::Not => "!",
                };
                // Nested prefix operators are parenthesized so `- -x` never becomes `--x`
                format!("{}{}", symbol, self.operand(operand, Precedence::Unary, true))
            }
            ExprKind::ArrayLiteral { size } => {
                let element = expr.ty.element_type().map(default_value).unwrap_or("null");
                format!("new Array({}).fill({})", self.expr(size), element)
            }
            ExprKind::ArrayConcat { left, right } => {
                format!("[...{}, ...{}]", self.expr(left), self.expr(right))
            }
            ExprKind::Index { array, index } => {
                let array = self.operand(array, Precedence::Postfix, false);
                format!("{}[{}]", array, self.expr(index))
            }
            ExprKind::Identifier { entity } => self.name(*entity),
            ExprKind::Call { callee, args } => {
                let callee = self.name(*callee);
                let args = args.iter().map(|arg| self.expr(arg)).collect::<Vec<_>>().join(", ");
                format!("{}({})", callee, args)
            }
            ExprKind::Typecast { operand } => match conversion(&expr.ty, &operand.ty) {
                Some(function) => format!("{}({})", function, self.expr(operand)),
                None => self.expr(operand),
            },
            ExprKind::Increment { entity, op, prefix } => {
                let name = self.name(*entity);
                let symbol = match op {
                    IncrementOp::Increment => "++",
                    IncrementOp::Decrement => "--",
                };

                if *prefix {
                    format!("{}{}", symbol, name)
                } else {
                    format!("{}{}", name, symbol)
                }
            }
        }
    }

    /// Left associative binary operator.
    fn binary(&mut self, left: &Expr, symbol: &str, right: &Expr, precedence: Precedence) -> String {
        let left = self.operand(left, precedence, false);
        let right = self.operand(right, precedence, true);
        format!("{} {} {}", left, symbol, right)
    }

    /// Renders `expr` as an operand of an operator with `precedence`,
    /// parenthesized when it binds looser, or equally loose and `wrap_equal`.
    pub(super) fn operand(&mut self, expr: &Expr, precedence: Precedence, wrap_equal: bool) -> String {
        let own = Precedence::of(expr);
        let text = self.expr(expr);

        if own < precedence || (wrap_equal && own == precedence) {
            format!("({})", text)
        } else {
            text
        }
    }
}

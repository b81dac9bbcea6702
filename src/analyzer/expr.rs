use crate::{
    cst::cst::{Node, Rule},
    errors::errors::{Error, ErrorImpl},
    ir::ir::{CmpOp, Expr, ExprKind, IncrementOp, LogicOp, Number, NumericOp, UnaryOp},
    lexer::lexer::unescape_string,
    types::{entities::Entity, types::Type},
};

use super::{
    analyzer::{expect_type, mismatch, Analyzer},
    context::ScopeId,
};

impl Analyzer {
    pub fn analyze_expr(&mut self, node: &Node, scope: ScopeId) -> Result<Expr, Error> {
        match node.rule {
            Rule::IntLiteral => {
                let value = node.text.parse::<i64>().map_err(|_| {
                    Error::new(
                        ErrorImpl::NumberParseError {
                            token: node.text.clone(),
                        },
                        node.span.start.clone(),
                    )
                })?;
                Ok(Expr::int(value))
            }
            Rule::FloatLiteral => self.analyze_float_literal(node, Type::Float),
            Rule::DoubleLiteral => self.analyze_float_literal(node, Type::Double),
            Rule::StringLiteral => Ok(Expr::string(&unescape_string(&node.text))),
            Rule::BoolLiteral => Ok(Expr::boolean(node.text == "true")),
            Rule::Identifier => {
                let entity = self.resolve(scope, node)?;
                Ok(Expr::identifier(entity, self.entity(entity).ty()))
            }
            Rule::Binary => self.analyze_binary_expr(node, scope),
            Rule::Unary => self.analyze_unary_expr(node, scope),
            Rule::PreIncrement => self.analyze_increment_expr(node, node.child(1), node.child(0), true, scope),
            Rule::PostIncrement => self.analyze_increment_expr(node, node.child(0), node.child(1), false, scope),
            Rule::Call => self.analyze_call_expr(node, scope),
            Rule::Index => self.analyze_index_expr(node, scope),
            Rule::ArrayLiteral => self.analyze_array_literal_expr(node, scope),
            Rule::Typecast => self.analyze_typecast_expr(node, scope),
            rule => unreachable!("{} is not an expression", rule),
        }
    }

    fn analyze_float_literal(&self, node: &Node, ty: Type) -> Result<Expr, Error> {
        let value = node.text.trim_end_matches('f').parse::<f64>().map_err(|_| {
            Error::new(
                ErrorImpl::NumberParseError {
                    token: node.text.clone(),
                },
                node.span.start.clone(),
            )
        })?;

        Ok(Expr::new(ty, ExprKind::NumericLiteral(Number::Float(value))))
    }

    fn analyze_binary_expr(&mut self, node: &Node, scope: ScopeId) -> Result<Expr, Error> {
        let left = self.analyze_expr(node.child(0), scope)?;
        let operator = node.child(1);
        let right = self.analyze_expr(node.child(2), scope)?;

        let (left, right) = (Box::new(left), Box::new(right));

        match operator.text.as_str() {
            "&&" | "||" => {
                expect_type(&left, &Type::Bool, node.child(0))?;
                expect_type(&right, &Type::Bool, node.child(2))?;

                let op = if operator.text == "&&" { LogicOp::And } else { LogicOp::Or };
                Ok(Expr::new(Type::Bool, ExprKind::Boolean { left, op, right }))
            }
            "==" | "!=" | "<" | "<=" | ">" | ">=" => {
                let op = match CmpOp::from_symbol(&operator.text) {
                    Some(op) => op,
                    None => unreachable!("`{}` is not a comparison", operator.text),
                };

                if !right.ty.equivalent(&left.ty) {
                    return Err(mismatch(&left.ty, &right.ty, node.child(2)));
                }

                let comparable = match op {
                    CmpOp::Equals | CmpOp::NotEquals => left.ty != Type::Void,
                    _ => left.ty.is_numeric() || left.ty == Type::String,
                };
                if !comparable {
                    return Err(Error::new(
                        ErrorImpl::TypeMismatch {
                            expected: String::from("a comparable type"),
                            received: left.ty.to_string(),
                        },
                        node.child(0).span.start.clone(),
                    ));
                }

                Ok(Expr::new(Type::Bool, ExprKind::Comparison { left, op, right }))
            }
            symbol => {
                let op = match NumericOp::from_symbol(symbol) {
                    Some(op) => op,
                    None => unreachable!("`{}` is not a binary operator", symbol),
                };

                if op == NumericOp::Add && left.ty.is_array() {
                    if !right.ty.equivalent(&left.ty) {
                        return Err(Error::new(
                            ErrorImpl::ArrayTypeMismatch {
                                left: left.ty.to_string(),
                                right: right.ty.to_string(),
                            },
                            node.child(2).span.start.clone(),
                        ));
                    }

                    let ty = left.ty.clone();
                    return Ok(Expr::new(ty, ExprKind::ArrayConcat { left, right }));
                }

                if !right.ty.equivalent(&left.ty) {
                    return Err(mismatch(&left.ty, &right.ty, node.child(2)));
                }

                let ty = left.ty.clone();
                if op == NumericOp::Add && ty == Type::String {
                    return Ok(Expr::new(ty, ExprKind::Str { left, right }));
                }

                if !ty.is_numeric() {
                    return Err(Error::new(
                        ErrorImpl::TypeMismatch {
                            expected: String::from("a numeric type"),
                            received: ty.to_string(),
                        },
                        node.child(0).span.start.clone(),
                    ));
                }

                Ok(Expr::new(ty, ExprKind::Numeric { left, op, right }))
            }
        }
    }

    fn analyze_unary_expr(&mut self, node: &Node, scope: ScopeId) -> Result<Expr, Error> {
        let operand = self.analyze_expr(node.child(1), scope)?;

        let op = if node.child(0).text == "!" {
            expect_type(&operand, &Type::Bool, node.child(1))?;
            UnaryOp::Not
        } else {
            if !operand.ty.is_numeric() {
                return Err(Error::new(
                    ErrorImpl::TypeMismatch {
                        expected: String::from("a numeric type"),
                        received: operand.ty.to_string(),
                    },
                    node.child(1).span.start.clone(),
                ));
            }
            UnaryOp::Neg
        };

        Ok(Expr::new(
            operand.ty.clone(),
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
        ))
    }

    fn analyze_increment_expr(
        &mut self,
        node: &Node,
        target: &Node,
        operator: &Node,
        prefix: bool,
        scope: ScopeId,
    ) -> Result<Expr, Error> {
        let entity = self.resolve(scope, target)?;

        let ty = match self.entity(entity) {
            Entity::Variable(variable) if variable.ty.is_numeric() => variable.ty.clone(),
            other => {
                return Err(Error::new(
                    ErrorImpl::TypeMismatch {
                        expected: String::from("a numeric variable"),
                        received: other.ty().to_string(),
                    },
                    node.span.start.clone(),
                ))
            }
        };

        let op = if operator.text == "++" {
            IncrementOp::Increment
        } else {
            IncrementOp::Decrement
        };

        Ok(Expr::new(ty, ExprKind::Increment { entity, op, prefix }))
    }

    fn analyze_call_expr(&mut self, node: &Node, scope: ScopeId) -> Result<Expr, Error> {
        let callee_node = node.child(0);
        let not_a_function = || {
            Error::new(
                ErrorImpl::CallOfNonFunction {
                    name: callee_node.text.clone(),
                },
                callee_node.span.start.clone(),
            )
        };

        if callee_node.rule != Rule::Identifier {
            return Err(not_a_function());
        }

        let callee = self.resolve(scope, callee_node)?;
        let Entity::Function(function) = self.entity(callee) else {
            return Err(not_a_function());
        };
        let signature = function.signature.clone();

        let arg_nodes = &node.child(1).children;
        if arg_nodes.len() != signature.params.len() {
            return Err(Error::new(
                ErrorImpl::ArityMismatch {
                    expected: signature.params.len(),
                    received: arg_nodes.len(),
                },
                node.child(1).span.start.clone(),
            ));
        }

        let mut args = Vec::with_capacity(arg_nodes.len());
        for (arg_node, param) in arg_nodes.iter().zip(&signature.params) {
            let arg = self.analyze_expr(arg_node, scope)?;
            if !arg.ty.assignable(param) {
                return Err(Error::new(
                    ErrorImpl::ArgumentTypeMismatch {
                        expected: param.to_string(),
                        received: arg.ty.to_string(),
                    },
                    arg_node.span.start.clone(),
                ));
            }
            args.push(arg);
        }

        Ok(Expr::new(*signature.ret, ExprKind::Call { callee, args }))
    }

    fn analyze_index_expr(&mut self, node: &Node, scope: ScopeId) -> Result<Expr, Error> {
        let array = self.analyze_expr(node.child(0), scope)?;
        let Some(element) = array.ty.element_type().cloned() else {
            return Err(Error::new(
                ErrorImpl::TypeMismatch {
                    expected: String::from("an array"),
                    received: array.ty.to_string(),
                },
                node.child(0).span.start.clone(),
            ));
        };

        let index = self.analyze_int_operand(node.child(1), scope)?;

        Ok(Expr::new(
            element,
            ExprKind::Index {
                array: Box::new(array),
                index: Box::new(index),
            },
        ))
    }

    fn analyze_array_literal_expr(&mut self, node: &Node, scope: ScopeId) -> Result<Expr, Error> {
        let element = self.resolve_type(node.child(0));
        if element == Type::Void {
            return Err(mismatch(&Type::Any, &element, node.child(0)));
        }

        let size = self.analyze_int_operand(node.child(1), scope)?;

        Ok(Expr::new(
            Type::array_of(element),
            ExprKind::ArrayLiteral {
                size: Box::new(size),
            },
        ))
    }

    /// Array indices and sizes must be exactly `int`.
    fn analyze_int_operand(&mut self, node: &Node, scope: ScopeId) -> Result<Expr, Error> {
        let operand = self.analyze_expr(node, scope)?;
        if operand.ty != Type::Int {
            return Err(Error::new(
                ErrorImpl::NonIntegerIndex {
                    received: operand.ty.to_string(),
                },
                node.span.start.clone(),
            ));
        }
        Ok(operand)
    }

    fn analyze_typecast_expr(&mut self, node: &Node, scope: ScopeId) -> Result<Expr, Error> {
        let target = self.resolve_type(node.child(0));
        let operand = self.analyze_expr(node.child(1), scope)?;

        if !operand.ty.castable(&target) {
            return Err(Error::new(
                ErrorImpl::IllegalCast {
                    from: operand.ty.to_string(),
                    to: target.to_string(),
                },
                node.span.start.clone(),
            ));
        }

        Ok(Expr::new(
            target,
            ExprKind::Typecast {
                operand: Box::new(operand),
            },
        ))
    }
}

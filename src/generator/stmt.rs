use crate::{
    ir::ir::{ElseIf, NumericOp, Stmt},
    types::{entities::Entity, types::Type},
};

use super::{expr::Precedence, generator::Generator};

impl Generator<'_> {
    pub fn emit_block(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.emit_stmt(stmt);
        }
    }

    fn emit_body(&mut self, statements: &[Stmt]) {
        self.indent();
        self.emit_block(statements);
        self.dedent();
    }

    pub fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::While { condition, body } => {
                let condition = self.expr(condition);
                self.line(format!("while ({}) {{", condition));
                self.emit_body(body);
                self.line(String::from("}"));
            }
            Stmt::If {
                condition,
                body,
                else_ifs,
                else_body,
            } => {
                let condition = self.expr(condition);
                self.line(format!("if ({}) {{", condition));
                self.emit_body(body);

                for ElseIf { condition, body } in else_ifs {
                    let condition = self.expr(condition);
                    self.line(format!("}} else if ({}) {{", condition));
                    self.emit_body(body);
                }

                if let Some(else_body) = else_body {
                    self.line(String::from("} else {"));
                    self.emit_body(else_body);
                }

                self.line(String::from("}"));
            }
            Stmt::For {
                init,
                condition,
                step,
                body,
            } => {
                let init = self.simple_stmt(init);
                let condition = self.expr(condition);
                let header = match step {
                    Some(step) => format!("for ({}; {}; {}) {{", init, condition, self.simple_stmt(step)),
                    None => format!("for ({}; {};) {{", init, condition),
                };

                self.line(header);
                self.emit_body(body);
                self.line(String::from("}"));
            }
            Stmt::ForEach {
                element,
                collection,
                body,
            } => {
                let element = self.name(*element);
                let collection = self.expr(collection);
                self.line(format!("for (let {} of {}) {{", element, collection));
                self.emit_body(body);
                self.line(String::from("}"));
            }
            Stmt::FunctionDecl { function, body } => {
                let name = self.name(*function);
                let params = match self.entities().get(*function) {
                    Entity::Function(function) => function.params.clone(),
                    _ => vec![],
                };
                let params = params
                    .into_iter()
                    .map(|param| self.name(param))
                    .collect::<Vec<_>>()
                    .join(", ");

                self.line(format!("function {}({}) {{", name, params));
                self.emit_body(body);
                self.line(String::from("}"));
            }
            simple => {
                let text = self.simple_stmt(simple);
                self.line(format!("{};", text));
            }
        }
    }

    /// Renders a statement that fits on one line, without indentation or the
    /// trailing `;`.
    fn simple_stmt(&mut self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::VarDecl { entity, value } => {
                let name = self.name(*entity);
                format!("let {} = {}", name, self.expr(value))
            }
            Stmt::Assign { target, value } => {
                let name = self.name(*target);
                format!("{} = {}", name, self.expr(value))
            }
            Stmt::CompoundAssign { target, op, value } => {
                let name = self.name(*target);
                if *op == NumericOp::Div && value.ty == Type::Int {
                    let divisor = self.operand(value, Precedence::Multiplicative, true);
                    format!("{} = Math.trunc({} / {})", name, name, divisor)
                } else {
                    format!("{} {}= {}", name, op, self.expr(value))
                }
            }
            Stmt::ArrayElementAssign {
                array,
                index,
                value,
            } => {
                let array = self.operand(array, Precedence::Postfix, false);
                let index = self.expr(index);
                format!("{}[{}] = {}", array, index, self.expr(value))
            }
            Stmt::Expression(expr) => self.expr(expr),
            Stmt::Print(expr) => format!("console.log({})", self.expr(expr)),
            Stmt::Return(value) => format!("return {}", self.expr(value)),
            Stmt::ReturnVoid => String::from("return"),
            Stmt::Break => String::from("break"),
            block => unreachable!("{:?} does not fit on one line", block),
        }
    }
}

use crate::{
    cst::cst::{Node, Rule},
    errors::errors::{Error, ErrorImpl},
    ir::ir::{ElseIf, Expr, ExprKind, Number, NumericOp, Stmt},
    types::{
        entities::{Entity, FunctionEntity},
        types::{FunctionType, Type},
    },
};

use super::{
    analyzer::{expect_type, mismatch, Analyzer},
    context::ScopeId,
};

impl Analyzer {
    pub fn analyze_block(&mut self, nodes: &[Node], scope: ScopeId) -> Result<Vec<Stmt>, Error> {
        nodes.iter().map(|node| self.analyze_stmt(node, scope)).collect()
    }

    pub fn analyze_stmt(&mut self, node: &Node, scope: ScopeId) -> Result<Stmt, Error> {
        match node.rule {
            Rule::VarDecl => self.analyze_var_decl_stmt(node, scope),
            Rule::Assign => self.analyze_assign_stmt(node, scope),
            Rule::CompoundAssign => self.analyze_compound_assign_stmt(node, scope),
            Rule::ArrayElementAssign => self.analyze_array_element_assign_stmt(node, scope),
            Rule::ExpressionStmt => Ok(Stmt::Expression(self.analyze_expr(node.child(0), scope)?)),
            Rule::Print => {
                let value = self.analyze_expr(node.child(0), scope)?;
                expect_type(&value, &Type::String, node.child(0))?;
                Ok(Stmt::Print(value))
            }
            Rule::While => {
                let condition = self.analyze_condition(node.child(0), scope)?;
                let body_scope = self.scopes.enter_loop(scope);
                let body = self.analyze_block(&node.child(1).children, body_scope)?;

                Ok(Stmt::While { condition, body })
            }
            Rule::If => self.analyze_if_stmt(node, scope),
            Rule::For => self.analyze_for_stmt(node, scope),
            Rule::ForEach => self.analyze_for_each_stmt(node, scope),
            Rule::FunctionDecl => self.analyze_function_decl_stmt(node, scope),
            Rule::Return => self.analyze_return_stmt(node, scope),
            Rule::ShortReturn => self.analyze_short_return_stmt(node, scope),
            Rule::Break => {
                if !self.scopes.in_loop(scope) {
                    return Err(Error::new(ErrorImpl::BreakOutsideLoop, node.span.start.clone()));
                }
                Ok(Stmt::Break)
            }
            rule => unreachable!("{} is not a statement", rule),
        }
    }

    fn analyze_condition(&mut self, node: &Node, scope: ScopeId) -> Result<Expr, Error> {
        let condition = self.analyze_expr(node, scope)?;
        expect_type(&condition, &Type::Bool, node)?;
        Ok(condition)
    }

    fn analyze_var_decl_stmt(&mut self, node: &Node, scope: ScopeId) -> Result<Stmt, Error> {
        let (type_node, name, value_node) = (node.child(0), node.child(1), node.child(2));

        if self.scopes.is_declared_locally(scope, &name.text) {
            return Err(Error::new(
                ErrorImpl::DuplicateDeclaration {
                    name: name.text.clone(),
                },
                name.span.start.clone(),
            ));
        }

        let ty = self.resolve_type(type_node);
        if ty == Type::Void {
            return Err(mismatch(&Type::Any, &ty, type_node));
        }

        let value = self.analyze_expr(value_node, scope)?;
        if !value.ty.assignable(&ty) {
            return Err(mismatch(&ty, &value.ty, value_node));
        }

        let declared_size = match &value.kind {
            ExprKind::ArrayLiteral { size } => match size.kind {
                ExprKind::NumericLiteral(Number::Int(size)) => Some(size),
                _ => None,
            },
            _ => None,
        };

        let entity = self.declare(scope, Entity::value(&name.text, ty, declared_size), name)?;

        Ok(Stmt::VarDecl { entity, value })
    }

    fn analyze_assign_stmt(&mut self, node: &Node, scope: ScopeId) -> Result<Stmt, Error> {
        let target_node = node.child(0);
        let target = self.resolve(scope, target_node)?;
        let target_type = self.entity(target).ty();

        if self.entity(target).is_function() {
            return Err(Error::new(
                ErrorImpl::TypeMismatch {
                    expected: String::from("a variable"),
                    received: target_type.to_string(),
                },
                target_node.span.start.clone(),
            ));
        }

        let value = self.analyze_expr(node.child(1), scope)?;
        if !value.ty.assignable(&target_type) {
            return Err(mismatch(&target_type, &value.ty, node.child(1)));
        }

        Ok(Stmt::Assign { target, value })
    }

    fn analyze_compound_assign_stmt(&mut self, node: &Node, scope: ScopeId) -> Result<Stmt, Error> {
        let target_node = node.child(0);
        let target = self.resolve(scope, target_node)?;
        let target_type = self.entity(target).ty();

        let op = match NumericOp::from_symbol(&node.child(1).text) {
            Some(op) => op,
            None => unreachable!("`{}` is not a compound assignment", node.child(1).text),
        };

        // `+=` also appends to strings
        let applicable = match self.entity(target) {
            Entity::Variable(_) => {
                target_type.is_numeric() || (op == NumericOp::Add && target_type == Type::String)
            }
            _ => false,
        };
        if !applicable {
            return Err(Error::new(
                ErrorImpl::TypeMismatch {
                    expected: String::from("a numeric variable"),
                    received: target_type.to_string(),
                },
                target_node.span.start.clone(),
            ));
        }

        let value = self.analyze_expr(node.child(2), scope)?;
        if !value.ty.assignable(&target_type) {
            return Err(mismatch(&target_type, &value.ty, node.child(2)));
        }

        Ok(Stmt::CompoundAssign { target, op, value })
    }

    fn analyze_array_element_assign_stmt(&mut self, node: &Node, scope: ScopeId) -> Result<Stmt, Error> {
        let element = self.analyze_expr(node.child(0), scope)?;
        let value = self.analyze_expr(node.child(1), scope)?;

        if !value.ty.assignable(&element.ty) {
            return Err(mismatch(&element.ty, &value.ty, node.child(1)));
        }

        let ExprKind::Index { array, index } = element.kind else {
            unreachable!("array element assignment without an index expression");
        };

        Ok(Stmt::ArrayElementAssign {
            array: *array,
            index: *index,
            value,
        })
    }

    fn analyze_if_stmt(&mut self, node: &Node, scope: ScopeId) -> Result<Stmt, Error> {
        let condition = self.analyze_condition(node.child(0), scope)?;
        let body_scope = self.scopes.enter(scope);
        let body = self.analyze_block(&node.child(1).children, body_scope)?;

        let mut else_ifs = vec![];
        let mut else_body = None;

        for branch in &node.children[2..] {
            match branch.rule {
                Rule::ElseIf => {
                    let condition = self.analyze_condition(branch.child(0), scope)?;
                    let branch_scope = self.scopes.enter(scope);
                    let body = self.analyze_block(&branch.child(1).children, branch_scope)?;
                    else_ifs.push(ElseIf { condition, body });
                }
                Rule::Else => {
                    let branch_scope = self.scopes.enter(scope);
                    else_body = Some(self.analyze_block(&branch.child(0).children, branch_scope)?);
                }
                rule => unreachable!("{} is not an if branch", rule),
            }
        }

        Ok(Stmt::If {
            condition,
            body,
            else_ifs,
            else_body,
        })
    }

    fn analyze_for_stmt(&mut self, node: &Node, scope: ScopeId) -> Result<Stmt, Error> {
        let loop_scope = self.scopes.enter_loop(scope);

        let init = self.analyze_stmt(node.child(0), loop_scope)?;
        let condition = self.analyze_condition(node.child(1), loop_scope)?;

        let step_node = node.child(2);
        let step = self.analyze_stmt(step_node, loop_scope)?;
        let valid_step = match &step {
            Stmt::Assign { .. } | Stmt::CompoundAssign { .. } => true,
            Stmt::Expression(expr) => matches!(expr.kind, ExprKind::Increment { .. }),
            _ => false,
        };
        if !valid_step {
            return Err(Error::new(
                ErrorImpl::TypeMismatch {
                    expected: String::from("an assignment or increment"),
                    received: step_node.text.clone(),
                },
                step_node.span.start.clone(),
            ));
        }

        let body_scope = self.scopes.enter(loop_scope);
        let body = self.analyze_block(&node.child(3).children, body_scope)?;

        Ok(Stmt::For {
            init: Box::new(init),
            condition,
            step: Some(Box::new(step)),
            body,
        })
    }

    fn analyze_for_each_stmt(&mut self, node: &Node, scope: ScopeId) -> Result<Stmt, Error> {
        let (type_node, name, collection_node) = (node.child(0), node.child(1), node.child(2));

        let collection = self.analyze_expr(collection_node, scope)?;
        let Some(element_type) = collection.ty.element_type().cloned() else {
            return Err(Error::new(
                ErrorImpl::TypeMismatch {
                    expected: String::from("an array"),
                    received: collection.ty.to_string(),
                },
                collection_node.span.start.clone(),
            ));
        };

        let declared = self.resolve_type(type_node);
        if !declared.equivalent(&element_type) {
            return Err(mismatch(&element_type, &declared, type_node));
        }

        let loop_scope = self.scopes.enter_loop(scope);
        let element = self.declare(loop_scope, Entity::value(&name.text, declared, None), name)?;

        let body_scope = self.scopes.enter(loop_scope);
        let body = self.analyze_block(&node.child(3).children, body_scope)?;

        Ok(Stmt::ForEach {
            element,
            collection,
            body,
        })
    }

    /// Registers the function before walking its body so it can call itself.
    fn analyze_function_decl_stmt(&mut self, node: &Node, scope: ScopeId) -> Result<Stmt, Error> {
        let (return_type, name, params, body) = (node.child(0), node.child(1), node.child(2), node.child(3));

        let ret = self.resolve_type(return_type);
        let param_types: Vec<Type> = params
            .children
            .iter()
            .map(|param| self.resolve_type(param.child(0)))
            .collect();

        let function = self.declare(
            scope,
            Entity::Function(FunctionEntity {
                name: name.text.clone(),
                params: vec![],
                signature: FunctionType::new(param_types.clone(), ret),
                intrinsic: None,
            }),
            name,
        )?;

        let body_scope = self.scopes.enter_function(scope, function);

        let mut param_ids = Vec::with_capacity(param_types.len());
        for (param, ty) in params.children.iter().zip(param_types) {
            let param_name = param.child(1);
            if ty == Type::Void {
                return Err(mismatch(&Type::Any, &ty, param.child(0)));
            }
            param_ids.push(self.declare(body_scope, Entity::value(&param_name.text, ty, None), param_name)?);
        }

        if let Entity::Function(entity) = self.entities.get_mut(function) {
            entity.params = param_ids;
        }

        let body = self.analyze_block(&body.children, body_scope)?;

        Ok(Stmt::FunctionDecl { function, body })
    }

    fn enclosing_function(&self, node: &Node, scope: ScopeId) -> Result<(String, Type), Error> {
        let function = self
            .scopes
            .function(scope)
            .ok_or_else(|| Error::new(ErrorImpl::ReturnOutsideFunction, node.span.start.clone()))?;

        match self.entity(function) {
            Entity::Function(function) => Ok((function.name.clone(), (*function.signature.ret).clone())),
            other => unreachable!("scope function `{}` is not a function", other.name()),
        }
    }

    fn analyze_return_stmt(&mut self, node: &Node, scope: ScopeId) -> Result<Stmt, Error> {
        let (name, ret) = self.enclosing_function(node, scope)?;

        if ret == Type::Void {
            return Err(Error::new(
                ErrorImpl::VoidFunctionReturnsValue { function: name },
                node.span.start.clone(),
            ));
        }

        let value = self.analyze_expr(node.child(0), scope)?;
        if !value.ty.assignable(&ret) {
            return Err(Error::new(
                ErrorImpl::ReturnTypeMismatch {
                    expected: ret.to_string(),
                    received: value.ty.to_string(),
                },
                node.child(0).span.start.clone(),
            ));
        }

        Ok(Stmt::Return(value))
    }

    fn analyze_short_return_stmt(&mut self, node: &Node, scope: ScopeId) -> Result<Stmt, Error> {
        let (name, ret) = self.enclosing_function(node, scope)?;

        if ret != Type::Void {
            return Err(Error::new(
                ErrorImpl::NonVoidFunctionMissingValue {
                    function: name,
                    expected: ret.to_string(),
                },
                node.span.start.clone(),
            ));
        }

        Ok(Stmt::ReturnVoid)
    }
}

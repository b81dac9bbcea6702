use tracing::trace;

use crate::{
    cst::cst::{Node, Rule},
    errors::errors::{Error, ErrorImpl},
    ir::ir::{Expr, Program, Stmt},
    types::{
        entities::{standard_library, Entity, EntityId, EntityTable},
        types::Type,
    },
};

use super::context::{ScopeArena, ScopeId};

/// State shared by every analysis handler.
///
/// The current scope is not part of this state: each handler receives the
/// [`ScopeId`] it runs in.
pub struct Analyzer {
    pub(super) entities: EntityTable,
    pub(super) scopes: ScopeArena,
    /// Scope of the program's top-level declarations, a child of the
    /// standard library scope.
    pub(super) globals: ScopeId,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Creates an analyzer whose root scope holds the standard library.
    pub fn new() -> Self {
        let mut entities = EntityTable::new();
        let builtins = standard_library(&mut entities)
            .into_iter()
            .map(|id| (entities.get(id).name().to_string(), id))
            .collect::<Vec<_>>();

        let mut scopes = ScopeArena::with_prelude(builtins);
        let root = scopes.root();
        let globals = scopes.enter(root);

        Analyzer {
            entities,
            scopes,
            globals,
        }
    }

    pub fn entity(&self, id: EntityId) -> &Entity {
        self.entities.get(id)
    }

    /// Adds `entity` to the table and binds it in `scope`.
    pub(super) fn declare(&mut self, scope: ScopeId, entity: Entity, node: &Node) -> Result<EntityId, Error> {
        let name = entity.name().to_string();
        if self.scopes.is_declared_locally(scope, &name) {
            return Err(Error::new(ErrorImpl::DuplicateDeclaration { name }, node.span.start.clone()));
        }

        trace!("declaring `{}`: {}", name, entity.ty());
        let id = self.entities.add(entity);
        self.scopes.declare(scope, &name, id, node.span.start.clone())?;

        Ok(id)
    }

    pub(super) fn resolve(&self, scope: ScopeId, node: &Node) -> Result<EntityId, Error> {
        self.scopes.resolve(scope, &node.text, node.span.start.clone())
    }

    /// Turns a `Type` or `ArrayType` node into its type.
    pub(super) fn resolve_type(&self, node: &Node) -> Type {
        match node.rule {
            Rule::ArrayType => Type::array_of(self.resolve_type(node.child(0))),
            Rule::Type => match Type::from_keyword(&node.text) {
                Some(ty) => ty,
                None => unreachable!("type node `{}` is not a type keyword", node.text),
            },
            rule => unreachable!("{} is not a type", rule),
        }
    }

    pub(super) fn into_program(self, statements: Vec<Stmt>) -> Program {
        Program {
            statements,
            entities: self.entities,
        }
    }
}

pub(super) fn mismatch(expected: &Type, received: &Type, node: &Node) -> Error {
    Error::new(
        ErrorImpl::TypeMismatch {
            expected: expected.to_string(),
            received: received.to_string(),
        },
        node.span.start.clone(),
    )
}

/// Fails with `TypeMismatch` unless `expr` has exactly type `expected`.
pub(super) fn expect_type(expr: &Expr, expected: &Type, node: &Node) -> Result<(), Error> {
    if expr.ty.equivalent(expected) {
        Ok(())
    } else {
        Err(mismatch(expected, &expr.ty, node))
    }
}

/// Checks a parse tree and lowers it to the typed IR.
///
/// Analysis is fail-fast: the first violated rule is returned as the error.
pub fn analyze(tree: &Node) -> Result<Program, Error> {
    let mut analyzer = Analyzer::new();
    let globals = analyzer.globals;

    let statements = analyzer.analyze_block(&tree.children, globals)?;
    trace!("analyzed {} entities", analyzer.entities.len());

    Ok(analyzer.into_program(statements))
}

use std::collections::HashMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    types::entities::EntityId,
    Position,
};

/// Index of a scope inside a [`ScopeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub usize);

#[derive(Debug, Clone)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    locals: HashMap<String, EntityId>,
    pub in_loop: bool,
    /// The function whose body this scope belongs to, if any.
    pub function: Option<EntityId>,
}

/// Every scope created while analyzing one program.
///
/// Scopes are never removed; leaving a scope means going back to using the
/// parent's id.
#[derive(Debug, Clone)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl Default for ScopeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeArena {
    /// Creates an arena holding only the root scope.
    pub fn new() -> Self {
        ScopeArena {
            scopes: vec![Scope {
                parent: None,
                locals: HashMap::new(),
                in_loop: false,
                function: None,
            }],
        }
    }

    /// Creates an arena whose root scope holds `bindings`.
    ///
    /// Programs are analyzed in a child of this root, so their declarations
    /// shadow these names instead of colliding with them.
    pub fn with_prelude(bindings: impl IntoIterator<Item = (String, EntityId)>) -> Self {
        let mut arena = Self::new();
        arena.scopes[0].locals.extend(bindings);
        arena
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn get(&self, scope: ScopeId) -> &Scope {
        &self.scopes[scope.0]
    }

    /// Opens a child scope inheriting the loop flag and enclosing function.
    pub fn enter(&mut self, parent: ScopeId) -> ScopeId {
        let scope = self.get(parent);
        let (in_loop, function) = (scope.in_loop, scope.function);
        self.push(parent, in_loop, function)
    }

    pub fn enter_loop(&mut self, parent: ScopeId) -> ScopeId {
        let function = self.get(parent).function;
        self.push(parent, true, function)
    }

    /// Opens the scope of a function body. Loops outside the function do not
    /// count as enclosing its body.
    pub fn enter_function(&mut self, parent: ScopeId, function: EntityId) -> ScopeId {
        self.push(parent, false, Some(function))
    }

    fn push(&mut self, parent: ScopeId, in_loop: bool, function: Option<EntityId>) -> ScopeId {
        self.scopes.push(Scope {
            parent: Some(parent),
            locals: HashMap::new(),
            in_loop,
            function,
        });
        ScopeId(self.scopes.len() - 1)
    }

    /// Binds `name` in `scope` itself. Names in enclosing scopes may be shadowed.
    pub fn declare(
        &mut self,
        scope: ScopeId,
        name: &str,
        entity: EntityId,
        position: Position,
    ) -> Result<(), Error> {
        let locals = &mut self.scopes[scope.0].locals;

        if locals.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::DuplicateDeclaration {
                    name: String::from(name),
                },
                position,
            ));
        }

        locals.insert(String::from(name), entity);
        Ok(())
    }

    pub fn is_declared_locally(&self, scope: ScopeId, name: &str) -> bool {
        self.get(scope).locals.contains_key(name)
    }

    /// Finds the nearest binding of `name`, walking outward from `scope`.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<EntityId> {
        let mut current = Some(scope);

        while let Some(id) = current {
            let scope = self.get(id);
            if let Some(entity) = scope.locals.get(name) {
                return Some(*entity);
            }
            current = scope.parent;
        }

        None
    }

    pub fn resolve(&self, scope: ScopeId, name: &str, position: Position) -> Result<EntityId, Error> {
        self.lookup(scope, name).ok_or_else(|| {
            Error::new(
                ErrorImpl::UnknownIdentifier {
                    name: String::from(name),
                },
                position,
            )
        })
    }

    pub fn in_loop(&self, scope: ScopeId) -> bool {
        self.get(scope).in_loop
    }

    pub fn function(&self, scope: ScopeId) -> Option<EntityId> {
        self.get(scope).function
    }
}

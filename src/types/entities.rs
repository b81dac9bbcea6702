use super::types::{FunctionType, Type};

/// Index of an entity inside an [`EntityTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct VariableEntity {
    pub name: String,
    pub ty: Type,
    /// Emitted verbatim in place of a generated name.
    pub intrinsic: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayEntity {
    pub name: String,
    /// Always a `Type::Array`.
    pub ty: Type,
    /// Known when the initializer was an array literal with a literal size.
    pub declared_size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionEntity {
    pub name: String,
    pub params: Vec<EntityId>,
    pub signature: FunctionType,
    pub intrinsic: Option<&'static str>,
}

/// Whatever a declared name resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Variable(VariableEntity),
    Array(ArrayEntity),
    Function(FunctionEntity),
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Entity::Variable(variable) => &variable.name,
            Entity::Array(array) => &array.name,
            Entity::Function(function) => &function.name,
        }
    }

    /// The type of the entity when used as a value.
    pub fn ty(&self) -> Type {
        match self {
            Entity::Variable(variable) => variable.ty.clone(),
            Entity::Array(array) => array.ty.clone(),
            Entity::Function(function) => Type::Function(function.signature.clone()),
        }
    }

    pub fn intrinsic(&self) -> Option<&'static str> {
        match self {
            Entity::Variable(variable) => variable.intrinsic,
            Entity::Array(_) => None,
            Entity::Function(function) => function.intrinsic,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Entity::Function(_))
    }

    /// Declares a value of type `ty`; array types become array entities.
    pub fn value(name: &str, ty: Type, declared_size: Option<i64>) -> Self {
        if ty.is_array() {
            Entity::Array(ArrayEntity {
                name: String::from(name),
                ty,
                declared_size,
            })
        } else {
            Entity::Variable(VariableEntity {
                name: String::from(name),
                ty,
                intrinsic: None,
            })
        }
    }
}

/// Arena owning every entity of a program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityTable {
    entities: Vec<Entity>,
}

impl EntityTable {
    pub fn new() -> Self {
        EntityTable::default()
    }

    pub fn add(&mut self, entity: Entity) -> EntityId {
        self.entities.push(entity);
        EntityId(self.entities.len() - 1)
    }

    pub fn get(&self, id: EntityId) -> &Entity {
        &self.entities[id.0]
    }

    pub fn get_mut(&mut self, id: EntityId) -> &mut Entity {
        &mut self.entities[id.0]
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(index, entity)| (EntityId(index), entity))
    }
}

/// The builtins visible from every program: `sqrt` and `pi`.
pub fn standard_library(entities: &mut EntityTable) -> Vec<EntityId> {
    let x = entities.add(Entity::Variable(VariableEntity {
        name: String::from("x"),
        ty: Type::Double,
        intrinsic: None,
    }));

    let sqrt = entities.add(Entity::Function(FunctionEntity {
        name: String::from("sqrt"),
        params: vec![x],
        signature: FunctionType::new(vec![Type::Double], Type::Double),
        intrinsic: Some("Math.sqrt"),
    }));

    let pi = entities.add(Entity::Variable(VariableEntity {
        name: String::from("pi"),
        ty: Type::Double,
        intrinsic: Some("Math.PI"),
    }));

    vec![sqrt, pi]
}

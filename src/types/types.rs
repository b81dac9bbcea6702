use std::fmt::Display;

/// A Convaneo type. Equality is structural.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Int,
    Float,
    Double,
    Bool,
    String,
    Void,
    /// Accepts a value of any type, never produces one.
    Any,
    Array(Box<Type>),
    Function(FunctionType),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub params: Vec<Type>,
    pub ret: Box<Type>,
}

impl FunctionType {
    pub fn new(params: Vec<Type>, ret: Type) -> Self {
        FunctionType {
            params,
            ret: Box::new(ret),
        }
    }
}

impl Type {
    pub fn array_of(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    /// Maps a source spelling (`int`, `string`, ...) to its type.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "int" => Some(Type::Int),
            "float" => Some(Type::Float),
            "double" => Some(Type::Double),
            "bool" => Some(Type::Bool),
            "string" => Some(Type::String),
            "void" => Some(Type::Void),
            "any" => Some(Type::Any),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float | Type::Double)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Array(element) => Some(element),
            _ => None,
        }
    }

    pub fn equivalent(&self, other: &Type) -> bool {
        self == other
    }

    /// Whether a value of type `self` may be stored in a slot of type `target`.
    ///
    /// No numeric coercion happens: `int` is not assignable to `double`.
    /// Function types are contravariant in their parameters and covariant in
    /// their return type.
    pub fn assignable(&self, target: &Type) -> bool {
        if *target == Type::Any || self.equivalent(target) {
            return true;
        }

        match (self, target) {
            (Type::Function(from), Type::Function(to)) => {
                from.params.len() == to.params.len()
                    && to
                        .params
                        .iter()
                        .zip(&from.params)
                        .all(|(to_param, from_param)| to_param.assignable(from_param))
                    && from.ret.assignable(&to.ret)
            }
            _ => false,
        }
    }

    pub fn castable(&self, target: &Type) -> bool {
        (self.is_numeric() && target.is_numeric())
            || self == target
            || *self == Type::String
            || *target == Type::String
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Double => write!(f, "double"),
            Type::Bool => write!(f, "bool"),
            Type::String => write!(f, "string"),
            Type::Void => write!(f, "void"),
            Type::Any => write!(f, "any"),
            Type::Array(element) => write!(f, "{}[]", element),
            Type::Function(function) => write!(f, "{}", function),
        }
    }
}

impl Display for FunctionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self
            .params
            .iter()
            .map(|param| param.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "({}) -> {}", params, self.ret)
    }
}

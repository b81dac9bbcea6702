use super::{
    entities::{standard_library, Entity, EntityTable},
    types::{FunctionType, Type},
};

#[test]
fn test_equivalence_is_structural() {
    assert!(Type::Int.equivalent(&Type::Int));
    assert!(!Type::Int.equivalent(&Type::Double));
    assert!(Type::array_of(Type::Int).equivalent(&Type::array_of(Type::Int)));
    assert!(!Type::array_of(Type::Int).equivalent(&Type::array_of(Type::Float)));
    assert!(Type::array_of(Type::array_of(Type::Bool)).equivalent(&Type::array_of(Type::array_of(Type::Bool))));
}

#[test]
fn test_assignable_without_coercion() {
    assert!(Type::Int.assignable(&Type::Int));
    assert!(!Type::Int.assignable(&Type::Double));
    assert!(!Type::Float.assignable(&Type::Int));
    assert!(!Type::String.assignable(&Type::Bool));
}

#[test]
fn test_any_is_a_sink_only() {
    assert!(Type::Int.assignable(&Type::Any));
    assert!(Type::array_of(Type::String).assignable(&Type::Any));
    assert!(!Type::Any.assignable(&Type::Int));
}

#[test]
fn test_function_subtyping() {
    let takes_any = Type::Function(FunctionType::new(vec![Type::Any], Type::Int));
    let takes_int = Type::Function(FunctionType::new(vec![Type::Int], Type::Int));
    let returns_any = Type::Function(FunctionType::new(vec![Type::Int], Type::Any));
    let two_params = Type::Function(FunctionType::new(vec![Type::Int, Type::Int], Type::Int));

    // Parameters are contravariant
    assert!(takes_any.assignable(&takes_int));
    assert!(!takes_int.assignable(&takes_any));

    // Return types are covariant
    assert!(takes_int.assignable(&returns_any));
    assert!(!returns_any.assignable(&takes_int));

    assert!(!takes_int.assignable(&two_params));
}

#[test]
fn test_castable() {
    assert!(Type::Int.castable(&Type::Double));
    assert!(Type::Double.castable(&Type::Float));
    assert!(Type::Bool.castable(&Type::Bool));
    assert!(Type::Int.castable(&Type::String));
    assert!(Type::String.castable(&Type::Int));
    assert!(Type::Void.castable(&Type::String));

    assert!(!Type::Int.castable(&Type::Bool));
    assert!(!Type::Bool.castable(&Type::Int));
    assert!(!Type::array_of(Type::Int).castable(&Type::Int));
}

#[test]
fn test_is_numeric() {
    assert!(Type::Int.is_numeric());
    assert!(Type::Float.is_numeric());
    assert!(Type::Double.is_numeric());
    assert!(!Type::Bool.is_numeric());
    assert!(!Type::Any.is_numeric());
}

#[test]
fn test_type_display() {
    assert_eq!(Type::Int.to_string(), "int");
    assert_eq!(Type::array_of(Type::array_of(Type::String)).to_string(), "string[][]");
    assert_eq!(
        Type::Function(FunctionType::new(vec![Type::Int, Type::Bool], Type::Void)).to_string(),
        "(int, bool) -> void"
    );
}

#[test]
fn test_from_keyword() {
    assert_eq!(Type::from_keyword("double"), Some(Type::Double));
    assert_eq!(Type::from_keyword("string"), Some(Type::String));
    assert_eq!(Type::from_keyword("ints"), None);
}

#[test]
fn test_value_entities() {
    assert!(matches!(Entity::value("a", Type::array_of(Type::Int), Some(5)), Entity::Array(array) if array.declared_size == Some(5)));
    assert!(matches!(Entity::value("x", Type::Int, None), Entity::Variable(_)));
}

#[test]
fn test_standard_library() {
    let mut entities = EntityTable::new();
    let builtins = standard_library(&mut entities);

    let names: Vec<&str> = builtins.iter().map(|id| entities.get(*id).name()).collect();
    assert_eq!(names, vec!["sqrt", "pi"]);

    let sqrt = entities.get(builtins[0]);
    assert_eq!(sqrt.intrinsic(), Some("Math.sqrt"));
    assert_eq!(sqrt.ty(), Type::Function(FunctionType::new(vec![Type::Double], Type::Double)));
    assert_eq!(entities.get(builtins[1]).intrinsic(), Some("Math.PI"));
}

//! Contains typed objects and variables via the [`TypedEntity`] type.

use crate::parsed_types::{Name, Type};

/// A named entity with a type. Used uniformly for variables (`?x`) and
/// concrete objects.
///
/// Ordering is by name first, which keeps serialized object lists stable.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TypedEntity {
    name: Name,
    r#type: Type,
}

impl TypedEntity {
    pub fn new<N: Into<Name>, T: Into<Type>>(name: N, r#type: T) -> Self {
        Self {
            name: name.into(),
            r#type: r#type.into(),
        }
    }

    pub const fn name(&self) -> &Name {
        &self.name
    }

    pub const fn type_(&self) -> &Type {
        &self.r#type
    }

    pub fn is_variable(&self) -> bool {
        self.name.is_variable()
    }

    /// Renders the entity as it appears in a typed list, e.g. `?x - truck`.
    /// Entities of the implicit type render as their bare name.
    pub fn to_typed_string(&self) -> String {
        if self.r#type.is_implicit() {
            self.name.to_string()
        } else {
            format!("{} - {}", self.name, self.r#type)
        }
    }
}

/// Converts values into [`TypedEntity`] instances.
pub trait ToTyped {
    fn to_typed<T: Into<Type>>(self, r#type: T) -> TypedEntity;
}

impl<N: Into<Name>> ToTyped for N {
    fn to_typed<T: Into<Type>>(self, r#type: T) -> TypedEntity {
        TypedEntity::new(self, r#type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_name_first() {
        let a = "b".to_typed("a");
        let b = "a".to_typed("z");
        assert!(b < a);
    }

    #[test]
    fn typed_string_hides_the_implicit_type() {
        assert_eq!("?x".to_typed("truck").to_typed_string(), "?x - truck");
        assert_eq!("?x".to_typed(Type::implicit()).to_typed_string(), "?x");
    }
}

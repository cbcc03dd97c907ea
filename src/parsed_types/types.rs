//! Provides the type table and type hierarchy via the [`Types`] type.

use crate::parsed_types::{Name, Type};
use std::collections::{BTreeMap, BTreeSet};

/// The declared types of a domain together with their hierarchy.
///
/// A type may have several supertypes. The hierarchy is stored as a map from
/// supertype to its immediate subtypes, mirroring how `(:types a b - c)`
/// reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Types {
    uses_typing: bool,
    /// Declared types in declaration order.
    declared: Vec<Type>,
    /// Supertype -> immediate subtypes.
    hierarchy: BTreeMap<Type, BTreeSet<Type>>,
}

impl Types {
    /// The type table of a domain that declares no `:types`.
    pub fn untyped() -> Self {
        Self {
            uses_typing: false,
            declared: vec![Type::implicit()],
            hierarchy: BTreeMap::new(),
        }
    }

    /// An empty table for a domain with typing; populate it with
    /// [`Types::declare`] and [`Types::add_subtypes`].
    pub fn typed() -> Self {
        Self {
            uses_typing: true,
            declared: vec![],
            hierarchy: BTreeMap::new(),
        }
    }

    pub fn uses_typing(&self) -> bool {
        self.uses_typing
    }

    /// Registers `r#type` if it is not known yet and returns it.
    pub fn declare(&mut self, r#type: Type) -> Type {
        if !self.declared.contains(&r#type) {
            self.declared.push(r#type);
        }
        r#type
    }

    /// Records that every type in `subtypes` is an immediate subtype of
    /// `supertype`. All types involved are declared on the way.
    pub fn add_subtypes<I: IntoIterator<Item = Type>>(&mut self, subtypes: I, supertype: Type) {
        self.declare(supertype);
        let subtypes: Vec<Type> = subtypes.into_iter().map(|t| self.declare(t)).collect();
        self.hierarchy
            .entry(supertype)
            .or_default()
            .extend(subtypes);
    }

    pub fn get(&self, name: &str) -> Option<Type> {
        self.declared.iter().find(|t| t.name().as_str() == name).copied()
    }

    pub fn contains(&self, r#type: &Type) -> bool {
        self.declared.contains(r#type)
    }

    pub fn values(&self) -> &[Type] {
        &self.declared
    }

    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    /// Supertype -> immediate subtypes.
    pub fn hierarchy(&self) -> &BTreeMap<Type, BTreeSet<Type>> {
        &self.hierarchy
    }

    /// Returns the immediate supertypes of `r#type`.
    pub fn parents(&self, r#type: &Type) -> BTreeSet<Type> {
        self.hierarchy
            .iter()
            .filter(|(_, subtypes)| subtypes.contains(r#type))
            .map(|(supertype, _)| *supertype)
            .collect()
    }

    /// Returns `r#type` together with all of its transitive supertypes.
    pub fn ancestors(&self, r#type: &Type) -> BTreeSet<Type> {
        let mut seen = BTreeSet::from([*r#type]);
        let mut frontier = vec![*r#type];
        while let Some(current) = frontier.pop() {
            for parent in self.parents(&current) {
                if seen.insert(parent) {
                    frontier.push(parent);
                }
            }
        }
        seen
    }

    /// Whether `sub` equals `sup` or transitively inherits from it.
    pub fn is_subtype_of(&self, sub: &Type, sup: &Type) -> bool {
        sub == sup || self.ancestors(sub).contains(sup)
    }

    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.declared.iter().map(Type::name)
    }
}

impl Default for Types {
    fn default() -> Self {
        Self::untyped()
    }
}

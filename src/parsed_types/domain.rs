//! Contains the [`Domain`] type and its [`DomainBuilder`].

use crate::error::{PddlError, Result, SymbolKind};
use crate::parsed_types::{
    ActionName, Formula, FunctionDefinition, Name, Operator, PredicateDefinition, PredicateName,
    SymbolTable, Type, TypedEntity, Types,
};
use std::collections::BTreeSet;

/// The `Domain` type specifies a problem domain in which to plan.
///
/// ## Usage
/// This is the top-level type of a domain description. See also
/// [`Problem`](crate::Problem).
///
/// ## Example
/// ```
/// # use pddl_ground::{Domain, Name, ParserConfig};
/// let input = r#"
/// (define
///     (domain sokoban)
///     (:requirements :typing)
///     (:types location direction box)
///
///     (:constants down up left right - direction)
///
///     (:predicates
///          (at-robot ?l - location)
///          (at ?o - box ?l - location)
///          (adjacent ?l1 - location ?l2 - location ?d - direction)
///          (clear ?l - location)
///     )
///
///     (:action move
///         :parameters (?from - location ?to - location ?dir - direction)
///         :precondition (and (clear ?to) (at-robot ?from) (adjacent ?from ?to ?dir))
///         :effect (and (at-robot ?to) (not (at-robot ?from)))
///     )
///)"#;
///
/// let domain = Domain::from_str(input, &ParserConfig::default()).unwrap();
///
/// assert_eq!(domain.name(), &Name::new("sokoban"));
/// assert_eq!(domain.requirements().len(), 1);
/// assert_eq!(domain.types().len(), 3);
/// assert_eq!(domain.constants().len(), 4);
/// assert_eq!(domain.predicates().len(), 4);
/// assert_eq!(domain.operators().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    /// The domain name.
    name: Name,
    /// The specified requirements, e.g. `:typing`.
    requirements: Vec<Name>,
    /// The declared types and their hierarchy.
    types: Types,
    /// The optional constant declarations.
    constants: Vec<TypedEntity>,
    /// The predicate definitions, action predicates included.
    predicates: Vec<PredicateDefinition>,
    /// The numeric function definitions.
    functions: Vec<FunctionDefinition>,
    /// The operators in file order.
    operators: Vec<Operator>,
    /// Names of the predicates that stand for actions.
    action_predicates: BTreeSet<PredicateName>,
    operators_as_actions: bool,
    is_probabilistic: bool,
}

impl Domain {
    /// Creates a builder to easily construct [`Domain`] instances.
    pub fn builder<N: Into<Name>>(name: N) -> DomainBuilder {
        DomainBuilder::new(name.into())
    }

    /// Gets the domain name.
    pub const fn name(&self) -> &Name {
        &self.name
    }

    pub fn requirements(&self) -> &[Name] {
        &self.requirements
    }

    pub const fn types(&self) -> &Types {
        &self.types
    }

    pub fn constants(&self) -> &[TypedEntity] {
        &self.constants
    }

    pub fn predicates(&self) -> &[PredicateDefinition] {
        &self.predicates
    }

    pub fn functions(&self) -> &[FunctionDefinition] {
        &self.functions
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn operator(&self, name: &str) -> Option<&Operator> {
        self.operators
            .iter()
            .find(|op| op.name().name().as_str() == name)
    }

    pub const fn action_predicates(&self) -> &BTreeSet<PredicateName> {
        &self.action_predicates
    }

    pub fn is_action_predicate(&self, name: &str) -> bool {
        self.action_predicates
            .iter()
            .any(|p| p.name().as_str() == name)
    }

    /// Whether every operator doubles as an action predicate of the same
    /// name.
    pub const fn operators_as_actions(&self) -> bool {
        self.operators_as_actions
    }

    /// Whether any operator effect contains a probabilistic node.
    pub const fn is_probabilistic(&self) -> bool {
        self.is_probabilistic
    }

    /// Returns a copy of this domain with `operators` in place of the
    /// current ones. The probabilistic flag is recomputed.
    pub fn with_operators(&self, operators: Vec<Operator>) -> Self {
        let is_probabilistic = operators
            .iter()
            .any(|op| op.effect().contains_probabilistic());
        Self {
            operators,
            is_probabilistic,
            ..self.clone()
        }
    }
}

impl SymbolTable for Domain {
    fn types(&self) -> &Types {
        &self.types
    }

    fn predicate(&self, name: &str) -> Option<&PredicateDefinition> {
        self.predicates.iter().find(|p| p.name().as_str() == name)
    }

    fn function(&self, name: &str) -> Option<&FunctionDefinition> {
        self.functions.iter().find(|f| f.name().as_str() == name)
    }

    fn constants(&self) -> &[TypedEntity] {
        &self.constants
    }
}

impl AsRef<Types> for Domain {
    fn as_ref(&self) -> &Types {
        &self.types
    }
}

/// Incrementally assembles a [`Domain`].
///
/// The builder already answers [`SymbolTable`] queries, so operators can be
/// parsed against the predicates and functions registered so far.
#[derive(Debug, Clone, Default)]
pub struct DomainBuilder {
    name: Name,
    requirements: Vec<Name>,
    types: Types,
    constants: Vec<TypedEntity>,
    predicates: Vec<PredicateDefinition>,
    functions: Vec<FunctionDefinition>,
    operators: Vec<Operator>,
    action_predicates: Option<Vec<Name>>,
    operators_as_actions: bool,
}

impl DomainBuilder {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Adds a list of optional domain requirements.
    pub fn with_requirements<R: Into<Vec<Name>>>(mut self, requirements: R) -> Self {
        self.requirements = requirements.into();
        self
    }

    /// Adds the type declarations.
    pub fn with_types(mut self, types: Types) -> Self {
        self.types = types;
        self
    }

    /// Adds a list of optional constant declarations.
    pub fn with_constants<C: Into<Vec<TypedEntity>>>(mut self, constants: C) -> Self {
        self.constants = constants.into();
        self
    }

    /// Adds a list of predicate definitions.
    pub fn with_predicates<P: Into<Vec<PredicateDefinition>>>(mut self, predicates: P) -> Self {
        self.predicates = predicates.into();
        self
    }

    /// Adds a list of numeric function definitions.
    pub fn with_functions<F: Into<Vec<FunctionDefinition>>>(mut self, functions: F) -> Self {
        self.functions = functions.into();
        self
    }

    /// Names the action predicates explicitly, as an `(:actions ...)`
    /// section does.
    pub fn with_action_predicates<I: IntoIterator<Item = Name>>(mut self, names: I) -> Self {
        self.action_predicates = Some(names.into_iter().collect());
        self
    }

    /// Makes every operator double as an action predicate.
    pub fn with_operators_as_actions(mut self, operators_as_actions: bool) -> Self {
        self.operators_as_actions = operators_as_actions;
        self
    }

    pub fn add_operator(&mut self, operator: Operator) {
        self.operators.push(operator);
    }

    /// Finishes the domain.
    ///
    /// ## Errors
    /// [`PddlError::NameCollision`] if an operator has to be synthesized as
    /// an action predicate whose name is already taken by a predicate, and
    /// [`PddlError::UndefinedSymbol`] if an explicitly named action
    /// predicate was never declared.
    pub fn build(self) -> Result<Domain> {
        let mut predicates = self.predicates;
        let mut action_predicates = BTreeSet::new();

        if self.operators_as_actions {
            for operator in &self.operators {
                let name = *operator.name().name();
                if predicates.iter().any(|p| *p.name() == name) {
                    return Err(PddlError::NameCollision {
                        name: name.to_string(),
                    });
                }
                let parameter_types: Vec<Type> =
                    operator.parameters().iter().map(|p| *p.type_()).collect();
                predicates.push(PredicateDefinition::new(name, parameter_types));
                action_predicates.insert(PredicateName::new(name));
            }
        } else if let Some(names) = self.action_predicates {
            for name in names {
                if !predicates.iter().any(|p| *p.name() == name) {
                    return Err(PddlError::undefined(
                        SymbolKind::Predicate,
                        name.as_str(),
                    ));
                }
                action_predicates.insert(PredicateName::new(name));
            }
        }

        // Negated preconditions are written back with `Different` guards, which
        // would reparse as the user predicate.
        if predicates.iter().any(|p| p.name().as_str() == "different")
            && self
                .operators
                .iter()
                .any(|op| op.precondition().conjuncts().iter().any(negates_atom))
        {
            return Err(PddlError::NameCollision {
                name: "different".to_string(),
            });
        }

        let is_probabilistic = self
            .operators
            .iter()
            .any(|op| op.effect().contains_probabilistic());

        Ok(Domain {
            name: self.name,
            requirements: self.requirements,
            types: self.types,
            constants: self.constants,
            predicates,
            functions: self.functions,
            operators: self.operators,
            action_predicates,
            operators_as_actions: self.operators_as_actions,
            is_probabilistic,
        })
    }
}

fn negates_atom(term: &Formula) -> bool {
    match term {
        Formula::Not(inner) => matches!(inner.as_ref(), Formula::Atom(_)),
        Formula::Timed(_, body) => negates_atom(body),
        _ => false,
    }
}

impl SymbolTable for DomainBuilder {
    fn types(&self) -> &Types {
        &self.types
    }

    fn predicate(&self, name: &str) -> Option<&PredicateDefinition> {
        self.predicates.iter().find(|p| p.name().as_str() == name)
    }

    fn function(&self, name: &str) -> Option<&FunctionDefinition> {
        self.functions.iter().find(|f| f.name().as_str() == name)
    }

    fn constants(&self) -> &[TypedEntity] {
        &self.constants
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsed_types::{Atom, ToTyped};

    fn drive() -> Operator {
        Operator::new(
            ActionName::from("drive"),
            vec!["?t".to_typed("truck")],
            Formula::empty(),
            Formula::empty(),
        )
    }

    #[test]
    fn operators_are_synthesized_as_action_predicates() {
        let mut builder = Domain::builder("transport").with_operators_as_actions(true);
        builder.add_operator(drive());
        let domain = builder.build().unwrap();

        assert!(domain.is_action_predicate("drive"));
        let predicate = domain.predicate("drive").unwrap();
        assert_eq!(predicate.parameter_types(), &[Type::from("truck")]);
        assert!(!domain.is_probabilistic());
    }

    #[test]
    fn synthesized_action_predicates_must_not_collide() {
        let mut builder = Domain::builder("transport")
            .with_predicates(vec![PredicateDefinition::new("drive", vec![])])
            .with_operators_as_actions(true);
        builder.add_operator(drive());
        assert!(matches!(
            builder.build(),
            Err(PddlError::NameCollision { .. })
        ));
    }

    #[test]
    fn user_different_predicate_conflicts_with_negated_preconditions() {
        let different = PredicateDefinition::new("different", vec![Type::from("truck")]);
        let atom = Atom::new(PredicateName::from("different"), vec!["?t".to_typed("truck")]);
        let park = |precondition| {
            Operator::new(
                ActionName::from("park"),
                vec!["?t".to_typed("truck")],
                precondition,
                Formula::empty(),
            )
        };

        let mut negated = Domain::builder("transport").with_predicates(vec![different.clone()]);
        negated.add_operator(park(Formula::new_not(Formula::Atom(atom.clone()))));
        assert!(matches!(
            negated.build(),
            Err(PddlError::NameCollision { name }) if name == "different"
        ));

        let mut positive = Domain::builder("transport").with_predicates(vec![different]);
        positive.add_operator(park(Formula::Atom(atom)));
        assert!(positive.build().is_ok());
    }

    #[test]
    fn explicit_action_predicates_must_be_declared() {
        let builder = Domain::builder("transport")
            .with_predicates(vec![PredicateDefinition::new("move", vec![])])
            .with_action_predicates([Name::from("move"), Name::from("fly")]);
        assert!(matches!(
            builder.build(),
            Err(PddlError::UndefinedSymbol { .. })
        ));
    }
}

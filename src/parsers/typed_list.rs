//! Provides parsing for typed lists such as `a b - truck ?x - place`.

use crate::error::{PddlError, Result, SymbolKind};
use crate::parsed_types::{Type, TypedEntity, Types, DEFAULT_TYPE_NAME};
use crate::parsers::{Element, Span};
use tracing::warn;

/// The type every declared type implicitly inherits from.
const OBJECT_TYPE_NAME: &str = "object";

/// What to do with a type name that the domain never declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndeclaredType {
    /// Fail with [`PddlError::UndefinedSymbol`].
    Reject,
    /// Log a warning and use an ad hoc type of that name.
    Warn,
}

/// Splits `elements` into `(name, type)` pairs. Names before a `- type`
/// marker share that type; names after the last marker have none.
pub fn typed_list<'a>(elements: &[Element<'a>]) -> Result<Vec<(Span<'a>, Option<Span<'a>>)>> {
    let mut entries = vec![];
    let mut pending: Vec<Span<'a>> = vec![];
    let mut iter = elements.iter();
    while let Some(element) = iter.next() {
        let token = element.expect_token("a name")?;
        if *token.fragment() != "-" {
            pending.push(token);
            continue;
        }

        let r#type = match iter.next() {
            Some(Element::Token(r#type)) if *r#type.fragment() != "-" => *r#type,
            Some(Element::List(list)) => {
                return Err(PddlError::syntax(*list, "`either` types are not supported"))
            }
            _ => return Err(PddlError::syntax(token, "expected a type name after `-`")),
        };
        if pending.is_empty() {
            return Err(PddlError::syntax(token, "expected names before `-`"));
        }
        entries.extend(pending.drain(..).map(|name| (name, Some(r#type))));
    }
    entries.extend(pending.into_iter().map(|name| (name, None)));
    Ok(entries)
}

/// Resolves a type name against the declared `types`.
pub fn resolve_type(token: Span, types: &Types, policy: UndeclaredType) -> Result<Type> {
    let name = *token.fragment();
    if !types.uses_typing() {
        return if name == DEFAULT_TYPE_NAME {
            Ok(Type::implicit())
        } else {
            Err(PddlError::TypeMismatch(format!(
                "type `{name}` used in a domain that declares no types"
            )))
        };
    }

    if let Some(r#type) = types.get(name) {
        return Ok(r#type);
    }
    if name == OBJECT_TYPE_NAME {
        return Ok(Type::new(name));
    }
    match policy {
        UndeclaredType::Reject => Err(PddlError::undefined(SymbolKind::Type, name)),
        UndeclaredType::Warn => {
            warn!(
                r#type = name,
                line = token.location_line(),
                "type not declared, using it as an ad hoc type"
            );
            Ok(Type::new(name))
        }
    }
}

/// Parses `elements` as a typed list of entities.
///
/// In a typed domain every entry needs a type; in an untyped domain no entry
/// may have one other than `default`.
pub fn typed_entities(
    elements: &[Element],
    types: &Types,
    policy: UndeclaredType,
) -> Result<Vec<TypedEntity>> {
    typed_list(elements)?
        .into_iter()
        .map(|(name, r#type)| {
            let r#type = match r#type {
                Some(r#type) => resolve_type(r#type, types, policy)?,
                None if !types.uses_typing() => Type::implicit(),
                None => {
                    return Err(PddlError::TypeMismatch(format!(
                        "`{}` has no type but the domain uses typing",
                        name.fragment()
                    )))
                }
            };
            Ok(TypedEntity::new(*name.fragment(), r#type))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::elements;

    fn typed_types() -> Types {
        let mut types = Types::typed();
        types.add_subtypes([Type::from("truck")], "vehicle".into());
        types.declare("place".into());
        types
    }

    #[test]
    fn names_share_the_following_type() {
        let expr = Span::new("(a b - truck ?x - place c)");
        let items = elements(expr).unwrap();
        let list = typed_list(&items).unwrap();
        let rendered: Vec<(String, Option<String>)> = list
            .iter()
            .map(|(n, t)| (n.fragment().to_string(), t.map(|t| t.fragment().to_string())))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("a".to_string(), Some("truck".to_string())),
                ("b".to_string(), Some("truck".to_string())),
                ("?x".to_string(), Some("place".to_string())),
                ("c".to_string(), None),
            ]
        );
    }

    #[test]
    fn dangling_dash_is_a_syntax_error() {
        let items = elements(Span::new("(a -)")).unwrap();
        assert!(matches!(typed_list(&items), Err(PddlError::Syntax { .. })));
    }

    #[test]
    fn typed_domains_require_types() {
        let types = typed_types();
        let items = elements(Span::new("(?t - truck ?p)")).unwrap();
        assert!(matches!(
            typed_entities(&items, &types, UndeclaredType::Reject),
            Err(PddlError::TypeMismatch(_))
        ));
    }

    #[test]
    fn untyped_domains_use_the_implicit_type() {
        let types = Types::untyped();
        let items = elements(Span::new("(a b - default)")).unwrap();
        let entities = typed_entities(&items, &types, UndeclaredType::Reject).unwrap();
        assert!(entities.iter().all(|e| e.type_().is_implicit()));

        let items = elements(Span::new("(a - truck)")).unwrap();
        assert!(typed_entities(&items, &types, UndeclaredType::Reject).is_err());
    }

    #[test]
    fn undeclared_types_follow_the_policy() {
        let types = typed_types();
        let items = elements(Span::new("(x - boat)")).unwrap();
        assert!(matches!(
            typed_entities(&items, &types, UndeclaredType::Reject),
            Err(PddlError::UndefinedSymbol { .. })
        ));
        let entities = typed_entities(&items, &types, UndeclaredType::Warn).unwrap();
        assert_eq!(entities[0].type_().name().as_str(), "boat");
    }
}

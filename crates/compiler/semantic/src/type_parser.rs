//! # Type Annotation Parser
//!
//! Reads the text of a type annotation into a [`MoveType`]. The parser works
//! on characters rather than on the syntax tree so it can also be used on
//! annotations that come from other sources, such as hover text or compiler
//! output.
//!
//! [`parse_type`] is total: text the grammar does not accept becomes a
//! struct named after the trimmed text.

use chumsky::prelude::*;

use crate::types::MoveType;

type Extra<'src> = extra::Err<Simple<'src, char>>;

/// Builds the type for a `::`-separated path with optional type arguments
fn path_type(segments: Vec<&str>, args: Option<Vec<MoveType>>) -> MoveType {
    match segments.as_slice() {
        [name] if *name == "vector" => {
            let element = args
                .and_then(|args| args.into_iter().next())
                .unwrap_or(MoveType::Unknown);
            MoveType::vector(element)
        }
        [name] => MoveType::from_primitive_name(name).unwrap_or_else(|| MoveType::Struct {
            name: (*name).to_string(),
            module: None,
        }),
        [module @ .., name] => MoveType::Struct {
            name: (*name).to_string(),
            module: Some(module.join("::")),
        },
        [] => MoveType::Unknown,
    }
}

fn type_expr_parser<'src>() -> impl Parser<'src, &'src str, MoveType, Extra<'src>> + Clone {
    let segment = any()
        .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
        .repeated()
        .at_least(1)
        .to_slice();

    recursive(|type_expr| {
        let type_args = type_expr
            .clone()
            .separated_by(just(',').padded())
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just('<').padded(), just('>').padded());

        let path = segment
            .separated_by(just("::").padded())
            .at_least(1)
            .collect::<Vec<&str>>()
            .then(type_args.or_not())
            .map(|(segments, args)| path_type(segments, args));

        let mutability = just("mut")
            .then_ignore(text::whitespace().at_least(1))
            .or_not()
            .map(|m| m.is_some());

        let reference = just('&')
            .padded()
            .ignore_then(mutability)
            .then(type_expr.clone())
            .map(|(mutable, inner)| MoveType::reference(mutable, inner));

        // `()` is the unit type, `(T)` is just `T`, longer tuples are not
        // modelled.
        let tuple = type_expr
            .separated_by(just(',').padded())
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just('(').padded(), just(')').padded())
            .map(|mut elements| match elements.len() {
                0 => MoveType::Void,
                1 => elements.remove(0),
                _ => MoveType::Unknown,
            });

        choice((reference, tuple, path)).padded()
    })
}

/// Parse the text of a type annotation
pub fn parse_type(text: &str) -> MoveType {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return MoveType::Unknown;
    }
    match type_expr_parser()
        .then_ignore(end())
        .parse(trimmed)
        .into_result()
    {
        Ok(ty) => ty,
        Err(_) => MoveType::Struct {
            name: trimmed.to_string(),
            module: None,
        },
    }
}

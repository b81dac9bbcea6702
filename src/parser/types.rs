//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Basic types (`int`, `float`, `double`, `bool`, `string`, `void`, `any`)
//! - Array types (`T[]`, nested as `T[][]`)
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers for parsing type expressions.

use std::collections::HashMap;

use crate::{
    cst::cst::{Node, Rule},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    MK_NODE,
};

use super::{
    lookups::{BindingPower, TYPE_KEYWORDS},
    parser::Parser,
};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<Node, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser, Node, BindingPower) -> Result<Node, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser) {
    for kind in TYPE_KEYWORDS {
        parser.type_nud(kind, parse_symbol_type);
    }
    parser.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_array_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.advance();
    Ok(parser.leaf(Rule::Type, &token))
}

pub fn parse_array_type(parser: &mut Parser, left: Node, _bp: BindingPower) -> Result<Node, Error> {
    let start = left.span.start.clone();
    parser.expect(TokenKind::OpenBracket)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(MK_NODE!(parser, Rule::ArrayType, parser.span_from(start), vec![left]))
}

/// Parses a type annotation.
///
/// `[` only continues a type when it is immediately closed, so `int[5]()` leaves
/// the size for the array literal parser.
pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<Node, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_type_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected a type"),
            },
            parser.get_position(),
        ));
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while *parser
        .get_type_bp_lookup()
        .get(&parser.current_token_kind())
        .unwrap_or(&BindingPower::Default)
        > bp
    {
        let token_kind = parser.current_token_kind();
        if token_kind == TokenKind::OpenBracket && parser.peek_kind() != TokenKind::CloseBracket {
            break;
        }

        let Some(led) = parser.get_type_led_lookup().get(&token_kind).copied() else {
            break;
        };
        let binding_power = parser.get_type_bp_lookup()[&token_kind];

        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}

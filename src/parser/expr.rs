use crate::{
    cst::cst::{Node, Rule},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    MK_NODE,
};

use super::{lookups::BindingPower, parser::Parser, types::parse_type};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Node, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() }, parser.get_position()));
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while *parser.get_bp_lookup().get(&parser.current_token_kind()).unwrap_or(&BindingPower::Default) > bp {
        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(Error::new(ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() }, parser.get_position()));
        };
        let binding_power = parser.get_bp_lookup()[&token_kind];

        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Node, Error> {
    let rule = match parser.current_token_kind() {
        TokenKind::IntLiteral => Rule::IntLiteral,
        TokenKind::FloatLiteral => Rule::FloatLiteral,
        TokenKind::DoubleLiteral => Rule::DoubleLiteral,
        TokenKind::String => Rule::StringLiteral,
        TokenKind::True | TokenKind::False => Rule::BoolLiteral,
        TokenKind::Identifier => Rule::Identifier,
        _ => return Err(Error::new(ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() }, parser.get_position())),
    };

    let token = parser.advance();
    Ok(parser.leaf(rule, &token))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Node, bp: BindingPower) -> Result<Node, Error> {
    let operator_token = parser.advance();
    let operator = parser.leaf(Rule::Operator, &operator_token);

    // `**` is right associative
    let right_bp = if operator_token.kind == TokenKind::StarStar { BindingPower::Multiplicative } else { bp };
    let right = parse_expr(parser, right_bp)?;

    let start = left.span.start.clone();
    Ok(MK_NODE!(parser, Rule::Binary, parser.span_from(start), vec![left, operator, right]))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Node, Error> {
    let operator_token = parser.advance();
    let operator = parser.leaf(Rule::Operator, &operator_token);
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(MK_NODE!(parser, Rule::Unary, parser.span_from(operator_token.span.start), vec![operator, rhs]))
}

pub fn parse_prefix_increment_expr(parser: &mut Parser) -> Result<Node, Error> {
    let operator_token = parser.advance();
    let operator = parser.leaf(Rule::Operator, &operator_token);

    let error = parser.unexpected("expected a variable after increment operator");
    let target = parser.expect_error(TokenKind::Identifier, Some(error))?;
    let target = parser.leaf(Rule::Identifier, &target);

    Ok(MK_NODE!(parser, Rule::PreIncrement, parser.span_from(operator_token.span.start), vec![operator, target]))
}

pub fn parse_postfix_increment_expr(parser: &mut Parser, left: Node, _bp: BindingPower) -> Result<Node, Error> {
    if left.rule != Rule::Identifier {
        return Err(parser.unexpected("increment operators apply to variables only"));
    }

    let operator_token = parser.advance();
    let operator = parser.leaf(Rule::Operator, &operator_token);

    let start = left.span.start.clone();
    Ok(MK_NODE!(parser, Rule::PostIncrement, parser.span_from(start), vec![left, operator]))
}

/// `(expr)` groups, `(type) expr` casts.
///
/// `(int[5]())` starts with a type keyword too, but the `[size]` makes it a
/// grouped array literal.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start;

    if parser.current_token_kind().is_type_keyword() && !starts_array_literal(parser) {
        let target = parse_type(parser, BindingPower::Default)?;
        parser.expect(TokenKind::CloseParen)?;
        let operand = parse_expr(parser, BindingPower::Unary)?;

        return Ok(MK_NODE!(parser, Rule::Typecast, parser.span_from(start), vec![target, operand]));
    }

    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// Whether the type at the current token is followed by a `[size]`.
fn starts_array_literal(parser: &Parser) -> bool {
    let mut lookahead = 1;
    while parser.nth_kind(lookahead) == TokenKind::OpenBracket
        && parser.nth_kind(lookahead + 1) == TokenKind::CloseBracket
    {
        lookahead += 2;
    }

    parser.nth_kind(lookahead) == TokenKind::OpenBracket
}

pub fn parse_call_expr(parser: &mut Parser, left: Node, _bp: BindingPower) -> Result<Node, Error> {
    let args_start = parser.advance().span.start;

    let mut args = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            args.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    let arguments = MK_NODE!(parser, Rule::Args, parser.span_from(args_start), args);

    let start = left.span.start.clone();
    Ok(MK_NODE!(parser, Rule::Call, parser.span_from(start), vec![left, arguments]))
}

pub fn parse_index_expr(parser: &mut Parser, left: Node, _bp: BindingPower) -> Result<Node, Error> {
    parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    let start = left.span.start.clone();
    Ok(MK_NODE!(parser, Rule::Index, parser.span_from(start), vec![left, index]))
}

/// `int[5]()` creates an array of five ints.
pub fn parse_array_literal_expr(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    let element_type = parse_type(parser, BindingPower::Default)?;

    let error = parser.unexpected("expected `[size]` after array element type");
    parser.expect_error(TokenKind::OpenBracket, Some(error))?;
    let size = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;
    parser.expect(TokenKind::OpenParen)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(MK_NODE!(parser, Rule::ArrayLiteral, parser.span_from(start), vec![element_type, size]))
}

use crate::{
    cst::cst::{Node, Rule},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Position, MK_NODE,
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Node, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    parse_simple_stmt(parser)
}

/// Assignment, compound assignment, array element assignment or a bare
/// expression, terminated by `;`.
pub fn parse_simple_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    let target = parse_expr(parser, BindingPower::Default)?;

    let node = match parser.current_token_kind() {
        TokenKind::Assignment => {
            let rule = match target.rule {
                Rule::Identifier => Rule::Assign,
                Rule::Index => Rule::ArrayElementAssign,
                _ => return Err(parser.unexpected("only variables and array elements can be assigned")),
            };

            parser.advance();
            let value = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::Semicolon)?;

            MK_NODE!(parser, rule, parser.span_from(start), vec![target, value])
        }
        TokenKind::PlusEquals | TokenKind::MinusEquals | TokenKind::StarEquals | TokenKind::SlashEquals => {
            if target.rule != Rule::Identifier {
                return Err(parser.unexpected("compound assignment applies to variables only"));
            }

            let operator_token = parser.advance();
            let operator = parser.leaf(Rule::Operator, &operator_token);
            let value = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::Semicolon)?;

            MK_NODE!(parser, Rule::CompoundAssign, parser.span_from(start), vec![target, operator, value])
        }
        _ => {
            parser.expect(TokenKind::Semicolon)?;
            MK_NODE!(parser, Rule::ExpressionStmt, parser.span_from(start), vec![target])
        }
    };

    Ok(node)
}

/// `T name := expr;` or `T name(params) { ... }`.
///
/// A statement starting with a type keyword followed by `[size]` is an array
/// literal used as an expression statement instead.
pub fn parse_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    if parser.peek_kind() == TokenKind::OpenBracket {
        // `int[] x` is a declaration, `int[5]()` an expression
        let mut lookahead = 1;
        while parser.nth_kind(lookahead) == TokenKind::OpenBracket
            && parser.nth_kind(lookahead + 1) == TokenKind::CloseBracket
        {
            lookahead += 2;
        }

        if parser.nth_kind(lookahead) != TokenKind::Identifier {
            return parse_simple_stmt(parser);
        }
    }

    let start = parser.get_position();
    let declared_type = parse_type(parser, BindingPower::Default)?;

    let error = parser.unexpected("expected identifier during declaration");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;
    let name = parser.leaf(Rule::Identifier, &name);

    if parser.current_token_kind() == TokenKind::OpenParen {
        return parse_fn_decl_rest(parser, start, declared_type, name);
    }

    let error = parser.unexpected("expected `:=` in variable declaration");
    parser.expect_error(TokenKind::Declare, Some(error))?;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(MK_NODE!(parser, Rule::VarDecl, parser.span_from(start), vec![declared_type, name, value]))
}

fn parse_fn_decl_rest(parser: &mut Parser, start: Position, return_type: Node, name: Node) -> Result<Node, Error> {
    let params_start = parser.advance().span.start;

    let mut parameters = Vec::new();
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let param_start = parser.get_position();
            let ty = parse_type(parser, BindingPower::Default)?;
            let error = parser.unexpected("expected parameter name");
            let param_name = parser.expect_error(TokenKind::Identifier, Some(error))?;
            let param_name = parser.leaf(Rule::Identifier, &param_name);

            parameters.push(MK_NODE!(parser, Rule::Param, parser.span_from(param_start), vec![ty, param_name]));

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    let params = MK_NODE!(parser, Rule::Params, parser.span_from(params_start), parameters);

    let body = parse_block(parser)?;

    Ok(MK_NODE!(parser, Rule::FunctionDecl, parser.span_from(start), vec![return_type, name, params, body]))
}

pub fn parse_block(parser: &mut Parser) -> Result<Node, Error> {
    let error = parser.unexpected("expected `{` to open a block");
    let start = parser.expect_error(TokenKind::OpenCurly, Some(error))?.span.start;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected("expected `}` to close the block"));
        }
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(MK_NODE!(parser, Rule::Block, parser.span_from(start), statements))
}

fn parse_condition(parser: &mut Parser) -> Result<Node, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;
    Ok(condition)
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start;
    let value = parse_condition(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(MK_NODE!(parser, Rule::Print, parser.span_from(start), vec![value]))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start;
    let condition = parse_condition(parser)?;
    let body = parse_block(parser)?;

    Ok(MK_NODE!(parser, Rule::While, parser.span_from(start), vec![condition, body]))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start;

    let condition = parse_condition(parser)?;
    let body = parse_block(parser)?;
    let mut children = vec![condition, body];

    while parser.current_token_kind() == TokenKind::Else {
        let else_start = parser.advance().span.start;

        if parser.current_token_kind() == TokenKind::If {
            parser.advance();
            let condition = parse_condition(parser)?;
            let body = parse_block(parser)?;
            children.push(MK_NODE!(parser, Rule::ElseIf, parser.span_from(else_start), vec![condition, body]));
        } else {
            let body = parse_block(parser)?;
            children.push(MK_NODE!(parser, Rule::Else, parser.span_from(else_start), vec![body]));
            break;
        }
    }

    Ok(MK_NODE!(parser, Rule::If, parser.span_from(start), children))
}

/// `for (T i := init; condition; step;) { ... }` or `for (T x in collection) { ... }`.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start;
    parser.expect(TokenKind::OpenParen)?;

    let init_start = parser.get_position();
    let declared_type = parse_type(parser, BindingPower::Default)?;
    let error = parser.unexpected("expected loop variable name");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;
    let name = parser.leaf(Rule::Identifier, &name);

    if parser.current_token_kind() == TokenKind::In {
        parser.advance();
        let collection = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::CloseParen)?;
        let body = parse_block(parser)?;

        return Ok(MK_NODE!(parser, Rule::ForEach, parser.span_from(start), vec![declared_type, name, collection, body]));
    }

    let error = parser.unexpected("expected `:=` or `in` in for loop");
    parser.expect_error(TokenKind::Declare, Some(error))?;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;
    let init = MK_NODE!(parser, Rule::VarDecl, parser.span_from(init_start), vec![declared_type, name, value]);

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    let step = parse_simple_stmt(parser)?;
    parser.expect(TokenKind::CloseParen)?;
    let body = parse_block(parser)?;

    Ok(MK_NODE!(parser, Rule::For, parser.span_from(start), vec![init, condition, step, body]))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start;

    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
        return Ok(MK_NODE!(parser, Rule::ShortReturn, parser.span_from(start), vec![]));
    }

    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(MK_NODE!(parser, Rule::Return, parser.span_from(start), vec![value]))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start;
    parser.expect(TokenKind::Semicolon)?;

    Ok(MK_NODE!(parser, Rule::Break, parser.span_from(start), vec![]))
}

// Statement parsing functions for the JikiScript parser
// Handles set/change bindings, control flow, and function definitions

use pest::iterators::Pair;

use super::{JikiParser, Rule};
use crate::ast::*;
use crate::error::*;

impl JikiParser {
    pub(super) fn parse_statement(pair: Pair<Rule>) -> ParseResult<Statement> {
        let span = Self::extract_span(&pair);
        let inner = Self::first_inner(pair)?;

        let kind = match inner.as_rule() {
            Rule::set_statement => StatementKind::Set(Self::parse_set_statement(inner)?),
            Rule::change_statement => StatementKind::Change(Self::parse_change_statement(inner)?),
            Rule::if_statement => StatementKind::If(Self::parse_if_statement(inner)?),
            Rule::repeat_statement => StatementKind::Repeat(Self::parse_repeat_statement(inner)?),
            Rule::function_definition => {
                StatementKind::FunctionDefinition(Self::parse_function_definition(inner)?)
            }
            Rule::return_statement => StatementKind::Return(Self::parse_return_statement(inner)?),
            Rule::expression_statement => {
                let expression = Self::parse_expression(Self::first_inner(inner)?)?;
                StatementKind::Expression(expression)
            }
            other => return Err(Self::unexpected_rule("statement", other, &inner)),
        };

        Ok(Statement { kind, span })
    }

    fn parse_set_statement(pair: Pair<Rule>) -> ParseResult<SetStatement> {
        let span = Self::extract_span(&pair);
        let offset = span.start;
        let mut inner = pair.into_inner();

        let name = Self::parse_identifier(Self::next_significant(&mut inner, "identifier", offset)?)?;
        let value = Self::parse_expression(Self::next_significant(&mut inner, "expression", offset)?)?;

        Ok(SetStatement { name, value, span })
    }

    fn parse_change_statement(pair: Pair<Rule>) -> ParseResult<ChangeStatement> {
        let span = Self::extract_span(&pair);
        let offset = span.start;
        let mut inner = pair.into_inner();

        let name = Self::parse_identifier(Self::next_significant(&mut inner, "identifier", offset)?)?;
        let value = Self::parse_expression(Self::next_significant(&mut inner, "expression", offset)?)?;

        Ok(ChangeStatement { name, value, span })
    }

    fn parse_if_statement(pair: Pair<Rule>) -> ParseResult<IfStatement> {
        let span = Self::extract_span(&pair);
        let offset = span.start;

        let mut condition = None;
        let mut then_body = Vec::new();
        let mut else_body = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::expression => condition = Some(Self::parse_expression(inner)?),
                Rule::statement => then_body.push(Self::parse_statement(inner)?),
                Rule::else_clause => {
                    let mut body = Vec::new();
                    for statement_pair in inner.into_inner() {
                        if Self::is_keyword(statement_pair.as_rule()) {
                            continue;
                        }
                        body.push(Self::parse_statement(statement_pair)?);
                    }
                    else_body = Some(body);
                }
                rule if Self::is_keyword(rule) => {}
                other => return Err(Self::unexpected_rule("if statement part", other, &inner)),
            }
        }

        let condition = condition.ok_or(ParseError::UnexpectedRule {
            expected: "condition expression".to_string(),
            found: "nothing".to_string(),
            offset,
        })?;

        Ok(IfStatement {
            condition,
            then_body,
            else_body,
            span,
        })
    }

    fn parse_repeat_statement(pair: Pair<Rule>) -> ParseResult<RepeatStatement> {
        let span = Self::extract_span(&pair);
        let offset = span.start;
        let mut inner = pair.into_inner();

        let count = Self::parse_expression(Self::next_significant(&mut inner, "expression", offset)?)?;

        let mut body = Vec::new();
        for statement_pair in inner {
            match statement_pair.as_rule() {
                Rule::statement => body.push(Self::parse_statement(statement_pair)?),
                rule if Self::is_keyword(rule) => {}
                other => {
                    return Err(Self::unexpected_rule("statement", other, &statement_pair));
                }
            }
        }

        Ok(RepeatStatement { count, body, span })
    }

    fn parse_function_definition(pair: Pair<Rule>) -> ParseResult<FunctionDefinition> {
        let span = Self::extract_span(&pair);
        let offset = span.start;
        let mut inner = pair.into_inner();

        let name = Self::parse_identifier(Self::next_significant(&mut inner, "identifier", offset)?)?;

        let mut parameters = Vec::new();
        let mut body = Vec::new();
        for part in inner {
            match part.as_rule() {
                Rule::parameter_list => {
                    for parameter_pair in part.into_inner() {
                        if Self::is_keyword(parameter_pair.as_rule()) {
                            continue;
                        }
                        parameters.push(Self::parse_identifier(parameter_pair)?);
                    }
                }
                Rule::statement => body.push(Self::parse_statement(part)?),
                rule if Self::is_keyword(rule) => {}
                other => return Err(Self::unexpected_rule("function part", other, &part)),
            }
        }

        Ok(FunctionDefinition {
            name,
            parameters,
            body,
            span,
        })
    }

    fn parse_return_statement(pair: Pair<Rule>) -> ParseResult<ReturnStatement> {
        let span = Self::extract_span(&pair);

        let mut value = None;
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::expression => value = Some(Self::parse_expression(inner)?),
                rule if Self::is_keyword(rule) => {}
                other => return Err(Self::unexpected_rule("expression", other, &inner)),
            }
        }

        Ok(ReturnStatement { value, span })
    }
}

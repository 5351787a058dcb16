// Expression parsing module
// Handles operator precedence, postfix chains, and primary expressions

use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};

use super::{JikiParser, Rule};
use crate::ast::*;
use crate::error::*;

impl JikiParser {
    /// Binary operator precedence parser
    /// Precedence levels from lowest to highest
    pub(crate) fn pratt_parser() -> PrattParser<Rule> {
        PrattParser::new()
            // Level 1: Logical OR (lowest precedence)
            .op(Op::infix(Rule::op_logical_or, Assoc::Left))
            // Level 2: Logical AND
            .op(Op::infix(Rule::op_logical_and, Assoc::Left))
            // Level 3: Equality
            .op(Op::infix(Rule::op_equal, Assoc::Left) | Op::infix(Rule::op_not_equal, Assoc::Left))
            // Level 4: Comparison
            .op(Op::infix(Rule::op_less, Assoc::Left)
                | Op::infix(Rule::op_less_equal, Assoc::Left)
                | Op::infix(Rule::op_greater, Assoc::Left)
                | Op::infix(Rule::op_greater_equal, Assoc::Left))
            // Level 5: Additive
            .op(Op::infix(Rule::op_add, Assoc::Left) | Op::infix(Rule::op_subtract, Assoc::Left))
            // Level 6: Multiplicative (highest precedence)
            .op(Op::infix(Rule::op_multiply, Assoc::Left)
                | Op::infix(Rule::op_divide, Assoc::Left)
                | Op::infix(Rule::op_modulo, Assoc::Left))
    }

    pub(crate) fn parse_expression(pair: Pair<Rule>) -> ParseResult<Expression> {
        Self::parse_expression_with_precedence(pair.into_inner())
    }

    /// Parse expression using precedence climbing
    pub(crate) fn parse_expression_with_precedence(pairs: Pairs<Rule>) -> ParseResult<Expression> {
        Self::pratt_parser()
            .map_primary(Self::parse_unary_expr)
            .map_infix(
                |left: ParseResult<Expression>,
                 op: Pair<Rule>,
                 right: ParseResult<Expression>| {
                    let left = left?;
                    let right = right?;

                    let operator = match op.as_rule() {
                        Rule::op_logical_or => BinaryOperator::LogicalOr,
                        Rule::op_logical_and => BinaryOperator::LogicalAnd,
                        Rule::op_equal => BinaryOperator::Equal,
                        Rule::op_not_equal => BinaryOperator::NotEqual,
                        Rule::op_less => BinaryOperator::Less,
                        Rule::op_less_equal => BinaryOperator::LessEqual,
                        Rule::op_greater => BinaryOperator::Greater,
                        Rule::op_greater_equal => BinaryOperator::GreaterEqual,
                        Rule::op_add => BinaryOperator::Add,
                        Rule::op_subtract => BinaryOperator::Subtract,
                        Rule::op_multiply => BinaryOperator::Multiply,
                        Rule::op_divide => BinaryOperator::Divide,
                        Rule::op_modulo => BinaryOperator::Modulo,
                        other => return Err(Self::unexpected_rule("binary operator", other, &op)),
                    };

                    let span = Self::span_from_range(left.span, right.span);
                    Ok(Expression {
                        kind: ExpressionKind::Binary(BinaryOperation {
                            left: Box::new(left),
                            operator,
                            right: Box::new(right),
                            span,
                        }),
                        span,
                    })
                },
            )
            .parse(pairs)
    }

    fn parse_unary_expr(pair: Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::extract_span(&pair);

        let mut operators = Vec::new();
        let mut operand = None;
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::op_not => operators.push(UnaryOperator::Not),
                Rule::op_unary_minus => operators.push(UnaryOperator::Minus),
                Rule::postfix_expr => operand = Some(Self::parse_postfix_expr(inner)?),
                other => return Err(Self::unexpected_rule("unary expression", other, &inner)),
            }
        }

        let mut expression = operand.ok_or(ParseError::UnexpectedRule {
            expected: "postfix expression".to_string(),
            found: "nothing".to_string(),
            offset: span.start,
        })?;

        // Innermost operator binds tightest: `not -x` applies minus first
        for operator in operators.into_iter().rev() {
            expression = Expression {
                kind: ExpressionKind::Unary(UnaryOperation {
                    operator,
                    operand: Box::new(expression),
                    span,
                }),
                span,
            };
        }

        Ok(expression)
    }

    /// Postfix expression parser (handles calls, member access, indexing)
    fn parse_postfix_expr(pair: Pair<Rule>) -> ParseResult<Expression> {
        let mut inner = pair.into_inner();
        let offset = match inner.peek() {
            Some(ref p) => p.as_span().start(),
            None => 0,
        };

        let primary = Self::next_inner(&mut inner, "primary expression", offset)?;
        let mut expression = Self::parse_primary_expr(primary)?;

        for suffix in inner {
            let suffix_span = Self::extract_span(&suffix);
            let span = Self::span_from_range(expression.span, suffix_span);

            expression = match suffix.as_rule() {
                Rule::call_suffix => {
                    let arguments = Self::parse_call_arguments(suffix)?;
                    match expression.kind {
                        ExpressionKind::Identifier(name) => Expression {
                            kind: ExpressionKind::Call(FunctionCall {
                                name,
                                arguments,
                                span,
                            }),
                            span,
                        },
                        _ => {
                            return Err(ParseError::InvalidCallTarget {
                                found: "this expression".to_string(),
                                offset: expression.span.start,
                            });
                        }
                    }
                }
                Rule::member_suffix => {
                    let mut member_inner = suffix.into_inner();
                    let member = Self::parse_identifier(Self::next_inner(
                        &mut member_inner,
                        "member name",
                        suffix_span.start,
                    )?)?;

                    match member_inner.next() {
                        Some(call_suffix) => Expression {
                            kind: ExpressionKind::MethodCall(MethodCall {
                                object: Box::new(expression),
                                method: member,
                                arguments: Self::parse_call_arguments(call_suffix)?,
                                span,
                            }),
                            span,
                        },
                        None => Expression {
                            kind: ExpressionKind::MemberAccess(MemberAccess {
                                object: Box::new(expression),
                                member,
                                span,
                            }),
                            span,
                        },
                    }
                }
                Rule::index_suffix => {
                    let index =
                        Self::parse_expression(Self::first_inner(suffix)?)?;
                    Expression {
                        kind: ExpressionKind::Index(IndexOperation {
                            object: Box::new(expression),
                            index: Box::new(index),
                            span,
                        }),
                        span,
                    }
                }
                other => return Err(Self::unexpected_rule("postfix suffix", other, &suffix)),
            };
        }

        Ok(expression)
    }

    fn parse_primary_expr(pair: Pair<Rule>) -> ParseResult<Expression> {
        let inner = Self::first_inner(pair)?;

        match inner.as_rule() {
            Rule::literal => Self::parse_literal_expr(inner),
            Rule::identifier => {
                let span = Self::extract_span(&inner);
                let identifier = Self::parse_identifier(inner)?;
                Ok(Expression {
                    kind: ExpressionKind::Identifier(identifier),
                    span,
                })
            }
            Rule::expression => Self::parse_expression(inner),
            other => Err(Self::unexpected_rule("primary expression", other, &inner)),
        }
    }

    /// Arguments of a `(...)` suffix; empty when the parentheses are empty
    pub(super) fn parse_call_arguments(pair: Pair<Rule>) -> ParseResult<Vec<Expression>> {
        let mut arguments = Vec::new();
        if let Some(list) = pair.into_inner().next() {
            for argument in list.into_inner() {
                arguments.push(Self::parse_expression(argument)?);
            }
        }
        Ok(arguments)
    }
}

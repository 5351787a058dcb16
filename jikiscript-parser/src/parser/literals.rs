// Literal parsing functions for the JikiScript parser
// Handles number, string, boolean, and list literals, plus the
// literal-only entry points used by the custom-function test harness

use miette::SourceSpan;
use pest::iterators::Pair;
use pest::Parser;

use super::{JikiParser, Rule};
use crate::ast::*;
use crate::error::*;

impl JikiParser {
    /// Parse a literal appearing in expression position
    pub(super) fn parse_literal_expr(pair: Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::extract_span(&pair);
        let inner = Self::first_inner(pair)?;

        let kind = match inner.as_rule() {
            Rule::number => ExpressionKind::Number(Self::parse_number_text(inner.as_str())?),
            Rule::string => ExpressionKind::String(Self::parse_string_text(inner)?),
            Rule::boolean => ExpressionKind::Boolean(Self::parse_boolean(inner)?),
            Rule::list => {
                let mut elements = Vec::new();
                if let Some(list) = inner.into_inner().next() {
                    for element in list.into_inner() {
                        elements.push(Self::parse_expression(element)?);
                    }
                }
                ExpressionKind::List(elements)
            }
            other => return Err(Self::unexpected_rule("literal", other, &inner)),
        };

        Ok(Expression { kind, span })
    }

    /// Parse a single literal value from standalone text.
    ///
    /// This is the entry point the test harness uses for `expected` text;
    /// it accepts exactly the literal subset of the grammar and nothing else.
    pub fn parse_literal(input: &str) -> ParseResult<Literal> {
        let mut pairs = <JikiParser as Parser<Rule>>::parse(Rule::literal_entry, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string()))?;

        let entry = Self::next_inner(&mut pairs, "literal", 0)?;
        let value = Self::first_inner(entry)?;
        Self::parse_literal_value(value)
    }

    /// Parse a comma-separated list of literal values from standalone text.
    ///
    /// Used by the test harness for `args` text; an empty string yields an
    /// empty argument list.
    pub fn parse_literal_list(input: &str) -> ParseResult<Vec<Literal>> {
        let mut pairs = <JikiParser as Parser<Rule>>::parse(Rule::literal_list_entry, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string()))?;

        let entry = Self::next_inner(&mut pairs, "literal list", 0)?;
        let mut values = Vec::new();
        for pair in entry.into_inner() {
            match pair.as_rule() {
                Rule::literal_value => values.push(Self::parse_literal_value(pair)?),
                Rule::EOI => {}
                other => return Err(Self::unexpected_rule("literal value", other, &pair)),
            }
        }
        Ok(values)
    }

    fn parse_literal_value(pair: Pair<Rule>) -> ParseResult<Literal> {
        let inner = Self::first_inner(pair)?;

        match inner.as_rule() {
            Rule::signed_number => Ok(Literal::Number(Self::parse_number_text(inner.as_str())?)),
            Rule::string => Ok(Literal::String(Self::parse_string_text(inner)?)),
            Rule::boolean => Ok(Literal::Boolean(Self::parse_boolean(inner)?)),
            Rule::literal_list => {
                let mut elements = Vec::new();
                for element in inner.into_inner() {
                    elements.push(Self::parse_literal_value(element)?);
                }
                Ok(Literal::List(elements))
            }
            other => Err(Self::unexpected_rule("literal value", other, &inner)),
        }
    }

    fn parse_number_text(text: &str) -> ParseResult<f64> {
        text.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
            src: text.to_string(),
            span: SourceSpan::new(0.into(), text.len()),
            found: text.to_string(),
        })
    }

    fn parse_boolean(pair: Pair<Rule>) -> ParseResult<bool> {
        let inner = Self::first_inner(pair)?;
        match inner.as_rule() {
            Rule::boolean_true => Ok(true),
            Rule::boolean_false => Ok(false),
            other => Err(Self::unexpected_rule("boolean", other, &inner)),
        }
    }

    fn parse_string_text(pair: Pair<Rule>) -> ParseResult<String> {
        let inner = Self::first_inner(pair)?;
        Self::unescape_string(inner.as_str())
    }

    fn unescape_string(raw: &str) -> ParseResult<String> {
        let mut result = String::with_capacity(raw.len());
        let mut chars = raw.chars();

        while let Some(c) = chars.next() {
            if c != '\\' {
                result.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                found => {
                    // The grammar already rejects these; kept as a structured
                    // error rather than a panic if the two ever drift
                    return Err(ParseError::InvalidStringEscape {
                        src: raw.to_string(),
                        span: SourceSpan::new(0.into(), raw.len()),
                        found: found
                            .map(|c| format!("\\{c}"))
                            .unwrap_or_else(|| "\\".to_string()),
                    });
                }
            }
        }

        Ok(result)
    }
}

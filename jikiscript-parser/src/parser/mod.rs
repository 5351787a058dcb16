// JikiScript parser implementation
// Entry points, span helpers, and shared plumbing for the submodules

mod expressions;
mod literals;
mod statements;

use pest::iterators::{Pair, Pairs};
use pest::Parser;

use crate::ast::*;
use crate::error::*;

#[derive(pest_derive::Parser)]
#[grammar = "grammar.pest"]
pub struct JikiParser;

impl JikiParser {
    /// Parse a complete program into an AST
    pub fn parse_program(input: &str) -> ParseResult<Program> {
        let mut pairs = <JikiParser as Parser<Rule>>::parse(Rule::program, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string()))?;

        let program_pair = Self::next_inner(&mut pairs, "program", 0)?;
        let span = Self::extract_span(&program_pair);

        let mut statements = Vec::new();
        for pair in program_pair.into_inner() {
            match pair.as_rule() {
                Rule::statement => statements.push(Self::parse_statement(pair)?),
                Rule::EOI => {}
                other => return Err(Self::unexpected_rule("statement", other, &pair)),
            }
        }

        Ok(Program { statements, span })
    }

    /// Extract a source span (with line/column) from a Pest pair
    pub(crate) fn extract_span(pair: &Pair<Rule>) -> Span {
        let s = pair.as_span();
        let (line, column) = s.start_pos().line_col();
        Span::new(s.start(), s.end(), line, column)
    }

    /// Span covering two sub-spans, keeping the left one's position
    pub(crate) fn span_from_range(start: Span, end: Span) -> Span {
        Span::new(start.start, end.end, start.line, start.column)
    }

    pub(crate) fn unexpected_rule(expected: &str, found: Rule, pair: &Pair<Rule>) -> ParseError {
        ParseError::UnexpectedRule {
            expected: expected.to_string(),
            found: format!("{found:?}"),
            offset: pair.as_span().start(),
        }
    }

    /// Keyword tokens appear as pairs (the keyword rules are atomic so
    /// their lookaheads work); statement builders skip them
    pub(crate) fn is_keyword(rule: Rule) -> bool {
        matches!(
            rule,
            Rule::keyword_set
                | Rule::keyword_change
                | Rule::keyword_to
                | Rule::keyword_if
                | Rule::keyword_else
                | Rule::keyword_do
                | Rule::keyword_end
                | Rule::keyword_repeat
                | Rule::keyword_times
                | Rule::keyword_function
                | Rule::keyword_with
                | Rule::keyword_return
        )
    }

    /// Next pair that is not a keyword token
    pub(crate) fn next_significant<'a>(
        pairs: &mut Pairs<'a, Rule>,
        expected: &str,
        offset: usize,
    ) -> ParseResult<Pair<'a, Rule>> {
        pairs
            .find(|pair| !Self::is_keyword(pair.as_rule()))
            .ok_or_else(|| ParseError::UnexpectedRule {
                expected: expected.to_string(),
                found: "nothing".to_string(),
                offset,
            })
    }

    /// Pull the next pair out of an iterator, failing with a structured
    /// error instead of panicking if the grammar shape is violated
    pub(crate) fn next_inner<'a>(
        pairs: &mut Pairs<'a, Rule>,
        expected: &str,
        offset: usize,
    ) -> ParseResult<Pair<'a, Rule>> {
        pairs.next().ok_or_else(|| ParseError::UnexpectedRule {
            expected: expected.to_string(),
            found: "nothing".to_string(),
            offset,
        })
    }

    /// First inner pair of a wrapper rule
    pub(crate) fn first_inner(pair: Pair<Rule>) -> ParseResult<Pair<Rule>> {
        let offset = pair.as_span().start();
        let rule = pair.as_rule();
        pair.into_inner()
            .next()
            .ok_or_else(|| ParseError::UnexpectedRule {
                expected: "inner rule".to_string(),
                found: format!("{rule:?}"),
                offset,
            })
    }

    pub(crate) fn parse_identifier(pair: Pair<Rule>) -> ParseResult<Identifier> {
        Ok(Identifier {
            name: pair.as_str().to_string(),
            span: Self::extract_span(&pair),
        })
    }
}

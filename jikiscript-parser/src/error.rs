// JikiScript Parser Error Handling
// Structured error reporting with miette integration

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main parse error type with miette integration
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("Parse error: {message}")]
    #[diagnostic(
        code(jikiscript::parse::syntax),
        help("Check the syntax near the highlighted location")
    )]
    Syntax {
        #[source_code]
        src: String,
        #[label("error occurred here")]
        span: SourceSpan,
        message: String,
    },

    #[error("Invalid number literal")]
    #[diagnostic(
        code(jikiscript::parse::invalid_number),
        help("Number literals must be decimal, like 42 or 3.14")
    )]
    InvalidNumber {
        #[source_code]
        src: String,
        #[label("invalid number")]
        span: SourceSpan,
        found: String,
    },

    #[error("Invalid string escape sequence")]
    #[diagnostic(
        code(jikiscript::parse::invalid_string_escape),
        help("Valid escape sequences: \\n, \\t, \\r, \\\\, \\\"")
    )]
    InvalidStringEscape {
        #[source_code]
        src: String,
        #[label("invalid escape sequence")]
        span: SourceSpan,
        found: String,
    },

    #[error("'{found}' cannot be called like a function")]
    #[diagnostic(
        code(jikiscript::parse::invalid_call_target),
        help("Only named functions and object methods can be called")
    )]
    InvalidCallTarget { found: String, offset: usize },

    #[error("Unexpected grammar rule: expected {expected}, found {found}")]
    #[diagnostic(code(jikiscript::parse::unexpected_rule))]
    UnexpectedRule {
        expected: String,
        found: String,
        offset: usize,
    },
}

impl ParseError {
    /// Create a parse error from a Pest parsing error
    pub fn from_pest_error(error: pest::error::Error<crate::parser::Rule>, src: String) -> Self {
        let span = match error.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::new(pos.into(), 1),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::new(start.into(), end - start)
            }
        };

        let message = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
                let expected: Vec<String> = positives
                    .iter()
                    .map(rule_to_user_friendly_description)
                    .collect();
                format!("expected {}", expected.join(" or "))
            }
            other => format!("{other}"),
        };

        ParseError::Syntax { src, span, message }
    }

    /// Byte offset range of the failing source text
    pub fn source_offsets(&self) -> (usize, usize) {
        match self {
            ParseError::Syntax { span, .. }
            | ParseError::InvalidNumber { span, .. }
            | ParseError::InvalidStringEscape { span, .. } => {
                (span.offset(), span.offset() + span.len())
            }
            ParseError::InvalidCallTarget { offset, .. }
            | ParseError::UnexpectedRule { offset, .. } => (*offset, *offset),
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convert a parser rule to a user-friendly description
fn rule_to_user_friendly_description(rule: &crate::parser::Rule) -> String {
    use crate::parser::Rule;

    match rule {
        Rule::number | Rule::signed_number => "a number (like 42 or 3.14)".to_string(),
        Rule::string => "a string (like \"hello\")".to_string(),
        Rule::boolean | Rule::boolean_true | Rule::boolean_false => {
            "a boolean (true or false)".to_string()
        }
        Rule::list | Rule::literal_list => "a list (like [1, 2, 3])".to_string(),
        Rule::literal | Rule::literal_value => "a literal value".to_string(),
        Rule::identifier => "a name (like my_variable)".to_string(),
        Rule::expression | Rule::primary_expr | Rule::unary_expr | Rule::postfix_expr => {
            "an expression".to_string()
        }
        Rule::statement => "a statement".to_string(),
        Rule::set_statement => "a set statement (set name to value)".to_string(),
        Rule::change_statement => "a change statement (change name to value)".to_string(),
        Rule::if_statement => "an if statement (if condition do ... end)".to_string(),
        Rule::repeat_statement => "a repeat loop (repeat 5 times do ... end)".to_string(),
        Rule::function_definition => {
            "a function definition (function name with a, b do ... end)".to_string()
        }
        Rule::return_statement => "a return statement (return value)".to_string(),
        Rule::parameter_list => "a parameter list (with a, b)".to_string(),
        Rule::argument_list => "an argument list".to_string(),
        Rule::call_suffix => "a call (like name(...))".to_string(),
        Rule::member_suffix => "a member access (like object.member)".to_string(),
        Rule::index_suffix => "a list index (like items[1])".to_string(),
        Rule::keyword => "a keyword".to_string(),
        Rule::keyword_set => "'set'".to_string(),
        Rule::keyword_change => "'change'".to_string(),
        Rule::keyword_to => "'to'".to_string(),
        Rule::keyword_if => "'if'".to_string(),
        Rule::keyword_else => "'else'".to_string(),
        Rule::keyword_do => "'do'".to_string(),
        Rule::keyword_end => "'end'".to_string(),
        Rule::keyword_repeat => "'repeat'".to_string(),
        Rule::keyword_times => "'times'".to_string(),
        Rule::keyword_function => "'function'".to_string(),
        Rule::keyword_with => "'with'".to_string(),
        Rule::keyword_return => "'return'".to_string(),
        Rule::EOI => "end of input".to_string(),
        _ => format!("{rule:?}").replace('_', " "),
    }
}

// JikiScript Parser Library
// Pest-based parser for the JikiScript teaching language

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::*;
pub use error::*;
pub use parser::*;

// Main parsing functions
pub fn parse_program(input: &str) -> Result<Program, ParseError> {
    parser::JikiParser::parse_program(input)
}

/// Parse a standalone literal (test-harness `expected` text)
pub fn parse_literal(input: &str) -> Result<Literal, ParseError> {
    parser::JikiParser::parse_literal(input)
}

/// Parse standalone comma-separated literals (test-harness `args` text)
pub fn parse_literal_list(input: &str) -> Result<Vec<Literal>, ParseError> {
    parser::JikiParser::parse_literal_list(input)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

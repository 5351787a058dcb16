//! Error types for JikiScript evaluation.
//!
//! Runtime failures carry the source span of the construct that raised them
//! so hosts can highlight the offending code. Every failure ultimately
//! flattens into an [`ErrorDescriptor`], the host-facing shape shared by
//! syntax and runtime errors.

use jikiscript_parser::{ParseError, Span};
use thiserror::Error;

/// Errors from value-level operations that carry no source position.
///
/// The evaluator attaches the span of the offending expression when it
/// converts these into a [`RuntimeError`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValueError {
    #[error("cannot apply {op} to {left} and {right}")]
    InvalidOperation {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("cannot apply {op} to {operand}")]
    InvalidUnaryOperation {
        op: &'static str,
        operand: &'static str,
    },

    #[error("expected a Boolean, found {found}")]
    NotABoolean { found: &'static str },

    #[error("division by zero")]
    DivisionByZero,
}

impl ValueError {
    pub(crate) fn invalid_operation(
        op: &'static str,
        left: &crate::value::Value,
        right: &crate::value::Value,
    ) -> Self {
        ValueError::InvalidOperation {
            op,
            left: left.type_name(),
            right: right.type_name(),
        }
    }
}

/// Errors raised by native functions registered on the evaluation context
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NativeCallError {
    #[error("{function} expects {expected} argument(s) but received {received}")]
    Arity {
        function: &'static str,
        expected: usize,
        received: usize,
    },

    #[error("{function} expected {expected} for argument {index}, found {found}")]
    ArgumentType {
        function: &'static str,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    Message(String),
}

/// Runtime evaluation errors with source position information
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RuntimeError {
    /// Exercise-rule violation reported by a native callback
    #[error("{message}")]
    Logic { message: String, span: Span },

    #[error("variable '{name}' is not defined")]
    VariableNotFound { name: String, span: Span },

    #[error("function '{name}' is not defined")]
    FunctionNotFound { name: String, span: Span },

    #[error("{name} expects {expected} argument(s) but received {received}")]
    ArityMismatch {
        name: String,
        expected: usize,
        received: usize,
        span: Span,
    },

    #[error("{class} has no member named '{member}'")]
    MemberNotFound {
        class: String,
        member: String,
        span: Span,
    },

    #[error("{message}")]
    TypeMismatch { message: String, span: Span },

    #[error("division by zero")]
    DivisionByZero { span: Span },

    #[error("index {index} is out of range for a list of length {length}")]
    IndexOutOfBounds {
        index: i64,
        length: usize,
        span: Span,
    },

    #[error("this call did not produce a value, so it cannot be used in an expression")]
    VoidValue { span: Span },

    #[error("'return' can only be used inside a function")]
    ReturnOutsideFunction { span: Span },

    #[error("call depth limit of {max_depth} exceeded")]
    StackOverflow { max_depth: usize, span: Span },

    #[error("execution step budget of {max_steps} exhausted")]
    StepBudgetExhausted { max_steps: usize, span: Span },
}

impl RuntimeError {
    /// Source span of the construct that raised this error
    pub fn span(&self) -> Span {
        match self {
            RuntimeError::Logic { span, .. }
            | RuntimeError::VariableNotFound { span, .. }
            | RuntimeError::FunctionNotFound { span, .. }
            | RuntimeError::ArityMismatch { span, .. }
            | RuntimeError::MemberNotFound { span, .. }
            | RuntimeError::TypeMismatch { span, .. }
            | RuntimeError::DivisionByZero { span }
            | RuntimeError::IndexOutOfBounds { span, .. }
            | RuntimeError::VoidValue { span }
            | RuntimeError::ReturnOutsideFunction { span }
            | RuntimeError::StackOverflow { span, .. }
            | RuntimeError::StepBudgetExhausted { span, .. } => *span,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RuntimeError::Logic { .. } => ErrorCategory::Logic,
            RuntimeError::StackOverflow { .. } | RuntimeError::StepBudgetExhausted { .. } => {
                ErrorCategory::ResourceExhausted
            }
            _ => ErrorCategory::RuntimeType,
        }
    }
}

/// Broad classification of an evaluation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The source failed to parse; nothing was executed
    Syntax,
    /// An exercise rule was violated (reported via `log_logic_error`)
    Logic,
    /// A value had the wrong type or shape for an operation
    RuntimeType,
    /// The step budget or call depth limit was exhausted
    ResourceExhausted,
}

/// Host-facing description of an evaluation failure.
///
/// Offsets are byte positions into the source; line and column are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDescriptor {
    pub category: ErrorCategory,
    pub message: String,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl ErrorDescriptor {
    pub fn from_parse_error(error: &ParseError, source: &str) -> Self {
        let (start, end) = error.source_offsets();
        let (line, column) = line_col_at(source, start);
        ErrorDescriptor {
            category: ErrorCategory::Syntax,
            message: error.to_string(),
            start,
            end,
            line,
            column,
        }
    }

    pub fn from_runtime_error(error: &RuntimeError) -> Self {
        let span = error.span();
        ErrorDescriptor {
            category: error.category(),
            message: error.to_string(),
            start: span.start,
            end: span.end,
            line: span.line,
            column: span.column,
        }
    }
}

/// 1-based line and column for a byte offset into the source
fn line_col_at(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for (index, c) in source.char_indices() {
        if index >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

//! Top-level entry points for evaluating JikiScript source.
//!
//! [`interpret`] runs a whole program; [`interpret_function_call`] runs
//! the program (to register its function definitions) and then invokes a
//! named function with host-supplied arguments. Both return an
//! [`InterpretResult`] carrying the recorded frames and, on failure, an
//! error descriptor. A syntax error yields zero frames: nothing ran.

use jikiscript_parser::{Program, Span};

use crate::context::EvaluationContext;
use crate::error::ErrorDescriptor;
use crate::evaluator::Evaluator;
use crate::frame::Frame;
use crate::value::Value;

/// Per-statement metadata from the parse, independent of execution
#[derive(Debug, Clone, PartialEq)]
pub struct StatementInfo {
    /// Statement kind label, e.g. `set` or `repeat`
    pub kind: &'static str,
    pub span: Span,
    /// 1-based source line
    pub line: usize,
}

/// Metadata about the parsed program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterpretMeta {
    pub statements: Vec<StatementInfo>,
}

impl InterpretMeta {
    fn from_program(program: &Program) -> Self {
        InterpretMeta {
            statements: program
                .statements
                .iter()
                .map(|statement| StatementInfo {
                    kind: statement.kind.label(),
                    span: statement.span,
                    line: statement.span.line,
                })
                .collect(),
        }
    }
}

/// Outcome of an evaluation: frames, metadata, and the error if one halted
/// the run
#[derive(Debug)]
pub struct InterpretResult {
    pub error: Option<ErrorDescriptor>,
    pub meta: InterpretMeta,
    pub frames: Vec<Frame>,
}

impl InterpretResult {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    fn syntax_failure(error: ErrorDescriptor) -> Self {
        InterpretResult {
            error: Some(error),
            meta: InterpretMeta::default(),
            frames: Vec::new(),
        }
    }
}

/// Parse and execute a program against the given context
pub fn interpret(source: &str, context: EvaluationContext) -> InterpretResult {
    let program = match jikiscript_parser::parse_program(source) {
        Ok(program) => program,
        Err(error) => {
            return InterpretResult::syntax_failure(ErrorDescriptor::from_parse_error(
                &error, source,
            ));
        }
    };

    let meta = InterpretMeta::from_program(&program);
    let mut evaluator = Evaluator::new(context);
    let error = evaluator.run(&program);
    InterpretResult {
        error,
        meta,
        frames: evaluator.into_frames(),
    }
}

/// Parse and execute a program, then invoke one of its functions with
/// host-supplied arguments. Returns the run result together with the
/// function's return value, if it produced one.
pub fn interpret_function_call(
    source: &str,
    context: EvaluationContext,
    function_name: &str,
    arguments: &[Value],
) -> (InterpretResult, Option<Value>) {
    let program = match jikiscript_parser::parse_program(source) {
        Ok(program) => program,
        Err(error) => {
            let result = InterpretResult::syntax_failure(ErrorDescriptor::from_parse_error(
                &error, source,
            ));
            return (result, None);
        }
    };

    let meta = InterpretMeta::from_program(&program);
    let mut evaluator = Evaluator::new(context);
    if let Some(error) = evaluator.run(&program) {
        let result = InterpretResult {
            error: Some(error),
            meta,
            frames: evaluator.into_frames(),
        };
        return (result, None);
    }

    match evaluator.call_function(function_name, arguments.to_vec()) {
        Ok(value) => {
            let result = InterpretResult {
                error: None,
                meta,
                frames: evaluator.into_frames(),
            };
            (result, value)
        }
        Err(error) => {
            let descriptor = evaluator.record_failure(error);
            let result = InterpretResult {
                error: Some(descriptor),
                meta,
                frames: evaluator.into_frames(),
            };
            (result, None)
        }
    }
}

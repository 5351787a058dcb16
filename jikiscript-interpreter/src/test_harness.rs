//! Harness for exercising student-defined functions against test cases.
//!
//! Each test case carries argument and expectation text written in the
//! literal-only grammar: values, never code. The harness parses both, runs
//! the student's function once per case with a fresh evaluation context,
//! compares the returned value structurally against the expectation, and
//! packages the frames and an animation timeline for replay.

use miette::Diagnostic;
use thiserror::Error;

use jikiscript_parser::{ParseError, StatementKind};

use crate::context::EvaluationContext;
use crate::error::ErrorDescriptor;
use crate::frame::{frames_succeeded, Frame};
use crate::interpreter::interpret_function_call;
use crate::timeline::{build_animation_timeline, AnimationTimeline, ExerciseHints};
use crate::value::Value;

/// One test case for a student-defined function
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    /// Host-assigned identifier, echoed back on the result
    pub uuid: String,
    /// Argument list text in the literal grammar, e.g. `1, "two", [3]`
    pub args: String,
    /// Expected return value text in the literal grammar
    pub expected: String,
}

/// Outcome of one test case
#[derive(Debug, Clone, PartialEq)]
pub enum TestOutcome {
    Passed,
    /// The function ran but returned the wrong value, no value at all,
    /// or failed at runtime
    Failed { details: String },
    /// The case's args or expected text was not valid literal syntax
    SyntaxError { details: String },
}

/// Result of one test case, with its recorded frames and replay timeline
#[derive(Debug)]
pub struct TestResult {
    pub uuid: String,
    pub outcome: TestOutcome,
    /// Literal text of the value the function returned, when it returned one
    pub actual: Option<String>,
    pub error: Option<ErrorDescriptor>,
    pub frames: Vec<Frame>,
    pub timeline: AnimationTimeline,
    /// Hosts auto-play the replay only when every frame succeeded
    pub auto_play: bool,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.outcome == TestOutcome::Passed
    }
}

/// Results for a whole run of test cases, in input order
#[derive(Debug)]
pub struct TestRunReport {
    pub results: Vec<TestResult>,
}

impl TestRunReport {
    pub fn result_for(&self, uuid: &str) -> Option<&TestResult> {
        self.results.iter().find(|result| result.uuid == uuid)
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|result| result.passed())
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|result| result.passed()).count()
    }
}

/// Errors that prevent a test run from starting at all
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("the source failed to parse")]
    Source(
        #[from]
        #[diagnostic_source]
        ParseError,
    ),

    #[error("the source does not define a function named '{name}'")]
    FunctionNotFound { name: String },
}

/// Number of parameters the named function is defined with.
///
/// Hosts use this to validate test-case argument counts up front.
pub fn function_arity(source: &str, function_name: &str) -> Result<usize, HarnessError> {
    let program = jikiscript_parser::parse_program(source)?;
    program
        .statements
        .iter()
        .find_map(|statement| match &statement.kind {
            StatementKind::FunctionDefinition(function)
                if function.name.name == function_name =>
            {
                Some(function.arity())
            }
            _ => None,
        })
        .ok_or_else(|| HarnessError::FunctionNotFound {
            name: function_name.to_string(),
        })
}

/// Run every test case against the student's function.
///
/// `context_factory` builds a fresh evaluation context per case so that
/// no state leaks between cases. A case whose args or expected text is
/// malformed, or whose argument count does not match the function's
/// arity, gets a `SyntaxError` outcome; the other cases still run.
pub fn run_function_tests(
    source: &str,
    function_name: &str,
    cases: &[TestCase],
    hints: Option<&ExerciseHints>,
    context_factory: impl Fn() -> EvaluationContext,
) -> Result<TestRunReport, HarnessError> {
    // Surface bad sources and misnamed functions before running anything
    let arity = function_arity(source, function_name)?;

    let results = cases
        .iter()
        .map(|case| run_case(source, function_name, arity, case, hints, &context_factory))
        .collect();
    Ok(TestRunReport { results })
}

fn run_case(
    source: &str,
    function_name: &str,
    arity: usize,
    case: &TestCase,
    hints: Option<&ExerciseHints>,
    context_factory: &impl Fn() -> EvaluationContext,
) -> TestResult {
    let arguments = match jikiscript_parser::parse_literal_list(&case.args) {
        Ok(literals) => literals.into_iter().map(Value::from_literal).collect::<Vec<_>>(),
        Err(error) => return syntax_error_result(case, format!("invalid args: {error}"), hints),
    };
    if arguments.len() != arity {
        return syntax_error_result(
            case,
            format!(
                "{function_name} takes {arity} argument(s) but the case supplies {}",
                arguments.len()
            ),
            hints,
        );
    }
    let expected = match jikiscript_parser::parse_literal(&case.expected) {
        Ok(literal) => Value::from_literal(literal),
        Err(error) => {
            return syntax_error_result(case, format!("invalid expected value: {error}"), hints);
        }
    };

    let (run, returned) =
        interpret_function_call(source, context_factory(), function_name, &arguments);
    let actual = returned.as_ref().map(|value| value.to_literal_repr());

    let outcome = match (&run.error, returned) {
        (Some(error), _) => TestOutcome::Failed {
            details: error.message.clone(),
        },
        (None, Some(value)) if value.structurally_equals(&expected) => TestOutcome::Passed,
        (None, Some(value)) => TestOutcome::Failed {
            details: format!(
                "expected {} but got {}",
                expected.to_literal_repr(),
                value.to_literal_repr()
            ),
        },
        (None, None) => TestOutcome::Failed {
            details: format!(
                "expected {} but the function returned nothing",
                expected.to_literal_repr()
            ),
        },
    };

    let timeline = build_animation_timeline(hints, &run.frames);
    let auto_play = frames_succeeded(&run.frames);
    TestResult {
        uuid: case.uuid.clone(),
        outcome,
        actual,
        error: run.error,
        frames: run.frames,
        timeline,
        auto_play,
    }
}

fn syntax_error_result(
    case: &TestCase,
    details: String,
    hints: Option<&ExerciseHints>,
) -> TestResult {
    TestResult {
        uuid: case.uuid.clone(),
        outcome: TestOutcome::SyntaxError { details },
        actual: None,
        error: None,
        frames: Vec::new(),
        timeline: build_animation_timeline(hints, &[]),
        auto_play: false,
    }
}

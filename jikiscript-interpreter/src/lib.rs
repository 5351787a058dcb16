//! JikiScript interpreter.
//!
//! Evaluates JikiScript programs for learning environments: every run
//! produces a list of execution frames that hosts replay as an animation,
//! alongside the result or a categorised error. Exercises inject native
//! objects and functions through an evaluation context, and the test
//! harness checks student-defined functions against literal test cases.

pub mod context;
pub mod error;
pub mod evaluator;
pub mod execution;
pub mod frame;
pub mod interpreter;
pub mod object;
pub mod stdlib;
pub mod test_harness;
pub mod timeline;
pub mod value;

pub use context::{
    Callable, EvaluationContext, EvaluationContextBuilder, NativeFunction, DEFAULT_MAX_CALL_DEPTH,
    DEFAULT_MAX_STEPS,
};
pub use error::{ErrorCategory, ErrorDescriptor, NativeCallError, RuntimeError, ValueError};
pub use execution::ExecutionContext;
pub use frame::{frames_succeeded, Frame, FrameRecorder, FrameStatus};
pub use interpreter::{
    interpret, interpret_function_call, InterpretMeta, InterpretResult, StatementInfo,
};
pub use object::{Class, Getter, GetterFn, Instance, Method, MethodFn, Visibility};
pub use test_harness::{
    function_arity, run_function_tests, HarnessError, TestCase, TestOutcome, TestResult,
    TestRunReport,
};
pub use timeline::{
    build_animation_timeline, AnimationTimeline, ExerciseHints, Playback,
    DEFAULT_FRAME_DURATION_MS,
};
pub use value::Value;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
#[path = "tests/mod.rs"]
mod acceptance_tests;

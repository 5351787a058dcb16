//! The custom-function test harness end to end

use crate::{
    function_arity, run_function_tests, EvaluationContext, ExerciseHints, HarnessError, TestCase,
    TestOutcome,
};

const DOUBLE: &str = "function double with n do\nreturn n * 2\nend";

fn case(uuid: &str, args: &str, expected: &str) -> TestCase {
    TestCase {
        uuid: uuid.to_string(),
        args: args.to_string(),
        expected: expected.to_string(),
    }
}

#[test]
fn test_passing_and_failing_cases() {
    let cases = [case("a", "3", "6"), case("b", "4", "9")];
    let report =
        run_function_tests(DOUBLE, "double", &cases, None, EvaluationContext::default).unwrap();

    assert_eq!(report.results.len(), 2);
    assert!(report.result_for("a").unwrap().passed());
    assert!(!report.result_for("b").unwrap().passed());
    assert!(!report.all_passed());
    assert_eq!(report.passed_count(), 1);

    let failed = report.result_for("b").unwrap();
    assert_eq!(failed.actual.as_deref(), Some("8"));
    match &failed.outcome {
        TestOutcome::Failed { details } => {
            assert!(details.contains("9"));
            assert!(details.contains("8"));
        }
        other => panic!("Expected a failed outcome, got {other:?}"),
    }
}

#[test]
fn test_malformed_case_text_is_a_syntax_error_for_that_case_only() {
    let cases = [
        case("good", "2", "4"),
        case("bad-expected", "5", "oops("),
        case("bad-args", "delete_everything()", "4"),
    ];
    let report =
        run_function_tests(DOUBLE, "double", &cases, None, EvaluationContext::default).unwrap();

    assert!(report.result_for("good").unwrap().passed());
    assert!(matches!(
        report.result_for("bad-expected").unwrap().outcome,
        TestOutcome::SyntaxError { .. }
    ));
    assert!(matches!(
        report.result_for("bad-args").unwrap().outcome,
        TestOutcome::SyntaxError { .. }
    ));

    // A case rejected at parse time never executes anything
    assert!(report.result_for("bad-args").unwrap().frames.is_empty());
}

#[test]
fn test_argument_count_mismatches_are_syntax_errors() {
    let cases = [case("ok", "3", "6"), case("extra", "1, 2", "2")];
    let report =
        run_function_tests(DOUBLE, "double", &cases, None, EvaluationContext::default).unwrap();

    assert!(report.result_for("ok").unwrap().passed());

    let extra = report.result_for("extra").unwrap();
    match &extra.outcome {
        TestOutcome::SyntaxError { details } => {
            assert!(details.contains("1 argument(s)"));
        }
        other => panic!("Expected a syntax error outcome, got {other:?}"),
    }
    // The mismatched case never executes the function
    assert!(extra.frames.is_empty());
}

#[test]
fn test_expected_values_compare_structurally_and_in_order() {
    let source = "function pair with a, b do\nreturn [a, b]\nend";

    let cases = [
        case("ordered", "1, 2", "[1, 2]"),
        case("reversed", "1, 2", "[2, 1]"),
    ];
    let report =
        run_function_tests(source, "pair", &cases, None, EvaluationContext::default).unwrap();

    assert!(report.result_for("ordered").unwrap().passed());
    assert!(!report.result_for("reversed").unwrap().passed());
}

#[test]
fn test_runtime_errors_fail_the_case_and_disable_auto_play() {
    let source = "function invert with n do\nreturn 1 / n\nend";

    let cases = [case("ok", "2", "0.5"), case("boom", "0", "0")];
    let report =
        run_function_tests(source, "invert", &cases, None, EvaluationContext::default).unwrap();

    let ok = report.result_for("ok").unwrap();
    assert!(ok.passed());
    assert!(ok.auto_play);

    let boom = report.result_for("boom").unwrap();
    assert!(!boom.passed());
    assert!(!boom.auto_play);
    assert!(boom.error.is_some());
}

#[test]
fn test_functions_that_return_nothing_fail() {
    let source = "function silent with n do\nset x to n\nend";

    let report = run_function_tests(
        source,
        "silent",
        &[case("a", "1", "1")],
        None,
        EvaluationContext::default,
    )
    .unwrap();

    match &report.result_for("a").unwrap().outcome {
        TestOutcome::Failed { details } => assert!(details.contains("returned nothing")),
        other => panic!("Expected a failed outcome, got {other:?}"),
    }
}

#[test]
fn test_each_case_gets_a_fresh_context() {
    // `bump` mutates a context variable; if state leaked between cases
    // the second case would see the first case's mutation
    let source = "function bump do\nchange tally to tally + 1\nreturn tally\nend";

    let factory = || {
        EvaluationContext::builder()
            .define_variable("tally", crate::Value::Number(0.0))
            .build()
    };
    let cases = [case("first", "", "1"), case("second", "", "1")];
    let report = run_function_tests(source, "bump", &cases, None, factory).unwrap();

    assert!(report.all_passed());
}

#[test]
fn test_timelines_follow_the_exercise_hints() {
    let hints = ExerciseHints {
        title: None,
        frame_duration_ms: 50,
    };
    let report = run_function_tests(
        DOUBLE,
        "double",
        &[case("a", "3", "6")],
        Some(&hints),
        EvaluationContext::default,
    )
    .unwrap();

    let result = report.result_for("a").unwrap();
    assert_eq!(result.timeline.frame_duration_ms(), 50);
    assert_eq!(result.timeline.frame_count(), result.frames.len());
}

#[test]
fn test_function_arity() {
    assert_eq!(function_arity(DOUBLE, "double").unwrap(), 1);

    assert!(matches!(
        function_arity(DOUBLE, "triple"),
        Err(HarnessError::FunctionNotFound { .. })
    ));
    assert!(matches!(
        function_arity("set x to", "double"),
        Err(HarnessError::Source(_))
    ));
}

#[test]
fn test_unknown_function_aborts_the_run() {
    let result = run_function_tests(
        DOUBLE,
        "triple",
        &[case("a", "3", "9")],
        None,
        EvaluationContext::default,
    );

    assert!(matches!(
        result,
        Err(HarnessError::FunctionNotFound { .. })
    ));
}

//! Native-bridge behaviour: getters, methods, visibility, and logic errors

use std::rc::Rc;

use crate::{
    interpret, Class, ErrorCategory, EvaluationContext, FrameStatus, Instance, Value, Visibility,
};

#[derive(Default)]
struct BoardState {
    words: Vec<(i64, String)>,
}

/// A six-row word board. Placing a word on a row outside [1, 6] is an
/// exercise-rule violation.
fn board_class() -> Rc<Class> {
    let mut class = Class::new("Board");

    class.add_getter("word_count", Visibility::Public, |_context, instance| {
        let count = instance
            .state::<BoardState>()
            .map(|state| state.words.len())
            .unwrap_or(0);
        Value::Number(count as f64)
    });

    class.add_getter("answer_key", Visibility::Private, |_context, _instance| {
        Value::String("hidden".to_string())
    });

    class.add_method(
        "place_word",
        "placed a word on the board",
        Visibility::Public,
        |context, instance, arguments| {
            let (Some(Value::Number(row)), Some(Value::String(word))) =
                (arguments.first(), arguments.get(1))
            else {
                context.log_logic_error("place_word expects a row number and a word");
                return None;
            };
            if *row < 1.0 || *row > 6.0 || row.fract() != 0.0 {
                context.log_logic_error(format!(
                    "row {row} is outside the board: rows run from 1 to 6"
                ));
                return None;
            }
            if let Some(mut state) = instance.state_mut::<BoardState>() {
                state.words.push((*row as i64, word.clone()));
            }
            Some(Value::Boolean(true))
        },
    );

    class.add_method(
        "clear",
        "cleared the board",
        Visibility::Public,
        |_context, instance, _arguments| {
            if let Some(mut state) = instance.state_mut::<BoardState>() {
                state.words.clear();
            }
            None
        },
    );

    Rc::new(class)
}

fn board_context() -> (EvaluationContext, Rc<Instance>) {
    let instance = Instance::new(board_class(), BoardState::default());
    let context = EvaluationContext::builder()
        .define_variable("board", Value::Instance(Rc::clone(&instance)))
        .build();
    (context, instance)
}

#[test]
fn test_method_calls_mutate_host_state() {
    let (context, instance) = board_context();
    let result = interpret(
        "board.place_word(1, \"crate\")\nboard.place_word(6, \"cargo\")",
        context,
    );

    assert!(result.succeeded());
    let state = instance.state::<BoardState>().unwrap();
    assert_eq!(state.words.len(), 2);
    assert_eq!(state.words[0], (1, "crate".to_string()));
    assert_eq!(state.words[1], (6, "cargo".to_string()));
}

#[test]
fn test_rows_outside_the_board_are_logic_errors() {
    for row in ["0", "7", "-1", "2.5"] {
        let (context, instance) = board_context();
        let source = format!("board.place_word({row}, \"crate\")\nset after to 1");
        let result = interpret(&source, context);

        let error = result.error.expect("expected a logic error");
        assert_eq!(error.category, ErrorCategory::Logic);
        assert!(error.message.contains("rows run from 1 to 6"));

        // The run halts: the statement after the violation never executes
        let last = result.frames.last().unwrap();
        assert_eq!(last.status, FrameStatus::Errored);
        assert!(last.variables.get("after").is_none());

        assert!(instance.state::<BoardState>().unwrap().words.is_empty());
    }
}

#[test]
fn test_getter_reads_host_state() {
    let (context, instance) = board_context();
    instance
        .state_mut::<BoardState>()
        .unwrap()
        .words
        .push((3, "jiki".to_string()));

    let result = interpret("set n to board.word_count", context);

    assert!(result.succeeded());
    let frame = result.frames.last().unwrap();
    assert_eq!(frame.variables.get("n").map(String::as_str), Some("1"));
}

#[test]
fn test_private_members_are_invisible_to_scripts() {
    let (context, _instance) = board_context();
    let result = interpret("set x to board.answer_key", context);

    let error = result.error.expect("expected a runtime error");
    assert_eq!(error.category, ErrorCategory::RuntimeType);
    assert!(error.message.contains("answer_key"));
}

#[test]
fn test_unknown_members_are_reported_with_the_class_name() {
    let (context, _instance) = board_context();
    let result = interpret("board.launch_rocket()", context);

    let error = result.error.expect("expected a runtime error");
    assert_eq!(error.category, ErrorCategory::RuntimeType);
    assert!(error.message.contains("Board"));
    assert!(error.message.contains("launch_rocket"));
}

#[test]
fn test_method_results_are_usable_in_expressions() {
    let (context, _instance) = board_context();
    let result = interpret("set ok to board.place_word(2, \"crates\")", context);

    assert!(result.succeeded());
    let frame = result.frames.last().unwrap();
    assert_eq!(frame.variables.get("ok").map(String::as_str), Some("true"));
}

#[test]
fn test_void_methods_work_as_statements_but_not_expressions() {
    let (context, _instance) = board_context();
    let result = interpret("board.clear()", context);
    assert!(result.succeeded());

    let (context, _instance) = board_context();
    let result = interpret("set x to board.clear()", context);
    let error = result.error.expect("expected a runtime error");
    assert_eq!(error.category, ErrorCategory::RuntimeType);
}

#[test]
fn test_member_access_on_a_non_instance_fails() {
    let context = EvaluationContext::builder()
        .define_variable("x", Value::Number(1.0))
        .build();
    let result = interpret("set y to x.anything", context);

    let error = result.error.expect("expected a runtime error");
    assert_eq!(error.category, ErrorCategory::RuntimeType);
}

#[test]
fn test_method_calls_are_captioned_with_their_description() {
    let (context, _instance) = board_context();
    let result = interpret("board.place_word(3, \"jiki\")", context);

    assert!(result.succeeded());
    assert!(result
        .frames
        .iter()
        .any(|frame| frame.description == "placed a word on the board"));
}

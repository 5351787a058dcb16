//! Standard library functions available to JikiScript programs.
//!
//! All functions are registered by name on the evaluation context; an
//! exercise can shadow any of them by registering its own function with
//! the same name afterwards.

use std::collections::HashMap;

use crate::context::{Callable, NativeFunction};
use crate::error::NativeCallError;
use crate::execution::ExecutionContext;
use crate::value::Value;

pub(crate) fn register_stdlib(functions: &mut HashMap<String, Callable>) {
    register(functions, "concatenate", builtin_concatenate);
    register(functions, "join", builtin_join);
    register(functions, "push", builtin_push);
    register(functions, "length", builtin_length);
    register(functions, "to_upper_case", builtin_to_upper_case);
    register(functions, "to_lower_case", builtin_to_lower_case);
    register(functions, "contains", builtin_contains);
    register(functions, "number_to_string", builtin_number_to_string);
    register(functions, "string_to_number", builtin_string_to_number);
    register(functions, "min", builtin_min);
    register(functions, "max", builtin_max);
    register(functions, "abs", builtin_abs);
}

fn register(functions: &mut HashMap<String, Callable>, name: &str, callback: NativeFunction) {
    functions.insert(
        name.to_string(),
        Callable::Native {
            name: name.to_string(),
            callback,
        },
    );
}

// Argument helpers

fn expect_arity(
    function: &'static str,
    arguments: &[Value],
    expected: usize,
) -> Result<(), NativeCallError> {
    if arguments.len() == expected {
        Ok(())
    } else {
        Err(NativeCallError::Arity {
            function,
            expected,
            received: arguments.len(),
        })
    }
}

fn expect_string<'a>(
    function: &'static str,
    arguments: &'a [Value],
    index: usize,
) -> Result<&'a str, NativeCallError> {
    match arguments.get(index) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(NativeCallError::ArgumentType {
            function,
            index: index + 1,
            expected: "a String",
            found: other.type_name(),
        }),
        None => Err(NativeCallError::Arity {
            function,
            expected: index + 1,
            received: arguments.len(),
        }),
    }
}

fn expect_number(
    function: &'static str,
    arguments: &[Value],
    index: usize,
) -> Result<f64, NativeCallError> {
    match arguments.get(index) {
        Some(Value::Number(n)) => Ok(*n),
        Some(other) => Err(NativeCallError::ArgumentType {
            function,
            index: index + 1,
            expected: "a Number",
            found: other.type_name(),
        }),
        None => Err(NativeCallError::Arity {
            function,
            expected: index + 1,
            received: arguments.len(),
        }),
    }
}

fn expect_list<'a>(
    function: &'static str,
    arguments: &'a [Value],
    index: usize,
) -> Result<&'a [Value], NativeCallError> {
    match arguments.get(index) {
        Some(Value::List(items)) => Ok(items),
        Some(other) => Err(NativeCallError::ArgumentType {
            function,
            index: index + 1,
            expected: "a List",
            found: other.type_name(),
        }),
        None => Err(NativeCallError::Arity {
            function,
            expected: index + 1,
            received: arguments.len(),
        }),
    }
}

// String functions

fn builtin_concatenate(
    _context: &mut ExecutionContext,
    arguments: &[Value],
) -> Result<Value, NativeCallError> {
    expect_arity("concatenate", arguments, 2)?;
    let left = expect_string("concatenate", arguments, 0)?;
    let right = expect_string("concatenate", arguments, 1)?;
    Ok(Value::String(format!("{left}{right}")))
}

fn builtin_to_upper_case(
    _context: &mut ExecutionContext,
    arguments: &[Value],
) -> Result<Value, NativeCallError> {
    expect_arity("to_upper_case", arguments, 1)?;
    let text = expect_string("to_upper_case", arguments, 0)?;
    Ok(Value::String(text.to_uppercase()))
}

fn builtin_to_lower_case(
    _context: &mut ExecutionContext,
    arguments: &[Value],
) -> Result<Value, NativeCallError> {
    expect_arity("to_lower_case", arguments, 1)?;
    let text = expect_string("to_lower_case", arguments, 0)?;
    Ok(Value::String(text.to_lowercase()))
}

fn builtin_number_to_string(
    _context: &mut ExecutionContext,
    arguments: &[Value],
) -> Result<Value, NativeCallError> {
    expect_arity("number_to_string", arguments, 1)?;
    let number = expect_number("number_to_string", arguments, 0)?;
    Ok(Value::String(number.to_string()))
}

fn builtin_string_to_number(
    _context: &mut ExecutionContext,
    arguments: &[Value],
) -> Result<Value, NativeCallError> {
    expect_arity("string_to_number", arguments, 1)?;
    let text = expect_string("string_to_number", arguments, 0)?;
    text.trim()
        .parse::<f64>()
        .map(Value::Number)
        .map_err(|_| NativeCallError::Message(format!("cannot convert \"{text}\" to a number")))
}

// List functions

fn builtin_join(
    _context: &mut ExecutionContext,
    arguments: &[Value],
) -> Result<Value, NativeCallError> {
    expect_arity("join", arguments, 2)?;
    let items = expect_list("join", arguments, 0)?;
    let separator = expect_string("join", arguments, 1)?;

    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => parts.push(s.clone()),
            other => {
                return Err(NativeCallError::Message(format!(
                    "join expects a List of Strings, found {}",
                    other.type_name()
                )));
            }
        }
    }
    Ok(Value::String(parts.join(separator)))
}

fn builtin_push(
    _context: &mut ExecutionContext,
    arguments: &[Value],
) -> Result<Value, NativeCallError> {
    expect_arity("push", arguments, 2)?;
    let items = expect_list("push", arguments, 0)?;

    let mut result = items.to_vec();
    result.push(arguments[1].clone());
    Ok(Value::List(result))
}

fn builtin_length(
    _context: &mut ExecutionContext,
    arguments: &[Value],
) -> Result<Value, NativeCallError> {
    expect_arity("length", arguments, 1)?;
    match &arguments[0] {
        Value::String(s) => Ok(Value::Number(s.chars().count() as f64)),
        Value::List(items) => Ok(Value::Number(items.len() as f64)),
        other => Err(NativeCallError::ArgumentType {
            function: "length",
            index: 1,
            expected: "a String or List",
            found: other.type_name(),
        }),
    }
}

fn builtin_contains(
    _context: &mut ExecutionContext,
    arguments: &[Value],
) -> Result<Value, NativeCallError> {
    expect_arity("contains", arguments, 2)?;
    match &arguments[0] {
        Value::String(haystack) => {
            let needle = expect_string("contains", arguments, 1)?;
            Ok(Value::Boolean(haystack.contains(needle)))
        }
        Value::List(items) => Ok(Value::Boolean(
            items.iter().any(|item| item.structurally_equals(&arguments[1])),
        )),
        other => Err(NativeCallError::ArgumentType {
            function: "contains",
            index: 1,
            expected: "a String or List",
            found: other.type_name(),
        }),
    }
}

// Numeric functions

fn builtin_min(
    _context: &mut ExecutionContext,
    arguments: &[Value],
) -> Result<Value, NativeCallError> {
    expect_arity("min", arguments, 2)?;
    let a = expect_number("min", arguments, 0)?;
    let b = expect_number("min", arguments, 1)?;
    Ok(Value::Number(a.min(b)))
}

fn builtin_max(
    _context: &mut ExecutionContext,
    arguments: &[Value],
) -> Result<Value, NativeCallError> {
    expect_arity("max", arguments, 2)?;
    let a = expect_number("max", arguments, 0)?;
    let b = expect_number("max", arguments, 1)?;
    Ok(Value::Number(a.max(b)))
}

fn builtin_abs(
    _context: &mut ExecutionContext,
    arguments: &[Value],
) -> Result<Value, NativeCallError> {
    expect_arity("abs", arguments, 1)?;
    let number = expect_number("abs", arguments, 0)?;
    Ok(Value::Number(number.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(
        callback: NativeFunction,
        arguments: &[Value],
    ) -> Result<Value, NativeCallError> {
        let mut context = ExecutionContext::new(100);
        callback(&mut context, arguments)
    }

    #[test]
    fn test_concatenate() {
        let result = call(
            builtin_concatenate,
            &[
                Value::String("foo".to_string()),
                Value::String("bar".to_string()),
            ],
        );
        assert_eq!(result.unwrap(), Value::String("foobar".to_string()));
    }

    #[test]
    fn test_concatenate_rejects_numbers() {
        let result = call(
            builtin_concatenate,
            &[Value::Number(1.0), Value::String("bar".to_string())],
        );
        assert!(matches!(result, Err(NativeCallError::ArgumentType { .. })));
    }

    #[test]
    fn test_join() {
        let items = Value::List(vec![
            Value::String("a".to_string()),
            Value::String("b".to_string()),
            Value::String("c".to_string()),
        ]);
        let result = call(builtin_join, &[items, Value::String("-".to_string())]);
        assert_eq!(result.unwrap(), Value::String("a-b-c".to_string()));
    }

    #[test]
    fn test_push_returns_a_new_list() {
        let original = Value::List(vec![Value::Number(1.0)]);
        let result = call(builtin_push, &[original.clone(), Value::Number(2.0)]).unwrap();

        assert_eq!(
            result,
            Value::List(vec![Value::Number(1.0), Value::Number(2.0)])
        );
        assert_eq!(original, Value::List(vec![Value::Number(1.0)]));
    }

    #[test]
    fn test_length() {
        assert_eq!(
            call(builtin_length, &[Value::String("héllo".to_string())]).unwrap(),
            Value::Number(5.0)
        );
        assert_eq!(
            call(builtin_length, &[Value::List(vec![Value::Number(1.0)])]).unwrap(),
            Value::Number(1.0)
        );
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(
            call(builtin_to_upper_case, &[Value::String("abc".to_string())]).unwrap(),
            Value::String("ABC".to_string())
        );
        assert_eq!(
            call(builtin_to_lower_case, &[Value::String("ABC".to_string())]).unwrap(),
            Value::String("abc".to_string())
        );
    }

    #[test]
    fn test_contains() {
        assert_eq!(
            call(
                builtin_contains,
                &[
                    Value::String("haystack".to_string()),
                    Value::String("stack".to_string()),
                ],
            )
            .unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            call(
                builtin_contains,
                &[
                    Value::List(vec![Value::Number(1.0), Value::Number(2.0)]),
                    Value::Number(3.0),
                ],
            )
            .unwrap(),
            Value::Boolean(false)
        );
    }

    #[test]
    fn test_number_conversions() {
        assert_eq!(
            call(builtin_number_to_string, &[Value::Number(42.0)]).unwrap(),
            Value::String("42".to_string())
        );
        assert_eq!(
            call(builtin_string_to_number, &[Value::String("3.5".to_string())]).unwrap(),
            Value::Number(3.5)
        );
        assert!(matches!(
            call(builtin_string_to_number, &[Value::String("nope".to_string())]),
            Err(NativeCallError::Message(_))
        ));
    }

    #[test]
    fn test_min_max_abs() {
        assert_eq!(
            call(builtin_min, &[Value::Number(2.0), Value::Number(5.0)]).unwrap(),
            Value::Number(2.0)
        );
        assert_eq!(
            call(builtin_max, &[Value::Number(2.0), Value::Number(5.0)]).unwrap(),
            Value::Number(5.0)
        );
        assert_eq!(
            call(builtin_abs, &[Value::Number(-3.0)]).unwrap(),
            Value::Number(3.0)
        );
    }

    #[test]
    fn test_arity_is_checked() {
        assert!(matches!(
            call(builtin_abs, &[]),
            Err(NativeCallError::Arity { .. })
        ));
        assert!(matches!(
            call(builtin_min, &[Value::Number(1.0)]),
            Err(NativeCallError::Arity { .. })
        ));
    }
}

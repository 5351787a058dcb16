//! Runtime value representation for the JikiScript interpreter.
//!
//! This module defines the Value enum that represents all possible
//! runtime values in JikiScript, along with operations for type checking,
//! arithmetic, comparisons, and the canonical literal representation used
//! by frame snapshots and the test harness.

use std::cmp::Ordering;
use std::rc::Rc;

use jikiscript_parser::Literal;

use crate::error::ValueError;
use crate::object::Instance;

/// Runtime values in the JikiScript interpreter
#[derive(Debug, Clone)]
pub enum Value {
    /// 64-bit floating point number (the language's only numeric type)
    Number(f64),
    /// UTF-8 string
    String(String),
    /// Boolean value
    Boolean(bool),
    /// Ordered list of values
    List(Vec<Value>),
    /// Opaque handle to a native-bridge object
    Instance(Rc<Instance>),
}

impl Value {
    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Boolean(_) => "Boolean",
            Value::List(_) => "List",
            Value::Instance(_) => "Instance",
        }
    }

    /// Convert a parsed literal into a runtime value
    pub fn from_literal(literal: Literal) -> Value {
        match literal {
            Literal::Number(n) => Value::Number(n),
            Literal::String(s) => Value::String(s),
            Literal::Boolean(b) => Value::Boolean(b),
            Literal::List(elements) => {
                Value::List(elements.into_iter().map(Value::from_literal).collect())
            }
        }
    }

    /// Truthiness is strict: only booleans may appear in condition position
    pub fn as_boolean(&self) -> Result<bool, ValueError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(ValueError::NotABoolean {
                found: other.type_name(),
            }),
        }
    }

    /// Canonical literal text for this value.
    ///
    /// Used for frame snapshots and for the serialize-then-compare path of
    /// the test harness, so it must round-trip through the literal grammar
    /// for every non-Instance value.
    pub fn to_literal_repr(&self) -> String {
        match self {
            Value::Number(n) => n.to_string(),
            Value::String(s) => {
                let mut repr = String::with_capacity(s.len() + 2);
                repr.push('"');
                for c in s.chars() {
                    match c {
                        '"' => repr.push_str("\\\""),
                        '\\' => repr.push_str("\\\\"),
                        '\n' => repr.push_str("\\n"),
                        '\t' => repr.push_str("\\t"),
                        '\r' => repr.push_str("\\r"),
                        other => repr.push(other),
                    }
                }
                repr.push('"');
                repr
            }
            Value::Boolean(b) => b.to_string(),
            Value::List(items) => {
                let reprs: Vec<String> = items.iter().map(|v| v.to_literal_repr()).collect();
                format!("[{}]", reprs.join(", "))
            }
            Value::Instance(instance) => format!("a {}", instance.class().name()),
        }
    }

    // Arithmetic operations

    /// Addition: numbers add, strings and lists concatenate
    pub fn add(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
            (Value::List(a), Value::List(b)) => {
                let mut result = a.clone();
                result.extend(b.iter().cloned());
                Ok(Value::List(result))
            }
            _ => Err(ValueError::invalid_operation("+", self, other)),
        }
    }

    pub fn subtract(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
            _ => Err(ValueError::invalid_operation("-", self, other)),
        }
    }

    pub fn multiply(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),
            _ => Err(ValueError::invalid_operation("*", self, other)),
        }
    }

    pub fn divide(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                if *b == 0.0 {
                    Err(ValueError::DivisionByZero)
                } else {
                    Ok(Value::Number(a / b))
                }
            }
            _ => Err(ValueError::invalid_operation("/", self, other)),
        }
    }

    pub fn modulo(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                if *b == 0.0 {
                    Err(ValueError::DivisionByZero)
                } else {
                    Ok(Value::Number(a % b))
                }
            }
            _ => Err(ValueError::invalid_operation("%", self, other)),
        }
    }

    pub fn negate(&self) -> Result<Value, ValueError> {
        match self {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(ValueError::InvalidUnaryOperation {
                op: "-",
                operand: other.type_name(),
            }),
        }
    }

    // Comparison operations

    /// Structural, order-sensitive equality.
    ///
    /// Lists compare element by element; instances compare by identity.
    /// Different types are never equal.
    pub fn structurally_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(x, y)| x.structurally_equals(y))
            }
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Ordering comparison (for <, >, <=, >=); numbers and strings only
    pub fn compare(&self, other: &Value) -> Result<Ordering, ValueError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                Ok(a.partial_cmp(b).unwrap_or(Ordering::Equal))
            }
            (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
            _ => Err(ValueError::invalid_operation("comparison", self, other)),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_equals(other)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_literal_repr())
    }
}

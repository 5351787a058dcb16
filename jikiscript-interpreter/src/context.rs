//! Evaluation context: the environment a program runs against.
//!
//! Hosts build an [`EvaluationContext`] per run, pre-binding variables
//! (including native-bridge instances) and registering callable functions.
//! Name registration is last-write-wins, so exercises can shadow stdlib
//! functions with their own versions.

use std::collections::HashMap;
use std::rc::Rc;

use jikiscript_parser::FunctionDefinition;

use crate::error::NativeCallError;
use crate::execution::ExecutionContext;
use crate::stdlib;
use crate::value::Value;

/// Signature of a natively-implemented function
pub type NativeFunction =
    fn(&mut ExecutionContext, &[Value]) -> Result<Value, NativeCallError>;

/// A function callable from script code
#[derive(Clone)]
pub enum Callable {
    /// Host- or stdlib-provided function
    Native {
        name: String,
        callback: NativeFunction,
    },
    /// Function defined by `function ... do ... end` in the program
    UserDefined(Rc<FunctionDefinition>),
}

impl std::fmt::Debug for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Callable::Native { name, .. } => write!(f, "Callable::Native({name})"),
            Callable::UserDefined(function) => {
                write!(f, "Callable::UserDefined({})", function.name.name)
            }
        }
    }
}

pub const DEFAULT_MAX_STEPS: usize = 10_000;
pub const DEFAULT_MAX_CALL_DEPTH: usize = 64;

/// Environment for one evaluation: initial variables, callable functions,
/// and resource limits
#[derive(Debug)]
pub struct EvaluationContext {
    pub(crate) variables: HashMap<String, Value>,
    pub(crate) functions: HashMap<String, Callable>,
    pub(crate) max_steps: usize,
    pub(crate) max_call_depth: usize,
}

impl EvaluationContext {
    pub fn builder() -> EvaluationContextBuilder {
        EvaluationContextBuilder::new()
    }

    /// Context with the standard library and default limits
    pub fn with_stdlib() -> Self {
        EvaluationContext::builder().with_stdlib().build()
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}

impl Default for EvaluationContext {
    fn default() -> Self {
        EvaluationContext::builder().build()
    }
}

/// Builder for [`EvaluationContext`]
#[derive(Debug)]
pub struct EvaluationContextBuilder {
    variables: HashMap<String, Value>,
    functions: HashMap<String, Callable>,
    max_steps: usize,
    max_call_depth: usize,
}

impl EvaluationContextBuilder {
    pub fn new() -> Self {
        EvaluationContextBuilder {
            variables: HashMap::new(),
            functions: HashMap::new(),
            max_steps: DEFAULT_MAX_STEPS,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Register the standard library functions
    pub fn with_stdlib(mut self) -> Self {
        stdlib::register_stdlib(&mut self.functions);
        self
    }

    /// Pre-bind a variable. Later definitions of the same name win.
    pub fn define_variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    /// Register a native function. Later definitions of the same name win,
    /// including over stdlib functions.
    pub fn define_function(mut self, name: impl Into<String>, callback: NativeFunction) -> Self {
        let name = name.into();
        self.functions.insert(
            name.clone(),
            Callable::Native {
                name,
                callback,
            },
        );
        self
    }

    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    pub fn build(self) -> EvaluationContext {
        EvaluationContext {
            variables: self.variables,
            functions: self.functions,
            max_steps: self.max_steps,
            max_call_depth: self.max_call_depth,
        }
    }
}

impl Default for EvaluationContextBuilder {
    fn default() -> Self {
        EvaluationContextBuilder::new()
    }
}

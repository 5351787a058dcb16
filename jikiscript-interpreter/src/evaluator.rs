//! Tree-walking evaluator with frame recording.
//!
//! The evaluator executes a parsed program against an evaluation context,
//! appending a frame for every statement, condition check, loop iteration,
//! and native call. Execution is bounded by the context's step budget and
//! call depth limit; when a run fails, the error becomes the terminal
//! frame and evaluation stops.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use jikiscript_parser::{
    BinaryOperation, BinaryOperator, Expression, ExpressionKind, FunctionCall, Identifier,
    IndexOperation, MemberAccess, MethodCall, Program, Span, Statement, StatementKind,
    UnaryOperation, UnaryOperator,
};

use crate::context::{Callable, EvaluationContext};
use crate::error::{ErrorDescriptor, RuntimeError, ValueError};
use crate::execution::ExecutionContext;
use crate::frame::{Frame, FrameRecorder};
use crate::object::{Instance, Visibility};
use crate::value::Value;

/// Control-flow outcome of executing one statement
enum Flow {
    Normal,
    Return(Option<Value>),
}

/// One lexical scope. Function-call scopes are barriers: name lookup
/// stops at the nearest barrier and then falls through to the globals,
/// so a function never sees its caller's locals.
struct Scope {
    bindings: HashMap<String, Value>,
    barrier: bool,
}

pub struct Evaluator {
    scopes: Vec<Scope>,
    functions: HashMap<String, Callable>,
    recorder: FrameRecorder,
    execution: ExecutionContext,
    call_depth: usize,
    max_call_depth: usize,
}

impl Evaluator {
    pub fn new(context: EvaluationContext) -> Self {
        let max_steps = context.max_steps;
        Evaluator {
            scopes: vec![Scope {
                bindings: context.variables.into_iter().collect(),
                barrier: false,
            }],
            functions: context.functions,
            recorder: FrameRecorder::new(),
            execution: ExecutionContext::new(max_steps),
            call_depth: 0,
            max_call_depth: context.max_call_depth,
        }
    }

    /// Execute a whole program. On failure the error is recorded as the
    /// terminal frame and returned as a descriptor.
    pub fn run(&mut self, program: &Program) -> Option<ErrorDescriptor> {
        for statement in &program.statements {
            match self.exec_statement(statement) {
                Ok(Flow::Normal) => {}
                Ok(Flow::Return(_)) => {
                    return Some(self.record_failure(RuntimeError::ReturnOutsideFunction {
                        span: statement.span,
                    }));
                }
                Err(error) => return Some(self.record_failure(error)),
            }
        }
        None
    }

    /// Invoke a context-registered or program-defined function by name.
    /// Used for host-driven calls after the program body has run.
    pub fn call_function(
        &mut self,
        name: &str,
        arguments: Vec<Value>,
    ) -> Result<Option<Value>, RuntimeError> {
        let callable = self.functions.get(name).cloned().ok_or_else(|| {
            RuntimeError::FunctionNotFound {
                name: name.to_string(),
                span: Span::empty(),
            }
        })?;
        let span = match &callable {
            Callable::UserDefined(function) => function.span,
            Callable::Native { .. } => Span::empty(),
        };
        self.invoke_callable(name, &callable, arguments, span)
    }

    pub fn frames(&self) -> &[Frame] {
        self.recorder.frames()
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.recorder.into_frames()
    }

    /// Record a runtime error as the terminal frame
    pub(crate) fn record_failure(&mut self, error: RuntimeError) -> ErrorDescriptor {
        let descriptor = ErrorDescriptor::from_runtime_error(&error);
        let variables = self.snapshot_variables();
        self.recorder
            .record_error(error.span(), error.to_string(), variables, descriptor.clone());
        descriptor
    }

    // Statements

    fn exec_statement(&mut self, statement: &Statement) -> Result<Flow, RuntimeError> {
        self.count_step(statement.span)?;
        match &statement.kind {
            StatementKind::Set(set) => {
                let value = self.eval_expression(&set.value)?;
                let repr = value.to_literal_repr();
                self.current_scope_mut()
                    .bindings
                    .insert(set.name.name.clone(), value);
                self.record(
                    statement.span,
                    format!("Set {} to {repr}", set.name.name),
                    Some(repr),
                );
                Ok(Flow::Normal)
            }
            StatementKind::Change(change) => {
                let value = self.eval_expression(&change.value)?;
                let repr = value.to_literal_repr();
                self.update_variable(&change.name, value)?;
                self.record(
                    statement.span,
                    format!("Changed {} to {repr}", change.name.name),
                    Some(repr),
                );
                Ok(Flow::Normal)
            }
            StatementKind::If(if_statement) => {
                let condition = self.eval_expression(&if_statement.condition)?;
                let truthy = self.expect_boolean(&condition, if_statement.condition.span)?;
                self.record(
                    if_statement.condition.span,
                    format!("Condition evaluated to {truthy}"),
                    Some(truthy.to_string()),
                );

                let body = if truthy {
                    Some(&if_statement.then_body)
                } else {
                    if_statement.else_body.as_ref()
                };
                if let Some(body) = body {
                    return self.exec_body(body);
                }
                Ok(Flow::Normal)
            }
            StatementKind::Repeat(repeat) => {
                let count_value = self.eval_expression(&repeat.count)?;
                let count = self.expect_repeat_count(&count_value, repeat.count.span)?;
                self.record(
                    repeat.count.span,
                    format!("Repeating {count} times"),
                    Some(count.to_string()),
                );

                for iteration in 1..=count {
                    self.count_step(statement.span)?;
                    self.record(
                        statement.span,
                        format!("Started iteration {iteration} of {count}"),
                        None,
                    );
                    match self.exec_body(&repeat.body)? {
                        Flow::Normal => {}
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            }
            StatementKind::FunctionDefinition(function) => {
                self.functions.insert(
                    function.name.name.clone(),
                    Callable::UserDefined(Rc::new(function.clone())),
                );
                self.record(
                    statement.span,
                    format!("Defined function {}", function.name.name),
                    None,
                );
                Ok(Flow::Normal)
            }
            StatementKind::Return(ret) => {
                let value = match &ret.value {
                    Some(expression) => Some(self.eval_expression(expression)?),
                    None => None,
                };
                let repr = value.as_ref().map(|v| v.to_literal_repr());
                let description = match &repr {
                    Some(repr) => format!("Returned {repr}"),
                    None => "Returned".to_string(),
                };
                self.record(statement.span, description, repr);
                Ok(Flow::Return(value))
            }
            StatementKind::Expression(expression) => {
                let result = self.eval_statement_expression(expression)?;
                let repr = result.map(|value| value.to_literal_repr());
                self.record(
                    statement.span,
                    describe_statement_expression(expression),
                    repr,
                );
                Ok(Flow::Normal)
            }
        }
    }

    fn exec_body(&mut self, body: &[Statement]) -> Result<Flow, RuntimeError> {
        for statement in body {
            match self.exec_statement(statement)? {
                Flow::Normal => {}
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    /// Statement-position expressions tolerate void calls; every other
    /// expression position requires a value.
    fn eval_statement_expression(
        &mut self,
        expression: &Expression,
    ) -> Result<Option<Value>, RuntimeError> {
        match &expression.kind {
            ExpressionKind::Call(call) => self.eval_function_call(call),
            ExpressionKind::MethodCall(call) => self.eval_method_call(call),
            _ => self.eval_expression(expression).map(Some),
        }
    }

    // Expressions

    fn eval_expression(&mut self, expression: &Expression) -> Result<Value, RuntimeError> {
        match &expression.kind {
            ExpressionKind::Number(n) => Ok(Value::Number(*n)),
            ExpressionKind::String(s) => Ok(Value::String(s.clone())),
            ExpressionKind::Boolean(b) => Ok(Value::Boolean(*b)),
            ExpressionKind::List(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval_expression(element)?);
                }
                Ok(Value::List(values))
            }
            ExpressionKind::Identifier(identifier) => self.lookup_variable(identifier),
            ExpressionKind::Binary(binary) => self.eval_binary(binary),
            ExpressionKind::Unary(unary) => self.eval_unary(unary),
            ExpressionKind::Call(call) => self
                .eval_function_call(call)?
                .ok_or(RuntimeError::VoidValue { span: call.span }),
            ExpressionKind::MemberAccess(access) => self.eval_member_access(access),
            ExpressionKind::MethodCall(call) => self
                .eval_method_call(call)?
                .ok_or(RuntimeError::VoidValue { span: call.span }),
            ExpressionKind::Index(index) => self.eval_index(index),
        }
    }

    fn eval_binary(&mut self, binary: &BinaryOperation) -> Result<Value, RuntimeError> {
        // and/or short-circuit; everything else evaluates both sides
        match binary.operator {
            BinaryOperator::LogicalAnd => {
                let left = self.eval_expression(&binary.left)?;
                if !self.expect_boolean(&left, binary.left.span)? {
                    return Ok(Value::Boolean(false));
                }
                let right = self.eval_expression(&binary.right)?;
                return Ok(Value::Boolean(
                    self.expect_boolean(&right, binary.right.span)?,
                ));
            }
            BinaryOperator::LogicalOr => {
                let left = self.eval_expression(&binary.left)?;
                if self.expect_boolean(&left, binary.left.span)? {
                    return Ok(Value::Boolean(true));
                }
                let right = self.eval_expression(&binary.right)?;
                return Ok(Value::Boolean(
                    self.expect_boolean(&right, binary.right.span)?,
                ));
            }
            _ => {}
        }

        let left = self.eval_expression(&binary.left)?;
        let right = self.eval_expression(&binary.right)?;
        let result = match binary.operator {
            BinaryOperator::Add => left.add(&right),
            BinaryOperator::Subtract => left.subtract(&right),
            BinaryOperator::Multiply => left.multiply(&right),
            BinaryOperator::Divide => left.divide(&right),
            BinaryOperator::Modulo => left.modulo(&right),
            BinaryOperator::Equal => Ok(Value::Boolean(left.structurally_equals(&right))),
            BinaryOperator::NotEqual => Ok(Value::Boolean(!left.structurally_equals(&right))),
            BinaryOperator::Less => left
                .compare(&right)
                .map(|ordering| Value::Boolean(ordering.is_lt())),
            BinaryOperator::LessEqual => left
                .compare(&right)
                .map(|ordering| Value::Boolean(ordering.is_le())),
            BinaryOperator::Greater => left
                .compare(&right)
                .map(|ordering| Value::Boolean(ordering.is_gt())),
            BinaryOperator::GreaterEqual => left
                .compare(&right)
                .map(|ordering| Value::Boolean(ordering.is_ge())),
            BinaryOperator::LogicalAnd | BinaryOperator::LogicalOr => {
                unreachable!("logical operators are handled above")
            }
        };
        result.map_err(|error| value_error_at(error, binary.span))
    }

    fn eval_unary(&mut self, unary: &UnaryOperation) -> Result<Value, RuntimeError> {
        let operand = self.eval_expression(&unary.operand)?;
        match unary.operator {
            UnaryOperator::Minus => operand
                .negate()
                .map_err(|error| value_error_at(error, unary.span)),
            UnaryOperator::Not => {
                let truthy = self.expect_boolean(&operand, unary.operand.span)?;
                Ok(Value::Boolean(!truthy))
            }
        }
    }

    fn eval_function_call(
        &mut self,
        call: &FunctionCall,
    ) -> Result<Option<Value>, RuntimeError> {
        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.eval_expression(argument)?);
        }
        let callable = self.functions.get(&call.name.name).cloned().ok_or_else(|| {
            RuntimeError::FunctionNotFound {
                name: call.name.name.clone(),
                span: call.span,
            }
        })?;
        self.invoke_callable(&call.name.name, &callable, arguments, call.span)
    }

    fn invoke_callable(
        &mut self,
        name: &str,
        callable: &Callable,
        arguments: Vec<Value>,
        span: Span,
    ) -> Result<Option<Value>, RuntimeError> {
        match callable {
            Callable::Native { name, callback } => {
                self.count_step(span)?;
                let result = callback(&mut self.execution, &arguments);
                if let Some(message) = self.execution.take_logic_error() {
                    return Err(RuntimeError::Logic { message, span });
                }
                let value = result.map_err(|error| RuntimeError::TypeMismatch {
                    message: error.to_string(),
                    span,
                })?;
                self.record(
                    span,
                    format!("Called {name}"),
                    Some(value.to_literal_repr()),
                );
                Ok(Some(value))
            }
            Callable::UserDefined(function) => {
                if arguments.len() != function.arity() {
                    return Err(RuntimeError::ArityMismatch {
                        name: name.to_string(),
                        expected: function.arity(),
                        received: arguments.len(),
                        span,
                    });
                }
                if self.call_depth >= self.max_call_depth {
                    return Err(RuntimeError::StackOverflow {
                        max_depth: self.max_call_depth,
                        span,
                    });
                }

                self.record(span, format!("Called {name}"), None);

                let bindings = function
                    .parameters
                    .iter()
                    .map(|parameter| parameter.name.clone())
                    .zip(arguments)
                    .collect();
                self.scopes.push(Scope {
                    bindings,
                    barrier: true,
                });
                self.call_depth += 1;

                let mut returned = None;
                let mut failure = None;
                for statement in &function.body {
                    match self.exec_statement(statement) {
                        Ok(Flow::Normal) => {}
                        Ok(Flow::Return(value)) => {
                            returned = value;
                            break;
                        }
                        Err(error) => {
                            failure = Some(error);
                            break;
                        }
                    }
                }

                self.scopes.pop();
                self.call_depth -= 1;

                match failure {
                    Some(error) => Err(error),
                    None => Ok(returned),
                }
            }
        }
    }

    fn eval_member_access(&mut self, access: &MemberAccess) -> Result<Value, RuntimeError> {
        let object = self.eval_expression(&access.object)?;
        let instance = self.expect_instance(&object, access.object.span)?;
        let class = instance.class_rc();

        let getter = class
            .getter(&access.member.name)
            .filter(|getter| getter.visibility == Visibility::Public)
            .ok_or_else(|| RuntimeError::MemberNotFound {
                class: class.name().to_string(),
                member: access.member.name.clone(),
                span: access.span,
            })?;

        self.count_step(access.span)?;
        let value = getter.invoke(&mut self.execution, &instance);
        if let Some(message) = self.execution.take_logic_error() {
            return Err(RuntimeError::Logic {
                message,
                span: access.span,
            });
        }

        self.record(
            access.span,
            format!("Got {}.{}", class.name(), access.member.name),
            Some(value.to_literal_repr()),
        );
        Ok(value)
    }

    fn eval_method_call(&mut self, call: &MethodCall) -> Result<Option<Value>, RuntimeError> {
        let object = self.eval_expression(&call.object)?;
        let instance = self.expect_instance(&object, call.object.span)?;
        let class = instance.class_rc();

        let method = class
            .method(&call.method.name)
            .filter(|method| method.visibility == Visibility::Public)
            .ok_or_else(|| RuntimeError::MemberNotFound {
                class: class.name().to_string(),
                member: call.method.name.clone(),
                span: call.span,
            })?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.eval_expression(argument)?);
        }

        self.count_step(call.span)?;
        let result = method.invoke(&mut self.execution, &instance, &arguments);
        if let Some(message) = self.execution.take_logic_error() {
            return Err(RuntimeError::Logic {
                message,
                span: call.span,
            });
        }

        self.record(
            call.span,
            method.description.clone(),
            result.as_ref().map(|value| value.to_literal_repr()),
        );
        Ok(result)
    }

    fn eval_index(&mut self, index: &IndexOperation) -> Result<Value, RuntimeError> {
        let object = self.eval_expression(&index.object)?;
        let Value::List(items) = object else {
            return Err(RuntimeError::TypeMismatch {
                message: format!("cannot index into a {}", object.type_name()),
                span: index.object.span,
            });
        };

        let position = self.eval_expression(&index.index)?;
        let Value::Number(position) = position else {
            return Err(RuntimeError::TypeMismatch {
                message: format!(
                    "list indices must be Numbers, found {}",
                    position.type_name()
                ),
                span: index.index.span,
            });
        };
        if position.fract() != 0.0 {
            return Err(RuntimeError::TypeMismatch {
                message: format!("list indices must be whole numbers, found {position}"),
                span: index.index.span,
            });
        }

        // Indices are 1-based
        let offset = position as i64;
        if offset < 1 || offset as usize > items.len() {
            return Err(RuntimeError::IndexOutOfBounds {
                index: offset,
                length: items.len(),
                span: index.span,
            });
        }
        Ok(items[offset as usize - 1].clone())
    }

    // Variables and scopes

    fn current_scope_mut(&mut self) -> &mut Scope {
        let Some(scope) = self.scopes.last_mut() else {
            unreachable!("the scope stack is never empty")
        };
        scope
    }

    fn lookup_variable(&self, identifier: &Identifier) -> Result<Value, RuntimeError> {
        for scope in self.scopes.iter().rev() {
            if let Some(value) = scope.bindings.get(&identifier.name) {
                return Ok(value.clone());
            }
            if scope.barrier {
                break;
            }
        }
        if let Some(value) = self
            .scopes
            .first()
            .and_then(|scope| scope.bindings.get(&identifier.name))
        {
            return Ok(value.clone());
        }
        Err(RuntimeError::VariableNotFound {
            name: identifier.name.clone(),
            span: identifier.span,
        })
    }

    fn update_variable(
        &mut self,
        identifier: &Identifier,
        value: Value,
    ) -> Result<(), RuntimeError> {
        let mut hit_barrier = false;
        for scope in self.scopes.iter_mut().rev() {
            if let Some(binding) = scope.bindings.get_mut(&identifier.name) {
                *binding = value;
                return Ok(());
            }
            if scope.barrier {
                hit_barrier = true;
                break;
            }
        }
        if hit_barrier {
            if let Some(binding) = self
                .scopes
                .first_mut()
                .and_then(|scope| scope.bindings.get_mut(&identifier.name))
            {
                *binding = value;
                return Ok(());
            }
        }
        Err(RuntimeError::VariableNotFound {
            name: identifier.name.clone(),
            span: identifier.span,
        })
    }

    /// Variables visible at the current point, as canonical literal text.
    /// Inside a function this is the globals overlaid with the function's
    /// own scope.
    fn snapshot_variables(&self) -> BTreeMap<String, String> {
        let mut variables = BTreeMap::new();
        if let Some(globals) = self.scopes.first() {
            for (name, value) in &globals.bindings {
                variables.insert(name.clone(), value.to_literal_repr());
            }
        }
        if let Some(barrier) = self.scopes.iter().rposition(|scope| scope.barrier) {
            for scope in &self.scopes[barrier..] {
                for (name, value) in &scope.bindings {
                    variables.insert(name.clone(), value.to_literal_repr());
                }
            }
        }
        variables
    }

    // Helpers

    fn record(&mut self, span: Span, description: String, result: Option<String>) {
        let variables = self.snapshot_variables();
        self.recorder.record(span, description, variables, result);
    }

    fn count_step(&mut self, span: Span) -> Result<(), RuntimeError> {
        self.execution
            .count_step()
            .map_err(|error| RuntimeError::StepBudgetExhausted {
                max_steps: error.max_steps,
                span,
            })
    }

    fn expect_boolean(&self, value: &Value, span: Span) -> Result<bool, RuntimeError> {
        value
            .as_boolean()
            .map_err(|error| value_error_at(error, span))
    }

    fn expect_repeat_count(&self, value: &Value, span: Span) -> Result<usize, RuntimeError> {
        match value {
            Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 => Ok(*n as usize),
            other => Err(RuntimeError::TypeMismatch {
                message: format!(
                    "repeat count must be a non-negative whole number, found {other}"
                ),
                span,
            }),
        }
    }

    fn expect_instance(&self, value: &Value, span: Span) -> Result<Rc<Instance>, RuntimeError> {
        match value {
            Value::Instance(instance) => Ok(Rc::clone(instance)),
            other => Err(RuntimeError::TypeMismatch {
                message: format!(
                    "only native objects have members, found {}",
                    other.type_name()
                ),
                span,
            }),
        }
    }
}

fn value_error_at(error: ValueError, span: Span) -> RuntimeError {
    match error {
        ValueError::DivisionByZero => RuntimeError::DivisionByZero { span },
        other => RuntimeError::TypeMismatch {
            message: other.to_string(),
            span,
        },
    }
}

fn describe_statement_expression(expression: &Expression) -> String {
    match &expression.kind {
        ExpressionKind::Call(call) => format!("Called {}", call.name.name),
        ExpressionKind::MethodCall(call) => match &call.object.kind {
            ExpressionKind::Identifier(identifier) => {
                format!("Called {}.{}", identifier.name, call.method.name)
            }
            _ => format!("Called {}", call.method.name),
        },
        _ => "Evaluated expression".to_string(),
    }
}

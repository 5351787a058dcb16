//! Per-run execution state shared with native callbacks.
//!
//! An [`ExecutionContext`] is created for each evaluation and handed to
//! every native getter, method, and function invocation. It carries the
//! step budget that bounds runaway programs and the logic-error channel
//! native code uses to abort a run with an exercise-specific message.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
#[error("execution step budget of {max_steps} exhausted")]
pub struct StepBudgetExhausted {
    pub max_steps: usize,
}

/// Mutable state threaded through a single evaluation
#[derive(Debug)]
pub struct ExecutionContext {
    pending_logic_error: Option<String>,
    steps_taken: usize,
    max_steps: usize,
}

impl ExecutionContext {
    pub(crate) fn new(max_steps: usize) -> Self {
        ExecutionContext {
            pending_logic_error: None,
            steps_taken: 0,
            max_steps,
        }
    }

    /// Report an exercise-rule violation from native code.
    ///
    /// The evaluator checks for a pending logic error after every native
    /// call and halts the run with it. Only the first message is kept;
    /// later calls are ignored.
    pub fn log_logic_error(&mut self, message: impl Into<String>) {
        if self.pending_logic_error.is_none() {
            self.pending_logic_error = Some(message.into());
        }
    }

    pub fn has_logic_error(&self) -> bool {
        self.pending_logic_error.is_some()
    }

    pub(crate) fn take_logic_error(&mut self) -> Option<String> {
        self.pending_logic_error.take()
    }

    /// Count one unit of work against the step budget
    pub(crate) fn count_step(&mut self) -> Result<(), StepBudgetExhausted> {
        if self.steps_taken >= self.max_steps {
            return Err(StepBudgetExhausted {
                max_steps: self.max_steps,
            });
        }
        self.steps_taken += 1;
        Ok(())
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_budget_is_enforced() {
        let mut context = ExecutionContext::new(3);

        assert!(context.count_step().is_ok());
        assert!(context.count_step().is_ok());
        assert!(context.count_step().is_ok());
        assert_eq!(
            context.count_step(),
            Err(StepBudgetExhausted { max_steps: 3 })
        );
        assert_eq!(context.steps_taken(), 3);
    }

    #[test]
    fn test_first_logic_error_wins() {
        let mut context = ExecutionContext::new(10);
        assert!(!context.has_logic_error());

        context.log_logic_error("first");
        context.log_logic_error("second");

        assert!(context.has_logic_error());
        assert_eq!(context.take_logic_error(), Some("first".to_string()));
        assert!(!context.has_logic_error());
        assert_eq!(context.take_logic_error(), None);
    }
}

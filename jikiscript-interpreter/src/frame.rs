//! Execution frames: the replayable trace of a run.
//!
//! Every executed statement, condition check, loop iteration, and native
//! call appends one [`Frame`] capturing the source span, a human-readable
//! description, and a snapshot of the variables in scope. The frame list
//! is the ground truth a host replays to animate the run; it is append-only
//! and never reordered.

use std::collections::BTreeMap;

use jikiscript_parser::Span;

use crate::error::ErrorDescriptor;

/// Outcome of the step a frame describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Succeeded,
    Errored,
}

/// One step of a recorded execution
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Position in the recording, starting at 0
    pub index: usize,
    /// Source span of the construct this frame describes
    pub span: Span,
    /// 1-based source line, duplicated from the span for host convenience
    pub line: usize,
    pub status: FrameStatus,
    /// Human-readable caption, e.g. `Set x to 5`
    pub description: String,
    /// Variables in scope after this step, as canonical literal text
    pub variables: BTreeMap<String, String>,
    /// Literal text of the value this step produced, if any
    pub result: Option<String>,
    /// Present on the final frame of a failed run
    pub error: Option<ErrorDescriptor>,
}

/// Append-only collector of frames for one evaluation
#[derive(Debug, Default)]
pub struct FrameRecorder {
    frames: Vec<Frame>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        FrameRecorder::default()
    }

    /// Append a successful frame
    pub fn record(
        &mut self,
        span: Span,
        description: String,
        variables: BTreeMap<String, String>,
        result: Option<String>,
    ) {
        let index = self.frames.len();
        self.frames.push(Frame {
            index,
            span,
            line: span.line,
            status: FrameStatus::Succeeded,
            description,
            variables,
            result,
            error: None,
        });
    }

    /// Append the terminal frame of a failed run
    pub fn record_error(
        &mut self,
        span: Span,
        description: String,
        variables: BTreeMap<String, String>,
        error: ErrorDescriptor,
    ) {
        let index = self.frames.len();
        self.frames.push(Frame {
            index,
            span,
            line: span.line,
            status: FrameStatus::Errored,
            description,
            variables,
            result: None,
            error: Some(error),
        });
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// True when every frame succeeded. An empty slice counts as a success:
/// a run that executed nothing violated nothing.
pub fn frames_succeeded(frames: &[Frame]) -> bool {
    frames
        .iter()
        .all(|frame| frame.status == FrameStatus::Succeeded)
}

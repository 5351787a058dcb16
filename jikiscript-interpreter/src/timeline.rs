//! Animation timelines: frames arranged for replay.
//!
//! A timeline is a read-only view over a recorded frame list with timing
//! attached. Building one never mutates the frames, so multiple timelines
//! (say, one per viewer) can be produced from the same recording.

use std::rc::Rc;

use crate::frame::Frame;

pub const DEFAULT_FRAME_DURATION_MS: u32 = 100;

/// Presentation hints a host attaches to an exercise
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseHints {
    /// Title shown above the replay, if any
    pub title: Option<String>,
    /// How long each frame is displayed
    pub frame_duration_ms: u32,
}

impl Default for ExerciseHints {
    fn default() -> Self {
        ExerciseHints {
            title: None,
            frame_duration_ms: DEFAULT_FRAME_DURATION_MS,
        }
    }
}

/// A replayable animation over a recorded execution
#[derive(Debug, Clone)]
pub struct AnimationTimeline {
    frames: Rc<[Frame]>,
    frame_duration_ms: u32,
    title: Option<String>,
}

impl AnimationTimeline {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame_at(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn frame_duration_ms(&self) -> u32 {
        self.frame_duration_ms
    }

    /// Total replay duration
    pub fn duration_ms(&self) -> u64 {
        self.frames.len() as u64 * u64::from(self.frame_duration_ms)
    }

    /// Start a replay from the first frame
    pub fn play(&self) -> Playback {
        Playback {
            frames: Rc::clone(&self.frames),
            cursor: 0,
            frame_duration_ms: self.frame_duration_ms,
        }
    }
}

/// Build a timeline from recorded frames, honouring the exercise's
/// presentation hints when present
pub fn build_animation_timeline(
    hints: Option<&ExerciseHints>,
    frames: &[Frame],
) -> AnimationTimeline {
    let (title, frame_duration_ms) = match hints {
        Some(hints) => (hints.title.clone(), hints.frame_duration_ms),
        None => (None, DEFAULT_FRAME_DURATION_MS),
    };
    AnimationTimeline {
        frames: frames.to_vec().into(),
        frame_duration_ms,
        title,
    }
}

/// An in-progress replay of a timeline
#[derive(Debug, Clone)]
pub struct Playback {
    frames: Rc<[Frame]>,
    cursor: usize,
    frame_duration_ms: u32,
}

impl Playback {
    /// Replay time elapsed up to the current position
    pub fn elapsed_ms(&self) -> u64 {
        self.cursor as u64 * u64::from(self.frame_duration_ms)
    }

    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl Iterator for Playback {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let frame = self.frames.get(self.cursor).cloned();
        if frame.is_some() {
            self.cursor += 1;
        }
        frame
    }
}

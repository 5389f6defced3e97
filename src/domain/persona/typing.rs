//! Typing telemetry captured while a subject composes a free-text answer.

use serde::{Deserialize, Serialize};

/// Gap between keystrokes that counts as a pause.
pub const PAUSE_THRESHOLD_MS: u64 = 1_000;

/// Gap between keystrokes that additionally counts as a hesitation.
pub const HESITATION_THRESHOLD_MS: u64 = 3_000;

/// Finalized typing telemetry for one answer. Read-only once built.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypingMetrics {
    /// Elapsed time from first to last keystroke
    pub total_time_ms: u64,
    /// Characters in the submitted text
    pub char_count: u32,
    /// Characters per second
    pub average_speed: f64,
    pub pause_count: u32,
    pub backspace_count: u32,
    pub hesitation_count: u32,
    /// Text offsets at which deletions happened
    #[serde(default)]
    pub corrections: Vec<u32>,
}

impl TypingMetrics {
    /// Share of keystrokes that were deletions, in [0, 1].
    pub fn backspace_ratio(&self) -> f64 {
        let keystrokes = u64::from(self.char_count) + u64::from(self.backspace_count);
        if keystrokes == 0 {
            return 0.0;
        }
        self.backspace_count as f64 / keystrokes as f64
    }
}

/// Builds [`TypingMetrics`] incrementally from keystroke events.
///
/// Timestamps are milliseconds on any monotonic clock; events are
/// expected in non-decreasing order and out-of-order events are treated
/// as having no gap.
#[derive(Debug, Clone, Default)]
pub struct TypingRecorder {
    first_event_ms: Option<u64>,
    last_event_ms: Option<u64>,
    typed: u32,
    deleted: u32,
    pauses: u32,
    hesitations: u32,
    corrections: Vec<u32>,
}

impl TypingRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an inserted character.
    pub fn record_char(&mut self, at_ms: u64) {
        self.observe_gap(at_ms);
        self.typed = self.typed.saturating_add(1);
    }

    /// Records a backspace/delete at the given text offset.
    pub fn record_deletion(&mut self, at_ms: u64, offset: u32) {
        self.observe_gap(at_ms);
        self.deleted = self.deleted.saturating_add(1);
        self.corrections.push(offset);
    }

    fn observe_gap(&mut self, at_ms: u64) {
        if let Some(last) = self.last_event_ms {
            let gap = at_ms.saturating_sub(last);
            if gap >= PAUSE_THRESHOLD_MS {
                self.pauses = self.pauses.saturating_add(1);
            }
            if gap >= HESITATION_THRESHOLD_MS {
                self.hesitations = self.hesitations.saturating_add(1);
            }
        }
        self.first_event_ms.get_or_insert(at_ms);
        self.last_event_ms = Some(self.last_event_ms.map_or(at_ms, |last| last.max(at_ms)));
    }

    /// Finalizes the recording.
    pub fn finish(self) -> TypingMetrics {
        let total_time_ms = match (self.first_event_ms, self.last_event_ms) {
            (Some(first), Some(last)) => last.saturating_sub(first),
            _ => 0,
        };
        let char_count = self.typed.saturating_sub(self.deleted);
        let average_speed = if total_time_ms == 0 {
            0.0
        } else {
            f64::from(char_count) / (total_time_ms as f64 / 1_000.0)
        };

        TypingMetrics {
            total_time_ms,
            char_count,
            average_speed,
            pause_count: self.pauses,
            backspace_count: self.deleted,
            hesitation_count: self.hesitations,
            corrections: self.corrections,
        }
    }
}

//! Simulated incremental rendering of a finished reply.
//!
//! The backend already holds the complete reply text; the reveal merely
//! publishes a growing prefix on a fixed tick so the assistant appears to
//! type. The schedule is a finite, non-restartable sequence of prefixes
//! whose last element is the full text itself, exactly once. Timing and
//! cancellation live in the backend handler; this module is pure.

use std::time::Duration;

/// Target number of publishes for a reply of any length.
pub const REVEAL_STEPS: usize = 60;

/// Delay between consecutive publishes.
pub const REVEAL_TICK: Duration = Duration::from_millis(14);

/// Iterator over the published prefixes of one reply.
///
/// Prefix boundaries are character counts, never raw byte offsets, so a
/// multi-byte sequence is never split.
pub struct RevealSchedule {
    full: String,
    /// Byte offset of every char boundary in `full`.
    boundaries: Vec<usize>,
    cursor: usize,
    step: usize,
    finished: bool,
}

impl RevealSchedule {
    pub fn new(full: &str) -> Self {
        let boundaries: Vec<usize> = full.char_indices().map(|(i, _)| i).collect();
        let len = boundaries.len();
        Self {
            full: full.to_string(),
            boundaries,
            cursor: 0,
            step: (len / REVEAL_STEPS).max(1),
            // An empty reply completes immediately with zero publishes.
            finished: len == 0,
        }
    }

    /// True once the final value has been handed out (or the reply was
    /// empty to begin with).
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Iterator for RevealSchedule {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }
        self.cursor += self.step;
        if self.cursor >= self.boundaries.len() {
            self.finished = true;
            return Some(self.full.clone());
        }
        Some(self.full[..self.boundaries[self.cursor]].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reply_publishes_nothing() {
        let mut schedule = RevealSchedule::new("");
        assert!(schedule.is_finished());
        assert!(schedule.next().is_none());
    }

    #[test]
    fn test_short_reply_advances_one_char_per_tick() {
        // len < 60 so step clamps to 1.
        let published: Vec<String> = RevealSchedule::new("abcd").collect();
        assert_eq!(published, vec!["a", "ab", "abc", "abcd"]);
    }

    #[test]
    fn test_prefixes_strictly_increase_and_end_at_full() {
        let full: String = "The quick brown fox. ".repeat(40); // 840 chars
        let published: Vec<String> = RevealSchedule::new(&full).collect();

        assert!(!published.is_empty());
        assert_eq!(published.last().unwrap(), &full);
        assert_eq!(
            published.iter().filter(|p| **p == full).count(),
            1,
            "full value must be published exactly once"
        );

        let mut prev_len = 0;
        for prefix in &published {
            assert!(full.starts_with(prefix.as_str()));
            let len = prefix.chars().count();
            assert!(len > prev_len, "prefix lengths must strictly increase");
            prev_len = len;
        }
    }

    #[test]
    fn test_step_scales_with_length() {
        // 600 chars -> step 10 -> roughly 60 publishes.
        let full = "x".repeat(600);
        let published: Vec<String> = RevealSchedule::new(&full).collect();
        assert_eq!(published.len(), 60);
        assert_eq!(published[0].chars().count(), 10);
    }

    #[test]
    fn test_exhausted_schedule_stays_finished() {
        let mut schedule = RevealSchedule::new("ok");
        while schedule.next().is_some() {}
        assert!(schedule.is_finished());
        assert!(schedule.next().is_none());
    }

    #[test]
    fn test_multibyte_text_never_splits_chars() {
        let full = "도서관은 월요일부터 금요일까지 운영합니다";
        let published: Vec<String> = RevealSchedule::new(full).collect();
        assert_eq!(published.last().unwrap(), full);
        for prefix in &published {
            // Would have panicked on a bad boundary already; check anyway.
            assert!(full.starts_with(prefix.as_str()));
        }
    }
}

//! Round-counting session clock.

use accord_strategy::Timeline;
use accord_types::Deadline;
use std::sync::atomic::{AtomicU32, Ordering};

/// Elapsed time measured as completed rounds over the round deadline.
///
/// The driver advances the clock through a shared reference while the
/// strategy reads it.
#[derive(Debug)]
pub struct RoundTimeline {
    total: u32,
    current: AtomicU32,
}

impl RoundTimeline {
    pub fn new(total: u32) -> Self {
        Self {
            total,
            current: AtomicU32::new(0),
        }
    }

    /// Completes one round. Saturates at the deadline.
    pub fn advance(&self) {
        let _ = self
            .current
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |round| {
                (round < self.total).then_some(round + 1)
            });
    }

    /// Rounds completed so far.
    pub fn round(&self) -> u32 {
        self.current.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.round() >= self.total
    }

    pub fn deadline(&self) -> Deadline {
        Deadline::Rounds(self.total)
    }
}

impl Timeline for RoundTimeline {
    fn elapsed(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        f64::from(self.round()) / f64::from(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_tracks_rounds() {
        let timeline = RoundTimeline::new(4);
        assert_eq!(timeline.elapsed(), 0.0);
        timeline.advance();
        assert_eq!(timeline.elapsed(), 0.25);
        timeline.advance();
        timeline.advance();
        assert_eq!(timeline.elapsed(), 0.75);
        assert!(!timeline.is_finished());
    }

    #[test]
    fn advance_saturates_at_deadline() {
        let timeline = RoundTimeline::new(2);
        for _ in 0..5 {
            timeline.advance();
        }
        assert_eq!(timeline.round(), 2);
        assert_eq!(timeline.elapsed(), 1.0);
        assert!(timeline.is_finished());
    }

    #[test]
    fn zero_round_deadline_is_already_over() {
        let timeline = RoundTimeline::new(0);
        assert_eq!(timeline.elapsed(), 1.0);
        assert_eq!(timeline.deadline(), Deadline::Rounds(0));
    }
}

//! Stepwise replay over a finished trace.
//!
//! [`Playback`] is only a cursor: it borrows the trace immutably and moves an
//! index. Pacing (timers, frame delays) is the caller's business, so replaying
//! the same trace twice always shows the same records in the same order.

use crate::id::StepId;
use crate::step::StepRecord;
use crate::trace::StepTrace;

/// A cursor over the records of a [`StepTrace`].
///
/// The cursor starts before the first record; the first [`advance`] shows
/// record 0.
///
/// [`advance`]: Playback::advance
#[derive(Debug, Clone)]
pub struct Playback<'t> {
    trace: &'t StepTrace,
    /// Number of records shown so far.
    shown: usize,
}

impl<'t> Playback<'t> {
    pub fn new(trace: &'t StepTrace) -> Self {
        Playback { trace, shown: 0 }
    }

    pub fn trace(&self) -> &'t StepTrace {
        self.trace
    }

    /// The record currently on screen, if playback has started.
    pub fn current(&self) -> Option<&'t StepRecord> {
        self.shown
            .checked_sub(1)
            .and_then(|index| self.trace.records().get(index))
    }

    /// Id of the current record.
    pub fn position(&self) -> Option<StepId> {
        self.current().map(|record| record.id)
    }

    /// Moves to the next record; `None` once the final record is showing.
    pub fn advance(&mut self) -> Option<&'t StepRecord> {
        if self.shown >= self.trace.len() {
            return None;
        }
        self.shown += 1;
        self.current()
    }

    /// Moves back one record; `None` when already at the first record or
    /// before the start.
    pub fn step_back(&mut self) -> Option<&'t StepRecord> {
        if self.shown <= 1 {
            return None;
        }
        self.shown -= 1;
        self.current()
    }

    /// Jumps straight to the record with `id`.
    pub fn seek(&mut self, id: StepId) -> Option<&'t StepRecord> {
        let record = self.trace.get(id)?;
        self.shown = id.index() + 1;
        Some(record)
    }

    /// Back to before the first record.
    pub fn reset(&mut self) {
        self.shown = 0;
    }

    /// True once the last record is showing.
    pub fn is_finished(&self) -> bool {
        self.shown == self.trace.len()
    }
}

impl<'t> Iterator for Playback<'t> {
    type Item = &'t StepRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caesar::CaesarEngine;
    use crate::engine::TraceEngine;

    #[test]
    fn advance_walks_every_record_once() {
        let out = CaesarEngine.encrypt("abc", 1);
        let mut playback = Playback::new(&out.trace);
        assert!(playback.current().is_none());

        let ids: Vec<u32> = playback.by_ref().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert!(playback.is_finished());
        assert!(playback.advance().is_none());
        assert_eq!(playback.position(), Some(StepId(4)));
    }

    #[test]
    fn step_back_stops_at_first_record() {
        let out = CaesarEngine.encrypt("ab", 1);
        let mut playback = Playback::new(&out.trace);
        assert!(playback.step_back().is_none());
        playback.advance();
        playback.advance();
        assert_eq!(playback.step_back().map(|r| r.id), Some(StepId(0)));
        assert!(playback.step_back().is_none());
        assert_eq!(playback.position(), Some(StepId(0)));
    }

    #[test]
    fn seek_and_reset() {
        let out = CaesarEngine.encrypt("hello", 3);
        let mut playback = Playback::new(&out.trace);
        assert_eq!(playback.seek(StepId(3)).map(|r| r.id), Some(StepId(3)));
        assert_eq!(playback.advance().map(|r| r.id), Some(StepId(4)));
        assert!(playback.seek(StepId(99)).is_none());
        assert_eq!(playback.position(), Some(StepId(4)));

        playback.reset();
        assert!(playback.current().is_none());
        assert_eq!(playback.advance().map(|r| r.id), Some(StepId(0)));
    }

    #[test]
    fn replay_is_idempotent() {
        let out = CaesarEngine.encrypt("Attack at Dawn!", 5);
        let first: Vec<_> = Playback::new(&out.trace).cloned().collect();
        let second: Vec<_> = Playback::new(&out.trace).cloned().collect();
        assert_eq!(first, second);
        assert_eq!(first.as_slice(), out.trace.records());
    }
}

//! Playback-time synchronization.
//!
//! [`SyncEngine::update`] is called once per playback-time report (about
//! 10 Hz). It has no timer of its own; the only deferred work is the accent
//! restore, which goes through an [`AccentScheduler`].

mod accent;

pub use accent::{AccentScheduler, ManualAccentScheduler, PendingAccent, TokioAccentScheduler};

use std::time::Duration;

use crate::animation::{derive_intent, has_impulse};
use crate::constants::sync::DEFAULT_ACCENT_DELAY_MS;
use crate::types::{AnimationIntent, LyricsDocument};

/// Output of a sync pass, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// New animation intent for the renderer; the last one wins.
    Animation(AnimationIntent),
    /// The active line changed to `index`.
    ActiveLineChanged {
        /// Newly active line.
        index: usize,
        /// Line that was active before, if any.
        previous: Option<usize>,
    },
}

/// Resolves the active line and derives animation intent from it.
///
/// The engine never holds on to the document: each pass borrows it.
pub struct SyncEngine<S: AccentScheduler> {
    scheduler: S,
    accent_delay: Duration,
    current: Option<usize>,
    previous: Option<usize>,
    pending_accent: Option<S::Handle>,
}

impl<S: AccentScheduler> SyncEngine<S> {
    /// Create an engine with the default 500 ms accent delay.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            accent_delay: Duration::from_millis(DEFAULT_ACCENT_DELAY_MS),
            current: None,
            previous: None,
            pending_accent: None,
        }
    }

    /// Override the accent delay.
    #[must_use]
    pub fn with_accent_delay(mut self, delay: Duration) -> Self {
        self.accent_delay = delay;
        self
    }

    /// Line found active by the last pass.
    pub const fn active_index(&self) -> Option<usize> {
        self.current
    }

    /// Line that was active before the last transition.
    pub const fn previous_index(&self) -> Option<usize> {
        self.previous
    }

    /// The scheduler used for accent restores.
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the scheduler (for caller-driven schedulers).
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Forget all tracking, e.g. after new lyrics were loaded.
    pub fn reset(&mut self) {
        self.cancel_accent();
        self.current = None;
        self.previous = None;
    }

    /// Run one synchronization pass.
    ///
    /// Paused playback always yields the idle intent and resets tracking, so
    /// resuming re-reports the active line. With no active line (a gap, or no
    /// document) the idle intent is emitted but tracking stays put, so the
    /// gap is reported only once.
    pub fn update(
        &mut self,
        document: Option<&LyricsDocument>,
        current_time: f64,
        is_playing: bool,
    ) -> Vec<SyncEvent> {
        if !is_playing {
            self.cancel_accent();
            self.current = None;
            return vec![SyncEvent::Animation(AnimationIntent::idle())];
        }

        let mut events = Vec::new();
        let index = document.and_then(|doc| doc.active_index(current_time));
        let transitioned = index != self.current;

        if transitioned {
            self.cancel_accent();
            self.previous = self.current;
            self.current = index;
            if let Some(index) = index {
                tracing::debug!(
                    "Active line {index} (was {:?}) at {current_time:.2}s",
                    self.previous
                );
                events.push(SyncEvent::ActiveLineChanged { index, previous: self.previous });
            }
        }

        let Some(line) = index.and_then(|i| document.and_then(|doc| doc.line(i))) else {
            events.push(SyncEvent::Animation(AnimationIntent::idle()));
            return events;
        };

        let intent = derive_intent(&line.text, current_time - line.start_time);
        events.push(SyncEvent::Animation(intent.clone()));

        if transitioned && has_impulse(&line.text) {
            tracing::debug!("Accent on \"{}\"", line.text);
            events.push(SyncEvent::Animation(AnimationIntent::accent()));
            self.pending_accent = Some(self.scheduler.schedule(self.accent_delay, intent));
        }

        events
    }

    fn cancel_accent(&mut self) {
        if let Some(handle) = self.pending_accent.take() {
            self.scheduler.cancel(handle);
        }
    }
}

/// The last animation intent in a batch of events, if any.
pub fn latest_intent(events: &[SyncEvent]) -> Option<&AnimationIntent> {
    events.iter().rev().find_map(|event| match event {
        SyncEvent::Animation(intent) => Some(intent),
        SyncEvent::ActiveLineChanged { .. } => None,
    })
}

/// The line change in a batch of events, if any.
pub fn line_change(events: &[SyncEvent]) -> Option<(usize, Option<usize>)> {
    events.iter().find_map(|event| match event {
        SyncEvent::ActiveLineChanged { index, previous } => Some((*index, *previous)),
        SyncEvent::Animation(_) => None,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::{LyricsLine, Mood};

    fn engine() -> SyncEngine<ManualAccentScheduler> {
        SyncEngine::new(ManualAccentScheduler::new())
    }

    fn two_line_doc() -> LyricsDocument {
        LyricsDocument::new(vec![
            LyricsLine::new("dance all night", 0.0, 4.0),
            LyricsLine::new("quiet moment", 4.0, 8.0),
        ])
    }

    #[test]
    fn paused_is_always_idle() {
        let doc = two_line_doc();
        let mut engine = engine();
        for time in [-5.0, 0.0, 2.0, 6.0, 100.0] {
            let events = engine.update(Some(&doc), time, false);
            assert_eq!(events, [SyncEvent::Animation(AnimationIntent::idle())]);
            let intent = latest_intent(&events).unwrap();
            assert_eq!(intent.mood, Mood::Idle);
            assert!((intent.intensity - 0.3).abs() < f64::EPSILON);
        }
        assert_eq!(engine.active_index(), None);
    }

    #[test]
    fn tracks_active_line_and_transitions() {
        let doc = two_line_doc();
        let mut engine = engine();

        let events = engine.update(Some(&doc), 2.0, true);
        assert_eq!(line_change(&events), Some((0, None)));
        let intent = latest_intent(&events).unwrap();
        assert_eq!(intent.mood, Mood::Dancing);
        assert!((0.2..=1.0).contains(&intent.intensity));
        assert_eq!(engine.active_index(), Some(0));

        let events = engine.update(Some(&doc), 6.0, true);
        assert_eq!(line_change(&events), Some((1, Some(0))));
        assert_eq!(engine.active_index(), Some(1));
        assert_eq!(engine.previous_index(), Some(0));
    }

    #[test]
    fn same_line_reports_no_transition() {
        let doc = two_line_doc();
        let mut engine = engine();
        engine.update(Some(&doc), 0.5, true);
        let events = engine.update(Some(&doc), 1.5, true);
        assert_eq!(line_change(&events), None);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn gap_is_idle_without_repeated_transitions() {
        let doc = LyricsDocument::new(vec![
            LyricsLine::new("one", 0.0, 2.0),
            LyricsLine::new("two", 5.0, 7.0),
        ]);
        let mut engine = engine();
        engine.update(Some(&doc), 1.0, true);

        let events = engine.update(Some(&doc), 3.0, true);
        assert_eq!(events, [SyncEvent::Animation(AnimationIntent::idle())]);
        assert_eq!(engine.active_index(), None);
        assert_eq!(engine.previous_index(), Some(0));

        let events = engine.update(Some(&doc), 4.0, true);
        assert_eq!(events, [SyncEvent::Animation(AnimationIntent::idle())]);
        assert_eq!(engine.previous_index(), Some(0));

        let events = engine.update(Some(&doc), 5.5, true);
        assert_eq!(line_change(&events), Some((1, None)));
    }

    #[test]
    fn no_document_is_idle() {
        let mut engine = engine();
        let events = engine.update(None, 3.0, true);
        assert_eq!(events, [SyncEvent::Animation(AnimationIntent::idle())]);
    }

    #[test]
    fn pause_resets_tracking_so_resume_reports_again() {
        let doc = two_line_doc();
        let mut engine = engine();
        engine.update(Some(&doc), 1.0, true);
        engine.update(Some(&doc), 1.1, false);
        let events = engine.update(Some(&doc), 1.2, true);
        assert_eq!(line_change(&events), Some((0, None)));
    }

    #[test]
    fn intensity_uses_time_since_line_start() {
        let doc = two_line_doc();
        let mut engine = engine();
        let offset = std::f64::consts::FRAC_PI_4;
        let events = engine.update(Some(&doc), 4.0 + offset, true);
        let intent = latest_intent(&events).unwrap();
        assert!((intent.intensity - 0.7).abs() < 1e-9);
    }

    #[test]
    fn impulse_line_emits_accent_then_schedules_restore() {
        let doc = LyricsDocument::new(vec![LyricsLine::new("Jump to the sky", 0.0, 4.0)]);
        let mut engine = engine();
        let events = engine.update(Some(&doc), 0.0, true);

        let normal = derive_intent("Jump to the sky", 0.0);
        assert_eq!(
            events,
            [
                SyncEvent::ActiveLineChanged { index: 0, previous: None },
                SyncEvent::Animation(normal.clone()),
                SyncEvent::Animation(AnimationIntent::accent()),
            ]
        );

        let pending = engine.scheduler().pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].delay, Duration::from_millis(500));
        assert_eq!(pending[0].intent, normal);
    }

    #[test]
    fn impulse_fires_only_on_the_transition() {
        let doc = LyricsDocument::new(vec![LyricsLine::new("we fly", 0.0, 4.0)]);
        let mut engine = engine();
        engine.update(Some(&doc), 0.0, true);
        let events = engine.update(Some(&doc), 0.1, true);
        assert_eq!(events.len(), 1);
        assert_eq!(engine.scheduler().pending().len(), 1);
    }

    #[test]
    fn next_transition_cancels_stale_restore() {
        let doc = LyricsDocument::new(vec![
            LyricsLine::new("jump", 0.0, 0.3),
            LyricsLine::new("jump again", 0.3, 0.6),
            LyricsLine::new("calm", 0.6, 2.0),
        ]);
        let mut engine = engine();
        engine.update(Some(&doc), 0.0, true);
        engine.update(Some(&doc), 0.4, true);
        assert_eq!(engine.scheduler().cancelled(), [0]);
        assert_eq!(engine.scheduler().pending()[0].id, 1);

        engine.update(Some(&doc), 1.0, true);
        assert_eq!(engine.scheduler().cancelled(), [0, 1]);
        assert!(engine.scheduler().pending().is_empty());
    }

    #[test]
    fn pause_cancels_pending_restore() {
        let doc = LyricsDocument::new(vec![LyricsLine::new("jump", 0.0, 4.0)]);
        let mut engine = engine();
        engine.update(Some(&doc), 0.0, true);
        engine.update(Some(&doc), 0.1, false);
        assert!(engine.scheduler().pending().is_empty());
    }

    #[test]
    fn custom_accent_delay() {
        let doc = LyricsDocument::new(vec![LyricsLine::new("fly", 0.0, 4.0)]);
        let mut engine = engine().with_accent_delay(Duration::from_millis(250));
        engine.update(Some(&doc), 0.0, true);
        assert_eq!(engine.scheduler().pending()[0].delay, Duration::from_millis(250));
    }

    #[test]
    fn reset_forgets_tracking() {
        let doc = two_line_doc();
        let mut engine = engine();
        engine.update(Some(&doc), 5.0, true);
        engine.reset();
        assert_eq!(engine.active_index(), None);
        assert_eq!(engine.previous_index(), None);
    }
}

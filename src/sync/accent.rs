//! Deferred re-emission of the normal intent after an accent.
//!
//! The engine stores the handle returned by [`AccentScheduler::schedule`] and
//! cancels it on the next transition, so a restore that belongs to an old
//! line never lands after a newer line took over.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use super::SyncEvent;
use crate::types::AnimationIntent;

/// Schedules one-shot delayed intents.
pub trait AccentScheduler {
    /// Handle used to cancel a scheduled emission.
    type Handle;

    /// Emit `intent` after `delay`.
    fn schedule(&mut self, delay: Duration, intent: AnimationIntent) -> Self::Handle;

    /// Cancel a scheduled emission. Cancelling one that already fired is a no-op.
    fn cancel(&mut self, handle: Self::Handle);
}

/// Runs each deferred intent as a tokio task that sends a [`SyncEvent`].
///
/// Must be used from inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioAccentScheduler {
    tx: mpsc::Sender<SyncEvent>,
}

impl TokioAccentScheduler {
    /// Deliver deferred intents through `tx`.
    pub const fn new(tx: mpsc::Sender<SyncEvent>) -> Self {
        Self { tx }
    }
}

impl AccentScheduler for TokioAccentScheduler {
    type Handle = AbortHandle;

    fn schedule(&mut self, delay: Duration, intent: AnimationIntent) -> AbortHandle {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(SyncEvent::Animation(intent)).await.is_err() {
                tracing::debug!("Accent restore dropped: receiver closed");
            }
        })
        .abort_handle()
    }

    fn cancel(&mut self, handle: AbortHandle) {
        handle.abort();
    }
}

/// A deferred intent waiting in a [`ManualAccentScheduler`].
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAccent {
    /// Identifier returned from `schedule`.
    pub id: u64,
    /// Requested delay.
    pub delay: Duration,
    /// Intent to emit once the delay elapses.
    pub intent: AnimationIntent,
}

/// Scheduler driven by the caller instead of a clock.
///
/// Used by offline tools and tests: deferred intents queue up until
/// [`ManualAccentScheduler::fire_all`] is called.
#[derive(Debug, Default)]
pub struct ManualAccentScheduler {
    next_id: u64,
    pending: Vec<PendingAccent>,
    cancelled: Vec<u64>,
}

impl ManualAccentScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intents still waiting to fire.
    pub fn pending(&self) -> &[PendingAccent] {
        &self.pending
    }

    /// Ids cancelled so far, oldest first.
    pub fn cancelled(&self) -> &[u64] {
        &self.cancelled
    }

    /// Fire every pending intent, in scheduling order.
    pub fn fire_all(&mut self) -> Vec<AnimationIntent> {
        self.pending.drain(..).map(|p| p.intent).collect()
    }
}

impl AccentScheduler for ManualAccentScheduler {
    type Handle = u64;

    fn schedule(&mut self, delay: Duration, intent: AnimationIntent) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(PendingAccent { id, delay, intent });
        id
    }

    fn cancel(&mut self, handle: u64) {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != handle);
        if self.pending.len() != before {
            self.cancelled.push(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::Mood;

    #[test]
    fn manual_scheduler_fires_and_cancels() {
        let mut scheduler = ManualAccentScheduler::new();
        let first = scheduler.schedule(Duration::from_millis(500), AnimationIntent::idle());
        let second = scheduler.schedule(Duration::from_millis(500), AnimationIntent::accent());
        scheduler.cancel(first);
        scheduler.cancel(first);

        assert_eq!(scheduler.cancelled(), [first]);
        assert_eq!(scheduler.pending().len(), 1);
        assert_eq!(scheduler.pending()[0].id, second);

        let fired = scheduler.fire_all();
        assert_eq!(fired, [AnimationIntent::accent()]);
        assert!(scheduler.pending().is_empty());
    }

    #[tokio::test]
    async fn tokio_scheduler_delivers_after_delay() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut scheduler = TokioAccentScheduler::new(tx);
        let intent = AnimationIntent::new(Mood::Singing, 0.6, "#FFB6C1");
        scheduler.schedule(Duration::from_millis(10), intent.clone());

        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("event before timeout")
            .expect("channel open");
        assert_eq!(event, SyncEvent::Animation(intent));
    }

    #[tokio::test]
    async fn tokio_scheduler_cancel_suppresses_delivery() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut scheduler = TokioAccentScheduler::new(tx);
        let handle = scheduler.schedule(Duration::from_millis(50), AnimationIntent::accent());
        scheduler.cancel(handle);

        let result = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(result.is_err(), "cancelled accent was delivered");
    }
}

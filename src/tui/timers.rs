//! Deferred chat follow-ups (simulated replies, exercise unlocks).
//!
//! Each `Effect::Schedule` becomes a tokio task that sleeps, then sends
//! `Action::TimerFired` back to the event loop. The handles belong to the open
//! chat screen: `cancel_all` runs when the screen is disposed, and dropping
//! `ChatTimers` aborts whatever is still pending.

use std::sync::mpsc;

use log::{debug, warn};
use tokio::task::AbortHandle;

use crate::core::action::{Action, Scheduled};

#[derive(Default)]
pub struct ChatTimers {
    handles: Vec<AbortHandle>,
}

impl ChatTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot timer for `scheduled`. Must be called inside a tokio runtime.
    pub fn schedule(&mut self, scheduled: Scheduled, tx: mpsc::Sender<Action>) {
        // Finished timers have nothing left to abort
        self.handles.retain(|handle| !handle.is_finished());

        debug!(
            "Scheduling {:?} for chat {} in {:?}",
            scheduled.event, scheduled.session, scheduled.delay
        );
        let Scheduled {
            session,
            delay,
            event,
        } = scheduled;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(Action::TimerFired { session, event }).is_err() {
                warn!("Failed to deliver timer for chat {}: receiver dropped", session);
            }
        });
        self.handles.push(handle.abort_handle());
    }

    /// Abort every pending timer.
    pub fn cancel_all(&mut self) {
        let pending = self.handles.len();
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        if pending > 0 {
            debug!("Cancelled {} chat timer(s)", pending);
        }
    }

    pub fn pending(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for ChatTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::ScheduledEvent;
    use std::time::Duration;

    fn reply(session: u64, millis: u64) -> Scheduled {
        Scheduled {
            session,
            delay: Duration::from_millis(millis),
            event: ScheduledEvent::TeacherReply {
                author: "Prof. Martin".to_string(),
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (tx, rx) = mpsc::channel();
        let mut timers = ChatTimers::new();
        timers.schedule(reply(4, 2000), tx);

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        match rx.try_recv() {
            Ok(Action::TimerFired { session, event }) => {
                assert_eq!(session, 4);
                assert!(matches!(event, ScheduledEvent::TeacherReply { .. }));
            }
            other => panic!("Expected TimerFired, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_prevents_delivery() {
        let (tx, rx) = mpsc::channel();
        let mut timers = ChatTimers::new();
        timers.schedule(reply(1, 2000), tx.clone());
        timers.schedule(
            Scheduled {
                session: 1,
                delay: Duration::from_millis(1000),
                event: ScheduledEvent::NextExercise,
            },
            tx,
        );
        assert_eq!(timers.pending(), 2);

        timers.cancel_all();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(timers.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_pending_timers() {
        let (tx, rx) = mpsc::channel();
        {
            let mut timers = ChatTimers::new();
            timers.schedule(reply(2, 500), tx);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }
}

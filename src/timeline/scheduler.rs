//! The scheduler front: one master timeline plus its successors.
//!
//! The game layer calls [`Scheduler::tick`] once per rendered frame or logic
//! tick. Consequences produced mid-drain (an enemy action decided while the
//! player's consequence still plays out) are enqueued and run strictly after
//! the current master timeline finishes.

use std::collections::VecDeque;

use crate::core::GameContext;
use crate::timeline::Timeline;

/// Drives one timeline at a time, in FIFO order of submission.
///
/// Several schedulers may exist side by side (rule consequences vs. pure
/// UI animation); within one scheduler, ordering is total.
pub struct Scheduler {
    current: Option<Timeline>,
    queued: VecDeque<Timeline>,
}

impl Scheduler {
    /// A scheduler with nothing to do.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: None,
            queued: VecDeque::new(),
        }
    }

    /// Submit a timeline to run after everything already submitted.
    ///
    /// An already-finished (e.g. empty) timeline is accepted and will be
    /// discarded without consuming a tick.
    pub fn enqueue(&mut self, timeline: Timeline) {
        self.queued.push_back(timeline);
    }

    /// Whether neither a current timeline nor queued ones exist.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.queued.is_empty()
    }

    /// Number of timelines waiting behind the current one.
    #[must_use]
    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    /// The timeline currently being drained, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Timeline> {
        self.current.as_ref()
    }

    /// Drive the scheduler for one tick.
    ///
    /// Promotes the next queued timeline whenever the current one is done;
    /// finished timelines are discarded in the same tick, so a chain of
    /// empty timelines never stalls the queue.
    pub fn tick(&mut self, ctx: &mut GameContext<'_>) {
        loop {
            if self.current.is_none() {
                match self.queued.pop_front() {
                    Some(next) => self.current = Some(next),
                    None => return,
                }
            }

            let finished = match self.current.as_mut() {
                Some(timeline) => {
                    if timeline.is_finished() {
                        true
                    } else {
                        timeline.tick(ctx);
                        timeline.is_finished()
                    }
                }
                None => return,
            };

            if !finished {
                return;
            }
            self.current = None;
        }
    }

    /// Abort the currently running timeline only.
    ///
    /// Queued timelines stay queued; the next tick promotes the first of
    /// them. The in-flight action of the aborted timeline receives its `end`
    /// call, actions that never started receive nothing.
    pub fn abort_current(&mut self, ctx: &mut GameContext<'_>) {
        if let Some(mut timeline) = self.current.take() {
            timeline.abort(ctx);
        }
    }

    /// Teardown path: abort the current timeline and drop every queued one
    /// without starting it.
    pub fn clear(&mut self, ctx: &mut GameContext<'_>) {
        let dropped = self.queued.len();
        if dropped > 0 {
            tracing::debug!(dropped, "dropping queued timelines on teardown");
        }
        self.abort_current(ctx);
        self.queued.clear();
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("current", &self.current)
            .field("queued", &self.queued.len())
            .finish()
    }
}

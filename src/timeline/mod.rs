//! Cooperative action sequencing.
//!
//! A [`Timeline`] is an ordered list of [`Action`]s drained one at a time by
//! tick-driven polling: within one timeline the execution order is total, and
//! at most one action is ever in flight. That single rule is what makes
//! animation waits, delayed confirmations, and rule consequences compose
//! deterministically without any real concurrency.
//!
//! Timelines are built declaratively through [`TimelineBuilder`]. Merging a
//! sub-sequence offers two distinct operations: *include* splices the other
//! timeline's actions inline (the parent drives every action directly), while
//! *include as action* keeps the sub-timeline opaque so it can be aborted as
//! one unit.
//!
//! The [`Scheduler`] owns the master timeline of the current consequence and
//! a queue of successors. Independent schedulers may run side by side (a
//! background animation next to a rule consequence); nothing orders them
//! relative to each other except explicit wait conditions.

mod action;
mod builder;
mod scheduler;

pub use action::{Action, ActionState, ConditionFn, RunFn, TimelineSupplier};
pub use builder::TimelineBuilder;
pub use scheduler::Scheduler;

use std::collections::VecDeque;

use crate::core::GameContext;

/// An ordered, cooperatively scheduled sequence of actions.
///
/// Insertion order is execution order. Action *i + 1* never starts before
/// action *i* has reported finished and received its `end` call. A timeline
/// with zero actions is finished before any tick.
pub struct Timeline {
    pending: VecDeque<Action>,
    current: Option<Action>,
    started: bool,
}

impl Timeline {
    /// An empty timeline. Immediately finished.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            current: None,
            started: false,
        }
    }

    /// Start building a timeline.
    #[must_use]
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::new()
    }

    pub(crate) fn from_actions(actions: Vec<Action>) -> Self {
        Self {
            pending: actions.into(),
            current: None,
            started: false,
        }
    }

    /// Whether every action has run to completion (or the timeline was
    /// aborted). An empty timeline is finished without ever ticking.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current.is_none() && self.pending.is_empty()
    }

    /// Whether `tick` has been called at least once.
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Number of actions not yet finished, including the running one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len() + usize::from(self.current.is_some())
    }

    /// Whether no actions remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind names of the remaining actions, running one first.
    ///
    /// Dispatch is required to be deterministic; comparing these sequences is
    /// how callers (and tests) check two dispatches produced structurally
    /// identical consequences.
    #[must_use]
    pub fn action_kinds(&self) -> Vec<&'static str> {
        self.current
            .iter()
            .chain(self.pending.iter())
            .map(Action::kind_name)
            .collect()
    }

    /// Drive the timeline for one tick.
    ///
    /// Starts the next pending action if none is running, polls the running
    /// action, and ends it once it reports finished. Consecutive
    /// instantaneous actions (closure runs, zero delays) complete within a
    /// single tick; an unfinished action yields until the next tick.
    pub fn tick(&mut self, ctx: &mut GameContext<'_>) {
        self.started = true;

        loop {
            if self.current.is_none() {
                match self.pending.pop_front() {
                    Some(mut next) => {
                        next.start(ctx);
                        self.current = Some(next);
                    }
                    None => return,
                }
            }

            let finished = match self.current.as_mut() {
                Some(action) => action.poll(ctx),
                None => return,
            };
            if !finished {
                return;
            }

            if let Some(mut action) = self.current.take() {
                action.finish(ctx);
            }
        }
    }

    /// Force-abandon the timeline.
    ///
    /// Ends the currently running action - and only that one - so its state
    /// changes are not leaked half-applied; actions that never started never
    /// see `start` or `end`. The timeline reports finished afterwards.
    pub fn abort(&mut self, ctx: &mut GameContext<'_>) {
        if self.current.is_some() || !self.pending.is_empty() {
            tracing::debug!(remaining = self.len(), "aborting timeline");
        }
        if let Some(mut action) = self.current.take() {
            action.finish(ctx);
        }
        self.pending.clear();
    }

    /// Tear the timeline apart for splicing into another one.
    ///
    /// Panics if the timeline has already started: a started timeline owns
    /// in-flight lifecycle state that cannot be transplanted.
    pub(crate) fn into_actions(self) -> VecDeque<Action> {
        if self.started {
            panic!("cannot splice a timeline that has already started");
        }
        self.pending
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("actions", &self.action_kinds())
            .field("started", &self.started)
            .finish()
    }
}

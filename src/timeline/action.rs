//! The smallest schedulable unit of deferred work.
//!
//! An [`Action`] is a three-state machine driven by its owning timeline:
//! `start` runs exactly once on first visit, `is-finished` is polled every
//! tick after that, and `end` runs exactly once when the action reports
//! completion, before the next action starts. Breaking that contract is a
//! programming error and panics; the sequencing guarantees of the whole
//! engine rest on it.
//!
//! The set of action kinds is closed. Game rules never subclass actions;
//! they compose these kinds through the
//! [`TimelineBuilder`](crate::timeline::TimelineBuilder).

use crate::core::{AnimationHandle, GameContext};
use crate::timeline::Timeline;

/// One-shot closure run when a [`Run`](Action) action starts.
pub type RunFn = Box<dyn FnOnce(&mut GameContext<'_>)>;

/// Predicate polled by a condition-gated wait.
pub type ConditionFn = Box<dyn FnMut(&mut GameContext<'_>) -> bool>;

/// Deferred timeline construction for lazy inclusion.
pub type TimelineSupplier = Box<dyn FnOnce(&mut GameContext<'_>) -> Option<Timeline>>;

/// Lifecycle state of an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionState {
    /// Created, not yet visited by the scheduler.
    Pending,
    /// `start` has run; the action is being polled.
    Running,
    /// `end` has run; the action will never be visited again.
    Finished,
}

/// What an action does. Closed set, matched exhaustively.
enum ActionKind {
    /// Run a closure once; finished immediately.
    Run(Option<RunFn>),

    /// Finished once `duration_ms` has elapsed since start.
    Delay { duration_ms: u64, deadline: Option<u64> },

    /// Finished when the condition holds, or when the optional timeout
    /// elapses - expiry is ordinary completion, not an error.
    WaitUntil {
        condition: ConditionFn,
        timeout_ms: Option<u64>,
        deadline: Option<u64>,
    },

    /// Finished when the input layer reports a confirmation, or when the
    /// optional timeout elapses.
    AwaitConfirmation {
        timeout_ms: Option<u64>,
        deadline: Option<u64>,
    },

    /// Starts a named animation through the facade and waits for it.
    Animation {
        name: String,
        handle: Option<AnimationHandle>,
    },

    /// A whole timeline driven as one opaque unit.
    Nested(Box<Timeline>),

    /// Supplier evaluated at start; the produced timeline (if any) is then
    /// driven as a nested unit.
    IncludeLater {
        supplier: Option<TimelineSupplier>,
        inner: Option<Box<Timeline>>,
    },
}

/// The smallest unit of deferred work, owned by exactly one timeline.
pub struct Action {
    kind: ActionKind,
    state: ActionState,
}

impl Action {
    fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            state: ActionState::Pending,
        }
    }

    /// An action that runs `f` once and is immediately finished.
    pub fn run(f: impl FnOnce(&mut GameContext<'_>) + 'static) -> Self {
        Self::new(ActionKind::Run(Some(Box::new(f))))
    }

    /// An action that waits for `duration_ms` milliseconds.
    #[must_use]
    pub fn delay(duration_ms: u64) -> Self {
        Self::new(ActionKind::Delay {
            duration_ms,
            deadline: None,
        })
    }

    /// A condition-gated wait without a deadline.
    pub fn wait_until(condition: impl FnMut(&mut GameContext<'_>) -> bool + 'static) -> Self {
        Self::new(ActionKind::WaitUntil {
            condition: Box::new(condition),
            timeout_ms: None,
            deadline: None,
        })
    }

    /// A condition-gated wait that also completes once `timeout_ms` elapses.
    ///
    /// Callers that care whether the wait ended by condition or by timeout
    /// must check the observed state themselves after the timeline drains.
    pub fn wait_until_with_timeout(
        condition: impl FnMut(&mut GameContext<'_>) -> bool + 'static,
        timeout_ms: u64,
    ) -> Self {
        Self::new(ActionKind::WaitUntil {
            condition: Box::new(condition),
            timeout_ms: Some(timeout_ms),
            deadline: None,
        })
    }

    /// Wait for the next confirmation input, with an optional timeout.
    #[must_use]
    pub fn await_confirmation(timeout_ms: Option<u64>) -> Self {
        Self::new(ActionKind::AwaitConfirmation {
            timeout_ms,
            deadline: None,
        })
    }

    /// Start the named animation and wait for its completion.
    pub fn animation(name: impl Into<String>) -> Self {
        Self::new(ActionKind::Animation {
            name: name.into(),
            handle: None,
        })
    }

    /// Drive `timeline` as a single opaque sub-unit.
    ///
    /// The sub-timeline stays cancellable as a whole: aborting the parent
    /// while this action runs aborts the inner timeline. Use
    /// [`TimelineBuilder::include`](crate::timeline::TimelineBuilder::include)
    /// instead when the sub-sequence should be flattened into the parent.
    #[must_use]
    pub fn nested(timeline: Timeline) -> Self {
        Self::new(ActionKind::Nested(Box::new(timeline)))
    }

    /// Evaluate `supplier` when this action starts and drive the produced
    /// timeline, if any.
    ///
    /// This is how a consequence whose shape depends on state mutated by
    /// earlier actions is expressed; at build time that state does not exist
    /// yet.
    pub fn include_later(
        supplier: impl FnOnce(&mut GameContext<'_>) -> Option<Timeline> + 'static,
    ) -> Self {
        Self::new(ActionKind::IncludeLater {
            supplier: Some(Box::new(supplier)),
            inner: None,
        })
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ActionState {
        self.state
    }

    /// Short name of the action kind, for logs and structural comparison.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ActionKind::Run(_) => "run",
            ActionKind::Delay { .. } => "delay",
            ActionKind::WaitUntil { .. } => "wait-until",
            ActionKind::AwaitConfirmation { .. } => "await-confirmation",
            ActionKind::Animation { .. } => "animation",
            ActionKind::Nested(_) => "nested",
            ActionKind::IncludeLater { .. } => "include-later",
        }
    }

    /// First visit. Panics if the action was already started.
    pub(crate) fn start(&mut self, ctx: &mut GameContext<'_>) {
        if self.state != ActionState::Pending {
            panic!("action started twice ({})", self.kind_name());
        }
        self.state = ActionState::Running;

        match &mut self.kind {
            ActionKind::Run(f) => {
                if let Some(f) = f.take() {
                    f(ctx);
                }
            }
            ActionKind::Delay {
                duration_ms,
                deadline,
            } => {
                *deadline = Some(ctx.now_ms + *duration_ms);
            }
            ActionKind::WaitUntil {
                timeout_ms,
                deadline,
                ..
            }
            | ActionKind::AwaitConfirmation {
                timeout_ms,
                deadline,
            } => {
                *deadline = timeout_ms.map(|t| ctx.now_ms + t);
            }
            ActionKind::Animation { name, handle } => {
                *handle = Some(ctx.game.start_animation(name));
            }
            ActionKind::Nested(_) => {}
            ActionKind::IncludeLater { supplier, inner } => {
                if let Some(supplier) = supplier.take() {
                    *inner = supplier(ctx).map(Box::new);
                }
            }
        }
    }

    /// Poll for completion. Panics unless the action is running.
    pub(crate) fn poll(&mut self, ctx: &mut GameContext<'_>) -> bool {
        if self.state != ActionState::Running {
            panic!(
                "polled an action that is not running ({})",
                self.kind_name()
            );
        }

        match &mut self.kind {
            ActionKind::Run(_) => true,
            ActionKind::Delay { deadline, .. } => {
                deadline.is_some_and(|d| ctx.now_ms >= d)
            }
            ActionKind::WaitUntil {
                condition,
                deadline,
                ..
            } => condition(ctx) || deadline.is_some_and(|d| ctx.now_ms >= d),
            ActionKind::AwaitConfirmation { deadline, .. } => {
                ctx.game.poll_confirmation() || deadline.is_some_and(|d| ctx.now_ms >= d)
            }
            ActionKind::Animation { handle, .. } => {
                handle.is_some_and(|h| ctx.game.animation_finished(h))
            }
            ActionKind::Nested(inner) => {
                inner.tick(ctx);
                inner.is_finished()
            }
            ActionKind::IncludeLater { inner, .. } => match inner {
                Some(timeline) => {
                    timeline.tick(ctx);
                    timeline.is_finished()
                }
                None => true,
            },
        }
    }

    /// Last visit. Panics unless the action is running (double `end`,
    /// or `end` on a never-started action, breaks the contract).
    pub(crate) fn finish(&mut self, ctx: &mut GameContext<'_>) {
        if self.state != ActionState::Running {
            panic!(
                "ended an action that was not running ({})",
                self.kind_name()
            );
        }

        // A nested timeline that is still mid-drain (abort path) must end its
        // in-flight action; on normal completion this is a no-op.
        match &mut self.kind {
            ActionKind::Nested(inner) => inner.abort(ctx),
            ActionKind::IncludeLater { inner, .. } => {
                if let Some(timeline) = inner {
                    timeline.abort(ctx);
                }
            }
            _ => {}
        }

        self.state = ActionState::Finished;
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("kind", &self.kind_name())
            .field("state", &self.state)
            .finish()
    }
}

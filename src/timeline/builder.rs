//! Declarative construction of timelines.
//!
//! Rule bodies describe their consequences as a chain of builder calls; the
//! builder produces the ordered action list the scheduler later drains. No
//! action runs during building - a builder is pure data until `build`.

use crate::core::GameContext;
use crate::timeline::{Action, Timeline};

/// Builder producing a [`Timeline`].
///
/// ```
/// use revolver_core::timeline::Timeline;
///
/// let timeline = Timeline::builder()
///     .run(|ctx| ctx.game.gain_reserves(2))
///     .delay(200)
///     .animation("reserves_gained")
///     .build();
/// assert_eq!(timeline.len(), 3);
/// ```
#[must_use]
pub struct TimelineBuilder {
    actions: Vec<Action>,
}

impl TimelineBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Append a one-shot closure action.
    pub fn run(mut self, f: impl FnOnce(&mut GameContext<'_>) + 'static) -> Self {
        self.actions.push(Action::run(f));
        self
    }

    /// Append a fixed delay in milliseconds.
    pub fn delay(mut self, duration_ms: u64) -> Self {
        self.actions.push(Action::delay(duration_ms));
        self
    }

    /// Append a condition-gated wait without a deadline.
    pub fn wait_until(
        mut self,
        condition: impl FnMut(&mut GameContext<'_>) -> bool + 'static,
    ) -> Self {
        self.actions.push(Action::wait_until(condition));
        self
    }

    /// Append a condition-gated wait that also completes after `timeout_ms`.
    pub fn wait_until_with_timeout(
        mut self,
        condition: impl FnMut(&mut GameContext<'_>) -> bool + 'static,
        timeout_ms: u64,
    ) -> Self {
        self.actions
            .push(Action::wait_until_with_timeout(condition, timeout_ms));
        self
    }

    /// Append a wait for the next confirmation input.
    pub fn await_confirmation(mut self, timeout_ms: Option<u64>) -> Self {
        self.actions.push(Action::await_confirmation(timeout_ms));
        self
    }

    /// Append an animation started through the facade.
    pub fn animation(mut self, name: impl Into<String>) -> Self {
        self.actions.push(Action::animation(name));
        self
    }

    /// Splice another timeline's actions inline.
    ///
    /// The parent drives every spliced action directly; the sub-sequence
    /// loses its identity and cannot be aborted as a unit. Panics if `other`
    /// has already started.
    pub fn include(mut self, other: Timeline) -> Self {
        self.actions.extend(other.into_actions());
        self
    }

    /// Append another timeline as one opaque action.
    ///
    /// The sub-timeline keeps its identity: the parent sees a single action,
    /// and aborting the parent while it runs aborts the whole sub-sequence.
    pub fn include_as_action(mut self, other: Timeline) -> Self {
        self.actions.push(Action::nested(other));
        self
    }

    /// Append a lazy inclusion: `supplier` runs when the action starts and
    /// the produced timeline, if any, is driven as a nested unit.
    pub fn include_later(
        mut self,
        supplier: impl FnOnce(&mut GameContext<'_>) -> Option<Timeline> + 'static,
    ) -> Self {
        self.actions.push(Action::include_later(supplier));
        self
    }

    /// Append an already-constructed action.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Number of actions queued so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no actions are queued yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Finish building.
    pub fn build(self) -> Timeline {
        Timeline::from_actions(self.actions)
    }
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

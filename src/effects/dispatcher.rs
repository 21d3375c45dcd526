//! Trigger dispatch.
//!
//! Given a fired trigger and an ordered set of target cards, the dispatcher
//! collects every effect that reacts and merges the resulting timelines into
//! one. The order is fixed and deterministic: target order as handed in by
//! the caller (the facade's revolver order for rotation events), then effect
//! declaration order within each card. Nothing is ever reordered or
//! randomized - identical inputs produce structurally identical output.
//!
//! The dispatcher is stateless and never mutates game state; all mutation
//! lives inside the actions of the returned timeline.

use crate::core::{CardId, GameFacade};
use crate::timeline::Timeline;
use crate::triggers::{Trigger, TriggerInfo};

/// Stateless trigger-to-consequence dispatch.
pub struct Dispatcher;

impl Dispatcher {
    /// Dispatch a trigger to a single card.
    ///
    /// Returns `None` when the card does not exist or none of its effects
    /// fired. "Nothing reacted" is distinct from an empty timeline: callers
    /// skip merge and scheduling work entirely.
    pub fn dispatch_card(
        trigger: Trigger,
        info: &TriggerInfo,
        target: CardId,
        game: &dyn GameFacade,
    ) -> Option<Timeline> {
        let Some(card) = game.card(target) else {
            tracing::warn!(%target, "dispatch target does not exist");
            return None;
        };
        card.check_effects(trigger, info, game)
    }

    /// Dispatch a trigger to an ordered set of cards and merge the firing
    /// consequences into one timeline.
    ///
    /// Two dispatch calls with the same targets and the same trigger yield
    /// timelines with identical action sequences.
    pub fn dispatch(
        trigger: Trigger,
        info: &TriggerInfo,
        targets: &[CardId],
        game: &dyn GameFacade,
    ) -> Option<Timeline> {
        let mut fired = false;
        let mut builder = Timeline::builder();

        for &target in targets {
            if let Some(timeline) = Self::dispatch_card(trigger, info, target, game) {
                builder = builder.include(timeline);
                fired = true;
            }
        }

        if fired {
            tracing::debug!(%trigger, targets = targets.len(), "dispatch produced consequences");
            Some(builder.build())
        } else {
            None
        }
    }
}

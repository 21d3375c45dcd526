//! Effect variants.
//!
//! An [`Effect`] is a rule body bound to one owning card, reacting to exactly
//! one trigger. The variant set is closed and matched exhaustively; a new
//! card ability means a new variant here, not a subclass somewhere else.
//!
//! Checking a trigger never mutates anything. The returned timeline carries
//! the mutation as actions; state changes happen only while the scheduler
//! drains it.

use crate::cards::CardModifier;
use crate::core::{CardId, GameFacade};
use crate::timeline::Timeline;
use crate::triggers::{Trigger, TriggerInfo};

/// What an effect does when it fires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectKind {
    /// The player gains reserves.
    ReserveGain { amount: u32 },

    /// Every bullet currently in the revolver gains damage until the round
    /// ends.
    BuffDamage { amount: i32 },

    /// Every bullet currently in the revolver gains damage permanently.
    GiftDamage { amount: i32 },

    /// The player draws cards.
    Draw { amount: u32 },

    /// A bullet in the revolver is destroyed. Precondition: a destroyable
    /// bullet exists.
    Destroy,

    /// Copies of the named card are put into the hand.
    PutCardInHand { name: String },

    /// The player gains cover.
    AddCover { amount: u32 },
}

/// A rule body bound to one owning card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Effect {
    trigger: Trigger,
    kind: EffectKind,
}

impl Effect {
    /// An effect from its parts.
    #[must_use]
    pub fn new(trigger: Trigger, kind: EffectKind) -> Self {
        Self { trigger, kind }
    }

    /// Gain reserves when `trigger` fires.
    #[must_use]
    pub fn reserve_gain(trigger: Trigger, amount: u32) -> Self {
        Self::new(trigger, EffectKind::ReserveGain { amount })
    }

    /// Buff revolver bullets until the round ends.
    #[must_use]
    pub fn buff_damage(trigger: Trigger, amount: i32) -> Self {
        Self::new(trigger, EffectKind::BuffDamage { amount })
    }

    /// Buff revolver bullets permanently.
    #[must_use]
    pub fn gift_damage(trigger: Trigger, amount: i32) -> Self {
        Self::new(trigger, EffectKind::GiftDamage { amount })
    }

    /// Draw cards.
    #[must_use]
    pub fn draw(trigger: Trigger, amount: u32) -> Self {
        Self::new(trigger, EffectKind::Draw { amount })
    }

    /// Destroy a bullet in the revolver.
    #[must_use]
    pub fn destroy(trigger: Trigger) -> Self {
        Self::new(trigger, EffectKind::Destroy)
    }

    /// Put copies of a named card into the hand.
    pub fn put_card_in_hand(trigger: Trigger, name: impl Into<String>) -> Self {
        Self::new(
            trigger,
            EffectKind::PutCardInHand { name: name.into() },
        )
    }

    /// Gain cover.
    #[must_use]
    pub fn add_cover(trigger: Trigger, amount: u32) -> Self {
        Self::new(trigger, EffectKind::AddCover { amount })
    }

    /// The trigger this effect responds to.
    #[must_use]
    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// The effect's behavior variant.
    #[must_use]
    pub fn kind(&self) -> &EffectKind {
        &self.kind
    }

    /// Produce this effect's consequence for a fired trigger.
    ///
    /// Returns `None` when the trigger does not match or the variant's
    /// precondition fails (a destroy effect without a destroyable target).
    /// Neither case is an error - the effect simply did not fire.
    pub fn check_trigger(
        &self,
        trigger: Trigger,
        info: &TriggerInfo,
        owner: CardId,
        game: &dyn GameFacade,
    ) -> Option<Timeline> {
        if trigger != self.trigger {
            return None;
        }

        let occurrences = info.occurrences();

        match &self.kind {
            EffectKind::ReserveGain { amount } => {
                let total = amount * occurrences;
                Some(
                    Timeline::builder()
                        .run(move |ctx| ctx.game.gain_reserves(total))
                        .build(),
                )
            }

            EffectKind::BuffDamage { amount } => {
                let total = amount * occurrences as i32;
                let source = Self::buff_source(owner, game, total);
                Some(
                    Timeline::builder()
                        .run(move |ctx| {
                            let round = ctx.game.current_round();
                            for id in ctx.game.cards_in_revolver() {
                                if let Some(card) = ctx.game.card_mut(id) {
                                    card.add_modifier(
                                        CardModifier::new(total, source.clone())
                                            .with_validity(move |v| v.round == round),
                                    );
                                }
                            }
                        })
                        .build(),
                )
            }

            EffectKind::GiftDamage { amount } => {
                let total = amount * occurrences as i32;
                let source = Self::buff_source(owner, game, total);
                Some(
                    Timeline::builder()
                        .run(move |ctx| {
                            for id in ctx.game.cards_in_revolver() {
                                if let Some(card) = ctx.game.card_mut(id) {
                                    card.add_modifier(CardModifier::new(total, source.clone()));
                                }
                            }
                        })
                        .build(),
                )
            }

            EffectKind::Draw { amount } => {
                let total = amount * occurrences;
                Some(
                    Timeline::builder()
                        .run(move |ctx| ctx.game.draw_cards(total))
                        .build(),
                )
            }

            EffectKind::Destroy => {
                if !game.has_destroyable_card() {
                    return None;
                }
                Some(
                    Timeline::builder()
                        .run(|ctx| ctx.game.begin_destroy_selection())
                        .wait_until(|ctx| !ctx.game.destroy_selection_active())
                        .build(),
                )
            }

            EffectKind::PutCardInHand { name } => {
                let name = name.clone();
                Some(
                    Timeline::builder()
                        .run(move |ctx| ctx.game.try_put_cards_in_hand(&name))
                        .build(),
                )
            }

            EffectKind::AddCover { amount } => {
                let total = amount * occurrences;
                Some(
                    Timeline::builder()
                        .run(move |ctx| ctx.game.add_player_cover(total))
                        .build(),
                )
            }
        }
    }

    fn buff_source(owner: CardId, game: &dyn GameFacade, amount: i32) -> String {
        let owner_name = game
            .card(owner)
            .map_or_else(|| owner.to_string(), |card| card.name().to_string());
        if amount >= 0 {
            format!("+{amount} damage from {owner_name}")
        } else {
            format!("{amount} damage from {owner_name}")
        }
    }
}

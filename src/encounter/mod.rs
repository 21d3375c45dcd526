//! Encounter-wide rules.
//!
//! The active rule set for one encounter is an [`EncounterModifiers`]
//! collection resolved from configuration names. Hook results fold in
//! registration order: rotation rewrites compose left to right, status-effect
//! gating ANDs, and timeline hooks merge by flatten-include. When no active
//! modifier reacts, the fold is "no consequence" and the default behavior of
//! the game event proceeds unmodified.

mod modifier;

pub use modifier::{EncounterModifier, SteelNerves, SHOW_WIN_SCREEN};

use crate::core::{CardId, GameContext, GameFacade, RevolverRotation};
use crate::error::ConfigError;
use crate::timeline::Timeline;

/// The encounter modifiers active for the current encounter.
#[derive(Debug, Default)]
pub struct EncounterModifiers {
    active: Vec<EncounterModifier>,
}

impl EncounterModifiers {
    /// No active modifiers.
    #[must_use]
    pub fn new() -> Self {
        Self { active: Vec::new() }
    }

    /// Resolve a list of configuration names.
    ///
    /// Fails on the first unknown or retired name; a partially resolved rule
    /// set would corrupt gameplay determinism, so encounter assembly aborts
    /// instead.
    pub fn from_names<'a>(
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, ConfigError> {
        let mut modifiers = Self::new();
        for name in names {
            modifiers.push(EncounterModifier::lookup(name)?);
        }
        Ok(modifiers)
    }

    /// Add an already-constructed modifier. Registration order is fold order.
    pub fn push(&mut self, modifier: EncounterModifier) {
        tracing::debug!(modifier = modifier.name(), "encounter modifier active");
        self.active.push(modifier);
    }

    /// Number of active modifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no modifier is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Iterate the active modifiers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &EncounterModifier> {
        self.active.iter()
    }

    /// Run every modifier's encounter-start hook.
    pub fn on_start(&mut self, ctx: &mut GameContext<'_>) {
        for modifier in &mut self.active {
            modifier.on_start(ctx);
        }
    }

    /// Run every modifier's per-tick update.
    pub fn update(&mut self, ctx: &mut GameContext<'_>) {
        for modifier in &mut self.active {
            modifier.update(ctx);
        }
    }

    /// Fold the rotation through every modifier in registration order.
    #[must_use]
    pub fn modify_revolver_rotation(&self, rotation: RevolverRotation) -> RevolverRotation {
        self.active
            .iter()
            .fold(rotation, |rotation, modifier| {
                modifier.modify_revolver_rotation(rotation)
            })
    }

    /// Whether status effects apply: every active modifier must agree.
    #[must_use]
    pub fn should_apply_status_effects(&self) -> bool {
        self.active
            .iter()
            .all(EncounterModifier::should_apply_status_effects)
    }

    /// Merge every modifier's after-bullet-placed consequence.
    pub fn after_bullet_placed(
        &self,
        card: CardId,
        game: &dyn GameFacade,
    ) -> Option<Timeline> {
        Self::merge(
            self.active
                .iter()
                .filter_map(|modifier| modifier.after_bullet_placed(card, game)),
        )
    }

    /// Merge every modifier's after-shot consequence.
    pub fn after_revolver_shot(
        &self,
        card: Option<CardId>,
        game: &dyn GameFacade,
    ) -> Option<Timeline> {
        Self::merge(
            self.active
                .iter()
                .filter_map(|modifier| modifier.after_revolver_shot(card, game)),
        )
    }

    /// Merge every modifier's after-rotation consequence.
    pub fn after_revolver_rotated(
        &self,
        rotation: RevolverRotation,
        game: &dyn GameFacade,
    ) -> Option<Timeline> {
        Self::merge(
            self.active
                .iter()
                .filter_map(|modifier| modifier.after_revolver_rotated(rotation, game)),
        )
    }

    /// Merge every modifier's end-of-turn consequence.
    pub fn on_end_turn(&self) -> Option<Timeline> {
        Self::merge(self.active.iter().filter_map(EncounterModifier::on_end_turn))
    }

    /// Merge every modifier's turn-start consequence.
    pub fn on_player_turn_start(&self) -> Option<Timeline> {
        Self::merge(
            self.active
                .iter()
                .filter_map(EncounterModifier::on_player_turn_start),
        )
    }

    /// Flatten-include a sequence of timelines; all-empty folds to `None` so
    /// callers can skip scheduling entirely.
    fn merge(timelines: impl Iterator<Item = Timeline>) -> Option<Timeline> {
        let mut fired = false;
        let mut builder = Timeline::builder();
        for timeline in timelines {
            builder = builder.include(timeline);
            fired = true;
        }
        fired.then(|| builder.build())
    }
}

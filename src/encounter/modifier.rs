//! Encounter-wide rule modifiers.
//!
//! An [`EncounterModifier`] is a named rule active for a whole encounter. It
//! intercepts scheduler-level events and can veto or rewrite default
//! behavior: gate status effects, rewrite the post-shot rotation, or splice
//! its own timeline into a game event's consequence. The variant set is
//! closed; every hook defaults explicitly in its match instead of relying on
//! an inherited no-op.
//!
//! Variants are resolved by name, case-insensitively, through
//! [`EncounterModifier::lookup`]. Two names are registered but deliberately
//! out of rotation and fail with a distinct "not available" error; resolving
//! them must stay loud so a data file referencing one is caught at load time.

use std::cell::Cell;
use std::rc::Rc;

use crate::cards::CardModifier;
use crate::core::{CardId, GameContext, GameFacade, RevolverRotation};
use crate::error::ConfigError;
use crate::timeline::Timeline;
use crate::triggers::Trigger;

/// Screen state the game layer activates while the win screen shows.
pub const SHOW_WIN_SCREEN: &str = "showWinScreen";

/// An encounter-scoped rule hook set.
pub enum EncounterModifier {
    /// Status effects do not apply while it rains.
    Rain,
    /// The drum is frozen: every rotation becomes no rotation.
    Frost,
    /// Rotations reverse direction. Registered but not available.
    BewitchedMist,
    /// A copy of every placed bullet appears in the hand. Registered but not
    /// available.
    Lookalike,
    /// Placed bullets pick up a modifier that weakens by one per rotation.
    Moist,
    /// Shoot within ten seconds or the revolver fires itself.
    SteelNerves(SteelNerves),
}

impl EncounterModifier {
    /// Resolve a modifier name from encounter configuration.
    ///
    /// Names are matched case-insensitively. Unknown names and retired names
    /// fail with distinct errors; neither is ever silently defaulted.
    pub fn lookup(name: &str) -> Result<Self, ConfigError> {
        match name.to_lowercase().as_str() {
            "rain" => Ok(EncounterModifier::Rain),
            "frost" => Ok(EncounterModifier::Frost),
            "bewitchedmist" => Err(ConfigError::EncounterModifierNotAvailable(
                name.to_string(),
            )),
            "steelnerves" => Ok(EncounterModifier::SteelNerves(SteelNerves::new())),
            "lookalike" => Err(ConfigError::EncounterModifierNotAvailable(
                name.to_string(),
            )),
            "moist" => Ok(EncounterModifier::Moist),
            _ => Err(ConfigError::UnknownEncounterModifier(name.to_string())),
        }
    }

    /// The canonical name of this variant.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            EncounterModifier::Rain => "rain",
            EncounterModifier::Frost => "frost",
            EncounterModifier::BewitchedMist => "bewitchedMist",
            EncounterModifier::Lookalike => "lookalike",
            EncounterModifier::Moist => "moist",
            EncounterModifier::SteelNerves(_) => "steelNerves",
        }
    }

    /// Called once when the encounter starts.
    pub fn on_start(&mut self, ctx: &mut GameContext<'_>) {
        match self {
            EncounterModifier::SteelNerves(_) => {
                ctx.game.enter_screen_state(SteelNerves::SCREEN_STATE);
            }
            EncounterModifier::Rain
            | EncounterModifier::Frost
            | EncounterModifier::BewitchedMist
            | EncounterModifier::Lookalike
            | EncounterModifier::Moist => {}
        }
    }

    /// Called every tick.
    pub fn update(&mut self, ctx: &mut GameContext<'_>) {
        match self {
            EncounterModifier::SteelNerves(steel_nerves) => steel_nerves.update(ctx),
            EncounterModifier::Rain
            | EncounterModifier::Frost
            | EncounterModifier::BewitchedMist
            | EncounterModifier::Lookalike
            | EncounterModifier::Moist => {}
        }
    }

    /// Pure transform applied to the rotation the revolver is about to
    /// perform. Identity by default.
    #[must_use]
    pub fn modify_revolver_rotation(&self, rotation: RevolverRotation) -> RevolverRotation {
        match self {
            EncounterModifier::Frost => RevolverRotation::None,
            EncounterModifier::BewitchedMist => rotation.reversed(),
            EncounterModifier::Rain
            | EncounterModifier::Lookalike
            | EncounterModifier::Moist
            | EncounterModifier::SteelNerves(_) => rotation,
        }
    }

    /// Whether status effects apply this encounter. `true` by default.
    #[must_use]
    pub fn should_apply_status_effects(&self) -> bool {
        match self {
            EncounterModifier::Rain => false,
            EncounterModifier::Frost
            | EncounterModifier::BewitchedMist
            | EncounterModifier::Lookalike
            | EncounterModifier::Moist
            | EncounterModifier::SteelNerves(_) => true,
        }
    }

    /// Consequence spliced in after a bullet was placed in the revolver.
    pub fn after_bullet_placed(
        &self,
        card: CardId,
        game: &dyn GameFacade,
    ) -> Option<Timeline> {
        match self {
            EncounterModifier::Lookalike => {
                let name = game.card(card)?.name().to_string();
                Some(
                    Timeline::builder()
                        .run(move |ctx| ctx.game.try_put_cards_in_hand(&name))
                        .build(),
                )
            }
            EncounterModifier::Moist => Some(
                Timeline::builder()
                    .run(move |ctx| {
                        if let Some(card) = ctx.game.card_mut(card) {
                            card.add_modifier(Self::moist_modifier());
                        }
                    })
                    .build(),
            ),
            EncounterModifier::Rain
            | EncounterModifier::Frost
            | EncounterModifier::BewitchedMist
            | EncounterModifier::SteelNerves(_) => None,
        }
    }

    /// Consequence spliced in after the revolver was shot. `card` is the
    /// bullet that was in the fired chamber, if any.
    pub fn after_revolver_shot(
        &self,
        _card: Option<CardId>,
        _game: &dyn GameFacade,
    ) -> Option<Timeline> {
        match self {
            EncounterModifier::SteelNerves(steel_nerves) => Some(steel_nerves.arm_timeline()),
            EncounterModifier::Rain
            | EncounterModifier::Frost
            | EncounterModifier::BewitchedMist
            | EncounterModifier::Lookalike
            | EncounterModifier::Moist => None,
        }
    }

    /// Consequence spliced in after the drum rotated.
    pub fn after_revolver_rotated(
        &self,
        _rotation: RevolverRotation,
        _game: &dyn GameFacade,
    ) -> Option<Timeline> {
        match self {
            EncounterModifier::Rain
            | EncounterModifier::Frost
            | EncounterModifier::BewitchedMist
            | EncounterModifier::Lookalike
            | EncounterModifier::Moist
            | EncounterModifier::SteelNerves(_) => None,
        }
    }

    /// Consequence spliced in when the player ends the turn.
    pub fn on_end_turn(&self) -> Option<Timeline> {
        match self {
            EncounterModifier::SteelNerves(steel_nerves) => Some(steel_nerves.disarm_timeline()),
            EncounterModifier::Rain
            | EncounterModifier::Frost
            | EncounterModifier::BewitchedMist
            | EncounterModifier::Lookalike
            | EncounterModifier::Moist => None,
        }
    }

    /// Consequence spliced in when the player's turn starts.
    pub fn on_player_turn_start(&self) -> Option<Timeline> {
        match self {
            EncounterModifier::SteelNerves(steel_nerves) => Some(steel_nerves.arm_timeline()),
            EncounterModifier::Rain
            | EncounterModifier::Frost
            | EncounterModifier::BewitchedMist
            | EncounterModifier::Lookalike
            | EncounterModifier::Moist => None,
        }
    }

    fn moist_modifier() -> CardModifier {
        CardModifier::new(0, "moist (lost 0 damage)")
            .with_validity(|ctx| ctx.card_in_game)
            .with_transformer(Trigger::OnRevolverRotation, |old, info| {
                let damage = old.damage() - info.occurrences() as i32;
                old.derive(damage, format!("moist (lost {} damage)", -damage))
            })
    }
}

impl std::fmt::Debug for EncounterModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The countdown rule: after each shot (and at turn start) the player has
/// ten seconds to shoot again before the revolver fires itself.
///
/// The countdown anchor lives behind `Rc<Cell<...>>` because the timelines
/// this hook produces re-arm and disarm it from inside their own actions;
/// the scheduler serializes all action execution, so the shared cell is never
/// touched concurrently.
pub struct SteelNerves {
    base_time: Rc<Cell<Option<u64>>>,
}

impl SteelNerves {
    /// Time the player has before the forced shot.
    pub const TIME_LIMIT_MS: u64 = 10_000;

    /// Screen state active while this modifier runs.
    pub const SCREEN_STATE: &'static str = "steelNerves";

    /// Template parameter the remaining whole seconds are published under.
    pub const REMAINING_TIME_PARAM: &'static str = "game.steelNerves.remainingTime";

    /// A disarmed countdown.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_time: Rc::new(Cell::new(None)),
        }
    }

    /// Whether the countdown is currently armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.base_time.get().is_some()
    }

    /// Timeline whose single action anchors the countdown at the tick it
    /// runs in - not at the tick the timeline was built in.
    fn arm_timeline(&self) -> Timeline {
        let base_time = Rc::clone(&self.base_time);
        Timeline::builder()
            .run(move |ctx| base_time.set(Some(ctx.now_ms)))
            .build()
    }

    /// Timeline whose single action disarms the countdown.
    fn disarm_timeline(&self) -> Timeline {
        let base_time = Rc::clone(&self.base_time);
        Timeline::builder()
            .run(move |_| base_time.set(None))
            .build()
    }

    /// Per-tick update: publish the remaining time and force the shot once
    /// the limit is reached. Disarmed on loss and on the win screen without
    /// firing.
    pub fn update(&self, ctx: &mut GameContext<'_>) {
        let Some(base) = self.base_time.get() else {
            return;
        };

        if ctx.game.player_lost() || ctx.game.screen_state_active(SHOW_WIN_SCREEN) {
            ctx.game.leave_screen_state(Self::SCREEN_STATE);
            self.base_time.set(None);
            return;
        }

        let elapsed = ctx.now_ms.saturating_sub(base);
        let remaining = Self::TIME_LIMIT_MS.saturating_sub(elapsed).div_ceil(1_000);
        ctx.templates
            .update_param(Self::REMAINING_TIME_PARAM, remaining as i64);

        if elapsed < Self::TIME_LIMIT_MS {
            return;
        }

        tracing::debug!("steel nerves countdown expired, forcing shot");
        self.base_time.set(None);
        ctx.game.shoot();
    }
}

impl Default for SteelNerves {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SteelNerves {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SteelNerves")
            .field("armed", &self.is_armed())
            .finish()
    }
}

//! Interfaces to the world outside the core.
//!
//! The core never touches rendering, input, or ambient global state. Every
//! action closure and every rule hook receives an explicit [`GameContext`]
//! bundling the three collaborators the core is allowed to talk to:
//!
//! - [`GameFacade`]: the narrow view of live game state (revolver, cards,
//!   enemies, screen states) plus the operations consequence actions perform.
//! - [`TemplateSink`]: write-only publication of derived values the UI
//!   renders (e.g. a remaining-time counter).
//! - a timestamp, sampled once per tick from a [`Clock`] by whoever drives
//!   the scheduler.

use crate::cards::Card;
use crate::core::entity::{AnimationHandle, CardId, EnemyId};
use crate::core::rotation::RevolverRotation;
use crate::enemy::Enemy;

/// The game-state facade.
///
/// Implemented by the surrounding game layer. The methods fall into three
/// groups: queries the dispatcher and hooks evaluate synchronously, screen
/// state transitions, and the mutations consequence actions perform while a
/// timeline drains.
///
/// Nothing here blocks; long-running visuals go through
/// [`start_animation`](GameFacade::start_animation) and are polled via
/// [`animation_finished`](GameFacade::animation_finished).
pub trait GameFacade {
    /// The rotation the revolver will perform after the next shot.
    fn current_rotation(&self) -> RevolverRotation;

    /// Whether the player has lost the encounter.
    fn player_lost(&self) -> bool;

    /// The current round number, starting at 1. Increments on round start.
    fn current_round(&self) -> u32;

    /// Whether a named screen state is currently active.
    fn screen_state_active(&self, tag: &str) -> bool;

    /// Enter a named screen state.
    fn enter_screen_state(&mut self, tag: &str);

    /// Leave a named screen state.
    fn leave_screen_state(&mut self, tag: &str);

    /// Fire the revolver with the default follow-up behavior.
    fn shoot(&mut self);

    /// Look up a live card by id.
    fn card(&self, id: CardId) -> Option<&Card>;

    /// Look up a live card by id, mutably.
    fn card_mut(&mut self, id: CardId) -> Option<&mut Card>;

    /// Ids of the bullets currently loaded in the revolver, in chamber order
    /// starting at the chamber in front of the barrel.
    fn cards_in_revolver(&self) -> Vec<CardId>;

    /// Look up a live enemy by id.
    fn enemy(&self, id: EnemyId) -> Option<&Enemy>;

    /// Look up a live enemy by id, mutably.
    fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy>;

    /// Ids of all enemies still alive, in spawn order.
    fn live_enemies(&self) -> Vec<EnemyId>;

    /// Give the player reserves.
    fn gain_reserves(&mut self, amount: u32);

    /// Draw cards from the stack into the hand.
    fn draw_cards(&mut self, amount: u32);

    /// Deal damage to the player. Cover is consumed first.
    fn damage_player(&mut self, amount: u32);

    /// Add cover in front of the player.
    fn add_player_cover(&mut self, amount: u32);

    /// Put copies of the named card into the hand, if the hand has room.
    fn try_put_cards_in_hand(&mut self, name: &str);

    /// Whether a bullet that can be destroyed is currently in the revolver.
    fn has_destroyable_card(&self) -> bool;

    /// Open the destroy-target selection. The consequence timeline waits for
    /// [`destroy_selection_active`](GameFacade::destroy_selection_active) to
    /// flip back to `false`.
    fn begin_destroy_selection(&mut self);

    /// Whether a destroy-target selection is still waiting for the player.
    fn destroy_selection_active(&self) -> bool;

    /// Consume a pending confirmation input (click or keypress), if any.
    ///
    /// Returns `true` at most once per input event.
    fn poll_confirmation(&mut self) -> bool;

    /// Start a named animation and return a handle to poll.
    fn start_animation(&mut self, name: &str) -> AnimationHandle;

    /// Whether the animation behind `handle` has completed.
    fn animation_finished(&self, handle: AnimationHandle) -> bool;
}

/// Write-only sink for values the UI layer formats into templates.
pub trait TemplateSink {
    /// Publish a named numeric parameter.
    fn update_param(&mut self, name: &str, value: i64);
}

/// Monotonic millisecond timestamp source.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin. Never decreases.
    fn now_ms(&self) -> u64;
}

/// [`Clock`] backed by [`std::time::Instant`], anchored at construction.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: std::time::Instant,
}

impl SystemClock {
    /// Create a clock anchored at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Everything an action or hook may see during one tick.
///
/// Built fresh each tick by whoever drives the scheduler; `now_ms` is sampled
/// once per tick so every action in the same tick observes the same time.
pub struct GameContext<'a> {
    /// The game-state facade.
    pub game: &'a mut dyn GameFacade,
    /// Sink for UI-visible derived values.
    pub templates: &'a mut dyn TemplateSink,
    /// Timestamp for this tick, in monotonic milliseconds.
    pub now_ms: u64,
}

impl<'a> GameContext<'a> {
    /// Bundle a context for one tick.
    pub fn new(
        game: &'a mut dyn GameFacade,
        templates: &'a mut dyn TemplateSink,
        now_ms: u64,
    ) -> Self {
        Self {
            game,
            templates,
            now_ms,
        }
    }
}

/// [`TemplateSink`] that drops every value.
///
/// For embeddings that run the core headless (simulations, tests of
/// subsystems that never publish parameters).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTemplateSink;

impl TemplateSink for NullTemplateSink {
    fn update_param(&mut self, _name: &str, _value: i64) {}
}

//! # revolver-core
//!
//! The action-sequencing and rule-dispatch core of a turn-based revolver
//! card game.
//!
//! ## Design Principles
//!
//! 1. **Cooperative, not concurrent**: every consequence is a [`Timeline`]
//!    of actions drained one at a time by tick-driven polling. No threads,
//!    no locks - determinism comes from the total order within a timeline.
//!
//! 2. **Rules are data plus closed variants**: card effects and encounter
//!    modifiers are enumerated variants matched exhaustively. The dispatcher
//!    never knows concrete rule identities; it only merges the timelines
//!    reacting rules return.
//!
//! 3. **No ambient state**: everything an action or hook may touch arrives
//!    through an explicit [`GameContext`] - the game-state facade, the
//!    template sink, and the tick timestamp.
//!
//! ## Modules
//!
//! - `core`: ids, revolver rotation, facade/context traits, RNG
//! - `timeline`: actions, timelines, the builder, the scheduler front
//! - `triggers`: event tags and dispatch context
//! - `effects`: card effect variants and the trigger dispatcher
//! - `cards`: card instances and modifier chains
//! - `encounter`: encounter-wide rule modifiers and their registry
//! - `enemy`: enemies and their timeline-producing actions
//! - `error`: configuration errors

pub mod cards;
pub mod core;
pub mod effects;
pub mod encounter;
pub mod enemy;
pub mod error;
pub mod timeline;
pub mod triggers;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use crate::core::{
    AnimationHandle, CardId, Clock, EnemyId, GameContext, GameFacade, GameRng, GameRngState,
    NullTemplateSink, RevolverRotation, SystemClock, TemplateSink,
};

pub use crate::cards::{Card, CardModifier, CardTrait, CardType, ModifierChain, ValidityContext};

pub use crate::effects::{Dispatcher, Effect, EffectKind};

pub use crate::encounter::{EncounterModifier, EncounterModifiers, SteelNerves, SHOW_WIN_SCREEN};

pub use crate::enemy::{Enemy, EnemyAction, EnemyActionKind};

pub use crate::error::ConfigError;

pub use crate::timeline::{Action, ActionState, Scheduler, Timeline, TimelineBuilder};

pub use crate::triggers::{Trigger, TriggerInfo};

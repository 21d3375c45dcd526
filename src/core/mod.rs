//! Core types: ids, rotation, external interfaces, RNG.
//!
//! Everything in here is game-agnostic plumbing the other modules build on.
//! The facade traits live here so that the scheduler, dispatcher, and hooks
//! all receive the same explicit context instead of reading global state.

pub mod context;
pub mod entity;
pub mod rng;
pub mod rotation;

pub use context::{Clock, GameContext, GameFacade, NullTemplateSink, SystemClock, TemplateSink};
pub use entity::{AnimationHandle, CardId, EnemyId};
pub use rng::{GameRng, GameRngState};
pub use rotation::RevolverRotation;

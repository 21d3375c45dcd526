//! Game event tags and their dispatch context.
//!
//! A [`Trigger`] is broadcast by the game layer at well-defined moments
//! (a bullet enters the revolver, the revolver is shot, a round starts, a
//! bullet is destroyed, the drum rotates). Effects and modifier transformers
//! select on the tag; the enumeration order carries no runtime meaning.
//!
//! Triggers arrive with a [`TriggerInfo`] carrying the per-event context the
//! reacting rule bodies may need: how often the event logically happened
//! (a two-chamber rotation fires `OnRevolverRotation` once with multiplier 2)
//! and which card caused it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::CardId;
use crate::error::ConfigError;

/// A game event tag. Identity only - no payload, no ordering semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// A card entered the game (bullet loaded, cover placed).
    OnEnter,
    /// The revolver was shot.
    OnShot,
    /// A new round started.
    OnRoundStart,
    /// A bullet was destroyed by the destroy effect.
    OnDestroy,
    /// The revolver drum rotated.
    OnRevolverRotation,
}

impl Trigger {
    /// Resolve a configuration name into a trigger.
    ///
    /// Card definitions name their triggers as lowercase phrases. Unknown
    /// names abort loading of the definition; nothing is defaulted.
    pub fn from_config_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "enter" => Ok(Trigger::OnEnter),
            "shot" => Ok(Trigger::OnShot),
            "round start" => Ok(Trigger::OnRoundStart),
            "destroy" => Ok(Trigger::OnDestroy),
            "revolver rotation" => Ok(Trigger::OnRevolverRotation),
            _ => Err(ConfigError::UnknownTrigger(name.to_string())),
        }
    }

    /// The configuration name this trigger is written as in card definitions.
    #[must_use]
    pub const fn config_name(self) -> &'static str {
        match self {
            Trigger::OnEnter => "enter",
            Trigger::OnShot => "shot",
            Trigger::OnRoundStart => "round start",
            Trigger::OnDestroy => "destroy",
            Trigger::OnRevolverRotation => "revolver rotation",
        }
    }
}

impl FromStr for Trigger {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_config_name(s)
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.config_name())
    }
}

/// Context a trigger is dispatched with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerInfo {
    /// How many times the event logically occurred in this broadcast.
    /// Scaling effects multiply by this; `None` means once.
    pub multiplier: Option<u32>,

    /// The card that caused the event, when there is one (the bullet that was
    /// shot, the bullet that entered).
    pub source_card: Option<CardId>,
}

impl TriggerInfo {
    /// Context for a plain, single occurrence with no source card.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the multiplier (builder pattern).
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    /// Set the source card (builder pattern).
    #[must_use]
    pub fn with_source_card(mut self, card: CardId) -> Self {
        self.source_card = Some(card);
        self
    }

    /// The effective number of occurrences. Defaults to 1.
    #[must_use]
    pub fn occurrences(&self) -> u32 {
        self.multiplier.unwrap_or(1)
    }
}

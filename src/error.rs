//! Configuration errors.
//!
//! Gameplay must stay deterministic, so a name the core does not recognize is
//! never silently defaulted: resolution fails immediately with the offending
//! name, and whatever assembled the encounter or card set aborts that step.
//!
//! Precondition failures during dispatch are *not* errors; an effect whose
//! guard fails simply contributes no timeline.

use thiserror::Error;

/// Error raised while resolving configuration names into core types.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No encounter modifier is registered under this name.
    #[error("unknown encounter modifier: {0}")]
    UnknownEncounterModifier(String),

    /// The name is registered but the variant has been taken out of rotation.
    /// Distinct from unknown so that a retired rule is never confused with a
    /// typo.
    #[error("encounter modifier {0} is not available")]
    EncounterModifierNotAvailable(String),

    /// No trigger matches this configuration name.
    #[error("unknown trigger: {0}")]
    UnknownTrigger(String),

    /// No card type matches this configuration name.
    #[error("unknown card type: {0}")]
    UnknownCardType(String),

    /// No card trait matches this configuration name.
    #[error("unknown card trait: {0}")]
    UnknownCardTrait(String),
}

//! Revolver rotation.
//!
//! Every shot is followed by a rotation of the six-chamber revolver. The
//! direction and amount are data, not behavior: encounter modifiers may
//! rewrite a rotation before the game applies it (see
//! [`EncounterModifier::modify_revolver_rotation`](crate::encounter::EncounterModifier::modify_revolver_rotation)).

use serde::{Deserialize, Serialize};

/// A rotation of the revolver drum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevolverRotation {
    /// The drum does not move.
    None,
    /// Rotate clockwise by the given number of chambers.
    Right(u32),
    /// Rotate counter-clockwise by the given number of chambers.
    Left(u32),
}

impl RevolverRotation {
    /// Number of chambers this rotation moves.
    #[must_use]
    pub const fn amount(self) -> u32 {
        match self {
            RevolverRotation::None => 0,
            RevolverRotation::Right(amount) | RevolverRotation::Left(amount) => amount,
        }
    }

    /// Whether the drum moves at all.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, RevolverRotation::None)
    }

    /// Same amount, opposite direction. `None` stays `None`.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            RevolverRotation::None => RevolverRotation::None,
            RevolverRotation::Right(amount) => RevolverRotation::Left(amount),
            RevolverRotation::Left(amount) => RevolverRotation::Right(amount),
        }
    }
}

impl std::fmt::Display for RevolverRotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RevolverRotation::None => write!(f, "no rotation"),
            RevolverRotation::Right(amount) => write!(f, "{amount} right"),
            RevolverRotation::Left(amount) => write!(f, "{amount} left"),
        }
    }
}

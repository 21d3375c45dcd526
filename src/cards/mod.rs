//! Cards and their modifier chains.

mod card;
mod modifier;

pub use card::{Card, CardTrait, CardType};
pub use modifier::{CardModifier, ModifierChain, TransformerFn, ValidityContext, ValidityFn};

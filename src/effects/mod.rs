//! Card effects and trigger dispatch.

mod dispatcher;
mod effect;

pub use dispatcher::Dispatcher;
pub use effect::{Effect, EffectKind};

//! Temporary card stat adjustments.
//!
//! A [`CardModifier`] is a signed damage delta with its own idea of how long
//! it stays valid and, optionally, how it rewrites itself when a trigger
//! fires (a modifier that weakens by one per drum rotation carries that rule
//! itself; no outside code knows its shape). A card owns its modifiers in a
//! [`ModifierChain`] that sweeps out invalid entries and caches the effective
//! total behind a dirty flag.

use rustc_hash::FxHashMap;
use std::rc::Rc;

use crate::triggers::{Trigger, TriggerInfo};

/// State a validity predicate may inspect.
///
/// Predicates receive this explicitly instead of capturing game state; the
/// chain can therefore be swept without reaching back into the facade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidityContext {
    /// Whether the owning card is still in the game.
    pub card_in_game: bool,
    /// The current round number.
    pub round: u32,
}

/// Predicate deciding whether a modifier is still in force.
pub type ValidityFn = Rc<dyn Fn(&ValidityContext) -> bool>;

/// Rewrites a modifier in response to a trigger.
///
/// Receives the old modifier and the trigger context, returns the
/// replacement. Use [`CardModifier::derive`] to keep validity and
/// transformers intact while changing delta and text.
pub type TransformerFn = Rc<dyn Fn(&CardModifier, &TriggerInfo) -> CardModifier>;

/// A temporary, independently validated adjustment to a card's damage.
pub struct CardModifier {
    damage: i32,
    source: String,
    validity: ValidityFn,
    transformers: FxHashMap<Trigger, TransformerFn>,
}

impl CardModifier {
    /// A modifier that stays valid until the owning card leaves play.
    pub fn new(damage: i32, source: impl Into<String>) -> Self {
        Self {
            damage,
            source: source.into(),
            validity: Rc::new(|_| true),
            transformers: FxHashMap::default(),
        }
    }

    /// Set the validity predicate (builder pattern).
    #[must_use]
    pub fn with_validity(mut self, validity: impl Fn(&ValidityContext) -> bool + 'static) -> Self {
        self.validity = Rc::new(validity);
        self
    }

    /// Attach a transformer for a trigger (builder pattern).
    #[must_use]
    pub fn with_transformer(
        mut self,
        trigger: Trigger,
        transformer: impl Fn(&CardModifier, &TriggerInfo) -> CardModifier + 'static,
    ) -> Self {
        self.transformers.insert(trigger, Rc::new(transformer));
        self
    }

    /// The signed damage delta. No clamping happens at this layer.
    #[must_use]
    pub fn damage(&self) -> i32 {
        self.damage
    }

    /// Human-readable description of where the modifier came from; shown in
    /// the card's detail text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluate the validity predicate.
    #[must_use]
    pub fn is_valid(&self, ctx: &ValidityContext) -> bool {
        (self.validity)(ctx)
    }

    /// A modifier with new delta and text but the same validity predicate and
    /// the same transformers. Transformers use this to replace "themselves".
    #[must_use]
    pub fn derive(&self, damage: i32, source: impl Into<String>) -> Self {
        Self {
            damage,
            source: source.into(),
            validity: Rc::clone(&self.validity),
            transformers: self.transformers.clone(),
        }
    }

    fn transformer_for(&self, trigger: Trigger) -> Option<TransformerFn> {
        self.transformers.get(&trigger).map(Rc::clone)
    }
}

impl std::fmt::Debug for CardModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardModifier")
            .field("damage", &self.damage)
            .field("source", &self.source)
            .field("transformers", &self.transformers.len())
            .finish()
    }
}

impl Clone for CardModifier {
    fn clone(&self) -> Self {
        Self {
            damage: self.damage,
            source: self.source.clone(),
            validity: Rc::clone(&self.validity),
            transformers: self.transformers.clone(),
        }
    }
}

/// Ordered collection of modifiers with a cached effective total.
///
/// The total is `base + sum of deltas` over the current entries, recomputed
/// only when the chain changed since the last read.
pub struct ModifierChain {
    base: i32,
    modifiers: smallvec::SmallVec<[CardModifier; 2]>,
    cached: i32,
    dirty: bool,
}

impl ModifierChain {
    /// An empty chain over a base value.
    #[must_use]
    pub fn new(base: i32) -> Self {
        Self {
            base,
            modifiers: smallvec::SmallVec::new(),
            cached: base,
            dirty: false,
        }
    }

    /// The base value the deltas apply to.
    #[must_use]
    pub fn base(&self) -> i32 {
        self.base
    }

    /// Append a modifier. Invalidates the cached total.
    pub fn add(&mut self, modifier: CardModifier) {
        tracing::debug!(?modifier, "adding card modifier");
        self.modifiers.push(modifier);
        self.dirty = true;
    }

    /// Remove every modifier whose validity predicate no longer holds.
    ///
    /// Must run before a damage total is trusted. Returns `true` if anything
    /// was removed.
    pub fn sweep(&mut self, ctx: &ValidityContext) -> bool {
        let before = self.modifiers.len();
        self.modifiers.retain(|modifier| {
            let valid = modifier.is_valid(ctx);
            if !valid {
                tracing::debug!(?modifier, "modifier no longer valid, removing");
            }
            valid
        });

        let removed = self.modifiers.len() != before;
        if removed {
            self.dirty = true;
        }
        removed
    }

    /// Run every transformer registered for `trigger`, atomically replacing
    /// each transformed modifier with its derived successor.
    ///
    /// Returns `true` if anything was replaced.
    pub fn apply_trigger(&mut self, trigger: Trigger, info: &TriggerInfo) -> bool {
        let mut transformed = false;
        for i in 0..self.modifiers.len() {
            if let Some(transformer) = self.modifiers[i].transformer_for(trigger) {
                let replacement = transformer(&self.modifiers[i], info);
                tracing::debug!(
                    old = ?self.modifiers[i],
                    new = ?replacement,
                    %trigger,
                    "modifier transformed itself"
                );
                self.modifiers[i] = replacement;
                transformed = true;
            }
        }
        if transformed {
            self.dirty = true;
        }
        transformed
    }

    /// The effective total: base plus the sum of all current deltas.
    ///
    /// Cached; recomputes only when the chain changed since the last read.
    pub fn effective_value(&mut self) -> i32 {
        if self.dirty {
            self.cached = self.base
                + self
                    .modifiers
                    .iter()
                    .map(CardModifier::damage)
                    .sum::<i32>();
            self.dirty = false;
        }
        self.cached
    }

    /// Whether the cached total is stale.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drop every modifier (the owning card left play).
    pub fn clear(&mut self) {
        if !self.modifiers.is_empty() {
            self.modifiers.clear();
            self.dirty = true;
        }
    }

    /// Number of modifiers currently in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    /// Whether the chain holds no modifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Iterate the modifiers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CardModifier> {
        self.modifiers.iter()
    }
}

impl std::fmt::Debug for ModifierChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModifierChain")
            .field("base", &self.base)
            .field("modifiers", &self.modifiers)
            .field("dirty", &self.dirty)
            .finish()
    }
}

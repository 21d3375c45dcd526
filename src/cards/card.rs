//! Card instances.
//!
//! A [`Card`] is a concrete card in play: identity, stats, the effects it
//! reacts with, its trait flags, and the modifier chain its current damage is
//! derived from. Prototypes, textures, and schema loading live outside the
//! core; cards arrive here fully assembled.

use smallvec::SmallVec;

use crate::cards::modifier::{CardModifier, ModifierChain, ValidityContext};
use crate::core::{CardId, GameFacade};
use crate::effects::{Effect, EffectKind};
use crate::error::ConfigError;
use crate::timeline::Timeline;
use crate::triggers::{Trigger, TriggerInfo};

/// A type of card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CardType {
    /// Loaded into the revolver, does damage.
    Bullet,
    /// Placed in front of the player, absorbs damage.
    Cover,
    /// Fired directly from the hand without occupying a chamber.
    OneShot,
}

impl CardType {
    /// Resolve a configuration name into a card type.
    pub fn from_config_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "Bullet" => Ok(CardType::Bullet),
            "Cover" => Ok(CardType::Cover),
            "OneShot" => Ok(CardType::OneShot),
            _ => Err(ConfigError::UnknownCardType(name.to_string())),
        }
    }
}

/// A trait flag a card definition can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CardTrait {
    /// Stays in the revolver after being shot.
    Everlasting,
    /// Returns to the hand after being shot or destroyed.
    Undead,
    /// Loses one damage every time the drum rotates.
    Rotten,
    /// The drum rotates left instead of right after this card is shot.
    LeftRotating,
}

impl CardTrait {
    /// Resolve a configuration name into a trait flag.
    pub fn from_config_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "everlasting" => Ok(CardTrait::Everlasting),
            "undead" => Ok(CardTrait::Undead),
            "rotten" => Ok(CardTrait::Rotten),
            "leftRotating" => Ok(CardTrait::LeftRotating),
            _ => Err(ConfigError::UnknownCardTrait(name.to_string())),
        }
    }
}

/// A card in play.
pub struct Card {
    id: CardId,
    name: String,
    title: String,
    flavour_text: String,
    short_description: String,
    card_type: CardType,
    cover_value: u32,
    cost: u32,
    effects: SmallVec<[Effect; 2]>,
    everlasting: bool,
    undead: bool,
    rotten: bool,
    left_rotating: bool,
    in_game: bool,
    chain: ModifierChain,
    description: String,
}

impl Card {
    /// A card with no effects, no traits, and zero stats.
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType) -> Self {
        let name = name.into();
        let mut card = Self {
            id,
            title: name.clone(),
            name,
            flavour_text: String::new(),
            short_description: String::new(),
            card_type,
            cover_value: 0,
            cost: 0,
            effects: SmallVec::new(),
            everlasting: false,
            undead: false,
            rotten: false,
            left_rotating: false,
            in_game: false,
            chain: ModifierChain::new(0),
            description: String::new(),
        };
        card.update_text();
        card
    }

    /// Set the formatted display title (builder pattern).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self.update_text();
        self
    }

    /// Set the flavour text (builder pattern).
    #[must_use]
    pub fn with_flavour_text(mut self, text: impl Into<String>) -> Self {
        self.flavour_text = text.into();
        self.update_text();
        self
    }

    /// Set the short effect description (builder pattern).
    #[must_use]
    pub fn with_short_description(mut self, text: impl Into<String>) -> Self {
        self.short_description = text.into();
        self.update_text();
        self
    }

    /// Set the damage before modifiers (builder pattern).
    #[must_use]
    pub fn with_base_damage(mut self, damage: i32) -> Self {
        self.chain = ModifierChain::new(damage);
        self.update_text();
        self
    }

    /// Set the cover value (builder pattern).
    #[must_use]
    pub fn with_cover_value(mut self, cover: u32) -> Self {
        self.cover_value = cover;
        self.update_text();
        self
    }

    /// Set the cost in reserves (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self.update_text();
        self
    }

    /// Add an effect (builder pattern). Declaration order is dispatch order.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Enable a trait flag (builder pattern).
    #[must_use]
    pub fn with_trait(mut self, card_trait: CardTrait) -> Self {
        match card_trait {
            CardTrait::Everlasting => self.everlasting = true,
            CardTrait::Undead => self.undead = true,
            CardTrait::Rotten => self.rotten = true,
            CardTrait::LeftRotating => self.left_rotating = true,
        }
        self
    }

    /// This card's id.
    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    /// The card's internal name (shared by all copies of the same card).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The formatted display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The type of card.
    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    /// Damage before modifiers.
    #[must_use]
    pub fn base_damage(&self) -> i32 {
        self.chain.base()
    }

    /// Cover this card provides.
    #[must_use]
    pub fn cover_value(&self) -> u32 {
        self.cover_value
    }

    /// Cost in reserves.
    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Whether the card is currently in the game.
    #[must_use]
    pub fn in_game(&self) -> bool {
        self.in_game
    }

    /// Whether the card stays in the revolver after being shot.
    #[must_use]
    pub fn is_everlasting(&self) -> bool {
        self.everlasting
    }

    /// Whether the card returns to the hand after being shot or destroyed.
    #[must_use]
    pub fn is_undead(&self) -> bool {
        self.undead
    }

    /// Whether the card decays as the drum rotates.
    #[must_use]
    pub fn is_rotten(&self) -> bool {
        self.rotten
    }

    /// Whether shooting this card rotates the drum left.
    #[must_use]
    pub fn rotates_left(&self) -> bool {
        self.left_rotating
    }

    /// Whether the default post-shot behavior removes this card.
    #[must_use]
    pub fn should_remove_after_shot(&self) -> bool {
        !self.everlasting
    }

    /// The effects this card reacts with, in declaration order.
    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// The complete detail text: flavour, description, stats, and one line
    /// per modifier that carries a source text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The card's modifier chain.
    #[must_use]
    pub fn modifiers(&self) -> &ModifierChain {
        &self.chain
    }

    /// The current damage with all modifiers applied.
    pub fn current_damage(&mut self) -> i32 {
        self.chain.effective_value()
    }

    /// Called when the card enters the game. A rotten card installs its
    /// self-decaying modifier here.
    pub fn on_enter(&mut self) {
        self.in_game = true;
        if self.rotten {
            self.chain.add(Self::rotten_modifier());
        }
        self.update_text();
    }

    /// Called when the card leaves play for any reason. All modifiers are
    /// cleared; they never outlive the card's presence in the game.
    pub fn leave_game(&mut self) {
        tracing::debug!(card = %self.name, "card leaving game");
        self.in_game = false;
        self.chain.clear();
        self.update_text();
    }

    /// Append a modifier to the chain.
    pub fn add_modifier(&mut self, modifier: CardModifier) {
        self.chain.add(modifier);
        self.update_text();
    }

    /// Remove modifiers whose validity expired.
    pub fn sweep_modifiers(&mut self, round: u32) {
        let ctx = ValidityContext {
            card_in_game: self.in_game,
            round,
        };
        if self.chain.sweep(&ctx) {
            self.update_text();
        }
    }

    /// Run modifier transformers for a trigger.
    pub fn apply_trigger(&mut self, trigger: Trigger, info: &TriggerInfo) {
        if self.chain.apply_trigger(trigger, info) {
            self.update_text();
        }
    }

    /// Whether this card may enter the game right now.
    ///
    /// A card with a destroy-on-enter effect needs a destroyable bullet to
    /// exist; nothing else gates entry at this layer.
    #[must_use]
    pub fn allows_entering_game(&self, game: &dyn GameFacade) -> bool {
        for effect in &self.effects {
            if matches!(effect.kind(), EffectKind::Destroy)
                && effect.trigger() == Trigger::OnEnter
                && !game.has_destroyable_card()
            {
                tracing::debug!(
                    card = %self.name,
                    "cannot enter: destroy effect without destroyable target"
                );
                return false;
            }
        }
        true
    }

    /// Ask every effect whether it reacts to `trigger` and merge the firing
    /// ones, in declaration order, into a single timeline.
    ///
    /// Returns `None` when no effect fired - callers skip merge work
    /// entirely, which is distinct from scheduling an empty timeline.
    pub fn check_effects(
        &self,
        trigger: Trigger,
        info: &TriggerInfo,
        game: &dyn GameFacade,
    ) -> Option<Timeline> {
        let mut fired = false;
        let mut builder = Timeline::builder();

        for effect in &self.effects {
            if let Some(timeline) = effect.check_trigger(trigger, info, self.id, game) {
                builder = builder.include(timeline);
                fired = true;
            }
        }

        if fired {
            tracing::debug!(card = %self.name, %trigger, "card effects fired");
            Some(builder.build())
        } else {
            None
        }
    }

    fn rotten_modifier() -> CardModifier {
        CardModifier::new(0, "rotten (lost 0 damage)").with_transformer(
            Trigger::OnRevolverRotation,
            |old, info| {
                let damage = old.damage() - info.occurrences() as i32;
                old.derive(damage, format!("rotten (lost {} damage)", -damage))
            },
        )
    }

    fn update_text(&mut self) {
        let mut text = String::new();

        text.push('\n');
        text.push_str(&self.flavour_text);
        text.push_str("\n\n");
        if !self.short_description.is_empty() {
            text.push_str(&self.short_description);
            text.push_str("\n\n");
        }
        text.push_str(&format!("cost: {}\n", self.cost));

        match self.card_type {
            CardType::Bullet | CardType::OneShot => {
                let current = self.chain.effective_value();
                text.push_str(&format!("damage: {}/{}", current, self.chain.base()));
            }
            CardType::Cover => {
                text.push_str(&format!("cover value: {}", self.cover_value));
            }
        }
        text.push_str("\n\n");

        for modifier in self.chain.iter() {
            if !modifier.source().is_empty() {
                text.push_str(modifier.source());
                text.push('\n');
            }
        }

        self.description = text;
    }
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Card")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("type", &self.card_type)
            .field("in_game", &self.in_game)
            .field("modifiers", &self.chain.len())
            .finish()
    }
}

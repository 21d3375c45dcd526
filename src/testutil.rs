//! Test doubles for the unit tests.
//!
//! `StubGame` is a minimal in-memory implementation of the facade; tests
//! observe consequences through its public counters.

use rustc_hash::FxHashSet;

use crate::cards::Card;
use crate::core::{
    AnimationHandle, CardId, EnemyId, GameFacade, RevolverRotation, TemplateSink,
};
use crate::enemy::Enemy;

pub(crate) struct StubGame {
    pub rotation: RevolverRotation,
    pub lost: bool,
    pub round: u32,
    pub shots: u32,
    pub reserves: u32,
    pub drawn: u32,
    pub player_damage: u32,
    pub player_cover: u32,
    pub hand_adds: Vec<String>,
    pub destroyable: bool,
    pub destroy_selection_active: bool,
    pub hold_animations: bool,
    cards: Vec<Card>,
    enemies: Vec<Enemy>,
    revolver: Vec<CardId>,
    screen_states: FxHashSet<String>,
    confirmations: u32,
    animations_started: Vec<String>,
}

impl StubGame {
    pub fn new() -> Self {
        Self {
            rotation: RevolverRotation::Right(1),
            lost: false,
            round: 1,
            shots: 0,
            reserves: 0,
            drawn: 0,
            player_damage: 0,
            player_cover: 0,
            hand_adds: Vec::new(),
            destroyable: false,
            destroy_selection_active: false,
            hold_animations: false,
            cards: Vec::new(),
            enemies: Vec::new(),
            revolver: Vec::new(),
            screen_states: FxHashSet::default(),
            confirmations: 0,
            animations_started: Vec::new(),
        }
    }

    pub fn add_card(&mut self, card: Card) -> CardId {
        let id = card.id();
        self.cards.push(card);
        id
    }

    pub fn card_entered(&mut self, id: CardId) {
        if let Some(card) = self.card_mut(id) {
            card.on_enter();
        }
    }

    pub fn load_into_revolver(&mut self, id: CardId) {
        self.revolver.push(id);
    }

    pub fn add_enemy(&mut self, enemy: Enemy) -> EnemyId {
        let id = enemy.id();
        self.enemies.push(enemy);
        id
    }

    pub fn queue_confirmation(&mut self) {
        self.confirmations += 1;
    }

    #[allow(dead_code)]
    pub fn animations_started(&self) -> &[String] {
        &self.animations_started
    }
}

impl GameFacade for StubGame {
    fn current_rotation(&self) -> RevolverRotation {
        self.rotation
    }

    fn player_lost(&self) -> bool {
        self.lost
    }

    fn current_round(&self) -> u32 {
        self.round
    }

    fn screen_state_active(&self, tag: &str) -> bool {
        self.screen_states.contains(tag)
    }

    fn enter_screen_state(&mut self, tag: &str) {
        self.screen_states.insert(tag.to_string());
    }

    fn leave_screen_state(&mut self, tag: &str) {
        self.screen_states.remove(tag);
    }

    fn shoot(&mut self) {
        self.shots += 1;
    }

    fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id() == id)
    }

    fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id() == id)
    }

    fn cards_in_revolver(&self) -> Vec<CardId> {
        self.revolver.clone()
    }

    fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id() == id)
    }

    fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id() == id)
    }

    fn live_enemies(&self) -> Vec<EnemyId> {
        self.enemies
            .iter()
            .filter(|enemy| enemy.is_alive())
            .map(Enemy::id)
            .collect()
    }

    fn gain_reserves(&mut self, amount: u32) {
        self.reserves += amount;
    }

    fn draw_cards(&mut self, amount: u32) {
        self.drawn += amount;
    }

    fn damage_player(&mut self, amount: u32) {
        let absorbed = self.player_cover.min(amount);
        self.player_cover -= absorbed;
        self.player_damage += amount - absorbed;
    }

    fn add_player_cover(&mut self, amount: u32) {
        self.player_cover += amount;
    }

    fn try_put_cards_in_hand(&mut self, name: &str) {
        self.hand_adds.push(name.to_string());
    }

    fn has_destroyable_card(&self) -> bool {
        self.destroyable
    }

    fn begin_destroy_selection(&mut self) {
        self.destroy_selection_active = true;
    }

    fn destroy_selection_active(&self) -> bool {
        self.destroy_selection_active
    }

    fn poll_confirmation(&mut self) -> bool {
        if self.confirmations > 0 {
            self.confirmations -= 1;
            true
        } else {
            false
        }
    }

    fn start_animation(&mut self, name: &str) -> AnimationHandle {
        self.animations_started.push(name.to_string());
        AnimationHandle::new(self.animations_started.len() as u32 - 1)
    }

    fn animation_finished(&self, _handle: AnimationHandle) -> bool {
        !self.hold_animations
    }
}

pub(crate) struct RecordingSink {
    params: Vec<(String, i64)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    pub fn last(&self, name: &str) -> Option<i64> {
        self.params
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
    }
}

impl TemplateSink for RecordingSink {
    fn update_param(&mut self, name: &str, value: i64) {
        self.params.push((name.to_string(), value));
    }
}

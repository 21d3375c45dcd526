//! Shared test facade for the integration tests.
//!
//! `TestGame` implements the full facade over plain vectors and counters and
//! records every mutating call in `ops` so tests can assert the order in
//! which consequences ran, not just their totals.

#![allow(dead_code)]

use revolver_core::cards::Card;
use revolver_core::core::{
    AnimationHandle, CardId, EnemyId, GameContext, GameFacade, RevolverRotation, TemplateSink,
};
use revolver_core::enemy::Enemy;
use revolver_core::timeline::Timeline;

pub struct TestGame {
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
    /// Every mutating facade call, in execution order.
    pub ops: Vec<String>,
    cards: Vec<Card>,
    enemies: Vec<Enemy>,
    revolver: Vec<CardId>,
    screen_states: Vec<String>,
    confirmations: u32,
    animations_started: u32,
}

impl TestGame {
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
            ops: Vec::new(),
            cards: Vec::new(),
            enemies: Vec::new(),
            revolver: Vec::new(),
            screen_states: Vec::new(),
            confirmations: 0,
            animations_started: 0,
        }
    }

    pub fn add_card(&mut self, card: Card) -> CardId {
        let id = card.id();
        self.cards.push(card);
        id
    }

    pub fn load_into_revolver(&mut self, id: CardId) {
        if let Some(card) = self.card_mut(id) {
            card.on_enter();
        }
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
}

impl GameFacade for TestGame {
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
        self.screen_states.iter().any(|state| state == tag)
    }

    fn enter_screen_state(&mut self, tag: &str) {
        if !self.screen_state_active(tag) {
            self.screen_states.push(tag.to_string());
        }
        self.ops.push(format!("enter_screen_state:{tag}"));
    }

    fn leave_screen_state(&mut self, tag: &str) {
        self.screen_states.retain(|state| state != tag);
        self.ops.push(format!("leave_screen_state:{tag}"));
    }

    fn shoot(&mut self) {
        self.shots += 1;
        self.ops.push("shoot".to_string());
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
        self.ops.push(format!("gain_reserves:{amount}"));
    }

    fn draw_cards(&mut self, amount: u32) {
        self.drawn += amount;
        self.ops.push(format!("draw_cards:{amount}"));
    }

    fn damage_player(&mut self, amount: u32) {
        let absorbed = self.player_cover.min(amount);
        self.player_cover -= absorbed;
        self.player_damage += amount - absorbed;
        self.ops.push(format!("damage_player:{amount}"));
    }

    fn add_player_cover(&mut self, amount: u32) {
        self.player_cover += amount;
        self.ops.push(format!("add_player_cover:{amount}"));
    }

    fn try_put_cards_in_hand(&mut self, name: &str) {
        self.hand_adds.push(name.to_string());
        self.ops.push(format!("put_in_hand:{name}"));
    }

    fn has_destroyable_card(&self) -> bool {
        self.destroyable
    }

    fn begin_destroy_selection(&mut self) {
        self.destroy_selection_active = true;
        self.ops.push("begin_destroy_selection".to_string());
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
        self.ops.push(format!("animation:{name}"));
        self.animations_started += 1;
        AnimationHandle::new(self.animations_started - 1)
    }

    fn animation_finished(&self, _handle: AnimationHandle) -> bool {
        !self.hold_animations
    }
}

pub struct RecordingSink {
    pub params: Vec<(String, i64)>,
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

/// Tick `timeline` with a fresh context per frame until it finishes.
/// Panics if it is still unfinished after a generous number of frames.
pub fn drain(timeline: &mut Timeline, game: &mut TestGame, start_ms: u64) -> u64 {
    let mut sink = RecordingSink::new();
    let mut now = start_ms;
    for _ in 0..100_000 {
        if timeline.is_finished() {
            return now;
        }
        let mut ctx = GameContext::new(game, &mut sink, now);
        timeline.tick(&mut ctx);
        now += 16;
    }
    panic!("timeline did not finish");
}

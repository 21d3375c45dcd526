//! Enemies and their actions.
//!
//! An enemy's behavior is a weighted list of [`EnemyAction`]s. Selection
//! draws from the deterministic [`GameRng`](crate::core::GameRng); the chosen
//! action expresses its consequence as a timeline like every other rule body
//! in the engine (mutation as run actions, an indicator animation, a short
//! buffer so consecutive consequences read as separate beats).

use crate::core::{EnemyId, GameRng};
use crate::timeline::Timeline;

/// Pause after an enemy action's animation, in milliseconds, so the next
/// consequence does not start on the same visual beat.
const BUFFER_TIME_MS: u64 = 250;

/// What an enemy action does.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum EnemyActionKind {
    /// Attack the player.
    DamagePlayer { damage: u32 },
    /// Put cover in front of the enemy.
    AddCover { amount: u32 },
    /// Insult the player and do nothing else.
    DoNothing { insult: String },
}

/// An action an enemy can execute, with its selection weight.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EnemyAction {
    kind: EnemyActionKind,
    weight: f32,
}

impl EnemyAction {
    /// An action from its parts.
    #[must_use]
    pub fn new(kind: EnemyActionKind, weight: f32) -> Self {
        Self { kind, weight }
    }

    /// An attack on the player.
    #[must_use]
    pub fn damage_player(damage: u32, weight: f32) -> Self {
        Self::new(EnemyActionKind::DamagePlayer { damage }, weight)
    }

    /// Cover gain for the enemy.
    #[must_use]
    pub fn add_cover(amount: u32, weight: f32) -> Self {
        Self::new(EnemyActionKind::AddCover { amount }, weight)
    }

    /// An insult, nothing else.
    pub fn do_nothing(insult: impl Into<String>, weight: f32) -> Self {
        Self::new(
            EnemyActionKind::DoNothing {
                insult: insult.into(),
            },
            weight,
        )
    }

    /// The action's behavior variant.
    #[must_use]
    pub fn kind(&self) -> &EnemyActionKind {
        &self.kind
    }

    /// Selection weight relative to the enemy's other actions.
    #[must_use]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Text shown next to the intent indicator above the enemy's head.
    #[must_use]
    pub fn description_text(&self) -> String {
        match &self.kind {
            EnemyActionKind::DamagePlayer { damage } => damage.to_string(),
            EnemyActionKind::AddCover { amount } => amount.to_string(),
            EnemyActionKind::DoNothing { .. } => String::new(),
        }
    }

    /// Build the timeline that executes this action for `enemy`.
    pub fn execute(&self, enemy: EnemyId) -> Timeline {
        match &self.kind {
            EnemyActionKind::DamagePlayer { damage } => {
                let damage = *damage;
                Timeline::builder()
                    .animation("enemy_attack")
                    .run(move |ctx| ctx.game.damage_player(damage))
                    .delay(BUFFER_TIME_MS)
                    .build()
            }
            EnemyActionKind::AddCover { amount } => {
                let amount = *amount;
                Timeline::builder()
                    .run(move |ctx| {
                        if let Some(enemy) = ctx.game.enemy_mut(enemy) {
                            enemy.add_cover(amount);
                        }
                    })
                    .animation("enemy_cover_change")
                    .delay(BUFFER_TIME_MS)
                    .build()
            }
            EnemyActionKind::DoNothing { .. } => Timeline::builder()
                .animation("insult_fade")
                .delay(BUFFER_TIME_MS)
                .build(),
        }
    }
}

/// An enemy in the current encounter.
#[derive(Clone, Debug)]
pub struct Enemy {
    id: EnemyId,
    name: String,
    health: i32,
    cover: u32,
    actions: Vec<EnemyAction>,
}

impl Enemy {
    /// An enemy with no actions and no cover.
    pub fn new(id: EnemyId, name: impl Into<String>, health: i32) -> Self {
        Self {
            id,
            name: name.into(),
            health,
            cover: 0,
            actions: Vec::new(),
        }
    }

    /// Add an action to the behavior pool (builder pattern).
    #[must_use]
    pub fn with_action(mut self, action: EnemyAction) -> Self {
        self.actions.push(action);
        self
    }

    /// This enemy's id.
    #[must_use]
    pub fn id(&self) -> EnemyId {
        self.id
    }

    /// The enemy's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remaining health.
    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Cover currently in front of the enemy.
    #[must_use]
    pub fn cover(&self) -> u32 {
        self.cover
    }

    /// Whether the enemy is still alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// The behavior pool, in declaration order.
    #[must_use]
    pub fn actions(&self) -> &[EnemyAction] {
        &self.actions
    }

    /// Put cover in front of the enemy.
    pub fn add_cover(&mut self, amount: u32) {
        self.cover += amount;
    }

    /// Apply damage; cover absorbs first, the rest reduces health.
    pub fn apply_damage(&mut self, amount: u32) {
        let absorbed = self.cover.min(amount);
        self.cover -= absorbed;
        let through = amount - absorbed;
        self.health -= through as i32;
        tracing::debug!(
            enemy = %self.name,
            absorbed,
            through,
            health = self.health,
            "enemy took damage"
        );
    }

    /// Draw the next action by weight. `None` when the pool is empty or all
    /// weights are zero.
    pub fn choose_action(&self, rng: &mut GameRng) -> Option<&EnemyAction> {
        let weights: Vec<f32> = self.actions.iter().map(EnemyAction::weight).collect();
        let index = rng.choose_weighted(&weights)?;
        self.actions.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameContext, GameFacade, NullTemplateSink};
    use crate::testutil::StubGame;

    fn drain(timeline: &mut Timeline, game: &mut StubGame) {
        let mut sink = NullTemplateSink;
        let mut now = 0;
        for _ in 0..1_000 {
            if timeline.is_finished() {
                return;
            }
            let mut ctx = GameContext::new(game, &mut sink, now);
            timeline.tick(&mut ctx);
            now += 16;
        }
        panic!("timeline did not finish");
    }

    #[test]
    fn test_damage_player_action() {
        let action = EnemyAction::damage_player(7, 1.0);
        assert_eq!(action.description_text(), "7");

        let mut game = StubGame::new();
        let mut timeline = action.execute(EnemyId::new(1));
        assert_eq!(timeline.action_kinds(), vec!["animation", "run", "delay"]);

        drain(&mut timeline, &mut game);
        assert_eq!(game.player_damage, 7);
    }

    #[test]
    fn test_add_cover_action_mutates_enemy() {
        let mut game = StubGame::new();
        let id = game.add_enemy(Enemy::new(EnemyId::new(1), "outlaw", 10));

        let action = EnemyAction::add_cover(4, 1.0);
        let mut timeline = action.execute(id);
        drain(&mut timeline, &mut game);

        assert_eq!(game.enemy(id).unwrap().cover(), 4);
    }

    #[test]
    fn test_do_nothing_only_animates() {
        let action = EnemyAction::do_nothing("Yer aim's as crooked as yer hat.", 1.0);
        assert_eq!(action.description_text(), "");

        let timeline = action.execute(EnemyId::new(1));
        assert_eq!(timeline.action_kinds(), vec!["animation", "delay"]);
    }

    #[test]
    fn test_cover_absorbs_damage_first() {
        let mut enemy = Enemy::new(EnemyId::new(1), "outlaw", 10);
        enemy.add_cover(3);

        enemy.apply_damage(5);
        assert_eq!(enemy.cover(), 0);
        assert_eq!(enemy.health(), 8);

        enemy.apply_damage(8);
        assert_eq!(enemy.health(), 0);
        assert!(!enemy.is_alive());
    }

    #[test]
    fn test_choose_action_is_deterministic() {
        let enemy = Enemy::new(EnemyId::new(1), "outlaw", 10)
            .with_action(EnemyAction::damage_player(3, 2.0))
            .with_action(EnemyAction::add_cover(2, 1.0))
            .with_action(EnemyAction::do_nothing("Pathetic.", 0.5));

        let picks1: Vec<_> = {
            let mut rng = GameRng::new(7);
            (0..20)
                .map(|_| enemy.choose_action(&mut rng).unwrap().description_text())
                .collect()
        };
        let picks2: Vec<_> = {
            let mut rng = GameRng::new(7);
            (0..20)
                .map(|_| enemy.choose_action(&mut rng).unwrap().description_text())
                .collect()
        };

        assert_eq!(picks1, picks2);
    }

    #[test]
    fn test_choose_action_empty_pool() {
        let enemy = Enemy::new(EnemyId::new(1), "outlaw", 10);
        let mut rng = GameRng::new(1);
        assert!(enemy.choose_action(&mut rng).is_none());
    }
}

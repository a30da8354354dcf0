use rand::rngs::ThreadRng;
use rand::Rng;

use super::ai::{safe_spawn, AiTrain};
use super::coal::{random_item_cell, CoalField};
use super::collision::{self, CollisionReport};
use super::config::GameConfig;
use super::direction::Direction;
use super::powerup::{PowerUpKind, WorldPowerUp};
use super::train::Train;

/// What one simulation tick produced, for the presentation layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub collisions: CollisionReport,
    /// Rival died this tick (steering dead-end or post-move check)
    pub ai_died: bool,
    /// Rival respawned this tick
    pub ai_respawned: bool,
    /// The run has ended; the session stops advancing until `retry`
    pub game_over: bool,
}

/// One game run: every piece of simulation state, exclusively owned.
///
/// All mutation happens through `tick`, `retry`, and the input-facing
/// methods; nothing here reads a clock or global state. The driving mode
/// supplies "now" in milliseconds each tick.
#[derive(Debug)]
pub struct GameSession {
    pub config: GameConfig,
    pub train: Train,
    pub coal: CoalField,
    pub ai_train: Option<AiTrain>,
    pub world_power_ups: Vec<WorldPowerUp>,
    game_over: bool,
    rng: ThreadRng,
}

impl GameSession {
    /// Start a run: player at the canonical spot, three coal scattered,
    /// and (with `multiplayer`) a rival at a safe spawn
    pub fn new(config: GameConfig, multiplayer: bool) -> Self {
        let mut rng = rand::thread_rng();
        let train = Train::new();
        let mut coal = CoalField::new();
        coal.spawn_random(&mut rng, 3, &config);
        let ai_train = multiplayer.then(|| AiTrain::new(safe_spawn(&train.body, &config, &mut rng)));

        Self {
            config,
            train,
            coal,
            ai_train,
            world_power_ups: Vec::new(),
            game_over: false,
            rng,
        }
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Carts collected this run
    pub fn score(&self) -> u32 {
        self.train
            .len()
            .saturating_sub(self.config.initial_train_length) as u32
    }

    /// Forward a direction request to the player train (reversals are
    /// rejected by the train itself)
    pub fn set_player_direction(&mut self, dir: Direction) {
        if !self.game_over {
            self.train.set_direction(dir);
        }
    }

    /// Drop a random-kind power-up somewhere in the item band (the debug
    /// spawn trigger)
    pub fn spawn_power_up(&mut self) {
        let kind = PowerUpKind::ALL[self.rng.gen_range(0..PowerUpKind::ALL.len())];
        let pos = random_item_cell(&mut self.rng, &self.config);
        self.world_power_ups.push(WorldPowerUp { kind, pos });
    }

    /// Advance the simulation by one tick.
    ///
    /// Order: player movement (power-up expiry included), collision
    /// resolution, the global fail check, then the rival's turn (steer and
    /// move, or respawn once its deadline passes). A finished run is inert:
    /// ticking it changes nothing.
    pub fn tick(&mut self, now_ms: u64) -> TickReport {
        let mut report = TickReport::default();
        if self.game_over {
            report.game_over = true;
            return report;
        }

        self.train.update(now_ms);

        report.collisions = collision::resolve(
            &mut self.train,
            self.ai_train.as_mut(),
            &mut self.coal,
            &mut self.world_power_ups,
            &self.config,
            now_ms,
            &mut self.rng,
        );
        report.ai_died = report.collisions.ai_died;

        if report.collisions.player_died || collision::check_fail(&self.train, &self.config) {
            self.game_over = true;
        }

        if let Some(ai) = self.ai_train.as_mut() {
            if ai.alive {
                ai.advance(
                    &self.train.body,
                    &mut self.coal,
                    &self.config,
                    now_ms,
                    &mut self.rng,
                );
                if !ai.alive {
                    report.ai_died = true;
                }
            } else if ai.ready_to_respawn(now_ms) {
                let spawn = safe_spawn(&self.train.body, &self.config, &mut self.rng);
                ai.reset(spawn);
                report.ai_respawned = true;
            }
        }

        report.game_over = self.game_over;
        report
    }

    /// Reinitialize the whole run in place: player, coal, power-ups, and
    /// rival (when present) all return to their starting state
    pub fn retry(&mut self) {
        self.train.reset();
        self.coal.clear();
        self.coal.spawn_random(&mut self.rng, 3, &self.config);
        self.world_power_ups.clear();
        self.game_over = false;
        if let Some(ai) = self.ai_train.as_mut() {
            let spawn = safe_spawn(&self.train.body, &self.config, &mut self.rng);
            ai.reset(spawn);
        }
    }

    // Tutorial predicates, polled by the mode layer.

    /// The player has issued at least one direction command this run
    pub fn has_moved(&self) -> bool {
        self.train.direction.is_some()
    }

    /// The player head sits on a boundary cell
    pub fn head_on_edge(&self) -> bool {
        let head = self.train.head();
        let edge = self.config.cell_count - 1;
        head.x == 0 || head.x == edge || head.y == 0 || head.y == edge
    }

    /// The player has collected at least one coal this run
    pub fn has_grown(&self) -> bool {
        self.train.len() > self.config.initial_train_length
    }
}

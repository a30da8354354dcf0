use rand::Rng;

use super::coal::CoalField;
use super::config::GameConfig;
use super::direction::Direction;
use super::train::{Position, Train};

/// The rival train, driven by a greedy coal-seeking heuristic.
///
/// Lifecycle: `Alive` until a fatal move, then dead with a scheduled
/// respawn. Dying scatters the train's carts into the coal field, so the
/// player can harvest a defeated rival.
#[derive(Debug, Clone, PartialEq)]
pub struct AiTrain {
    pub train: Train,
    pub alive: bool,
    respawn_at_ms: u64,
}

impl AiTrain {
    /// Fresh rival at `spawn`, heading Right
    pub fn new(spawn: Position) -> Self {
        Self {
            train: Train::at(spawn, 3),
            alive: true,
            respawn_at_ms: 0,
        }
    }

    /// Reinitialize in place at a new spawn cell
    pub fn reset(&mut self, spawn: Position) {
        *self = Self::new(spawn);
    }

    /// Absolute deadline for the pending respawn; 0 when none is scheduled
    pub fn respawn_at_ms(&self) -> u64 {
        self.respawn_at_ms
    }

    /// Run one full rival tick: steer toward the nearest coal, move, then
    /// apply the post-move death checks (bounds, self, avoid-set).
    ///
    /// `avoid` is the set of cells lethal to enter, normally the player's
    /// whole body.
    pub fn advance(
        &mut self,
        avoid: &[Position],
        coal: &mut CoalField,
        config: &GameConfig,
        now_ms: u64,
        rng: &mut impl Rng,
    ) {
        if !self.alive {
            return;
        }

        if let Some(target) = self.nearest_coal(&coal.positions) {
            self.steer_towards(target, avoid, coal, config, now_ms, rng);
        }

        self.train.update(now_ms);

        let head = self.train.head();
        if !config.in_bounds(head.x, head.y) {
            self.die(coal, config, now_ms);
        } else if self.train.tail_segments().contains(&head) {
            self.die(coal, config, now_ms);
        } else if avoid.contains(&head) {
            self.die(coal, config, now_ms);
        }
    }

    fn nearest_coal(&self, coal: &[Position]) -> Option<Position> {
        let head = self.train.head();
        coal.iter()
            .copied()
            .min_by(|a, b| head.distance(*a).total_cmp(&head.distance(*b)))
    }

    /// Evaluate the four candidate directions and commit to the best one.
    ///
    /// A candidate whose resulting head hits the avoid-set or this train's
    /// own body is rejected, with one exception: continuing straight into
    /// the avoid-set is allowed (a deliberate ram into the player, trading
    /// this train's life for a game-over). Surviving candidates are scored
    /// by distance to the target plus a penalty of 1 for reversing; ties
    /// within 0.1 of the minimum are broken uniformly at random. No
    /// surviving candidate means there is no safe move and the train dies
    /// on the spot.
    fn steer_towards(
        &mut self,
        target: Position,
        avoid: &[Position],
        coal: &mut CoalField,
        config: &GameConfig,
        now_ms: u64,
        rng: &mut impl Rng,
    ) {
        let head = self.train.head();
        let current = self.train.direction;
        let mut scored: Vec<(Direction, f32)> = Vec::new();

        for option in Direction::ALL {
            let new_head = head.moved_in(option);
            let hits_avoid = avoid.contains(&new_head);
            let hits_self = self.train.body.contains(&new_head);

            if hits_avoid || hits_self {
                if hits_avoid && Some(option) == current {
                    scored.push((option, new_head.distance(target)));
                }
                continue;
            }

            let penalty = if current == Some(option.opposite()) {
                1.0
            } else {
                0.0
            };
            scored.push((option, new_head.distance(target) + penalty));
        }

        if scored.is_empty() {
            self.die(coal, config, now_ms);
            return;
        }

        let best = scored.iter().map(|s| s.1).fold(f32::INFINITY, f32::min);
        let candidates: Vec<Direction> = scored
            .iter()
            .filter(|s| (s.1 - best).abs() < 0.1)
            .map(|s| s.0)
            .collect();
        // Steering owns the direction outright; the reversal guard in
        // set_direction does not apply to the heuristic's choice
        self.train.direction = Some(candidates[rng.gen_range(0..candidates.len())]);
    }

    /// Kill the rival: scatter its carts as coal and schedule a respawn.
    /// A no-op while a respawn is already pending.
    pub fn die(&mut self, coal: &mut CoalField, config: &GameConfig, now_ms: u64) {
        if self.respawn_at_ms != 0 {
            return;
        }
        self.alive = false;
        coal.spawn_at(self.train.body.iter().copied());
        self.respawn_at_ms = now_ms + config.ai_respawn_delay_ms;
    }

    /// True once dead, scheduled, and past the deadline
    pub fn ready_to_respawn(&self, now_ms: u64) -> bool {
        !self.alive && self.respawn_at_ms > 0 && now_ms >= self.respawn_at_ms
    }
}

/// Pick a spawn cell for the rival that keeps a safe distance from every
/// player cart: up to 20 uniform draws inside the safe-margin inset, with a
/// fixed far-corner fallback.
pub fn safe_spawn(player_body: &[Position], config: &GameConfig, rng: &mut impl Rng) -> Position {
    let margin = config.ai_safe_margin;
    let n = config.cell_count;
    for _ in 0..20 {
        let x = rng.gen_range(margin + 2..=n - margin - 1);
        let y = rng.gen_range(margin..=n - margin - 1);
        let pos = Position::new(x, y);
        if player_body.iter().all(|p| pos.distance(*p) > margin as f32) {
            return pos;
        }
    }
    Position::new(n - 5, n - 5)
}

use super::direction::Direction;
use super::powerup::{PowerUp, PowerUpKind};

/// A position on the world grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by a delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Position one cell over in a direction
    pub fn moved_in(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Straight-line distance to another position
    pub fn distance(&self, other: Position) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A train on the grid: an ordered sequence of carts, head first.
///
/// Shared by the player and the rival AI. A train starts stationary
/// (`direction == None`) and only moves once a direction is set. Growth is
/// deferred: `grow` raises a flag and the next movement step prepends a new
/// head without dropping the tail.
#[derive(Debug, Clone, PartialEq)]
pub struct Train {
    /// Cart positions, head at index 0
    pub body: Vec<Position>,
    /// Current travel direction; `None` means stationary
    pub direction: Option<Direction>,
    /// Torch target stat, read by the renderer's fog pass
    pub fog_disabled: bool,
    speed: u32,
    pending_growth: bool,
    active_power_ups: Vec<PowerUp>,
}

/// Canonical player start cell
const PLAYER_START: Position = Position { x: 5, y: 10 };

impl Train {
    /// Player train at the canonical start, stationary
    pub fn new() -> Self {
        let mut train = Self::at(PLAYER_START, 3);
        train.direction = None;
        train
    }

    /// Train of `length` carts extending in -x behind `head`, heading Right
    pub fn at(head: Position, length: usize) -> Self {
        let body = (0..length as i32).map(|i| head.moved_by(-i, 0)).collect();
        Self {
            body,
            direction: Some(Direction::Right),
            fog_disabled: false,
            speed: 1,
            pending_growth: false,
            active_power_ups: Vec::new(),
        }
    }

    /// The leading cart
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Every cart behind the head
    pub fn tail_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Steps applied per tick (2 under an active SpeedBoost)
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Power-ups currently modifying this train
    pub fn active_power_ups(&self) -> &[PowerUp] {
        &self.active_power_ups
    }

    /// Request a direction change for the next tick.
    ///
    /// Silently ignored when it would reverse the current direction in one
    /// step, or when it matches the current direction. The first command of
    /// a run (from stationary) is always accepted.
    pub fn set_direction(&mut self, dir: Direction) {
        if let Some(current) = self.direction {
            if dir == current || dir == current.opposite() {
                return;
            }
        }
        self.direction = Some(dir);
    }

    /// Schedule one cart of growth. Idempotent within a tick: the flag is
    /// consumed by the first movement step that uses it.
    pub fn grow(&mut self) {
        self.pending_growth = true;
    }

    /// Advance the train by one tick: expire power-ups, then apply `speed`
    /// movement steps
    pub fn update(&mut self, now_ms: u64) {
        self.tick_power_ups(now_ms);
        for _ in 0..self.speed {
            self.step();
        }
    }

    fn step(&mut self) {
        let Some(direction) = self.direction else {
            return;
        };
        let new_head = self.head().moved_in(direction);
        self.body.insert(0, new_head);
        if self.pending_growth {
            self.pending_growth = false;
        } else {
            self.body.pop();
        }
    }

    /// Collect a power-up: apply its effect now and track it until expiry.
    ///
    /// Re-applying a kind that is already active replaces the running
    /// instance (revert, then apply fresh) rather than stacking a second
    /// copy of the effect.
    pub fn apply_power_up(&mut self, kind: PowerUpKind, now_ms: u64, duration_ms: u64) {
        if let Some(i) = self.active_power_ups.iter().position(|p| p.kind == kind) {
            let old = self.active_power_ups.remove(i);
            self.revert_effect(old.kind);
        }
        self.apply_effect(kind);
        self.active_power_ups
            .push(PowerUp::new(kind, now_ms, duration_ms));
    }

    /// Revert and drop every power-up whose duration has elapsed
    pub fn tick_power_ups(&mut self, now_ms: u64) {
        let mut i = 0;
        while i < self.active_power_ups.len() {
            if self.active_power_ups[i].expired(now_ms) {
                let expired = self.active_power_ups.remove(i);
                self.revert_effect(expired.kind);
            } else {
                i += 1;
            }
        }
    }

    /// Reinitialize to the canonical player start: 3 carts, stationary,
    /// growth flag and power-up effects cleared
    pub fn reset(&mut self) {
        *self = Train::new();
    }

    /// Reinitialize at an arbitrary head cell, heading Right
    pub fn reset_at(&mut self, head: Position, length: usize) {
        *self = Train::at(head, length);
    }

    fn apply_effect(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::SpeedBoost => self.speed = 2,
            PowerUpKind::Torch => self.fog_disabled = true,
        }
    }

    fn revert_effect(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::SpeedBoost => self.speed = 1,
            PowerUpKind::Torch => self.fog_disabled = false,
        }
    }
}

impl Default for Train {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving_train() -> Train {
        // Body [(5,10),(4,10),(3,10)] heading Right at speed 1
        Train::at(Position::new(5, 10), 3)
    }

    #[test]
    fn test_canonical_start() {
        let train = Train::new();
        assert_eq!(
            train.body,
            vec![
                Position::new(5, 10),
                Position::new(4, 10),
                Position::new(3, 10)
            ]
        );
        assert_eq!(train.direction, None);
        assert_eq!(train.speed(), 1);
        assert!(train.active_power_ups().is_empty());
    }

    #[test]
    fn test_stationary_train_does_not_move() {
        let mut train = Train::new();
        let before = train.body.clone();
        train.update(0);
        assert_eq!(train.body, before);
    }

    #[test]
    fn test_basic_move() {
        let mut train = moving_train();
        train.update(0);
        assert_eq!(
            train.body,
            vec![
                Position::new(6, 10),
                Position::new(5, 10),
                Position::new(4, 10)
            ]
        );
    }

    #[test]
    fn test_grow_then_move_extends_by_one() {
        let mut train = moving_train();
        train.grow();
        train.update(0);
        assert_eq!(
            train.body,
            vec![
                Position::new(6, 10),
                Position::new(5, 10),
                Position::new(4, 10),
                Position::new(3, 10)
            ]
        );
    }

    #[test]
    fn test_grow_is_idempotent_within_a_tick() {
        let mut train = moving_train();
        train.grow();
        train.grow();
        train.update(0);
        assert_eq!(train.len(), 4);
        train.update(0);
        assert_eq!(train.len(), 4);
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut train = moving_train();
        train.set_direction(Direction::Left);
        assert_eq!(train.direction, Some(Direction::Right));
        // Same direction is also a no-op
        train.set_direction(Direction::Right);
        assert_eq!(train.direction, Some(Direction::Right));
        // Perpendicular turns are accepted
        train.set_direction(Direction::Up);
        assert_eq!(train.direction, Some(Direction::Up));
    }

    #[test]
    fn test_first_direction_from_stationary_always_accepted() {
        let mut train = Train::new();
        train.set_direction(Direction::Left);
        assert_eq!(train.direction, Some(Direction::Left));
    }

    #[test]
    fn test_speed_boost_moves_two_cells_per_tick() {
        let mut train = moving_train();
        train.apply_power_up(PowerUpKind::SpeedBoost, 0, 5000);
        assert_eq!(train.speed(), 2);
        train.update(0);
        assert_eq!(train.head(), Position::new(7, 10));
        assert_eq!(train.len(), 3);
    }

    #[test]
    fn test_growth_consumed_once_at_speed_two() {
        let mut train = moving_train();
        train.apply_power_up(PowerUpKind::SpeedBoost, 0, 5000);
        train.grow();
        train.update(0);
        // Two steps, but only the first one grows
        assert_eq!(train.len(), 4);
    }

    #[test]
    fn test_power_up_expires_and_reverts() {
        let mut train = moving_train();
        train.apply_power_up(PowerUpKind::SpeedBoost, 1000, 5000);
        train.update(3000);
        assert_eq!(train.speed(), 2);
        train.update(6001);
        assert_eq!(train.speed(), 1);
        assert!(train.active_power_ups().is_empty());
    }

    #[test]
    fn test_reapplying_a_kind_replaces_the_running_instance() {
        let mut train = moving_train();
        train.apply_power_up(PowerUpKind::SpeedBoost, 0, 5000);
        train.apply_power_up(PowerUpKind::SpeedBoost, 4000, 5000);
        assert_eq!(train.active_power_ups().len(), 1);
        assert_eq!(train.speed(), 2);
        // Old instance's deadline passes; the fresh one keeps the effect
        train.tick_power_ups(5001);
        assert_eq!(train.speed(), 2);
        // Fresh instance expires; effect reverts exactly once
        train.tick_power_ups(9001);
        assert_eq!(train.speed(), 1);
    }

    #[test]
    fn test_torch_toggles_fog_stat() {
        let mut train = moving_train();
        assert!(!train.fog_disabled);
        train.apply_power_up(PowerUpKind::Torch, 0, 5000);
        assert!(train.fog_disabled);
        train.tick_power_ups(5001);
        assert!(!train.fog_disabled);
    }

    #[test]
    fn test_reset_restores_canonical_state() {
        let mut train = moving_train();
        train.apply_power_up(PowerUpKind::SpeedBoost, 0, 5000);
        train.grow();
        train.update(0);
        train.reset();
        assert_eq!(train, Train::new());
    }

    #[test]
    fn test_length_never_decreases_across_updates() {
        let mut train = moving_train();
        let mut previous = train.len();
        for i in 0..20 {
            if i % 3 == 0 {
                train.grow();
            }
            train.update(0);
            assert!(train.len() >= previous);
            previous = train.len();
        }
    }
}

use super::train::Position;

/// The closed set of power-up kinds.
///
/// Effects are dispatched with a `match` in `Train::apply_effect` /
/// `Train::revert_effect`, so adding a kind here forces every effect site
/// to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Doubles the train's steps per tick while active
    SpeedBoost,
    /// Suppresses the fog-of-war visibility restriction while active
    Torch,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::SpeedBoost, PowerUpKind::Torch];
}

/// A timed modifier attached to a train.
///
/// The effect is applied synchronously when the power-up is collected and
/// reverted exactly once when it expires; expiry is checked against a
/// caller-supplied "now" each tick. An expired power-up is removed from the
/// owning train's active set, never reactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub duration_ms: u64,
    pub started_at_ms: u64,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, now_ms: u64, duration_ms: u64) -> Self {
        Self {
            kind,
            duration_ms,
            started_at_ms: now_ms,
        }
    }

    /// Whether the effect's duration has elapsed at `now_ms`
    pub fn expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_at_ms) > self.duration_ms
    }
}

/// A power-up lying on the grid, waiting to be collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldPowerUp {
    pub kind: PowerUpKind,
    pub pos: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_is_strictly_after_duration() {
        let p = PowerUp::new(PowerUpKind::SpeedBoost, 1000, 5000);
        assert!(!p.expired(1000));
        assert!(!p.expired(6000)); // exactly at the deadline, still active
        assert!(p.expired(6001));
    }

    #[test]
    fn test_expiry_before_start_never_fires() {
        // A tick re-ordered behind the collection time must not expire it
        let p = PowerUp::new(PowerUpKind::Torch, 1000, 5000);
        assert!(!p.expired(0));
    }
}

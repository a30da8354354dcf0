use rand::Rng;

use super::ai::AiTrain;
use super::coal::CoalField;
use super::config::GameConfig;
use super::powerup::{PowerUpKind, WorldPowerUp};
use super::train::Train;

/// Outcome of one round of collision resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Coal collected by the player this tick
    pub player_pickups: u32,
    /// Coal collected by the rival this tick
    pub ai_pickups: u32,
    /// World power-up the player walked over, if any
    pub power_up: Option<PowerUpKind>,
    /// Player lost to a rival-body collision
    pub player_died: bool,
    /// Rival died to a player-body or head-on collision
    pub ai_died: bool,
}

/// Resolve all cross-actor collisions for one tick. Order matters and
/// mirrors the rule order of the game: coal pickups, trapped-coal cleanup,
/// power-up pickup, then the mutual train collision rules.
///
/// The global fail check (walls, self-overlap) is separate; see
/// [`check_fail`].
pub fn resolve(
    train: &mut Train,
    mut ai: Option<&mut AiTrain>,
    coal: &mut CoalField,
    world_power_ups: &mut Vec<WorldPowerUp>,
    config: &GameConfig,
    now_ms: u64,
    rng: &mut impl Rng,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    // Player picks up coal: grow and restock two
    if coal.check_pickup(train.head()) {
        train.grow();
        coal.spawn_random(rng, 2, config);
        report.player_pickups += 1;
    }

    // Rival picks up coal: grow and restock one
    if let Some(ai) = ai.as_deref_mut() {
        if ai.alive && coal.check_pickup(ai.train.head()) {
            ai.train.grow();
            coal.spawn_random(rng, 1, config);
            report.ai_pickups += 1;
        }
    }

    // Coal trapped under a non-head player cart is relocated, so pickups
    // never sit unreachable beneath the train
    for i in 1..train.body.len() {
        let cart = train.body[i];
        if coal.check_pickup(cart) {
            coal.spawn_random(rng, 1, config);
        }
    }

    // Player walks over a world power-up; first match only
    if let Some(i) = world_power_ups.iter().position(|p| p.pos == train.head()) {
        let picked = world_power_ups.remove(i);
        train.apply_power_up(picked.kind, now_ms, config.power_up_duration_ms);
        report.power_up = Some(picked.kind);
    }

    // Mutual train collision, slither-style: running into the other
    // train's tail kills you; an exact head-on kills both
    if let Some(ai) = ai {
        if ai.alive {
            let player_head = train.head();
            let ai_head = ai.train.head();

            if train.tail_segments().contains(&ai_head) {
                ai.die(coal, config, now_ms);
                report.ai_died = true;
            } else if ai.train.tail_segments().contains(&player_head) {
                report.player_died = true;
            } else if ai_head == player_head {
                report.player_died = true;
                ai.die(coal, config, now_ms);
                report.ai_died = true;
            }
        }
    }

    report
}

/// Global fail check for the player: head out of bounds, or head
/// overlapping a tail cart while the train is moving
pub fn check_fail(train: &Train, config: &GameConfig) -> bool {
    let head = train.head();
    if !config.in_bounds(head.x, head.y) {
        return true;
    }
    train.direction.is_some() && train.tail_segments().contains(&head)
}

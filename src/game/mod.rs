//! Simulation core for the train arcade game.
//!
//! Everything in here is deterministic given a direction-command stream,
//! an RNG, and a sequence of "now" timestamps: no I/O and no rendering.
//! The simulation never reads wall-clock time itself; [`GameClock`] is the
//! source the driving mode samples once per tick.

pub mod ai;
pub mod clock;
pub mod coal;
pub mod collision;
pub mod config;
pub mod direction;
pub mod powerup;
pub mod session;
pub mod train;

// Re-export commonly used types
pub use ai::AiTrain;
pub use clock::GameClock;
pub use coal::CoalField;
pub use collision::CollisionReport;
pub use config::{Difficulty, GameConfig};
pub use direction::Direction;
pub use powerup::{PowerUp, PowerUpKind, WorldPowerUp};
pub use session::{GameSession, TickReport};
pub use train::{Position, Train};

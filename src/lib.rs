//! Perkmandelc - a grid-based train arcade game
//!
//! Steer a growing train around a 40x40 grid, collecting coal while
//! avoiding the walls, your own carts, and a rival AI train that hunts the
//! same coal. This library provides:
//! - Simulation core (game module): trains, coal, power-ups, the rival
//!   heuristic, and per-tick collision resolution
//! - TUI rendering (render module)
//! - Keyboard input mapping (input module)
//! - Save-file persistence for high score and tutorial flag (persist)
//! - Session metrics (metrics module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod persist;
pub mod render;

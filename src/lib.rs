//! Cowboys vs Aliens: a two-level slingshot physics game.
//!
//! Pull the star back on its sling, let go, and knock every alien target off
//! its flying-saucer platform before the tries run out.

pub mod config;
pub mod constants;
pub mod error;
pub mod graphics;
pub mod hud;
pub mod launch;
pub mod level;
pub mod menu;
pub mod motion;
pub mod outcome;
pub mod pointer;
pub mod simulation;
pub mod tracker;
pub mod world;

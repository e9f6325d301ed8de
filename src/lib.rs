//! Asteroid Defense: a frame-driven arcade shooter.
//!
//! `compute` holds the simulation, `scene` turns a state into surface-agnostic
//! draw commands, and `display` rasterises those onto a terminal.

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod input;
pub mod scene;

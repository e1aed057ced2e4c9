//! Macroquad frontend for Kindling.
//!
//! The window is a thin adapter around [`kd_simulation::Simulation`]: the
//! keyboard is read through [`input::KeyboardInput`], one simulation step
//! runs per frame, and [`render`] and [`hud`] draw the post-tick state.

pub mod app;
pub mod hud;
pub mod input;
pub mod render;
pub mod theme;

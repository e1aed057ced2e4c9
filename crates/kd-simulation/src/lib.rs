//! Frame-driven survival simulation for Kindling.
//!
//! A [`Simulation`] owns the [`kd_core::WorldState`] and advances it one tick
//! per rendered frame. Each tick samples an [`InputSource`], turns it into a
//! [`TickIntent`], and runs the registered systems in order: movement,
//! actions (chop, mine, craft), foraging (berries, water, campfires), vitals
//! (decay and health loss), and spawning. Entities consumed during the tick
//! are compacted out of the registry once every system has run.

/// Simulation clock: tick counter and clamped frame time.
pub mod clock;
/// Configuration types for simulation runs.
pub mod config;
/// Mutable context passed to systems each tick.
pub mod context;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// Input sampling: held actions, the craft latch, and per-tick intent.
pub mod input;
/// Uniform random placement helpers for resource entities.
pub mod placement;
/// Named tuning profiles.
pub mod profile;
/// Top-level simulation orchestrator.
pub mod simulation;
/// The trait that all simulation systems implement.
pub mod system;
/// The built-in systems.
pub mod systems;

/// Re-export of [`clock::SimClock`].
pub use clock::SimClock;
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-export of [`context::SimContext`].
pub use context::SimContext;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-exports of the input types.
pub use input::{Action, ActionState, CraftLatch, InputSource, TickIntent};
/// Re-export of [`profile::TuningProfile`].
pub use profile::TuningProfile;
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
/// Re-export of [`system::System`].
pub use system::System;

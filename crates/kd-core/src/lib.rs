//! Core types for Kindling: geometry, resource entities, the player, and the world state.
//!
//! This crate holds data only. The per-frame rules that mutate it live in
//! `kd-simulation`; renderers and HUDs read it through [`WorldState`] and
//! [`HudSnapshot`].

/// Stable-id storage with deferred removal.
pub mod arena;
/// Resource entity records and identifiers.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// 2D vectors and world bounds.
pub mod geometry;
/// Player stats, inventory, and body.
pub mod player;
/// Typed collections of every resource entity in the world.
pub mod registry;
/// The complete mutable game state.
pub mod world;

/// Re-export entity types.
pub use entity::{Berry, Campfire, EntityId, ResourceKind, Rock, Tree, WaterPool};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export geometry types.
pub use geometry::{Bounds, Vec2};
/// Re-export player types.
pub use player::{Inventory, Material, Player, STAT_MAX, Stat, Vitals};
/// Re-export the registry.
pub use registry::Registry;
/// Re-export world state types.
pub use world::{HudSnapshot, WorldState};

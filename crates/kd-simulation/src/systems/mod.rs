//! The built-in systems, listed in the order a tick runs them.

/// Chop, mine, and craft.
pub mod actions;
/// Berries, water, and campfires.
pub mod forage;
/// Player movement integration.
pub mod movement;
/// Initial population and respawn.
pub mod spawning;
/// Stat decay, health loss, and incapacitation.
pub mod vitals;

pub use actions::ActionSystem;
pub use forage::ForageSystem;
pub use movement::MovementSystem;
pub use spawning::SpawnSystem;
pub use vitals::VitalsSystem;

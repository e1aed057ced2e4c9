//! Uniform random placement for resource entities.
//!
//! Every draw goes through the caller's RNG so a seeded run places the same
//! entities in the same spots.

use kd_core::{Bounds, EntityId, Registry, ResourceKind, Vec2};
use rand::Rng;

use crate::profile::TuningProfile;

/// A uniform draw from `lo..hi`. An empty or inverted range yields its
/// midpoint without touching the RNG.
pub fn uniform(rng: &mut impl Rng, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        (lo + hi) / 2.0
    }
}

/// A point at least `inset` from every edge of `bounds`.
pub fn random_position(rng: &mut impl Rng, bounds: Bounds, inset: f64) -> Vec2 {
    let x = uniform(rng, inset, bounds.width - inset);
    let y = uniform(rng, inset, bounds.height - inset);
    Vec2::new(x, y)
}

/// An offset in `-radius..radius` on each axis. Zero radius means no offset.
pub fn jitter(rng: &mut impl Rng, radius: f64) -> Vec2 {
    if radius <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(uniform(rng, -radius, radius), uniform(rng, -radius, radius))
}

/// Spawn one entity of `kind` at a random position. Campfires are never
/// spawned this way and return `None`.
pub fn spawn_one(
    registry: &mut Registry,
    kind: ResourceKind,
    rng: &mut impl Rng,
    bounds: Bounds,
    profile: &TuningProfile,
) -> Option<EntityId> {
    let rule = profile.spawn.rule(kind)?;
    let position = random_position(rng, bounds, rule.inset);
    let id = match kind {
        ResourceKind::Tree => registry.spawn_tree(position, profile.actions.tree_hp),
        ResourceKind::Rock => registry.spawn_rock(position, profile.actions.rock_hp),
        ResourceKind::Berry => registry.spawn_berry(position),
        ResourceKind::Water => {
            let table = &profile.spawn;
            let radius = uniform(rng, table.water_radius_min, table.water_radius_max);
            registry.spawn_water(position, radius)
        }
        ResourceKind::Campfire => return None,
    };
    Some(id)
}

/// Bulk-spawn the initial population of every kind.
pub fn populate(
    registry: &mut Registry,
    rng: &mut impl Rng,
    bounds: Bounds,
    profile: &TuningProfile,
) -> Vec<(ResourceKind, EntityId)> {
    let mut spawned = Vec::new();
    for kind in [
        ResourceKind::Tree,
        ResourceKind::Rock,
        ResourceKind::Berry,
        ResourceKind::Water,
    ] {
        let initial = profile.spawn.rule(kind).map_or(0, |r| r.initial);
        for _ in 0..initial {
            if let Some(id) = spawn_one(registry, kind, rng, bounds, profile) {
                spawned.push((kind, id));
            }
        }
    }
    spawned
}

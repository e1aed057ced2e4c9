use kd_core::{Stat, WorldState};
use tracing::debug;

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::profile::SurvivalTuning;
use crate::system::System;

/// Per-tick proximity effects: eating berries, drinking from pools, and
/// warming at campfires.
///
/// Overlapping sources stack, and all of them keep working while the player
/// is down. Berries are skipped on ticks that cover no time.
#[derive(Debug, Default)]
pub struct ForageSystem;

impl ForageSystem {
    /// Create the system.
    pub fn new() -> Self {
        Self
    }
}

/// Thirst restored per second at the player's position.
pub fn water_rate(state: &WorldState, tuning: &SurvivalTuning) -> f64 {
    let pools = state
        .registry
        .waters
        .values()
        .filter(|w| state.player.distance_to(w.position) < w.radius + tuning.water_margin)
        .count();
    pools as f64 * tuning.water_thirst_rate
}

/// Health restored per second at the player's position.
pub fn campfire_rate(state: &WorldState, tuning: &SurvivalTuning) -> f64 {
    let fires = state
        .registry
        .campfires
        .values()
        .filter(|f| state.player.distance_to(f.position) < tuning.campfire_radius)
        .count();
    fires as f64 * tuning.campfire_heal_rate
}

impl System for ForageSystem {
    fn name(&self) -> &str {
        "forage"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let dt = ctx.dt();
        let profile = ctx.profile;
        let tuning = &profile.survival;

        if dt > 0.0 {
            let player = &ctx.state.player;
            let radius = player.reach * tuning.berry_pickup_factor;
            let eaten: Vec<_> = ctx
                .state
                .registry
                .berries
                .iter()
                .filter(|(_, b)| player.distance_to(b.position) < radius)
                .map(|(id, _)| id)
                .collect();
            for berry in eaten {
                ctx.state.registry.berries.mark_removed(berry)?;
                ctx.state
                    .player
                    .vitals
                    .restore(Stat::Hunger, tuning.berry_hunger);
                debug!(tick = ctx.tick(), %berry, "berry eaten");
                ctx.emit(SimEventKind::BerryEaten { berry }, format!("berry {berry} eaten"));
            }
        }

        let drink = water_rate(ctx.state, tuning) * dt;
        ctx.state.player.vitals.restore(Stat::Thirst, drink);

        let heal = campfire_rate(ctx.state, tuning) * dt;
        ctx.state.player.vitals.restore(Stat::Health, heal);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

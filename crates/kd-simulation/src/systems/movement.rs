use kd_core::{Bounds, Player, STAT_MAX, Vec2};
use tracing::trace;

use crate::context::SimContext;
use crate::error::SimResult;
use crate::profile::PlayerTuning;
use crate::system::System;

/// Move the player along `direction` for `dt` seconds, then clamp into the
/// world margins.
///
/// Well-fed players move faster: the speed bonus is `hunger / 100`, capped
/// at `hunger_speed_bonus_cap`. Nothing carries over between calls.
pub fn apply_movement_intent(
    player: &mut Player,
    bounds: Bounds,
    direction: Vec2,
    dt: f64,
    tuning: &PlayerTuning,
) {
    let direction = direction.normalized_or_zero();
    let bonus = (player.vitals.hunger() / STAT_MAX).min(tuning.hunger_speed_bonus_cap);
    let step = player.speed * (1.0 + bonus) * dt.max(0.0) * tuning.frame_rate_scale;
    player.position = bounds.clamp_with_margin(player.position + direction * step, tuning.margin);
}

/// Integrates the sampled movement direction.
#[derive(Debug, Default)]
pub struct MovementSystem;

impl MovementSystem {
    /// Create the system.
    pub fn new() -> Self {
        Self
    }
}

impl System for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let direction = if ctx.state.player.is_incapacitated() {
            Vec2::ZERO
        } else {
            ctx.intent.direction
        };
        let dt = ctx.dt();
        let bounds = ctx.state.bounds;
        apply_movement_intent(
            &mut ctx.state.player,
            bounds,
            direction,
            dt,
            &ctx.profile.player,
        );
        trace!(tick = ctx.tick(), position = %ctx.state.player.position, "moved");
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

use kd_core::{Player, Stat};
use tracing::{info, warn};

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::profile::SurvivalTuning;
use crate::system::System;

/// Decay hunger and thirst for `dt` seconds, then take health while either
/// is empty. Returns the stats that reached zero during this call.
pub fn decay_vitals(player: &mut Player, dt: f64, tuning: &SurvivalTuning) -> Vec<Stat> {
    let dt = dt.max(0.0);
    let vitals = &mut player.vitals;
    let before = [Stat::Hunger, Stat::Thirst, Stat::Health].map(|s| vitals.is_depleted(s));

    vitals.deplete(Stat::Hunger, tuning.hunger_decay * dt);
    vitals.deplete(Stat::Thirst, tuning.thirst_decay * dt);

    let starving = vitals.is_depleted(Stat::Hunger);
    let parched = vitals.is_depleted(Stat::Thirst);
    if starving || parched {
        let multiplier = if starving && parched {
            tuning.double_deficit_multiplier
        } else {
            tuning.single_deficit_multiplier
        };
        vitals.deplete(Stat::Health, tuning.health_loss_rate * dt * multiplier);
    }

    [Stat::Hunger, Stat::Thirst, Stat::Health]
        .into_iter()
        .zip(before)
        .filter(|(s, was)| !was && vitals.is_depleted(*s))
        .map(|(s, _)| s)
        .collect()
}

/// Runs decay and health loss, and reports each time health runs out.
#[derive(Debug, Default)]
pub struct VitalsSystem {
    down: bool,
}

impl VitalsSystem {
    /// Create the system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if health was at zero at the end of the last tick.
    pub fn is_down(&self) -> bool {
        self.down
    }
}

impl System for VitalsSystem {
    fn name(&self) -> &str {
        "vitals"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let dt = ctx.dt();
        let profile = ctx.profile;
        let depleted = decay_vitals(&mut ctx.state.player, dt, &profile.survival);
        for &stat in &depleted {
            info!(tick = ctx.tick(), %stat, "stat depleted");
            ctx.emit(SimEventKind::StatDepleted { stat }, format!("{stat} ran out"));
        }
        let down = ctx.state.player.is_incapacitated();
        if down && (!self.down || depleted.contains(&Stat::Health)) {
            warn!(tick = ctx.tick(), "player incapacitated");
            ctx.emit(SimEventKind::Incapacitated, "the survivor collapsed");
        } else if !down && self.down {
            info!(tick = ctx.tick(), "player back on their feet");
        }
        self.down = down;
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

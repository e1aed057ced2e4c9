use kd_core::ResourceKind;
use rand::Rng;
use tracing::{debug, info};

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::placement::{populate, spawn_one};
use crate::system::System;

/// Order in which respawn rolls are made each tick.
pub const RESPAWN_ORDER: [ResourceKind; 4] = [
    ResourceKind::Berry,
    ResourceKind::Tree,
    ResourceKind::Rock,
    ResourceKind::Water,
];

/// Populates the world on init and tops it up each tick.
///
/// For every kind below its threshold, one entity appears with probability
/// `dt * rate`. Counts are taken after the tick's removals were marked, so a
/// tree felled this tick already counts as gone.
#[derive(Debug, Default)]
pub struct SpawnSystem {
    respawned: u64,
}

impl SpawnSystem {
    /// Create the system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities added by respawn so far (initial population excluded).
    pub fn respawned(&self) -> u64 {
        self.respawned
    }
}

impl System for SpawnSystem {
    fn name(&self) -> &str {
        "spawning"
    }

    fn init(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let bounds = ctx.state.bounds;
        let spawned = populate(&mut ctx.state.registry, ctx.rng, bounds, ctx.profile);
        info!(entities = spawned.len(), "world populated");
        for (kind, entity) in spawned {
            ctx.emit(
                SimEventKind::Spawned { kind, entity },
                format!("{kind} {entity} placed"),
            );
        }
        Ok(())
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let dt = ctx.dt();
        if dt <= 0.0 {
            return Ok(());
        }
        let bounds = ctx.state.bounds;
        let profile = ctx.profile;
        for kind in RESPAWN_ORDER {
            let Some(rule) = profile.spawn.rule(kind) else {
                continue;
            };
            if ctx.state.registry.count(kind) >= rule.threshold {
                continue;
            }
            if ctx.rng.random::<f64>() >= dt * rule.rate {
                continue;
            }
            if let Some(entity) =
                spawn_one(&mut ctx.state.registry, kind, ctx.rng, bounds, profile)
            {
                self.respawned += 1;
                debug!(tick = ctx.tick(), %kind, %entity, "respawned");
                ctx.emit(
                    SimEventKind::Spawned { kind, entity },
                    format!("{kind} {entity} respawned"),
                );
            }
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

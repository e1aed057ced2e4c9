use kd_core::arena::Arena;
use kd_core::entity::{Breakable, Positioned};
use kd_core::{CoreResult, EntityId, Material, Vec2, WorldState};
use rand::Rng;
use tracing::{debug, info};

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::placement::jitter;
use crate::profile::ActionTuning;
use crate::system::System;

/// Hit every live entity strictly closer than `reach` to `origin`. Entities
/// that run out of hit points are marked for removal and returned.
pub fn strike<T>(arena: &mut Arena<T>, origin: Vec2, reach: f64) -> CoreResult<Vec<EntityId>>
where
    T: Breakable + Positioned,
{
    let mut depleted = Vec::new();
    for (id, entity) in arena.iter_mut() {
        if origin.distance(entity.position()) < reach && entity.hit() {
            depleted.push(id);
        }
    }
    for id in &depleted {
        arena.mark_removed(*id)?;
    }
    Ok(depleted)
}

/// Spend the campfire cost and place a campfire near the player.
///
/// Returns `None`, leaving the inventory untouched, when the player cannot
/// afford it. The campfire lands within `campfire_jitter` of the player on
/// each axis, clamped into the world.
pub fn craft_campfire(
    state: &mut WorldState,
    rng: &mut impl Rng,
    tuning: &ActionTuning,
) -> Option<EntityId> {
    if !state
        .player
        .inventory
        .try_spend(tuning.craft_wood_cost, tuning.craft_stone_cost)
    {
        return None;
    }
    let offset = jitter(rng, tuning.campfire_jitter);
    let position = state
        .bounds
        .clamp_with_margin(state.player.position + offset, 0.0);
    Some(state.registry.spawn_campfire(position))
}

/// Resolves chop, mine, and craft.
///
/// Chop and mine hit once per tick while held, or once per `hit_interval`
/// seconds when the profile sets one. Neither acts on a tick that covers no
/// time. Craft resolves whenever the latch fired, even at `dt = 0`.
#[derive(Debug, Default)]
pub struct ActionSystem {
    chop_cooldown: f64,
    mine_cooldown: f64,
}

impl ActionSystem {
    /// Create the system with both cooldowns ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds until chop may hit again.
    pub fn chop_cooldown(&self) -> f64 {
        self.chop_cooldown
    }

    /// Seconds until mine may hit again.
    pub fn mine_cooldown(&self) -> f64 {
        self.mine_cooldown
    }
}

/// Advance a cooldown and report whether a held action may hit this tick.
fn ready(cooldown: &mut f64, held: bool, dt: f64, interval: f64) -> bool {
    if !held {
        *cooldown = 0.0;
        return false;
    }
    if dt <= 0.0 {
        return false;
    }
    *cooldown -= dt;
    if *cooldown > 0.0 {
        return false;
    }
    *cooldown = interval;
    true
}

impl System for ActionSystem {
    fn name(&self) -> &str {
        "actions"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let dt = ctx.dt();
        let interval = ctx.profile.actions.hit_interval;
        let origin = ctx.state.player.position;
        let reach = ctx.state.player.reach;

        if ready(&mut self.chop_cooldown, ctx.intent.chop, dt, interval) {
            for tree in strike(&mut ctx.state.registry.trees, origin, reach)? {
                ctx.state.player.inventory.credit(Material::Wood, 1);
                debug!(tick = ctx.tick(), %tree, "tree felled");
                ctx.emit(SimEventKind::TreeFelled { tree }, format!("tree {tree} felled, +1 wood"));
            }
        }

        if ready(&mut self.mine_cooldown, ctx.intent.mine, dt, interval) {
            for rock in strike(&mut ctx.state.registry.rocks, origin, reach)? {
                ctx.state.player.inventory.credit(Material::Stone, 1);
                debug!(tick = ctx.tick(), %rock, "rock broken");
                ctx.emit(SimEventKind::RockBroken { rock }, format!("rock {rock} broken, +1 stone"));
            }
        }

        if ctx.intent.craft {
            match craft_campfire(ctx.state, ctx.rng, &ctx.profile.actions) {
                Some(campfire) => {
                    info!(tick = ctx.tick(), %campfire, "campfire crafted");
                    ctx.emit(
                        SimEventKind::CampfireCrafted { campfire },
                        format!("campfire {campfire} crafted"),
                    );
                }
                None => {
                    let inventory = &ctx.state.player.inventory;
                    let (wood, stone) = (inventory.wood, inventory.stone);
                    debug!(tick = ctx.tick(), wood, stone, "craft rejected");
                    ctx.emit(
                        SimEventKind::CraftRejected { wood, stone },
                        format!("not enough materials for a campfire (wood {wood}, stone {stone})"),
                    );
                }
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

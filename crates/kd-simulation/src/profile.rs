//! Named tuning profiles.
//!
//! Every constant the tick consults lives here rather than in the systems, so
//! alternative balances are data, not forks. Two presets ship built in:
//! [`TuningProfile::classic`] and [`TuningProfile::brisk`]. Profiles
//! serialize to JSON for the CLI's `--profile-file`.

use std::path::Path;

use kd_core::ResourceKind;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// A complete set of balance constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningProfile {
    /// Lookup name.
    pub name: String,
    /// Player body and movement.
    pub player: PlayerTuning,
    /// Decay, damage, and regeneration.
    pub survival: SurvivalTuning,
    /// Chop, mine, and craft.
    pub actions: ActionTuning,
    /// Initial population and respawn policy.
    pub spawn: SpawnTable,
}

/// Player body and movement constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTuning {
    /// Collision radius.
    pub size: f64,
    /// Base speed in units per normalized frame.
    pub speed: f64,
    /// Chop/mine radius.
    pub reach: f64,
    /// Distance kept from every world edge (half the visual footprint).
    pub margin: f64,
    /// Upper bound on the well-fed speed bonus, as a fraction of base speed.
    pub hunger_speed_bonus_cap: f64,
    /// Frames per second the per-frame speed was tuned at.
    pub frame_rate_scale: f64,
}

/// Per-second decay and regeneration constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurvivalTuning {
    /// Hunger lost per second.
    pub hunger_decay: f64,
    /// Thirst lost per second.
    pub thirst_decay: f64,
    /// Health lost per second while starving or dehydrated, before the multiplier.
    pub health_loss_rate: f64,
    /// Multiplier when exactly one of hunger/thirst is empty.
    pub single_deficit_multiplier: f64,
    /// Multiplier when both are empty.
    pub double_deficit_multiplier: f64,
    /// Hunger restored per berry.
    pub berry_hunger: f64,
    /// Berry pickup radius as a fraction of reach.
    pub berry_pickup_factor: f64,
    /// Extra distance beyond a pool's radius that still counts as in the water.
    pub water_margin: f64,
    /// Thirst restored per second per pool.
    pub water_thirst_rate: f64,
    /// Distance within which a campfire heals.
    pub campfire_radius: f64,
    /// Health restored per second per campfire.
    pub campfire_heal_rate: f64,
}

/// Action constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTuning {
    /// Wood consumed by one campfire.
    pub craft_wood_cost: u32,
    /// Stone consumed by one campfire.
    pub craft_stone_cost: u32,
    /// Max offset on each axis between the player and a new campfire.
    pub campfire_jitter: f64,
    /// Hit points of a fresh tree.
    pub tree_hp: u32,
    /// Hit points of a fresh rock.
    pub rock_hp: u32,
    /// Minimum seconds between hits while chop/mine is held. Zero means one
    /// hit every tick.
    #[serde(default)]
    pub hit_interval: f64,
}

/// Population policy for one resource kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    /// Spawned at world initialization.
    pub initial: usize,
    /// Respawn is attempted only while fewer than this many exist.
    pub threshold: usize,
    /// Respawn chance per second.
    pub rate: f64,
    /// Distance from the world edges that spawn positions keep.
    pub inset: f64,
}

/// Spawn rules for every naturally occurring kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTable {
    /// Trees.
    pub trees: SpawnRule,
    /// Rocks.
    pub rocks: SpawnRule,
    /// Berries.
    pub berries: SpawnRule,
    /// Water pools.
    pub waters: SpawnRule,
    /// Smallest water pool radius.
    pub water_radius_min: f64,
    /// Largest water pool radius.
    pub water_radius_max: f64,
}

impl SpawnTable {
    /// The rule for a kind. Campfires are only ever crafted.
    pub fn rule(&self, kind: ResourceKind) -> Option<&SpawnRule> {
        match kind {
            ResourceKind::Tree => Some(&self.trees),
            ResourceKind::Rock => Some(&self.rocks),
            ResourceKind::Berry => Some(&self.berries),
            ResourceKind::Water => Some(&self.waters),
            ResourceKind::Campfire => None,
        }
    }

    fn rules_mut(&mut self) -> [&mut SpawnRule; 4] {
        [
            &mut self.trees,
            &mut self.rocks,
            &mut self.berries,
            &mut self.waters,
        ]
    }
}

impl Default for TuningProfile {
    fn default() -> Self {
        Self::classic()
    }
}

impl TuningProfile {
    /// The default balance.
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            player: PlayerTuning {
                size: 20.0,
                speed: 3.6,
                reach: 64.0,
                margin: 12.0,
                hunger_speed_bonus_cap: 0.6,
                frame_rate_scale: 60.0,
            },
            survival: SurvivalTuning {
                hunger_decay: 6.0,
                thirst_decay: 9.0,
                health_loss_rate: 6.0,
                single_deficit_multiplier: 0.6,
                double_deficit_multiplier: 1.2,
                berry_hunger: 22.0,
                berry_pickup_factor: 0.7,
                water_margin: 6.0,
                water_thirst_rate: 30.0,
                campfire_radius: 72.0,
                campfire_heal_rate: 8.0,
            },
            actions: ActionTuning {
                craft_wood_cost: 2,
                craft_stone_cost: 1,
                campfire_jitter: 40.0,
                tree_hp: 2,
                rock_hp: 3,
                hit_interval: 0.0,
            },
            spawn: SpawnTable {
                trees: SpawnRule {
                    initial: 12,
                    threshold: 6,
                    rate: 0.2,
                    inset: 40.0,
                },
                rocks: SpawnRule {
                    initial: 10,
                    threshold: 5,
                    rate: 0.2,
                    inset: 40.0,
                },
                berries: SpawnRule {
                    initial: 24,
                    threshold: 10,
                    rate: 0.9,
                    inset: 20.0,
                },
                waters: SpawnRule {
                    initial: 5,
                    threshold: 3,
                    rate: 0.03,
                    inset: 80.0,
                },
                water_radius_min: 28.0,
                water_radius_max: 56.0,
            },
        }
    }

    /// A harsher balance: slower base movement with a smaller well-fed bonus,
    /// faster decay, and resources that top up earlier.
    pub fn brisk() -> Self {
        let mut profile = Self::classic();
        profile.name = "brisk".to_string();
        profile.player.speed = 3.0;
        profile.player.reach = 60.0;
        profile.player.hunger_speed_bonus_cap = 0.4;
        profile.survival.hunger_decay = 7.5;
        profile.survival.thirst_decay = 11.0;
        profile.survival.berry_hunger = 20.0;
        profile.spawn.trees.threshold = 8;
        profile.spawn.trees.rate = 0.3;
        profile.spawn.rocks.threshold = 6;
        profile.spawn.rocks.rate = 0.25;
        profile.spawn.berries.threshold = 14;
        profile.spawn.berries.rate = 1.2;
        profile.spawn.waters.threshold = 4;
        profile.spawn.waters.rate = 0.05;
        profile
    }

    /// All built-in profiles.
    pub fn builtin() -> Vec<Self> {
        vec![Self::classic(), Self::brisk()]
    }

    /// Look up a built-in profile by name (case-insensitive).
    pub fn by_name(name: &str) -> SimResult<Self> {
        Self::builtin()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| SimError::UnknownProfile(name.to_string()))
    }

    /// Parse a profile from JSON and validate it.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Read a profile from a JSON file.
    pub fn load(path: &Path) -> SimResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| SimError::ProfileIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Disable both the initial population and respawning.
    pub fn without_spawning(mut self) -> Self {
        for rule in self.spawn.rules_mut() {
            rule.initial = 0;
            rule.rate = 0.0;
        }
        self
    }

    /// Check that every constant is usable.
    pub fn validate(&self) -> SimResult<()> {
        let p = &self.player;
        non_negative("player.size", p.size)?;
        non_negative("player.speed", p.speed)?;
        non_negative("player.reach", p.reach)?;
        non_negative("player.margin", p.margin)?;
        non_negative("player.hunger_speed_bonus_cap", p.hunger_speed_bonus_cap)?;
        non_negative("player.frame_rate_scale", p.frame_rate_scale)?;

        let s = &self.survival;
        for (field, value) in [
            ("survival.hunger_decay", s.hunger_decay),
            ("survival.thirst_decay", s.thirst_decay),
            ("survival.health_loss_rate", s.health_loss_rate),
            ("survival.single_deficit_multiplier", s.single_deficit_multiplier),
            ("survival.double_deficit_multiplier", s.double_deficit_multiplier),
            ("survival.berry_hunger", s.berry_hunger),
            ("survival.berry_pickup_factor", s.berry_pickup_factor),
            ("survival.water_margin", s.water_margin),
            ("survival.water_thirst_rate", s.water_thirst_rate),
            ("survival.campfire_radius", s.campfire_radius),
            ("survival.campfire_heal_rate", s.campfire_heal_rate),
        ] {
            non_negative(field, value)?;
        }

        let a = &self.actions;
        if a.craft_wood_cost == 0 && a.craft_stone_cost == 0 {
            return Err(SimError::InvalidConfig(
                "a campfire must cost at least one material".to_string(),
            ));
        }
        if a.tree_hp == 0 || a.rock_hp == 0 {
            return Err(SimError::InvalidConfig(
                "trees and rocks need at least one hit point".to_string(),
            ));
        }
        non_negative("actions.campfire_jitter", a.campfire_jitter)?;
        non_negative("actions.hit_interval", a.hit_interval)?;

        let t = &self.spawn;
        for (field, rule) in [
            ("spawn.trees", &t.trees),
            ("spawn.rocks", &t.rocks),
            ("spawn.berries", &t.berries),
            ("spawn.waters", &t.waters),
        ] {
            non_negative(&format!("{field}.rate"), rule.rate)?;
            non_negative(&format!("{field}.inset"), rule.inset)?;
        }
        non_negative("spawn.water_radius_min", t.water_radius_min)?;
        if t.water_radius_max < t.water_radius_min {
            return Err(SimError::InvalidConfig(
                "spawn.water_radius_max is below spawn.water_radius_min".to_string(),
            ));
        }
        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(format!(
            "{field} must be a finite non-negative number, got {value}"
        )))
    }
}

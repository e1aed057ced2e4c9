use kd_core::{HudSnapshot, Player, WorldState};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::EventLog;
use crate::input::{CraftLatch, InputSource, TickIntent};
use crate::profile::TuningProfile;
use crate::system::System;
use crate::systems::{ActionSystem, ForageSystem, MovementSystem, SpawnSystem, VitalsSystem};

/// The top-level simulation orchestrator.
///
/// Owns the world state, clock, RNG, craft latch, event log, and registered
/// systems. Each [`step`](Self::step) samples input, runs every system in
/// registration order, then compacts entities removed during the tick.
pub struct Simulation {
    state: WorldState,
    clock: SimClock,
    rng: StdRng,
    events: EventLog,
    latch: CraftLatch,
    intent: TickIntent,
    profile: TuningProfile,
    systems: Vec<Box<dyn System>>,
    initialized: bool,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.clock.tick())
            .field("profile", &self.profile.name)
            .field("systems", &self.systems.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Create a simulation with an empty world and no systems. The player
    /// starts at the center with full stats.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let tuning = &config.profile.player;
        let player = Player::new(
            config.bounds.center(),
            tuning.size,
            tuning.speed,
            tuning.reach,
        );
        let state = WorldState::new(config.bounds, player)?;
        Ok(Self {
            state,
            clock: SimClock::new(config.max_dt),
            rng: StdRng::seed_from_u64(config.seed),
            events: EventLog::new(config.max_events),
            latch: CraftLatch::new(),
            intent: TickIntent::idle(),
            profile: config.profile,
            systems: Vec::new(),
            initialized: false,
        })
    }

    /// Create a simulation with the built-in systems registered in tick
    /// order: movement, actions, forage, vitals, spawning.
    pub fn with_default_systems(config: SimConfig) -> SimResult<Self> {
        let mut sim = Self::new(config)?;
        sim.add_system(MovementSystem::new());
        sim.add_system(ActionSystem::new());
        sim.add_system(ForageSystem::new());
        sim.add_system(VitalsSystem::new());
        sim.add_system(SpawnSystem::new());
        Ok(sim)
    }

    /// Register a system. Systems are ticked in registration order.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.push(Box::new(system));
    }

    /// Initialize all registered systems. Runs once; later calls are no-ops.
    pub fn init(&mut self) -> SimResult<()> {
        if self.initialized {
            return Ok(());
        }
        for i in 0..self.systems.len() {
            let mut system = std::mem::replace(&mut self.systems[i], Box::new(NoopSystem));
            let mut ctx = SimContext {
                state: &mut self.state,
                clock: &self.clock,
                events: &mut self.events,
                rng: &mut self.rng,
                intent: &self.intent,
                profile: &self.profile,
            };
            system.init(&mut ctx)?;
            self.systems[i] = system;
        }
        self.initialized = true;
        info!(
            profile = %self.profile.name,
            entities = self.state.registry.total(),
            "simulation initialized"
        );
        Ok(())
    }

    /// Advance the simulation by one tick of `raw_dt` seconds, sampling
    /// `input` first. Returns the clamped `dt` actually integrated.
    pub fn step(&mut self, input: &dyn InputSource, raw_dt: f64) -> SimResult<f64> {
        if !self.initialized {
            self.init()?;
        }

        let dt = self.clock.advance(raw_dt);
        let mut intent = TickIntent::sample(input, &mut self.latch);
        if self.state.player.is_incapacitated() {
            intent = intent.without_movement();
        }
        self.intent = intent;

        for i in 0..self.systems.len() {
            let mut system = std::mem::replace(&mut self.systems[i], Box::new(NoopSystem));
            let mut ctx = SimContext {
                state: &mut self.state,
                clock: &self.clock,
                events: &mut self.events,
                rng: &mut self.rng,
                intent: &self.intent,
                profile: &self.profile,
            };
            system.tick(&mut ctx)?;
            self.systems[i] = system;
        }

        let removed = self.state.registry.compact();
        if !removed.is_empty() {
            debug!(tick = self.clock.tick(), removed = removed.len(), "compacted registry");
        }
        Ok(dt)
    }

    /// Advance `n` ticks of `dt` seconds with the same input held throughout.
    pub fn run(&mut self, n: u64, input: &dyn InputSource, dt: f64) -> SimResult<()> {
        for _ in 0..n {
            self.step(input, dt)?;
        }
        Ok(())
    }

    /// The world state as of the last completed tick.
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// Mutable world state, for setting up scenarios between ticks.
    pub fn state_mut(&mut self) -> &mut WorldState {
        &mut self.state
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn profile(&self) -> &TuningProfile {
        &self.profile
    }

    /// The intent sampled for the last tick.
    pub fn intent(&self) -> &TickIntent {
        &self.intent
    }

    /// Integer HUD values for the current state.
    pub fn hud(&self) -> HudSnapshot {
        self.state.hud()
    }

    /// Access a system by downcasting to a concrete type.
    pub fn get_system<T: System + 'static>(&self) -> Option<&T> {
        self.systems
            .iter()
            .find_map(|s| s.as_any().downcast_ref::<T>())
    }

    /// Access a system mutably by downcasting to a concrete type.
    pub fn get_system_mut<T: System + 'static>(&mut self) -> Option<&mut T> {
        self.systems
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<T>())
    }

    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Extract the world state, consuming the simulation.
    pub fn into_state(self) -> WorldState {
        self.state
    }
}

/// Placeholder system used during the swap-and-tick pattern.
#[derive(Debug)]
struct NoopSystem;

impl System for NoopSystem {
    fn name(&self) -> &str {
        "noop"
    }
    fn tick(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
        Ok(())
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::event::SimEventKind;
    use crate::input::{Action, ActionState};
    use kd_core::ResourceKind;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn player_starts_centered_and_full() {
        let sim = Simulation::new(SimConfig::default()).unwrap();
        let hud = sim.hud();
        assert_eq!(sim.state().player.position, sim.state().bounds.center());
        assert_eq!((hud.health, hud.hunger, hud.thirst), (100, 100, 100));
        assert_eq!((hud.wood, hud.stone, hud.campfires), (0, 0, 0));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Simulation::new(SimConfig::default().with_max_dt(0.0)).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
        let err = Simulation::new(SimConfig::default().with_bounds(-1.0, 10.0)).unwrap_err();
        assert!(matches!(err, SimError::Core(_)));
    }

    #[test]
    fn full_tick_integration() {
        let mut sim = Simulation::with_default_systems(SimConfig::default()).unwrap();
        sim.run(120, &ActionState::new(), DT).unwrap();

        assert_eq!(sim.current_tick(), 120);
        assert!((sim.clock().elapsed_seconds() - 2.0).abs() < 1e-9);
        assert!(sim.state().player.vitals.hunger() < 100.0);
        // Initial population was logged
        assert!(sim.events().count_of(|k| matches!(k, SimEventKind::Spawned { .. })) >= 51);
    }

    #[test]
    fn init_populates_once() {
        let mut sim = Simulation::with_default_systems(SimConfig::default()).unwrap();
        sim.init().unwrap();
        sim.init().unwrap();
        assert_eq!(sim.state().registry.count(ResourceKind::Tree), 12);
        assert_eq!(sim.state().registry.count(ResourceKind::Water), 5);
    }

    #[test]
    fn step_returns_clamped_dt() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        let idle = ActionState::new();
        assert_eq!(sim.step(&idle, 0.5).unwrap(), 0.06);
        assert_eq!(sim.step(&idle, -1.0).unwrap(), 0.0);
        assert_eq!(sim.step(&idle, f64::NAN).unwrap(), 0.0);
    }

    #[test]
    fn custom_system_registration() {
        #[derive(Debug)]
        struct CustomSystem {
            ticks: u32,
        }
        impl System for CustomSystem {
            fn name(&self) -> &str {
                "custom"
            }
            fn tick(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
                self.ticks += 1;
                Ok(())
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }
        }

        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        sim.add_system(CustomSystem { ticks: 0 });
        sim.run(3, &ActionState::new(), DT).unwrap();

        let custom = sim.get_system::<CustomSystem>().unwrap();
        assert_eq!(custom.ticks, 3);
        assert!(sim.get_system::<MovementSystem>().is_none());
    }

    #[test]
    fn systems_see_the_sampled_intent() {
        let mut sim = Simulation::with_default_systems(SimConfig::default()).unwrap();
        let input = ActionState::holding(&[Action::Right, Action::Chop]);
        sim.step(&input, DT).unwrap();
        assert_eq!(sim.intent().direction, kd_core::Vec2::new(1.0, 0.0));
        assert!(sim.intent().chop);
    }

    #[test]
    fn deterministic_rng() {
        let make_sim = || {
            let mut sim =
                Simulation::with_default_systems(SimConfig::default().with_seed(123)).unwrap();
            let input = ActionState::holding(&[Action::Down, Action::Chop]);
            sim.run(600, &input, DT).unwrap();
            let events = sim
                .events()
                .events()
                .iter()
                .map(|e| e.description.clone())
                .collect::<Vec<_>>();
            (events, sim.state().player.clone())
        };

        let run1 = make_sim();
        let run2 = make_sim();
        assert_eq!(run1, run2);
    }

    #[test]
    fn into_state_preserves_changes() {
        let mut sim = Simulation::with_default_systems(SimConfig::default()).unwrap();
        sim.run(10, &ActionState::holding(&[Action::Left]), DT).unwrap();
        let x = sim.state().player.position.x;
        let state = sim.into_state();
        assert_eq!(state.player.position.x, x);
        assert!(x < 480.0);
    }

    #[test]
    fn action_cooldown_is_reachable() {
        let mut sim = Simulation::with_default_systems(SimConfig::default()).unwrap();
        sim.step(&ActionState::holding(&[Action::Chop]), DT).unwrap();
        let actions = sim.get_system_mut::<ActionSystem>().unwrap();
        assert_eq!(actions.chop_cooldown(), 0.0);
    }
}

use kd_core::WorldState;
use rand::rngs::StdRng;

use crate::clock::SimClock;
use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::input::TickIntent;
use crate::profile::TuningProfile;

/// Mutable context passed to each system during a tick.
pub struct SimContext<'a> {
    /// The world being simulated.
    pub state: &'a mut WorldState,
    /// Clock, already advanced for this tick.
    pub clock: &'a SimClock,
    /// Event sink.
    pub events: &'a mut EventLog,
    /// The run's seeded RNG.
    pub rng: &'a mut StdRng,
    /// Input sampled at the start of this tick.
    pub intent: &'a TickIntent,
    /// Balance constants.
    pub profile: &'a TuningProfile,
}

impl SimContext<'_> {
    /// Emit a simulation event at the current tick.
    pub fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events
            .push(SimEvent::new(self.clock.tick(), kind, description));
    }

    /// The current tick number.
    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Clamped seconds covered by this tick.
    pub fn dt(&self) -> f64 {
        self.clock.dt()
    }
}

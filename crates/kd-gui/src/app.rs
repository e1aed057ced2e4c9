//! Window-side session state: the running simulation plus pause, restart,
//! and display toggles.

use kd_simulation::{InputSource, SimConfig, SimResult, Simulation};
use tracing::info;

use crate::hud;
use crate::render::{self, Sprites};

/// How long an event message stays on screen, in ticks.
const MESSAGE_LINGER_TICKS: u64 = 120;

/// Per-frame control presses, sampled separately from gameplay input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameControls {
    /// Toggle pause.
    pub pause: bool,
    /// Rebuild the world from the same config.
    pub restart: bool,
    /// Toggle the reach ring.
    pub toggle_reach: bool,
}

/// The running game.
pub struct GameApp {
    config: SimConfig,
    sim: Simulation,
    sprites: Sprites,
    paused: bool,
    show_reach: bool,
}

fn build(config: &SimConfig) -> SimResult<Simulation> {
    let mut sim = Simulation::with_default_systems(config.clone())?;
    sim.init()?;
    Ok(sim)
}

impl GameApp {
    /// Build and initialize a simulation from `config`.
    pub fn new(config: SimConfig, sprites: Sprites) -> SimResult<Self> {
        let sim = build(&config)?;
        Ok(Self {
            config,
            sim,
            sprites,
            paused: false,
            show_reach: false,
        })
    }

    /// Handle control presses, then advance one tick unless paused.
    pub fn update(
        &mut self,
        controls: FrameControls,
        input: &dyn InputSource,
        dt: f64,
    ) -> SimResult<()> {
        if controls.restart {
            self.restart()?;
        }
        if controls.pause {
            self.paused = !self.paused;
        }
        if controls.toggle_reach {
            self.show_reach = !self.show_reach;
        }
        if !self.paused {
            self.sim.step(input, dt)?;
        }
        Ok(())
    }

    /// Throw away the current world and start over with the same seed.
    pub fn restart(&mut self) -> SimResult<()> {
        self.sim = build(&self.config)?;
        self.paused = false;
        info!(seed = self.config.seed, "session restarted");
        Ok(())
    }

    /// Draw the world and HUD for the current state.
    pub fn draw(&self) {
        let state = self.sim.state();
        render::draw_world(state, &self.sprites, self.show_reach);

        let message =
            hud::recent_message(self.sim.events(), self.sim.current_tick(), MESSAGE_LINGER_TICKS);
        hud::draw_hud(&self.sim.hud(), message);
        hud::draw_controls(self.paused);

        if state.player.is_incapacitated() {
            hud::draw_incapacitated_overlay();
        }
    }

    /// The running simulation.
    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    /// Returns true while paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns true while the reach ring is drawn.
    pub fn shows_reach(&self) -> bool {
        self.show_reach
    }
}

/// Tracks simulation time: a monotonic tick counter, the clamped elapsed time
/// of the latest tick, and the total elapsed seconds.
#[derive(Debug, Clone)]
pub struct SimClock {
    tick: u64,
    dt: f64,
    elapsed: f64,
    max_dt: f64,
}

impl SimClock {
    /// Create a new clock at tick 0 that never integrates more than `max_dt`
    /// seconds in one tick.
    pub fn new(max_dt: f64) -> Self {
        Self {
            tick: 0,
            dt: 0.0,
            elapsed: 0.0,
            max_dt,
        }
    }

    /// Clamp a raw frame time into `0.0..=max_dt`. NaN counts as no time.
    pub fn clamp_dt(&self, raw: f64) -> f64 {
        if raw.is_nan() {
            return 0.0;
        }
        raw.clamp(0.0, self.max_dt)
    }

    /// Advance by one tick of `raw_dt` seconds. Returns the clamped `dt`.
    pub fn advance(&mut self, raw_dt: f64) -> f64 {
        self.dt = self.clamp_dt(raw_dt);
        self.tick += 1;
        self.elapsed += self.dt;
        self.dt
    }

    /// Return the current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Clamped elapsed seconds of the latest tick.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Total clamped seconds since the simulation started.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    /// The configured clamp.
    pub fn max_dt(&self) -> f64 {
        self.max_dt
    }
}

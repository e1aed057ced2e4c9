//! Input sampling.
//!
//! Hosts report which actions are held through [`InputSource`]. At the start
//! of each tick the simulation folds that into a [`TickIntent`]: a movement
//! direction plus action flags. Chop and mine are level-triggered (held means
//! active every tick). Craft is edge-triggered through [`CraftLatch`], so a
//! held craft key fires once and must be released before it fires again.

use std::fmt;
use std::str::FromStr;

use kd_core::Vec2;

/// Every input the simulation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move toward negative y.
    Up,
    /// Move toward positive y.
    Down,
    /// Move toward negative x.
    Left,
    /// Move toward positive x.
    Right,
    /// Hit every tree in reach.
    Chop,
    /// Hit every rock in reach.
    Mine,
    /// Build a campfire.
    Craft,
}

impl Action {
    /// All actions in a fixed order.
    pub const ALL: [Self; 7] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::Chop,
        Self::Mine,
        Self::Craft,
    ];

    /// The four movement actions.
    pub const MOVEMENT: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
            Self::Chop => 4,
            Self::Mine => 5,
            Self::Craft => 6,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Chop => write!(f, "chop"),
            Self::Mine => write!(f, "mine"),
            Self::Craft => write!(f, "craft"),
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown action \"{s}\" (expected up, down, left, right, chop, mine, craft)")
            })
    }
}

/// Read-only view of which actions are currently held.
pub trait InputSource {
    /// Returns true while the action's input is held down.
    fn is_action_held(&self, action: Action) -> bool;
}

/// A plain held/released map, updated by the host between ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionState {
    held: [bool; 7],
}

impl ActionState {
    /// Nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state with the given actions held.
    pub fn holding(actions: &[Action]) -> Self {
        let mut state = Self::new();
        for action in actions {
            state.press(*action);
        }
        state
    }

    /// Mark an action held.
    pub fn press(&mut self, action: Action) {
        self.held[action.index()] = true;
    }

    /// Mark an action released.
    pub fn release(&mut self, action: Action) {
        self.held[action.index()] = false;
    }

    /// Set an action's held state.
    pub fn set(&mut self, action: Action, held: bool) {
        self.held[action.index()] = held;
    }

    /// Release every action.
    pub fn release_all(&mut self) {
        self.held = [false; 7];
    }
}

impl InputSource for ActionState {
    fn is_action_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }
}

/// Turns a held craft key into a single firing per press.
#[derive(Debug, Clone, Default)]
pub struct CraftLatch {
    latched: bool,
}

impl CraftLatch {
    /// Create an unlatched latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current held state. Returns true only on the first tick of a
    /// press; the latch re-arms when the key is seen released.
    pub fn sample(&mut self, held: bool) -> bool {
        if !held {
            self.latched = false;
            return false;
        }
        if self.latched {
            return false;
        }
        self.latched = true;
        true
    }

    /// Returns true while a press has fired and not yet been released.
    pub fn is_latched(&self) -> bool {
        self.latched
    }
}

/// What the player wants to do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickIntent {
    /// Unit-length movement direction, or zero.
    pub direction: Vec2,
    /// Chop is held.
    pub chop: bool,
    /// Mine is held.
    pub mine: bool,
    /// Craft fired this tick.
    pub craft: bool,
}

impl TickIntent {
    /// No movement, no actions.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Sample an input source. Advances the craft latch.
    pub fn sample(input: &dyn InputSource, latch: &mut CraftLatch) -> Self {
        let mut direction = Vec2::ZERO;
        if input.is_action_held(Action::Up) {
            direction.y -= 1.0;
        }
        if input.is_action_held(Action::Down) {
            direction.y += 1.0;
        }
        if input.is_action_held(Action::Left) {
            direction.x -= 1.0;
        }
        if input.is_action_held(Action::Right) {
            direction.x += 1.0;
        }
        Self {
            direction: direction.normalized_or_zero(),
            chop: input.is_action_held(Action::Chop),
            mine: input.is_action_held(Action::Mine),
            craft: latch.sample(input.is_action_held(Action::Craft)),
        }
    }

    /// Drop all movement, keeping the action flags.
    pub fn without_movement(mut self) -> Self {
        self.direction = Vec2::ZERO;
        self
    }
}

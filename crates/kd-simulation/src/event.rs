use kd_core::{EntityId, ResourceKind, Stat};
use serde::Serialize;

/// What kind of simulation event occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEventKind {
    // Actions
    /// A tree ran out of hit points and yielded wood.
    TreeFelled {
        /// The tree that fell.
        tree: EntityId,
    },
    /// A rock ran out of hit points and yielded stone.
    RockBroken {
        /// The rock that broke.
        rock: EntityId,
    },
    /// A campfire was built.
    CampfireCrafted {
        /// The new campfire.
        campfire: EntityId,
    },
    /// Craft was pressed without enough materials. Nothing changed.
    CraftRejected {
        /// Wood carried at the time.
        wood: u32,
        /// Stone carried at the time.
        stone: u32,
    },

    // Foraging
    /// A berry was eaten.
    BerryEaten {
        /// The berry that was eaten.
        berry: EntityId,
    },

    // Population
    /// A resource entity appeared, at initialization or by respawn.
    Spawned {
        /// The kind spawned.
        kind: ResourceKind,
        /// The new entity.
        entity: EntityId,
    },

    // Vitals
    /// A stat reached zero this tick.
    StatDepleted {
        /// The stat that ran out.
        stat: Stat,
    },
    /// Health reached zero. Movement is ignored until health climbs back above
    /// zero.
    Incapacitated,
}

impl SimEventKind {
    /// Check whether a given entity is involved in this event.
    pub fn involves(&self, id: EntityId) -> bool {
        match self {
            Self::TreeFelled { tree: entity }
            | Self::RockBroken { rock: entity }
            | Self::CampfireCrafted { campfire: entity }
            | Self::BerryEaten { berry: entity }
            | Self::Spawned { entity, .. } => *entity == id,
            Self::CraftRejected { .. } | Self::StatDepleted { .. } | Self::Incapacitated => false,
        }
    }

    /// Short snake_case label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TreeFelled { .. } => "tree_felled",
            Self::RockBroken { .. } => "rock_broken",
            Self::CampfireCrafted { .. } => "campfire_crafted",
            Self::CraftRejected { .. } => "craft_rejected",
            Self::BerryEaten { .. } => "berry_eaten",
            Self::Spawned { .. } => "spawned",
            Self::StatDepleted { .. } => "stat_depleted",
            Self::Incapacitated => "incapacitated",
        }
    }
}

/// A record of something that happened during simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimEvent {
    /// The simulation tick when this event occurred.
    pub tick: u64,
    /// The specific kind of event that occurred.
    pub kind: SimEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl SimEvent {
    /// Create a new simulation event with the given tick, kind, and description.
    pub fn new(tick: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates events during a simulation run.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Return all events that occurred at the given tick.
    pub fn events_at_tick(&self, tick: u64) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.tick == tick).collect()
    }

    /// Return all events involving the given entity.
    pub fn events_for_entity(&self, id: EntityId) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.kind.involves(id)).collect()
    }

    /// Count the retained events whose kind matches the predicate.
    pub fn count_of(&self, pred: impl Fn(&SimEventKind) -> bool) -> usize {
        self.events.iter().filter(|e| pred(&e.kind)).count()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn felled(tick: u64, id: u64) -> SimEvent {
        SimEvent::new(tick, SimEventKind::TreeFelled { tree: EntityId(id) }, "test")
    }

    #[test]
    fn event_log_push_and_query() {
        let mut log = EventLog::new(0);
        log.push(felled(1, 7));
        assert_eq!(log.len(), 1);
        assert_eq!(log.events_at_tick(1).len(), 1);
        assert_eq!(log.events_for_entity(EntityId(7)).len(), 1);
        assert!(log.events_for_entity(EntityId(8)).is_empty());
    }

    #[test]
    fn event_log_max_events_trims() {
        let mut log = EventLog::new(2);
        for i in 0..5 {
            log.push(felled(i, 1));
        }
        assert_eq!(log.len(), 2);
        // Oldest dropped, newest kept
        assert_eq!(log.events()[0].tick, 3);
        assert_eq!(log.events()[1].tick, 4);
    }

    #[test]
    fn event_kind_involves_entity() {
        let kind = SimEventKind::Spawned {
            kind: ResourceKind::Berry,
            entity: EntityId(3),
        };
        assert!(kind.involves(EntityId(3)));
        assert!(!kind.involves(EntityId(4)));

        assert!(!SimEventKind::Incapacitated.involves(EntityId(3)));
        let kind = SimEventKind::CraftRejected { wood: 1, stone: 0 };
        assert!(!kind.involves(EntityId(0)));
    }

    #[test]
    fn count_of_matches_kind() {
        let mut log = EventLog::new(0);
        log.push(felled(1, 1));
        log.push(felled(2, 2));
        log.push(SimEvent::new(
            2,
            SimEventKind::StatDepleted { stat: Stat::Thirst },
            "thirst ran out",
        ));
        assert_eq!(
            log.count_of(|k| matches!(k, SimEventKind::TreeFelled { .. })),
            2
        );
        assert_eq!(
            log.count_of(|k| *k == SimEventKind::StatDepleted { stat: Stat::Thirst }),
            1
        );
        assert_eq!(log.count_of(|k| k.label() == "incapacitated"), 0);
    }

    #[test]
    fn event_log_clear() {
        let mut log = EventLog::new(0);
        log.push(felled(1, 1));
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&SimEventKind::StatDepleted { stat: Stat::Hunger }).unwrap();
        assert_eq!(json, r#"{"type":"stat_depleted","stat":"hunger"}"#);
    }
}

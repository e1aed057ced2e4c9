use crate::arena::Arena;
use crate::entity::{Berry, Campfire, EntityId, ResourceKind, Rock, Tree, WaterPool};
use crate::geometry::Vec2;

/// Every resource entity in the world, one arena per kind.
///
/// Ids come from a single counter shared by all kinds, so an id names at most
/// one entity across the whole registry.
#[derive(Debug, Clone)]
pub struct Registry {
    next_id: u64,
    /// Standing trees.
    pub trees: Arena<Tree>,
    /// Unbroken rocks.
    pub rocks: Arena<Rock>,
    /// Uneaten berries.
    pub berries: Arena<Berry>,
    /// Water pools.
    pub waters: Arena<WaterPool>,
    /// Crafted campfires.
    pub campfires: Arena<Campfire>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            trees: Arena::new(ResourceKind::Tree),
            rocks: Arena::new(ResourceKind::Rock),
            berries: Arena::new(ResourceKind::Berry),
            waters: Arena::new(ResourceKind::Water),
            campfires: Arena::new(ResourceKind::Campfire),
        }
    }

    fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a tree with the given hit points.
    pub fn spawn_tree(&mut self, position: Vec2, hp: u32) -> EntityId {
        let id = self.allocate();
        self.trees.insert(id, Tree { position, hp });
        id
    }

    /// Add a rock with the given hit points.
    pub fn spawn_rock(&mut self, position: Vec2, hp: u32) -> EntityId {
        let id = self.allocate();
        self.rocks.insert(id, Rock { position, hp });
        id
    }

    /// Add a berry.
    pub fn spawn_berry(&mut self, position: Vec2) -> EntityId {
        let id = self.allocate();
        self.berries.insert(id, Berry { position });
        id
    }

    /// Add a water pool.
    pub fn spawn_water(&mut self, position: Vec2, radius: f64) -> EntityId {
        let id = self.allocate();
        self.waters.insert(id, WaterPool { position, radius });
        id
    }

    /// Add a campfire.
    pub fn spawn_campfire(&mut self, position: Vec2) -> EntityId {
        let id = self.allocate();
        self.campfires.insert(id, Campfire { position });
        id
    }

    /// Number of live entities of a kind.
    pub fn count(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Tree => self.trees.len(),
            ResourceKind::Rock => self.rocks.len(),
            ResourceKind::Berry => self.berries.len(),
            ResourceKind::Water => self.waters.len(),
            ResourceKind::Campfire => self.campfires.len(),
        }
    }

    /// Number of live entities across all kinds.
    pub fn total(&self) -> usize {
        ResourceKind::ALL.iter().map(|k| self.count(*k)).sum()
    }

    /// Drop every marked entity. Returns the removed ids with their kinds.
    pub fn compact(&mut self) -> Vec<(ResourceKind, EntityId)> {
        let mut removed = Vec::new();
        removed.extend(self.trees.compact().into_iter().map(|(id, _)| (ResourceKind::Tree, id)));
        removed.extend(self.rocks.compact().into_iter().map(|(id, _)| (ResourceKind::Rock, id)));
        removed.extend(
            self.berries
                .compact()
                .into_iter()
                .map(|(id, _)| (ResourceKind::Berry, id)),
        );
        removed.extend(self.waters.compact().into_iter().map(|(id, _)| (ResourceKind::Water, id)));
        removed.extend(
            self.campfires
                .compact()
                .into_iter()
                .map(|(id, _)| (ResourceKind::Campfire, id)),
        );
        removed
    }
}

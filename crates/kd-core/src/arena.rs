//! Entity storage keyed by stable ids.
//!
//! Interactions never remove entries while walking a collection. They mark
//! them instead, and [`Arena::compact`] drops every marked entry once the
//! interaction phase is over. Marked entries are invisible to lookups,
//! iteration, and [`Arena::len`] from the moment they are marked, so a
//! depleted tree cannot be hit (or credited) a second time.

use std::collections::{BTreeMap, BTreeSet};

use crate::entity::{EntityId, ResourceKind};
use crate::error::{CoreError, CoreResult};

/// A collection of one kind of entity.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    kind: ResourceKind,
    entries: BTreeMap<EntityId, T>,
    marked: BTreeSet<EntityId>,
}

impl<T> Arena<T> {
    /// Create an empty arena for the given kind.
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
            marked: BTreeSet::new(),
        }
    }

    /// The kind of entity this arena stores.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub(crate) fn insert(&mut self, id: EntityId, value: T) {
        self.entries.insert(id, value);
    }

    /// Get a live entry.
    pub fn get(&self, id: EntityId) -> Option<&T> {
        if self.marked.contains(&id) {
            return None;
        }
        self.entries.get(&id)
    }

    /// Get a live entry mutably.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        if self.marked.contains(&id) {
            return None;
        }
        self.entries.get_mut(&id)
    }

    /// Remove an entry immediately, whether or not it was marked.
    pub fn remove(&mut self, id: EntityId) -> CoreResult<T> {
        self.marked.remove(&id);
        self.entries.remove(&id).ok_or(CoreError::EntityNotFound {
            kind: self.kind,
            id,
        })
    }

    /// Mark an entry for removal at the next [`compact`](Self::compact).
    ///
    /// Returns `Ok(true)` if the entry was live and is now marked, `Ok(false)`
    /// if it had already been marked.
    pub fn mark_removed(&mut self, id: EntityId) -> CoreResult<bool> {
        if !self.entries.contains_key(&id) {
            return Err(CoreError::EntityNotFound {
                kind: self.kind,
                id,
            });
        }
        Ok(self.marked.insert(id))
    }

    /// Returns true if the entry is waiting for compaction.
    pub fn is_marked(&self, id: EntityId) -> bool {
        self.marked.contains(&id)
    }

    /// Number of entries marked but not yet compacted.
    pub fn pending_removals(&self) -> usize {
        self.marked.len()
    }

    /// Drop all marked entries, returning them in id order.
    pub fn compact(&mut self) -> Vec<(EntityId, T)> {
        let marked = std::mem::take(&mut self.marked);
        marked
            .into_iter()
            .filter_map(|id| self.entries.remove(&id).map(|v| (id, v)))
            .collect()
    }

    /// Iterate over live entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        let marked = &self.marked;
        self.entries
            .iter()
            .filter(move |(id, _)| !marked.contains(*id))
            .map(|(id, v)| (*id, v))
    }

    /// Iterate mutably over live entries in id order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        let marked = &self.marked;
        self.entries
            .iter_mut()
            .filter(move |(id, _)| !marked.contains(*id))
            .map(|(id, v)| (*id, v))
    }

    /// Iterate over live values.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|(_, v)| v)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len() - self.marked.len()
    }

    /// Returns true if there are no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filled(n: u64) -> Arena<u64> {
        let mut arena = Arena::new(ResourceKind::Berry);
        for i in 0..n {
            arena.insert(EntityId(i), i * 10);
        }
        arena
    }

    #[test]
    fn marked_entries_are_hidden_until_compacted() {
        let mut arena = filled(3);
        assert!(arena.mark_removed(EntityId(1)).unwrap());
        assert_eq!(arena.len(), 2);
        assert!(arena.get(EntityId(1)).is_none());
        assert!(arena.is_marked(EntityId(1)));

        let ids: Vec<_> = arena.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![EntityId(0), EntityId(2)]);

        let removed = arena.compact();
        assert_eq!(removed, vec![(EntityId(1), 10)]);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.pending_removals(), 0);
    }

    #[test]
    fn marking_twice_reports_false() {
        let mut arena = filled(1);
        assert!(arena.mark_removed(EntityId(0)).unwrap());
        assert!(!arena.mark_removed(EntityId(0)).unwrap());
        assert_eq!(arena.compact().len(), 1);
    }

    #[test]
    fn marking_unknown_id_is_an_error() {
        let mut arena = filled(1);
        let err = arena.mark_removed(EntityId(9)).unwrap_err();
        assert_eq!(err.to_string(), "berry not found: #9");
    }

    #[test]
    fn remove_clears_mark() {
        let mut arena = filled(2);
        arena.mark_removed(EntityId(0)).unwrap();
        assert_eq!(arena.remove(EntityId(0)).unwrap(), 0);
        assert!(arena.compact().is_empty());
        assert!(arena.remove(EntityId(0)).is_err());
    }

    #[test]
    fn iter_mut_skips_marked() {
        let mut arena = filled(3);
        arena.mark_removed(EntityId(2)).unwrap();
        for (_, v) in arena.iter_mut() {
            *v += 1;
        }
        arena.compact();
        let values: Vec<_> = arena.values().copied().collect();
        assert_eq!(values, vec![1, 11]);
    }

    proptest! {
        #[test]
        fn compaction_never_skips_or_duplicates(n in 0u64..40, picks in proptest::collection::vec(0u64..40, 0..60)) {
            let mut arena = filled(n);
            let mut expected = std::collections::BTreeSet::new();
            for id in picks {
                if id < n {
                    arena.mark_removed(EntityId(id)).unwrap();
                    expected.insert(id);
                }
            }
            let removed: Vec<u64> = arena.compact().into_iter().map(|(id, _)| id.0).collect();
            prop_assert_eq!(removed, expected.iter().copied().collect::<Vec<_>>());
            prop_assert_eq!(arena.len() as u64, n - expected.len() as u64);
            prop_assert!(arena.iter().all(|(id, _)| !expected.contains(&id.0)));
        }
    }
}

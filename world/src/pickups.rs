//! Pickup entities and the registry that counts the ones still in play.

use std::collections::BTreeMap;

use glam::Vec2;
use maze_chase_core::{PickupId, PickupKind, PickupSnapshot, PickupSpawn};
use tracing::warn;

/// Tracks how many pickups remain in the current level.
///
/// The count never goes below zero: a decrement at zero is logged and
/// discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PickupRegistry {
    remaining: u32,
}

impl PickupRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { remaining: 0 }
    }

    /// Resets the registry to the number of pickups present at level start.
    pub fn initialize(&mut self, count: u32) {
        self.remaining = count;
    }

    /// Removes one pickup from the count.
    ///
    /// Returns `false` when the registry was already empty, in which case the
    /// count stays at zero.
    pub fn decrement(&mut self) -> bool {
        if self.remaining == 0 {
            warn!("pickup registry decremented below zero; ignoring");
            return false;
        }

        self.remaining -= 1;
        true
    }

    /// Number of pickups left in the level.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Reports whether every pickup has been consumed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Pickup {
    pub(crate) position: Vec2,
    pub(crate) kind: PickupKind,
}

/// Live pickup entities together with their registry.
#[derive(Debug, Default)]
pub(crate) struct PickupField {
    entries: BTreeMap<PickupId, Pickup>,
    registry: PickupRegistry,
}

impl PickupField {
    /// Replaces all pickups with the provided spawns, allocating identifiers in order.
    pub(crate) fn reset(&mut self, spawns: &[PickupSpawn]) {
        self.entries = spawns
            .iter()
            .enumerate()
            .map(|(index, spawn)| {
                let id = PickupId::new(u32::try_from(index).unwrap_or(u32::MAX));
                (
                    id,
                    Pickup {
                        position: spawn.position,
                        kind: spawn.kind,
                    },
                )
            })
            .collect();
        let count = u32::try_from(self.entries.len()).unwrap_or(u32::MAX);
        self.registry.initialize(count);
    }

    /// Removes the pickup and updates the registry.
    ///
    /// Returns `None` if the pickup does not exist, which makes duplicate
    /// collision deliveries harmless.
    pub(crate) fn consume(&mut self, pickup: PickupId) -> Option<Pickup> {
        let consumed = self.entries.remove(&pickup)?;
        let _ = self.registry.decrement();
        Some(consumed)
    }

    pub(crate) fn registry(&self) -> PickupRegistry {
        self.registry
    }

    pub(crate) fn snapshots(&self) -> Vec<PickupSnapshot> {
        self.entries
            .iter()
            .map(|(id, pickup)| PickupSnapshot {
                id: *id,
                position: pickup.position,
                kind: pickup.kind,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_clamps_at_zero() {
        let mut registry = PickupRegistry::new();
        registry.initialize(2);

        assert!(registry.decrement());
        assert!(registry.decrement());
        assert!(!registry.decrement());
        assert!(!registry.decrement());

        assert_eq!(registry.remaining(), 0);
        assert!(registry.is_exhausted());
    }

    #[test]
    fn initialize_overrides_previous_count() {
        let mut registry = PickupRegistry::new();
        registry.initialize(5);
        let _ = registry.decrement();
        registry.initialize(3);

        assert_eq!(registry.remaining(), 3);
    }

    #[test]
    fn pickups_are_consumed_at_most_once() {
        let mut field = PickupField::default();
        field.reset(&[
            PickupSpawn {
                position: Vec2::new(1.0, 0.0),
                kind: PickupKind::Ordinary,
            },
            PickupSpawn {
                position: Vec2::new(2.0, 0.0),
                kind: PickupKind::Power,
            },
        ]);
        assert_eq!(field.registry().remaining(), 2);

        let consumed = field.consume(PickupId::new(1)).expect("power pickup exists");
        assert_eq!(consumed.kind, PickupKind::Power);
        assert!(field.consume(PickupId::new(1)).is_none());

        assert_eq!(field.registry().remaining(), 1);
        let remaining: Vec<_> = field.snapshots().into_iter().map(|p| p.id).collect();
        assert_eq!(remaining, vec![PickupId::new(0)]);
    }
}

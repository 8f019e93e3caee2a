//! Enemy roster storing positions, home points, and navigation destinations.

use glam::Vec2;
use maze_chase_core::{EnemyId, EnemySnapshot, EnemySpawn, EnemyView};

#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    position: Vec2,
    home: Vec2,
    destination: Option<Vec2>,
}

/// Enemies of the current level ordered by identifier.
#[derive(Debug, Default)]
pub(crate) struct EnemyRoster {
    enemies: Vec<Enemy>,
}

impl EnemyRoster {
    /// Replaces the roster with the provided spawns, allocating identifiers in order.
    pub(crate) fn reset(&mut self, spawns: &[EnemySpawn]) {
        self.enemies = spawns
            .iter()
            .enumerate()
            .map(|(index, spawn)| Enemy {
                id: EnemyId::new(u32::try_from(index).unwrap_or(u32::MAX)),
                position: spawn.position,
                home: spawn.home,
                destination: None,
            })
            .collect();
    }

    pub(crate) fn contains(&self, enemy: EnemyId) -> bool {
        self.index(enemy).is_some()
    }

    /// Stores a destination, returning `true` when it differs from the previous one.
    pub(crate) fn set_destination(&mut self, enemy: EnemyId, destination: Vec2) -> bool {
        let Some(entry) = self.entry_mut(enemy) else {
            return false;
        };

        if entry.destination == Some(destination) {
            return false;
        }
        entry.destination = Some(destination);
        true
    }

    /// Moves the enemy, returning `false` for unknown identifiers.
    pub(crate) fn relocate(&mut self, enemy: EnemyId, position: Vec2) -> bool {
        let Some(entry) = self.entry_mut(enemy) else {
            return false;
        };
        entry.position = position;
        true
    }

    pub(crate) fn iter_spawned(&self) -> impl Iterator<Item = (EnemyId, Vec2, Vec2)> + '_ {
        self.enemies
            .iter()
            .map(|enemy| (enemy.id, enemy.position, enemy.home))
    }

    pub(crate) fn view(&self) -> EnemyView {
        EnemyView::from_snapshots(
            self.enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    position: enemy.position,
                    home: enemy.home,
                    destination: enemy.destination,
                })
                .collect(),
        )
    }

    fn entry_mut(&mut self, enemy: EnemyId) -> Option<&mut Enemy> {
        let index = self.index(enemy)?;
        self.enemies.get_mut(index)
    }

    fn index(&self, enemy: EnemyId) -> Option<usize> {
        self.enemies
            .binary_search_by_key(&enemy, |entry| entry.id)
            .ok()
    }
}

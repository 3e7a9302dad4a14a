//! Live pellet set, running score and the frightened deadline.

use std::collections::HashMap;
use std::time::Instant;

use crate::components::{PelletKind, Tile};
use crate::constants::FRIGHTENED_DURATION;
use crate::level::Maze;

#[derive(Debug, Clone)]
pub struct Ledger {
    pellets: HashMap<Tile, PelletKind>,
    score: u32,
    frightened_until: Option<Instant>,
}

impl Ledger {
    pub fn new(maze: &Maze) -> Self {
        Self {
            pellets: maze.pellet_spawns().collect(),
            score: 0,
            frightened_until: None,
        }
    }

    /// Refills the board for the next round. The score carries over.
    pub fn repopulate(&mut self, maze: &Maze) {
        self.pellets = maze.pellet_spawns().collect();
        self.frightened_until = None;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn remaining(&self) -> usize {
        self.pellets.len()
    }

    pub fn is_cleared(&self) -> bool {
        self.pellets.is_empty()
    }

    pub fn pellet_at(&self, tile: Tile) -> Option<PelletKind> {
        self.pellets.get(&tile).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tile, PelletKind)> + '_ {
        self.pellets.iter().map(|(tile, kind)| (*tile, *kind))
    }

    /// Eats the pellet on `tile`, if any.
    ///
    /// A power pellet (re)arms the frightened deadline at `now` plus the
    /// frightened duration; pickups restart the window rather than stacking.
    pub fn collect(&mut self, tile: Tile, now: Instant) -> Option<PelletKind> {
        let kind = self.pellets.remove(&tile)?;
        self.award(kind.points());
        if kind == PelletKind::Power {
            self.frightened_until = Some(now + FRIGHTENED_DURATION);
        }
        Some(kind)
    }

    pub fn frightened_until(&self) -> Option<Instant> {
        self.frightened_until
    }

    /// True exactly once, on the first check at or after the deadline.
    pub fn frightened_expired(&mut self, now: Instant) -> bool {
        match self.frightened_until {
            Some(deadline) if now >= deadline => {
                self.frightened_until = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::count_pellets;
    use std::time::Duration;

    #[test]
    fn collect_scores_once_per_tile() {
        let maze = Maze::classic();
        let mut ledger = Ledger::new(&maze);
        let now = Instant::now();
        let tile = Tile::new(1, 1);
        assert_eq!(ledger.collect(tile, now), Some(PelletKind::Normal));
        assert_eq!(ledger.score(), 10);
        assert_eq!(ledger.collect(tile, now), None);
        assert_eq!(ledger.score(), 10);
        assert_eq!(ledger.remaining(), count_pellets(&maze) - 1);
    }

    #[test]
    fn power_pellet_arms_and_rearms_deadline() {
        let maze = Maze::classic();
        let mut ledger = Ledger::new(&maze);
        let start = Instant::now();
        assert_eq!(ledger.collect(Tile::new(2, 1), start), Some(PelletKind::Power));
        assert_eq!(ledger.score(), 50);
        assert_eq!(ledger.frightened_until(), Some(start + FRIGHTENED_DURATION));

        let later = start + Duration::from_secs(5);
        ledger.collect(Tile::new(2, 17), later);
        assert!(!ledger.frightened_expired(start + Duration::from_secs(9)));
        assert!(ledger.frightened_expired(later + FRIGHTENED_DURATION));
        assert!(!ledger.frightened_expired(later + FRIGHTENED_DURATION));
    }

    #[test]
    fn repopulate_keeps_score() {
        let maze = Maze::classic();
        let mut ledger = Ledger::new(&maze);
        let now = Instant::now();
        ledger.collect(Tile::new(1, 1), now);
        ledger.collect(Tile::new(2, 1), now);
        ledger.repopulate(&maze);
        assert_eq!(ledger.score(), 60);
        assert_eq!(ledger.remaining(), count_pellets(&maze));
        assert_eq!(ledger.frightened_until(), None);
        assert_eq!(ledger.pellet_at(Tile::new(1, 1)), Some(PelletKind::Normal));
    }
}

use std::collections::VecDeque;

use game_core::Position;

/// Bounded FIFO of recently visited positions, used to discourage oscillation.
///
/// Never holds more than `capacity` entries; the oldest is evicted first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionHistory {
    positions: VecDeque<Position>,
    capacity: usize,
}

impl PositionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, position: Position) {
        if self.capacity == 0 {
            return;
        }
        while self.positions.len() >= self.capacity {
            self.positions.pop_front();
        }
        self.positions.push_back(position);
    }

    pub fn contains(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.iter().copied()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

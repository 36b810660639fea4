//! Moves and the tabu list.

use std::collections::VecDeque;

use crate::tour::reverse_segment;

/// How a move rearranges a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Reverse the positions `i..=j`.
    TwoOpt,
    /// Exchange positions `i` and `j`.
    Swap,
}

/// A neighborhood move between tour positions `i < j`.
///
/// Two moves are the same tabu entry when position pair and kind match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub i: usize,
    pub j: usize,
    pub kind: MoveKind,
}

impl Move {
    pub fn two_opt(i: usize, j: usize) -> Self {
        Self {
            i,
            j,
            kind: MoveKind::TwoOpt,
        }
    }

    pub fn swap(i: usize, j: usize) -> Self {
        Self {
            i,
            j,
            kind: MoveKind::Swap,
        }
    }

    /// Applies this move to `tour` in place.
    pub fn apply_in_place(&self, tour: &mut [usize]) {
        match self.kind {
            MoveKind::TwoOpt => reverse_segment(tour, self.i, self.j),
            MoveKind::Swap => tour.swap(self.i, self.j),
        }
    }

    /// Every 2-opt move, then every swap, over position pairs `i < j` of an
    /// `n`-stop tour.
    pub fn neighborhood(n: usize) -> Vec<Move> {
        let pairs = || (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)));
        pairs()
            .map(|(i, j)| Move::two_opt(i, j))
            .chain(pairs().map(|(i, j)| Move::swap(i, j)))
            .collect()
    }
}

/// Bounded FIFO of recently applied moves.
///
/// Pushing onto a full list evicts the oldest entry. A move may appear more
/// than once when it is re-applied while still tabu.
#[derive(Debug, Clone)]
pub struct TabuList {
    moves: VecDeque<Move>,
    capacity: usize,
}

impl TabuList {
    pub fn new(capacity: usize) -> Self {
        Self {
            moves: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn contains(&self, mv: &Move) -> bool {
        self.moves.contains(mv)
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push_back(mv);
        while self.moves.len() > self.capacity {
            self.moves.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

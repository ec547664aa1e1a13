//! Cursor over a numeric offset.

use serde::{Deserialize, Serialize};

use crate::{Cursor, Direction};

/// A cursor over integer offsets, advanced by item counts.
///
/// Position 0 means nothing has been consumed yet. Descending cursors
/// saturate at 0 rather than wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceCursor {
    position: u64,
    direction: Direction,
}

impl SequenceCursor {
    /// Creates an ascending cursor at position 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an ascending cursor at `position`.
    pub fn at(position: u64) -> Self {
        Self {
            position,
            direction: Direction::Ascending,
        }
    }

    /// Creates a descending cursor at `position`.
    pub fn descending_from(position: u64) -> Self {
        Self {
            position,
            direction: Direction::Descending,
        }
    }
}

impl Cursor for SequenceCursor {
    type Position = u64;
    type Increment = u64;

    fn position(&self) -> &u64 {
        &self.position
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn advance_by(&mut self, increment: u64) {
        self.position = match self.direction {
            Direction::Ascending => self.position.saturating_add(increment),
            Direction::Descending => self.position.saturating_sub(increment),
        };
    }

    fn force_to(&mut self, position: u64) {
        self.position = position;
    }
}

impl std::fmt::Display for SequenceCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sequence({})", self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_and_has_reached_nothing() {
        let cursor = SequenceCursor::new();
        assert_eq!(*cursor.position(), 0);
        assert!(!cursor.has_reached(&1u64));
    }

    #[test]
    fn ascending_advance_increases_position() {
        let mut cursor = SequenceCursor::at(3);
        cursor.advance_by(2);
        assert_eq!(*cursor.position(), 5);
        assert!(cursor.has_reached(&5u64));
        assert!(!cursor.has_reached(&6u64));
    }

    #[test]
    fn descending_advance_saturates_at_zero() {
        let mut cursor = SequenceCursor::descending_from(3);
        cursor.advance_by(2);
        assert_eq!(*cursor.position(), 1);
        cursor.advance_by(10);
        assert_eq!(*cursor.position(), 0);
    }

    #[test]
    fn force_to_allows_backward_jump() {
        let mut cursor = SequenceCursor::at(10);
        cursor.force_to(2);
        assert_eq!(*cursor.position(), 2);
    }

    #[test]
    fn display() {
        assert_eq!(SequenceCursor::at(42).to_string(), "sequence(42)");
    }
}

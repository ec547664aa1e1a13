//! Cursor over a time axis.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{Cursor, Direction};

/// A cursor over time positions.
///
/// Advancing adds the duration when ascending and subtracts it when
/// descending. It is a plain value holder with no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChronologicalCursor {
    position: DateTime<Utc>,
    direction: Direction,
}

impl ChronologicalCursor {
    pub fn new(position: DateTime<Utc>, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Creates a cursor that moves forward in time from `position`.
    pub fn ascending(position: DateTime<Utc>) -> Self {
        Self::new(position, Direction::Ascending)
    }

    /// Creates a cursor that moves backward in time from `position`.
    pub fn descending(position: DateTime<Utc>) -> Self {
        Self::new(position, Direction::Descending)
    }
}

impl Default for ChronologicalCursor {
    /// Ascending from the Unix epoch.
    fn default() -> Self {
        Self::ascending(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Cursor for ChronologicalCursor {
    type Position = DateTime<Utc>;
    type Increment = TimeDelta;

    fn position(&self) -> &DateTime<Utc> {
        &self.position
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    /// Saturates at the ends of the representable time range.
    fn advance_by(&mut self, increment: TimeDelta) {
        let step = match self.direction {
            Direction::Ascending => increment,
            Direction::Descending => -increment,
        };
        let bound = if step < TimeDelta::zero() {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        };
        self.position = self.position.checked_add_signed(step).unwrap_or(bound);
    }

    fn force_to(&mut self, position: DateTime<Utc>) {
        self.position = position;
    }
}

impl std::fmt::Display for ChronologicalCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arrow = if self.direction.is_ascending() { "->" } else { "<-" };
        write!(f, "{} {}", arrow, self.position.to_rfc3339())
    }
}

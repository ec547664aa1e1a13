//! The cursor contract.

use serde::{Deserialize, Serialize};

/// Which way positions move as a cursor advances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// Returns true when `key` is at or behind `current` in this direction.
    pub fn has_reached<P: PartialOrd>(self, current: &P, key: &P) -> bool {
        match self {
            Direction::Ascending => key <= current,
            Direction::Descending => key >= current,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == Direction::Ascending
    }
}

/// An item that knows where it sits in an ordered source.
///
/// Every clonable position type is its own ordinal, so a collection of raw
/// positions can be consumed directly. Domain items implement this to expose
/// their ordering key (a timestamp, a sequence number, ...).
pub trait Ordinal<P> {
    /// Returns the ordering key of this item.
    fn ordinal(&self) -> P;
}

impl<P: Clone> Ordinal<P> for P {
    fn ordinal(&self) -> P {
        self.clone()
    }
}

/// Increments that can be expressed as a number of consumed items.
///
/// The default advance policy of a data stream is only available for cursors
/// whose increment implements this.
pub trait FromItemCount {
    fn from_item_count(count: usize) -> Self;
}

macro_rules! impl_from_item_count {
    ($($ty:ty),*) => {
        $(
            impl FromItemCount for $ty {
                fn from_item_count(count: usize) -> Self {
                    <$ty>::try_from(count).unwrap_or(<$ty>::MAX)
                }
            }
        )*
    };
}

impl_from_item_count!(u32, u64, usize, i64);

/// An ordered position marker that makes a fetch resumable.
///
/// Ordinary movement goes through [`advance_by`](Cursor::advance_by), which
/// respects the cursor's [`Direction`]. [`force_to`](Cursor::force_to)
/// overwrites the position unconditionally, backwards jumps included.
pub trait Cursor {
    /// Position on the source's ordering axis.
    type Position: Clone + PartialOrd + std::fmt::Debug + Send + Sync;

    /// Relative step, in the cursor's own unit.
    type Increment;

    /// Returns the current position.
    fn position(&self) -> &Self::Position;

    /// Returns the direction the cursor advances in.
    fn direction(&self) -> Direction {
        Direction::Ascending
    }

    /// Returns true if the item's ordering key is at or behind the current
    /// position, i.e. the item has already been consumed.
    fn has_reached<I>(&self, item: &I) -> bool
    where
        I: Ordinal<Self::Position> + ?Sized,
    {
        self.direction()
            .has_reached(self.position(), &item.ordinal())
    }

    /// Moves the position by a relative increment in the cursor's direction.
    fn advance_by(&mut self, increment: Self::Increment);

    /// Overwrites the position without any monotonicity check.
    fn force_to(&mut self, position: Self::Position);
}

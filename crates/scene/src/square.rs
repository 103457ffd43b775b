//! Squares, their occupancy states, and the triples read back out of a scene.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Grid coordinate of a square.
///
/// Signed so that self-relative offsets can point up or left of the observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub col: i32,
    pub row: i32,
}

impl Square {
    /// The top-left square of every scene.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new square coordinate.
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Express this square relative to `origin`.
    #[must_use]
    pub const fn relative_to(self, origin: Self) -> Self {
        Self::new(self.col - origin.col, self.row - origin.row)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Items on a single square, in placement order.
pub type Occupants = SmallVec<[String; 2]>;

/// What an observer knows about one square.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquareState {
    /// Never looked at.
    #[default]
    Blind,
    /// Seen, nothing there.
    Empty,
    /// One or more items, duplicates allowed. Never empty.
    Occupied(Occupants),
}

impl SquareState {
    /// An occupied square holding exactly `item`.
    #[must_use]
    pub fn occupied(item: impl Into<String>) -> Self {
        let mut items = Occupants::new();
        items.push(item.into());
        Self::Occupied(items)
    }

    /// Check if this square was never looked at.
    #[must_use]
    pub const fn is_blind(&self) -> bool {
        matches!(self, Self::Blind)
    }

    /// Check if this square was seen and found vacant.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Occupants of the square; blind and empty squares have none.
    #[must_use]
    pub fn items(&self) -> &[String] {
        match self {
            Self::Occupied(items) => items,
            Self::Blind | Self::Empty => &[],
        }
    }

    /// Check whether `item` is among the occupants.
    #[must_use]
    pub fn holds(&self, item: &str) -> bool {
        self.items().iter().any(|occupant| occupant == item)
    }
}

/// An item identifier located on a square.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemSquare {
    pub item: String,
    pub col: i32,
    pub row: i32,
}

impl ItemSquare {
    /// Create a new item placement.
    #[must_use]
    pub fn new(item: impl Into<String>, col: i32, row: i32) -> Self {
        Self {
            item: item.into(),
            col,
            row,
        }
    }

    /// The square this item sits on.
    #[must_use]
    pub const fn square(&self) -> Square {
        Square::new(self.col, self.row)
    }
}

impl fmt::Display for ItemSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {} {}]", self.item, self.col, self.row)
    }
}

/// Coordinate frame for reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frame {
    /// Raw grid indices, origin at the top-left square.
    Absolute,
    /// Offsets from the square holding the self marker.
    ///
    /// Falls back to absolute coordinates when the self marker is absent.
    SelfRelative,
}

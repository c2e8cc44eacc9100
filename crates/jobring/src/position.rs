//! Positions on the circular keyspace.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of slots on the ring. Positions live in `[0, SLOT_COUNT)`.
pub const SLOT_COUNT: u32 = 4095;

/// A slot on the ring.
///
/// The keyspace is circular: `SLOT_COUNT - 1` is adjacent to `0`, so offsets
/// always wrap back into range.
///
/// Deserializing goes through [`TryFrom<u32>`], so out-of-range values are
/// rejected instead of reduced.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Position(u32);

impl Position {
    /// The lowest slot, where lookups wrap around to.
    pub const ZERO: Position = Position(0);

    /// Highest valid slot.
    pub const MAX: Position = Position(SLOT_COUNT - 1);

    /// Reduces an arbitrary value into the keyspace.
    #[inline]
    pub fn from_raw(value: u32) -> Self {
        Position(value % SLOT_COUNT)
    }

    /// Returns the slot index.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Moves `offset` slots clockwise, wrapping past the end of the ring.
    #[inline]
    pub fn offset(self, offset: u32) -> Self {
        Position(((self.0 as u64 + offset as u64) % SLOT_COUNT as u64) as u32)
    }
}

impl TryFrom<u32> for Position {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value <= Position::MAX.0 {
            Ok(Position(value))
        } else {
            Err(Error::PositionOutOfRange { value })
        }
    }
}

impl From<Position> for u32 {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

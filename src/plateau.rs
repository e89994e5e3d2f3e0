//! Plateau board model: 19 fixed slots addressed by [`BoardPosition`].

use crate::tile::EMPTY_TILE_IMAGE;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Number of slots on a plateau.
pub const PLATEAU_SLOTS: usize = 19;

/// A slot index on the plateau (0-18).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct BoardPosition(u8);

impl BoardPosition {
    /// First slot.
    pub const MIN: BoardPosition = BoardPosition(0);
    /// Last slot.
    pub const MAX: BoardPosition = BoardPosition(PLATEAU_SLOTS as u8 - 1);

    /// Creates a position from a slot index, or `None` if it is off the board.
    #[instrument]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < PLATEAU_SLOTS).then_some(Self(index as u8))
    }

    /// Converts to a slot index (0-18).
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// All 19 positions in slot order.
    pub fn all() -> impl Iterator<Item = BoardPosition> {
        (0..PLATEAU_SLOTS as u8).map(BoardPosition)
    }
}

/// Raw position value that does not address a plateau slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Position {} is outside 0-18", value)]
pub struct OutOfBoard {
    /// The rejected raw value.
    pub value: i64,
}

impl TryFrom<i64> for BoardPosition {
    type Error = OutOfBoard;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(Self::from_index)
            .ok_or(OutOfBoard { value })
    }
}

impl From<BoardPosition> for u8 {
    fn from(position: BoardPosition) -> Self {
        position.0
    }
}

/// A player's board: exactly [`PLATEAU_SLOTS`] tile images.
///
/// Unfilled slots hold [`EMPTY_TILE_IMAGE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Plateau {
    slots: Vec<String>,
}

impl Plateau {
    /// Creates an empty plateau.
    pub fn new() -> Self {
        Self {
            slots: vec![EMPTY_TILE_IMAGE.to_string(); PLATEAU_SLOTS],
        }
    }

    /// Builds a plateau from a server image list.
    ///
    /// Short lists are padded with the empty sentinel, extra entries are dropped,
    /// and blank strings count as empty.
    #[instrument(skip(images), fields(len = images.len()))]
    pub fn from_images(images: &[String]) -> Self {
        if images.len() != PLATEAU_SLOTS {
            debug!(len = images.len(), "Normalizing plateau image list");
        }
        let mut plateau = Self::new();
        for (slot, image) in plateau.slots.iter_mut().zip(images) {
            if !image.trim().is_empty() {
                slot.clone_from(image);
            }
        }
        plateau
    }

    /// Returns the image at a slot.
    pub fn get(&self, position: BoardPosition) -> &str {
        &self.slots[position.index()]
    }

    /// Returns a copy with `image` placed at `position`.
    #[must_use]
    pub fn with_placed(&self, position: BoardPosition, image: &str) -> Self {
        let mut next = self.clone();
        next.slots[position.index()] = image.to_string();
        next
    }

    /// Whether a slot holds the empty sentinel.
    pub fn is_empty_at(&self, position: BoardPosition) -> bool {
        self.get(position) == EMPTY_TILE_IMAGE
    }

    /// Number of non-empty slots.
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.as_str() != EMPTY_TILE_IMAGE).count()
    }

    /// Whether every slot is filled.
    pub fn is_full(&self) -> bool {
        self.filled_count() == PLATEAU_SLOTS
    }

    /// Returns all slots in order.
    pub fn slots(&self) -> &[String] {
        &self.slots
    }
}

impl Default for Plateau {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<String>> for Plateau {
    fn from(images: Vec<String>) -> Self {
        Self::from_images(&images)
    }
}

impl From<Plateau> for Vec<String> {
    fn from(plateau: Plateau) -> Self {
        plateau.slots
    }
}

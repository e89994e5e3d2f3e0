//! Tile codec: tile identifiers and image paths to face values.
//!
//! The server identifies a tile by its image path (`../image/168.png`) or by
//! its bare code (`168`). Each of the three digits is the value of one of the
//! tile's three line directions.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Image used by the server for an unfilled plateau slot.
pub const EMPTY_TILE_IMAGE: &str = "../image/000.png";

/// Values that appear on each line direction in the standard deck.
const STANDARD_FACES: [[u8; 3]; 3] = [[1, 5, 9], [2, 6, 7], [3, 4, 8]];

/// A tile's three face values, each in `1..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    faces: [u8; 3],
}

impl Tile {
    /// Creates a tile from face values, or `None` if any face is outside `1..=9`.
    #[instrument]
    pub fn new(a: u8, b: u8, c: u8) -> Option<Self> {
        let faces = [a, b, c];
        faces
            .iter()
            .all(|face| (1..=9).contains(face))
            .then_some(Self { faces })
    }

    /// Parses a tile path or code into its face values.
    ///
    /// Only the file name matters: any directory prefix is ignored and the
    /// extension is dropped. The stem must end in a run of exactly three
    /// digits, each non-zero, so `tile168.png` decodes but `1168.png` and
    /// the empty-slot image `000.png` yield `None`.
    #[instrument]
    pub fn parse(path: &str) -> Option<Self> {
        let file_name = path.rsplit(['/', '\\']).next()?;
        let stem = match file_name.rsplit_once('.') {
            Some((stem, _extension)) => stem,
            None => file_name,
        };

        let prefix = stem.trim_end_matches(|c: char| c.is_ascii_digit());
        let run = &stem[prefix.len()..];
        if run.len() != 3 {
            return None;
        }

        let mut digits = run.bytes().map(|b| b - b'0');
        Self::new(digits.next()?, digits.next()?, digits.next()?)
    }

    /// Returns the face values in order.
    pub fn faces(&self) -> (u8, u8, u8) {
        (self.faces[0], self.faces[1], self.faces[2])
    }

    /// Returns the three-digit code, e.g. `"168"`.
    pub fn code(&self) -> String {
        self.faces.iter().map(|face| char::from(b'0' + face)).collect()
    }

    /// Returns the server's image path for this tile.
    pub fn image_path(&self) -> String {
        format!("../image/{}.png", self.code())
    }

    /// Whether every face comes from the standard deck's value set for its direction.
    pub fn is_standard(&self) -> bool {
        self.faces
            .iter()
            .zip(STANDARD_FACES.iter())
            .all(|(face, allowed)| allowed.contains(face))
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_separator_is_a_directory() {
        assert_eq!(Tile::parse(r"..\image\573.png").map(|t| t.faces()), Some((5, 7, 3)));
    }

    #[test]
    fn test_zero_face_rejected() {
        assert_eq!(Tile::parse("image/108.png"), None);
        assert_eq!(Tile::parse(EMPTY_TILE_IMAGE), None);
    }

    #[test]
    fn test_non_digit_rejected() {
        assert_eq!(Tile::parse("image/1a8.png"), None);
    }

    #[test]
    fn test_only_trailing_digit_run_counts() {
        assert_eq!(Tile::parse("image/v2_168.png").map(|t| t.faces()), Some((1, 6, 8)));
        assert_eq!(Tile::parse("image/tile1168.png"), None);
    }

    #[test]
    fn test_code_round_trips_through_image_path() {
        let tile = Tile::new(9, 2, 4).expect("valid faces");
        assert_eq!(tile.image_path(), "../image/924.png");
        assert_eq!(Tile::parse(&tile.image_path()), Some(tile));
    }

    #[test]
    fn test_standard_deck_faces() {
        assert!(Tile::new(1, 6, 8).expect("valid").is_standard());
        assert!(!Tile::new(6, 1, 8).expect("valid").is_standard());
    }
}

//! Current tile invariant: no image without a tile.

use super::Invariant;
use crate::GameSnapshot;

/// Invariant: `current_tile_image` is absent whenever `current_tile` is.
pub struct TileImageRequiresTile;

impl Invariant<GameSnapshot> for TileImageRequiresTile {
    fn holds(snapshot: &GameSnapshot) -> bool {
        snapshot.current_tile().is_some() || snapshot.current_tile_image().is_none()
    }

    fn description() -> &'static str {
        "Current tile image requires a current tile"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_with_image_holds() {
        let snapshot = GameSnapshot::new()
            .with_current_tile(Some("168".to_string()))
            .with_current_tile_image(Some("../image/168.png".to_string()));
        assert!(TileImageRequiresTile::holds(&snapshot));
    }

    #[test]
    fn test_tile_without_image_holds() {
        let snapshot = GameSnapshot::new().with_current_tile(Some("168".to_string()));
        assert!(TileImageRequiresTile::holds(&snapshot));
    }

    #[test]
    fn test_orphan_image_violates() {
        let snapshot =
            GameSnapshot::new().with_current_tile_image(Some("../image/168.png".to_string()));
        assert!(!TileImageRequiresTile::holds(&snapshot));
    }
}

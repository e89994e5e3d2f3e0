//! Tests for tile path decoding.

use plateau_sync::{EMPTY_TILE_IMAGE, Tile};

fn faces(path: &str) -> Option<(u8, u8, u8)> {
    Tile::parse(path).map(|tile| tile.faces())
}

#[test]
fn test_relative_image_path() {
    assert_eq!(faces("image/168.png"), Some((1, 6, 8)));
}

#[test]
fn test_parent_directory_prefix() {
    assert_eq!(faces("../image/573.png"), Some((5, 7, 3)));
}

#[test]
fn test_deep_directory_prefix() {
    assert_eq!(faces("/srv/static/assets/image/924.png"), Some((9, 2, 4)));
}

#[test]
fn test_bare_code() {
    assert_eq!(faces("168"), Some((1, 6, 8)));
}

#[test]
fn test_too_few_digits() {
    assert_eq!(faces("image/12.png"), None);
}

#[test]
fn test_too_many_digits() {
    assert_eq!(faces("image/1234.png"), None);
}

#[test]
fn test_empty_input() {
    assert_eq!(faces(""), None);
}

#[test]
fn test_directory_only() {
    assert_eq!(faces("../image/"), None);
}

#[test]
fn test_legacy_prefix_in_file_name() {
    assert_eq!(faces("image/tile168.png"), Some((1, 6, 8)));
    assert_eq!(faces("../image/tile_573.png"), Some((5, 7, 3)));
}

#[test]
fn test_prefixed_run_too_long() {
    assert_eq!(faces("image/tile1168.png"), None);
}

#[test]
fn test_prefix_without_digits() {
    assert_eq!(faces("image/tile.png"), None);
}

#[test]
fn test_empty_slot_sentinel() {
    assert_eq!(faces(EMPTY_TILE_IMAGE), None);
}

#[test]
fn test_display_is_code() {
    let tile = Tile::parse("../image/573.png").expect("valid tile");
    assert_eq!(tile.to_string(), "573");
}

//! Integration tests for the diagonal stripe geometry.
//!
//! Fixed scenarios check the stripes users actually drag; the property tests
//! check the invariants every stripe must keep, whatever the box, anchor and
//! thickness.

use bulldoze_extensions::geometry::{
    compute_diagonal_region, diagonal_region_in, Anchor, CellBounds, CellRegion, DiagonalDirection,
};
use proptest::prelude::*;

fn sorted_cells(region: &CellRegion) -> Vec<(i32, i32)> {
    let mut cells: Vec<_> = region.selected_cells().collect();
    cells.sort_unstable();
    cells
}

#[test]
fn test_square_thickness_one_is_main_diagonal() {
    let region = compute_diagonal_region(0, 0, 4, 4, Some(Anchor::new(1, 1)), 1);

    assert_eq!(region.bounds(), CellBounds::from_corners(0, 0, 4, 4));
    assert_eq!(
        sorted_cells(&region),
        vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]
    );
}

#[test]
fn test_square_thickness_three_widens_along_x() {
    let region = compute_diagonal_region(0, 0, 4, 4, Some(Anchor::new(1, 1)), 3);

    let mut expected: Vec<(i32, i32)> = (0..=4)
        .flat_map(|step| (0..3).map(move |offset| (step + offset, step)))
        .filter(|&(x, _)| x <= 4)
        .collect();
    expected.sort_unstable();

    assert_eq!(sorted_cells(&region), expected);
    assert_eq!(region.selected_count(), 12);
}

#[test]
fn test_negative_thickness_widens_towards_smaller_coordinates() {
    let region = compute_diagonal_region(0, 0, 4, 4, None, -2);

    assert!(region.is_selected(0, 0));
    assert!(region.is_selected(1, 2) && region.is_selected(2, 2));
    assert!(!region.is_selected(3, 2));
    assert_eq!(region.selected_count(), 9);
}

#[test]
fn test_wide_box_widens_along_z() {
    let region = compute_diagonal_region(0, 0, 9, 2, None, 2);

    for (x, z) in region.selected_cells() {
        assert!(region.bounds().contains(x, z));
    }
    assert!(region.is_selected(0, 0) && region.is_selected(0, 1));
    assert!(region.is_selected(9, 2));
    for x in 0..=9 {
        assert!((0..=2).any(|z| region.is_selected(x, z)), "column {x} is empty");
    }
}

#[test]
fn test_anchor_picks_start_corner() {
    let bounds = CellBounds::from_corners(10, 20, 16, 26);

    let north_east = diagonal_region_in(bounds, Some(Anchor::new(16, 20)), 1);
    assert!(north_east.is_selected(16, 20));
    assert!(north_east.is_selected(10, 26));
    assert!(!north_east.is_selected(10, 20));

    let south_east = diagonal_region_in(bounds, Some(Anchor::new(15, 25)), 1);
    assert_eq!(
        DiagonalDirection::from_anchor(&bounds, Some(Anchor::new(15, 25))),
        DiagonalDirection::SouthEastToNorthWest
    );
    assert!(south_east.is_selected(16, 26));
    assert!(south_east.is_selected(10, 20));
}

#[test]
fn test_corner_order_does_not_matter() {
    let forward = compute_diagonal_region(0, 0, 5, 3, Some(Anchor::new(0, 0)), 2);
    let reversed = compute_diagonal_region(5, 3, 0, 0, Some(Anchor::new(0, 0)), 2);
    assert_eq!(forward, reversed);
}

#[test]
fn test_single_cell_box() {
    let region = compute_diagonal_region(7, 7, 7, 7, Some(Anchor::new(7, 7)), 9);
    assert_eq!(sorted_cells(&region), vec![(7, 7)]);
}

#[test]
fn test_in_place_overwrite_requires_matching_bounds() {
    let bounds = CellBounds::from_corners(0, 0, 4, 4);
    let mut host = CellRegion::new(bounds, true);

    let diagonal = diagonal_region_in(bounds, None, 1);
    assert!(host.overwrite_from(&diagonal));
    assert_eq!(host, diagonal);

    let mut other = CellRegion::new(CellBounds::from_corners(0, 0, 5, 4), true);
    let before = other.clone();
    assert!(!other.overwrite_from(&diagonal));
    assert_eq!(other, before);
}

fn bounds_strategy() -> impl Strategy<Value = (i32, i32, i32, i32)> {
    (-50i32..50, -50i32..50, 0i32..40, 0i32..40)
        .prop_map(|(x, z, width, height)| (x, z, x + width, z + height))
}

fn thickness_strategy() -> impl Strategy<Value = i32> {
    prop_oneof![1i32..=9, -9i32..=-1]
}

proptest! {
    #[test]
    fn prop_map_dimensions_match_box(
        (x1, z1, x2, z2) in bounds_strategy(),
        thickness in thickness_strategy(),
    ) {
        let region = compute_diagonal_region(x1, z1, x2, z2, None, thickness);
        let bounds = region.bounds();

        prop_assert_eq!(region.cells().width(), bounds.width());
        prop_assert_eq!(region.cells().height(), bounds.height());
        prop_assert_eq!(bounds.width(), (x2 - x1 + 1) as usize);
        prop_assert_eq!(bounds.height(), (z2 - z1 + 1) as usize);
    }

    #[test]
    fn prop_computation_is_deterministic(
        (x1, z1, x2, z2) in bounds_strategy(),
        anchor in proptest::option::of((-60i32..60, -60i32..60)),
        thickness in thickness_strategy(),
    ) {
        let anchor = anchor.map(|(x, z)| Anchor::new(x, z));
        let first = compute_diagonal_region(x1, z1, x2, z2, anchor, thickness);
        let second = compute_diagonal_region(x1, z1, x2, z2, anchor, thickness);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_stripe_connects_opposite_corners(
        (x1, z1, x2, z2) in bounds_strategy(),
        anchor in proptest::option::of((-60i32..60, -60i32..60)),
        thickness in thickness_strategy(),
    ) {
        let anchor = anchor.map(|(x, z)| Anchor::new(x, z));
        let region = compute_diagonal_region(x1, z1, x2, z2, anchor, thickness);
        let bounds = region.bounds();
        let direction = DiagonalDirection::from_anchor(&bounds, anchor);

        let (sx, sz) = bounds.corner(direction.start());
        let (ex, ez) = bounds.corner(direction.end());
        prop_assert!(region.is_selected(sx, sz));
        prop_assert!(region.is_selected(ex, ez));
    }

    #[test]
    fn prop_thicker_stripes_cover_thinner_ones(
        (x1, z1, x2, z2) in bounds_strategy(),
        thickness in 1i32..9,
    ) {
        let thin = compute_diagonal_region(x1, z1, x2, z2, None, thickness);
        let thick = compute_diagonal_region(x1, z1, x2, z2, None, thickness + 1);

        for (x, z) in thin.selected_cells() {
            prop_assert!(thick.is_selected(x, z));
        }
        prop_assert!(thick.selected_count() >= thin.selected_count());
    }
}

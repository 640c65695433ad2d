#![no_main]

use bulldoze_extensions::geometry::{compute_diagonal_region, Anchor};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (i16, i16, u8, u8, Option<(i16, i16)>, i8)| {
    let (x, z, width, height, anchor, thickness) = data;
    let (x, z) = (i32::from(x), i32::from(z));
    let anchor = anchor.map(|(ax, az)| Anchor::new(i32::from(ax), i32::from(az)));

    let region = compute_diagonal_region(
        x,
        z,
        x + i32::from(width),
        z + i32::from(height),
        anchor,
        i32::from(thickness),
    );
    for (cx, cz) in region.selected_cells() {
        assert!(region.bounds().contains(cx, cz));
    }
});

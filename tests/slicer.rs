use conquest::geometry::Rect;
use conquest::slicer::*;
use image::{Rgba, RgbaImage};

const OPAQUE: Rgba<u8> = Rgba([200, 40, 40, 255]);

// Helper: transparent image with the listed pixels set opaque.
fn image_with(w: u32, h: u32, opaque: &[(u32, u32)]) -> RgbaImage {
    let mut img = RgbaImage::new(w, h);
    for &(x, y) in opaque {
        img.put_pixel(x, y, OPAQUE);
    }
    img
}

// Helper: deterministic noise so property checks cover irregular shapes.
fn noise_image(w: u32, h: u32, seed: u64, density: u64) -> RgbaImage {
    let mut state = seed;
    RgbaImage::from_fn(w, h, |_, _| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        if (state >> 33) % 100 < density { OPAQUE } else { Rgba([0, 0, 0, 0]) }
    })
}

// ── Scenarios ─────────────────────────────────────────────────────────────

#[test]
fn square_block_in_4x4_gives_one_region() {
    let img = image_with(4, 4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
    assert_eq!(extract_regions(&img), vec![Rect::from_ltrb(1, 1, 3, 3)]);
}

#[test]
fn transparent_images_give_no_regions() {
    for (w, h) in [(0, 0), (0, 5), (5, 0), (1, 1), (17, 3), (64, 64)] {
        assert!(extract_regions(&RgbaImage::new(w, h)).is_empty(), "{w}x{h}");
    }
}

#[test]
fn single_pixel_gives_unit_region() {
    for (x0, y0) in [(0, 0), (9, 0), (0, 6), (4, 3), (9, 6)] {
        let img = image_with(10, 7, &[(x0, y0)]);
        assert_eq!(extract_regions(&img), vec![Rect::from_ltrb(x0, y0, x0 + 1, y0 + 1)]);
    }
}

#[test]
fn diagonal_pixels_are_separate_regions() {
    let img = image_with(2, 2, &[(0, 0), (1, 1)]);
    let regions = extract_regions(&img);
    assert_eq!(regions, vec![Rect::pixel(0, 0), Rect::pixel(1, 1)]);
}

#[test]
fn anti_diagonal_pixels_are_separate_regions() {
    let img = image_with(2, 2, &[(1, 0), (0, 1)]);
    assert_eq!(extract_regions(&img), vec![Rect::pixel(1, 0), Rect::pixel(0, 1)]);
}

#[test]
fn bounding_boxes_may_overlap() {
    // An L along the left and bottom edges, plus a lone pixel inside its box.
    let mut pixels: Vec<(u32, u32)> = (0..5).map(|y| (0, y)).collect();
    pixels.extend((1..5).map(|x| (x, 4)));
    pixels.push((2, 2));
    let img = image_with(5, 5, &pixels);

    let regions = extract_regions(&img);
    assert_eq!(regions, vec![Rect::from_ltrb(0, 0, 5, 5), Rect::pixel(2, 2)]);
    assert!(regions[0].intersects(&regions[1]));
}

#[test]
fn partial_alpha_counts_as_opaque_by_default() {
    let mut img = RgbaImage::new(3, 1);
    img.put_pixel(1, 0, Rgba([0, 0, 0, 1]));
    assert_eq!(extract_regions(&img), vec![Rect::pixel(1, 0)]);
}

#[test]
fn alpha_threshold_drops_faint_pixels() {
    let mut img = RgbaImage::new(4, 1);
    img.put_pixel(0, 0, Rgba([0, 0, 0, 10]));
    img.put_pixel(1, 0, Rgba([0, 0, 0, 11]));
    img.put_pixel(2, 0, Rgba([0, 0, 0, 255]));
    let opts = SliceOptions::default().with_alpha_threshold(10);
    assert_eq!(extract_regions_with_options(&img, opts), vec![Rect::from_ltrb(1, 0, 3, 1)]);
}

#[test]
fn checkerboard_gives_one_region_per_opaque_pixel() {
    let img = RgbaImage::from_fn(8, 8, |x, y| if (x + y) % 2 == 0 { OPAQUE } else { Rgba([0; 4]) });
    let regions = extract_regions(&img);
    assert_eq!(regions.len(), 32);
    assert!(regions.iter().all(|r| r.area() == 1));
}

#[test]
fn long_serpentine_does_not_overflow() {
    // One 4-connected snake filling every other row; a recursive fill would
    // need one frame per pixel.
    let (w, h) = (512u32, 511u32);
    let img = RgbaImage::from_fn(w, h, |x, y| {
        let row = y / 2;
        let on_path = y % 2 == 0 || (row % 2 == 0 && x == w - 1) || (row % 2 == 1 && x == 0);
        if on_path { OPAQUE } else { Rgba([0; 4]) }
    });
    assert_eq!(extract_regions(&img), vec![Rect::from_ltrb(0, 0, w, h)]);
}

// ── Properties over irregular input ──────────────────────────────────────

#[test]
fn every_opaque_pixel_has_exactly_one_owner() {
    for seed in 1..6 {
        let img = noise_image(40, 30, seed, 45);
        let labels = label_regions(&img, SliceOptions::default());

        let mut total = 0u64;
        for (x, y, px) in img.enumerate_pixels() {
            match labels.label_at(x, y) {
                Some(label) => {
                    assert!(px.0[3] > 0, "transparent pixel ({x},{y}) got a label");
                    assert!(labels.regions()[label].contains(x, y));
                    total += 1;
                }
                None => assert_eq!(px.0[3], 0, "opaque pixel ({x},{y}) has no label"),
            }
        }
        let counted: u64 = (0..labels.regions().len()).map(|l| labels.pixel_count(l)).sum();
        assert_eq!(counted, total);
    }
}

#[test]
fn regions_are_minimal_bounding_boxes() {
    for seed in 10..14 {
        let img = noise_image(32, 32, seed, 55);
        let labels = label_regions(&img, SliceOptions::default());

        for (label, rect) in labels.regions().iter().enumerate() {
            let members: Vec<(u32, u32)> = img
                .enumerate_pixels()
                .map(|(x, y, _)| (x, y))
                .filter(|&(x, y)| labels.label_at(x, y) == Some(label))
                .collect();
            let min_x = members.iter().map(|p| p.0).min().unwrap();
            let max_x = members.iter().map(|p| p.0).max().unwrap();
            let min_y = members.iter().map(|p| p.1).min().unwrap();
            let max_y = members.iter().map(|p| p.1).max().unwrap();
            assert_eq!(*rect, Rect::from_ltrb(min_x, min_y, max_x + 1, max_y + 1));
        }
    }
}

#[test]
fn components_are_not_4_connected_to_each_other() {
    let img = noise_image(24, 24, 99, 50);
    let labels = label_regions(&img, SliceOptions::default());
    for y in 0..24 {
        for x in 0..23 {
            if let (Some(a), Some(b)) = (labels.label_at(x, y), labels.label_at(x + 1, y)) {
                assert_eq!(a, b, "horizontal neighbours ({x},{y}) split");
            }
            if let (Some(a), Some(b)) = (labels.label_at(y, x), labels.label_at(y, x + 1)) {
                assert_eq!(a, b, "vertical neighbours ({y},{x}) split");
            }
        }
    }
}

#[test]
fn emission_order_is_row_major_by_first_pixel() {
    let img = noise_image(30, 30, 7, 40);
    let labels = label_regions(&img, SliceOptions::default());
    let firsts: Vec<(u32, u32)> = labels
        .regions()
        .iter()
        .enumerate()
        .map(|(label, r)| {
            let x = (r.min_x..r.max_x)
                .find(|&x| labels.label_at(x, r.min_y) == Some(label))
                .unwrap();
            (r.min_y, x)
        })
        .collect();
    let mut sorted = firsts.clone();
    sorted.sort();
    assert_eq!(firsts, sorted);
}

#[test]
fn labelling_and_extraction_agree() {
    let img = noise_image(50, 20, 3, 60);
    assert_eq!(
        label_regions(&img, SliceOptions::default()).into_regions(),
        extract_regions(&img)
    );
}

#[test]
fn works_on_dynamic_images() {
    let img = image::DynamicImage::ImageRgba8(image_with(3, 3, &[(1, 1)]));
    assert_eq!(extract_regions(&img), vec![Rect::pixel(1, 1)]);
}

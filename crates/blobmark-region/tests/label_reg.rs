//! Region labelling regression test
//!
//! Small hand-built images with known regions: the empty image, isolated
//! pixels, diagonal contacts and shapes that force late class merges.

use blobmark_core::{Point, Rect, RgbImage};
use blobmark_region::{LabelOptions, LabelledImage, label_image, label_image_with_threshold};
use blobmark_test::RegParams;
use blobmark_test::fixtures::image_from_ascii;

fn label(rows: &[&str]) -> LabelledImage {
    label_image(&image_from_ascii(rows), &LabelOptions::default()).unwrap()
}

#[test]
fn label_reg() {
    let mut rp = RegParams::new("label");

    // --- Test 1: all background at threshold 0.0 ---
    let mut img = RgbImage::new(5, 5).unwrap();
    img.fill(1, 0, 0);
    let l = label_image_with_threshold(&img, 0.0).unwrap();
    rp.compare_values(0.0, l.region_count() as f64, 0.0);
    rp.check(l.grid().iter().all(|(_, v)| v == 0), "empty grid");
    rp.check(l.aliases().is_empty(), "no labels allocated");

    // --- Test 2: single pixel at (2,2) ---
    img.set_rgb(2, 2, 0, 0, 0).unwrap();
    let l = label_image_with_threshold(&img, 0.0).unwrap();
    rp.compare_values(1.0, l.region_count() as f64, 0.0);
    let (id, stats) = l.iter_regions().next().unwrap();
    rp.compare_values(1.0, id as f64, 0.0);
    rp.compare_values(1.0, stats.mass as f64, 0.0);
    rp.check(stats.min_corner == Point::new(2, 2), "min corner (2,2)");
    rp.check(stats.max_corner == Point::new(2, 2), "max corner (2,2)");
    eprintln!("  single pixel: {:?}", stats);

    // --- Test 3: diagonal pair ---
    let l = label(&["#....", ".#...", ".....", ".....", "....."]);
    rp.compare_values(1.0, l.region_count() as f64, 0.0);
    rp.compare_values(2.0, l.foreground_count() as f64, 0.0);
    rp.check(
        l.label_at(0, 0) == l.label_at(1, 1),
        "diagonal neighbors share a label",
    );

    // --- Test 4: hourglass, NE and W both labelled ---
    let l = label(&["#...#", ".#.#.", "..#..", ".#.#.", "#...#"]);
    rp.compare_values(1.0, l.region_count() as f64, 0.0);
    let stats = l.region(l.label_at(2, 2)).unwrap();
    rp.compare_values(9.0, stats.mass as f64, 0.0);
    rp.check(
        stats.bounds() == Some(Rect::new(0, 0, 5, 5)),
        "hourglass spans the image",
    );

    // --- Test 5: West + North-East merge in one step ---
    let l = label(&["..#.", "##..", "....", "...."]);
    rp.compare_values(1.0, l.region_count() as f64, 0.0);
    rp.compare_values(2.0, l.aliases().len() as f64, 0.0);
    rp.check(l.aliases().resolve(2) == 1, "label 2 folded into 1");
    rp.compare_values(3.0, l.region(1).map_or(0, |s| s.mass) as f64, 0.0);

    // --- Test 6: separate regions keep their own boxes ---
    let l = label(&["##....", "##....", "......", "....#.", "...###"]);
    rp.compare_values(2.0, l.region_count() as f64, 0.0);
    let first = l.region(l.label_at(0, 0)).unwrap();
    let second = l.region(l.label_at(4, 4)).unwrap();
    rp.check(first.bounds() == Some(Rect::new(0, 0, 2, 2)), "square box");
    rp.check(second.bounds() == Some(Rect::new(3, 3, 3, 2)), "cap box");
    rp.compare_values(4.0, second.mass as f64, 0.0);

    // --- Test 7: deep U merges at the bottom row ---
    let l = label(&["#...#", "#...#", "#...#", "#####"]);
    rp.compare_values(1.0, l.region_count() as f64, 0.0);
    rp.compare_values(2.0, l.aliases().len() as f64, 0.0);
    rp.check(l.grid().get(4, 0) == 2, "right arm keeps its stale label");
    rp.check(l.label_at(4, 0) == 1, "right arm resolves to the left arm");
    rp.check(l.region(2).is_none(), "merged label is a placeholder");

    // --- Test 8: 1x1 images ---
    let l = label(&["#"]);
    rp.compare_values(1.0, l.region_count() as f64, 0.0);
    let l = label(&["."]);
    rp.compare_values(0.0, l.region_count() as f64, 0.0);

    assert!(rp.cleanup(), "label regression test failed");
}

#[test]
fn label_reg_threshold() {
    let mut rp = RegParams::new("label_threshold");

    // Three gray levels; channel sums 0, 300 and 600
    let mut img = RgbImage::new(3, 1).unwrap();
    img.set_rgb(0, 0, 0, 0, 0).unwrap();
    img.set_rgb(1, 0, 100, 100, 100).unwrap();
    img.set_rgb(2, 0, 200, 200, 200).unwrap();

    for (threshold, expected) in [(0.0, 1.0), (0.4, 2.0), (0.5, 2.0), (0.8, 3.0), (1.0, 3.0)] {
        let l = label_image_with_threshold(&img, threshold).unwrap();
        eprintln!(
            "  threshold {:.1}: {} foreground",
            threshold,
            l.foreground_count()
        );
        rp.compare_values(expected, l.foreground_count() as f64, 0.0);
        // Adjacent foreground pixels always form one run
        rp.compare_values(1.0, l.region_count() as f64, 0.0);
    }

    assert!(rp.cleanup(), "label_threshold regression test failed");
}

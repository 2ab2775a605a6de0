use std::collections::HashSet;

use anyconf_model::ItemId;
use anyconf_pager::{PageLayoutPacker, RenderedItem};

/// Deterministic height sequence in `[min, max]`.
fn heights(seed: u64, count: usize, min: f32, max: f32) -> Vec<f32> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let unit = (state >> 40) as f32 / (1u64 << 24) as f32;
            (min + unit * (max - min)).round()
        })
        .collect()
}

#[test]
fn pages_never_overflow_for_items_that_fit() {
    for seed in 1..40 {
        let page_height = 400.0 + (seed % 5) as f32 * 50.0;
        let sizes = heights(seed, 60, 20.0, page_height);

        let mut packer = PageLayoutPacker::new(page_height);
        for (i, h) in sizes.iter().enumerate() {
            packer.pack(RenderedItem::new(format!("s{i}"), *h));
        }
        let packed = packer.finish();

        let mut seen = Vec::new();
        for page in &packed.pages {
            assert!(!page.is_empty(), "seed {seed}: empty page");
            assert!(
                page.content_height() <= page_height,
                "seed {seed}: {} overflows",
                page.id()
            );
            let placed = page.items();
            for (placed, next) in placed.iter().zip(placed.iter().skip(1)) {
                assert_eq!(placed.bottom(), next.rendered_top);
            }
            assert_eq!(page.items()[0].rendered_top, 0.0);
            seen.extend(page.items().iter().map(|placed| placed.id.clone()));
        }

        let expected: Vec<ItemId> = (0..sizes.len())
            .map(|i| ItemId::from(format!("s{i}")))
            .collect();
        assert_eq!(seen, expected, "seed {seed}: items lost or reordered");
        let unique: HashSet<_> = seen.iter().collect();
        assert_eq!(unique.len(), seen.len());

        for (i, page) in packed.pages.iter().enumerate() {
            for placed in page.items() {
                assert_eq!(packed.by_item[&placed.id].index(), i);
            }
        }
    }
}

#[test]
fn oversize_items_stand_alone() {
    let sizes = [120.0, 900.0, 80.0, 80.0];
    let mut packer = PageLayoutPacker::new(500.0);
    for (i, h) in sizes.iter().enumerate() {
        packer.pack(RenderedItem::new(format!("s{i}"), *h));
    }
    let packed = packer.finish();

    let per_page: Vec<usize> =
        packed.pages.iter().map(|page| page.items().len()).collect();
    assert_eq!(per_page, vec![1, 1, 2]);
    let heights: Vec<f32> =
        packed.pages.iter().map(|page| page.height()).collect();
    assert_eq!(heights, vec![500.0, 900.0, 500.0]);
}

//! Property tests for the reorder strategy over randomly shaped grids.

use flexsort_core::topology;
use flexsort_core::{
    ElementSizes, GridKey, GridMetrics, GroupId, HorizontalDirection, ItemId, KeyOrder, Point,
    VerticalDirection,
};
use flexsort_strategy::origin::origin_x;
use flexsort_strategy::transform::{swap_item, swap_row};
use flexsort_strategy::{Decision, DragSnapshot, GridReorderStrategy, SortStrategy};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Grid {
    order: KeyOrder,
    sizes: ElementSizes,
}

/// Rows of 1..=4 items; item widths 20..200, row heights 40..150.
fn grid_strategy() -> impl Strategy<Value = Grid> {
    prop::collection::vec(
        (40.0f64..150.0, prop::collection::vec(20.0f64..200.0, 1..=4)),
        1..=6,
    )
    .prop_map(|rows| {
        let mut keys = Vec::new();
        let mut sizes = ElementSizes::default();
        let mut next_item = 1;
        for (row, (height, widths)) in rows.into_iter().enumerate() {
            let group = GroupId::new(row as u32 + 1);
            keys.push(GridKey::marker(group));
            sizes.insert(GridKey::marker(group), 36.0, height);
            for width in widths {
                let key = GridKey::item(group, ItemId::new(next_item));
                next_item += 1;
                keys.push(key);
                sizes.insert(key, width, height);
            }
        }
        Grid {
            order: KeyOrder::new(keys).expect("generated keys are unique"),
            sizes,
        }
    })
}

fn sorted(order: &KeyOrder) -> Vec<GridKey> {
    let mut keys = order.keys().to_vec();
    keys.sort();
    keys
}

fn evaluate(grid: &Grid, index: usize, dx: f64, dy: f64) -> flexsort_strategy::StrategyOutcome {
    let strategy = GridReorderStrategy::new(GridMetrics::default());
    let key = grid.order.get(index).expect("index in range");
    let probe = DragSnapshot::new(key, index, Point::default(), &grid.order, &grid.sizes);
    let rest = strategy.origin(&probe).expect("generated grid is measured");
    strategy.evaluate(&DragSnapshot::new(
        key,
        index,
        Point::new(rest.x + dx, rest.y + dy),
        &grid.order,
        &grid.sizes,
    ))
}

proptest! {
    #[test]
    fn small_offsets_never_reorder(
        grid in grid_strategy(),
        pick in any::<prop::sample::Index>(),
        dx in -12.0f64..=12.0,
        dy in -19.0f64..=19.0,
    ) {
        let index = pick.index(grid.order.len());
        let outcome = evaluate(&grid, index, dx, dy);
        prop_assert_eq!(outcome.decision, Decision::NoChange);
        prop_assert_eq!(&outcome.order, &grid.order);
        prop_assert!(outcome.row_exit.is_none());
    }

    #[test]
    fn every_outcome_is_a_permutation(
        grid in grid_strategy(),
        pick in any::<prop::sample::Index>(),
        dx in -600.0f64..600.0,
        dy in -600.0f64..600.0,
    ) {
        let index = pick.index(grid.order.len());
        let outcome = evaluate(&grid, index, dx, dy);
        prop_assert_eq!(sorted(&outcome.order), sorted(&grid.order));
        for (position, key) in outcome.order.iter() {
            prop_assert_eq!(outcome.order.index_of(&key), Some(position));
        }
    }

    #[test]
    fn swap_item_is_a_transposition(
        grid in grid_strategy(),
        pick in any::<prop::sample::Index>(),
        right in any::<bool>(),
    ) {
        let index = pick.index(grid.order.len());
        let direction = if right { HorizontalDirection::Right } else { HorizontalDirection::Left };
        if let Some(swapped) = swap_item(&grid.order, index, direction) {
            let changed: Vec<usize> = (0..grid.order.len())
                .filter(|&i| grid.order.get(i) != swapped.get(i))
                .collect();
            prop_assert_eq!(changed.len(), 2);
            let (a, b) = (changed[0], changed[1]);
            prop_assert_eq!(grid.order.get(a), swapped.get(b));
            prop_assert_eq!(grid.order.get(b), swapped.get(a));
            prop_assert_eq!(
                swapped.get(a).map(|key| key.group()),
                swapped.get(b).map(|key| key.group())
            );
        }
    }

    #[test]
    fn swap_row_preserves_items_within_rows(
        grid in grid_strategy(),
        pick in any::<prop::sample::Index>(),
        down in any::<bool>(),
    ) {
        let index = pick.index(grid.order.len());
        let direction = if down { VerticalDirection::Down } else { VerticalDirection::Up };
        if let Some(swapped) = swap_row(&grid.order, index, direction) {
            let mut before = topology::rows(&grid.order);
            let mut after = topology::rows(&swapped);
            prop_assert_eq!(before.len(), after.len());
            before.sort_by_key(|row| row.group);
            after.sort_by_key(|row| row.group);
            for (old, new) in before.iter().zip(&after) {
                prop_assert_eq!(&old.items, &new.items);
            }
            // Each row stays contiguous: marker immediately followed by its items.
            for row in topology::rows(&swapped) {
                for (offset, key) in row.items.iter().enumerate() {
                    prop_assert_eq!(swapped.index_of(key), Some(row.marker_index + offset + 1));
                }
            }
        }
    }

    #[test]
    fn origin_grows_along_a_row(grid in grid_strategy()) {
        let sizes = grid.sizes.measured().expect("measured");
        let metrics = GridMetrics::default();
        for row in topology::rows(&grid.order) {
            let origins: Vec<f64> = row
                .items
                .iter()
                .map(|key| {
                    let index = grid.order.index_of(key).expect("present");
                    origin_x(*key, index, &grid.order, &sizes, &metrics).expect("measured")
                })
                .collect();
            for pair in origins.windows(2) {
                prop_assert!(pair[0] < pair[1], "{origins:?}");
            }
        }
    }

    #[test]
    fn row_edges_never_swap_outward(grid in grid_strategy(), magnitude in 0.0f64..10_000.0) {
        for row in topology::rows(&grid.order) {
            let first = grid.order.index_of(&row.items[0]).expect("present");
            let last = grid.order.index_of(&row.items[row.items.len() - 1]).expect("present");
            let left = evaluate(&grid, first, -magnitude, 0.0);
            prop_assert_ne!(left.decision, Decision::SwapItem(HorizontalDirection::Left));
            let right = evaluate(&grid, last, magnitude, 0.0);
            prop_assert_ne!(right.decision, Decision::SwapItem(HorizontalDirection::Right));
        }
    }
}

#![no_main]

use arbitrary::Arbitrary;
use flexsort_core::{
    ElementSizes, GridItem, GridKey, GridMetrics, GridModel, GridRow, GroupId, ItemId, KeyOrder,
    Point,
};
use flexsort_runtime::{DragSession, GridCoordinator};
use flexsort_strategy::GridReorderStrategy;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    /// One entry per row; the row holds `1 + n % 3` items.
    rows: Vec<u8>,
    drags: Vec<Drag>,
}

#[derive(Debug, Arbitrary)]
struct Drag {
    pick: u16,
    frames: Vec<(i16, i16)>,
    cancel: bool,
}

fn model(rows: &[u8]) -> GridModel {
    let mut next_item = 0u32;
    let rows = rows
        .iter()
        .take(8)
        .zip(1u32..)
        .map(|(count, group)| {
            let items = (0..=count % 3)
                .map(|_| {
                    next_item += 1;
                    GridItem::new(ItemId::new(next_item), "item")
                })
                .collect();
            GridRow::new(GroupId::new(group), "row", items)
        })
        .collect();
    GridModel::new(rows).expect("generated ids are unique")
}

fn measure(order: &KeyOrder) -> ElementSizes {
    let mut sizes = ElementSizes::default();
    for (_, key) in order.iter() {
        let width = if key.is_marker() { 36.0 } else { 100.0 };
        sizes.insert(key, width, 100.0);
    }
    sizes
}

fn sorted(order: &KeyOrder) -> Vec<GridKey> {
    let mut keys = order.keys().to_vec();
    keys.sort();
    keys
}

fuzz_target!(|input: Input| {
    if input.rows.is_empty() {
        return;
    }
    let mut coordinator = GridCoordinator::new(model(&input.rows), GridMetrics::default());
    let sender = coordinator.sender();
    let item_count = coordinator.order().keys().iter().filter(|key| key.is_item()).count();

    for drag in input.drags.iter().take(4) {
        let order = coordinator.order();
        let index = usize::from(drag.pick) % order.len();
        let key = order.get(index).expect("index in range");
        let mut session =
            DragSession::begin(GridReorderStrategy::default(), order, key).expect("key present");

        for &(x, y) in drag.frames.iter().take(16) {
            if session.pending_exit().is_some() {
                coordinator.drain().expect("exit applies");
                session.rebase(coordinator.order()).expect("dragged element survives");
            }
            assert_eq!(sorted(session.order()), sorted(&coordinator.order()));
            let sizes = measure(session.order());
            session.update(Point::new(f64::from(x), f64::from(y)), &sizes, &sender);
            assert_eq!(session.order().get(session.active_index()), Some(session.active_key()));
        }

        if drag.cancel {
            coordinator.discard_pending();
            let _ = session.cancel();
        } else {
            if session.pending_exit().is_some() {
                coordinator.drain().expect("exit applies");
                session.rebase(coordinator.order()).expect("dragged element survives");
            }
            coordinator.commit_order(&session.end()).expect("swaps keep the key set");
        }

        let rows = coordinator.model().rows();
        assert!(rows.iter().all(|row| !row.items.is_empty()), "empty row survived");
        assert!(
            rows.iter()
                .all(|row| row.items.len() <= GridMetrics::default().max_items_per_row),
            "row over capacity"
        );
        assert_eq!(
            coordinator.order().keys().iter().filter(|key| key.is_item()).count(),
            item_count
        );
    }
});

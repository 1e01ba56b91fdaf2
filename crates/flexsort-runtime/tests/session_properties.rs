//! Property tests for drag sessions driven by arbitrary pointer paths.

use flexsort_core::{
    ElementSizes, GridItem, GridKey, GridMetrics, GridModel, GridRow, GroupId, ItemId, KeyOrder,
    Point,
};
use flexsort_runtime::{DragSession, GridCoordinator};
use flexsort_strategy::GridReorderStrategy;
use proptest::prelude::*;

fn coordinator(counts: &[usize]) -> GridCoordinator {
    let mut next_item = 0u32;
    let rows = counts
        .iter()
        .zip(1u32..)
        .map(|(count, group)| {
            let items = (0..*count)
                .map(|_| {
                    next_item += 1;
                    GridItem::new(ItemId::new(next_item), "city")
                })
                .collect();
            GridRow::new(GroupId::new(group), "country", items)
        })
        .collect();
    GridCoordinator::new(
        GridModel::new(rows).expect("generated ids are unique"),
        GridMetrics::default(),
    )
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

proptest! {
    #[test]
    fn frames_keep_session_consistent(
        counts in prop::collection::vec(1usize..=3, 1..=5),
        pick in any::<prop::sample::Index>(),
        path in prop::collection::vec((-50.0f64..500.0, -50.0f64..700.0), 1..24),
    ) {
        let mut coordinator = coordinator(&counts);
        let sender = coordinator.sender();
        let start = coordinator.order();
        let key = start.get(pick.index(start.len())).expect("in range");
        let mut session = DragSession::begin(GridReorderStrategy::default(), start.clone(), key)
            .expect("key present");

        let mut sent = 0;
        for (x, y) in path {
            if session.pending_exit().is_some() {
                coordinator.drain().expect("exit applies");
                session.rebase(coordinator.order()).expect("element survives");
            }
            let sizes = measure(session.order());
            let report = session.update(Point::new(x, y), &sizes, &sender);
            sent += usize::from(report.exit_sent);
            prop_assert_eq!(session.order().get(session.active_index()), Some(session.active_key()));
            prop_assert_eq!(sorted(session.order()), sorted(&coordinator.order()));
            prop_assert!(coordinator.pending() <= 1);
        }

        if key.is_marker() {
            prop_assert_eq!(sent, 0);
        }
        let restored = session.cancel();
        if sent == 0 {
            prop_assert_eq!(restored, start);
        }
    }
}

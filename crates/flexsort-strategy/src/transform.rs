//! Order transforms applied after a swap decision.
//!
//! Both transforms return a fresh [`KeyOrder`] that is a permutation of the
//! input. They return `None` when the swap partner does not exist, which the
//! strategy treats as "no change".

use flexsort_core::topology;
use flexsort_core::{GridKey, HorizontalDirection, KeyOrder, VerticalDirection};
use rustc_hash::FxHashSet;

use crate::decider::{nearest_horizontal, nearest_vertical};

/// Exchange the item at `index` with its nearest same-row sibling in
/// `direction`.
///
/// With contiguous rows the partner is the entry at `index ± 1`. The result
/// differs from the input in exactly two positions and no key changes rows.
#[must_use]
pub fn swap_item(order: &KeyOrder, index: usize, direction: HorizontalDirection) -> Option<KeyOrder> {
    let siblings = topology::sibling_items(index, order)?;
    let partner = nearest_horizontal(&siblings, direction)?;
    let partner_index = order.index_of(&partner)?;
    order.with_swapped(index, partner_index)
}

/// Exchange the row anchored at `marker_index` with the next row in
/// `direction`.
///
/// Both rows are gathered with [`topology::row_of`], removed, and written back
/// as two contiguous blocks (the lower row first) starting at the lowest
/// index either row occupied. Item order inside each row is preserved; keys
/// of other rows keep their relative order.
#[must_use]
pub fn swap_row(order: &KeyOrder, marker_index: usize, direction: VerticalDirection) -> Option<KeyOrder> {
    let rows = topology::sibling_markers(marker_index, order)?;
    let target = nearest_vertical(&rows, direction)?;
    let target_index = order.index_of(&target)?;

    let (upper, lower) = if marker_index < target_index {
        (marker_index, target_index)
    } else {
        (target_index, marker_index)
    };
    let upper_block = topology::row_of(upper, order)?;
    let lower_block = topology::row_of(lower, order)?;

    let moving: FxHashSet<GridKey> = upper_block.iter().chain(&lower_block).copied().collect();
    let start = moving
        .iter()
        .filter_map(|key| order.index_of(key))
        .min()?;

    // Everything before `start` is stationary, so the insertion point is the
    // same in the filtered sequence.
    let mut keys: Vec<GridKey> = Vec::with_capacity(order.len());
    keys.extend_from_slice(&order.keys()[..start]);
    keys.extend(lower_block);
    keys.extend(upper_block);
    keys.extend(
        order.keys()[start..]
            .iter()
            .filter(|key| !moving.contains(*key))
            .copied(),
    );
    order.permuted(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexsort_core::{GroupId, ItemId};

    fn marker(group: u32) -> GridKey {
        GridKey::marker(GroupId::new(group))
    }

    fn item(group: u32, item: u32) -> GridKey {
        GridKey::item(GroupId::new(group), ItemId::new(item))
    }

    fn order(keys: Vec<GridKey>) -> KeyOrder {
        KeyOrder::new(keys).expect("unique keys")
    }

    #[test]
    fn swap_item_exchanges_neighbours() {
        let input = order(vec![marker(1), item(1, 1), item(1, 2), item(1, 3)]);
        let output = swap_item(&input, 2, HorizontalDirection::Right).expect("sibling exists");
        assert_eq!(output.keys(), &[marker(1), item(1, 1), item(1, 3), item(1, 2)]);
        let output = swap_item(&input, 2, HorizontalDirection::Left).expect("sibling exists");
        assert_eq!(output.keys(), &[marker(1), item(1, 2), item(1, 1), item(1, 3)]);
    }

    #[test]
    fn swap_item_never_crosses_a_marker() {
        let input = order(vec![marker(1), item(1, 1), marker(2), item(2, 2)]);
        assert!(swap_item(&input, 1, HorizontalDirection::Right).is_none());
        assert!(swap_item(&input, 3, HorizontalDirection::Left).is_none());
        assert!(swap_item(&input, 0, HorizontalDirection::Right).is_none());
    }

    #[test]
    fn swap_row_moves_whole_blocks() {
        let input = order(vec![
            marker(1),
            item(1, 1),
            item(1, 2),
            marker(2),
            item(2, 3),
            marker(3),
            item(3, 4),
        ]);
        let down = swap_row(&input, 0, VerticalDirection::Down).expect("row below");
        assert_eq!(
            down.keys(),
            &[
                marker(2),
                item(2, 3),
                marker(1),
                item(1, 1),
                item(1, 2),
                marker(3),
                item(3, 4)
            ]
        );
        let up = swap_row(&input, 5, VerticalDirection::Up).expect("row above");
        assert_eq!(
            up.keys(),
            &[
                marker(1),
                item(1, 1),
                item(1, 2),
                marker(3),
                item(3, 4),
                marker(2),
                item(2, 3)
            ]
        );
        assert!(swap_row(&input, 0, VerticalDirection::Up).is_none());
        assert!(swap_row(&input, 1, VerticalDirection::Down).is_none());
    }

    #[test]
    fn swap_row_collects_scattered_members() {
        let input = order(vec![marker(1), item(1, 1), marker(2), item(1, 2), item(2, 3)]);
        let output = swap_row(&input, 2, VerticalDirection::Up).expect("row above");
        assert_eq!(
            output.keys(),
            &[marker(2), item(2, 3), marker(1), item(1, 1), item(1, 2)]
        );
    }
}

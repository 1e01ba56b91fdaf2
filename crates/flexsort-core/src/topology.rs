//! Row topology derived from a flat [`KeyOrder`].
//!
//! Rows are not stored anywhere: they are views computed from the ordered key
//! sequence. Membership follows the filtered rule: an item belongs to the row
//! whose marker carries the item's group, wherever the item sits in the
//! sequence. Order within a row is the items' relative order in the sequence.
//!
//! Every accessor returns `None` when the requested index is out of range or
//! points at the wrong kind of key. Callers treat that as "no such row".

use serde::Serialize;

use crate::key::{GridKey, GroupId};
use crate::order::KeyOrder;

/// Keys on either side of an element, nearest-last for `before` and
/// nearest-first for `after`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Siblings {
    /// Keys at lower indices, in sequence order.
    pub before: Vec<GridKey>,
    /// Keys at higher indices, in sequence order.
    pub after: Vec<GridKey>,
}

impl Siblings {
    /// Nearest sibling before the element.
    #[must_use]
    pub fn nearest_before(&self) -> Option<GridKey> {
        self.before.last().copied()
    }

    /// Nearest sibling after the element.
    #[must_use]
    pub fn nearest_after(&self) -> Option<GridKey> {
        self.after.first().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }
}

/// Derived view of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub group: GroupId,
    pub marker: GridKey,
    pub marker_index: usize,
    pub items: Vec<GridKey>,
}

#[must_use]
pub fn is_marker(key: &GridKey) -> bool {
    key.is_marker()
}

#[must_use]
pub fn is_item(key: &GridKey) -> bool {
    key.is_item()
}

/// Index of the marker that anchors `group`'s row.
#[must_use]
pub fn row_marker_index(group: GroupId, order: &KeyOrder) -> Option<usize> {
    order.index_of(&GridKey::marker(group))
}

/// Index of the marker whose row contains the element at `index`.
///
/// For a marker this is `index` itself.
#[must_use]
pub fn owning_marker_index(index: usize, order: &KeyOrder) -> Option<usize> {
    let key = order.get(index)?;
    if key.is_marker() {
        return Some(index);
    }
    row_marker_index(key.group(), order)
}

/// The marker at `marker_index` followed by every item of its row.
#[must_use]
pub fn row_of(marker_index: usize, order: &KeyOrder) -> Option<Vec<GridKey>> {
    let marker = order.get(marker_index).filter(is_marker)?;
    let mut row = vec![marker];
    row.extend(
        order
            .keys()
            .iter()
            .filter(|key| marker.is_marker_of(key))
            .copied(),
    );
    Some(row)
}

/// Items sharing a row with the item at `item_index`, excluding itself.
#[must_use]
pub fn sibling_items(item_index: usize, order: &KeyOrder) -> Option<Siblings> {
    let active = order.get(item_index).filter(is_item)?;
    let mut siblings = Siblings::default();
    for (position, key) in order.iter() {
        if position == item_index || !key.is_item() || key.group() != active.group() {
            continue;
        }
        if position < item_index {
            siblings.before.push(key);
        } else {
            siblings.after.push(key);
        }
    }
    Some(siblings)
}

/// All other markers, split into rows above and rows below.
#[must_use]
pub fn sibling_markers(marker_index: usize, order: &KeyOrder) -> Option<Siblings> {
    order.get(marker_index).filter(is_marker)?;
    let mut siblings = Siblings::default();
    for (position, key) in order.iter() {
        if position == marker_index || !key.is_marker() {
            continue;
        }
        if position < marker_index {
            siblings.before.push(key);
        } else {
            siblings.after.push(key);
        }
    }
    Some(siblings)
}

/// Position of the row anchored at `marker_index` among all rows.
#[must_use]
pub fn row_position(marker_index: usize, order: &KeyOrder) -> Option<usize> {
    order.get(marker_index).filter(is_marker)?;
    Some(
        order.keys()[..marker_index]
            .iter()
            .filter(|key| key.is_marker())
            .count(),
    )
}

/// Every row in marker order.
#[must_use]
pub fn rows(order: &KeyOrder) -> Vec<RowView> {
    order
        .iter()
        .filter(|(_, key)| key.is_marker())
        .map(|(marker_index, marker)| RowView {
            group: marker.group(),
            marker,
            marker_index,
            items: order
                .keys()
                .iter()
                .filter(|key| marker.is_marker_of(key))
                .copied()
                .collect(),
        })
        .collect()
}

/// Items whose group has no marker in the sequence.
#[must_use]
pub fn orphan_items(order: &KeyOrder) -> Vec<GridKey> {
    order
        .keys()
        .iter()
        .filter(|key| key.is_item() && row_marker_index(key.group(), order).is_none())
        .copied()
        .collect()
}

//! Explicit two-level row model.
//!
//! [`GridModel`] is the owning representation of the grid: rows own an
//! ordered list of items. The flat [`KeyOrder`] the strategy works on is
//! derived from it with [`GridModel::to_order`], and in-place reorders are
//! folded back with [`GridModel::apply_order`]. Structural changes (moving an
//! item into another row, creating or dropping rows) happen here and nowhere
//! else.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::key::{GridKey, GroupId, ItemId};
use crate::metrics::{GridMetrics, LayoutDiagnostic};
use crate::order::KeyOrder;
use crate::topology;

/// One draggable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridItem {
    pub id: ItemId,
    pub label: String,
}

impl GridItem {
    pub fn new(id: ItemId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// One row: a marker plus its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    pub id: GroupId,
    pub label: String,
    pub items: Vec<GridItem>,
}

impl GridRow {
    pub fn new(id: GroupId, label: impl Into<String>, items: Vec<GridItem>) -> Self {
        Self {
            id,
            label: label.into(),
            items,
        }
    }

    #[must_use]
    pub fn marker_key(&self) -> GridKey {
        GridKey::marker(self.id)
    }

    pub fn item_keys(&self) -> impl Iterator<Item = GridKey> + '_ {
        self.items.iter().map(|item| GridKey::item(self.id, item.id))
    }
}

/// Errors from model construction and structural edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridModelError {
    DuplicateGroup { group: GroupId },
    DuplicateItem { item: ItemId },
    MissingGroup { group: GroupId },
    MissingItem { group: GroupId, item: ItemId },
    OrderMismatch { key: GridKey },
    RowIndexOutOfRange { index: usize, rows: usize },
    GroupIdOverflow,
}

impl fmt::Display for GridModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateGroup { group } => write!(f, "group {group} appears more than once"),
            Self::DuplicateItem { item } => write!(f, "item {item} appears more than once"),
            Self::MissingGroup { group } => write!(f, "group {group} not found"),
            Self::MissingItem { group, item } => {
                write!(f, "item {item} not found in group {group}")
            }
            Self::OrderMismatch { key } => {
                write!(f, "key {key} does not match the model's arrangement")
            }
            Self::RowIndexOutOfRange { index, rows } => {
                write!(f, "row index {index} out of range for {rows} rows")
            }
            Self::GroupIdOverflow => write!(f, "no group identifiers left"),
        }
    }
}

impl std::error::Error for GridModelError {}

/// Rows owning ordered items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GridRow>", into = "Vec<GridRow>")]
pub struct GridModel {
    rows: Vec<GridRow>,
}

impl GridModel {
    /// Build a model, rejecting duplicate group or item identities.
    pub fn new(rows: Vec<GridRow>) -> Result<Self, GridModelError> {
        let model = Self { rows };
        model.check_unique()?;
        Ok(model)
    }

    fn check_unique(&self) -> Result<(), GridModelError> {
        let mut groups = FxHashSet::default();
        let mut items = FxHashSet::default();
        for row in &self.rows {
            if !groups.insert(row.id) {
                return Err(GridModelError::DuplicateGroup { group: row.id });
            }
            for item in &row.items {
                if !items.insert(item.id) {
                    return Err(GridModelError::DuplicateItem { item: item.id });
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, group: GroupId) -> Option<&GridRow> {
        self.rows.iter().find(|row| row.id == group)
    }

    /// Position of `group` among rows.
    #[must_use]
    pub fn row_index(&self, group: GroupId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == group)
    }

    /// Row and position of `item`.
    #[must_use]
    pub fn locate_item(&self, item: ItemId) -> Option<(GroupId, usize)> {
        self.rows.iter().find_map(|row| {
            row.items
                .iter()
                .position(|candidate| candidate.id == item)
                .map(|position| (row.id, position))
        })
    }

    /// Current key of `item`, if it exists.
    #[must_use]
    pub fn item_key(&self, item: ItemId) -> Option<GridKey> {
        self.locate_item(item)
            .map(|(group, _)| GridKey::item(group, item))
    }

    /// Derive the flat ordered key sequence: each marker followed by its items.
    #[must_use]
    pub fn to_order(&self) -> KeyOrder {
        let keys = self
            .rows
            .iter()
            .flat_map(|row| std::iter::once(row.marker_key()).chain(row.item_keys()))
            .collect();
        KeyOrder::from_unique(keys)
    }

    /// Rearrange rows and items to follow `order`.
    ///
    /// `order` must contain exactly this model's keys (a permutation produced
    /// by in-place swaps). Row membership comes from each item's group, so
    /// only the relative order of rows and of items within rows can change.
    pub fn apply_order(&mut self, order: &KeyOrder) -> Result<(), GridModelError> {
        let expected = self.to_order();
        if let Some(key) = order
            .keys()
            .iter()
            .chain(expected.keys())
            .find(|key| !order.contains(key) || !expected.contains(key))
        {
            return Err(GridModelError::OrderMismatch { key: *key });
        }

        let mut rows: FxHashMap<GroupId, GridRow> =
            self.rows.drain(..).map(|row| (row.id, row)).collect();
        let mut arranged = Vec::with_capacity(rows.len());
        for view in topology::rows(order) {
            let Some(mut row) = rows.remove(&view.group) else {
                return Err(GridModelError::MissingGroup { group: view.group });
            };
            let mut items: FxHashMap<ItemId, GridItem> =
                row.items.drain(..).map(|item| (item.id, item)).collect();
            row.items = view
                .items
                .iter()
                .filter_map(|key| key.item_id())
                .filter_map(|id| items.remove(&id))
                .collect();
            arranged.push(row);
        }
        self.rows = arranged;
        Ok(())
    }

    /// Remove `item` from `group`, returning it.
    pub fn take_item(&mut self, group: GroupId, item: ItemId) -> Result<GridItem, GridModelError> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == group)
            .ok_or(GridModelError::MissingGroup { group })?;
        let position = row
            .items
            .iter()
            .position(|candidate| candidate.id == item)
            .ok_or(GridModelError::MissingItem { group, item })?;
        Ok(row.items.remove(position))
    }

    /// Append `item` to the end of `group`.
    pub fn push_item(&mut self, group: GroupId, item: GridItem) -> Result<(), GridModelError> {
        if self.locate_item(item.id).is_some() {
            return Err(GridModelError::DuplicateItem { item: item.id });
        }
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == group)
            .ok_or(GridModelError::MissingGroup { group })?;
        row.items.push(item);
        Ok(())
    }

    /// Insert a new empty row at `index`, returning its fresh group id.
    pub fn insert_row(
        &mut self,
        index: usize,
        label: impl Into<String>,
    ) -> Result<GroupId, GridModelError> {
        if index > self.rows.len() {
            return Err(GridModelError::RowIndexOutOfRange {
                index,
                rows: self.rows.len(),
            });
        }
        let group = self.next_group_id()?;
        self.rows.insert(index, GridRow::new(group, label, Vec::new()));
        Ok(group)
    }

    /// Drop `group` if it has no items. Returns whether a row was removed.
    pub fn remove_if_empty(&mut self, group: GroupId) -> bool {
        let before = self.rows.len();
        self.rows
            .retain(|row| row.id != group || !row.items.is_empty());
        self.rows.len() != before
    }

    fn next_group_id(&self) -> Result<GroupId, GridModelError> {
        let highest = self.rows.iter().map(|row| row.id.get()).max().unwrap_or(0);
        highest
            .checked_add(1)
            .map(GroupId::new)
            .ok_or(GridModelError::GroupIdOverflow)
    }

    /// Report rows whose item count is outside `metrics`' supported range.
    #[must_use]
    pub fn diagnose(&self, metrics: &GridMetrics) -> Vec<(GroupId, LayoutDiagnostic)> {
        self.rows
            .iter()
            .filter_map(|row| {
                let count = isize::try_from(row.items.len()).unwrap_or(isize::MAX);
                metrics.diagnose_row(count).map(|diagnostic| (row.id, diagnostic))
            })
            .collect()
    }
}

impl TryFrom<Vec<GridRow>> for GridModel {
    type Error = GridModelError;

    fn try_from(rows: Vec<GridRow>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<GridModel> for Vec<GridRow> {
    fn from(model: GridModel) -> Self {
        model.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(group: u32, items: &[u32]) -> GridRow {
        GridRow::new(
            GroupId::new(group),
            format!("row {group}"),
            items
                .iter()
                .map(|id| GridItem::new(ItemId::new(*id), format!("item {id}")))
                .collect(),
        )
    }

    fn marker(group: u32) -> GridKey {
        GridKey::marker(GroupId::new(group))
    }

    fn item(group: u32, item: u32) -> GridKey {
        GridKey::item(GroupId::new(group), ItemId::new(item))
    }

    #[test]
    fn flattens_rows_in_order() {
        let model = GridModel::new(vec![row(1, &[1, 2]), row(2, &[3])]).expect("valid model");
        assert_eq!(
            model.to_order().keys(),
            &[marker(1), item(1, 1), item(1, 2), marker(2), item(2, 3)]
        );
    }

    #[test]
    fn duplicate_identities_are_rejected() {
        assert_eq!(
            GridModel::new(vec![row(1, &[1]), row(1, &[2])]),
            Err(GridModelError::DuplicateGroup {
                group: GroupId::new(1)
            })
        );
        assert_eq!(
            GridModel::new(vec![row(1, &[1]), row(2, &[1])]),
            Err(GridModelError::DuplicateItem { item: ItemId::new(1) })
        );
    }

    #[test]
    fn apply_order_follows_permutation() {
        let mut model = GridModel::new(vec![row(1, &[1, 2]), row(2, &[3])]).expect("valid model");
        let order = KeyOrder::new(vec![marker(2), item(2, 3), marker(1), item(1, 2), item(1, 1)])
            .expect("unique keys");
        model.apply_order(&order).expect("same keys");
        assert_eq!(model.to_order(), order);
        assert_eq!(model.rows()[1].items[0].label, "item 2");
    }

    #[test]
    fn apply_order_rejects_foreign_keys() {
        let mut model = GridModel::new(vec![row(1, &[1])]).expect("valid model");
        let order = KeyOrder::new(vec![marker(1), item(1, 9)]).expect("unique keys");
        assert_eq!(
            model.apply_order(&order),
            Err(GridModelError::OrderMismatch { key: item(1, 9) })
        );
        assert_eq!(model.rows()[0].items.len(), 1);
    }

    #[test]
    fn structural_edits() {
        let mut model = GridModel::new(vec![row(1, &[1]), row(4, &[2])]).expect("valid model");
        let moved = model
            .take_item(GroupId::new(1), ItemId::new(1))
            .expect("item exists");
        let fresh = model.insert_row(2, "new").expect("index in range");
        assert_eq!(fresh, GroupId::new(5));
        model.push_item(fresh, moved).expect("row exists");
        assert_eq!(model.item_key(ItemId::new(1)), Some(item(5, 1)));
        assert!(model.remove_if_empty(GroupId::new(1)));
        assert!(!model.remove_if_empty(GroupId::new(4)));
        assert_eq!(model.row_index(fresh), Some(1));
        assert!(matches!(
            model.take_item(GroupId::new(9), ItemId::new(1)),
            Err(GridModelError::MissingGroup { .. })
        ));
        assert!(matches!(
            model.insert_row(7, "far"),
            Err(GridModelError::RowIndexOutOfRange { index: 7, rows: 2 })
        ));
    }

    #[test]
    fn diagnose_flags_empty_and_overfull_rows() {
        let model =
            GridModel::new(vec![row(1, &[]), row(2, &[1, 2, 3, 4]), row(3, &[5])]).expect("valid");
        let diagnostics = model.diagnose(&GridMetrics::default());
        assert_eq!(
            diagnostics,
            vec![
                (GroupId::new(1), LayoutDiagnostic::EmptyRow),
                (
                    GroupId::new(2),
                    LayoutDiagnostic::TooManyItems { count: 4, max: 3 }
                ),
            ]
        );
    }
}

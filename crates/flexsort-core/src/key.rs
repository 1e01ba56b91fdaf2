//! Grid cell identities.
//!
//! Every cell of the grid is either a *marker* (the header that anchors a row
//! and carries its group identity) or an *item* (a draggable member of exactly
//! one row). Items carry the group they belong to, which is what the filtered
//! membership rule in [`crate::topology`] matches on.
//!
//! Keys have a canonical text form used in logs, JSON, and trace files:
//!
//! - `marker:<group>`
//! - `item:<group>:<item>`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable identifier for a row group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(u32);

impl GroupId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier for an item, independent of the row it sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GridKey {
    /// Row header for `group`.
    Marker(GroupId),
    /// Row member `item` owned by `group`.
    Item { group: GroupId, item: ItemId },
}

impl GridKey {
    #[must_use]
    pub const fn marker(group: GroupId) -> Self {
        Self::Marker(group)
    }

    #[must_use]
    pub const fn item(group: GroupId, item: ItemId) -> Self {
        Self::Item { group, item }
    }

    #[must_use]
    pub const fn is_marker(&self) -> bool {
        matches!(self, Self::Marker(_))
    }

    #[must_use]
    pub const fn is_item(&self) -> bool {
        matches!(self, Self::Item { .. })
    }

    /// Group this key belongs to (a marker belongs to its own group).
    #[must_use]
    pub const fn group(&self) -> GroupId {
        match *self {
            Self::Marker(group) | Self::Item { group, .. } => group,
        }
    }

    /// Item identity, for item keys.
    #[must_use]
    pub const fn item_id(&self) -> Option<ItemId> {
        match *self {
            Self::Marker(_) => None,
            Self::Item { item, .. } => Some(item),
        }
    }

    /// Whether `self` is the marker of the row `other` belongs to.
    #[must_use]
    pub fn is_marker_of(&self, other: &GridKey) -> bool {
        self.is_marker() && other.is_item() && self.group() == other.group()
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marker(group) => write!(f, "marker:{group}"),
            Self::Item { group, item } => write!(f, "item:{group}:{item}"),
        }
    }
}

/// Failure to parse the canonical key text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    UnknownKind { input: String },
    BadArity { input: String },
    BadNumber { input: String, part: String },
}

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind { input } => {
                write!(f, "key {input:?} must start with `marker:` or `item:`")
            }
            Self::BadArity { input } => write!(f, "key {input:?} has the wrong number of parts"),
            Self::BadNumber { input, part } => {
                write!(f, "key {input:?} has non-numeric part {part:?}")
            }
        }
    }
}

impl std::error::Error for KeyParseError {}

fn parse_part(input: &str, part: &str) -> Result<u32, KeyParseError> {
    part.parse().map_err(|_| KeyParseError::BadNumber {
        input: input.to_string(),
        part: part.to_string(),
    })
}

impl FromStr for GridKey {
    type Err = KeyParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parts = input.split(':');
        let kind = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();
        match (kind, rest.as_slice()) {
            ("marker", [group]) => Ok(Self::Marker(GroupId(parse_part(input, group)?))),
            ("item", [group, item]) => Ok(Self::Item {
                group: GroupId(parse_part(input, group)?),
                item: ItemId(parse_part(input, item)?),
            }),
            ("marker" | "item", _) => Err(KeyParseError::BadArity {
                input: input.to_string(),
            }),
            _ => Err(KeyParseError::UnknownKind {
                input: input.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for GridKey {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GridKey> for String {
    fn from(key: GridKey) -> Self {
        key.to_string()
    }
}

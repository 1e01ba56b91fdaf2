//! Built-in sample grid: one row per country, three cities each.

use flexsort_core::{GridItem, GridModel, GridModelError, GridRow, GroupId, ItemId};

pub const SAMPLE: [(&str, [&str; 3]); 15] = [
    ("🇺🇸", ["New York", "Los Angeles", "Chicago"]),
    ("🇫🇷", ["Paris", "Lyon", "Marseille"]),
    ("🇯🇵", ["Tokyo", "Osaka", "Kyoto"]),
    ("🇬🇧", ["London", "Manchester", "Birmingham"]),
    ("🇩🇪", ["Berlin", "Munich", "Hamburg"]),
    ("🇮🇹", ["Rome", "Milan", "Naples"]),
    ("🇪🇸", ["Madrid", "Barcelona", "Valencia"]),
    ("🇨🇦", ["Toronto", "Vancouver", "Montreal"]),
    ("🇦🇺", ["Sydney", "Melbourne", "Brisbane"]),
    ("🇧🇷", ["São Paulo", "Rio de Janeiro", "Salvador"]),
    ("🇲🇽", ["Mexico City", "Guadalajara", "Monterrey"]),
    ("🇮🇳", ["Mumbai", "Delhi", "Bangalore"]),
    ("🇰🇷", ["Seoul", "Busan", "Incheon"]),
    ("🇳🇱", ["Amsterdam", "Rotterdam", "The Hague"]),
    ("🇸🇪", ["Stockholm", "Gothenburg", "Malmö"]),
];

/// Rows get group ids `1..=15`; cities are numbered `1..=45` in reading order.
pub fn sample_model() -> Result<GridModel, GridModelError> {
    let mut next_item = 0u32;
    let rows = SAMPLE
        .iter()
        .zip(1u32..)
        .map(|((country, cities), group)| {
            let items = cities
                .iter()
                .map(|city| {
                    next_item += 1;
                    GridItem::new(ItemId::new(next_item), *city)
                })
                .collect();
            GridRow::new(GroupId::new(group), *country, items)
        })
        .collect();
    GridModel::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexsort_core::GridKey;

    #[test]
    fn sample_has_fifteen_full_rows() {
        let model = sample_model().expect("sample is valid");
        assert_eq!(model.rows().len(), 15);
        assert!(model.rows().iter().all(|row| row.items.len() == 3));
        let order = model.to_order();
        assert_eq!(order.len(), 60);
        assert_eq!(order.get(0), Some(GridKey::marker(GroupId::new(1))));
        assert_eq!(
            order.get(59),
            Some(GridKey::item(GroupId::new(15), ItemId::new(45)))
        );
    }
}

use crate::data_fetcher::models::EquippedItem;

/// Drops the `durability` field from each item; it changes with every
/// repair and would make the archive noisy.
pub fn strip_durability(items: Vec<EquippedItem>) -> Vec<EquippedItem> {
    items
        .into_iter()
        .map(|item| EquippedItem {
            durability: None,
            ..item
        })
        .collect()
}

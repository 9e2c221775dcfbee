use catalog_models::CatalogItem;
use std::collections::HashSet;
use std::hash::Hash;

/// Keep the first item seen for every key, preserving order.
///
/// Later duplicates are dropped whole; fields are never merged.
pub fn dedupe_by_key<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

/// First-wins de-duplication on `id`.
///
/// Ids from different providers are assumed to share one id space.
pub fn dedupe_by_id(items: Vec<CatalogItem>) -> Vec<CatalogItem> {
    dedupe_by_key(items, |item| item.id)
}

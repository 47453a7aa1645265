//! Free-text filtering over a single display field

/// Case-insensitive substring match. A blank query matches everything.
pub fn matches_query(text: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || text.to_lowercase().contains(&query.to_lowercase())
}

/// Keep the items whose `field` matches `query`, preserving order.
///
/// A blank query returns the input unchanged.
pub fn filter_by_text<T, F>(items: Vec<T>, query: &str, field: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    if query.trim().is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| matches_query(field(item), query))
        .collect()
}

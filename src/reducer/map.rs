use std::collections::BTreeMap;

/// Apply `f(value, key)` to every entry, keeping the keys.
///
/// # Examples
///
/// ```
/// use redep::map_values;
/// use std::collections::BTreeMap;
///
/// let prices = BTreeMap::from([("apple", 3), ("pear", 4)]);
/// let labels = map_values(&prices, |price, name| format!("{name}: {price}"));
///
/// assert_eq!(labels["pear"], "pear: 4");
/// ```
pub fn map_values<K, V, U>(mapping: &BTreeMap<K, V>, mut f: impl FnMut(&V, &K) -> U) -> BTreeMap<K, U>
where
    K: Ord + Clone,
{
    mapping
        .iter()
        .map(|(key, value)| (key.clone(), f(value, key)))
        .collect()
}

/// Fallible [`map_values`]; stops at the first error.
pub fn try_map_values<K, V, U, E>(
    mapping: &BTreeMap<K, V>,
    mut f: impl FnMut(&V, &K) -> Result<U, E>,
) -> Result<BTreeMap<K, U>, E>
where
    K: Ord + Clone,
{
    mapping
        .iter()
        .map(|(key, value)| Ok((key.clone(), f(value, key)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_preserved() {
        let source = BTreeMap::from([("a".to_string(), 1), ("b".to_string(), 2)]);
        let doubled = map_values(&source, |n, _| n * 2);

        assert_eq!(doubled.len(), 2);
        assert_eq!(doubled["a"], 2);
        assert_eq!(doubled["b"], 4);
    }

    #[test]
    fn try_map_stops_at_first_error() {
        let source = BTreeMap::from([(1, "1"), (2, "x"), (3, "3")]);
        let mut visited = Vec::new();

        let parsed: Result<BTreeMap<i32, i32>, _> = try_map_values(&source, |text, key| {
            visited.push(*key);
            text.parse::<i32>()
        });

        assert!(parsed.is_err());
        assert_eq!(visited, vec![1, 2]);
    }
}

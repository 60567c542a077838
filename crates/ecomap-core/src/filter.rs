//! Category filtering of collection points for map display.

use crate::models::{CollectionPoint, CollectionType};

/// Select the points to show for a set of category-name filters.
///
/// With no known categories nothing can match a filter, so only an empty
/// filter shows points. An empty filter shows every point. Otherwise a
/// point is shown if at least one of its type ids resolves to a known
/// category whose name is among `filters`. Input order is preserved.
pub fn filter_points<'a, S>(
    points: &'a [CollectionPoint],
    types: &[CollectionType],
    filters: &[S],
) -> Vec<&'a CollectionPoint>
where
    S: AsRef<str>,
{
    if types.is_empty() {
        return if filters.is_empty() {
            points.iter().collect()
        } else {
            Vec::new()
        };
    }

    if filters.is_empty() {
        return points.iter().collect();
    }

    let selected: Vec<i64> = types
        .iter()
        .filter(|t| filters.iter().any(|f| f.as_ref() == t.name))
        .map(|t| t.id)
        .collect();

    points
        .iter()
        .filter(|point| point.types.iter().any(|id| selected.contains(id)))
        .collect()
}

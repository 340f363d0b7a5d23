//! Cost functions for query complexity analysis.
//!
//! Each field costs 1 plus the cost of its children unless it declares one of
//! the functions below. List-shaped fields multiply the cost of one item by
//! the number of items the client asked for, so `people(limit: 100)` is a
//! hundred times more expensive than `people(limit: 1)`.
//!
//! ```graphql
//! {
//!   posts(first: 10) {        # 10 * (edges + pageInfo)
//!     edges {                 # 1 + node
//!       node { id title }     # 1 + 2
//!     }
//!   }
//! }
//! ```
//! costs `10 * 4 = 40`.

/// Page size used when a connection gets neither `first` nor `last`.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page a connection will return.
pub const MAX_PAGE_SIZE: usize = 100;

/// Items a list will return for the requested `limit`.
pub fn page_size(requested: Option<i32>) -> usize {
    requested
        .map(|n| n.clamp(0, MAX_PAGE_SIZE as i32) as usize)
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

/// `limit * child_complexity`
pub fn list(limit: Option<i32>, child_complexity: usize) -> usize {
    page_size(limit).saturating_mul(child_complexity)
}

/// Connection fields are priced by whichever of `first`/`last` is given.
pub fn connection(first: Option<i32>, last: Option<i32>, child_complexity: usize) -> usize {
    list(first.or(last), child_complexity)
}

/// Batch lookups cost one child per requested id.
pub fn batch(ids: usize, child_complexity: usize) -> usize {
    ids.saturating_mul(child_complexity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_multiplies_by_limit() {
        assert_eq!(list(Some(5), 3), 15);
    }

    #[test]
    fn missing_limit_uses_default_page() {
        assert_eq!(list(None, 2), DEFAULT_PAGE_SIZE * 2);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(list(Some(-4), 7), 0);
        assert_eq!(list(Some(10_000), 1), MAX_PAGE_SIZE);
    }

    #[test]
    fn connection_prefers_first_then_last() {
        assert_eq!(connection(Some(2), Some(50), 3), 6);
        assert_eq!(connection(None, Some(4), 3), 12);
        assert_eq!(connection(None, None, 1), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn batch_prices_each_requested_id() {
        assert_eq!(batch(0, 4), 0);
        assert_eq!(batch(3, 4), 12);
    }
}

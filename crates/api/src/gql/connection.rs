//! Relay cursor connections over offset-paginated repositories.

use async_graphql::connection::{query, Connection, CursorType, Edge};
use async_graphql::{OutputType, Result, SimpleObject};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use infra::pagination::LimitOffset;

use super::complexity::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Opaque cursor: `base64("cursor:{offset}")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetCursor(pub usize);

impl CursorType for OffsetCursor {
    type Error = String;

    fn decode_cursor(s: &str) -> Result<Self, Self::Error> {
        let bytes = STANDARD
            .decode(s)
            .map_err(|_| format!("Invalid cursor: {s:?}"))?;
        let plain = String::from_utf8(bytes).map_err(|_| format!("Invalid cursor: {s:?}"))?;
        plain
            .strip_prefix("cursor:")
            .and_then(|n| n.parse().ok())
            .map(OffsetCursor)
            .ok_or_else(|| format!("Invalid cursor: {s:?}"))
    }

    fn encode_cursor(&self) -> String {
        STANDARD.encode(format!("cursor:{}", self.0))
    }
}

/// Extra fields exposed on every connection.
#[derive(SimpleObject, Debug, Clone, Copy)]
pub struct ConnectionTotals {
    /// Number of items across all pages.
    pub total_count: usize,
}

pub type PageConnection<N> = Connection<OffsetCursor, N, ConnectionTotals>;

/// Slice of `total` items selected by Relay pagination arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl PageWindow {
    /// `after`/`before` narrow the range first, then `first` keeps its head
    /// and `last` keeps its tail. Without either, a default page is taken
    /// from the head.
    pub fn resolve(
        after: Option<usize>,
        before: Option<usize>,
        first: Option<usize>,
        last: Option<usize>,
        total: usize,
    ) -> Result<Self, String> {
        for (name, value) in [("first", first), ("last", last)] {
            if let Some(n) = value {
                if n > MAX_PAGE_SIZE {
                    return Err(format!(
                        "\"{name}\" must not exceed {MAX_PAGE_SIZE}, got {n}"
                    ));
                }
            }
        }

        let mut start = after.map(|a| a.saturating_add(1)).unwrap_or(0).min(total);
        let mut end = before.unwrap_or(total).min(total).max(start);

        match (first, last) {
            (Some(first), _) => {
                end = end.min(start.saturating_add(first));
                if let Some(last) = last {
                    start = end.saturating_sub(last).max(start);
                }
            }
            (None, Some(last)) => start = end.saturating_sub(last).max(start),
            (None, None) => end = end.min(start + DEFAULT_PAGE_SIZE),
        }

        Ok(Self {
            start,
            end,
            has_previous_page: start > 0,
            has_next_page: end < total,
        })
    }

    pub fn limit_offset(&self) -> LimitOffset {
        LimitOffset::new(self.end - self.start, self.start)
    }
}

/// Build a connection for a list of `total` items, fetching only the
/// requested window.
pub async fn paginate<N, F>(
    after: Option<String>,
    before: Option<String>,
    first: Option<i32>,
    last: Option<i32>,
    total: usize,
    fetch: F,
) -> Result<PageConnection<N>>
where
    N: OutputType,
    F: FnOnce(LimitOffset) -> Vec<N> + Send,
{
    query(
        after,
        before,
        first,
        last,
        |after: Option<OffsetCursor>,
         before: Option<OffsetCursor>,
         first: Option<usize>,
         last: Option<usize>| {
            let built = PageWindow::resolve(
                after.map(|c| c.0),
                before.map(|c| c.0),
                first,
                last,
                total,
            )
            .map(|window| {
                let nodes = fetch(window.limit_offset());
                let mut connection = Connection::with_additional_fields(
                    window.has_previous_page,
                    window.has_next_page,
                    ConnectionTotals { total_count: total },
                );
                connection.edges.extend(
                    nodes
                        .into_iter()
                        .enumerate()
                        .map(|(i, node)| Edge::new(OffsetCursor(window.start + i), node)),
                );
                connection
            })
            .map_err(async_graphql::Error::new);
            futures_util::future::ready(built)
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_round_trip_is_opaque() {
        let encoded = OffsetCursor(7).encode_cursor();
        assert_ne!(encoded, "7");
        assert_eq!(OffsetCursor::decode_cursor(&encoded), Ok(OffsetCursor(7)));
    }

    #[test]
    fn cursor_rejects_foreign_strings() {
        assert!(OffsetCursor::decode_cursor("7").is_err());
        assert!(OffsetCursor::decode_cursor(&STANDARD.encode("offset:7")).is_err());
    }

    #[test]
    fn default_window_is_head_page() {
        let w = PageWindow::resolve(None, None, None, None, 25).unwrap();
        assert_eq!((w.start, w.end), (0, DEFAULT_PAGE_SIZE));
        assert!(!w.has_previous_page);
        assert!(w.has_next_page);
    }

    #[test]
    fn first_after_moves_forward() {
        let w = PageWindow::resolve(Some(2), None, Some(3), None, 10).unwrap();
        assert_eq!((w.start, w.end), (3, 6));
        assert!(w.has_previous_page);
        assert!(w.has_next_page);
    }

    #[test]
    fn last_before_moves_backward() {
        let w = PageWindow::resolve(None, Some(5), None, Some(2), 10).unwrap();
        assert_eq!((w.start, w.end), (3, 5));
    }

    #[test]
    fn last_larger_than_range_keeps_range() {
        let w = PageWindow::resolve(Some(6), None, None, Some(50), 10).unwrap();
        assert_eq!((w.start, w.end), (7, 10));
        assert!(!w.has_next_page);
    }

    #[test]
    fn cursor_past_end_is_empty() {
        let w = PageWindow::resolve(Some(40), None, Some(5), None, 10).unwrap();
        assert_eq!(w.start, w.end);
        assert_eq!(w.limit_offset().limit, 0);
    }

    #[test]
    fn oversized_pages_are_rejected() {
        let err = PageWindow::resolve(None, None, Some(101), None, 10).unwrap_err();
        assert!(err.contains("first"));
        assert!(PageWindow::resolve(None, None, None, Some(500), 10).is_err());
    }
}

//! Offset-token and page-number pagination.
//!
//! Two slicing schemes coexist across the simulated APIs:
//!
//! - The People-style scheme carries a stringified integer offset as an
//!   opaque page token ([`paginate`]).
//! - The GitHub-style scheme uses 1-based `page` / `per_page` numbers
//!   ([`page_slice`]).
//!
//! Both apply strictly after filtering and sorting.

use tracing::debug;

/// One page of results plus the continuation token, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    /// The records on this page.
    pub items: Vec<T>,
    /// Offset token for the next page; `None` when this page is the last.
    pub next_page_token: Option<String>,
}

/// Slice a collection by page size and offset token.
///
/// With no `page_size` the entire collection is returned and no continuation
/// token is produced. The next token is `offset + page_size` when that index
/// is still within the collection, else `None`.
///
/// Malformed (non-integer) tokens are tolerated and treated as offset 0.
/// That permissiveness is a compatibility requirement, not an oversight; see
/// DESIGN.md.
pub fn paginate<T: Clone>(items: &[T], page_size: Option<usize>, page_token: Option<&str>) -> Page<T> {
    let Some(size) = page_size else {
        return Page {
            items: items.to_vec(),
            next_page_token: None,
        };
    };

    let offset = match page_token {
        Some(token) => token.parse::<usize>().unwrap_or_else(|_| {
            debug!(token, "malformed page token, treating as offset 0");
            0
        }),
        None => 0,
    };

    let end = offset.saturating_add(size);
    let page: Vec<T> = items
        .iter()
        .skip(offset)
        .take(size)
        .cloned()
        .collect();
    let next_page_token = if end < items.len() {
        Some(end.to_string())
    } else {
        None
    };

    Page {
        items: page,
        next_page_token,
    }
}

/// Slice a collection by 1-based page number and page size.
///
/// `page` values of `None` or ≤ 0 are treated as 1. `per_page` values of
/// `None` or ≤ 0 mean no limit: the whole remaining collection is returned.
/// (The upstream contract left the default ambiguous; "no limit unless
/// specified" is the documented choice here.)
pub fn page_slice<T: Clone>(items: &[T], page: Option<i64>, per_page: Option<i64>) -> Vec<T> {
    let page = match page {
        Some(p) if p > 0 => p as usize,
        _ => 1,
    };
    match per_page {
        Some(per) if per > 0 => {
            let per = per as usize;
            // Saturate: huge page numbers land past the end, never wrap.
            let skip = (page - 1).saturating_mul(per);
            items.iter().skip(skip).take(per).cloned().collect()
        }
        _ => {
            // No limit: page 1 is everything, later pages are empty.
            if page == 1 {
                items.to_vec()
            } else {
                Vec::new()
            }
        }
    }
}

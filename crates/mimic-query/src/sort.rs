//! Sort orders for the connections listing.

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};

/// The four supported connection sort orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Ascending by given name.
    FirstNameAscending,
    /// Ascending by family name.
    LastNameAscending,
    /// Ascending by last-modified timestamp.
    LastModifiedAscending,
    /// Descending by last-modified timestamp.
    LastModifiedDescending,
}

impl SortOrder {
    /// Parse the wire form, e.g. `"FIRST_NAME_ASCENDING"`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidSortOrder`] for unrecognized values.
    pub fn parse(raw: &str) -> QueryResult<Self> {
        match raw {
            "FIRST_NAME_ASCENDING" => Ok(Self::FirstNameAscending),
            "LAST_NAME_ASCENDING" => Ok(Self::LastNameAscending),
            "LAST_MODIFIED_ASCENDING" => Ok(Self::LastModifiedAscending),
            "LAST_MODIFIED_DESCENDING" => Ok(Self::LastModifiedDescending),
            other => Err(QueryError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Sort keys a connection record exposes.
pub trait SortKeys {
    /// Given (first) name, empty string when absent.
    fn given_name(&self) -> &str;
    /// Family (last) name, empty string when absent.
    fn family_name(&self) -> &str;
    /// Last-modified timestamp (ISO-8601, so string order is time order),
    /// empty string when absent.
    fn last_modified(&self) -> &str;
}

/// Stable-sort `records` by `order`. Runs before pagination.
pub fn sort_records<T: SortKeys>(records: &mut [T], order: SortOrder) {
    match order {
        SortOrder::FirstNameAscending => {
            records.sort_by(|a, b| a.given_name().cmp(b.given_name()));
        }
        SortOrder::LastNameAscending => {
            records.sort_by(|a, b| a.family_name().cmp(b.family_name()));
        }
        SortOrder::LastModifiedAscending => {
            records.sort_by(|a, b| a.last_modified().cmp(b.last_modified()));
        }
        SortOrder::LastModifiedDescending => {
            records.sort_by(|a, b| b.last_modified().cmp(a.last_modified()));
        }
    }
}

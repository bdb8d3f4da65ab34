//! The collection query pipeline shared by every Mimic simulation.
//!
//! Each list/search/get endpoint composes a subset of four operations over an
//! in-memory collection:
//!
//! 1. [`FieldMask`] projection — restrict which fields a response carries
//! 2. [`SearchQuery`] matching — case-insensitive substring search over a
//!    fixed set of per-resource fields, with phone-number normalization
//! 3. [`SortOrder`] — stable sorting for the connections listing
//! 4. [`paginate`] / [`page_slice`] — offset-token and page/per-page slicing
//!
//! The pipeline is pure: it never touches a store, only borrowed collections.

pub mod error;
pub mod mask;
pub mod page;
pub mod search;
pub mod sort;

pub use error::{QueryError, QueryResult};
pub use mask::{FieldMask, Project};
pub use page::{page_slice, paginate, Page};
pub use search::{record_matches, search, SearchQuery, Searchable};
pub use sort::{sort_records, SortKeys, SortOrder};

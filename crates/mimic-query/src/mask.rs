//! Field masks: comma-separated field lists restricting response shape.
//!
//! Projection keeps the intersection of requested fields and fields actually
//! present on a record; requested-but-absent fields are silently omitted.
//! Endpoints that designate always-included fields (resource name, etag)
//! enforce that in their [`Project`] implementation, not here.

use crate::error::{QueryError, QueryResult};

/// A parsed field mask.
///
/// Field names are trimmed; empty segments are dropped, so `"names, ,etag"`
/// parses to two fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldMask {
    fields: Vec<String>,
}

impl FieldMask {
    /// Parse a comma-separated mask string.
    pub fn parse(raw: &str) -> Self {
        let fields = raw
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        Self { fields }
    }

    /// Parse a mask that the endpoint contract requires.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MissingFieldMask`] naming `operation` when the
    /// mask is absent, empty, or whitespace-only. The message text is part of
    /// the observable contract.
    pub fn required(raw: Option<&str>, operation: &str) -> QueryResult<Self> {
        match raw {
            Some(text) if !text.trim().is_empty() => Ok(Self::parse(text)),
            _ => Err(QueryError::MissingFieldMask {
                operation: operation.to_string(),
            }),
        }
    }

    /// Whether `field` was requested.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// The requested field names, in request order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// `true` when no fields were requested.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Field-mask projection for a record type.
///
/// Implementations copy fields explicitly, guarded by mask membership —
/// never reflection over a map. Always-included fields survive any mask.
pub trait Project: Sized {
    /// A copy of `self` restricted to the masked fields.
    fn project(&self, mask: &FieldMask) -> Self;
}

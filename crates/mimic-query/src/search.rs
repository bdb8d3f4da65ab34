//! Case-insensitive substring search over nominated record fields.
//!
//! A record matches when the lowercased query is a substring of any scanned
//! field's lowercased value. Scanning short-circuits on the first matching
//! field; a record lands in the result set once no matter how many fields
//! matched. Results are deduplicated by resource key, preserving
//! first-encounter order.
//!
//! Phone fields are compared after digit normalization on both sides, so
//! `"(555) 010"` finds a stored `"+1 555-0100"`.

use mimic_types::normalize_phone_number;

/// A query pre-lowered for text matching, with the digit form precomputed
/// for phone matching.
#[derive(Clone, Debug)]
pub struct SearchQuery {
    lowered: String,
    phone_digits: Option<String>,
}

impl SearchQuery {
    /// Prepare a query for matching.
    pub fn new(raw: &str) -> Self {
        Self {
            lowered: raw.to_lowercase(),
            phone_digits: normalize_phone_number(raw),
        }
    }

    /// Substring test against a text field value.
    fn matches_text(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.lowered)
    }

    /// Substring test against a phone field value, both sides normalized.
    fn matches_phone(&self, value: &str) -> bool {
        match (&self.phone_digits, normalize_phone_number(value)) {
            (Some(query), Some(stored)) => stored.contains(query),
            _ => false,
        }
    }
}

/// A record type with a fixed set of searchable fields.
pub trait Searchable {
    /// The record's resource key, used for deduplication.
    fn key(&self) -> &str;

    /// Text field values to scan (display name, given/family name, email
    /// value, organization name/title, nickname value, …).
    fn text_fields(&self) -> Vec<&str>;

    /// Phone field values to scan after normalization. Default: none.
    fn phone_fields(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// Whether a single record matches, scanning fields with short-circuit.
pub fn record_matches<T: Searchable>(record: &T, query: &SearchQuery) -> bool {
    if record
        .text_fields()
        .iter()
        .any(|value| query.matches_text(value))
    {
        return true;
    }
    record
        .phone_fields()
        .iter()
        .any(|value| query.matches_phone(value))
}

/// Scan `items`, returning matching records deduplicated by resource key in
/// first-encounter order.
pub fn search<'a, T, I>(items: I, query: &SearchQuery) -> Vec<&'a T>
where
    T: Searchable,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = std::collections::HashSet::new();
    let mut results = Vec::new();
    for record in items {
        if !record_matches(record, query) {
            continue;
        }
        if seen.insert(record.key().to_string()) {
            results.push(record);
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Card {
        key: String,
        name: String,
        email: String,
        phone: String,
    }

    impl Searchable for Card {
        fn key(&self) -> &str {
            &self.key
        }

        fn text_fields(&self) -> Vec<&str> {
            vec![&self.name, &self.email]
        }

        fn phone_fields(&self) -> Vec<&str> {
            vec![&self.phone]
        }
    }

    fn card(key: &str, name: &str, email: &str, phone: &str) -> Card {
        Card {
            key: key.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    // ---- Test 1: Case-insensitive substring match on text fields ----
    #[test]
    fn text_match_is_case_insensitive() {
        let records = vec![
            card("people/c1", "Ada Lovelace", "ada@example.com", ""),
            card("people/c2", "Grace Hopper", "grace@example.com", ""),
        ];
        let hits = search(&records, &SearchQuery::new("LOVELACE"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key, "people/c1");
    }

    // ---- Test 2: A record matching several fields appears once ----
    #[test]
    fn multi_field_match_dedupes() {
        let records = vec![card("people/c1", "ada", "ada@example.com", "")];
        let hits = search(&records, &SearchQuery::new("ada"));
        assert_eq!(hits.len(), 1);
    }

    // ---- Test 3: Phone matching normalizes both sides ----
    #[test]
    fn phone_match_normalizes() {
        let records = vec![card("people/c3", "Lin", "lin@example.com", "+1 555-010-0199")];
        let hits = search(&records, &SearchQuery::new("(555) 010"));
        assert_eq!(hits.len(), 1);

        // A digit-free query never matches a phone field.
        assert!(search(&records, &SearchQuery::new("xyz")).is_empty());
    }

    // ---- Test 4: Order reflects first encounter ----
    #[test]
    fn order_is_first_encounter() {
        let records = vec![
            card("people/c2", "grace h", "g@example.com", ""),
            card("people/c1", "grace k", "k@example.com", ""),
        ];
        let hits = search(&records, &SearchQuery::new("grace"));
        let keys: Vec<&str> = hits.iter().map(|r| r.key()).collect();
        assert_eq!(keys, ["people/c2", "people/c1"]);
    }
}

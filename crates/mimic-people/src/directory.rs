//! Directory-people and other-contacts endpoints.
//!
//! These collections are read-only here: seeded by fixtures, queried through
//! the same mask/search/paginate pipeline as contacts. The directory listing
//! and both search operations require a `read_mask` up front; that check runs
//! before the collection is touched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use mimic_query::{paginate, search, FieldMask, Project, SearchQuery};
use mimic_types::ResourceKey;

use crate::error::{PeopleError, PeopleResult};
use crate::types::{PeopleState, Person};

const DIRECTORY_PREFIX: &str = "directoryPeople/";

/// One page of directory people.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryPage {
    pub people: Vec<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    pub total_items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_sync_token: Option<String>,
}

/// One page of search hits over a single collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub results: Vec<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    pub total_items: usize,
}

/// Fetch one directory person by key.
pub fn get_directory_person(
    state: &PeopleState,
    resource_name: &str,
    read_mask: Option<&str>,
) -> PeopleResult<Person> {
    ResourceKey::checked(resource_name, DIRECTORY_PREFIX)?;
    let person = state.find_directory_person(resource_name).ok_or_else(|| {
        PeopleError::NotFound(format!(
            "Directory person with resource name '{resource_name}' not found"
        ))
    })?;
    Ok(match read_mask {
        Some(mask) => person.project(&FieldMask::parse(mask)),
        None => person.clone(),
    })
}

/// List directory people, projected then paged.
///
/// Takes `&mut` state only to stamp a sync token when one is requested.
pub fn list_directory_people(
    state: &mut PeopleState,
    read_mask: Option<&str>,
    page_size: Option<usize>,
    page_token: Option<&str>,
    request_sync_token: bool,
) -> PeopleResult<DirectoryPage> {
    let mask =
        FieldMask::required(read_mask, "list_directory_people").map_err(PeopleError::Query)?;

    let projected: Vec<Person> = state
        .directory_people
        .iter()
        .map(|p| p.project(&mask))
        .collect();
    let page = paginate(&projected, page_size, page_token);

    let next_sync_token =
        request_sync_token.then(|| format!("sync_{}", state.seq.next_seq()));

    Ok(DirectoryPage {
        total_items: page.items.len(),
        people: page.items,
        next_page_token: page.next_page_token,
        next_sync_token,
    })
}

/// Substring-search directory people, then project and page the hits.
pub fn search_directory_people(
    state: &PeopleState,
    query: &str,
    read_mask: Option<&str>,
    page_size: Option<usize>,
    page_token: Option<&str>,
) -> PeopleResult<SearchPage> {
    let mask =
        FieldMask::required(read_mask, "search_directory_people").map_err(PeopleError::Query)?;
    search_collection(&state.directory_people, query, &mask, page_size, page_token)
}

/// Substring-search other contacts, then project and page the hits.
pub fn search_other_contacts(
    state: &PeopleState,
    query: &str,
    read_mask: Option<&str>,
    page_size: Option<usize>,
    page_token: Option<&str>,
) -> PeopleResult<SearchPage> {
    let mask =
        FieldMask::required(read_mask, "search_other_contacts").map_err(PeopleError::Query)?;
    search_collection(&state.other_contacts, query, &mask, page_size, page_token)
}

fn search_collection(
    collection: &[Person],
    query: &str,
    mask: &FieldMask,
    page_size: Option<usize>,
    page_token: Option<&str>,
) -> PeopleResult<SearchPage> {
    let hits = search(collection, &SearchQuery::new(query));
    let projected: Vec<Person> = hits.into_iter().map(|p| p.project(mask)).collect();
    let page = paginate(&projected, page_size, page_token);
    debug!(query, hits = projected.len(), "collection search complete");

    Ok(SearchPage {
        total_items: page.items.len(),
        results: page.items,
        next_page_token: page.next_page_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EmailAddress, Name};

    fn person(resource_name: &str, given: &str, email: &str) -> Person {
        Person {
            resource_name: resource_name.into(),
            etag: format!("etag_{given}"),
            names: vec![Name {
                display_name: Some(given.into()),
                given_name: Some(given.into()),
                ..Name::default()
            }],
            email_addresses: vec![EmailAddress {
                value: email.into(),
                kind: Some("work".into()),
            }],
            ..Person::default()
        }
    }

    fn seeded() -> PeopleState {
        PeopleState {
            directory_people: vec![
                person("directoryPeople/d1", "Ada", "ada@corp.example.com"),
                person("directoryPeople/d2", "Grace", "grace@corp.example.com"),
                person("directoryPeople/d3", "Adalbert", "adalbert@corp.example.com"),
            ],
            other_contacts: vec![person("otherContacts/o1", "Mallory", "mallory@example.org")],
            ..PeopleState::default()
        }
    }

    // ---- Test 1: Directory get projects and reports misses ----
    #[test]
    fn directory_get_and_miss() {
        let state = seeded();
        let person = get_directory_person(&state, "directoryPeople/d1", Some("names")).unwrap();
        assert!(!person.names.is_empty());
        assert!(person.email_addresses.is_empty());

        let err = get_directory_person(&state, "directoryPeople/d9", None).unwrap_err();
        assert_eq!(
            err,
            PeopleError::NotFound(
                "Directory person with resource name 'directoryPeople/d9' not found".into()
            )
        );
    }

    // ---- Test 2: Listing requires a read mask with exact text ----
    #[test]
    fn listing_requires_read_mask() {
        let mut state = seeded();
        let err = list_directory_people(&mut state, None, None, None, false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "read_mask is required for list_directory_people"
        );
    }

    // ---- Test 3: Listing pages through projected records ----
    #[test]
    fn listing_pages_projected_records() {
        let mut state = seeded();
        let page =
            list_directory_people(&mut state, Some("names"), Some(2), None, false).unwrap();
        assert_eq!(page.people.len(), 2);
        assert_eq!(page.next_page_token.as_deref(), Some("2"));
        assert!(page.people[0].email_addresses.is_empty());

        let rest = list_directory_people(&mut state, Some("names"), Some(2), Some("2"), false)
            .unwrap();
        assert_eq!(rest.people.len(), 1);
        assert_eq!(rest.next_page_token, None);
    }

    // ---- Test 4: Directory search dedupes and pages ----
    #[test]
    fn directory_search_pages_hits() {
        let state = seeded();
        let page =
            search_directory_people(&state, "ada", Some("names"), Some(1), None).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].resource_name, "directoryPeople/d1");
        assert_eq!(page.next_page_token.as_deref(), Some("1"));

        let rest = search_directory_people(&state, "ada", Some("names"), Some(1), Some("1"))
            .unwrap();
        assert_eq!(rest.results[0].resource_name, "directoryPeople/d3");
        assert_eq!(rest.next_page_token, None);
    }

    // ---- Test 5: Other-contacts search requires its own mask text ----
    #[test]
    fn other_contacts_mask_contract() {
        let state = seeded();
        let err = search_other_contacts(&state, "mallory", None, None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "read_mask is required for search_other_contacts"
        );

        let page =
            search_other_contacts(&state, "mallory", Some("emailAddresses"), None, None).unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(
            page.results[0].email_addresses[0].value,
            "mallory@example.org"
        );
    }

    // ---- Test 6: Malformed page tokens fall back to offset zero ----
    #[test]
    fn malformed_token_resets_offset() {
        let mut state = seeded();
        let page = list_directory_people(&mut state, Some("names"), Some(2), Some("junk"), false)
            .unwrap();
        assert_eq!(page.people[0].resource_name, "directoryPeople/d1");
        assert_eq!(page.next_page_token.as_deref(), Some("2"));
    }
}

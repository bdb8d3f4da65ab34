//! Contact endpoints: CRUD, connections listing, search, and batch get.
//!
//! Each operation validates its inputs (key prefix, phone format, required
//! masks) before touching the collection; failures carry the literal message
//! text of the endpoint contract. Reads never mutate; writes stamp `updated`
//! and a fresh etag.

use serde::{Deserialize, Serialize};
use tracing::debug;

use mimic_query::{paginate, search, sort_records, FieldMask, Project, SearchQuery, SortOrder};
use mimic_types::{iso_now, normalize_phone_number, ResourceKey};

use crate::error::{PeopleError, PeopleResult};
use crate::types::{PeopleState, Person, PersonData};

pub(crate) const PERSON_PREFIX: &str = "people/";

/// Response of a successful contact deletion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deletion {
    pub success: bool,
    pub deleted_resource_name: String,
    pub message: String,
}

/// Optional knobs for [`list_connections`].
#[derive(Clone, Debug, Default)]
pub struct ListConnectionsParams {
    /// The requesting user's own key, excluded from the listing.
    /// Defaults to `people/me`.
    pub resource_name: Option<String>,
    pub person_fields: Option<String>,
    pub page_size: Option<usize>,
    pub page_token: Option<String>,
    /// Wire form, e.g. `"FIRST_NAME_ASCENDING"`.
    pub sort_order: Option<String>,
    pub request_sync_token: bool,
}

/// One page of connections.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionsPage {
    pub connections: Vec<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    pub total_items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_sync_token: Option<String>,
}

/// Search results over contacts, directory people, and other contacts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub results: Vec<Person>,
    pub total_items: usize,
}

/// Batch lookup outcome: hits in request order, misses listed by key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetResponse {
    pub responses: Vec<Person>,
    pub not_found: Vec<String>,
    pub total_items: usize,
}

fn missing_person(resource_name: &str) -> PeopleError {
    PeopleError::NotFound(format!(
        "Person with resource name '{resource_name}' not found"
    ))
}

/// Digit-normalize every phone number on `data` in place.
fn normalize_phones(data: &mut PersonData) -> PeopleResult<()> {
    for phone in &mut data.phone_numbers {
        if phone.value.is_empty() {
            continue;
        }
        match normalize_phone_number(&phone.value) {
            Some(normalized) => phone.value = normalized,
            None => {
                return Err(PeopleError::Validation(format!(
                    "Invalid phone number format: {}",
                    phone.value
                )));
            }
        }
    }
    Ok(())
}

/// Overwrite `person` with the populated fields of `data`.
///
/// With a field mask only the named fields are considered; without one every
/// populated field overwrites. Empty collections on `data` are "not provided"
/// and never clear existing values.
fn apply_patch(person: &mut Person, data: &PersonData, fields: Option<&FieldMask>) {
    let wants = |field: &str| fields.map_or(true, |mask| mask.contains(field));

    if wants("names") && !data.names.is_empty() {
        person.names = data.names.clone();
    }
    if wants("nicknames") && !data.nicknames.is_empty() {
        person.nicknames = data.nicknames.clone();
    }
    if wants("emailAddresses") && !data.email_addresses.is_empty() {
        person.email_addresses = data.email_addresses.clone();
    }
    if wants("phoneNumbers") && !data.phone_numbers.is_empty() {
        person.phone_numbers = data.phone_numbers.clone();
    }
    if wants("addresses") && !data.addresses.is_empty() {
        person.addresses = data.addresses.clone();
    }
    if wants("organizations") && !data.organizations.is_empty() {
        person.organizations = data.organizations.clone();
    }
    if wants("birthdays") && !data.birthdays.is_empty() {
        person.birthdays = data.birthdays.clone();
    }
    if wants("photos") && !data.photos.is_empty() {
        person.photos = data.photos.clone();
    }
    if wants("urls") && !data.urls.is_empty() {
        person.urls = data.urls.clone();
    }
    if wants("userDefined") && !data.user_defined.is_empty() {
        person.user_defined = data.user_defined.clone();
    }
}

/// Fetch one contact by key, optionally restricted to `person_fields`.
pub fn get_contact(
    state: &PeopleState,
    resource_name: &str,
    person_fields: Option<&str>,
) -> PeopleResult<Person> {
    ResourceKey::checked(resource_name, PERSON_PREFIX)?;
    let person = state
        .find_person(resource_name)
        .ok_or_else(|| missing_person(resource_name))?;
    Ok(match person_fields {
        Some(mask) => person.project(&FieldMask::parse(mask)),
        None => person.clone(),
    })
}

/// Create a contact with a generated `people/c{n}` key.
pub fn create_contact(state: &mut PeopleState, mut data: PersonData) -> PeopleResult<Person> {
    normalize_phones(&mut data)?;

    let key = ResourceKey::numbered(PERSON_PREFIX, "c", state.seq.next_seq());
    let now = iso_now();
    let person = Person {
        resource_name: key.as_str().to_string(),
        etag: state.next_etag(),
        names: data.names,
        nicknames: data.nicknames,
        email_addresses: data.email_addresses,
        phone_numbers: data.phone_numbers,
        addresses: data.addresses,
        organizations: data.organizations,
        birthdays: data.birthdays,
        photos: data.photos,
        urls: data.urls,
        user_defined: data.user_defined,
        created: Some(now.clone()),
        updated: Some(now),
    };
    debug!(resource_name = %person.resource_name, "created contact");
    state.people.push(person.clone());
    Ok(person)
}

/// Update a contact in place.
///
/// `update_person_fields` restricts which fields of `data` apply; without it
/// every populated field overwrites. Stamps `updated` and a fresh etag.
pub fn update_contact(
    state: &mut PeopleState,
    resource_name: &str,
    mut data: PersonData,
    update_person_fields: Option<&str>,
) -> PeopleResult<Person> {
    ResourceKey::checked(resource_name, PERSON_PREFIX)?;
    normalize_phones(&mut data)?;

    // Resolve the record before touching the sequence counter, so a missed
    // lookup leaves the store untouched.
    let index = state
        .person_index(resource_name)
        .ok_or_else(|| missing_person(resource_name))?;
    let etag = state.next_etag();
    let person = &mut state.people[index];

    let mask = update_person_fields.map(FieldMask::parse);
    apply_patch(person, &data, mask.as_ref());
    person.updated = Some(iso_now());
    person.etag = etag;

    debug!(resource_name, "updated contact");
    Ok(person.clone())
}

/// Delete a contact by key.
pub fn delete_contact(state: &mut PeopleState, resource_name: &str) -> PeopleResult<Deletion> {
    ResourceKey::checked(resource_name, PERSON_PREFIX)?;
    state
        .remove_person(resource_name)
        .ok_or_else(|| missing_person(resource_name))?;
    debug!(resource_name, "deleted contact");
    Ok(Deletion {
        success: true,
        deleted_resource_name: resource_name.to_string(),
        message: "Person deleted successfully".to_string(),
    })
}

/// List the user's connections: everyone except the requesting key, sorted,
/// paged, then projected.
///
/// Takes `&mut` state only to stamp a sync token when one is requested.
pub fn list_connections(
    state: &mut PeopleState,
    params: &ListConnectionsParams,
) -> PeopleResult<ConnectionsPage> {
    let own_key = params.resource_name.as_deref().unwrap_or("people/me");
    ResourceKey::checked(own_key, PERSON_PREFIX)?;

    let mut connections: Vec<Person> = state
        .people
        .iter()
        .filter(|p| p.resource_name != own_key)
        .cloned()
        .collect();

    if let Some(raw) = params.sort_order.as_deref() {
        let order = SortOrder::parse(raw).map_err(PeopleError::Query)?;
        sort_records(&mut connections, order);
    }

    let page = paginate(&connections, params.page_size, params.page_token.as_deref());
    let mut connections = page.items;

    if let Some(raw) = params.person_fields.as_deref() {
        let mask = FieldMask::parse(raw);
        connections = connections.iter().map(|p| p.project(&mask)).collect();
    }

    let next_sync_token = params
        .request_sync_token
        .then(|| format!("sync_{}", state.seq.next_seq()));

    Ok(ConnectionsPage {
        total_items: connections.len(),
        connections,
        next_page_token: page.next_page_token,
        next_sync_token,
    })
}

/// Search contacts, directory people, and other contacts in one pass.
///
/// Matches case-insensitive substrings over names, emails, organizations,
/// and nicknames, plus digit-normalized phone numbers. Results deduplicate
/// by key in first-encounter order, then project through `read_mask`.
pub fn search_people(
    state: &PeopleState,
    query: &str,
    read_mask: Option<&str>,
) -> PeopleResult<SearchResults> {
    let mask = FieldMask::required(read_mask, "search_people").map_err(PeopleError::Query)?;

    let haystack = state
        .people
        .iter()
        .chain(&state.directory_people)
        .chain(&state.other_contacts);
    let hits = search(haystack, &SearchQuery::new(query));
    let results: Vec<Person> = hits.into_iter().map(|p| p.project(&mask)).collect();

    debug!(query, hits = results.len(), "people search complete");
    Ok(SearchResults {
        total_items: results.len(),
        results,
    })
}

/// Look up several contacts at once; misses are reported, not fatal.
pub fn batch_get(
    state: &PeopleState,
    resource_names: &[String],
    person_fields: Option<&str>,
) -> PeopleResult<BatchGetResponse> {
    for name in resource_names {
        ResourceKey::checked(name, PERSON_PREFIX)?;
    }
    let mask = person_fields.map(FieldMask::parse);

    let mut responses = Vec::new();
    let mut not_found = Vec::new();
    for name in resource_names {
        match state.find_person(name) {
            Some(person) => responses.push(match &mask {
                Some(mask) => person.project(mask),
                None => person.clone(),
            }),
            None => not_found.push(name.clone()),
        }
    }

    Ok(BatchGetResponse {
        total_items: responses.len(),
        responses,
        not_found,
    })
}

//! Contact-group endpoints: CRUD, listing, and membership changes.
//!
//! Groups reference contacts by `people/…` key; membership changes validate
//! additions against the contacts collection and report unknown keys instead
//! of failing the whole call.

use serde::{Deserialize, Serialize};
use tracing::debug;

use mimic_query::{paginate, FieldMask, Project};
use mimic_types::{iso_now, ResourceKey};

use crate::contacts::PERSON_PREFIX;
use crate::error::{PeopleError, PeopleResult};
use crate::types::{ContactGroup, ContactGroupData, PeopleState};

const GROUP_PREFIX: &str = "contactGroups/";

/// Response of a successful group deletion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDeletion {
    pub success: bool,
    pub deleted_resource_name: String,
    pub message: String,
    /// Whether member contacts were deleted along with the group.
    pub deleted_contacts: bool,
}

/// One page of contact groups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupsPage {
    pub contact_groups: Vec<ContactGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    pub next_sync_token: String,
    pub total_items: usize,
}

/// Outcome of a membership change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipChange {
    pub resource_name: String,
    pub etag: String,
    pub member_count: usize,
    /// Keys requested for addition that name no existing contact.
    pub not_found_resource_names: Vec<String>,
}

fn missing_group(resource_name: &str) -> PeopleError {
    PeopleError::NotFound(format!(
        "Contact group with resource name '{resource_name}' not found"
    ))
}

/// Fetch one group by key, with optional member truncation and projection.
pub fn get_group(
    state: &PeopleState,
    resource_name: &str,
    max_members: Option<usize>,
    group_fields: Option<&str>,
) -> PeopleResult<ContactGroup> {
    ResourceKey::checked(resource_name, GROUP_PREFIX)?;
    let group = state
        .find_group(resource_name)
        .ok_or_else(|| missing_group(resource_name))?;

    let mut group = group.clone();
    if let Some(limit) = max_members {
        group.member_resource_names.truncate(limit);
    }
    Ok(match group_fields {
        Some(mask) => group.project(&FieldMask::parse(mask)),
        None => group,
    })
}

/// Create a group with a generated `contactGroups/g{n}` key.
///
/// Member keys must carry the `people/` prefix; `group_type` defaults to
/// `USER_CONTACT_GROUP`.
pub fn create_group(
    state: &mut PeopleState,
    data: ContactGroupData,
) -> PeopleResult<ContactGroup> {
    let name = data.name.as_deref().unwrap_or("").trim();
    if name.is_empty() {
        return Err(PeopleError::Validation(
            "Contact group name is required".to_string(),
        ));
    }
    let members = data.member_resource_names.unwrap_or_default();
    for member in &members {
        ResourceKey::checked(member, PERSON_PREFIX)?;
    }

    let key = ResourceKey::numbered(GROUP_PREFIX, "g", state.seq.next_seq());
    let now = iso_now();
    let group = ContactGroup {
        resource_name: key.as_str().to_string(),
        etag: state.next_etag(),
        name: name.to_string(),
        group_type: data
            .group_type
            .unwrap_or_else(|| "USER_CONTACT_GROUP".to_string()),
        member_count: members.len(),
        member_resource_names: members,
        created: Some(now.clone()),
        updated: Some(now),
    };
    debug!(resource_name = %group.resource_name, "created contact group");
    state.contact_groups.push(group.clone());
    Ok(group)
}

/// Update a group in place.
///
/// `update_group_fields` restricts which fields of `data` apply. The member
/// count follows the member list whenever one is provided.
pub fn update_group(
    state: &mut PeopleState,
    resource_name: &str,
    data: ContactGroupData,
    update_group_fields: Option<&str>,
) -> PeopleResult<ContactGroup> {
    ResourceKey::checked(resource_name, GROUP_PREFIX)?;
    if let Some(members) = &data.member_resource_names {
        for member in members {
            ResourceKey::checked(member, PERSON_PREFIX)?;
        }
    }

    // Resolve the record before touching the sequence counter, so a missed
    // lookup leaves the store untouched.
    let index = state
        .group_index(resource_name)
        .ok_or_else(|| missing_group(resource_name))?;
    let etag = state.next_etag();
    let group = &mut state.contact_groups[index];

    let mask = update_group_fields.map(FieldMask::parse);
    let wants = |field: &str| mask.as_ref().map_or(true, |m| m.contains(field));

    if wants("name") {
        if let Some(name) = &data.name {
            group.name = name.clone();
        }
    }
    if wants("groupType") {
        if let Some(group_type) = &data.group_type {
            group.group_type = group_type.clone();
        }
    }
    if wants("memberResourceNames") {
        if let Some(members) = &data.member_resource_names {
            group.member_resource_names = members.clone();
            group.member_count = members.len();
        }
    }

    group.updated = Some(iso_now());
    group.etag = etag;
    debug!(resource_name, "updated contact group");
    Ok(group.clone())
}

/// Delete a group; with `delete_contacts` its member contacts go too.
pub fn delete_group(
    state: &mut PeopleState,
    resource_name: &str,
    delete_contacts: bool,
) -> PeopleResult<GroupDeletion> {
    ResourceKey::checked(resource_name, GROUP_PREFIX)?;
    let group = state
        .remove_group(resource_name)
        .ok_or_else(|| missing_group(resource_name))?;

    if delete_contacts {
        for member in &group.member_resource_names {
            state.remove_person(member);
        }
        debug!(
            resource_name,
            members = group.member_resource_names.len(),
            "deleted group members"
        );
    }

    Ok(GroupDeletion {
        success: true,
        deleted_resource_name: resource_name.to_string(),
        message: "Contact group deleted successfully".to_string(),
        deleted_contacts: delete_contacts,
    })
}

/// List groups, projected then paged. Always stamps a sync token.
pub fn list_groups(
    state: &mut PeopleState,
    page_size: Option<usize>,
    page_token: Option<&str>,
    group_fields: Option<&str>,
) -> PeopleResult<GroupsPage> {
    let mask = group_fields.map(FieldMask::parse);
    let projected: Vec<ContactGroup> = state
        .contact_groups
        .iter()
        .map(|group| match &mask {
            Some(mask) => group.project(mask),
            None => group.clone(),
        })
        .collect();

    let page = paginate(&projected, page_size, page_token);
    Ok(GroupsPage {
        total_items: page.items.len(),
        contact_groups: page.items,
        next_page_token: page.next_page_token,
        next_sync_token: format!("sync_{}", state.seq.next_seq()),
    })
}

/// Add and remove group members in one call.
///
/// Additions must name existing contacts; unknown keys are collected into
/// `not_found_resource_names`. Removals are applied as-is. Duplicates never
/// enter the member list; existing order is preserved.
pub fn modify_members(
    state: &mut PeopleState,
    resource_name: &str,
    to_add: &[String],
    to_remove: &[String],
) -> PeopleResult<MembershipChange> {
    ResourceKey::checked(resource_name, GROUP_PREFIX)?;
    for member in to_add.iter().chain(to_remove) {
        ResourceKey::checked(member, PERSON_PREFIX)?;
    }
    let index = state
        .group_index(resource_name)
        .ok_or_else(|| missing_group(resource_name))?;

    let mut not_found = Vec::new();
    let mut additions = Vec::new();
    for member in to_add {
        if state.find_person(member).is_none() {
            not_found.push(member.clone());
        } else {
            additions.push(member.clone());
        }
    }

    let etag = state.next_etag();
    let group = &mut state.contact_groups[index];

    for member in additions {
        if !group.member_resource_names.contains(&member) {
            group.member_resource_names.push(member);
        }
    }
    group
        .member_resource_names
        .retain(|member| !to_remove.contains(member));

    group.member_count = group.member_resource_names.len();
    group.updated = Some(iso_now());
    group.etag = etag.clone();

    debug!(
        resource_name,
        members = group.member_count,
        "modified group membership"
    );
    Ok(MembershipChange {
        resource_name: resource_name.to_string(),
        etag,
        member_count: group.member_count,
        not_found_resource_names: not_found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::create_contact;
    use crate::types::{Name, PersonData};

    fn contact_data(given: &str) -> PersonData {
        PersonData {
            names: vec![Name {
                given_name: Some(given.into()),
                ..Name::default()
            }],
            ..PersonData::default()
        }
    }

    fn seeded() -> (PeopleState, String, String) {
        let mut state = PeopleState::default();
        let a = create_contact(&mut state, contact_data("Ada")).unwrap();
        let b = create_contact(&mut state, contact_data("Grace")).unwrap();
        (state, a.resource_name, b.resource_name)
    }

    // ---- Test 1: Create fills defaults and counts members ----
    #[test]
    fn create_fills_defaults() {
        let (mut state, a, _) = seeded();
        let group = create_group(
            &mut state,
            ContactGroupData {
                name: Some("Friends".into()),
                group_type: None,
                member_resource_names: Some(vec![a.clone()]),
            },
        )
        .unwrap();
        assert!(group.resource_name.starts_with("contactGroups/g"));
        assert_eq!(group.group_type, "USER_CONTACT_GROUP");
        assert_eq!(group.member_count, 1);

        let err = create_group(&mut state, ContactGroupData::default()).unwrap_err();
        assert_eq!(
            err,
            PeopleError::Validation("Contact group name is required".into())
        );
    }

    // ---- Test 2: Get truncates members and projects fields ----
    #[test]
    fn get_truncates_and_projects() {
        let (mut state, a, b) = seeded();
        let group = create_group(
            &mut state,
            ContactGroupData {
                name: Some("Team".into()),
                group_type: None,
                member_resource_names: Some(vec![a, b]),
            },
        )
        .unwrap();

        let fetched = get_group(&state, &group.resource_name, Some(1), Some("name")).unwrap();
        assert_eq!(fetched.name, "Team");
        // memberResourceNames was outside the mask.
        assert!(fetched.member_resource_names.is_empty());

        let untruncated = get_group(&state, &group.resource_name, None, None).unwrap();
        assert_eq!(untruncated.member_resource_names.len(), 2);

        let err = get_group(&state, "contactGroups/g99", None, None).unwrap_err();
        assert_eq!(
            err,
            PeopleError::NotFound(
                "Contact group with resource name 'contactGroups/g99' not found".into()
            )
        );
    }

    // ---- Test 3: Update refreshes member count and etag ----
    #[test]
    fn update_refreshes_count_and_etag() {
        let (mut state, a, b) = seeded();
        let group = create_group(
            &mut state,
            ContactGroupData {
                name: Some("Team".into()),
                group_type: None,
                member_resource_names: Some(vec![a.clone()]),
            },
        )
        .unwrap();

        let updated = update_group(
            &mut state,
            &group.resource_name,
            ContactGroupData {
                name: None,
                group_type: None,
                member_resource_names: Some(vec![a, b]),
            },
            None,
        )
        .unwrap();
        assert_eq!(updated.member_count, 2);
        assert_eq!(updated.name, "Team");
        assert_ne!(updated.etag, group.etag);
    }

    // ---- Test 4: Delete can cascade to member contacts ----
    #[test]
    fn delete_cascades_when_asked() {
        let (mut state, a, b) = seeded();
        let group = create_group(
            &mut state,
            ContactGroupData {
                name: Some("Team".into()),
                group_type: None,
                member_resource_names: Some(vec![a.clone(), b]),
            },
        )
        .unwrap();

        let response = delete_group(&mut state, &group.resource_name, true).unwrap();
        assert!(response.success);
        assert!(response.deleted_contacts);
        assert_eq!(response.message, "Contact group deleted successfully");
        assert!(state.find_person(&a).is_none());
        assert!(state.contact_groups.is_empty());
    }

    // ---- Test 5: Listing projects then pages, and stamps a sync token ----
    #[test]
    fn listing_projects_and_pages() {
        let (mut state, _, _) = seeded();
        for name in ["One", "Two", "Three"] {
            create_group(
                &mut state,
                ContactGroupData {
                    name: Some(name.into()),
                    group_type: None,
                    member_resource_names: None,
                },
            )
            .unwrap();
        }

        let page = list_groups(&mut state, Some(2), None, Some("name")).unwrap();
        assert_eq!(page.contact_groups.len(), 2);
        assert_eq!(page.contact_groups[0].name, "One");
        assert!(page.contact_groups[0].group_type.is_empty());
        assert_eq!(page.next_page_token.as_deref(), Some("2"));
        assert!(page.next_sync_token.starts_with("sync_"));
    }

    // ---- Test 6: Membership changes validate additions and dedupe ----
    #[test]
    fn membership_changes_validate_and_dedupe() {
        let (mut state, a, b) = seeded();
        let group = create_group(
            &mut state,
            ContactGroupData {
                name: Some("Team".into()),
                group_type: None,
                member_resource_names: Some(vec![a.clone()]),
            },
        )
        .unwrap();

        let change = modify_members(
            &mut state,
            &group.resource_name,
            &[a.clone(), b.clone(), "people/c99".to_string()],
            &[],
        )
        .unwrap();
        assert_eq!(change.member_count, 2);
        assert_eq!(change.not_found_resource_names, ["people/c99"]);

        let removal =
            modify_members(&mut state, &group.resource_name, &[], &[a]).unwrap();
        assert_eq!(removal.member_count, 1);
        let remaining = get_group(&state, &group.resource_name, None, None).unwrap();
        assert_eq!(remaining.member_resource_names, [b]);
    }

    // ---- Test 7: Failed writes leave the sequence counter untouched ----
    #[test]
    fn failed_writes_do_not_advance_sequence() {
        let mut state = PeopleState::default();

        let err = update_group(
            &mut state,
            "contactGroups/g9",
            ContactGroupData {
                name: Some("Ghost".into()),
                group_type: None,
                member_resource_names: None,
            },
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            PeopleError::NotFound(
                "Contact group with resource name 'contactGroups/g9' not found".into()
            )
        );

        let err = modify_members(&mut state, "contactGroups/g9", &[], &[]).unwrap_err();
        assert_eq!(
            err,
            PeopleError::NotFound(
                "Contact group with resource name 'contactGroups/g9' not found".into()
            )
        );

        let group = create_group(
            &mut state,
            ContactGroupData {
                name: Some("First".into()),
                group_type: None,
                member_resource_names: None,
            },
        )
        .unwrap();
        assert_eq!(group.resource_name, "contactGroups/g1");
    }
}

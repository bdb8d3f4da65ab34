//! Typed records for the People simulation.
//!
//! Every resource is an explicit struct rather than an untyped map, so
//! field-mask projection is a field-by-field copy guarded by mask membership
//! instead of reflection. Wire names are camelCase; collection keys carry
//! fixed prefixes (`people/`, `contactGroups/`, `otherContacts/`,
//! `directoryPeople/`).

use serde::{Deserialize, Serialize};

use mimic_query::{FieldMask, Project, Searchable, SortKeys};
use mimic_types::SequenceGenerator;

/// A structured name on a person record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
}

/// An email address entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAddress {
    pub value: String,
    /// `home`, `work`, or `other`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A phone number entry. Values are stored digit-normalized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub value: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_form: Option<String>,
}

/// A postal address entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// An organization affiliation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// A nickname entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nickname {
    pub value: String,
}

/// Calendar-date components of a birthday.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
}

/// A birthday entry, structured and/or free-text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateParts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A photo entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub default: bool,
}

/// A URL entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    pub value: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A caller-defined key/value pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDefined {
    pub key: String,
    pub value: String,
}

/// A person record: contacts, other-contacts, and directory people all share
/// this shape, distinguished only by which collection holds them and the key
/// prefix they carry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub resource_name: String,
    pub etag: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<Name>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nicknames: Vec<Nickname>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email_addresses: Vec<EmailAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<PhoneNumber>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organizations: Vec<Organization>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub birthdays: Vec<Birthday>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<Photo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<Url>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_defined: Vec<UserDefined>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// The mutable portion of a person, as accepted by create/update.
///
/// Empty collections mean "not provided": update only overwrites fields the
/// caller populated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonData {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<Name>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nicknames: Vec<Nickname>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email_addresses: Vec<EmailAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<PhoneNumber>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organizations: Vec<Organization>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub birthdays: Vec<Birthday>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<Photo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<Url>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_defined: Vec<UserDefined>,
}

impl Person {
    fn name_field(&self, pick: impl Fn(&Name) -> Option<&str>) -> &str {
        self.names.first().and_then(pick).unwrap_or("")
    }
}

impl Project for Person {
    fn project(&self, mask: &FieldMask) -> Self {
        // resourceName and etag survive any mask.
        Self {
            resource_name: self.resource_name.clone(),
            etag: self.etag.clone(),
            names: mask.contains("names").then(|| self.names.clone()).unwrap_or_default(),
            nicknames: mask
                .contains("nicknames")
                .then(|| self.nicknames.clone())
                .unwrap_or_default(),
            email_addresses: mask
                .contains("emailAddresses")
                .then(|| self.email_addresses.clone())
                .unwrap_or_default(),
            phone_numbers: mask
                .contains("phoneNumbers")
                .then(|| self.phone_numbers.clone())
                .unwrap_or_default(),
            addresses: mask
                .contains("addresses")
                .then(|| self.addresses.clone())
                .unwrap_or_default(),
            organizations: mask
                .contains("organizations")
                .then(|| self.organizations.clone())
                .unwrap_or_default(),
            birthdays: mask
                .contains("birthdays")
                .then(|| self.birthdays.clone())
                .unwrap_or_default(),
            photos: mask.contains("photos").then(|| self.photos.clone()).unwrap_or_default(),
            urls: mask.contains("urls").then(|| self.urls.clone()).unwrap_or_default(),
            user_defined: mask
                .contains("userDefined")
                .then(|| self.user_defined.clone())
                .unwrap_or_default(),
            created: mask.contains("created").then(|| self.created.clone()).flatten(),
            updated: mask.contains("updated").then(|| self.updated.clone()).flatten(),
        }
    }
}

impl Searchable for Person {
    fn key(&self) -> &str {
        &self.resource_name
    }

    fn text_fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        for name in &self.names {
            fields.extend(name.display_name.as_deref());
            fields.extend(name.given_name.as_deref());
            fields.extend(name.family_name.as_deref());
        }
        for email in &self.email_addresses {
            fields.push(email.value.as_str());
        }
        for org in &self.organizations {
            fields.extend(org.name.as_deref());
            fields.extend(org.title.as_deref());
        }
        for nickname in &self.nicknames {
            fields.push(nickname.value.as_str());
        }
        fields
    }

    fn phone_fields(&self) -> Vec<&str> {
        self.phone_numbers.iter().map(|p| p.value.as_str()).collect()
    }
}

impl SortKeys for Person {
    fn given_name(&self) -> &str {
        self.name_field(|n| n.given_name.as_deref())
    }

    fn family_name(&self) -> &str {
        self.name_field(|n| n.family_name.as_deref())
    }

    fn last_modified(&self) -> &str {
        self.updated.as_deref().unwrap_or("")
    }
}

/// A named grouping of contact resource keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactGroup {
    pub resource_name: String,
    pub etag: String,
    pub name: String,
    /// `USER_CONTACT_GROUP` or `SYSTEM_CONTACT_GROUP`.
    pub group_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub member_resource_names: Vec<String>,
    #[serde(default)]
    pub member_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

impl Project for ContactGroup {
    fn project(&self, mask: &FieldMask) -> Self {
        Self {
            resource_name: self.resource_name.clone(),
            etag: self.etag.clone(),
            name: mask.contains("name").then(|| self.name.clone()).unwrap_or_default(),
            group_type: mask
                .contains("groupType")
                .then(|| self.group_type.clone())
                .unwrap_or_default(),
            member_resource_names: mask
                .contains("memberResourceNames")
                .then(|| self.member_resource_names.clone())
                .unwrap_or_default(),
            member_count: if mask.contains("memberCount") {
                self.member_count
            } else {
                0
            },
            created: mask.contains("created").then(|| self.created.clone()).flatten(),
            updated: mask.contains("updated").then(|| self.updated.clone()).flatten(),
        }
    }
}

/// The mutable portion of a contact group, as accepted by create/update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactGroupData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_resource_names: Option<Vec<String>>,
}

/// The whole People simulation state: one collection per resource type plus
/// the shared ID counter, serialized together so snapshots stay consistent.
///
/// Collections are ordered lists keyed by each record's `resource_name`;
/// listing and pagination follow insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleState {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub other_contacts: Vec<Person>,
    #[serde(default)]
    pub directory_people: Vec<Person>,
    #[serde(default)]
    pub contact_groups: Vec<ContactGroup>,
    #[serde(default)]
    pub seq: SequenceGenerator,
}

impl PeopleState {
    pub fn find_person(&self, resource_name: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.resource_name == resource_name)
    }

    /// Position of a contact in the collection, for mutation after other
    /// state (e.g. the sequence counter) has been touched.
    pub fn person_index(&self, resource_name: &str) -> Option<usize> {
        self.people.iter().position(|p| p.resource_name == resource_name)
    }

    /// Remove a contact by key, returning it when present.
    pub fn remove_person(&mut self, resource_name: &str) -> Option<Person> {
        let idx = self.person_index(resource_name)?;
        Some(self.people.remove(idx))
    }

    pub fn find_directory_person(&self, resource_name: &str) -> Option<&Person> {
        self.directory_people
            .iter()
            .find(|p| p.resource_name == resource_name)
    }

    pub fn find_group(&self, resource_name: &str) -> Option<&ContactGroup> {
        self.contact_groups
            .iter()
            .find(|g| g.resource_name == resource_name)
    }

    /// Position of a group in the collection; see [`Self::person_index`].
    pub fn group_index(&self, resource_name: &str) -> Option<usize> {
        self.contact_groups
            .iter()
            .position(|g| g.resource_name == resource_name)
    }

    pub fn remove_group(&mut self, resource_name: &str) -> Option<ContactGroup> {
        let idx = self.group_index(resource_name)?;
        Some(self.contact_groups.remove(idx))
    }

    /// Next `etag_{n}` version tag.
    pub fn next_etag(&mut self) -> String {
        format!("etag_{}", self.seq.next_seq())
    }
}

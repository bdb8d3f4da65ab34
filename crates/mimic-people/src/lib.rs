//! Contacts/People simulation.
//!
//! Models a contacts service over an in-process store: contacts, contact
//! groups, other contacts, and a read-only company directory. Every list and
//! search endpoint runs the same pipeline — field-mask projection, substring
//! search with phone normalization, offset-token pagination, and (for
//! connections) stable sorting — shared through `mimic_query`.
//!
//! All state lives in a [`PeopleState`] owned by the caller (typically inside
//! a `mimic_store::JsonStore`); nothing here is global.

pub mod contacts;
pub mod directory;
pub mod error;
pub mod groups;
pub mod types;

pub use contacts::{
    batch_get, create_contact, delete_contact, get_contact, list_connections, search_people,
    update_contact, BatchGetResponse, ConnectionsPage, Deletion, ListConnectionsParams,
    SearchResults,
};
pub use directory::{
    get_directory_person, list_directory_people, search_directory_people, search_other_contacts,
    DirectoryPage, SearchPage,
};
pub use error::{PeopleError, PeopleResult};
pub use groups::{
    create_group, delete_group, get_group, list_groups, modify_members, update_group,
    GroupDeletion, GroupsPage, MembershipChange,
};
pub use types::{
    Address, Birthday, ContactGroup, ContactGroupData, DateParts, EmailAddress, Name, Nickname,
    Organization, PeopleState, Person, PersonData, PhoneNumber, Photo, Url, UserDefined,
};

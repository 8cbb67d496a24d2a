//! Contacts step: phones, emails and addresses.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::StepContract;
use crate::record::{Address, AddressField, AddressKind, CompositeRecord, StringList, SwiftAddress, SwiftField};
use crate::settings::WizardSettings;
use crate::wizard::WizardStep;

/// A change to the contacts draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ContactsEdit {
    AddPhone {
        #[serde(default)]
        value: String,
    },
    SetPhone { index: usize, value: String },
    RemovePhone { index: usize },
    AddEmail {
        #[serde(default)]
        value: String,
    },
    SetEmail { index: usize, value: String },
    RemoveEmail { index: usize },
    Address {
        kind: AddressKind,
        field: AddressField,
        value: String,
    },
    Swift { field: SwiftField, value: String },
}

/// Draft of the contacts step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactsDraft {
    phones: StringList,
    emails: StringList,
    main_address: Address,
    fact_address: Address,
    post_address: Address,
    swift: SwiftAddress,
}

impl ContactsDraft {
    pub fn phones(&self) -> &StringList {
        &self.phones
    }

    pub fn emails(&self) -> &StringList {
        &self.emails
    }

    pub fn address(&self, kind: AddressKind) -> &Address {
        match kind {
            AddressKind::Main => &self.main_address,
            AddressKind::Fact => &self.fact_address,
            AddressKind::Post => &self.post_address,
        }
    }

    pub fn swift(&self) -> &SwiftAddress {
        &self.swift
    }

    fn address_mut(&mut self, kind: AddressKind) -> &mut Address {
        match kind {
            AddressKind::Main => &mut self.main_address,
            AddressKind::Fact => &mut self.fact_address,
            AddressKind::Post => &mut self.post_address,
        }
    }

    /// Apply one change; list edits with a stale index are dropped
    pub fn apply(&mut self, edit: ContactsEdit) {
        match edit {
            ContactsEdit::AddPhone { value } => {
                self.phones.push(value);
            }
            ContactsEdit::SetPhone { index, value } => set_item(&mut self.phones, "phone", index, value),
            ContactsEdit::RemovePhone { index } => remove_item(&mut self.phones, "phone", index),
            ContactsEdit::AddEmail { value } => {
                self.emails.push(value);
            }
            ContactsEdit::SetEmail { index, value } => set_item(&mut self.emails, "email", index, value),
            ContactsEdit::RemoveEmail { index } => remove_item(&mut self.emails, "email", index),
            ContactsEdit::Address { kind, field, value } => self.address_mut(kind).set(field, &value),
            ContactsEdit::Swift { field, value } => self.swift.set(field, &value),
        }
    }
}

fn set_item(list: &mut StringList, what: &str, index: usize, value: String) {
    if !list.set(index, value) {
        warn!(what, index, len = list.len(), "Ignoring edit of missing list item");
    }
}

fn remove_item(list: &mut StringList, what: &str, index: usize) {
    if list.remove(index).is_none() {
        warn!(what, index, len = list.len(), "Ignoring removal of missing list item");
    }
}

impl StepContract for ContactsDraft {
    const STEP: WizardStep = WizardStep::Contacts;

    fn from_record(record: &CompositeRecord, _settings: &WizardSettings) -> Self {
        let address = |kind| record.address(kind).cloned().unwrap_or_default();
        Self {
            phones: record.phone.clone().unwrap_or_default(),
            emails: record.email.clone().unwrap_or_default(),
            main_address: address(AddressKind::Main),
            fact_address: address(AddressKind::Fact),
            post_address: address(AddressKind::Post),
            swift: record.swift_address.clone().unwrap_or_default(),
        }
    }

    fn merge_into(&self, record: &mut CompositeRecord) {
        record.phone = Some(self.phones.clone());
        record.email = Some(self.emails.clone());
        record.main_address = Some(self.main_address.clone());
        record.fact_address = Some(self.fact_address.clone());
        record.post_address = Some(self.post_address.clone());
        record.swift_address = Some(self.swift.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_list_add_set_remove() {
        let mut draft = ContactsDraft::default();
        draft.apply(ContactsEdit::AddPhone { value: String::new() });
        draft.apply(ContactsEdit::AddPhone {
            value: "+7 900 000-00-01".into(),
        });
        draft.apply(ContactsEdit::SetPhone {
            index: 0,
            value: "+7 495 500-55-50".into(),
        });
        draft.apply(ContactsEdit::RemovePhone { index: 1 });
        assert_eq!(draft.phones().as_slice(), ["+7 495 500-55-50".to_string()]);
    }

    #[test]
    fn test_add_then_remove_restores_list() {
        let mut draft = ContactsDraft::default();
        draft.apply(ContactsEdit::AddEmail {
            value: "info@example.com".into(),
        });
        let before = draft.emails().clone();

        draft.apply(ContactsEdit::AddEmail { value: String::new() });
        draft.apply(ContactsEdit::RemoveEmail { index: 1 });
        assert_eq!(draft.emails(), &before);
    }

    #[test]
    fn test_stale_index_is_ignored() {
        let mut draft = ContactsDraft::default();
        draft.apply(ContactsEdit::SetEmail {
            index: 0,
            value: "x@example.com".into(),
        });
        draft.apply(ContactsEdit::RemovePhone { index: 2 });
        assert_eq!(draft, ContactsDraft::default());
    }

    #[test]
    fn test_address_fields_are_independent() {
        let mut draft = ContactsDraft::default();
        draft.apply(ContactsEdit::Address {
            kind: AddressKind::Post,
            field: AddressField::City,
            value: "Moscow".into(),
        });
        draft.apply(ContactsEdit::Swift {
            field: SwiftField::ClientName,
            value: "SBERBANK".into(),
        });

        assert_eq!(draft.address(AddressKind::Post).get(AddressField::City), Some("Moscow"));
        assert!(draft.address(AddressKind::Main).is_empty());
        assert_eq!(draft.swift().get(SwiftField::ClientName), Some("SBERBANK"));
    }

    #[test]
    fn test_merge_writes_all_contacts() {
        let mut draft = ContactsDraft::default();
        draft.apply(ContactsEdit::AddEmail {
            value: "info@example.com".into(),
        });

        let mut record = CompositeRecord::default();
        draft.merge_into(&mut record);
        assert_eq!(record.email.as_ref().map(|e| e.len()), Some(1));
        assert_eq!(record.phone, Some(StringList::new()));
        assert_eq!(record.main_address, Some(Address::default()));
        assert_eq!(record.swift_address, Some(SwiftAddress::default()));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_edit_json_shape() {
        let json = r#"{"action":"address","kind":"fact","field":"postal_code","value":"117997"}"#;
        let edit: ContactsEdit = serde_json::from_str(json).unwrap();
        assert_eq!(
            edit,
            ContactsEdit::Address {
                kind: AddressKind::Fact,
                field: AddressField::PostalCode,
                value: "117997".into(),
            }
        );

        let add: ContactsEdit = serde_json::from_str(r#"{"action":"add_phone"}"#).unwrap();
        assert_eq!(add, ContactsEdit::AddPhone { value: String::new() });
    }
}

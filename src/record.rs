//! The composite onboarding record
//!
//! [`CompositeRecord`] is the single source of truth accumulated across the
//! wizard steps. Every field is optional until a step enforces it. The serde
//! layout is the submission payload handed to the consumer of the wizard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::types::LegalStatus;

/// Ordered, index-addressed list of strings.
///
/// Used for phones, emails and additional classifier codes. Items have no
/// identity beyond their position; out-of-range operations are rejected
/// instead of panicking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringList(Vec<String>);

impl StringList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item, returning its index
    pub fn push(&mut self, value: impl Into<String>) -> usize {
        self.0.push(value.into());
        self.0.len() - 1
    }

    /// Insert an item at `index` (`index == len` appends)
    pub fn insert(&mut self, index: usize, value: impl Into<String>) -> bool {
        if index > self.0.len() {
            return false;
        }
        self.0.insert(index, value.into());
        true
    }

    /// Replace the item at `index` in place
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Remove the item at `index`, shifting later items down
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for StringList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

impl<S: Into<String>> FromIterator<S> for StringList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Which of the three standard addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    #[strum(serialize = "Legal address")]
    Main,
    #[strum(serialize = "Factual address")]
    Fact,
    #[strum(serialize = "Postal address")]
    Post,
}

/// One field of an [`Address`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum AddressField {
    Country,
    Region,
    City,
    Street,
    Building,
    #[strum(serialize = "Postal code")]
    PostalCode,
}

/// A standard postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Address {
    pub fn get(&self, field: AddressField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Set a field; blank input clears it
    pub fn set(&mut self, field: AddressField, value: &str) {
        *self.slot_mut(field) = non_blank(value);
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn slot(&self, field: AddressField) -> &Option<String> {
        match field {
            AddressField::Country => &self.country,
            AddressField::Region => &self.region,
            AddressField::City => &self.city,
            AddressField::Street => &self.street,
            AddressField::Building => &self.building,
            AddressField::PostalCode => &self.postal_code,
        }
    }

    fn slot_mut(&mut self, field: AddressField) -> &mut Option<String> {
        match field {
            AddressField::Country => &mut self.country,
            AddressField::Region => &mut self.region,
            AddressField::City => &mut self.city,
            AddressField::Street => &mut self.street,
            AddressField::Building => &mut self.building,
            AddressField::PostalCode => &mut self.postal_code,
        }
    }
}

/// One field of a [`SwiftAddress`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum SwiftField {
    #[strum(serialize = "Client name")]
    ClientName,
    #[strum(serialize = "Address line")]
    AddressLine,
    City,
}

/// Address used to identify the client in international settlements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwiftAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl SwiftAddress {
    pub fn get(&self, field: SwiftField) -> Option<&str> {
        match field {
            SwiftField::ClientName => self.client_name.as_deref(),
            SwiftField::AddressLine => self.address_line.as_deref(),
            SwiftField::City => self.city.as_deref(),
        }
    }

    /// Set a field; blank input clears it
    pub fn set(&mut self, field: SwiftField, value: &str) {
        let slot = match field {
            SwiftField::ClientName => &mut self.client_name,
            SwiftField::AddressLine => &mut self.address_line,
            SwiftField::City => &mut self.city,
        };
        *slot = non_blank(value);
    }
}

/// The accumulated onboarding record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeRecord {
    // Identity
    #[serde(rename = "mdmlegalstatus", default, skip_serializing_if = "Option::is_none")]
    pub mdm_legal_status: Option<LegalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_resident: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_cur_resident: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_branch: Option<bool>,
    #[serde(rename = "isClientVED", default, skip_serializing_if = "Option::is_none")]
    pub is_client_ved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_number: Option<String>,

    // Names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name_en: Option<String>,

    // Registration metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_registry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kpp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_kpp: Option<String>,

    // Classifier codes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub okpo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub okato: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub okogu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub okfs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub okopf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oktmo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub okved: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_okved: Option<StringList>,

    // Lawyers and notaries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_license_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_license_issue_date: Option<NaiveDate>,

    // Contacts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<StringList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<StringList>,

    // Addresses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swift_address: Option<SwiftAddress>,
}

impl CompositeRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(&self, kind: AddressKind) -> Option<&Address> {
        match kind {
            AddressKind::Main => self.main_address.as_ref(),
            AddressKind::Fact => self.fact_address.as_ref(),
            AddressKind::Post => self.post_address.as_ref(),
        }
    }

    pub fn address_mut(&mut self, kind: AddressKind) -> &mut Option<Address> {
        match kind {
            AddressKind::Main => &mut self.main_address,
            AddressKind::Fact => &mut self.fact_address,
            AddressKind::Post => &mut self.post_address,
        }
    }

    /// Serialize the record as the submission payload
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// `None` for blank input, the trimmed text otherwise
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

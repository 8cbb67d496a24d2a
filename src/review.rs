//! Read-only summary of the record shown on the review step

use chrono::NaiveDate;
use strum::IntoEnumIterator;

use crate::record::{AddressField, AddressKind, CompositeRecord, StringList, SwiftField};

/// Shown for anything not filled in
pub const PLACEHOLDER: &str = "—";

/// Date layout on the review screen
const DATE_FORMAT: &str = "%d.%m.%Y";

/// One label/value line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub label: String,
    pub value: String,
}

/// A titled group of rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSection {
    pub title: &'static str,
    pub rows: Vec<ReviewRow>,
}

impl ReviewSection {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    fn row(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.rows.push(ReviewRow {
            label: label.into(),
            value: value.into(),
        });
    }

    fn text(&mut self, label: &str, value: Option<&str>) {
        self.row(label, value.unwrap_or(PLACEHOLDER));
    }
}

fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "Yes",
        Some(false) => "No",
        None => PLACEHOLDER,
    }
}

fn date(value: Option<NaiveDate>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |d| d.format(DATE_FORMAT).to_string())
}

fn list(value: Option<&StringList>) -> String {
    let items: Vec<&str> = value
        .into_iter()
        .flat_map(|l| l.iter())
        .filter(|item| !item.trim().is_empty())
        .collect();
    if items.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        items.join(", ")
    }
}

/// Build the review screen contents for a record
pub fn review_sections(record: &CompositeRecord) -> Vec<ReviewSection> {
    let mut identity = ReviewSection::new("Client");
    identity.row(
        "Client type",
        record
            .mdm_legal_status
            .map_or_else(|| PLACEHOLDER.to_string(), |s| s.to_string()),
    );
    identity.text("Tax id", record.tin.as_deref());
    identity.text("Registration number", record.registry_number.as_deref());
    identity.text("Registration country", record.registry_country.as_deref());
    identity.row(
        "Hierarchical status",
        match record.is_branch {
            Some(true) => "Branch",
            Some(false) => "Head office",
            None => PLACEHOLDER,
        },
    );
    identity.row("Foreign trade", yes_no(record.is_client_ved));
    identity.row("Tax resident", yes_no(record.is_resident));
    identity.row("Currency resident", yes_no(record.is_cur_resident));

    let mut company = ReviewSection::new("Company");
    company.text("Short name", record.name.as_deref());
    company.text("Full name", record.full_name.as_deref());
    company.text("Short name (EN)", record.name_en.as_deref());
    company.text("Full name (EN)", record.full_name_en.as_deref());
    company.row("Registration date", date(record.registry_date));
    company.row("Tax registration date", date(record.tax_registry_date));
    company.text("KIO", record.kio.as_deref());
    company.text("KPP", record.kpp.as_deref());
    company.text("Largest taxpayer KPP", record.large_kpp.as_deref());
    if record.mdm_legal_status.is_some_and(|s| s.is_licensed_professional()) {
        company.text("License number", record.professional_license_number.as_deref());
        company.row("License issue date", date(record.professional_license_issue_date));
    }

    let mut codes = ReviewSection::new("Classifier codes");
    codes.text("OKPO", record.okpo.as_deref());
    codes.text("OKATO", record.okato.as_deref());
    codes.text("OKOGU", record.okogu.as_deref());
    codes.text("OKFS", record.okfs.as_deref());
    codes.text("OKOPF", record.okopf.as_deref());
    codes.text("OKTMO", record.oktmo.as_deref());
    codes.text("Main OKVED", record.okved.as_deref());
    codes.row("Additional OKVED", list(record.additional_okved.as_ref()));

    let mut contacts = ReviewSection::new("Contacts");
    contacts.row("Phones", list(record.phone.as_ref()));
    contacts.row("Emails", list(record.email.as_ref()));
    for kind in AddressKind::iter() {
        contacts.row(kind.to_string(), address_line(record, kind));
    }
    let swift = record.swift_address.clone().unwrap_or_default();
    let swift_parts: Vec<&str> = SwiftField::iter().filter_map(|f| swift.get(f)).collect();
    contacts.row(
        "SWIFT address",
        if swift_parts.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            swift_parts.join(", ")
        },
    );

    vec![identity, company, codes, contacts]
}

fn address_line(record: &CompositeRecord, kind: AddressKind) -> String {
    let Some(address) = record.address(kind) else {
        return PLACEHOLDER.to_string();
    };
    let parts: Vec<&str> = AddressField::iter().filter_map(|f| address.get(f)).collect();
    if parts.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        parts.join(", ")
    }
}

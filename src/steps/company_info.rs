//! Company-info step: names, registration metadata and classifier codes.
//!
//! Nothing here blocks advancing. Text fields are kept verbatim while editing
//! and written back as `None` when blank.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::warn;

use super::StepContract;
use crate::record::{CompositeRecord, StringList, non_blank};
use crate::settings::WizardSettings;
use crate::validators::FieldName;
use crate::wizard::WizardStep;

/// Free-text fields of the company-info step, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum CompanyField {
    #[strum(serialize = "Short name")]
    Name,
    #[strum(serialize = "Full name")]
    FullName,
    #[strum(serialize = "Short name (EN)")]
    NameEn,
    #[strum(serialize = "Full name (EN)")]
    FullNameEn,
    #[strum(serialize = "Registration number")]
    RegistryNumber,
    #[strum(serialize = "KIO")]
    Kio,
    #[strum(serialize = "KPP")]
    Kpp,
    #[strum(serialize = "Largest taxpayer KPP")]
    LargeKpp,
    #[strum(serialize = "OKPO")]
    Okpo,
    #[strum(serialize = "OKATO")]
    Okato,
    #[strum(serialize = "OKOGU")]
    Okogu,
    #[strum(serialize = "OKFS")]
    Okfs,
    #[strum(serialize = "OKOPF")]
    Okopf,
    #[strum(serialize = "OKTMO")]
    Oktmo,
    #[strum(serialize = "Main OKVED")]
    Okved,
    #[strum(serialize = "License number")]
    LicenseNumber,
}

impl CompanyField {
    /// Only lawyers and notaries carry a professional license
    pub fn is_license_field(self) -> bool {
        matches!(self, Self::LicenseNumber)
    }

    fn read(self, record: &CompositeRecord) -> Option<&str> {
        self.slot(record).as_deref()
    }

    fn write(self, record: &mut CompositeRecord, value: &str) {
        *self.slot_mut(record) = non_blank(value);
    }

    fn slot(self, record: &CompositeRecord) -> &Option<String> {
        match self {
            Self::Name => &record.name,
            Self::FullName => &record.full_name,
            Self::NameEn => &record.name_en,
            Self::FullNameEn => &record.full_name_en,
            Self::RegistryNumber => &record.registry_number,
            Self::Kio => &record.kio,
            Self::Kpp => &record.kpp,
            Self::LargeKpp => &record.large_kpp,
            Self::Okpo => &record.okpo,
            Self::Okato => &record.okato,
            Self::Okogu => &record.okogu,
            Self::Okfs => &record.okfs,
            Self::Okopf => &record.okopf,
            Self::Oktmo => &record.oktmo,
            Self::Okved => &record.okved,
            Self::LicenseNumber => &record.professional_license_number,
        }
    }

    fn slot_mut(self, record: &mut CompositeRecord) -> &mut Option<String> {
        match self {
            Self::Name => &mut record.name,
            Self::FullName => &mut record.full_name,
            Self::NameEn => &mut record.name_en,
            Self::FullNameEn => &mut record.full_name_en,
            Self::RegistryNumber => &mut record.registry_number,
            Self::Kio => &mut record.kio,
            Self::Kpp => &mut record.kpp,
            Self::LargeKpp => &mut record.large_kpp,
            Self::Okpo => &mut record.okpo,
            Self::Okato => &mut record.okato,
            Self::Okogu => &mut record.okogu,
            Self::Okfs => &mut record.okfs,
            Self::Okopf => &mut record.okopf,
            Self::Oktmo => &mut record.oktmo,
            Self::Okved => &mut record.okved,
            Self::LicenseNumber => &mut record.professional_license_number,
        }
    }
}

/// Date fields of the company-info step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum CompanyDate {
    #[strum(serialize = "Registration date")]
    RegistryDate,
    #[strum(serialize = "Tax registration date")]
    TaxRegistryDate,
    #[strum(serialize = "License issue date")]
    LicenseIssueDate,
}

impl CompanyDate {
    /// Name used in date parse errors
    pub fn field_name(self) -> FieldName {
        match self {
            Self::RegistryDate => FieldName::RegistrationDate,
            Self::TaxRegistryDate => FieldName::TaxRegistrationDate,
            Self::LicenseIssueDate => FieldName::LicenseIssueDate,
        }
    }
}

/// A change to the company-info draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CompanyInfoEdit {
    Text { field: CompanyField, value: String },
    Date { field: CompanyDate, value: Option<NaiveDate> },
    /// Append an additional OKVED code
    AddAdditionalCode {
        #[serde(default)]
        value: String,
    },
    SetAdditionalCode { index: usize, value: String },
    RemoveAdditionalCode { index: usize },
}

/// Draft of the company-info step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyInfoDraft {
    texts: BTreeMap<CompanyField, String>,
    registry_date: Option<NaiveDate>,
    tax_registry_date: Option<NaiveDate>,
    license_issue_date: Option<NaiveDate>,
    additional_okved: StringList,
}

impl CompanyInfoDraft {
    /// Current text of a field (empty when unset)
    pub fn text(&self, field: CompanyField) -> &str {
        self.texts.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn date(&self, field: CompanyDate) -> Option<NaiveDate> {
        match field {
            CompanyDate::RegistryDate => self.registry_date,
            CompanyDate::TaxRegistryDate => self.tax_registry_date,
            CompanyDate::LicenseIssueDate => self.license_issue_date,
        }
    }

    pub fn additional_codes(&self) -> &StringList {
        &self.additional_okved
    }

    /// Apply one change; list edits with a stale index are dropped
    pub fn apply(&mut self, edit: CompanyInfoEdit) {
        match edit {
            CompanyInfoEdit::Text { field, value } => {
                self.texts.insert(field, value);
            }
            CompanyInfoEdit::Date { field, value } => {
                let slot = match field {
                    CompanyDate::RegistryDate => &mut self.registry_date,
                    CompanyDate::TaxRegistryDate => &mut self.tax_registry_date,
                    CompanyDate::LicenseIssueDate => &mut self.license_issue_date,
                };
                *slot = value;
            }
            CompanyInfoEdit::AddAdditionalCode { value } => {
                self.additional_okved.push(value);
            }
            CompanyInfoEdit::SetAdditionalCode { index, value } => {
                if !self.additional_okved.set(index, value) {
                    warn!(index, len = self.additional_okved.len(), "Ignoring edit of missing OKVED code");
                }
            }
            CompanyInfoEdit::RemoveAdditionalCode { index } => {
                if self.additional_okved.remove(index).is_none() {
                    warn!(index, len = self.additional_okved.len(), "Ignoring removal of missing OKVED code");
                }
            }
        }
    }
}

impl StepContract for CompanyInfoDraft {
    const STEP: WizardStep = WizardStep::CompanyInfo;

    fn from_record(record: &CompositeRecord, _settings: &WizardSettings) -> Self {
        let texts = CompanyField::iter()
            .map(|field| (field, field.read(record).unwrap_or_default().to_string()))
            .collect();

        Self {
            texts,
            registry_date: record.registry_date,
            tax_registry_date: record.tax_registry_date,
            license_issue_date: record.professional_license_issue_date,
            additional_okved: record.additional_okved.clone().unwrap_or_default(),
        }
    }

    fn merge_into(&self, record: &mut CompositeRecord) {
        for field in CompanyField::iter() {
            field.write(record, self.text(field));
        }
        record.registry_date = self.registry_date;
        record.tax_registry_date = self.tax_registry_date;
        record.professional_license_issue_date = self.license_issue_date;
        record.additional_okved = Some(self.additional_okved.clone());
    }
}

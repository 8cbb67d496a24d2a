//! Identity step: client classification, tax id and residency.
//!
//! This is the only step with blocking validation. The residency flags are
//! re-derived whenever the tax id or the registration country actually
//! changes; the user may flip them afterwards, but the next change to either
//! input overwrites the manual value again.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::StepContract;
use crate::derivation::{ResidencyFlags, derive_residency};
use crate::record::{CompositeRecord, non_blank};
use crate::settings::WizardSettings;
use crate::types::{HierarchicalStatus, LegalStatus};
use crate::validators::{
    FieldName, ValidationError, digits_only, require_selection, validate_registration_number,
    validate_tax_id,
};
use crate::wizard::WizardStep;

/// A change to one identity field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum IdentityEdit {
    /// Non-digits are dropped as they are typed
    TaxId { value: String },
    /// Non-digits are dropped as they are typed
    RegistrationNumber { value: String },
    LegalStatus { value: Option<LegalStatus> },
    RegistrationCountry { value: Option<String> },
    HierarchicalStatus { value: Option<HierarchicalStatus> },
    /// Foreign-trade (VED) activity
    ForeignTrade { value: bool },
    Resident { value: bool },
    CurrencyResident { value: bool },
}

/// Draft of the identity step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityDraft {
    tax_id: String,
    registration_number: String,
    legal_status: Option<LegalStatus>,
    registration_country: Option<String>,
    hierarchical_status: Option<HierarchicalStatus>,
    foreign_trade: bool,
    residency: ResidencyFlags,
    home_country: String,
}

impl IdentityDraft {
    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    pub fn registration_number(&self) -> &str {
        &self.registration_number
    }

    pub fn legal_status(&self) -> Option<LegalStatus> {
        self.legal_status
    }

    pub fn registration_country(&self) -> Option<&str> {
        self.registration_country.as_deref()
    }

    pub fn hierarchical_status(&self) -> Option<HierarchicalStatus> {
        self.hierarchical_status
    }

    pub fn is_client_ved(&self) -> bool {
        self.foreign_trade
    }

    pub fn residency(&self) -> ResidencyFlags {
        self.residency
    }

    pub fn home_country(&self) -> &str {
        &self.home_country
    }

    /// Whether the registration number currently has to be filled in
    pub fn registration_number_required(&self) -> bool {
        self.residency.is_resident
    }

    /// Apply one field change
    pub fn apply(&mut self, edit: IdentityEdit) {
        match edit {
            IdentityEdit::TaxId { value } => {
                let digits = digits_only(&value);
                if digits != self.tax_id {
                    self.tax_id = digits;
                    self.rederive_residency();
                }
            }
            IdentityEdit::RegistrationNumber { value } => {
                self.registration_number = digits_only(&value);
            }
            IdentityEdit::LegalStatus { value } => self.legal_status = value,
            IdentityEdit::RegistrationCountry { value } => {
                let country = value.as_deref().and_then(non_blank);
                if country != self.registration_country {
                    self.registration_country = country;
                    self.rederive_residency();
                }
            }
            IdentityEdit::HierarchicalStatus { value } => self.hierarchical_status = value,
            IdentityEdit::ForeignTrade { value } => self.foreign_trade = value,
            IdentityEdit::Resident { value } => self.residency.is_resident = value,
            IdentityEdit::CurrencyResident { value } => self.residency.is_cur_resident = value,
        }
    }

    fn rederive_residency(&mut self) {
        self.residency = derive_residency(
            &self.tax_id,
            self.registration_country.as_deref(),
            &self.home_country,
        );
        debug!(
            is_resident = self.residency.is_resident,
            is_cur_resident = self.residency.is_cur_resident,
            "Residency flags derived"
        );
    }
}

impl StepContract for IdentityDraft {
    const STEP: WizardStep = WizardStep::Identity;

    fn from_record(record: &CompositeRecord, settings: &WizardSettings) -> Self {
        Self {
            tax_id: record.tin.clone().unwrap_or_default(),
            registration_number: record.registry_number.clone().unwrap_or_default(),
            legal_status: record.mdm_legal_status,
            registration_country: record
                .registry_country
                .clone()
                .or_else(|| Some(settings.home_country.clone())),
            hierarchical_status: Some(HierarchicalStatus::from(record.is_branch.unwrap_or(false))),
            foreign_trade: record.is_client_ved.unwrap_or(false),
            residency: ResidencyFlags {
                is_resident: record.is_resident.unwrap_or(true),
                is_cur_resident: record.is_cur_resident.unwrap_or(true),
            },
            home_country: settings.home_country.clone(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_tax_id(&self.tax_id)?;
        require_selection(FieldName::LegalStatus, self.legal_status)?;
        require_selection(FieldName::RegistrationCountry, self.registration_country.as_deref())?;
        require_selection(FieldName::HierarchicalStatus, self.hierarchical_status)?;
        validate_registration_number(&self.registration_number, self.residency.is_resident)?;
        Ok(())
    }

    fn merge_into(&self, record: &mut CompositeRecord) {
        record.tin = Some(digits_only(&self.tax_id));
        record.registry_number = non_blank(&self.registration_number);
        record.mdm_legal_status = self.legal_status;
        record.registry_country = self.registration_country.clone();
        record.is_branch = Some(self.hierarchical_status.is_some_and(|s| s.is_branch()));
        record.is_client_ved = Some(self.foreign_trade);
        record.is_resident = Some(self.residency.is_resident);
        record.is_cur_resident = Some(self.residency.is_cur_resident);
    }
}

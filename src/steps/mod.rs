//! Step contracts.
//!
//! Each data-entry step of the wizard has a draft type implementing
//! [`StepContract`]. A draft is a step-local copy of the fields the step edits:
//! it is seeded from the record, changed through typed edits while the step is
//! active, validated and finally merged back by the controller.
//!
//! # Design Goals
//!
//! 1. **Typed Edits**: every user change is a variant of the step's edit enum,
//!    so the terminal UI and scripted replays drive drafts the same way.
//! 2. **Single Source of Truth**: the draft's `merge_into` IS the list of record
//!    fields a step may write.
//! 3. **First Fail Wins**: `validate` reports only the first broken rule.

pub mod company_info;
pub mod contacts;
pub mod identity;

pub use company_info::{CompanyDate, CompanyField, CompanyInfoDraft, CompanyInfoEdit};
pub use contacts::{ContactsDraft, ContactsEdit};
pub use identity::{IdentityDraft, IdentityEdit};

use serde::{Deserialize, Serialize};

use crate::record::CompositeRecord;
use crate::settings::WizardSettings;
use crate::validators::ValidationError;
use crate::wizard::{WizardError, WizardStep};

/// Read/validate/write rules of one wizard step.
///
/// # Contract
///
/// - `from_record()`: the defaults shown when the step opens. Must not derive
///   anything, so that reopening a step and submitting it unchanged writes
///   back exactly what the record already holds.
/// - `validate()`: the gate for leaving the step forward.
/// - `merge_into()`: writes the step's subset of the record and nothing else.
pub trait StepContract: Sized {
    /// The step this contract governs
    const STEP: WizardStep;

    /// Seed a draft from the record
    fn from_record(record: &CompositeRecord, settings: &WizardSettings) -> Self;

    /// Check the draft, reporting the first failing rule.
    ///
    /// Steps without blocking rules keep the default.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Write the step's fields into the record
    fn merge_into(&self, record: &mut CompositeRecord);
}

/// The draft of whichever step is active
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepDraft {
    Identity(IdentityDraft),
    CompanyInfo(CompanyInfoDraft),
    Contacts(ContactsDraft),
    /// The review step edits nothing
    Review,
}

impl StepDraft {
    /// The step this draft belongs to
    pub fn step(&self) -> WizardStep {
        match self {
            Self::Identity(_) => IdentityDraft::STEP,
            Self::CompanyInfo(_) => CompanyInfoDraft::STEP,
            Self::Contacts(_) => ContactsDraft::STEP,
            Self::Review => WizardStep::Review,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Identity(draft) => draft.validate(),
            Self::CompanyInfo(draft) => draft.validate(),
            Self::Contacts(draft) => draft.validate(),
            Self::Review => Ok(()),
        }
    }

    pub fn merge_into(&self, record: &mut CompositeRecord) {
        match self {
            Self::Identity(draft) => draft.merge_into(record),
            Self::CompanyInfo(draft) => draft.merge_into(record),
            Self::Contacts(draft) => draft.merge_into(record),
            Self::Review => {}
        }
    }

    /// Apply an edit meant for this draft's step.
    ///
    /// # Errors
    ///
    /// - `StepMismatch` if the edit targets another step
    pub fn apply(&mut self, edit: StepEdit) -> Result<(), WizardError> {
        match (self, edit) {
            (Self::Identity(draft), StepEdit::Identity(edit)) => draft.apply(edit),
            (Self::CompanyInfo(draft), StepEdit::CompanyInfo(edit)) => draft.apply(edit),
            (Self::Contacts(draft), StepEdit::Contacts(edit)) => draft.apply(edit),
            (draft, edit) => {
                return Err(WizardError::StepMismatch {
                    expected: draft.step(),
                    got: edit.step(),
                });
            }
        }
        Ok(())
    }
}

/// A single user change addressed to one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", content = "change", rename_all = "snake_case")]
pub enum StepEdit {
    Identity(IdentityEdit),
    CompanyInfo(CompanyInfoEdit),
    Contacts(ContactsEdit),
}

impl StepEdit {
    /// The step this edit targets
    pub fn step(&self) -> WizardStep {
        match self {
            Self::Identity(_) => WizardStep::Identity,
            Self::CompanyInfo(_) => WizardStep::CompanyInfo,
            Self::Contacts(_) => WizardStep::Contacts,
        }
    }
}

impl From<IdentityEdit> for StepEdit {
    fn from(edit: IdentityEdit) -> Self {
        Self::Identity(edit)
    }
}

impl From<CompanyInfoEdit> for StepEdit {
    fn from(edit: CompanyInfoEdit) -> Self {
        Self::CompanyInfo(edit)
    }
}

impl From<ContactsEdit> for StepEdit {
    fn from(edit: ContactsEdit) -> Self {
        Self::Contacts(edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_steps() {
        assert_eq!(StepDraft::Review.step(), WizardStep::Review);
        assert_eq!(
            StepDraft::Contacts(ContactsDraft::default()).step(),
            WizardStep::Contacts
        );
    }

    #[test]
    fn test_edit_for_other_step_is_rejected() {
        let mut draft = StepDraft::Contacts(ContactsDraft::default());
        let err = draft
            .apply(IdentityEdit::ForeignTrade { value: true }.into())
            .unwrap_err();
        assert_eq!(
            err,
            WizardError::StepMismatch {
                expected: WizardStep::Contacts,
                got: WizardStep::Identity,
            }
        );
        assert_eq!(draft, StepDraft::Contacts(ContactsDraft::default()));
    }

    #[test]
    fn test_review_accepts_no_edits() {
        let mut draft = StepDraft::Review;
        assert!(draft.apply(ContactsEdit::AddEmail { value: String::new() }.into()).is_err());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_step_edit_json_shape() {
        let json = r#"{"step":"identity","change":{"field":"tax_id","value":"7707083893"}}"#;
        let edit: StepEdit = serde_json::from_str(json).unwrap();
        assert_eq!(
            edit,
            StepEdit::Identity(IdentityEdit::TaxId {
                value: "7707083893".into()
            })
        );
    }
}

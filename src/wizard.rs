//! Wizard controller
//!
//! [`OnboardingWizard`] owns the current step and the accumulated
//! [`CompositeRecord`]. It is the only thing allowed to change the record, and
//! it only does so when a step draft passes validation.
//!
//! # Design Principles
//!
//! - **Single Source of Truth**: one record per wizard, owned by the controller
//! - **All or Nothing**: a failed `advance` leaves the record untouched
//! - **Non-destructive Back**: `retreat` moves the index and nothing else
//! - **No Global State**: the wizard is an explicitly passed context object
//!
//! # Step Flow
//!
//! ```text
//! Identity
//!     ↓  (validated)
//! CompanyInfo
//!     ↓
//! Contacts
//!     ↓
//! Review ──submit──▶ CompositeRecord handed off
//! ```

use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::record::CompositeRecord;
use crate::settings::WizardSettings;
use crate::steps::{CompanyInfoDraft, ContactsDraft, IdentityDraft, StepContract, StepDraft};
use crate::validators::ValidationError;

/// Wizard steps in sequential order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum WizardStep {
    /// Client classification, tax id, registration number, residency
    Identity = 0,
    /// Names, registration metadata, classifier codes
    CompanyInfo = 1,
    /// Phones, emails, addresses
    Contacts = 2,
    /// Read-only summary before submission (terminal)
    Review = 3,
}

impl WizardStep {
    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 4;

    /// Zero-based position of this step
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Get the step number (1-indexed for display).
    #[inline]
    pub const fn step_number(self) -> usize {
        self.index() + 1
    }

    /// Returns true for the review step
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Review)
    }

    /// Get the next step, or `None` at Review
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Identity => Some(Self::CompanyInfo),
            Self::CompanyInfo => Some(Self::Contacts),
            Self::Contacts => Some(Self::Review),
            Self::Review => None,
        }
    }

    /// Get the previous step, or `None` at Identity
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Identity => None,
            Self::CompanyInfo => Some(Self::Identity),
            Self::Contacts => Some(Self::CompanyInfo),
            Self::Review => Some(Self::Contacts),
        }
    }

    /// Get the display title for this step.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Identity => "Client type",
            Self::CompanyInfo => "Company details",
            Self::Contacts => "Contacts and addresses",
            Self::Review => "Review",
        }
    }

    /// Returns all steps in order
    pub const fn all_steps() -> &'static [Self] {
        &[Self::Identity, Self::CompanyInfo, Self::Contacts, Self::Review]
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Errors returned by the wizard controller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// The active step's input failed its first rule
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A draft for one step was submitted while another step is active
    #[error("Cannot submit {got} data while on {expected}")]
    StepMismatch {
        expected: WizardStep,
        got: WizardStep,
    },

    /// Back was requested on the first step
    #[error("Already at the first step")]
    AtFirstStep,

    /// Forward was requested on the review step (use submit)
    #[error("The review step can only be submitted")]
    AtReview,

    /// Submission was requested before reaching review
    #[error("Cannot submit from {current} (review the record first)")]
    NotAtReview { current: WizardStep },
}

impl WizardError {
    /// The validation failure, if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Controller for one onboarding session.
///
/// # Example
///
/// ```
/// use onboardtui::settings::WizardSettings;
/// use onboardtui::steps::{IdentityEdit, StepDraft};
/// use onboardtui::types::LegalStatus;
/// use onboardtui::wizard::{OnboardingWizard, WizardStep};
///
/// let mut wizard = OnboardingWizard::new(WizardSettings::default());
/// let StepDraft::Identity(mut draft) = wizard.open_step() else { unreachable!() };
/// draft.apply(IdentityEdit::TaxId { value: "9909123456".into() });
/// draft.apply(IdentityEdit::LegalStatus { value: Some(LegalStatus::LegalEntity) });
///
/// // Foreign tax id: no registration number needed
/// wizard.advance(&StepDraft::Identity(draft)).unwrap();
/// assert_eq!(wizard.current_step(), WizardStep::CompanyInfo);
/// assert_eq!(wizard.record().is_resident, Some(false));
/// ```
#[derive(Debug, Clone)]
pub struct OnboardingWizard {
    /// Currently active step
    current: WizardStep,

    /// Accumulated record
    record: CompositeRecord,

    /// Home country and country options
    settings: WizardSettings,

    /// Steps entered so far, in order (starts with Identity)
    step_history: Vec<WizardStep>,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self::new(WizardSettings::default())
    }
}

impl OnboardingWizard {
    /// Start a wizard with an empty record on the first step
    pub fn new(settings: WizardSettings) -> Self {
        Self::with_record(settings, CompositeRecord::new())
    }

    /// Start a wizard on the first step with a pre-filled record
    pub fn with_record(settings: WizardSettings, record: CompositeRecord) -> Self {
        Self {
            current: WizardStep::Identity,
            record,
            settings,
            step_history: vec![WizardStep::Identity],
        }
    }

    /// Returns the active step
    #[inline]
    pub fn current_step(&self) -> WizardStep {
        self.current
    }

    /// Read-only view of the accumulated record
    #[inline]
    pub fn record(&self) -> &CompositeRecord {
        &self.record
    }

    /// Owned copy of the accumulated record
    pub fn snapshot(&self) -> CompositeRecord {
        self.record.clone()
    }

    #[inline]
    pub fn settings(&self) -> &WizardSettings {
        &self.settings
    }

    /// Steps entered so far, in order
    pub fn step_history(&self) -> &[WizardStep] {
        &self.step_history
    }

    /// Create a draft for the active step seeded from the record
    pub fn open_step(&self) -> StepDraft {
        match self.current {
            WizardStep::Identity => {
                StepDraft::Identity(IdentityDraft::from_record(&self.record, &self.settings))
            }
            WizardStep::CompanyInfo => {
                StepDraft::CompanyInfo(CompanyInfoDraft::from_record(&self.record, &self.settings))
            }
            WizardStep::Contacts => {
                StepDraft::Contacts(ContactsDraft::from_record(&self.record, &self.settings))
            }
            WizardStep::Review => StepDraft::Review,
        }
    }

    /// Validate the active step's draft, merge it and move forward.
    ///
    /// # Errors
    ///
    /// - `Validation` with the first failing rule; the record is unchanged
    /// - `StepMismatch` if the draft belongs to another step
    /// - `AtReview` on the review step (use [`submit`](Self::submit))
    pub fn advance(&mut self, draft: &StepDraft) -> Result<WizardStep, WizardError> {
        if draft.step() != self.current {
            return Err(WizardError::StepMismatch {
                expected: self.current,
                got: draft.step(),
            });
        }

        let next = self.current.next().ok_or(WizardError::AtReview)?;

        if let Err(err) = draft.validate() {
            warn!(step = %self.current, error = %err, "Step rejected");
            return Err(err.into());
        }

        draft.merge_into(&mut self.record);
        info!(from = %self.current, to = %next, "Advanced wizard step");

        self.current = next;
        self.step_history.push(next);
        Ok(next)
    }

    /// Move back one step without touching the record.
    ///
    /// # Errors
    ///
    /// - `AtFirstStep` on Identity
    pub fn retreat(&mut self) -> Result<WizardStep, WizardError> {
        let previous = self.current.previous().ok_or(WizardError::AtFirstStep)?;
        debug!(from = %self.current, to = %previous, "Stepped back");

        self.current = previous;
        self.step_history.push(previous);
        Ok(previous)
    }

    /// Hand the completed record off, ending the wizard.
    ///
    /// # Errors
    ///
    /// - `NotAtReview` before the review step is reached; the untouched
    ///   wizard comes back alongside the error
    pub fn submit(self) -> Result<CompositeRecord, (Self, WizardError)> {
        if !self.current.is_terminal() {
            let current = self.current;
            return Err((self, WizardError::NotAtReview { current }));
        }
        info!(steps_visited = self.step_history.len(), "Onboarding record submitted");
        Ok(self.record)
    }
}

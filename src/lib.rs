//! Onboarding wizard library
//!
//! A four-step wizard that collects a legal-entity client record: identity
//! and residency, company details, contacts, then a read-only review before
//! the record is handed off.

pub mod app;
pub mod cli;
pub mod components;
pub mod derivation;
pub mod error;
pub mod record;
pub mod review;
pub mod session;
pub mod settings;
pub mod steps;
pub mod theme;
pub mod types;
pub mod ui;
pub mod validators;
pub mod wizard;

// Re-export main types for convenience
pub use derivation::{ResidencyFlags, derive_residency};
pub use error::OnboardError;
pub use record::{Address, AddressField, AddressKind, CompositeRecord, StringList, SwiftAddress, SwiftField};
pub use session::{OnboardingSession, ReplayScript, SessionEvent};
pub use settings::WizardSettings;
pub use steps::{StepContract, StepDraft, StepEdit};
pub use types::{HierarchicalStatus, LegalStatus};
pub use validators::{FieldName, ValidationError};
pub use wizard::{OnboardingWizard, WizardError, WizardStep};

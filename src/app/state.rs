//! Application state definitions
//!
//! Contains the form model of the terminal UI: the rows shown for the active
//! step, the field each row edits and the state of the text editor. All
//! changes go through the [`OnboardingSession`] as typed edits.

use strum::IntoEnumIterator;
use tracing::debug;

use crate::record::{AddressField, AddressKind, SwiftField};
use crate::session::OnboardingSession;
use crate::settings::WizardSettings;
use crate::steps::{
    CompanyDate, CompanyField, CompanyInfoEdit, ContactsEdit, IdentityEdit, StepDraft, StepEdit,
};
use crate::types::{LegalStatus, cycle_option};
use crate::validators::{ValidationError, parse_date};
use crate::wizard::WizardStep;

/// Date layout used while editing
const EDIT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Moving between the rows of a data-entry step
    Form,
    /// Typing into a text field
    Editing,
    /// Read-only summary before submission
    Review,
}

/// A single editable thing on a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef {
    TaxId,
    RegistrationNumber,
    LegalStatus,
    RegistrationCountry,
    HierarchicalStatus,
    ForeignTrade,
    Resident,
    CurrencyResident,
    Company(CompanyField),
    Date(CompanyDate),
    AdditionalCode(usize),
    AddAdditionalCode,
    Phone(usize),
    AddPhone,
    Email(usize),
    AddEmail,
    Address(AddressKind, AddressField),
    Swift(SwiftField),
}

/// How a row reacts to input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, edited in place
    Text,
    /// Yes/No
    Toggle,
    /// One of a fixed set of options
    Select,
    /// Appends a list item
    Add,
}

/// One line of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    pub field: FieldRef,
    pub label: String,
    pub value: String,
    pub kind: FieldKind,
    /// Marked with `*` in the form
    pub required: bool,
}

impl FormRow {
    fn new(field: FieldRef, label: impl Into<String>, value: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            field,
            label: label.into(),
            value: value.into(),
            kind,
            required: false,
        }
    }

    fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Whether the row is an item of an editable list
    pub fn is_list_item(&self) -> bool {
        matches!(
            self.field,
            FieldRef::AdditionalCode(_) | FieldRef::Phone(_) | FieldRef::Email(_)
        )
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn option_label<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "(not selected)".to_string(), |v| v.to_string())
}

/// Rows shown for the active draft.
///
/// License rows only appear for licensed professionals.
pub fn form_rows(draft: &StepDraft, legal_status: Option<LegalStatus>) -> Vec<FormRow> {
    let licensed = legal_status.is_some_and(|s| s.is_licensed_professional());
    let mut rows = Vec::new();

    match draft {
        StepDraft::Identity(d) => {
            let flags = d.residency();
            rows.push(FormRow::new(FieldRef::LegalStatus, "Client type", option_label(d.legal_status()), FieldKind::Select).required(true));
            rows.push(FormRow::new(FieldRef::TaxId, "Tax id", d.tax_id(), FieldKind::Text).required(true));
            rows.push(
                FormRow::new(FieldRef::RegistrationNumber, "Registration number", d.registration_number(), FieldKind::Text)
                    .required(d.registration_number_required()),
            );
            rows.push(
                FormRow::new(FieldRef::RegistrationCountry, "Registration country", option_label(d.registration_country()), FieldKind::Select)
                    .required(true),
            );
            rows.push(
                FormRow::new(FieldRef::HierarchicalStatus, "Hierarchical status", option_label(d.hierarchical_status()), FieldKind::Select)
                    .required(true),
            );
            rows.push(FormRow::new(FieldRef::ForeignTrade, "Foreign trade (VED)", yes_no(d.is_client_ved()), FieldKind::Toggle));
            rows.push(FormRow::new(FieldRef::Resident, "Tax resident", yes_no(flags.is_resident), FieldKind::Toggle));
            rows.push(FormRow::new(FieldRef::CurrencyResident, "Currency resident", yes_no(flags.is_cur_resident), FieldKind::Toggle));
        }
        StepDraft::CompanyInfo(d) => {
            for field in CompanyField::iter().filter(|f| licensed || !f.is_license_field()) {
                rows.push(FormRow::new(FieldRef::Company(field), field.to_string(), d.text(field), FieldKind::Text));
            }
            for field in CompanyDate::iter().filter(|f| licensed || *f != CompanyDate::LicenseIssueDate) {
                let value = d.date(field).map(|v| v.format(EDIT_DATE_FORMAT).to_string()).unwrap_or_default();
                rows.push(FormRow::new(FieldRef::Date(field), field.to_string(), value, FieldKind::Text));
            }
            for (index, code) in d.additional_codes().iter().enumerate() {
                rows.push(FormRow::new(FieldRef::AdditionalCode(index), format!("Additional OKVED #{}", index + 1), code, FieldKind::Text));
            }
            rows.push(FormRow::new(FieldRef::AddAdditionalCode, "+ Add OKVED code", "", FieldKind::Add));
        }
        StepDraft::Contacts(d) => {
            for (index, phone) in d.phones().iter().enumerate() {
                rows.push(FormRow::new(FieldRef::Phone(index), format!("Phone #{}", index + 1), phone, FieldKind::Text));
            }
            rows.push(FormRow::new(FieldRef::AddPhone, "+ Add phone", "", FieldKind::Add));
            for (index, email) in d.emails().iter().enumerate() {
                rows.push(FormRow::new(FieldRef::Email(index), format!("Email #{}", index + 1), email, FieldKind::Text));
            }
            rows.push(FormRow::new(FieldRef::AddEmail, "+ Add email", "", FieldKind::Add));
            for kind in AddressKind::iter() {
                let address = d.address(kind);
                for field in AddressField::iter() {
                    rows.push(FormRow::new(
                        FieldRef::Address(kind, field),
                        format!("{}: {}", kind, field),
                        address.get(field).unwrap_or_default(),
                        FieldKind::Text,
                    ));
                }
            }
            for field in SwiftField::iter() {
                rows.push(FormRow::new(
                    FieldRef::Swift(field),
                    format!("SWIFT: {}", field),
                    d.swift().get(field).unwrap_or_default(),
                    FieldKind::Text,
                ));
            }
        }
        StepDraft::Review => {}
    }

    rows
}

impl FieldRef {
    /// Edit writing typed text into this field.
    ///
    /// Dates are parsed here, so a malformed date is reported before any
    /// edit reaches the draft.
    pub fn text_edit(self, value: String) -> Result<Option<StepEdit>, ValidationError> {
        let edit: StepEdit = match self {
            Self::TaxId => IdentityEdit::TaxId { value }.into(),
            Self::RegistrationNumber => IdentityEdit::RegistrationNumber { value }.into(),
            Self::Company(field) => CompanyInfoEdit::Text { field, value }.into(),
            Self::Date(field) => CompanyInfoEdit::Date {
                field,
                value: parse_date(field.field_name(), &value)?,
            }
            .into(),
            Self::AdditionalCode(index) => CompanyInfoEdit::SetAdditionalCode { index, value }.into(),
            Self::Phone(index) => ContactsEdit::SetPhone { index, value }.into(),
            Self::Email(index) => ContactsEdit::SetEmail { index, value }.into(),
            Self::Address(kind, field) => ContactsEdit::Address { kind, field, value }.into(),
            Self::Swift(field) => ContactsEdit::Swift { field, value }.into(),
            _ => return Ok(None),
        };
        Ok(Some(edit))
    }

    /// Edit moving a toggle or select to its next (or previous) value
    pub fn cycle_edit(self, draft: &StepDraft, settings: &WizardSettings, forward: bool) -> Option<StepEdit> {
        let StepDraft::Identity(d) = draft else {
            return None;
        };
        let edit = match self {
            Self::LegalStatus => IdentityEdit::LegalStatus {
                value: cycle_option(d.legal_status(), forward),
            },
            Self::HierarchicalStatus => IdentityEdit::HierarchicalStatus {
                value: cycle_option(d.hierarchical_status(), forward),
            },
            Self::RegistrationCountry => IdentityEdit::RegistrationCountry {
                value: settings
                    .cycle_country(d.registration_country(), forward)
                    .map(str::to_string),
            },
            Self::ForeignTrade => IdentityEdit::ForeignTrade {
                value: !d.is_client_ved(),
            },
            Self::Resident => IdentityEdit::Resident {
                value: !d.residency().is_resident,
            },
            Self::CurrencyResident => IdentityEdit::CurrencyResident {
                value: !d.residency().is_cur_resident,
            },
            _ => return None,
        };
        Some(edit.into())
    }

    /// Edit appending an empty item to the row's list
    pub fn add_edit(self) -> Option<StepEdit> {
        let value = String::new();
        match self {
            Self::AddAdditionalCode => Some(CompanyInfoEdit::AddAdditionalCode { value }.into()),
            Self::AddPhone => Some(ContactsEdit::AddPhone { value }.into()),
            Self::AddEmail => Some(ContactsEdit::AddEmail { value }.into()),
            _ => None,
        }
    }

    /// Edit removing this list item
    pub fn remove_edit(self) -> Option<StepEdit> {
        match self {
            Self::AdditionalCode(index) => Some(CompanyInfoEdit::RemoveAdditionalCode { index }.into()),
            Self::Phone(index) => Some(ContactsEdit::RemovePhone { index }.into()),
            Self::Email(index) => Some(ContactsEdit::RemoveEmail { index }.into()),
            _ => None,
        }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Wizard session driven by the form
    pub session: OnboardingSession,
    /// Highlighted row
    pub selected: usize,
    /// Field being typed into, if any
    pub editing: Option<FieldRef>,
    /// Text editor contents
    pub input: String,
    /// Status message for user feedback
    pub status_message: Option<String>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Review screen scroll offset
    pub review_scroll: u16,
    /// Set once the user submits on the review step
    pub submit_requested: bool,
}

impl AppState {
    pub fn new(session: OnboardingSession) -> Self {
        Self {
            session,
            selected: 0,
            editing: None,
            input: String::new(),
            status_message: None,
            help_visible: false,
            review_scroll: 0,
            submit_requested: false,
        }
    }

    pub fn mode(&self) -> AppMode {
        if self.editing.is_some() {
            AppMode::Editing
        } else if self.session.current_step().is_terminal() {
            AppMode::Review
        } else {
            AppMode::Form
        }
    }

    /// Rows of the active step
    pub fn rows(&self) -> Vec<FormRow> {
        form_rows(self.session.draft(), self.legal_status())
    }

    /// Legal status as currently known: the open identity draft wins over the record
    fn legal_status(&self) -> Option<LegalStatus> {
        match self.session.draft() {
            StepDraft::Identity(d) => d.legal_status(),
            _ => self.session.record().mdm_legal_status,
        }
    }

    pub fn selected_row(&self) -> Option<FormRow> {
        self.rows().into_iter().nth(self.selected)
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        let len = self.rows().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Activate the highlighted row: edit text, flip a toggle, step a select
    /// or append a list item
    pub fn activate(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        match row.kind {
            FieldKind::Text => {
                self.input = row.value;
                self.editing = Some(row.field);
            }
            FieldKind::Toggle | FieldKind::Select => self.cycle(true),
            FieldKind::Add => {
                // The new item takes the add row's place, so the selection lands on it
                if let Some(edit) = row.field.add_edit() {
                    self.apply(edit);
                }
            }
        }
    }

    /// Step the highlighted toggle or select
    pub fn cycle(&mut self, forward: bool) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let edit = row
            .field
            .cycle_edit(self.session.draft(), self.session.wizard().settings(), forward);
        if let Some(edit) = edit {
            self.apply(edit);
        }
    }

    /// Remove the highlighted list item
    pub fn remove_selected(&mut self) {
        if let Some(edit) = self.selected_row().and_then(|row| row.field.remove_edit()) {
            self.apply(edit);
            self.clamp_selection();
        }
    }

    /// Write the editor contents into the field being edited
    pub fn commit_edit(&mut self) {
        let Some(field) = self.editing.take() else {
            return;
        };
        let value = std::mem::take(&mut self.input);
        match field.text_edit(value) {
            Ok(Some(edit)) => self.apply(edit),
            Ok(None) => {}
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.input.clear();
    }

    /// Validate the step and move on
    pub fn next_step(&mut self) {
        match self.session.next() {
            Ok(step) => self.entered(step),
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    /// Go back one step, dropping unsaved edits
    pub fn previous_step(&mut self) {
        match self.session.back() {
            Ok(step) => self.entered(step),
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    /// Ask for submission; only honoured on the review step
    pub fn request_submit(&mut self) -> bool {
        if self.session.current_step() == WizardStep::Review {
            self.submit_requested = true;
        } else {
            self.status_message = Some("Finish the remaining steps before submitting".to_string());
        }
        self.submit_requested
    }

    fn entered(&mut self, step: WizardStep) {
        debug!(step = %step, "Form switched step");
        self.selected = 0;
        self.review_scroll = 0;
        self.status_message = None;
    }

    fn apply(&mut self, edit: StepEdit) {
        if let Err(err) = self.session.apply(edit) {
            self.status_message = Some(err.to_string());
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

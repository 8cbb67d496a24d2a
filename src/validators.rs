//! Field validators
//!
//! Pure predicates over raw field values. Each validator returns `Ok(())` (or
//! the parsed value) when the input is acceptable and a [`ValidationError`]
//! naming the field and the violated rule otherwise. Validators never look at
//! other fields except where a rule explicitly depends on one (the
//! registration number depends on the tax-residency flag).

use chrono::NaiveDate;
use strum::Display;
use thiserror::Error;

/// Minimum number of digits in a tax id
pub const TAX_ID_MIN_DIGITS: usize = 10;

/// Maximum number of digits in a tax id
pub const TAX_ID_MAX_DIGITS: usize = 12;

/// Maximum number of digits in a state registration number
pub const REGISTRATION_NUMBER_MAX_DIGITS: usize = 15;

/// Date formats accepted by [`parse_date`], tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y"];

/// Fields that can fail validation, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FieldName {
    #[strum(serialize = "Tax id")]
    TaxId,
    #[strum(serialize = "Registration number")]
    RegistrationNumber,
    #[strum(serialize = "Client type")]
    LegalStatus,
    #[strum(serialize = "Registration country")]
    RegistrationCountry,
    #[strum(serialize = "Hierarchical status")]
    HierarchicalStatus,
    #[strum(serialize = "Registration date")]
    RegistrationDate,
    #[strum(serialize = "Tax registration date")]
    TaxRegistrationDate,
    #[strum(serialize = "License issue date")]
    LicenseIssueDate,
}

/// A single violated field rule.
///
/// The `Display` output is the inline message shown for the active step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty but must be filled in
    #[error("{field} is required")]
    Required { field: FieldName },

    /// Field is filled in but does not have the expected shape
    #[error("{field} must be {expected}")]
    Format {
        field: FieldName,
        expected: &'static str,
    },

    /// Field is empty but the client is a tax resident
    #[error("{field} is required for tax residents")]
    RequiredForResidents { field: FieldName },

    /// Field exceeds its length bound
    #[error("{field} must not exceed {max} digits")]
    TooLong { field: FieldName, max: usize },

    /// No option chosen in a select field
    #[error("{field}: select one of the options")]
    SelectionMissing { field: FieldName },
}

impl ValidationError {
    /// Create a required-field error
    pub fn required(field: FieldName) -> Self {
        Self::Required { field }
    }

    /// Create a format-mismatch error
    pub fn format(field: FieldName, expected: &'static str) -> Self {
        Self::Format { field, expected }
    }

    /// Create a selection-missing error
    pub fn selection_missing(field: FieldName) -> Self {
        Self::SelectionMissing { field }
    }

    /// The field this error is about
    pub fn field(&self) -> FieldName {
        match self {
            Self::Required { field }
            | Self::Format { field, .. }
            | Self::RequiredForResidents { field }
            | Self::TooLong { field, .. }
            | Self::SelectionMissing { field } => *field,
        }
    }
}

/// Strip everything except ASCII digits
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validate a tax id.
///
/// Required; after stripping non-digits it must hold 10 to 12 digits.
pub fn validate_tax_id(raw: &str) -> Result<(), ValidationError> {
    let digits = digits_only(raw);
    if digits.is_empty() {
        return Err(ValidationError::required(FieldName::TaxId));
    }
    if !(TAX_ID_MIN_DIGITS..=TAX_ID_MAX_DIGITS).contains(&digits.len()) {
        return Err(ValidationError::format(
            FieldName::TaxId,
            "10 to 12 digits",
        ));
    }
    Ok(())
}

/// Validate a state registration number.
///
/// Mandatory exactly when the client is a tax resident. A filled-in number
/// must not exceed [`REGISTRATION_NUMBER_MAX_DIGITS`] digits.
pub fn validate_registration_number(raw: &str, is_resident: bool) -> Result<(), ValidationError> {
    let digits = digits_only(raw);
    if digits.is_empty() {
        if is_resident {
            return Err(ValidationError::RequiredForResidents {
                field: FieldName::RegistrationNumber,
            });
        }
        return Ok(());
    }
    if digits.len() > REGISTRATION_NUMBER_MAX_DIGITS {
        return Err(ValidationError::TooLong {
            field: FieldName::RegistrationNumber,
            max: REGISTRATION_NUMBER_MAX_DIGITS,
        });
    }
    Ok(())
}

/// Require that a select field has a value, handing the value back
pub fn require_selection<T>(field: FieldName, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::selection_missing(field))
}

/// Parse a date typed by the user.
///
/// Blank input means "no date". Accepts ISO (`2024-03-01`) and dotted
/// day-first (`01.03.2024`) forms.
pub fn parse_date(field: FieldName, raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(Some)
        .ok_or(ValidationError::format(
            field,
            "a date in YYYY-MM-DD or DD.MM.YYYY form",
        ))
}

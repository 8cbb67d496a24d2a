//! Property-based tests for onboardtui
//!
//! These tests verify:
//! - Tax id and registration number rules
//! - Residency derivation
//! - Wizard navigation invariants

use proptest::prelude::*;

use onboardtui::derivation::{NON_RESIDENT_TAX_ID_PREFIX, ResidencyFlags, derive_residency};
use onboardtui::record::StringList;
use onboardtui::settings::{DEFAULT_HOME_COUNTRY, WizardSettings};
use onboardtui::steps::{IdentityDraft, IdentityEdit, StepContract};
use onboardtui::types::LegalStatus;
use onboardtui::validators::{
    REGISTRATION_NUMBER_MAX_DIGITS, ValidationError, digits_only, validate_registration_number,
    validate_tax_id,
};
use onboardtui::wizard::{OnboardingWizard, WizardStep};
use onboardtui::CompositeRecord;

// =============================================================================
// Validators
// =============================================================================

proptest! {
    /// Tax id: accepted iff it holds 10 to 12 digits
    #[test]
    fn tax_id_accepts_exactly_10_to_12_digits(digits in "[0-9]{0,16}") {
        let accepted = validate_tax_id(&digits).is_ok();
        prop_assert_eq!(accepted, (10..=12).contains(&digits.len()));
    }

    /// Tax id: separators between digits do not matter
    #[test]
    fn tax_id_ignores_separators(digits in "[0-9]{10,12}", sep in "[ -]{0,3}") {
        let spaced: String = digits
            .chars()
            .flat_map(|c| std::iter::once(c).chain(sep.chars()))
            .collect();
        prop_assert!(validate_tax_id(&spaced).is_ok());
    }

    /// Registration number: blank is fine only for non-residents
    #[test]
    fn registration_number_required_iff_resident(is_resident in any::<bool>()) {
        let result = validate_registration_number("", is_resident);
        prop_assert_eq!(result.is_err(), is_resident);
        if let Err(err) = result {
            let is_required_for_residents =
                matches!(err, ValidationError::RequiredForResidents { .. });
            prop_assert!(is_required_for_residents);
        }
    }

    /// Registration number: bounded length once filled in
    #[test]
    fn registration_number_length_bound(digits in "[0-9]{1,20}", is_resident in any::<bool>()) {
        let accepted = validate_registration_number(&digits, is_resident).is_ok();
        prop_assert_eq!(accepted, digits.len() <= REGISTRATION_NUMBER_MAX_DIGITS);
    }

    /// digits_only keeps only ASCII digits, in order
    #[test]
    fn digits_only_is_idempotent(raw in ".{0,30}") {
        let once = digits_only(&raw);
        prop_assert!(once.chars().all(|c| c.is_ascii_digit()));
        prop_assert_eq!(digits_only(&once), once.clone());
    }
}

// =============================================================================
// Residency derivation
// =============================================================================

fn country_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(DEFAULT_HOME_COUNTRY.to_string())),
        Just(Some("Germany".to_string())),
        Just(Some("USA".to_string())),
    ]
}

proptest! {
    /// Both flags always come out equal
    #[test]
    fn derived_flags_agree(tax_id in "[0-9]{0,12}", country in country_strategy()) {
        let flags = derive_residency(&tax_id, country.as_deref(), DEFAULT_HOME_COUNTRY);
        prop_assert_eq!(flags.is_resident, flags.is_cur_resident);
    }

    /// Resident iff registered at home with a domestic tax id
    #[test]
    fn derivation_rule(tax_id in "[0-9]{0,12}", country in country_strategy()) {
        let flags = derive_residency(&tax_id, country.as_deref(), DEFAULT_HOME_COUNTRY);
        let expected = country.as_deref() == Some(DEFAULT_HOME_COUNTRY)
            && !tax_id.starts_with(NON_RESIDENT_TAX_ID_PREFIX);
        prop_assert_eq!(flags, ResidencyFlags::uniform(expected));
    }

    /// The foreign prefix always wins
    #[test]
    fn foreign_prefix_is_non_resident(rest in "[0-9]{6,8}", country in country_strategy()) {
        let tax_id = format!("{}{}", NON_RESIDENT_TAX_ID_PREFIX, rest);
        let flags = derive_residency(&tax_id, country.as_deref(), DEFAULT_HOME_COUNTRY);
        prop_assert_eq!(flags, ResidencyFlags::NON_RESIDENT);
    }

    /// The identity draft always shows what derivation says after a tax id change
    #[test]
    fn identity_draft_follows_derivation(tax_id in "[0-9]{10,12}", manual in any::<bool>()) {
        let settings = WizardSettings::default();
        let mut draft = IdentityDraft::from_record(&CompositeRecord::default(), &settings);
        draft.apply(IdentityEdit::Resident { value: manual });
        draft.apply(IdentityEdit::TaxId { value: tax_id.clone() });

        let expected = derive_residency(&tax_id, Some(DEFAULT_HOME_COUNTRY), DEFAULT_HOME_COUNTRY);
        // A tax id is never empty here, so the edit is always a change
        prop_assert_eq!(draft.residency(), expected);
    }
}

// =============================================================================
// Lists and navigation
// =============================================================================

proptest! {
    /// Adding an item and removing it again restores the list
    #[test]
    fn push_then_remove_restores_list(items in prop::collection::vec("[a-z@.]{0,8}", 0..6), extra in "[a-z]{1,8}") {
        let mut list = StringList::new();
        for item in &items {
            list.push(item.clone());
        }
        let before = list.clone();

        let index = list.push(extra.clone());
        prop_assert_eq!(list.remove(index), Some(extra));
        prop_assert_eq!(list, before);
    }

    /// Moving back never changes the record, wherever the wizard is
    #[test]
    fn retreat_never_changes_record(forward in 0usize..3, backward in 0usize..5) {
        let mut wizard = OnboardingWizard::default();
        for _ in 0..forward {
            let mut draft = wizard.open_step();
            if let onboardtui::StepDraft::Identity(identity) = &mut draft {
                identity.apply(IdentityEdit::TaxId { value: "9909123456".into() });
                identity.apply(IdentityEdit::LegalStatus { value: Some(LegalStatus::LegalEntity) });
            }
            wizard.advance(&draft).expect("advance");
        }

        let before = wizard.snapshot();
        for _ in 0..backward {
            let step = wizard.current_step();
            match wizard.retreat() {
                Ok(previous) => prop_assert_eq!(Some(previous), step.previous()),
                Err(_) => prop_assert_eq!(step, WizardStep::Identity),
            }
            prop_assert_eq!(wizard.record(), &before);
        }
    }
}

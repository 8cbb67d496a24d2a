//! End-to-end wizard flows driven through the public session API

use onboardtui::record::{AddressField, AddressKind};
use onboardtui::session::OnboardingSession;
use onboardtui::settings::WizardSettings;
use onboardtui::steps::{CompanyField, CompanyInfoEdit, ContactsEdit, IdentityEdit, StepDraft};
use onboardtui::types::LegalStatus;
use onboardtui::validators::{FieldName, ValidationError};
use onboardtui::wizard::{WizardError, WizardStep};

fn session() -> OnboardingSession {
    OnboardingSession::new(WizardSettings::default())
}

fn fill_identity(session: &mut OnboardingSession, tax_id: &str, registration_number: &str) {
    session
        .apply(IdentityEdit::TaxId { value: tax_id.into() }.into())
        .expect("tax id edit");
    session
        .apply(
            IdentityEdit::RegistrationNumber {
                value: registration_number.into(),
            }
            .into(),
        )
        .expect("registration number edit");
    session
        .apply(
            IdentityEdit::LegalStatus {
                value: Some(LegalStatus::LegalEntity),
            }
            .into(),
        )
        .expect("legal status edit");
}

fn identity_residency(session: &OnboardingSession) -> (bool, bool) {
    match session.draft() {
        StepDraft::Identity(draft) => {
            let flags = draft.residency();
            (flags.is_resident, flags.is_cur_resident)
        }
        other => panic!("expected identity draft, got {:?}", other.step()),
    }
}

#[test]
fn test_resident_flow_reaches_review_and_submits() {
    let mut session = session();
    fill_identity(&mut session, "7707083893", "1027700132195");
    assert_eq!(identity_residency(&session), (true, true));
    assert_eq!(session.next().unwrap(), WizardStep::CompanyInfo);

    session
        .apply(
            CompanyInfoEdit::Text {
                field: CompanyField::Name,
                value: "Sberbank".into(),
            }
            .into(),
        )
        .unwrap();
    assert_eq!(session.next().unwrap(), WizardStep::Contacts);

    session
        .apply(
            ContactsEdit::AddEmail {
                value: "info@example.com".into(),
            }
            .into(),
        )
        .unwrap();
    session
        .apply(
            ContactsEdit::Address {
                kind: AddressKind::Main,
                field: AddressField::City,
                value: "Moscow".into(),
            }
            .into(),
        )
        .unwrap();
    assert_eq!(session.next().unwrap(), WizardStep::Review);

    let record = session.submit().expect("submit from review");
    assert_eq!(record.tin.as_deref(), Some("7707083893"));
    assert_eq!(record.registry_number.as_deref(), Some("1027700132195"));
    assert_eq!(record.registry_country.as_deref(), Some("Russian Federation"));
    assert_eq!(record.is_resident, Some(true));
    assert_eq!(record.is_cur_resident, Some(true));
    assert_eq!(record.is_branch, Some(false));
    assert_eq!(record.name.as_deref(), Some("Sberbank"));
    assert_eq!(
        record.email.as_ref().map(|e| e.as_slice().to_vec()),
        Some(vec!["info@example.com".to_string()])
    );
    assert_eq!(
        record
            .address(AddressKind::Main)
            .and_then(|a| a.get(AddressField::City)),
        Some("Moscow")
    );
}

#[test]
fn test_foreign_tax_id_skips_registration_number() {
    let mut session = session();
    fill_identity(&mut session, "9909123456", "");
    assert_eq!(identity_residency(&session), (false, false));

    assert_eq!(session.next().unwrap(), WizardStep::CompanyInfo);
    assert_eq!(session.record().is_resident, Some(false));
    assert_eq!(session.record().is_cur_resident, Some(false));
    assert!(session.record().registry_number.is_none());
}

#[test]
fn test_foreign_registration_country_is_non_resident() {
    let mut session = session();
    fill_identity(&mut session, "7707083893", "");
    session
        .apply(
            IdentityEdit::RegistrationCountry {
                value: Some("Germany".into()),
            }
            .into(),
        )
        .unwrap();
    assert_eq!(identity_residency(&session), (false, false));
    assert!(session.next().is_ok());
}

#[test]
fn test_resident_without_registration_number_is_rejected() {
    let mut session = session();
    fill_identity(&mut session, "7707083893", "");

    let err = session.next().unwrap_err();
    assert_eq!(
        err,
        WizardError::Validation(ValidationError::RequiredForResidents {
            field: FieldName::RegistrationNumber
        })
    );
    assert_eq!(session.current_step(), WizardStep::Identity);
    assert_eq!(session.last_error(), Some(&err));
}

#[test]
fn test_short_tax_id_is_rejected_and_record_untouched() {
    let mut session = session();
    fill_identity(&mut session, "12345", "1027700132195");

    let err = session.next().unwrap_err();
    assert_eq!(err.as_validation().map(|e| e.field()), Some(FieldName::TaxId));
    assert_eq!(session.current_step(), WizardStep::Identity);
    assert!(session.record().tin.is_none());
}

#[test]
fn test_manual_residency_override_survives_other_edits() {
    let mut session = session();
    fill_identity(&mut session, "7707083893", "1027700132195");
    session
        .apply(IdentityEdit::CurrencyResident { value: false }.into())
        .unwrap();
    session
        .apply(IdentityEdit::ForeignTrade { value: true }.into())
        .unwrap();
    assert_eq!(identity_residency(&session), (true, false));

    // Retyping the same tax id is not a change
    session
        .apply(IdentityEdit::TaxId { value: "7707083893".into() }.into())
        .unwrap();
    assert_eq!(identity_residency(&session), (true, false));

    // A real change re-derives both flags
    session
        .apply(IdentityEdit::TaxId { value: "7707083894".into() }.into())
        .unwrap();
    assert_eq!(identity_residency(&session), (true, true));
}

#[test]
fn test_back_keeps_saved_data_and_discards_unsaved_edits() {
    let mut session = session();
    fill_identity(&mut session, "7707083893", "1027700132195");
    session.next().unwrap();

    session
        .apply(
            CompanyInfoEdit::Text {
                field: CompanyField::Name,
                value: "Not saved".into(),
            }
            .into(),
        )
        .unwrap();
    assert_eq!(session.back().unwrap(), WizardStep::Identity);

    match session.draft() {
        StepDraft::Identity(draft) => {
            assert_eq!(draft.tax_id(), "7707083893");
            assert_eq!(draft.registration_number(), "1027700132195");
            assert_eq!(draft.legal_status(), Some(LegalStatus::LegalEntity));
        }
        other => panic!("expected identity draft, got {:?}", other.step()),
    }

    assert_eq!(session.next().unwrap(), WizardStep::CompanyInfo);
    match session.draft() {
        StepDraft::CompanyInfo(draft) => assert_eq!(draft.text(CompanyField::Name), ""),
        other => panic!("expected company draft, got {:?}", other.step()),
    }
    assert!(session.record().name.is_none());
}

#[test]
fn test_reopened_identity_keeps_manual_flags() {
    let mut session = session();
    fill_identity(&mut session, "7707083893", "1027700132195");
    session
        .apply(IdentityEdit::Resident { value: false }.into())
        .unwrap();
    session.next().unwrap();
    assert_eq!(session.record().is_resident, Some(false));

    session.back().unwrap();
    assert_eq!(identity_residency(&session), (false, true));
    session.next().unwrap();
    assert_eq!(session.record().is_resident, Some(false));
    assert_eq!(session.record().is_cur_resident, Some(true));
}

#[test]
fn test_edit_for_another_step_is_rejected() {
    let mut session = session();
    let err = session
        .apply(ContactsEdit::AddPhone { value: String::new() }.into())
        .unwrap_err();
    assert_eq!(
        err,
        WizardError::StepMismatch {
            expected: WizardStep::Identity,
            got: WizardStep::Contacts,
        }
    );
}

#[test]
fn test_submit_before_review_hands_session_back() {
    let mut session = session();
    fill_identity(&mut session, "7707083893", "1027700132195");
    session.next().unwrap();

    let (session, err) = session.submit().unwrap_err();
    assert_eq!(
        err,
        WizardError::NotAtReview {
            current: WizardStep::CompanyInfo
        }
    );
    assert_eq!(session.current_step(), WizardStep::CompanyInfo);
    assert_eq!(session.record().tin.as_deref(), Some("7707083893"));
}

#[test]
fn test_back_from_first_step_fails() {
    let mut session = session();
    assert_eq!(session.back().unwrap_err(), WizardError::AtFirstStep);
    assert_eq!(session.current_step(), WizardStep::Identity);
}

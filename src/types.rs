//! Type-safe selection values for the onboarding wizard
//!
//! Select fields in the wizard are modelled as enums rather than free strings
//! so that the identity step can only ever hold one of the offered options.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Client legal-status category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum LegalStatus {
    #[strum(serialize = "Legal entity")]
    LegalEntity,
    #[strum(serialize = "Individual entrepreneur")]
    IndividualEntrepreneur,
    #[strum(serialize = "Head of peasant farm")]
    FarmHead,
    #[strum(serialize = "Lawyer")]
    Lawyer,
    #[strum(serialize = "Notary")]
    Notary,
}

impl LegalStatus {
    /// Whether clients of this category carry a professional license
    pub fn is_licensed_professional(&self) -> bool {
        matches!(self, Self::Lawyer | Self::Notary)
    }
}

/// Position of the organization in its corporate hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum HierarchicalStatus {
    #[default]
    #[strum(serialize = "Head office")]
    HeadOffice,
    #[strum(serialize = "Branch")]
    Branch,
}

impl HierarchicalStatus {
    /// Whether this status marks a branch
    pub fn is_branch(&self) -> bool {
        matches!(self, Self::Branch)
    }
}

impl From<bool> for HierarchicalStatus {
    fn from(is_branch: bool) -> Self {
        if is_branch { Self::Branch } else { Self::HeadOffice }
    }
}

/// Step through the variants of a select enum, wrapping at both ends.
///
/// `None` moves onto the first (or last) option, which is how an empty select
/// gets its first value from the keyboard.
pub fn cycle_option<T>(current: Option<T>, forward: bool) -> Option<T>
where
    T: IntoEnumIterator + PartialEq + Copy,
{
    let options: Vec<T> = T::iter().collect();
    if options.is_empty() {
        return None;
    }
    let last = options.len() - 1;
    let index = match current.and_then(|c| options.iter().position(|o| *o == c)) {
        None if forward => 0,
        None => last,
        Some(i) if forward => if i == last { 0 } else { i + 1 },
        Some(i) => if i == 0 { last } else { i - 1 },
    };
    Some(options[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_legal_status_display_roundtrip() {
        for status in LegalStatus::iter() {
            let parsed = LegalStatus::from_str(&status.to_string()).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_legal_status_serializes_snake_case() {
        let json = serde_json::to_string(&LegalStatus::IndividualEntrepreneur).unwrap();
        assert_eq!(json, "\"individual_entrepreneur\"");
    }

    #[test]
    fn test_licensed_professionals() {
        assert!(LegalStatus::Lawyer.is_licensed_professional());
        assert!(LegalStatus::Notary.is_licensed_professional());
        assert!(!LegalStatus::LegalEntity.is_licensed_professional());
    }

    #[test]
    fn test_hierarchical_status_from_bool() {
        assert_eq!(HierarchicalStatus::from(true), HierarchicalStatus::Branch);
        assert_eq!(HierarchicalStatus::from(false), HierarchicalStatus::HeadOffice);
        assert!(HierarchicalStatus::Branch.is_branch());
        assert_eq!(HierarchicalStatus::default(), HierarchicalStatus::HeadOffice);
    }

    #[test]
    fn test_cycle_option_wraps() {
        assert_eq!(cycle_option::<LegalStatus>(None, true), Some(LegalStatus::LegalEntity));
        assert_eq!(cycle_option::<LegalStatus>(None, false), Some(LegalStatus::Notary));
        assert_eq!(
            cycle_option(Some(LegalStatus::Notary), true),
            Some(LegalStatus::LegalEntity)
        );
        assert_eq!(
            cycle_option(Some(HierarchicalStatus::HeadOffice), false),
            Some(HierarchicalStatus::Branch)
        );
    }
}

//! Residency flag derivation
//!
//! Tax residency (`is_resident`) and currency-control residency
//! (`is_cur_resident`) are implied by the tax id and the registration country.
//! The identity step re-runs [`derive_residency`] on every edit of either input
//! and writes the result over whatever the flags held before, including values
//! the user set by hand.

use serde::{Deserialize, Serialize};

use crate::validators::digits_only;

/// Tax ids issued to foreign organizations start with this prefix
pub const NON_RESIDENT_TAX_ID_PREFIX: &str = "9909";

/// The pair of residency flags carried by the identity step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidencyFlags {
    pub is_resident: bool,
    pub is_cur_resident: bool,
}

impl ResidencyFlags {
    /// Both flags set
    pub const RESIDENT: Self = Self::uniform(true);

    /// Both flags cleared
    pub const NON_RESIDENT: Self = Self::uniform(false);

    /// Flags with the same value for both kinds of residency
    pub const fn uniform(value: bool) -> Self {
        Self {
            is_resident: value,
            is_cur_resident: value,
        }
    }
}

impl Default for ResidencyFlags {
    fn default() -> Self {
        Self::RESIDENT
    }
}

/// Derive residency flags from the tax id and registration country.
///
/// Both flags are false when the digits of the tax id start with
/// [`NON_RESIDENT_TAX_ID_PREFIX`] or the organization is registered anywhere
/// but `home_country` (no country at all counts as "anywhere else"); otherwise
/// both are true.
pub fn derive_residency(
    tax_id: &str,
    registration_country: Option<&str>,
    home_country: &str,
) -> ResidencyFlags {
    let foreign_tax_id = digits_only(tax_id).starts_with(NON_RESIDENT_TAX_ID_PREFIX);
    let registered_at_home = registration_country == Some(home_country);

    if foreign_tax_id || !registered_at_home {
        ResidencyFlags::NON_RESIDENT
    } else {
        ResidencyFlags::RESIDENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "Russian Federation";

    #[test]
    fn test_domestic_tax_id_at_home_is_resident() {
        assert_eq!(
            derive_residency("1234567890", Some(HOME), HOME),
            ResidencyFlags::RESIDENT
        );
    }

    #[test]
    fn test_foreign_prefix_is_non_resident() {
        assert_eq!(
            derive_residency("9909123456", Some(HOME), HOME),
            ResidencyFlags::NON_RESIDENT
        );
    }

    #[test]
    fn test_prefix_checked_after_stripping() {
        assert_eq!(
            derive_residency("99-09-123456", Some(HOME), HOME),
            ResidencyFlags::NON_RESIDENT
        );
    }

    #[test]
    fn test_foreign_country_is_non_resident() {
        assert_eq!(
            derive_residency("1234567890", Some("Germany"), HOME),
            ResidencyFlags::NON_RESIDENT
        );
        assert_eq!(
            derive_residency("1234567890", None, HOME),
            ResidencyFlags::NON_RESIDENT
        );
    }

    #[test]
    fn test_partial_prefix_is_not_foreign() {
        // "990" alone is still being typed and is not the foreign prefix
        assert_eq!(derive_residency("990", Some(HOME), HOME), ResidencyFlags::RESIDENT);
    }

    #[test]
    fn test_default_flags_are_resident() {
        assert_eq!(ResidencyFlags::default(), ResidencyFlags::RESIDENT);
        assert!(!ResidencyFlags::NON_RESIDENT.is_cur_resident);
    }
}

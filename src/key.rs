//! Lookup key and canonicalization.

use serde::{Deserialize, Serialize};

/// A solar calendar date identifying one manseryeok record.
///
/// The client treats the key as opaque once canonicalized; it does not
/// validate domain ranges (a caller asking for month 13 simply resolves to
/// nothing). Equality follows the canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateKey {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Canonical map key: zero-padded, fixed-width fields.
    ///
    /// Padding keeps the mapping injective: `(2024, 1, 1)` and `(2024, 10, 1)`
    /// produce `2024-01-01` and `2024-10-01`, never a shared prefix collision.
    pub fn canonical(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl From<(i32, u32, u32)> for DateKey {
    fn from((year, month, day): (i32, u32, u32)) -> Self {
        Self::new(year, month, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_is_zero_padded() {
        assert_eq!(DateKey::new(2024, 1, 1).canonical(), "2024-01-01");
        assert_eq!(DateKey::new(2024, 10, 1).canonical(), "2024-10-01");
        assert_eq!(DateKey::new(845, 12, 31).canonical(), "0845-12-31");
    }

    #[test]
    fn padding_prevents_field_collisions() {
        let a = DateKey::new(2024, 1, 11).canonical();
        let b = DateKey::new(2024, 11, 1).canonical();
        assert_ne!(a, b);
    }

    #[test]
    fn equality_follows_canonical_form() {
        assert_eq!(DateKey::new(2024, 2, 29), DateKey::from((2024, 2, 29)));
        assert_eq!(DateKey::new(2024, 2, 29).to_string(), "2024-02-29");
    }
}

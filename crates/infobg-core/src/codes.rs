//! Territorial codes issued by the national classifier (EKATTE).
//!
//! ```text
//! district      VID        3 Latin letters
//! municipality  VID09      district prefix + 2-digit sequence
//! settlement    29129      4 digits + modulo-11 check digit
//! ```
//!
//! All three are validated on construction and (de)serialize as plain strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// DistrictAbbrev
// ---------------------------------------------------------------------------

/// Three-letter district abbreviation (e.g. `VID`, `SOF`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DistrictAbbrev(String);

impl DistrictAbbrev {
    /// Parse and upper-case a district abbreviation.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCode`] unless the value is exactly three
    /// ASCII letters.
    pub fn new(value: &str) -> Result<Self, CoreError> {
        let value = value.trim();
        if value.len() != 3 || !value.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(CoreError::InvalidCode {
                kind: "district",
                value: value.to_string(),
                reason: "expected 3 ASCII letters",
            });
        }
        Ok(Self(value.to_ascii_uppercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DistrictAbbrev {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DistrictAbbrev {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DistrictAbbrev {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<DistrictAbbrev> for String {
    fn from(value: DistrictAbbrev) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// MunicipalityAbbrev
// ---------------------------------------------------------------------------

/// Five-character municipality abbreviation: owning district prefix plus a
/// two-digit sequence number inside that district (e.g. `VID09`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MunicipalityAbbrev(String);

impl MunicipalityAbbrev {
    /// Parse and upper-case a municipality abbreviation.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCode`] unless the value is three ASCII
    /// letters followed by two ASCII digits.
    pub fn new(value: &str) -> Result<Self, CoreError> {
        let value = value.trim();
        let bytes = value.as_bytes();
        let shaped = bytes.len() == 5
            && bytes[..3].iter().all(u8::is_ascii_alphabetic)
            && bytes[3..].iter().all(u8::is_ascii_digit);
        if !shaped {
            return Err(CoreError::InvalidCode {
                kind: "municipality",
                value: value.to_string(),
                reason: "expected 3 ASCII letters followed by 2 digits",
            });
        }
        Ok(Self(value.to_ascii_uppercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The district abbreviation embedded in the first three characters.
    #[must_use]
    pub fn district(&self) -> DistrictAbbrev {
        DistrictAbbrev(self.0[..3].to_string())
    }

    /// Whether this municipality belongs to `district` according to its prefix.
    #[must_use]
    pub fn belongs_to(&self, district: &DistrictAbbrev) -> bool {
        self.0[..3] == district.0
    }
}

impl fmt::Display for MunicipalityAbbrev {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MunicipalityAbbrev {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for MunicipalityAbbrev {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<MunicipalityAbbrev> for String {
    fn from(value: MunicipalityAbbrev) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// SettlementCode
// ---------------------------------------------------------------------------

/// Five-digit EKATTE settlement code.
///
/// Construction only checks the shape. The check digit is verified
/// separately with [`SettlementCode::has_valid_checksum`] because registry
/// files are trusted even when a digit is off; callers report, not reject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SettlementCode(String);

impl SettlementCode {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCode`] unless the value is five ASCII digits.
    pub fn new(value: &str) -> Result<Self, CoreError> {
        let value = value.trim();
        if value.len() != 5 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidCode {
                kind: "settlement",
                value: value.to_string(),
                reason: "expected 5 ASCII digits",
            });
        }
        Ok(Self(value.to_string()))
    }

    /// Build a code from its numeric form, zero-padding to five digits.
    ///
    /// School registries store settlement codes as integers, so `14` is `00014`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCode`] when the number has more than five digits.
    pub fn from_number(value: u32) -> Result<Self, CoreError> {
        Self::new(&format!("{value:05}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the last digit matches the modulo-11 check digit of the first four.
    #[must_use]
    pub fn has_valid_checksum(&self) -> bool {
        let digits: Vec<u32> = self.0.bytes().map(|b| u32::from(b - b'0')).collect();
        check_digit(&digits[..4]) == digits[4]
    }
}

/// Modulo-11 check digit used by the national statistical institute.
///
/// Weights 1..=4 are tried first; a remainder of 10 retries with weights
/// 3..=6, and a second 10 yields 0.
#[must_use]
pub fn check_digit(base: &[u32]) -> u32 {
    let weighted = |offset: u32| -> u32 {
        base.iter()
            .zip(offset..)
            .map(|(digit, weight)| digit * weight)
            .sum::<u32>()
            % 11
    };

    match weighted(1) {
        10 => match weighted(3) {
            10 => 0,
            r => r,
        },
        r => r,
    }
}

impl fmt::Display for SettlementCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SettlementCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SettlementCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<SettlementCode> for String {
    fn from(value: SettlementCode) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("68134")] // Sofia
    #[case("56784")] // Plovdiv
    #[case("10135")] // Varna
    #[case("29129")]
    fn known_codes_pass_checksum(#[case] code: &str) {
        assert!(SettlementCode::new(code).unwrap().has_valid_checksum());
    }

    #[test]
    fn wrong_check_digit_is_detected() {
        assert!(!SettlementCode::new("68135").unwrap().has_valid_checksum());
    }

    #[test]
    fn remainder_ten_falls_back_to_shifted_weights() {
        // 0*1 + 5*2 + 0*3 + 0*4 = 10 -> retry: 0*3 + 5*4 + 0*5 + 0*6 = 20 % 11 = 9
        assert_eq!(check_digit(&[0, 5, 0, 0]), 9);
        // 0*1 + 0*2 + 0*3 + 8*4 = 32 % 11 = 10 -> retry: 8*6 = 48 % 11 = 4
        assert_eq!(check_digit(&[0, 0, 0, 8]), 4);
    }

    #[test]
    fn settlement_code_rejects_bad_shape() {
        assert!(SettlementCode::new("1234").is_err());
        assert!(SettlementCode::new("12a45").is_err());
        assert_eq!(SettlementCode::from_number(14).unwrap().as_str(), "00014");
        assert!(SettlementCode::from_number(123_456).is_err());
    }

    #[test]
    fn municipality_prefix_is_district() {
        let mun = MunicipalityAbbrev::new("vid09").unwrap();
        assert_eq!(mun.as_str(), "VID09");
        assert_eq!(mun.district(), DistrictAbbrev::new("VID").unwrap());
        assert!(mun.belongs_to(&DistrictAbbrev::new("VID").unwrap()));
        assert!(!mun.belongs_to(&DistrictAbbrev::new("MON").unwrap()));
    }

    #[rstest]
    #[case("VI")]
    #[case("VID0")]
    #[case("V1D09")]
    #[case("VIDAB")]
    fn municipality_rejects_bad_shape(#[case] value: &str) {
        assert!(MunicipalityAbbrev::new(value).is_err());
    }

    #[test]
    fn codes_serialize_as_plain_strings() {
        let code = SettlementCode::new("29129").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"29129\"");
        let back: SettlementCode = serde_json::from_str("\"29129\"").unwrap();
        assert_eq!(back, code);
        assert!(serde_json::from_str::<DistrictAbbrev>("\"TOOLONG\"").is_err());
    }
}

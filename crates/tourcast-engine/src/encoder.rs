//! Country label encoder.

use serde::{Deserialize, Serialize};
use tourcast_core::PredictError;

/// Reference country list used only by the degraded-mode fallback encoder.
///
/// Contains a duplicate ("Tanzania"); fitting de-duplicates.
pub const REFERENCE_COUNTRIES: [&str; 45] = [
    "Angola",
    "Benin",
    "Botswana",
    "Burkina Faso",
    "Cameroon",
    "Congo, Dem. Rep.",
    "Ethiopia",
    "Ghana",
    "Kenya",
    "Mozambique",
    "Nigeria",
    "South Africa",
    "Tanzania",
    "Uganda",
    "Zambia",
    "Zimbabwe",
    "Togo",
    "Niger",
    "Rwanda",
    "Senegal",
    "Sierra Leone",
    "Somalia",
    "Sudan",
    "Eritrea",
    "Gabon",
    "Gambia",
    "Guinea",
    "Guinea-Bissau",
    "Lesotho",
    "Liberia",
    "Madagascar",
    "Malawi",
    "Mali",
    "Mauritania",
    "Mauritius",
    "Namibia",
    "Seychelles",
    "Tanzania",
    "Chad",
    "Central African Republic",
    "Comoros",
    "Equatorial Guinea",
    "Eswatini",
    "Djibouti",
    "Burundi",
];

/// On-disk form of a fitted encoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderFile {
    pub classes: Vec<String>,
}

/// Maps country names to integer codes.
///
/// A country's code is its index in the sorted, de-duplicated class list.
/// An encoder with no classes is unfitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Creates an unfitted encoder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = labels.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn is_fitted(&self) -> bool {
        !self.classes.is_empty()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns the integer code for `label`.
    pub fn transform(&self, label: &str) -> Result<usize, PredictError> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .map_err(|_| PredictError::UnknownCategory(label.to_string()))
    }
}

impl From<EncoderFile> for LabelEncoder {
    fn from(file: EncoderFile) -> Self {
        Self::fit(file.classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourcast_core::ErrorKind;

    #[test]
    fn test_codes_follow_sorted_order() {
        let encoder = LabelEncoder::fit(["Kenya", "Angola", "Benin"]);
        assert_eq!(encoder.transform("Angola").unwrap(), 0);
        assert_eq!(encoder.transform("Benin").unwrap(), 1);
        assert_eq!(encoder.transform("Kenya").unwrap(), 2);
    }

    #[test]
    fn test_unknown_label() {
        let encoder = LabelEncoder::fit(["Angola"]);
        let err = encoder.transform("Atlantis").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownCategory);
    }

    #[test]
    fn test_unfitted() {
        let encoder = LabelEncoder::new();
        assert!(!encoder.is_fitted());
        assert!(LabelEncoder::fit(Vec::<String>::new()).classes().is_empty());
    }

    #[test]
    fn test_reference_list_deduplicated() {
        let encoder = LabelEncoder::fit(REFERENCE_COUNTRIES);
        assert_eq!(encoder.classes().len(), 44);
        assert_eq!(encoder.transform("Angola").unwrap(), 0);
        assert!(encoder.transform("Zimbabwe").is_ok());
    }

    #[test]
    fn test_from_file() {
        let file: EncoderFile =
            serde_json::from_str(r#"{"classes": ["Togo", "Chad", "Togo"]}"#).unwrap();
        let encoder = LabelEncoder::from(file);
        assert_eq!(encoder.classes(), &["Chad".to_string(), "Togo".to_string()]);
    }
}

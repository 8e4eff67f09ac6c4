//! Prediction request records and the input validator.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::PredictError;

/// Earliest year the model accepts.
pub const MIN_YEAR: i64 = 1999;
/// Latest year the model accepts.
pub const MAX_YEAR: i64 = 2100;

/// Raw request record as it arrives on the wire, before range checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecordInput {
    /// Name of the country in Sub-Saharan Africa.
    #[schema(example = "Angola", min_length = 1)]
    pub country: String,
    /// Year of the data.
    #[schema(example = 2020, minimum = 1999, maximum = 2100)]
    pub year: i64,
    /// Tourism receipts in local currency units.
    #[schema(example = 150000000.0, minimum = 0)]
    pub tourism_receipts: f64,
    /// Tourism exports as a percentage of total exports.
    #[schema(example = 5.5, minimum = 0)]
    pub tourism_exports: f64,
    /// Tourism expenditures as a percentage of total expenditures.
    #[schema(example = 3.0, minimum = 0)]
    pub tourism_expenditures: f64,
    /// Gross domestic product in local currency units.
    #[schema(example = 10000000000.0, minimum = 0)]
    pub gdp: f64,
    /// Inflation rate (percentage), may be negative.
    #[schema(example = 5.0)]
    pub inflation: f64,
    /// Unemployment rate (percentage), may be absent.
    #[serde(default)]
    #[schema(example = 7.5, minimum = 0, maximum = 100)]
    pub unemployment: Option<f64>,
}

/// A record that passed validation.
///
/// The only ways to obtain one are [`parse_record`] and
/// `PredictionRecord::try_from(RecordInput)`, so every value satisfies the
/// field constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    country: String,
    year: i64,
    tourism_receipts: f64,
    tourism_exports: f64,
    tourism_expenditures: f64,
    gdp: f64,
    inflation: f64,
    unemployment: Option<f64>,
}

impl PredictionRecord {
    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn tourism_receipts(&self) -> f64 {
        self.tourism_receipts
    }

    pub fn tourism_exports(&self) -> f64 {
        self.tourism_exports
    }

    pub fn tourism_expenditures(&self) -> f64 {
        self.tourism_expenditures
    }

    pub fn gdp(&self) -> f64 {
        self.gdp
    }

    pub fn inflation(&self) -> f64 {
        self.inflation
    }

    pub fn unemployment(&self) -> Option<f64> {
        self.unemployment
    }
}

impl TryFrom<RecordInput> for PredictionRecord {
    type Error = PredictError;

    fn try_from(input: RecordInput) -> Result<Self, Self::Error> {
        if input.country.trim().is_empty() {
            return Err(PredictError::validation("country must not be empty"));
        }

        if !(MIN_YEAR..=MAX_YEAR).contains(&input.year) {
            return Err(PredictError::validation(format!(
                "year must be between {} and {}, got {}",
                MIN_YEAR, MAX_YEAR, input.year
            )));
        }

        non_negative("tourism_receipts", input.tourism_receipts)?;
        non_negative("tourism_exports", input.tourism_exports)?;
        non_negative("tourism_expenditures", input.tourism_expenditures)?;
        non_negative("gdp", input.gdp)?;
        finite("inflation", input.inflation)?;

        if let Some(rate) = input.unemployment {
            finite("unemployment", rate)?;
            if !(0.0..=100.0).contains(&rate) {
                return Err(PredictError::validation(format!(
                    "unemployment must be between 0 and 100, got {}",
                    rate
                )));
            }
        }

        Ok(Self {
            country: input.country,
            year: input.year,
            tourism_receipts: input.tourism_receipts,
            tourism_exports: input.tourism_exports,
            tourism_expenditures: input.tourism_expenditures,
            gdp: input.gdp,
            inflation: input.inflation,
            unemployment: input.unemployment,
        })
    }
}

fn finite(field: &str, value: f64) -> Result<(), PredictError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PredictError::validation(format!("{} must be a finite number", field)))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), PredictError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(PredictError::validation(format!(
            "{} must be greater than or equal to 0, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Parses a raw JSON request body into a validated [`PredictionRecord`].
///
/// Missing fields, wrong types and out-of-range values all fail with
/// [`PredictError::Validation`]. Unknown extra fields are ignored.
pub fn parse_record(body: &[u8]) -> Result<PredictionRecord, PredictError> {
    let input: RecordInput = serde_json::from_slice(body)?;
    PredictionRecord::try_from(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn angola() -> RecordInput {
        RecordInput {
            country: "Angola".to_string(),
            year: 2020,
            tourism_receipts: 150_000_000.0,
            tourism_exports: 5.5,
            tourism_expenditures: 3.0,
            gdp: 10_000_000_000.0,
            inflation: 5.0,
            unemployment: Some(7.5),
        }
    }

    fn rejected(input: RecordInput) -> PredictError {
        PredictionRecord::try_from(input).unwrap_err()
    }

    #[test]
    fn test_valid_record() {
        let record = PredictionRecord::try_from(angola()).unwrap();
        assert_eq!(record.country(), "Angola");
        assert_eq!(record.year(), 2020);
        assert_eq!(record.unemployment(), Some(7.5));
    }

    #[test]
    fn test_parse_full_body() {
        let body = br#"{"country":"Angola","year":2020,"tourism_receipts":150000000.0,
            "tourism_exports":5.5,"tourism_expenditures":3.0,"gdp":10000000000.0,
            "inflation":5.0,"unemployment":7.5}"#;
        let record = parse_record(body).unwrap();
        assert_eq!(record, PredictionRecord::try_from(angola()).unwrap());
    }

    #[test]
    fn test_unemployment_absent_or_null() {
        let absent = br#"{"country":"Kenya","year":2010,"tourism_receipts":1,
            "tourism_exports":1,"tourism_expenditures":1,"gdp":1,"inflation":-2.5}"#;
        let null = br#"{"country":"Kenya","year":2010,"tourism_receipts":1,
            "tourism_exports":1,"tourism_expenditures":1,"gdp":1,"inflation":-2.5,
            "unemployment":null}"#;
        assert_eq!(parse_record(absent).unwrap().unemployment(), None);
        assert_eq!(parse_record(null).unwrap().unemployment(), None);
    }

    #[test]
    fn test_year_bounds() {
        for year in [MIN_YEAR, MAX_YEAR] {
            assert!(PredictionRecord::try_from(RecordInput { year, ..angola() }).is_ok());
        }
        for year in [1850, MIN_YEAR - 1, MAX_YEAR + 1] {
            let err = rejected(RecordInput { year, ..angola() });
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert!(err.to_string().contains("year"));
        }
    }

    #[test]
    fn test_negative_fields_rejected() {
        let cases = [
            RecordInput { tourism_receipts: -1.0, ..angola() },
            RecordInput { tourism_exports: -0.1, ..angola() },
            RecordInput { tourism_expenditures: -3.0, ..angola() },
            RecordInput { gdp: -10.0, ..angola() },
        ];
        for input in cases {
            assert_eq!(rejected(input).kind(), ErrorKind::Validation);
        }
    }

    #[test]
    fn test_negative_inflation_allowed() {
        let record = PredictionRecord::try_from(RecordInput { inflation: -12.0, ..angola() });
        assert!(record.is_ok());
    }

    #[test]
    fn test_unemployment_range() {
        assert!(PredictionRecord::try_from(RecordInput { unemployment: Some(0.0), ..angola() }).is_ok());
        assert!(PredictionRecord::try_from(RecordInput { unemployment: Some(100.0), ..angola() }).is_ok());
        for rate in [-0.5, 100.5] {
            let err = rejected(RecordInput { unemployment: Some(rate), ..angola() });
            assert!(err.to_string().contains("unemployment"));
        }
    }

    #[test]
    fn test_empty_country_rejected() {
        let err = rejected(RecordInput { country: "  ".to_string(), ..angola() });
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = rejected(RecordInput { inflation: f64::NAN, ..angola() });
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = rejected(RecordInput { gdp: f64::INFINITY, ..angola() });
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_malformed_bodies() {
        let cases: [&[u8]; 4] = [
            b"not json",
            br#"{"country":"Angola"}"#,
            br#"{"country":"Angola","year":"2020","tourism_receipts":1,"tourism_exports":1,
                "tourism_expenditures":1,"gdp":1,"inflation":1}"#,
            br#"[1, 2, 3]"#,
        ];
        for body in cases {
            assert_eq!(parse_record(body).unwrap_err().kind(), ErrorKind::Validation);
        }
    }

    #[test]
    fn test_fractional_year_rejected() {
        let body = br#"{"country":"Angola","year":2020.0,"tourism_receipts":1,"tourism_exports":1,
            "tourism_expenditures":1,"gdp":1,"inflation":1}"#;
        let err = parse_record(body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("floating point"));
    }

    #[test]
    fn test_missing_field_named() {
        let err = parse_record(br#"{"country":"Angola","year":2020}"#).unwrap_err();
        assert!(err.to_string().contains("tourism_receipts"));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let body = br#"{"country":"Angola","year":2020,"tourism_receipts":1,"tourism_exports":1,
            "tourism_expenditures":1,"gdp":1,"inflation":1,"region":"SSA"}"#;
        assert!(parse_record(body).is_ok());
    }
}

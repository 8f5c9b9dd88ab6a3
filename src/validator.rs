//! Form field validation.
//!
//! Turns a raw [`FormSubmission`] into a [`FeatureVector`] in training order.
//! Fields are checked in schema order: presence, then parse, then the
//! feature's upper bound (if it has one).

use crate::config::ValidationMode;
use crate::error::{FieldError, ValidationFailure};
use crate::schema::{self, FEATURE_COUNT, FEATURE_NAMES};
use crate::types::request::FormSubmission;

/// Thirty validated values, position-aligned with [`FEATURE_NAMES`].
///
/// Only the validator can build one, so holding a `FeatureVector` means every
/// field was present, numeric and within bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value of a named feature
    pub fn get(&self, name: &str) -> Option<f64> {
        schema::position(name).and_then(|i| self.0.get(i).copied())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

/// Validates form submissions against the feature schema.
#[derive(Debug, Clone, Default)]
pub struct FieldValidator {
    mode: ValidationMode,
}

impl FieldValidator {
    pub fn new(mode: ValidationMode) -> Self {
        Self { mode }
    }

    /// Stop at the first bad field
    pub fn fail_fast() -> Self {
        Self::new(ValidationMode::FailFast)
    }

    /// Check every field and report all failures together
    pub fn accumulating() -> Self {
        Self::new(ValidationMode::Accumulate)
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Validate a submission into a feature vector.
    pub fn validate(&self, form: &FormSubmission) -> Result<FeatureVector, ValidationFailure> {
        match self.mode {
            ValidationMode::FailFast => Self::validate_fail_fast(form),
            ValidationMode::Accumulate => Self::validate_all(form),
        }
    }

    fn validate_fail_fast(form: &FormSubmission) -> Result<FeatureVector, ValidationFailure> {
        FEATURE_NAMES
            .iter()
            .map(|name| Self::check_field(name, form.get(name)))
            .collect::<Result<Vec<f64>, FieldError>>()
            .map(FeatureVector)
            .map_err(ValidationFailure::from)
    }

    fn validate_all(form: &FormSubmission) -> Result<FeatureVector, ValidationFailure> {
        let mut values = Vec::with_capacity(FEATURE_COUNT);
        let mut errors = Vec::new();

        for name in FEATURE_NAMES {
            match Self::check_field(name, form.get(name)) {
                Ok(value) => values.push(value),
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(FeatureVector(values))
        } else {
            Err(ValidationFailure::new(errors))
        }
    }

    /// Run the per-field checks for a single feature.
    pub fn check_field(name: &str, raw: Option<&str>) -> Result<f64, FieldError> {
        let raw = raw.ok_or_else(|| FieldError::MissingField(name.to_string()))?;

        let value = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| FieldError::InvalidNumber(name.to_string()))?;

        if let Some(max) = schema::max_value(name) {
            if value > max {
                return Err(FieldError::OutOfRange {
                    field: name.to_string(),
                    max,
                });
            }
        }

        Ok(value)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::schema::VISIBLE_FEATURES;

    /// A typical benign-looking submission with every visible field filled.
    pub(crate) fn valid_form() -> FormSubmission {
        FormSubmission::from_visible([
            ("radius_mean", "12.5"),
            ("perimeter_mean", "80.1"),
            ("area_mean", "480"),
            ("concave points_mean", "0.02"),
            ("concavity_mean", "0.03"),
            ("compactness_mean", "0.07"),
            ("radius_worst", "13.9"),
            ("perimeter_worst", "90.2"),
            ("area_worst", "590"),
            ("concave points_worst", "0.07"),
        ])
    }

    #[test]
    fn test_valid_form_produces_vector_in_schema_order() {
        let vector = FieldValidator::fail_fast().validate(&valid_form()).unwrap();

        assert_eq!(vector.len(), FEATURE_COUNT);
        assert_eq!(vector.as_slice()[0], 12.5); // radius_mean
        assert_eq!(vector.as_slice()[1], 0.0); // texture_mean (hidden)
        assert_eq!(vector.as_slice()[2], 80.1); // perimeter_mean
        assert_eq!(vector.as_slice()[3], 480.0); // area_mean
        assert_eq!(vector.get("concave points_worst"), Some(0.07));
    }

    #[test]
    fn test_vector_ignores_insertion_order() {
        let forward: FormSubmission = FEATURE_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), format!("{}", i as f64 / 100.0)))
            .collect();
        let reversed: FormSubmission = FEATURE_NAMES
            .iter()
            .enumerate()
            .rev()
            .map(|(i, name)| (name.to_string(), format!("{}", i as f64 / 100.0)))
            .collect();

        let validator = FieldValidator::fail_fast();
        let a = validator.validate(&forward).unwrap();
        let b = validator.validate(&reversed).unwrap();

        assert_eq!(a, b);
        for (i, value) in a.as_slice().iter().enumerate() {
            assert_eq!(*value, i as f64 / 100.0);
        }
    }

    #[test]
    fn test_missing_field_fails_fast() {
        let mut form = valid_form();
        form.remove("area_mean");
        form.insert("radius_worst", "not a number");

        let err = FieldValidator::fail_fast().validate(&form).unwrap_err();

        // area_mean comes before radius_worst, so only it is reported
        assert_eq!(err.errors(), &[FieldError::MissingField("area_mean".into())]);
    }

    #[test]
    fn test_upper_bound_is_inclusive() {
        let validator = FieldValidator::fail_fast();

        let over = valid_form().with_field("radius_mean", "31");
        let err = validator.validate(&over).unwrap_err();
        assert_eq!(
            err.first(),
            Some(&FieldError::OutOfRange {
                field: "radius_mean".into(),
                max: 30.0
            })
        );

        let at_bound = valid_form().with_field("radius_mean", "30");
        assert_eq!(validator.validate(&at_bound).unwrap().as_slice()[0], 30.0);
    }

    #[test]
    fn test_unparseable_value() {
        let form = valid_form().with_field("area_mean", "abc");
        let err = FieldValidator::fail_fast().validate(&form).unwrap_err();

        assert_eq!(err.errors(), &[FieldError::InvalidNumber("area_mean".into())]);
    }

    #[test]
    fn test_empty_and_non_finite_values_are_invalid() {
        for raw in ["", "   ", "nan", "inf", "-infinity"] {
            let result = FieldValidator::check_field("texture_mean", Some(raw));
            assert_eq!(
                result,
                Err(FieldError::InvalidNumber("texture_mean".into())),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_accepts_whitespace_and_exponents() {
        assert_eq!(FieldValidator::check_field("area_mean", Some(" 1.2e3 ")), Ok(1200.0));
    }

    #[test]
    fn test_negative_values_pass() {
        let form = valid_form().with_field("radius_mean", "-5");
        let vector = FieldValidator::fail_fast().validate(&form).unwrap();
        assert_eq!(vector.get("radius_mean"), Some(-5.0));
    }

    #[test]
    fn test_hidden_features_have_no_bound() {
        let form = valid_form().with_field("texture_mean", "99999");
        let vector = FieldValidator::fail_fast().validate(&form).unwrap();
        assert_eq!(vector.get("texture_mean"), Some(99999.0));
    }

    #[test]
    fn test_hidden_zero_is_not_special() {
        let visible: Vec<(&str, &str)> = VISIBLE_FEATURES
            .iter()
            .map(|name| (*name, "0.01"))
            .collect();

        let injected = FormSubmission::from_visible(visible.clone());
        let explicit: FormSubmission = FEATURE_NAMES
            .iter()
            .map(|name| {
                let value = visible
                    .iter()
                    .find(|(v, _)| v == name)
                    .map(|(_, value)| *value)
                    .unwrap_or("0");
                (*name, value)
            })
            .collect();

        let validator = FieldValidator::fail_fast();
        assert_eq!(
            validator.validate(&injected).unwrap(),
            validator.validate(&explicit).unwrap()
        );
    }

    #[test]
    fn test_accumulate_reports_every_failure_in_schema_order() {
        let mut form = valid_form()
            .with_field("radius_mean", "31")
            .with_field("symmetry_se", "x");
        form.remove("area_worst");

        let err = FieldValidator::accumulating().validate(&form).unwrap_err();

        assert_eq!(
            err.errors(),
            &[
                FieldError::OutOfRange {
                    field: "radius_mean".into(),
                    max: 30.0
                },
                FieldError::InvalidNumber("symmetry_se".into()),
                FieldError::MissingField("area_worst".into()),
            ]
        );
    }

    #[test]
    fn test_accumulate_matches_fail_fast_on_valid_input() {
        let form = valid_form();
        assert_eq!(
            FieldValidator::accumulating().validate(&form).unwrap(),
            FieldValidator::fail_fast().validate(&form).unwrap()
        );
    }

    #[test]
    fn test_empty_submission_reports_first_field() {
        let err = FieldValidator::default()
            .validate(&FormSubmission::new())
            .unwrap_err();
        assert_eq!(err.errors(), &[FieldError::MissingField("radius_mean".into())]);
    }
}

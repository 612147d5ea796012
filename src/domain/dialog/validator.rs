//! Pure answer validation against field specs.
//!
//! `validate` is total over all string inputs: malformed input becomes a
//! `ValidationError`, never a panic. The caller re-prompts the same field
//! on failure, so every error carries the field name and a human-readable
//! reason.

use chrono::{Duration, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::foundation::ValidationError;

use super::field::{FieldKind, FieldSpec, FieldValue, MediaRef};

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{6,14}$").expect("phone pattern compiles"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9][A-Za-z0-9.-]*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Validates a raw text answer against a field spec.
pub fn validate(spec: &FieldSpec, raw: &str) -> Result<FieldValue, ValidationError> {
    validate_at(spec, raw, Utc::now().date_naive())
}

/// Like [`validate`] but with an explicit "today" for date fields.
///
/// Kept separate so date validation is deterministic in tests.
pub fn validate_at(
    spec: &FieldSpec,
    raw: &str,
    today: NaiveDate,
) -> Result<FieldValue, ValidationError> {
    let field = spec.name();
    let input = raw.trim();

    if input.is_empty() {
        return Err(ValidationError::empty_field(field));
    }

    match spec.kind() {
        FieldKind::Text { min_len, max_len } => {
            let len = input.chars().count();
            if len < *min_len || len > *max_len {
                return Err(ValidationError::out_of_range(
                    field,
                    *min_len as f64,
                    *max_len as f64,
                    len as f64,
                ));
            }
            Ok(FieldValue::Text(input.to_string()))
        }
        FieldKind::Integer { min, max } => {
            let value: i64 = input.parse().map_err(|_| {
                ValidationError::invalid_format(field, format!("'{}' is not a whole number", input))
            })?;
            if value < *min || value > *max {
                return Err(ValidationError::out_of_range(
                    field,
                    *min as f64,
                    *max as f64,
                    value as f64,
                ));
            }
            Ok(FieldValue::Integer(value))
        }
        FieldKind::Decimal { min, max } => {
            let value: f64 = input.replace(',', ".").parse().map_err(|_| {
                ValidationError::invalid_format(field, format!("'{}' is not a number", input))
            })?;
            if !value.is_finite() {
                return Err(ValidationError::invalid_format(
                    field,
                    format!("'{}' is not a number", input),
                ));
            }
            if value < *min || value > *max {
                return Err(ValidationError::out_of_range(field, *min, *max, value));
            }
            Ok(FieldValue::Decimal(value))
        }
        FieldKind::Choice(options) => {
            let matched = options
                .iter()
                .find(|option| option.eq_ignore_ascii_case(input));
            match matched {
                Some(option) => Ok(FieldValue::Choice(option.to_string())),
                None => Err(ValidationError::invalid_format(
                    field,
                    format!("expected one of: {}", options.join(", ")),
                )),
            }
        }
        FieldKind::Phone => {
            let normalized: String = input
                .chars()
                .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
                .collect();
            if PHONE_PATTERN.is_match(&normalized) {
                Ok(FieldValue::Phone(normalized))
            } else {
                Err(ValidationError::invalid_format(
                    field,
                    "expected an international number like +79991234567",
                ))
            }
        }
        FieldKind::Email => {
            let normalized = input.to_ascii_lowercase();
            if EMAIL_PATTERN.is_match(&normalized) {
                Ok(FieldValue::Email(normalized))
            } else {
                Err(ValidationError::invalid_format(
                    field,
                    "expected an address like name@example.com",
                ))
            }
        }
        FieldKind::Date { max_horizon_days } => {
            let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
                ValidationError::invalid_format(field, "expected a date like 2026-09-30")
            })?;
            if date < today {
                return Err(ValidationError::invalid_format(
                    field,
                    "date cannot be in the past",
                ));
            }
            let horizon = today + Duration::days(*max_horizon_days);
            if date > horizon {
                return Err(ValidationError::invalid_format(
                    field,
                    format!("date cannot be more than {} days ahead", max_horizon_days),
                ));
            }
            Ok(FieldValue::Date(date))
        }
        FieldKind::Media => {
            let (url, key) = input.split_once('|').ok_or_else(|| {
                ValidationError::invalid_format(field, "expected a resolved 'url|key' media pair")
            })?;
            let (url, key) = (url.trim(), key.trim());
            if url.is_empty() || key.is_empty() || !url.starts_with("http") {
                return Err(ValidationError::invalid_format(
                    field,
                    "expected a resolved 'url|key' media pair",
                ));
            }
            Ok(FieldValue::Media(MediaRef {
                url: url.to_string(),
                key: key.to_string(),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &'static str, kind: FieldKind) -> FieldSpec {
        FieldSpec::new(name, kind, "prompt")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
    }

    #[test]
    fn text_accepts_trimmed_value() {
        let spec = spec("full_name", FieldKind::Text { min_len: 1, max_len: 200 });
        let value = validate(&spec, "  Jane Doe  ").unwrap();
        assert_eq!(value, FieldValue::Text("Jane Doe".to_string()));
    }

    #[test]
    fn text_rejects_empty_input() {
        let spec = spec("full_name", FieldKind::Text { min_len: 1, max_len: 200 });
        let err = validate(&spec, "   ").unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField { .. }));
        assert_eq!(err.field(), "full_name");
    }

    #[test]
    fn text_enforces_minimum_length() {
        let spec = spec("password", FieldKind::Text { min_len: 8, max_len: 64 });
        assert!(validate(&spec, "short").is_err());
        assert!(validate(&spec, "Secret12").is_ok());
    }

    #[test]
    fn integer_parses_within_bounds() {
        let spec = spec("quantity", FieldKind::Integer { min: 1, max: 100000 });
        assert_eq!(validate(&spec, "40").unwrap(), FieldValue::Integer(40));
    }

    #[test]
    fn integer_rejects_negative_quantity() {
        let spec = spec("quantity", FieldKind::Integer { min: 1, max: 100000 });
        let err = validate(&spec, "-5").unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn integer_rejects_garbage() {
        let spec = spec("quantity", FieldKind::Integer { min: 1, max: 100000 });
        let err = validate(&spec, "forty").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn decimal_accepts_comma_separator() {
        let spec = spec("weight", FieldKind::Decimal { min: 0.0, max: 2000.0 });
        assert_eq!(validate(&spec, "450,5").unwrap(), FieldValue::Decimal(450.5));
    }

    #[test]
    fn decimal_rejects_out_of_range() {
        let spec = spec("weight", FieldKind::Decimal { min: 0.0, max: 2000.0 });
        assert!(validate(&spec, "2500").is_err());
    }

    #[test]
    fn choice_matches_case_insensitively_and_canonicalizes() {
        let spec = spec("category", FieldKind::Choice(&["cattle", "dairy", "sheep"]));
        assert_eq!(
            validate(&spec, "Dairy").unwrap(),
            FieldValue::Choice("dairy".to_string())
        );
    }

    #[test]
    fn choice_rejects_unknown_option_listing_alternatives() {
        let spec = spec("category", FieldKind::Choice(&["cattle", "dairy"]));
        let err = validate(&spec, "pigs").unwrap_err();
        assert!(err.to_string().contains("cattle, dairy"));
    }

    #[test]
    fn phone_accepts_e164_and_strips_separators() {
        let spec = spec("phone", FieldKind::Phone);
        assert_eq!(
            validate(&spec, "+7 (999) 123-45-67").unwrap(),
            FieldValue::Phone("+79991234567".to_string())
        );
    }

    #[test]
    fn phone_rejects_missing_plus() {
        let spec = spec("phone", FieldKind::Phone);
        assert!(validate(&spec, "79991234567").is_err());
    }

    #[test]
    fn phone_rejects_leading_zero() {
        let spec = spec("phone", FieldKind::Phone);
        assert!(validate(&spec, "+09991234567").is_err());
    }

    #[test]
    fn email_lowercases_and_accepts_valid_address() {
        let spec = spec("email", FieldKind::Email);
        assert_eq!(
            validate(&spec, "Buyer@X.Com").unwrap(),
            FieldValue::Email("buyer@x.com".to_string())
        );
    }

    #[test]
    fn email_rejects_missing_domain() {
        let spec = spec("email", FieldKind::Email);
        assert!(validate(&spec, "buyer@").is_err());
        assert!(validate(&spec, "buyer.example.com").is_err());
    }

    #[test]
    fn date_accepts_future_within_horizon() {
        let spec = spec("deadline", FieldKind::Date { max_horizon_days: 90 });
        let value = validate_at(&spec, "2026-09-30", today()).unwrap();
        assert_eq!(
            value,
            FieldValue::Date(NaiveDate::from_ymd_opt(2026, 9, 30).unwrap())
        );
    }

    #[test]
    fn date_rejects_past() {
        let spec = spec("deadline", FieldKind::Date { max_horizon_days: 90 });
        assert!(validate_at(&spec, "2026-08-01", today()).is_err());
    }

    #[test]
    fn date_rejects_beyond_horizon() {
        let spec = spec("deadline", FieldKind::Date { max_horizon_days: 90 });
        assert!(validate_at(&spec, "2027-01-01", today()).is_err());
    }

    #[test]
    fn date_accepts_today_and_horizon_boundary() {
        let spec = spec("deadline", FieldKind::Date { max_horizon_days: 90 });
        assert!(validate_at(&spec, "2026-08-24", today()).is_ok());
        // exactly 90 days out
        assert!(validate_at(&spec, "2026-11-22", today()).is_ok());
    }

    #[test]
    fn date_rejects_malformed_string() {
        let spec = spec("deadline", FieldKind::Date { max_horizon_days: 90 });
        assert!(validate_at(&spec, "next tuesday", today()).is_err());
    }

    #[test]
    fn media_parses_resolved_pair() {
        let spec = spec("photo", FieldKind::Media);
        let value = validate(&spec, "https://cdn.example/a.jpg|photos/a").unwrap();
        assert_eq!(
            value.as_media().unwrap().key,
            "photos/a".to_string()
        );
    }

    #[test]
    fn media_rejects_unresolved_input() {
        let spec = spec("photo", FieldKind::Media);
        assert!(validate(&spec, "a.jpg").is_err());
        assert!(validate(&spec, "ftp://x|key").is_err());
    }
}

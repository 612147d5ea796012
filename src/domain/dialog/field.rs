//! Field specifications and typed answer values.
//!
//! A `FieldSpec` describes one question in a flow: what to ask, how to
//! validate the answer, whether it may be skipped, and how it affects the
//! path through the flow. A `FieldValue` is a validated, typed answer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Collected answers of a session, keyed by field name.
pub type Answers = BTreeMap<String, FieldValue>;

/// Where the flow goes after a branch rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jump {
    /// Continue at the named field.
    To(&'static str),
    /// Finish the flow immediately.
    End,
}

/// Deterministic branch rule: a pure function of the answers collected so
/// far. `None` falls through to the next field in sequence.
pub type BranchFn = fn(&Answers) -> Option<Jump>;

/// The expected type of a field's answer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free text, non-empty after trimming, with length bounds.
    Text { min_len: usize, max_len: usize },
    /// Integer within an inclusive range.
    Integer { min: i64, max: i64 },
    /// Decimal number within an inclusive range.
    Decimal { min: f64, max: f64 },
    /// One of a fixed set of options (case-insensitive match).
    Choice(&'static [&'static str]),
    /// E.164-like phone number.
    Phone,
    /// RFC-shaped email address.
    Email,
    /// ISO date, not in the past, within a horizon measured in days.
    Date { max_horizon_days: i64 },
    /// Already-resolved media reference in `url|key` form.
    Media,
}

/// A reference to media already uploaded through the media sink.
///
/// The dialog core never touches the bytes; by the time a media field is
/// validated the transport has resolved the upload to a (url, key) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub url: String,
    pub key: String,
}

/// A single validated answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Choice(String),
    Phone(String),
    Email(String),
    Date(NaiveDate),
    Media(MediaRef),
    /// A skipped optional field. Advances the cursor like any other answer.
    Absent,
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) | FieldValue::Phone(s)
            | FieldValue::Email(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            FieldValue::Decimal(n) => Some(*n),
            FieldValue::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_media(&self) -> Option<&MediaRef> {
        match self {
            FieldValue::Media(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) | FieldValue::Phone(s)
            | FieldValue::Email(s) => write!(f, "{}", s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Decimal(n) => write!(f, "{}", n),
            FieldValue::Date(d) => write!(f, "{}", d),
            FieldValue::Media(m) => write!(f, "{}", m.url),
            FieldValue::Absent => write!(f, "-"),
        }
    }
}

/// One question of a flow.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
    prompt: &'static str,
    optional: bool,
    confirms: Option<&'static str>,
    branch: Option<BranchFn>,
}

impl FieldSpec {
    pub fn new(name: &'static str, kind: FieldKind, prompt: &'static str) -> Self {
        Self {
            name,
            kind,
            prompt,
            optional: false,
            confirms: None,
            branch: None,
        }
    }

    /// Marks the field skippable; a skip records `FieldValue::Absent`.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Requires the answer to equal the named earlier field's answer.
    ///
    /// On mismatch the engine rewinds the cursor back to that field.
    pub fn confirms(mut self, target: &'static str) -> Self {
        self.confirms = Some(target);
        self
    }

    /// Attaches a branch rule evaluated after this field is answered.
    pub fn branch(mut self, rule: BranchFn) -> Self {
        self.branch = Some(rule);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn prompt(&self) -> &'static str {
        self.prompt
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn confirms_field(&self) -> Option<&'static str> {
        self.confirms
    }

    pub fn branch_rule(&self) -> Option<BranchFn> {
        self.branch
    }

    /// Button choices to offer alongside the prompt, if any.
    pub fn choices(&self) -> Vec<String> {
        match &self.kind {
            FieldKind::Choice(options) => options.iter().map(|o| o.to_string()).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_spec_defaults_to_required() {
        let spec = FieldSpec::new(
            "region",
            FieldKind::Text { min_len: 1, max_len: 100 },
            "Which region are you in?",
        );
        assert!(!spec.is_optional());
        assert!(spec.confirms_field().is_none());
        assert!(spec.branch_rule().is_none());
    }

    #[test]
    fn field_spec_builders_set_flags() {
        let spec = FieldSpec::new(
            "password_confirm",
            FieldKind::Text { min_len: 8, max_len: 64 },
            "Re-enter your password",
        )
        .confirms("password");
        assert_eq!(spec.confirms_field(), Some("password"));
    }

    #[test]
    fn choice_kind_exposes_options_as_choices() {
        let spec = FieldSpec::new(
            "category",
            FieldKind::Choice(&["cattle", "sheep"]),
            "Pick a category",
        );
        assert_eq!(spec.choices(), vec!["cattle".to_string(), "sheep".to_string()]);
    }

    #[test]
    fn non_choice_kind_has_no_choices() {
        let spec = FieldSpec::new("phone", FieldKind::Phone, "Your phone?");
        assert!(spec.choices().is_empty());
    }

    #[test]
    fn field_value_accessors_match_variants() {
        assert_eq!(FieldValue::Integer(40).as_integer(), Some(40));
        assert_eq!(FieldValue::Text("x".into()).as_integer(), None);
        assert_eq!(FieldValue::Integer(40).as_decimal(), Some(40.0));
        assert!(FieldValue::Absent.is_absent());
    }

    #[test]
    fn field_value_serializes_with_type_tag() {
        let json = serde_json::to_string(&FieldValue::Integer(150000)).unwrap();
        assert!(json.contains("integer"));
        assert!(json.contains("150000"));
    }

    #[test]
    fn media_ref_roundtrips_through_json() {
        let value = FieldValue::Media(MediaRef {
            url: "https://cdn.example/photo.jpg".into(),
            key: "photos/abc".into(),
        });
        let json = serde_json::to_string(&value).unwrap();
        let back: FieldValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}

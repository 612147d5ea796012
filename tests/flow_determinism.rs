//! Property test: flows are deterministic.
//!
//! For any dialog kind and any sequence of answers, replaying the same
//! answers from a fresh session walks the same fields in the same order
//! and collects the same answer map. Branch rules are pure functions of
//! the answers, so this must hold regardless of what the answers are.

use chrono::NaiveDate;
use proptest::prelude::*;

use herdlink::domain::dialog::{
    flows, Answers, DialogSession, FieldKind, FieldValue, MediaRef,
};
use herdlink::domain::foundation::{DialogKind, UserId};

/// Derives a value of the right shape for a field from one random pick.
fn value_for(kind: &FieldKind, pick: u32) -> FieldValue {
    match kind {
        FieldKind::Text { min_len, .. } => {
            FieldValue::Text("a".repeat((*min_len).max(1)) + &pick.to_string())
        }
        FieldKind::Integer { min, .. } => FieldValue::Integer(min + i64::from(pick % 100)),
        FieldKind::Decimal { min, .. } => FieldValue::Decimal(min + f64::from(pick % 100)),
        FieldKind::Choice(options) => {
            FieldValue::Choice(options[pick as usize % options.len()].to_string())
        }
        FieldKind::Phone => FieldValue::Phone(format!("+7999{:07}", pick % 10_000_000)),
        FieldKind::Email => FieldValue::Email(format!("user{}@example.com", pick)),
        FieldKind::Date { max_horizon_days } => {
            let base = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
            let offset = i64::from(pick) % (*max_horizon_days).max(1);
            FieldValue::Date(base + chrono::Duration::days(offset))
        }
        FieldKind::Media => FieldValue::Media(MediaRef {
            url: format!("https://cdn.example/{}.jpg", pick),
            key: format!("photos/{}", pick),
        }),
    }
}

/// Runs one flow with answers derived from `picks`; returns the visited
/// field names and the final answers.
fn run(kind: DialogKind, picks: &[u32]) -> (Vec<&'static str>, Answers) {
    let flow = flows::flow_for(kind);
    let mut session =
        DialogSession::start(flow, UserId::new("prop-user").unwrap(), Answers::new());
    let mut visited = Vec::new();

    for pick in picks {
        let Some(spec) = session.current_field(flow) else {
            break;
        };
        visited.push(spec.name());
        let value = value_for(spec.kind(), *pick);
        session = session.advance(flow, value).expect("live session advances");
    }
    (visited, session.answers().clone())
}

proptest! {
    #[test]
    fn replaying_the_same_answers_walks_the_same_path(
        kind_index in 0usize..5,
        picks in proptest::collection::vec(any::<u32>(), 0..12),
    ) {
        let kind = DialogKind::all()[kind_index];

        let (path_a, answers_a) = run(kind, &picks);
        let (path_b, answers_b) = run(kind, &picks);

        prop_assert_eq!(path_a, path_b);
        prop_assert_eq!(answers_a, answers_b);
    }

    #[test]
    fn every_flow_terminates_within_its_field_count(
        kind_index in 0usize..5,
        picks in proptest::collection::vec(any::<u32>(), 16..24),
    ) {
        let kind = DialogKind::all()[kind_index];
        let flow = flows::flow_for(kind);

        // More answers than fields: the walk must hit the terminal state
        // before running out of picks, never loop.
        let (path, _) = run(kind, &picks);
        prop_assert!(path.len() <= flow.len());
    }
}

//! The built-in flows, one per dialog kind.
//!
//! Flow schemas are process-wide constants. Prompts are written for the
//! chat transport; the transport renders `choices()` as buttons.

use once_cell::sync::Lazy;

use crate::domain::foundation::DialogKind;

use super::field::{Answers, FieldKind, FieldSpec, FieldValue, Jump};
use super::flow::FlowDefinition;

/// Livestock categories shared by the offer and request flows.
pub const CATEGORIES: &[&str] = &["cattle", "dairy", "sheep", "goats", "horses"];

/// Profile fields a user may edit.
pub const EDITABLE_FIELDS: &[&str] = &["full_name", "phone", "region"];

fn after_price(answers: &Answers) -> Option<Jump> {
    // Dairy sellers are asked for milk yield; everyone else goes straight
    // to the region question.
    match answers.get("category").and_then(FieldValue::as_text) {
        Some("dairy") => Some(Jump::To("milk_yield")),
        _ => Some(Jump::To("region")),
    }
}

fn after_edit_choice(answers: &Answers) -> Option<Jump> {
    match answers.get("field").and_then(FieldValue::as_text) {
        Some("full_name") => Some(Jump::To("new_full_name")),
        Some("phone") => Some(Jump::To("new_phone")),
        Some("region") => Some(Jump::To("new_region")),
        _ => None,
    }
}

fn end_flow(_: &Answers) -> Option<Jump> {
    Some(Jump::End)
}

static REGISTRATION: Lazy<FlowDefinition> = Lazy::new(|| {
    FlowDefinition::new(
        DialogKind::Registration,
        vec![
            FieldSpec::new("email", FieldKind::Email, "Enter your email address"),
            FieldSpec::new(
                "password",
                FieldKind::Text { min_len: 8, max_len: 64 },
                "Choose a password (at least 8 characters)",
            ),
            FieldSpec::new(
                "password_confirm",
                FieldKind::Text { min_len: 8, max_len: 64 },
                "Re-enter your password",
            )
            .confirms("password"),
            FieldSpec::new(
                "full_name",
                FieldKind::Text { min_len: 1, max_len: 200 },
                "What is your full name?",
            ),
            FieldSpec::new("phone", FieldKind::Phone, "Your contact phone number?"),
            FieldSpec::new(
                "mercury_number",
                FieldKind::Text { min_len: 6, max_len: 32 },
                "Your Mercury registration number (or skip)",
            )
            .optional(),
            FieldSpec::new(
                "region",
                FieldKind::Text { min_len: 1, max_len: 100 },
                "Which region are you in?",
            ),
        ],
    )
});

static OFFER_CREATION: Lazy<FlowDefinition> = Lazy::new(|| {
    FlowDefinition::new(
        DialogKind::OfferCreation,
        vec![
            FieldSpec::new(
                "category",
                FieldKind::Choice(CATEGORIES),
                "What kind of livestock are you selling?",
            ),
            FieldSpec::new(
                "breed",
                FieldKind::Text { min_len: 1, max_len: 100 },
                "Which breed?",
            ),
            FieldSpec::new(
                "quantity",
                FieldKind::Integer { min: 1, max: 100_000 },
                "How many head are available?",
            ),
            FieldSpec::new(
                "price_per_head",
                FieldKind::Integer { min: 1, max: 100_000_000 },
                "Price per head?",
            )
            .branch(after_price),
            FieldSpec::new(
                "milk_yield",
                FieldKind::Integer { min: 1, max: 100 },
                "Average milk yield, litres per day?",
            ),
            FieldSpec::new(
                "region",
                FieldKind::Text { min_len: 1, max_len: 100 },
                "Where is the herd located?",
            ),
            FieldSpec::new("photo", FieldKind::Media, "Attach a photo (or skip)").optional(),
        ],
    )
});

static REQUEST_CREATION: Lazy<FlowDefinition> = Lazy::new(|| {
    FlowDefinition::new(
        DialogKind::RequestCreation,
        vec![
            FieldSpec::new(
                "category",
                FieldKind::Choice(CATEGORIES),
                "What kind of livestock are you looking for?",
            ),
            FieldSpec::new(
                "quantity",
                FieldKind::Integer { min: 1, max: 100_000 },
                "How many head do you need?",
            ),
            FieldSpec::new(
                "max_price",
                FieldKind::Integer { min: 1, max: 100_000_000 },
                "Maximum price per head (or skip)",
            )
            .optional(),
            FieldSpec::new(
                "region",
                FieldKind::Text { min_len: 1, max_len: 100 },
                "Preferred region?",
            ),
            FieldSpec::new(
                "deadline",
                FieldKind::Date { max_horizon_days: 90 },
                "By when do you need delivery? (YYYY-MM-DD)",
            ),
            FieldSpec::new(
                "comment",
                FieldKind::Text { min_len: 1, max_len: 500 },
                "Anything else sellers should know? (or skip)",
            )
            .optional(),
        ],
    )
});

static PROFILE_EDIT: Lazy<FlowDefinition> = Lazy::new(|| {
    FlowDefinition::new(
        DialogKind::ProfileEdit,
        vec![
            FieldSpec::new(
                "field",
                FieldKind::Choice(EDITABLE_FIELDS),
                "Which profile field do you want to change?",
            )
            .branch(after_edit_choice),
            FieldSpec::new(
                "new_full_name",
                FieldKind::Text { min_len: 1, max_len: 200 },
                "New full name?",
            )
            .branch(end_flow),
            FieldSpec::new("new_phone", FieldKind::Phone, "New phone number?").branch(end_flow),
            FieldSpec::new(
                "new_region",
                FieldKind::Text { min_len: 1, max_len: 100 },
                "New region?",
            ),
        ],
    )
});

static CONTACT_COMMENT: Lazy<FlowDefinition> = Lazy::new(|| {
    FlowDefinition::new(
        DialogKind::ContactComment,
        vec![FieldSpec::new(
            "comment",
            FieldKind::Text { min_len: 1, max_len: 500 },
            "Add a comment for the seller (or skip)",
        )
        .optional()],
    )
});

/// Returns the process-wide flow definition for a dialog kind.
pub fn flow_for(kind: DialogKind) -> &'static FlowDefinition {
    match kind {
        DialogKind::Registration => &REGISTRATION,
        DialogKind::OfferCreation => &OFFER_CREATION,
        DialogKind::RequestCreation => &REQUEST_CREATION,
        DialogKind::ProfileEdit => &PROFILE_EDIT,
        DialogKind::ContactComment => &CONTACT_COMMENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_dialog_kind_has_a_flow() {
        for kind in DialogKind::all() {
            let flow = flow_for(kind);
            assert_eq!(flow.kind(), kind);
            assert!(!flow.is_empty());
        }
    }

    #[test]
    fn registration_asks_seven_fields_in_order() {
        let flow = flow_for(DialogKind::Registration);
        let names: Vec<_> = (0..flow.len())
            .filter_map(|i| flow.field_at(i).map(|f| f.name()))
            .collect();
        assert_eq!(
            names,
            vec![
                "email",
                "password",
                "password_confirm",
                "full_name",
                "phone",
                "mercury_number",
                "region"
            ]
        );
    }

    #[test]
    fn registration_confirm_targets_password() {
        let flow = flow_for(DialogKind::Registration);
        let confirm = flow.field("password_confirm").unwrap();
        assert_eq!(confirm.confirms_field(), Some("password"));
    }

    #[test]
    fn mercury_number_is_the_only_optional_registration_field() {
        let flow = flow_for(DialogKind::Registration);
        for i in 0..flow.len() {
            let field = flow.field_at(i).unwrap();
            assert_eq!(field.is_optional(), field.name() == "mercury_number");
        }
    }

    #[test]
    fn offer_flow_branches_to_milk_yield_for_dairy() {
        let flow = flow_for(DialogKind::OfferCreation);
        let price_pos = flow.position("price_per_head").unwrap();

        let mut answers = Answers::new();
        answers.insert("category".to_string(), FieldValue::Choice("dairy".to_string()));
        assert_eq!(
            flow.next_position(price_pos, &answers),
            flow.position("milk_yield")
        );

        answers.insert("category".to_string(), FieldValue::Choice("cattle".to_string()));
        assert_eq!(
            flow.next_position(price_pos, &answers),
            flow.position("region")
        );
    }

    #[test]
    fn profile_edit_branches_to_exactly_one_field_then_ends() {
        let flow = flow_for(DialogKind::ProfileEdit);

        let mut answers = Answers::new();
        answers.insert("field".to_string(), FieldValue::Choice("phone".to_string()));
        let next = flow.next_position(0, &answers).unwrap();
        assert_eq!(flow.field_at(next).unwrap().name(), "new_phone");

        answers.insert("new_phone".to_string(), FieldValue::Phone("+79991234567".to_string()));
        assert_eq!(flow.next_position(next, &answers), None);
    }

    #[test]
    fn contact_comment_is_a_single_optional_step() {
        let flow = flow_for(DialogKind::ContactComment);
        assert_eq!(flow.len(), 1);
        assert!(flow.field_at(0).unwrap().is_optional());
        assert_eq!(flow.next_position(0, &Answers::new()), None);
    }

    // One answer set per choice option in the flow, plus the empty set, so
    // every arm of every branch rule gets evaluated.
    fn branch_inputs(flow: &FlowDefinition) -> Vec<Answers> {
        let mut inputs = vec![Answers::new()];
        for i in 0..flow.len() {
            let field = flow.field_at(i).unwrap();
            if let FieldKind::Choice(options) = field.kind() {
                for option in *options {
                    let mut answers = Answers::new();
                    answers.insert(
                        field.name().to_string(),
                        FieldValue::Choice(option.to_string()),
                    );
                    inputs.push(answers);
                }
            }
        }
        inputs
    }

    #[test]
    fn every_branch_target_resolves_in_its_flow() {
        for kind in DialogKind::all() {
            let flow = flow_for(kind);
            for pos in 0..flow.len() {
                let field = flow.field_at(pos).unwrap();
                let Some(rule) = field.branch_rule() else {
                    continue;
                };
                for answers in branch_inputs(flow) {
                    if let Some(Jump::To(target)) = rule(&answers) {
                        assert!(
                            flow.position(target).is_some(),
                            "{} field '{}' jumps to unknown field '{}'",
                            kind,
                            field.name(),
                            target
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn request_deadline_uses_ninety_day_horizon() {
        let flow = flow_for(DialogKind::RequestCreation);
        match flow.field("deadline").unwrap().kind() {
            FieldKind::Date { max_horizon_days } => assert_eq!(*max_horizon_days, 90),
            other => panic!("deadline should be a date field, got {:?}", other),
        }
    }
}

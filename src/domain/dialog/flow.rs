//! Flow definitions: the ordered, optionally-branching schema of a dialog.
//!
//! A `FlowDefinition` is immutable and process-wide. Branch rules are pure
//! functions of collected answers, so replaying the same answer sequence
//! always takes the same path through the flow.

use crate::domain::foundation::DialogKind;

use super::field::{Answers, FieldSpec, Jump};

/// The ordered field schema for one dialog kind.
#[derive(Debug, Clone)]
pub struct FlowDefinition {
    kind: DialogKind,
    fields: Vec<FieldSpec>,
}

impl FlowDefinition {
    /// Builds a flow definition, checking schema consistency.
    ///
    /// # Panics
    ///
    /// Panics if field names repeat or a `confirms` target does not name an
    /// earlier field. Flows are compiled-in constants, so a broken schema
    /// is a programmer error caught at startup.
    pub fn new(kind: DialogKind, fields: Vec<FieldSpec>) -> Self {
        assert!(!fields.is_empty(), "flow {} has no fields", kind);
        for (i, field) in fields.iter().enumerate() {
            assert!(
                fields[..i].iter().all(|f| f.name() != field.name()),
                "flow {} repeats field '{}'",
                kind,
                field.name()
            );
            if let Some(target) = field.confirms_field() {
                assert!(
                    fields[..i].iter().any(|f| f.name() == target),
                    "flow {} field '{}' confirms unknown earlier field '{}'",
                    kind,
                    field.name(),
                    target
                );
            }
        }
        Self { kind, fields }
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the field at a cursor position.
    pub fn field_at(&self, position: usize) -> Option<&FieldSpec> {
        self.fields.get(position)
    }

    /// Returns the field with the given name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns the cursor position of the named field.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    /// Computes the cursor position after answering the field at `current`.
    ///
    /// Applies the answered field's branch rule if it has one; otherwise
    /// falls through to the next field in sequence. `None` means the flow
    /// is complete.
    pub fn next_position(&self, current: usize, answers: &Answers) -> Option<usize> {
        let field = self.fields.get(current)?;
        if let Some(rule) = field.branch_rule() {
            match rule(answers) {
                Some(Jump::To(name)) => {
                    let target = self.position(name);
                    debug_assert!(
                        target.is_some(),
                        "flow {} branch jumps to unknown field '{}'",
                        self.kind,
                        name
                    );
                    return target;
                }
                Some(Jump::End) => return None,
                None => {}
            }
        }
        let next = current + 1;
        if next < self.fields.len() {
            Some(next)
        } else {
            None
        }
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One rejected field of a submitted message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Wire-level path of the offending field, e.g. `children[1].nationalId`.
    pub field: String,
    pub reason: String,
    pub rejected_value: Value,
}

impl Violation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>, rejected_value: Value) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
            rejected_value,
        }
    }
}

/// The complete set of violations found in one message.
///
/// Validation never stops at the first problem; every check appends here and
/// the caller gets all violations in one error value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        if !self.0.contains(&violation) {
            self.0.push(violation);
        }
    }

    pub fn extend(&mut self, other: Violations) {
        for violation in other.0 {
            self.push(violation);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// `Ok(())` when no checks failed, otherwise the full set as one error.
    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|v| v.field.as_str()).collect();
        write!(f, "{} invalid field(s): {}", self.0.len(), fields.join(", "))
    }
}

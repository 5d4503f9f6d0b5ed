// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job requirement checklists.

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a checklist item within a job.
    pub struct ChecklistItemId("chk-");
}

/// One requirement on a job's checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub label: String,
    /// Required items count toward the completion rate; optional ones do not.
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ChecklistItem {
    pub fn required(label: impl Into<String>) -> Self {
        Self {
            id: ChecklistItemId::new(),
            label: label.into(),
            required: true,
            completed: false,
            note: None,
        }
    }

    pub fn optional(label: impl Into<String>) -> Self {
        Self { required: false, ..Self::required(label) }
    }

    pub fn done(mut self) -> Self {
        self.completed = true;
        self
    }
}

/// Fraction of required items completed, in `[0.0, 1.0]`.
///
/// A checklist with no required items counts as fully complete.
pub fn required_completion_rate(items: &[ChecklistItem]) -> f64 {
    let required: Vec<_> = items.iter().filter(|i| i.required).collect();
    if required.is_empty() {
        return 1.0;
    }
    let completed = required.iter().filter(|i| i.completed).count();
    completed as f64 / required.len() as f64
}

#[cfg(test)]
#[path = "checklist_tests.rs"]
mod tests;

// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Candidate validation and the rejection taxonomy
//!
//! Every add or edit passes three checks in order:
//! 1. The text must not be empty
//! 2. The injected validation rule, if any, must accept it
//! 3. Unless duplicates are allowed, no other item may be equal to it
//!
//! Rejections are values, never panics. Callers that don't care can drop
//! the `Err` and get the silent no-op behaviour.

use std::rc::Rc;
use thiserror::Error;

use crate::core::types::Capability;

/// Injected validation rule: `Err(reason)` rejects the candidate
pub type ValidationRule = Rc<dyn Fn(&str) -> Result<(), String>>;

/// Why a controller operation did not happen
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Rejection {
    /// Candidate text is empty
    #[error("Text is empty")]
    Empty,

    /// The validation rule rejected the candidate (reason may be empty)
    #[error("{0}")]
    Invalid(String),

    /// Duplicates are disallowed and the text is already present
    #[error("'{0}' is already in the list.")]
    Duplicate(String),

    /// The governing capability flag is off
    #[error("The {0} action is not enabled")]
    CapabilityDisabled(Capability),

    /// No item at this position
    #[error("No item at index {0}")]
    InvalidIndex(usize),

    /// Draft operation without an open draft
    #[error("No add or edit in progress")]
    NoDraft,

    /// Commit requested while the draft is empty or invalid
    #[error("The current text cannot be saved")]
    DraftNotValid,

    /// Move past the first or last position
    #[error("Item is already at the edge of the list")]
    AtBoundary,
}

impl Rejection {
    /// Message suitable for an inline error label
    ///
    /// `Empty` yields an empty message, everything else its display text.
    pub fn reason(&self) -> String {
        match self {
            Rejection::Empty => String::new(),
            other => other.to_string(),
        }
    }
}

/// Validates `text` against `rule` and the `existing` items
///
/// # Arguments
///
/// * `text` - Candidate value
/// * `rule` - Optional validation rule
/// * `allow_duplicates` - Skip the duplicate check entirely
/// * `existing` - Items to compare against
/// * `exclude` - Index in `existing` to skip (the item being edited)
pub fn validate_candidate(
    text: &str,
    rule: Option<&ValidationRule>,
    allow_duplicates: bool,
    existing: &[String],
    exclude: Option<usize>,
) -> Result<(), Rejection> {
    if text.is_empty() {
        return Err(Rejection::Empty);
    }

    if let Some(rule) = rule {
        rule(text).map_err(Rejection::Invalid)?;
    }

    if !allow_duplicates {
        let clash = existing
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != exclude)
            .any(|(_, item)| item == text);
        if clash {
            return Err(Rejection::Duplicate(text.to_string()));
        }
    }

    Ok(())
}

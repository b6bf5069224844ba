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

//! Plain data types shared by the list model and its presentation
//!
//! Nothing in here knows about GTK. The capability flags and action text
//! are serialisable so an application can ship editor presets as JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One class of mutation that can be switched on or off
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Capability {
    /// Interactive add (the programmatic `add_string` is always available)
    Add,
    /// Interactive edit of an existing item
    Edit,
    /// Removing a single item
    Remove,
    /// Removing every item at once
    Clear,
    /// Manual ordering via move buttons or drag-and-drop
    Reorder,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Add => write!(f, "add"),
            Capability::Edit => write!(f, "edit"),
            Capability::Remove => write!(f, "remove"),
            Capability::Clear => write!(f, "clear"),
            Capability::Reorder => write!(f, "reorder"),
        }
    }
}

/// Independent switches gating each class of mutation
///
/// Everything is off by default, so a freshly created editor is a
/// read-only, auto-sorted list.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Capabilities {
    pub allow_add: bool,
    pub allow_edit: bool,
    pub allow_remove: bool,
    pub allow_clear: bool,
    pub allow_reorder: bool,
    pub allow_duplicates: bool,
}

impl Capabilities {
    /// Returns whether the given capability is switched on
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Add => self.allow_add,
            Capability::Edit => self.allow_edit,
            Capability::Remove => self.allow_remove,
            Capability::Clear => self.allow_clear,
            Capability::Reorder => self.allow_reorder,
        }
    }
}

/// Human-readable labels for the editor's actions
///
/// Only the presentation layer reads these (tooltips, edit page title and
/// hint). The model stores them so one call configures both flag and text.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ActionText {
    pub add_action: String,
    pub add_hint: String,
    pub edit_action: String,
    pub edit_hint: String,
    pub remove_action: String,
    pub clear_action: String,
}

impl Default for ActionText {
    fn default() -> Self {
        Self {
            add_action: "Add".to_string(),
            add_hint: String::new(),
            edit_action: "Edit".to_string(),
            edit_hint: String::new(),
            remove_action: "Remove".to_string(),
            clear_action: "Remove all".to_string(),
        }
    }
}

/// Direction for a single-step move
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// What the current draft will do when committed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DraftTarget {
    /// Append a new item
    Add,
    /// Replace the item at this index
    Edit(usize),
}

/// Live validity of the text being composed
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DraftStatus {
    /// Blank after trimming: neither valid nor invalid, nothing to show
    Empty,
    /// Can be committed
    Valid,
    /// Rejected, with a message for the error label (may be empty)
    Invalid(String),
}

impl DraftStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, DraftStatus::Valid)
    }

    /// Message to display under the entry, if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            DraftStatus::Invalid(reason) => Some(reason.as_str()),
            _ => None,
        }
    }
}

/// Sort mode that can be named in an options file
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Case-insensitive lexicographic
    #[default]
    Alphabetical,
    /// Keep insertion order
    None,
}

/// Serialisable editor preset
///
/// # Example
///
/// ```
/// use xapp_widgets::core::EditorOptions;
///
/// let options: EditorOptions = serde_json::from_str(
///     r#"{ "capabilities": { "allow_add": true }, "sort": "none" }"#,
/// ).unwrap();
/// assert!(options.capabilities.allow_add);
/// assert!(!options.capabilities.allow_remove);
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct EditorOptions {
    pub capabilities: Capabilities,
    pub text: ActionText,
    pub sort: SortMode,
}

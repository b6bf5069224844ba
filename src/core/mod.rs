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

//! src/core/mod.rs
//!
//! Core list-editing logic
//!
//! This module contains the state behind the list editor widget:
//! - Type definitions for capabilities, drafts and editor presets
//! - The list model controller (validation, auto-sort, reordering)
//! - Stable sorting with a fallback key
//! - Toolbar visibility/sensitivity rules
//!
//! All of it is isolated from GTK so it can be unit tested without a
//! display server.

pub mod list_model;
pub mod sorting;
pub mod toolbar;
pub mod types;
pub mod validator;

pub use list_model::{HandlerId, ListModel};
pub use sorting::{SortKey, SortKeyError, SortPolicy};
pub use toolbar::{ControlState, ToolbarState};
pub use types::*;
pub use validator::{validate_candidate, Rejection, ValidationRule};

#[cfg(test)]
mod tests;

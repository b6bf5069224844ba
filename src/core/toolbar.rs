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

//! Visibility and sensitivity of the list editor's toolbar
//!
//! The view only copies these booleans onto its buttons; all the rules
//! live here so they can be tested without a display.

use crate::core::types::Capabilities;

/// Visible / sensitive pair for one control
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ControlState {
    pub visible: bool,
    pub sensitive: bool,
}

/// State of every toolbar control
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ToolbarState {
    /// Whole toolbar (hidden when no control is visible)
    pub toolbar_visible: bool,
    pub add: ControlState,
    pub edit: ControlState,
    pub remove: ControlState,
    pub move_up: ControlState,
    pub move_down: ControlState,
    pub clear: ControlState,
}

impl ToolbarState {
    /// Derives the toolbar from flags, list length and current selection
    ///
    /// A selection past the end of the list counts as no selection.
    pub fn compute(capabilities: &Capabilities, len: usize, selection: Option<usize>) -> Self {
        let selection = selection.filter(|&index| index < len);
        let has_selection = selection.is_some();

        let reorder_at = |ok: fn(usize, usize) -> bool| {
            capabilities.allow_reorder && selection.is_some_and(|index| ok(index, len))
        };

        let add = ControlState {
            visible: capabilities.allow_add,
            sensitive: true,
        };
        let edit = ControlState {
            visible: capabilities.allow_edit,
            sensitive: has_selection,
        };
        let remove = ControlState {
            visible: capabilities.allow_remove,
            sensitive: has_selection,
        };
        let move_up = ControlState {
            visible: capabilities.allow_reorder,
            sensitive: reorder_at(|index, _| index > 0),
        };
        let move_down = ControlState {
            visible: capabilities.allow_reorder,
            sensitive: reorder_at(|index, len| index + 1 < len),
        };
        let clear = ControlState {
            visible: capabilities.allow_clear,
            sensitive: len > 0,
        };

        Self {
            toolbar_visible: add.visible
                || edit.visible
                || remove.visible
                || move_up.visible
                || clear.visible,
            add,
            edit,
            remove,
            move_up,
            move_down,
            clear,
        }
    }
}

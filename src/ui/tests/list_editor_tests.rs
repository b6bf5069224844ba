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

//! List editor lifetime tests
//!
//! Need a display; they return early when GTK cannot initialise.

use std::cell::Cell;
use std::rc::Rc;

use crate::core::ListModel;
use crate::ui::ListEditor;

#[test]
fn test_dropped_editor_releases_model() {
    if gtk4::init().is_err() {
        return;
    }

    let model = Rc::new(ListModel::with_strings(["b", "a"]));
    let editor = ListEditor::new(model.clone());
    editor.configure(|model| {
        model.set_allow_add(true, "Add", "");
        model.set_allow_remove(true, "Remove");
        model.set_allow_ordering(true);
    });
    // Rows with drag-and-drop controllers exist now
    model.set_strings(["c", "d"]);
    assert!(Rc::strong_count(&model) > 1);

    drop(editor);
    assert_eq!(
        Rc::strong_count(&model),
        1,
        "Editor must not keep its model alive"
    );

    // Remaining handlers still run; the editor's is gone
    let calls = Rc::new(Cell::new(0));
    let sink = calls.clone();
    model.connect_list_changed(move |_| sink.set(sink.get() + 1));
    model.set_strings(["e"]);
    assert_eq!(calls.get(), 1);
    assert_eq!(model.get_strings(), vec!["e"]);
}

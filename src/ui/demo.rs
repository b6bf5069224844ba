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

//! Interactive list editor demo
//!
//! A window with a [`ListEditor`] and controls for every model option,
//! used for manual testing of capability and sort combinations.

use std::rc::Rc;
use std::time::Duration;

use gtk4::prelude::*;
use gtk4::{Align, Application, ApplicationWindow, Orientation};

use crate::core::{EditorOptions, ListModel, SortKey, SortKeyError, SortMode};
use crate::ui::dialogs::show_message;
use crate::ui::ListEditor;

const SAMPLE_STRINGS: &[&str] = &["Zebra", "Apple", "Mango", "Banana", "Cherry"];

/// Sort modes offered by the demo dropdown
const SORT_MODES: &[&str] = &[
    "Alphabetical",
    "By length",
    "Reverse alphabetical",
    "No auto-sort",
];
const SORT_NONE: u32 = 3;

/// Sorts by length, then case-insensitively
pub fn length_key(item: &str) -> Result<SortKey, SortKeyError> {
    let length = i64::try_from(item.chars().count())
        .map_err(|_| SortKeyError::new(item, "too long"))?;
    Ok(SortKey::new().int(length).text(item.to_lowercase()))
}

/// Reverses case-insensitive order by mirroring Latin-1 code points
///
/// Characters outside Latin-1 fail the key, so affected items fall back
/// to the default order.
pub fn reverse_key(item: &str) -> Result<SortKey, SortKeyError> {
    let mirrored = item
        .to_lowercase()
        .chars()
        .map(|c| {
            u8::try_from(u32::from(c))
                .map(|code| char::from(255 - code))
                .map_err(|_| SortKeyError::new(item, format!("'{}' is not Latin-1", c)))
        })
        .collect::<Result<String, _>>()?;
    Ok(SortKey::from_text(mirrored))
}

/// Demo validation rule
pub fn no_r_allowed(text: &str) -> Result<(), String> {
    if text.to_lowercase().contains('r') {
        Err("There is an R in the text!!".to_string())
    } else {
        Ok(())
    }
}

/// Text of the blue info line
///
/// `sort_mode` is the dropdown label, `None` when auto-sort is off.
pub fn info_text(manual_ordering: bool, sort_mode: Option<&str>) -> String {
    match (manual_ordering, sort_mode) {
        (true, _) => "Manual ordering enabled - use drag & drop or buttons".to_string(),
        (false, None) => "Manual ordering disabled, no auto-sort".to_string(),
        (false, Some(mode)) => format!("Auto-sorted: {}", mode),
    }
}

/// Body of the "List Content" dialog
pub fn content_summary(items: &[String]) -> String {
    let body = if items.is_empty() {
        "(Empty list)".to_string()
    } else {
        items
            .iter()
            .map(|item| format!("• {}", item))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!("Current list content:\n\n{}", body)
}

fn set_colored(label: &gtk4::Label, color: &str, text: &str) {
    label.set_markup(&format!(
        "<span color=\"{}\">{}</span>",
        color,
        glib::markup_escape_text(text)
    ));
}

/// Runs the demo application until its window closes
///
/// `options` presets the model; without it every capability starts off.
pub fn run_demo(options: Option<EditorOptions>) -> glib::ExitCode {
    let app = Application::builder()
        .application_id("org.x.XApp.ListEditorDemo")
        .build();

    app.connect_activate(move |app| build_window(app, options.as_ref()));
    app.run_with_args::<&str>(&[])
}

fn build_window(app: &Application, options: Option<&EditorOptions>) {
    let model = Rc::new(ListModel::new());
    if let Some(options) = options {
        model.apply_options(options);
    }
    model.set_strings(SAMPLE_STRINGS.iter().copied());
    model.set_validation_function(no_r_allowed);

    let editor = ListEditor::new(model.clone());
    editor.widget().set_vexpand(true);
    let capabilities = model.capabilities();

    let window = ApplicationWindow::builder()
        .application(app)
        .title("XApp.widgets.ListEditor() Demo")
        .default_width(700)
        .default_height(600)
        .build();

    // Controls
    let ordering_check = gtk4::CheckButton::with_label("Allow manual ordering");
    ordering_check.set_active(capabilities.allow_reorder);

    let sort_dropdown = gtk4::DropDown::from_strings(SORT_MODES);
    let initial_sort = match options.map(|options| options.sort) {
        Some(SortMode::None) => SORT_NONE,
        _ => 0,
    };
    sort_dropdown.set_selected(initial_sort);
    sort_dropdown.set_sensitive(!capabilities.allow_reorder);

    let order_box = gtk4::Box::new(Orientation::Horizontal, 12);
    order_box.append(&ordering_check);
    order_box.append(&gtk4::Label::new(Some("Sort mode:")));
    order_box.append(&sort_dropdown);

    let duplicate_check = gtk4::CheckButton::with_label("Allow duplicates");
    duplicate_check.set_active(capabilities.allow_duplicates);

    let add_check = gtk4::CheckButton::with_label("Allow add");
    add_check.set_active(capabilities.allow_add);
    let remove_check = gtk4::CheckButton::with_label("Allow remove");
    remove_check.set_active(capabilities.allow_remove);
    let edit_check = gtk4::CheckButton::with_label("Allow edit");
    edit_check.set_active(capabilities.allow_edit);
    let clear_check = gtk4::CheckButton::with_label("Allow clear");
    clear_check.set_active(capabilities.allow_clear);

    let allow_box = gtk4::Box::new(Orientation::Horizontal, 12);
    allow_box.append(&add_check);
    allow_box.append(&remove_check);
    allow_box.append(&edit_check);
    allow_box.append(&clear_check);

    let validation_label = gtk4::Label::new(Some("Validation: No R letters allowed!"));
    validation_label.set_halign(Align::Start);

    let controls_box = gtk4::Box::new(Orientation::Vertical, 6);
    controls_box.set_margin_top(6);
    controls_box.set_margin_bottom(6);
    controls_box.set_margin_start(6);
    controls_box.set_margin_end(6);
    controls_box.append(&order_box);
    controls_box.append(&duplicate_check);
    controls_box.append(&allow_box);
    controls_box.append(&validation_label);

    let controls_frame = gtk4::Frame::new(Some("Controls"));
    controls_frame.set_child(Some(&controls_box));

    let info_label = gtk4::Label::new(None);

    let get_button = gtk4::Button::with_label("Get List Content");
    let change_label = gtk4::Label::new(None);
    change_label.set_hexpand(true);
    change_label.set_halign(Align::End);
    set_colored(&change_label, "gray", "No changes yet");

    let status_box = gtk4::Box::new(Orientation::Horizontal, 6);
    status_box.append(&get_button);
    status_box.append(&change_label);

    let main_box = gtk4::Box::new(Orientation::Vertical, 12);
    main_box.set_margin_top(12);
    main_box.set_margin_bottom(12);
    main_box.set_margin_start(12);
    main_box.set_margin_end(12);
    main_box.append(editor.widget());
    main_box.append(&controls_frame);
    main_box.append(&info_label);
    main_box.append(&status_box);
    window.set_child(Some(&main_box));

    let update_info = {
        let ordering_check = ordering_check.clone();
        let sort_dropdown = sort_dropdown.clone();
        let info_label = info_label.clone();
        move || {
            let selected = sort_dropdown.selected();
            let mode = SORT_MODES
                .get(selected as usize)
                .copied()
                .filter(|_| selected != SORT_NONE);
            set_colored(
                &info_label,
                "blue",
                &info_text(ordering_check.is_active(), mode),
            );
        }
    };
    update_info();
    let update_info = Rc::new(update_info);

    // Signals
    {
        let editor = editor.clone();
        let sort_dropdown = sort_dropdown.clone();
        let update_info = update_info.clone();
        ordering_check.connect_toggled(move |check| {
            let allow = check.is_active();
            editor.configure(|model| model.set_allow_ordering(allow));
            sort_dropdown.set_sensitive(!allow);
            update_info();
        });
    }
    {
        let editor = editor.clone();
        let update_info = update_info.clone();
        sort_dropdown.connect_selected_notify(move |dropdown| {
            match dropdown.selected() {
                1 => editor.configure(|model| model.set_sort_function(length_key)),
                2 => editor.configure(|model| model.set_sort_function(reverse_key)),
                SORT_NONE => editor.configure(|model| model.disable_sort()),
                _ => editor.configure(|model| model.use_default_sort()),
            }
            update_info();
        });
    }
    {
        let editor = editor.clone();
        duplicate_check.connect_toggled(move |check| {
            let allow = check.is_active();
            editor.configure(|model| model.set_allow_duplicates(allow));
        });
    }
    {
        let editor = editor.clone();
        add_check.connect_toggled(move |check| {
            let allow = check.is_active();
            editor.configure(|model| {
                model.set_allow_add(allow, "Add a new thing", "Don't add rubbish now..")
            });
        });
    }
    {
        let editor = editor.clone();
        remove_check.connect_toggled(move |check| {
            let allow = check.is_active();
            editor.configure(|model| model.set_allow_remove(allow, "Remove"));
        });
    }
    {
        let editor = editor.clone();
        edit_check.connect_toggled(move |check| {
            let allow = check.is_active();
            editor.configure(|model| model.set_allow_edit(allow, "Edit this thing", "careful now.."));
        });
    }
    {
        let editor = editor.clone();
        clear_check.connect_toggled(move |check| {
            let allow = check.is_active();
            editor.configure(|model| model.set_allow_clear(allow, "Remove all"));
        });
    }
    {
        let change_label = change_label.clone();
        model.connect_list_changed(move |items| {
            tracing::debug!("List changed: {} items", items.len());
            set_colored(
                &change_label,
                "green",
                &format!("List changed! {} items", items.len()),
            );
            let change_label = change_label.clone();
            glib::timeout_add_local_once(Duration::from_secs(2), move || {
                set_colored(&change_label, "gray", "Waiting for changes...");
            });
        });
    }
    {
        let model = model.clone();
        get_button.connect_clicked(move |button| {
            show_message(button, "List Content", &content_summary(&model.get_strings()));
        });
    }

    window.present();
}

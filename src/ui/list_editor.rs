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

//! List editor widget
//!
//! GTK4 view over a [`ListModel`]. All list logic (validation, sorting,
//! selection after removal) lives in the model; this module only renders
//! it and forwards user actions.
//!
//! # Layout
//!
//! ```text
//! Stack (slide left/right)
//! ├── "view"  list (scrolled) + inline toolbar
//! │           [add][edit][remove]  [up][down]      [clear]
//! └── "edit"  title, hint, entry, error label, [Cancel][Save]
//! ```

use std::cell::Cell;
use std::rc::{Rc, Weak};

use gtk4::prelude::*;
use gtk4::{gdk, Align, Orientation, PolicyType};

use crate::core::{
    ControlState, DraftStatus, DraftTarget, HandlerId, ListModel, MoveDirection, Rejection,
    ToolbarState,
};
use crate::ui::dialogs::confirm;

const VIEW_PAGE: &str = "view";
const EDIT_PAGE: &str = "edit";

/// Toolbar buttons, in display order
#[derive(Clone)]
struct Toolbar {
    container: gtk4::Box,
    add: gtk4::Button,
    edit: gtk4::Button,
    remove: gtk4::Button,
    move_up: gtk4::Button,
    move_down: gtk4::Button,
    clear: gtk4::Button,
}

/// Edit page widgets
#[derive(Clone)]
struct EditPage {
    container: gtk4::Box,
    title: gtk4::Label,
    hint: gtk4::Label,
    entry: gtk4::Entry,
    error_label: gtk4::Label,
    cancel: gtk4::Button,
    save: gtk4::Button,
}

struct Inner {
    stack: gtk4::Stack,
    list_box: gtk4::ListBox,
    toolbar: Toolbar,
    edit_page: EditPage,
    model: Rc<ListModel>,
    selection: Cell<Option<usize>>,
    /// Set while rows are rebuilt, so row-selected is ignored
    rebuilding: Cell<bool>,
    list_changed: Cell<Option<HandlerId>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(id) = self.list_changed.take() {
            self.model.disconnect(id);
        }
    }
}

/// Editable string list with toolbar and inline add/edit page
///
/// Cloning yields another handle to the same editor. Signal handlers hold
/// weak handles only, so dropping the last clone frees the widgets and
/// disconnects from the model.
#[derive(Clone)]
pub struct ListEditor {
    inner: Rc<Inner>,
}

fn icon_button(icon: &str) -> gtk4::Button {
    gtk4::Button::builder().icon_name(icon).build()
}

fn linked_group(buttons: &[&gtk4::Button]) -> gtk4::Box {
    let group = gtk4::Box::new(Orientation::Horizontal, 0);
    group.add_css_class("linked");
    for button in buttons {
        group.append(*button);
    }
    group
}

fn apply_control(button: &gtk4::Button, state: ControlState) {
    button.set_visible(state.visible);
    button.set_sensitive(state.sensitive);
}

impl ListEditor {
    /// Creates an editor showing `model`
    ///
    /// The editor listens to the model, so changes made through the model
    /// directly (e.g. [`ListModel::set_strings`]) show up at once.
    /// Capability changes made directly need a [`refresh`](Self::refresh);
    /// [`configure`](Self::configure) does that for you.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::rc::Rc;
    /// use xapp_widgets::core::ListModel;
    /// use xapp_widgets::ui::ListEditor;
    ///
    /// gtk4::init()?;
    /// let model = Rc::new(ListModel::with_strings(["b", "a"]));
    /// let editor = ListEditor::new(model);
    /// editor.configure(|model| model.set_allow_add(true, "Add", ""));
    /// # Ok::<(), glib::BoolError>(())
    /// ```
    pub fn new(model: Rc<ListModel>) -> Self {
        let toolbar = Self::build_toolbar();
        let edit_page = Self::build_edit_page();

        let list_box = gtk4::ListBox::builder()
            .selection_mode(gtk4::SelectionMode::Single)
            .build();

        let scrolled = gtk4::ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Automatic)
            .vscrollbar_policy(PolicyType::Automatic)
            .has_frame(true)
            .hexpand(true)
            .vexpand(true)
            .child(&list_box)
            .build();

        let view = gtk4::Box::new(Orientation::Vertical, 0);
        view.add_css_class("linked");
        view.append(&scrolled);
        view.append(&toolbar.container);

        let stack = gtk4::Stack::builder()
            .transition_type(gtk4::StackTransitionType::SlideLeftRight)
            .transition_duration(200)
            .build();
        stack.add_named(&view, Some(VIEW_PAGE));
        stack.add_named(&edit_page.container, Some(EDIT_PAGE));
        stack.set_visible_child_name(VIEW_PAGE);

        let editor = Self {
            inner: Rc::new(Inner {
                stack,
                list_box,
                toolbar,
                edit_page,
                model,
                selection: Cell::new(None),
                rebuilding: Cell::new(false),
                list_changed: Cell::new(None),
            }),
        };

        editor.connect_signals();
        editor.rebuild_rows();
        editor
    }

    fn build_toolbar() -> Toolbar {
        let add = icon_button("list-add-symbolic");
        let edit = icon_button("document-edit-symbolic");
        let remove = icon_button("list-remove-symbolic");
        let move_up = icon_button("go-up-symbolic");
        move_up.set_tooltip_text(Some("Move up"));
        let move_down = icon_button("go-down-symbolic");
        move_down.set_tooltip_text(Some("Move down"));
        let clear = icon_button("user-trash-symbolic");

        let end_group = linked_group(&[&clear]);
        end_group.set_hexpand(true);
        end_group.set_halign(Align::End);

        let container = gtk4::Box::new(Orientation::Horizontal, 6);
        container.add_css_class("toolbar");
        container.append(&linked_group(&[&add, &edit, &remove]));
        container.append(&linked_group(&[&move_up, &move_down]));
        container.append(&end_group);

        Toolbar {
            container,
            add,
            edit,
            remove,
            move_up,
            move_down,
            clear,
        }
    }

    fn build_edit_page() -> EditPage {
        let title = gtk4::Label::builder().halign(Align::Start).build();
        title.add_css_class("heading");
        let hint = gtk4::Label::builder().halign(Align::Start).build();
        let entry = gtk4::Entry::new();
        let error_label = gtk4::Label::builder()
            .halign(Align::Start)
            .visible(false)
            .build();
        error_label.add_css_class("error");

        let cancel = gtk4::Button::with_label("Cancel");
        let save = gtk4::Button::with_label("Save");
        save.add_css_class("suggested-action");
        save.set_sensitive(false);

        let actions = gtk4::Box::new(Orientation::Horizontal, 6);
        actions.set_halign(Align::End);
        actions.append(&cancel);
        actions.append(&save);

        let content = gtk4::Box::new(Orientation::Vertical, 8);
        content.set_margin_top(12);
        content.set_margin_bottom(12);
        content.set_margin_start(12);
        content.set_margin_end(12);
        content.append(&title);
        content.append(&hint);
        content.append(&entry);
        content.append(&error_label);
        content.append(&actions);

        let frame = gtk4::Frame::new(None);
        frame.set_child(Some(&content));
        frame.set_vexpand(true);

        let container = gtk4::Box::new(Orientation::Vertical, 8);
        container.append(&frame);

        EditPage {
            container,
            title,
            hint,
            entry,
            error_label,
            cancel,
            save,
        }
    }

    fn downgrade(&self) -> Weak<Inner> {
        Rc::downgrade(&self.inner)
    }

    fn upgrade(weak: &Weak<Inner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Wraps an action so it holds the editor weakly
    fn on_click(&self, action: impl Fn(&Self) + 'static) -> impl Fn(&gtk4::Button) + 'static {
        let weak = self.downgrade();
        move |_: &gtk4::Button| {
            if let Some(editor) = Self::upgrade(&weak) {
                action(&editor);
            }
        }
    }

    fn connect_signals(&self) {
        let inner = &self.inner;

        // Model → view
        let weak = self.downgrade();
        let id = inner.model.connect_list_changed(move |_| {
            if let Some(editor) = Self::upgrade(&weak) {
                editor.rebuild_rows();
            }
        });
        inner.list_changed.set(Some(id));

        // Selection
        let weak = self.downgrade();
        inner.list_box.connect_row_selected(move |_, row| {
            let Some(editor) = Self::upgrade(&weak) else {
                return;
            };
            if editor.inner.rebuilding.get() {
                return;
            }
            editor
                .inner
                .selection
                .set(row.and_then(|row| usize::try_from(row.index()).ok()));
            editor.update_toolbar();
        });

        let weak = self.downgrade();
        inner.list_box.connect_row_activated(move |_, row| {
            if let (Some(editor), Ok(index)) = (Self::upgrade(&weak), usize::try_from(row.index())) {
                editor.start_edit(index);
            }
        });

        // Toolbar
        let toolbar = &inner.toolbar;
        toolbar.add.connect_clicked(self.on_click(Self::start_add));
        toolbar.edit.connect_clicked(self.on_click(|editor| {
            if let Some(index) = editor.inner.selection.get() {
                editor.start_edit(index);
            }
        }));
        toolbar.remove.connect_clicked(self.on_click(Self::confirm_remove));
        toolbar
            .move_up
            .connect_clicked(self.on_click(|editor| editor.move_selected(MoveDirection::Up)));
        toolbar
            .move_down
            .connect_clicked(self.on_click(|editor| editor.move_selected(MoveDirection::Down)));
        toolbar.clear.connect_clicked(self.on_click(Self::confirm_clear));

        // Edit page
        let page = &inner.edit_page;
        let weak = self.downgrade();
        page.entry.connect_changed(move |entry| {
            if let Some(editor) = Self::upgrade(&weak) {
                let status = editor.inner.model.update_draft(entry.text().as_str());
                editor.show_status(&status);
            }
        });

        let weak = self.downgrade();
        page.entry.connect_activate(move |_| {
            if let Some(editor) = Self::upgrade(&weak) {
                if editor.inner.edit_page.save.is_sensitive() {
                    editor.save();
                }
            }
        });

        page.save.connect_clicked(self.on_click(Self::save));
        page.cancel.connect_clicked(self.on_click(Self::cancel));

        let keys = gtk4::EventControllerKey::new();
        let weak = self.downgrade();
        keys.connect_key_pressed(move |_, key, _, _| match (key, Self::upgrade(&weak)) {
            (gdk::Key::Escape, Some(editor)) => {
                editor.cancel();
                glib::Propagation::Stop
            }
            _ => glib::Propagation::Proceed,
        });
        page.entry.add_controller(keys);
    }

    /// Root widget for adding to a parent container
    pub fn widget(&self) -> &gtk4::Stack {
        &self.inner.stack
    }

    /// The model behind this editor
    pub fn model(&self) -> &Rc<ListModel> {
        &self.inner.model
    }

    /// Currently selected index
    pub fn selected(&self) -> Option<usize> {
        self.inner.selection.get()
    }

    /// Changes model settings, then refreshes the view
    pub fn configure(&self, f: impl FnOnce(&ListModel)) {
        f(&self.inner.model);
        self.refresh();
    }

    /// Re-renders rows and toolbar from the model
    pub fn refresh(&self) {
        self.rebuild_rows();
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn rebuild_rows(&self) {
        let items = self.inner.model.get_strings();
        let reorderable = self.inner.model.capabilities().allow_reorder;

        self.inner.rebuilding.set(true);
        while let Some(child) = self.inner.list_box.first_child() {
            self.inner.list_box.remove(&child);
        }

        for (index, item) in items.iter().enumerate() {
            let label = gtk4::Label::builder()
                .label(item.as_str())
                .xalign(0.0)
                .margin_start(6)
                .margin_end(6)
                .margin_top(4)
                .margin_bottom(4)
                .build();
            let row = gtk4::ListBoxRow::builder().child(&label).build();
            if reorderable {
                self.attach_drag_and_drop(&row, index);
            }
            self.inner.list_box.append(&row);
        }

        let selection = self.inner.selection.get().filter(|&index| index < items.len());
        self.inner.selection.set(selection);
        self.select_row(selection);
        self.inner.rebuilding.set(false);

        // Structural changes close an open edit draft
        if self.inner.model.draft_target().is_none()
            && self.inner.stack.visible_child_name().as_deref() == Some(EDIT_PAGE)
        {
            self.show_view();
        }

        self.update_toolbar();
    }

    fn attach_drag_and_drop(&self, row: &gtk4::ListBoxRow, index: usize) {
        let Ok(index) = u32::try_from(index) else {
            return;
        };

        let source = gtk4::DragSource::new();
        source.set_actions(gdk::DragAction::MOVE);
        source.set_content(Some(&gdk::ContentProvider::for_value(&index.to_value())));
        row.add_controller(source);

        let target = gtk4::DropTarget::new(glib::Type::U32, gdk::DragAction::MOVE);
        let weak = self.downgrade();
        target.connect_drop(move |_, value, _, _| {
            let (Some(editor), Ok(from)) = (Self::upgrade(&weak), value.get::<u32>()) else {
                return false;
            };
            match editor.inner.model.reorder(from as usize, index as usize) {
                Ok(to) => {
                    editor.select(Some(to));
                    true
                }
                Err(e) => {
                    tracing::debug!("Drop rejected: {}", e);
                    false
                }
            }
        });
        row.add_controller(target);
    }

    fn select_row(&self, index: Option<usize>) {
        let row = index
            .and_then(|index| i32::try_from(index).ok())
            .and_then(|index| self.inner.list_box.row_at_index(index));
        self.inner.list_box.select_row(row.as_ref());
    }

    fn select(&self, index: Option<usize>) {
        self.inner.selection.set(index);
        self.inner.rebuilding.set(true);
        self.select_row(index);
        self.inner.rebuilding.set(false);
        self.update_toolbar();
    }

    fn update_toolbar(&self) {
        let capabilities = self.inner.model.capabilities();
        let text = self.inner.model.action_text();
        let state = ToolbarState::compute(&capabilities, self.inner.model.len(), self.inner.selection.get());

        let toolbar = &self.inner.toolbar;
        toolbar.container.set_visible(state.toolbar_visible);
        apply_control(&toolbar.add, state.add);
        apply_control(&toolbar.edit, state.edit);
        apply_control(&toolbar.remove, state.remove);
        apply_control(&toolbar.move_up, state.move_up);
        apply_control(&toolbar.move_down, state.move_down);
        apply_control(&toolbar.clear, state.clear);

        toolbar.add.set_tooltip_text(Some(&text.add_action));
        toolbar.edit.set_tooltip_text(Some(&text.edit_action));
        toolbar.remove.set_tooltip_text(Some(&text.remove_action));
        toolbar.clear.set_tooltip_text(Some(&text.clear_action));
    }

    fn show_status(&self, status: &DraftStatus) {
        let page = &self.inner.edit_page;
        page.save.set_sensitive(status.is_valid());

        match status.error_message() {
            Some(message) => {
                page.entry.add_css_class("error");
                page.error_label.set_text(message);
                page.error_label.set_visible(!message.is_empty());
            }
            None => {
                page.entry.remove_css_class("error");
                page.error_label.set_visible(false);
            }
        }
    }

    // ------------------------------------------------------------------
    // Edit page
    // ------------------------------------------------------------------

    fn start_add(&self) {
        match self.inner.model.begin_add() {
            Ok(status) => self.show_edit(DraftTarget::Add, status),
            Err(e) => tracing::debug!("Cannot add: {}", e),
        }
    }

    fn start_edit(&self, index: usize) {
        match self.inner.model.begin_edit(index) {
            Ok(status) => self.show_edit(DraftTarget::Edit(index), status),
            Err(e) => tracing::debug!("Cannot edit row {}: {}", index, e),
        }
    }

    fn show_edit(&self, target: DraftTarget, status: DraftStatus) {
        let text = self.inner.model.action_text();
        let page = &self.inner.edit_page;

        let (title, hint) = match target {
            DraftTarget::Add => (text.add_action, text.add_hint),
            DraftTarget::Edit(_) => (text.edit_action, text.edit_hint),
        };
        page.title.set_text(&title);
        page.hint.set_text(&hint);
        page.hint.set_visible(!hint.is_empty());

        // Setting the text re-runs update_draft with the same value
        page.entry
            .set_text(&self.inner.model.draft_text().unwrap_or_default());
        self.show_status(&status);

        self.inner.stack.set_visible_child_name(EDIT_PAGE);
        page.entry.grab_focus();
    }

    fn show_view(&self) {
        self.inner.stack.set_visible_child_name(VIEW_PAGE);
        self.inner.edit_page.error_label.set_visible(false);
        self.inner.edit_page.entry.remove_css_class("error");
    }

    fn save(&self) {
        match self.inner.model.commit_draft() {
            Ok(index) => {
                self.show_view();
                self.select(Some(index));
            }
            Err(Rejection::DraftNotValid) => {}
            Err(Rejection::NoDraft) => self.show_view(),
            Err(e) => self.show_status(&DraftStatus::Invalid(e.reason())),
        }
    }

    fn cancel(&self) {
        self.inner.model.cancel_draft();
        self.show_view();
    }

    // ------------------------------------------------------------------
    // Toolbar actions
    // ------------------------------------------------------------------

    fn confirm_remove(&self) {
        let Some(index) = self.inner.selection.get() else {
            return;
        };
        let Some(item) = self.inner.model.get(index) else {
            return;
        };

        let editor = self.clone();
        confirm(
            &self.inner.stack,
            "Remove?",
            &format!("Are you sure you want to remove '{}'?", item),
            move || match editor.inner.model.remove_at(index) {
                Ok(next) => editor.select(next),
                Err(e) => tracing::debug!("Remove rejected: {}", e),
            },
        );
    }

    fn confirm_clear(&self) {
        let editor = self.clone();
        confirm(
            &self.inner.stack,
            "Remove all?",
            "This will remove all items from the list.",
            move || match editor.inner.model.clear() {
                Ok(()) => editor.select(None),
                Err(e) => tracing::debug!("Clear rejected: {}", e),
            },
        );
    }

    fn move_selected(&self, direction: MoveDirection) {
        let Some(index) = self.inner.selection.get() else {
            return;
        };
        match self.inner.model.move_item(index, direction) {
            Ok(target) => self.select(Some(target)),
            Err(e) => tracing::debug!("Move rejected: {}", e),
        }
    }
}

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

//! Page structure for settings windows
//!
//! ```text
//! SettingsStack
//! └── SettingsPage           (one per stack page)
//!     └── SettingsSection    (bold title, dim subtitle, framed rows)
//!         ├── row            (any SettingsWidget)
//!         └── SettingsRevealer
//!             └── row        (shown only while a key allows it)
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Orientation, SelectionMode};

use crate::settings::{SettingsError, SettingsRegistry, SettingsWidget};

/// Custom reveal test: `(current value, configured values) -> reveal?`
pub type RevealCheck = Rc<dyn Fn(&glib::Variant, &[glib::Variant]) -> bool>;

/// Whether a revealer watching a key should show its children
///
/// Without a check function the value must be one of `values`.
pub fn should_reveal(
    value: &glib::Variant,
    values: &[glib::Variant],
    check: Option<&RevealCheck>,
) -> bool {
    match check {
        Some(check) => check(value, values),
        None => values.contains(value),
    }
}

// ============================================================================
// SettingsRevealer
// ============================================================================

/// Slide-down container whose visibility follows a setting
#[derive(Clone, Debug)]
pub struct SettingsRevealer {
    revealer: gtk4::Revealer,
    container: gtk4::Box,
}

impl Default for SettingsRevealer {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsRevealer {
    /// Revealer controlled by the caller
    pub fn new() -> Self {
        let container = gtk4::Box::new(Orientation::Vertical, 15);
        let revealer = gtk4::Revealer::builder()
            .transition_type(gtk4::RevealerTransitionType::SlideDown)
            .transition_duration(150)
            .child(&container)
            .build();
        Self {
            revealer,
            container,
        }
    }

    /// Reveals while the boolean `key` is true
    pub fn for_key(registry: &SettingsRegistry, schema: &str, key: &str) -> Result<Self, SettingsError> {
        let settings = registry.key(schema, key)?;
        let this = Self::new();
        settings
            .bind(key, &this.revealer, "reveal-child")
            .flags(gtk4::gio::SettingsBindFlags::GET)
            .build();
        Ok(this)
    }

    /// Reveals while `key` holds one of `values`
    pub fn for_values(
        registry: &SettingsRegistry,
        schema: &str,
        key: &str,
        values: Vec<glib::Variant>,
    ) -> Result<Self, SettingsError> {
        Self::watch(registry, schema, key, values, None)
    }

    /// Reveals while `check(value, values)` holds for the value of `key`
    pub fn with_check(
        registry: &SettingsRegistry,
        schema: &str,
        key: &str,
        values: Vec<glib::Variant>,
        check: impl Fn(&glib::Variant, &[glib::Variant]) -> bool + 'static,
    ) -> Result<Self, SettingsError> {
        Self::watch(registry, schema, key, values, Some(Rc::new(check)))
    }

    fn watch(
        registry: &SettingsRegistry,
        schema: &str,
        key: &str,
        values: Vec<glib::Variant>,
        check: Option<RevealCheck>,
    ) -> Result<Self, SettingsError> {
        let settings = registry.key(schema, key)?;
        let this = Self::new();

        let initial = should_reveal(&settings.value(key), &values, check.as_ref());
        this.revealer.set_reveal_child(initial);

        let revealer = this.revealer.clone();
        settings.connect_changed(Some(key), move |settings, key| {
            revealer.set_reveal_child(should_reveal(&settings.value(key), &values, check.as_ref()));
        });

        Ok(this)
    }

    pub fn add(&self, widget: &impl IsA<gtk4::Widget>) {
        self.container.append(widget);
    }

    pub fn widget(&self) -> &gtk4::Revealer {
        &self.revealer
    }
}

// ============================================================================
// SettingsSection
// ============================================================================

/// Titled group of framed rows
///
/// The frame stays hidden until it has a permanent row. While it only
/// holds revealed rows, it is shown exactly when one of them is revealed.
#[derive(Clone)]
pub struct SettingsSection {
    container: gtk4::Box,
    frame: gtk4::Frame,
    rows: gtk4::Box,
    need_separator: Rc<Cell<bool>>,
    always_show: Rc<Cell<bool>>,
    revealers: Rc<RefCell<Vec<gtk4::Revealer>>>,
    reveal_handlers: Rc<RefCell<Vec<(gtk4::Revealer, glib::SignalHandlerId)>>>,
}

impl SettingsSection {
    pub fn new(title: Option<&str>, subtitle: Option<&str>) -> Self {
        let container = gtk4::Box::new(Orientation::Vertical, 10);

        if title.is_some() || subtitle.is_some() {
            let header = gtk4::Box::new(Orientation::Vertical, 5);

            if let Some(title) = title {
                let label = gtk4::Label::new(None);
                label.set_markup(&format!("<b>{}</b>", glib::markup_escape_text(title)));
                label.set_xalign(0.0);
                header.append(&label);
            }

            if let Some(subtitle) = subtitle {
                let label = gtk4::Label::new(Some(subtitle));
                label.add_css_class("dim-label");
                label.set_xalign(0.0);
                header.append(&label);
            }

            container.append(&header);
        }

        let rows = gtk4::Box::new(Orientation::Vertical, 0);
        let frame = gtk4::Frame::new(None);
        frame.add_css_class("view");
        frame.set_child(Some(&rows));
        frame.set_visible(false);
        container.append(&frame);

        Self {
            container,
            frame,
            rows,
            need_separator: Rc::new(Cell::new(false)),
            always_show: Rc::new(Cell::new(false)),
            revealers: Rc::new(RefCell::new(Vec::new())),
            reveal_handlers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn widget(&self) -> &gtk4::Box {
        &self.container
    }

    /// Wraps `widget` in a list row, preceded by a separator if needed
    fn row_box(&self, widget: &impl SettingsWidget) -> gtk4::Box {
        let vbox = gtk4::Box::new(Orientation::Vertical, 0);
        if self.need_separator.get() {
            vbox.append(&gtk4::Separator::new(Orientation::Horizontal));
        }

        let list_box = gtk4::ListBox::new();
        list_box.set_selection_mode(SelectionMode::None);
        let row = gtk4::ListBoxRow::builder()
            .focusable(false)
            .child(widget.widget())
            .build();
        if let Some(activate) = widget.row_activated() {
            list_box.connect_row_activated(move |_, _| activate());
        }
        list_box.append(&row);
        vbox.append(&list_box);

        self.need_separator.set(true);
        vbox
    }

    /// Adds a permanently visible row
    pub fn add_row(&self, widget: &impl SettingsWidget) {
        let vbox = self.row_box(widget);
        self.rows.append(&vbox);
        self.update_always_show_state();
    }

    /// Adds a row inside `revealer` and returns the revealer
    pub fn add_reveal_row(
        &self,
        widget: &impl SettingsWidget,
        revealer: SettingsRevealer,
    ) -> SettingsRevealer {
        let vbox = self.row_box(widget);
        revealer.add(&vbox);
        self.rows.append(revealer.widget());

        self.revealers
            .borrow_mut()
            .push(revealer.widget().clone());

        if !self.always_show.get() {
            let frame = self.frame.clone();
            let revealers = self.revealers.clone();
            let handler = revealer
                .widget()
                .connect_child_revealed_notify(move |_| check_reveal_state(&frame, &revealers));
            self.reveal_handlers
                .borrow_mut()
                .push((revealer.widget().clone(), handler));
            check_reveal_state(&self.frame, &self.revealers);
        }

        revealer
    }

    /// Adds wrapped markup text below the frame
    pub fn add_note(&self, markup: &str) -> gtk4::Label {
        let label = gtk4::Label::new(None);
        label.set_xalign(0.0);
        label.set_markup(markup);
        label.set_wrap(true);
        self.container.append(&label);
        label
    }

    fn update_always_show_state(&self) {
        if self.always_show.get() {
            return;
        }

        self.frame.set_visible(true);
        self.always_show.set(true);

        for (revealer, handler) in self.reveal_handlers.borrow_mut().drain(..) {
            revealer.disconnect(handler);
        }
    }

    /// Whether the frame is currently shown
    pub fn is_frame_visible(&self) -> bool {
        self.frame.is_visible()
    }
}

fn check_reveal_state(frame: &gtk4::Frame, revealers: &RefCell<Vec<gtk4::Revealer>>) {
    let any_revealed = revealers
        .borrow()
        .iter()
        .any(|revealer| revealer.is_child_revealed());
    frame.set_visible(any_revealed);
}

// ============================================================================
// SettingsPage / SettingsStack
// ============================================================================

/// Vertical column of sections
#[derive(Clone, Debug)]
pub struct SettingsPage {
    container: gtk4::Box,
}

impl Default for SettingsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsPage {
    pub fn new() -> Self {
        let container = gtk4::Box::new(Orientation::Vertical, 30);
        container.set_margin_start(80);
        container.set_margin_end(80);
        container.set_margin_top(15);
        container.set_margin_bottom(15);
        Self { container }
    }

    pub fn widget(&self) -> &gtk4::Box {
        &self.container
    }

    pub fn add_section(&self, title: Option<&str>, subtitle: Option<&str>) -> SettingsSection {
        let section = SettingsSection::new(title, subtitle);
        self.container.append(section.widget());
        section
    }

    /// Adds a section that is shown only while `revealer` reveals it
    pub fn add_reveal_section(&self, title: Option<&str>, revealer: &SettingsRevealer) -> SettingsSection {
        let section = SettingsSection::new(title, None);
        revealer.add(section.widget());
        self.container.append(revealer.widget());
        section
    }
}

/// Stack of settings pages with a sliding transition
#[derive(Clone, Debug)]
pub struct SettingsStack {
    stack: gtk4::Stack,
}

impl Default for SettingsStack {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStack {
    pub fn new() -> Self {
        let stack = gtk4::Stack::builder()
            .transition_type(gtk4::StackTransitionType::SlideLeftRight)
            .transition_duration(150)
            .hexpand(true)
            .vexpand(true)
            .build();
        Self { stack }
    }

    pub fn widget(&self) -> &gtk4::Stack {
        &self.stack
    }

    pub fn add_page(&self, page: &SettingsPage, name: &str, title: &str) {
        self.stack.add_titled(page.widget(), Some(name), title);
    }
}

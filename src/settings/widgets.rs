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

//! Settings row widgets
//!
//! Every widget is a horizontal row holding a label and a content widget,
//! bound to one GSettings key through a [`SettingsRegistry`]. Rows are
//! added to a [`SettingsSection`](crate::settings::SettingsSection).
//!
//! Keys are checked on construction; a missing schema or key is an error,
//! never an abort inside GIO.
//!
//! Numeric widgets (spin buttons, scales) write back after a 300 ms pause
//! so dragging a slider does not flood dconf.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use gtk4::gio;
use gtk4::prelude::*;
use gtk4::{Align, Justification, Orientation, PolicyType, PositionType, WrapMode};

use crate::settings::color::{color_string, parse_color};
use crate::settings::font::{merge_font, parse_font};
use crate::settings::icon::{filter_icon_names, icon_source, IconSource};
use crate::settings::range::{digits_for_step, format_value, resolve_bounds, RangeMapping};
use crate::settings::registry::{read_number, write_number, write_string, write_value};
use crate::settings::{DepKey, SettingsError, SettingsRegistry};

/// Delay before a numeric change is written to GSettings
pub const WRITE_DELAY: Duration = Duration::from_millis(300);

/// Behaviour shared by every settings row
pub trait SettingsWidget {
    /// Row container
    fn row(&self) -> &SettingsRow;

    /// The interactive part of the row (switch, entry, scale...)
    fn content(&self) -> gtk4::Widget;

    /// Top-level widget to pack
    fn widget(&self) -> &gtk4::Box {
        self.row().widget()
    }

    /// Action for activating the surrounding list row, if any
    fn row_activated(&self) -> Option<Rc<dyn Fn()>> {
        None
    }

    /// Aligns the content with other rows in `group`
    fn add_to_size_group(&self, group: &gtk4::SizeGroup) {
        group.add_widget(&self.content());
    }

    /// Makes the row sensitive only while a boolean key allows it
    fn set_dep_key(&self, registry: &SettingsRegistry, dep_key: &str) -> Result<(), SettingsError> {
        self.row().set_dep_key(registry, dep_key)
    }

    fn set_tooltip(&self, tooltip: &str) {
        self.row().set_tooltip(tooltip);
    }
}

/// Container every settings widget is built on
#[derive(Clone, Debug)]
pub struct SettingsRow {
    container: gtk4::Box,
}

impl SettingsRow {
    pub fn new(orientation: Orientation) -> Self {
        let container = gtk4::Box::new(orientation, 20);
        container.set_margin_top(5);
        container.set_margin_bottom(5);
        container.set_margin_start(25);
        container.set_margin_end(25);
        Self { container }
    }

    pub fn widget(&self) -> &gtk4::Box {
        &self.container
    }

    /// See [`DepKey`]
    pub fn set_dep_key(&self, registry: &SettingsRegistry, dep_key: &str) -> Result<(), SettingsError> {
        DepKey::parse(dep_key)?.bind(registry, &self.container)
    }

    /// Removes the row margins so the content spans the whole row
    pub fn fill_row(&self) {
        self.container.set_margin_top(0);
        self.container.set_margin_bottom(0);
        self.container.set_margin_start(0);
        self.container.set_margin_end(0);
    }

    pub fn set_tooltip(&self, tooltip: &str) {
        if !tooltip.is_empty() {
            self.container.set_tooltip_text(Some(tooltip));
        }
    }
}

/// Start-aligned, wrapping row label
fn settings_label(text: &str) -> gtk4::Label {
    let label = gtk4::Label::new(Some(text));
    label.set_xalign(0.0);
    label.set_wrap(true);
    label.set_hexpand(true);
    label
}

/// Restartable one-shot timer on the main loop
#[derive(Clone, Default)]
struct Debounce {
    source: Rc<RefCell<Option<glib::SourceId>>>,
}

impl Debounce {
    fn schedule(&self, f: impl FnOnce() + 'static) {
        if let Some(pending) = self.source.borrow_mut().take() {
            pending.remove();
        }

        let source = self.source.clone();
        let id = glib::timeout_add_local_once(WRITE_DELAY, move || {
            // Fired sources must not be removed again
            source.borrow_mut().take();
            f();
        });
        *self.source.borrow_mut() = Some(id);
    }
}

// ============================================================================
// Switch
// ============================================================================

/// On/off row bound to a boolean key
pub struct Switch {
    row: SettingsRow,
    switch: gtk4::Switch,
}

impl Switch {
    pub fn new(
        registry: &SettingsRegistry,
        schema: &str,
        key: &str,
        label: &str,
    ) -> Result<Self, SettingsError> {
        let settings = registry.key(schema, key)?;

        let row = SettingsRow::new(Orientation::Horizontal);
        let switch = gtk4::Switch::builder().valign(Align::Center).build();
        row.widget().append(&settings_label(label));
        row.widget().append(&switch);

        settings.bind(key, &switch, "active").build();

        Ok(Self { row, switch })
    }

    /// Toggles the switch unless the row is insensitive
    pub fn clicked(&self) {
        toggle_if_sensitive(&self.row, &self.switch);
    }
}

fn toggle_if_sensitive(row: &SettingsRow, switch: &gtk4::Switch) {
    if row.widget().is_sensitive() {
        switch.set_active(!switch.is_active());
    }
}

impl SettingsWidget for Switch {
    fn row(&self) -> &SettingsRow {
        &self.row
    }

    fn content(&self) -> gtk4::Widget {
        self.switch.clone().upcast()
    }

    fn row_activated(&self) -> Option<Rc<dyn Fn()>> {
        let row = self.row.clone();
        let switch = self.switch.clone();
        Some(Rc::new(move || toggle_if_sensitive(&row, &switch)))
    }
}

// ============================================================================
// SpinButton
// ============================================================================

/// Options for [`SpinButton`]
#[derive(Clone, Debug, PartialEq)]
pub struct SpinOptions {
    /// Appended to the label as ` (units)`
    pub units: String,
    /// Explicit `(min, max)`, narrowed to the schema range
    pub bounds: Option<(f64, f64)>,
    pub step: f64,
    /// Page increment, `step` if `None`
    pub page: Option<f64>,
}

impl Default for SpinOptions {
    fn default() -> Self {
        Self {
            units: String::new(),
            bounds: None,
            step: 1.0,
            page: None,
        }
    }
}

/// Label text with an optional units suffix
pub fn label_with_units(label: &str, units: &str) -> String {
    if units.is_empty() {
        label.to_string()
    } else {
        format!("{} ({})", label, units)
    }
}

/// Numeric entry bound to a numeric key
pub struct SpinButton {
    row: SettingsRow,
    spin: gtk4::SpinButton,
}

impl SpinButton {
    pub fn new(
        registry: &SettingsRegistry,
        schema: &str,
        key: &str,
        label: &str,
        options: SpinOptions,
    ) -> Result<Self, SettingsError> {
        let settings = registry.key(schema, key)?;
        let (min, max) = resolve_bounds(options.bounds, registry.key_range(schema, key)?)
            .ok_or_else(|| SettingsError::MissingRange(key.to_string()))?;

        let row = SettingsRow::new(Orientation::Horizontal);
        let spin = gtk4::SpinButton::builder().valign(Align::Center).build();
        spin.set_range(min, max);
        spin.set_increments(options.step, options.page.unwrap_or(options.step));
        spin.set_digits(digits_for_step(options.step));

        row.widget()
            .append(&settings_label(&label_with_units(label, &options.units)));
        row.widget().append(&spin);

        let updating = Rc::new(Cell::new(false));
        sync_spin_from_settings(&settings, key, &spin, &updating);

        {
            let spin = spin.clone();
            let updating = updating.clone();
            settings.connect_changed(Some(key), move |settings, key| {
                sync_spin_from_settings(settings, key, &spin, &updating);
            });
        }

        {
            let settings = settings.clone();
            let key = key.to_string();
            let debounce = Debounce::default();
            spin.connect_value_changed(move |spin| {
                if updating.get() {
                    return;
                }
                let settings = settings.clone();
                let key = key.clone();
                let value = spin.value();
                debounce.schedule(move || {
                    if let Err(e) = write_number(&settings, &key, value) {
                        tracing::warn!("{}", e);
                    }
                });
            });
        }

        Ok(Self { row, spin })
    }

    pub fn spin_button(&self) -> &gtk4::SpinButton {
        &self.spin
    }
}

fn sync_spin_from_settings(
    settings: &gio::Settings,
    key: &str,
    spin: &gtk4::SpinButton,
    updating: &Cell<bool>,
) {
    if let Some(value) = read_number(settings, key) {
        updating.set(true);
        spin.set_value(value);
        updating.set(false);
    }
}

impl SettingsWidget for SpinButton {
    fn row(&self) -> &SettingsRow {
        &self.row
    }

    fn content(&self) -> gtk4::Widget {
        self.spin.clone().upcast()
    }
}

// ============================================================================
// Entry / TextView
// ============================================================================

/// Single-line text row bound to a string key
pub struct Entry {
    row: SettingsRow,
    entry: gtk4::Entry,
}

impl Entry {
    pub fn new(
        registry: &SettingsRegistry,
        schema: &str,
        key: &str,
        label: &str,
        expand_width: bool,
    ) -> Result<Self, SettingsError> {
        let settings = registry.key(schema, key)?;

        let row = SettingsRow::new(Orientation::Horizontal);
        let entry = gtk4::Entry::builder()
            .valign(Align::Center)
            .hexpand(expand_width)
            .build();
        row.widget().append(&settings_label(label));
        row.widget().append(&entry);

        settings.bind(key, &entry, "text").build();

        Ok(Self { row, entry })
    }

    pub fn entry(&self) -> &gtk4::Entry {
        &self.entry
    }
}

impl SettingsWidget for Entry {
    fn row(&self) -> &SettingsRow {
        &self.row
    }

    fn content(&self) -> gtk4::Widget {
        self.entry.clone().upcast()
    }
}

/// Multi-line text row: centered label over a scrolled text view
pub struct TextView {
    row: SettingsRow,
    view: gtk4::TextView,
}

impl TextView {
    pub fn new(
        registry: &SettingsRegistry,
        schema: &str,
        key: &str,
        label: &str,
        height: i32,
    ) -> Result<Self, SettingsError> {
        let settings = registry.key(schema, key)?;

        let row = SettingsRow::new(Orientation::Vertical);
        row.widget().set_spacing(8);

        let title = gtk4::Label::new(Some(label));
        title.set_halign(Align::Center);

        let view = gtk4::TextView::builder()
            .wrap_mode(WrapMode::None)
            .left_margin(3)
            .right_margin(3)
            .top_margin(3)
            .bottom_margin(3)
            .build();

        let scrolled = gtk4::ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Automatic)
            .vscrollbar_policy(PolicyType::Automatic)
            .has_frame(true)
            .height_request(height)
            .child(&view)
            .build();

        row.widget().append(&title);
        row.widget().append(&scrolled);

        settings.bind(key, &view.buffer(), "text").build();

        Ok(Self { row, view })
    }
}

impl SettingsWidget for TextView {
    fn row(&self) -> &SettingsRow {
        &self.row
    }

    fn content(&self) -> gtk4::Widget {
        self.view.clone().upcast()
    }
}

// ============================================================================
// Range
// ============================================================================

/// Options for [`Range`]
#[derive(Clone, Debug, PartialEq)]
pub struct RangeOptions {
    /// Small italic caption at the low end
    pub min_label: String,
    /// Small italic caption at the high end
    pub max_label: String,
    /// Explicit `(min, max)`, narrowed to the schema range
    pub bounds: Option<(f64, f64)>,
    /// Step in setting units, 2% of the span if `None`
    pub step: Option<f64>,
    pub invert: bool,
    pub log: bool,
    pub show_value: bool,
    pub flipped: bool,
    /// Suffix for the drawn value; enables fixed-precision formatting
    pub units: String,
    /// Precision of the drawn value when `units` is set
    pub digits: usize,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            min_label: String::new(),
            max_label: String::new(),
            bounds: None,
            step: None,
            invert: false,
            log: false,
            show_value: true,
            flipped: false,
            units: String::new(),
            digits: 1,
        }
    }
}

/// Slider row bound to a numeric key
pub struct Range {
    row: SettingsRow,
    scale: gtk4::Scale,
    mapping: RangeMapping,
    digits: Rc<Cell<usize>>,
}

impl Range {
    pub fn new(
        registry: &SettingsRegistry,
        schema: &str,
        key: &str,
        label: &str,
        options: RangeOptions,
    ) -> Result<Self, SettingsError> {
        let settings = registry.key(schema, key)?;
        let bounds = resolve_bounds(options.bounds, registry.key_range(schema, key)?)
            .ok_or_else(|| SettingsError::MissingRange(key.to_string()))?;
        let mapping = RangeMapping::new(
            bounds,
            options.step,
            options.log,
            options.flipped,
            options.invert,
        );

        let row = SettingsRow::new(Orientation::Vertical);
        row.widget().set_spacing(0);

        let title = gtk4::Label::new(Some(label));
        title.set_halign(Align::Center);

        let min_label = caption_label(&options.min_label);
        min_label.set_margin_end(6);
        let max_label = caption_label(&options.max_label);
        max_label.set_margin_start(6);

        let adjustment = gtk4::Adjustment::new(
            mapping.scale_min(),
            mapping.scale_min(),
            mapping.scale_max(),
            mapping.step(),
            mapping.step() * 10.0,
            0.0,
        );
        let scale = gtk4::Scale::new(Orientation::Horizontal, Some(&adjustment));
        scale.set_hexpand(true);
        scale.set_inverted(options.invert);
        scale.set_draw_value(mapping.draws_value(options.show_value));
        scale.set_digits(digits_for_step(mapping.step()).min(5) as i32);

        let digits = Rc::new(Cell::new(options.digits));
        if !options.units.is_empty() {
            let digits = digits.clone();
            let units = options.units.clone();
            scale.set_format_value_func(move |_, value| format_value(value, digits.get(), &units));
        }

        let hbox = gtk4::Box::new(Orientation::Horizontal, 0);
        hbox.set_margin_top(6);
        hbox.set_margin_bottom(6);
        hbox.append(&min_label);
        hbox.append(&scale);
        hbox.append(&max_label);

        row.widget().append(&title);
        row.widget().append(&hbox);

        let scroll = gtk4::EventControllerScroll::new(gtk4::EventControllerScrollFlags::VERTICAL);
        scroll.set_propagation_phase(gtk4::PropagationPhase::Capture);
        {
            let scale = scale.clone();
            scroll.connect_scroll(move |_, _, delta_y| {
                scale.set_value(mapping.scrolled(scale.value(), delta_y));
                glib::Propagation::Stop
            });
        }
        scale.add_controller(scroll);

        if mapping.rounds_to_step() {
            scale.connect_change_value(move |scale, _, value| match mapping.round_to_step(value) {
                Some(rounded) => {
                    scale.set_value(rounded);
                    glib::Propagation::Stop
                }
                None => glib::Propagation::Proceed,
            });
        }

        let updating = Rc::new(Cell::new(false));
        sync_scale_from_settings(&settings, key, &scale, &mapping, &updating);

        {
            let scale = scale.clone();
            let updating = updating.clone();
            settings.connect_changed(Some(key), move |settings, key| {
                sync_scale_from_settings(settings, key, &scale, &mapping, &updating);
            });
        }

        {
            let settings = settings.clone();
            let key = key.to_string();
            let debounce = Debounce::default();
            scale.connect_value_changed(move |scale| {
                if updating.get() {
                    return;
                }
                let settings = settings.clone();
                let key = key.clone();
                let value = mapping.from_scale(scale.value());
                debounce.schedule(move || {
                    if let Err(e) = write_number(&settings, &key, value) {
                        tracing::warn!("{}", e);
                    }
                });
            });
        }

        Ok(Self {
            row,
            scale,
            mapping,
            digits,
        })
    }

    /// Adds a mark at `value` (setting units)
    pub fn add_mark(&self, value: f64, position: PositionType, markup: Option<&str>) {
        self.scale
            .add_mark(self.mapping.mark_position(value), position, markup);
    }

    /// Rounds values to `digits` decimals; ignored on log scales
    pub fn set_rounding(&self, digits: u8) {
        if self.mapping.is_log() {
            return;
        }
        self.digits.set(usize::from(digits));
        self.scale.set_round_digits(i32::from(digits));
        self.scale.set_digits(i32::from(digits));
    }

    pub fn scale(&self) -> &gtk4::Scale {
        &self.scale
    }
}

fn caption_label(text: &str) -> gtk4::Label {
    let label = gtk4::Label::new(None);
    label.set_xalign(1.0);
    label.set_yalign(0.75);
    label.set_markup(&format!(
        "<i><small>{}</small></i>",
        glib::markup_escape_text(text)
    ));
    label
}

fn sync_scale_from_settings(
    settings: &gio::Settings,
    key: &str,
    scale: &gtk4::Scale,
    mapping: &RangeMapping,
    updating: &Cell<bool>,
) {
    let Some(value) = read_number(settings, key) else {
        return;
    };
    let position = mapping.to_scale(value);
    if !position.is_finite() {
        tracing::warn!("Value {} of '{}' does not fit the scale", value, key);
        return;
    }
    updating.set(true);
    scale.set_value(position);
    updating.set(false);
}

impl SettingsWidget for Range {
    fn row(&self) -> &SettingsRow {
        &self.row
    }

    fn content(&self) -> gtk4::Widget {
        self.scale.clone().upcast()
    }
}

// ============================================================================
// ComboBox
// ============================================================================

/// Position of `value` among `options`
pub fn option_index(options: &[(glib::Variant, String)], value: &glib::Variant) -> Option<usize> {
    options.iter().position(|(option, _)| option == value)
}

/// Drop-down row choosing one of a fixed set of values
pub struct ComboBox {
    row: SettingsRow,
    dropdown: gtk4::DropDown,
    options: Rc<Vec<(glib::Variant, String)>>,
}

impl ComboBox {
    /// `options` pairs a stored value with its label; all values must have
    /// the key's type
    pub fn new(
        registry: &SettingsRegistry,
        schema: &str,
        key: &str,
        label: &str,
        options: Vec<(glib::Variant, String)>,
    ) -> Result<Self, SettingsError> {
        let settings = registry.key(schema, key)?;
        let key_type = settings.value(key).type_().as_str().to_string();
        if let Some((mismatch, _)) = options
            .iter()
            .find(|(value, _)| value.type_().as_str() != key_type)
        {
            return Err(SettingsError::UnsupportedType {
                key: key.to_string(),
                type_name: mismatch.type_().to_string(),
            });
        }

        let labels: Vec<&str> = options.iter().map(|(_, label)| label.as_str()).collect();
        let dropdown = gtk4::DropDown::from_strings(&labels);
        dropdown.set_valign(Align::Center);

        let row = SettingsRow::new(Orientation::Horizontal);
        row.widget().append(&settings_label(label));
        row.widget().append(&dropdown);

        let options = Rc::new(options);
        let updating = Rc::new(Cell::new(false));
        sync_dropdown_from_settings(&settings, key, &dropdown, &options, &updating);

        {
            let dropdown = dropdown.clone();
            let options = options.clone();
            let updating = updating.clone();
            settings.connect_changed(Some(key), move |settings, key| {
                sync_dropdown_from_settings(settings, key, &dropdown, &options, &updating);
            });
        }

        {
            let settings = settings.clone();
            let key = key.to_string();
            let options = options.clone();
            dropdown.connect_selected_notify(move |dropdown| {
                if updating.get() {
                    return;
                }
                let Some((value, _)) = options.get(dropdown.selected() as usize) else {
                    return;
                };
                if let Err(e) = write_value(&settings, &key, value) {
                    tracing::warn!("{}", e);
                }
            });
        }

        Ok(Self {
            row,
            dropdown,
            options,
        })
    }

    /// Currently selected stored value
    pub fn value(&self) -> Option<glib::Variant> {
        self.options
            .get(self.dropdown.selected() as usize)
            .map(|(value, _)| value.clone())
    }
}

fn sync_dropdown_from_settings(
    settings: &gio::Settings,
    key: &str,
    dropdown: &gtk4::DropDown,
    options: &[(glib::Variant, String)],
    updating: &Cell<bool>,
) {
    let position = option_index(options, &settings.value(key))
        .map_or(gtk4::INVALID_LIST_POSITION, |index| index as u32);
    updating.set(true);
    dropdown.set_selected(position);
    updating.set(false);
}

impl SettingsWidget for ComboBox {
    fn row(&self) -> &SettingsRow {
        &self.row
    }

    fn content(&self) -> gtk4::Widget {
        self.dropdown.clone().upcast()
    }
}

// ============================================================================
// ColorChooser
// ============================================================================

/// Colour button row bound to a colour string key
pub struct ColorChooser {
    row: SettingsRow,
    button: gtk4::ColorDialogButton,
}

impl ColorChooser {
    /// With `legacy_string` the key stores `#rrrrggggbbbb` instead of `rgba(...)`
    pub fn new(
        registry: &SettingsRegistry,
        schema: &str,
        key: &str,
        label: &str,
        legacy_string: bool,
    ) -> Result<Self, SettingsError> {
        let settings = registry.key(schema, key)?;

        let dialog = gtk4::ColorDialog::builder().with_alpha(true).build();
        let button = gtk4::ColorDialogButton::builder()
            .dialog(&dialog)
            .valign(Align::Center)
            .build();

        let row = SettingsRow::new(Orientation::Horizontal);
        row.widget().append(&settings_label(label));
        row.widget().append(&button);

        let updating = Rc::new(Cell::new(false));
        sync_color_from_settings(&settings, key, &button, &updating);

        {
            let button = button.clone();
            let updating = updating.clone();
            settings.connect_changed(Some(key), move |settings, key| {
                sync_color_from_settings(settings, key, &button, &updating);
            });
        }

        {
            let settings = settings.clone();
            let key = key.to_string();
            button.connect_rgba_notify(move |button| {
                if updating.get() {
                    return;
                }
                let value = color_string(&button.rgba(), legacy_string);
                if let Err(e) = write_string(&settings, &key, &value) {
                    tracing::warn!("{}", e);
                }
            });
        }

        Ok(Self { row, button })
    }
}

fn sync_color_from_settings(
    settings: &gio::Settings,
    key: &str,
    button: &gtk4::ColorDialogButton,
    updating: &Cell<bool>,
) {
    let text = settings.string(key);
    match parse_color(&text) {
        Some(rgba) => {
            updating.set(true);
            button.set_rgba(&rgba);
            updating.set(false);
        }
        None => tracing::warn!("Cannot parse colour '{}' of '{}'", text, key),
    }
}

impl SettingsWidget for ColorChooser {
    fn row(&self) -> &SettingsRow {
        &self.row
    }

    fn content(&self) -> gtk4::Widget {
        self.button.clone().upcast()
    }
}

// ============================================================================
// FontButton
// ============================================================================

/// Font button row bound to a Pango font string key
pub struct FontButton {
    row: SettingsRow,
    button: gtk4::FontDialogButton,
}

impl FontButton {
    /// `level` limits what the dialog picks; `FontLevel::Font` picks family,
    /// style and size. Fields below the level keep their stored values.
    pub fn new(
        registry: &SettingsRegistry,
        schema: &str,
        key: &str,
        label: &str,
        level: gtk4::FontLevel,
    ) -> Result<Self, SettingsError> {
        let settings = registry.key(schema, key)?;

        let dialog = gtk4::FontDialog::builder().modal(true).build();
        let button = gtk4::FontDialogButton::builder()
            .dialog(&dialog)
            .level(level)
            .valign(Align::Center)
            .build();

        let row = SettingsRow::new(Orientation::Horizontal);
        row.widget().append(&settings_label(label));
        row.widget().append(&button);

        let updating = Rc::new(Cell::new(false));
        sync_font_from_settings(&settings, key, &button, &updating);

        {
            let button = button.clone();
            let updating = updating.clone();
            settings.connect_changed(Some(key), move |settings, key| {
                sync_font_from_settings(settings, key, &button, &updating);
            });
        }

        {
            let settings = settings.clone();
            let key = key.to_string();
            button.connect_font_desc_notify(move |button| {
                if updating.get() {
                    return;
                }
                let Some(chosen) = button.font_desc() else {
                    return;
                };
                let current = parse_font(&settings.string(&key));
                let value = merge_font(&chosen, current.as_ref());
                if let Err(e) = write_string(&settings, &key, &value) {
                    tracing::warn!("{}", e);
                }
            });
        }

        Ok(Self { row, button })
    }
}

fn sync_font_from_settings(
    settings: &gio::Settings,
    key: &str,
    button: &gtk4::FontDialogButton,
    updating: &Cell<bool>,
) {
    let text = settings.string(key);
    match parse_font(&text) {
        Some(desc) => {
            updating.set(true);
            button.set_font_desc(&desc);
            updating.set(false);
        }
        None => tracing::warn!("Cannot parse font '{}' of '{}'", text, key),
    }
}

impl SettingsWidget for FontButton {
    fn row(&self) -> &SettingsRow {
        &self.row
    }

    fn content(&self) -> gtk4::Widget {
        self.button.clone().upcast()
    }
}

// ============================================================================
// IconChooser
// ============================================================================

/// Most icons shown in the picker grid at once
const ICON_GRID_LIMIT: usize = 200;

/// Options for [`IconChooser`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IconOptions {
    /// Previewed while the key is empty
    pub default_icon: Option<String>,
    pub expand_width: bool,
}

/// Icon name or image path row with a preview and a theme icon picker
pub struct IconChooser {
    row: SettingsRow,
    entry: gtk4::Entry,
    preview: gtk4::Image,
}

impl IconChooser {
    pub fn new(
        registry: &SettingsRegistry,
        schema: &str,
        key: &str,
        label: &str,
        options: IconOptions,
    ) -> Result<Self, SettingsError> {
        let settings = registry.key(schema, key)?;

        let preview = gtk4::Image::builder().pixel_size(24).valign(Align::Center).build();
        let entry = gtk4::Entry::builder()
            .valign(Align::Center)
            .hexpand(options.expand_width)
            .build();

        let search = gtk4::SearchEntry::new();
        let grid = gtk4::FlowBox::builder()
            .selection_mode(gtk4::SelectionMode::None)
            .max_children_per_line(8)
            .homogeneous(true)
            .build();
        let scroller = gtk4::ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Never)
            .min_content_height(240)
            .min_content_width(320)
            .child(&grid)
            .build();
        let popover_box = gtk4::Box::new(Orientation::Vertical, 6);
        popover_box.append(&search);
        popover_box.append(&scroller);
        let popover = gtk4::Popover::builder().child(&popover_box).build();
        let picker = gtk4::MenuButton::builder()
            .icon_name("view-app-grid-symbolic")
            .tooltip_text("Browse icons")
            .popover(&popover)
            .valign(Align::Center)
            .build();

        let controls = gtk4::Box::new(Orientation::Horizontal, 6);
        controls.append(&preview);
        controls.append(&entry);
        controls.append(&picker);

        let row = SettingsRow::new(Orientation::Horizontal);
        row.widget().append(&settings_label(label));
        row.widget().append(&controls);

        settings.bind(key, &entry, "text").build();

        let default_icon = options.default_icon;
        show_icon(&preview, &entry.text(), default_icon.as_deref());
        {
            let preview = preview.clone();
            entry.connect_changed(move |entry| {
                show_icon(&preview, &entry.text(), default_icon.as_deref());
            });
        }

        // Theme names are loaded the first time the picker opens
        let names: Rc<RefCell<Vec<String>>> = Rc::default();
        {
            let grid = grid.clone();
            let search = search.clone();
            let entry = entry.downgrade();
            let names = names.clone();
            popover.connect_show(move |popover| {
                if names.borrow().is_empty() {
                    let theme = gtk4::IconTheme::for_display(&popover.display());
                    *names.borrow_mut() =
                        theme.icon_names().iter().map(|name| name.to_string()).collect();
                    tracing::debug!("Loaded {} theme icon names", names.borrow().len());
                }
                if let Some(entry) = entry.upgrade() {
                    fill_icon_grid(&grid, &names.borrow(), &search.text(), &entry, popover);
                }
            });
        }

        {
            let entry = entry.downgrade();
            let popover = popover.downgrade();
            search.connect_search_changed(move |search| {
                if let (Some(entry), Some(popover)) = (entry.upgrade(), popover.upgrade()) {
                    fill_icon_grid(&grid, &names.borrow(), &search.text(), &entry, &popover);
                }
            });
        }

        Ok(Self { row, entry, preview })
    }

    pub fn entry(&self) -> &gtk4::Entry {
        &self.entry
    }

    pub fn preview(&self) -> &gtk4::Image {
        &self.preview
    }
}

fn show_icon(image: &gtk4::Image, value: &str, default_icon: Option<&str>) {
    match icon_source(value, default_icon) {
        IconSource::Name(name) => image.set_icon_name(Some(&name)),
        IconSource::File(path) => image.set_from_file(Some(&path)),
        IconSource::Empty => image.clear(),
    }
}

fn fill_icon_grid(
    grid: &gtk4::FlowBox,
    names: &[String],
    query: &str,
    entry: &gtk4::Entry,
    popover: &gtk4::Popover,
) {
    grid.remove_all();
    for name in filter_icon_names(names, query, ICON_GRID_LIMIT) {
        let button = gtk4::Button::from_icon_name(&name);
        button.add_css_class("flat");
        button.set_tooltip_text(Some(&name));

        let entry = entry.downgrade();
        let popover = popover.downgrade();
        button.connect_clicked(move |_| {
            if let Some(entry) = entry.upgrade() {
                entry.set_text(&name);
            }
            if let Some(popover) = popover.upgrade() {
                popover.popdown();
            }
        });
        grid.insert(&button, -1);
    }
}

impl SettingsWidget for IconChooser {
    fn row(&self) -> &SettingsRow {
        &self.row
    }

    fn content(&self) -> gtk4::Widget {
        self.entry.clone().upcast()
    }
}

// ============================================================================
// FileChooser
// ============================================================================

/// Button label for a stored URI
pub fn file_label(uri: &str) -> String {
    if uri.is_empty() {
        return "(None)".to_string();
    }
    gio::File::for_uri(uri)
        .basename()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| uri.to_string())
}

/// File or folder picker row storing a URI
pub struct FileChooser {
    row: SettingsRow,
    button: gtk4::Button,
}

impl FileChooser {
    pub fn new(
        registry: &SettingsRegistry,
        schema: &str,
        key: &str,
        label: &str,
        dir_select: bool,
    ) -> Result<Self, SettingsError> {
        let settings = registry.key(schema, key)?;

        let button = gtk4::Button::builder().valign(Align::Center).build();
        button.set_label(&file_label(&settings.string(key)));

        let row = SettingsRow::new(Orientation::Horizontal);
        row.widget().append(&settings_label(label));
        row.widget().append(&button);

        {
            let button = button.clone();
            settings.connect_changed(Some(key), move |settings, key| {
                button.set_label(&file_label(&settings.string(key)));
            });
        }

        {
            let key = key.to_string();
            button.connect_clicked(move |button| {
                let parent = button.root().and_downcast::<gtk4::Window>();
                let dialog = gtk4::FileDialog::builder().modal(true).build();
                let settings = settings.clone();
                let key = key.clone();

                let on_chosen = move |result: Result<gio::File, glib::Error>| match result {
                    Ok(file) => {
                        if let Err(e) = write_string(&settings, &key, &file.uri()) {
                            tracing::warn!("{}", e);
                        }
                    }
                    Err(e) => tracing::debug!("File selection cancelled: {}", e),
                };

                if dir_select {
                    dialog.select_folder(parent.as_ref(), None::<&gio::Cancellable>, on_chosen);
                } else {
                    dialog.open(parent.as_ref(), None::<&gio::Cancellable>, on_chosen);
                }
            });
        }

        Ok(Self { row, button })
    }
}

impl SettingsWidget for FileChooser {
    fn row(&self) -> &SettingsRow {
        &self.row
    }

    fn content(&self) -> gtk4::Widget {
        self.button.clone().upcast()
    }
}

// ============================================================================
// Button / Text
// ============================================================================

/// Click handler for [`Button`]
pub type ButtonCallback = Rc<dyn Fn(&gtk4::Button)>;

/// Full-width push button row
pub struct Button {
    row: SettingsRow,
    button: gtk4::Button,
    callback: Rc<RefCell<Option<ButtonCallback>>>,
}

impl Button {
    pub fn new(label: &str, callback: Option<ButtonCallback>) -> Self {
        let row = SettingsRow::new(Orientation::Horizontal);
        let button = gtk4::Button::with_label(label);
        button.set_hexpand(true);
        row.widget().append(&button);

        let callback = Rc::new(RefCell::new(callback));
        {
            let callback = callback.clone();
            button.connect_clicked(move |button| {
                // Clone out so the callback may replace itself
                let current = callback.borrow().clone();
                match current {
                    Some(callback) => callback(button),
                    None => tracing::warn!(
                        "Button '{}' does nothing",
                        button.label().unwrap_or_default()
                    ),
                }
            });
        }

        Self {
            row,
            button,
            callback,
        }
    }

    pub fn set_callback(&self, callback: ButtonCallback) {
        *self.callback.borrow_mut() = Some(callback);
    }

    pub fn set_label(&self, label: &str) {
        self.button.set_label(label);
    }
}

impl SettingsWidget for Button {
    fn row(&self) -> &SettingsRow {
        &self.row
    }

    fn content(&self) -> gtk4::Widget {
        self.button.clone().upcast()
    }
}

/// Horizontal alignment and justification for a [`Text`] row
pub fn text_alignment(align: Align) -> (f32, Justification) {
    match align {
        Align::End => (1.0, Justification::Right),
        Align::Center => (0.5, Justification::Center),
        _ => (0.0, Justification::Left),
    }
}

/// Static wrapped text row
pub struct Text {
    row: SettingsRow,
    label: gtk4::Label,
}

impl Text {
    pub fn new(text: &str, align: Align) -> Self {
        let (xalign, justify) = text_alignment(align);

        let row = SettingsRow::new(Orientation::Horizontal);
        let label = gtk4::Label::builder()
            .label(text)
            .halign(align)
            .xalign(xalign)
            .justify(justify)
            .wrap(true)
            .hexpand(true)
            .build();
        row.widget().append(&label);

        Self { row, label }
    }
}

impl SettingsWidget for Text {
    fn row(&self) -> &SettingsRow {
        &self.row
    }

    fn content(&self) -> gtk4::Widget {
        self.label.clone().upcast()
    }
}

// ============================================================================
// EditableEntry
// ============================================================================

/// Commit handler for [`EditableEntry`]
pub type EditedCallback = Rc<dyn Fn(&str)>;

/// Flat label button that turns into an entry when clicked
///
/// Enter commits and reports the new text; losing focus reverts it.
#[derive(Clone)]
pub struct EditableEntry {
    stack: gtk4::Stack,
    button: gtk4::Button,
    entry: gtk4::Entry,
    current_text: Rc<RefCell<String>>,
    editable: Rc<Cell<bool>>,
    on_changed: Rc<RefCell<Option<EditedCallback>>>,
}

impl Default for EditableEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl EditableEntry {
    pub fn new() -> Self {
        let stack = gtk4::Stack::builder()
            .transition_type(gtk4::StackTransitionType::Crossfade)
            .transition_duration(150)
            .build();

        let button = gtk4::Button::builder().has_frame(false).halign(Align::End).build();
        let entry = gtk4::Entry::new();
        stack.add_named(&button, Some("button"));
        stack.add_named(&entry, Some("entry"));
        stack.set_visible_child_name("button");

        let this = Self {
            stack,
            button,
            entry,
            current_text: Rc::new(RefCell::new(String::new())),
            editable: Rc::new(Cell::new(false)),
            on_changed: Rc::new(RefCell::new(None)),
        };
        this.connect_handlers();
        this
    }

    fn connect_handlers(&self) {
        {
            let this = self.clone();
            self.button.connect_clicked(move |_| {
                this.set_editable(true);
                this.entry.grab_focus();
            });
        }

        {
            let this = self.clone();
            self.entry.connect_activate(move |entry| {
                let text = entry.text().to_string();
                *this.current_text.borrow_mut() = text.clone();
                this.set_editable(false);

                let callback = this.on_changed.borrow().clone();
                if let Some(callback) = callback {
                    callback(&text);
                }
            });
        }

        {
            let button = self.button.clone();
            self.entry.connect_changed(move |entry| {
                button.set_label(&entry.text());
            });
        }

        let focus = gtk4::EventControllerFocus::new();
        {
            let this = self.clone();
            focus.connect_leave(move |_| {
                if !this.editable.get() {
                    return;
                }
                let current = this.current_text.borrow().clone();
                this.button.set_label(&current);
                this.entry.set_text(&current);
                this.set_editable(false);
            });
        }
        self.entry.add_controller(focus);
    }

    pub fn widget(&self) -> &gtk4::Stack {
        &self.stack
    }

    pub fn set_text(&self, text: &str) {
        *self.current_text.borrow_mut() = text.to_string();
        self.button.set_label(text);
        self.entry.set_text(text);
    }

    /// Text in the entry (the draft while editing)
    pub fn text(&self) -> String {
        self.entry.text().to_string()
    }

    pub fn set_editable(&self, editable: bool) {
        self.stack
            .set_visible_child_name(if editable { "entry" } else { "button" });
        self.editable.set(editable);
    }

    pub fn is_editable(&self) -> bool {
        self.editable.get()
    }

    pub fn set_tooltip_text(&self, tooltip: &str) {
        self.button.set_tooltip_text(Some(tooltip));
    }

    /// Called with the new text after every commit
    pub fn connect_changed(&self, f: impl Fn(&str) + 'static) {
        *self.on_changed.borrow_mut() = Some(Rc::new(f));
    }
}

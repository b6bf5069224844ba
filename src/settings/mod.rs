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

//! GSettings-backed settings widgets
//!
//! # Architecture
//!
//! - **`registry`:** Shared cache of `gio::Settings` handles
//! - **`widgets`:** Rows bound to a single key (switch, spin, range...)
//! - **`layout`:** Pages, sections, revealers and the page stack
//! - **`dep_key`:** `[!]schema/key` sensitivity bindings
//! - **`range`, `variant`, `color`, `font`, `icon`:** Display-free conversion helpers
//!
//! # Example
//!
//! ```no_run
//! use xapp_widgets::settings::{SettingsPage, SettingsRegistry, SettingsWidget, Switch};
//!
//! gtk4::init()?;
//! let registry = SettingsRegistry::new();
//! let page = SettingsPage::new();
//! let section = page.add_section(Some("Desktop"), None);
//!
//! let icons = Switch::new(&registry, "org.nemo.desktop", "show-desktop-icons", "Show icons")?;
//! section.add_row(&icons);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod color;
pub mod dep_key;
pub mod error;
pub mod font;
pub mod icon;
pub mod layout;
pub mod range;
pub mod registry;
pub mod variant;
pub mod widgets;

pub use dep_key::DepKey;
pub use error::SettingsError;
pub use layout::{should_reveal, RevealCheck, SettingsPage, SettingsRevealer, SettingsSection, SettingsStack};
pub use range::RangeMapping;
pub use registry::SettingsRegistry;
pub use variant::{f64_to_variant, range_bounds, variant_to_f64};
pub use icon::IconSource;
pub use widgets::{
    Button, ButtonCallback, ColorChooser, ComboBox, EditableEntry, Entry, FileChooser, FontButton,
    IconChooser, IconOptions, Range, RangeOptions, SettingsRow, SettingsWidget, SpinButton,
    SpinOptions, Switch, Text, TextView,
};

#[cfg(test)]
mod tests;

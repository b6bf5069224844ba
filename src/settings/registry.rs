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

//! Per-application GSettings handle cache
//!
//! Widgets never create `gio::Settings` themselves. They ask the registry,
//! which opens each schema once and hands out clones of the handle. Clone
//! the registry freely; all clones share one cache.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gtk4::gio::{self, prelude::*};

use crate::settings::variant::range_bounds;
use crate::settings::{variant_to_f64, f64_to_variant, SettingsError};

#[derive(Clone)]
struct SchemaHandle {
    settings: gio::Settings,
    schema: gio::SettingsSchema,
}

/// Shared cache of opened schemas
#[derive(Clone, Default)]
pub struct SettingsRegistry {
    cache: Rc<RefCell<HashMap<String, SchemaHandle>>>,
}

impl SettingsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, schema_id: &str) -> Result<SchemaHandle, SettingsError> {
        if let Some(handle) = self.cache.borrow().get(schema_id) {
            return Ok(handle.clone());
        }

        let schema = gio::SettingsSchemaSource::default()
            .and_then(|source| source.lookup(schema_id, true))
            .ok_or_else(|| SettingsError::SchemaNotFound(schema_id.to_string()))?;
        let settings = gio::Settings::new_full(&schema, None::<&gio::SettingsBackend>, None);

        tracing::debug!("Opened settings schema {}", schema_id);
        let handle = SchemaHandle { settings, schema };
        self.cache
            .borrow_mut()
            .insert(schema_id.to_string(), handle.clone());
        Ok(handle)
    }

    /// Returns the settings handle for `schema_id`, opening it on first use
    ///
    /// # Errors
    ///
    /// [`SettingsError::SchemaNotFound`] if the schema is not installed.
    pub fn get(&self, schema_id: &str) -> Result<gio::Settings, SettingsError> {
        self.handle(schema_id).map(|handle| handle.settings)
    }

    /// Like [`get`](Self::get), but also checks that `key` exists
    ///
    /// Binding a missing key aborts inside GIO, so every widget goes
    /// through this check first.
    pub fn key(&self, schema_id: &str, key: &str) -> Result<gio::Settings, SettingsError> {
        let handle = self.handle(schema_id)?;
        if !handle.schema.has_key(key) {
            return Err(SettingsError::KeyNotFound {
                schema: schema_id.to_string(),
                key: key.to_string(),
            });
        }
        Ok(handle.settings)
    }

    /// Numeric range declared for `key` in the schema, if any
    pub fn key_range(&self, schema_id: &str, key: &str) -> Result<Option<(f64, f64)>, SettingsError> {
        self.key(schema_id, key)?;
        let handle = self.handle(schema_id)?;
        Ok(range_bounds(&handle.schema.key(key).range()))
    }

    /// Whether `schema_id` has already been opened
    pub fn contains(&self, schema_id: &str) -> bool {
        self.cache.borrow().contains_key(schema_id)
    }

    /// Number of opened schemas
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }
}

/// Reads a numeric key as `f64`
pub fn read_number(settings: &gio::Settings, key: &str) -> Option<f64> {
    variant_to_f64(&settings.value(key))
}

/// Writes `value` to a numeric key in the key's own type
///
/// Writing the value already stored is a no-op.
pub fn write_number(settings: &gio::Settings, key: &str, value: f64) -> Result<(), SettingsError> {
    let current = settings.value(key);
    let variant = f64_to_variant(value, current.type_()).ok_or_else(|| {
        SettingsError::UnsupportedType {
            key: key.to_string(),
            type_name: current.type_().to_string(),
        }
    })?;

    if variant == current {
        return Ok(());
    }

    settings
        .set_value(key, &variant)
        .map_err(|e| SettingsError::WriteFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

/// Writes a string key
pub fn write_string(settings: &gio::Settings, key: &str, value: &str) -> Result<(), SettingsError> {
    settings
        .set_string(key, value)
        .map_err(|e| SettingsError::WriteFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

/// Writes an arbitrary variant
pub fn write_value(
    settings: &gio::Settings,
    key: &str,
    value: &glib::Variant,
) -> Result<(), SettingsError> {
    settings
        .set_value(key, value)
        .map_err(|e| SettingsError::WriteFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

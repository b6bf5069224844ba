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

//! Settings binding errors

use thiserror::Error;

/// Errors raised while binding widgets to GSettings
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Schema id is not installed on this system
    #[error("GSettings schema '{0}' is not installed")]
    SchemaNotFound(String),

    /// Schema exists but does not define the key
    #[error("Schema '{schema}' has no key '{key}'")]
    KeyNotFound { schema: String, key: String },

    /// Dependency key could not be parsed
    #[error("Invalid dependency key '{0}': expected [!]schema/key")]
    InvalidDepKey(String),

    /// Key type cannot back this widget
    #[error("Key '{key}' has unsupported type '{type_name}'")]
    UnsupportedType { key: String, type_name: String },

    /// Numeric widget has neither explicit bounds nor a schema range
    #[error("Key '{0}' has no range; pass explicit bounds")]
    MissingRange(String),

    /// GSettings refused the value (read-only key or type mismatch)
    #[error("Failed to write '{key}': {reason}")]
    WriteFailed { key: String, reason: String },
}

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

//! GTK4 user interface
//!
//! # Module Structure
//!
//! ```text
//! ui/
//! ├── mod.rs          // This file - exports
//! ├── list_editor.rs  // ListEditor widget over core::ListModel
//! ├── dialogs.rs      // Confirmation and message dialogs
//! └── demo.rs         // Interactive demo window
//! ```
//!
//! The list logic itself lives in [`crate::core`]; widgets here only
//! render it and forward user actions.

pub mod demo;
pub mod dialogs;
pub mod list_editor;

pub use {demo::run_demo, list_editor::ListEditor};

#[cfg(test)]
mod tests;

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

//! XApp widgets
//!
//! Reusable GTK4 building blocks for desktop configuration tools.
//!
//! # Features
//!
//! - **Settings Widgets:** Rows bound to GSettings keys, grouped into
//!   sections, pages and stacks, with dependency keys and revealers
//! - **List Editor:** Editable string list with validation, auto-sort,
//!   manual ordering and an inline add/edit page
//! - **Session Helpers:** Desktop detection, live/guest sessions,
//!   process checks and privilege elevation
//! - **Threading Helpers:** Background work with results delivered on
//!   the GTK main loop
//!
//! # Architecture
//!
//! - **`core`:** List model logic, free of GTK (validation, sorting, toolbar rules)
//! - **`settings`:** GSettings-bound widgets and layout containers
//! - **`ui`:** List editor widget, dialogs and the demo window
//! - **`os`:** Session and system helpers
//! - **`threading`:** Worker thread and idle dispatch helpers
//! - **`logging`:** tracing subscriber setup
//!
//! # Examples
//!
//! ## Driving the list model
//!
//! ```
//! use xapp_widgets::core::ListModel;
//!
//! let model = ListModel::with_strings(["Zebra", "Apple"]);
//! model.add_string("Mango")?;
//! assert_eq!(model.get_strings(), vec!["Apple", "Mango", "Zebra"]);
//! # Ok::<(), xapp_widgets::core::Rejection>(())
//! ```
//!
//! ## Checking the session
//!
//! ```no_run
//! use xapp_widgets::os;
//!
//! if os::is_live_session() {
//!     println!("Running from live media on {}", os::current_desktop());
//! }
//! ```

pub mod core;
pub mod logging;
pub mod os;
pub mod settings;
pub mod threading;
pub mod ui;

// Re-export commonly used types for convenience
pub use core::{EditorOptions, ListModel, Rejection};
pub use os::Session;
pub use ui::ListEditor;

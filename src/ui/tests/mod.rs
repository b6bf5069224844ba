//! UI module tests
//!
//! Most widgets need a display, so these mainly cover the demo's pure
//! helpers and their interaction with the list model. Editor lifetime
//! tests are skipped when GTK cannot initialise.

#[cfg(test)]
mod list_editor_tests;

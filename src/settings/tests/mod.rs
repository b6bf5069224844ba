//! Settings helper tests
//!
//! Only the display-free parts are covered here; nothing needs installed
//! schemas or a running compositor.

#[cfg(test)]
mod conversion_tests;
#[cfg(test)]
mod icon_tests;
#[cfg(test)]
mod range_tests;

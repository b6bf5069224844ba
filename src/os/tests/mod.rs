//! OS helper tests
//!
//! - Session detection, live/guest checks and process lookup
//! - Privilege elevation planning against a fake host

#[cfg(test)]
mod elevation_tests;

//! Core module tests
//!
//! Contains test suites for core functionality:
//! - List model operations, ordering and notification
//! - Interactive draft flow
//! - Sorting and fallback
//! - Candidate validation
//! - Toolbar state

#[cfg(test)]
mod list_model_tests;
#[cfg(test)]
mod validator_tests;

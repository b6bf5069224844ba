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

//! Sort keys and the stable auto-sort
//!
//! A sort key function maps an item to a [`SortKey`]. Keys compare part by
//! part, so composite orderings such as "by length, then alphabetically"
//! are one key function:
//!
//! ```
//! use xapp_widgets::core::sorting::SortKey;
//!
//! let by_length = |s: &str| SortKey::new().int(s.len() as i64).text(s.to_lowercase());
//! assert!(by_length("Fig") < by_length("Apple"));
//! ```
//!
//! If the function fails for any item in a batch, the whole batch falls
//! back to case-insensitive order.

use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// One component of a sort key
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum KeyPart {
    Int(i64),
    Text(String),
}

/// Comparable key produced by a sort key function
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct SortKey(Vec<KeyPart>);

impl SortKey {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Key made of a single text part
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new().text(text)
    }

    /// Appends an integer part
    pub fn int(mut self, value: i64) -> Self {
        self.0.push(KeyPart::Int(value));
        self
    }

    /// Appends a text part
    pub fn text(mut self, value: impl Into<String>) -> Self {
        self.0.push(KeyPart::Text(value.into()));
        self
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }
}

/// A key function could not produce a key for an item
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("Cannot compute sort key for '{item}': {reason}")]
pub struct SortKeyError {
    pub item: String,
    pub reason: String,
}

impl SortKeyError {
    pub fn new(item: &str, reason: impl Into<String>) -> Self {
        Self {
            item: item.to_string(),
            reason: reason.into(),
        }
    }
}

/// Injected key function
pub type SortKeyFn = Rc<dyn Fn(&str) -> Result<SortKey, SortKeyError>>;

/// How the list keeps itself ordered when manual ordering is off
#[derive(Clone, Default)]
pub enum SortPolicy {
    /// Case-insensitive lexicographic order
    #[default]
    Default,
    /// Caller-provided key function
    Custom(SortKeyFn),
    /// No auto-sort; insertion order is kept
    Disabled,
}

impl SortPolicy {
    /// Wraps a key function as a policy
    pub fn custom<F>(key_fn: F) -> Self
    where
        F: Fn(&str) -> Result<SortKey, SortKeyError> + 'static,
    {
        SortPolicy::Custom(Rc::new(key_fn))
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, SortPolicy::Disabled)
    }
}

impl fmt::Debug for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortPolicy::Default => write!(f, "SortPolicy::Default"),
            SortPolicy::Custom(_) => write!(f, "SortPolicy::Custom(..)"),
            SortPolicy::Disabled => write!(f, "SortPolicy::Disabled"),
        }
    }
}

/// The fallback key: case-insensitive text
pub fn default_key(item: &str) -> SortKey {
    SortKey::from_text(item.to_lowercase())
}

/// Computes the stable sort permutation of `items` under `policy`
///
/// Returns indices into `items` in sorted order. Equal keys keep their
/// relative input order. `None` when the policy is disabled.
pub fn sorted_order(items: &[String], policy: &SortPolicy) -> Option<Vec<usize>> {
    let keys: Vec<SortKey> = match policy {
        SortPolicy::Disabled => return None,
        SortPolicy::Default => items.iter().map(|s| default_key(s)).collect(),
        SortPolicy::Custom(key_fn) => match items
            .iter()
            .map(|s| key_fn(s))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(keys) => keys,
            Err(e) => {
                tracing::debug!("{}; falling back to case-insensitive order", e);
                items.iter().map(|s| default_key(s)).collect()
            }
        },
    };

    let mut order: Vec<usize> = (0..items.len()).collect();
    // slice::sort_by is stable
    order.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
    Some(order)
}

/// Returns a sorted copy of `items`, or `None` when the policy is disabled
pub fn sorted(items: &[String], policy: &SortPolicy) -> Option<Vec<String>> {
    sorted_order(items, policy)
        .map(|order| order.into_iter().map(|i| items[i].clone()).collect())
}

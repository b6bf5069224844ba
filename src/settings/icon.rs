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

//! Icon values
//!
//! An icon key holds either a themed icon name or a path to an image file.

use std::path::PathBuf;

use gtk4::gio;
use gtk4::gio::prelude::FileExt;

/// What an icon value refers to
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IconSource {
    /// Name looked up in the icon theme
    Name(String),
    /// Image file on disk
    File(PathBuf),
    /// Nothing to show
    Empty,
}

/// Classifies an icon value
///
/// `file://` URIs and anything containing `/` are files (with `~` expanded);
/// everything else is a theme name. An empty value shows `default_icon`.
pub fn icon_source(value: &str, default_icon: Option<&str>) -> IconSource {
    let value = value.trim();
    if value.is_empty() {
        return default_icon
            .filter(|name| !name.is_empty())
            .map_or(IconSource::Empty, |name| IconSource::Name(name.to_string()));
    }

    if value.starts_with("file://") {
        return gio::File::for_uri(value)
            .path()
            .map_or(IconSource::Empty, IconSource::File);
    }

    if value.contains('/') {
        return IconSource::File(PathBuf::from(shellexpand::tilde(value).into_owned()));
    }

    IconSource::Name(value.to_string())
}

/// Theme icon names matching `query`, sorted, at most `limit`
///
/// Matching is a case-insensitive substring test; an empty query matches
/// everything.
pub fn filter_icon_names<S: AsRef<str>>(names: &[S], query: &str, limit: usize) -> Vec<String> {
    let query = query.trim().to_lowercase();
    let mut matches: Vec<String> = names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| query.is_empty() || name.to_lowercase().contains(&query))
        .map(str::to_string)
        .collect();
    matches.sort();
    matches.dedup();
    matches.truncate(limit);
    matches
}

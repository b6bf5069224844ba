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

//! Font description strings
//!
//! Keys hold Pango font strings such as `Sans Bold 10`.

use gtk4::pango;

/// Parses a font string; `None` if it names no family
pub fn parse_font(text: &str) -> Option<pango::FontDescription> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let desc = pango::FontDescription::from_string(text);
    desc.family().is_some().then_some(desc)
}

/// Combines a picked font with the stored one
///
/// Fields the picker did not set (size at the face level, style and size
/// at the family level) keep their stored values.
pub fn merge_font(
    chosen: &pango::FontDescription,
    current: Option<&pango::FontDescription>,
) -> String {
    let mut merged = chosen.clone();
    merged.merge(current, false);
    merged.to_str().to_string()
}

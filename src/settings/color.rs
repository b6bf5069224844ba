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

//! Colour string formats
//!
//! Colours are stored as `rgba(r,g,b,a)` / `rgb(r,g,b)` strings. Some
//! older keys hold the legacy `#rrrrggggbbbb` form with 16 bits per channel.

use gtk4::gdk;

/// Formats channels (0.0 to 1.0) as `#rrrrggggbbbb`
pub fn legacy_color_string(red: f32, green: f32, blue: f32) -> String {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 65535.0).round() as u16;
    format!(
        "#{:04x}{:04x}{:04x}",
        channel(red),
        channel(green),
        channel(blue)
    )
}

/// Formats `rgba` in the form the setting expects
pub fn color_string(rgba: &gdk::RGBA, legacy: bool) -> String {
    if legacy {
        legacy_color_string(rgba.red(), rgba.green(), rgba.blue())
    } else {
        rgba.to_string()
    }
}

/// Parses any colour string GDK understands, including the legacy form
pub fn parse_color(text: &str) -> Option<gdk::RGBA> {
    gdk::RGBA::parse(text).ok()
}

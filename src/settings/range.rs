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

//! Slider and spin button arithmetic
//!
//! [`RangeMapping`] converts between the value stored in GSettings and the
//! position of a scale, covering logarithmic, flipped and inverted scales.
//! Kept free of GTK so the maths can be tested without a display.

/// Fraction of the scale span used as step when none is given
pub const DEFAULT_STEP_FRACTION: f64 = 0.02;

/// Picks the effective bounds of a numeric widget
///
/// Explicit bounds are narrowed to the schema range. Without explicit
/// bounds the schema range is used as-is.
pub fn resolve_bounds(requested: Option<(f64, f64)>, schema: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (requested, schema) {
        (Some((min, max)), Some((schema_min, schema_max))) => {
            Some((min.max(schema_min), max.min(schema_max)))
        }
        (Some(bounds), None) => Some(bounds),
        (None, schema) => schema,
    }
}

/// Number of decimal places in `step`
///
/// `1` gives 0, `0.1` gives 1, `0.05` gives 2.
pub fn digits_for_step(step: f64) -> u32 {
    let text = step.to_string();
    match text.split_once('.') {
        Some((_, decimals)) => decimals.len() as u32,
        None => 0,
    }
}

/// Formats a scale value with fixed precision and a units suffix
pub fn format_value(value: f64, digits: usize, units: &str) -> String {
    format!("{:.*}{}", digits, value, units)
}

/// Setting value to scale position mapping
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeMapping {
    log: bool,
    flipped: bool,
    invert: bool,
    min: f64,
    max: f64,
    step: f64,
}

impl RangeMapping {
    /// Builds the mapping for a scale
    ///
    /// # Arguments
    ///
    /// * `bounds` - `(min, max)` in setting units
    /// * `step` - Step in setting units, 2% of the span if `None`
    /// * `log` - Logarithmic scale (bounds must be positive)
    /// * `flipped` - Higher values towards the start of the scale
    /// * `invert` - Scale drawn inverted; scrolling direction follows
    pub fn new(bounds: (f64, f64), step: Option<f64>, log: bool, flipped: bool, invert: bool) -> Self {
        let (mut min, mut max) = bounds;

        if log {
            min = min.ln();
            max = max.ln();
        }

        if flipped {
            (min, max) = (-max, -min);
        }

        let step = match step {
            Some(step) if log => step.ln(),
            Some(step) => step,
            None => (max - min) * DEFAULT_STEP_FRACTION,
        };

        Self {
            log,
            flipped,
            invert,
            min,
            max,
            step,
        }
    }

    /// Lower bound of the scale
    pub fn scale_min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the scale
    pub fn scale_max(&self) -> f64 {
        self.max
    }

    /// Positive step for the scale's adjustment
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn is_log(&self) -> bool {
        self.log
    }

    /// Step applied per scroll unit, negative on inverted scales
    pub fn scroll_step(&self) -> f64 {
        if self.invert {
            -self.step
        } else {
            self.step
        }
    }

    /// Scale position for a stored value
    pub fn to_scale(&self, value: f64) -> f64 {
        match (self.log, self.flipped) {
            (true, true) => -value.ln(),
            (true, false) => value.ln(),
            (false, true) => -value,
            (false, false) => value,
        }
    }

    /// Stored value for a scale position
    pub fn from_scale(&self, position: f64) -> f64 {
        if self.log {
            position.abs().exp()
        } else if self.flipped {
            -position
        } else {
            position
        }
    }

    /// Position after scrolling by `delta_y` (negative is up)
    pub fn scrolled(&self, position: f64, delta_y: f64) -> f64 {
        position - delta_y * self.scroll_step()
    }

    /// Whether positions snap to whole steps
    ///
    /// Only linear scales with an integral step snap.
    pub fn rounds_to_step(&self) -> bool {
        !self.log && self.step != 0.0 && self.step % 1.0 == 0.0
    }

    /// Nearest whole-step position, or `None` if already on a step
    pub fn round_to_step(&self, position: f64) -> Option<f64> {
        if self.step == 0.0 || position % self.step == 0.0 {
            return None;
        }
        Some((position / self.step).round() * self.step)
    }

    /// Scale position for a mark given in setting units
    pub fn mark_position(&self, value: f64) -> f64 {
        if self.log {
            value.ln()
        } else {
            value
        }
    }

    /// Whether the scale should draw its value label
    ///
    /// Flipped scales show negated positions, so the label is hidden.
    pub fn draws_value(&self, show_value: bool) -> bool {
        show_value && !self.flipped
    }
}

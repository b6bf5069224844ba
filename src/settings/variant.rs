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

//! Numeric conversions between GSettings values and widget doubles
//!
//! Spin buttons and scales work in `f64`; keys may be any numeric GVariant
//! type. Integer types round to the nearest value and saturate at their bounds.

use glib::{prelude::ToVariant, VariantTy};

/// Reads a numeric variant as `f64`
///
/// Returns `None` for non-numeric types.
pub fn variant_to_f64(value: &glib::Variant) -> Option<f64> {
    match value.type_().as_str() {
        "y" => value.get::<u8>().map(f64::from),
        "n" => value.get::<i16>().map(f64::from),
        "q" => value.get::<u16>().map(f64::from),
        "i" => value.get::<i32>().map(f64::from),
        "u" => value.get::<u32>().map(f64::from),
        "x" => value.get::<i64>().map(|v| v as f64),
        "t" => value.get::<u64>().map(|v| v as f64),
        "d" => value.get::<f64>(),
        _ => None,
    }
}

/// Builds a variant of type `ty` holding `value`
///
/// Returns `None` when `ty` is not numeric or `value` is not finite.
pub fn f64_to_variant(value: f64, ty: &VariantTy) -> Option<glib::Variant> {
    if !value.is_finite() {
        return None;
    }

    let rounded = value.round();
    let variant = match ty.as_str() {
        "y" => (rounded as u8).to_variant(),
        "n" => (rounded as i16).to_variant(),
        "q" => (rounded as u16).to_variant(),
        "i" => (rounded as i32).to_variant(),
        "u" => (rounded as u32).to_variant(),
        "x" => (rounded as i64).to_variant(),
        "t" => (rounded as u64).to_variant(),
        "d" => value.to_variant(),
        _ => return None,
    };
    Some(variant)
}

/// Extracts `(min, max)` from a schema key range description
///
/// GSettings describes ranges as `(sv)`; only the `"range"` kind carries
/// numeric bounds.
pub fn range_bounds(range: &glib::Variant) -> Option<(f64, f64)> {
    if range.type_().as_str() != "(sv)" {
        return None;
    }

    let kind = range.try_child_value(0)?;
    if kind.str()? != "range" {
        return None;
    }

    let bounds = range.try_child_value(1)?.as_variant()?;
    if !bounds.is_container() || bounds.n_children() != 2 {
        return None;
    }
    let min = variant_to_f64(&bounds.try_child_value(0)?)?;
    let max = variant_to_f64(&bounds.try_child_value(1)?)?;
    Some((min, max))
}

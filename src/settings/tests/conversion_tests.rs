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

use std::rc::Rc;

use glib::{prelude::ToVariant, VariantTy};
use gtk4::Align;
use gtk4::Justification;

use crate::settings::color::legacy_color_string;
use crate::settings::widgets::{file_label, label_with_units, option_index, text_alignment};
use crate::settings::{f64_to_variant, range_bounds, should_reveal, variant_to_f64, RevealCheck};

#[test]
fn test_numeric_variants_read_as_f64() {
    assert_eq!(variant_to_f64(&5i32.to_variant()), Some(5.0));
    assert_eq!(variant_to_f64(&7u32.to_variant()), Some(7.0));
    assert_eq!(variant_to_f64(&(-3i64).to_variant()), Some(-3.0));
    assert_eq!(variant_to_f64(&0.5f64.to_variant()), Some(0.5));
    assert_eq!(variant_to_f64(&"5".to_variant()), None);
    assert_eq!(variant_to_f64(&true.to_variant()), None);
}

#[test]
fn test_f64_written_in_key_type() {
    assert_eq!(f64_to_variant(2.6, VariantTy::INT32), Some(3i32.to_variant()));
    assert_eq!(f64_to_variant(2.6, VariantTy::UINT32), Some(3u32.to_variant()));
    assert_eq!(f64_to_variant(2.6, VariantTy::DOUBLE), Some(2.6f64.to_variant()));
    assert_eq!(f64_to_variant(-1.0, VariantTy::UINT32), Some(0u32.to_variant()), "Saturates");
    assert_eq!(f64_to_variant(1.0, VariantTy::STRING), None);
    assert_eq!(f64_to_variant(f64::NAN, VariantTy::DOUBLE), None);
}

#[test]
fn test_schema_range_bounds() {
    let range = ("range", (0i32, 100i32).to_variant()).to_variant();
    assert_eq!(range_bounds(&range), Some((0.0, 100.0)));

    let doubles = ("range", (0.5f64, 2.0f64).to_variant()).to_variant();
    assert_eq!(range_bounds(&doubles), Some((0.5, 2.0)));
}

#[test]
fn test_non_range_kinds_have_no_bounds() {
    let type_only = ("type", glib::Variant::tuple_from_iter(std::iter::empty::<glib::Variant>())).to_variant();
    assert_eq!(range_bounds(&type_only), None);

    let not_a_range = 5i32.to_variant();
    assert_eq!(range_bounds(&not_a_range), None);
}

#[test]
fn test_legacy_color_string() {
    assert_eq!(legacy_color_string(1.0, 0.0, 0.5), "#ffff00008000");
    assert_eq!(legacy_color_string(0.0, 0.0, 0.0), "#000000000000");
    assert_eq!(legacy_color_string(2.0, -1.0, 1.0), "#ffff0000ffff", "Clamped");
}

#[test]
fn test_option_index_matches_variants() {
    let options = vec![
        ("left".to_variant(), "Left".to_string()),
        ("right".to_variant(), "Right".to_string()),
    ];
    assert_eq!(option_index(&options, &"right".to_variant()), Some(1));
    assert_eq!(option_index(&options, &"middle".to_variant()), None);
}

#[test]
fn test_reveal_by_membership() {
    let values = vec![1i32.to_variant(), 3i32.to_variant()];
    assert!(should_reveal(&3i32.to_variant(), &values, None));
    assert!(!should_reveal(&2i32.to_variant(), &values, None));
}

#[test]
fn test_reveal_by_check_function() {
    let check: RevealCheck = Rc::new(|value: &glib::Variant, _: &[glib::Variant]| {
        value.get::<i32>().is_some_and(|v| v > 10)
    });
    assert!(should_reveal(&11i32.to_variant(), &[], Some(&check)));
    assert!(!should_reveal(&3i32.to_variant(), &[3i32.to_variant()], Some(&check)));
}

#[test]
fn test_units_suffix() {
    assert_eq!(label_with_units("Delay", "ms"), "Delay (ms)");
    assert_eq!(label_with_units("Delay", ""), "Delay");
}

#[test]
fn test_text_alignment() {
    assert_eq!(text_alignment(Align::End), (1.0, Justification::Right));
    assert_eq!(text_alignment(Align::Center), (0.5, Justification::Center));
    assert_eq!(text_alignment(Align::Start), (0.0, Justification::Left));
    assert_eq!(text_alignment(Align::Fill), (0.0, Justification::Left));
}

#[test]
fn test_file_label_shows_basename() {
    assert_eq!(file_label("file:///home/user/Pictures/bg.png"), "bg.png");
    assert_eq!(file_label(""), "(None)");
}

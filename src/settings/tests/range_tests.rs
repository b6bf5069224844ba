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

use crate::settings::range::{digits_for_step, format_value, resolve_bounds, RangeMapping};

const EPSILON: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

#[test]
fn test_resolve_bounds() {
    assert_eq!(resolve_bounds(None, Some((0.0, 10.0))), Some((0.0, 10.0)));
    assert_eq!(resolve_bounds(Some((-5.0, 20.0)), Some((0.0, 10.0))), Some((0.0, 10.0)));
    assert_eq!(resolve_bounds(Some((2.0, 8.0)), Some((0.0, 10.0))), Some((2.0, 8.0)));
    assert_eq!(resolve_bounds(Some((2.0, 8.0)), None), Some((2.0, 8.0)));
    assert_eq!(resolve_bounds(None, None), None);
}

#[test]
fn test_default_step_is_two_percent() {
    let mapping = RangeMapping::new((0.0, 50.0), None, false, false, false);
    assert!(close(mapping.step(), 1.0));
}

#[test]
fn test_linear_mapping_is_identity() {
    let mapping = RangeMapping::new((0.0, 100.0), Some(5.0), false, false, false);
    assert_eq!(mapping.scale_min(), 0.0);
    assert_eq!(mapping.scale_max(), 100.0);
    assert_eq!(mapping.to_scale(42.0), 42.0);
    assert_eq!(mapping.from_scale(42.0), 42.0);
}

#[test]
fn test_log_mapping() {
    let mapping = RangeMapping::new((1.0, 100.0), None, true, false, false);
    assert!(close(mapping.scale_min(), 0.0));
    assert!(close(mapping.scale_max(), 100f64.ln()));
    assert!(close(mapping.to_scale(10.0), 10f64.ln()));
    assert!(close(mapping.from_scale(10f64.ln()), 10.0));
    assert!(close(mapping.mark_position(100.0), 100f64.ln()));
    assert!(!mapping.rounds_to_step(), "Log scales never snap");
}

#[test]
fn test_log_step_is_logarithmic() {
    let mapping = RangeMapping::new((1.0, 100.0), Some(2.0), true, false, false);
    assert!(close(mapping.step(), 2f64.ln()));
}

#[test]
fn test_flipped_mapping() {
    let mapping = RangeMapping::new((0.0, 10.0), Some(1.0), false, true, false);
    assert_eq!(mapping.scale_min(), -10.0);
    assert_eq!(mapping.scale_max(), 0.0);
    assert_eq!(mapping.to_scale(3.0), -3.0);
    assert_eq!(mapping.from_scale(-3.0), 3.0);
    assert!(!mapping.draws_value(true), "Negated positions are not drawn");
}

#[test]
fn test_flipped_log_mapping() {
    let mapping = RangeMapping::new((1.0, 100.0), None, true, true, false);
    assert!(close(mapping.scale_min(), -(100f64.ln())));
    assert!(close(mapping.scale_max(), 0.0));
    assert!(close(mapping.to_scale(10.0), -(10f64.ln())));
    assert!(close(mapping.from_scale(-(10f64.ln())), 10.0));
}

#[test]
fn test_scroll_direction_follows_inversion() {
    let normal = RangeMapping::new((0.0, 10.0), Some(1.0), false, false, false);
    assert_eq!(normal.scrolled(5.0, -1.0), 6.0, "Scrolling up increases");

    let inverted = RangeMapping::new((0.0, 10.0), Some(1.0), false, false, true);
    assert_eq!(inverted.step(), 1.0);
    assert_eq!(inverted.scrolled(5.0, -1.0), 4.0);
}

#[test]
fn test_round_to_integral_step() {
    let mapping = RangeMapping::new((0.0, 100.0), Some(5.0), false, false, false);
    assert!(mapping.rounds_to_step());
    assert_eq!(mapping.round_to_step(12.0), Some(10.0));
    assert_eq!(mapping.round_to_step(13.0), Some(15.0));
    assert_eq!(mapping.round_to_step(15.0), None);
}

#[test]
fn test_fractional_step_does_not_snap() {
    let mapping = RangeMapping::new((0.0, 1.0), Some(0.1), false, false, false);
    assert!(!mapping.rounds_to_step());
}

#[test]
fn test_digits_for_step() {
    assert_eq!(digits_for_step(1.0), 0);
    assert_eq!(digits_for_step(10.0), 0);
    assert_eq!(digits_for_step(0.1), 1);
    assert_eq!(digits_for_step(0.05), 2);
    assert_eq!(digits_for_step(2.5), 1);
}

#[test]
fn test_format_value_with_units() {
    assert_eq!(format_value(1.26, 1, "px"), "1.3px");
    assert_eq!(format_value(3.0, 0, "%"), "3%");
    assert_eq!(format_value(0.5, 2, ""), "0.50");
}

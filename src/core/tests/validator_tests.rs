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

use crate::core::{validate_candidate, Capability, Rejection, ValidationRule};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn no_r_allowed() -> ValidationRule {
    Rc::new(|text: &str| {
        if text.to_lowercase().contains('r') {
            Err("There is an R in the text!!".to_string())
        } else {
            Ok(())
        }
    })
}

#[test]
fn test_empty_text_rejected_first() {
    let rule = no_r_allowed();
    assert_eq!(
        validate_candidate("", Some(&rule), false, &[], None),
        Err(Rejection::Empty)
    );
}

#[test]
fn test_whitespace_is_not_empty_for_validation() {
    assert!(validate_candidate("  ", None, false, &[], None).is_ok());
}

#[test]
fn test_rule_runs_before_duplicate_check() {
    let rule = no_r_allowed();
    let existing = strings(&["Cherry"]);
    assert_eq!(
        validate_candidate("Cherry", Some(&rule), false, &existing, None),
        Err(Rejection::Invalid("There is an R in the text!!".to_string()))
    );
}

#[test]
fn test_rule_with_empty_reason() {
    let rule: ValidationRule = Rc::new(|_: &str| -> Result<(), String> { Err(String::new()) });
    let result = validate_candidate("x", Some(&rule), false, &[], None);
    assert_eq!(result, Err(Rejection::Invalid(String::new())));
    assert_eq!(result.unwrap_err().reason(), "");
}

#[test]
fn test_duplicate_detection() {
    let existing = strings(&["Apple", "Banana"]);
    assert_eq!(
        validate_candidate("Apple", None, false, &existing, None),
        Err(Rejection::Duplicate("Apple".to_string()))
    );
    assert!(validate_candidate("Apple", None, true, &existing, None).is_ok());
    assert!(validate_candidate("Cherry", None, false, &existing, None).is_ok());
}

#[test]
fn test_excluded_index_is_skipped() {
    let existing = strings(&["Apple", "Banana"]);
    assert!(validate_candidate("Apple", None, false, &existing, Some(0)).is_ok());
    assert!(validate_candidate("Apple", None, false, &existing, Some(1)).is_err());
}

#[test]
fn test_rejection_messages() {
    assert_eq!(
        Rejection::Duplicate("Apple".to_string()).to_string(),
        "'Apple' is already in the list."
    );
    assert_eq!(Rejection::Empty.reason(), "");
    assert_eq!(
        Rejection::CapabilityDisabled(Capability::Clear).to_string(),
        "The clear action is not enabled"
    );
    assert_eq!(Rejection::InvalidIndex(3).to_string(), "No item at index 3");
}

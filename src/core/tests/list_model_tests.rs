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

//! List model tests
//!
//! Content operations, ordering modes and "list changed" delivery.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{
    Capability, EditorOptions, ListModel, MoveDirection, Rejection, SortKey, SortKeyError,
    SortMode,
};

const FRUITS: [&str; 5] = ["Zebra", "Apple", "Mango", "Banana", "Cherry"];
const SORTED_FRUITS: [&str; 5] = ["Apple", "Banana", "Cherry", "Mango", "Zebra"];

/// Helper: model seeded with the sample fruits
fn fruit_model() -> ListModel {
    ListModel::with_strings(FRUITS)
}

/// Helper: records every payload delivered to "list changed"
fn record(model: &ListModel) -> Rc<RefCell<Vec<Vec<String>>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    model.connect_list_changed(move |items| sink.borrow_mut().push(items.to_vec()));
    log
}

#[test]
fn test_seed_is_sorted_case_insensitively() {
    let model = fruit_model();
    assert_eq!(model.get_strings(), SORTED_FRUITS);
}

#[test]
fn test_default_sort_ignores_case() {
    let model = ListModel::with_strings(["banana", "Apple", "cherry"]);
    assert_eq!(model.get_strings(), vec!["Apple", "banana", "cherry"]);
}

#[test]
fn test_set_strings_drops_batch_duplicates_and_empty() {
    let model = ListModel::new();
    model.set_strings(["b", "a", "", "b", "c", "a"]);
    assert_eq!(model.get_strings(), vec!["a", "b", "c"]);
}

#[test]
fn test_set_strings_keeps_duplicates_when_allowed() {
    let model = ListModel::new();
    model.set_allow_duplicates(true);
    model.set_strings(["b", "a", "b"]);
    assert_eq!(model.get_strings(), vec!["a", "b", "b"]);
}

#[test]
fn test_set_strings_drops_invalid_entries() {
    let model = ListModel::new();
    model.set_validation_function(|text| {
        if text.to_lowercase().contains('r') {
            Err("There is an R in the text!!".to_string())
        } else {
            Ok(())
        }
    });
    model.set_strings(FRUITS);
    assert_eq!(model.get_strings(), vec!["Apple", "Banana", "Mango"]);
}

#[test]
fn test_set_strings_is_idempotent_and_always_notifies() {
    let model = ListModel::new();
    let log = record(&model);

    model.set_strings(FRUITS);
    let first = model.get_strings();
    model.set_strings(FRUITS);

    assert_eq!(model.get_strings(), first);
    assert_eq!(log.borrow().len(), 2, "Each set_strings call notifies");
    assert_eq!(log.borrow()[1], first);
}

#[test]
fn test_set_strings_does_not_dedupe_across_calls() {
    let model = ListModel::with_strings(["a"]);
    model.set_strings(["a", "b"]);
    assert_eq!(model.get_strings(), vec!["a", "b"]);
}

#[test]
fn test_set_strings_without_sort_keeps_insertion_order() {
    let model = ListModel::new();
    model.disable_sort();
    model.set_strings(FRUITS);
    assert_eq!(model.get_strings(), FRUITS);
}

#[test]
fn test_add_string_inserts_in_sorted_position() {
    let model = fruit_model();
    let log = record(&model);

    let index = model.add_string("Date").unwrap();

    assert_eq!(index, 3);
    assert_eq!(
        model.get_strings(),
        vec!["Apple", "Banana", "Cherry", "Date", "Mango", "Zebra"]
    );
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_add_duplicate_is_rejected_without_mutation() {
    let model = fruit_model();
    let log = record(&model);

    let result = model.add_string("Apple");

    assert_eq!(result, Err(Rejection::Duplicate("Apple".to_string())));
    assert_eq!(model.len(), 5);
    assert!(log.borrow().is_empty(), "Rejected add must not notify");
}

#[test]
fn test_add_same_string_twice_keeps_one() {
    let model = ListModel::new();
    assert!(model.add_string("Kiwi").is_ok());
    assert!(model.add_string("Kiwi").is_err());
    assert_eq!(model.get_strings(), vec!["Kiwi"]);
}

#[test]
fn test_duplicate_check_is_case_sensitive() {
    let model = fruit_model();
    assert!(model.add_string("apple").is_ok());
    assert_eq!(model.len(), 6);
}

#[test]
fn test_add_string_reports_rule_reason() {
    let model = ListModel::new();
    model.set_validation_function(|text| {
        if text.len() > 5 {
            Err("Too long".to_string())
        } else {
            Ok(())
        }
    });

    let result = model.add_string("Watermelon");
    assert_eq!(result, Err(Rejection::Invalid("Too long".to_string())));
    assert_eq!(result.unwrap_err().to_string(), "Too long");
}

#[test]
fn test_add_empty_string_is_rejected() {
    let model = ListModel::new();
    assert_eq!(model.add_string(""), Err(Rejection::Empty));
}

#[test]
fn test_add_string_is_not_gated_by_add_capability() {
    let model = ListModel::new();
    assert!(!model.capabilities().allow_add);
    assert!(model.add_string("Fig").is_ok());
}

#[test]
fn test_remove_requires_capability() {
    let model = fruit_model();
    let log = record(&model);

    assert_eq!(
        model.remove_at(0),
        Err(Rejection::CapabilityDisabled(Capability::Remove))
    );
    assert_eq!(model.len(), 5);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_remove_selects_following_item() {
    let model = fruit_model();
    model.set_allow_remove(true, "Remove");

    assert_eq!(model.remove_at(1), Ok(Some(1)));
    assert_eq!(model.get_strings(), vec!["Apple", "Cherry", "Mango", "Zebra"]);
}

#[test]
fn test_remove_last_selects_new_last() {
    let model = fruit_model();
    model.set_allow_remove(true, "Remove");

    assert_eq!(model.remove_at(4), Ok(Some(3)));
    assert_eq!(model.get(3).as_deref(), Some("Mango"));
}

#[test]
fn test_remove_only_item_selects_nothing() {
    let model = ListModel::with_strings(["Solo"]);
    model.set_allow_remove(true, "Remove");

    assert_eq!(model.remove_at(0), Ok(None));
    assert!(model.is_empty());
}

#[test]
fn test_remove_out_of_range() {
    let model = fruit_model();
    model.set_allow_remove(true, "Remove");
    assert_eq!(model.remove_at(9), Err(Rejection::InvalidIndex(9)));
}

#[test]
fn test_clear_notifies_once_with_empty_payload() {
    let model = fruit_model();
    model.set_allow_clear(true, "Remove all");
    let log = record(&model);

    assert!(model.clear().is_ok());

    assert!(model.get_strings().is_empty());
    assert_eq!(*log.borrow(), vec![Vec::<String>::new()]);
}

#[test]
fn test_clear_requires_capability() {
    let model = fruit_model();
    assert_eq!(
        model.clear(),
        Err(Rejection::CapabilityDisabled(Capability::Clear))
    );
    assert_eq!(model.len(), 5);
}

#[test]
fn test_move_up_swaps_with_previous() {
    let model = fruit_model();
    model.set_allow_ordering(true);

    assert_eq!(model.move_item(2, MoveDirection::Up), Ok(1));
    assert_eq!(
        model.get_strings(),
        vec!["Apple", "Cherry", "Banana", "Mango", "Zebra"]
    );
}

#[test]
fn test_move_down_swaps_with_next() {
    let model = fruit_model();
    model.set_allow_ordering(true);

    assert_eq!(model.move_item(0, MoveDirection::Down), Ok(1));
    assert_eq!(model.get(0).as_deref(), Some("Banana"));
    assert_eq!(model.get(1).as_deref(), Some("Apple"));
}

#[test]
fn test_move_at_boundary_is_noop_without_notification() {
    let model = fruit_model();
    model.set_allow_ordering(true);
    let log = record(&model);

    assert_eq!(model.move_item(0, MoveDirection::Up), Err(Rejection::AtBoundary));
    assert_eq!(model.move_item(4, MoveDirection::Down), Err(Rejection::AtBoundary));

    assert_eq!(model.get_strings(), SORTED_FRUITS);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_move_requires_reorder() {
    let model = fruit_model();
    assert_eq!(
        model.move_item(2, MoveDirection::Up),
        Err(Rejection::CapabilityDisabled(Capability::Reorder))
    );
    assert_eq!(model.get_strings(), SORTED_FRUITS);
}

#[test]
fn test_manual_order_survives_adds() {
    let model = fruit_model();
    model.set_allow_ordering(true);
    model.move_item(4, MoveDirection::Up).unwrap();

    assert_eq!(model.add_string("Apricot"), Ok(5));
    assert_eq!(
        model.get_strings(),
        vec!["Apple", "Banana", "Cherry", "Zebra", "Mango", "Apricot"]
    );
}

#[test]
fn test_enabling_ordering_keeps_order_and_disabling_resorts() {
    let model = fruit_model();
    model.set_allow_ordering(true);
    model.move_item(0, MoveDirection::Down).unwrap();
    let log = record(&model);

    model.set_allow_ordering(true);
    assert_eq!(model.get(0).as_deref(), Some("Banana"));
    assert!(log.borrow().is_empty());

    model.set_allow_ordering(false);
    assert_eq!(model.get_strings(), SORTED_FRUITS);
    assert_eq!(log.borrow().len(), 1, "Re-sort that changes order notifies");
}

#[test]
fn test_disabling_ordering_without_sort_keeps_order() {
    let model = ListModel::new();
    model.disable_sort();
    model.set_strings(FRUITS);
    model.set_allow_ordering(true);
    model.set_allow_ordering(false);
    assert_eq!(model.get_strings(), FRUITS);
}

#[test]
fn test_reorder_moves_item_to_position() {
    let model = fruit_model();
    model.set_allow_ordering(true);

    assert_eq!(model.reorder(0, 3), Ok(3));
    assert_eq!(
        model.get_strings(),
        vec!["Banana", "Cherry", "Mango", "Apple", "Zebra"]
    );
}

#[test]
fn test_reorder_onto_itself_does_not_notify() {
    let model = fruit_model();
    model.set_allow_ordering(true);
    let log = record(&model);

    assert_eq!(model.reorder(2, 2), Ok(2));
    assert!(log.borrow().is_empty());
    assert_eq!(model.reorder(2, 7), Err(Rejection::InvalidIndex(7)));
}

#[test]
fn test_custom_sort_function_resorts_immediately() {
    let model = fruit_model();
    let log = record(&model);

    model.set_sort_function(|s| Ok(SortKey::new().int(s.len() as i64).text(s.to_lowercase())));

    assert_eq!(
        model.get_strings(),
        vec!["Apple", "Mango", "Zebra", "Banana", "Cherry"]
    );
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_failing_sort_function_falls_back_for_whole_batch() {
    let model = ListModel::new();
    model.disable_sort();
    model.set_strings(["b", "C", "a"]);

    model.set_sort_function(|s| {
        if s == "C" {
            Err(SortKeyError::new(s, "no key"))
        } else {
            Ok(SortKey::from_text(s))
        }
    });

    assert_eq!(model.get_strings(), vec!["a", "b", "C"]);
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let model = ListModel::new();
    model.set_allow_duplicates(true);
    model.disable_sort();
    model.set_strings(["beta", "Alpha", "alpha", "ALPHA"]);

    model.use_default_sort();

    assert_eq!(model.get_strings(), vec!["Alpha", "alpha", "ALPHA", "beta"]);
}

#[test]
fn test_sort_configured_while_ordering_enabled_waits() {
    let model = ListModel::new();
    model.set_allow_ordering(true);
    model.set_strings(["b", "a"]);

    model.use_default_sort();
    assert_eq!(model.get_strings(), vec!["b", "a"]);

    model.set_allow_ordering(false);
    assert_eq!(model.get_strings(), vec!["a", "b"]);
}

#[test]
fn test_auto_sort_invariant_after_mutations() {
    let model = fruit_model();
    model.set_allow_remove(true, "Remove");

    model.add_string("fig").unwrap();
    model.add_string("Elderberry").unwrap();
    model.remove_at(0).unwrap();
    model.add_string("avocado").unwrap();

    let items = model.get_strings();
    let mut expected = items.clone();
    expected.sort_by_key(|s| s.to_lowercase());
    assert_eq!(items, expected);
}

#[test]
fn test_reentrant_handler_is_queued_not_nested() {
    let model = Rc::new(ListModel::new());
    let depth = Rc::new(RefCell::new(0usize));
    let max_depth = Rc::new(RefCell::new(0usize));
    let log = record(&model);

    {
        let weak = Rc::downgrade(&model);
        let depth = depth.clone();
        let max_depth = max_depth.clone();
        model.connect_list_changed(move |items| {
            *depth.borrow_mut() += 1;
            let current = *depth.borrow();
            if current > *max_depth.borrow() {
                *max_depth.borrow_mut() = current;
            }
            if let Some(model) = weak.upgrade() {
                if items.len() == 1 {
                    let _ = model.add_string("second");
                }
            }
            *depth.borrow_mut() -= 1;
        });
    }

    model.add_string("first").unwrap();

    assert_eq!(*max_depth.borrow(), 1, "Handlers must never run nested");
    assert_eq!(model.get_strings(), vec!["first", "second"]);
    let log = log.borrow();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1], vec!["first", "second"]);
}

#[test]
fn test_disconnect_stops_notifications() {
    let model = ListModel::new();
    let count = Rc::new(RefCell::new(0));
    let sink = count.clone();
    let id = model.connect_list_changed(move |_| *sink.borrow_mut() += 1);

    model.add_string("one").unwrap();
    assert!(model.disconnect(id));
    assert!(!model.disconnect(id));
    model.add_string("two").unwrap();

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_apply_options_sets_flags_text_and_sort() {
    let model = ListModel::new();
    model.set_strings(["b", "a"]);

    let mut options = EditorOptions::default();
    options.capabilities.allow_add = true;
    options.capabilities.allow_clear = true;
    options.text.add_action = "Add a new thing".to_string();
    options.sort = SortMode::None;
    model.apply_options(&options);

    assert!(model.capabilities().allow_add);
    assert!(model.capabilities().allow_clear);
    assert_eq!(model.action_text().add_action, "Add a new thing");
    assert!(!model.is_auto_sort_active());

    model.add_string("0").unwrap();
    assert_eq!(model.get_strings(), vec!["a", "b", "0"]);
}

#[test]
fn test_options_from_json_gate_capabilities() {
    let options: EditorOptions = serde_json::from_str(
        r#"{ "capabilities": { "allow_remove": true }, "text": { "remove_action": "Drop" } }"#,
    )
    .unwrap();
    let model = fruit_model();
    model.apply_options(&options);

    assert_eq!(model.action_text().remove_action, "Drop");
    assert_eq!(model.action_text().clear_action, "Remove all");
    assert_eq!(model.remove_at(0), Ok(Some(0)));
    assert_eq!(
        model.clear(),
        Err(Rejection::CapabilityDisabled(Capability::Clear))
    );
}

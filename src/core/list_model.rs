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

//! List model controller - owns the ordered strings behind a list editor
//!
//! # Responsibilities
//!
//! - Validate every add and edit (rule, then duplicates)
//! - Keep the list sorted while auto-sort is active
//! - Track the in-progress add/edit draft
//! - Notify listeners with the full content after every visible change
//!
//! # Architecture
//!
//! Like the rest of the toolkit-facing code this type uses interior
//! mutability and is shared as `Rc<ListModel>`. It never touches a widget.
//!
//! # Re-entrancy
//!
//! A "list changed" handler may call back into the model. The nested
//! mutation applies at once, but its notification is queued and delivered
//! after the current round of handlers, with the content at that time.
//! Handlers therefore never run nested.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::sorting::{sorted, sorted_order, SortKey, SortKeyError, SortPolicy};
use crate::core::types::{
    ActionText, Capabilities, Capability, DraftStatus, DraftTarget, EditorOptions, MoveDirection,
    SortMode,
};
use crate::core::validator::{validate_candidate, Rejection, ValidationRule};

/// Token returned by [`ListModel::connect_list_changed`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct HandlerId(u64);

type ListChangedHandler = Rc<dyn Fn(&[String])>;

#[derive(Clone, Debug)]
struct Draft {
    target: DraftTarget,
    text: String,
    status: DraftStatus,
}

/// Ordered, validated collection of strings
///
/// # Example
///
/// ```
/// use xapp_widgets::core::ListModel;
///
/// let model = ListModel::new();
/// model.set_strings(["Zebra", "Apple", "Mango"]);
/// assert_eq!(model.get_strings(), vec!["Apple", "Mango", "Zebra"]);
///
/// // Duplicates are rejected, with a reason
/// let err = model.add_string("Apple").unwrap_err();
/// assert_eq!(err.to_string(), "'Apple' is already in the list.");
/// ```
pub struct ListModel {
    items: RefCell<Vec<String>>,
    capabilities: Cell<Capabilities>,
    text: RefCell<ActionText>,
    rule: RefCell<Option<ValidationRule>>,
    sort: RefCell<SortPolicy>,
    draft: RefCell<Option<Draft>>,
    handlers: RefCell<Vec<(HandlerId, ListChangedHandler)>>,
    next_handler: Cell<u64>,
    emitting: Cell<bool>,
    pending: Cell<bool>,
}

impl Default for ListModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ListModel {
    /// Creates an empty model: every capability off, default sort
    pub fn new() -> Self {
        Self {
            items: RefCell::new(Vec::new()),
            capabilities: Cell::new(Capabilities::default()),
            text: RefCell::new(ActionText::default()),
            rule: RefCell::new(None),
            sort: RefCell::new(SortPolicy::Default),
            draft: RefCell::new(None),
            handlers: RefCell::new(Vec::new()),
            next_handler: Cell::new(0),
            emitting: Cell::new(false),
            pending: Cell::new(false),
        }
    }

    /// Creates a model seeded from `items` (see [`set_strings`](Self::set_strings))
    pub fn with_strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let model = Self::new();
        model.set_strings(items);
        model
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// Replaces the whole collection
    ///
    /// Invalid candidates and duplicates within the batch are dropped
    /// without being reported. Always notifies, even if nothing changed.
    pub fn set_strings<I, S>(&self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rule = self.rule.borrow().clone();
        let allow_duplicates = self.capabilities.get().allow_duplicates;

        let mut accepted: Vec<String> = Vec::new();
        for candidate in items {
            let candidate = candidate.into();
            match validate_candidate(&candidate, rule.as_ref(), allow_duplicates, &accepted, None) {
                Ok(()) => accepted.push(candidate),
                Err(e) => tracing::debug!("Dropping '{}' from new content: {}", candidate, e),
            }
        }

        if self.is_auto_sort_active() {
            let policy = self.sort.borrow().clone();
            if let Some(sorted_items) = sorted(&accepted, &policy) {
                accepted = sorted_items;
            }
        }

        *self.items.borrow_mut() = accepted;
        self.drop_edit_draft();
        self.emit();
    }

    /// Returns the current content in display order
    pub fn get_strings(&self) -> Vec<String> {
        self.items.borrow().clone()
    }

    /// Returns the item at `index`
    pub fn get(&self, index: usize) -> Option<String> {
        self.items.borrow().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Adds one string programmatically
    ///
    /// Not gated by the add capability. Returns the item's position after
    /// any auto-sort.
    pub fn add_string(&self, text: impl Into<String>) -> Result<usize, Rejection> {
        let text = text.into();
        self.check(&text, None)
            .inspect_err(|e| tracing::debug!("add_string('{}') rejected: {}", text, e))?;

        let index = {
            let mut items = self.items.borrow_mut();
            items.push(text);
            items.len() - 1
        };
        let index = self.resort_tracking(index);

        self.drop_edit_draft();
        self.emit();
        Ok(index)
    }

    /// Removes the item at `index`
    ///
    /// Confirmation is up to the caller. Returns the index that should be
    /// selected next: the following item, else the new last item.
    pub fn remove_at(&self, index: usize) -> Result<Option<usize>, Rejection> {
        self.require(Capability::Remove)?;

        let next = {
            let mut items = self.items.borrow_mut();
            if index >= items.len() {
                return Err(Rejection::InvalidIndex(index));
            }
            items.remove(index);

            if index < items.len() {
                Some(index)
            } else {
                items.len().checked_sub(1)
            }
        };

        self.drop_edit_draft();
        self.emit();
        Ok(next)
    }

    /// Removes every item
    pub fn clear(&self) -> Result<(), Rejection> {
        self.require(Capability::Clear)?;

        self.items.borrow_mut().clear();
        self.drop_edit_draft();
        self.emit();
        Ok(())
    }

    /// Swaps the item at `index` with its neighbour
    ///
    /// Returns the item's new index. Moving the first item up or the last
    /// item down is rejected with [`Rejection::AtBoundary`] and notifies
    /// nobody.
    pub fn move_item(&self, index: usize, direction: MoveDirection) -> Result<usize, Rejection> {
        self.require(Capability::Reorder)?;

        let target = {
            let mut items = self.items.borrow_mut();
            let len = items.len();
            if index >= len {
                return Err(Rejection::InvalidIndex(index));
            }

            let target = match direction {
                MoveDirection::Up => index.checked_sub(1),
                MoveDirection::Down => (index + 1 < len).then_some(index + 1),
            }
            .ok_or(Rejection::AtBoundary)?;

            items.swap(index, target);
            target
        };

        self.drop_edit_draft();
        self.emit();
        Ok(target)
    }

    /// Moves one item to an arbitrary position (drag-and-drop)
    pub fn reorder(&self, from: usize, to: usize) -> Result<usize, Rejection> {
        self.require(Capability::Reorder)?;

        {
            let mut items = self.items.borrow_mut();
            let len = items.len();
            if from >= len {
                return Err(Rejection::InvalidIndex(from));
            }
            if to >= len {
                return Err(Rejection::InvalidIndex(to));
            }
            if from == to {
                return Ok(to);
            }

            let item = items.remove(from);
            items.insert(to, item);
        }

        self.drop_edit_draft();
        self.emit();
        Ok(to)
    }

    // ------------------------------------------------------------------
    // Interactive add / edit
    // ------------------------------------------------------------------

    /// Opens an empty draft for a new item
    pub fn begin_add(&self) -> Result<DraftStatus, Rejection> {
        self.require(Capability::Add)?;
        Ok(self.open_draft(DraftTarget::Add, String::new()))
    }

    /// Opens a draft seeded with the text of the item at `index`
    pub fn begin_edit(&self, index: usize) -> Result<DraftStatus, Rejection> {
        self.require(Capability::Edit)?;
        let current = self.get(index).ok_or(Rejection::InvalidIndex(index))?;
        Ok(self.open_draft(DraftTarget::Edit(index), current))
    }

    /// Re-validates the draft after a keystroke
    ///
    /// Without an open draft this reports [`DraftStatus::Empty`].
    pub fn update_draft(&self, text: impl Into<String>) -> DraftStatus {
        let target = match self.draft.borrow().as_ref() {
            Some(draft) => draft.target,
            None => return DraftStatus::Empty,
        };

        let text = text.into();
        let status = self.status_for(&text, target);

        if let Some(draft) = self.draft.borrow_mut().as_mut() {
            draft.text = text;
            draft.status = status.clone();
        }
        status
    }

    /// Applies the draft and closes it
    ///
    /// Only allowed while the last status was [`DraftStatus::Valid`].
    /// Returns the position of the added or edited item after any
    /// auto-sort, so the view can restore selection.
    pub fn commit_draft(&self) -> Result<usize, Rejection> {
        let draft = self.draft.borrow().clone().ok_or(Rejection::NoDraft)?;
        if !draft.status.is_valid() {
            return Err(Rejection::DraftNotValid);
        }

        // Content may have changed programmatically since the last keystroke
        let exclude = match draft.target {
            DraftTarget::Add => None,
            DraftTarget::Edit(index) => Some(index),
        };
        if let Err(e) = self.check(&draft.text, exclude) {
            let status = DraftStatus::Invalid(e.reason());
            if let Some(open) = self.draft.borrow_mut().as_mut() {
                open.status = status;
            }
            return Err(e);
        }

        let index = {
            let mut items = self.items.borrow_mut();
            match draft.target {
                DraftTarget::Add => {
                    items.push(draft.text);
                    items.len() - 1
                }
                DraftTarget::Edit(index) => {
                    let slot = items.get_mut(index).ok_or(Rejection::InvalidIndex(index))?;
                    *slot = draft.text;
                    index
                }
            }
        };

        *self.draft.borrow_mut() = None;
        let index = self.resort_tracking(index);
        self.emit();
        Ok(index)
    }

    /// Discards the draft without touching the list
    pub fn cancel_draft(&self) {
        self.draft.borrow_mut().take();
    }

    /// What the open draft will do, if one is open
    pub fn draft_target(&self) -> Option<DraftTarget> {
        self.draft.borrow().as_ref().map(|draft| draft.target)
    }

    /// Current draft text, if a draft is open
    pub fn draft_text(&self) -> Option<String> {
        self.draft.borrow().as_ref().map(|draft| draft.text.clone())
    }

    // ------------------------------------------------------------------
    // Sorting and ordering
    // ------------------------------------------------------------------

    /// Replaces the sort policy, re-sorting at once if it is active
    pub fn set_sort_policy(&self, policy: SortPolicy) {
        *self.sort.borrow_mut() = policy;
        self.resort_and_notify();
    }

    /// Installs a custom key function
    pub fn set_sort_function<F>(&self, key_fn: F)
    where
        F: Fn(&str) -> Result<SortKey, SortKeyError> + 'static,
    {
        self.set_sort_policy(SortPolicy::custom(key_fn));
    }

    /// Turns auto-sort off; the current order is kept
    pub fn disable_sort(&self) {
        self.set_sort_policy(SortPolicy::Disabled);
    }

    /// Restores the case-insensitive default sort
    pub fn use_default_sort(&self) {
        self.set_sort_policy(SortPolicy::Default);
    }

    pub fn sort_policy(&self) -> SortPolicy {
        self.sort.borrow().clone()
    }

    /// True when a sort policy is set and manual ordering is off
    pub fn is_auto_sort_active(&self) -> bool {
        self.sort.borrow().is_enabled() && !self.capabilities.get().allow_reorder
    }

    /// Enables or disables manual ordering
    ///
    /// Enabling keeps the current order. Disabling re-applies the sort.
    pub fn set_allow_ordering(&self, allow: bool) {
        self.update_capabilities(|caps| caps.allow_reorder = allow);
        if !allow {
            self.resort_and_notify();
        }
    }

    // ------------------------------------------------------------------
    // Capabilities and validation
    // ------------------------------------------------------------------

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities.get()
    }

    pub fn action_text(&self) -> ActionText {
        self.text.borrow().clone()
    }

    pub fn set_allow_add(&self, allow: bool, action: impl Into<String>, hint: impl Into<String>) {
        self.update_capabilities(|caps| caps.allow_add = allow);
        let mut text = self.text.borrow_mut();
        text.add_action = action.into();
        text.add_hint = hint.into();
    }

    pub fn set_allow_edit(&self, allow: bool, action: impl Into<String>, hint: impl Into<String>) {
        self.update_capabilities(|caps| caps.allow_edit = allow);
        let mut text = self.text.borrow_mut();
        text.edit_action = action.into();
        text.edit_hint = hint.into();
    }

    pub fn set_allow_remove(&self, allow: bool, action: impl Into<String>) {
        self.update_capabilities(|caps| caps.allow_remove = allow);
        self.text.borrow_mut().remove_action = action.into();
    }

    pub fn set_allow_clear(&self, allow: bool, action: impl Into<String>) {
        self.update_capabilities(|caps| caps.allow_clear = allow);
        self.text.borrow_mut().clear_action = action.into();
    }

    /// Affects future checks only; existing duplicates stay
    pub fn set_allow_duplicates(&self, allow: bool) {
        self.update_capabilities(|caps| caps.allow_duplicates = allow);
    }

    /// Installs a validation rule: `Err(reason)` rejects a candidate
    ///
    /// The rule may read the model but must not mutate it.
    pub fn set_validation_function<F>(&self, rule: F)
    where
        F: Fn(&str) -> Result<(), String> + 'static,
    {
        *self.rule.borrow_mut() = Some(Rc::new(rule));
    }

    pub fn clear_validation_function(&self) {
        self.rule.borrow_mut().take();
    }

    /// Applies a whole preset: flags, text and sort mode
    pub fn apply_options(&self, options: &EditorOptions) {
        self.capabilities.set(options.capabilities);
        *self.text.borrow_mut() = options.text.clone();
        self.set_sort_policy(match options.sort {
            SortMode::Alphabetical => SortPolicy::Default,
            SortMode::None => SortPolicy::Disabled,
        });
    }

    // ------------------------------------------------------------------
    // Notification
    // ------------------------------------------------------------------

    /// Registers a "list changed" handler receiving the full content
    pub fn connect_list_changed<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&[String]) + 'static,
    {
        let id = HandlerId(self.next_handler.get());
        self.next_handler.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Removes a handler; returns false if it was not connected
    pub fn disconnect(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    fn emit(&self) {
        if self.emitting.get() {
            self.pending.set(true);
            return;
        }

        self.emitting.set(true);
        loop {
            let snapshot = self.get_strings();
            // Cloned so handlers can connect/disconnect while running
            let handlers: Vec<ListChangedHandler> = self
                .handlers
                .borrow()
                .iter()
                .map(|(_, handler)| handler.clone())
                .collect();

            for handler in &handlers {
                handler(&snapshot);
            }

            if !self.pending.replace(false) {
                break;
            }
        }
        self.emitting.set(false);
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn require(&self, capability: Capability) -> Result<(), Rejection> {
        if self.capabilities.get().allows(capability) {
            Ok(())
        } else {
            tracing::debug!("Ignoring {} request: capability disabled", capability);
            Err(Rejection::CapabilityDisabled(capability))
        }
    }

    fn update_capabilities(&self, change: impl FnOnce(&mut Capabilities)) {
        let mut caps = self.capabilities.get();
        change(&mut caps);
        self.capabilities.set(caps);
    }

    /// Validates against the live list, skipping `exclude`
    fn check(&self, text: &str, exclude: Option<usize>) -> Result<(), Rejection> {
        let rule = self.rule.borrow().clone();
        let allow_duplicates = self.capabilities.get().allow_duplicates;
        let items = self.items.borrow();
        validate_candidate(text, rule.as_ref(), allow_duplicates, &items, exclude)
    }

    fn status_for(&self, text: &str, target: DraftTarget) -> DraftStatus {
        if text.trim().is_empty() {
            return DraftStatus::Empty;
        }

        let exclude = match target {
            DraftTarget::Add => None,
            DraftTarget::Edit(index) => Some(index),
        };
        match self.check(text, exclude) {
            Ok(()) => DraftStatus::Valid,
            Err(e) => DraftStatus::Invalid(e.reason()),
        }
    }

    fn open_draft(&self, target: DraftTarget, text: String) -> DraftStatus {
        let status = self.status_for(&text, target);
        *self.draft.borrow_mut() = Some(Draft {
            target,
            text,
            status: status.clone(),
        });
        status
    }

    /// An edit draft points at an index; structural changes invalidate it
    fn drop_edit_draft(&self) {
        let mut draft = self.draft.borrow_mut();
        if matches!(draft.as_ref(), Some(Draft { target: DraftTarget::Edit(_), .. })) {
            tracing::debug!("Closing edit draft after structural change");
            *draft = None;
        }
    }

    /// Sorts if auto-sort is active and returns where `index` ended up
    fn resort_tracking(&self, index: usize) -> usize {
        if !self.is_auto_sort_active() {
            return index;
        }

        let policy = self.sort.borrow().clone();
        let items = self.get_strings();
        let Some(order) = sorted_order(&items, &policy) else {
            return index;
        };

        let position = order.iter().position(|&i| i == index).unwrap_or(index);
        *self.items.borrow_mut() = order.into_iter().map(|i| items[i].clone()).collect();
        position
    }

    /// Re-sorts in place; true if the order changed
    fn resort(&self) -> bool {
        if !self.is_auto_sort_active() {
            return false;
        }

        let policy = self.sort.borrow().clone();
        let items = self.get_strings();
        match sorted(&items, &policy) {
            Some(sorted_items) if sorted_items != items => {
                *self.items.borrow_mut() = sorted_items;
                self.drop_edit_draft();
                true
            }
            _ => false,
        }
    }

    fn resort_and_notify(&self) {
        if self.resort() {
            self.emit();
        }
    }
}

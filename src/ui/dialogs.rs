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

//! Confirmation and message dialogs

use gtk4::gio;
use gtk4::prelude::*;

/// Asks a yes/no question and runs `on_accept` only on "Yes"
///
/// `parent` is any widget inside the window the dialog belongs to.
pub fn confirm(
    parent: &impl IsA<gtk4::Widget>,
    message: &str,
    detail: &str,
    on_accept: impl FnOnce() + 'static,
) {
    let window = parent.root().and_downcast::<gtk4::Window>();

    let dialog = gtk4::AlertDialog::builder()
        .modal(true)
        .message(message)
        .detail(detail)
        .buttons(vec!["No", "Yes"])
        .cancel_button(0)
        .default_button(1)
        .build();

    let question = message.to_string();
    dialog.choose(window.as_ref(), None::<&gio::Cancellable>, move |response| {
        match response {
            Ok(1) => on_accept(),
            Ok(_) => tracing::debug!("Declined: {}", question),
            Err(e) => tracing::debug!("Confirmation dismissed: {}", e),
        }
    });
}

/// Shows an informational dialog with a single OK button
pub fn show_message(parent: &impl IsA<gtk4::Widget>, message: &str, detail: &str) {
    let window = parent.root().and_downcast::<gtk4::Window>();

    gtk4::AlertDialog::builder()
        .modal(true)
        .message(message)
        .detail(detail)
        .buttons(vec!["OK"])
        .build()
        .show(window.as_ref());
}

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

//! Background work and main-loop callbacks
//!
//! GTK objects must stay on the main thread. Work that blocks runs on a
//! named background thread and hands its result back through
//! [`glib::idle_add_once`], which executes on the default main context.

use std::io;
use std::thread::{self, JoinHandle};


const THREAD_NAME: &str = "xapp-async";

/// Runs `f` on a new background thread
///
/// # Errors
///
/// Fails if the OS refuses to create the thread.
pub fn run_async<F, T>(f: F) -> io::Result<JoinHandle<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    thread::Builder::new().name(THREAD_NAME.to_string()).spawn(f)
}

/// Schedules `f` to run once on the main loop when it is idle
pub fn run_idle<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    glib::idle_add_once(f);
}

/// Runs `work` in the background, then `done` with its result on the main loop
///
/// # Example
///
/// ```no_run
/// use xapp_widgets::threading::run_async_then_idle;
///
/// run_async_then_idle(
///     || std::fs::read_to_string("/etc/hostname").unwrap_or_default(),
///     |hostname| println!("host: {}", hostname.trim()),
/// )?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn run_async_then_idle<W, D, T>(work: W, done: D) -> io::Result<()>
where
    W: FnOnce() -> T + Send + 'static,
    D: FnOnce(T) + Send + 'static,
    T: Send + 'static,
{
    run_async(move || {
        let result = work();
        run_idle(move || done(result));
    })?;
    Ok(())
}

// Copyright 2025 eraflo
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

//! The store backing drop-file text payloads.
//!
//! In a native build these buffers are allocated by the platform layer and
//! referenced from the raw record by address; here they live in a
//! token-keyed table. The store keeps lifetime counters so tests can
//! verify the release-exactly-once contract the decoded variants carry:
//! every [`intern`] must be matched by exactly one [`release`].
//!
//! The store is a process-wide static because the core registry's hooks
//! are plain function pointers.

use oriel_core::handle::registry;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

#[derive(Default)]
struct StoreInner {
    entries: HashMap<u64, String>,
    next_token: u64,
    released: u64,
    stray_releases: u64,
}

fn store() -> &'static Mutex<StoreInner> {
    static STORE: OnceLock<Mutex<StoreInner>> = OnceLock::new();
    STORE.get_or_init(|| {
        Mutex::new(StoreInner {
            entries: HashMap::new(),
            // Token zero means "no buffer" on the wire.
            next_token: 1,
            released: 0,
            stray_releases: 0,
        })
    })
}

/// Copies `text` into the store and returns the token to embed in a raw
/// record. Tokens are never reused within a process.
pub fn intern(text: &str) -> u64 {
    let mut inner = store().lock().expect("text store poisoned");
    let token = inner.next_token;
    inner.next_token += 1;
    inner.entries.insert(token, text.to_owned());
    log::trace!("Interned text buffer {token} ({} bytes).", text.len());
    token
}

/// Returns a copy of the buffer behind `token`, if it is still live.
pub fn resolve(token: u64) -> Option<String> {
    store()
        .lock()
        .expect("text store poisoned")
        .entries
        .get(&token)
        .cloned()
}

/// Releases the buffer behind `token`.
///
/// Releasing an unknown or already-released token is counted and logged,
/// never fatal; the count lets tests assert it stayed at zero.
pub fn release(token: u64) {
    let mut inner = store().lock().expect("text store poisoned");
    if inner.entries.remove(&token).is_some() {
        inner.released += 1;
        log::trace!("Released text buffer {token}.");
    } else {
        inner.stray_releases += 1;
        log::warn!("Release of unknown text buffer {token}.");
    }
}

/// Number of buffers currently live.
pub fn live_count() -> usize {
    store().lock().expect("text store poisoned").entries.len()
}

/// Total number of successful releases so far.
pub fn released_count() -> u64 {
    store().lock().expect("text store poisoned").released
}

/// Number of releases that hit an unknown or already-released token.
pub fn stray_release_count() -> u64 {
    store().lock().expect("text store poisoned").stray_releases
}

/// Registers this store as the core's text-payload backend.
pub fn install_hooks() {
    registry::set_text_hooks(resolve, release);
}

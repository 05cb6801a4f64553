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

//! A headless resource table standing in for the native allocator.
//!
//! [`acquire`] plays the role of the per-kind native acquire functions: it
//! issues a fresh id and records it as live. The single [`release_raw`]
//! function is registered as the deleter for every kind; the table keyed
//! by id makes one function sufficient. Live/destroyed counters let tests
//! assert the exactly-once release contract end to end.

use oriel_core::handle::kind::{
    AudioChunk, Font, Joystick, Renderer, Sensor, Surface, Texture, Window,
};
use oriel_core::handle::{registry, RawId, ResourceKind};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

#[derive(Default)]
struct TableInner {
    live: HashMap<u64, &'static str>,
    next_id: u64,
    destroyed: u64,
    stray_releases: u64,
}

fn table() -> &'static Mutex<TableInner> {
    static TABLE: OnceLock<Mutex<TableInner>> = OnceLock::new();
    TABLE.get_or_init(|| {
        Mutex::new(TableInner {
            live: HashMap::new(),
            // Id zero is the null id.
            next_id: 1,
            destroyed: 0,
            stray_releases: 0,
        })
    })
}

/// Issues a fresh id for a resource of kind `K` and records it as live.
pub fn acquire<K: ResourceKind>() -> RawId {
    let mut inner = table().lock().expect("resource table poisoned");
    let id = inner.next_id;
    inner.next_id += 1;
    inner.live.insert(id, K::NAME);
    log::debug!("Acquired {} id {id:#x}.", K::NAME);
    RawId(id)
}

/// Releases an id of any kind.
///
/// This is the deleter registered for every resource kind; the table knows
/// which kind an id belongs to. Releasing an unknown id is counted and
/// logged, never fatal.
pub fn release_raw(id: RawId) {
    let mut inner = table().lock().expect("resource table poisoned");
    match inner.live.remove(&id.0) {
        Some(name) => {
            inner.destroyed += 1;
            log::debug!("Destroyed {name} id {id}.");
        }
        None => {
            inner.stray_releases += 1;
            log::warn!("Release of unknown resource id {id}.");
        }
    }
}

/// Returns `true` while `id` is live.
pub fn is_live(id: RawId) -> bool {
    table()
        .lock()
        .expect("resource table poisoned")
        .live
        .contains_key(&id.0)
}

/// Number of currently live resources across all kinds.
pub fn live_count() -> usize {
    table().lock().expect("resource table poisoned").live.len()
}

/// Total number of successful releases so far.
pub fn destroyed_count() -> u64 {
    table().lock().expect("resource table poisoned").destroyed
}

/// Number of releases that hit an unknown or already-released id.
pub fn stray_release_count() -> u64 {
    table()
        .lock()
        .expect("resource table poisoned")
        .stray_releases
}

/// Registers [`release_raw`] as the deleter for every resource kind.
pub fn install_deleters() {
    registry::register_deleter::<Window>(release_raw);
    registry::register_deleter::<Renderer>(release_raw);
    registry::register_deleter::<Texture>(release_raw);
    registry::register_deleter::<Surface>(release_raw);
    registry::register_deleter::<Font>(release_raw);
    registry::register_deleter::<AudioChunk>(release_raw);
    registry::register_deleter::<Joystick>(release_raw);
    registry::register_deleter::<Sensor>(release_raw);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_issues_unique_live_ids() {
        let a = acquire::<Window>();
        let b = acquire::<Texture>();
        assert_ne!(a, b);
        assert!(is_live(a));
        assert!(is_live(b));
        release_raw(a);
        release_raw(b);
        assert!(!is_live(a));
        assert!(!is_live(b));
    }

    #[test]
    fn releasing_twice_is_counted_as_stray() {
        let id = acquire::<Font>();
        release_raw(id);
        let stray_before = stray_release_count();
        release_raw(id);
        assert_eq!(stray_release_count(), stray_before + 1);
    }
}

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

//! Per-kind release hooks supplied by the backend.
//!
//! The native layer exposes one release function per resource kind; the
//! backend registers those functions here once during startup, and every
//! owning [`Handle`](crate::handle::Handle) releases through this registry.
//! The registry is a type-map keyed by the kind marker's [`TypeId`]:
//! registering a deleter for a kind that already has one replaces it.
//!
//! The same module carries the hooks for drop-file text payloads, which are
//! externally-allocated buffers with the same release-exactly-once contract
//! as any other native resource.
//!
//! The statics below use `std::sync` primitives only because Rust statics
//! demand `Sync`; pump and dispatch operations remain bound to the one
//! thread that owns the native queue context.

use super::kind::ResourceKind;
use super::RawId;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// A release function for one resource kind.
pub type Deleter = fn(RawId);

/// Resolves a text-payload token into its buffer contents.
pub type TextResolver = fn(u64) -> Option<String>;

/// Releases the externally-allocated buffer behind a text-payload token.
pub type TextRelease = fn(u64);

fn deleters() -> &'static RwLock<HashMap<TypeId, Deleter>> {
    static DELETERS: OnceLock<RwLock<HashMap<TypeId, Deleter>>> = OnceLock::new();
    DELETERS.get_or_init(|| RwLock::new(HashMap::new()))
}

fn text_hooks() -> &'static RwLock<Option<(TextResolver, TextRelease)>> {
    static HOOKS: OnceLock<RwLock<Option<(TextResolver, TextRelease)>>> = OnceLock::new();
    HOOKS.get_or_init(|| RwLock::new(None))
}

/// Registers the release function for resource kind `K`.
///
/// If a deleter was already registered for `K`, it is replaced.
pub fn register_deleter<K: ResourceKind>(deleter: Deleter) {
    let previous = deleters()
        .write()
        .expect("deleter registry poisoned")
        .insert(TypeId::of::<K>(), deleter);
    if previous.is_some() {
        log::debug!("Replaced deleter for resource kind '{}'.", K::NAME);
    } else {
        log::debug!("Registered deleter for resource kind '{}'.", K::NAME);
    }
}

/// Releases `id` through the deleter registered for kind `K`.
///
/// Releasing a kind with no registered deleter is not fatal: the id leaks
/// on the native side and a warning is logged.
pub fn release<K: ResourceKind>(id: RawId) {
    let deleter = deleters()
        .read()
        .expect("deleter registry poisoned")
        .get(&TypeId::of::<K>())
        .copied();
    match deleter {
        Some(deleter) => deleter(id),
        None => log::warn!(
            "No deleter registered for resource kind '{}'; leaking id {id}.",
            K::NAME
        ),
    }
}

/// Installs the resolve/release hooks for drop-file text payloads.
///
/// Replaces any previously installed pair.
pub fn set_text_hooks(resolve: TextResolver, release: TextRelease) {
    *text_hooks().write().expect("text hooks poisoned") = Some((resolve, release));
    log::debug!("Installed text payload hooks.");
}

/// Resolves a text-payload token into an owned copy of its contents.
pub(crate) fn resolve_text(token: u64) -> Option<String> {
    let hooks = *text_hooks().read().expect("text hooks poisoned");
    match hooks {
        Some((resolve, _)) => resolve(token),
        None => {
            log::warn!("No text hooks installed; cannot resolve token {token}.");
            None
        }
    }
}

/// Releases the external buffer behind a text-payload token.
pub(crate) fn release_text(token: u64) {
    let hooks = *text_hooks().read().expect("text hooks poisoned");
    match hooks {
        Some((_, release)) => release(token),
        None => log::warn!("No text hooks installed; leaking text buffer {token}."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct FakeKind;
    impl ResourceKind for FakeKind {
        const NAME: &'static str = "fake";
    }

    struct UnregisteredKind;
    impl ResourceKind for UnregisteredKind {
        const NAME: &'static str = "unregistered";
    }

    static LAST_RELEASED: AtomicU64 = AtomicU64::new(0);

    fn record_release(id: RawId) {
        LAST_RELEASED.store(id.0, Ordering::SeqCst);
    }

    #[test]
    fn registered_deleter_receives_the_id() {
        register_deleter::<FakeKind>(record_release);
        release::<FakeKind>(RawId(77));
        assert_eq!(LAST_RELEASED.load(Ordering::SeqCst), 77);
    }

    #[test]
    fn release_without_deleter_is_a_no_op() {
        // Must not panic; the leak is logged.
        release::<UnregisteredKind>(RawId(5));
    }
}

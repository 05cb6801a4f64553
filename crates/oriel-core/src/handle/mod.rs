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

//! Dual-ownership wrappers around opaque native resource ids.
//!
//! Every externally-allocated object is represented by two types sharing
//! one internal representation:
//!
//! - [`Handle<K>`] — owning, move-only. Releases the id through the kind's
//!   registered deleter exactly once, on drop or explicit [`release`].
//! - [`HandleRef<K>`] — borrowing, `Copy`. References a live id without
//!   ever releasing it, and may be null ("no resource").
//!
//! At most one owning handle may exist per live id at any time; this is a
//! caller discipline precondition, not something the wrapper can enforce.
//! Borrowing handles must not outlive the id they alias.
//!
//! [`release`]: Handle::release

pub mod kind;
pub mod registry;

pub use kind::{AudioChunk, Font, Joystick, Renderer, ResourceKind, Sensor, Surface, Texture, Window};

use crate::error::ResourceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// An opaque identifier handed out by the native layer.
///
/// Zero is the null id, used by borrowing handles to represent the absence
/// of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawId(pub u64);

impl RawId {
    /// The null id.
    pub const NULL: RawId = RawId(0);

    /// Returns `true` if this is the null id.
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// An owning wrapper around a native resource id.
///
/// Owning handles are move-only; moving transfers the release
/// responsibility with the value, so the deleter for a given id runs
/// exactly once across the handle's whole lifetime.
pub struct Handle<K: ResourceKind> {
    id: RawId,
    _kind: PhantomData<K>,
}

impl<K: ResourceKind> Handle<K> {
    /// Takes ownership of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidResource`] if `id` is null. The
    /// native layer reports acquisition failures with a null id, so this is
    /// also where those failures surface to the caller.
    pub fn claim(id: RawId) -> Result<Self, ResourceError> {
        if id.is_null() {
            return Err(ResourceError::InvalidResource { kind: K::NAME });
        }
        log::trace!("Claimed {} id {id}.", K::NAME);
        Ok(Self {
            id,
            _kind: PhantomData,
        })
    }

    /// Returns the raw id without transferring ownership.
    pub fn get(&self) -> RawId {
        self.id
    }

    /// Returns `true` while the handle still owns a live id.
    ///
    /// False only after an explicit [`release`](Handle::release) or
    /// [`into_raw`](Handle::into_raw); a moved-from handle no longer exists
    /// to be asked.
    pub fn valid(&self) -> bool {
        !self.id.is_null()
    }

    /// Releases the wrapped id through the kind's registered deleter.
    ///
    /// Idempotent: a second call, or the eventual drop, is a no-op.
    pub fn release(&mut self) {
        if self.id.is_null() {
            return;
        }
        let id = std::mem::replace(&mut self.id, RawId::NULL);
        log::trace!("Releasing {} id {id}.", K::NAME);
        registry::release::<K>(id);
    }

    /// Escapes ownership, returning the raw id without releasing it.
    ///
    /// The caller becomes responsible for the id's eventual release.
    pub fn into_raw(mut self) -> RawId {
        std::mem::replace(&mut self.id, RawId::NULL)
    }

    /// Returns a borrowing handle aliasing this resource.
    pub fn borrow(&self) -> HandleRef<K> {
        HandleRef::from_raw(self.id)
    }
}

impl<K: ResourceKind> Drop for Handle<K> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<K: ResourceKind> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("kind", &K::NAME)
            .field("id", &self.id)
            .finish()
    }
}

/// A borrowing wrapper around a native resource id.
///
/// Never releases. Copyable, and may wrap the null id to represent "no
/// resource".
pub struct HandleRef<K: ResourceKind> {
    id: RawId,
    _kind: PhantomData<K>,
}

impl<K: ResourceKind> HandleRef<K> {
    /// Wraps `id` without taking ownership. Always succeeds, including for
    /// the null id.
    pub fn from_raw(id: RawId) -> Self {
        Self {
            id,
            _kind: PhantomData,
        }
    }

    /// Returns the raw id.
    pub fn get(&self) -> RawId {
        self.id
    }

    /// Returns `true` if the wrapped id is non-null.
    pub fn valid(&self) -> bool {
        !self.id.is_null()
    }
}

impl<K: ResourceKind> Clone for HandleRef<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: ResourceKind> Copy for HandleRef<K> {}

impl<K: ResourceKind> fmt::Debug for HandleRef<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleRef")
            .field("kind", &K::NAME)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Each test registers a deleter for its own local kind, so the
    // process-wide registry never couples one test to another.

    struct CountedKind;
    impl ResourceKind for CountedKind {
        const NAME: &'static str = "counted";
    }

    struct DoubleReleaseKind;
    impl ResourceKind for DoubleReleaseKind {
        const NAME: &'static str = "double-release";
    }

    struct MoveKind;
    impl ResourceKind for MoveKind {
        const NAME: &'static str = "move";
    }

    struct EscapeKind;
    impl ResourceKind for EscapeKind {
        const NAME: &'static str = "escape";
    }

    struct BorrowKind;
    impl ResourceKind for BorrowKind {
        const NAME: &'static str = "borrow";
    }

    static COUNTED_RELEASES: AtomicUsize = AtomicUsize::new(0);
    static DOUBLE_RELEASES: AtomicUsize = AtomicUsize::new(0);
    static MOVE_RELEASES: AtomicUsize = AtomicUsize::new(0);
    static ESCAPE_RELEASES: AtomicUsize = AtomicUsize::new(0);
    static BORROW_RELEASES: AtomicUsize = AtomicUsize::new(0);

    #[test]
    fn claim_null_id_fails() {
        let result = Handle::<CountedKind>::claim(RawId::NULL);
        assert!(matches!(
            result,
            Err(ResourceError::InvalidResource { kind: "counted" })
        ));
    }

    #[test]
    fn drop_releases_exactly_once() {
        registry::register_deleter::<CountedKind>(|_| {
            COUNTED_RELEASES.fetch_add(1, Ordering::SeqCst);
        });

        {
            let handle = Handle::<CountedKind>::claim(RawId(1)).unwrap();
            assert!(handle.valid());
            assert_eq!(handle.get(), RawId(1));
            assert_eq!(COUNTED_RELEASES.load(Ordering::SeqCst), 0);
        }
        assert_eq!(COUNTED_RELEASES.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn explicit_release_is_idempotent() {
        registry::register_deleter::<DoubleReleaseKind>(|_| {
            DOUBLE_RELEASES.fetch_add(1, Ordering::SeqCst);
        });

        let mut handle = Handle::<DoubleReleaseKind>::claim(RawId(2)).unwrap();
        handle.release();
        assert!(!handle.valid());
        handle.release();
        drop(handle);
        assert_eq!(DOUBLE_RELEASES.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn move_transfers_ownership() {
        registry::register_deleter::<MoveKind>(|_| {
            MOVE_RELEASES.fetch_add(1, Ordering::SeqCst);
        });

        let first = Handle::<MoveKind>::claim(RawId(3)).unwrap();
        let second = first;
        assert!(second.valid());
        drop(second);
        assert_eq!(MOVE_RELEASES.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn into_raw_skips_the_deleter() {
        registry::register_deleter::<EscapeKind>(|_| {
            ESCAPE_RELEASES.fetch_add(1, Ordering::SeqCst);
        });

        let handle = Handle::<EscapeKind>::claim(RawId(4)).unwrap();
        let id = handle.into_raw();
        assert_eq!(id, RawId(4));
        assert_eq!(ESCAPE_RELEASES.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn borrows_never_release() {
        registry::register_deleter::<BorrowKind>(|_| {
            BORROW_RELEASES.fetch_add(1, Ordering::SeqCst);
        });

        let owner = Handle::<BorrowKind>::claim(RawId(5)).unwrap();
        let alias = owner.borrow();
        let copy = alias;
        assert!(alias.valid());
        assert_eq!(copy.get(), RawId(5));
        drop(alias);
        assert_eq!(BORROW_RELEASES.load(Ordering::SeqCst), 0);
        drop(owner);
        assert_eq!(BORROW_RELEASES.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn null_borrow_represents_no_resource() {
        let absent = HandleRef::<BorrowKind>::from_raw(RawId::NULL);
        assert!(!absent.valid());
        assert_eq!(absent.get(), RawId::NULL);
    }
}

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

//! Defines the hierarchy of error types for the media-layer core.

use crate::event::EventKind;
use thiserror::Error;

/// A boxed error type for opaque failures raised by application code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors related to wrapping externally-allocated resources.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// An owning handle was constructed from a null or invalid external id.
    #[error("cannot take ownership of a null {kind} id")]
    InvalidResource {
        /// The resource kind the caller tried to wrap.
        kind: &'static str,
    },
}

/// Errors surfaced by the event dispatcher.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A handler failed while processing an event.
    ///
    /// The failure is re-propagated unchanged; records still queued for the
    /// interrupted drain cycle remain queued for the next `poll()` call.
    #[error("handler for {kind:?} events failed")]
    Handler {
        /// The event shape whose handler failed.
        kind: EventKind,
        /// The opaque application error.
        #[source]
        source: BoxError,
    },

    /// A handler was bound for a shape the dispatcher was not constructed
    /// to watch.
    #[error("event shape {kind:?} is not watched by this dispatcher")]
    NotWatched {
        /// The unwatched event shape.
        kind: EventKind,
    },
}

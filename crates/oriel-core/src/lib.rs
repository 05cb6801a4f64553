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

//! # Oriel Core
//!
//! Foundational crate for the Oriel media layer: dual-ownership handles for
//! externally-allocated resources, and a typed event system that decodes the
//! native layer's fixed-layout records and routes them to bound handlers.
//!
//! Backend-specific code lives in `oriel-infra`; this crate only defines the
//! contracts ([`event::EventSource`], the deleter registry) and the logic
//! that is independent of any concrete backend.

#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod handle;

pub use error::{BoxError, DispatchError, ResourceError};
pub use event::{decode, Event, EventDispatcher, EventKind, EventPump, RawEvent};
pub use handle::{Handle, HandleRef, RawId, ResourceKind};

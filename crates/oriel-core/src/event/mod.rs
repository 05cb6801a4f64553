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

//! The typed event system.
//!
//! Raw records come off the native queue as fixed-layout bytes
//! ([`raw::RawEvent`]); [`decode`] turns each into exactly one typed
//! variant ([`Event`]); [`EventPump`] wraps the queue primitives; and
//! [`EventDispatcher`] routes decoded variants to at-most-one handler per
//! shape. Everything here is single-threaded and belongs to the thread
//! that owns the native queue context.

pub mod decode;
pub mod dispatcher;
pub mod kind;
pub mod pump;
pub mod raw;
pub mod source;
pub mod types;

pub use decode::decode;
pub use dispatcher::{Bind, EventDispatcher, IntoDispatchOutcome};
pub use kind::{ranges, EventKind};
pub use pump::{EventPump, PollIter};
pub use raw::{RawEvent, PAYLOAD_SIZE, RECORD_SIZE};
pub use source::EventSource;
pub use types::{
    ButtonState, DropFileEvent, Event, JoyAxisEvent, JoyButtonEvent, JoyDeviceEvent, JoyDeviceOp,
    KeyModifiers, KeyboardEvent, MouseButton, MouseButtonEvent, MouseMotionEvent, MouseWheelEvent,
    MultiGestureEvent, QuitEvent, SensorEvent, TextBuffer, TextEditingEvent, TextInputEvent,
    TouchFingerEvent, TouchPhase, TypedEvent, UnknownEvent, UserEvent, WindowEvent, WindowOp,
};

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

//! The event-shape discriminant table.
//!
//! [`EventKind`] mirrors the discriminant values the native layer writes
//! into the first four bytes of every raw record. The values are grouped in
//! ranges by subsystem so queue operations can flush or count whole
//! categories without decoding (see [`ranges`]).

use serde::{Deserialize, Serialize};

/// The shape tag carried by a raw record.
///
/// Values outside this set decode to [`Event::Unknown`](crate::Event) and
/// are never routed to a handler.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Request to terminate the application.
    Quit = 0x100,
    /// A window changed state (shown, moved, resized, closed, ...).
    Window = 0x200,
    /// A keyboard key changed state.
    Keyboard = 0x300,
    /// In-progress text composition (IME editing).
    TextEditing = 0x302,
    /// Committed text input.
    TextInput = 0x303,
    /// The mouse cursor moved.
    MouseMotion = 0x400,
    /// A mouse button changed state.
    MouseButton = 0x401,
    /// The mouse wheel was scrolled.
    MouseWheel = 0x403,
    /// A joystick axis moved.
    JoyAxis = 0x600,
    /// A joystick button changed state.
    JoyButton = 0x601,
    /// A joystick device was connected or disconnected.
    JoyDevice = 0x605,
    /// A touch point changed (down, up, or motion).
    TouchFinger = 0x700,
    /// A multi-finger gesture (pinch or rotate) progressed.
    MultiGesture = 0x802,
    /// A file was dropped onto a window.
    DropFile = 0x1000,
    /// A sensor reported new readings.
    Sensor = 0x1200,
    /// An application-defined event.
    User = 0x8000,
}

impl EventKind {
    /// Every shape the decoder knows, in discriminant order.
    pub const ALL: [EventKind; 16] = [
        EventKind::Quit,
        EventKind::Window,
        EventKind::Keyboard,
        EventKind::TextEditing,
        EventKind::TextInput,
        EventKind::MouseMotion,
        EventKind::MouseButton,
        EventKind::MouseWheel,
        EventKind::JoyAxis,
        EventKind::JoyButton,
        EventKind::JoyDevice,
        EventKind::TouchFinger,
        EventKind::MultiGesture,
        EventKind::DropFile,
        EventKind::Sensor,
        EventKind::User,
    ];

    /// Returns the wire discriminant for this shape.
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Maps a wire discriminant back to a known shape.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x100 => Some(EventKind::Quit),
            0x200 => Some(EventKind::Window),
            0x300 => Some(EventKind::Keyboard),
            0x302 => Some(EventKind::TextEditing),
            0x303 => Some(EventKind::TextInput),
            0x400 => Some(EventKind::MouseMotion),
            0x401 => Some(EventKind::MouseButton),
            0x403 => Some(EventKind::MouseWheel),
            0x600 => Some(EventKind::JoyAxis),
            0x601 => Some(EventKind::JoyButton),
            0x605 => Some(EventKind::JoyDevice),
            0x700 => Some(EventKind::TouchFinger),
            0x802 => Some(EventKind::MultiGesture),
            0x1000 => Some(EventKind::DropFile),
            0x1200 => Some(EventKind::Sensor),
            0x8000 => Some(EventKind::User),
            _ => None,
        }
    }
}

/// Discriminant ranges, one per native subsystem.
///
/// These match the grouping the native layer uses, so flushing a range
/// discards every shape that subsystem can emit, including shapes this
/// crate does not decode.
pub mod ranges {
    use std::ops::Range;

    /// Application lifecycle events (quit).
    pub const APPLICATION: Range<u32> = 0x100..0x200;
    /// Window state events.
    pub const WINDOW: Range<u32> = 0x200..0x300;
    /// Keyboard and text events.
    pub const KEYBOARD: Range<u32> = 0x300..0x400;
    /// Mouse events.
    pub const MOUSE: Range<u32> = 0x400..0x500;
    /// Joystick events.
    pub const JOYSTICK: Range<u32> = 0x600..0x700;
    /// Touch and gesture events.
    pub const TOUCH: Range<u32> = 0x700..0x900;
    /// Drag-and-drop events.
    pub const DROP: Range<u32> = 0x1000..0x1100;
    /// Sensor events.
    pub const SENSOR: Range<u32> = 0x1200..0x1300;
    /// Everything, for a full queue flush.
    pub const EVERYTHING: Range<u32> = 0x0..u32::MAX;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_round_trips_for_every_kind() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_raw(kind.raw()), Some(kind));
        }
    }

    #[test]
    fn unknown_discriminants_map_to_none() {
        assert_eq!(EventKind::from_raw(0), None);
        assert_eq!(EventKind::from_raw(0x101), None);
        assert_eq!(EventKind::from_raw(0xdead_beef), None);
    }

    #[test]
    fn kinds_fall_in_their_subsystem_range() {
        assert!(ranges::APPLICATION.contains(&EventKind::Quit.raw()));
        assert!(ranges::MOUSE.contains(&EventKind::MouseMotion.raw()));
        assert!(ranges::MOUSE.contains(&EventKind::MouseWheel.raw()));
        assert!(ranges::TOUCH.contains(&EventKind::MultiGesture.raw()));
        assert!(!ranges::MOUSE.contains(&EventKind::Keyboard.raw()));
    }
}

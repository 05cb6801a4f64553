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

//! Strongly-typed event variants produced by the decoder.
//!
//! One struct per wire shape, plus the [`Event`] sum type and the
//! [`TypedEvent`] trait the dispatcher uses to route a decoded record to a
//! handler expecting a concrete shape. Fields with a documented bounded
//! range are already clamped by the time a variant exists; consumers can
//! rely on the bounds unconditionally.

use super::kind::EventKind;
use crate::handle::registry;

/// What happened to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowOp {
    /// No-op / unrecognized operation code.
    None,
    /// The window became visible.
    Shown,
    /// The window was hidden.
    Hidden,
    /// The window was moved; `data1`/`data2` carry the new position.
    Moved,
    /// The window was resized; `data1`/`data2` carry the new size.
    Resized,
    /// The window was minimized.
    Minimized,
    /// The window was maximized.
    Maximized,
    /// The window was restored from minimized/maximized state.
    Restored,
    /// The pointer entered the window.
    Enter,
    /// The pointer left the window.
    Leave,
    /// The window gained keyboard focus.
    FocusGained,
    /// The window lost keyboard focus.
    FocusLost,
    /// The window was asked to close.
    Close,
}

impl WindowOp {
    /// Maps the wire operation code; unrecognized codes become [`None`](WindowOp::None).
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => WindowOp::Shown,
            2 => WindowOp::Hidden,
            3 => WindowOp::Moved,
            4 => WindowOp::Resized,
            5 => WindowOp::Minimized,
            6 => WindowOp::Maximized,
            7 => WindowOp::Restored,
            8 => WindowOp::Enter,
            9 => WindowOp::Leave,
            10 => WindowOp::FocusGained,
            11 => WindowOp::FocusLost,
            12 => WindowOp::Close,
            _ => WindowOp::None,
        }
    }

    /// Returns the wire operation code.
    pub const fn raw(self) -> u32 {
        match self {
            WindowOp::None => 0,
            WindowOp::Shown => 1,
            WindowOp::Hidden => 2,
            WindowOp::Moved => 3,
            WindowOp::Resized => 4,
            WindowOp::Minimized => 5,
            WindowOp::Maximized => 6,
            WindowOp::Restored => 7,
            WindowOp::Enter => 8,
            WindowOp::Leave => 9,
            WindowOp::FocusGained => 10,
            WindowOp::FocusLost => 11,
            WindowOp::Close => 12,
        }
    }
}

/// Pressed/released state of a key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// The key or button is up.
    Released,
    /// The key or button is down.
    Pressed,
}

impl ButtonState {
    /// Maps the wire state byte: zero is released, anything else pressed.
    pub fn from_raw(raw: u32) -> Self {
        if raw == 0 {
            ButtonState::Released
        } else {
            ButtonState::Pressed
        }
    }

    /// Returns the wire state value.
    pub const fn raw(self) -> u32 {
        match self {
            ButtonState::Released => 0,
            ButtonState::Pressed => 1,
        }
    }

    /// Returns `true` for [`Pressed`](ButtonState::Pressed).
    pub const fn is_pressed(self) -> bool {
        matches!(self, ButtonState::Pressed)
    }
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The middle mouse button.
    Middle,
    /// The right mouse button.
    Right,
    /// The first extra button (typically "back").
    X1,
    /// The second extra button (typically "forward").
    X2,
    /// Another mouse button, identified by its wire code.
    Other(u32),
}

impl MouseButton {
    /// Maps the wire button code.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => MouseButton::Left,
            2 => MouseButton::Middle,
            3 => MouseButton::Right,
            4 => MouseButton::X1,
            5 => MouseButton::X2,
            other => MouseButton::Other(other),
        }
    }

    /// Returns the wire button code.
    pub const fn raw(self) -> u32 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
            MouseButton::X1 => 4,
            MouseButton::X2 => 5,
            MouseButton::Other(code) => code,
        }
    }
}

/// The phase of a touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// The finger touched the surface.
    Down,
    /// The finger left the surface.
    Up,
    /// The finger moved while touching.
    Motion,
}

impl TouchPhase {
    /// Maps the wire phase code; unrecognized codes coerce to motion.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => TouchPhase::Down,
            2 => TouchPhase::Up,
            _ => TouchPhase::Motion,
        }
    }

    /// Returns the wire phase code.
    pub const fn raw(self) -> u32 {
        match self {
            TouchPhase::Down => 1,
            TouchPhase::Up => 2,
            TouchPhase::Motion => 3,
        }
    }
}

/// Whether a joystick device arrived or departed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoyDeviceOp {
    /// The device was connected.
    Added,
    /// The device was disconnected.
    Removed,
}

impl JoyDeviceOp {
    /// Maps the wire code; unrecognized codes coerce to removal, the
    /// benign direction for a device whose state is uncertain.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => JoyDeviceOp::Added,
            _ => JoyDeviceOp::Removed,
        }
    }

    /// Returns the wire code.
    pub const fn raw(self) -> u32 {
        match self {
            JoyDeviceOp::Added => 1,
            JoyDeviceOp::Removed => 2,
        }
    }
}

/// Keyboard modifier flags held during a key event.
///
/// Multiple modifiers combine with bitwise operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    bits: u32,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self { bits: 0 };
    /// Either shift key.
    pub const SHIFT: Self = Self { bits: 1 << 0 };
    /// Either control key.
    pub const CTRL: Self = Self { bits: 1 << 1 };
    /// Either alt key.
    pub const ALT: Self = Self { bits: 1 << 2 };
    /// Either GUI/super key.
    pub const GUI: Self = Self { bits: 1 << 3 };
    /// Caps lock is engaged.
    pub const CAPS_LOCK: Self = Self { bits: 1 << 4 };
    /// Num lock is engaged.
    pub const NUM_LOCK: Self = Self { bits: 1 << 5 };

    /// Creates a modifier set from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Combines two modifier sets.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns `true` if all modifiers in `other` are held.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Returns `true` if no modifiers are held.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

/// The capacity, in bytes, of the fixed text field inside text-editing and
/// text-input records. Also the upper clamp bound for the editing length.
pub const TEXT_CAPACITY: usize = 32;

/// Request to terminate the application.
#[derive(Debug, Clone, PartialEq)]
pub struct QuitEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
}

/// A window changed state.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
    /// The window the event belongs to.
    pub window_id: u32,
    /// What happened.
    pub op: WindowOp,
    /// Operation-dependent datum (x, width, ...).
    pub data1: i32,
    /// Operation-dependent datum (y, height, ...).
    pub data2: i32,
}

/// A keyboard key changed state.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
    /// The window with keyboard focus.
    pub window_id: u32,
    /// Pressed or released.
    pub state: ButtonState,
    /// `true` if this is an auto-repeat of a held key.
    pub repeat: bool,
    /// Physical key code.
    pub scancode: u32,
    /// Layout-mapped key code.
    pub keycode: u32,
    /// Modifier keys held at the time of the event.
    pub modifiers: KeyModifiers,
}

/// In-progress text composition (IME editing).
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditingEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
    /// The window with keyboard focus.
    pub window_id: u32,
    /// The composition text.
    pub text: String,
    /// Cursor position within the composition.
    pub start: i32,
    /// Length of the selected portion, clamped to `[0, 32]`.
    pub length: i32,
}

/// Committed text input.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInputEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
    /// The window with keyboard focus.
    pub window_id: u32,
    /// The committed text.
    pub text: String,
}

/// The mouse cursor moved.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseMotionEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
    /// The window with mouse focus.
    pub window_id: u32,
    /// Bitmask of buttons held during the motion.
    pub buttons: u32,
    /// Cursor x, in window coordinates.
    pub x: i32,
    /// Cursor y, in window coordinates.
    pub y: i32,
    /// Motion along x since the last motion event.
    pub dx: i32,
    /// Motion along y since the last motion event.
    pub dy: i32,
}

/// A mouse button changed state.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseButtonEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
    /// The window with mouse focus.
    pub window_id: u32,
    /// The button that changed.
    pub button: MouseButton,
    /// Pressed or released.
    pub state: ButtonState,
    /// Click count (1 for single, 2 for double, ...).
    pub clicks: u32,
    /// Cursor x at the time of the click.
    pub x: i32,
    /// Cursor y at the time of the click.
    pub y: i32,
}

/// The mouse wheel was scrolled.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseWheelEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
    /// The window with mouse focus.
    pub window_id: u32,
    /// Horizontal scroll amount.
    pub dx: i32,
    /// Vertical scroll amount.
    pub dy: i32,
    /// `true` when the platform reports natural/inverted scrolling; the
    /// deltas are already un-flipped.
    pub flipped: bool,
}

/// A joystick axis moved.
#[derive(Debug, Clone, PartialEq)]
pub struct JoyAxisEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
    /// The joystick instance id.
    pub which: u32,
    /// The axis index.
    pub axis: u8,
    /// Axis position, clamped to the signed 16-bit range.
    pub value: i16,
}

/// A joystick button changed state.
#[derive(Debug, Clone, PartialEq)]
pub struct JoyButtonEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
    /// The joystick instance id.
    pub which: u32,
    /// The button index.
    pub button: u8,
    /// Pressed or released.
    pub state: ButtonState,
}

/// A joystick device was connected or disconnected.
#[derive(Debug, Clone, PartialEq)]
pub struct JoyDeviceEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
    /// The joystick instance id.
    pub which: u32,
    /// Arrival or departure.
    pub op: JoyDeviceOp,
}

/// A touch point changed.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchFingerEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
    /// The touch device id.
    pub touch_id: u64,
    /// The finger id within the device.
    pub finger_id: u64,
    /// Down, up, or motion.
    pub phase: TouchPhase,
    /// Normalized x, clamped to `[0.0, 1.0]`.
    pub x: f32,
    /// Normalized y, clamped to `[0.0, 1.0]`.
    pub y: f32,
    /// Normalized x delta, clamped to `[-1.0, 1.0]`.
    pub dx: f32,
    /// Normalized y delta, clamped to `[-1.0, 1.0]`.
    pub dy: f32,
    /// Normalized pressure, clamped to `[0.0, 1.0]`.
    pub pressure: f32,
}

/// A multi-finger gesture progressed.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiGestureEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
    /// The touch device id.
    pub touch_id: u64,
    /// Rotation delta, clamped to `[-1.0, 1.0]`.
    pub d_theta: f32,
    /// Pinch distance delta, clamped to `[-1.0, 1.0]`.
    pub d_dist: f32,
    /// Normalized gesture center x, clamped to `[0.0, 1.0]`.
    pub x: f32,
    /// Normalized gesture center y, clamped to `[0.0, 1.0]`.
    pub y: f32,
    /// Number of fingers involved.
    pub finger_count: u16,
}

/// An externally-allocated text buffer carried by a decoded event.
///
/// The native layer allocates the buffer and hands responsibility for it to
/// whoever pulls the record out of the queue. Decoding copies the contents
/// into `text` and marks the fresh variant as the owner of the external
/// buffer; cloning keeps the copied text but clears the ownership mark, so
/// across any number of clones the backing buffer is released exactly once,
/// when the owning instance drops.
#[derive(Debug)]
pub struct TextBuffer {
    token: u64,
    text: String,
    owned: bool,
}

impl TextBuffer {
    /// Takes responsibility for the buffer behind `token`, copying its
    /// contents out through the registry hook. A zero token means no
    /// buffer was attached.
    pub(crate) fn claim(token: u64) -> Self {
        let text = if token == 0 {
            String::new()
        } else {
            registry::resolve_text(token).unwrap_or_default()
        };
        Self {
            token,
            text,
            owned: token != 0,
        }
    }

    /// The buffer contents.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The wire token referencing the external buffer.
    pub fn token(&self) -> u64 {
        self.token
    }

    /// `true` on the one instance responsible for releasing the external
    /// buffer.
    pub fn owns_backing(&self) -> bool {
        self.owned
    }
}

impl Clone for TextBuffer {
    fn clone(&self) -> Self {
        Self {
            token: self.token,
            text: self.text.clone(),
            owned: false,
        }
    }
}

impl Drop for TextBuffer {
    fn drop(&mut self) {
        if self.owned {
            registry::release_text(self.token);
        }
    }
}

impl PartialEq for TextBuffer {
    // Ownership is a lifecycle property, not part of the value.
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token && self.text == other.text
    }
}

/// A file was dropped onto a window.
#[derive(Debug, Clone, PartialEq)]
pub struct DropFileEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
    /// The window that received the drop.
    pub window_id: u32,
    /// The dropped file's path, backed by an external buffer.
    pub path: TextBuffer,
}

impl DropFileEvent {
    /// The dropped file's path.
    pub fn path(&self) -> &str {
        self.path.as_str()
    }
}

/// A sensor reported new readings.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
    /// The sensor instance id.
    pub which: u32,
    /// Up to six sensor values; unused entries are zero.
    pub data: [f32; 6],
}

/// An application-defined event.
#[derive(Debug, Clone, PartialEq)]
pub struct UserEvent {
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
    /// The associated window, or zero.
    pub window_id: u32,
    /// Application-defined code.
    pub code: i32,
    /// First application-defined datum.
    pub data1: u64,
    /// Second application-defined datum.
    pub data2: u64,
}

/// A record whose discriminant is outside the known set.
///
/// Carries only what every record has; reading shape fields from it would
/// be meaningless.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownEvent {
    /// The unrecognized wire discriminant.
    pub discriminant: u32,
    /// Milliseconds since subsystem start; wraps on overflow.
    pub timestamp: u32,
}

/// A decoded event: exactly one strongly-typed variant per raw record.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Request to terminate the application.
    Quit(QuitEvent),
    /// A window changed state.
    Window(WindowEvent),
    /// A keyboard key changed state.
    Keyboard(KeyboardEvent),
    /// In-progress text composition.
    TextEditing(TextEditingEvent),
    /// Committed text input.
    TextInput(TextInputEvent),
    /// The mouse cursor moved.
    MouseMotion(MouseMotionEvent),
    /// A mouse button changed state.
    MouseButton(MouseButtonEvent),
    /// The mouse wheel was scrolled.
    MouseWheel(MouseWheelEvent),
    /// A joystick axis moved.
    JoyAxis(JoyAxisEvent),
    /// A joystick button changed state.
    JoyButton(JoyButtonEvent),
    /// A joystick device was connected or disconnected.
    JoyDevice(JoyDeviceEvent),
    /// A touch point changed.
    TouchFinger(TouchFingerEvent),
    /// A multi-finger gesture progressed.
    MultiGesture(MultiGestureEvent),
    /// A file was dropped onto a window.
    DropFile(DropFileEvent),
    /// A sensor reported new readings.
    Sensor(SensorEvent),
    /// An application-defined event.
    User(UserEvent),
    /// A record with an unrecognized discriminant.
    Unknown(UnknownEvent),
}

impl Event {
    /// The shape of this event, or `None` for [`Event::Unknown`].
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Event::Quit(_) => Some(EventKind::Quit),
            Event::Window(_) => Some(EventKind::Window),
            Event::Keyboard(_) => Some(EventKind::Keyboard),
            Event::TextEditing(_) => Some(EventKind::TextEditing),
            Event::TextInput(_) => Some(EventKind::TextInput),
            Event::MouseMotion(_) => Some(EventKind::MouseMotion),
            Event::MouseButton(_) => Some(EventKind::MouseButton),
            Event::MouseWheel(_) => Some(EventKind::MouseWheel),
            Event::JoyAxis(_) => Some(EventKind::JoyAxis),
            Event::JoyButton(_) => Some(EventKind::JoyButton),
            Event::JoyDevice(_) => Some(EventKind::JoyDevice),
            Event::TouchFinger(_) => Some(EventKind::TouchFinger),
            Event::MultiGesture(_) => Some(EventKind::MultiGesture),
            Event::DropFile(_) => Some(EventKind::DropFile),
            Event::Sensor(_) => Some(EventKind::Sensor),
            Event::User(_) => Some(EventKind::User),
            Event::Unknown(_) => None,
        }
    }

    /// The record timestamp, in milliseconds since subsystem start.
    pub fn timestamp(&self) -> u32 {
        match self {
            Event::Quit(e) => e.timestamp,
            Event::Window(e) => e.timestamp,
            Event::Keyboard(e) => e.timestamp,
            Event::TextEditing(e) => e.timestamp,
            Event::TextInput(e) => e.timestamp,
            Event::MouseMotion(e) => e.timestamp,
            Event::MouseButton(e) => e.timestamp,
            Event::MouseWheel(e) => e.timestamp,
            Event::JoyAxis(e) => e.timestamp,
            Event::JoyButton(e) => e.timestamp,
            Event::JoyDevice(e) => e.timestamp,
            Event::TouchFinger(e) => e.timestamp,
            Event::MultiGesture(e) => e.timestamp,
            Event::DropFile(e) => e.timestamp,
            Event::Sensor(e) => e.timestamp,
            Event::User(e) => e.timestamp,
            Event::Unknown(e) => e.timestamp,
        }
    }
}

/// A decoded variant the dispatcher can route to by shape.
///
/// Implemented by every variant struct except [`UnknownEvent`], which has
/// no shape of its own.
pub trait TypedEvent: Sized + 'static {
    /// The shape this type decodes from.
    const KIND: EventKind;

    /// Borrows the typed view out of a decoded event, if the shapes match.
    fn from_event(event: &Event) -> Option<&Self>;
}

macro_rules! typed_event {
    ($variant:ident, $ty:ty) => {
        impl TypedEvent for $ty {
            const KIND: EventKind = EventKind::$variant;

            fn from_event(event: &Event) -> Option<&Self> {
                match event {
                    Event::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

typed_event!(Quit, QuitEvent);
typed_event!(Window, WindowEvent);
typed_event!(Keyboard, KeyboardEvent);
typed_event!(TextEditing, TextEditingEvent);
typed_event!(TextInput, TextInputEvent);
typed_event!(MouseMotion, MouseMotionEvent);
typed_event!(MouseButton, MouseButtonEvent);
typed_event!(MouseWheel, MouseWheelEvent);
typed_event!(JoyAxis, JoyAxisEvent);
typed_event!(JoyButton, JoyButtonEvent);
typed_event!(JoyDevice, JoyDeviceEvent);
typed_event!(TouchFinger, TouchFingerEvent);
typed_event!(MultiGesture, MultiGestureEvent);
typed_event!(DropFile, DropFileEvent);
typed_event!(Sensor, SensorEvent);
typed_event!(User, UserEvent);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_view_matches_only_its_own_shape() {
        let event = Event::Quit(QuitEvent { timestamp: 12 });
        assert!(QuitEvent::from_event(&event).is_some());
        assert!(WindowEvent::from_event(&event).is_none());
    }

    #[test]
    fn unknown_has_no_kind() {
        let event = Event::Unknown(UnknownEvent {
            discriminant: 0x9999,
            timestamp: 0,
        });
        assert_eq!(event.kind(), None);
    }

    #[test]
    fn modifiers_combine_and_query() {
        let mods = KeyModifiers::SHIFT.union(KeyModifiers::CTRL);
        assert!(mods.contains(KeyModifiers::SHIFT));
        assert!(mods.contains(KeyModifiers::CTRL));
        assert!(!mods.contains(KeyModifiers::ALT));
        assert!(KeyModifiers::NONE.is_empty());
    }

    #[test]
    fn cloning_a_text_buffer_clears_ownership() {
        // Token zero never touches the registry hooks.
        let original = TextBuffer::claim(0);
        assert!(!original.owns_backing());
        let copy = original.clone();
        assert!(!copy.owns_backing());
        assert_eq!(original, copy);
    }
}

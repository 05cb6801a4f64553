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

//! The fixed-layout record pulled from the native event queue.
//!
//! Every record is exactly [`RECORD_SIZE`] bytes: a u32 discriminant, a u32
//! timestamp, and a payload region that every shape overlays. The layout is
//! dictated by the native layer; this module only mirrors it. Reading a
//! shape's fields from a record carrying a different discriminant is
//! meaningless, which is why the only safe consumer is the decoder's
//! discriminant dispatch.
//!
//! The per-shape constructors exist for the synthetic-push side: tests and
//! applications injecting events build records with the same overlays the
//! decoder reads.

use super::types::{
    ButtonState, JoyDeviceOp, KeyModifiers, MouseButton, TouchPhase, WindowOp, TEXT_CAPACITY,
};
use bytemuck::{Pod, Zeroable};

/// Total size of one raw record, in bytes.
pub const RECORD_SIZE: usize = 56;

/// Size of the shape-specific payload region, in bytes.
pub const PAYLOAD_SIZE: usize = RECORD_SIZE - 8;

/// One fixed-layout record from the native event queue.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct RawEvent {
    kind: u32,
    timestamp: u32,
    payload: [u8; PAYLOAD_SIZE],
}

impl RawEvent {
    /// Builds a record with an empty payload.
    pub fn new(kind: u32, timestamp: u32) -> Self {
        Self {
            kind,
            timestamp,
            payload: [0; PAYLOAD_SIZE],
        }
    }

    /// Builds a record whose payload region starts with `payload`'s bytes.
    ///
    /// Every payload overlay fits the region; the bound is checked in debug
    /// builds.
    pub fn with_payload<P: Pod>(kind: u32, timestamp: u32, payload: &P) -> Self {
        let bytes = bytemuck::bytes_of(payload);
        debug_assert!(bytes.len() <= PAYLOAD_SIZE);
        let mut record = Self::new(kind, timestamp);
        record.payload[..bytes.len()].copy_from_slice(bytes);
        record
    }

    /// The wire discriminant.
    pub const fn kind_raw(&self) -> u32 {
        self.kind
    }

    /// Milliseconds since subsystem start; wraps on overflow.
    pub const fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// Reinterprets the start of the payload region as overlay `P`.
    ///
    /// The payload region is only 4-byte aligned, so overlays containing
    /// u64 fields are read unaligned.
    pub fn read_payload<P: Pod>(&self) -> P {
        bytemuck::pod_read_unaligned(&self.payload[..std::mem::size_of::<P>()])
    }

    /// Builds a quit record.
    pub fn quit(timestamp: u32) -> Self {
        Self::new(super::EventKind::Quit.raw(), timestamp)
    }

    /// Builds a window-state record.
    pub fn window(timestamp: u32, window_id: u32, op: WindowOp, data1: i32, data2: i32) -> Self {
        let payload = WindowPayload {
            window_id,
            op: op.raw(),
            data1,
            data2,
        };
        Self::with_payload(super::EventKind::Window.raw(), timestamp, &payload)
    }

    /// Builds a keyboard record.
    pub fn keyboard(
        timestamp: u32,
        window_id: u32,
        state: ButtonState,
        repeat: bool,
        scancode: u32,
        keycode: u32,
        modifiers: KeyModifiers,
    ) -> Self {
        let payload = KeyboardPayload {
            window_id,
            state: state.raw(),
            repeat: repeat as u32,
            scancode,
            keycode,
            modifiers: modifiers.bits(),
        };
        Self::with_payload(super::EventKind::Keyboard.raw(), timestamp, &payload)
    }

    /// Builds a text-editing record. `text` is truncated to the fixed wire
    /// capacity at a character boundary.
    pub fn text_editing(timestamp: u32, window_id: u32, text: &str, start: i32, length: i32) -> Self {
        let payload = TextEditingPayload {
            window_id,
            text: pack_text(text),
            start,
            length,
        };
        Self::with_payload(super::EventKind::TextEditing.raw(), timestamp, &payload)
    }

    /// Builds a text-input record. `text` is truncated to the fixed wire
    /// capacity at a character boundary.
    pub fn text_input(timestamp: u32, window_id: u32, text: &str) -> Self {
        let payload = TextInputPayload {
            window_id,
            text: pack_text(text),
        };
        Self::with_payload(super::EventKind::TextInput.raw(), timestamp, &payload)
    }

    /// Builds a mouse-motion record.
    pub fn mouse_motion(
        timestamp: u32,
        window_id: u32,
        buttons: u32,
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
    ) -> Self {
        let payload = MouseMotionPayload {
            window_id,
            buttons,
            x,
            y,
            dx,
            dy,
        };
        Self::with_payload(super::EventKind::MouseMotion.raw(), timestamp, &payload)
    }

    /// Builds a mouse-button record.
    pub fn mouse_button(
        timestamp: u32,
        window_id: u32,
        button: MouseButton,
        state: ButtonState,
        clicks: u32,
        x: i32,
        y: i32,
    ) -> Self {
        let payload = MouseButtonPayload {
            window_id,
            button: button.raw(),
            state: state.raw(),
            clicks,
            x,
            y,
        };
        Self::with_payload(super::EventKind::MouseButton.raw(), timestamp, &payload)
    }

    /// Builds a mouse-wheel record.
    pub fn mouse_wheel(timestamp: u32, window_id: u32, dx: i32, dy: i32, flipped: bool) -> Self {
        let payload = MouseWheelPayload {
            window_id,
            dx,
            dy,
            flipped: flipped as u32,
        };
        Self::with_payload(super::EventKind::MouseWheel.raw(), timestamp, &payload)
    }

    /// Builds a joystick-axis record.
    pub fn joy_axis(timestamp: u32, which: u32, axis: u8, value: i32) -> Self {
        let payload = JoyAxisPayload {
            which,
            axis: axis as u32,
            value,
        };
        Self::with_payload(super::EventKind::JoyAxis.raw(), timestamp, &payload)
    }

    /// Builds a joystick-button record.
    pub fn joy_button(timestamp: u32, which: u32, button: u8, state: ButtonState) -> Self {
        let payload = JoyButtonPayload {
            which,
            button: button as u32,
            state: state.raw(),
        };
        Self::with_payload(super::EventKind::JoyButton.raw(), timestamp, &payload)
    }

    /// Builds a joystick-device record.
    pub fn joy_device(timestamp: u32, which: u32, op: JoyDeviceOp) -> Self {
        let payload = JoyDevicePayload { which, op: op.raw() };
        Self::with_payload(super::EventKind::JoyDevice.raw(), timestamp, &payload)
    }

    /// Builds a touch-finger record. Coordinates are written as given; the
    /// decoder clamps.
    #[allow(clippy::too_many_arguments)]
    pub fn touch_finger(
        timestamp: u32,
        touch_id: u64,
        finger_id: u64,
        phase: TouchPhase,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        pressure: f32,
    ) -> Self {
        let payload = TouchFingerPayload {
            touch_id,
            finger_id,
            phase: phase.raw(),
            x,
            y,
            dx,
            dy,
            pressure,
        };
        Self::with_payload(super::EventKind::TouchFinger.raw(), timestamp, &payload)
    }

    /// Builds a multi-gesture record. Fields are written as given; the
    /// decoder clamps.
    pub fn multi_gesture(
        timestamp: u32,
        touch_id: u64,
        d_theta: f32,
        d_dist: f32,
        x: f32,
        y: f32,
        finger_count: u16,
    ) -> Self {
        let payload = MultiGesturePayload {
            touch_id,
            d_theta,
            d_dist,
            x,
            y,
            finger_count: finger_count as u32,
            padding: 0,
        };
        Self::with_payload(super::EventKind::MultiGesture.raw(), timestamp, &payload)
    }

    /// Builds a drop-file record referencing an externally-allocated text
    /// buffer by token.
    pub fn drop_file(timestamp: u32, window_id: u32, token: u64) -> Self {
        let payload = DropFilePayload {
            token,
            window_id,
            padding: 0,
        };
        Self::with_payload(super::EventKind::DropFile.raw(), timestamp, &payload)
    }

    /// Builds a sensor record.
    pub fn sensor(timestamp: u32, which: u32, data: [f32; 6]) -> Self {
        let payload = SensorPayload { which, data };
        Self::with_payload(super::EventKind::Sensor.raw(), timestamp, &payload)
    }

    /// Builds an application-defined record.
    pub fn user(timestamp: u32, window_id: u32, code: i32, data1: u64, data2: u64) -> Self {
        let payload = UserPayload {
            data1,
            data2,
            window_id,
            code,
        };
        Self::with_payload(super::EventKind::User.raw(), timestamp, &payload)
    }
}

/// Copies `text` into the fixed wire field, truncating at a character
/// boundary if it exceeds the capacity.
fn pack_text(text: &str) -> [u8; TEXT_CAPACITY] {
    let mut end = text.len().min(TEXT_CAPACITY);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut field = [0u8; TEXT_CAPACITY];
    field[..end].copy_from_slice(&text.as_bytes()[..end]);
    field
}

/// Payload overlay for window-state records.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct WindowPayload {
    /// The window the event belongs to.
    pub window_id: u32,
    /// Operation code (see [`WindowOp`]).
    pub op: u32,
    /// Operation-dependent datum.
    pub data1: i32,
    /// Operation-dependent datum.
    pub data2: i32,
}

/// Payload overlay for keyboard records.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct KeyboardPayload {
    /// The window with keyboard focus.
    pub window_id: u32,
    /// Zero released, non-zero pressed.
    pub state: u32,
    /// Non-zero for key auto-repeat.
    pub repeat: u32,
    /// Physical key code.
    pub scancode: u32,
    /// Layout-mapped key code.
    pub keycode: u32,
    /// Modifier bits (see [`KeyModifiers`]).
    pub modifiers: u32,
}

/// Payload overlay for text-editing records.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TextEditingPayload {
    /// The window with keyboard focus.
    pub window_id: u32,
    /// NUL-padded UTF-8 composition text.
    pub text: [u8; TEXT_CAPACITY],
    /// Cursor position within the composition.
    pub start: i32,
    /// Length of the selected portion; the decoder clamps it.
    pub length: i32,
}

/// Payload overlay for text-input records.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TextInputPayload {
    /// The window with keyboard focus.
    pub window_id: u32,
    /// NUL-padded UTF-8 committed text.
    pub text: [u8; TEXT_CAPACITY],
}

/// Payload overlay for mouse-motion records.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MouseMotionPayload {
    /// The window with mouse focus.
    pub window_id: u32,
    /// Bitmask of held buttons.
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

/// Payload overlay for mouse-button records.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MouseButtonPayload {
    /// The window with mouse focus.
    pub window_id: u32,
    /// Button code (see [`MouseButton`]).
    pub button: u32,
    /// Zero released, non-zero pressed.
    pub state: u32,
    /// Click count.
    pub clicks: u32,
    /// Cursor x at the time of the click.
    pub x: i32,
    /// Cursor y at the time of the click.
    pub y: i32,
}

/// Payload overlay for mouse-wheel records.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MouseWheelPayload {
    /// The window with mouse focus.
    pub window_id: u32,
    /// Horizontal scroll amount.
    pub dx: i32,
    /// Vertical scroll amount.
    pub dy: i32,
    /// Non-zero when the platform reports inverted scrolling.
    pub flipped: u32,
}

/// Payload overlay for joystick-axis records.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct JoyAxisPayload {
    /// The joystick instance id.
    pub which: u32,
    /// The axis index.
    pub axis: u32,
    /// Axis position; the decoder clamps it to the signed 16-bit range.
    pub value: i32,
}

/// Payload overlay for joystick-button records.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct JoyButtonPayload {
    /// The joystick instance id.
    pub which: u32,
    /// The button index.
    pub button: u32,
    /// Zero released, non-zero pressed.
    pub state: u32,
}

/// Payload overlay for joystick-device records.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct JoyDevicePayload {
    /// The joystick instance id.
    pub which: u32,
    /// Operation code (see [`JoyDeviceOp`]).
    pub op: u32,
}

/// Payload overlay for touch-finger records.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TouchFingerPayload {
    /// The touch device id.
    pub touch_id: u64,
    /// The finger id within the device.
    pub finger_id: u64,
    /// Phase code (see [`TouchPhase`]).
    pub phase: u32,
    /// Normalized x; the decoder clamps it.
    pub x: f32,
    /// Normalized y; the decoder clamps it.
    pub y: f32,
    /// Normalized x delta; the decoder clamps it.
    pub dx: f32,
    /// Normalized y delta; the decoder clamps it.
    pub dy: f32,
    /// Normalized pressure; the decoder clamps it.
    pub pressure: f32,
}

/// Payload overlay for multi-gesture records.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MultiGesturePayload {
    /// The touch device id.
    pub touch_id: u64,
    /// Rotation delta; the decoder clamps it.
    pub d_theta: f32,
    /// Pinch distance delta; the decoder clamps it.
    pub d_dist: f32,
    /// Normalized gesture center x; the decoder clamps it.
    pub x: f32,
    /// Normalized gesture center y; the decoder clamps it.
    pub y: f32,
    /// Number of fingers involved.
    pub finger_count: u32,
    /// Wire padding; keeps the overlay free of implicit padding.
    pub padding: u32,
}

/// Payload overlay for drop-file records.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct DropFilePayload {
    /// Token referencing the externally-allocated path buffer.
    pub token: u64,
    /// The window that received the drop.
    pub window_id: u32,
    /// Wire padding; keeps the overlay free of implicit padding.
    pub padding: u32,
}

/// Payload overlay for sensor records.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SensorPayload {
    /// The sensor instance id.
    pub which: u32,
    /// Up to six sensor values.
    pub data: [f32; 6],
}

/// Payload overlay for application-defined records.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct UserPayload {
    /// First application-defined datum.
    pub data1: u64,
    /// Second application-defined datum.
    pub data2: u64,
    /// The associated window, or zero.
    pub window_id: u32,
    /// Application-defined code.
    pub code: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn record_layout_matches_the_wire_contract() {
        assert_eq!(size_of::<RawEvent>(), RECORD_SIZE);
        assert_eq!(PAYLOAD_SIZE, 48);
    }

    #[test]
    fn every_overlay_fits_the_payload_region() {
        assert!(size_of::<WindowPayload>() <= PAYLOAD_SIZE);
        assert!(size_of::<KeyboardPayload>() <= PAYLOAD_SIZE);
        assert!(size_of::<TextEditingPayload>() <= PAYLOAD_SIZE);
        assert!(size_of::<TextInputPayload>() <= PAYLOAD_SIZE);
        assert!(size_of::<MouseMotionPayload>() <= PAYLOAD_SIZE);
        assert!(size_of::<MouseButtonPayload>() <= PAYLOAD_SIZE);
        assert!(size_of::<MouseWheelPayload>() <= PAYLOAD_SIZE);
        assert!(size_of::<JoyAxisPayload>() <= PAYLOAD_SIZE);
        assert!(size_of::<JoyButtonPayload>() <= PAYLOAD_SIZE);
        assert!(size_of::<JoyDevicePayload>() <= PAYLOAD_SIZE);
        assert!(size_of::<TouchFingerPayload>() <= PAYLOAD_SIZE);
        assert!(size_of::<MultiGesturePayload>() <= PAYLOAD_SIZE);
        assert!(size_of::<DropFilePayload>() <= PAYLOAD_SIZE);
        assert!(size_of::<SensorPayload>() <= PAYLOAD_SIZE);
        assert!(size_of::<UserPayload>() <= PAYLOAD_SIZE);
    }

    #[test]
    fn payload_round_trips_through_the_overlay() {
        let record = RawEvent::window(42, 7, WindowOp::Resized, 800, 600);
        assert_eq!(record.kind_raw(), super::super::EventKind::Window.raw());
        assert_eq!(record.timestamp(), 42);

        let payload: WindowPayload = record.read_payload();
        assert_eq!(payload.window_id, 7);
        assert_eq!(payload.op, WindowOp::Resized.raw());
        assert_eq!(payload.data1, 800);
        assert_eq!(payload.data2, 600);
    }

    #[test]
    fn text_packing_truncates_at_a_character_boundary() {
        // 10 'é' (2 bytes each) followed by enough to overflow the field.
        let text = "é".repeat(20);
        let field = pack_text(&text);
        let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
        assert!(end <= TEXT_CAPACITY);
        assert!(std::str::from_utf8(&field[..end]).is_ok());
    }
}

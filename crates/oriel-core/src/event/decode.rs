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

//! Translation from raw records to strongly-typed variants.
//!
//! Dispatch is purely on the discriminant; the payload region is
//! reinterpreted through the shape's overlay. Fields with a documented
//! bounded range are clamped here, once, so every consumer downstream can
//! rely on the bounds unconditionally. Unknown discriminants decode to
//! [`Event::Unknown`] instead of failing: the native layer is free to emit
//! shapes newer than this crate.

use super::kind::EventKind;
use super::raw::{
    DropFilePayload, JoyAxisPayload, JoyButtonPayload, JoyDevicePayload, KeyboardPayload,
    MouseButtonPayload, MouseMotionPayload, MouseWheelPayload, MultiGesturePayload, RawEvent,
    SensorPayload, TextEditingPayload, TextInputPayload, TouchFingerPayload, UserPayload,
    WindowPayload,
};
use super::types::*;

/// Decodes one raw record into its typed variant.
pub fn decode(raw: &RawEvent) -> Event {
    let timestamp = raw.timestamp();
    match EventKind::from_raw(raw.kind_raw()) {
        Some(EventKind::Quit) => Event::Quit(QuitEvent { timestamp }),
        Some(EventKind::Window) => {
            let p: WindowPayload = raw.read_payload();
            Event::Window(WindowEvent {
                timestamp,
                window_id: p.window_id,
                op: WindowOp::from_raw(p.op),
                data1: p.data1,
                data2: p.data2,
            })
        }
        Some(EventKind::Keyboard) => {
            let p: KeyboardPayload = raw.read_payload();
            Event::Keyboard(KeyboardEvent {
                timestamp,
                window_id: p.window_id,
                state: ButtonState::from_raw(p.state),
                repeat: p.repeat != 0,
                scancode: p.scancode,
                keycode: p.keycode,
                modifiers: KeyModifiers::from_bits(p.modifiers),
            })
        }
        Some(EventKind::TextEditing) => {
            let p: TextEditingPayload = raw.read_payload();
            Event::TextEditing(TextEditingEvent {
                timestamp,
                window_id: p.window_id,
                text: unpack_text(&p.text),
                start: p.start,
                length: clamp_edit_length(p.length),
            })
        }
        Some(EventKind::TextInput) => {
            let p: TextInputPayload = raw.read_payload();
            Event::TextInput(TextInputEvent {
                timestamp,
                window_id: p.window_id,
                text: unpack_text(&p.text),
            })
        }
        Some(EventKind::MouseMotion) => {
            let p: MouseMotionPayload = raw.read_payload();
            Event::MouseMotion(MouseMotionEvent {
                timestamp,
                window_id: p.window_id,
                buttons: p.buttons,
                x: p.x,
                y: p.y,
                dx: p.dx,
                dy: p.dy,
            })
        }
        Some(EventKind::MouseButton) => {
            let p: MouseButtonPayload = raw.read_payload();
            Event::MouseButton(MouseButtonEvent {
                timestamp,
                window_id: p.window_id,
                button: MouseButton::from_raw(p.button),
                state: ButtonState::from_raw(p.state),
                clicks: p.clicks,
                x: p.x,
                y: p.y,
            })
        }
        Some(EventKind::MouseWheel) => {
            let p: MouseWheelPayload = raw.read_payload();
            Event::MouseWheel(MouseWheelEvent {
                timestamp,
                window_id: p.window_id,
                dx: p.dx,
                dy: p.dy,
                flipped: p.flipped != 0,
            })
        }
        Some(EventKind::JoyAxis) => {
            let p: JoyAxisPayload = raw.read_payload();
            Event::JoyAxis(JoyAxisEvent {
                timestamp,
                which: p.which,
                axis: p.axis as u8,
                value: clamp_axis(p.value),
            })
        }
        Some(EventKind::JoyButton) => {
            let p: JoyButtonPayload = raw.read_payload();
            Event::JoyButton(JoyButtonEvent {
                timestamp,
                which: p.which,
                button: p.button as u8,
                state: ButtonState::from_raw(p.state),
            })
        }
        Some(EventKind::JoyDevice) => {
            let p: JoyDevicePayload = raw.read_payload();
            Event::JoyDevice(JoyDeviceEvent {
                timestamp,
                which: p.which,
                op: JoyDeviceOp::from_raw(p.op),
            })
        }
        Some(EventKind::TouchFinger) => {
            let p: TouchFingerPayload = raw.read_payload();
            Event::TouchFinger(TouchFingerEvent {
                timestamp,
                touch_id: p.touch_id,
                finger_id: p.finger_id,
                phase: TouchPhase::from_raw(p.phase),
                x: clamp_unit(p.x),
                y: clamp_unit(p.y),
                dx: clamp_signed_unit(p.dx),
                dy: clamp_signed_unit(p.dy),
                pressure: clamp_unit(p.pressure),
            })
        }
        Some(EventKind::MultiGesture) => {
            let p: MultiGesturePayload = raw.read_payload();
            Event::MultiGesture(MultiGestureEvent {
                timestamp,
                touch_id: p.touch_id,
                d_theta: clamp_signed_unit(p.d_theta),
                d_dist: clamp_signed_unit(p.d_dist),
                x: clamp_unit(p.x),
                y: clamp_unit(p.y),
                finger_count: p.finger_count as u16,
            })
        }
        Some(EventKind::DropFile) => {
            let p: DropFilePayload = raw.read_payload();
            Event::DropFile(DropFileEvent {
                timestamp,
                window_id: p.window_id,
                path: TextBuffer::claim(p.token),
            })
        }
        Some(EventKind::Sensor) => {
            let p: SensorPayload = raw.read_payload();
            Event::Sensor(SensorEvent {
                timestamp,
                which: p.which,
                data: p.data,
            })
        }
        Some(EventKind::User) => {
            let p: UserPayload = raw.read_payload();
            Event::User(UserEvent {
                timestamp,
                window_id: p.window_id,
                code: p.code,
                data1: p.data1,
                data2: p.data2,
            })
        }
        None => Event::Unknown(UnknownEvent {
            discriminant: raw.kind_raw(),
            timestamp,
        }),
    }
}

/// Reads the NUL-padded UTF-8 wire text field into an owned string.
fn unpack_text(field: &[u8; TEXT_CAPACITY]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

/// Clamps a text-editing selection length to `[0, 32]`.
fn clamp_edit_length(raw: i32) -> i32 {
    raw.clamp(0, TEXT_CAPACITY as i32)
}

/// Clamps a normalized coordinate to `[0.0, 1.0]`. NaN lands on the lower
/// bound.
fn clamp_unit(value: f32) -> f32 {
    if !(value >= 0.0) {
        0.0
    } else if value > 1.0 {
        1.0
    } else {
        value
    }
}

/// Clamps a normalized delta to `[-1.0, 1.0]`. NaN lands on the lower
/// bound.
fn clamp_signed_unit(value: f32) -> f32 {
    if !(value >= -1.0) {
        -1.0
    } else if value > 1.0 {
        1.0
    } else {
        value
    }
}

/// Clamps a joystick axis position to the signed 16-bit range.
fn clamp_axis(raw: i32) -> i16 {
    raw.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

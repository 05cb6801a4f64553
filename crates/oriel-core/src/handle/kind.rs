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

//! Marker types for the resource kinds the native layer allocates.
//!
//! Every externally-allocated object the library wraps (a window, a
//! renderer, a texture, ...) is identified by one of these zero-sized
//! markers. The marker selects the deleter registered for that kind in
//! [`registry`](crate::handle::registry), so a `Handle<Window>` and a
//! `Handle<Texture>` release through different native functions even though
//! both wrap the same opaque id representation.

/// A kind of externally-allocated resource.
///
/// Implementors are zero-sized markers; the trait exists so the handle and
/// registry machinery can be generic over the kind without carrying any
/// per-instance state.
pub trait ResourceKind: 'static {
    /// Name used in logs and error messages.
    const NAME: &'static str;
}

/// An operating-system window.
#[derive(Debug, Clone, Copy)]
pub struct Window;

/// A 2D rendering context attached to a window.
#[derive(Debug, Clone, Copy)]
pub struct Renderer;

/// A GPU-resident texture.
#[derive(Debug, Clone, Copy)]
pub struct Texture;

/// A CPU-resident pixel surface.
#[derive(Debug, Clone, Copy)]
pub struct Surface;

/// A loaded font face.
#[derive(Debug, Clone, Copy)]
pub struct Font;

/// A decoded audio chunk ready for playback.
#[derive(Debug, Clone, Copy)]
pub struct AudioChunk;

/// An opened joystick device.
#[derive(Debug, Clone, Copy)]
pub struct Joystick;

/// An opened sensor device.
#[derive(Debug, Clone, Copy)]
pub struct Sensor;

impl ResourceKind for Window {
    const NAME: &'static str = "window";
}

impl ResourceKind for Renderer {
    const NAME: &'static str = "renderer";
}

impl ResourceKind for Texture {
    const NAME: &'static str = "texture";
}

impl ResourceKind for Surface {
    const NAME: &'static str = "surface";
}

impl ResourceKind for Font {
    const NAME: &'static str = "font";
}

impl ResourceKind for AudioChunk {
    const NAME: &'static str = "audio chunk";
}

impl ResourceKind for Joystick {
    const NAME: &'static str = "joystick";
}

impl ResourceKind for Sensor {
    const NAME: &'static str = "sensor";
}

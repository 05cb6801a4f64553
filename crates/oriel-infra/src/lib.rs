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

//! # Oriel Infra
//!
//! Concrete implementations of the seams `oriel-core` leaves abstract: a
//! headless in-memory event queue, the text store backing drop-file
//! payloads, and a resource table that issues ids and tracks live
//! resources per kind. A native build of the library swaps these for the
//! real platform layer; tests and the sandbox run entirely on them.

pub mod queue;
pub mod resources;
pub mod text;

pub use queue::SyntheticQueue;

/// Wires this backend into `oriel-core`'s registries: one deleter per
/// resource kind plus the text-payload hooks.
///
/// Safe to call more than once; later calls re-register the same hooks.
pub fn install() {
    resources::install_deleters();
    text::install_hooks();
    log::info!("Headless backend installed.");
}

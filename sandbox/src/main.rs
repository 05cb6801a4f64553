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

//! End-to-end demo: headless backend, resource handles, synthetic events,
//! and a dispatcher drain cycle.

use oriel_core::event::types::{ButtonState, DropFileEvent, KeyboardEvent, QuitEvent, WindowOp};
use oriel_core::event::{EventDispatcher, EventKind, EventPump, KeyModifiers, RawEvent};
use oriel_core::handle::{Handle, Window};
use oriel_infra::{resources, text, SyntheticQueue};

fn main() {
    env_logger::init();
    oriel_infra::install();

    let window = Handle::<Window>::claim(resources::acquire::<Window>())
        .expect("headless acquire never returns a null id");
    log::info!("Opened {window:?}.");

    let pump = EventPump::new(SyntheticQueue::new());
    let mut dispatcher = EventDispatcher::watching(
        pump,
        [EventKind::Quit, EventKind::Keyboard, EventKind::DropFile],
    );

    dispatcher
        .bind::<KeyboardEvent>()
        .to(|event: &KeyboardEvent| {
            log::info!(
                "Key {} {}.",
                event.keycode,
                if event.state.is_pressed() { "down" } else { "up" }
            );
        })
        .expect("keyboard is watched");
    dispatcher
        .bind::<DropFileEvent>()
        .to(|event: &DropFileEvent| {
            log::info!("File dropped: {}.", event.path());
        })
        .expect("drop-file is watched");
    dispatcher
        .bind::<QuitEvent>()
        .to(|event: &QuitEvent| {
            log::info!("Quit requested at t={}ms.", event.timestamp);
        })
        .expect("quit is watched");

    let window_id = window.get().0 as u32;
    let pump = dispatcher.pump_mut();
    pump.push(RawEvent::keyboard(
        10,
        window_id,
        ButtonState::Pressed,
        false,
        4,
        97,
        KeyModifiers::NONE,
    ));
    pump.push(RawEvent::keyboard(
        25,
        window_id,
        ButtonState::Released,
        false,
        4,
        97,
        KeyModifiers::NONE,
    ));
    // A window event nobody is bound to: the drain cycle discards it.
    pump.push(RawEvent::window(30, window_id, WindowOp::Resized, 800, 600));
    pump.push(RawEvent::drop_file(
        40,
        window_id,
        text::intern("/home/user/screenshot.png"),
    ));
    pump.push(RawEvent::quit(50));

    match dispatcher.poll() {
        Ok(dispatched) => log::info!("Drain cycle dispatched {dispatched} events."),
        Err(err) => log::error!("Drain cycle aborted: {err}."),
    }

    drop(window);
    log::info!(
        "Shutting down with {} live resources and {} live text buffers.",
        resources::live_count(),
        text::live_count()
    );
}

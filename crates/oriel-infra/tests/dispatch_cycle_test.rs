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

//! Full drain-cycle scenarios over the headless queue.

use oriel_core::event::{ranges, EventDispatcher, EventKind, EventPump, RawEvent};
use oriel_core::event::types::{KeyboardEvent, QuitEvent, WindowOp};
use oriel_infra::SyntheticQueue;
use std::cell::Cell;
use std::rc::Rc;

fn dispatcher_watching(kinds: &[EventKind]) -> EventDispatcher<SyntheticQueue> {
    EventDispatcher::watching(EventPump::new(SyntheticQueue::new()), kinds.iter().copied())
}

#[test]
fn quit_window_quit_scenario() {
    // --- 1. ARRANGE ---
    let mut dispatcher = dispatcher_watching(&[EventKind::Quit]);
    let counter = Rc::new(Cell::new(0));
    let seen = counter.clone();
    dispatcher
        .bind::<QuitEvent>()
        .to(move |_e: &QuitEvent| seen.set(seen.get() + 1))
        .unwrap();

    let pump = dispatcher.pump_mut();
    assert!(pump.push(RawEvent::quit(1)));
    assert!(pump.push(RawEvent::window(2, 1, WindowOp::Moved, 10, 20)));
    assert!(pump.push(RawEvent::quit(3)));

    // --- 2. ACT ---
    let dispatched = dispatcher.poll().expect("no handler fails here");

    // --- 3. ASSERT ---
    assert_eq!(dispatched, 2);
    assert_eq!(counter.get(), 2);
    // The window record was discarded during the cycle, not buffered.
    assert_eq!(dispatcher.pump().queue_count(ranges::EVERYTHING), 0);

    let second_cycle = dispatcher.poll().expect("empty queue cannot fail");
    assert_eq!(second_cycle, 0);
    assert_eq!(counter.get(), 2);
}

#[test]
fn flush_discards_without_dispatching() {
    let mut dispatcher = dispatcher_watching(&[EventKind::Keyboard]);
    let counter = Rc::new(Cell::new(0));
    let seen = counter.clone();
    dispatcher
        .bind::<KeyboardEvent>()
        .to(move |_e: &KeyboardEvent| seen.set(seen.get() + 1))
        .unwrap();

    let pump = dispatcher.pump_mut();
    pump.push(RawEvent::keyboard(
        1,
        1,
        oriel_core::event::ButtonState::Pressed,
        false,
        4,
        97,
        oriel_core::event::KeyModifiers::NONE,
    ));
    pump.push(RawEvent::quit(2));
    assert_eq!(pump.queue_count(ranges::KEYBOARD), 1);

    pump.flush(ranges::KEYBOARD);
    assert_eq!(pump.queue_count(ranges::KEYBOARD), 0);
    assert_eq!(pump.queue_count(ranges::EVERYTHING), 1);

    dispatcher.poll().unwrap();
    assert_eq!(counter.get(), 0);
}

#[test]
fn unknown_shapes_are_dropped_silently() {
    let mut dispatcher = dispatcher_watching(&[EventKind::Quit]);
    let counter = Rc::new(Cell::new(0));
    let seen = counter.clone();
    dispatcher
        .bind::<QuitEvent>()
        .to(move |_e: &QuitEvent| seen.set(seen.get() + 1))
        .unwrap();

    // A discriminant newer than this build of the library.
    dispatcher.pump_mut().push(RawEvent::new(0x1400, 0));
    dispatcher.pump_mut().push(RawEvent::quit(1));

    assert_eq!(dispatcher.poll().unwrap(), 1);
    assert_eq!(counter.get(), 1);
    assert_eq!(dispatcher.pump().queue_count(ranges::EVERYTHING), 0);
}

#[test]
fn rebinding_hot_swaps_the_handler_between_cycles() {
    let mut dispatcher = dispatcher_watching(&[EventKind::Quit]);
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));

    let hits = first.clone();
    dispatcher
        .bind::<QuitEvent>()
        .to(move |_e: &QuitEvent| hits.set(hits.get() + 1))
        .unwrap();

    dispatcher.pump_mut().push(RawEvent::quit(1));
    dispatcher.poll().unwrap();

    let hits = second.clone();
    dispatcher
        .bind::<QuitEvent>()
        .to(move |_e: &QuitEvent| hits.set(hits.get() + 1))
        .unwrap();

    dispatcher.pump_mut().push(RawEvent::quit(2));
    dispatcher.poll().unwrap();

    assert_eq!(first.get(), 1);
    assert_eq!(second.get(), 1);
    assert_eq!(dispatcher.active_count(), 1);
}

#[test]
fn poll_iter_drains_decoded_events_in_order() {
    let mut pump = EventPump::new(SyntheticQueue::new());
    pump.push(RawEvent::quit(1));
    pump.push(RawEvent::window(2, 1, WindowOp::FocusGained, 0, 0));
    pump.push(RawEvent::new(0x4444, 3));

    let drained: Vec<_> = pump.poll_iter().collect();
    assert_eq!(drained.len(), 3);
    assert_eq!(drained[0].kind(), Some(EventKind::Quit));
    assert_eq!(drained[1].kind(), Some(EventKind::Window));
    assert_eq!(drained[2].kind(), None);
    assert_eq!(pump.queue_count(ranges::EVERYTHING), 0);
}

#[test]
fn failed_handler_resumes_next_cycle_with_the_remainder() {
    let mut dispatcher = dispatcher_watching(&[EventKind::Quit]);
    let calls = Rc::new(Cell::new(0));

    let seen = calls.clone();
    dispatcher
        .bind::<QuitEvent>()
        .to(move |_e: &QuitEvent| -> Result<(), oriel_core::BoxError> {
            seen.set(seen.get() + 1);
            if seen.get() == 1 {
                Err("first invocation fails".into())
            } else {
                Ok(())
            }
        })
        .unwrap();

    dispatcher.pump_mut().push(RawEvent::quit(1));
    dispatcher.pump_mut().push(RawEvent::quit(2));
    dispatcher.pump_mut().push(RawEvent::quit(3));

    assert!(dispatcher.poll().is_err());
    assert_eq!(calls.get(), 1);
    // The failing invocation consumed its record; two remain queued.
    assert_eq!(dispatcher.pump().queue_count(ranges::EVERYTHING), 2);

    assert_eq!(dispatcher.poll().unwrap(), 2);
    assert_eq!(calls.get(), 3);
}

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

//! The release-exactly-once contract for drop-file text payloads.
//!
//! This file deliberately runs alone so the text-store counters observe
//! only the scenarios below.

use oriel_core::event::{decode, Event, RawEvent};
use oriel_infra::text;

fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
    oriel_infra::install();
}

#[test]
fn copied_twice_still_frees_exactly_once() {
    setup();

    // --- 1. ARRANGE ---
    let token = text::intern("/home/user/drop.txt");
    let raw = RawEvent::drop_file(100, 1, token);

    // --- 2. ACT ---
    {
        let event = decode(&raw);
        let Event::DropFile(original) = event else {
            panic!("expected a drop-file event");
        };
        assert_eq!(original.path(), "/home/user/drop.txt");
        assert!(original.path.owns_backing());

        let first_copy = original.clone();
        let second_copy = first_copy.clone();
        assert!(!first_copy.path.owns_backing());
        assert!(!second_copy.path.owns_backing());
        // Copies keep the contents even though they own nothing.
        assert_eq!(second_copy.path(), "/home/user/drop.txt");
    }

    // --- 3. ASSERT ---
    // The buffer is gone, and nothing released it a second time: together
    // that is release-exactly-once.
    assert_eq!(text::resolve(token), None);
    assert_eq!(text::stray_release_count(), 0);
}

#[test]
fn the_owner_may_drop_after_its_copies() {
    setup();

    let token = text::intern("/var/tmp/image.png");
    let raw = RawEvent::drop_file(5, 2, token);

    let Event::DropFile(original) = decode(&raw) else {
        panic!("expected a drop-file event");
    };
    let copy = original.clone();
    drop(copy);
    // The backing buffer outlives the copy; only the owner releases it.
    assert!(text::resolve(token).is_some());

    drop(original);
    assert_eq!(text::resolve(token), None);
    assert_eq!(text::stray_release_count(), 0);
}

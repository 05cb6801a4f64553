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

//! The abstract contract for the native event queue.
//!
//! Any queue backend (the real native layer, the headless in-memory queue
//! in `oriel-infra`, a replay source, ...) implements this trait to plug
//! into [`EventPump`](super::pump::EventPump) and the dispatcher. All
//! methods must be called from the one thread that owns the queue context.

use super::raw::RawEvent;
use std::ops::Range;
use std::time::Duration;

/// A source of raw event records.
///
/// Delivery is FIFO by arrival order, and no record is delivered twice by
/// [`poll_record`](EventSource::poll_record).
pub trait EventSource {
    /// Removes and returns the oldest queued record, or `None` if the
    /// queue is currently empty. Never blocks.
    fn poll_record(&mut self) -> Option<RawEvent>;

    /// Like [`poll_record`](EventSource::poll_record), but blocks up to
    /// `timeout` for a record to arrive. Returns `None` on timeout.
    ///
    /// The block is a single call into the backend; the core never
    /// suspends cooperatively around it.
    fn wait_record(&mut self, timeout: Duration) -> Option<RawEvent>;

    /// Appends a synthetic record to the queue. Returns `false` if the
    /// backend rejected it (for example, a full bounded queue).
    fn push_record(&mut self, record: RawEvent) -> bool;

    /// Discards every queued record whose discriminant falls in `range`,
    /// without decoding.
    fn flush_records(&mut self, range: Range<u32>);

    /// Counts queued records whose discriminant falls in `range`, without
    /// removing them.
    fn count_records(&self, range: Range<u32>) -> usize;
}

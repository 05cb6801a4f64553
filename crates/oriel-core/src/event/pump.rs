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

//! Poll/wait/push/flush primitives over a queue backend.

use super::decode::decode;
use super::raw::RawEvent;
use super::source::EventSource;
use super::types::Event;
use std::ops::Range;
use std::time::Duration;

/// The typed face of the native event queue.
///
/// Thin by design: ordering and delivery guarantees belong to the backend;
/// the pump adds the typed API, trace logging, and the decoded
/// [`poll_iter`](EventPump::poll_iter) convenience.
#[derive(Debug)]
pub struct EventPump<S: EventSource> {
    source: S,
}

impl<S: EventSource> EventPump<S> {
    /// Wraps a queue backend.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Removes and returns the oldest queued record. Never blocks;
    /// returns `None` when the queue is empty.
    pub fn poll(&mut self) -> Option<RawEvent> {
        let record = self.source.poll_record();
        if let Some(record) = &record {
            log::trace!("Polled record with discriminant {:#x}.", record.kind_raw());
        }
        record
    }

    /// Blocks up to `timeout` for a record. Returns `None` on timeout.
    pub fn wait(&mut self, timeout: Duration) -> Option<RawEvent> {
        self.source.wait_record(timeout)
    }

    /// Enqueues a synthetic record. Returns `false` if the backend
    /// rejected it.
    pub fn push(&mut self, record: RawEvent) -> bool {
        let accepted = self.source.push_record(record);
        if !accepted {
            log::warn!(
                "Queue rejected synthetic record with discriminant {:#x}.",
                record.kind_raw()
            );
        }
        accepted
    }

    /// Discards every queued record whose discriminant falls in `range`,
    /// without decoding.
    pub fn flush(&mut self, range: Range<u32>) {
        self.source.flush_records(range);
    }

    /// Counts queued records whose discriminant falls in `range`, without
    /// removing them.
    pub fn queue_count(&self, range: Range<u32>) -> usize {
        self.source.count_records(range)
    }

    /// Returns a draining iterator that decodes each polled record.
    ///
    /// The iterator ends when the queue is empty for this cycle.
    pub fn poll_iter(&mut self) -> PollIter<'_, S> {
        PollIter { pump: self }
    }

    /// Returns the wrapped backend.
    pub fn into_inner(self) -> S {
        self.source
    }
}

/// Draining iterator over decoded events; see
/// [`poll_iter`](EventPump::poll_iter).
#[derive(Debug)]
pub struct PollIter<'a, S: EventSource> {
    pump: &'a mut EventPump<S>,
}

impl<S: EventSource> Iterator for PollIter<'_, S> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        self.pump.poll().map(|record| decode(&record))
    }
}

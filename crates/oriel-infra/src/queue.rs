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

//! A headless, in-memory implementation of the core's queue contract.

use oriel_core::event::{EventSource, RawEvent};
use std::collections::VecDeque;
use std::ops::Range;
use std::time::Duration;

/// The native layer bounds its queue; the headless backend keeps the same
/// limit so push-rejection behaves identically.
pub const QUEUE_CAPACITY: usize = 65_536;

/// A bounded FIFO queue of raw records, living entirely in memory.
///
/// Single-threaded like the contract it implements: nothing can arrive
/// while the owning thread blocks, so [`wait_record`] degenerates to one
/// deadline sleep when the queue is empty.
///
/// [`wait_record`]: EventSource::wait_record
#[derive(Debug)]
pub struct SyntheticQueue {
    records: VecDeque<RawEvent>,
    capacity: usize,
}

impl SyntheticQueue {
    /// Creates an empty queue with the native capacity.
    pub fn new() -> Self {
        Self::with_capacity(QUEUE_CAPACITY)
    }

    /// Creates an empty queue holding at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity,
        }
    }

    /// Number of records currently queued.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for SyntheticQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for SyntheticQueue {
    fn poll_record(&mut self) -> Option<RawEvent> {
        self.records.pop_front()
    }

    fn wait_record(&mut self, timeout: Duration) -> Option<RawEvent> {
        if let Some(record) = self.records.pop_front() {
            return Some(record);
        }
        std::thread::sleep(timeout);
        self.records.pop_front()
    }

    fn push_record(&mut self, record: RawEvent) -> bool {
        if self.records.len() >= self.capacity {
            return false;
        }
        self.records.push_back(record);
        true
    }

    fn flush_records(&mut self, range: Range<u32>) {
        let before = self.records.len();
        self.records.retain(|r| !range.contains(&r.kind_raw()));
        let flushed = before - self.records.len();
        if flushed > 0 {
            log::debug!("Flushed {flushed} records in {range:?}.");
        }
    }

    fn count_records(&self, range: Range<u32>) -> usize {
        self.records
            .iter()
            .filter(|r| range.contains(&r.kind_raw()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oriel_core::event::ranges;

    #[test]
    fn delivery_is_fifo_and_exactly_once() {
        let mut queue = SyntheticQueue::new();
        assert!(queue.push_record(RawEvent::quit(1)));
        assert!(queue.push_record(RawEvent::quit(2)));
        assert!(queue.push_record(RawEvent::quit(3)));

        assert_eq!(queue.poll_record().unwrap().timestamp(), 1);
        assert_eq!(queue.poll_record().unwrap().timestamp(), 2);
        assert_eq!(queue.poll_record().unwrap().timestamp(), 3);
        assert!(queue.poll_record().is_none());
    }

    #[test]
    fn push_rejects_when_full() {
        let mut queue = SyntheticQueue::with_capacity(2);
        assert!(queue.push_record(RawEvent::quit(1)));
        assert!(queue.push_record(RawEvent::quit(2)));
        assert!(!queue.push_record(RawEvent::quit(3)));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn flush_discards_only_the_range() {
        let mut queue = SyntheticQueue::new();
        queue.push_record(RawEvent::quit(1));
        queue.push_record(RawEvent::mouse_motion(2, 1, 0, 10, 10, 1, 1));
        queue.push_record(RawEvent::mouse_wheel(3, 1, 0, -1, false));
        queue.push_record(RawEvent::quit(4));

        queue.flush_records(ranges::MOUSE);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.count_records(ranges::MOUSE), 0);
        assert_eq!(queue.count_records(ranges::APPLICATION), 2);
        // Survivors keep their relative order.
        assert_eq!(queue.poll_record().unwrap().timestamp(), 1);
        assert_eq!(queue.poll_record().unwrap().timestamp(), 4);
    }

    #[test]
    fn count_does_not_remove() {
        let mut queue = SyntheticQueue::new();
        queue.push_record(RawEvent::quit(1));
        assert_eq!(queue.count_records(ranges::EVERYTHING), 1);
        assert_eq!(queue.count_records(ranges::EVERYTHING), 1);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn wait_times_out_on_an_empty_queue() {
        let mut queue = SyntheticQueue::new();
        let start = std::time::Instant::now();
        let record = queue.wait_record(Duration::from_millis(10));
        assert!(record.is_none());
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn wait_returns_immediately_when_a_record_is_queued() {
        let mut queue = SyntheticQueue::new();
        queue.push_record(RawEvent::quit(7));
        let record = queue.wait_record(Duration::from_secs(60));
        assert_eq!(record.unwrap().timestamp(), 7);
    }
}

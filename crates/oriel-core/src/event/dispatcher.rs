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

//! Routing of decoded events to at-most-one handler per shape.
//!
//! A dispatcher is constructed over a fixed set of watched shapes; the set
//! never grows or shrinks afterwards. Each watched shape has one slot
//! holding zero or one handler. A drain cycle ([`poll`]) pumps the queue
//! until empty, decoding each record and invoking the matching bound
//! handler synchronously; records matching no bound slot are discarded,
//! not buffered.
//!
//! Re-entrant `poll()` calls from inside a handler are not supported; the
//! exclusive borrow makes them unrepresentable here.
//!
//! [`poll`]: EventDispatcher::poll

use super::decode::decode;
use super::kind::EventKind;
use super::pump::EventPump;
use super::source::EventSource;
use super::types::{Event, TypedEvent};
use crate::error::{BoxError, DispatchError};
use std::marker::PhantomData;

type BoxedHandler = Box<dyn FnMut(&Event) -> Result<(), BoxError>>;

struct Slot {
    kind: EventKind,
    handler: Option<BoxedHandler>,
}

/// Routes decoded events from a pump to bound handlers.
pub struct EventDispatcher<S: EventSource> {
    pump: EventPump<S>,
    slots: Vec<Slot>,
}

impl<S: EventSource> EventDispatcher<S> {
    /// Creates a dispatcher watching a fixed set of shapes.
    ///
    /// Duplicate kinds collapse into one slot. The set cannot change after
    /// construction; only the handlers in the slots can.
    pub fn watching<I>(pump: EventPump<S>, kinds: I) -> Self
    where
        I: IntoIterator<Item = EventKind>,
    {
        let mut slots: Vec<Slot> = Vec::new();
        for kind in kinds {
            if slots.iter().all(|slot| slot.kind != kind) {
                slots.push(Slot {
                    kind,
                    handler: None,
                });
            }
        }
        log::debug!("Dispatcher watching {} event shapes.", slots.len());
        Self { pump, slots }
    }

    /// Starts binding a handler for shape `T`.
    ///
    /// The returned builder's [`to`](Bind::to) installs the handler.
    /// Re-binding a shape replaces the previous handler silently.
    pub fn bind<T: TypedEvent>(&mut self) -> Bind<'_, S, T> {
        Bind {
            dispatcher: self,
            _shape: PhantomData,
        }
    }

    /// Runs one drain cycle: pumps until the queue is empty, routing each
    /// decoded record to its bound handler. Returns the number of handler
    /// invocations.
    ///
    /// # Errors
    ///
    /// A handler failure propagates out unchanged as
    /// [`DispatchError::Handler`]. The drain is not atomic: records still
    /// queued when a handler fails stay queued for the next call.
    pub fn poll(&mut self) -> Result<usize, DispatchError> {
        let mut dispatched = 0;
        while let Some(record) = self.pump.poll() {
            let event = decode(&record);
            let Some(kind) = event.kind() else {
                log::trace!(
                    "Discarding record with unknown discriminant {:#x}.",
                    record.kind_raw()
                );
                continue;
            };
            let Some(slot) = self.slots.iter_mut().find(|slot| slot.kind == kind) else {
                continue;
            };
            let Some(handler) = slot.handler.as_mut() else {
                continue;
            };
            handler(&event).map_err(|source| DispatchError::Handler { kind, source })?;
            dispatched += 1;
        }
        Ok(dispatched)
    }

    /// Clears every slot back to empty. Idempotent.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.handler = None;
        }
    }

    /// Number of slots currently holding a handler.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.handler.is_some()).count()
    }

    /// The fixed number of watched shapes, independent of how many are
    /// currently bound.
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// The pump this dispatcher drains.
    pub fn pump(&self) -> &EventPump<S> {
        &self.pump
    }

    /// Mutable access to the pump, for pushing synthetic records or
    /// flushing between drain cycles.
    pub fn pump_mut(&mut self) -> &mut EventPump<S> {
        &mut self.pump
    }
}

/// Pending binding for shape `T`; finish with [`to`](Bind::to).
pub struct Bind<'a, S: EventSource, T: TypedEvent> {
    dispatcher: &'a mut EventDispatcher<S>,
    _shape: PhantomData<T>,
}

impl<S: EventSource, T: TypedEvent> Bind<'_, S, T> {
    /// Installs `handler` in `T`'s slot, replacing any previous handler.
    ///
    /// The handler may return `()` or a `Result`; errors abort the drain
    /// cycle that invoked them.
    ///
    /// # Errors
    ///
    /// [`DispatchError::NotWatched`] if the dispatcher was not constructed
    /// to watch `T`'s shape.
    pub fn to<H, R>(self, mut handler: H) -> Result<(), DispatchError>
    where
        H: FnMut(&T) -> R + 'static,
        R: IntoDispatchOutcome,
    {
        let slot = self
            .dispatcher
            .slots
            .iter_mut()
            .find(|slot| slot.kind == T::KIND)
            .ok_or(DispatchError::NotWatched { kind: T::KIND })?;

        let erased: BoxedHandler = Box::new(move |event| {
            match T::from_event(event) {
                Some(typed) => handler(typed).into_outcome(),
                // The slot kind matched, so the shapes agree; nothing to do.
                None => Ok(()),
            }
        });

        if slot.handler.replace(erased).is_some() {
            log::debug!("Replaced handler for {:?} events.", T::KIND);
        }
        Ok(())
    }
}

/// Conversion from a handler's return value into the dispatch result.
///
/// Lets plain `FnMut(&T)` closures and fallible
/// `FnMut(&T) -> Result<(), E>` closures bind through the same API.
pub trait IntoDispatchOutcome {
    /// Folds the value into the drain cycle's result.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl IntoDispatchOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E: Into<BoxError>> IntoDispatchOutcome for Result<(), E> {
    fn into_outcome(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

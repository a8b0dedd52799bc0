use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::Resource;

use crate::ecs::{StationId, TruckId};

/// Simulation time in whole minutes since the start of the run.
pub type SimTime = u64;

pub const ONE_HOUR_MIN: SimTime = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    FinishMining,
    ArriveStation,
    StartUnloading,
    FinishUnloading,
}

/// A scheduled occurrence in the haul cycle. `station` is `None` until the
/// truck has been assigned to a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: SimTime,
    pub kind: EventKind,
    pub truck: TruckId,
    pub station: Option<StationId>,
}

impl Event {
    /// The station of a StartUnloading/FinishUnloading event.
    ///
    /// # Panics
    ///
    /// Panics if the event was scheduled without a station.
    pub fn assigned_station(&self) -> StationId {
        match self.station {
            Some(station) => station,
            None => panic!(
                "{:?} event for truck {} carries no station",
                self.kind, self.truck
            ),
        }
    }
}

/// The event currently being dispatched to the handler systems.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled {
    event: Event,
    seq: u64,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by timestamp, then by
        // insertion order for events sharing a timestamp.
        other
            .event
            .timestamp
            .cmp(&self.event.timestamp)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: SimTime,
    next_seq: u64,
    events: BinaryHeap<Scheduled>,
}

impl SimulationClock {
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn schedule(&mut self, event: Event) {
        debug_assert!(
            event.timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Scheduled { event, seq });
    }

    pub fn schedule_at(
        &mut self,
        timestamp: SimTime,
        kind: EventKind,
        truck: TruckId,
        station: Option<StationId>,
    ) {
        self.schedule(Event {
            timestamp,
            kind,
            truck,
            station,
        });
    }

    /// Schedule `delay` minutes after the current time.
    pub fn schedule_in(
        &mut self,
        delay: SimTime,
        kind: EventKind,
        truck: TruckId,
        station: Option<StationId>,
    ) {
        self.schedule_at(self.now + delay, kind, truck, station);
    }

    /// Pops the earliest event and advances `now` to its timestamp.
    pub fn pop_next(&mut self) -> Option<Event> {
        let scheduled = self.events.pop()?;
        self.now = scheduled.event.timestamp;
        Some(scheduled.event)
    }

    pub fn next_event_time(&self) -> Option<SimTime> {
        self.events.peek().map(|s| s.event.timestamp)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Events still waiting in the queue, in no particular order.
    pub fn pending(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().map(|s| &s.event)
    }
}

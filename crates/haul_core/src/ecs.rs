//! Entity model: trucks and stations live in dense arenas indexed by id.

use std::collections::VecDeque;
use std::fmt;
use std::ops::{Index, IndexMut};

use bevy_ecs::prelude::Resource;

use crate::clock::SimTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TruckId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub usize);

impl fmt::Display for TruckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruckActivity {
    Mining,
    TravelingToStation,
    /// Queued or unloading at `station`.
    AtStation { station: StationId },
    /// Driving back to the site; mining resumes on arrival.
    TravelingToSite,
    /// Reached the unload area with no stations to serve it. Terminal.
    Stalled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Truck {
    pub id: TruckId,
    pub activity: TruckActivity,
    pub loads_delivered: u64,
    /// When the truck joined its current station queue.
    pub arrived_at: SimTime,
    pub total_wait_time: SimTime,
    pub total_travel_time: SimTime,
    /// Includes the initial mining cycle seeded at time 0.
    pub total_mining_time: SimTime,
    pub total_unload_time: SimTime,
}

impl Truck {
    pub fn new(id: TruckId) -> Self {
        Self {
            id,
            activity: TruckActivity::Mining,
            loads_delivered: 0,
            arrived_at: 0,
            total_wait_time: 0,
            total_travel_time: 0,
            total_mining_time: 0,
            total_unload_time: 0,
        }
    }

    /// Time covered by the four accumulators.
    pub fn accounted_time(&self) -> SimTime {
        self.total_mining_time + self.total_travel_time + self.total_wait_time + self.total_unload_time
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationState {
    Idle,
    /// A StartUnloading is scheduled for the queue front but not yet processed.
    Admitting,
    Unloading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub state: StationState,
    /// When the current unload finishes; only meaningful while unloading.
    pub busy_until: SimTime,
    pub total_busy_time: SimTime,
    /// Trucks in arrival order; the front is the one being served.
    queue: VecDeque<TruckId>,
}

impl Station {
    pub fn new(id: StationId) -> Self {
        Self {
            id,
            state: StationState::Idle,
            busy_until: 0,
            total_busy_time: 0,
            queue: VecDeque::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.state != StationState::Idle
    }

    /// Trucks at the station, including the one unloading.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn front(&self) -> Option<TruckId> {
        self.queue.front().copied()
    }

    pub fn queued(&self) -> impl Iterator<Item = TruckId> + '_ {
        self.queue.iter().copied()
    }

    pub fn contains(&self, truck: TruckId) -> bool {
        self.queue.contains(&truck)
    }

    pub fn enqueue(&mut self, truck: TruckId) {
        debug_assert!(!self.contains(truck), "truck {truck} already queued at station {}", self.id);
        self.queue.push_back(truck);
    }

    /// Removes the served truck from the front of the queue.
    ///
    /// # Panics
    ///
    /// Panics if `truck` is not at the front; only the truck that finished
    /// unloading may leave a queue.
    pub fn release_front(&mut self, truck: TruckId) {
        let front = self.queue.pop_front();
        assert_eq!(
            front,
            Some(truck),
            "station {} released truck {truck} but its front was {front:?}",
            self.id
        );
    }
}

/// Arena of trucks; `TruckId` is the index.
#[derive(Debug, Clone, Default, Resource)]
pub struct Fleet(pub Vec<Truck>);

impl Fleet {
    pub fn with_trucks(count: usize) -> Self {
        Self((0..count).map(|i| Truck::new(TruckId(i))).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Truck> {
        self.0.iter()
    }
}

impl Index<TruckId> for Fleet {
    type Output = Truck;

    fn index(&self, id: TruckId) -> &Truck {
        &self.0[id.0]
    }
}

impl IndexMut<TruckId> for Fleet {
    fn index_mut(&mut self, id: TruckId) -> &mut Truck {
        &mut self.0[id.0]
    }
}

/// Arena of unload stations; `StationId` is the index.
#[derive(Debug, Clone, Default, Resource)]
pub struct Stations(pub Vec<Station>);

impl Stations {
    pub fn with_stations(count: usize) -> Self {
        Self((0..count).map(|i| Station::new(StationId(i))).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Station] {
        &self.0
    }

    /// The station whose queue holds `truck`, if any.
    pub fn station_of(&self, truck: TruckId) -> Option<StationId> {
        self.0.iter().find(|s| s.contains(truck)).map(|s| s.id)
    }
}

impl Index<StationId> for Stations {
    type Output = Station;

    fn index(&self, id: StationId) -> &Station {
        &self.0[id.0]
    }
}

impl IndexMut<StationId> for Stations {
    fn index_mut(&mut self, id: StationId) -> &mut Station {
        &mut self.0[id.0]
    }
}

//! Event processing metrics: counts by kind and per truck, plus wall-clock rate.

use std::collections::HashMap;
use std::time::Instant;

use bevy_ecs::prelude::Resource;

use crate::clock::{Event, EventKind};
use crate::ecs::TruckId;

#[derive(Debug, Default, Resource)]
pub struct EventMetrics {
    /// Total events processed.
    pub events_processed: u64,
    /// Start time for rate calculation.
    pub start_time: Option<Instant>,
    pub events_by_kind: HashMap<EventKind, u64>,
    /// FinishUnloading events processed per truck.
    pub unloads_by_truck: HashMap<TruckId, u64>,
}

impl EventMetrics {
    pub fn record_event(&mut self, event: &Event) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
        self.events_processed += 1;
        *self.events_by_kind.entry(event.kind).or_insert(0) += 1;
        if event.kind == EventKind::FinishUnloading {
            *self.unloads_by_truck.entry(event.truck).or_insert(0) += 1;
        }
    }

    pub fn count(&self, kind: EventKind) -> u64 {
        self.events_by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn unloads_for(&self, truck: TruckId) -> u64 {
        self.unloads_by_truck.get(&truck).copied().unwrap_or(0)
    }

    pub fn events_per_second(&self) -> f64 {
        match self.start_time {
            Some(start) => {
                let elapsed = start.elapsed().as_secs_f64();
                if elapsed > 0.0 {
                    self.events_processed as f64 / elapsed
                } else {
                    0.0
                }
            }
            None => 0.0,
        }
    }

    pub fn print_summary(&self) {
        println!("\n=== Event Processing Summary ===");
        println!("Total events processed: {}", self.events_processed);
        if let Some(start) = self.start_time {
            println!("Wall time: {:.3}s", start.elapsed().as_secs_f64());
            println!("Events per second: {:.0}", self.events_per_second());
        }

        println!("\nEvents by kind:");
        let mut entries: Vec<_> = self.events_by_kind.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (kind, count) in entries {
            println!("  {:20} : {}", format!("{:?}", kind), count);
        }
    }
}

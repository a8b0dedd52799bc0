use bevy_ecs::prelude::World;
use tracing::info;

use crate::clock::SimulationClock;
use crate::dispatch::{DispatchPolicyKind, DispatchPolicyResource};
use crate::distributions::MiningTimeSampler;
use crate::ecs::{Fleet, Stations};
use crate::profiling::EventMetrics;

use super::params::{HaulParams, ParamsError};

pub fn create_dispatch_policy(kind: DispatchPolicyKind) -> DispatchPolicyResource {
    DispatchPolicyResource::from_kind(kind)
}

/// Inserts every resource a run needs. Call [`crate::runner::initialize_simulation`]
/// afterwards to seed the first mining cycle of each truck.
pub fn build_scenario(world: &mut World, params: &HaulParams) -> Result<(), ParamsError> {
    params.validate()?;

    world.insert_resource(SimulationClock::default());
    world.insert_resource(params.config());
    world.insert_resource(Fleet::with_trucks(params.num_trucks));
    world.insert_resource(Stations::with_stations(params.num_stations));
    world.insert_resource(MiningTimeSampler::new(
        params.mining_time_min,
        params.mining_time_max,
        params.seed,
    ));
    world.insert_resource(create_dispatch_policy(params.dispatch_policy));
    world.insert_resource(EventMetrics::default());

    info!(
        trucks = params.num_trucks,
        stations = params.num_stations,
        seed = ?params.seed,
        horizon = params.horizon,
        policy = ?params.dispatch_policy,
        "scenario built"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::HaulConfig;

    #[test]
    fn build_inserts_arenas_and_config() {
        let mut world = World::new();
        let params = HaulParams::new(4, 2).with_seed(1).with_travel_time(12);
        build_scenario(&mut world, &params).expect("valid params");

        assert_eq!(world.resource::<Fleet>().len(), 4);
        assert_eq!(world.resource::<Stations>().len(), 2);
        assert_eq!(world.resource::<HaulConfig>().travel_time, 12);
        assert!(world.resource::<SimulationClock>().is_empty());
        assert_eq!(
            world.resource::<DispatchPolicyResource>().name(),
            "shortest_queue_length"
        );
    }

    #[test]
    fn build_rejects_invalid_params_without_touching_the_world() {
        let mut world = World::new();
        let params = HaulParams::new(1, 1).with_mining_time(10, 1);
        assert!(build_scenario(&mut world, &params).is_err());
        assert!(world.get_resource::<Fleet>().is_none());
    }
}

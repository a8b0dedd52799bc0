pub mod clock;
pub mod dispatch;
pub mod distributions;
pub mod ecs;
pub mod profiling;
pub mod runner;
pub mod scenario;
pub mod systems;
pub mod telemetry;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

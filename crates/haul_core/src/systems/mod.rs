pub mod finish_mining;
pub mod arrive_station;
pub mod start_unloading;
pub mod finish_unloading;

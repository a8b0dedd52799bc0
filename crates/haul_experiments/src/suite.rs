use haul_core::scenario::HaulParams;

/// A named scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioCase {
    pub name: String,
    pub params: HaulParams,
}

impl ScenarioCase {
    pub fn new(name: impl Into<String>, params: HaulParams) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// Fleet sizes (trucks, stations) of the reference suite: general loads,
/// the no-wait and heavy-wait extremes, and the empty configurations.
const REFERENCE_SIZES: [(&str, usize, usize); 9] = [
    ("general-3x1", 3, 1),
    ("general-5x2", 5, 2),
    ("general-10x3", 10, 3),
    ("general-50x3", 50, 3),
    ("no-wait-1x1", 1, 1),
    ("heavy-wait-30x1", 30, 1),
    ("no-trucks-0x1", 0, 1),
    ("no-stations-1x0", 1, 0),
    ("empty-0x0", 0, 0),
];

/// The reference suite; every case inherits timings, seed and policy from `base`.
pub fn reference_suite(base: &HaulParams) -> Vec<ScenarioCase> {
    REFERENCE_SIZES
        .iter()
        .map(|&(name, trucks, stations)| {
            ScenarioCase::new(
                name,
                HaulParams {
                    num_trucks: trucks,
                    num_stations: stations,
                    ..base.clone()
                },
            )
        })
        .collect()
}

pub mod policy;
pub mod shortest_queue;
pub mod earliest_free;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

pub use earliest_free::EarliestProjectedFree;
pub use policy::DispatchPolicy;
pub use shortest_queue::ShortestQueueLength;

/// Named dispatch policies selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicyKind {
    #[default]
    ShortestQueueLength,
    EarliestProjectedFree,
}

impl DispatchPolicyKind {
    pub fn build(self) -> Box<dyn DispatchPolicy> {
        match self {
            DispatchPolicyKind::ShortestQueueLength => Box::new(ShortestQueueLength),
            DispatchPolicyKind::EarliestProjectedFree => Box::new(EarliestProjectedFree),
        }
    }
}

/// Resource wrapper for the dispatch policy trait object.
#[derive(Resource)]
pub struct DispatchPolicyResource(pub Box<dyn DispatchPolicy>);

impl DispatchPolicyResource {
    pub fn new(policy: Box<dyn DispatchPolicy>) -> Self {
        Self(policy)
    }

    pub fn from_kind(kind: DispatchPolicyKind) -> Self {
        Self(kind.build())
    }
}

impl Default for DispatchPolicyResource {
    fn default() -> Self {
        Self::from_kind(DispatchPolicyKind::default())
    }
}

impl std::ops::Deref for DispatchPolicyResource {
    type Target = dyn DispatchPolicy;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

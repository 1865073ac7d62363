//! Environment topology: grouping, distances and deployment stages.

pub mod model;
pub mod priority;
pub mod resolver;

pub use model::{Environment, EnvironmentGroup, EnvironmentSummaryConfig, Priority, Upstream};
pub use priority::calculate_group_priority;
pub use resolver::{
    derive_group_name, resolve_topology, NO_UPSTREAM_DISTANCE, UNRESOLVED_UPSTREAM_DISTANCE,
};

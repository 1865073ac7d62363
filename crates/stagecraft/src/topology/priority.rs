//! Deployment stage classification for environments and groups.

use std::collections::HashMap;

use super::model::{Environment, EnvironmentGroup, Priority};

/// Group priorities for promotion chains of depth 0 through 4, indexed by
/// `[downstream_depth][distance_to_upstream]`.
const GROUP_PRIORITY_LOOKUP: [&[Priority]; 5] = [
    &[Priority::Yolo],
    &[Priority::Upstream, Priority::Prod],
    &[Priority::Upstream, Priority::PreProd, Priority::Prod],
    &[
        Priority::Upstream,
        Priority::PreProd,
        Priority::Canary,
        Priority::Prod,
    ],
    &[
        Priority::Upstream,
        Priority::Other,
        Priority::PreProd,
        Priority::Canary,
        Priority::Prod,
    ],
];

/// Classifies a group by its distance relative to the deepest group.
pub fn calculate_group_priority(distance_to_upstream: u32, downstream_depth: u32) -> Priority {
    if let Some(row) = GROUP_PRIORITY_LOOKUP.get(downstream_depth as usize) {
        if let Some(priority) = row.get(distance_to_upstream as usize) {
            return *priority;
        }
    }

    if distance_to_upstream == 0 {
        Priority::Upstream
    } else if distance_to_upstream == downstream_depth {
        Priority::Prod
    } else if downstream_depth.checked_sub(1) == Some(distance_to_upstream) {
        Priority::Canary
    } else if downstream_depth.checked_sub(2) == Some(distance_to_upstream) {
        Priority::PreProd
    } else {
        Priority::Other
    }
}

/// Sets the priority of every group from its distance.
pub fn assign_group_priorities(groups: &mut [EnvironmentGroup]) {
    let downstream_depth = groups
        .iter()
        .map(|g| g.distance_to_upstream)
        .max()
        .unwrap_or(0);

    for group in groups.iter_mut() {
        group.priority = calculate_group_priority(group.distance_to_upstream, downstream_depth);
    }
}

/// Sets the priority of every environment from the shape of the upstream graph.
///
/// Latest environments are UPSTREAM, or YOLO when nothing is promoted from
/// them. Every other leaf is PROD. Walking back from a leaf, one remaining
/// non-UPSTREAM hop becomes PRE_PROD; with two such hops the nearer one is
/// CANARY and the farther one PRE_PROD. Everything else is OTHER.
///
/// Leaves are visited in the order of `environments`, and later leaves may
/// overwrite stages assigned while walking back from earlier ones.
pub fn assign_environment_priorities(environments: &mut [&mut Environment]) {
    let mut index_by_name: HashMap<String, usize> = HashMap::with_capacity(environments.len());
    let mut children: HashMap<String, usize> = HashMap::new();

    for (i, env) in environments.iter_mut().enumerate() {
        index_by_name.insert(env.name.clone(), i);
        if env.is_latest() {
            env.priority = Priority::Upstream;
        } else {
            env.priority = Priority::Other;
            if let Some(upstream) = env.upstream_environment() {
                *children.entry(upstream.to_string()).or_insert(0) += 1;
            }
        }
    }

    let upstream_of = |environments: &[&mut Environment], i: usize| -> Option<usize> {
        environments[i]
            .upstream_environment()
            .and_then(|name| index_by_name.get(name).copied())
    };

    for i in 0..environments.len() {
        if children.get(&environments[i].name).copied().unwrap_or(0) > 0 {
            continue;
        }

        environments[i].priority = if environments[i].priority == Priority::Upstream {
            Priority::Yolo
        } else {
            Priority::Prod
        };

        let upstream = upstream_of(environments, i);
        let upstreams_upstream = upstream.and_then(|u| upstream_of(environments, u));

        match (upstream, upstreams_upstream) {
            (Some(u), Some(uu)) if environments[uu].priority != Priority::Upstream => {
                environments[u].priority = Priority::Canary;
                environments[uu].priority = Priority::PreProd;
            }
            (Some(u), _) if environments[u].priority != Priority::Upstream => {
                environments[u].priority = Priority::PreProd;
            }
            _ => {}
        }
    }
}

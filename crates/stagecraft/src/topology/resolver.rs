//! Maps environment configurations to an ordered, prioritized topology.

use std::collections::{BTreeMap, HashMap};

use crate::config::schema::EnvironmentConfig;

use super::model::{Environment, EnvironmentGroup, Upstream};
use super::priority::{assign_environment_priorities, assign_group_priorities};

/// Distance given to environments with neither `latest` nor an upstream
/// environment configured. The value itself carries no meaning.
pub const NO_UPSTREAM_DISTANCE: u32 = 100;

/// Distance seeded for upstream names that cannot be resolved, either because
/// they do not exist or because they are part of a cycle. Environments below
/// such an upstream count on from here (667, 668, ...).
pub const UNRESOLVED_UPSTREAM_DISTANCE: u32 = 666;

/// Returns the explicit group name, or the environment's own name.
pub fn derive_group_name<'a>(config: &'a EnvironmentConfig, env_name: &'a str) -> &'a str {
    config.group_name(env_name)
}

/// Groups, orders and classifies all environments.
///
/// Never fails: cycles and references to unknown environments end up with
/// sentinel distances. The result only depends on the content of `envs`,
/// not on its iteration order.
pub fn resolve_topology(envs: &HashMap<String, EnvironmentConfig>) -> Vec<EnvironmentGroup> {
    let _span = tracing::info_span!("topology.resolve", environments = envs.len()).entered();

    let mut names: Vec<&String> = envs.keys().collect();
    names.sort();

    let mut arena: Vec<Environment> = Vec::with_capacity(names.len());
    let mut buckets: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for name in names {
        let config = &envs[name];
        let group_name = derive_group_name(config, name);
        buckets
            .entry(group_name.to_string())
            .or_default()
            .push(arena.len());
        arena.push(Environment::new(
            name.as_str(),
            Upstream::from_config(config.upstream.as_ref()),
            group_name,
        ));
    }

    compute_distances(&mut arena, &buckets, envs);

    let mut slots: Vec<Option<Environment>> = arena.into_iter().map(Some).collect();
    let mut groups: Vec<EnvironmentGroup> = Vec::with_capacity(buckets.len());
    for (group_name, members) in buckets {
        let mut group = EnvironmentGroup::new(group_name);
        group.environments = members.iter().filter_map(|&i| slots[i].take()).collect();
        group.environments.sort_by(|a, b| {
            a.distance_to_upstream
                .cmp(&b.distance_to_upstream)
                .then_with(|| a.name.cmp(&b.name))
        });
        group.distance_to_upstream = group
            .environments
            .first()
            .map_or(0, |e| e.distance_to_upstream);
        groups.push(group);
    }

    groups.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

    {
        let mut flattened: Vec<&mut Environment> = groups
            .iter_mut()
            .flat_map(|g| g.environments.iter_mut())
            .collect();
        assign_environment_priorities(&mut flattened);
    }
    assign_group_priorities(&mut groups);

    log::debug!(
        "Resolved {} environments into {} groups",
        envs.len(),
        groups.len()
    );
    groups
}

fn sort_key(group: &EnvironmentGroup) -> Option<(u32, &str)> {
    group
        .environments
        .first()
        .map(|e| (e.distance_to_upstream, e.name.as_str()))
}

/// Fills in `distance_to_upstream` for every environment in `arena`.
///
/// Environments are visited bucket by bucket in group name order. Within a
/// pass over the deferred environments, distances resolved earlier in the
/// same pass are already visible to later entries.
fn compute_distances(
    arena: &mut [Environment],
    buckets: &BTreeMap<String, Vec<usize>>,
    envs: &HashMap<String, EnvironmentConfig>,
) {
    let mut distances: HashMap<String, u32> = HashMap::with_capacity(arena.len());
    let mut rest: Vec<usize> = Vec::new();

    for members in buckets.values() {
        for &i in members {
            let env = &mut arena[i];
            if env.is_latest() {
                env.distance_to_upstream = 0;
                distances.insert(env.name.clone(), 0);
            } else if let Some(upstream) = env.upstream_environment() {
                if !envs.contains_key(upstream) {
                    distances.insert(upstream.to_string(), UNRESOLVED_UPSTREAM_DISTANCE);
                }
                rest.push(i);
            } else {
                env.distance_to_upstream = NO_UPSTREAM_DISTANCE;
                distances.insert(env.name.clone(), NO_UPSTREAM_DISTANCE);
            }
        }
    }

    while !rest.is_empty() {
        let mut next_rest = Vec::with_capacity(rest.len());
        for &i in &rest {
            let upstream_distance = arena[i]
                .upstream_environment()
                .and_then(|upstream| distances.get(upstream).copied());
            match upstream_distance {
                Some(distance) => {
                    let distance = distance.saturating_add(1);
                    arena[i].distance_to_upstream = distance;
                    distances.insert(arena[i].name.clone(), distance);
                }
                None => next_rest.push(i),
            }
        }

        if next_rest.len() == rest.len() {
            // no progress: the remaining upstreams can never resolve on their own
            let unresolved: Vec<&str> = rest
                .iter()
                .filter_map(|&i| arena[i].upstream_environment())
                .collect();
            log::warn!(
                "Upstream cycle detected, assigning distance {} to: {}",
                UNRESOLVED_UPSTREAM_DISTANCE,
                unresolved.join(", ")
            );
            for upstream in unresolved {
                distances.insert(upstream.to_string(), UNRESOLVED_UPSTREAM_DISTANCE);
            }
        }
        rest = next_rest;
    }
}

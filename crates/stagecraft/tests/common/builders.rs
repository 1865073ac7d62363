//! Builders for environment configurations used across integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use stagecraft::config::schema::{
    AccessEntry, ArgoCdConfig, ArgoCdConfigs, ArgoCdDestination, ArgoCdIgnoreDifference,
    ArgoCdSyncWindow, EnvironmentConfig, EnvironmentConfigUpstream,
};
use stagecraft::topology::EnvironmentGroup;

/// Builder for a single `EnvironmentConfig`.
#[derive(Default)]
pub struct EnvBuilder {
    config: EnvironmentConfig,
}

impl EnvBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment that receives the latest releases.
    pub fn latest() -> Self {
        Self::new().upstream(EnvironmentConfigUpstream::latest())
    }

    /// Environment promoted from `upstream`.
    pub fn after(upstream: &str) -> Self {
        Self::new().upstream(EnvironmentConfigUpstream::environment(upstream))
    }

    pub fn upstream(mut self, upstream: EnvironmentConfigUpstream) -> Self {
        self.config.upstream = Some(upstream);
        self
    }

    pub fn group(mut self, group: &str) -> Self {
        self.config.environment_group = Some(group.to_string());
        self
    }

    pub fn argocd(mut self, argocd: ArgoCdConfig) -> Self {
        self.config.argocd = Some(argocd);
        self
    }

    pub fn argocd_configs(mut self, prefix: &str, configurations: Vec<ArgoCdConfig>) -> Self {
        self.config.argocd_configs = Some(ArgoCdConfigs {
            common_env_prefix: Some(prefix.to_string()),
            configurations,
        });
        self
    }

    pub fn build(self) -> EnvironmentConfig {
        self.config
    }
}

/// Builder for an `ArgoCdConfig`.
#[derive(Default)]
pub struct ArgoCdBuilder {
    config: ArgoCdConfig,
}

impl ArgoCdBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn server(mut self, server: &str) -> Self {
        self.config.destination.server = server.to_string();
        self
    }

    pub fn destination(mut self, destination: ArgoCdDestination) -> Self {
        self.config.destination = destination;
        self
    }

    pub fn sync_window(mut self, schedule: &str, duration: &str, kind: &str, apps: &[&str]) -> Self {
        self.config.sync_windows.push(ArgoCdSyncWindow {
            schedule: schedule.to_string(),
            duration: duration.to_string(),
            kind: kind.to_string(),
            apps: apps.iter().map(|a| a.to_string()).collect(),
        });
        self
    }

    pub fn whitelist(mut self, group: &str, kind: &str) -> Self {
        self.config.cluster_resource_whitelist.push(AccessEntry {
            group: group.to_string(),
            kind: kind.to_string(),
        });
        self
    }

    pub fn annotation(mut self, key: &str, value: &str) -> Self {
        self.config
            .application_annotations
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn ignore_difference(mut self, difference: ArgoCdIgnoreDifference) -> Self {
        self.config.ignore_differences.push(difference);
        self
    }

    pub fn sync_option(mut self, option: &str) -> Self {
        self.config.sync_options.push(option.to_string());
        self
    }

    pub fn concrete_env_name(mut self, name: &str) -> Self {
        self.config.concrete_env_name = name.to_string();
        self
    }

    pub fn build(self) -> ArgoCdConfig {
        self.config
    }
}

/// Collects `(name, builder)` pairs into the resolver's input map.
pub fn envs(entries: Vec<(&str, EnvBuilder)>) -> HashMap<String, EnvironmentConfig> {
    entries
        .into_iter()
        .map(|(name, builder)| (name.to_string(), builder.build()))
        .collect()
}

/// Group names in resolved order.
pub fn group_names(groups: &[EnvironmentGroup]) -> Vec<&str> {
    groups
        .iter()
        .map(|g| g.environment_group_name.as_str())
        .collect()
}

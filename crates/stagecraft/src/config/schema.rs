//! Per-environment configuration as checked into the manifest repository.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration of a single environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    /// Where this environment receives its releases from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream: Option<EnvironmentConfigUpstream>,

    /// Argo CD settings for a plain environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argocd: Option<ArgoCdConfig>,

    /// Argo CD settings for an environment backed by several concrete instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argocd_configs: Option<ArgoCdConfigs>,

    /// Name of the group this environment is displayed and prioritized with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_group: Option<String>,
}

impl EnvironmentConfig {
    /// Returns the explicit group name, or the environment's own name.
    pub fn group_name<'a>(&'a self, env_name: &'a str) -> &'a str {
        self.environment_group.as_deref().unwrap_or(env_name)
    }

    /// Returns true for environments with multiple concrete instances.
    pub fn is_aa_env(&self) -> bool {
        self.argocd_configs.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfigUpstream {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub environment: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub latest: bool,
}

impl EnvironmentConfigUpstream {
    pub fn latest() -> Self {
        Self {
            environment: String::new(),
            latest: true,
        }
    }

    pub fn environment(name: impl Into<String>) -> Self {
        Self {
            environment: name.into(),
            latest: false,
        }
    }
}

/// Argo CD settings used when rendering the AppProject and Applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgoCdConfig {
    #[serde(default)]
    pub destination: ArgoCdDestination,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sync_windows: Vec<ArgoCdSyncWindow>,

    /// Cluster-wide resources the project may manage.
    #[serde(default, rename = "accessList", skip_serializing_if = "Vec::is_empty")]
    pub cluster_resource_whitelist: Vec<AccessEntry>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub application_annotations: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_differences: Vec<ArgoCdIgnoreDifference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sync_options: Vec<String>,

    /// Instance suffix of an AA environment, e.g. `de-1`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub concrete_env_name: String,
}

/// Argo CD settings of an AA environment, one entry per concrete instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgoCdConfigs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_env_prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configurations: Vec<ArgoCdConfig>,
}

/// Target cluster of an environment.
///
/// `namespace` takes precedence over `app_project_namespace` and
/// `application_namespace`. To use the latter, omit `namespace`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgoCdDestination {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub server: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_project_namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_namespace: Option<String>,
}

impl ArgoCdDestination {
    /// Namespace for the AppProject destination.
    pub fn app_project_namespace(&self) -> &str {
        self.namespace
            .as_deref()
            .or(self.app_project_namespace.as_deref())
            .unwrap_or("")
    }

    /// Namespace for the Application destination.
    pub fn application_namespace(&self) -> &str {
        self.namespace
            .as_deref()
            .or(self.application_namespace.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgoCdSyncWindow {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub schedule: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub duration: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    /// Application name patterns; empty means all applications.
    #[serde(default, rename = "applications", skip_serializing_if = "Vec::is_empty")]
    pub apps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessEntry {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgoCdIgnoreDifference {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub json_pointers: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jq_path_expressions: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub managed_fields_managers: Vec<String>,
}

/// Renderer behaviour that is not part of an environment's configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Drop the resources finalizer from applications that only exist to undeploy.
    #[serde(default)]
    pub omit_undeploy_finalizers: bool,
}

//! Argo CD `argoproj.io/v1alpha1` document types.
//!
//! Only the fields the renderer writes are modeled. Struct fields are declared
//! in the lexicographic order of their wire names and all maps are ordered, so
//! the serialized form of a document is stable across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The API version of every rendered document.
pub const API_VERSION: &str = "argoproj.io/v1alpha1";

/// The kind of document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    AppProject,
    Application,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::AppProject => write!(f, "AppProject"),
            ResourceKind::Application => write!(f, "Application"),
        }
    }
}

/// Metadata of a document, following K8s conventions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Key-value annotations, serialized in key order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,

    /// Finalizers that block deletion until the controller has cleaned up.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub finalizers: Vec<String>,

    /// Key-value labels for selecting documents.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    /// The unique name of the document within its kind.
    pub name: String,
}

impl ObjectMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_finalizer(mut self, finalizer: impl Into<String>) -> Self {
        self.finalizers.push(finalizer.into());
        self
    }
}

/// A K8s-style document wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource<T> {
    /// API version, always [`API_VERSION`].
    pub api_version: String,

    /// The kind of document.
    pub kind: ResourceKind,

    /// Document metadata.
    pub metadata: ObjectMeta,

    /// The document specification.
    pub spec: T,
}

impl<T> Resource<T> {
    pub fn new(kind: ResourceKind, metadata: ObjectMeta, spec: T) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind,
            metadata,
            spec,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

pub type AppProject = Resource<AppProjectSpec>;
pub type Application = Resource<ApplicationSpec>;

/// AppProject specification: where and when the environment's applications
/// may be synced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppProjectSpec {
    /// Cluster-scoped resource types the project may manage.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_resource_whitelist: Vec<AccessEntry>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Clusters and namespaces applications of the project may deploy to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub destinations: Vec<ApplicationDestination>,

    /// Repository URL patterns applications may be sourced from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_repos: Vec<String>,

    /// Time windows that allow or deny automated syncs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sync_windows: Vec<SyncWindow>,
}

/// A cluster-scoped resource type a project may manage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessEntry {
    /// API group; empty for the core group.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,

    /// Resource kind, e.g. `Namespace`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

/// A recurring window during which syncs are allowed or denied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncWindow {
    /// Application name patterns the window applies to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applications: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clusters: Vec<String>,

    /// Window length, e.g. `1h`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub duration: String,

    /// `allow` or `deny`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    /// Whether manual syncs are permitted inside a deny window.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub manual_sync: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<String>,

    /// Cron expression for the window start.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub schedule: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSpec {
    /// Cluster and namespace the application is deployed to.
    pub destination: ApplicationDestination,

    /// Fields excluded from drift detection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_differences: Vec<ResourceIgnoreDifferences>,

    /// Name of the owning AppProject. Always written, even when empty.
    #[serde(default)]
    pub project: String,

    /// Where the manifests are read from.
    pub source: ApplicationSource,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_policy: Option<SyncPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDestination {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSource {
    /// Directory inside the repository.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,

    #[serde(rename = "repoURL")]
    pub repo_url: String,

    /// Branch, tag or commit.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target_revision: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPolicy {
    /// Automated sync settings; absent means manual sync only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automated: Option<SyncPolicyAutomated>,

    /// Controller options such as `CreateNamespace=true`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sync_options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPolicyAutomated {
    /// Sync even when the source renders no resources.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_empty: bool,

    /// Delete resources no longer present in the source.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub prune: bool,

    /// Revert changes made in the cluster.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub self_heal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceIgnoreDifferences {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jq_path_expressions: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub json_pointers: Vec<String>,

    pub kind: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub managed_fields_managers: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}

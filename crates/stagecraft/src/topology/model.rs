//! Resolved environment topology, as served to UIs and CLIs.

use serde::{Deserialize, Serialize};

use crate::config::schema::EnvironmentConfigUpstream;

/// Deployment stage of an environment or group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Origin of a promotion chain with at least one downstream environment.
    Upstream,
    /// Origin and leaf at the same time.
    Yolo,
    PreProd,
    Canary,
    Prod,
    Other,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Upstream => "UPSTREAM",
            Priority::Yolo => "YOLO",
            Priority::PreProd => "PRE_PROD",
            Priority::Canary => "CANARY",
            Priority::Prod => "PROD",
            Priority::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized upstream reference. At most one field is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upstream {
    /// Environment releases are promoted from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Set when the environment receives every new release directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<bool>,
}

impl Upstream {
    /// Normalizes a configured upstream. `latest` wins over an environment
    /// reference; an upstream with neither set is treated as absent.
    pub fn from_config(upstream: Option<&EnvironmentConfigUpstream>) -> Option<Self> {
        let upstream = upstream?;
        if upstream.latest {
            return Some(Self {
                environment: None,
                latest: Some(true),
            });
        }
        if !upstream.environment.is_empty() {
            return Some(Self {
                environment: Some(upstream.environment.clone()),
                latest: None,
            });
        }
        None
    }

    pub fn is_latest(&self) -> bool {
        self.latest.unwrap_or(false)
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }
}

/// The parts of an environment's configuration shown alongside the topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSummaryConfig {
    /// Normalized upstream; absent when undetermined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream: Option<Upstream>,

    /// Effective group name, defaulting to the environment's own name.
    pub environment_group: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Unique environment name.
    pub name: String,

    pub config: EnvironmentSummaryConfig,

    /// Promotion hops from a latest environment. Unresolvable chains count
    /// on from a sentinel value.
    pub distance_to_upstream: u32,

    /// Deployment stage derived from the shape of the upstream graph.
    pub priority: Priority,
}

impl Environment {
    pub fn new(name: impl Into<String>, upstream: Option<Upstream>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: EnvironmentSummaryConfig {
                upstream,
                environment_group: group.into(),
            },
            distance_to_upstream: 0,
            priority: Priority::Prod,
        }
    }

    pub fn is_latest(&self) -> bool {
        self.config.upstream.as_ref().is_some_and(Upstream::is_latest)
    }

    /// Name of the environment this one is promoted from, if any.
    pub fn upstream_environment(&self) -> Option<&str> {
        self.config.upstream.as_ref().and_then(Upstream::environment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentGroup {
    /// Shared `environmentGroup` of the members.
    pub environment_group_name: String,

    /// Members, sorted by distance and then name.
    pub environments: Vec<Environment>,

    /// Distance of the first member.
    pub distance_to_upstream: u32,

    /// Stage of the group relative to the deepest group.
    pub priority: Priority,
}

impl EnvironmentGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            environment_group_name: name.into(),
            environments: Vec::new(),
            distance_to_upstream: 0,
            priority: Priority::Prod,
        }
    }

    pub fn environment_names(&self) -> impl Iterator<Item = &str> {
        self.environments.iter().map(|e| e.name.as_str())
    }
}

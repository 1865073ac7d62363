//! Cross-environment linting of configuration.
//!
//! The topology resolver accepts any configuration, including cycles and
//! dangling upstreams. Callers that want to reject such input before it is
//! committed run this validator instead.

use regex::Regex;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

use crate::config::schema::{ArgoCdConfigs, EnvironmentConfig};
use crate::error::ConfigError;

static RE_ENVIRONMENT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap());

/// Validator for a full set of environment configurations.
pub struct ConfigValidator {
    /// Collected validation errors.
    errors: Vec<String>,
}

impl ConfigValidator {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Validates every environment and the upstream graph between them.
    pub fn validate(&mut self, envs: &HashMap<String, EnvironmentConfig>) -> Result<(), ConfigError> {
        self.errors.clear();

        let mut names: Vec<&String> = envs.keys().collect();
        names.sort();

        for name in &names {
            self.validate_environment(name, &envs[*name], envs);
        }

        self.validate_upstream_cycles(&names, envs);

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(self.errors.join("; ")))
        }
    }

    /// Returns the collected validation errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn validate_environment(
        &mut self,
        name: &str,
        config: &EnvironmentConfig,
        envs: &HashMap<String, EnvironmentConfig>,
    ) {
        if !RE_ENVIRONMENT_NAME.is_match(name) {
            self.errors.push(format!(
                "Environment '{}': name must consist of lowercase letters, digits and '-'",
                name
            ));
        }

        if let Some(upstream) = &config.upstream {
            match (upstream.latest, upstream.environment.is_empty()) {
                (true, false) => self.errors.push(format!(
                    "Environment '{}': upstream must not set both latest and environment",
                    name
                )),
                (false, true) => self.errors.push(format!(
                    "Environment '{}': upstream must set either latest or environment",
                    name
                )),
                (false, false) => {
                    if upstream.environment == name {
                        self.errors.push(format!(
                            "Environment '{}': upstream must not reference itself",
                            name
                        ));
                    } else if !envs.contains_key(&upstream.environment) {
                        self.errors.push(format!(
                            "Environment '{}': upstream environment '{}' does not exist",
                            name, upstream.environment
                        ));
                    }
                }
                (true, true) => {}
            }
        }

        if let Some(group) = &config.environment_group {
            if group.trim().is_empty() {
                self.errors.push(format!(
                    "Environment '{}': environmentGroup must not be empty when set",
                    name
                ));
            }
        }

        if config.argocd.is_some() && config.argocd_configs.is_some() {
            self.errors.push(format!(
                "Environment '{}': argocd and argocdConfigs are mutually exclusive",
                name
            ));
        }

        if let Some(configs) = &config.argocd_configs {
            self.validate_aa_configs(name, configs);
        }
    }

    fn validate_aa_configs(&mut self, name: &str, configs: &ArgoCdConfigs) {
        if configs.configurations.is_empty() {
            self.errors.push(format!(
                "Environment '{}': argocdConfigs must have at least one configuration",
                name
            ));
            return;
        }

        let mut seen = HashSet::new();
        for (i, config) in configs.configurations.iter().enumerate() {
            if config.concrete_env_name.is_empty() {
                self.errors.push(format!(
                    "Environment '{}': argocdConfigs.configurations[{}].concreteEnvName is required",
                    name, i
                ));
            } else if !seen.insert(config.concrete_env_name.as_str()) {
                self.errors.push(format!(
                    "Environment '{}': duplicate concreteEnvName '{}'",
                    name, config.concrete_env_name
                ));
            }
        }
    }

    /// Reports every upstream cycle once, listing its members in sorted order.
    fn validate_upstream_cycles(&mut self, names: &[&String], envs: &HashMap<String, EnvironmentConfig>) {
        let mut cycles: BTreeSet<Vec<&str>> = BTreeSet::new();

        for start in names {
            let mut path: Vec<&str> = vec![start.as_str()];
            let mut current = start.as_str();
            while let Some(next) = upstream_environment(envs, current) {
                if let Some(pos) = path.iter().position(|n| *n == next) {
                    let mut members = path[pos..].to_vec();
                    // self-references are reported by validate_environment
                    if members.len() > 1 {
                        members.sort_unstable();
                        cycles.insert(members);
                    }
                    break;
                }
                path.push(next);
                current = next;
            }
        }

        for members in cycles {
            self.errors.push(format!(
                "Upstream cycle between environments: {}",
                members.join(", ")
            ));
        }
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn upstream_environment<'a>(
    envs: &'a HashMap<String, EnvironmentConfig>,
    name: &str,
) -> Option<&'a str> {
    let upstream = envs.get(name)?.upstream.as_ref()?;
    if upstream.latest || upstream.environment.is_empty() {
        return None;
    }
    envs.get_key_value(&upstream.environment)
        .map(|(key, _)| key.as_str())
}

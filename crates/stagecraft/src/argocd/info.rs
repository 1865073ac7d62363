//! Inputs to a single render call.

use crate::config::schema::{ArgoCdConfig, EnvironmentConfig};

use super::render::ApiVersion;

/// An application deployed to the environment being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppData {
    pub app_name: String,
    pub team_name: String,
    /// Placeholder application that only exists to remove a previous deployment.
    pub is_undeploy: bool,
}

impl AppData {
    pub fn new(app_name: impl Into<String>, team_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            team_name: team_name.into(),
            is_undeploy: false,
        }
    }

    pub fn undeploy(mut self) -> Self {
        self.is_undeploy = true;
        self
    }
}

/// One renderable environment. AA environments yield one of these per
/// concrete instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentInfo {
    pub argocd_config: Option<ArgoCdConfig>,
    pub common_prefix: String,
    pub parent_environment_name: String,
    pub is_aa_env: bool,
}

impl EnvironmentInfo {
    /// Info for a plain environment.
    pub fn new(parent_environment_name: impl Into<String>, argocd_config: Option<ArgoCdConfig>) -> Self {
        Self {
            argocd_config,
            common_prefix: String::new(),
            parent_environment_name: parent_environment_name.into(),
            is_aa_env: false,
        }
    }

    /// Name used for the AppProject, the Applications' project and the
    /// environment annotation.
    pub fn fully_qualified_name(&self) -> String {
        if self.is_aa_env {
            let concrete = self
                .argocd_config
                .as_ref()
                .map_or("", |c| c.concrete_env_name.as_str());
            format!(
                "{}-{}-{}",
                self.common_prefix, self.parent_environment_name, concrete
            )
        } else {
            self.parent_environment_name.clone()
        }
    }

    /// Builds the infos to render for one configured environment.
    ///
    /// Returns one info per concrete instance for AA environments, a single
    /// info for a plain `argocd` config, and nothing for environments without
    /// any Argo CD configuration.
    pub fn expand(env_name: &str, config: &EnvironmentConfig) -> Vec<EnvironmentInfo> {
        if let Some(configs) = &config.argocd_configs {
            let common_prefix = configs.common_env_prefix.clone().unwrap_or_default();
            return configs
                .configurations
                .iter()
                .map(|argocd| EnvironmentInfo {
                    argocd_config: Some(argocd.clone()),
                    common_prefix: common_prefix.clone(),
                    parent_environment_name: env_name.to_string(),
                    is_aa_env: true,
                })
                .collect();
        }

        match &config.argocd {
            Some(argocd) => vec![EnvironmentInfo::new(env_name, Some(argocd.clone()))],
            None => {
                log::warn!("Environment '{}' has no Argo CD configuration, skipping", env_name);
                Vec::new()
            }
        }
    }

    /// Repository path the rendered stream for `api_version` is stored at.
    pub fn manifest_file_path(&self, api_version: ApiVersion) -> String {
        format!(
            "argocd/{}/{}.yaml",
            api_version.as_str(),
            self.fully_qualified_name()
        )
    }
}

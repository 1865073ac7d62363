//! Renders an environment into Argo CD AppProject and Application documents.

use std::collections::BTreeMap;

use crate::config::schema::{ArgoCdConfig, RenderOptions};
use crate::error::RenderError;

use super::info::{AppData, EnvironmentInfo};
use super::v1alpha1::{
    AccessEntry, AppProject, AppProjectSpec, Application, ApplicationDestination,
    ApplicationSource, ApplicationSpec, ObjectMeta, ResourceIgnoreDifferences, ResourceKind,
    SyncPolicy, SyncPolicyAutomated, SyncWindow,
};

pub const TEAM_ANNOTATION: &str = "com.freiheit.kuberpult/team";
pub const APPLICATION_ANNOTATION: &str = "com.freiheit.kuberpult/application";
pub const ENVIRONMENT_ANNOTATION: &str = "com.freiheit.kuberpult/environment";
pub const PARENT_ENVIRONMENT_ANNOTATION: &str = "com.freiheit.kuberpult/aa-parent-environment";

/// Restricts webhook-triggered refreshes to the application's own manifests.
/// The value must be absolute within the repository.
pub const MANIFEST_GENERATE_PATHS_ANNOTATION: &str = "argocd.argoproj.io/manifest-generate-paths";

pub const RESOURCES_FINALIZER: &str = "resources-finalizer.argocd.argoproj.io";

const DOCUMENT_SEPARATOR: &str = "---\n";

/// Document format versions the renderer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ApiVersion {
    V1Alpha1,
}

impl ApiVersion {
    pub const ALL: &'static [ApiVersion] = &[ApiVersion::V1Alpha1];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1Alpha1 => "v1alpha1",
        }
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository path holding the manifests of `app_name` in `parent_environment`.
pub fn manifest_path(parent_environment: &str, app_name: &str) -> String {
    format!(
        "environments/{}/applications/{}/manifests",
        parent_environment, app_name
    )
}

/// Renders with default options. See [`ManifestRenderer::render`].
pub fn render_environment(
    git_url: &str,
    git_branch: &str,
    info: &EnvironmentInfo,
    apps: &[AppData],
) -> Result<BTreeMap<ApiVersion, Vec<u8>>, RenderError> {
    ManifestRenderer::default().render(git_url, git_branch, info, apps)
}

#[derive(Debug, Clone, Default)]
pub struct ManifestRenderer {
    options: RenderOptions,
}

impl ManifestRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Renders one AppProject followed by one Application per entry of
    /// `apps`, in input order, for every supported API version.
    ///
    /// Fails without output when the environment has no Argo CD config.
    pub fn render(
        &self,
        git_url: &str,
        git_branch: &str,
        info: &EnvironmentInfo,
        apps: &[AppData],
    ) -> Result<BTreeMap<ApiVersion, Vec<u8>>, RenderError> {
        let environment = info.fully_qualified_name();
        let _span = tracing::info_span!("argocd.render", environment = %environment).entered();

        let config = info
            .argocd_config
            .as_ref()
            .ok_or_else(|| RenderError::Configuration {
                environment: environment.clone(),
            })?;

        let mut result = BTreeMap::new();
        for api_version in ApiVersion::ALL {
            let content = match api_version {
                ApiVersion::V1Alpha1 => self.render_v1alpha1(git_url, git_branch, info, config, apps)?,
            };
            result.insert(*api_version, content);
        }

        log::debug!(
            "Rendered {} applications for environment '{}'",
            apps.len(),
            environment
        );
        Ok(result)
    }

    fn render_v1alpha1(
        &self,
        git_url: &str,
        git_branch: &str,
        info: &EnvironmentInfo,
        config: &ArgoCdConfig,
        apps: &[AppData],
    ) -> Result<Vec<u8>, RenderError> {
        let mut documents = Vec::with_capacity(apps.len() + 1);
        documents.push(serde_yaml::to_string(&app_project(info, config))?);

        for app in apps {
            let application = self.application(git_url, git_branch, info, config, app);
            documents.push(serde_yaml::to_string(&application)?);
        }

        Ok(documents.join(DOCUMENT_SEPARATOR).into_bytes())
    }

    fn application(
        &self,
        git_url: &str,
        git_branch: &str,
        info: &EnvironmentInfo,
        config: &ArgoCdConfig,
        app: &AppData,
    ) -> Application {
        let fqn = info.fully_qualified_name();
        let path = manifest_path(&info.parent_environment_name, &app.app_name);

        let mut annotations = config.application_annotations.clone();
        annotations.insert(TEAM_ANNOTATION.to_string(), app.team_name.clone());
        annotations.insert(APPLICATION_ANNOTATION.to_string(), app.app_name.clone());
        annotations.insert(ENVIRONMENT_ANNOTATION.to_string(), fqn.clone());
        annotations.insert(
            PARENT_ENVIRONMENT_ANNOTATION.to_string(),
            info.parent_environment_name.clone(),
        );
        annotations.insert(
            MANIFEST_GENERATE_PATHS_ANNOTATION.to_string(),
            format!("/{}", path),
        );

        let mut metadata = ObjectMeta::new(format!("{}-{}", fqn, app.app_name))
            .with_label(TEAM_ANNOTATION, app.team_name.clone());
        metadata.annotations = annotations;
        if !(self.options.omit_undeploy_finalizers && app.is_undeploy) {
            metadata = metadata.with_finalizer(RESOURCES_FINALIZER);
        }

        let spec = ApplicationSpec {
            destination: destination(config, config.destination.application_namespace()),
            ignore_differences: config
                .ignore_differences
                .iter()
                .map(|d| ResourceIgnoreDifferences {
                    group: d.group.clone(),
                    jq_path_expressions: d.jq_path_expressions.clone(),
                    json_pointers: d.json_pointers.clone(),
                    kind: d.kind.clone(),
                    managed_fields_managers: d.managed_fields_managers.clone(),
                    name: d.name.clone(),
                    namespace: d.namespace.clone(),
                })
                .collect(),
            project: fqn,
            source: ApplicationSource {
                path,
                repo_url: git_url.to_string(),
                target_revision: git_branch.to_string(),
            },
            sync_policy: Some(SyncPolicy {
                automated: Some(SyncPolicyAutomated {
                    allow_empty: true,
                    prune: true,
                    self_heal: true,
                }),
                sync_options: config.sync_options.clone(),
            }),
        };

        Application::new(ResourceKind::Application, metadata, spec)
    }
}

fn app_project(info: &EnvironmentInfo, config: &ArgoCdConfig) -> AppProject {
    let fqn = info.fully_qualified_name();

    let sync_windows = config
        .sync_windows
        .iter()
        .map(|w| SyncWindow {
            applications: if w.apps.is_empty() {
                vec!["*".to_string()]
            } else {
                w.apps.clone()
            },
            duration: w.duration.clone(),
            kind: w.kind.clone(),
            manual_sync: true,
            schedule: w.schedule.clone(),
            ..Default::default()
        })
        .collect();

    let spec = AppProjectSpec {
        cluster_resource_whitelist: config
            .cluster_resource_whitelist
            .iter()
            .map(|e| AccessEntry {
                group: e.group.clone(),
                kind: e.kind.clone(),
            })
            .collect(),
        description: fqn.clone(),
        destinations: vec![destination(config, config.destination.app_project_namespace())],
        source_repos: vec!["*".to_string()],
        sync_windows,
    };

    AppProject::new(ResourceKind::AppProject, ObjectMeta::new(fqn), spec)
}

fn destination(config: &ArgoCdConfig, namespace: &str) -> ApplicationDestination {
    ApplicationDestination {
        name: config.destination.name.clone(),
        namespace: namespace.to_string(),
        server: config.destination.server.clone(),
    }
}

pub mod argocd;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod topology;

pub use argocd::{render_environment, ApiVersion, AppData, EnvironmentInfo, ManifestRenderer};
pub use config::{
    parse_environment_config, parse_environments, parse_render_options, ConfigValidator,
    EnvironmentConfig, RenderOptions,
};
pub use error::{ConfigError, RenderError, TelemetryError};
pub use telemetry::{init_tracing, LogFormat};
pub use topology::{resolve_topology, Environment, EnvironmentGroup, Priority};

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{parse_environment_config, parse_environments, parse_render_options};
pub use schema::{
    AccessEntry, ArgoCdConfig, ArgoCdConfigs, ArgoCdDestination, ArgoCdIgnoreDifference,
    ArgoCdSyncWindow, EnvironmentConfig, EnvironmentConfigUpstream, RenderOptions,
};
pub use validation::ConfigValidator;

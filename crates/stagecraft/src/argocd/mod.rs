//! Argo CD manifest rendering.

pub mod info;
pub mod render;
pub mod v1alpha1;

pub use info::{AppData, EnvironmentInfo};
pub use render::{manifest_path, render_environment, ApiVersion, ManifestRenderer};

//! Error types for manifest parsing and nested-animation loading.
//!
//! None of these escape as hard failures from the template surfaces: callers of
//! [`SlotManager::new`](crate::SlotManager::new) get zero slots and the precomp
//! interceptor declines the reference. The explicit parse entry points return them.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("read slot manifest {}: {source}", path.display())]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("slot manifest json parse error: {0}")]
    ManifestJson(#[from] serde_json::Error),
    #[error("slot manifest structure: {0}")]
    ManifestShape(String),
    #[error("resource provider has no data for nested animation '{name}'")]
    ResourceNotFound { name: String },
    #[error("failed to build nested animation '{name}'")]
    AnimationBuild { name: String },
}

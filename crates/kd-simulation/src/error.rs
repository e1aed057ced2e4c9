use std::path::PathBuf;

use kd_core::CoreError;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown tuning profile: \"{0}\"")]
    UnknownProfile(String),

    #[error("malformed tuning profile: {0}")]
    ProfileFormat(#[from] serde_json::Error),

    #[error("cannot read tuning profile {path}: {source}")]
    ProfileIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("system error: {0}")]
    SystemError(String),
}

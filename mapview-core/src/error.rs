use crate::model::MapId;
use thiserror::Error;

/// Failure of a request sent to the host.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Invalid map id: {0:?}")]
    InvalidMapId(String),

    #[error("Unknown map: {0}")]
    UnknownMap(MapId),

    #[error("Failed to persist map: {0}")]
    Persist(#[from] ProjectError),

    #[error("Other error: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Map {0} is not part of the project")]
    MissingMap(MapId),
}

pub type Result<T> = std::result::Result<T, HostError>;

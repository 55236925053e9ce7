pub mod error;
pub mod host;
pub mod model;
pub mod project;

pub use error::{HostError, ProjectError};
pub use host::{Host, HostCommand, LocalHost};
pub use model::{Map, MapId, MapInfo, MapSnapshot, Marker, MarkerId, Position};
pub use project::ProjectState;

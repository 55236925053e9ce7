//! Host side of the viewer: the request/response commands the panel sends,
//! and an in-process implementation backed by a [`ProjectState`].

use crate::error::{HostError, Result};
use crate::model::{MapId, MapSnapshot};
use crate::project::ProjectState;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Names of the commands understood by a host, used when reporting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCommand {
    SetMap,
    PopMap,
    UpdateMapContent,
}

impl HostCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostCommand::SetMap => "set_map",
            HostCommand::PopMap => "pop_map",
            HostCommand::UpdateMapContent => "update_map_content",
        }
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The process that owns map data.
///
/// Snapshot replies are optional: a host may answer with nothing, and the
/// panel then leaves whatever it was showing in place.
pub trait Host: Send + Sync {
    /// Switch the current map to `id`.
    fn set_map(&self, id: &str) -> impl Future<Output = Result<Option<MapSnapshot>>> + Send;

    /// Go back one level in the navigation history.
    fn pop_map(&self) -> impl Future<Output = Result<Option<MapSnapshot>>> + Send;

    /// Replace the informatic of the current map.
    fn update_map_content(&self, content: String) -> impl Future<Output = Result<()>> + Send;
}

/// Host living in the same process as the panel.
pub struct LocalHost {
    state: Mutex<ProjectState>,
    project_dir: Option<PathBuf>,
}

impl LocalHost {
    /// A host that keeps edits in memory only.
    pub fn new(state: ProjectState) -> Self {
        Self {
            state: Mutex::new(state),
            project_dir: None,
        }
    }

    /// A host that writes edited maps back into `project_dir`.
    pub fn with_project_dir(mut self, project_dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(project_dir.into());
        self
    }

    pub fn open(project_dir: impl Into<PathBuf>) -> std::result::Result<Self, crate::ProjectError> {
        let project_dir = project_dir.into();
        let state = ProjectState::load(&project_dir)?;
        info!("Opened project {}", project_dir.display());
        Ok(Self::new(state).with_project_dir(project_dir))
    }

    pub async fn state(&self) -> MutexGuard<'_, ProjectState> {
        self.state.lock().await
    }
}

impl Host for LocalHost {
    async fn set_map(&self, id: &str) -> Result<Option<MapSnapshot>> {
        let map_id: MapId = id
            .parse()
            .map_err(|_| HostError::InvalidMapId(id.to_string()))?;

        let mut state = self.state.lock().await;
        state
            .enter(map_id)
            .map_err(|_| HostError::UnknownMap(map_id))?;
        debug!("Current map is now {} (depth {})", map_id, state.history().len());
        Ok(state.snapshot())
    }

    async fn pop_map(&self) -> Result<Option<MapSnapshot>> {
        let mut state = self.state.lock().await;
        let map_id = state.back();
        debug!("Popped back to map {}", map_id);
        Ok(state.snapshot())
    }

    async fn update_map_content(&self, content: String) -> Result<()> {
        let mut state = self.state.lock().await;
        state.set_content(content)?;

        if let Some(ref project_dir) = self.project_dir {
            let map_id = state.current_id();
            state.save_map(project_dir, map_id)?;
            info!("Saved informatic of map {}", map_id);
        }
        Ok(())
    }
}

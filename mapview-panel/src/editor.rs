//! The informatic editor: a Markdown annotation panel that flips between a
//! rendered view and raw, directly editable text.

use crate::markdown;
use crate::reporter::ErrorReporter;
use crate::surface::PanelSurface;
use mapview_core::{Host, HostCommand};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Viewing,
    Editing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    /// Last known content of the informatic.
    pub text: String,
    pub editable: bool,
}

impl EditorState {
    pub fn mode(&self) -> EditorMode {
        if self.editable {
            EditorMode::Editing
        } else {
            EditorMode::Viewing
        }
    }
}

/// Draw `state` into the informatic panel.
pub fn render<S: PanelSurface>(state: &EditorState, surface: &mut S) {
    match state.mode() {
        EditorMode::Editing => {
            surface.set_informatic_raw(&state.text);
            surface.set_informatic_editable(true);
            surface.set_edit_mode(true);
        }
        EditorMode::Viewing => {
            surface.set_informatic_html(&markdown::to_html(&state.text));
            surface.set_informatic_editable(false);
            surface.set_edit_mode(false);
        }
    }
}

/// Decides whether the panel may leave the current map.
pub trait ChangeMapGuard: Send + Sync {
    fn allow_change(&self, state: &EditorState) -> bool;
}

impl<F> ChangeMapGuard for F
where
    F: Fn(&EditorState) -> bool + Send + Sync,
{
    fn allow_change(&self, state: &EditorState) -> bool {
        self(state)
    }
}

/// Lets every navigation through, unsaved edits included.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowChange;

impl ChangeMapGuard for AllowChange {
    fn allow_change(&self, _state: &EditorState) -> bool {
        true
    }
}

pub struct InformaticEditor<H> {
    host: Arc<H>,
    reporter: Arc<dyn ErrorReporter>,
    guard: Arc<dyn ChangeMapGuard>,
    state: EditorState,
}

impl<H: Host + 'static> InformaticEditor<H> {
    pub fn new(host: Arc<H>, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            host,
            reporter,
            guard: Arc::new(AllowChange),
            state: EditorState::default(),
        }
    }

    pub fn with_guard(mut self, guard: Arc<dyn ChangeMapGuard>) -> Self {
        self.guard = guard;
        self
    }

    pub fn set_guard(&mut self, guard: Arc<dyn ChangeMapGuard>) {
        self.guard = guard;
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn mode(&self) -> EditorMode {
        self.state.mode()
    }

    /// Replace the text and redraw it in the current mode.
    pub fn set_content<S: PanelSurface>(&mut self, surface: &mut S, text: &str) {
        self.state.text = text.to_string();
        render(&self.state, surface);
    }

    /// Switch between viewing and editing.
    ///
    /// Leaving edit mode reads the panel back and saves it through the host.
    /// The save runs on its own task; the returned handle resolves once the
    /// host has answered. Must be called from within a tokio runtime.
    pub fn toggle_editable<S: PanelSurface>(&mut self, surface: &mut S) -> Option<JoinHandle<()>> {
        let save = if self.state.editable {
            self.state.text = surface.informatic_text();
            Some(self.save_current_text())
        } else {
            None
        };

        self.state.editable = !self.state.editable;
        debug!("Informatic editor now {:?}", self.state.mode());
        render(&self.state, surface);
        save
    }

    /// Asked by the navigator before leaving the current map. The default
    /// guard is [`AllowChange`].
    pub fn request_change_map(&self) -> bool {
        let allowed = self.guard.allow_change(&self.state);
        if !allowed {
            debug!("Map change refused in {:?} mode", self.state.mode());
        }
        allowed
    }

    fn save_current_text(&self) -> JoinHandle<()> {
        let host = Arc::clone(&self.host);
        let reporter = Arc::clone(&self.reporter);
        let content = self.state.text.clone();

        tokio::spawn(async move {
            if let Err(e) = host.update_map_content(content).await {
                reporter.report(HostCommand::UpdateMapContent, &e);
            }
        })
    }
}

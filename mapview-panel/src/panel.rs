//! Wiring of the navigator and editor onto one surface, with the user input
//! handlers the page would otherwise register on load.

use crate::config::PanelConfig;
use crate::editor::{ChangeMapGuard, InformaticEditor};
use crate::navigator::{MapNavigator, Navigation};
use crate::reporter::ErrorReporter;
use crate::surface::PanelSurface;
use mapview_core::Host;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Backspace,
    Enter,
    Escape,
    Char(char),
}

pub struct MapPanel<H, S> {
    config: PanelConfig,
    navigator: MapNavigator<H>,
    editor: InformaticEditor<H>,
    surface: S,
    active: bool,
}

impl<H: Host + 'static, S: PanelSurface> MapPanel<H, S> {
    /// Build a panel drawing into `surface`. Nothing is requested from the
    /// host until [`MapPanel::start`].
    pub fn init(
        host: Arc<H>,
        surface: S,
        config: PanelConfig,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        let navigator = MapNavigator::new(Arc::clone(&host), Arc::clone(&reporter), &config);
        let editor = InformaticEditor::new(host, reporter);
        Self {
            config,
            navigator,
            editor,
            surface,
            active: true,
        }
    }

    /// Open the root map.
    pub async fn start(&mut self) -> Navigation {
        let root = self.config.root_map.clone();
        self.open(&root).await
    }

    pub async fn open(&mut self, id: &str) -> Navigation {
        self.navigator
            .open(id, &mut self.surface, &mut self.editor)
            .await
    }

    pub async fn back(&mut self) -> Navigation {
        self.navigator.back(&mut self.surface, &mut self.editor).await
    }

    /// Click on the `index`-th marker. `None` if there is no such marker.
    pub async fn click_marker(&mut self, index: usize) -> Option<Navigation> {
        let target = self.navigator.marker_target(index)?;
        Some(self.open(&target.to_string()).await)
    }

    /// Click on the parent thumbnail. `None` while it is hidden.
    pub async fn click_parent(&mut self) -> Option<Navigation> {
        let has_parent = self
            .navigator
            .current()
            .is_some_and(|snapshot| snapshot.has_parent());
        if !has_parent {
            return None;
        }
        Some(self.back().await)
    }

    /// Keyboard input anywhere on the page. Backspace goes back while the
    /// panel is active.
    pub async fn key_down(&mut self, key: Key) -> Option<Navigation> {
        match key {
            Key::Backspace if self.active => Some(self.back().await),
            _ => {
                debug!("Ignoring key {:?}", key);
                None
            }
        }
    }

    /// Click on the edit toggle.
    pub fn click_edit(&mut self) -> Option<JoinHandle<()>> {
        self.editor.toggle_editable(&mut self.surface)
    }

    /// Replace the check run before every navigation.
    pub fn set_change_guard(&mut self, guard: Arc<dyn ChangeMapGuard>) {
        self.editor.set_guard(guard);
    }

    /// The host pushed new informatic content.
    pub fn set_content(&mut self, text: &str) {
        self.editor.set_content(&mut self.surface, text);
    }

    pub fn pointer_enter_map(&mut self) {
        self.navigator.panzoom_mut().pointer_enter();
    }

    pub fn pointer_leave_map(&mut self) {
        self.navigator.panzoom_mut().pointer_leave();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn navigator(&self) -> &MapNavigator<H> {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut MapNavigator<H> {
        &mut self.navigator
    }

    pub fn editor(&self) -> &InformaticEditor<H> {
        &self.editor
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

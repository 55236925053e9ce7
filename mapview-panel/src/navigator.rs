//! The map navigator: asks the host for maps and draws whatever it answers.

use crate::assets::AssetRoot;
use crate::config::PanelConfig;
use crate::editor::InformaticEditor;
use crate::panzoom::PanZoom;
use crate::reporter::ErrorReporter;
use crate::surface::{ImageSize, MarkerElement, PanelSurface};
use mapview_core::error::Result;
use mapview_core::{Host, HostCommand, MapId, MapSnapshot, Marker};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The host answered with a map and it was drawn.
    Rendered,
    /// The host answered with nothing; the previous map stays on screen.
    Empty,
    /// The request failed and was reported.
    Failed,
    /// The informatic editor refused to let go of the current map.
    Blocked,
}

pub struct MapNavigator<H> {
    host: Arc<H>,
    reporter: Arc<dyn ErrorReporter>,
    assets: AssetRoot,
    marker_size_px: u32,
    panzoom: PanZoom,
    marker_targets: Vec<MapId>,
    current: Option<MapSnapshot>,
}

impl<H: Host + 'static> MapNavigator<H> {
    pub fn new(host: Arc<H>, reporter: Arc<dyn ErrorReporter>, config: &PanelConfig) -> Self {
        Self {
            host,
            reporter,
            assets: config.asset_root.clone(),
            marker_size_px: config.marker_size_px,
            panzoom: PanZoom::new(config.zoom, config.container),
            marker_targets: Vec::new(),
            current: None,
        }
    }

    /// Ask the host to switch to map `id`.
    pub async fn navigate_to(&self, id: &str) -> Result<Option<MapSnapshot>> {
        self.host.set_map(id).await
    }

    /// Ask the host to go back one map.
    pub async fn navigate_to_parent(&self) -> Result<Option<MapSnapshot>> {
        self.host.pop_map().await
    }

    /// Navigate to `id` and draw the result.
    pub async fn open<S: PanelSurface>(
        &mut self,
        id: &str,
        surface: &mut S,
        editor: &mut InformaticEditor<H>,
    ) -> Navigation {
        if !editor.request_change_map() {
            debug!("Navigation to map {} blocked by the editor", id);
            return Navigation::Blocked;
        }
        let response = self.navigate_to(id).await;
        self.apply(HostCommand::SetMap, response, surface, editor)
    }

    /// Go back to the parent map and draw it.
    pub async fn back<S: PanelSurface>(
        &mut self,
        surface: &mut S,
        editor: &mut InformaticEditor<H>,
    ) -> Navigation {
        if !editor.request_change_map() {
            debug!("Back navigation blocked by the editor");
            return Navigation::Blocked;
        }
        let response = self.navigate_to_parent().await;
        self.apply(HostCommand::PopMap, response, surface, editor)
    }

    fn apply<S: PanelSurface>(
        &mut self,
        command: HostCommand,
        response: Result<Option<MapSnapshot>>,
        surface: &mut S,
        editor: &mut InformaticEditor<H>,
    ) -> Navigation {
        match response {
            Ok(Some(snapshot)) => {
                self.render(Some(&snapshot), surface, editor);
                self.current = Some(snapshot);
                Navigation::Rendered
            }
            Ok(None) => {
                self.render(None, surface, editor);
                Navigation::Empty
            }
            Err(e) => {
                self.reporter.report(command, &e);
                Navigation::Failed
            }
        }
    }

    /// Draw `snapshot`. `None` leaves the surface untouched. The text is
    /// shown in the editor's current mode: Markdown while viewing, raw while
    /// editing.
    pub fn render<S: PanelSurface>(
        &mut self,
        snapshot: Option<&MapSnapshot>,
        surface: &mut S,
        editor: &mut InformaticEditor<H>,
    ) {
        let Some(snapshot) = snapshot else {
            return;
        };

        let src = self.assets.resolve(&snapshot.image);
        match surface.load_map_image(&src) {
            Some(natural) if natural.width > 0.0 && natural.height > 0.0 => {
                surface.clear_markers();
                self.marker_targets.clear();
                for marker in &snapshot.markers {
                    surface.add_marker(self.marker_element(marker, natural));
                    self.marker_targets.push(marker.map_id);
                }
                info!("Rendered map {} with {} markers", src, snapshot.markers.len());
            }
            Some(natural) => warn!(
                "Map image {} is {}x{}; markers not redrawn",
                src, natural.width, natural.height
            ),
            None => warn!("Map image {} did not load; markers not redrawn", src),
        }

        editor.set_content(surface, &snapshot.text);

        match snapshot.parent_image {
            Some(ref parent_image) => surface.show_parent(&self.assets.resolve(parent_image)),
            None => surface.hide_parent(),
        }

        self.panzoom.reset(surface.container_size());
    }

    fn marker_element(&self, marker: &Marker, natural: ImageSize) -> MarkerElement {
        MarkerElement {
            image: self.assets.resolve(&marker.image),
            left_percent: marker.position.x / natural.width * 100.0,
            top_percent: marker.position.y / natural.height * 100.0,
            size_px: self.marker_size_px,
            target: marker.map_id,
        }
    }

    /// Map a click on the `index`-th marker leads to.
    pub fn marker_target(&self, index: usize) -> Option<MapId> {
        self.marker_targets.get(index).copied()
    }

    /// Last snapshot drawn.
    pub fn current(&self) -> Option<&MapSnapshot> {
        self.current.as_ref()
    }

    pub fn panzoom(&self) -> &PanZoom {
        &self.panzoom
    }

    pub fn panzoom_mut(&mut self) -> &mut PanZoom {
        &mut self.panzoom
    }
}

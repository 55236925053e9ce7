use mapview_core::MapId;
use serde::{Deserialize, Serialize};

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f32,
    pub height: f32,
}

impl ImageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A marker as placed on the map, with its offsets expressed in percent of
/// the background image so it stays put whatever size the image is shown at.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerElement {
    pub image: String,
    pub left_percent: f32,
    pub top_percent: f32,
    pub size_px: u32,
    pub target: MapId,
}

/// The elements the panel draws into: map container, background image,
/// parent thumbnail, informatic panel and its window wrapper.
pub trait PanelSurface {
    /// Point the background image at `src`. Returns the natural size of the
    /// image once it has loaded, or `None` if it never does.
    fn load_map_image(&mut self, src: &str) -> Option<ImageSize>;

    /// Displayed size of the map container.
    fn container_size(&self) -> ImageSize;

    fn clear_markers(&mut self);

    fn add_marker(&mut self, marker: MarkerElement);

    fn show_parent(&mut self, src: &str);

    fn hide_parent(&mut self);

    fn set_informatic_html(&mut self, html: &str);

    fn set_informatic_raw(&mut self, text: &str);

    fn set_informatic_editable(&mut self, editable: bool);

    /// Toggle the edit-mode flag on the informatic window.
    fn set_edit_mode(&mut self, on: bool);

    /// Live text of the informatic panel, including anything typed into it.
    fn informatic_text(&self) -> String;
}

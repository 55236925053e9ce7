//! A [`PanelSurface`] kept entirely in memory.
//!
//! Used by the command line front end and by tests. Image sizes come from an
//! [`ImageProbe`], which stands in for the browser finishing an image load.

use crate::config::ElementIds;
use crate::surface::{ImageSize, MarkerElement, PanelSurface};
use scraper::Html;
use std::collections::HashMap;
use std::fmt::Write;

pub trait ImageProbe {
    /// Natural size of the image at `src`, `None` if it cannot be loaded.
    fn natural_size(&mut self, src: &str) -> Option<ImageSize>;
}

impl<F> ImageProbe for F
where
    F: FnMut(&str) -> Option<ImageSize>,
{
    fn natural_size(&mut self, src: &str) -> Option<ImageSize> {
        self(src)
    }
}

/// Probe with sizes known up front.
#[derive(Debug, Clone, Default)]
pub struct FixedProbe {
    sizes: HashMap<String, ImageSize>,
    fallback: Option<ImageSize>,
}

impl FixedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every image has the same size.
    pub fn uniform(size: ImageSize) -> Self {
        Self {
            sizes: HashMap::new(),
            fallback: Some(size),
        }
    }

    pub fn with_image(mut self, src: impl Into<String>, size: ImageSize) -> Self {
        self.sizes.insert(src.into(), size);
        self
    }
}

impl ImageProbe for FixedProbe {
    fn natural_size(&mut self, src: &str) -> Option<ImageSize> {
        self.sizes.get(src).copied().or(self.fallback)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Informatic {
    Html(String),
    Raw(String),
}

pub struct HeadlessSurface<P> {
    elements: ElementIds,
    container: ImageSize,
    probe: P,
    map_src: Option<String>,
    map_size: Option<ImageSize>,
    markers: Vec<MarkerElement>,
    parent_src: Option<String>,
    parent_visible: bool,
    informatic: Informatic,
    editable: bool,
    edit_mode: bool,
}

impl<P: ImageProbe> HeadlessSurface<P> {
    pub fn new(elements: ElementIds, container: ImageSize, probe: P) -> Self {
        Self {
            elements,
            container,
            probe,
            map_src: None,
            map_size: None,
            markers: Vec::new(),
            parent_src: None,
            parent_visible: false,
            informatic: Informatic::Html(String::new()),
            editable: false,
            edit_mode: false,
        }
    }

    pub fn set_container_size(&mut self, size: ImageSize) {
        self.container = size;
    }

    pub fn map_src(&self) -> Option<&str> {
        self.map_src.as_deref()
    }

    /// Natural size of the currently loaded background image.
    pub fn map_size(&self) -> Option<ImageSize> {
        self.map_size
    }

    pub fn markers(&self) -> &[MarkerElement] {
        &self.markers
    }

    pub fn parent_src(&self) -> Option<&str> {
        self.parent_src.as_deref()
    }

    pub fn is_parent_visible(&self) -> bool {
        self.parent_visible
    }

    /// Rendered HTML, when the panel shows formatted content.
    pub fn informatic_html(&self) -> Option<&str> {
        match &self.informatic {
            Informatic::Html(html) => Some(html),
            Informatic::Raw(_) => None,
        }
    }

    pub fn is_informatic_editable(&self) -> bool {
        self.editable
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Replace the panel content the way a user typing into it would.
    /// Ignored unless the panel is editable.
    pub fn type_informatic(&mut self, text: &str) -> bool {
        if !self.editable {
            return false;
        }
        self.informatic = Informatic::Raw(text.to_string());
        true
    }

    /// Plain text dump of every element, one per line.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let ids = &self.elements;

        let size = self
            .map_size
            .map(|s| format!(" ({}x{})", s.width, s.height))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "#{} {}{}",
            ids.map,
            self.map_src.as_deref().unwrap_or("-"),
            size
        );

        let _ = writeln!(out, "#{} {} marker(s)", ids.map_container, self.markers.len());
        for (index, marker) in self.markers.iter().enumerate() {
            let _ = writeln!(
                out,
                "  [{}] -> map {} at ({:.1}%, {:.1}%) {}",
                index, marker.target, marker.left_percent, marker.top_percent, marker.image
            );
        }

        match (&self.parent_src, self.parent_visible) {
            (Some(src), true) => {
                let _ = writeln!(out, "#{} {}", ids.parent_map, src);
            }
            _ => {
                let _ = writeln!(out, "#{} hidden", ids.parent_map);
            }
        }

        let mode = if self.edit_mode { "edit_mode" } else { "view" };
        let _ = writeln!(out, "#{} [{}]", ids.informatic_window, mode);
        let body = match &self.informatic {
            Informatic::Html(html) | Informatic::Raw(html) => html,
        };
        let _ = write!(out, "#{}\n{}", ids.informatic, body);
        out
    }
}

impl<P: ImageProbe> PanelSurface for HeadlessSurface<P> {
    fn load_map_image(&mut self, src: &str) -> Option<ImageSize> {
        self.map_src = Some(src.to_string());
        self.map_size = self.probe.natural_size(src);
        self.map_size
    }

    fn container_size(&self) -> ImageSize {
        self.container
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn add_marker(&mut self, marker: MarkerElement) {
        self.markers.push(marker);
    }

    fn show_parent(&mut self, src: &str) {
        self.parent_src = Some(src.to_string());
        self.parent_visible = true;
    }

    fn hide_parent(&mut self) {
        self.parent_visible = false;
    }

    fn set_informatic_html(&mut self, html: &str) {
        self.informatic = Informatic::Html(html.to_string());
    }

    fn set_informatic_raw(&mut self, text: &str) {
        self.informatic = Informatic::Raw(text.to_string());
    }

    fn set_informatic_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    fn set_edit_mode(&mut self, on: bool) {
        self.edit_mode = on;
    }

    fn informatic_text(&self) -> String {
        match &self.informatic {
            Informatic::Raw(text) => text.clone(),
            Informatic::Html(html) => html_text(html),
        }
    }
}

/// Text content of an HTML fragment, the way `innerText` reads it back.
fn html_text(html: &str) -> String {
    Html::parse_fragment(html)
        .root_element()
        .text()
        .collect()
}

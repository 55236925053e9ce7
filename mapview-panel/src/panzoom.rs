//! Pan and zoom of the map container.
//!
//! The controller only keeps the transform (scale plus translation) and
//! decides which gestures to accept. Painting the transform is the surface's
//! business.

use crate::surface::ImageSize;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Zoom change per 128 units of wheel delta.
const WHEEL_SPEED: f32 = 0.065;
/// Largest zoom change a single wheel event may cause.
const WHEEL_MAX_STEP: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanZoomOptions {
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Keep the map from being dragged out of the container.
    pub bounds: bool,
    /// Fraction of the container, on each side, the map must keep overlapping.
    pub bounds_padding: f32,
}

impl Default for PanZoomOptions {
    fn default() -> Self {
        Self {
            min_zoom: 0.7,
            max_zoom: 5.0,
            bounds: true,
            bounds_padding: 0.1,
        }
    }
}

impl PanZoomOptions {
    /// Check the zoom range and padding make sense, describing the first
    /// problem found.
    pub fn validate(&self) -> Result<(), String> {
        if !self.min_zoom.is_finite() || !self.max_zoom.is_finite() {
            return Err("zoom limits must be finite numbers".to_string());
        }
        if self.min_zoom <= 0.0 {
            return Err(format!("min_zoom must be positive, got {}", self.min_zoom));
        }
        if self.min_zoom > self.max_zoom {
            return Err(format!(
                "min_zoom {} is larger than max_zoom {}",
                self.min_zoom, self.max_zoom
            ));
        }
        if !(0.0..0.5).contains(&self.bounds_padding) {
            return Err(format!(
                "bounds_padding must be in [0, 0.5), got {}",
                self.bounds_padding
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PanZoom {
    options: PanZoomOptions,
    container: ImageSize,
    scale: f32,
    x: f32,
    y: f32,
    paused: bool,
}

impl PanZoom {
    /// Gestures stay paused until the pointer enters the map.
    pub fn new(options: PanZoomOptions, container: ImageSize) -> Self {
        Self {
            options,
            container,
            scale: 1.0,
            x: 0.0,
            y: 0.0,
            paused: true,
        }
    }

    /// Back to the identity transform for a freshly rendered map. Whether
    /// gestures are paused is left as it was.
    pub fn reset(&mut self, container: ImageSize) {
        self.container = container;
        self.scale = 1.0;
        self.x = 0.0;
        self.y = 0.0;
        self.keep_in_bounds();
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn translation(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn options(&self) -> &PanZoomOptions {
        &self.options
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn pointer_enter(&mut self) {
        self.resume();
    }

    pub fn pointer_leave(&mut self) {
        self.pause();
    }

    /// Zoom to an absolute scale, keeping the container point `focus` fixed.
    /// The scale is clamped to the configured zoom range. Non-finite input is
    /// ignored.
    pub fn zoom_abs(&mut self, scale: f32, focus: (f32, f32)) {
        if !(scale.is_finite() && focus.0.is_finite() && focus.1.is_finite()) {
            debug!("Ignoring zoom to {} at ({}, {})", scale, focus.0, focus.1);
            return;
        }
        // Never panics, even with min_zoom > max_zoom.
        let target = scale.max(self.options.min_zoom).min(self.options.max_zoom);
        let ratio = target / self.scale;
        self.x = focus.0 - (focus.0 - self.x) * ratio;
        self.y = focus.1 - (focus.1 - self.y) * ratio;
        self.scale = target;
        self.keep_in_bounds();
        debug!("zoom {:.3} at ({:.1}, {:.1})", self.scale, focus.0, focus.1);
    }

    pub fn zoom_by(&mut self, ratio: f32, focus: (f32, f32)) {
        self.zoom_abs(self.scale * ratio, focus);
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        if !(x.is_finite() && y.is_finite()) {
            debug!("Ignoring move to ({}, {})", x, y);
            return;
        }
        self.x = x;
        self.y = y;
        self.keep_in_bounds();
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.move_to(self.x + dx, self.y + dy);
    }

    /// Mouse wheel over the map. Positive `delta` zooms out.
    pub fn wheel(&mut self, delta: f32, focus: (f32, f32)) -> bool {
        if self.paused || !delta.is_finite() {
            return false;
        }
        let step = (WHEEL_SPEED * delta.abs() / 128.0).min(WHEEL_MAX_STEP);
        let ratio = if delta > 0.0 { 1.0 - step } else { 1.0 + step };
        self.zoom_by(ratio, focus);
        true
    }

    /// Drag gesture on the map.
    pub fn drag(&mut self, dx: f32, dy: f32) -> bool {
        if self.paused {
            return false;
        }
        self.pan_by(dx, dy);
        true
    }

    fn keep_in_bounds(&mut self) {
        if !self.options.bounds {
            return;
        }
        let pad = self.options.bounds_padding;
        self.x = clamp_axis(self.x, self.container.width * self.scale, self.container.width, pad);
        self.y = clamp_axis(self.y, self.container.height * self.scale, self.container.height, pad);
    }
}

/// Keep `[offset, offset + extent]` overlapping the padded inner box of the
/// container along one axis.
fn clamp_axis(offset: f32, extent: f32, container: f32, pad: f32) -> f32 {
    let near = container * pad;
    let far = container * (1.0 - pad);
    if offset + extent < near {
        near - extent
    } else if offset > far {
        far
    } else {
        offset
    }
}

pub mod assets;
pub mod config;
pub mod editor;
pub mod headless;
pub mod markdown;
pub mod navigator;
pub mod panel;
pub mod panzoom;
pub mod reporter;
pub mod surface;

pub use assets::AssetRoot;
pub use config::{ConfigError, ElementIds, PanelConfig};
pub use editor::{AllowChange, ChangeMapGuard, EditorMode, EditorState, InformaticEditor};
pub use headless::{FixedProbe, HeadlessSurface, ImageProbe};
pub use navigator::{MapNavigator, Navigation};
pub use panel::{Key, MapPanel};
pub use panzoom::{PanZoom, PanZoomOptions};
pub use reporter::{ErrorReporter, RecordingReporter, TracingReporter};
pub use surface::{ImageSize, MarkerElement, PanelSurface};

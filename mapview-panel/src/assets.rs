use serde::{Deserialize, Serialize};

pub const DEFAULT_ASSET_ROOT: &str = "assets";

/// Prefix prepended to every image path coming from the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRoot(String);

impl AssetRoot {
    pub fn new(root: impl Into<String>) -> Self {
        Self(root.into())
    }

    /// Host paths already start with a separator, so this is a plain
    /// concatenation.
    pub fn resolve(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AssetRoot {
    fn default() -> Self {
        Self::new(DEFAULT_ASSET_ROOT)
    }
}

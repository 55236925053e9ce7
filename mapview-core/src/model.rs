use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn new(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }
    };
}

numeric_id!(MapId);
numeric_id!(MarkerId);

impl MapId {
    /// Map shown when the viewer starts.
    pub const ROOT: MapId = MapId(0);
}

/// Native pixel coordinates inside a map's source image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Clickable hotspot that leads to a child map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub map_id: MapId,
    pub position: Position,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapInfo {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub markers: BTreeMap<MarkerId, Marker>,
    pub map_info: MapInfo,
    pub image: String,
}

impl Map {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            markers: BTreeMap::new(),
            map_info: MapInfo::default(),
            image: image.into(),
        }
    }

    /// Builds the snapshot sent to the panel. `parent` is the map a `pop_map`
    /// would return to, if any.
    pub fn snapshot(&self, parent: Option<(MapId, &Map)>) -> MapSnapshot {
        MapSnapshot {
            image: self.image.clone(),
            markers: self.markers.values().cloned().collect(),
            text: self.map_info.content.clone(),
            parent_image: parent.map(|(_, map)| map.image.clone()),
            parent_id: parent.map(|(id, _)| id),
        }
    }
}

/// Read-only view of the current map, as returned by `set_map` and `pop_map`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub image: String,
    pub markers: Vec<Marker>,
    pub text: String,
    #[serde(default)]
    pub parent_image: Option<String>,
    #[serde(default)]
    pub parent_id: Option<MapId>,
}

impl MapSnapshot {
    pub fn has_parent(&self) -> bool {
        self.parent_image.is_some()
    }
}

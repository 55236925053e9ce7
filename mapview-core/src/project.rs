// Project directory layout and runtime navigation state

use crate::error::ProjectError;
use crate::model::{Map, MapId, MapInfo, MapSnapshot, Marker, MarkerId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

pub const PROJECT_FILE: &str = "project.json";

type Result<T> = std::result::Result<T, ProjectError>;

/// What a file inside a project directory holds, judged by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Map(MapId),
    Marker(MarkerId),
    Other,
}

impl FileKind {
    /// Classify `map-<id>.json` and `marker-<id>.json`; anything else is `Other`.
    pub fn classify(file_name: &str) -> Self {
        let Some(stem) = file_name.strip_suffix(".json") else {
            return FileKind::Other;
        };
        let Some((prefix, raw_id)) = stem.split_once('-') else {
            return FileKind::Other;
        };
        match (prefix, raw_id.parse::<u64>()) {
            ("map", Ok(id)) => FileKind::Map(MapId(id)),
            ("marker", Ok(id)) => FileKind::Marker(MarkerId(id)),
            _ => FileKind::Other,
        }
    }
}

/// On-disk form of a map: markers are stored in their own files.
#[derive(Debug, Serialize, Deserialize)]
struct MapFile {
    marker_ids: Vec<MarkerId>,
    map_info: MapInfo,
    image: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProjectFile {
    current_map: MapId,
}

#[derive(Debug, Clone)]
pub struct ProjectState {
    current_map: MapId,
    maps: HashMap<MapId, Map>,
    history: Vec<MapId>,
}

impl ProjectState {
    /// A project holding a single root map.
    pub fn new(root: Map) -> Self {
        let mut maps = HashMap::new();
        maps.insert(MapId::ROOT, root);
        Self {
            current_map: MapId::ROOT,
            maps,
            history: Vec::new(),
        }
    }

    pub fn load(project_dir: &Path) -> Result<Self> {
        let mut maps = HashMap::new();

        for entry in fs::read_dir(project_dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let FileKind::Map(id) = FileKind::classify(&file_name.to_string_lossy()) else {
                continue;
            };
            match load_map(project_dir, &entry.path()) {
                Ok(map) => {
                    debug!("Loaded map {} ({} markers)", id, map.markers.len());
                    maps.insert(id, map);
                }
                Err(e) => warn!("Skipping map file {}: {}", entry.path().display(), e),
            }
        }

        let project_path = project_dir.join(PROJECT_FILE);
        let project_file: ProjectFile = if project_path.exists() {
            read_json(&project_path)?
        } else {
            ProjectFile::default()
        };

        if !maps.contains_key(&project_file.current_map) {
            return Err(ProjectError::MissingMap(project_file.current_map));
        }

        Ok(Self {
            current_map: project_file.current_map,
            maps,
            history: Vec::new(),
        })
    }

    pub fn save(&self, project_dir: &Path) -> Result<()> {
        fs::create_dir_all(project_dir)?;
        for id in self.maps.keys() {
            self.save_map(project_dir, *id)?;
        }
        write_json(
            &project_dir.join(PROJECT_FILE),
            &ProjectFile {
                current_map: self.current_map,
            },
        )
    }

    /// Write one map file together with the marker files it references.
    pub fn save_map(&self, project_dir: &Path, id: MapId) -> Result<()> {
        let map = self.maps.get(&id).ok_or(ProjectError::MissingMap(id))?;

        for (marker_id, marker) in &map.markers {
            write_json(&project_dir.join(marker_file_name(*marker_id)), marker)?;
        }

        let map_file = MapFile {
            marker_ids: map.markers.keys().copied().collect(),
            map_info: map.map_info.clone(),
            image: map.image.clone(),
        };
        write_json(&project_dir.join(map_file_name(id)), &map_file)
    }

    /// Create a new project directory containing only a root map.
    pub fn scaffold(project_dir: &Path, image: &str) -> Result<Self> {
        let state = Self::new(Map::new(image));
        state.save(project_dir)?;
        Ok(state)
    }

    pub fn insert_map(&mut self, id: MapId, map: Map) -> Option<Map> {
        self.maps.insert(id, map)
    }

    pub fn map(&self, id: MapId) -> Option<&Map> {
        self.maps.get(&id)
    }

    /// All maps ordered by id.
    pub fn maps(&self) -> Vec<(MapId, &Map)> {
        let mut maps: Vec<_> = self.maps.iter().map(|(id, map)| (*id, map)).collect();
        maps.sort_by_key(|(id, _)| *id);
        maps
    }

    pub fn current_id(&self) -> MapId {
        self.current_map
    }

    pub fn current(&self) -> Option<&Map> {
        self.maps.get(&self.current_map)
    }

    pub fn history(&self) -> &[MapId] {
        &self.history
    }

    /// The map `back` would return to.
    pub fn parent_id(&self) -> Option<MapId> {
        self.history.last().copied()
    }

    pub fn snapshot(&self) -> Option<MapSnapshot> {
        let parent = self
            .parent_id()
            .and_then(|id| self.maps.get(&id).map(|map| (id, map)));
        self.current().map(|map| map.snapshot(parent))
    }

    /// Make `id` the current map, remembering where we came from.
    pub fn enter(&mut self, id: MapId) -> Result<()> {
        if !self.maps.contains_key(&id) {
            return Err(ProjectError::MissingMap(id));
        }
        if id != self.current_map {
            self.history.push(self.current_map);
            self.current_map = id;
        }
        Ok(())
    }

    /// Step back one level. At the root this is a no-op.
    pub fn back(&mut self) -> MapId {
        if let Some(previous) = self.history.pop() {
            self.current_map = previous;
        }
        self.current_map
    }

    pub fn set_content(&mut self, content: String) -> Result<()> {
        let id = self.current_map;
        let map = self.maps.get_mut(&id).ok_or(ProjectError::MissingMap(id))?;
        map.map_info.content = content;
        Ok(())
    }
}

fn map_file_name(id: MapId) -> String {
    format!("map-{}.json", id)
}

fn marker_file_name(id: MarkerId) -> String {
    format!("marker-{}.json", id)
}

fn load_map(project_dir: &Path, file_path: &Path) -> Result<Map> {
    let map_file: MapFile = read_json(file_path)?;
    let mut map = Map::new(map_file.image);
    map.map_info = map_file.map_info;

    for marker_id in map_file.marker_ids {
        let marker_path = project_dir.join(marker_file_name(marker_id));
        match read_json::<Marker>(&marker_path) {
            Ok(marker) => {
                map.markers.insert(marker_id, marker);
            }
            Err(e) => warn!("Skipping marker {}: {}", marker_id, e),
        }
    }

    Ok(map)
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let file = fs::File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

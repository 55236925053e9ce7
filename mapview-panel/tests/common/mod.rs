#![allow(dead_code)]

use mapview_core::{Host, HostError, MapId, MapSnapshot, Marker, Position};
use mapview_panel::{
    ElementIds, FixedProbe, HeadlessSurface, ImageSize, InformaticEditor, MapNavigator,
    PanelConfig, RecordingReporter,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    SetMap(String),
    PopMap,
    UpdateMapContent(String),
}

/// Host answering from a queue of canned replies and remembering every request.
#[derive(Default)]
pub struct ScriptedHost {
    requests: Mutex<Vec<Request>>,
    replies: Mutex<VecDeque<Result<Option<MapSnapshot>, HostError>>>,
    fail_updates: bool,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_updates() -> Self {
        Self {
            fail_updates: true,
            ..Self::default()
        }
    }

    pub fn reply(&self, reply: Result<Option<MapSnapshot>, HostError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn reply_with(&self, snapshot: MapSnapshot) {
        self.reply(Ok(Some(snapshot)));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self, request: Request) -> Result<Option<MapSnapshot>, HostError> {
        self.requests.lock().unwrap().push(request);
        self.replies.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}

impl Host for ScriptedHost {
    async fn set_map(&self, id: &str) -> Result<Option<MapSnapshot>, HostError> {
        self.next_reply(Request::SetMap(id.to_string()))
    }

    async fn pop_map(&self) -> Result<Option<MapSnapshot>, HostError> {
        self.next_reply(Request::PopMap)
    }

    async fn update_map_content(&self, content: String) -> Result<(), HostError> {
        self.requests
            .lock()
            .unwrap()
            .push(Request::UpdateMapContent(content));
        if self.fail_updates {
            Err(HostError::Other("disk full".to_string()))
        } else {
            Ok(())
        }
    }
}

pub fn marker(target: u64, x: f32, y: f32) -> Marker {
    Marker {
        map_id: MapId(target),
        position: Position { x, y },
        image: format!("/pins/{}.png", target),
    }
}

pub fn snapshot(image: &str, markers: Vec<Marker>, text: &str) -> MapSnapshot {
    MapSnapshot {
        image: image.to_string(),
        markers,
        text: text.to_string(),
        parent_image: None,
        parent_id: None,
    }
}

pub fn with_parent(mut snapshot: MapSnapshot, image: &str, id: u64) -> MapSnapshot {
    snapshot.parent_image = Some(image.to_string());
    snapshot.parent_id = Some(MapId(id));
    snapshot
}

/// Every image is 1000x500 unless listed otherwise.
pub fn surface() -> HeadlessSurface<FixedProbe> {
    HeadlessSurface::new(
        ElementIds::default(),
        ImageSize::new(800.0, 600.0),
        FixedProbe::uniform(ImageSize::new(1000.0, 500.0)),
    )
}

pub struct Fixture {
    pub host: Arc<ScriptedHost>,
    pub reporter: Arc<RecordingReporter>,
    pub navigator: MapNavigator<ScriptedHost>,
    pub editor: InformaticEditor<ScriptedHost>,
    pub surface: HeadlessSurface<FixedProbe>,
}

pub fn fixture(host: ScriptedHost) -> Fixture {
    let host = Arc::new(host);
    let reporter = Arc::new(RecordingReporter::new());
    let config = PanelConfig::default();
    Fixture {
        navigator: MapNavigator::new(host.clone(), reporter.clone(), &config),
        editor: InformaticEditor::new(host.clone(), reporter.clone()),
        surface: surface(),
        host,
        reporter,
    }
}

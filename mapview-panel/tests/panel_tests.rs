// End-to-end tests: a panel driving an in-process host

mod common;

use common::{ScriptedHost, surface};
use futures::future::join_all;
use mapview_core::{
    Host, LocalHost, Map, MapId, Marker, MarkerId, Position, ProjectState,
};
use mapview_panel::{
    FixedProbe, HeadlessSurface, Key, MapPanel, Navigation, PanelConfig, PanelSurface,
    RecordingReporter,
};
use std::sync::Arc;
use tempfile::TempDir;

fn atlas() -> ProjectState {
    let mut world = Map::new("/world.png");
    world.map_info.content = "# World".to_string();
    world.markers.insert(
        MarkerId(1),
        Marker {
            map_id: MapId(1),
            position: Position { x: 500.0, y: 250.0 },
            image: "/pins/city.png".to_string(),
        },
    );
    let mut city = Map::new("/city.png");
    city.map_info.content = "# City".to_string();

    let mut state = ProjectState::new(world);
    state.insert_map(MapId(1), city);
    state
}

fn panel(
    host: Arc<LocalHost>,
) -> (
    MapPanel<LocalHost, HeadlessSurface<FixedProbe>>,
    Arc<RecordingReporter>,
) {
    let reporter = Arc::new(RecordingReporter::new());
    let panel = MapPanel::init(host, surface(), PanelConfig::default(), reporter.clone());
    (panel, reporter)
}

#[tokio::test]
async fn test_start_opens_root_map() {
    let host = Arc::new(LocalHost::new(atlas()));
    let (mut panel, reporter) = panel(host);

    assert_eq!(panel.start().await, Navigation::Rendered);

    let surface = panel.surface();
    assert_eq!(surface.map_src(), Some("assets/world.png"));
    assert_eq!(surface.markers().len(), 1);
    assert!((surface.markers()[0].left_percent - 50.0).abs() < 1e-4);
    assert!(!surface.is_parent_visible());
    assert!(surface.informatic_html().unwrap().contains("<h1>World</h1>"));
    assert!(reporter.is_empty());
}

#[tokio::test]
async fn test_marker_click_drills_down_and_parent_click_returns() {
    let host = Arc::new(LocalHost::new(atlas()));
    let (mut panel, _) = panel(host.clone());
    panel.start().await;

    assert_eq!(panel.click_marker(0).await, Some(Navigation::Rendered));
    assert_eq!(panel.surface().map_src(), Some("assets/city.png"));
    assert!(panel.surface().is_parent_visible());
    assert_eq!(panel.surface().parent_src(), Some("assets/world.png"));
    assert!(panel.surface().markers().is_empty());

    assert_eq!(panel.click_parent().await, Some(Navigation::Rendered));
    assert_eq!(panel.surface().map_src(), Some("assets/world.png"));
    assert!(!panel.surface().is_parent_visible());
    assert_eq!(host.state().await.current_id(), MapId::ROOT);
}

#[tokio::test]
async fn test_clicks_on_missing_elements_do_nothing() {
    let host = Arc::new(LocalHost::new(atlas()));
    let (mut panel, _) = panel(host);
    panel.start().await;

    assert_eq!(panel.click_marker(5).await, None);
    assert_eq!(panel.click_parent().await, None);
}

#[tokio::test]
async fn test_backspace_goes_back() {
    let host = Arc::new(LocalHost::new(atlas()));
    let (mut panel, _) = panel(host);
    panel.start().await;
    panel.open("1").await;

    assert_eq!(panel.key_down(Key::Char('x')).await, None);
    assert_eq!(panel.surface().map_src(), Some("assets/city.png"));

    assert_eq!(panel.key_down(Key::Backspace).await, Some(Navigation::Rendered));
    assert_eq!(panel.surface().map_src(), Some("assets/world.png"));
}

#[tokio::test]
async fn test_backspace_ignored_while_inactive() {
    let host = Arc::new(LocalHost::new(atlas()));
    let (mut panel, _) = panel(host);
    panel.start().await;
    panel.open("1").await;

    panel.set_active(false);
    assert_eq!(panel.key_down(Key::Backspace).await, None);
    assert_eq!(panel.surface().map_src(), Some("assets/city.png"));
}

#[tokio::test]
async fn test_backspace_at_root_issues_pop_and_redraws_root() {
    let host = Arc::new(ScriptedHost::new());
    host.reply_with(common::snapshot("/world.png", vec![], "# World"));
    host.reply_with(common::snapshot("/world.png", vec![], "# World"));
    let reporter = Arc::new(RecordingReporter::new());
    let mut panel = MapPanel::init(host.clone(), surface(), PanelConfig::default(), reporter);

    panel.start().await;
    panel.surface_mut().set_informatic_html("stale");
    assert_eq!(panel.key_down(Key::Backspace).await, Some(Navigation::Rendered));

    assert_eq!(
        host.requests(),
        vec![
            common::Request::SetMap("0".to_string()),
            common::Request::PopMap
        ]
    );
    assert_eq!(panel.surface().map_src(), Some("assets/world.png"));
    assert!(!panel.surface().is_parent_visible());
    assert!(panel.surface().informatic_html().unwrap().contains("<h1>World</h1>"));
}

#[tokio::test]
async fn test_unknown_map_is_reported_and_view_kept() {
    let host = Arc::new(LocalHost::new(atlas()));
    let (mut panel, reporter) = panel(host);
    panel.start().await;

    assert_eq!(panel.open("404").await, Navigation::Failed);
    assert_eq!(panel.surface().map_src(), Some("assets/world.png"));
    assert_eq!(reporter.reports().len(), 1);
    assert_eq!(reporter.reports()[0].0.as_str(), "set_map");
}

#[tokio::test]
async fn test_edit_round_trip_persists_to_disk() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    atlas().save(dir.path())?;
    let host = Arc::new(LocalHost::open(dir.path())?);
    let (mut panel, reporter) = panel(host);
    panel.start().await;
    panel.open("1").await;

    assert!(panel.click_edit().is_none());
    panel.surface_mut().type_informatic("# City\n\nNow with a *river*.");
    panel.click_edit().expect("save task").await?;

    let reloaded = ProjectState::load(dir.path())?;
    assert_eq!(
        reloaded.map(MapId(1)).unwrap().map_info.content,
        "# City\n\nNow with a *river*."
    );
    assert_eq!(reloaded.map(MapId::ROOT).unwrap().map_info.content, "# World");
    assert!(reporter.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_navigation_while_editing_is_allowed() {
    let host = Arc::new(LocalHost::new(atlas()));
    let (mut panel, _) = panel(host.clone());
    panel.start().await;
    panel.click_edit();
    panel.surface_mut().type_informatic("never saved");

    assert_eq!(panel.open("1").await, Navigation::Rendered);
    assert_eq!(panel.surface().informatic_text(), "# City");

    let state = host.state().await;
    assert_eq!(state.map(MapId::ROOT).unwrap().map_info.content, "# World");
}

#[tokio::test]
async fn test_pointer_hover_controls_gestures() {
    let host = Arc::new(LocalHost::new(atlas()));
    let (mut panel, _) = panel(host);
    panel.start().await;

    assert!(!panel.navigator_mut().panzoom_mut().drag(10.0, 0.0));
    panel.pointer_enter_map();
    assert!(panel.navigator_mut().panzoom_mut().drag(10.0, 0.0));
    panel.pointer_leave_map();
    assert!(!panel.navigator_mut().panzoom_mut().wheel(-100.0, (0.0, 0.0)));
    assert_eq!(panel.navigator().panzoom().translation(), (10.0, 0.0));
}

#[tokio::test]
async fn test_overlapping_requests_all_reach_the_host() {
    let host = Arc::new(LocalHost::new(atlas()));
    let replies = join_all([host.set_map("1"), host.set_map("0"), host.set_map("1")]).await;

    assert!(replies.iter().all(|reply| matches!(reply, Ok(Some(_)))));
    assert_eq!(host.state().await.current_id(), MapId(1));
}

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use mapview_core::{LocalHost, MapId, ProjectState};
use mapview_panel::{
    HeadlessSurface, ImageProbe, ImageSize, Key, MapPanel, Navigation, PanelConfig,
    PanelSurface, TracingReporter,
};
use std::fmt::Write as _;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_ROOT_IMAGE: &str = "/map.jpg";

/// Panel backed by a project directory.
pub type ProjectPanel = MapPanel<LocalHost, HeadlessSurface<DiskProbe>>;

/// Expand `~` in a project path given on the command line.
pub fn expand_project_dir(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Reads image sizes from files under the project directory.
#[derive(Debug, Clone)]
pub struct DiskProbe {
    base_dir: PathBuf,
}

impl DiskProbe {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn locate(&self, src: &str) -> PathBuf {
        let path = Path::new(src);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl ImageProbe for DiskProbe {
    fn natural_size(&mut self, src: &str) -> Option<ImageSize> {
        let path = self.locate(src);
        match image::image_dimensions(&path) {
            Ok((width, height)) => Some(ImageSize::new(width as f32, height as f32)),
            Err(e) => {
                debug!("Cannot read image {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Create a project holding a single root map.
pub fn init_project(project_dir: &Path, image: &str, force: bool) -> Result<ProjectState> {
    let root_file = project_dir.join(format!("map-{}.json", MapId::ROOT));
    if root_file.exists() && !force {
        bail!(
            "{} already contains a project (use --force to overwrite)",
            project_dir.display()
        );
    }
    let state = ProjectState::scaffold(project_dir, image)
        .with_context(|| format!("Failed to create project in {}", project_dir.display()))?;
    info!("Created project in {}", project_dir.display());
    Ok(state)
}

/// Outline of every map in the project and where its markers lead.
pub fn render_tree(state: &ProjectState) -> String {
    let mut out = String::new();
    for (id, map) in state.maps() {
        let current = if id == state.current_id() { " *" } else { "" };
        let _ = writeln!(out, "map {}{}  {}", id, current, map.image);
        let first_line = map.map_info.content.lines().next().unwrap_or("");
        if !first_line.is_empty() {
            let _ = writeln!(out, "  \"{}\"", first_line);
        }
        for (marker_id, marker) in &map.markers {
            let _ = writeln!(
                out,
                "  marker {} at ({}, {}) -> map {}",
                marker_id, marker.position.x, marker.position.y, marker.map_id
            );
        }
    }
    out
}

/// Build a panel for the project in `project_dir`, configured from its
/// `mapview.json` when there is one.
pub fn open_panel(project_dir: &Path) -> Result<ProjectPanel> {
    let config = PanelConfig::load_from_dir(project_dir)
        .with_context(|| format!("Failed to read configuration in {}", project_dir.display()))?;
    let host = LocalHost::open(project_dir)
        .with_context(|| format!("Failed to open project {}", project_dir.display()))?;

    let surface = HeadlessSurface::new(
        config.elements.clone(),
        config.container,
        DiskProbe::new(project_dir),
    );
    Ok(MapPanel::init(
        Arc::new(host),
        surface,
        config,
        Arc::new(TracingReporter),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Open the project, navigate to `map` (the root when `None`) and describe
/// what the panel shows.
pub async fn show_map(project_dir: &Path, map: Option<&str>, format: OutputFormat) -> Result<String> {
    let mut panel = open_panel(project_dir)?;
    expect_rendered(panel.start().await, &panel.config().root_map)?;
    if let Some(id) = map {
        expect_rendered(panel.open(id).await, id)?;
    }

    match format {
        OutputFormat::Text => Ok(panel.surface().describe()),
        OutputFormat::Json => {
            let snapshot = panel
                .navigator()
                .current()
                .ok_or_else(|| anyhow!("No map rendered"))?;
            Ok(serde_json::to_string_pretty(snapshot)?)
        }
    }
}

fn expect_rendered(outcome: Navigation, id: &str) -> Result<()> {
    match outcome {
        Navigation::Rendered => Ok(()),
        other => bail!("Could not open map {}: {:?}", id, other),
    }
}

// Interactive session

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Open(String),
    Click(usize),
    Parent,
    Back,
    Edit,
    Type(String),
    Zoom(f32),
    Pan(f32, f32),
    Enter,
    Leave,
    Show,
    Help,
    Quit,
}

pub const BROWSE_HELP: &str = "\
open <id>      open a map
click <n>      click the n-th marker
parent         click the parent thumbnail
back           press backspace
edit           toggle the informatic editor (leaving it saves)
type <text>    replace the informatic while editing (\\n for new lines)
zoom <factor>  zoom the map around its center
pan <dx> <dy>  drag the map (pointer must be over it)
enter | leave  move the pointer onto or off the map
show           print the panel
help           this text
quit           leave";

/// Parse one line of the interactive session.
pub fn parse_browse_command(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "open" | "o" if !rest.is_empty() => BrowseCommand::Open(rest.to_string()),
        "open" | "o" => return Err("usage: open <id>".to_string()),
        "click" | "c" => BrowseCommand::Click(
            rest.parse()
                .map_err(|_| "usage: click <marker number>".to_string())?,
        ),
        "parent" | "p" => BrowseCommand::Parent,
        "back" | "b" => BrowseCommand::Back,
        "edit" | "e" => BrowseCommand::Edit,
        "type" | "t" => BrowseCommand::Type(rest.replace("\\n", "\n")),
        "zoom" | "z" => BrowseCommand::Zoom(
            parse_number(rest).ok_or_else(|| "usage: zoom <factor>".to_string())?,
        ),
        "pan" => {
            let mut parts = rest.split_whitespace().map(parse_number);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(Some(dx)), Some(Some(dy)), None) => BrowseCommand::Pan(dx, dy),
                _ => return Err("usage: pan <dx> <dy>".to_string()),
            }
        }
        "enter" => BrowseCommand::Enter,
        "leave" => BrowseCommand::Leave,
        "show" | "s" => BrowseCommand::Show,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        "" => return Err("empty command".to_string()),
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };
    Ok(command)
}

/// A finite number; `NaN` and `inf` parse as `f32` but are not usable here.
fn parse_number(s: &str) -> Option<f32> {
    s.parse::<f32>().ok().filter(|n| n.is_finite())
}

fn describe_navigation(outcome: Navigation) -> String {
    match outcome {
        Navigation::Rendered => format!("{} map rendered", "✓".green()),
        Navigation::Empty => format!("{} host returned no map", "→".yellow()),
        Navigation::Failed => format!("{} request failed (see log)", "✗".red()),
        Navigation::Blocked => format!("{} navigation blocked by the editor", "✗".yellow()),
    }
}

/// Drive `panel` from `input` until it runs out or `quit` is read.
/// A save started by leaving edit mode completes before the next line is
/// read, so it always lands on the map it was typed on.
pub async fn run_browse<P, R, W>(
    panel: &mut MapPanel<LocalHost, HeadlessSurface<P>>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    P: ImageProbe,
    R: BufRead,
    W: Write,
{
    let outcome = panel.start().await;
    writeln!(out, "{}", describe_navigation(outcome))?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_browse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{} {}", "✗".red(), message)?;
                continue;
            }
        };

        match command {
            BrowseCommand::Open(id) => {
                writeln!(out, "{}", describe_navigation(panel.open(&id).await))?;
            }
            BrowseCommand::Click(index) => match panel.click_marker(index).await {
                Some(outcome) => writeln!(out, "{}", describe_navigation(outcome))?,
                None => writeln!(out, "{} no marker {}", "✗".red(), index)?,
            },
            BrowseCommand::Parent => match panel.click_parent().await {
                Some(outcome) => writeln!(out, "{}", describe_navigation(outcome))?,
                None => writeln!(out, "{} this map has no parent", "✗".red())?,
            },
            BrowseCommand::Back => {
                if let Some(outcome) = panel.key_down(Key::Backspace).await {
                    writeln!(out, "{}", describe_navigation(outcome))?;
                }
            }
            BrowseCommand::Edit => {
                if let Some(save) = panel.click_edit() {
                    writeln!(out, "{} saving informatic", "✓".green())?;
                    save.await?;
                } else {
                    writeln!(out, "{} editing informatic", "→".blue())?;
                }
            }
            BrowseCommand::Type(text) => {
                if !panel.surface_mut().type_informatic(&text) {
                    writeln!(out, "{} not editing; use 'edit' first", "✗".red())?;
                }
            }
            BrowseCommand::Zoom(factor) => {
                let container = panel.surface().container_size();
                let zoom = panel.navigator_mut().panzoom_mut();
                zoom.zoom_abs(factor, (container.width / 2.0, container.height / 2.0));
                writeln!(out, "zoom {:.2}", zoom.scale())?;
            }
            BrowseCommand::Pan(dx, dy) => {
                let zoom = panel.navigator_mut().panzoom_mut();
                if zoom.drag(dx, dy) {
                    let (x, y) = zoom.translation();
                    writeln!(out, "offset ({:.1}, {:.1})", x, y)?;
                } else {
                    writeln!(out, "{} pointer is not over the map", "✗".red())?;
                }
            }
            BrowseCommand::Enter => panel.pointer_enter_map(),
            BrowseCommand::Leave => panel.pointer_leave_map(),
            BrowseCommand::Show => writeln!(out, "{}", panel.surface().describe())?,
            BrowseCommand::Help => writeln!(out, "{}", BROWSE_HELP)?,
            BrowseCommand::Quit => break,
        }
    }

    Ok(())
}

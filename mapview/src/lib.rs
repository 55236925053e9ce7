pub mod handlers;

pub use handlers::{
    BrowseCommand, DiskProbe, OutputFormat, expand_project_dir, init_project, open_panel,
    parse_browse_command, render_tree, run_browse, show_map,
};

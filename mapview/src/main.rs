use clap::ArgMatches;
use colored::Colorize;
use commands::command_argument_builder;
use mapview::handlers::{
    BROWSE_HELP, OutputFormat, expand_project_dir, init_project, open_panel, render_tree,
    run_browse, show_map,
};
use mapview_core::ProjectState;
use std::io::{self, Write};
use tracing_subscriber::filter::LevelFilter;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    init_logging(chosen_command.get_count("verbose"));

    let result = match chosen_command.subcommand() {
        Some(("init", primary_command)) => handle_init(primary_command),
        Some(("tree", primary_command)) => handle_tree(primary_command),
        Some(("show", primary_command)) => handle_show(primary_command).await,
        Some(("browse", primary_command)) => handle_browse(primary_command).await,
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn project_dir(args: &ArgMatches) -> std::path::PathBuf {
    let path = args
        .get_one::<String>("PATH")
        .map(String::as_str)
        .unwrap_or(".");
    expand_project_dir(path)
}

fn handle_init(args: &ArgMatches) -> anyhow::Result<()> {
    let dir = project_dir(args);
    let image = args
        .get_one::<String>("image")
        .map(String::as_str)
        .unwrap_or(mapview::handlers::DEFAULT_ROOT_IMAGE);
    let force = args.get_flag("force");

    init_project(&dir, image, force)?;
    println!("{} Project created in {}", "✓".green().bold(), dir.display());
    println!("{} Root map image: {}", "→".blue(), image.bright_white());
    Ok(())
}

fn handle_tree(args: &ArgMatches) -> anyhow::Result<()> {
    let dir = project_dir(args);
    let state = ProjectState::load(&dir)?;
    print!("{}", render_tree(&state));
    Ok(())
}

async fn handle_show(args: &ArgMatches) -> anyhow::Result<()> {
    let dir = project_dir(args);
    let map = args.get_one::<String>("map").map(String::as_str);
    let format = args
        .get_one::<String>("format")
        .and_then(|f| OutputFormat::from_str(f))
        .unwrap_or(OutputFormat::Text);

    println!("{}", show_map(&dir, map, format).await?);
    Ok(())
}

async fn handle_browse(args: &ArgMatches) -> anyhow::Result<()> {
    let dir = project_dir(args);
    let mut panel = open_panel(&dir)?;

    println!("{}", "MAPVIEW".bright_white().bold());
    println!("{}", "═".repeat(40).bright_blue());
    println!("{}", BROWSE_HELP);
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_browse(&mut panel, stdin.lock(), &mut stdout).await?;
    stdout.flush()?;
    Ok(())
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

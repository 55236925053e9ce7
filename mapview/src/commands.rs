use crate::CLAP_STYLING;
use clap::{arg, command};
use mapview::handlers::DEFAULT_ROOT_IMAGE;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("mapview")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("mapview")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-v --"verbose" ...)
                .help("Increase log verbosity (-v info, -vv debug)")
                .required(false)
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(
            command!("init")
                .about("Creates a new map project with a single root map")
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("Project directory")
                        .default_value("."),
                )
                .arg(
                    arg!(-i --"image" <IMAGE>)
                        .required(false)
                        .help("Background image of the root map, relative to the asset root")
                        .default_value(DEFAULT_ROOT_IMAGE),
                )
                .arg(
                    arg!(-f --"force")
                        .help("Overwrite an existing project in the directory")
                        .required(false),
                ),
        )
        .subcommand(
            command!("tree")
                .about("Lists every map of a project and where its markers lead")
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("Project directory")
                        .default_value("."),
                ),
        )
        .subcommand(
            command!("show")
                .about("Renders a map the way the panel would show it")
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("Project directory")
                        .default_value("."),
                )
                .arg(
                    arg!(-m --"map" <ID>)
                        .required(false)
                        .help("Map to open after the root map (default: the root map)"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("browse")
                .about("Interactive session: open maps, click markers, edit informatics")
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("Project directory")
                        .default_value("."),
                ),
        )
}

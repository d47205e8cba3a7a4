use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgAction,
    ArgMatches, Command,
};
use std::path::PathBuf;
use vcxgen::{config::DEFAULT_CONFIG_FILE, GenerateOptions};

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("copy-sources")
                .short('c')
                .long("copy-sources")
                .help("Copy local files to the remote machine before building")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-file")
                .short('f')
                .long("config-file")
                .help("Build command document (JSON, or TOML with a .toml extension)")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_CONFIG_FILE),
        )
        .arg(
            Arg::new("include-search-path")
                .short('i')
                .long("include-search-path")
                .help("Include search path for headers outside the project directory")
                .default_value(""),
        )
        .arg(
            Arg::new("remote-build-outputs")
                .short('b')
                .long("remote-build-outputs")
                .help("Build output produced on the remote machine")
                .default_value(""),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .help("Local directory that receives copied remote build outputs")
                .default_value(""),
        )
        .arg(
            Arg::new("local-root-dir")
                .help("Local root directory")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("relative-dir")
                .help("Directory holding the Makefile, relative to the local root")
                .required(true),
        )
        .arg(
            Arg::new("remote-root-dir")
                .help("Root directory on the remote machine matching the local root")
                .required(true),
        )
        .arg(
            Arg::new("output-file")
                .help("Name of the generated .vcxproj file")
                .required(true),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    let options = options_from(&matches);

    vcxgen::generate(&options)?;

    Ok(())
}

fn init_logging(is_verbose: bool) {
    let default_level = if is_verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn string_arg(args: &ArgMatches, name: &str) -> String {
    args.get_one::<String>(name).cloned().unwrap_or_default()
}

fn options_from(args: &ArgMatches) -> GenerateOptions {
    GenerateOptions {
        local_root_dir: args
            .get_one::<PathBuf>("local-root-dir")
            .cloned()
            .unwrap_or_default(),
        relative_dir: string_arg(args, "relative-dir"),
        remote_root_dir: string_arg(args, "remote-root-dir"),
        output_file: string_arg(args, "output-file"),
        config_file: args
            .get_one::<PathBuf>("config-file")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
        copy_sources: args.get_flag("copy-sources"),
        include_search_path: string_arg(args, "include-search-path"),
        remote_build_outputs: string_arg(args, "remote-build-outputs"),
        out_dir: string_arg(args, "out-dir"),
    }
}
